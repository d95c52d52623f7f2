//! Geofence data types

use std::fmt;

use thiserror::Error;

use crate::coord::Coordinate;

/// Errors raised when constructing a geofence.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FenceError {
    /// Radius is negative or not a finite number
    #[error("Invalid geofence radius: {0} (must be a finite, non-negative number of meters)")]
    InvalidRadius(f64),
}

/// A circular region around a center coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geofence {
    /// Center of the circle
    pub center: Coordinate,
    /// Radius in meters
    pub radius_m: f64,
}

impl Geofence {
    /// Creates a geofence with the given radius in meters.
    pub fn new(center: Coordinate, radius_m: f64) -> Result<Self, FenceError> {
        if !radius_m.is_finite() || radius_m < 0.0 {
            return Err(FenceError::InvalidRadius(radius_m));
        }
        Ok(Self { center, radius_m })
    }

    /// Returns a copy of this fence moved to `center`, keeping the radius.
    pub fn moved_to(&self, center: Coordinate) -> Self {
        Self {
            center,
            radius_m: self.radius_m,
        }
    }

    /// Whether `position` lies within the radius (boundary inclusive).
    #[inline]
    pub fn contains(&self, position: &Coordinate) -> bool {
        self.center.distance_to(position) <= self.radius_m
    }
}

/// Membership of the tracked position relative to the geofence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FenceStatus {
    /// No fence or no tracked position yet
    #[default]
    Unknown,
    /// Position is within the radius
    Inside,
    /// Position is beyond the radius
    Outside,
}

impl fmt::Display for FenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenceStatus::Unknown => write!(f, "Unknown"),
            FenceStatus::Inside => write!(f, "Inside"),
            FenceStatus::Outside => write!(f, "Outside"),
        }
    }
}

/// Direction of a membership change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceTransition {
    /// Outside to inside
    Entered,
    /// Inside to outside
    Exited,
}

impl fmt::Display for FenceTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenceTransition::Entered => write!(f, "Entered geofence"),
            FenceTransition::Exited => write!(f, "Exited geofence"),
        }
    }
}

/// Result of one geofence evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceEvaluation {
    pub status: FenceStatus,
    /// Present only when membership changed from a known status
    pub transition: Option<FenceTransition>,
}

impl FenceEvaluation {
    pub(crate) fn unknown() -> Self {
        Self {
            status: FenceStatus::Unknown,
            transition: None,
        }
    }
}
