//! Geofence membership tracking.
//!
//! A [`Geofence`] is a single circular region. [`evaluate`] is the monitor:
//! a pure function of the tracked position, the fence and the previous
//! [`FenceStatus`] that yields the new status and, when membership changed
//! after a baseline was established, exactly one [`FenceTransition`].
//!
//! ```
//! use mapfence::coord::Coordinate;
//! use mapfence::geofence::{evaluate, FenceStatus, FenceTransition, Geofence};
//!
//! let fence = Geofence::new(Coordinate::new(28.6139, 77.2090).unwrap(), 400.0).unwrap();
//! let near = Coordinate::new(28.6140, 77.2091).unwrap();
//!
//! // First observation sets the baseline silently
//! let first = evaluate(Some(near), Some(&fence), FenceStatus::Unknown);
//! assert_eq!(first.status, FenceStatus::Inside);
//! assert_eq!(first.transition, None);
//! ```

mod types;

pub use types::{FenceError, FenceEvaluation, FenceStatus, FenceTransition, Geofence};

use crate::coord::Coordinate;

/// Evaluates fence membership for the current position.
///
/// - No position or no fence: [`FenceStatus::Unknown`], no transition.
/// - Previous status unknown: the computed membership becomes the baseline
///   without a transition.
/// - Membership differs from the previous status: the new status plus one
///   transition tagged with the direction of change.
/// - Otherwise the previous status is returned unchanged.
///
/// A position exactly on the boundary counts as inside.
pub fn evaluate(
    position: Option<Coordinate>,
    fence: Option<&Geofence>,
    previous: FenceStatus,
) -> FenceEvaluation {
    let (Some(position), Some(fence)) = (position, fence) else {
        return FenceEvaluation::unknown();
    };

    let status = if fence.contains(&position) {
        FenceStatus::Inside
    } else {
        FenceStatus::Outside
    };

    let transition = match (previous, status) {
        (FenceStatus::Outside, FenceStatus::Inside) => Some(FenceTransition::Entered),
        (FenceStatus::Inside, FenceStatus::Outside) => Some(FenceTransition::Exited),
        _ => None,
    };

    FenceEvaluation { status, transition }
}
