//! Application coordinator
//!
//! All application state lives in one [`AppState`] value. Changes happen only
//! through [`reduce`], a pure function from `(state, action)` to
//! `(state, effects)`. The [`Coordinator`] runtime owns the state, runs the
//! effects (adapter calls, tracker start/stop, notifications) and publishes a
//! snapshot after every action.
//!
//! # Example
//!
//! ```ignore
//! use mapfence::app::{Coordinator, CoordinatorConfig, Intent};
//!
//! let handle = Coordinator::new(services, tracker, CoordinatorConfig::default()).start();
//! let mut alerts = handle.notifications();
//!
//! handle.dispatch(Intent::SetGeofenceHere { radius_m: None }).await?;
//! handle.dispatch(Intent::StartTracking).await?;
//!
//! while let Ok(alert) = alerts.recv().await {
//!     println!("{}", alert);
//! }
//! ```

mod action;
mod reducer;
mod runtime;
mod services;
mod state;

pub use action::{Action, Effect, Intent, Notification};
pub use reducer::reduce;
pub use runtime::{
    Coordinator, CoordinatorClosed, CoordinatorConfig, CoordinatorHandle, DEFAULT_SEARCH_DEBOUNCE,
};
pub use services::{HttpServices, MapServices, ServiceEndpoints, Services};
pub use state::{
    AppState, Marker, MarkerId, MarkerSource, PoiState, RouteRole, SearchState, TrackedPosition,
    DEFAULT_FENCE_RADIUS_M, DEFAULT_ZOOM,
};
