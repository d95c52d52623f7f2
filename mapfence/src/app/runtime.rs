//! The coordinator runtime.
//!
//! One tokio task owns the [`AppState`]. It drains three inputs (user
//! intents, adapter completions and tracker events), reduces each action to
//! completion before taking the next, then executes the resulting effects:
//!
//! ```text
//!  CoordinatorHandle ──intent──┐
//!  adapter tasks ───completion─┼──► reduce ──► effects ──► spawn / notify
//!  tracker session ──event─────┘       │
//!                                      └──► watch<AppState> snapshot
//! ```
//!
//! Address searches are debounced: the spawned request sleeps for the
//! debounce delay and skips the call when a newer query was issued
//! meanwhile. Results that still arrive late are dropped by the reducer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::action::{Action, Effect, Intent, Notification};
use super::reducer::reduce;
use super::services::MapServices;
use super::state::AppState;
use crate::tracking::{GeolocationTracker, PositionEvent, PositionSource, TrackerHandle};

/// Default delay before an address search is sent.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(400);

/// Coordinator tuning.
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    pub search_debounce: Duration,
    /// Capacity of the intent and completion inboxes
    pub inbox_capacity: usize,
    /// Capacity of the notification broadcast channel
    pub notification_capacity: usize,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
            inbox_capacity: 64,
            notification_capacity: 32,
        }
    }
}

/// Error returned when the coordinator task has exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Coordinator has shut down")]
pub struct CoordinatorClosed;

/// Owns the application state and drives adapters and the tracker.
pub struct Coordinator<S: MapServices, P: PositionSource> {
    services: Arc<S>,
    tracker: GeolocationTracker<P>,
    config: CoordinatorConfig,
    initial: AppState,
}

impl<S: MapServices, P: PositionSource> Coordinator<S, P> {
    pub fn new(services: S, tracker: GeolocationTracker<P>, config: CoordinatorConfig) -> Self {
        Self {
            services: Arc::new(services),
            tracker,
            config,
            initial: AppState::default(),
        }
    }

    /// Replaces the initial state (map center, zoom, defaults).
    pub fn with_initial_state(mut self, state: AppState) -> Self {
        self.initial = state;
        self
    }

    /// Spawns the runtime task.
    pub fn start(self) -> CoordinatorHandle {
        let (intent_tx, intent_rx) = mpsc::channel(self.config.inbox_capacity);
        let (action_tx, action_rx) = mpsc::channel(self.config.inbox_capacity);
        let (tracker_tx, tracker_rx) = mpsc::channel(self.config.inbox_capacity);
        let (state_tx, state_rx) = watch::channel(self.initial.clone());
        let (notify_tx, _) = broadcast::channel(self.config.notification_capacity);

        let runtime = Runtime {
            state: self.initial,
            services: self.services,
            tracker: self.tracker,
            debounce: self.config.search_debounce,
            action_tx,
            tracker_tx,
            session: 0,
            tracking: None,
            latest_search: Arc::new(AtomicU64::new(0)),
            state_tx,
            notify_tx: notify_tx.clone(),
        };

        let task = tokio::spawn(runtime.run(intent_rx, action_rx, tracker_rx));

        CoordinatorHandle {
            intents: intent_tx,
            state: state_rx,
            notifications: notify_tx,
            task,
        }
    }
}

/// Client side of a running coordinator.
pub struct CoordinatorHandle {
    intents: mpsc::Sender<Intent>,
    state: watch::Receiver<AppState>,
    notifications: broadcast::Sender<Notification>,
    task: JoinHandle<()>,
}

impl CoordinatorHandle {
    /// Submits an intent. Intents are applied in submission order.
    pub async fn dispatch(&self, intent: Intent) -> Result<(), CoordinatorClosed> {
        self.intents.send(intent).await.map_err(|_| CoordinatorClosed)
    }

    /// A receiver that observes every published snapshot.
    pub fn subscribe_state(&self) -> watch::Receiver<AppState> {
        self.state.clone()
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> AppState {
        self.state.borrow().clone()
    }

    /// Waits until a snapshot satisfies `predicate` and returns it.
    pub async fn wait_for(
        &self,
        predicate: impl FnMut(&AppState) -> bool,
    ) -> Result<AppState, CoordinatorClosed> {
        let mut rx = self.state.clone();
        let state = rx.wait_for(predicate).await.map_err(|_| CoordinatorClosed)?;
        Ok(state.clone())
    }

    /// Fence transitions and other user-facing events from now on.
    pub fn notifications(&self) -> broadcast::Receiver<Notification> {
        self.notifications.subscribe()
    }

    /// Stops the runtime, cancelling any tracking session.
    pub async fn shutdown(self) {
        drop(self.intents);
        let _ = self.task.await;
    }
}

struct Runtime<S: MapServices, P: PositionSource> {
    state: AppState,
    services: Arc<S>,
    tracker: GeolocationTracker<P>,
    debounce: Duration,
    action_tx: mpsc::Sender<Action>,
    tracker_tx: mpsc::Sender<(u64, PositionEvent)>,
    /// Incremented on every tracking start; events from older sessions are dropped
    session: u64,
    tracking: Option<TrackerHandle>,
    latest_search: Arc<AtomicU64>,
    state_tx: watch::Sender<AppState>,
    notify_tx: broadcast::Sender<Notification>,
}

impl<S: MapServices, P: PositionSource> Runtime<S, P> {
    async fn run(
        mut self,
        mut intents: mpsc::Receiver<Intent>,
        mut actions: mpsc::Receiver<Action>,
        mut tracker_events: mpsc::Receiver<(u64, PositionEvent)>,
    ) {
        info!(
            center = %self.state.center,
            zoom = self.state.zoom,
            tracker = self.tracker.source_name(),
            "Coordinator started"
        );

        loop {
            let action = tokio::select! {
                intent = intents.recv() => match intent {
                    Some(intent) => Action::Intent(intent),
                    None => break,
                },
                Some(action) = actions.recv() => action,
                Some((session, event)) = tracker_events.recv() => {
                    if session != self.session || self.tracking.is_none() {
                        debug!(session, current = self.session, "Dropping event from old tracking session");
                        continue;
                    }
                    if matches!(event, PositionEvent::Unavailable(_)) {
                        self.tracking = None;
                    }
                    Action::Position(event)
                }
            };

            self.apply(action);
        }

        if let Some(handle) = self.tracking.take() {
            handle.stop();
        }
        info!("Coordinator stopped");
    }

    fn apply(&mut self, action: Action) {
        let (next, effects) = reduce(std::mem::take(&mut self.state), action);
        self.state = next;
        self.latest_search
            .store(self.state.search.latest_seq, Ordering::SeqCst);

        for effect in effects {
            self.execute(effect);
        }

        self.state_tx.send_replace(self.state.clone());
    }

    fn execute(&mut self, effect: Effect) {
        match effect {
            Effect::Geocode { seq, query } => {
                let services = Arc::clone(&self.services);
                let latest = Arc::clone(&self.latest_search);
                let tx = self.action_tx.clone();
                let debounce = self.debounce;
                tokio::spawn(async move {
                    tokio::time::sleep(debounce).await;
                    if latest.load(Ordering::SeqCst) != seq {
                        debug!(seq, query = %query, "Search superseded before sending");
                        return;
                    }
                    let places = services.geocode(&query).await;
                    let _ = tx.send(Action::GeocodeCompleted { seq, places }).await;
                });
            }

            Effect::SearchPoi { seq, query } => {
                let services = Arc::clone(&self.services);
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    let pois = services.search_poi(&query).await;
                    let _ = tx.send(Action::PoiCompleted { seq, pois }).await;
                });
            }

            Effect::PlanRoute { from, to } => {
                let services = Arc::clone(&self.services);
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    let plan = services.route(from, to).await;
                    let _ = tx.send(Action::RouteCompleted(plan)).await;
                });
            }

            Effect::FetchWeather { at } => {
                let services = Arc::clone(&self.services);
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    let weather = services.weather(at).await;
                    let _ = tx.send(Action::WeatherCompleted(weather)).await;
                });
            }

            Effect::StartTracking => self.start_tracking(),

            Effect::StopTracking => {
                if let Some(handle) = self.tracking.take() {
                    handle.stop();
                    info!(session = self.session, "Tracking stopped");
                }
            }

            Effect::Notify(notification) => {
                info!(%notification, "Notification");
                // No subscribers is fine
                let _ = self.notify_tx.send(notification);
            }
        }
    }

    fn start_tracking(&mut self) {
        if let Some(previous) = self.tracking.take() {
            previous.stop();
        }

        self.session += 1;
        let session = self.session;
        let (tx, mut rx) = mpsc::channel(32);
        let handle = self.tracker.start(tx);

        let forward = self.tracker_tx.clone();
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                if forward.send((session, event)).await.is_err() {
                    break;
                }
            }
        });

        self.tracking = Some(handle);
        info!(session, "Tracking session started");
    }
}
