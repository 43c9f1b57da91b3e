//! Pointing service: orchestrates status changes, tracking and events.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::astro::tracker::round_sample;
use crate::astro::{Body, Tracker};
use crate::domain::{
    AppStatus, CoordSample, EventBus, Meteorological, PointingEvent, StatusManager, StatusSnapshot,
};
use crate::error::GatewayError;
use crate::meteo::MeteoClient;

/// A request to start pointing at a body.
#[derive(Debug, Clone, Default)]
pub struct PointingRequest {
    /// Target name, e.g. `"mars"`. Surrounding whitespace is ignored.
    pub target: String,
    /// Conditions supplied by the operator; missing values come from the
    /// weather API when it is enabled.
    pub conditions: Meteorological,
}

/// Tracking loop tuning.
#[derive(Debug, Clone, Copy)]
pub struct TrackingSettings {
    /// Period between two alt/az computations.
    pub interval: Duration,
    /// Decimal places kept in published coordinates.
    pub coord_decimals: u32,
}

impl Default for TrackingSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            coord_decimals: 4,
        }
    }
}

#[derive(Debug)]
struct ActiveTracking {
    generation: u64,
    target: String,
    handle: JoinHandle<()>,
}

/// Orchestration layer for all pointing operations.
///
/// Cheap to clone: all state lives behind `Arc`s. Every mutation follows
/// the pattern: validate → update [`StatusManager`] → publish event →
/// start or stop the tracking task.
#[derive(Debug, Clone)]
pub struct PointingService {
    status: Arc<StatusManager>,
    tracker: Tracker,
    event_bus: EventBus,
    meteo: Option<Arc<MeteoClient>>,
    settings: TrackingSettings,
    generation: Arc<AtomicU64>,
    tracking: Arc<Mutex<Option<ActiveTracking>>>,
}

impl PointingService {
    /// Creates a new `PointingService`.
    ///
    /// `meteo` is consulted only when present and enabled.
    #[must_use]
    pub fn new(
        tracker: Tracker,
        event_bus: EventBus,
        meteo: Option<Arc<MeteoClient>>,
        settings: TrackingSettings,
    ) -> Self {
        Self {
            status: Arc::new(StatusManager::new()),
            tracker,
            event_bus,
            meteo,
            settings,
            generation: Arc::new(AtomicU64::new(0)),
            tracking: Arc::new(Mutex::new(None)),
        }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Returns the weather client, if one is configured.
    #[must_use]
    pub fn meteo(&self) -> Option<&Arc<MeteoClient>> {
        self.meteo.as_ref()
    }

    /// Returns the current status snapshot.
    pub async fn status(&self) -> StatusSnapshot {
        self.status.snapshot().await
    }

    /// Returns the target currently being tracked, if any.
    pub async fn tracking_target(&self) -> Option<String> {
        self.tracking
            .lock()
            .await
            .as_ref()
            .map(|active| active.target.clone())
    }

    /// Starts pointing at the requested body.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::InvalidTarget`] if the target is blank.
    /// - [`GatewayError::UnknownBody`] if it names no supported body.
    /// - [`GatewayError::InvalidMeasurement`] if a supplied reading is not
    ///   finite; the service is back to idle in that case.
    pub async fn point_to(&self, request: PointingRequest) -> Result<StatusSnapshot, GatewayError> {
        let target = request.target.trim();
        if target.is_empty() {
            return Err(GatewayError::InvalidTarget(
                "target must be a non-empty string".to_string(),
            ));
        }
        let body: Body = target.parse()?;
        let conditions = self.resolve_conditions(request.conditions).await;

        // held until the new task is in place; idle takes the same guard
        let mut slot = self.tracking.lock().await;
        self.cancel_tracking(&mut slot);
        self.status.set_status(AppStatus::Pointing, Some(target)).await?;
        let snapshot = match self.status.set_meteorological(conditions).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                // the manager already dropped back to IDLE
                self.publish_status(self.status.snapshot().await);
                return Err(err);
            }
        };
        self.publish_status(snapshot.clone());

        self.start_tracking(&mut slot, body, target.to_string(), conditions);
        tracing::info!(object = target, %body, "pointing started");
        Ok(snapshot)
    }

    /// Stops tracking and returns to `IDLE`.
    pub async fn stop_pointing(&self) -> StatusSnapshot {
        self.idle().await
    }

    /// Cancels tracking, sets `IDLE` and publishes the new status.
    pub async fn idle(&self) -> StatusSnapshot {
        let mut slot = self.tracking.lock().await;
        self.cancel_tracking(&mut slot);
        self.enter_idle().await
    }

    /// Marks the current pointing as established.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidState`] unless currently pointing.
    pub async fn establish(&self) -> Result<StatusSnapshot, GatewayError> {
        let snapshot = self.status.set_established(true).await?;
        self.publish_status(snapshot.clone());
        tracing::info!(object = ?snapshot.target, "pointing established");
        Ok(snapshot)
    }

    async fn resolve_conditions(&self, supplied: Meteorological) -> Meteorological {
        match &self.meteo {
            Some(meteo) if meteo.is_enabled() && !supplied.is_complete() => {
                supplied.or(meteo.current().await.conditions)
            }
            _ => supplied,
        }
    }

    async fn enter_idle(&self) -> StatusSnapshot {
        let snapshot = match self.status.set_status(AppStatus::Idle, None).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::error!(error = %err, "failed to enter IDLE");
                self.status.snapshot().await
            }
        };
        self.publish_status(snapshot.clone());
        tracing::info!("pointing stopped");
        snapshot
    }

    fn publish_status(&self, snapshot: StatusSnapshot) {
        let _ = self.event_bus.publish(PointingEvent::StatusUpdate(snapshot));
    }

    fn cancel_tracking(&self, slot: &mut Option<ActiveTracking>) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(active) = slot.take() {
            active.handle.abort();
            tracing::debug!(object = %active.target, "tracking cancelled");
        }
    }

    fn start_tracking(
        &self,
        slot: &mut Option<ActiveTracking>,
        body: Body,
        target: String,
        conditions: Meteorological,
    ) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let service = self.clone();
        let handle = tokio::spawn(async move {
            service.track_loop(body, generation, conditions).await;
        });
        *slot = Some(ActiveTracking {
            generation,
            target,
            handle,
        });
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    async fn track_loop(&self, body: Body, generation: u64, conditions: Meteorological) {
        let mut ticker = tokio::time::interval(self.settings.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut last: Option<CoordSample> = None;

        loop {
            ticker.tick().await;
            if !self.is_current(generation) || self.status.status().await != AppStatus::Pointing {
                break;
            }

            match self.tracker.alt_az(body, Utc::now(), &conditions) {
                Ok(sample) => {
                    let sample = round_sample(sample, self.settings.coord_decimals);
                    if last != Some(sample) {
                        let _ = self.event_bus.publish(PointingEvent::CoordUpdate(sample));
                        last = Some(sample);
                    }
                }
                Err(err) => {
                    tracing::error!(error = %err, %body, "tracking failed, returning to idle");
                    self.abandon_tracking(generation).await;
                    break;
                }
            }
        }
        tracing::debug!(%body, generation, "tracking loop finished");
    }

    /// Leaves tracking from inside the loop itself: the slot is cleared
    /// without aborting the running task.
    async fn abandon_tracking(&self, generation: u64) {
        let mut slot = self.tracking.lock().await;
        if !slot.as_ref().is_some_and(|a| a.generation == generation) {
            return;
        }
        slot.take();
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.enter_idle().await;
    }
}
