//! Thread-safe owner of the pointing status.
//!
//! [`StatusManager`] serializes every mutation through a single
//! [`tokio::sync::RwLock`] and enforces the status invariants:
//!
//! - `POINTING` requires a non-empty target and resets `established`.
//! - `IDLE` never carries a target and clears all recorded conditions.
//! - `established` can only be set while `POINTING`.
//! - Conditions must be finite; a bad reading drops back to `IDLE`.

use tokio::sync::RwLock;

use super::status::{AppStatus, Meteorological, StatusSnapshot};
use crate::error::GatewayError;

#[derive(Debug, Default)]
struct StatusState {
    status: AppStatus,
    target: Option<String>,
    established: bool,
    meteorological: Meteorological,
}

impl StatusState {
    fn reset_idle(&mut self) {
        self.status = AppStatus::Idle;
        self.target = None;
        self.established = false;
        self.meteorological = Meteorological::default();
    }

    fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            status: self.status,
            target: self.target.clone(),
            established: self.established,
            meteorological: self.meteorological,
        }
    }
}

/// Shared pointing status with validated transitions.
#[derive(Debug, Default)]
pub struct StatusManager {
    state: RwLock<StatusState>,
}

impl StatusManager {
    /// Creates a manager in the `IDLE` status.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pointing status.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidTarget`] if `POINTING` is requested
    /// without a non-empty target, or `IDLE` is requested with one.
    pub async fn set_status(
        &self,
        status: AppStatus,
        target: Option<&str>,
    ) -> Result<StatusSnapshot, GatewayError> {
        let mut state = self.state.write().await;
        match status {
            AppStatus::Pointing => {
                let Some(target) = target.filter(|t| !t.is_empty()) else {
                    return Err(GatewayError::InvalidTarget(
                        "POINTING requires a target string".to_string(),
                    ));
                };
                state.status = AppStatus::Pointing;
                state.established = false;
                state.target = Some(target.to_string());
            }
            AppStatus::Idle => {
                if target.is_some() {
                    return Err(GatewayError::InvalidTarget(
                        "IDLE status cannot have a target".to_string(),
                    ));
                }
                state.reset_idle();
            }
        }
        tracing::debug!(status = %state.status, object = ?state.target, "status changed");
        Ok(state.snapshot())
    }

    /// Sets the `established` flag.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidState`] unless the status is `POINTING`.
    pub async fn set_established(&self, established: bool) -> Result<StatusSnapshot, GatewayError> {
        let mut state = self.state.write().await;
        if state.status != AppStatus::Pointing {
            return Err(GatewayError::InvalidState(
                "cannot set 'established' unless status is POINTING".to_string(),
            ));
        }
        state.established = established;
        Ok(state.snapshot())
    }

    /// Records the atmospheric conditions for the current pointing.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidMeasurement`] naming the first
    /// non-finite reading. The status is reset to `IDLE` in that case.
    pub async fn set_meteorological(
        &self,
        conditions: Meteorological,
    ) -> Result<StatusSnapshot, GatewayError> {
        let mut state = self.state.write().await;
        let readings = [
            ("temperature", conditions.temperature),
            ("pressure", conditions.pressure),
            ("humidity", conditions.humidity),
        ];
        for (field, value) in readings {
            if value.is_some_and(|v| !v.is_finite()) {
                state.reset_idle();
                tracing::warn!(field, "rejected non-finite reading, status reset to IDLE");
                return Err(GatewayError::InvalidMeasurement { field });
            }
        }
        state.meteorological = conditions;
        Ok(state.snapshot())
    }

    /// Returns the current status, target, established flag and conditions.
    pub async fn snapshot(&self) -> StatusSnapshot {
        self.state.read().await.snapshot()
    }

    /// Returns only the current status.
    pub async fn status(&self) -> AppStatus {
        self.state.read().await.status
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starts_idle() {
        let manager = StatusManager::new();
        let snap = manager.snapshot().await;
        assert_eq!(snap.status, AppStatus::Idle);
        assert_eq!(snap.target, None);
        assert!(!snap.established);
    }

    #[tokio::test]
    async fn pointing_requires_target() {
        let manager = StatusManager::new();
        let result = manager.set_status(AppStatus::Pointing, None).await;
        assert!(matches!(result, Err(GatewayError::InvalidTarget(_))));
        let result = manager.set_status(AppStatus::Pointing, Some("")).await;
        assert!(matches!(result, Err(GatewayError::InvalidTarget(_))));
        assert_eq!(manager.status().await, AppStatus::Idle);
    }

    #[tokio::test]
    async fn idle_rejects_target() {
        let manager = StatusManager::new();
        let result = manager.set_status(AppStatus::Idle, Some("M42")).await;
        assert!(matches!(result, Err(GatewayError::InvalidTarget(_))));
    }

    #[tokio::test]
    async fn pointing_resets_established() {
        let manager = StatusManager::new();
        tokio_test::assert_ok!(manager.set_status(AppStatus::Pointing, Some("M42")).await);
        tokio_test::assert_ok!(manager.set_established(true).await);
        assert!(manager.snapshot().await.established);

        let Ok(snap) = manager.set_status(AppStatus::Pointing, Some("mars")).await else {
            panic!("re-pointing failed");
        };
        assert!(!snap.established);
        assert_eq!(snap.target.as_deref(), Some("mars"));
    }

    #[tokio::test]
    async fn established_requires_pointing() {
        let manager = StatusManager::new();
        let result = manager.set_established(true).await;
        assert!(matches!(result, Err(GatewayError::InvalidState(_))));
    }

    #[tokio::test]
    async fn idle_clears_everything() {
        let manager = StatusManager::new();
        tokio_test::assert_ok!(manager.set_status(AppStatus::Pointing, Some("M42")).await);
        tokio_test::assert_ok!(
            manager
                .set_meteorological(Meteorological {
                    temperature: Some(12.0),
                    pressure: Some(1000.0),
                    humidity: Some(0.4),
                })
                .await
        );
        tokio_test::assert_ok!(manager.set_established(true).await);

        let Ok(snap) = manager.set_status(AppStatus::Idle, None).await else {
            panic!("idle failed");
        };
        assert_eq!(snap.target, None);
        assert!(!snap.established);
        assert_eq!(snap.meteorological, Meteorological::default());
    }

    #[tokio::test]
    async fn non_finite_reading_resets_to_idle() {
        let manager = StatusManager::new();
        tokio_test::assert_ok!(manager.set_status(AppStatus::Pointing, Some("M42")).await);
        let result = manager
            .set_meteorological(Meteorological {
                temperature: Some(10.0),
                pressure: Some(f64::NAN),
                humidity: None,
            })
            .await;
        assert!(matches!(
            result,
            Err(GatewayError::InvalidMeasurement { field: "pressure" })
        ));
        assert_eq!(manager.status().await, AppStatus::Idle);
    }
}
