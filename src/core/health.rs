use ratatui::style::Color;

use crate::api::{ApiError, HealthResponse};

pub const COLD_START_NOTICE: &str = "The API is not available right now. The service may still be starting up (the first load can take 30-60 seconds).";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityStatus {
    /// The startup check has not reported yet.
    #[default]
    Unknown,
    Healthy,
    /// Reachable, but the model is not loaded.
    Degraded,
    Unreachable,
}

impl ConnectivityStatus {
    pub fn from_health(result: &Result<HealthResponse, ApiError>) -> Self {
        match result {
            Ok(health) if health.is_fully_ready() => ConnectivityStatus::Healthy,
            Ok(_) => ConnectivityStatus::Degraded,
            Err(_) => ConnectivityStatus::Unreachable,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConnectivityStatus::Unknown => "Checking API...",
            ConnectivityStatus::Healthy => "API connected",
            ConnectivityStatus::Degraded => "API partially available",
            ConnectivityStatus::Unreachable => "API unavailable",
        }
    }

    pub fn color(self) -> Color {
        match self {
            ConnectivityStatus::Unknown => Color::Rgb(0x64, 0x74, 0x8b),
            ConnectivityStatus::Healthy => Color::Rgb(0x05, 0x96, 0x69),
            ConnectivityStatus::Degraded => Color::Rgb(0xd9, 0x77, 0x06),
            ConnectivityStatus::Unreachable => Color::Rgb(0xdc, 0x26, 0x26),
        }
    }

    /// Process exit code used by `moodbot health`.
    pub fn exit_code(self) -> i32 {
        match self {
            ConnectivityStatus::Healthy => 0,
            ConnectivityStatus::Degraded => 2,
            ConnectivityStatus::Unknown | ConnectivityStatus::Unreachable => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn health(status: &str, models_loaded: bool) -> Result<HealthResponse, ApiError> {
        Ok(HealthResponse {
            status: status.into(),
            models_loaded,
        })
    }

    #[test]
    fn ready_service_is_healthy() {
        assert_eq!(
            ConnectivityStatus::from_health(&health("healthy", true)),
            ConnectivityStatus::Healthy
        );
    }

    #[test]
    fn partial_readiness_is_degraded() {
        assert_eq!(
            ConnectivityStatus::from_health(&health("healthy", false)),
            ConnectivityStatus::Degraded
        );
        assert_eq!(
            ConnectivityStatus::from_health(&health("loading", true)),
            ConnectivityStatus::Degraded
        );
    }

    #[test]
    fn failures_are_unreachable() {
        let result = Err(ApiError::Status {
            code: 502,
            reason: "Bad Gateway".into(),
        });
        let status = ConnectivityStatus::from_health(&result);
        assert_eq!(status, ConnectivityStatus::Unreachable);
        assert_eq!(status.exit_code(), 1);
        assert_eq!(status.label(), "API unavailable");
    }
}
