//! One-shot connectivity check

use tracing::debug;

use crate::api::{HttpMoodService, MoodService};
use crate::core::health::{ConnectivityStatus, COLD_START_NOTICE};

/// Run the health check and describe it.
///
/// Returns the status together with the lines destined for stdout and stderr.
pub async fn check<S: MoodService + ?Sized>(
    service: &S,
    base_url: &str,
) -> (ConnectivityStatus, String, Option<String>) {
    let result = service.health().await;
    let status = ConnectivityStatus::from_health(&result);
    debug!(?status, "health check finished");

    let summary = format!("{} ({base_url})", status.label());
    let detail = match (&result, status) {
        (Err(err), _) => Some(format!("❌ {err}\n{COLD_START_NOTICE}")),
        (Ok(health), ConnectivityStatus::Degraded) => Some(format!(
            "⚠️  status: {}, models loaded: {}",
            health.status, health.models_loaded
        )),
        _ => None,
    };
    (status, summary, detail)
}

/// Print the service status and return the process exit code.
pub async fn run_health(service: &HttpMoodService) -> i32 {
    let (status, summary, detail) = check(service, service.base_url()).await;
    println!("{summary}");
    if let Some(detail) = detail {
        eprintln!("{detail}");
    }
    status.exit_code()
}
