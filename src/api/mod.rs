use serde::{Deserialize, Serialize};

pub mod client;

pub use client::{ApiError, HttpMoodService, MoodService};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub models_loaded: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictRequest {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictResponse {
    pub prediction: Prediction,
    pub response: String,
}

impl HealthResponse {
    /// The service is fully ready only when it reports healthy with its models loaded.
    pub fn is_fully_ready(&self) -> bool {
        self.status == "healthy" && self.models_loaded
    }
}
