//! HTTP client for the mood classification service.
//!
//! The service exposes two JSON endpoints, `GET /health` and `POST /predict`.
//! [`MoodService`] is the seam the controller talks to so that the event
//! loop can run the reqwest-backed implementation while tests substitute a
//! recording double.

use std::error::Error as StdError;
use std::fmt;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{HealthResponse, PredictRequest, PredictResponse};
use crate::utils::url::construct_api_url;

/// Errors produced while talking to the classification service.
#[derive(Debug)]
pub enum ApiError {
    /// The request never produced an HTTP response (DNS, connect, TLS, reset).
    Transport(reqwest::Error),
    /// The service answered with a non-2xx status.
    Status { code: u16, reason: String },
    /// A 2xx response whose body did not match the expected shape.
    Malformed(String),
}

impl ApiError {
    fn from_status(status: StatusCode) -> Self {
        ApiError::Status {
            code: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(err) => write!(f, "Network error: {err}"),
            ApiError::Status { code, reason } => write!(f, "Error {code}: {reason}"),
            ApiError::Malformed(detail) => write!(f, "Malformed response: {detail}"),
        }
    }
}

impl StdError for ApiError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ApiError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err)
    }
}

#[async_trait]
pub trait MoodService: Send + Sync {
    async fn health(&self) -> Result<HealthResponse, ApiError>;
    async fn predict(&self, message: &str) -> Result<PredictResponse, ApiError>;
}

#[derive(Clone)]
pub struct HttpMoodService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMoodService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::from_status(status));
        }

        let body = response.text().await?;
        serde_json::from_str::<T>(&body).map_err(|err| ApiError::Malformed(err.to_string()))
    }
}

#[async_trait]
impl MoodService for HttpMoodService {
    async fn health(&self) -> Result<HealthResponse, ApiError> {
        let url = construct_api_url(&self.base_url, "health");
        debug!(%url, "checking service health");

        let response = self
            .client
            .get(url)
            .header("Content-Type", "application/json")
            .send()
            .await?;

        Self::decode::<HealthResponse>(response).await
    }

    async fn predict(&self, message: &str) -> Result<PredictResponse, ApiError> {
        let url = construct_api_url(&self.base_url, "predict");
        debug!(%url, chars = message.chars().count(), "sending predict request");

        let request = PredictRequest {
            message: message.to_string(),
        };
        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let parsed = Self::decode::<PredictResponse>(response).await?;
        validate_prediction(&parsed)?;
        Ok(parsed)
    }
}

fn validate_prediction(response: &PredictResponse) -> Result<(), ApiError> {
    let confidence = response.prediction.confidence;
    if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
        return Err(ApiError::Malformed(format!(
            "confidence {confidence} is outside [0, 1]"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    type CapturedRequests = Arc<Mutex<Vec<(String, Vec<u8>)>>>;

    async fn read_http_request(
        stream: &mut tokio::net::TcpStream,
    ) -> Result<(String, Vec<u8>), String> {
        let mut buffer = Vec::new();
        let mut header_end = None;
        while header_end.is_none() {
            let mut chunk = [0_u8; 1024];
            let read = stream
                .read(&mut chunk)
                .await
                .map_err(|err| err.to_string())?;
            if read == 0 {
                return Err("Unexpected EOF while reading HTTP headers".to_string());
            }
            buffer.extend_from_slice(&chunk[..read]);
            header_end = buffer
                .windows(4)
                .position(|window| window == b"\r\n\r\n")
                .map(|index| index + 4);
        }

        let header_end = header_end.expect("header end should exist");
        let header_text =
            std::str::from_utf8(&buffer[..header_end]).map_err(|err| err.to_string())?;
        let mut lines = header_text.split("\r\n").filter(|line| !line.is_empty());
        let request_line = lines
            .next()
            .ok_or_else(|| "Missing HTTP request line".to_string())?
            .to_string();

        let content_length = lines
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .map(|(_, value)| value.trim().parse::<usize>().unwrap_or(0))
            .unwrap_or(0);

        let mut body = buffer[header_end..].to_vec();
        while body.len() < content_length {
            let mut chunk = vec![0_u8; content_length - body.len()];
            let read = stream
                .read(&mut chunk)
                .await
                .map_err(|err| err.to_string())?;
            if read == 0 {
                break;
            }
            body.extend_from_slice(&chunk[..read]);
        }

        Ok((request_line, body))
    }

    /// Serve one canned response per accepted connection and record the requests.
    async fn spawn_stub(responses: Vec<(u16, &'static str)>) -> (String, CapturedRequests) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("listener should bind");
        let addr = listener.local_addr().expect("local addr should resolve");
        let captured: CapturedRequests = Arc::new(Mutex::new(Vec::new()));
        let captured_for_server = Arc::clone(&captured);

        tokio::spawn(async move {
            for (status, body) in responses {
                let (mut stream, _) = listener.accept().await.map_err(|err| err.to_string())?;
                let request = read_http_request(&mut stream).await?;
                captured_for_server.lock().unwrap().push(request);
                let reason = StatusCode::from_u16(status)
                    .ok()
                    .and_then(|code| code.canonical_reason())
                    .unwrap_or("Unknown");
                let response = format!(
                    "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                stream
                    .write_all(response.as_bytes())
                    .await
                    .map_err(|err| err.to_string())?;
            }
            Ok::<(), String>(())
        });

        (format!("http://{addr}/"), captured)
    }

    #[tokio::test]
    async fn health_decodes_ready_body() {
        let (base_url, captured) =
            spawn_stub(vec![(200, r#"{"status":"healthy","models_loaded":true}"#)]).await;
        let service = HttpMoodService::new(base_url);

        let health = service.health().await.expect("health should succeed");
        assert!(health.is_fully_ready());

        let requests = captured.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].0.starts_with("GET /health "));
    }

    #[tokio::test]
    async fn health_reports_status_errors() {
        let (base_url, _) = spawn_stub(vec![(503, r#"{"detail":"warming up"}"#)]).await;
        let service = HttpMoodService::new(base_url);

        let err = service.health().await.expect_err("503 should fail");
        assert_eq!(err.to_string(), "Error 503: Service Unavailable");
    }

    #[tokio::test]
    async fn health_rejects_malformed_body() {
        let (base_url, _) = spawn_stub(vec![(200, r#"{"ok":true}"#)]).await;
        let service = HttpMoodService::new(base_url);

        let err = service.health().await.expect_err("missing fields should fail");
        assert!(matches!(err, ApiError::Malformed(_)));
    }

    #[tokio::test]
    async fn predict_posts_message_and_decodes_prediction() {
        let (base_url, captured) = spawn_stub(vec![(
            200,
            r#"{"prediction":{"label":"Ansiedad","confidence":0.91},"response":"Entiendo..."}"#,
        )])
        .await;
        let service = HttpMoodService::new(base_url);

        let result = service
            .predict("Me siento ansioso")
            .await
            .expect("predict should succeed");
        assert_eq!(result.prediction.label, "Ansiedad");
        assert_eq!(result.response, "Entiendo...");

        let requests = captured.lock().unwrap();
        assert!(requests[0].0.starts_with("POST /predict "));
        let body: serde_json::Value = serde_json::from_slice(&requests[0].1).unwrap();
        assert_eq!(body, serde_json::json!({ "message": "Me siento ansioso" }));
    }

    #[tokio::test]
    async fn predict_maps_server_error_status() {
        let (base_url, _) = spawn_stub(vec![(500, r#"{"detail":"boom"}"#)]).await;
        let service = HttpMoodService::new(base_url);

        let err = service.predict("hola").await.expect_err("500 should fail");
        assert!(matches!(err, ApiError::Status { code: 500, .. }));
        assert_eq!(err.to_string(), "Error 500: Internal Server Error");
    }

    #[tokio::test]
    async fn predict_rejects_out_of_range_confidence() {
        let (base_url, _) = spawn_stub(vec![(
            200,
            r#"{"prediction":{"label":"Neutro","confidence":1.7},"response":"ok"}"#,
        )])
        .await;
        let service = HttpMoodService::new(base_url);

        let err = service.predict("hola").await.expect_err("confidence > 1");
        assert!(err.to_string().contains("outside [0, 1]"));
    }

    #[tokio::test]
    async fn predict_reports_transport_failures() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let service = HttpMoodService::new(format!("http://{addr}"));
        let err = service.predict("hola").await.expect_err("nothing listening");
        assert!(matches!(err, ApiError::Transport(_)));
        assert!(err.to_string().starts_with("Network error:"));
    }
}
