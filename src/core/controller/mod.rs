//! The message-exchange controller.
//!
//! [`ExchangeController`] owns everything the chat screen shows: the
//! transcript, the composer, the connectivity indicator, the notification
//! banner and the processing flag. It never performs I/O itself. A
//! submission is split into [`ExchangeController::begin_submit`], which
//! applies the optimistic updates and hands back a [`PredictTicket`], and
//! [`ExchangeController::finish_submit`], which renders whatever the
//! service returned. The event loop runs the request in between;
//! [`ExchangeController::submit`] does all three inline.

use std::time::Instant;

use tracing::{debug, info, warn};

use super::composer::{submit_enabled, Composer};
use super::health::{ConnectivityStatus, COLD_START_NOTICE};
use super::message::{ChatEntry, ConversationTurn, PredictionResult};
use super::notification::Notification;
use crate::api::{ApiError, HealthResponse, MoodService, PredictResponse};
use crate::utils::scroll::ScrollState;


/// A predict request the caller must dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictTicket {
    pub message: String,
}

pub struct ExchangeController {
    composer: Composer,
    entries: Vec<ChatEntry>,
    history: Vec<ConversationTurn>,
    is_processing: bool,
    in_flight: Option<String>,
    welcome_visible: bool,
    loading_visible: bool,
    status: ConnectivityStatus,
    notification: Option<Notification>,
    scroll: ScrollState,
}

impl Default for ExchangeController {
    fn default() -> Self {
        Self::new()
    }
}

impl ExchangeController {
    pub fn new() -> Self {
        Self {
            composer: Composer::new(),
            entries: Vec::new(),
            history: Vec::new(),
            is_processing: false,
            in_flight: None,
            welcome_visible: true,
            loading_visible: false,
            status: ConnectivityStatus::Unknown,
            notification: None,
            scroll: ScrollState::new(),
        }
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn composer_mut(&mut self) -> &mut Composer {
        &mut self.composer
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn history(&self) -> &[ConversationTurn] {
        &self.history
    }

    pub fn is_processing(&self) -> bool {
        self.is_processing
    }

    pub fn is_welcome_visible(&self) -> bool {
        self.welcome_visible
    }

    pub fn is_loading_visible(&self) -> bool {
        self.loading_visible
    }

    pub fn status(&self) -> ConnectivityStatus {
        self.status
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn scroll_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }

    pub fn can_submit(&self) -> bool {
        submit_enabled(&self.composer.text(), self.is_processing)
    }

    /// Record the outcome of the startup health check.
    pub fn apply_health_result(
        &mut self,
        result: Result<HealthResponse, ApiError>,
        now: Instant,
    ) -> ConnectivityStatus {
        let status = ConnectivityStatus::from_health(&result);
        match &result {
            Ok(health) => info!(
                status = %health.status,
                models_loaded = health.models_loaded,
                "health check completed"
            ),
            Err(err) => {
                warn!(error = %err, "health check failed");
                self.notification = Some(Notification::new("Notice", COLD_START_NOTICE, now));
            }
        }
        self.status = status;
        status
    }

    /// Run the startup health check against `service`.
    pub async fn check_health<S: MoodService + ?Sized>(&mut self, service: &S) -> ConnectivityStatus {
        let result = service.health().await;
        self.apply_health_result(result, Instant::now())
    }

    pub fn dismiss_notification(&mut self) -> bool {
        self.notification.take().is_some()
    }

    /// Apply the optimistic half of a submission.
    ///
    /// Returns `None` without touching any state when the composer is blank
    /// or a request is already in flight.
    pub fn begin_submit(&mut self, now: Instant) -> Option<PredictTicket> {
        let text = self.composer.text().trim().to_string();
        if text.is_empty() || self.is_processing {
            debug!(
                blank = text.is_empty(),
                processing = self.is_processing,
                "submission ignored"
            );
            return None;
        }

        self.welcome_visible = false;
        self.push_entry(ChatEntry::user(text.clone()), now);

        self.composer.clear();
        self.composer.set_focused(false);

        self.is_processing = true;
        self.in_flight = Some(text.clone());
        self.loading_visible = true;
        self.scroll.request_bottom(now);

        debug!(chars = text.chars().count(), "dispatching predict request");
        Some(PredictTicket { message: text })
    }

    /// Render the outcome of the in-flight request and release the guard.
    pub fn finish_submit(&mut self, result: Result<PredictResponse, ApiError>, now: Instant) {
        let Some(user_text) = self.in_flight.take() else {
            warn!("predict result arrived with no request in flight");
            return;
        };

        self.loading_visible = false;
        match result {
            Ok(response) => {
                let prediction = PredictionResult::from(response);
                info!(
                    label = %prediction.label,
                    confidence = prediction.confidence,
                    "prediction received"
                );
                self.push_entry(ChatEntry::bot(&prediction), now);
                self.history
                    .push(ConversationTurn::new(user_text, prediction));
            }
            Err(err) => {
                warn!(error = %err, "predict request failed");
                self.push_entry(ChatEntry::error(err.to_string()), now);
            }
        }

        self.is_processing = false;
        self.composer.set_focused(true);
    }

    /// Submit the composer contents and wait for the service.
    ///
    /// Returns false when the submission was guarded off.
    pub async fn submit<S: MoodService + ?Sized>(&mut self, service: &S) -> bool {
        let Some(ticket) = self.begin_submit(Instant::now()) else {
            return false;
        };
        let result = service.predict(&ticket.message).await;
        self.finish_submit(result, Instant::now());
        true
    }

    /// Expire the notification and apply due scroll requests.
    /// Returns true when a redraw is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        if self
            .notification
            .as_ref()
            .is_some_and(|notice| notice.is_expired(now))
        {
            self.notification = None;
            changed = true;
        }
        if self.scroll.poll(now) {
            changed = true;
        }
        changed
    }

    fn push_entry(&mut self, entry: ChatEntry, now: Instant) {
        self.entries.push(entry);
        self.scroll.request_bottom(now);
    }
}
