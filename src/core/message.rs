use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use super::category::MoodCategory;
use crate::api::PredictResponse;

pub const ERROR_HEADLINE: &str = "Sorry, there was an error processing your message.";
pub const ERROR_RETRY_HINT: &str = "Please try again in a few moments.";
pub const RESULT_CAPTION: &str = "Emotional state detected with high confidence.";

/// The service's answer to one predict request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub label: String,
    pub confidence: f64,
    pub response_text: String,
}

impl From<PredictResponse> for PredictionResult {
    fn from(value: PredictResponse) -> Self {
        Self {
            label: value.prediction.label,
            confidence: value.prediction.confidence,
            response_text: value.response,
        }
    }
}

/// One completed exchange. Failed exchanges never become turns.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationTurn {
    pub user_text: String,
    pub bot_result: PredictionResult,
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn new(user_text: String, bot_result: PredictionResult) -> Self {
        Self {
            user_text,
            bot_result,
            timestamp: Utc::now(),
        }
    }

    pub fn timestamp_iso(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultCard {
    pub label: String,
    pub category: MoodCategory,
    pub confidence_text: String,
}

impl ResultCard {
    pub fn from_prediction(result: &PredictionResult) -> Self {
        Self {
            label: result.label.clone(),
            category: MoodCategory::from_label(&result.label),
            confidence_text: format_confidence(result.confidence),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChatEntry {
    User { text: String },
    Bot { text: String, card: ResultCard },
    Error { description: String },
}

impl ChatEntry {
    pub fn user(text: impl Into<String>) -> Self {
        ChatEntry::User { text: text.into() }
    }

    pub fn bot(result: &PredictionResult) -> Self {
        ChatEntry::Bot {
            text: result.response_text.clone(),
            card: ResultCard::from_prediction(result),
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        ChatEntry::Error {
            description: description.into(),
        }
    }

    /// Plain-text rendition used by the one-shot command and logs.
    pub fn to_plain_text(&self) -> String {
        match self {
            ChatEntry::User { text } => format!("You: {text}"),
            ChatEntry::Bot { text, card } => format!(
                "{text}\n{} {} ({}) {}",
                card.category.glyph(),
                card.label,
                card.category.as_str(),
                card.confidence_text
            ),
            ChatEntry::Error { description } => {
                format!("{ERROR_HEADLINE}\n\n{description}\n\n{ERROR_RETRY_HINT}")
            }
        }
    }
}

/// Confidence in `[0, 1]` as a percentage with one decimal: `0.823` → `"82.3%"`.
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}
