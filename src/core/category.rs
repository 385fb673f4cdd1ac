//! Mapping from service labels to display categories.

use ratatui::style::Color;

use super::constants::STATUS_GLYPH;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MoodCategory {
    #[default]
    Neutral,
    Anxiety,
    Depression,
}

impl MoodCategory {
    /// Resolve a service label. Anything outside the known set is neutral.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Neutro" => MoodCategory::Neutral,
            "Ansiedad" => MoodCategory::Anxiety,
            "Depresion" | "Depresión" => MoodCategory::Depression,
            _ => MoodCategory::Neutral,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MoodCategory::Neutral => "neutral",
            MoodCategory::Anxiety => "anxiety",
            MoodCategory::Depression => "depression",
        }
    }

    pub fn glyph(self) -> &'static str {
        STATUS_GLYPH
    }

    /// Hex colour used in the HTML rendition of the result card.
    pub fn hex_color(self) -> &'static str {
        match self {
            MoodCategory::Neutral => "#059669",
            MoodCategory::Anxiety => "#d97706",
            MoodCategory::Depression => "#dc2626",
        }
    }

    pub fn color(self) -> Color {
        match self {
            MoodCategory::Neutral => Color::Rgb(0x05, 0x96, 0x69),
            MoodCategory::Anxiety => Color::Rgb(0xd9, 0x77, 0x06),
            MoodCategory::Depression => Color::Rgb(0xdc, 0x26, 0x26),
        }
    }
}
