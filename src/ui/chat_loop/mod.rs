//! Main chat event loop and the state it drives.

pub mod actions;
mod event_loop;
pub mod keybindings;
mod lifecycle;

pub use event_loop::run_chat;

use crate::core::controller::ExchangeController;
use crate::ui::theme::Theme;

/// Everything the chat screen needs between frames.
pub struct ChatState {
    pub controller: ExchangeController,
    pub theme: Theme,
    pub exit_requested: bool,
    /// Transcript viewport height from the last frame, used for paging.
    pub transcript_height: u16,
    pub max_scroll_offset: u16,
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatState {
    pub fn new() -> Self {
        Self {
            controller: ExchangeController::new(),
            theme: Theme::dark_default(),
            exit_requested: false,
            transcript_height: 0,
            max_scroll_offset: 0,
        }
    }
}
