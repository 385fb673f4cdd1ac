//! Terminal UI layer for interactive chat sessions.
//!
//! - [`chat_loop`]: the interaction loop that turns key presses into
//!   controller operations and runs service calls in the background.
//! - [`renderer`]: draws the title bar, transcript, composer and
//!   notification from controller state.
//! - [`theme`]: colour and style policy.
//!
//! Ownership boundary: this layer presents and captures interaction state,
//! while [`crate::core`] owns the exchange logic.

pub mod chat_loop;
pub mod renderer;
pub mod theme;
