//! MoodBot is a terminal chat client for a remote mood classification service.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the message-exchange controller, the composer, connectivity
//!   status, transcript entries and configuration.
//! - [`api`] defines the service wire models and the [`api::MoodService`]
//!   client used to reach the `health` and `predict` endpoints.
//! - [`ui`] renders the terminal interface and runs the interactive event loop
//!   that drives user input and display updates.
//! - [`utils`] holds logging setup, transcript scrolling and URL helpers.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`], which dispatches into [`ui::chat_loop`] for
//! interactive sessions or runs one-shot commands directly.

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
