//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod health;
pub mod say;

#[cfg(test)]
mod tests;

use std::error::Error;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::api::HttpMoodService;
use crate::cli::health::run_health;
use crate::cli::say::run_say;
use crate::core::config::Config;
use crate::ui::chat_loop::run_chat;
use crate::utils::logging::{init_tracing, LogTarget};
use crate::utils::url::{is_http_url, normalize_base_url};

#[derive(Parser, Debug)]
#[command(name = "moodbot")]
#[command(about = "A terminal chat client for the MoodBot mood classification service")]
#[command(
    long_about = "MoodBot sends each message you type to a mood classification service \
and shows the detected mood (neutral, anxiety or depression), the model's confidence and a \
supportive reply inline in the conversation.\n\n\
Controls:\n\
  Type              Enter your message (up to 1000 characters)\n\
  Enter             Send the message\n\
  Alt+Enter/Ctrl+J  Insert a newline\n\
  PgUp/PgDn         Scroll the conversation\n\
  Ctrl+Home/End     Jump to the top or bottom\n\
  Esc               Dismiss the connection notice\n\
  Ctrl+C            Quit the application"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the classification service (overrides the config file)
    #[arg(short = 'u', long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Write diagnostic logs to the specified file
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<String>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Check whether the service is reachable and its models are loaded
    Health,
    /// Classify a single message and print the reply without the TUI
    Say {
        /// Print the entry as an HTML chat bubble
        #[arg(long)]
        html: bool,
        /// Message to classify (multiple words are joined with spaces)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        text: Vec<String>,
    },
    /// Set configuration values
    Set {
        /// Configuration key to set (base-url, log-file)
        key: String,
        /// Value to set for the key
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset (base-url, log-file)
        key: String,
    },
    /// Print the current configuration
    Config,
    /// Print version and build information
    Version,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let command = args.command.unwrap_or(Commands::Chat);

    match command {
        Commands::Chat => {
            let config = Config::load()?;
            let target = LogTarget::for_interactive(config.resolve_log_file(args.log.as_deref()));
            init_tracing(&target)?;

            let base_url = config.resolve_base_url(args.base_url.as_deref());
            debug!(%base_url, "starting chat");
            let service = Arc::new(HttpMoodService::new(base_url));
            run_chat(service).await
        }
        Commands::Health => {
            init_tracing(&LogTarget::for_one_shot(args.log.clone()))?;
            let config = Config::load()?;
            let service = HttpMoodService::new(config.resolve_base_url(args.base_url.as_deref()));
            let code = run_health(&service).await;
            std::process::exit(code);
        }
        Commands::Say { html, text } => {
            init_tracing(&LogTarget::for_one_shot(args.log.clone()))?;
            let config = Config::load()?;
            let service = HttpMoodService::new(config.resolve_base_url(args.base_url.as_deref()));
            let ok = run_say(&service, text, html).await?;
            if !ok {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Set { key, value } => {
            let mut config = Config::load()?;
            let value = value.join(" ");
            if value.trim().is_empty() {
                config.print_all();
                return Ok(());
            }
            match key.as_str() {
                "base-url" => {
                    let url = normalize_base_url(&value);
                    if !is_http_url(&url) {
                        eprintln!("❌ Not an http(s) URL: {value}");
                        std::process::exit(1);
                    }
                    config.base_url = Some(url.clone());
                    config.save()?;
                    println!("✅ Set base-url to: {url}");
                }
                "log-file" => {
                    config.log_file = Some(value.clone());
                    config.save()?;
                    println!("✅ Set log-file to: {value}");
                }
                _ => {
                    eprintln!("❌ Unknown config key: {key}");
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        Commands::Unset { key } => {
            let mut config = Config::load()?;
            match key.as_str() {
                "base-url" => {
                    config.base_url = None;
                    config.save()?;
                    println!("✅ Unset base-url");
                }
                "log-file" => {
                    config.log_file = None;
                    config.save()?;
                    println!("✅ Unset log-file");
                }
                _ => {
                    eprintln!("❌ Unknown config key: {key}");
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        Commands::Config => {
            let config = Config::load()?;
            config.print_all();
            Ok(())
        }
        Commands::Version => {
            print_version_info();
            Ok(())
        }
    }
}

pub fn version_line() -> String {
    let describe = option_env!("VERGEN_GIT_DESCRIBE").unwrap_or("unknown");
    format!("moodbot {} ({describe})", env!("CARGO_PKG_VERSION"))
}

fn print_version_info() {
    println!("{}", version_line());
    println!();
    println!(
        "Build type:   {}",
        if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        }
    );
    if let Some(sha) = option_env!("VERGEN_GIT_SHA") {
        println!("Git commit:   {sha}");
    }
    if let Some(date) = option_env!("VERGEN_BUILD_DATE") {
        println!("Build date:   {date}");
    }
    if let Some(triple) = option_env!("VERGEN_CARGO_TARGET_TRIPLE") {
        println!("Target:       {triple}");
    }
}
