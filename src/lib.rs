//! Slack notification actions for a workflow engine.
//!
//! Two independently invocable actions deliver a plain-text message to Slack:
//! 1. `slack:sendMessage` posts to an incoming-webhook URL
//! 2. `slack:sendMessage:conversation` posts through the Web API with a bot
//!    token, after checking the token's scopes and resolving the target
//!    conversation by ID or by name
//!
//! Every parameter is looked up in the app configuration first and taken
//! from the action input only when the configuration does not set it.
//!
//! # Example
//!
//! ```no_run
//! use slack_notify::actions::default_registry;
//! use slack_notify::core::config::AppConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     slack_notify::setup_logging();
//!
//!     let registry = default_registry(AppConfig::from_env()?);
//!     registry
//!         .invoke(
//!             "slack:sendMessage:conversation",
//!             serde_json::json!({
//!                 "message": "Deployment finished",
//!                 "conversationName": "deploys"
//!             }),
//!         )
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
pub mod actions;
pub mod core;
pub mod errors;
pub mod handler;
pub mod slack;

pub use actions::{ActionRegistry, DeliveryAction, TemplateAction, register_actions};
pub use errors::SlackError;
pub use handler::handler;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Honors `RUST_LOG` and defaults to `info`. Calling it more than once is a
/// no-op.
///
/// # Example
///
/// ```
/// slack_notify::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
