//! Lambda entry point: dispatches one event to a registered action.
//!
//! Event payload: `{ "action": "slack:sendMessage", "input": { "message": "..." } }`.

use lambda_runtime::{Error, LambdaEvent};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{Instrument, debug, error, info_span};

use crate::actions::{ActionRegistry, default_registry};
use crate::core::config::AppConfig;
use crate::errors::SlackError;

#[derive(Debug, Deserialize)]
pub struct ActionEvent {
    pub action: String,
    #[serde(default)]
    pub input: Value,
}

/// Runs one action from a registry and renders the host response.
///
/// # Errors
///
/// Returns the action's [`SlackError`] unchanged.
pub async fn dispatch(registry: &ActionRegistry, event: ActionEvent) -> Result<Value, SlackError> {
    let correlation_id = uuid::Uuid::new_v4().to_string();
    let span = info_span!("action", action = %event.action, correlation_id = %correlation_id);

    async move {
        debug!("Invoking action");
        match registry.invoke(&event.action, event.input).await {
            Ok(()) => {
                debug!("Action completed");
                Ok(json!({ "ok": true, "action": event.action }))
            }
            Err(e) => {
                error!(kind = e.kind(), "Action failed: {}", e);
                Err(e)
            }
        }
    }
    .instrument(span)
    .await
}

pub async fn function_handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;

    let action_event: ActionEvent = serde_json::from_value(event.payload)
        .map_err(|e| Error::from(format!("Failed to parse action event: {}", e)))?;

    let registry = default_registry(config);
    dispatch(&registry, action_event)
        .await
        .map_err(|e| Error::from(e.to_string()))
}

pub use self::function_handler as handler;
