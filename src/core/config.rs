use std::collections::HashMap;
use std::env;
use std::time::Duration;

use serde_json::Value;

/// App-config keys consulted before the action input.
pub mod keys {
    pub const WEBHOOK_URL: &str = "slack.webhookUrl";
    pub const TOKEN: &str = "slack.token";
    pub const CONVERSATION_ID: &str = "slack.conversationId";
    pub const CONVERSATION_NAME: &str = "slack.conversationName";
}

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Read-only key lookup over whatever backs the app configuration.
pub trait ConfigStore: Send + Sync {
    fn get_optional_string(&self, key: &str) -> Option<String>;
}

/// Returns the config value when the key is present (even if empty),
/// otherwise the caller-supplied input value.
#[must_use]
pub fn resolve(config: &dyn ConfigStore, key: &str, input: Option<&str>) -> Option<String> {
    config
        .get_optional_string(key)
        .or_else(|| input.map(str::to_string))
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub webhook_url: Option<String>,
    pub token: Option<String>,
    pub conversation_id: Option<String>,
    pub conversation_name: Option<String>,
    pub http_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            token: None,
            conversation_id: None,
            conversation_name: None,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let http_timeout_secs = match env::var("SLACK_HTTP_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse()
                .map_err(|e| format!("SLACK_HTTP_TIMEOUT_SECS: {}", e))?,
            Err(_) => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            webhook_url: env::var("SLACK_WEBHOOK_URL").ok(),
            token: env::var("SLACK_TOKEN").ok(),
            conversation_id: env::var("SLACK_CONVERSATION_ID").ok(),
            conversation_name: env::var("SLACK_CONVERSATION_NAME").ok(),
            http_timeout_secs,
        })
    }

    #[must_use]
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

impl ConfigStore for AppConfig {
    fn get_optional_string(&self, key: &str) -> Option<String> {
        match key {
            keys::WEBHOOK_URL => self.webhook_url.clone(),
            keys::TOKEN => self.token.clone(),
            keys::CONVERSATION_ID => self.conversation_id.clone(),
            keys::CONVERSATION_NAME => self.conversation_name.clone(),
            _ => None,
        }
    }
}

/// Nested app-config document; `slack.token` walks `{"slack": {"token": ...}}`.
/// Only string leaves count as present.
impl ConfigStore for Value {
    fn get_optional_string(&self, key: &str) -> Option<String> {
        key.split('.')
            .try_fold(self, |node, segment| node.get(segment))
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

impl ConfigStore for HashMap<String, String> {
    fn get_optional_string(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}
