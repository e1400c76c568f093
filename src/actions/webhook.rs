use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, error};

use super::DeliveryAction;
use crate::core::config::{ConfigStore, keys, resolve};
use crate::core::models::DeliveryRequest;
use crate::errors::SlackError;
use crate::slack::WebhookTransport;
use crate::slack::response_builder::create_webhook_payload;

/// `slack:sendMessage`: posts the message to an incoming-webhook URL.
pub struct SendViaWebhookAction {
    config: Arc<dyn ConfigStore>,
    transport: Arc<dyn WebhookTransport>,
}

impl SendViaWebhookAction {
    #[must_use]
    pub fn new(config: Arc<dyn ConfigStore>, transport: Arc<dyn WebhookTransport>) -> Self {
        Self { config, transport }
    }

    /// # Errors
    ///
    /// Returns [`SlackError::Configuration`] when neither the app config nor
    /// the input carries a webhook URL.
    pub fn resolve_webhook_url(&self, request: &DeliveryRequest) -> Result<String, SlackError> {
        resolve(
            self.config.as_ref(),
            keys::WEBHOOK_URL,
            request.webhook_url.as_deref(),
        )
        .filter(|url| !url.is_empty())
        .ok_or_else(|| {
            SlackError::Configuration(
                "Webhook URL is not specified in either the app-config or the action input. This must be specified in at least one place in order to send a message".to_string(),
            )
        })
    }

    /// Single POST of `{ "text": message }`; only a 200 counts as delivered.
    ///
    /// # Errors
    ///
    /// Returns [`SlackError::WebhookDelivery`] for any other status, or the
    /// transport error if no response was received.
    pub async fn send(&self, url: &str, message: &str) -> Result<(), SlackError> {
        let payload = create_webhook_payload(message);
        let resp = self.transport.post_json(url, &payload).await?;

        if resp.status != 200 {
            let err = SlackError::WebhookDelivery {
                status: resp.status,
            };
            error!("{}", err);
            debug!("Response body: {}", resp.body);
            debug!("Input message: {}", message);
            return Err(err);
        }

        debug!("Delivered message via webhook");
        Ok(())
    }
}

#[async_trait]
impl DeliveryAction for SendViaWebhookAction {
    type Params = String;

    const ID: &'static str = "slack:sendMessage";
    const DESCRIPTION: &'static str = "Sends a Slack message via a webhook";

    fn schema() -> Value {
        json!({
            "type": "object",
            "required": ["message"],
            "properties": {
                "message": {
                    "title": "Message",
                    "description": "The message to send via webhook",
                    "type": "string"
                },
                "webhookUrl": {
                    "title": "Webhook URL",
                    "description": "The webhook URL to send the request to. This is only used if the webhook URL is not supplied in the app configuration.",
                    "type": "string"
                }
            }
        })
    }

    fn resolve_params(&self, request: &DeliveryRequest) -> Result<String, SlackError> {
        self.resolve_webhook_url(request)
    }

    async fn deliver(&self, url: String, request: &DeliveryRequest) -> Result<(), SlackError> {
        self.send(&url, &request.message).await
    }
}
