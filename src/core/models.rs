use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::errors::SlackError;

/// Input handed to a delivery action by the host for one invocation.
#[derive(Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRequest {
    pub message: String,
    pub webhook_url: Option<String>,
    pub token: Option<String>,
    pub conversation_id: Option<String>,
    pub conversation_name: Option<String>,
}

impl DeliveryRequest {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_conversation_id(mut self, id: impl Into<String>) -> Self {
        self.conversation_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_conversation_name(mut self, name: impl Into<String>) -> Self {
        self.conversation_name = Some(name.into());
        self
    }

    /// Parses raw host input, rejecting payloads without a usable `message`.
    ///
    /// # Errors
    ///
    /// Returns [`SlackError::Input`] if the payload does not match the
    /// action input shape or the message is empty.
    pub fn from_input(input: Value) -> Result<Self, SlackError> {
        let request: Self = serde_json::from_value(input)
            .map_err(|e| SlackError::Input(format!("Invalid action input: {e}")))?;

        if request.message.is_empty() {
            return Err(SlackError::Input(
                "Invalid action input: message must not be empty".to_string(),
            ));
        }

        Ok(request)
    }
}

impl fmt::Debug for DeliveryRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeliveryRequest")
            .field("message", &self.message)
            .field("webhook_url", &self.webhook_url.as_ref().map(|_| "<redacted>"))
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("conversation_id", &self.conversation_id)
            .field("conversation_name", &self.conversation_name)
            .finish()
    }
}
