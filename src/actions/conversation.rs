use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, error};

use super::DeliveryAction;
use crate::core::config::{ConfigStore, keys, resolve};
use crate::core::models::DeliveryRequest;
use crate::errors::SlackError;
use crate::slack::scopes::missing_scopes;
use crate::slack::{SlackApi, SlackApiBuilder};

const INVALID_CONVERSATION_NAME: &str =
    "Conversation Name is not valid. Please check the Conversation Name and try again";

/// Where a message should go, before any lookup has happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationTarget {
    Id(String),
    Name(String),
}

/// `slack:sendMessage:conversation`: posts the message through the Web API
/// using a bot token.
pub struct SendViaSlackApiAction {
    config: Arc<dyn ConfigStore>,
    slack: Arc<dyn SlackApiBuilder>,
}

impl SendViaSlackApiAction {
    #[must_use]
    pub fn new(config: Arc<dyn ConfigStore>, slack: Arc<dyn SlackApiBuilder>) -> Self {
        Self { config, slack }
    }

    /// # Errors
    ///
    /// Returns [`SlackError::Configuration`] when no token is available.
    pub fn resolve_token(&self, request: &DeliveryRequest) -> Result<String, SlackError> {
        resolve(self.config.as_ref(), keys::TOKEN, request.token.as_deref())
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                SlackError::Configuration(
                    "Slack token is not specified in either the app-config or the action input. This must be specified in at least one place in order to send a message".to_string(),
                )
            })
    }

    /// Checks the token works and carries every scope in
    /// [`REQUIRED_SCOPES`](crate::slack::REQUIRED_SCOPES).
    ///
    /// # Errors
    ///
    /// [`SlackError::Setup`] if `auth.test` is not ok, [`SlackError::Scope`]
    /// listing whatever is missing otherwise.
    pub async fn validate_scopes(&self, client: &dyn SlackApi) -> Result<(), SlackError> {
        let response = client.auth_test().await?;
        if !response.ok {
            return Err(SlackError::Setup);
        }

        let granted = response.scopes.unwrap_or_default();
        let missing = missing_scopes(&granted);
        if !missing.is_empty() {
            return Err(SlackError::Scope { missing });
        }

        Ok(())
    }

    /// A non-empty conversation ID always wins; the name is only a fallback.
    ///
    /// # Errors
    ///
    /// Returns [`SlackError::Configuration`] when neither is available.
    pub fn resolve_conversation_target(
        &self,
        request: &DeliveryRequest,
    ) -> Result<ConversationTarget, SlackError> {
        let conversation_id = resolve(
            self.config.as_ref(),
            keys::CONVERSATION_ID,
            request.conversation_id.as_deref(),
        )
        .filter(|id| !id.is_empty());
        let conversation_name = resolve(
            self.config.as_ref(),
            keys::CONVERSATION_NAME,
            request.conversation_name.as_deref(),
        )
        .filter(|name| !name.is_empty());

        match (conversation_id, conversation_name) {
            (Some(id), _) => Ok(ConversationTarget::Id(id)),
            (None, Some(name)) => Ok(ConversationTarget::Name(name)),
            (None, None) => Err(SlackError::Configuration(
                "Neither Conversation ID nor Conversation Name is specified in either the app-config or the action input. One of these must be specified in at least one place in order to send a message".to_string(),
            )),
        }
    }

    /// Exact, case-sensitive match on the conversation name; first match wins.
    ///
    /// # Errors
    ///
    /// Returns [`SlackError::Input`] if the listing is absent, nothing
    /// matches, or the match has no ID.
    pub async fn lookup_conversation_id(
        &self,
        client: &dyn SlackApi,
        name: &str,
    ) -> Result<String, SlackError> {
        let listing = client.list_conversations().await?;
        let invalid = || SlackError::Input(INVALID_CONVERSATION_NAME.to_string());

        let channels = listing.channels.ok_or_else(invalid)?;
        channels
            .into_iter()
            .find(|conversation| conversation.name.as_deref() == Some(name))
            .and_then(|conversation| conversation.id)
            .ok_or_else(invalid)
    }

    /// Resolves the channel to post to. Returns the conversation ID as
    /// supplied (if one was) alongside the channel actually used.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve_conversation_target`] and [`Self::lookup_conversation_id`].
    pub async fn resolve_conversation(
        &self,
        client: &dyn SlackApi,
        request: &DeliveryRequest,
    ) -> Result<(Option<String>, String), SlackError> {
        match self.resolve_conversation_target(request)? {
            ConversationTarget::Id(id) => Ok((Some(id.clone()), id)),
            ConversationTarget::Name(name) => {
                debug!("Looking up conversation ID for name {}", name);
                let channel = self.lookup_conversation_id(client, &name).await?;
                Ok((None, channel))
            }
        }
    }
}

#[async_trait]
impl DeliveryAction for SendViaSlackApiAction {
    type Params = Arc<dyn SlackApi>;

    const ID: &'static str = "slack:sendMessage:conversation";
    const DESCRIPTION: &'static str = "Sends a Slack message to a specific conversation via the Slack SDK. This requires you to install the application in your workspace and provide a token";

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
                "conversationId": {
                    "title": "Conversation ID",
                    "description": "The ID of the conversation to send the message to. Either this or the conversation name must be specified here or in the app configuration. If both are specified, the conversation ID will be used.",
                    "type": "string"
                },
                "conversationName": {
                    "title": "Conversation Name",
                    "description": "The name of the conversation to send the message to. This is only used if the conversation ID is not specified.",
                    "type": "string"
                },
                "token": {
                    "title": "Auth Token",
                    "description": "The token to use to authenticate with the Slack API. This is only used if the token is not supplied in the app configuration.",
                    "type": "string"
                }
            }
        })
    }

    fn resolve_params(&self, request: &DeliveryRequest) -> Result<Arc<dyn SlackApi>, SlackError> {
        let token = self.resolve_token(request)?;
        self.slack.build(&token)
    }

    async fn validate(&self, client: &Arc<dyn SlackApi>) -> Result<(), SlackError> {
        self.validate_scopes(client.as_ref()).await
    }

    async fn deliver(
        &self,
        client: Arc<dyn SlackApi>,
        request: &DeliveryRequest,
    ) -> Result<(), SlackError> {
        let (conversation_id, channel) =
            self.resolve_conversation(client.as_ref(), request).await?;

        let result = client.post_message(&channel, &request.message).await?;
        if let Some(api_error) = result.error {
            let err = SlackError::ApiDelivery { error: api_error };
            error!("{}", err);
            debug!(
                "Response body: {}",
                result.response_metadata.as_deref().unwrap_or("<none>")
            );
            debug!(
                "Conversation ID: {}",
                conversation_id.as_deref().unwrap_or("<none>")
            );
            debug!("Input message: {}", request.message);
            return Err(err);
        }

        debug!("Delivered message to conversation {}", channel);
        Ok(())
    }
}
