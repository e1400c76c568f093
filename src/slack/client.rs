//! Slack Web API client module
//!
//! Wraps the three Web API methods the conversation action needs behind the
//! [`SlackApi`] trait so the action logic does not depend on a live workspace.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use slack_morphism::errors::SlackClientError;
use slack_morphism::hyper_tokio::{SlackClientHyperConnector, SlackHyperClient};
use slack_morphism::prelude::{SlackApiChatPostMessageRequest, SlackApiConversationsListRequest};
use slack_morphism::{SlackApiToken, SlackApiTokenValue, SlackChannelId, SlackMessageContent};
use tracing::{debug, warn};

use super::scopes::{OAUTH_SCOPES_HEADER, parse_scope_header};
use crate::errors::SlackError;

const SLACK_API_URL: &str = "https://slack.com/api";

/// Page size requested from `conversations.list`; Slack caps it at 1000.
const CONVERSATIONS_LIST_LIMIT: u16 = 1000;

// Build the Slack client connector safely without panicking.
// If connector construction fails, store None and surface a SlackError at call sites.
static SLACK_CLIENT: std::sync::LazyLock<Option<SlackHyperClient>> =
    std::sync::LazyLock::new(|| match SlackClientHyperConnector::new() {
        Ok(connector) => Some(SlackHyperClient::new(connector)),
        Err(e) => {
            warn!("Failed to create Slack HTTP connector: {}", e);
            None
        }
    });

/// Outcome of `auth.test`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthTestResponse {
    pub ok: bool,
    /// Scopes granted to the token; `None` if Slack did not report them.
    pub scopes: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationsList {
    pub channels: Option<Vec<Conversation>>,
}

/// Outcome of `chat.postMessage`. A set `error` is an in-band failure
/// reported by Slack after the request itself went through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostMessageResponse {
    pub error: Option<String>,
    pub response_metadata: Option<String>,
}

#[async_trait]
pub trait SlackApi: Send + Sync {
    async fn auth_test(&self) -> Result<AuthTestResponse, SlackError>;

    async fn list_conversations(&self) -> Result<ConversationsList, SlackError>;

    async fn post_message(&self, channel: &str, text: &str)
    -> Result<PostMessageResponse, SlackError>;
}

/// Binds a [`SlackApi`] client to a token. Must not touch the network.
pub trait SlackApiBuilder: Send + Sync {
    fn build(&self, token: &str) -> Result<Arc<dyn SlackApi>, SlackError>;
}

#[derive(Debug, Deserialize)]
struct AuthTestBody {
    ok: bool,
    error: Option<String>,
}

/// Web API client backed by `slack-morphism` and a plain `reqwest` client.
pub struct SlackWebClient {
    token: SlackApiToken,
    http: Client,
    api_url: String,
}

impl SlackWebClient {
    #[must_use]
    pub fn new(token: String, http: Client) -> Self {
        Self {
            token: SlackApiToken::new(SlackApiTokenValue::new(token)),
            http,
            api_url: SLACK_API_URL.to_string(),
        }
    }

    #[cfg(test)]
    fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    fn hyper_client() -> Result<&'static SlackHyperClient, SlackError> {
        SLACK_CLIENT.as_ref().ok_or_else(|| {
            SlackError::Connector("Slack HTTP connector not initialized".to_string())
        })
    }
}

#[async_trait]
impl SlackApi for SlackWebClient {
    // auth.test goes through reqwest: the granted scopes only come back as a header.
    async fn auth_test(&self) -> Result<AuthTestResponse, SlackError> {
        let resp = self
            .http
            .post(format!("{}/auth.test", self.api_url))
            .bearer_auth(&self.token.token_value.0)
            .send()
            .await?;

        let scopes = resp
            .headers()
            .get(OAUTH_SCOPES_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(parse_scope_header);

        let body: AuthTestBody = resp.json().await?;
        if let Some(error) = body.error.as_deref() {
            debug!("auth.test reported error: {}", error);
        }

        Ok(AuthTestResponse {
            ok: body.ok,
            scopes,
        })
    }

    async fn list_conversations(&self) -> Result<ConversationsList, SlackError> {
        let session = Self::hyper_client()?.open_session(&self.token);
        let request = SlackApiConversationsListRequest::new().with_limit(CONVERSATIONS_LIST_LIMIT);

        let result = session.conversations_list(&request).await?;
        let channels = result
            .channels
            .into_iter()
            .map(|channel| Conversation {
                id: Some(channel.id.0),
                name: channel.name,
            })
            .collect();

        Ok(ConversationsList {
            channels: Some(channels),
        })
    }

    async fn post_message(
        &self,
        channel: &str,
        text: &str,
    ) -> Result<PostMessageResponse, SlackError> {
        let session = Self::hyper_client()?.open_session(&self.token);
        let request = SlackApiChatPostMessageRequest::new(
            SlackChannelId(channel.to_string()),
            SlackMessageContent::new().with_text(text.to_string()),
        );

        match session.chat_post_message(&request).await {
            Ok(_) => Ok(PostMessageResponse::default()),
            Err(SlackClientError::ApiError(api_err)) => Ok(PostMessageResponse {
                error: Some(api_err.code),
                response_metadata: api_err.http_response_body,
            }),
            Err(e) => Err(e.into()),
        }
    }
}

/// Builds [`SlackWebClient`]s sharing one `reqwest` connection pool.
#[derive(Debug, Clone)]
pub struct SlackWebApiBuilder {
    http: Client,
}

impl SlackWebApiBuilder {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { http }
    }
}

impl SlackApiBuilder for SlackWebApiBuilder {
    fn build(&self, token: &str) -> Result<Arc<dyn SlackApi>, SlackError> {
        let client: Arc<dyn SlackApi> =
            Arc::new(SlackWebClient::new(token.to_string(), self.http.clone()));
        Ok(client)
    }
}
