#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use slack_notify::SlackError;
use slack_notify::core::ConfigStore;
use slack_notify::slack::{
    AuthTestResponse, Conversation, ConversationsList, HttpResponse, PostMessageResponse,
    REQUIRED_SCOPES, SlackApi, SlackApiBuilder, WebhookTransport,
};

pub fn config(pairs: &[(&str, &str)]) -> Arc<dyn ConfigStore> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    Arc::new(map)
}

pub fn no_config() -> Arc<dyn ConfigStore> {
    config(&[])
}

/// Records every POST and answers with a fixed status, or fails like a dead socket.
pub struct FakeTransport {
    status: u16,
    unreachable: bool,
    pub calls: Mutex<Vec<(String, Value)>>,
}

impl FakeTransport {
    pub fn responding(status: u16) -> Arc<Self> {
        Arc::new(Self {
            status,
            unreachable: false,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn unreachable() -> Arc<Self> {
        Arc::new(Self {
            status: 0,
            unreachable: true,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WebhookTransport for FakeTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpResponse, SlackError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), body.clone()));
        if self.unreachable {
            return Err(SlackError::Connector("connection refused".to_string()));
        }
        Ok(HttpResponse {
            status: self.status,
            body: "fake body".to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlackCall {
    AuthTest,
    ListConversations,
    PostMessage { channel: String, text: String },
}

pub struct FakeSlack {
    pub auth: AuthTestResponse,
    pub conversations: ConversationsList,
    pub post_response: PostMessageResponse,
    calls: Mutex<Vec<SlackCall>>,
}

impl Default for FakeSlack {
    fn default() -> Self {
        Self {
            auth: AuthTestResponse {
                ok: true,
                scopes: Some(REQUIRED_SCOPES.iter().map(|s| (*s).to_string()).collect()),
            },
            conversations: ConversationsList {
                channels: Some(Vec::new()),
            },
            post_response: PostMessageResponse::default(),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeSlack {
    pub fn with_scopes(mut self, scopes: &[&str]) -> Self {
        self.auth.scopes = Some(scopes.iter().map(|s| (*s).to_string()).collect());
        self
    }

    pub fn with_conversations(mut self, conversations: &[(&str, &str)]) -> Self {
        self.conversations.channels = Some(
            conversations
                .iter()
                .map(|(id, name)| Conversation {
                    id: Some((*id).to_string()),
                    name: Some((*name).to_string()),
                })
                .collect(),
        );
        self
    }

    pub fn calls(&self) -> Vec<SlackCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn posted(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                SlackCall::PostMessage { channel, text } => Some((channel, text)),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl SlackApi for FakeSlack {
    async fn auth_test(&self) -> Result<AuthTestResponse, SlackError> {
        self.calls.lock().unwrap().push(SlackCall::AuthTest);
        Ok(self.auth.clone())
    }

    async fn list_conversations(&self) -> Result<ConversationsList, SlackError> {
        self.calls.lock().unwrap().push(SlackCall::ListConversations);
        Ok(self.conversations.clone())
    }

    async fn post_message(
        &self,
        channel: &str,
        text: &str,
    ) -> Result<PostMessageResponse, SlackError> {
        self.calls.lock().unwrap().push(SlackCall::PostMessage {
            channel: channel.to_string(),
            text: text.to_string(),
        });
        Ok(self.post_response.clone())
    }
}

/// Hands out the same [`FakeSlack`] for every token and remembers the tokens.
pub struct FakeSlackBuilder {
    pub api: Arc<FakeSlack>,
    tokens: Mutex<Vec<String>>,
}

impl FakeSlackBuilder {
    pub fn new(api: FakeSlack) -> Arc<Self> {
        Arc::new(Self {
            api: Arc::new(api),
            tokens: Mutex::new(Vec::new()),
        })
    }

    pub fn tokens(&self) -> Vec<String> {
        self.tokens.lock().unwrap().clone()
    }
}

impl SlackApiBuilder for FakeSlackBuilder {
    fn build(&self, token: &str) -> Result<Arc<dyn SlackApi>, SlackError> {
        self.tokens.lock().unwrap().push(token.to_string());
        let api: Arc<dyn SlackApi> = self.api.clone();
        Ok(api)
    }
}
