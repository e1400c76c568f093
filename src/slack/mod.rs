//! All Slack-specific functionality

pub mod client;
pub mod response_builder;
pub mod scopes;
pub mod webhook;

#[cfg(test)]
mod test_support;

// Re-export main types for convenience
pub use client::{
    AuthTestResponse, Conversation, ConversationsList, PostMessageResponse, SlackApi,
    SlackApiBuilder, SlackWebApiBuilder, SlackWebClient,
};
pub use scopes::REQUIRED_SCOPES;
pub use webhook::{HttpResponse, ReqwestTransport, WebhookTransport};
