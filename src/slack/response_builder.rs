//! Payload builders for outgoing Slack messages.

use serde_json::{Value, json};

/// Create the JSON body for an incoming-webhook post
///
/// Incoming webhooks accept the same top-level `text` field as
/// `chat.postMessage`; the destination is baked into the webhook URL.
///
/// # Examples
///
/// ```
/// use slack_notify::slack::response_builder::create_webhook_payload;
///
/// let payload = create_webhook_payload("Deployment finished");
/// assert_eq!(payload["text"], "Deployment finished");
/// ```
#[must_use]
pub fn create_webhook_payload(text: &str) -> Value {
    json!({ "text": text })
}
