//! Scaffolder-style actions that deliver a message to Slack
//!
//! Both actions follow the same shape: resolve parameters from the app
//! config and the action input, validate them, then deliver. [`DeliveryAction`]
//! captures that shape; [`TemplateAction`] is the object-safe face the host
//! sees, so heterogeneous actions can live in one [`ActionRegistry`].

pub mod conversation;
pub mod webhook;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::core::config::{AppConfig, ConfigStore};
use crate::core::models::DeliveryRequest;
use crate::errors::SlackError;
use crate::slack::{ReqwestTransport, SlackApiBuilder, SlackWebApiBuilder, WebhookTransport};

pub use conversation::{ConversationTarget, SendViaSlackApiAction};
pub use webhook::SendViaWebhookAction;

#[async_trait]
pub trait DeliveryAction: Send + Sync {
    /// Everything `deliver` needs beyond the request itself.
    type Params: Send + Sync;

    const ID: &'static str;
    const DESCRIPTION: &'static str;

    /// JSON schema of the accepted input.
    fn schema() -> Value;

    fn resolve_params(&self, request: &DeliveryRequest) -> Result<Self::Params, SlackError>;

    async fn validate(&self, _params: &Self::Params) -> Result<(), SlackError> {
        Ok(())
    }

    async fn deliver(
        &self,
        params: Self::Params,
        request: &DeliveryRequest,
    ) -> Result<(), SlackError>;

    /// Runs resolve, validate and deliver in order; the first failure aborts.
    async fn handle(&self, request: &DeliveryRequest) -> Result<(), SlackError> {
        let params = self.resolve_params(request)?;
        self.validate(&params).await?;
        self.deliver(params, request).await
    }
}

#[async_trait]
pub trait TemplateAction: Send + Sync {
    fn id(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn input_schema(&self) -> Value;

    async fn invoke(&self, input: Value) -> Result<(), SlackError>;
}

#[async_trait]
impl<T: DeliveryAction> TemplateAction for T {
    fn id(&self) -> &'static str {
        T::ID
    }

    fn description(&self) -> &'static str {
        T::DESCRIPTION
    }

    fn input_schema(&self) -> Value {
        T::schema()
    }

    async fn invoke(&self, input: Value) -> Result<(), SlackError> {
        let request = DeliveryRequest::from_input(input)?;
        self.handle(&request).await
    }
}

#[derive(Default)]
pub struct ActionRegistry {
    actions: Vec<Arc<dyn TemplateAction>>,
}

impl ActionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an action, replacing any previously registered action with the same id.
    pub fn add(&mut self, action: Arc<dyn TemplateAction>) {
        self.actions.retain(|existing| existing.id() != action.id());
        self.actions.push(action);
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<dyn TemplateAction>> {
        self.actions.iter().find(|a| a.id() == id).cloned()
    }

    #[must_use]
    pub fn ids(&self) -> Vec<&'static str> {
        self.actions.iter().map(|a| a.id()).collect()
    }

    /// # Errors
    ///
    /// Returns [`SlackError::Input`] for an unknown action id, otherwise
    /// whatever the action itself fails with.
    pub async fn invoke(&self, id: &str, input: Value) -> Result<(), SlackError> {
        let action = self
            .get(id)
            .ok_or_else(|| SlackError::Input(format!("Unknown action: {id}")))?;
        action.invoke(input).await
    }
}

/// Registers both Slack actions against one shared configuration handle.
#[must_use]
pub fn register_actions(
    config: Arc<dyn ConfigStore>,
    transport: Arc<dyn WebhookTransport>,
    slack: Arc<dyn SlackApiBuilder>,
) -> ActionRegistry {
    let mut registry = ActionRegistry::new();
    registry.add(Arc::new(SendViaWebhookAction::new(
        Arc::clone(&config),
        transport,
    )));
    registry.add(Arc::new(SendViaSlackApiAction::new(config, slack)));
    registry
}

/// Registry wired to the real HTTP transport and Slack Web API.
#[must_use]
pub fn default_registry(config: AppConfig) -> ActionRegistry {
    let timeout = config.http_timeout();
    register_actions(
        Arc::new(config),
        Arc::new(ReqwestTransport::new(timeout)),
        Arc::new(SlackWebApiBuilder::new(timeout)),
    )
}
