use slack_morphism::errors::SlackClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SlackError {
    /// A required value was found in neither the app config nor the action input.
    #[error("{0}")]
    Configuration(String),

    #[error(
        "The token provided does not have the correct scopes. Please ensure that the token has the following scopes: {}",
        .missing.join(", ")
    )]
    Scope { missing: Vec<String> },

    #[error(
        "Something isn't right with the setup of the token used to authenticate with the Slack API. Please check the token and try again."
    )]
    Setup,

    #[error("{0}")]
    Input(String),

    #[error(
        "Something went wrong while trying to send a request to the webhook URL - StatusCode {status}"
    )]
    WebhookDelivery { status: u16 },

    #[error("Something went wrong while trying to send a request to the Slack API - Error: {error}")]
    ApiDelivery { error: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Client(#[from] SlackClientError),

    #[error("Failed to create Slack HTTP connector: {0}")]
    Connector(String),
}

impl SlackError {
    /// Short classification tag, used as a structured log field and in host responses.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::Scope { .. } => "scope",
            Self::Setup => "setup",
            Self::Input(_) => "input",
            Self::WebhookDelivery { .. } | Self::ApiDelivery { .. } => "delivery",
            Self::Http(_) | Self::Client(_) | Self::Connector(_) => "transport",
        }
    }
}
