//! OAuth scope checks for the bot token.

/// Scopes the token needs to post into a conversation and to look one up by name.
///
/// Order matters: missing scopes are reported in this order.
pub const REQUIRED_SCOPES: &[&str] = &["chat:write", "channels:read"];

/// Header Slack uses to report the scopes granted to the calling token.
pub const OAUTH_SCOPES_HEADER: &str = "x-oauth-scopes";

/// Required scopes not present in `granted`, in [`REQUIRED_SCOPES`] order.
#[must_use]
pub fn missing_scopes(granted: &[String]) -> Vec<String> {
    REQUIRED_SCOPES
        .iter()
        .filter(|required| !granted.iter().any(|scope| scope == *required))
        .map(|scope| (*scope).to_string())
        .collect()
}

/// Splits a comma-separated `x-oauth-scopes` header value.
#[must_use]
pub fn parse_scope_header(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|scope| !scope.is_empty())
        .map(str::to_string)
        .collect()
}
