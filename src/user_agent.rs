//! Shared User-Agent string for backend HTTP traffic.

/// Default User-Agent for backend requests (identifies the SDK and version).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("browserless-client/{version}")
}
