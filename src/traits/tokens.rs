//! Bearer-token provider abstraction.
//!
//! The streaming client never reads credentials itself; it asks an injected
//! provider for the current bearer token on every exchange. Production code
//! wires in the file-backed store from `crate::auth`; tests use
//! [`StaticToken`].

use async_trait::async_trait;

/// Source of the bearer token attached to every request.
///
/// Returning `None` still sends the `Authorization` header, with an empty
/// token; rejecting it is the backend's job.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// The current bearer token, if one is available.
    async fn bearer_token(&self) -> Option<String>;
}

/// Provider with a fixed token. Useful for tests and one-off scripts.
#[derive(Debug, Clone)]
pub struct StaticToken {
    token: String,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn bearer_token(&self) -> Option<String> {
        Some(self.token.clone())
    }
}
