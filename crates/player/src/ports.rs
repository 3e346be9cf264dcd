//! Outbound port for the intent resolver service.
//!
//! The interactive loop is the only caller; the server-side fulfillment
//! machine sits on the other end of this conversation and never calls the
//! resolver itself.

use async_trait::async_trait;
use echoes_domain::SessionAttributes;
use echoes_protocol::ResolverReply;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ResolverError {
    #[error("Resolver request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Fixed reply shown when the resolver cannot be reached. Session attributes
/// stay untouched on that path.
pub const RESOLVER_FAULT_TEXT: &str = "An error occurred communicating with the game.";

/// Utterance-to-reply call against the intent resolver.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResolverPort: Send + Sync {
    async fn resolve(
        &self,
        utterance: &str,
        session_attributes: &SessionAttributes,
    ) -> Result<ResolverReply, ResolverError>;
}
