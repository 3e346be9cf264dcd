//! Port traits for infrastructure boundaries.
//!
//! The engine has exactly one abstraction of its own: the story generation
//! service (could swap one completion API for another). Player-record
//! storage comes in through `echoes_store::PlayerRepo`.

use async_trait::async_trait;

#[derive(Debug, Clone, thiserror::Error)]
pub enum GeneratorError {
    #[error("Story request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Fixed, user-displayable text substituted for any story generation fault.
/// A degraded description beats a broken turn.
pub const STORY_FAULT_TEXT: &str = "An error has occurred.";

/// Prompt-completion call against the story service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoryPort: Send + Sync {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, GeneratorError>;
}
