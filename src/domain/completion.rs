//! Text-completion service contract used by CI log triage.

use crate::domain::errors::CompletionError;
use async_trait::async_trait;
use serde_json::Value;

/// An external model that answers a system + user prompt with a JSON object.
///
/// The reply is untrusted: callers must default every field they read.
///
/// # Implementations
///
/// - [`crate::infrastructure::llm::OpenRouterClient`] - OpenRouter chat completions
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Sends the prompts and returns the parsed JSON reply.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError`] on transport failures, non-success status
    /// codes, or a reply that is not a JSON object.
    async fn complete_json(&self, system_prompt: &str, user_message: &str)
    -> Result<Value, CompletionError>;
}
