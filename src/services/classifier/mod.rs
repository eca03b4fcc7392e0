pub mod analysis;
pub mod ollama;
pub mod openai;

use async_trait::async_trait;

pub use analysis::classify_message;

/// Transport seam for the classification service. Deployment shapes differ
/// (remote API, local model) but callers only ever see this one method.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn chat(&self, system_prompt: &str, user_prompt: &str) -> anyhow::Result<String>;
}
