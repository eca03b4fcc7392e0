pub mod console;

use async_trait::async_trait;

/// Outbound delivery seam. The demo ships a console stand-in; a real channel
/// would implement the same contract.
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn deliver(&self, to: &str, body: &str) -> anyhow::Result<()>;
}
