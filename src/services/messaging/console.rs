use async_trait::async_trait;

use super::MessageSink;

/// Simulated transport: prints what would have been sent.
pub struct ConsoleSink;

#[async_trait]
impl MessageSink for ConsoleSink {
    async fn deliver(&self, to: &str, body: &str) -> anyhow::Result<()> {
        println!("send to {to}: {body}");
        Ok(())
    }
}
