use async_trait::async_trait;
use gossipcheck_core::StreamStatus;

/// Something that can hand back a node's raw gossip document.
#[async_trait]
pub trait GossipSource: Send + Sync {
    /// Fetch the gossip document as served.
    async fn fetch_gossip(&self) -> anyhow::Result<Vec<u8>>;

    /// Human-readable origin for logs and messages.
    fn describe(&self) -> String;
}

/// Something that can read the head of a named stream.
#[async_trait]
pub trait StreamSource: Send + Sync {
    /// Fetch the stream feed, or `NotFound` if the stream does not exist.
    /// Any other failure is an error.
    async fn fetch_stream(&self, name: &str) -> anyhow::Result<StreamStatus>;
}
