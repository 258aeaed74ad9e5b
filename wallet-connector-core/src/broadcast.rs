use crate::BroadcastError;
use async_trait::async_trait;
use std::fmt::Debug;

/// Relays signed transactions to a network.
///
/// This is usually backed by the wallet's system client; see the Ethereum crate for a
/// JSON-RPC implementation.
#[async_trait]
pub trait Broadcaster: Debug + Send + Sync {
    /// Submits a signed `payload` on the network identified by `network_uids`.
    ///
    /// `identifier` is a human readable label for tracing the submission; it carries no
    /// protocol meaning. Returns the transaction id reported by the network.
    async fn submit_transaction(
        &self,
        network_uids: &str,
        payload: &[u8],
        identifier: &str,
    ) -> Result<String, BroadcastError>;
}
