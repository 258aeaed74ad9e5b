use async_trait::async_trait;
use ethers_core::types::{Bytes, TxHash};
use ethers_providers::{Middleware, MiddlewareError};
use tracing::{debug, instrument};
use wallet_connector_core::{BroadcastError, Broadcaster};

/// Broadcasts signed transactions through `eth_sendRawTransaction` on any [`Middleware`].
///
/// JSON-RPC error responses, e.g. a nonce that is too low, are reported as
/// [`BroadcastError::Rejected`]; every other failure is a transport error.
///
/// ```no_run
/// use ethers_providers::{Http, Provider};
/// use std::{convert::TryFrom, sync::Arc};
/// use wallet_connector_core::Network;
/// use wallet_connector_eth::{EthereumConnector, RpcBroadcaster};
///
/// # fn foo() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = Provider::<Http>::try_from("http://localhost:8545")?;
/// let network = Network::from_json(r#"{"uids":"ethereum-mainnet","type":"eth","chainId":1}"#)?;
/// let connector = EthereumConnector::create(network, Arc::new(RpcBroadcaster::new(provider)))?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct RpcBroadcaster<M> {
    inner: M,
}

impl<M: Middleware> RpcBroadcaster<M> {
    pub fn new(inner: M) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }
}

#[async_trait]
impl<M> Broadcaster for RpcBroadcaster<M>
where
    M: Middleware,
    M::Error: 'static,
{
    #[instrument(level = "debug", skip(self, payload), fields(len = payload.len()))]
    async fn submit_transaction(
        &self,
        network_uids: &str,
        payload: &[u8],
        identifier: &str,
    ) -> Result<String, BroadcastError> {
        let tx_hash: TxHash = {
            let pending = self
                .inner
                .send_raw_transaction(Bytes::from(payload.to_vec()))
                .await
                .map_err(|err| match err.as_error_response() {
                    Some(response) => BroadcastError::Rejected(response.message.clone()),
                    None => BroadcastError::transport(err),
                })?;
            *pending
        };
        debug!(?tx_hash, "broadcast raw transaction");
        Ok(format!("{tx_hash:?}"))
    }
}
