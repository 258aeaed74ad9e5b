#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(rustdoc::broken_intra_doc_links)]
//! # wallet-connector
//!
//! A wallet's side of a dApp connection: a [`Connector`](core::Connector) bound to one
//! network creates keys from mnemonic phrases, signs messages, typed data and transactions,
//! recovers public keys from signatures and submits signed transactions.
//!
//! The network-agnostic object model lives in [`core`]; network implementations are
//! enabled through features:
//!
//! | Feature | Crate                   | Networks |
//! |---------|-------------------------|----------|
//! | `eth`   | [`wallet-connector-eth`] | Ethereum |
//!
//! ```no_run
//! use std::sync::Arc;
//! use wallet_connector::prelude::*;
//!
//! # fn foo(broadcaster: Arc<dyn Broadcaster>) -> Result<(), Box<dyn std::error::Error>> {
//! let network = Network::new("ethereum-mainnet", NetworkType::Eth);
//! let connector = EthereumConnector::create(network, broadcaster)?;
//! let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon \
//!               abandon about";
//! let key = connector.create_key(phrase)?;
//!
//! let (digest, signature) = connector.sign_message(b"hello", &key, true)?;
//! assert_eq!(connector.recover(&digest, &signature)?.public_key(), key.public_key());
//! # Ok(())
//! # }
//! ```
//!
//! [`wallet-connector-eth`]: eth

/// The network-agnostic connector, its entities and errors
pub mod core {
    pub use wallet_connector_core::*;
}

#[cfg(feature = "eth")]
#[cfg_attr(docsrs, doc(cfg(feature = "eth")))]
/// Ethereum capability provider and JSON-RPC broadcaster
pub mod eth {
    pub use wallet_connector_eth::*;
}

/// Easy imports of frequently used types
pub mod prelude {
    pub use super::core::{
        BroadcastError, Broadcaster, CapabilityProvider, Connector, ConnectorError, Digest,
        Key, KeyHandle, Network, NetworkFee, NetworkType, PendingSubmission, Serialization,
        Signature, SubmitResult, Transaction, TransactionState,
    };

    #[cfg(feature = "eth")]
    pub use super::eth::{
        public_key_to_address, EthereumConnector, EthereumKey, EthereumProvider, RpcBroadcaster,
    };
}
