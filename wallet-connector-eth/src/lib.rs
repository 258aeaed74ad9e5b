#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(rustdoc::broken_intra_doc_links)]
//! # Ethereum wallet connector
//!
//! A [`CapabilityProvider`](wallet_connector_core::CapabilityProvider) for Ethereum
//! networks and a [`Broadcaster`](wallet_connector_core::Broadcaster) that submits signed
//! transactions over JSON-RPC.
//!
//! ```no_run
//! use std::{collections::HashMap, sync::Arc};
//! use wallet_connector_core::{Broadcaster, Network, NetworkFee};
//! use wallet_connector_eth::EthereumConnector;
//!
//! # async fn foo(broadcaster: Arc<dyn Broadcaster>) -> Result<(), Box<dyn std::error::Error>> {
//! let network = Network::from_json(r#"{"uids":"ethereum-mainnet","type":"eth"}"#)?;
//! let connector = EthereumConnector::create(network, broadcaster)?;
//! let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon \
//!               abandon about";
//! let key = connector.create_key(phrase)?;
//!
//! let arguments: HashMap<String, String> = serde_json::from_str(
//!     r#"{"to":"0x3535353535353535353535353535353535353535","nonce":"0x0","gas":"0x5208"}"#,
//! )?;
//! let fee = NetworkFee::new(20_000_000_000, 0);
//! let unsigned = connector.create_transaction(&arguments, Some(&fee))?;
//! let signed = connector.sign_transaction(&unsigned, &key)?;
//! let submitted = connector.submit(signed).await?;
//! assert!(submitted.is_signed());
//! # Ok(())
//! # }
//! ```

mod broadcast;
pub use broadcast::RpcBroadcaster;

mod key;
pub use key::{public_key_to_address, EthereumKey, KeyError, DEFAULT_DERIVATION_PATH};

mod provider;
pub use provider::{EthereumConnector, EthereumProvider, DEFAULT_CHAIN_ID};

mod signature;

mod transaction;
