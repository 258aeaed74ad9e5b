#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(rustdoc::broken_intra_doc_links)]
//! # Wallet connector core
//!
//! The network-agnostic half of a wallet connector: a signing session ([`Connector`])
//! that lets a wallet act as the signing counterparty of a dApp connection.
//!
//! A connector is bound to one [`Network`] and delegates every cryptographic or encoding
//! decision to a [`CapabilityProvider`] for that network. It is responsible for
//!
//! - never signing with a key that lacks a secret,
//! - never signing a transaction twice,
//! - rejecting digests, signatures, serializations and transactions that another
//!   connector produced.
//!
//! Submission of signed transactions goes through a [`Broadcaster`] and completes through
//! a one-shot [`PendingSubmission`].

mod broadcast;
pub use broadcast::Broadcaster;

pub mod completion;
pub use completion::{Completion, PendingSubmission, SubmitResult};

mod connector;
pub use connector::Connector;

mod entity;
pub use entity::{Digest, Serialization, Signature};

mod error;
pub use error::{BroadcastError, ConnectorError, EngineError};

mod key;
pub use key::{Key, KeyHandle};

mod network;
pub use network::{Network, NetworkFee, NetworkType};

mod provider;
pub use provider::{CapabilityProvider, ParsedTransaction, SignedTransaction, TypedDataSignature};

mod session;
pub use session::{Provenance, SessionId};

mod transaction;
pub use transaction::{Transaction, TransactionState};

#[cfg(test)]
mod mock;
