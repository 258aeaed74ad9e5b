//! The per-network engine a [`Connector`](crate::Connector) delegates to.
use crate::{EngineError, KeyHandle, Network, NetworkFee};
use std::collections::HashMap;

/// Digest and signature produced by signing typed data
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypedDataSignature {
    pub digest: [u8; 32],
    pub signature: Vec<u8>,
}

/// Result of parsing a transaction serialization.
///
/// A parsed transaction is signed iff it carries an identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedTransaction {
    pub serialization: Vec<u8>,
    pub identifier: Option<Vec<u8>>,
}

/// Result of signing a transaction serialization
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedTransaction {
    pub serialization: Vec<u8>,
    pub identifier: Vec<u8>,
}

/// Network specific signing and serialization primitives.
///
/// Implement this trait to add a network to the connector. The connector performs all
/// provenance and state checks before calling into the provider, so implementations only
/// deal with bytes and key handles.
pub trait CapabilityProvider: Send + Sync + Sized {
    /// The key handle this provider produces and signs with
    type Key: KeyHandle;

    /// Returns a provider for `network`, or `None` if the network is not served
    fn for_network(network: &Network) -> Option<Self>;

    /// Derives a keypair from a mnemonic phrase
    fn derive_key(&self, phrase: &str) -> Result<Self::Key, EngineError>;

    /// Hashes a message with the network's message digest
    fn digest(&self, message: &[u8]) -> Result<[u8; 32], EngineError>;

    /// Applies the network's canonical message prefix
    fn apply_prefix(&self, message: &[u8]) -> Result<Vec<u8>, EngineError>;

    /// Signs a digest. `key` is guaranteed to hold a secret.
    fn sign_digest(&self, key: &Self::Key, digest: &[u8; 32]) -> Result<Vec<u8>, EngineError>;

    /// Hashes and signs a JSON typed data document. `key` is guaranteed to hold a secret.
    fn sign_typed_data(
        &self,
        key: &Self::Key,
        typed_data: &str,
    ) -> Result<TypedDataSignature, EngineError>;

    /// Recovers the public key which produced `signature` over `digest`
    fn recover_key(&self, digest: &[u8; 32], signature: &[u8]) -> Result<Self::Key, EngineError>;

    /// Builds an unsigned transaction serialization from request arguments
    fn build_transaction(
        &self,
        arguments: &HashMap<String, String>,
        default_fee: Option<&NetworkFee>,
    ) -> Result<Vec<u8>, EngineError>;

    /// Parses a signed or unsigned transaction serialization
    fn parse_transaction(&self, serialization: &[u8]) -> Result<ParsedTransaction, EngineError>;

    /// Signs an unsigned transaction serialization. `key` is guaranteed to hold a secret.
    fn sign_transaction(
        &self,
        serialization: &[u8],
        key: &Self::Key,
    ) -> Result<SignedTransaction, EngineError>;
}
