use crate::{
    key::{EthereumKey, KeyError, DEFAULT_DERIVATION_PATH},
    signature::RecoverableSignature,
    transaction::{request_from_arguments, DecodedTransaction},
};
use ethers_core::{
    types::transaction::eip712::{Eip712, TypedData},
    utils::keccak256,
};
use ethers_signers::{coins_bip39::English, MnemonicBuilder};
use std::collections::HashMap;
use tracing::trace;
use wallet_connector_core::{
    CapabilityProvider, Connector, EngineError, Network, NetworkFee, NetworkType,
    ParsedTransaction, SignedTransaction, TypedDataSignature,
};

/// EIP-191 personal message prefix
const PREFIX: &str = "\x19Ethereum Signed Message:\n";

/// Chain id used when the network configuration does not name one
pub const DEFAULT_CHAIN_ID: u64 = 1;

/// A [`Connector`] for Ethereum networks
pub type EthereumConnector = Connector<EthereumProvider>;

/// Ethereum signing and legacy transaction handling.
///
/// Keys are derived from English BIP-39 phrases along [`DEFAULT_DERIVATION_PATH`], message
/// digests are keccak256, signatures are 65 bytes `r || s || v` with `v` in {27, 28} and
/// transactions are EIP-155 protected legacy transactions.
#[derive(Clone, Debug)]
pub struct EthereumProvider {
    chain_id: u64,
    derivation_path: String,
}

impl EthereumProvider {
    pub fn new(chain_id: u64) -> Self {
        Self { chain_id, derivation_path: DEFAULT_DERIVATION_PATH.to_string() }
    }

    /// Sets the derivation path of the keys derived from phrases
    pub fn derivation_path(mut self, path: &str) -> Result<Self, KeyError> {
        MnemonicBuilder::<English>::default().derivation_path(path)?;
        self.derivation_path = path.to_string();
        Ok(self)
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    fn decode(&self, serialization: &[u8]) -> Result<DecodedTransaction, EngineError> {
        let decoded = DecodedTransaction::decode(serialization)?;
        match decoded.chain_id() {
            Some(chain_id) if chain_id != self.chain_id => Err(EngineError::InvalidSerialization(
                format!("chain id {chain_id} does not match network chain id {}", self.chain_id),
            )),
            _ => Ok(decoded),
        }
    }
}

impl CapabilityProvider for EthereumProvider {
    type Key = EthereumKey;

    fn for_network(network: &Network) -> Option<Self> {
        (network.network_type == NetworkType::Eth)
            .then(|| Self::new(network.chain_id.unwrap_or(DEFAULT_CHAIN_ID)))
    }

    fn derive_key(&self, phrase: &str) -> Result<EthereumKey, EngineError> {
        EthereumKey::from_phrase(phrase, &self.derivation_path, None)
            .map_err(|err| EngineError::InvalidPhrase(err.to_string()))
    }

    fn digest(&self, message: &[u8]) -> Result<[u8; 32], EngineError> {
        Ok(keccak256(message))
    }

    fn apply_prefix(&self, message: &[u8]) -> Result<Vec<u8>, EngineError> {
        let mut prefixed = format!("{PREFIX}{}", message.len()).into_bytes();
        prefixed.extend_from_slice(message);
        Ok(prefixed)
    }

    fn sign_digest(&self, key: &EthereumKey, digest: &[u8; 32]) -> Result<Vec<u8>, EngineError> {
        let signer = key.signer().ok_or_else(missing_secret)?;
        Ok(RecoverableSignature::sign(signer, digest)?.to_bytes())
    }

    fn sign_typed_data(
        &self,
        key: &EthereumKey,
        typed_data: &str,
    ) -> Result<TypedDataSignature, EngineError> {
        let value: serde_json::Value = serde_json::from_str(typed_data)
            .map_err(|err| EngineError::InvalidJson(err.to_string()))?;
        let typed_data: TypedData = serde_json::from_value(value)
            .map_err(|err| EngineError::InvalidTypedData(err.to_string()))?;
        let digest = typed_data
            .encode_eip712()
            .map_err(|err| EngineError::InvalidTypedData(err.to_string()))?;
        trace!(primary_type = %typed_data.primary_type, "encoded typed data");

        let signature = self.sign_digest(key, &digest)?;
        Ok(TypedDataSignature { digest, signature })
    }

    fn recover_key(&self, digest: &[u8; 32], signature: &[u8]) -> Result<EthereumKey, EngineError> {
        let signature = RecoverableSignature::from_bytes(signature)?;
        Ok(EthereumKey::public(signature.recover(digest)?))
    }

    fn build_transaction(
        &self,
        arguments: &HashMap<String, String>,
        default_fee: Option<&NetworkFee>,
    ) -> Result<Vec<u8>, EngineError> {
        let request = request_from_arguments(arguments, default_fee, self.chain_id)?;
        Ok(request.rlp().to_vec())
    }

    fn parse_transaction(&self, serialization: &[u8]) -> Result<ParsedTransaction, EngineError> {
        // signed serializations only decode if their signature recovers
        let decoded = self.decode(serialization)?;
        let identifier = decoded.signature.map(|_| keccak256(serialization).to_vec());
        Ok(ParsedTransaction { serialization: serialization.to_vec(), identifier })
    }

    fn sign_transaction(
        &self,
        serialization: &[u8],
        key: &EthereumKey,
    ) -> Result<SignedTransaction, EngineError> {
        let signer = key.signer().ok_or_else(missing_secret)?;
        let decoded = self.decode(serialization)?;
        if decoded.signature.is_some() {
            return Err(EngineError::IllegalOperation("transaction is already signed".to_string()))
        }

        let chain_id = decoded.chain_id().unwrap_or(self.chain_id);
        let request = decoded.request.chain_id(chain_id);
        let signature = RecoverableSignature::sign(signer, request.sighash().as_fixed_bytes())?
            .to_eip155(chain_id)?;

        let signed = request.rlp_signed(&signature).to_vec();
        let identifier = keccak256(&signed).to_vec();
        Ok(SignedTransaction { serialization: signed, identifier })
    }
}

fn missing_secret() -> EngineError {
    EngineError::IllegalOperation("key does not have a private key".to_string())
}
