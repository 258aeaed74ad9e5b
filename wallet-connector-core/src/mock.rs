//! In-memory provider and broadcaster used by the connector tests.
use crate::{
    BroadcastError, Broadcaster, CapabilityProvider, EngineError, KeyHandle, Network,
    NetworkFee, NetworkType, ParsedTransaction, SignedTransaction, TypedDataSignature,
};
use async_trait::async_trait;
use std::{
    collections::{hash_map::DefaultHasher, HashMap},
    hash::{Hash, Hasher},
    sync::Mutex,
};

const PUBLIC_KEY_LEN: usize = 8;

fn hash32(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    for (lane, chunk) in out.chunks_mut(8).enumerate() {
        let mut hasher = DefaultHasher::new();
        lane.hash(&mut hasher);
        data.hash(&mut hasher);
        chunk.copy_from_slice(&hasher.finish().to_be_bytes());
    }
    out
}

#[derive(Debug)]
pub(crate) struct MockKey {
    public: [u8; PUBLIC_KEY_LEN],
    secret: bool,
}

impl KeyHandle for MockKey {
    fn has_secret(&self) -> bool {
        self.secret
    }

    fn public_key(&self) -> Vec<u8> {
        self.public.to_vec()
    }
}

/// Signatures are `public key || digest`, which makes every signature "recoverable".
/// Transactions are `U<nonce>:<fee>` when unsigned and `S<nonce>:<fee><public key>` when
/// signed.
#[derive(Debug)]
pub(crate) struct MockProvider;

impl MockProvider {
    fn sign(&self, key: &MockKey, digest: &[u8; 32]) -> Vec<u8> {
        let mut signature = key.public.to_vec();
        signature.extend_from_slice(digest);
        signature
    }
}

impl CapabilityProvider for MockProvider {
    type Key = MockKey;

    fn for_network(network: &Network) -> Option<Self> {
        (network.network_type == NetworkType::Eth).then_some(MockProvider)
    }

    fn derive_key(&self, phrase: &str) -> Result<MockKey, EngineError> {
        if phrase.is_empty() {
            return Err(EngineError::InvalidPhrase("empty phrase".into()))
        }
        let mut public = [0u8; PUBLIC_KEY_LEN];
        public.copy_from_slice(&hash32(phrase.as_bytes())[..PUBLIC_KEY_LEN]);
        Ok(MockKey { public, secret: true })
    }

    fn digest(&self, message: &[u8]) -> Result<[u8; 32], EngineError> {
        Ok(hash32(message))
    }

    fn apply_prefix(&self, message: &[u8]) -> Result<Vec<u8>, EngineError> {
        if message.is_empty() {
            return Err(EngineError::IllegalOperation("cannot prefix an empty message".into()))
        }
        let mut prefixed = b"\x19Mock:".to_vec();
        prefixed.extend_from_slice(message);
        Ok(prefixed)
    }

    fn sign_digest(&self, key: &MockKey, digest: &[u8; 32]) -> Result<Vec<u8>, EngineError> {
        Ok(self.sign(key, digest))
    }

    fn sign_typed_data(
        &self,
        key: &MockKey,
        typed_data: &str,
    ) -> Result<TypedDataSignature, EngineError> {
        let value: serde_json::Value =
            serde_json::from_str(typed_data).map_err(|e| EngineError::InvalidJson(e.to_string()))?;
        if !value.is_object() {
            return Err(EngineError::InvalidTypedData("expected an object".into()))
        }
        let digest = hash32(value.to_string().as_bytes());
        Ok(TypedDataSignature { digest, signature: self.sign(key, &digest) })
    }

    fn recover_key(&self, _digest: &[u8; 32], signature: &[u8]) -> Result<MockKey, EngineError> {
        if signature.len() != PUBLIC_KEY_LEN + 32 {
            return Err(EngineError::InvalidSignature)
        }
        let mut public = [0u8; PUBLIC_KEY_LEN];
        public.copy_from_slice(&signature[..PUBLIC_KEY_LEN]);
        Ok(MockKey { public, secret: false })
    }

    fn build_transaction(
        &self,
        arguments: &HashMap<String, String>,
        default_fee: Option<&NetworkFee>,
    ) -> Result<Vec<u8>, EngineError> {
        let nonce = arguments
            .get("nonce")
            .ok_or_else(|| EngineError::InvalidTransactionArguments("missing nonce".into()))?;
        let fee = match (arguments.get("fee"), default_fee) {
            (Some(fee), _) => fee.clone(),
            (None, Some(fee)) => fee.price_per_cost_factor.to_string(),
            (None, None) => return Err(EngineError::MissingFee),
        };
        Ok(format!("U{nonce}:{fee}").into_bytes())
    }

    fn parse_transaction(&self, serialization: &[u8]) -> Result<ParsedTransaction, EngineError> {
        let identifier = match serialization.first() {
            Some(b'U') => None,
            Some(b'S') => Some(hash32(serialization).to_vec()),
            _ => return Err(EngineError::InvalidSerialization("unknown marker".into())),
        };
        Ok(ParsedTransaction { serialization: serialization.to_vec(), identifier })
    }

    fn sign_transaction(
        &self,
        serialization: &[u8],
        key: &MockKey,
    ) -> Result<SignedTransaction, EngineError> {
        match serialization.split_first() {
            Some((b'U', body)) => {
                let mut signed = vec![b'S'];
                signed.extend_from_slice(body);
                signed.extend_from_slice(&key.public);
                let identifier = hash32(&signed).to_vec();
                Ok(SignedTransaction { serialization: signed, identifier })
            }
            _ => Err(EngineError::IllegalOperation("not an unsigned transaction".into())),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct MockBroadcaster {
    submitted: Mutex<Vec<(String, Vec<u8>, String)>>,
    rejection: Mutex<Option<String>>,
}

impl MockBroadcaster {
    /// Makes every following submission fail with `reason`
    pub(crate) fn reject(&self, reason: &str) {
        *self.rejection.lock().unwrap() = Some(reason.to_string());
    }

    pub(crate) fn submitted(&self) -> Vec<(String, Vec<u8>, String)> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl Broadcaster for MockBroadcaster {
    async fn submit_transaction(
        &self,
        network_uids: &str,
        payload: &[u8],
        identifier: &str,
    ) -> Result<String, BroadcastError> {
        self.submitted.lock().unwrap().push((
            network_uids.to_string(),
            payload.to_vec(),
            identifier.to_string(),
        ));
        match self.rejection.lock().unwrap().clone() {
            Some(reason) => Err(BroadcastError::Rejected(reason)),
            None => Ok(hex::encode(hash32(payload))),
        }
    }
}
