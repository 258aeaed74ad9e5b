//! Recoverable secp256k1 signatures in their 65 byte `r || s || v` form.
use ethers_core::{
    k256::ecdsa::{RecoveryId, Signature as K256Signature, SigningKey, VerifyingKey},
    types::{Signature, U256},
};
use wallet_connector_core::EngineError;

pub(crate) const SIGNATURE_LEN: usize = 65;

/// A signature over a prehashed message together with its recovery id
#[derive(Clone, Debug)]
pub(crate) struct RecoverableSignature {
    signature: K256Signature,
    recovery_id: RecoveryId,
}

impl RecoverableSignature {
    pub(crate) fn sign(signer: &SigningKey, hash: &[u8; 32]) -> Result<Self, EngineError> {
        let (signature, recovery_id) =
            signer.sign_prehash_recoverable(hash).map_err(|_| EngineError::InvalidDigest)?;
        Ok(Self { signature, recovery_id })
    }

    /// Parses `r || s || v`, accepting `v` as 0/1, 27/28 or in EIP-155 form
    pub(crate) fn from_bytes(bytes: &[u8]) -> Result<Self, EngineError> {
        if bytes.len() != SIGNATURE_LEN {
            return Err(EngineError::InvalidSignature)
        }
        let recovery_id = normalize_recovery_id(u64::from(bytes[64]))
            .and_then(RecoveryId::from_byte)
            .ok_or(EngineError::InvalidSignature)?;
        let signature =
            K256Signature::from_slice(&bytes[..64]).map_err(|_| EngineError::InvalidSignature)?;
        Ok(Self { signature, recovery_id })
    }

    /// `r || s || v` in 'Electrum' notation (`v` is 27 or 28)
    pub(crate) fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SIGNATURE_LEN);
        out.extend_from_slice(&self.signature.to_bytes());
        out.push(self.recovery_id.to_byte() + 27);
        out
    }

    /// The transaction signature, with EIP-155 replay protection applied to `v`
    pub(crate) fn to_eip155(&self, chain_id: u64) -> Result<Signature, EngineError> {
        let v = chain_id
            .checked_mul(2)
            .and_then(|v| v.checked_add(35 + u64::from(self.recovery_id.to_byte())))
            .ok_or_else(|| {
                EngineError::IllegalOperation(format!("chain id {chain_id} too large for EIP-155"))
            })?;
        let bytes = self.signature.to_bytes();
        Ok(Signature {
            r: U256::from_big_endian(&bytes[..32]),
            s: U256::from_big_endian(&bytes[32..]),
            v,
        })
    }

    pub(crate) fn recover(&self, hash: &[u8; 32]) -> Result<VerifyingKey, EngineError> {
        VerifyingKey::recover_from_prehash(hash, &self.signature, self.recovery_id)
            .map_err(|_| EngineError::UnrecoverableKey)
    }
}

fn normalize_recovery_id(v: u64) -> Option<u8> {
    match v {
        0 => Some(0),
        1 => Some(1),
        27 => Some(0),
        28 => Some(1),
        v if v >= 35 => Some(((v - 1) % 2) as u8),
        _ => None,
    }
}
