//! secp256k1 key handles, derived from BIP-39 phrases or recovered from signatures
use ethers_core::{
    k256::{
        ecdsa::{self, SigningKey, VerifyingKey},
        elliptic_curve::sec1::ToEncodedPoint,
        PublicKey as K256PublicKey,
    },
    types::{Address, PathOrString},
    utils::keccak256,
};
use ethers_signers::{coins_bip39::English, MnemonicBuilder, WalletError};
use std::fmt;
use thiserror::Error;
use wallet_connector_core::KeyHandle;

/// Path of the first account of the default Ethereum wallet
pub const DEFAULT_DERIVATION_PATH: &str = "m/44'/60'/0'/0/0";

/// Error thrown while deriving a key or reading a public key
#[derive(Error, Debug)]
pub enum KeyError {
    /// Error propagated from the mnemonic wallet builder
    #[error(transparent)]
    WalletError(#[from] WalletError),
    /// Error propagated from k256's ECDSA module
    #[error(transparent)]
    EcdsaError(#[from] ecdsa::Error),
}

/// An Ethereum keypair, or a public key recovered from a signature.
///
/// The secret scalar is zeroed when the key is dropped. It never leaves this crate:
///
/// ```compile_fail
/// use wallet_connector_eth::EthereumKey;
///
/// fn leak(key: &EthereumKey) -> Option<&ethers_core::k256::ecdsa::SigningKey> {
///     key.signer()
/// }
/// ```
pub struct EthereumKey {
    inner: Inner,
}

enum Inner {
    Secret(SigningKey),
    Public(VerifyingKey),
}

impl EthereumKey {
    pub(crate) fn secret(signer: SigningKey) -> Self {
        Self { inner: Inner::Secret(signer) }
    }

    pub(crate) fn public(verifier: VerifyingKey) -> Self {
        Self { inner: Inner::Public(verifier) }
    }

    /// Derives the key at `path` from an English BIP-39 phrase
    pub(crate) fn from_phrase(
        phrase: &str,
        path: &str,
        password: Option<&str>,
    ) -> Result<Self, KeyError> {
        // never read the phrase from a file, even if it names one
        let mut builder = MnemonicBuilder::<English>::default()
            .phrase(PathOrString::String(phrase.to_owned()))
            .derivation_path(path)?;
        if let Some(password) = password {
            builder = builder.password(password);
        }
        let wallet = builder.build()?;
        Ok(Self::secret(wallet.signer().clone()))
    }

    pub(crate) fn verifying_key(&self) -> VerifyingKey {
        match &self.inner {
            Inner::Secret(signer) => signer.verifying_key().clone(),
            Inner::Public(verifier) => verifier.clone(),
        }
    }

    /// The Ethereum address of the key
    pub fn address(&self) -> Address {
        verifying_key_to_address(&self.verifying_key())
    }

    pub(crate) fn signer(&self) -> Option<&SigningKey> {
        match &self.inner {
            Inner::Secret(signer) => Some(signer),
            Inner::Public(_) => None,
        }
    }
}

impl KeyHandle for EthereumKey {
    fn has_secret(&self) -> bool {
        matches!(self.inner, Inner::Secret(_))
    }

    /// Uncompressed SEC1 encoding
    fn public_key(&self) -> Vec<u8> {
        let public_key = K256PublicKey::from(&self.verifying_key());
        public_key.to_encoded_point(/* compress = */ false).as_bytes().to_vec()
    }
}

// do not log the signer
impl fmt::Debug for EthereumKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EthereumKey")
            .field("address", &self.address())
            .field("has_secret", &self.has_secret())
            .finish()
    }
}

/// Converts a SEC1 encoded public key, as returned by
/// [`Key::public_key`](wallet_connector_core::Key::public_key), into an Ethereum address
pub fn public_key_to_address(public_key: &[u8]) -> Result<Address, KeyError> {
    let verifier = VerifyingKey::from_sec1_bytes(public_key)?;
    Ok(verifying_key_to_address(&verifier))
}

fn verifying_key_to_address(verifier: &VerifyingKey) -> Address {
    let public_key = K256PublicKey::from(verifier).to_encoded_point(/* compress = */ false);
    let public_key = public_key.as_bytes();
    debug_assert_eq!(public_key[0], 0x04);
    let hash = keccak256(&public_key[1..]);
    Address::from_slice(&hash[12..])
}
