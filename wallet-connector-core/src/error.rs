use thiserror::Error;

/// Failures a [`CapabilityProvider`](crate::CapabilityProvider) may report.
///
/// This set is closed: a provider has to express every failure as one of these, and
/// every variant has a counterpart in [`ConnectorError`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The operation is not available on this network
    #[error("illegal operation: {0}")]
    IllegalOperation(String),
    /// The phrase could not be turned into a seed
    #[error("invalid key phrase: {0}")]
    InvalidPhrase(String),
    /// A required transaction argument is absent or malformed
    #[error("invalid transaction arguments: {0}")]
    InvalidTransactionArguments(String),
    /// Neither the arguments nor the caller supplied a fee
    #[error("missing fee")]
    MissingFee,
    #[error("invalid digest")]
    InvalidDigest,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("invalid transaction serialization: {0}")]
    InvalidSerialization(String),
    #[error("invalid JSON: {0}")]
    InvalidJson(String),
    #[error("invalid typed data: {0}")]
    InvalidTypedData(String),
    /// The signature scheme does not support public key recovery, or the signature is
    /// malformed
    #[error("key is not recoverable from the signature")]
    UnrecoverableKey,
}

/// Failures reported by a [`Broadcaster`](crate::Broadcaster).
#[derive(Error, Debug)]
pub enum BroadcastError {
    /// The remote system refused the transaction
    #[error("transaction rejected: {0}")]
    Rejected(String),
    /// The transaction could not be relayed
    #[error(transparent)]
    Transport(Box<dyn std::error::Error + Send + Sync>),
    /// The completion was abandoned before an outcome was delivered
    #[error("submission dropped before completing")]
    Dropped,
    /// `submit` was called outside of an async runtime
    #[error("no async runtime to submit the transaction on")]
    NoRuntime,
}

impl BroadcastError {
    /// Wraps any transport level error
    pub fn transport<E: std::error::Error + Send + Sync + 'static>(err: E) -> Self {
        BroadcastError::Transport(Box::new(err))
    }
}

/// Error returned by every fallible [`Connector`](crate::Connector) operation.
#[derive(Error, Debug)]
pub enum ConnectorError {
    /// The requested network has no connector implementation
    #[error("no connector is available for this network")]
    UnsupportedConnector,
    /// An input object was not produced by this connector
    #[error("entity was not created by this connector")]
    UnknownEntity,
    /// Signing was attempted with a key lacking secret material
    #[error("invalid key for signing: {0}")]
    InvalidKeyForSigning(String),
    #[error("invalid key phrase: {0}")]
    InvalidPhrase(String),
    #[error("invalid JSON: {0}")]
    InvalidJson(String),
    #[error("invalid typed data: {0}")]
    InvalidTypedData(String),
    #[error("key is not recoverable from the signature")]
    UnrecoverableKey,
    #[error("invalid transaction arguments: {0}")]
    InvalidTransactionArguments(String),
    /// The fee is absent from both the arguments and the caller supplied default.
    /// Retry with a default fee.
    #[error("missing fee")]
    MissingFee,
    #[error("transaction is already signed")]
    PreviouslySignedTransaction,
    #[error("transaction is not signed")]
    UnsignedTransaction,
    /// The broadcaster rejected or failed to relay the transaction
    #[error("submit failed: {0}")]
    SubmitFailed(#[source] BroadcastError),
    #[error("illegal operation: {0}")]
    IllegalOperation(String),
    #[error("invalid digest")]
    InvalidDigest,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("invalid transaction serialization: {0}")]
    InvalidTransactionSerialization(String),
}

impl From<EngineError> for ConnectorError {
    fn from(src: EngineError) -> Self {
        match src {
            EngineError::IllegalOperation(msg) => ConnectorError::IllegalOperation(msg),
            EngineError::InvalidPhrase(msg) => ConnectorError::InvalidPhrase(msg),
            EngineError::InvalidTransactionArguments(msg) => {
                ConnectorError::InvalidTransactionArguments(msg)
            }
            EngineError::MissingFee => ConnectorError::MissingFee,
            EngineError::InvalidDigest => ConnectorError::InvalidDigest,
            EngineError::InvalidSignature => ConnectorError::InvalidSignature,
            EngineError::InvalidSerialization(msg) => {
                ConnectorError::InvalidTransactionSerialization(msg)
            }
            EngineError::InvalidJson(msg) => ConnectorError::InvalidJson(msg),
            EngineError::InvalidTypedData(msg) => ConnectorError::InvalidTypedData(msg),
            EngineError::UnrecoverableKey => ConnectorError::UnrecoverableKey,
        }
    }
}

impl From<BroadcastError> for ConnectorError {
    fn from(src: BroadcastError) -> Self {
        ConnectorError::SubmitFailed(src)
    }
}
