use crate::{
    completion::{completion, PendingSubmission, SubmitResult},
    entity::{Digest, Serialization, Signature},
    session::SessionId,
    Broadcaster, CapabilityProvider, ConnectorError, Key, KeyHandle, Network, NetworkFee,
    Transaction,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use std::{collections::HashMap, fmt, sync::Arc};
use tracing::{debug, instrument, trace, Instrument};

/// Number of leading payload bytes included in a submission's display identifier
const DISPLAY_PREFIX_LEN: usize = 10;

/// A signing session bound to one network.
///
/// The connector owns its capability provider and hands out [`Key`]s, [`Digest`]s,
/// [`Signature`]s, [`Serialization`]s and [`Transaction`]s. Everything except keys is tagged
/// with the connector's [`SessionId`], and every operation rejects objects created by
/// another connector with [`ConnectorError::UnknownEntity`].
///
/// All operations but [`Connector::submit`] are synchronous. Calls into the same connector
/// from several threads must be serialized by the caller.
///
/// ```no_run
/// # use wallet_connector_core::{Broadcaster, CapabilityProvider, Connector, Network};
/// # use std::sync::Arc;
/// # async fn foo<P: CapabilityProvider>(network: Network, broadcaster: Arc<dyn Broadcaster>)
/// #   -> Result<(), Box<dyn std::error::Error>> {
/// let connector = Connector::<P>::create(network, broadcaster)?;
/// let key = connector.create_key("paper key words ...")?;
///
/// let (digest, signature) = connector.sign_message(b"hello", &key, true)?;
/// let public = connector.recover(&digest, &signature)?;
/// assert_eq!(public.public_key(), key.public_key());
/// # Ok(())
/// # }
/// ```
pub struct Connector<P: CapabilityProvider> {
    session: SessionId,
    network: Network,
    provider: P,
    broadcaster: Arc<dyn Broadcaster>,
}

impl<P: CapabilityProvider> Connector<P> {
    /// Creates a connector for `network`, failing with
    /// [`ConnectorError::UnsupportedConnector`] if `P` does not serve it.
    pub fn create(
        network: Network,
        broadcaster: Arc<dyn Broadcaster>,
    ) -> Result<Self, ConnectorError> {
        match P::for_network(&network) {
            Some(provider) => Ok(Self::new(provider, network, broadcaster)),
            None => {
                debug!(network = %network, ty = %network.network_type, "no connector for network");
                Err(ConnectorError::UnsupportedConnector)
            }
        }
    }

    /// Creates a connector around an already configured provider
    pub fn new(provider: P, network: Network, broadcaster: Arc<dyn Broadcaster>) -> Self {
        let session = SessionId::next();
        debug!(%session, network = %network, "opened connector session");
        Self { session, network, provider, broadcaster }
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Derives a signing key from a mnemonic phrase
    #[instrument(level = "debug", skip_all, fields(session = %self.session), err)]
    pub fn create_key(&self, phrase: &str) -> Result<Key<P::Key>, ConnectorError> {
        let handle = self.provider.derive_key(phrase)?;
        Ok(Key::new(handle))
    }

    /// Signs an arbitrary message, optionally applying the network's message prefix
    /// before hashing.
    #[instrument(level = "debug", skip(self, message, key), fields(session = %self.session), err)]
    pub fn sign_message(
        &self,
        message: &[u8],
        key: &Key<P::Key>,
        prefix: bool,
    ) -> Result<(Digest, Signature), ConnectorError> {
        ensure_secret(key)?;

        let prefixed;
        let message = if prefix {
            prefixed = self.provider.apply_prefix(message)?;
            &prefixed[..]
        } else {
            message
        };

        let digest = self.provider.digest(message)?;
        let signature = self.provider.sign_digest(key.handle(), &digest)?;
        trace!(digest = %hex::encode(digest), "signed message");

        Ok((Digest::new(self.session, digest), Signature::new(self.session, signature)))
    }

    /// Signs a JSON typed data document (EIP-712 on Ethereum).
    ///
    /// Fails with [`ConnectorError::InvalidJson`] if `typed_data` is not JSON, and with
    /// [`ConnectorError::InvalidTypedData`] if it is not typed data for this network.
    #[instrument(
        level = "debug",
        skip(self, typed_data, key),
        fields(session = %self.session),
        err
    )]
    pub fn sign_typed_data(
        &self,
        typed_data: &str,
        key: &Key<P::Key>,
    ) -> Result<(Digest, Signature), ConnectorError> {
        ensure_secret(key)?;

        let signed = self.provider.sign_typed_data(key.handle(), typed_data)?;
        trace!(digest = %hex::encode(signed.digest), "signed typed data");

        Ok((
            Digest::new(self.session, signed.digest),
            Signature::new(self.session, signed.signature),
        ))
    }

    /// Recovers the public key that produced `signature` over `digest`.
    ///
    /// The returned key has no secret.
    #[instrument(level = "debug", skip_all, fields(session = %self.session), err)]
    pub fn recover(
        &self,
        digest: &Digest,
        signature: &Signature,
    ) -> Result<Key<P::Key>, ConnectorError> {
        self.session.verify(digest)?;
        self.session.verify(signature)?;

        match self.provider.recover_key(digest.data32(), signature.data()) {
            Ok(handle) => Ok(Key::new(handle)),
            Err(err) => {
                debug!(%err, "public key recovery failed");
                Err(ConnectorError::UnrecoverableKey)
            }
        }
    }

    /// Wraps arbitrary bytes as a serialization of this session. The bytes are only
    /// validated once passed to [`Connector::create_transaction_from_serialization`].
    pub fn create_serialization(&self, data: impl Into<Vec<u8>>) -> Serialization {
        Serialization::new(self.session, data.into())
    }

    /// Builds an unsigned transaction from request arguments.
    ///
    /// If `arguments` carry no fee, `default_fee` is used; if that is absent too the call
    /// fails with [`ConnectorError::MissingFee`] and can be retried with a fee.
    #[instrument(
        level = "debug",
        skip(self, arguments),
        fields(session = %self.session, args = arguments.len()),
        err
    )]
    pub fn create_transaction(
        &self,
        arguments: &HashMap<String, String>,
        default_fee: Option<&NetworkFee>,
    ) -> Result<Transaction, ConnectorError> {
        let data = self.provider.build_transaction(arguments, default_fee)?;
        Ok(Transaction::unsigned(Serialization::new(self.session, data)))
    }

    /// Creates a signed or unsigned transaction from a serialization of this session
    #[instrument(level = "debug", skip_all, fields(session = %self.session), err)]
    pub fn create_transaction_from_serialization(
        &self,
        serialization: &Serialization,
    ) -> Result<Transaction, ConnectorError> {
        self.session.verify(serialization)?;

        let parsed = self.provider.parse_transaction(serialization.data())?;
        trace!(signed = parsed.identifier.is_some(), "parsed transaction");

        Ok(Transaction::from_parts(
            Serialization::new(self.session, parsed.serialization),
            parsed.identifier,
        ))
    }

    /// Signs an unsigned transaction, returning a new signed transaction.
    ///
    /// Signing an already signed transaction fails with
    /// [`ConnectorError::PreviouslySignedTransaction`].
    #[instrument(level = "debug", skip_all, fields(session = %self.session), err)]
    pub fn sign_transaction(
        &self,
        transaction: &Transaction,
        key: &Key<P::Key>,
    ) -> Result<Transaction, ConnectorError> {
        self.session.verify(transaction)?;
        ensure_secret(key)?;
        if transaction.is_signed() {
            return Err(ConnectorError::PreviouslySignedTransaction)
        }

        let signed =
            self.provider.sign_transaction(transaction.serialization().data(), key.handle())?;
        trace!(identifier = %hex::encode(&signed.identifier), "signed transaction");

        let serialization = Serialization::new(self.session, signed.serialization);
        Ok(Transaction::signed(serialization, signed.identifier))
    }

    /// Submits a signed transaction to the network.
    ///
    /// Returns immediately; the returned [`PendingSubmission`] resolves exactly once. If
    /// `transaction` is foreign or unsigned, the failure is delivered before this method
    /// returns and the network is never contacted. Must be called from within a tokio
    /// runtime.
    #[instrument(level = "debug", skip_all, fields(session = %self.session))]
    pub fn submit(&self, transaction: Transaction) -> PendingSubmission {
        let (completion, pending) = completion();
        match self.prepare_submission(transaction) {
            Ok(submission) => match tokio::runtime::Handle::try_current() {
                Ok(runtime) => {
                    let span = tracing::debug_span!("submit", identifier = %submission.identifier);
                    runtime.spawn(
                        async move { completion.complete(submission.run().await) }.instrument(span),
                    );
                }
                Err(_) => completion.complete(Err(crate::BroadcastError::NoRuntime.into())),
            },
            Err(err) => completion.complete(Err(err)),
        }
        pending
    }

    /// Submits a signed transaction and hands the outcome to `on_complete`.
    ///
    /// `on_complete` is invoked exactly once: synchronously for precondition failures,
    /// otherwise from a task on the ambient tokio runtime.
    pub fn submit_with<F>(&self, transaction: Transaction, on_complete: F)
    where
        F: FnOnce(SubmitResult) + Send + 'static,
    {
        let mut pending = self.submit(transaction);
        match pending.try_result() {
            Some(result) => on_complete(result),
            None => {
                // `submit` only leaves the outcome pending once a task has been spawned
                tokio::spawn(async move { on_complete(pending.await) });
            }
        }
    }

    fn prepare_submission(&self, transaction: Transaction) -> Result<Submission, ConnectorError> {
        self.session.verify(&transaction)?;
        if !transaction.is_signed() {
            return Err(ConnectorError::UnsignedTransaction)
        }

        let identifier = display_identifier(&self.network, transaction.serialization().data());
        Ok(Submission {
            broadcaster: self.broadcaster.clone(),
            network_uids: self.network.uids.clone(),
            identifier,
            transaction,
        })
    }
}

impl<P: CapabilityProvider> fmt::Debug for Connector<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connector")
            .field("session", &self.session)
            .field("network", &self.network)
            .field("broadcaster", &self.broadcaster)
            .finish()
    }
}

/// A validated submission, ready to be handed to the broadcaster
struct Submission {
    broadcaster: Arc<dyn Broadcaster>,
    network_uids: String,
    identifier: String,
    transaction: Transaction,
}

impl Submission {
    async fn run(self) -> SubmitResult {
        let Submission { broadcaster, network_uids, identifier, transaction } = self;
        let tid = broadcaster
            .submit_transaction(&network_uids, transaction.serialization().data(), &identifier)
            .await
            .map_err(|err| {
                debug!(%err, "broadcaster failed");
                ConnectorError::SubmitFailed(err)
            })?;
        debug!(%tid, "transaction submitted");
        Ok(transaction)
    }
}

fn ensure_secret<H: KeyHandle>(key: &Key<H>) -> Result<(), ConnectorError> {
    if key.has_secret() {
        Ok(())
    } else {
        Err(ConnectorError::InvalidKeyForSigning("key does not have a private key".to_string()))
    }
}

/// Label used to trace a submission through the broadcaster: the network uids and a
/// short base64 prefix of the payload.
pub(crate) fn display_identifier(network: &Network, payload: &[u8]) -> String {
    let prefix = &payload[..payload.len().min(DISPLAY_PREFIX_LEN)];
    format!("WalletConnect: {}:{}", network.uids, BASE64.encode(prefix))
}
