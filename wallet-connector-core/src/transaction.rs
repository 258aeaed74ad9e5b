use crate::{
    entity::Serialization,
    session::{Provenance, SessionId},
};

/// Signing status of a [`Transaction`].
///
/// The identifier only exists once the transaction is signed, so a signed transaction
/// without an identifier (or the reverse) cannot be represented.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TransactionState {
    Unsigned,
    Signed {
        /// Network specific identifier, e.g. the transaction hash
        identifier: Vec<u8>,
    },
}

/// A transaction serialization together with its signing status.
///
/// Transactions move from [`TransactionState::Unsigned`] to [`TransactionState::Signed`]
/// only through [`Connector::sign_transaction`](crate::Connector::sign_transaction), which
/// returns a new instance and leaves its input untouched. A signed transaction is never
/// signed again.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Transaction {
    serialization: Serialization,
    state: TransactionState,
}

impl Transaction {
    pub(crate) fn unsigned(serialization: Serialization) -> Self {
        Self { serialization, state: TransactionState::Unsigned }
    }

    pub(crate) fn signed(serialization: Serialization, identifier: Vec<u8>) -> Self {
        Self { serialization, state: TransactionState::Signed { identifier } }
    }

    pub(crate) fn from_parts(serialization: Serialization, identifier: Option<Vec<u8>>) -> Self {
        match identifier {
            Some(identifier) => Self::signed(serialization, identifier),
            None => Self::unsigned(serialization),
        }
    }

    pub fn is_signed(&self) -> bool {
        matches!(self.state, TransactionState::Signed { .. })
    }

    /// The transaction's identifier, present iff the transaction is signed
    pub fn identifier(&self) -> Option<&[u8]> {
        match &self.state {
            TransactionState::Signed { identifier } => Some(identifier),
            TransactionState::Unsigned => None,
        }
    }

    /// The signed or unsigned serialization, according to [`Transaction::is_signed`]
    pub fn serialization(&self) -> &Serialization {
        &self.serialization
    }

    pub fn state(&self) -> &TransactionState {
        &self.state
    }
}

impl Provenance for Transaction {
    fn session(&self) -> SessionId {
        self.serialization.session()
    }
}
