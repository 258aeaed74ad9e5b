//! Session identities used to tie derived objects to the connector that produced them.
use crate::ConnectorError;
use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

static NEXT_SESSION: AtomicU64 = AtomicU64::new(1);

/// Identity of a single connector session.
///
/// Every [`Digest`](crate::Digest), [`Signature`](crate::Signature),
/// [`Serialization`](crate::Serialization) and [`Transaction`](crate::Transaction) carries
/// the id of the connector that created it. Ids are compared by value and are never
/// reused within a process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    /// Allocates a fresh, process-unique session id
    pub(crate) fn next() -> Self {
        SessionId(NEXT_SESSION.fetch_add(1, Ordering::Relaxed))
    }

    /// Checks that `entity` was created by this session.
    pub fn verify<E: Provenance + ?Sized>(&self, entity: &E) -> Result<(), ConnectorError> {
        if entity.session() == *self {
            Ok(())
        } else {
            tracing::debug!(
                expected = %self,
                found = %entity.session(),
                "rejecting foreign entity"
            );
            Err(ConnectorError::UnknownEntity)
        }
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Implemented by every object a connector hands out and later accepts back.
pub trait Provenance {
    /// The session that created this object
    fn session(&self) -> SessionId;
}
