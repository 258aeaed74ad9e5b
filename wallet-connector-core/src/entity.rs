//! Immutable byte containers scoped to the connector session that produced them.
use crate::session::{Provenance, SessionId};
use std::fmt;

/// A 32 byte hash of a message or typed data payload
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Digest {
    session: SessionId,
    data32: [u8; 32],
}

impl Digest {
    pub(crate) fn new(session: SessionId, data32: [u8; 32]) -> Self {
        Self { session, data32 }
    }

    pub fn data32(&self) -> &[u8; 32] {
        &self.data32
    }
}

/// Raw signature bytes in the network's encoding
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    session: SessionId,
    data: Vec<u8>,
}

impl Signature {
    pub(crate) fn new(session: SessionId, data: Vec<u8>) -> Self {
        Self { session, data }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// An opaque encoding of a signed or unsigned transaction.
///
/// The bytes are only interpreted by the network's capability provider, when the
/// serialization is turned into a [`Transaction`](crate::Transaction).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Serialization {
    session: SessionId,
    data: Vec<u8>,
}

impl Serialization {
    pub(crate) fn new(session: SessionId, data: Vec<u8>) -> Self {
        Self { session, data }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

macro_rules! impl_entity {
    ($($name:ident => $field:ident),*) => {
        $(
            impl Provenance for $name {
                fn session(&self) -> SessionId {
                    self.session
                }
            }

            impl AsRef<[u8]> for $name {
                fn as_ref(&self) -> &[u8] {
                    &self.$field[..]
                }
            }

            impl fmt::Debug for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.debug_struct(stringify!($name))
                        .field("session", &self.session)
                        .field(stringify!($field), &format_args!("0x{}", hex::encode(&self.$field)))
                        .finish()
                }
            }
        )*
    };
}

impl_entity!(Digest => data32, Signature => data, Serialization => data);
