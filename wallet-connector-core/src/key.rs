use std::fmt;

/// A provider's handle over key material.
///
/// Handles own their secret (if any) and are responsible for erasing it when dropped.
/// Nothing on this trait hands out secret bytes.
pub trait KeyHandle: Send + Sync {
    /// Returns true if the handle holds private material
    fn has_secret(&self) -> bool;

    /// The network's encoding of the public key
    fn public_key(&self) -> Vec<u8>;
}

/// A keypair or a public-key-only key produced by a connector.
///
/// Keys come from [`Connector::create_key`](crate::Connector::create_key) (with secret) or
/// from [`Connector::recover`](crate::Connector::recover) (public only). They are never
/// mutated; dropping the key releases the underlying handle, which zeroes its secret.
///
/// The handle stays inside the connector, so callers only ever see the public part:
///
/// ```compile_fail
/// use wallet_connector_core::{Key, KeyHandle};
///
/// fn leak<H: KeyHandle>(key: &Key<H>) -> &H {
///     key.handle()
/// }
/// ```
pub struct Key<H> {
    handle: H,
}

impl<H: KeyHandle> Key<H> {
    pub(crate) fn new(handle: H) -> Self {
        Self { handle }
    }

    /// Returns true if the key can be used for signing
    pub fn has_secret(&self) -> bool {
        self.handle.has_secret()
    }

    /// The network's encoding of the public key
    pub fn public_key(&self) -> Vec<u8> {
        self.handle.public_key()
    }

    pub(crate) fn handle(&self) -> &H {
        &self.handle
    }
}

// do not log the secret
impl<H: KeyHandle> fmt::Debug for Key<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("has_secret", &self.has_secret())
            .field("public_key", &hex::encode(self.public_key()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Handle(bool);

    impl KeyHandle for Handle {
        fn has_secret(&self) -> bool {
            self.0
        }

        fn public_key(&self) -> Vec<u8> {
            vec![0x02, 0xab]
        }
    }

    #[test]
    fn debug_shows_only_public_part() {
        let key = Key::new(Handle(true));
        assert_eq!(format!("{key:?}"), "Key { has_secret: true, public_key: \"02ab\" }");
        assert!(!Key::new(Handle(false)).has_secret());
    }
}
