// Copyright (C) Microsoft Corporation. All rights reserved.

use seckey_ddi_interface::KeyId;
use seckey_ddi_interface::KeyStore;

use crate::OpaqueEcKey;
use crate::PkContext;
use crate::PkError;

cfg_if::cfg_if! {
    if #[cfg(feature = "mock")] {
        /// Key store type backing [`setup_default`]
        pub type KeyStoreInstance = seckey_ddi_mock::MockKeyStore;

        fn create_key_store() -> Option<KeyStoreInstance> {
            KeyStoreInstance::with_default_slots()
                .map_err(|status| {
                    tracing::error!(?status, "Failed to create mock key store");
                    status
                })
                .ok()
        }
    } else {
        /// Key store type backing [`setup_default`]
        pub type KeyStoreInstance = NoBackend;

        fn create_key_store() -> Option<KeyStoreInstance> {
            tracing::debug!("No secure element backend registered");
            None
        }

        /// Placeholder for a build without a secure element backend.
        ///
        /// It has no values, so the process-wide store is always absent.
        #[derive(Debug)]
        pub enum NoBackend {}

        impl KeyStore for NoBackend {
            type Key = NoBackend;

            fn key_by_id(&self, _id: KeyId) -> seckey_ddi_interface::DdiResult<Self::Key> {
                match *self {}
            }
        }

        impl seckey_ddi_interface::KeyHandle for NoBackend {
            fn id(&self) -> KeyId {
                match *self {}
            }

            fn sign(&self, _digest: &[u8], _signature: &mut [u8]) -> seckey_ddi_interface::DdiResult<usize> {
                match *self {}
            }

            fn verify(&self, _signature: &[u8], _digest: &[u8]) -> seckey_ddi_interface::DdiResult<()> {
                match *self {}
            }
        }
    }
}

lazy_static::lazy_static! {
    static ref KEY_STORE: Option<KeyStoreInstance> = create_key_store();
}

/// Returns the process-wide key store, if a backend is registered.
pub fn key_store_instance() -> Option<&'static KeyStoreInstance> {
    KEY_STORE.as_ref()
}

/// Opens a secure element key and wraps it in a host key context.
///
/// # Arguments
/// * `store` - Key store to resolve the key in
/// * `key_id` - Key slot
///
/// # Returns
/// * `PkContext` - Context owning the key handle
///
/// # Error
/// * `PkError::StoreUnavailable` - `store` is `None`
/// * `PkError::KeyNotFound` - The store could not resolve `key_id`
pub fn setup<S>(store: Option<&S>, key_id: KeyId) -> Result<PkContext, PkError>
where
    S: KeyStore,
    S::Key: 'static,
{
    let store = store.ok_or_else(|| {
        tracing::error!(key_id, "setup: no key store");
        PkError::StoreUnavailable
    })?;

    let handle = store.key_by_id(key_id).map_err(|status| {
        tracing::error!(key_id, ?status, "setup: key lookup failed");
        PkError::KeyNotFound { key_id, status }
    })?;

    tracing::debug!(key_id, "setup: opened secure element key");
    Ok(PkContext::new(Box::new(OpaqueEcKey::new(handle))))
}

/// Opens a key from the process-wide key store.
///
/// See [`setup`]. Fails with `PkError::StoreUnavailable` when no backend is
/// registered.
pub fn setup_default(key_id: KeyId) -> Result<PkContext, PkError> {
    setup(key_store_instance(), key_id)
}
