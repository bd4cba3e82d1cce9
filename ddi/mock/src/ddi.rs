// Copyright (C) Microsoft Corporation. All rights reserved.

//! DDI Implementation - Mock Secure Element - Key Store Module

use std::collections::HashMap;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use openssl::ec::EcGroup;
use openssl::ec::EcKey;
use openssl::nid::Nid;
use openssl::pkey::Private;
use parking_lot::Mutex;
use parking_lot::RwLock;
use seckey_ddi_interface::DdiResult;
use seckey_ddi_interface::DdiStatus;
use seckey_ddi_interface::KeyId;
use seckey_ddi_interface::KeyStore;

use crate::dev::MockKey;

/// Slots provisioned by [`MockKeyStore::with_default_slots`]
pub const DEFAULT_KEY_SLOTS: [KeyId; 3] = [0, 1, 2];

/// Per-slot command counters and fault injection
#[derive(Debug, Default)]
pub struct MockKeyStats {
    sign_calls: AtomicUsize,
    verify_calls: AtomicUsize,
    live_handles: AtomicUsize,
    sign_fault: Mutex<Option<DdiStatus>>,
    verify_fault: Mutex<Option<DdiStatus>>,
}

impl MockKeyStats {
    /// Number of sign commands issued against the slot
    pub fn sign_calls(&self) -> usize {
        self.sign_calls.load(Ordering::Relaxed)
    }

    /// Number of verify commands issued against the slot
    pub fn verify_calls(&self) -> usize {
        self.verify_calls.load(Ordering::Relaxed)
    }

    /// Number of handles to the slot currently alive
    pub fn live_handles(&self) -> usize {
        self.live_handles.load(Ordering::Relaxed)
    }

    /// Make every following sign command fail with `status`, or clear the fault
    pub fn set_sign_fault(&self, status: Option<DdiStatus>) {
        *self.sign_fault.lock() = status;
    }

    /// Make every following verify command fail with `status`, or clear the fault
    pub fn set_verify_fault(&self, status: Option<DdiStatus>) {
        *self.verify_fault.lock() = status;
    }

    pub(crate) fn record_sign(&self) -> DdiResult<()> {
        self.sign_calls.fetch_add(1, Ordering::Relaxed);
        match *self.sign_fault.lock() {
            Some(status) => Err(status),
            None => Ok(()),
        }
    }

    pub(crate) fn record_verify(&self) -> DdiResult<()> {
        self.verify_calls.fetch_add(1, Ordering::Relaxed);
        match *self.verify_fault.lock() {
            Some(status) => Err(status),
            None => Ok(()),
        }
    }

    pub(crate) fn handle_opened(&self) {
        self.live_handles.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn handle_closed(&self) {
        self.live_handles.fetch_sub(1, Ordering::Relaxed);
    }
}

/// Key material and statistics for one provisioned slot
#[derive(Debug)]
pub(crate) struct MockSlot {
    pub(crate) key: EcKey<Private>,
    pub(crate) stats: Arc<MockKeyStats>,
}

#[derive(Debug, Default)]
struct MockKeyStoreInner {
    slots: HashMap<KeyId, Arc<MockSlot>>,
    not_ready: bool,
}

/// DDI Implementation - Mock Secure Element Key Store
///
/// Cloning the store yields another reference to the same slots.
#[derive(Debug, Clone, Default)]
pub struct MockKeyStore(Arc<RwLock<MockKeyStoreInner>>);

impl MockKeyStore {
    /// Create a store with no provisioned slots
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with a fresh key in each of `slots`
    ///
    /// # Error
    /// * `DdiStatus::ExecutionError` - Key generation failed
    pub fn with_slots(slots: &[KeyId]) -> DdiResult<Self> {
        let store = Self::new();
        for id in slots {
            store.provision(*id)?;
        }
        Ok(store)
    }

    /// Create a store with a fresh key in each of [`DEFAULT_KEY_SLOTS`]
    pub fn with_default_slots() -> DdiResult<Self> {
        Self::with_slots(&DEFAULT_KEY_SLOTS)
    }

    /// Generate a new P-256 key into `id`, replacing any key already there
    ///
    /// Handles opened on the previous key keep using it.
    ///
    /// # Error
    /// * `DdiStatus::ExecutionError` - Key generation failed
    pub fn provision(&self, id: KeyId) -> DdiResult<()> {
        let group = EcGroup::from_curve_name(Nid::X9_62_PRIME256V1).map_err(|openssl_error_stack| {
            tracing::error!(?openssl_error_stack);
            DdiStatus::ExecutionError
        })?;
        let key = EcKey::generate(&group).map_err(|openssl_error_stack| {
            tracing::error!(?openssl_error_stack);
            DdiStatus::ExecutionError
        })?;

        let slot = MockSlot {
            key,
            stats: Arc::new(MockKeyStats::default()),
        };
        self.0.write().slots.insert(id, Arc::new(slot));

        tracing::debug!(key_id = id, "Provisioned mock key slot");
        Ok(())
    }

    /// Erase the key in `id`
    pub fn erase(&self, id: KeyId) {
        if self.0.write().slots.remove(&id).is_some() {
            tracing::debug!(key_id = id, "Erased mock key slot");
        }
    }

    /// Simulate the device dropping off the bus (`true`) or coming back
    pub fn set_not_ready(&self, not_ready: bool) {
        self.0.write().not_ready = not_ready;
    }

    /// Statistics of the key currently in `id`
    pub fn stats(&self, id: KeyId) -> Option<Arc<MockKeyStats>> {
        self.0.read().slots.get(&id).map(|slot| slot.stats.clone())
    }

    /// DER SubjectPublicKeyInfo of the key in `id`
    ///
    /// # Error
    /// * `DdiStatus::KeyNotFound` - Slot is empty
    /// * `DdiStatus::ExecutionError` - Encoding failed
    pub fn public_key_der(&self, id: KeyId) -> DdiResult<Vec<u8>> {
        let inner = self.0.read();
        let slot = inner.slots.get(&id).ok_or(DdiStatus::KeyNotFound)?;
        slot.key.public_key_to_der().map_err(|openssl_error_stack| {
            tracing::error!(?openssl_error_stack);
            DdiStatus::ExecutionError
        })
    }
}

impl KeyStore for MockKeyStore {
    type Key = MockKey;

    fn key_by_id(&self, id: KeyId) -> DdiResult<Self::Key> {
        let inner = self.0.read();
        if inner.not_ready {
            tracing::warn!(key_id = id, "Mock secure element not ready");
            Err(DdiStatus::DeviceNotReady)?;
        }

        let slot = inner.slots.get(&id).ok_or_else(|| {
            tracing::debug!(key_id = id, "No key in mock slot");
            DdiStatus::KeyNotFound
        })?;

        Ok(MockKey::open(id, slot.clone()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use test_log::test;

    use super::*;

    #[test]
    fn test_key_by_id_empty_slot() {
        let store = MockKeyStore::with_slots(&[3]).unwrap();

        let result = store.key_by_id(4);
        assert!(matches!(result, Err(DdiStatus::KeyNotFound)));
    }

    #[test]
    fn test_key_by_id_not_ready() {
        let store = MockKeyStore::with_slots(&[3]).unwrap();
        store.set_not_ready(true);

        let result = store.key_by_id(3);
        assert!(matches!(result, Err(DdiStatus::DeviceNotReady)));

        store.set_not_ready(false);
        assert!(store.key_by_id(3).is_ok());
    }

    #[test]
    fn test_live_handle_count() {
        let store = MockKeyStore::with_default_slots().unwrap();
        let stats = store.stats(DEFAULT_KEY_SLOTS[0]).unwrap();
        assert_eq!(stats.live_handles(), 0);

        let first = store.key_by_id(DEFAULT_KEY_SLOTS[0]).unwrap();
        let second = store.key_by_id(DEFAULT_KEY_SLOTS[0]).unwrap();
        assert_eq!(stats.live_handles(), 2);

        drop(first);
        assert_eq!(stats.live_handles(), 1);
        drop(second);
        assert_eq!(stats.live_handles(), 0);
    }

    #[test]
    fn test_erase_slot() {
        let store = MockKeyStore::with_slots(&[7]).unwrap();
        assert!(store.public_key_der(7).is_ok());

        store.erase(7);
        assert!(matches!(store.key_by_id(7), Err(DdiStatus::KeyNotFound)));
        assert!(matches!(store.public_key_der(7), Err(DdiStatus::KeyNotFound)));
    }
}
