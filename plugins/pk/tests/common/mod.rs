// Copyright (C) Microsoft Corporation. All rights reserved.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use openssl::ec::EcKey;
use openssl::ecdsa::EcdsaSig;
use openssl::pkey::Public;
use seckey_ddi_interface::KeyId;
use seckey_ddi_mock::MockKeyStats;
use seckey_ddi_mock::MockKeyStore;
use seckey_pk::*;

/// Provisioned slot used by most tests
pub const TEST_KEY_ID: KeyId = 1;

/// Slot that is never provisioned
pub const MISSING_KEY_ID: KeyId = 0x7F;

/// SHA-256 sized all-zero digest
pub const ZERO_DIGEST: [u8; 32] = [0u8; 32];

pub fn common_store() -> MockKeyStore {
    MockKeyStore::with_default_slots().unwrap()
}

pub fn common_setup(store: &MockKeyStore) -> PkContext {
    let result = setup(Some(store), TEST_KEY_ID);
    assert!(result.is_ok(), "result {:?}", result);
    result.unwrap()
}

pub fn common_stats(store: &MockKeyStore) -> Arc<MockKeyStats> {
    store.stats(TEST_KEY_ID).unwrap()
}

pub fn common_public_key(store: &MockKeyStore) -> EcKey<Public> {
    let der = store.public_key_der(TEST_KEY_ID).unwrap();
    EcKey::public_key_from_der(&der).unwrap()
}

/// Verifies a DER signature with OpenSSL instead of the secure element
pub fn openssl_verify(public_key: &EcKey<Public>, digest: &[u8], der: &[u8]) -> bool {
    let sig = EcdsaSig::from_der(der).unwrap();
    sig.verify(digest, public_key).unwrap()
}
