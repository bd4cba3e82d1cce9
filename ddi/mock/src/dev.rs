// Copyright (C) Microsoft Corporation. All rights reserved.

//! DDI Implementation - Mock Secure Element - Key Handle Module

use std::sync::Arc;

use openssl::bn::BigNum;
use openssl::ecdsa::EcdsaSig;
use seckey_ddi_interface::DdiResult;
use seckey_ddi_interface::DdiStatus;
use seckey_ddi_interface::KeyHandle;
use seckey_ddi_interface::KeyId;

use crate::ddi::MockSlot;
use crate::DIGEST_LEN;
use crate::RAW_SIGNATURE_LEN;
use crate::SCALAR_LEN;

/// DDI Implementation - Mock Secure Element Key Handle
#[derive(Debug)]
pub struct MockKey {
    id: KeyId,
    slot: Arc<MockSlot>,
}

impl MockKey {
    pub(crate) fn open(id: KeyId, slot: Arc<MockSlot>) -> Self {
        tracing::debug!(key_id = id, "Opening MockKey");
        slot.stats.handle_opened();
        Self { id, slot }
    }
}

impl Drop for MockKey {
    fn drop(&mut self) {
        tracing::debug!(key_id = self.id, "Dropping MockKey");
        self.slot.stats.handle_closed();
    }
}

impl KeyHandle for MockKey {
    fn id(&self) -> KeyId {
        self.id
    }

    fn sign(&self, digest: &[u8], signature: &mut [u8]) -> DdiResult<usize> {
        self.slot.stats.record_sign()?;

        if digest.len() != DIGEST_LEN {
            tracing::error!(len = digest.len(), "MockKey::sign: invalid digest length");
            Err(DdiStatus::InvalidParameter)?;
        }

        if signature.len() < RAW_SIGNATURE_LEN {
            tracing::error!(len = signature.len(), "MockKey::sign: signature buffer too small");
            Err(DdiStatus::BufferTooSmall)?;
        }

        let sig = EcdsaSig::sign(digest, &self.slot.key).map_err(|openssl_error_stack| {
            tracing::error!(?openssl_error_stack);
            DdiStatus::SignFailed
        })?;

        let r = sig
            .r()
            .to_vec_padded(SCALAR_LEN as i32)
            .map_err(|openssl_error_stack| {
                tracing::error!(?openssl_error_stack);
                DdiStatus::SignFailed
            })?;
        let s = sig
            .s()
            .to_vec_padded(SCALAR_LEN as i32)
            .map_err(|openssl_error_stack| {
                tracing::error!(?openssl_error_stack);
                DdiStatus::SignFailed
            })?;

        signature[..SCALAR_LEN].copy_from_slice(&r);
        signature[SCALAR_LEN..RAW_SIGNATURE_LEN].copy_from_slice(&s);

        Ok(RAW_SIGNATURE_LEN)
    }

    fn verify(&self, signature: &[u8], digest: &[u8]) -> DdiResult<()> {
        self.slot.stats.record_verify()?;

        if digest.len() != DIGEST_LEN || signature.len() != RAW_SIGNATURE_LEN {
            tracing::error!(
                digest_len = digest.len(),
                signature_len = signature.len(),
                "MockKey::verify: invalid input length"
            );
            Err(DdiStatus::InvalidParameter)?;
        }

        let (r, s) = signature.split_at(SCALAR_LEN);
        let r = BigNum::from_slice(r).map_err(|openssl_error_stack| {
            tracing::error!(?openssl_error_stack);
            DdiStatus::ExecutionError
        })?;
        let s = BigNum::from_slice(s).map_err(|openssl_error_stack| {
            tracing::error!(?openssl_error_stack);
            DdiStatus::ExecutionError
        })?;
        let sig = EcdsaSig::from_private_components(r, s).map_err(|openssl_error_stack| {
            tracing::error!(?openssl_error_stack);
            DdiStatus::ExecutionError
        })?;

        // OpenSSL reports out-of-range scalars as an error rather than a mismatch
        let valid = sig.verify(digest, &self.slot.key).map_err(|openssl_error_stack| {
            tracing::debug!(?openssl_error_stack);
            DdiStatus::VerifyFailed
        })?;

        if !valid {
            Err(DdiStatus::VerifyFailed)?;
        }

        Ok(())
    }
}
