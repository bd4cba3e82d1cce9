// Copyright (C) Microsoft Corporation. All rights reserved.

use seckey_ddi_interface::DdiStatus;
use seckey_ddi_interface::KeyHandle;
use seckey_ddi_interface::KeyId;
use seckey_ecdsa_der::EcCurve;

use crate::MdType;
use crate::PkError;
use crate::PkOps;
use crate::PkType;

/// Name the secure element key type is registered under
pub const OPAQUE_EC_KEY_NAME: &str = "SE-ECDSA";

/// Digest algorithm the secure element signs
const SUPPORTED_MD: MdType = MdType::Sha256;

/// ECDSA private key held by a secure element.
///
/// Signs and verifies through the element's key handle and converts between
/// the element's raw R‖S signatures and DER.
pub struct OpaqueEcKey<K: KeyHandle> {
    key_id: KeyId,
    handle: Option<K>,
    curve: EcCurve,
}

impl<K: KeyHandle> OpaqueEcKey<K> {
    /// Wraps a P-256 key handle.
    pub fn new(handle: K) -> Self {
        Self {
            key_id: handle.id(),
            handle: Some(handle),
            curve: EcCurve::P256,
        }
    }

    /// Key slot the key was opened from.
    pub fn key_id(&self) -> KeyId {
        self.key_id
    }

    fn handle(&self) -> Result<&K, PkError> {
        self.handle.as_ref().ok_or_else(|| {
            tracing::error!(key_id = self.key_id, "OpaqueEcKey: key has been released");
            PkError::InvalidState
        })
    }

    fn check_md(&self, md: MdType) -> Result<(), PkError> {
        if md != SUPPORTED_MD {
            tracing::error!(key_id = self.key_id, ?md, "OpaqueEcKey: unsupported digest");
            Err(PkError::UnsupportedAlgorithm(md))?;
        }
        Ok(())
    }

    fn check_digest(&self, digest: &[u8]) -> Result<(), PkError> {
        let expected = SUPPORTED_MD.digest_len();
        if digest.len() != expected {
            tracing::error!(
                key_id = self.key_id,
                len = digest.len(),
                expected,
                "OpaqueEcKey: invalid digest length"
            );
            Err(PkError::InvalidDigestLength {
                expected,
                actual: digest.len(),
            })?;
        }
        Ok(())
    }
}

impl<K: KeyHandle> PkOps for OpaqueEcKey<K> {
    fn pk_type(&self) -> PkType {
        PkType::Opaque
    }

    fn name(&self) -> &'static str {
        OPAQUE_EC_KEY_NAME
    }

    fn bit_len(&self) -> usize {
        self.curve.bit_len()
    }

    fn signature_len(&self) -> usize {
        self.curve.max_der_signature_len()
    }

    fn can_do(&self, pk_type: PkType) -> bool {
        pk_type == PkType::Ecdsa
    }

    fn sign(&self, md: MdType, digest: &[u8], sig: &mut [u8]) -> Result<usize, PkError> {
        let handle = self.handle()?;
        self.check_md(md)?;
        self.check_digest(digest)?;

        let mut raw = vec![0u8; self.curve.raw_signature_len()];
        let raw_len = handle.sign(digest, &mut raw).map_err(|status| {
            tracing::error!(key_id = self.key_id, ?status, "OpaqueEcKey::sign: hardware sign failed");
            PkError::HardwareSignFailed(status)
        })?;

        if raw_len != raw.len() {
            tracing::error!(
                key_id = self.key_id,
                raw_len,
                expected = raw.len(),
                "OpaqueEcKey::sign: unexpected raw signature size"
            );
            Err(PkError::UnsupportedSignatureSize(raw_len))?;
        }

        let (r, s) = raw.split_at(self.curve.scalar_len());
        let len = seckey_ecdsa_der::encode(r, s, sig)?;

        tracing::debug!(key_id = self.key_id, len, "OpaqueEcKey::sign: signed digest");
        Ok(len)
    }

    fn verify(&self, md: MdType, digest: &[u8], sig: &[u8]) -> Result<(), PkError> {
        let handle = self.handle()?;
        self.check_md(md)?;
        self.check_digest(digest)?;

        let mut raw = vec![0u8; self.curve.raw_signature_len()];
        let (r, s) = raw.split_at_mut(self.curve.scalar_len());
        seckey_ecdsa_der::decode(sig, r, s)?;

        handle.verify(&raw, digest).map_err(|status| {
            if status == DdiStatus::VerifyFailed {
                tracing::warn!(key_id = self.key_id, "OpaqueEcKey::verify: signature mismatch");
            } else {
                tracing::error!(key_id = self.key_id, ?status, "OpaqueEcKey::verify: hardware verify failed");
            }
            PkError::HardwareVerifyFailed(status)
        })
    }

    fn is_ready(&self) -> bool {
        self.handle.is_some()
    }

    fn release(&mut self) {
        match self.handle.take() {
            Some(handle) => {
                tracing::debug!(key_id = self.key_id, "OpaqueEcKey: releasing key handle");
                drop(handle);
            }
            None => tracing::debug!(key_id = self.key_id, "OpaqueEcKey: already released"),
        }
    }
}
