// Copyright (C) Microsoft Corporation. All rights reserved.

use std::fmt;

use crate::MdType;
use crate::PkError;
use crate::PkOps;
use crate::PkType;

/// Host key context.
///
/// Owns one key and dispatches host calls to it. The key is released when
/// the context is dropped.
///
/// A context may move between threads but is used by one caller at a time.
/// Callers that share one across threads serialize sign and verify themselves.
pub struct PkContext {
    ops: Box<dyn PkOps>,
}

impl PkContext {
    /// Creates a context owning `ops`.
    pub fn new(ops: Box<dyn PkOps>) -> Self {
        Self { ops }
    }

    /// Key type reported to the host.
    pub fn pk_type(&self) -> PkType {
        self.ops.pk_type()
    }

    /// Registered key type name.
    pub fn name(&self) -> &'static str {
        self.ops.name()
    }

    /// Key size in bits.
    pub fn bit_len(&self) -> usize {
        self.ops.bit_len()
    }

    /// Largest signature [`PkContext::sign`] can produce.
    pub fn signature_len(&self) -> usize {
        self.ops.signature_len()
    }

    /// Check whether the key can be used as `pk_type`.
    pub fn can_do(&self, pk_type: PkType) -> bool {
        self.ops.can_do(pk_type)
    }

    /// Signs `digest` into `sig` and returns the signature length.
    pub fn sign(&self, md: MdType, digest: &[u8], sig: &mut [u8]) -> Result<usize, PkError> {
        self.ops.sign(md, digest, sig)
    }

    /// Signs `digest` into a newly allocated buffer.
    pub fn sign_vec(&self, md: MdType, digest: &[u8]) -> Result<Vec<u8>, PkError> {
        let mut sig = vec![0u8; self.ops.signature_len()];
        let len = self.ops.sign(md, digest, &mut sig)?;
        sig.truncate(len);
        Ok(sig)
    }

    /// Verifies the DER signature `sig` over `digest`.
    pub fn verify(&self, md: MdType, digest: &[u8], sig: &[u8]) -> Result<(), PkError> {
        self.ops.verify(md, digest, sig)
    }

    /// Whether the key has not been released yet.
    pub fn is_ready(&self) -> bool {
        self.ops.is_ready()
    }

    /// Releases the key ahead of drop. Calling it again has no effect.
    pub fn release(&mut self) {
        self.ops.release()
    }
}

impl fmt::Debug for PkContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PkContext")
            .field("name", &self.ops.name())
            .field("ready", &self.ops.is_ready())
            .finish()
    }
}

impl Drop for PkContext {
    fn drop(&mut self) {
        self.ops.release();
    }
}
