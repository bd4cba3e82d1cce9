// Copyright (C) Microsoft Corporation. All rights reserved.

use crate::MdType;
use crate::PkError;
use crate::PkType;

/// Operations a key exposes to the host.
///
/// The host dispatches through this trait without knowing how the key is
/// stored. A key that lacks an operation reports it through [`PkOps::can_do`]
/// and fails the call.
pub trait PkOps: Send {
    /// Key type reported to the host
    fn pk_type(&self) -> PkType;

    /// Name the key type is registered under
    fn name(&self) -> &'static str;

    /// Key size in bits
    fn bit_len(&self) -> usize;

    /// Largest signature [`PkOps::sign`] can produce
    fn signature_len(&self) -> usize;

    /// Check whether the key can be used as `pk_type`
    fn can_do(&self, pk_type: PkType) -> bool;

    /// Sign a digest
    ///
    /// # Arguments
    /// * `md` - Algorithm the digest was computed with
    /// * `digest` - Digest to sign
    /// * `sig` - Output buffer for the DER signature
    ///
    /// # Returns
    /// * `usize` - Number of bytes written to `sig`
    ///
    /// # Error
    /// * `PkError` - Signing failed
    fn sign(&self, md: MdType, digest: &[u8], sig: &mut [u8]) -> Result<usize, PkError>;

    /// Verify a DER signature over a digest
    ///
    /// # Arguments
    /// * `md` - Algorithm the digest was computed with
    /// * `digest` - Digest that was signed
    /// * `sig` - DER signature
    ///
    /// # Error
    /// * `PkError` - Signature is invalid or verification failed
    fn verify(&self, md: MdType, digest: &[u8], sig: &[u8]) -> Result<(), PkError>;

    /// Check whether the key still holds its handle
    fn is_ready(&self) -> bool;

    /// Release the key's resources. Calling it again has no effect.
    fn release(&mut self);
}
