// Copyright (C) Microsoft Corporation. All rights reserved.

//! Device Driver Interface (DDI) interface library
//!
//! Contract between key consumers and a secure element that keeps private
//! keys on-chip. The element exposes a key store that resolves slot
//! identifiers to key handles, and each key handle exposes exactly two
//! commands: sign a digest and verify a raw signature over a digest.
//!
//! Signatures crossing this interface are always in raw R‖S form: two
//! big-endian scalars of the curve's width, concatenated.

mod error;

pub use error::DdiStatus;

/// DDI Result
pub type DdiResult<T> = Result<T, DdiStatus>;

/// Key slot identifier
pub type KeyId = u16;

/// Secure element key store
///
/// Implementations are shared process-wide and treated as read-mostly by
/// consumers: the only operation is a lookup. Any exclusion the underlying
/// device needs across concurrent callers belongs to the implementation.
pub trait KeyStore: Send + Sync {
    /// Key handle type produced by this store
    type Key: KeyHandle;

    /// Resolve a key slot to a key handle
    ///
    /// # Arguments
    /// * `id` - Key slot identifier
    ///
    /// # Returns
    /// * `Self::Key` - Handle to the on-chip key
    ///
    /// # Error
    /// * `DdiStatus` - Status reported by the store, `DdiStatus::KeyNotFound`
    ///   when the slot holds no usable key
    fn key_by_id(&self, id: KeyId) -> DdiResult<Self::Key>;
}

/// Handle to a key held by the secure element
///
/// The handle is the in-process representation only; dropping it frees
/// whatever the process holds for the key and never touches the key material.
/// Both commands block until the device answers.
pub trait KeyHandle: Send {
    /// Key slot this handle refers to
    fn id(&self) -> KeyId;

    /// Sign a digest
    ///
    /// # Arguments
    /// * `digest` - Digest to sign
    /// * `signature` - Output buffer for the raw R‖S signature
    ///
    /// # Returns
    /// * `usize` - Number of bytes written to `signature`
    ///
    /// # Error
    /// * `DdiStatus` - Status reported by the device
    fn sign(&self, digest: &[u8], signature: &mut [u8]) -> DdiResult<usize>;

    /// Verify a raw R‖S signature over a digest
    ///
    /// # Arguments
    /// * `signature` - Raw R‖S signature
    /// * `digest` - Digest the signature was computed over
    ///
    /// # Error
    /// * `DdiStatus::VerifyFailed` - Signature does not match
    /// * `DdiStatus` - Any other status reported by the device
    fn verify(&self, signature: &[u8], digest: &[u8]) -> DdiResult<()>;
}
