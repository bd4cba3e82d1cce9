// Copyright (C) Microsoft Corporation. All rights reserved.

use seckey_ddi_interface::DdiStatus;
use seckey_ddi_interface::KeyId;
use seckey_ecdsa_der::SignatureError;
use thiserror::Error;

use crate::MdType;

/// Status codes understood by the host.
///
/// Composite codes are the sum of a module code and a low-level code, the
/// way the host reports nested ASN.1 failures.
pub mod host_code {
    /// Requested feature or algorithm is unavailable
    pub const PK_FEATURE_UNAVAILABLE: i32 = -0x3980;
    /// Bad input parameters to a key function
    pub const PK_BAD_INPUT_DATA: i32 = -0x3E80;
    /// Key could not be loaded
    pub const PK_KEY_INVALID_FORMAT: i32 = -0x3D00;
    /// Bad input parameters to an EC function
    pub const ECP_BAD_INPUT_DATA: i32 = -0x4F80;
    /// Output buffer too small
    pub const ECP_BUFFER_TOO_SMALL: i32 = -0x4F00;
    /// Signature did not verify
    pub const ECP_VERIFY_FAILED: i32 = -0x4E00;
    /// Signature is valid but followed by extra data, or has the wrong size
    pub const ECP_SIG_LEN_MISMATCH: i32 = -0x4C00;
    /// Hardware accelerator failed
    pub const ECP_HW_ACCEL_FAILED: i32 = -0x4B80;
    /// ASN.1 length does not match the data
    pub const ASN1_LENGTH_MISMATCH: i32 = -0x0066;
}

/// Opaque key error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PkError {
    /// Digest algorithm is not supported by the secure element.
    #[error("unsupported digest algorithm {0:?}")]
    UnsupportedAlgorithm(MdType),

    /// Digest length does not match the digest algorithm.
    #[error("digest is {actual} bytes, expected {expected}")]
    InvalidDigestLength {
        /// Expected digest length
        expected: usize,
        /// Length passed by the caller
        actual: usize,
    },

    /// No secure element key store is available.
    #[error("secure element key store unavailable")]
    StoreUnavailable,

    /// Key slot could not be resolved.
    #[error("key {key_id} not found: {status}")]
    KeyNotFound {
        /// Requested key slot
        key_id: KeyId,
        /// Status reported by the key store
        status: DdiStatus,
    },

    /// Secure element failed to sign.
    #[error("hardware sign failed: {0}")]
    HardwareSignFailed(DdiStatus),

    /// Secure element rejected the signature or failed to verify it.
    #[error("hardware verify failed: {0}")]
    HardwareVerifyFailed(DdiStatus),

    /// Secure element returned a raw signature of unexpected size.
    #[error("unsupported raw signature size {0}")]
    UnsupportedSignatureSize(usize),

    /// Signature encoding or decoding failed.
    #[error(transparent)]
    Signature(#[from] SignatureError),

    /// Key has been released.
    #[error("key has been released")]
    InvalidState,
}

impl PkError {
    /// Translates the error into the host's negative status code.
    pub fn host_code(&self) -> i32 {
        use self::host_code::*;

        match self {
            PkError::UnsupportedAlgorithm(_) => PK_FEATURE_UNAVAILABLE,
            PkError::InvalidDigestLength { .. } => ECP_BAD_INPUT_DATA,
            PkError::StoreUnavailable | PkError::InvalidState => PK_BAD_INPUT_DATA,
            PkError::KeyNotFound { .. } => PK_KEY_INVALID_FORMAT,
            PkError::HardwareSignFailed(_) => ECP_HW_ACCEL_FAILED,
            PkError::HardwareVerifyFailed(DdiStatus::VerifyFailed) => ECP_VERIFY_FAILED,
            PkError::HardwareVerifyFailed(_) => ECP_HW_ACCEL_FAILED,
            PkError::UnsupportedSignatureSize(_) => ECP_SIG_LEN_MISMATCH,
            PkError::Signature(err) => match err {
                SignatureError::MalformedSignature | SignatureError::Asn1EncodeError => {
                    ECP_BAD_INPUT_DATA
                }
                SignatureError::TrailingData | SignatureError::InvalidScalarLength => {
                    ECP_SIG_LEN_MISMATCH
                }
                SignatureError::LengthMismatch { .. } => ECP_BAD_INPUT_DATA + ASN1_LENGTH_MISMATCH,
                SignatureError::EncodingTooLarge { .. } => ECP_BUFFER_TOO_SMALL,
            },
        }
    }
}

impl From<&PkError> for i32 {
    fn from(err: &PkError) -> Self {
        err.host_code()
    }
}
