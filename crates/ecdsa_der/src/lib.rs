// Copyright (C) Microsoft Corporation. All rights reserved.

//! ECDSA signature DER encoding and decoding.
//!
//! Secure elements and raw ECDSA primitives exchange signatures as two
//! fixed-width big-endian scalars concatenated (R‖S). TLS and X.509 carry the
//! same signature as the ASN.1 structure
//!
//! ```text
//! ECDSA-Sig-Value ::= SEQUENCE {
//!     r  INTEGER,
//!     s  INTEGER
//! }
//! ```
//!
//! encoded with DER. This crate converts between the two forms.
//!
//! # Strictness
//!
//! Decoding accepts DER only: minimal lengths, minimal non-negative
//! integers, exactly two elements and nothing after the sequence. Output
//! buffers are written only once the whole signature has been parsed and
//! checked.

mod curve;
mod signature;

pub use curve::EcCurve;
pub use signature::*;
use thiserror::Error;

/// Errors returned by signature encoding and decoding.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureError {
    /// Input is not a DER `SEQUENCE { INTEGER, INTEGER }`.
    #[error("malformed DER signature")]
    MalformedSignature,
    /// Bytes remain after the signature's last element.
    #[error("trailing data after DER signature")]
    TrailingData,
    /// An integer is wider than the output it has to fit in.
    #[error("signature integer is {len} bytes, output holds {max}")]
    LengthMismatch {
        /// Magnitude length of the integer
        len: usize,
        /// Output width requested by the caller
        max: usize,
    },
    /// Output buffer is too small for the DER encoding.
    #[error("DER signature needs {needed} bytes, buffer holds {available}")]
    EncodingTooLarge {
        /// Length of the DER encoding
        needed: usize,
        /// Length of the caller's buffer
        available: usize,
    },
    /// Raw scalars are empty, of odd total length or of different widths.
    #[error("invalid signature scalar length")]
    InvalidScalarLength,
    /// Failed to encode ASN.1 DER structure.
    #[error("DER ASN.1 encode error")]
    Asn1EncodeError,
}

impl From<asn1::ParseError> for SignatureError {
    fn from(err: asn1::ParseError) -> Self {
        match err.kind() {
            asn1::ParseErrorKind::ExtraData => SignatureError::TrailingData,
            _ => SignatureError::MalformedSignature,
        }
    }
}

#[cfg(test)]
mod tests;
