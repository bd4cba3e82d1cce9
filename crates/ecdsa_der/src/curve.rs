// Copyright (C) Microsoft Corporation. All rights reserved.

//! Curves whose signatures this crate sizes.

use crate::max_der_signature_len;

/// Elliptic curves supported by the secure element.
///
/// Only P-256 is produced by the hardware. A curve with a different scalar
/// width needs its own variant; sizes are never inferred from input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcCurve {
    /// NIST P-256 (secp256r1)
    P256,
}

impl EcCurve {
    /// Width in bytes of one signature scalar.
    pub const fn scalar_len(&self) -> usize {
        match self {
            EcCurve::P256 => 32,
        }
    }

    /// Curve size in bits.
    pub const fn bit_len(&self) -> usize {
        match self {
            EcCurve::P256 => 256,
        }
    }

    /// Length of a raw R‖S signature.
    pub const fn raw_signature_len(&self) -> usize {
        2 * self.scalar_len()
    }

    /// Largest possible DER signature on this curve.
    pub const fn max_der_signature_len(&self) -> usize {
        max_der_signature_len(self.scalar_len())
    }
}
