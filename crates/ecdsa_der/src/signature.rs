// Copyright (C) Microsoft Corporation. All rights reserved.

//! Conversion between raw (R‖S) and DER-encoded ECDSA signatures.

use crate::SignatureError;

/// ASN.1 structure for ECDSA signatures (RFC 3279 ECDSA-Sig-Value).
///
/// `BigUint` only admits minimally encoded, non-negative integers, which is
/// what DER requires for `r` and `s`.
#[derive(asn1::Asn1Read, asn1::Asn1Write)]
struct EcdsaSigValue<'a> {
    r: asn1::BigUint<'a>,
    s: asn1::BigUint<'a>,
}

/// Number of bytes a DER length field takes for `content_len` bytes of content.
const fn der_length_len(content_len: usize) -> usize {
    if content_len < 0x80 {
        return 1;
    }

    let mut len = content_len;
    let mut octets = 0;
    while len > 0 {
        len >>= 8;
        octets += 1;
    }
    1 + octets
}

/// Largest DER signature produced for scalars of `scalar_len` bytes.
///
/// Both integers are assumed to need the sign-padding byte, so each takes
/// `scalar_len + 1` content bytes plus its tag and length.
pub const fn max_der_signature_len(scalar_len: usize) -> usize {
    let integer = 1 + der_length_len(scalar_len + 1) + scalar_len + 1;
    let content = 2 * integer;
    1 + der_length_len(content) + content
}

/// Minimal DER INTEGER contents for a big-endian unsigned value.
fn der_integer_bytes(bytes: &[u8]) -> Vec<u8> {
    // Zero keeps a single 0x00 byte
    let start = bytes
        .iter()
        .position(|b| *b != 0)
        .unwrap_or(bytes.len() - 1);
    let stripped = &bytes[start..];

    if stripped[0] & 0x80 != 0 {
        let mut v = Vec::with_capacity(stripped.len() + 1);
        v.push(0);
        v.extend_from_slice(stripped);
        v
    } else {
        stripped.to_vec()
    }
}

/// Magnitude of a DER INTEGER, without its sign-padding byte.
fn integer_magnitude(bytes: &[u8]) -> &[u8] {
    match bytes {
        [0, rest @ ..] if !rest.is_empty() => rest,
        _ => bytes,
    }
}

fn encode_to_vec(r: &[u8], s: &[u8]) -> Result<Vec<u8>, SignatureError> {
    if r.is_empty() || r.len() != s.len() {
        tracing::error!(
            r_len = r.len(),
            s_len = s.len(),
            "encode: signature scalars must be non-empty and of equal width"
        );
        Err(SignatureError::InvalidScalarLength)?;
    }

    let r = der_integer_bytes(r);
    let s = der_integer_bytes(s);

    let sig = EcdsaSigValue {
        r: asn1::BigUint::new(&r).ok_or(SignatureError::Asn1EncodeError)?,
        s: asn1::BigUint::new(&s).ok_or(SignatureError::Asn1EncodeError)?,
    };

    asn1::write_single(&sig).map_err(|_| SignatureError::Asn1EncodeError)
}

fn copy_out(der: &[u8], out: &mut [u8]) -> Result<usize, SignatureError> {
    if der.len() > out.len() {
        tracing::error!(
            needed = der.len(),
            available = out.len(),
            "DER signature does not fit the output buffer"
        );
        Err(SignatureError::EncodingTooLarge {
            needed: der.len(),
            available: out.len(),
        })?;
    }

    out[..der.len()].copy_from_slice(der);
    Ok(der.len())
}

fn check_width(magnitude: &[u8], max: usize) -> Result<(), SignatureError> {
    if magnitude.len() > max {
        tracing::error!(
            len = magnitude.len(),
            max,
            "decode: signature integer wider than the curve scalar"
        );
        Err(SignatureError::LengthMismatch {
            len: magnitude.len(),
            max,
        })?;
    }
    Ok(())
}

fn write_padded(magnitude: &[u8], out: &mut [u8]) {
    let pad = out.len() - magnitude.len();
    out[..pad].fill(0);
    out[pad..].copy_from_slice(magnitude);
}

/// Encodes two fixed-width scalars as a DER ECDSA signature.
///
/// # Arguments
///
/// * `r` - Big-endian `r`, zero-padded to the scalar width
/// * `s` - Big-endian `s`, same width as `r`
/// * `der` - Output buffer; its length bounds the encoding
///
/// # Returns
///
/// Number of bytes written to `der`.
///
/// # Errors
///
/// * `SignatureError::InvalidScalarLength` - `r` is empty or `r` and `s` differ in width
/// * `SignatureError::EncodingTooLarge` - `der` is too small; nothing is written
pub fn encode(r: &[u8], s: &[u8], der: &mut [u8]) -> Result<usize, SignatureError> {
    let encoded = encode_to_vec(r, s)?;
    copy_out(&encoded, der)
}

/// Decodes a DER ECDSA signature into two fixed-width scalars.
///
/// Each integer is written right-justified and zero-padded to the full
/// length of its output buffer. The buffers are left untouched on error.
///
/// # Arguments
///
/// * `der` - DER-encoded signature
/// * `r` - Output for `r`
/// * `s` - Output for `s`
///
/// # Errors
///
/// * `SignatureError::MalformedSignature` - Bad tag, bad length, truncated input or non-DER integer
/// * `SignatureError::TrailingData` - Extra bytes inside or after the sequence
/// * `SignatureError::LengthMismatch` - An integer does not fit its output buffer
pub fn decode(der: &[u8], r: &mut [u8], s: &mut [u8]) -> Result<(), SignatureError> {
    let sig = asn1::parse_single::<EcdsaSigValue<'_>>(der).map_err(|parse_error| {
        tracing::error!(?parse_error, "decode: invalid DER signature");
        SignatureError::from(parse_error)
    })?;

    let r_mag = integer_magnitude(sig.r.as_bytes());
    let s_mag = integer_magnitude(sig.s.as_bytes());
    check_width(r_mag, r.len())?;
    check_width(s_mag, s.len())?;

    write_padded(r_mag, r);
    write_padded(s_mag, s);
    Ok(())
}

/// Encodes a raw R‖S signature as DER.
///
/// # Errors
///
/// * `SignatureError::InvalidScalarLength` - `raw` is empty or of odd length
/// * `SignatureError::EncodingTooLarge` - `der` is too small
pub fn raw_to_der(raw: &[u8], der: &mut [u8]) -> Result<usize, SignatureError> {
    if raw.is_empty() || raw.len() % 2 != 0 {
        tracing::error!(len = raw.len(), "raw_to_der: raw signature length must be even");
        Err(SignatureError::InvalidScalarLength)?;
    }

    let (r, s) = raw.split_at(raw.len() / 2);
    encode(r, s, der)
}

/// Decodes a DER signature into a raw R‖S buffer.
///
/// The scalar width is half of `raw.len()`.
///
/// # Errors
///
/// Same as [`decode`], plus `SignatureError::InvalidScalarLength` when `raw`
/// is empty or of odd length.
pub fn der_to_raw(der: &[u8], raw: &mut [u8]) -> Result<(), SignatureError> {
    if raw.is_empty() || raw.len() % 2 != 0 {
        tracing::error!(len = raw.len(), "der_to_raw: raw signature length must be even");
        Err(SignatureError::InvalidScalarLength)?;
    }

    let half = raw.len() / 2;
    let (r, s) = raw.split_at_mut(half);
    decode(der, r, s)
}

/// An ECDSA signature held as two fixed-width scalars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerEcdsaSignature {
    r: Vec<u8>,
    s: Vec<u8>,
}

impl DerEcdsaSignature {
    /// Creates a signature from its scalars.
    ///
    /// # Errors
    ///
    /// Returns `SignatureError::InvalidScalarLength` if the scalars are empty
    /// or differ in width.
    pub fn new(r: &[u8], s: &[u8]) -> Result<Self, SignatureError> {
        if r.is_empty() || r.len() != s.len() {
            Err(SignatureError::InvalidScalarLength)?;
        }

        Ok(Self {
            r: r.to_vec(),
            s: s.to_vec(),
        })
    }

    /// Creates a signature from its raw R‖S form.
    ///
    /// # Errors
    ///
    /// Returns `SignatureError::InvalidScalarLength` if `raw` is empty or of
    /// odd length.
    pub fn from_raw(raw: &[u8]) -> Result<Self, SignatureError> {
        if raw.is_empty() || raw.len() % 2 != 0 {
            Err(SignatureError::InvalidScalarLength)?;
        }

        let (r, s) = raw.split_at(raw.len() / 2);
        Self::new(r, s)
    }

    /// Decodes a DER signature with scalars of `scalar_len` bytes.
    ///
    /// # Errors
    ///
    /// See [`decode`].
    pub fn from_der(bytes: &[u8], scalar_len: usize) -> Result<Self, SignatureError> {
        let mut r = vec![0u8; scalar_len];
        let mut s = vec![0u8; scalar_len];
        decode(bytes, &mut r, &mut s)?;
        Ok(Self { r, s })
    }

    /// Encodes the signature to DER.
    ///
    /// # Arguments
    ///
    /// * `bytes` - Optional output buffer. If `None`, only calculates the required size.
    ///
    /// # Returns
    ///
    /// Returns the number of bytes written (or required if `bytes` is `None`).
    ///
    /// # Errors
    ///
    /// * `SignatureError::EncodingTooLarge` - Output buffer is too small
    pub fn to_der(&self, bytes: Option<&mut [u8]>) -> Result<usize, SignatureError> {
        let der = encode_to_vec(&self.r, &self.s)?;
        match bytes {
            Some(bytes) => copy_out(&der, bytes),
            None => Ok(der.len()),
        }
    }

    /// Encodes the signature to a newly allocated DER buffer.
    pub fn to_der_vec(&self) -> Result<Vec<u8>, SignatureError> {
        encode_to_vec(&self.r, &self.s)
    }

    /// Returns the raw R‖S form.
    pub fn to_raw(&self) -> Vec<u8> {
        let mut raw = Vec::with_capacity(self.r.len() + self.s.len());
        raw.extend_from_slice(&self.r);
        raw.extend_from_slice(&self.s);
        raw
    }

    /// Returns `r`, zero-padded to the scalar width.
    pub fn r(&self) -> &[u8] {
        &self.r
    }

    /// Returns `s`, zero-padded to the scalar width.
    pub fn s(&self) -> &[u8] {
        &self.s
    }

    /// Returns the scalar width in bytes.
    pub fn scalar_len(&self) -> usize {
        self.r.len()
    }
}
