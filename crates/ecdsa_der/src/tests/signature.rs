// Copyright (C) Microsoft Corporation. All rights reserved.

use test_log::test;

use super::*;

const SCALAR_LEN: usize = 32;

/// Builds a scalar starting with `prefix` and filled with `fill`.
fn scalar(prefix: &[u8], fill: u8) -> [u8; SCALAR_LEN] {
    let mut out = [fill; SCALAR_LEN];
    out[..prefix.len()].copy_from_slice(prefix);
    out
}

/// Splits a short-form DER signature into its INTEGER contents.
fn integers(der: &[u8]) -> Vec<&[u8]> {
    assert_eq!(der[0], 0x30);
    assert_eq!(der[1] as usize, der.len() - 2);

    let mut out = Vec::new();
    let mut i = 2;
    while i < der.len() {
        assert_eq!(der[i], 0x02);
        let len = der[i + 1] as usize;
        out.push(&der[i + 2..i + 2 + len]);
        i += 2 + len;
    }
    out
}

/// r = 1, s = 0x8080..80 (needs a sign-padding byte)
fn padded_vector() -> ([u8; SCALAR_LEN], [u8; SCALAR_LEN], Vec<u8>) {
    let mut r = [0u8; SCALAR_LEN];
    r[SCALAR_LEN - 1] = 0x01;
    let s = [0x80u8; SCALAR_LEN];

    let mut der = vec![
        0x30, 0x26, // SEQUENCE, 38 bytes
        0x02, 0x01, 0x01, // INTEGER 1
        0x02, 0x21, 0x00, // INTEGER, 33 bytes, sign padding
    ];
    der.extend_from_slice(&s);

    (r, s, der)
}

#[test]
fn test_encode_known_vector() {
    let (r, s, expected) = padded_vector();

    let mut der = [0u8; 72];
    let len = encode(&r, &s, &mut der).unwrap();
    assert_eq!(&der[..len], expected.as_slice());
}

#[test]
fn test_encode_zero_scalars() {
    let r = [0u8; SCALAR_LEN];
    let mut s = [0u8; SCALAR_LEN];
    s[SCALAR_LEN - 1] = 0x7f;

    let mut der = [0u8; 72];
    let len = encode(&r, &s, &mut der).unwrap();
    assert_eq!(&der[..len], &[0x30, 0x06, 0x02, 0x01, 0x00, 0x02, 0x01, 0x7f]);
}

#[test]
fn test_encode_worst_case_length() {
    let r = [0xffu8; SCALAR_LEN];
    let s = [0xffu8; SCALAR_LEN];

    let mut der = [0u8; 80];
    let len = encode(&r, &s, &mut der).unwrap();
    assert_eq!(len, max_der_signature_len(SCALAR_LEN));
    assert_eq!(len, 72);
    assert_eq!(&der[..4], &[0x30, 0x46, 0x02, 0x21]);
}

#[test]
fn test_encode_worst_case_long_form_length() {
    // 66-byte scalars push the sequence past 127 bytes
    let r = [0xffu8; 66];
    let s = [0xffu8; 66];

    let mut der = [0u8; 160];
    let len = encode(&r, &s, &mut der).unwrap();
    assert_eq!(len, max_der_signature_len(66));
    assert_eq!(len, 141);
    assert_eq!(&der[..3], &[0x30, 0x81, 0x8a]);
}

#[test]
fn test_encode_buffer_too_small() {
    let r = [0xffu8; SCALAR_LEN];
    let s = [0xffu8; SCALAR_LEN];

    let mut der = [0xaau8; 71];
    let result = encode(&r, &s, &mut der);
    assert_eq!(
        result,
        Err(SignatureError::EncodingTooLarge {
            needed: 72,
            available: 71
        })
    );
    assert!(der.iter().all(|b| *b == 0xaa));
}

#[test]
fn test_encode_minimal_integers() {
    let cases = [
        scalar(&[0x00, 0x00, 0x01], 0x11),
        scalar(&[0x00, 0x7f], 0xff),
        scalar(&[0x00, 0x80], 0x00),
        scalar(&[0x7f], 0x00),
        scalar(&[0xc0], 0x01),
        scalar(&[], 0x00),
    ];

    for r in &cases {
        for s in &cases {
            let mut der = [0u8; 72];
            let len = encode(r, s, &mut der).unwrap();

            let ints = integers(&der[..len]);
            assert_eq!(ints.len(), 2);
            for int in ints {
                assert!(!int.is_empty());
                if int.len() > 1 && int[0] == 0x00 {
                    // a leading zero is only allowed as sign padding
                    assert_ne!(int[1] & 0x80, 0, "non-minimal integer {:02x?}", int);
                }
                assert_eq!(int[0] & 0x80, 0, "negative integer {:02x?}", int);
            }
        }
    }
}

#[test]
fn test_encode_invalid_scalar_lengths() {
    let mut der = [0u8; 72];
    assert_eq!(
        encode(&[0x01; 32], &[0x01; 31], &mut der),
        Err(SignatureError::InvalidScalarLength)
    );
    assert_eq!(
        encode(&[], &[], &mut der),
        Err(SignatureError::InvalidScalarLength)
    );
}

#[test]
fn test_decode_round_trip() {
    let cases = [
        (scalar(&[0x00, 0x00, 0x01], 0x11), scalar(&[0x80], 0x22)),
        (scalar(&[], 0xff), scalar(&[], 0x00)),
        (scalar(&[0x00, 0x80], 0x00), scalar(&[0x00, 0x00, 0x00, 0x7f], 0x33)),
    ];

    for (r, s) in cases {
        let mut der = [0u8; 72];
        let len = encode(&r, &s, &mut der).unwrap();

        let mut r_out = [0u8; SCALAR_LEN];
        let mut s_out = [0u8; SCALAR_LEN];
        decode(&der[..len], &mut r_out, &mut s_out).unwrap();
        assert_eq!(r_out, r);
        assert_eq!(s_out, s);
    }
}

#[test]
fn test_decode_padded_integer_fits() {
    let (r, s, der) = padded_vector();

    let mut r_out = [0xaau8; SCALAR_LEN];
    let mut s_out = [0xaau8; SCALAR_LEN];
    decode(&der, &mut r_out, &mut s_out).unwrap();
    assert_eq!(r_out, r);
    assert_eq!(s_out, s);
}

#[test]
fn test_decode_into_wider_output() {
    let (_, s, der) = padded_vector();

    let mut r_out = [0xaau8; 48];
    let mut s_out = [0xaau8; 48];
    decode(&der, &mut r_out, &mut s_out).unwrap();

    assert!(r_out[..47].iter().all(|b| *b == 0));
    assert_eq!(r_out[47], 0x01);
    assert!(s_out[..16].iter().all(|b| *b == 0));
    assert_eq!(&s_out[16..], &s);
}

#[test]
fn test_decode_trailing_byte() {
    let (_, _, mut der) = padded_vector();
    der.push(0x00);

    let mut r_out = [0u8; SCALAR_LEN];
    let mut s_out = [0u8; SCALAR_LEN];
    let result = decode(&der, &mut r_out, &mut s_out);
    assert_eq!(result, Err(SignatureError::TrailingData));
}

#[test]
fn test_decode_extra_element_in_sequence() {
    let (_, _, mut der) = padded_vector();
    der[1] += 3;
    der.extend_from_slice(&[0x02, 0x01, 0x05]);

    let mut r_out = [0u8; SCALAR_LEN];
    let mut s_out = [0u8; SCALAR_LEN];
    let result = decode(&der, &mut r_out, &mut s_out);
    assert_eq!(result, Err(SignatureError::TrailingData));
}

#[test]
fn test_decode_oversized_integer() {
    // s has a 33-byte magnitude
    let mut der = vec![
        0x30, 0x26, // SEQUENCE, 38 bytes
        0x02, 0x01, 0x01, // INTEGER 1
        0x02, 0x21, 0x01, // INTEGER, 33 bytes
    ];
    der.extend_from_slice(&[0x00; 32]);

    let mut r_out = [0xaau8; SCALAR_LEN];
    let mut s_out = [0xaau8; SCALAR_LEN];
    let result = decode(&der, &mut r_out, &mut s_out);
    assert_eq!(result, Err(SignatureError::LengthMismatch { len: 33, max: 32 }));
    assert!(r_out.iter().all(|b| *b == 0xaa));
    assert!(s_out.iter().all(|b| *b == 0xaa));
}

#[test]
fn test_decode_into_narrow_output() {
    let (_, _, der) = padded_vector();

    let mut r_out = [0u8; 16];
    let mut s_out = [0u8; 16];
    let result = decode(&der, &mut r_out, &mut s_out);
    assert_eq!(result, Err(SignatureError::LengthMismatch { len: 32, max: 16 }));
}

#[test]
fn test_decode_malformed() {
    let cases: [&[u8]; 10] = [
        // empty
        &[],
        // SET instead of SEQUENCE
        &[0x31, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x01],
        // OCTET STRING instead of INTEGER
        &[0x30, 0x06, 0x04, 0x01, 0x01, 0x02, 0x01, 0x01],
        // declared length runs past the buffer
        &[0x30, 0x07, 0x02, 0x01, 0x01, 0x02, 0x01, 0x01],
        // declared length cuts s short
        &[0x30, 0x05, 0x02, 0x01, 0x01, 0x02, 0x01, 0x01],
        // missing s
        &[0x30, 0x03, 0x02, 0x01, 0x01],
        // non-minimal integer
        &[0x30, 0x07, 0x02, 0x02, 0x00, 0x01, 0x02, 0x01, 0x01],
        // negative integer
        &[0x30, 0x06, 0x02, 0x01, 0x80, 0x02, 0x01, 0x01],
        // long-form length for short content
        &[0x30, 0x81, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x01],
        // empty integer
        &[0x30, 0x05, 0x02, 0x00, 0x02, 0x01, 0x01],
    ];

    for der in cases {
        let mut r_out = [0xaau8; SCALAR_LEN];
        let mut s_out = [0xaau8; SCALAR_LEN];
        let result = decode(der, &mut r_out, &mut s_out);
        assert_eq!(
            result,
            Err(SignatureError::MalformedSignature),
            "input {:02x?}",
            der
        );
        assert!(r_out.iter().all(|b| *b == 0xaa));
        assert!(s_out.iter().all(|b| *b == 0xaa));
    }
}

#[test]
fn test_raw_conversions() {
    let (r, s, expected) = padded_vector();
    let mut raw = r.to_vec();
    raw.extend_from_slice(&s);

    let mut der = [0u8; 72];
    let len = raw_to_der(&raw, &mut der).unwrap();
    assert_eq!(&der[..len], expected.as_slice());

    let mut raw_out = [0u8; 64];
    der_to_raw(&der[..len], &mut raw_out).unwrap();
    assert_eq!(raw_out.as_slice(), raw.as_slice());

    assert_eq!(
        raw_to_der(&raw[..63], &mut der),
        Err(SignatureError::InvalidScalarLength)
    );
    assert_eq!(
        der_to_raw(&expected, &mut raw_out[..63]),
        Err(SignatureError::InvalidScalarLength)
    );
}

#[test]
fn test_der_ecdsa_signature() {
    let (r, s, expected) = padded_vector();

    let sig = DerEcdsaSignature::new(&r, &s).unwrap();
    assert_eq!(sig.scalar_len(), SCALAR_LEN);
    assert_eq!(sig.to_der(None).unwrap(), expected.len());
    assert_eq!(sig.to_der_vec().unwrap(), expected);

    let mut der = vec![0u8; expected.len()];
    assert_eq!(sig.to_der(Some(&mut der)).unwrap(), expected.len());
    assert_eq!(der, expected);

    let mut short = vec![0u8; expected.len() - 1];
    assert!(matches!(
        sig.to_der(Some(&mut short)),
        Err(SignatureError::EncodingTooLarge { .. })
    ));

    let decoded = DerEcdsaSignature::from_der(&expected, SCALAR_LEN).unwrap();
    assert_eq!(decoded, sig);
    assert_eq!(decoded.r(), &r);
    assert_eq!(decoded.s(), &s);

    let raw = decoded.to_raw();
    assert_eq!(DerEcdsaSignature::from_raw(&raw).unwrap(), sig);
    assert!(DerEcdsaSignature::from_raw(&raw[..1]).is_err());
}
