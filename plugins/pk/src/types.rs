// Copyright (C) Microsoft Corporation. All rights reserved.

//! Host identifiers for key types and message digests.

/// Key types known to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PkType {
    /// No key type
    None,

    /// RSA
    Rsa,

    /// Generic EC key
    Eckey,

    /// EC key restricted to ECDH
    EckeyDh,

    /// EC key restricted to ECDSA
    Ecdsa,

    /// RSA with externally provided operations
    RsaAlt,

    /// RSASSA-PSS
    RsassaPss,

    /// Key whose material is not visible to the host
    Opaque,
}

/// Message digest algorithms known to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MdType {
    /// No digest, the input is signed as is
    None,

    /// MD5
    Md5,

    /// SHA-1
    Sha1,

    /// SHA-224
    Sha224,

    /// SHA-256
    Sha256,

    /// SHA-384
    Sha384,

    /// SHA-512
    Sha512,

    /// RIPEMD-160
    Ripemd160,
}

impl MdType {
    /// Digest size in bytes, 0 for [`MdType::None`].
    pub const fn digest_len(&self) -> usize {
        match self {
            MdType::None => 0,
            MdType::Md5 => 16,
            MdType::Sha1 | MdType::Ripemd160 => 20,
            MdType::Sha224 => 28,
            MdType::Sha256 => 32,
            MdType::Sha384 => 48,
            MdType::Sha512 => 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_len() {
        assert_eq!(MdType::None.digest_len(), 0);
        assert_eq!(MdType::Sha1.digest_len(), 20);
        assert_eq!(MdType::Sha256.digest_len(), 32);
        assert_eq!(MdType::Sha512.digest_len(), 64);
    }
}
