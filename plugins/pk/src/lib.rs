// Copyright (C) Microsoft Corporation. All rights reserved.

#![warn(missing_docs)]

//! Opaque secure element key
//!
//! Exposes an ECDSA P-256 private key that lives in a secure element through
//! the host's public-key interface. The host sees an opaque key that can only
//! sign and verify SHA-256 digests; signatures cross the host boundary in DER
//! and the secure element boundary in raw R‖S form.

mod context;
mod error;
mod key;
mod ops;
mod store;
mod types;

pub use context::PkContext;
pub use error::host_code;
pub use error::PkError;
pub use key::OpaqueEcKey;
pub use key::OPAQUE_EC_KEY_NAME;
pub use ops::PkOps;
pub use store::*;
pub use types::MdType;
pub use types::PkType;
