// Copyright (C) Microsoft Corporation. All rights reserved.

//! DDI Implementation - Mock Secure Element
//!
//! Software stand-in for a secure element holding NIST P-256 private keys in
//! numbered slots. Keys are generated with OpenSSL and never leave the store;
//! callers only get [`MockKey`] handles exposing the sign/verify commands.
//!
//! Every slot carries [`MockKeyStats`], shared by all handles to the slot, so
//! tests can count device commands, count live handles and inject device
//! faults.

mod ddi;
mod dev;

pub use ddi::MockKeyStats;
pub use ddi::MockKeyStore;
pub use ddi::DEFAULT_KEY_SLOTS;
pub use dev::MockKey;

/// Digest length accepted by the device (SHA-256)
pub const DIGEST_LEN: usize = 32;

/// Width of one signature scalar on the device curve (P-256)
pub const SCALAR_LEN: usize = 32;

/// Length of a raw R‖S signature produced by the device
pub const RAW_SIGNATURE_LEN: usize = 2 * SCALAR_LEN;
