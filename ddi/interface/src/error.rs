// Copyright (C) Microsoft Corporation. All rights reserved.

//! Device Driver Interface (DDI) library - Error module

use thiserror::Error;

/// Secure element status
///
/// Every failing command reports one of these. The numeric value returned by
/// [`DdiStatus::code`] is the status byte the element puts on the bus and is
/// stable across releases.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DdiStatus {
    /// No key is provisioned in the requested slot
    #[error("key not found")]
    KeyNotFound,

    /// Invalid parameter
    #[error("invalid parameter")]
    InvalidParameter,

    /// Output buffer too small
    #[error("buffer too small")]
    BufferTooSmall,

    /// Sign command failed
    #[error("sign command failed")]
    SignFailed,

    /// Verify command reported a signature mismatch
    #[error("signature verification failed")]
    VerifyFailed,

    /// Device not ready
    #[error("device not ready")]
    DeviceNotReady,

    /// Bus transaction failed
    #[error("communication with the device failed")]
    CommunicationFailed,

    /// Device reported an execution error
    #[error("device execution error")]
    ExecutionError,
}

impl DdiStatus {
    /// Status code as reported by the device
    pub fn code(&self) -> u8 {
        match self {
            DdiStatus::VerifyFailed => 0x01,
            DdiStatus::ExecutionError => 0x0F,
            DdiStatus::CommunicationFailed => 0xF0,
            DdiStatus::DeviceNotReady => 0xF3,
            DdiStatus::InvalidParameter => 0xE2,
            DdiStatus::BufferTooSmall => 0xE4,
            DdiStatus::KeyNotFound => 0xE8,
            DdiStatus::SignFailed => 0xEC,
        }
    }
}

impl TryFrom<u8> for DdiStatus {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0x01 => Ok(DdiStatus::VerifyFailed),
            0x0F => Ok(DdiStatus::ExecutionError),
            0xF0 => Ok(DdiStatus::CommunicationFailed),
            0xF3 => Ok(DdiStatus::DeviceNotReady),
            0xE2 => Ok(DdiStatus::InvalidParameter),
            0xE4 => Ok(DdiStatus::BufferTooSmall),
            0xE8 => Ok(DdiStatus::KeyNotFound),
            0xEC => Ok(DdiStatus::SignFailed),
            _ => Err(code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [DdiStatus; 8] = [
        DdiStatus::KeyNotFound,
        DdiStatus::InvalidParameter,
        DdiStatus::BufferTooSmall,
        DdiStatus::SignFailed,
        DdiStatus::VerifyFailed,
        DdiStatus::DeviceNotReady,
        DdiStatus::CommunicationFailed,
        DdiStatus::ExecutionError,
    ];

    #[test]
    fn test_status_code_is_reversible() {
        for status in ALL {
            assert_eq!(DdiStatus::try_from(status.code()), Ok(status));
        }
    }

    #[test]
    fn test_unknown_status_code() {
        assert_eq!(DdiStatus::try_from(0x00), Err(0x00));
        assert_eq!(DdiStatus::try_from(0x7F), Err(0x7F));
    }
}
