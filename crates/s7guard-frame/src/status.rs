//! Response status vocabulary.
//!
//! Every read/write response carries one status byte at [`STATUS_OFFSET`].
//! `0x00` means success; a closed set of codes names the reason the
//! controller refused the request; anything else is unrecognized.

use crate::error::{FrameError, Result};

/// Offset of the status byte in a response frame.
pub const STATUS_OFFSET: usize = 14;

/// Shortest frame that still contains a status byte.
pub const MIN_STATUS_FRAME_LEN: usize = STATUS_OFFSET + 1;

/// Offset of the first data byte; also the fixed overhead added to the
/// declared data length when computing the expected frame length.
pub const RESPONSE_DATA_OFFSET: usize = 18;

/// Status byte value for a successful item.
pub const SUCCESS: u8 = 0x00;

/// Reasons the controller reports for refusing a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[repr(u8)]
pub enum DeviceError {
    #[error("hardware fault")]
    HardwareFault = 0x01,

    #[error("accessing object not allowed")]
    AccessingObjectNotAllowed = 0x03,

    #[error("object does not exist")]
    ObjectDoesNotExist = 0x05,

    #[error("data type not supported")]
    DataTypeNotSupported = 0x06,

    #[error("data type inconsistent")]
    DataTypeInconsistent = 0x07,

    #[error("address out of range")]
    AddressOutOfRange = 0x0A,
}

impl DeviceError {
    /// Raw status byte for this error.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Stable symbolic name.
    pub fn name(self) -> &'static str {
        match self {
            DeviceError::HardwareFault => "HardwareFault",
            DeviceError::AccessingObjectNotAllowed => "AccessingObjectNotAllowed",
            DeviceError::ObjectDoesNotExist => "ObjectDoesNotExist",
            DeviceError::DataTypeNotSupported => "DataTypeNotSupported",
            DeviceError::DataTypeInconsistent => "DataTypeInconsistent",
            DeviceError::AddressOutOfRange => "AddressOutOfRange",
        }
    }
}

/// Decoded status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseStatus {
    Success,
    Device(DeviceError),
    Unknown(u8),
}

impl ResponseStatus {
    pub fn from_byte(code: u8) -> Self {
        match code {
            SUCCESS => ResponseStatus::Success,
            0x01 => ResponseStatus::Device(DeviceError::HardwareFault),
            0x03 => ResponseStatus::Device(DeviceError::AccessingObjectNotAllowed),
            0x05 => ResponseStatus::Device(DeviceError::ObjectDoesNotExist),
            0x06 => ResponseStatus::Device(DeviceError::DataTypeNotSupported),
            0x07 => ResponseStatus::Device(DeviceError::DataTypeInconsistent),
            0x0A => ResponseStatus::Device(DeviceError::AddressOutOfRange),
            other => ResponseStatus::Unknown(other),
        }
    }

    /// Raw status byte.
    pub fn code(self) -> u8 {
        match self {
            ResponseStatus::Success => SUCCESS,
            ResponseStatus::Device(err) => err.code(),
            ResponseStatus::Unknown(code) => code,
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, ResponseStatus::Success)
    }

    /// `Ok(())` for success, the matching [`FrameError`] otherwise.
    pub fn into_result(self) -> Result<()> {
        match self {
            ResponseStatus::Success => Ok(()),
            ResponseStatus::Device(err) => Err(FrameError::Device(err)),
            ResponseStatus::Unknown(code) => Err(FrameError::InvalidStatus(code)),
        }
    }
}

impl From<u8> for ResponseStatus {
    fn from(code: u8) -> Self {
        Self::from_byte(code)
    }
}
