use crate::status::DeviceError;

/// Errors raised while checking budgets, validating responses or
/// configuring the audit trail.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The request envelope would exceed the negotiated PDU size.
    #[error("request too large ({size} bytes, max PDU size {max})")]
    RequestTooLarge { size: usize, max: usize },

    /// The expected read response would exceed the negotiated PDU size.
    #[error("response too large ({size} bytes, max PDU size {max})")]
    ResponseTooLarge { size: usize, max: usize },

    /// The write data would exceed the negotiated PDU size.
    #[error("write payload too large ({size} bytes, max PDU size {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// No response frame was handed over.
    #[error("no data received")]
    NoData,

    /// The response frame is shorter than the request requires.
    #[error("wrong number of bytes received ({received} bytes: '{dump}', expected {expected} bytes)")]
    WrongByteCount {
        received: usize,
        expected: usize,
        dump: String,
    },

    /// The controller rejected the request with a known status code.
    #[error("controller rejected request: {0}")]
    Device(#[from] DeviceError),

    /// The status byte is not part of the known vocabulary.
    #[error("invalid response status 0x{0:02X}")]
    InvalidStatus(u8),

    /// Audit trail capacity must be at least one record.
    #[error("audit capacity must be greater than zero")]
    InvalidCapacity,

    /// The negotiated PDU size must be at least one byte.
    #[error("max PDU size must be greater than zero")]
    InvalidPduSize,

    /// A variable type name could not be parsed.
    #[error("unknown variable type '{0}'")]
    UnknownVarType(String),

    /// A `TYPE:COUNT` item whose count is not a non-negative integer.
    #[error("invalid element count in item '{0}'")]
    InvalidItemCount(String),
}

impl FrameError {
    /// True for errors raised before transmission because a batch does not
    /// fit the negotiated PDU size. Callers recover by splitting the batch.
    pub fn is_size_limit(&self) -> bool {
        matches!(
            self,
            FrameError::RequestTooLarge { .. }
                | FrameError::ResponseTooLarge { .. }
                | FrameError::PayloadTooLarge { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;
