use s7guard_frame::{DeviceError, FrameError};

/// Errors that can occur in session guard operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Budget, response or audit error.
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// Transport-level error.
    #[error("transport error: {0}")]
    Transport(#[from] s7guard_transport::TransportError),

    /// No transport is attached to the session.
    #[error("not connected")]
    NotConnected,
}

impl SessionError {
    /// True when the batch did not fit the negotiated PDU size.
    pub fn is_size_limit(&self) -> bool {
        matches!(self, SessionError::Frame(err) if err.is_size_limit())
    }

    /// The controller-reported reason, if the controller refused the request.
    pub fn device_error(&self) -> Option<DeviceError> {
        match self {
            SessionError::Frame(FrameError::Device(err)) => Some(*err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
