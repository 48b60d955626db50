use std::fmt;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

/// Operation label used for read requests and their responses.
pub const OP_READ: &str = "Read";

/// Operation label used for write requests and their responses.
pub const OP_WRITE: &str = "Write";

/// Which side originated a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Sent by this client to the controller.
    Sent,
    /// Received from the controller.
    Received,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Sent => "Sent",
            Direction::Received => "Received",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One observed wire frame.
///
/// The raw bytes are rendered once, at construction, as uppercase hex with
/// no separators. Fields are private so a record cannot change after it has
/// been captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameRecord {
    direction: Direction,
    payload_hex: String,
    timestamp: SystemTime,
    operation: String,
}

impl FrameRecord {
    /// Capture `raw` now.
    pub fn new(direction: Direction, raw: &[u8], operation: impl Into<String>) -> Self {
        Self::at(direction, raw, operation, SystemTime::now())
    }

    /// Capture `raw` with an explicit timestamp.
    pub fn at(
        direction: Direction,
        raw: &[u8],
        operation: impl Into<String>,
        timestamp: SystemTime,
    ) -> Self {
        Self {
            direction,
            payload_hex: hex::encode_upper(raw),
            timestamp,
            operation: operation.into(),
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Uppercase hex of the frame, two characters per byte.
    pub fn payload_hex(&self) -> &str {
        &self.payload_hex
    }

    pub fn timestamp(&self) -> SystemTime {
        self.timestamp
    }

    /// Free-form label supplied by the caller, e.g. [`OP_READ`].
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Number of bytes in the captured frame.
    pub fn byte_len(&self) -> usize {
        self.payload_hex.len() / 2
    }
}
