//! Frame-level building blocks for guarding an S7 controller session.
//!
//! - [`FrameRecord`]: one observed wire frame, rendered as uppercase hex
//! - [`AuditTrail`]: bounded, thread-safe history of frame records
//! - [`ResponseStatus`]: the status byte vocabulary found at offset 14
//! - [`read_budget`] / [`write_budget`]: PDU size arithmetic for item batches
//!
//! Nothing here touches a socket. The session layer decides when each piece
//! is consulted.

pub mod audit;
pub mod error;
pub mod pdu;
pub mod record;
pub mod status;

pub use audit::{AuditTrail, DEFAULT_AUDIT_CAPACITY};
pub use error::{FrameError, Result};
pub use pdu::{read_budget, write_budget, DataItem, ItemLength, ReadBudget, VarType, WriteBudget};
pub use record::{Direction, FrameRecord, OP_READ, OP_WRITE};
pub use status::{
    DeviceError, ResponseStatus, MIN_STATUS_FRAME_LEN, RESPONSE_DATA_OFFSET, STATUS_OFFSET,
};
