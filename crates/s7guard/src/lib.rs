//! PDU budget guard and frame audit trail for S7 controller clients.
//!
//! s7guard sits between a request dispatcher and the controller socket. It
//! refuses batches that would not fit the negotiated PDU size, validates the
//! status byte of every response, and keeps a bounded history of the frames
//! exchanged.
//!
//! # Crate Structure
//!
//! - [`transport`]: Stream handle the guard lends to the dispatcher
//! - [`frame`]: Frame records, audit trail, status vocabulary, PDU budgets
//! - [`session`]: The session guard and its hook points

/// Re-export transport types.
pub mod transport {
    pub use s7guard_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use s7guard_frame::*;
}

/// Re-export session types.
pub mod session {
    pub use s7guard_session::*;
}
