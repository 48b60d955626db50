//! Session guard for S7 controller clients.
//!
//! The dispatcher that owns the socket calls into a [`SessionGuard`] at two
//! points: before a request goes out (PDU budget check, outbound frame
//! logged) and after a response comes back (inbound frame logged, status
//! byte and length validated). The guard also owns the frame audit trail
//! and the transport timeouts for the session.

pub mod config;
pub mod error;
pub mod guard;
pub mod response;

pub use config::{SessionConfig, DEFAULT_MAX_PDU_SIZE, DEFAULT_TIMEOUT};
pub use error::{Result, SessionError};
pub use guard::SessionGuard;
pub use response::validate_response;
