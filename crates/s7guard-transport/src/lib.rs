//! Transport stream handle for S7 controller sessions.
//!
//! Connection setup and the handshake live outside this workspace. Whatever
//! performs them hands the connected socket over as a [`PlcStream`], which the
//! session guard keeps, applies timeouts to, and lends to the dispatcher.

pub mod error;
pub mod stream;

pub use error::{Result, TransportError};
pub use stream::PlcStream;
