use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use s7guard_frame::{
    read_budget, write_budget, AuditTrail, Direction, FrameError, FrameRecord, ItemLength,
    ReadBudget, WriteBudget,
};
use s7guard_transport::PlcStream;

use crate::config::SessionConfig;
use crate::error::{Result, SessionError};
use crate::response::validate_response;

/// Per-session guard consulted by the request dispatcher.
///
/// `max_pdu_size` is written by the handshake through `&mut self` and read
/// everywhere else through `&self`, so budget checks need no locking. The
/// audit trail carries its own lock and can be shared with the dispatcher
/// via [`SessionGuard::audit`].
#[derive(Debug)]
pub struct SessionGuard {
    max_pdu_size: usize,
    read_timeout: Option<Duration>,
    write_timeout: Option<Duration>,
    audit: Arc<AuditTrail>,
    stream: Option<PlcStream>,
}

impl SessionGuard {
    /// Create a guard with default configuration.
    pub fn new() -> Self {
        let config = SessionConfig::default();
        Self {
            max_pdu_size: config.max_pdu_size,
            read_timeout: config.read_timeout,
            write_timeout: config.write_timeout,
            audit: Arc::new(AuditTrail::new()),
            stream: None,
        }
    }

    /// Create a guard with explicit configuration.
    pub fn with_config(config: SessionConfig) -> Result<Self> {
        if config.max_pdu_size == 0 {
            return Err(FrameError::InvalidPduSize.into());
        }
        let audit = AuditTrail::with_capacity(config.audit_capacity)?;
        audit.set_enabled(config.audit_enabled);

        Ok(Self {
            max_pdu_size: config.max_pdu_size,
            read_timeout: config.read_timeout,
            write_timeout: config.write_timeout,
            audit: Arc::new(audit),
            stream: None,
        })
    }

    pub fn max_pdu_size(&self) -> usize {
        self.max_pdu_size
    }

    /// Record the PDU size negotiated by the handshake.
    pub fn set_max_pdu_size(&mut self, max_pdu_size: usize) -> Result<()> {
        if max_pdu_size == 0 {
            return Err(FrameError::InvalidPduSize.into());
        }
        tracing::debug!(max_pdu_size, "negotiated PDU size set");
        self.max_pdu_size = max_pdu_size;
        Ok(())
    }

    /// Attach the stream produced by the connection layer.
    ///
    /// The configured timeouts are applied before the stream is kept. Any
    /// previously attached stream is returned.
    pub fn attach(&mut self, stream: PlcStream) -> Result<Option<PlcStream>> {
        stream.set_read_timeout(self.read_timeout)?;
        stream.set_write_timeout(self.write_timeout)?;
        tracing::debug!(peer = ?stream.peer_addr().ok(), "transport attached");
        Ok(self.stream.replace(stream))
    }

    /// Release the attached stream, if any.
    pub fn detach(&mut self) -> Option<PlcStream> {
        let stream = self.stream.take();
        if stream.is_some() {
            tracing::debug!("transport detached");
        }
        stream
    }

    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    /// The attached stream, or [`SessionError::NotConnected`].
    pub fn stream(&self) -> Result<&PlcStream> {
        self.stream.as_ref().ok_or(SessionError::NotConnected)
    }

    /// Mutable access to the attached stream, or [`SessionError::NotConnected`].
    pub fn stream_mut(&mut self) -> Result<&mut PlcStream> {
        self.stream.as_mut().ok_or(SessionError::NotConnected)
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout
    }

    /// Change the read timeout, applying it to the attached stream first.
    pub fn set_read_timeout(&mut self, timeout: Option<Duration>) -> Result<()> {
        if let Some(stream) = &self.stream {
            stream.set_read_timeout(timeout)?;
        }
        self.read_timeout = timeout;
        Ok(())
    }

    pub fn write_timeout(&self) -> Option<Duration> {
        self.write_timeout
    }

    /// Change the write timeout, applying it to the attached stream first.
    pub fn set_write_timeout(&mut self, timeout: Option<Duration>) -> Result<()> {
        if let Some(stream) = &self.stream {
            stream.set_write_timeout(timeout)?;
        }
        self.write_timeout = timeout;
        Ok(())
    }

    /// Check that a read batch and its response fit the negotiated PDU size.
    pub fn check_read<I: ItemLength>(&self, items: &[I]) -> Result<ReadBudget> {
        let budget = read_budget(items);
        if let Err(err) = budget.check(self.max_pdu_size) {
            tracing::warn!(
                items = budget.item_count,
                max_pdu_size = self.max_pdu_size,
                error = %err,
                "read batch rejected"
            );
            return Err(err.into());
        }
        tracing::debug!(
            items = budget.item_count,
            request_size = budget.request_size,
            response_size = budget.response_size,
            "read budget accepted"
        );
        Ok(budget)
    }

    /// Check that a write batch and its data fit the negotiated PDU size.
    pub fn check_write<I: ItemLength>(&self, items: &[I]) -> Result<WriteBudget> {
        let budget = write_budget(items);
        if let Err(err) = budget.check(self.max_pdu_size) {
            tracing::warn!(
                items = budget.item_count,
                max_pdu_size = self.max_pdu_size,
                error = %err,
                "write batch rejected"
            );
            return Err(err.into());
        }
        tracing::debug!(
            items = budget.item_count,
            request_size = budget.request_size,
            payload_size = budget.payload_size,
            "write budget accepted"
        );
        Ok(budget)
    }

    /// Outbound hook: log a frame about to be written.
    pub fn record_sent(&self, frame: &[u8], operation: &str) {
        self.audit.record(Direction::Sent, frame, operation);
    }

    /// Inbound hook: log a received frame. A missing frame is not an error.
    pub fn record_received(&self, frame: Option<&[u8]>, operation: &str) {
        if let Some(frame) = frame {
            self.audit.record(Direction::Received, frame, operation);
        }
    }

    /// Validate a response against the status vocabulary and the expected
    /// data length; returns the data region.
    pub fn validate_response(&self, response: Option<&Bytes>, data_length: usize) -> Result<Bytes> {
        validate_response(response, data_length).map_err(Into::into)
    }

    /// Budget-check a read batch, then log its request frame.
    ///
    /// Nothing is logged when the batch is rejected.
    pub fn admit_read<I: ItemLength>(
        &self,
        items: &[I],
        request: &[u8],
        operation: &str,
    ) -> Result<ReadBudget> {
        let budget = self.check_read(items)?;
        self.record_sent(request, operation);
        Ok(budget)
    }

    /// Budget-check a write batch, then log its request frame.
    ///
    /// Nothing is logged when the batch is rejected.
    pub fn admit_write<I: ItemLength>(
        &self,
        items: &[I],
        request: &[u8],
        operation: &str,
    ) -> Result<WriteBudget> {
        let budget = self.check_write(items)?;
        self.record_sent(request, operation);
        Ok(budget)
    }

    /// Log a response frame, then validate it.
    pub fn accept_response(
        &self,
        response: Option<&Bytes>,
        data_length: usize,
        operation: &str,
    ) -> Result<Bytes> {
        self.record_received(response.map(|b| &b[..]), operation);
        self.validate_response(response, data_length)
    }

    /// Shared handle to the session's audit trail.
    pub fn audit(&self) -> &Arc<AuditTrail> {
        &self.audit
    }

    /// Hex of the most recent frame in either direction, or `""`.
    pub fn last_frame_hex(&self) -> String {
        self.audit.last_hex()
    }

    /// Hex of the most recent frame in `direction`, or `""`.
    pub fn last_frame_hex_for(&self, direction: Direction) -> String {
        self.audit.last_hex_for(direction)
    }

    /// Ordered copy of the captured frames, oldest first.
    pub fn frames(&self) -> Vec<FrameRecord> {
        self.audit.snapshot()
    }

    pub fn clear_frames(&self) {
        self.audit.clear();
    }

    pub fn audit_enabled(&self) -> bool {
        self.audit.is_enabled()
    }

    pub fn set_audit_enabled(&self, enabled: bool) {
        self.audit.set_enabled(enabled);
    }

    pub fn audit_capacity(&self) -> usize {
        self.audit.capacity()
    }

    /// Resize the audit trail; excess frames are evicted before returning.
    pub fn set_audit_capacity(&self, capacity: usize) -> Result<()> {
        self.audit.set_capacity(capacity).map_err(Into::into)
    }
}

impl Default for SessionGuard {
    fn default() -> Self {
        Self::new()
    }
}
