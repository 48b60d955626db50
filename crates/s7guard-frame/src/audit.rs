use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{FrameError, Result};
use crate::record::{Direction, FrameRecord};

/// Default number of frames retained by an [`AuditTrail`].
pub const DEFAULT_AUDIT_CAPACITY: usize = 1000;

/// Bounded, insertion-ordered history of exchanged frames.
///
/// All reads and writes go through one lock, so `len() <= capacity()` holds
/// for every observer and a snapshot never contains a partially applied
/// insert. When full, the oldest record is dropped.
#[derive(Debug)]
pub struct AuditTrail {
    enabled: AtomicBool,
    state: Mutex<TrailState>,
}

#[derive(Debug)]
struct TrailState {
    records: VecDeque<FrameRecord>,
    capacity: usize,
}

impl TrailState {
    fn evict(&mut self) -> usize {
        let excess = self.records.len().saturating_sub(self.capacity);
        self.records.drain(..excess);
        excess
    }
}

impl AuditTrail {
    /// Create an enabled trail with [`DEFAULT_AUDIT_CAPACITY`].
    pub fn new() -> Self {
        Self::build(DEFAULT_AUDIT_CAPACITY)
    }

    /// Create an enabled trail with an explicit capacity.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(FrameError::InvalidCapacity);
        }
        Ok(Self::build(capacity))
    }

    fn build(capacity: usize) -> Self {
        Self {
            enabled: AtomicBool::new(true),
            state: Mutex::new(TrailState {
                records: VecDeque::new(),
                capacity,
            }),
        }
    }

    // Every mutation leaves TrailState consistent before the guard drops,
    // so a poisoned lock still protects valid data.
    fn state(&self) -> MutexGuard<'_, TrailState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a frame, then evict from the front down to capacity.
    ///
    /// Does nothing when the trail is disabled or `raw` is empty.
    pub fn record(&self, direction: Direction, raw: &[u8], operation: &str) {
        if raw.is_empty() || !self.is_enabled() {
            return;
        }

        let record = FrameRecord::new(direction, raw, operation);
        tracing::trace!(%direction, operation, hex = record.payload_hex(), "frame captured");

        let mut state = self.state();
        state.records.push_back(record);
        state.evict();
    }

    /// Hex of the newest record in either direction, or `""` when empty.
    pub fn last_hex(&self) -> String {
        self.state()
            .records
            .back()
            .map(|r| r.payload_hex().to_string())
            .unwrap_or_default()
    }

    /// Hex of the newest record travelling in `direction`, or `""`.
    pub fn last_hex_for(&self, direction: Direction) -> String {
        self.state()
            .records
            .iter()
            .rev()
            .find(|r| r.direction() == direction)
            .map(|r| r.payload_hex().to_string())
            .unwrap_or_default()
    }

    /// Copy of all retained records, oldest first.
    pub fn snapshot(&self) -> Vec<FrameRecord> {
        self.state().records.iter().cloned().collect()
    }

    /// Drop every retained record.
    pub fn clear(&self) {
        self.state().records.clear();
    }

    /// Change the capacity, evicting the oldest excess records immediately.
    pub fn set_capacity(&self, capacity: usize) -> Result<()> {
        if capacity == 0 {
            return Err(FrameError::InvalidCapacity);
        }

        let mut state = self.state();
        state.capacity = capacity;
        let evicted = state.evict();
        drop(state);

        tracing::debug!(capacity, evicted, "audit capacity updated");
        Ok(())
    }

    pub fn capacity(&self) -> usize {
        self.state().capacity
    }

    pub fn len(&self) -> usize {
        self.state().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state().records.is_empty()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Turn capture on or off. Already retained records are kept.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }
}

impl Default for AuditTrail {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use crate::record::{OP_READ, OP_WRITE};

    fn frame(n: u32) -> [u8; 4] {
        n.to_be_bytes()
    }

    #[test]
    fn empty_trail_queries_return_empty_strings() {
        let trail = AuditTrail::new();
        assert!(trail.is_empty());
        assert_eq!(trail.last_hex(), "");
        assert_eq!(trail.last_hex_for(Direction::Sent), "");
        assert_eq!(trail.last_hex_for(Direction::Received), "");
        assert!(trail.snapshot().is_empty());
    }

    #[test]
    fn defaults() {
        let trail = AuditTrail::default();
        assert_eq!(trail.capacity(), DEFAULT_AUDIT_CAPACITY);
        assert!(trail.is_enabled());
    }

    #[test]
    fn retains_most_recent_records_in_order() {
        for capacity in [1usize, 2, 3, 5, 8] {
            let trail = AuditTrail::with_capacity(capacity).unwrap();
            for n in 0..20u32 {
                trail.record(Direction::Sent, &frame(n), OP_READ);

                let inserted = n as usize + 1;
                let expected_len = inserted.min(capacity);
                assert_eq!(trail.len(), expected_len);

                let first_kept = (inserted - expected_len) as u32;
                let expected: Vec<String> = (first_kept..=n)
                    .map(|k| hex::encode_upper(frame(k)))
                    .collect();
                let kept: Vec<String> = trail
                    .snapshot()
                    .iter()
                    .map(|r| r.payload_hex().to_string())
                    .collect();
                assert_eq!(kept, expected);
            }
        }
    }

    #[test]
    fn disabled_trail_records_nothing() {
        let trail = AuditTrail::new();
        trail.set_enabled(false);
        for n in 0..50u32 {
            trail.record(Direction::Received, &frame(n), OP_READ);
        }
        assert_eq!(trail.len(), 0);
        assert_eq!(trail.last_hex(), "");
    }

    #[test]
    fn disabling_keeps_existing_records() {
        let trail = AuditTrail::new();
        trail.record(Direction::Sent, &[0x01], OP_READ);
        trail.set_enabled(false);
        trail.record(Direction::Sent, &[0x02], OP_READ);

        assert_eq!(trail.len(), 1);
        assert_eq!(trail.last_hex(), "01");
    }

    #[test]
    fn re_enabling_resumes_capture() {
        let trail = AuditTrail::with_capacity(2).unwrap();
        trail.record(Direction::Sent, &[0x01], OP_READ);
        trail.set_enabled(false);
        trail.record(Direction::Sent, &[0x02], OP_READ);
        trail.set_enabled(true);
        assert!(trail.is_enabled());

        trail.record(Direction::Received, &[0x03], OP_READ);
        trail.record(Direction::Sent, &[0x04], OP_READ);

        let kept: Vec<String> = trail
            .snapshot()
            .iter()
            .map(|r| r.payload_hex().to_string())
            .collect();
        assert_eq!(kept, ["03", "04"]);
        assert_eq!(trail.last_hex_for(Direction::Received), "03");
    }

    #[test]
    fn empty_payload_is_ignored() {
        let trail = AuditTrail::new();
        trail.record(Direction::Sent, &[], OP_WRITE);
        assert!(trail.is_empty());
    }

    #[test]
    fn shrinking_capacity_evicts_oldest_immediately() {
        let trail = AuditTrail::with_capacity(10).unwrap();
        for n in 0..10u32 {
            trail.record(Direction::Sent, &frame(n), OP_READ);
        }

        trail.set_capacity(4).unwrap();

        assert_eq!(trail.len(), 4);
        assert_eq!(trail.capacity(), 4);
        let kept: Vec<String> = trail
            .snapshot()
            .iter()
            .map(|r| r.payload_hex().to_string())
            .collect();
        let expected: Vec<String> = (6..10u32).map(|k| hex::encode_upper(frame(k))).collect();
        assert_eq!(kept, expected);
    }

    #[test]
    fn growing_capacity_keeps_everything() {
        let trail = AuditTrail::with_capacity(2).unwrap();
        trail.record(Direction::Sent, &[0x01], OP_READ);
        trail.record(Direction::Sent, &[0x02], OP_READ);
        trail.set_capacity(5).unwrap();
        trail.record(Direction::Sent, &[0x03], OP_READ);
        assert_eq!(trail.len(), 3);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(matches!(
            AuditTrail::with_capacity(0),
            Err(FrameError::InvalidCapacity)
        ));

        let trail = AuditTrail::new();
        assert!(matches!(
            trail.set_capacity(0),
            Err(FrameError::InvalidCapacity)
        ));
        assert_eq!(trail.capacity(), DEFAULT_AUDIT_CAPACITY);
    }

    #[test]
    fn last_hex_filters_by_direction() {
        let trail = AuditTrail::new();
        trail.record(Direction::Sent, &[0xAA], OP_READ);
        trail.record(Direction::Received, &[0xBB], OP_READ);
        trail.record(Direction::Sent, &[0xCC], OP_READ);

        assert_eq!(trail.last_hex_for(Direction::Sent), "CC");
        assert_eq!(trail.last_hex_for(Direction::Received), "BB");
        assert_eq!(trail.last_hex(), "CC");
    }

    #[test]
    fn snapshot_is_a_copy() {
        let trail = AuditTrail::new();
        trail.record(Direction::Sent, &[0x01], OP_READ);

        let mut copy = trail.snapshot();
        copy.clear();

        assert_eq!(trail.len(), 1);
    }

    #[test]
    fn clear_empties_the_trail() {
        let trail = AuditTrail::new();
        trail.record(Direction::Sent, &[0x01], OP_READ);
        trail.record(Direction::Received, &[0x02], OP_READ);
        trail.clear();

        assert!(trail.is_empty());
        assert_eq!(trail.last_hex(), "");
        trail.record(Direction::Sent, &[0x03], OP_READ);
        assert_eq!(trail.last_hex(), "03");
    }

    #[test]
    fn concurrent_inserts_respect_capacity() {
        const THREADS: u32 = 8;
        const PER_THREAD: u32 = 500;
        const CAPACITY: usize = 1000;

        let trail = Arc::new(AuditTrail::with_capacity(CAPACITY).unwrap());

        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let trail = Arc::clone(&trail);
                thread::spawn(move || {
                    for i in 0..PER_THREAD {
                        trail.record(Direction::Sent, &frame(t * PER_THREAD + i), OP_READ);
                        assert!(trail.len() <= CAPACITY);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let records = trail.snapshot();
        assert_eq!(records.len(), CAPACITY);

        let unique: HashSet<&str> = records.iter().map(|r| r.payload_hex()).collect();
        assert_eq!(unique.len(), CAPACITY);
    }

    #[test]
    fn concurrent_inserts_below_capacity_lose_nothing() {
        let trail = Arc::new(AuditTrail::with_capacity(10_000).unwrap());

        let handles: Vec<_> = (0..4u32)
            .map(|t| {
                let trail = Arc::clone(&trail);
                thread::spawn(move || {
                    for i in 0..250u32 {
                        trail.record(Direction::Received, &frame(t * 1000 + i), OP_WRITE);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let records = trail.snapshot();
        assert_eq!(records.len(), 1000);
        let unique: HashSet<&str> = records.iter().map(|r| r.payload_hex()).collect();
        assert_eq!(unique.len(), 1000);
    }

    #[test]
    fn capacity_change_during_inserts_keeps_invariant() {
        let trail = Arc::new(AuditTrail::with_capacity(100).unwrap());

        let writer = {
            let trail = Arc::clone(&trail);
            thread::spawn(move || {
                for n in 0..2000u32 {
                    trail.record(Direction::Sent, &frame(n), OP_READ);
                }
            })
        };

        for capacity in [50usize, 10, 80, 3, 100] {
            trail.set_capacity(capacity).unwrap();
            assert!(trail.len() <= capacity);
        }

        writer.join().unwrap();
        assert!(trail.len() <= trail.capacity());
    }
}
