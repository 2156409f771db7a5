//! Ordering guards for the occupancy poll loop.
//!
//! Polls fire on a fixed interval regardless of whether the previous one
//! finished, so responses can arrive out of send order. Each request is
//! stamped from a [`PollSequencer`]; the consumer runs every response
//! through a [`StatusGate`] and drops anything older than what it has
//! already rendered.

/// Issues monotonically increasing request sequence numbers, starting at 1.
#[derive(Debug, Default)]
pub struct PollSequencer {
    next: u64,
}

impl PollSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> u64 {
        self.next += 1;
        self.next
    }
}

/// Admits only responses strictly newer than the last admitted one.
#[derive(Debug, Default)]
pub struct StatusGate {
    admitted: u64,
}

impl StatusGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `seq` is fresher than everything seen so far; the
    /// caller may then render it. Stale sequences are rejected.
    pub fn admit(&mut self, seq: u64) -> bool {
        if seq > self.admitted {
            self.admitted = seq;
            true
        } else {
            tracing::debug!(seq, admitted = self.admitted, "stale poll response dropped");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequencer_starts_at_one_and_increments() {
        let mut seq = PollSequencer::new();
        assert_eq!(seq.issue(), 1);
        assert_eq!(seq.issue(), 2);
        assert_eq!(seq.issue(), 3);
    }

    #[test]
    fn gate_rejects_stale_and_duplicate_sequences() {
        let mut gate = StatusGate::new();
        assert!(gate.admit(1));
        assert!(gate.admit(3));
        // Response 2 arrives after 3 was rendered: stale, dropped.
        assert!(!gate.admit(2));
        assert!(!gate.admit(3));
        assert!(gate.admit(4));
    }
}
