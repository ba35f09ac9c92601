//! telemetry/counters.rs
//! Mutable counters updated by a processor while it runs.
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

/// Deterministic counters collected during chunk processing.
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryCounters {
    /// Successful `process` calls.
    pub chunks: u64,
    /// Final calls with an empty chunk (explicit flushes).
    pub flushes: u64,
    pub bytes_in: u64,
    pub bytes_out: u64,
    /// Engine invocations across all chunks.
    pub codec_calls: u64,
    /// Output buffer extensions beyond the initial allocation.
    pub buffer_grows: u64,
    pub finalizations: u64,
}

impl TelemetryCounters {
    /// Record one successful `process` call.
    pub fn record_chunk(&mut self, bytes_in: usize, bytes_out: usize, is_last: bool) {
        self.chunks += 1;
        if is_last && bytes_in == 0 {
            self.flushes += 1;
        }
        self.bytes_in += bytes_in as u64;
        self.bytes_out += bytes_out as u64;
    }

    /// Average engine calls per chunk; 0 when nothing was processed.
    pub fn calls_per_chunk(&self) -> f64 {
        if self.chunks == 0 {
            return 0.0;
        }
        self.codec_calls as f64 / self.chunks as f64
    }

    pub fn merge(&mut self, other: &TelemetryCounters) {
        self.chunks        += other.chunks;
        self.flushes       += other.flushes;
        self.bytes_in      += other.bytes_in;
        self.bytes_out     += other.bytes_out;
        self.codec_calls   += other.codec_calls;
        self.buffer_grows  += other.buffer_grows;
        self.finalizations += other.finalizations;
    }
}

impl AddAssign for TelemetryCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_and_merge() {
        let mut a = TelemetryCounters::default();
        a.record_chunk(10, 4, false);
        a.record_chunk(0, 20, true);
        assert_eq!((a.chunks, a.flushes, a.bytes_in, a.bytes_out), (2, 1, 10, 24));

        let mut b = TelemetryCounters::default();
        b.codec_calls = 3;
        b += a.clone();
        assert_eq!(b.bytes_in, 10);
        assert_eq!(b.codec_calls, 3);
        assert_eq!(b.chunks, 2);
    }
}
