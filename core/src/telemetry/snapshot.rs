//! telemetry/snapshot.rs
//! Immutable telemetry snapshot.
//!
//! Design notes:
//! - Built from a processor's counters plus the adapter's timer.
//! - Serializable so callers can ship it as JSON without extra mapping.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::compression::Mode;
use crate::telemetry::counters::TelemetryCounters;
use crate::telemetry::timers::{Stage, StageTimes, TelemetryTimer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub mode: Mode,
    pub chunks: u64,
    pub flushes: u64,
    pub bytes_in: u64,
    pub bytes_out: u64,
    pub codec_calls: u64,
    pub buffer_grows: u64,
    pub finalizations: u64,
    /// `bytes_out / bytes_in`; below 1.0 when compressing compressible data.
    pub ratio: f64,
    pub throughput_in_bytes_per_sec: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl TelemetrySnapshot {
    pub fn from(mode: Mode, counters: &TelemetryCounters, timer: &TelemetryTimer) -> Self {
        let elapsed = timer.elapsed();

        let ratio = if counters.bytes_in > 0 {
            counters.bytes_out as f64 / counters.bytes_in as f64
        } else {
            0.0
        };

        let throughput = if elapsed.as_secs_f64() > 0.0 {
            counters.bytes_in as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        Self {
            mode,
            chunks: counters.chunks,
            flushes: counters.flushes,
            bytes_in: counters.bytes_in,
            bytes_out: counters.bytes_out,
            codec_calls: counters.codec_calls,
            buffer_grows: counters.buffer_grows,
            finalizations: counters.finalizations,
            ratio,
            throughput_in_bytes_per_sec: throughput,
            elapsed,
            stage_times: timer.stage_times.clone(),
        }
    }

    pub fn total_stage_time(&self) -> Duration {
        self.stage_times.total()
    }

    pub fn has_all_stages(&self, expected: &[Stage]) -> bool {
        self.stage_times.has_all(expected)
    }

    /// Internal invariants: at most one finalization and stage time within
    /// elapsed time.
    pub fn sanity_check(&self) -> bool {
        self.finalizations <= 1 && self.total_stage_time() <= self.elapsed
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
