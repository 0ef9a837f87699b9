//! The orchestration loop: batch reads, ordered writes, periodic two-phase
//! checkpoint commits.
//!
//! Delivery guarantee: within every checkpoint cycle the sink commit
//! happens-before the source commit, so a crash between the two redelivers
//! records already durable at the sink. Duplicates are possible, loss is
//! not (at-least-once); replay tolerance is the sink's responsibility.

use crate::contract::{Sink, Source};
use crate::error::{PumpError, Result};

/// Aggregate counters for a completed pump run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpSummary {
    /// Records moved from source to sink.
    pub records: u64,
    /// Non-end-of-stream batches read (empty batches included).
    pub batches: u64,
    /// Checkpoint cycles performed (sink commit + source commit).
    pub commits: u64,
}

/// Batching pump between any [`Source<T>`] and any [`Sink<T>`].
///
/// The pump owns no source or sink state; it only sequences calls. It is
/// not reentrant against the same source/sink pair and performs no retry:
/// the first failed read, write, or commit aborts the run.
#[derive(Debug, Clone, Copy)]
pub struct Pump {
    batch_size: usize,
    commit_threshold: u64,
}

impl Pump {
    /// Create a pump reading up to `batch_size` records per cycle and
    /// committing once the records written since the last wraparound
    /// strictly exceed `commit_threshold`.
    #[must_use]
    pub fn new(batch_size: usize, commit_threshold: u64) -> Self {
        Self {
            batch_size,
            commit_threshold,
        }
    }

    /// Move records until the source reports end-of-stream.
    ///
    /// On clean end-of-stream, any writes accepted since the last
    /// checkpoint cycle are flushed with a final sink-then-source commit
    /// before the summary is returned.
    ///
    /// # Errors
    ///
    /// Returns [`PumpError::Config`] for a zero `batch_size` before any
    /// I/O is attempted. Any read, write, or commit failure is returned
    /// immediately with no further I/O.
    pub fn run<T>(
        &self,
        source: &mut impl Source<T>,
        sink: &mut impl Sink<T>,
    ) -> Result<PumpSummary> {
        if self.batch_size == 0 {
            return Err(PumpError::config("batch_size must be at least 1"));
        }

        let mut summary = PumpSummary::default();
        // Cadence counter wraps by subtraction so overshoot carries forward;
        // `pending` tracks records actually uncommitted and gates the final
        // drain commit.
        let mut cadence: u64 = 0;
        let mut pending: u64 = 0;

        loop {
            let Some(batch) = source.read(self.batch_size)? else {
                if pending > 0 {
                    sink.commit()?;
                    source.commit()?;
                    summary.commits += 1;
                    tracing::debug!(records = pending, "final checkpoint cycle committed");
                }
                tracing::debug!(
                    records = summary.records,
                    batches = summary.batches,
                    commits = summary.commits,
                    "pump drained"
                );
                return Ok(summary);
            };

            let count = batch.len() as u64;
            sink.write(batch)?;
            tracing::trace!(records = count, "batch written");

            summary.records += count;
            summary.batches += 1;
            cadence += count;
            pending += count;

            if cadence > self.commit_threshold {
                cadence -= self.commit_threshold;
                sink.commit()?;
                source.commit()?;
                summary.commits += 1;
                tracing::debug!(records = pending, "checkpoint cycle committed");
                pending = 0;
            }
        }
    }
}
