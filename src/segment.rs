//! Segment plan computation.
//!
//! Splits a total duration into N contiguous, non-overlapping half-open
//! millisecond intervals covering `[0, duration_ms)` exactly once. Every
//! interval has width `duration_ms / count` (integer floor division) except
//! the last, which absorbs the division remainder.

use crate::error::{ChunkscribeError, Result};

/// One half-open time window `[start_ms, end_ms)` of the source audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start_ms: u64,
    pub end_ms: u64,
}

impl Interval {
    /// Window width in milliseconds.
    pub fn width_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }
}

/// Compute the segment plan for a clip of `duration_ms` split into `count`
/// windows.
///
/// Guarantees: `start_0 = 0`, `end_{N-1} = duration_ms`, and each window
/// starts where the previous one ends. When `count > duration_ms` some
/// windows are zero-length; that is accepted, not an error.
///
/// # Errors
/// Returns `ChunkscribeError::InvalidArgument` when `count` is zero.
pub fn plan(duration_ms: u64, count: usize) -> Result<Vec<Interval>> {
    if count == 0 {
        return Err(ChunkscribeError::InvalidArgument {
            message: "num_chunks must be at least 1".to_string(),
        });
    }

    let width = duration_ms / count as u64;
    let intervals = (0..count)
        .map(|i| {
            let start_ms = i as u64 * width;
            let end_ms = if i == count - 1 {
                duration_ms
            } else {
                (i as u64 + 1) * width
            };
            Interval { start_ms, end_ms }
        })
        .collect();

    Ok(intervals)
}
