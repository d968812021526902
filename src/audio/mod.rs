//! Decoded audio clips and time-based slicing.

pub mod decode;

use crate::segment::Interval;

/// A fully decoded audio stream: 16-bit PCM mono samples at a known rate.
///
/// The clip is loaded once per run and read-only afterwards; the pipeline
/// slices it by millisecond interval to materialize chunk artifacts.
#[derive(Debug, Clone)]
pub struct AudioClip {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl AudioClip {
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Total duration in whole milliseconds (truncated).
    pub fn duration_ms(&self) -> u64 {
        self.samples.len() as u64 * 1000 / self.sample_rate as u64
    }

    /// The samples covered by a half-open millisecond interval.
    ///
    /// Sample indices are clamped to the clip length, so an interval whose
    /// end lands past the last full millisecond still yields the trailing
    /// samples instead of panicking.
    pub fn slice(&self, interval: &Interval) -> &[i16] {
        let start = self.sample_index(interval.start_ms);
        let end = if interval.end_ms >= self.duration_ms() {
            self.samples.len()
        } else {
            self.sample_index(interval.end_ms)
        };
        &self.samples[start..end]
    }

    fn sample_index(&self, ms: u64) -> usize {
        let index = (ms * self.sample_rate as u64 / 1000) as usize;
        index.min(self.samples.len())
    }
}
