//! Planar audio buffer
//!
//! One fully-decoded audio signal: a sample rate plus one equal-length
//! sample vector per channel. Buffers are produced whole by the
//! decoder and consumed read-only by the signal chain, which builds a
//! new output buffer rather than mutating its input.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sample::{Sample, linear_to_db};

/// Buffer invariant violations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BufferError {
    #[error("buffer must have at least one channel")]
    NoChannels,

    #[error("sample rate must be positive")]
    ZeroSampleRate,

    #[error("channel {channel} has {actual} frames, expected {expected}")]
    ChannelLengthMismatch {
        channel: usize,
        expected: usize,
        actual: usize,
    },
}

/// Planar, fully-loaded audio buffer.
///
/// Invariants: `sample_rate > 0`, at least one channel, and all
/// channel vectors share the same length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioBuffer {
    /// Samples per second.
    pub sample_rate: u32,
    /// One sample vector per channel, all the same length.
    pub channels: Vec<Vec<Sample>>,
}

impl AudioBuffer {
    /// Create a zero-filled buffer.
    pub fn silent(sample_rate: u32, channel_count: usize, frames: usize) -> Self {
        Self {
            sample_rate,
            channels: vec![vec![0.0; frames]; channel_count],
        }
    }

    /// Build a buffer from planar channel data, checking invariants.
    pub fn from_channels(
        sample_rate: u32,
        channels: Vec<Vec<Sample>>,
    ) -> Result<Self, BufferError> {
        let buffer = Self {
            sample_rate,
            channels,
        };
        buffer.validate()?;
        Ok(buffer)
    }

    /// Check the buffer invariants.
    pub fn validate(&self) -> Result<(), BufferError> {
        if self.sample_rate == 0 {
            return Err(BufferError::ZeroSampleRate);
        }
        let Some(first) = self.channels.first() else {
            return Err(BufferError::NoChannels);
        };
        let expected = first.len();
        for (channel, data) in self.channels.iter().enumerate() {
            if data.len() != expected {
                return Err(BufferError::ChannelLengthMismatch {
                    channel,
                    expected,
                    actual: data.len(),
                });
            }
        }
        Ok(())
    }

    /// Number of channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Frames per channel.
    pub fn frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 {
            0.0
        } else {
            self.frames() as f64 / self.sample_rate as f64
        }
    }

    /// Peak absolute level across all channels (linear).
    pub fn peak(&self) -> Sample {
        self.channels
            .iter()
            .flatten()
            .map(|s| s.abs())
            .fold(0.0, Sample::max)
    }

    /// Peak level in dBFS.
    pub fn peak_db(&self) -> Sample {
        linear_to_db(self.peak())
    }
}
