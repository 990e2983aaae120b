//! Error types for the degradation pipeline

use thiserror::Error;
use ww_core::BufferError;
use ww_dsp::settings::SettingsError;

/// Pipeline errors. None of these are retried internally; every
/// failure surfaces to the caller of [`crate::DegradePipeline::process`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Missing, empty, oversized, or non-audio input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The decoder recognized no supported container or codec.
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),

    /// The input claimed a supported format but could not be parsed.
    #[error("corrupt audio data: {0}")]
    DecodeFailed(String),

    /// Quality level or explicit settings outside the supported domain.
    #[error("invalid parameter: {0}")]
    InvalidParameter(#[from] SettingsError),

    /// Unexpected failure inside the signal chain. Defensive; no stage
    /// is expected to fail on a valid buffer.
    #[error("processing failed: {0}")]
    ProcessingFailed(String),

    /// Output container serialization failure. Defensive; the encoder
    /// accepts every buffer satisfying the shape invariants.
    #[error("encoding failed: {0}")]
    EncodingFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<BufferError> for PipelineError {
    fn from(err: BufferError) -> Self {
        PipelineError::ProcessingFailed(err.to_string())
    }
}

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
