//! Pipeline configuration

use serde::{Deserialize, Serialize};
use ww_dsp::chain::ChainConfig;

/// Configuration for the degradation pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum accepted input size in bytes.
    pub max_input_bytes: usize,

    /// Engine tuning (batch size, pre-gain, artifact scales).
    pub chain: ChainConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: 256 * 1024 * 1024,
            chain: ChainConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Set the input size cap.
    pub fn with_max_input_bytes(mut self, bytes: usize) -> Self {
        self.max_input_bytes = bytes;
        self
    }

    /// Set the progress batch size in frames.
    pub fn with_batch_frames(mut self, frames: usize) -> Self {
        self.chain.batch_frames = frames;
        self
    }
}
