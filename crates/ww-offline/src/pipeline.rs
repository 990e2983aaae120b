//! Pipeline orchestration
//!
//! The processing entry point: encoded bytes in, canonical WAV bytes
//! out. One call is one run; it owns its buffers, compressor state,
//! and random source exclusively, occupies the calling thread for its
//! full duration, and cannot be cancelled mid-run (abandon the result
//! instead).

use ww_dsp::chain::SignalChain;
use ww_dsp::settings::QualitySettings;

use crate::config::PipelineConfig;
use crate::decoder::AudioDecoder;
use crate::encoder::WavEncoder;
use crate::error::{PipelineError, PipelineResult};
use crate::progress::ProgressReporter;

/// Percentage reported once decoding finishes.
const DECODE_PERCENT: f64 = 5.0;
/// Percentage span the signal chain's batches interpolate across.
const CHAIN_SPAN_PERCENT: f64 = 90.0;

/// Quality selection for one run: a discrete level or explicit settings.
#[derive(Debug, Clone)]
pub enum SettingsSource {
    /// Quality level in 1..=5, resolved by the settings resolver.
    Level(u8),
    /// Caller-supplied settings, validated before use.
    Custom(QualitySettings),
}

impl SettingsSource {
    fn resolve(self) -> PipelineResult<QualitySettings> {
        match self {
            SettingsSource::Level(level) => Ok(QualitySettings::from_level(level)?),
            SettingsSource::Custom(settings) => {
                settings.validate()?;
                Ok(settings)
            }
        }
    }
}

/// Offline degradation pipeline: decode → signal chain → encode.
pub struct DegradePipeline {
    config: PipelineConfig,
    seed: Option<u64>,
}

impl DegradePipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config, seed: None }
    }

    /// Fix the seed of every run's random source, making the
    /// randomized stages (noise, crackle, glitch) reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Process one encoded input end to end.
    ///
    /// `extension_hint` is the declared input type (file extension),
    /// used to gate obviously non-audio inputs and to steer format
    /// probing. `on_progress` observes a monotonic 0→100 percentage:
    /// 0 at start, 5 after decode, batch-interpolated up to 95 during
    /// the chain, 100 on completion.
    pub fn process(
        &self,
        input: &[u8],
        extension_hint: Option<&str>,
        settings: SettingsSource,
        on_progress: impl FnMut(f64),
    ) -> PipelineResult<Vec<u8>> {
        let mut progress = ProgressReporter::new(on_progress);
        progress.report(0.0);

        self.validate_input(input, extension_hint)?;
        let settings = settings.resolve()?;

        let decoded = AudioDecoder::decode_bytes(input, extension_hint)?;
        progress.report(DECODE_PERCENT);
        log::info!(
            "processing {} ch x {} frames @ {} Hz",
            decoded.channel_count(),
            decoded.frames(),
            decoded.sample_rate
        );

        let mut chain = match self.seed {
            Some(seed) => SignalChain::with_seed(
                settings,
                self.config.chain.clone(),
                decoded.channel_count(),
                decoded.sample_rate,
                seed,
            ),
            None => SignalChain::new(
                settings,
                self.config.chain.clone(),
                decoded.channel_count(),
                decoded.sample_rate,
            ),
        };

        let processed = chain.process(&decoded, |fraction| {
            progress.report(DECODE_PERCENT + fraction * CHAIN_SPAN_PERCENT);
        });

        let encoded = WavEncoder::encode(&processed)?;
        progress.report(100.0);
        log::info!(
            "encoded {} bytes ({:.2}s of 16-bit PCM)",
            encoded.len(),
            processed.duration()
        );
        Ok(encoded)
    }

    fn validate_input(&self, input: &[u8], extension_hint: Option<&str>) -> PipelineResult<()> {
        if input.is_empty() {
            return Err(PipelineError::InvalidInput("input is empty".to_string()));
        }
        if input.len() > self.config.max_input_bytes {
            return Err(PipelineError::InvalidInput(format!(
                "input is {} bytes, limit is {}",
                input.len(),
                self.config.max_input_bytes
            )));
        }
        if let Some(ext) = extension_hint {
            if !AudioDecoder::is_supported_extension(ext) {
                return Err(PipelineError::InvalidInput(format!(
                    "'{ext}' is not a supported audio type"
                )));
            }
        }
        Ok(())
    }
}

impl Default for DegradePipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_rejected() {
        let pipeline = DegradePipeline::default();
        let err = pipeline
            .process(&[], None, SettingsSource::Level(3), |_| {})
            .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidInput(_)));
    }

    #[test]
    fn test_oversized_input_rejected() {
        let pipeline =
            DegradePipeline::new(PipelineConfig::default().with_max_input_bytes(16));
        let err = pipeline
            .process(&[0u8; 17], Some("wav"), SettingsSource::Level(3), |_| {})
            .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidInput(_)));
    }

    #[test]
    fn test_non_audio_extension_rejected() {
        let pipeline = DegradePipeline::default();
        let err = pipeline
            .process(&[0u8; 64], Some("pdf"), SettingsSource::Level(3), |_| {})
            .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidInput(_)));
    }

    #[test]
    fn test_out_of_range_level_rejected() {
        let pipeline = DegradePipeline::default();
        let err = pipeline
            .process(&[0u8; 64], Some("wav"), SettingsSource::Level(9), |_| {})
            .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidParameter(_)));
    }

    #[test]
    fn test_invalid_custom_settings_rejected() {
        let pipeline = DegradePipeline::default();
        let mut settings = QualitySettings::default();
        settings.intensity = 0.0;
        let err = pipeline
            .process(
                &[0u8; 64],
                Some("wav"),
                SettingsSource::Custom(settings),
                |_| {},
            )
            .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidParameter(_)));
    }
}
