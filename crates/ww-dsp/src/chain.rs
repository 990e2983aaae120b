//! The degradation signal chain engine
//!
//! Applies the ordered stages over a whole decoded buffer:
//!
//! 1. pre-gain headroom staging
//! 2. dynamics compression (per channel, stateful across batches)
//! 3. waveshaping distortion
//! 4. amplitude level quantization
//! 5. sample rate reduction (the only stage changing the frame count)
//! 6. additive noise
//! 7. crackle injection
//! 8. output gain and hard clamp
//!
//! The buffer is walked in fixed-size frame batches purely so the
//! caller can observe fractional progress between batches; batch
//! boundaries never affect the output. Each chain value owns its own
//! compressor state and RNG, so concurrent runs cannot interfere.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use ww_core::AudioBuffer;

use crate::artifacts::{CrackleInjector, NoiseInjector};
use crate::dynamics::Compressor;
use crate::quantize::quantize_to_bits;
use crate::resample::resample_linear;
use crate::settings::QualitySettings;
use crate::waveshape::Waveshaper;

/// Tuning knobs that are properties of the engine, not of a quality
/// preset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Frames per progress batch.
    pub batch_frames: usize,
    /// Fixed headroom gain applied before compression.
    pub pre_gain: f32,
    /// Noise amplitude contributed per unit of intensity.
    pub noise_scale: f32,
    /// Crackle probability contributed per unit of intensity.
    pub crackle_base_probability: f32,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            batch_frames: 4096,
            pre_gain: 0.85,
            noise_scale: 0.1,
            crackle_base_probability: 0.001,
        }
    }
}

/// One run's worth of signal chain state.
pub struct SignalChain {
    settings: QualitySettings,
    config: ChainConfig,
    compressors: Vec<Compressor>,
    waveshaper: Option<Waveshaper>,
    noise: Option<NoiseInjector>,
    crackle: Option<CrackleInjector>,
    rng: ChaCha8Rng,
}

impl SignalChain {
    /// Build a chain with a freshly seeded random source.
    pub fn new(
        settings: QualitySettings,
        config: ChainConfig,
        channel_count: usize,
        sample_rate: u32,
    ) -> Self {
        let rng = ChaCha8Rng::from_os_rng();
        Self::with_rng(settings, config, channel_count, sample_rate, rng)
    }

    /// Build a chain with a deterministic seed for the randomized
    /// stages (noise, crackle, glitch).
    pub fn with_seed(
        settings: QualitySettings,
        config: ChainConfig,
        channel_count: usize,
        sample_rate: u32,
        seed: u64,
    ) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(seed);
        Self::with_rng(settings, config, channel_count, sample_rate, rng)
    }

    fn with_rng(
        settings: QualitySettings,
        config: ChainConfig,
        channel_count: usize,
        sample_rate: u32,
        rng: ChaCha8Rng,
    ) -> Self {
        let compressors = (0..channel_count)
            .map(|_| {
                let mut comp = Compressor::new(sample_rate);
                comp.set_threshold(settings.threshold_db);
                comp.set_ratio(settings.compression_ratio);
                comp.set_knee(settings.knee_db);
                comp.set_times(settings.attack_seconds, settings.release_seconds);
                comp
            })
            .collect();

        let waveshaper = (settings.distortion_amount > 0.0)
            .then(|| Waveshaper::new(settings.distortion_type, settings.distortion_amount));
        let noise = settings
            .noise_enabled
            .then(|| NoiseInjector::new(config.noise_scale, settings.intensity));
        let crackle = settings
            .crackle_enabled
            .then(|| CrackleInjector::new(config.crackle_base_probability, settings.intensity));

        Self {
            settings,
            config,
            compressors,
            waveshaper,
            noise,
            crackle,
            rng,
        }
    }

    /// Run the full chain over `input`, producing a new buffer.
    ///
    /// `on_progress` receives a non-decreasing fraction in [0, 1],
    /// once per batch and a final 1.0. The input is never mutated.
    pub fn process(
        &mut self,
        input: &AudioBuffer,
        mut on_progress: impl FnMut(f64),
    ) -> AudioBuffer {
        let frames = input.frames();
        let channel_count = input.channel_count();
        debug_assert_eq!(channel_count, self.compressors.len());

        if frames == 0 {
            on_progress(1.0);
            return input.clone();
        }

        let resample_to = self
            .settings
            .target_sample_rate
            .filter(|&rate| rate != input.sample_rate);

        // Work estimate: one per-sample pass before resampling, one after.
        let post_frames = match resample_to {
            Some(rate) => {
                (frames as f64 * rate as f64 / input.sample_rate as f64).ceil() as usize
            }
            None => frames,
        };
        let total_work = (frames + post_frames) as f64;
        let mut work_done = 0usize;

        // Stages 1-4 over the input frame count.
        let mut shaped = AudioBuffer::silent(input.sample_rate, channel_count, frames);
        let batch = self.config.batch_frames.max(1);
        let mut start = 0;
        while start < frames {
            let end = (start + batch).min(frames);
            for ch in 0..channel_count {
                let comp = &mut self.compressors[ch];
                let source = &input.channels[ch];
                let dest = &mut shaped.channels[ch];
                for i in start..end {
                    let mut s = source[i] * self.config.pre_gain;
                    s = comp.process_sample(s);
                    if let Some(shaper) = &self.waveshaper {
                        s = shaper.process_sample(s, &mut self.rng);
                    }
                    if let Some(bits) = self.settings.target_bit_depth {
                        s = quantize_to_bits(s, bits);
                    }
                    dest[i] = s;
                }
            }
            work_done += end - start;
            on_progress(work_done as f64 / total_work);
            start = end;
        }

        // Stage 5.
        let mut output = match resample_to {
            Some(rate) => {
                log::debug!("resampling {} Hz -> {} Hz", input.sample_rate, rate);
                resample_linear(&shaped, rate)
            }
            None => shaped,
        };

        // Stages 6-8 over the (possibly new) frame count.
        let out_frames = output.frames();
        let mut start = 0;
        while start < out_frames {
            let end = (start + batch).min(out_frames);
            for channel in output.channels.iter_mut() {
                for s in &mut channel[start..end] {
                    if let Some(noise) = &self.noise {
                        *s = noise.process_sample(*s, &mut self.rng);
                    }
                    if let Some(crackle) = &self.crackle {
                        *s = crackle.process_sample(*s, &mut self.rng);
                    }
                    *s = (*s * self.settings.output_gain).clamp(-1.0, 1.0);
                }
            }
            work_done += end - start;
            on_progress(work_done as f64 / total_work);
            start = end;
        }

        on_progress(1.0);
        output
    }

    /// Whether the configured stages draw from the random source.
    pub fn is_deterministic(&self) -> bool {
        !self.settings.noise_enabled
            && !self.settings.crackle_enabled
            && self.waveshaper.is_none_or(|w| w.is_deterministic())
    }
}
