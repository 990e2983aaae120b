//! Waveshaping distortion
//!
//! Five transfer functions selected by `DistortionType`. All are pure
//! in `(x, drive)` except glitch, which replaces samples at random and
//! therefore draws from the run's RNG.

use std::f32::consts::FRAC_PI_2;

use rand::Rng;
use ww_core::Sample;

use crate::quantize::quantize_to_bits;
use crate::settings::DistortionType;

/// Reduced headroom ceiling for the band-limited "radio" shape.
const RADIO_CEILING: f32 = 0.7;

/// Per-sample replacement probability contributed by one unit of drive.
const GLITCH_PROBABILITY_PER_DRIVE: f32 = 0.002;

/// Fixed-curve waveshaper.
#[derive(Debug, Clone, Copy)]
pub struct Waveshaper {
    shape: DistortionType,
    drive: f32,
}

impl Waveshaper {
    pub fn new(shape: DistortionType, drive: f32) -> Self {
        Self {
            shape,
            drive: drive.max(0.0),
        }
    }

    /// Whether the shape is a pure function of the input sample.
    pub fn is_deterministic(&self) -> bool {
        self.shape != DistortionType::Glitch
    }

    #[inline]
    pub fn process_sample<R: Rng>(&self, x: Sample, rng: &mut R) -> Sample {
        let d = self.drive;
        match self.shape {
            DistortionType::Digital => (x * d).tanh(),
            DistortionType::Analog => (x * d * FRAC_PI_2).sin(),
            DistortionType::BitCrush => {
                let bits = (16.0 - d).floor().max(1.0) as u8;
                quantize_to_bits(x, bits)
            }
            DistortionType::Radio => {
                (x * d * FRAC_PI_2).sin().clamp(-RADIO_CEILING, RADIO_CEILING)
            }
            DistortionType::Glitch => {
                let p = (d * GLITCH_PROBABILITY_PER_DRIVE).min(1.0);
                if rng.random::<f32>() < p {
                    rng.random_range(-1.0..=1.0)
                } else {
                    x
                }
            }
        }
    }
}
