//! Quality settings and the level resolver
//!
//! A `QualitySettings` value is resolved once per processing run,
//! either from a discrete quality level (1-5) or supplied explicitly
//! by the caller, and stays immutable for the duration of the run.
//! Higher levels are strictly more destructive: stronger compression,
//! fewer amplitude levels, lower target rates, and (from level 4)
//! non-zero waveshaper drive.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Settings domain violations.
#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("quality level {0} is outside the supported range 1-5")]
    LevelOutOfRange(u8),

    #[error("invalid setting: {0}")]
    InvalidSetting(String),
}

/// Waveshaper transfer function selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DistortionType {
    /// Hard symmetric saturation: `tanh(x * d)`.
    Digital,
    /// Softer sine saturation: `sin(x * d * pi/2)`.
    Analog,
    /// Coarse re-quantization to `2^max(1, 16 - d)` levels.
    BitCrush,
    /// Sine nonlinearity clamped to a narrow-band ceiling.
    Radio,
    /// Random per-sample replacement with probability proportional to drive.
    Glitch,
}

/// Parameter set for one degradation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualitySettings {
    // Dynamics compressor
    pub compression_ratio: f32,
    pub threshold_db: f32,
    pub knee_db: f32,
    pub attack_seconds: f32,
    pub release_seconds: f32,

    // Waveshaper; a drive of 0 disables the stage entirely
    pub distortion_amount: f32,
    pub distortion_type: DistortionType,

    // Either, both, or neither may be set
    pub target_bit_depth: Option<u8>,
    pub target_sample_rate: Option<u32>,

    pub output_gain: f32,

    // Additive artifacts, sharing one 1-10 intensity scalar
    pub noise_enabled: bool,
    pub crackle_enabled: bool,
    pub intensity: f32,
}

impl QualitySettings {
    /// Resolve a quality level in 1..=5 to a full parameter set.
    ///
    /// Cannot fail for levels in range; anything else is a caller
    /// contract violation.
    pub fn from_level(level: u8) -> Result<Self, SettingsError> {
        let settings = match level {
            1 => Self {
                compression_ratio: 2.0,
                threshold_db: -16.0,
                knee_db: 12.0,
                attack_seconds: 0.010,
                release_seconds: 0.25,
                distortion_amount: 0.0,
                distortion_type: DistortionType::Digital,
                target_bit_depth: Some(12),
                target_sample_rate: None,
                output_gain: 0.95,
                ..Self::base()
            },
            2 => Self {
                compression_ratio: 3.0,
                threshold_db: -20.0,
                knee_db: 10.0,
                attack_seconds: 0.008,
                release_seconds: 0.20,
                distortion_amount: 0.0,
                distortion_type: DistortionType::Digital,
                target_bit_depth: Some(10),
                target_sample_rate: Some(22050),
                output_gain: 0.9,
                ..Self::base()
            },
            3 => Self {
                compression_ratio: 5.0,
                threshold_db: -24.0,
                knee_db: 8.0,
                attack_seconds: 0.006,
                release_seconds: 0.15,
                distortion_amount: 0.0,
                distortion_type: DistortionType::Digital,
                target_bit_depth: Some(8),
                target_sample_rate: Some(16000),
                output_gain: 0.9,
                ..Self::base()
            },
            4 => Self {
                compression_ratio: 8.0,
                threshold_db: -28.0,
                knee_db: 6.0,
                attack_seconds: 0.004,
                release_seconds: 0.12,
                distortion_amount: 2.5,
                distortion_type: DistortionType::Digital,
                target_bit_depth: Some(6),
                target_sample_rate: Some(11025),
                output_gain: 0.85,
                ..Self::base()
            },
            5 => Self {
                compression_ratio: 12.0,
                threshold_db: -32.0,
                knee_db: 4.0,
                attack_seconds: 0.003,
                release_seconds: 0.10,
                distortion_amount: 5.0,
                distortion_type: DistortionType::Digital,
                target_bit_depth: Some(4),
                target_sample_rate: Some(8000),
                output_gain: 0.8,
                ..Self::base()
            },
            other => return Err(SettingsError::LevelOutOfRange(other)),
        };
        Ok(settings)
    }

    /// Shared preset defaults; noise and crackle are caller opt-ins.
    fn base() -> Self {
        Self {
            compression_ratio: 4.0,
            threshold_db: -20.0,
            knee_db: 6.0,
            attack_seconds: 0.01,
            release_seconds: 0.1,
            distortion_amount: 0.0,
            distortion_type: DistortionType::Digital,
            target_bit_depth: None,
            target_sample_rate: None,
            output_gain: 1.0,
            noise_enabled: false,
            crackle_enabled: false,
            intensity: 5.0,
        }
    }

    /// Validate an explicitly supplied settings object.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.compression_ratio.is_finite() || self.compression_ratio < 1.0 {
            return Err(SettingsError::InvalidSetting(format!(
                "compression ratio must be >= 1, got {}",
                self.compression_ratio
            )));
        }
        if !self.threshold_db.is_finite() || !self.knee_db.is_finite() || self.knee_db < 0.0 {
            return Err(SettingsError::InvalidSetting(
                "threshold must be finite and knee non-negative".to_string(),
            ));
        }
        if self.attack_seconds <= 0.0 || self.release_seconds <= 0.0 {
            return Err(SettingsError::InvalidSetting(
                "attack and release times must be positive".to_string(),
            ));
        }
        if !self.distortion_amount.is_finite() || self.distortion_amount < 0.0 {
            return Err(SettingsError::InvalidSetting(format!(
                "distortion amount must be non-negative, got {}",
                self.distortion_amount
            )));
        }
        if let Some(bits) = self.target_bit_depth {
            if !(1..=16).contains(&bits) {
                return Err(SettingsError::InvalidSetting(format!(
                    "target bit depth must be in 1..=16, got {bits}"
                )));
            }
        }
        if self.target_sample_rate == Some(0) {
            return Err(SettingsError::InvalidSetting(
                "target sample rate must be positive".to_string(),
            ));
        }
        if !self.output_gain.is_finite() || self.output_gain < 0.0 {
            return Err(SettingsError::InvalidSetting(format!(
                "output gain must be non-negative, got {}",
                self.output_gain
            )));
        }
        if !(1.0..=10.0).contains(&self.intensity) {
            return Err(SettingsError::InvalidSetting(format!(
                "intensity must be in 1..=10, got {}",
                self.intensity
            )));
        }
        Ok(())
    }
}

impl Default for QualitySettings {
    fn default() -> Self {
        // Resolver cannot fail for level 3.
        Self::from_level(3).unwrap()
    }
}
