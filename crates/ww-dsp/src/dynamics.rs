//! Dynamics processing: envelope follower and compressor
//!
//! A simplified feed-forward compressor with soft knee. The envelope
//! follower carries its smoothing state across every call, so
//! splitting a buffer into batches has no effect on the output.

use ww_core::{Sample, db_to_linear, linear_to_db};

/// Exponential attack/release envelope follower.
#[derive(Debug, Clone)]
pub struct EnvelopeFollower {
    attack_coeff: f32,
    release_coeff: f32,
    envelope: f32,
    sample_rate: f32,
}

impl EnvelopeFollower {
    pub fn new(sample_rate: f32) -> Self {
        let mut follower = Self {
            attack_coeff: 0.0,
            release_coeff: 0.0,
            envelope: 0.0,
            sample_rate,
        };
        follower.set_times(0.010, 0.100);
        follower
    }

    /// Set attack and release time constants in seconds.
    pub fn set_times(&mut self, attack_seconds: f32, release_seconds: f32) {
        let attack = attack_seconds.max(1e-5);
        let release = release_seconds.max(1e-5);
        self.attack_coeff = (-1.0 / (attack * self.sample_rate)).exp();
        self.release_coeff = (-1.0 / (release * self.sample_rate)).exp();
    }

    #[inline]
    pub fn process(&mut self, input: Sample) -> f32 {
        let abs_input = input.abs();
        let coeff = if abs_input > self.envelope {
            self.attack_coeff
        } else {
            self.release_coeff
        };
        self.envelope = abs_input + coeff * (self.envelope - abs_input);
        self.envelope
    }

    pub fn reset(&mut self) {
        self.envelope = 0.0;
    }

    pub fn current(&self) -> f32 {
        self.envelope
    }
}

/// Feed-forward soft-knee compressor.
#[derive(Debug, Clone)]
pub struct Compressor {
    threshold_db: f32,
    ratio: f32,
    knee_db: f32,

    envelope: EnvelopeFollower,
    gain_reduction_db: f32,
}

impl Compressor {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            threshold_db: -20.0,
            ratio: 4.0,
            knee_db: 6.0,
            envelope: EnvelopeFollower::new(sample_rate as f32),
            gain_reduction_db: 0.0,
        }
    }

    pub fn set_threshold(&mut self, db: f32) {
        self.threshold_db = db.clamp(-60.0, 0.0);
    }

    pub fn set_ratio(&mut self, ratio: f32) {
        self.ratio = ratio.clamp(1.0, 100.0);
    }

    pub fn set_knee(&mut self, db: f32) {
        self.knee_db = db.clamp(0.0, 24.0);
    }

    pub fn set_times(&mut self, attack_seconds: f32, release_seconds: f32) {
        self.envelope.set_times(attack_seconds, release_seconds);
    }

    /// Current gain reduction in dB.
    pub fn gain_reduction_db(&self) -> f32 {
        self.gain_reduction_db
    }

    /// Gain reduction for a detector level, softened over the knee.
    #[inline]
    fn calculate_gain_reduction(&self, input_db: f32) -> f32 {
        let slope = 1.0 - 1.0 / self.ratio;
        if self.knee_db <= 0.0 {
            return if input_db > self.threshold_db {
                (input_db - self.threshold_db) * slope
            } else {
                0.0
            };
        }

        let half_knee = self.knee_db / 2.0;
        let knee_start = self.threshold_db - half_knee;
        let knee_end = self.threshold_db + half_knee;

        if input_db < knee_start {
            0.0
        } else if input_db > knee_end {
            (input_db - self.threshold_db) * slope
        } else {
            let x = input_db - knee_start;
            (slope * x * x) / (2.0 * self.knee_db)
        }
    }

    #[inline]
    pub fn process_sample(&mut self, input: Sample) -> Sample {
        let envelope = self.envelope.process(input);

        if envelope < 1e-10 {
            return input;
        }

        let env_db = linear_to_db(envelope);
        let gr_db = self.calculate_gain_reduction(env_db);
        self.gain_reduction_db = gr_db;

        input * db_to_linear(-gr_db)
    }

    pub fn reset(&mut self) {
        self.envelope.reset();
        self.gain_reduction_db = 0.0;
    }
}
