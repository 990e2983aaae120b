//! Additive artifact stages: noise and crackle
//!
//! Noise adds a uniform random offset to every sample; crackle
//! replaces individual samples outright, modelling transient impulsive
//! damage rather than a smooth envelope. Both scale with the shared
//! 1-10 intensity.

use rand::Rng;
use ww_core::Sample;

/// Uniform additive noise: `x + uniform(-0.5, 0.5) * noise_scale * intensity`.
#[derive(Debug, Clone, Copy)]
pub struct NoiseInjector {
    amplitude: f32,
}

impl NoiseInjector {
    pub fn new(noise_scale: f32, intensity: f32) -> Self {
        Self {
            amplitude: noise_scale.max(0.0) * intensity.max(0.0),
        }
    }

    #[inline]
    pub fn process_sample<R: Rng>(&self, x: Sample, rng: &mut R) -> Sample {
        x + (rng.random::<f32>() - 0.5) * self.amplitude
    }
}

/// Impulsive crackle: with probability `base_probability * intensity`,
/// replace the sample with a uniform random value in [-1, 1].
#[derive(Debug, Clone, Copy)]
pub struct CrackleInjector {
    probability: f32,
}

impl CrackleInjector {
    pub fn new(base_probability: f32, intensity: f32) -> Self {
        Self {
            probability: (base_probability.max(0.0) * intensity.max(0.0)).min(1.0),
        }
    }

    /// Configured per-sample replacement probability.
    pub fn probability(&self) -> f32 {
        self.probability
    }

    #[inline]
    pub fn process_sample<R: Rng>(&self, x: Sample, rng: &mut R) -> Sample {
        if rng.random::<f32>() < self.probability {
            rng.random_range(-1.0..=1.0)
        } else {
            x
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn test_noise_offset_is_bounded() {
        let noise = NoiseInjector::new(0.1, 10.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..10_000 {
            let out = noise.process_sample(0.0, &mut rng);
            assert!(out.abs() <= 0.5, "offset exceeded half the amplitude: {out}");
        }
    }

    #[test]
    fn test_noise_offset_is_roughly_centered() {
        let noise = NoiseInjector::new(0.1, 5.0);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let n = 100_000;
        let mean: f64 = (0..n)
            .map(|_| noise.process_sample(0.0, &mut rng) as f64)
            .sum::<f64>()
            / n as f64;
        assert!(mean.abs() < 0.005, "uniform noise should average near zero");
    }

    #[test]
    fn test_crackle_rate_matches_configuration() {
        // intensity 10 -> p = 0.01
        let crackle = CrackleInjector::new(0.001, 10.0);
        assert!((crackle.probability() - 0.01).abs() < 1e-7);

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let total = 1_000_000;
        let replaced = (0..total)
            .filter(|_| crackle.process_sample(0.123, &mut rng) != 0.123)
            .count();
        let rate = replaced as f64 / total as f64;
        assert!(
            (rate - 0.01).abs() < 0.001,
            "expected ~1% of samples replaced, got {rate}"
        );
    }

    #[test]
    fn test_crackle_probability_saturates_at_one() {
        let crackle = CrackleInjector::new(0.5, 10.0);
        assert_eq!(crackle.probability(), 1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let out = crackle.process_sample(0.123, &mut rng);
        assert!((-1.0..=1.0).contains(&out));
    }
}
