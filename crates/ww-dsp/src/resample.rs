//! Sample rate conversion
//!
//! Linear-interpolation resampling over planar channels. This is the
//! only stage in the chain that changes the frame count; the new
//! length is `ceil(frames * target / source)`.

use ww_core::AudioBuffer;

/// Resample a buffer to `target_rate` with linear interpolation.
///
/// Returns a clone when the rates already match.
pub fn resample_linear(buffer: &AudioBuffer, target_rate: u32) -> AudioBuffer {
    if buffer.sample_rate == target_rate || buffer.frames() == 0 {
        let mut out = buffer.clone();
        out.sample_rate = target_rate;
        return out;
    }

    let ratio = target_rate as f64 / buffer.sample_rate as f64;
    let frames = buffer.frames();
    let new_frames = (frames as f64 * ratio).ceil() as usize;
    let last = frames - 1;

    let channels = buffer
        .channels
        .iter()
        .map(|channel| {
            let mut resampled = Vec::with_capacity(new_frames);
            for frame in 0..new_frames {
                let src_pos = frame as f64 / ratio;
                let src_frame = (src_pos.floor() as usize).min(last);
                let frac = (src_pos - src_frame as f64) as f32;

                let s0 = channel[src_frame];
                let s1 = channel[(src_frame + 1).min(last)];
                resampled.push(s0 + (s1 - s0) * frac);
            }
            resampled
        })
        .collect();

    AudioBuffer {
        sample_rate: target_rate,
        channels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(sample_rate: u32, frames: usize) -> AudioBuffer {
        AudioBuffer {
            sample_rate,
            channels: vec![(0..frames).map(|i| i as f32 / frames as f32).collect()],
        }
    }

    #[test]
    fn test_same_rate_is_identity() {
        let buffer = ramp(44100, 1000);
        let out = resample_linear(&buffer, 44100);
        assert_eq!(out, buffer);
    }

    #[test]
    fn test_frame_count_scales_with_ratio() {
        let buffer = ramp(44100, 44100);
        let half = resample_linear(&buffer, 22050);
        assert_eq!(half.sample_rate, 22050);
        assert_eq!(half.frames(), 22050);

        let odd = resample_linear(&buffer, 16000);
        assert_eq!(odd.frames(), 16000);
        assert!((odd.duration() - buffer.duration()).abs() < 1e-3);
    }

    #[test]
    fn test_constant_signal_survives_resampling() {
        let buffer = AudioBuffer {
            sample_rate: 48000,
            channels: vec![vec![0.25; 4800], vec![0.25; 4800]],
        };
        let out = resample_linear(&buffer, 8000);
        assert_eq!(out.channel_count(), 2);
        for channel in &out.channels {
            assert!(channel.iter().all(|&s| (s - 0.25).abs() < 1e-6));
        }
    }

    #[test]
    fn test_interpolation_stays_between_neighbours() {
        let buffer = ramp(44100, 441);
        let out = resample_linear(&buffer, 30000);
        for window in out.channels[0].windows(2) {
            assert!(window[1] >= window[0] - 1e-6, "ramp must stay monotonic");
        }
        assert!(out.peak() <= 1.0);
    }
}
