//! WAV encoding
//!
//! Serializes a processed buffer into the canonical uncompressed
//! RIFF/WAVE layout: 44-byte header, PCM format tag, 16 bits per
//! sample, interleaved frame-major little-endian data. Samples are
//! written as `round(clamp(x, -1, 1) * 32767)`.

use std::io::Cursor;

use ww_core::AudioBuffer;

use crate::error::{PipelineError, PipelineResult};

/// 16-bit PCM WAV encoder adapter.
pub struct WavEncoder;

impl WavEncoder {
    /// Bits per sample in the output container.
    pub const BIT_DEPTH: u16 = 16;

    /// Encode a buffer into complete WAV file bytes.
    ///
    /// Does not fail for any buffer satisfying the shape invariants;
    /// writer errors are surfaced defensively as `EncodingFailed`.
    pub fn encode(buffer: &AudioBuffer) -> PipelineResult<Vec<u8>> {
        buffer.validate()?;

        let spec = hound::WavSpec {
            channels: buffer.channel_count() as u16,
            sample_rate: buffer.sample_rate,
            bits_per_sample: Self::BIT_DEPTH,
            sample_format: hound::SampleFormat::Int,
        };

        let mut output = Vec::new();
        let cursor = Cursor::new(&mut output);
        let mut writer = hound::WavWriter::new(cursor, spec)
            .map_err(|e| PipelineError::EncodingFailed(e.to_string()))?;

        let frames = buffer.frames();
        for frame in 0..frames {
            for channel in &buffer.channels {
                let sample = (channel[frame].clamp(-1.0, 1.0) * 32767.0).round() as i16;
                writer
                    .write_sample(sample)
                    .map_err(|e| PipelineError::EncodingFailed(e.to_string()))?;
            }
        }

        writer
            .finalize()
            .map_err(|e| PipelineError::EncodingFailed(e.to_string()))?;

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u16_at(bytes: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
    }

    fn u32_at(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes([
            bytes[offset],
            bytes[offset + 1],
            bytes[offset + 2],
            bytes[offset + 3],
        ])
    }

    #[test]
    fn test_header_layout_is_canonical() {
        let buffer = AudioBuffer {
            sample_rate: 44100,
            channels: vec![vec![0.0; 100], vec![0.0; 100]],
        };
        let bytes = WavEncoder::encode(&buffer).unwrap();

        let data_len = 100 * 2 * 2;
        assert_eq!(bytes.len(), 44 + data_len);
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(u32_at(&bytes, 4), 36 + data_len as u32);
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[12..16], b"fmt ");
        assert_eq!(u32_at(&bytes, 16), 16);
        assert_eq!(u16_at(&bytes, 20), 1); // PCM
        assert_eq!(u16_at(&bytes, 22), 2); // channels
        assert_eq!(u32_at(&bytes, 24), 44100);
        assert_eq!(u32_at(&bytes, 28), 44100 * 2 * 2); // byte rate
        assert_eq!(u16_at(&bytes, 32), 4); // block align
        assert_eq!(u16_at(&bytes, 34), 16); // bits per sample
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(u32_at(&bytes, 40), data_len as u32);
    }

    #[test]
    fn test_sample_scaling_rounds_and_clamps() {
        let buffer = AudioBuffer {
            sample_rate: 8000,
            channels: vec![vec![1.0, -1.0, 0.5, 2.0, -3.0]],
        };
        let bytes = WavEncoder::encode(&buffer).unwrap();
        let data = &bytes[44..];
        let sample =
            |i: usize| i16::from_le_bytes([data[2 * i], data[2 * i + 1]]);
        assert_eq!(sample(0), 32767);
        assert_eq!(sample(1), -32767);
        assert_eq!(sample(2), 16384); // round(0.5 * 32767) = round(16383.5)
        assert_eq!(sample(3), 32767); // clamped
        assert_eq!(sample(4), -32767); // clamped
    }

    #[test]
    fn test_interleaving_is_frame_major() {
        let buffer = AudioBuffer {
            sample_rate: 8000,
            channels: vec![vec![0.25, 0.5], vec![-0.25, -0.5]],
        };
        let bytes = WavEncoder::encode(&buffer).unwrap();
        let data = &bytes[44..];
        let sample =
            |i: usize| i16::from_le_bytes([data[2 * i], data[2 * i + 1]]);
        // L0 R0 L1 R1
        assert_eq!(sample(0), 8192);
        assert_eq!(sample(1), -8192);
        assert_eq!(sample(2), 16384);
        assert_eq!(sample(3), -16384);
    }

    #[test]
    fn test_round_trip_through_hound() {
        let buffer = AudioBuffer {
            sample_rate: 22050,
            channels: vec![
                (0..500).map(|i| (i as f32 / 500.0) * 0.9 - 0.45).collect(),
                (0..500).map(|i| ((i as f32) * 0.1).sin() * 0.8).collect(),
            ],
        };
        let bytes = WavEncoder::encode(&buffer).unwrap();

        let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.sample_rate, 22050);
        assert_eq!(spec.channels, 2);
        assert_eq!(spec.bits_per_sample, 16);

        let samples: Vec<i16> = reader.into_samples().map(Result::unwrap).collect();
        assert_eq!(samples.len(), 1000);
        for frame in 0..500 {
            for ch in 0..2 {
                let decoded = samples[frame * 2 + ch] as f32 / 32767.0;
                let original = buffer.channels[ch][frame];
                assert!(
                    (decoded - original).abs() <= 1.0 / 32767.0,
                    "frame {frame} ch {ch}: {decoded} vs {original}"
                );
            }
        }
    }

    #[test]
    fn test_invalid_buffer_is_rejected() {
        let buffer = AudioBuffer {
            sample_rate: 44100,
            channels: vec![vec![0.0; 10], vec![0.0; 9]],
        };
        assert!(WavEncoder::encode(&buffer).is_err());
    }
}
