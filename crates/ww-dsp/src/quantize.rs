//! Uniform amplitude quantization
//!
//! Remaps a sample to the nearest of `2^bits` evenly spaced levels
//! spanning [-1, 1] inclusive. No dithering: the stepping noise is the
//! point. Already-quantized levels are fixed points, so applying the
//! quantizer twice equals applying it once.

use ww_core::Sample;

/// Quantize one sample to `2^bits` levels. Bit depths outside 1..=16
/// are clamped into range. Ties round toward positive.
#[inline]
pub fn quantize_to_bits(x: Sample, bits: u8) -> Sample {
    let bits = bits.clamp(1, 16);
    let max_index = ((1u32 << bits) - 1) as f32;
    // The operand is non-negative, so round() half-away-from-zero is
    // exactly round-half-up here.
    let index = ((x + 1.0) / 2.0 * max_index).round().clamp(0.0, max_index);
    -1.0 + 2.0 * index / max_index
}
