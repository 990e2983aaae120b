//! Sample type and level conversion helpers

/// Type alias for audio samples. Decoded audio is 32-bit float,
/// nominally in [-1.0, 1.0].
pub type Sample = f32;

/// Convert decibels to a linear gain factor.
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}

/// Convert a linear magnitude to decibels.
///
/// Returns negative infinity for silence.
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    if linear <= 0.0 {
        f32::NEG_INFINITY
    } else {
        20.0 * linear.log10()
    }
}
