//! ww-dsp: Degradation signal chain for Wavewreck
//!
//! ## Modules
//! - `settings` - Quality settings and the level 1-5 resolver
//! - `dynamics` - Envelope follower and feed-forward soft-knee compressor
//! - `waveshape` - Distortion transfer functions (digital, analog, bit-crush, radio, glitch)
//! - `quantize` - Uniform nearest-level amplitude quantizer
//! - `resample` - Linear-interpolation sample rate conversion
//! - `artifacts` - Additive noise and impulsive crackle injection
//! - `chain` - The ordered, batch-wise signal chain engine

pub mod artifacts;
pub mod chain;
pub mod dynamics;
pub mod quantize;
pub mod resample;
pub mod settings;
pub mod waveshape;
