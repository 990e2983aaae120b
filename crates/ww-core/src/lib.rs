//! ww-core: Shared types for Wavewreck
//!
//! Foundational types used across the Wavewreck crates: the sample
//! type, level conversion helpers, and the planar audio buffer.

mod buffer;
mod sample;

pub use buffer::*;
pub use sample::*;
