//! ww-offline — Offline audio degradation pipeline
//!
//! Decodes an encoded audio stream, runs it through the Wavewreck
//! degradation chain, and packages the result as a playable 16-bit
//! PCM WAV file, reporting progress along the way.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      DegradePipeline                         │
//! │                                                              │
//! │  ┌─────────┐   ┌───────────────┐   ┌───────────┐             │
//! │  │ Decoder │ → │ Signal Chain  │ → │  Encoder  │ → bytes     │
//! │  │(symphonia)  │ (ww-dsp)      │   │  (WAV)    │             │
//! │  └─────────┘   └───────────────┘   └───────────┘             │
//! │        │               │                 │                   │
//! │        └──────── ProgressReporter (0→100) ┘                  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ww_offline::{DegradePipeline, SettingsSource};
//!
//! let pipeline = DegradePipeline::default();
//! let wav = pipeline.process(
//!     &input_bytes,
//!     Some("mp3"),
//!     SettingsSource::Level(4),
//!     |percent| eprintln!("{percent:.0}%"),
//! )?;
//! ```

mod config;
mod decoder;
mod encoder;
mod error;
mod pipeline;
mod progress;

pub use config::*;
pub use decoder::*;
pub use encoder::*;
pub use error::*;
pub use pipeline::*;
pub use progress::*;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
