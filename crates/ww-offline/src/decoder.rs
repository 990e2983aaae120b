//! Audio decoding
//!
//! Symphonia-backed decoder adapter: an opaque encoded byte stream in,
//! a planar [`AudioBuffer`] out. Container/codec support is whatever
//! the enabled symphonia features provide (WAV, FLAC, MP3, OGG/Vorbis,
//! AAC, M4A, AIFF, ALAC).

use std::io::Cursor;

use symphonia::core::audio::AudioBufferRef;
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use ww_core::AudioBuffer;

use crate::error::{PipelineError, PipelineResult};

/// Universal audio decoder over in-memory bytes.
pub struct AudioDecoder;

impl AudioDecoder {
    /// Extensions the decoder accepts as declared input types.
    pub fn supported_formats() -> &'static [&'static str] {
        &["wav", "flac", "mp3", "ogg", "aac", "m4a", "aiff", "alac"]
    }

    /// Whether a declared file extension names a supported audio type.
    pub fn is_supported_extension(extension: &str) -> bool {
        let lower = extension.to_ascii_lowercase();
        Self::supported_formats().contains(&lower.as_str())
    }

    /// Decode an encoded byte stream into a planar buffer.
    pub fn decode_bytes(
        data: &[u8],
        extension_hint: Option<&str>,
    ) -> PipelineResult<AudioBuffer> {
        let mss = MediaSourceStream::new(Box::new(Cursor::new(data.to_vec())), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = extension_hint {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(map_probe_error)?;

        let mut format = probed.format;

        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| PipelineError::DecodeFailed("no audio track found".to_string()))?;

        let track_id = track.id;
        let codec_params = track.codec_params.clone();
        let sample_rate = codec_params.sample_rate.unwrap_or(44100);

        let mut decoder = symphonia::default::get_codecs()
            .make(&codec_params, &DecoderOptions::default())
            .map_err(map_probe_error)?;

        let mut channel_data: Vec<Vec<f32>> = Vec::new();

        loop {
            match format.next_packet() {
                Ok(packet) => {
                    if packet.track_id() != track_id {
                        continue;
                    }
                    match decoder.decode(&packet) {
                        Ok(decoded) => {
                            if channel_data.is_empty() {
                                let channels = decoded.spec().channels.count();
                                channel_data = vec![Vec::new(); channels.max(1)];
                            }
                            append_planar(&decoded, &mut channel_data);
                        }
                        Err(SymphoniaError::DecodeError(err)) => {
                            // Bad packet inside an otherwise decodable
                            // stream; skip it like the probe tools do.
                            log::warn!("skipping undecodable packet: {err}");
                        }
                        Err(err) => {
                            return Err(PipelineError::DecodeFailed(err.to_string()));
                        }
                    }
                }
                Err(SymphoniaError::IoError(ref err))
                    if err.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(err) => {
                    return Err(PipelineError::DecodeFailed(err.to_string()));
                }
            }
        }

        // A short final packet can leave channels ragged by a frame.
        let min_frames = channel_data.iter().map(Vec::len).min().unwrap_or(0);
        if min_frames == 0 {
            return Err(PipelineError::DecodeFailed(
                "stream contained no decodable audio frames".to_string(),
            ));
        }
        for channel in &mut channel_data {
            channel.truncate(min_frames);
        }

        let buffer = AudioBuffer::from_channels(sample_rate, channel_data)?;
        log::debug!(
            "decoded {} ch x {} frames @ {} Hz ({:.2}s)",
            buffer.channel_count(),
            buffer.frames(),
            buffer.sample_rate,
            buffer.duration()
        );
        Ok(buffer)
    }

    /// Read stream parameters without decoding the audio payload.
    pub fn probe_bytes(
        data: &[u8],
        extension_hint: Option<&str>,
    ) -> PipelineResult<AudioStreamInfo> {
        let mss = MediaSourceStream::new(Box::new(Cursor::new(data.to_vec())), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = extension_hint {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(map_probe_error)?;

        let format = probed.format;
        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| PipelineError::DecodeFailed("no audio track found".to_string()))?;

        let codec_params = &track.codec_params;
        let sample_rate = codec_params.sample_rate.unwrap_or(44100);
        let channels = codec_params.channels.map(|c| c.count()).unwrap_or(2);
        let frames = codec_params.n_frames.unwrap_or(0);

        Ok(AudioStreamInfo {
            sample_rate,
            channels,
            frames,
            duration_seconds: frames as f64 / sample_rate as f64,
        })
    }
}

/// Stream parameters reported by [`AudioDecoder::probe_bytes`].
#[derive(Debug, Clone)]
pub struct AudioStreamInfo {
    pub sample_rate: u32,
    pub channels: usize,
    pub frames: u64,
    pub duration_seconds: f64,
}

fn map_probe_error(err: SymphoniaError) -> PipelineError {
    match err {
        SymphoniaError::Unsupported(what) => PipelineError::UnsupportedFormat(what.to_string()),
        other => PipelineError::DecodeFailed(other.to_string()),
    }
}

/// Append one decoded packet's samples to the planar accumulator,
/// converting to f32 in [-1, 1].
fn append_planar(decoded: &AudioBufferRef<'_>, out: &mut [Vec<f32>]) {
    macro_rules! append {
        ($buf:expr, $conv:expr) => {{
            let planes = $buf.planes();
            let conv = $conv;
            for (dest, plane) in out.iter_mut().zip(planes.planes().iter()) {
                dest.extend(plane.iter().map(|&s| conv(s)));
            }
        }};
    }

    match decoded {
        AudioBufferRef::F32(buf) => append!(buf, |s: f32| s),
        AudioBufferRef::F64(buf) => append!(buf, |s: f64| s as f32),
        AudioBufferRef::S8(buf) => append!(buf, |s: i8| s as f32 / 128.0),
        AudioBufferRef::S16(buf) => append!(buf, |s: i16| s as f32 / 32768.0),
        AudioBufferRef::S24(buf) => {
            append!(buf, |s: symphonia::core::sample::i24| s.inner() as f32
                / 8_388_608.0)
        }
        AudioBufferRef::S32(buf) => append!(buf, |s: i32| s as f32 / 2_147_483_648.0),
        AudioBufferRef::U8(buf) => append!(buf, |s: u8| (s as f32 - 128.0) / 128.0),
        AudioBufferRef::U16(buf) => append!(buf, |s: u16| (s as f32 - 32768.0) / 32768.0),
        AudioBufferRef::U24(buf) => {
            append!(buf, |s: symphonia::core::sample::u24| (s.inner() as f32
                - 8_388_608.0)
                / 8_388_608.0)
        }
        AudioBufferRef::U32(buf) => {
            append!(buf, |s: u32| (s as f64 - 2_147_483_648.0) as f32
                / 2_147_483_648.0)
        }
    }
}
