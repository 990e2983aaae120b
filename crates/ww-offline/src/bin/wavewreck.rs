//! Command-line front end for the degradation pipeline.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use ww_dsp::settings::QualitySettings;
use ww_offline::{AudioDecoder, DegradePipeline, PipelineConfig, SettingsSource};

#[derive(Parser)]
#[command(name = "wavewreck", version, about = "Degrade an audio file into a lo-fi WAV")]
struct Args {
    /// Input audio file (wav, flac, mp3, ogg, aac, m4a, aiff, alac)
    input: PathBuf,

    /// Output WAV file
    output: PathBuf,

    /// Quality level, 1 (mild) to 5 (destroyed)
    #[arg(short, long, default_value_t = 3)]
    level: u8,

    /// JSON settings profile; overrides --level
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Mix in broadband noise
    #[arg(long)]
    noise: bool,

    /// Inject impulsive crackle
    #[arg(long)]
    crackle: bool,

    /// Artifact intensity, 1-10
    #[arg(long, default_value_t = 5.0)]
    intensity: f32,

    /// Seed for the randomized stages (reproducible output)
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let data = std::fs::read(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let extension = args
        .input
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_owned);

    if let Ok(info) = AudioDecoder::probe_bytes(&data, extension.as_deref()) {
        log::info!(
            "input: {} ch @ {} Hz, {:.2}s",
            info.channels,
            info.sample_rate,
            info.duration_seconds
        );
    }

    let source = match &args.settings {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let settings: QualitySettings =
                serde_json::from_str(&json).context("parsing settings profile")?;
            SettingsSource::Custom(settings)
        }
        None => {
            let mut settings = QualitySettings::from_level(args.level)?;
            settings.noise_enabled = args.noise;
            settings.crackle_enabled = args.crackle;
            settings.intensity = args.intensity;
            SettingsSource::Custom(settings)
        }
    };

    let mut pipeline = DegradePipeline::new(PipelineConfig::default());
    if let Some(seed) = args.seed {
        pipeline = pipeline.with_seed(seed);
    }

    let wav = pipeline.process(&data, extension.as_deref(), source, |percent| {
        eprint!("\rprocessing {percent:3.0}%");
        let _ = std::io::stderr().flush();
    })?;
    eprintln!();

    std::fs::write(&args.output, &wav)
        .with_context(|| format!("writing {}", args.output.display()))?;
    println!(
        "wrote {} ({} bytes)",
        args.output.display(),
        wav.len()
    );
    Ok(())
}
