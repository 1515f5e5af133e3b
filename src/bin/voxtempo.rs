//! Command-line front end: synthesize text, save the original and an
//! optional tempo-corrected copy.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use voxtempo::prelude::*;
use voxtempo::stretch::{is_identity_tempo, validate_tempo};

#[derive(Parser, Debug)]
#[command(name = "voxtempo", version, about = "Synthesize speech and correct its tempo")]
struct Args {
    /// Text to speak
    #[arg(long)]
    text: String,

    /// Voice identifier understood by the backend
    #[arg(long)]
    voice: String,

    /// Free-text delivery descriptor
    #[arg(long)]
    style: Option<String>,

    #[arg(long)]
    speaking_rate: Option<f32>,

    /// Playback tempo multiplier for the corrected copy (0.5 - 2.0)
    #[arg(long, default_value_t = 1.0)]
    tempo: f32,

    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// File name stem; files are written as <stem>_<tempo>x.wav
    #[arg(long, default_value = voxtempo::DEFAULT_STEM)]
    stem: String,

    /// Speech service URL
    #[arg(long, env = "VOXTEMPO_ENDPOINT")]
    endpoint: String,

    #[arg(long, env = "VOXTEMPO_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Retries for 429/5xx responses (exponential backoff)
    #[arg(long, default_value_t = 0)]
    retries: u32,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 60)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let mut request = TtsRequest::new(args.text, args.voice);
    if let Some(style) = args.style {
        request = request.style(style);
    }
    if let Some(rate) = args.speaking_rate {
        request = request.speaking_rate(rate);
    }

    // Reject bad input before touching the network
    request.validate()?;
    validate_tempo(args.tempo)?;

    let retry = if args.retries > 0 {
        RetryPolicy::exponential().max_retries(args.retries)
    } else {
        RetryPolicy::none()
    };
    let mut tts = TtsConfig::new(args.endpoint)
        .timeout(Duration::from_secs(args.timeout))
        .retry(retry);
    if let Some(key) = args.api_key {
        tts = tts.api_key(key);
    }

    let voxtempo = VoxTempo::builder().http(tts).build()?;

    let original = voxtempo
        .generate(&request)
        .await
        .context("speech generation failed")?;
    let path = original.save(&args.out_dir, &args.stem)?;
    println!(
        "{} ({:.2}s, {} Hz)",
        path.display(),
        original.duration_seconds(),
        original.sample_rate
    );

    if !is_identity_tempo(args.tempo) {
        let corrected = voxtempo
            .correct_tempo(&original, args.tempo)
            .await
            .context("tempo correction failed")?;
        let path = corrected.save(&args.out_dir, &args.stem)?;
        println!("{} ({:.2}s)", path.display(), corrected.duration_seconds());
    }

    Ok(())
}
