use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookbinder_core::{
    dedupe_sources, load_config, AudioSource, Config, ConversionEvent, ConversionOrchestrator,
    ConversionRequest, ConversionState, FfmpegTranscoder, FfprobeProber, Transcoder,
};

/// Bind a set of MP3 files into a single M4B audiobook with chapter markers.
#[derive(Debug, Parser)]
#[command(name = "bookbinder", version, about)]
struct Cli {
    /// Input MP3 files, in playback order
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Output audiobook path (`.m4b` is appended when missing)
    #[arg(short, long)]
    output: String,

    /// Audiobook title
    #[arg(short, long)]
    title: Option<String>,

    /// Audiobook author
    #[arg(short, long)]
    author: Option<String>,

    /// Cover image path
    #[arg(long)]
    cover: Option<String>,

    /// Configuration file (defaults apply when the file does not exist)
    #[arg(long, env = "BOOKBINDER_CONFIG", default_value = "config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // An explicitly provided config file must exist; the default path is
    // optional and falls back to built-in defaults.
    let config = if cli.config.exists() {
        info!("Loading configuration from {:?}", cli.config);
        load_config(&cli.config)
            .with_context(|| format!("Failed to load config from {:?}", cli.config))?
    } else if std::env::var_os("BOOKBINDER_CONFIG").is_some() {
        bail!("Configuration file not found: {:?}", cli.config);
    } else {
        Config::default()
    };

    let prober = FfprobeProber::new(config.probe.clone());
    let transcoder = FfmpegTranscoder::new(config.transcoder.clone());
    transcoder
        .validate()
        .await
        .context("ffmpeg is not available")?;

    let orchestrator = ConversionOrchestrator::new(prober, transcoder, config.chapters.clone());

    let sources = dedupe_sources(
        &[],
        cli.inputs.iter().map(AudioSource::from_path).collect(),
    );
    if sources.len() < cli.inputs.len() {
        info!(
            "Ignoring {} duplicate input file(s)",
            cli.inputs.len() - sources.len()
        );
    }

    let request = ConversionRequest {
        sources,
        output_path: cli.output,
        title: cli.title,
        author: cli.author,
        cover_image_path: cli.cover,
    };

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    orchestrator
        .start(request, event_tx)
        .await
        .context("Failed to start conversion")?;

    while let Some(event) = event_rx.recv().await {
        match event {
            ConversionEvent::OutputLine(line) => eprintln!("{line}"),
            ConversionEvent::StateChanged(state) => match state {
                ConversionState::Succeeded(message) => {
                    println!("{message}");
                    return Ok(());
                }
                ConversionState::Failed(message) => bail!("{message}"),
                other => info!("{}", state_label(&other)),
            },
        }
    }

    bail!("conversion ended without a terminal state")
}

fn state_label(state: &ConversionState) -> &'static str {
    match state {
        ConversionState::Idle => "idle",
        ConversionState::Validating => "validating inputs",
        ConversionState::ResolvingDurations => "resolving durations",
        ConversionState::Synthesizing => "synthesizing chapters",
        ConversionState::Running => "running ffmpeg",
        ConversionState::Succeeded(_) => "succeeded",
        ConversionState::Failed(_) => "failed",
    }
}
