use std::path::Path;

use anyhow::Context;
use cardwatch_cv::detection::DetectionConfig;
use cardwatch_cv::utils::ImageUtils;
use cardwatch_cv::{
    Frame, FrameProcessor, FrameSource, ImageAnalysis, RegionClassifier, RegionExtractor, Reporter, SessionConfig,
    SessionLoop, StopToken,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod report;

use cli::{Args, Command};
use report::{ConsoleReporter, JsonReporter};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args);

    let detection = match &args.detection_config {
        Some(path) => DetectionConfig::load(path)
            .with_context(|| format!("failed to load detection config {}", path.display()))?,
        None => DetectionConfig::default(),
    };

    match &args.command {
        Some(Command::Inspect { image, annotated }) => inspect(image, annotated.as_deref(), &detection),
        None if args.json => watch(&args, &detection, JsonReporter::stdout()),
        None => watch(&args, &detection, ConsoleReporter::stdout()),
    }
}

fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_filter()));

    // stdout carries the reports
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(feature = "opencv")]
fn build_processor(config: &DetectionConfig) -> FrameProcessor<impl ImageAnalysis> {
    use cardwatch_cv::OpenCvAnalysis;

    FrameProcessor::new(
        RegionExtractor::new(OpenCvAnalysis::new(config.edges), config.region_filter),
        RegionClassifier::new(),
    )
}

#[cfg(not(feature = "opencv"))]
fn build_processor(config: &DetectionConfig) -> FrameProcessor<impl ImageAnalysis> {
    use cardwatch_cv::NativeAnalysis;

    FrameProcessor::new(
        RegionExtractor::new(NativeAnalysis::new(config.edges), config.region_filter),
        RegionClassifier::new(),
    )
}

fn watch<R: Reporter>(args: &Args, detection: &DetectionConfig, reporter: R) -> anyhow::Result<()> {
    let config: SessionConfig = args.session_config();
    let stop = StopToken::new();
    let mut session = SessionLoop::open(&config, build_processor(detection), reporter)
        .with_context(|| format!("failed to start session on {}", config.source))?
        .with_stop_token(stop.clone());

    if !args.json {
        println!("Starting Real-Time Card Detection System...");
        println!("Monitoring: {}", session.source().describe());
        println!("Update Interval: {} seconds", config.report_interval);
        println!("Press Ctrl+C to stop\n");
    }

    spawn_interrupt_listener(stop)?;
    let summary = session.run().context("card detection session failed")?;

    if !args.json {
        println!("\nSession ended.");
    }
    tracing::debug!(reason = ?summary.reason, frames = summary.snapshot.total_frames, "done");
    Ok(())
}

/// Exit status for a second Ctrl-C (128 + SIGINT)
const FORCED_EXIT_CODE: i32 = 130;

#[derive(Debug, PartialEq, Eq)]
enum Interrupt {
    /// First request: let the current frame finish
    Graceful,
    /// The session is already stopping and still running
    Force,
}

fn on_interrupt(stop: &StopToken) -> Interrupt {
    if stop.is_cancelled() {
        return Interrupt::Force;
    }
    stop.cancel();
    Interrupt::Graceful
}

/// Cancel `stop` on the first Ctrl-C, exit the process on the second
fn spawn_interrupt_listener(stop: StopToken) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build signal runtime")?;

    std::thread::Builder::new()
        .name("ctrl-c".into())
        .spawn(move || {
            runtime.block_on(async {
                loop {
                    if let Err(e) = tokio::signal::ctrl_c().await {
                        tracing::warn!(error = %e, "cannot listen for Ctrl-C");
                        return;
                    }
                    match on_interrupt(&stop) {
                        Interrupt::Graceful => {
                            tracing::info!("interrupt received, stopping after the current frame (Ctrl-C again to force)")
                        }
                        Interrupt::Force => {
                            eprintln!("\nInterrupted again, exiting immediately.");
                            std::process::exit(FORCED_EXIT_CODE);
                        }
                    }
                }
            })
        })
        .context("failed to spawn signal listener")?;

    Ok(())
}

fn inspect(image: &Path, annotated: Option<&Path>, detection: &DetectionConfig) -> anyhow::Result<()> {
    let frame = Frame::new(
        ImageUtils::load_rgb(image).with_context(|| format!("failed to load {}", image.display()))?,
    );

    let detections = build_processor(detection).detect(&frame)?;
    println!("{}", serde_json::to_string_pretty(&detections)?);

    if let Some(out) = annotated {
        let boxes = detections.detections.iter().map(|d| (&d.bbox, d.label));
        let output = ImageUtils::annotate(frame.image(), boxes);
        ImageUtils::save_rgb(&output, out).with_context(|| format!("failed to save {}", out.display()))?;
        tracing::info!(path = %out.display(), regions = detections.detections.len(), "saved annotated image");
    }

    Ok(())
}
