use std::path::PathBuf;
use std::time::Duration;

use cardwatch_cv::SessionConfig;
use clap::{Parser, Subcommand};

/// Watch a screen or a folder of captures and count playing cards by colour.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Seconds between statistics reports.
    #[arg(long, short = 'i', default_value_t = 1.0)]
    pub interval: f64,
    /// Frame source: `primary`, a monitor number, `monitor:N`, or an image file/directory.
    #[arg(long, short = 's', default_value = "primary", conflicts_with = "monitor")]
    pub source: String,
    /// Monitor number to capture (1-based); shorthand for `--source monitor:N`.
    #[arg(long, short = 'm')]
    pub monitor: Option<usize>,
    /// Stop after this many seconds (runs until Ctrl-C when omitted).
    #[arg(long, short = 'd')]
    pub duration: Option<f64>,
    /// Replay an image directory from the start once it is exhausted.
    #[arg(long, default_value_t = false)]
    pub r#loop: bool,
    /// Pause between frames in milliseconds.
    #[arg(long, default_value_t = 10)]
    pub pause_ms: u64,
    /// Emit one JSON object per report instead of the console table.
    #[arg(long, default_value_t = false)]
    pub json: bool,
    /// JSON file overriding the region filter and edge thresholds.
    #[arg(long, global = true)]
    pub detection_config: Option<PathBuf>,
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run detection on a single image and print every candidate region as JSON.
    Inspect {
        /// Image to analyse.
        image: PathBuf,
        /// Save a copy with the candidate regions outlined.
        #[arg(long)]
        annotated: Option<PathBuf>,
    },
}

impl Args {
    /// Frame-source selector after applying `--monitor`
    pub fn source_selector(&self) -> String {
        match self.monitor {
            Some(n) => format!("monitor:{}", n),
            None => self.source.clone(),
        }
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            report_interval: self.interval,
            source: self.source_selector(),
            replay: self.r#loop,
            max_duration: self.duration,
            idle_pause: Duration::from_millis(self.pause_ms),
        }
    }

    /// Default log filter when `RUST_LOG` is not set
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn,cardwatch=info,cardwatch_cv=info",
            1 => "info,cardwatch=debug,cardwatch_cv=debug,cardwatch_core=debug",
            _ => "debug,cardwatch=trace,cardwatch_cv=trace,cardwatch_core=trace",
        }
    }
}
