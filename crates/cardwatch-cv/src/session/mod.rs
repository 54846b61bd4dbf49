//! Session loop: acquire, process, accumulate, report
//!
//! `Idle -> Running -> Stopped`. While running, each iteration checks for a
//! stop request and the duration bound, then acquires one frame, runs it
//! through the [`FrameProcessor`] and appends the tally. Whenever a reporting
//! interval has elapsed the frame rate is recomputed and a periodic snapshot
//! is emitted. Entering `Stopped` always emits one final snapshot, including
//! when acquisition fails.

pub mod report;
pub mod stop;

pub use report::{CollectingReporter, ReportKind, Reporter};
pub use stop::StopToken;

use crate::analysis::{ImageAnalysis, NativeAnalysis};
use crate::detection::FrameProcessor;
use crate::source::{FrameSource, SourceSelector};
use crate::{Error, Result};
use cardwatch_core::{StatisticsAggregator, StatsSnapshot};
use std::fmt;
use std::time::{Duration, Instant};

/// Plain-value session settings
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Seconds between periodic snapshots
    pub report_interval: f64,
    /// Frame-source selector, see [`SourceSelector::parse`]
    pub source: String,
    /// Start an image directory over once it is exhausted; monitors ignore this
    pub replay: bool,
    /// Stop after this many seconds; `None` runs until stopped
    pub max_duration: Option<f64>,
    /// Sleep between iterations to cap the acquisition rate
    pub idle_pause: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            report_interval: 1.0,
            source: "primary".to_string(),
            replay: false,
            max_duration: None,
            idle_pause: Duration::from_millis(10),
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<()> {
        let interval = self.report_interval_duration()?;
        if interval.is_zero() {
            return Err(Error::Config(format!(
                "report interval must be positive, got {}",
                self.report_interval
            )));
        }
        self.max_duration_duration()?;
        SourceSelector::parse(&self.source)?;
        Ok(())
    }

    pub fn report_interval_duration(&self) -> Result<Duration> {
        Duration::try_from_secs_f64(self.report_interval)
            .map_err(|_| Error::Config(format!("invalid report interval: {}", self.report_interval)))
    }

    pub fn max_duration_duration(&self) -> Result<Option<Duration>> {
        self.max_duration
            .map(|secs| {
                Duration::try_from_secs_f64(secs)
                    .map_err(|_| Error::Config(format!("invalid session duration: {}", secs)))
            })
            .transpose()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running,
    Stopped,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Idle => "idle",
            SessionState::Running => "running",
            SessionState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The configured maximum duration elapsed
    DurationElapsed,
    /// The stop token was cancelled
    Interrupted,
}

/// Outcome of a session that stopped without a fatal error
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub reason: StopReason,
    pub snapshot: StatsSnapshot,
}

/// Drives frames from a source through a processor into session statistics
pub struct SessionLoop<S, R, A = NativeAnalysis> {
    source: S,
    processor: FrameProcessor<A>,
    reporter: R,
    stop: StopToken,
    state: SessionState,
    report_interval: Duration,
    max_duration: Option<Duration>,
    idle_pause: Duration,
}

impl<R: Reporter, A: ImageAnalysis> SessionLoop<Box<dyn FrameSource>, R, A> {
    /// Validate `config`, open the source it selects and build an idle session
    pub fn open(config: &SessionConfig, processor: FrameProcessor<A>, reporter: R) -> Result<Self> {
        config.validate()?;
        let source = SourceSelector::parse(&config.source)?.open(config.replay)?;
        Self::new(config, source, processor, reporter)
    }
}

impl<S, R, A> SessionLoop<S, R, A>
where
    S: FrameSource,
    R: Reporter,
    A: ImageAnalysis,
{
    /// Validate `config` and build an idle session around an already-open
    /// `source`, which takes the place of `config.source`
    pub fn new(config: &SessionConfig, source: S, processor: FrameProcessor<A>, reporter: R) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            source,
            processor,
            reporter,
            stop: StopToken::new(),
            state: SessionState::Idle,
            report_interval: config.report_interval_duration()?,
            max_duration: config.max_duration_duration()?,
            idle_pause: config.idle_pause,
        })
    }

    /// Use an externally owned stop token
    pub fn with_stop_token(mut self, stop: StopToken) -> Self {
        self.stop = stop;
        self
    }

    /// Handle that stops this session when cancelled
    pub fn stop_token(&self) -> StopToken {
        self.stop.clone()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn into_reporter(self) -> R {
        self.reporter
    }

    /// Run until the duration bound or a stop request.
    ///
    /// The final snapshot is emitted before returning, on success and on a
    /// fatal acquisition or analysis error alike.
    pub fn run(&mut self) -> Result<SessionSummary> {
        if self.state != SessionState::Idle {
            return Err(Error::InvalidState {
                action: "start",
                state: self.state.to_string(),
            });
        }

        let mut stats = StatisticsAggregator::start();
        self.state = SessionState::Running;
        tracing::info!(
            source = %self.source.describe(),
            interval_secs = self.report_interval.as_secs_f64(),
            max_duration_secs = self.max_duration.map(|d| d.as_secs_f64()),
            "session started"
        );

        let outcome = self.drive(&mut stats);

        self.state = SessionState::Stopped;
        let snapshot = stats.snapshot(Instant::now());
        self.reporter.report(&snapshot, ReportKind::Final);

        match outcome {
            Ok(reason) => {
                tracing::info!(?reason, frames = snapshot.total_frames, "session stopped");
                Ok(SessionSummary { reason, snapshot })
            }
            Err(err) => {
                tracing::error!(error = %err, frames = snapshot.total_frames, "session aborted");
                Err(err)
            }
        }
    }

    fn drive(&mut self, stats: &mut StatisticsAggregator) -> Result<StopReason> {
        let started = stats.started();
        let mut last_report = started;
        let mut frames_since_report = 0u64;

        loop {
            if self.stop.is_cancelled() {
                return Ok(StopReason::Interrupted);
            }
            if let Some(max) = self.max_duration {
                if started.elapsed() >= max {
                    return Ok(StopReason::DurationElapsed);
                }
            }

            let frame = self.source.next_frame()?;
            let tally = self.processor.process(&frame)?;
            drop(frame);

            stats.append(&tally);
            frames_since_report += 1;

            let now = Instant::now();
            let since_report = now.saturating_duration_since(last_report);
            if since_report >= self.report_interval {
                stats.tick_rate(frames_since_report, since_report.as_secs_f64());
                let snapshot = stats.snapshot(now);
                tracing::debug!(
                    frames = snapshot.total_frames,
                    detections = snapshot.total_detections,
                    fps = snapshot.fps,
                    "periodic report"
                );
                self.reporter.report(&snapshot, ReportKind::Periodic);

                last_report = now;
                frames_since_report = 0;
            }

            if !self.idle_pause.is_zero() {
                std::thread::sleep(self.idle_pause);
            }
        }
    }
}
