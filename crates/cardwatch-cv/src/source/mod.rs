//! Frame sources
//!
//! A source hands out one [`Frame`] per call. Failure is reported as
//! [`Error::Acquisition`]; sources never retry on their own.

mod files;
#[cfg(feature = "screen-capture")]
mod screen;

pub use files::ImageFileSource;
#[cfg(feature = "screen-capture")]
pub use screen::ScreenSource;

use crate::frame::Frame;
use crate::{Error, Result};
use std::fmt;
use std::path::PathBuf;

/// Anything that can produce a sequence of frames
pub trait FrameSource {
    /// Acquire the next frame, blocking until it is available
    fn next_frame(&mut self) -> Result<Frame>;

    /// Human-readable description for logs and reports
    fn describe(&self) -> String;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn next_frame(&mut self) -> Result<Frame> {
        (**self).next_frame()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Parsed frame-source selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSelector {
    /// The primary monitor
    Primary,
    /// Monitor by 1-based index
    Monitor(usize),
    /// An image file or a directory of images
    Path(PathBuf),
}

impl SourceSelector {
    /// `primary`, `monitor:N`, a bare `N`, or anything else as a path
    pub fn parse(selector: &str) -> Result<Self> {
        let selector = selector.trim();
        if selector.is_empty() {
            return Err(Error::Config("frame source selector is empty".into()));
        }
        if selector.eq_ignore_ascii_case("primary") {
            return Ok(Self::Primary);
        }

        let index = selector.strip_prefix("monitor:").unwrap_or(selector);
        if let Ok(n) = index.parse::<usize>() {
            return match n {
                0 => Err(Error::Config("monitor numbers start at 1".into())),
                n => Ok(Self::Monitor(n)),
            };
        }
        if selector.starts_with("monitor:") {
            return Err(Error::Config(format!("invalid monitor selector: {}", selector)));
        }

        Ok(Self::Path(PathBuf::from(selector)))
    }

    /// Open the selected source. `looping` only applies to image paths.
    pub fn open(&self, looping: bool) -> Result<Box<dyn FrameSource>> {
        match self {
            Self::Path(path) => Ok(Box::new(ImageFileSource::from_path(path)?.looping(looping))),
            #[cfg(feature = "screen-capture")]
            Self::Primary | Self::Monitor(_) => Ok(Box::new(ScreenSource::open(self)?)),
            #[cfg(not(feature = "screen-capture"))]
            Self::Primary | Self::Monitor(_) => Err(Error::Config(format!(
                "capturing {} requires the `screen-capture` feature",
                self
            ))),
        }
    }
}

impl fmt::Display for SourceSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "primary monitor"),
            Self::Monitor(n) => write!(f, "monitor {}", n),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}
