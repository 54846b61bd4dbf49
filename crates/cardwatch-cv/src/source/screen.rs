//! Monitor capture through xcap (`screen-capture` feature)

use super::{FrameSource, SourceSelector};
use crate::frame::Frame;
use crate::{Error, Result};
use image::RgbaImage;
use xcap::Monitor;

/// Captures a whole monitor on every call
pub struct ScreenSource {
    monitor: Monitor,
    description: String,
}

impl ScreenSource {
    /// Open the monitor named by a `Primary` or `Monitor(n)` selector
    pub fn open(selector: &SourceSelector) -> Result<Self> {
        let monitors = Monitor::all().map_err(|e| Error::Acquisition(format!("cannot enumerate monitors: {}", e)))?;
        if monitors.is_empty() {
            return Err(Error::Acquisition("no monitors found".into()));
        }
        let count = monitors.len();

        let monitor = match selector {
            SourceSelector::Primary => {
                let primary = monitors.iter().position(|m| m.is_primary()).unwrap_or(0);
                monitors.into_iter().nth(primary)
            }
            SourceSelector::Monitor(n) => monitors.into_iter().nth(n - 1),
            SourceSelector::Path(path) => {
                return Err(Error::Config(format!("{} is not a monitor", path.display())));
            }
        }
        .ok_or_else(|| Error::Config(format!("{} not found ({} monitor(s) available)", selector, count)))?;

        let description = format!("{} ({}x{})", selector, monitor.width(), monitor.height());
        Ok(Self { monitor, description })
    }
}

impl FrameSource for ScreenSource {
    fn next_frame(&mut self) -> Result<Frame> {
        let captured = self
            .monitor
            .capture_image()
            .map_err(|e| Error::Acquisition(format!("screen capture failed: {}", e)))?;

        // xcap may link a different `image` release; go through the raw buffer
        let (width, height) = (captured.width(), captured.height());
        let rgba = RgbaImage::from_raw(width, height, captured.into_raw())
            .ok_or_else(|| Error::Acquisition("capture buffer has unexpected size".into()))?;

        Ok(Frame::from_rgba(&rgba))
    }

    fn describe(&self) -> String {
        self.description.clone()
    }
}
