//! Frames read from image files on disk

use super::FrameSource;
use crate::frame::Frame;
use crate::utils::ImageUtils;
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

const SUPPORTED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// Replays a list of image files, one per frame
#[derive(Debug, Clone)]
pub struct ImageFileSource {
    paths: Vec<PathBuf>,
    next: usize,
    looping: bool,
}

impl ImageFileSource {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self {
            paths,
            next: 0,
            looping: false,
        }
    }

    /// A single image file, or every supported image in a directory sorted by name
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.is_file() {
            return Ok(Self::new(vec![path.to_path_buf()]));
        }
        if !path.is_dir() {
            return Err(Error::Config(format!("no such image or directory: {}", path.display())));
        }

        let mut paths = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry_path = entry?.path();
            if entry_path.is_file() && Self::is_supported(&entry_path) {
                paths.push(entry_path);
            }
        }
        paths.sort();

        if paths.is_empty() {
            return Err(Error::Config(format!("no images found in {}", path.display())));
        }
        Ok(Self::new(paths))
    }

    /// Restart from the first image instead of failing when exhausted
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    fn is_supported(path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
    }
}

impl FrameSource for ImageFileSource {
    fn next_frame(&mut self) -> Result<Frame> {
        if self.next >= self.paths.len() {
            if !self.looping || self.paths.is_empty() {
                return Err(Error::Acquisition(format!(
                    "image sequence exhausted after {} frame(s)",
                    self.paths.len()
                )));
            }
            self.next = 0;
        }

        let path = &self.paths[self.next];
        self.next += 1;

        ImageUtils::load_rgb(path)
            .map(Frame::new)
            .map_err(|e| Error::Acquisition(format!("{}: {}", path.display(), e)))
    }

    fn describe(&self) -> String {
        match self.paths.as_slice() {
            [single] => single.display().to_string(),
            paths => format!("{} image files", paths.len()),
        }
    }
}
