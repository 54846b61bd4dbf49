//! Detection configuration

use crate::bbox::BBox;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const MIN_AREA: f64 = 1000.0;
pub const MAX_AREA: f64 = 100_000.0;
pub const MIN_ASPECT_RATIO: f64 = 0.5;
pub const MAX_ASPECT_RATIO: f64 = 0.8;

/// Main detection configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub region_filter: RegionFilter,
    pub edges: EdgeParams,
}

/// Geometric admission rules for card-shaped contours
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionFilter {
    /// Inclusive lower bound on enclosed area
    pub min_area: f64,
    /// Exclusive upper bound on enclosed area
    pub max_area: f64,
    /// Inclusive lower bound on width / height
    pub min_aspect: f64,
    /// Inclusive upper bound on width / height
    pub max_aspect: f64,
}

/// Canny hysteresis thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeParams {
    pub low: f64,
    pub high: f64,
}

impl Default for RegionFilter {
    fn default() -> Self {
        Self {
            min_area: MIN_AREA,
            max_area: MAX_AREA,
            min_aspect: MIN_ASPECT_RATIO,
            max_aspect: MAX_ASPECT_RATIO,
        }
    }
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self { low: 50.0, high: 150.0 }
    }
}

impl RegionFilter {
    /// Area lies in `[min_area, max_area)`
    pub fn accepts_area(&self, area: f64) -> bool {
        area >= self.min_area && area < self.max_area
    }

    /// Aspect ratio lies in `[min_aspect, max_aspect]`
    pub fn accepts_aspect(&self, aspect_ratio: f64) -> bool {
        aspect_ratio >= self.min_aspect && aspect_ratio <= self.max_aspect
    }

    pub fn admits(&self, area: f64, bbox: &BBox) -> bool {
        self.accepts_area(area) && self.accepts_aspect(bbox.aspect_ratio())
    }
}

impl DetectionConfig {
    /// Load a JSON configuration; missing fields keep their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let f = &self.region_filter;
        let values = [f.min_area, f.max_area, f.min_aspect, f.max_aspect, self.edges.low, self.edges.high];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(Error::Config("detection thresholds must be finite".into()));
        }
        if f.min_area <= 0.0 || f.min_area >= f.max_area {
            return Err(Error::Config(format!(
                "area band [{}, {}) is empty or non-positive",
                f.min_area, f.max_area
            )));
        }
        if f.min_aspect <= 0.0 || f.min_aspect > f.max_aspect {
            return Err(Error::Config(format!(
                "aspect band [{}, {}] is empty or non-positive",
                f.min_aspect, f.max_aspect
            )));
        }
        if self.edges.low < 0.0 || self.edges.low > self.edges.high {
            return Err(Error::Config(format!(
                "edge thresholds low={} high={} are out of order",
                self.edges.low, self.edges.high
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_band_is_half_open() {
        let filter = RegionFilter::default();
        assert!(filter.accepts_area(MIN_AREA));
        assert!(!filter.accepts_area(MIN_AREA - 0.5));
        assert!(filter.accepts_area(MAX_AREA - 0.5));
        assert!(!filter.accepts_area(MAX_AREA));
    }

    #[test]
    fn test_aspect_band_is_closed() {
        let filter = RegionFilter::default();
        assert!(filter.accepts_aspect(MIN_ASPECT_RATIO));
        assert!(filter.accepts_aspect(MAX_ASPECT_RATIO));
        assert!(!filter.accepts_aspect(0.49));
        assert!(!filter.accepts_aspect(0.81));
    }

    #[test]
    fn test_default_validates() {
        assert!(DetectionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_bands() {
        let mut config = DetectionConfig::default();
        config.region_filter.max_area = config.region_filter.min_area;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut config = DetectionConfig::default();
        config.region_filter.min_aspect = 0.9;
        assert!(config.validate().is_err());

        let mut config = DetectionConfig::default();
        config.edges.high = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_json() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("detection.json");
        std::fs::write(&path, r#"{ "region_filter": { "min_area": 500.0 } }"#)?;

        let config = DetectionConfig::load(&path)?;
        assert_eq!(config.region_filter.min_area, 500.0);
        assert_eq!(config.region_filter.max_area, MAX_AREA);
        assert_eq!(config.edges, EdgeParams::default());
        Ok(())
    }
}
