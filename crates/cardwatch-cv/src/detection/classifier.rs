//! Colour-family classification of candidate regions
//!
//! A closed-form rule on the region's mean colour, evaluated in priority
//! order (first match wins):
//!
//! 1. red > 150, green < 100, blue < 100 => `heart_or_diamond`
//! 2. red < 50, green < 50, blue < 50 => `spade_or_club`
//! 3. anything else => `unknown_card`
//!
//! Rule 1 needs red above 150 and rule 2 needs red below 50, so no mean
//! colour can satisfy both; the ordering only matters if the constants change.

use crate::frame::CandidateRegion;
use cardwatch_core::Label;
use serde::{Deserialize, Serialize};

/// Red mean must exceed this for the red family
pub const RED_FAMILY_MIN_RED: f64 = 150.0;
/// Green and blue means must stay below this for the red family
pub const RED_FAMILY_MAX_OTHER: f64 = 100.0;
/// Every channel mean must stay below this for the black family
pub const BLACK_FAMILY_MAX: f64 = 50.0;

/// Arithmetic mean of each channel over a region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelMeans {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl ChannelMeans {
    pub fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }

    /// Means over every pixel in `region`; `None` when it has no pixels
    pub fn of(region: &CandidateRegion<'_>) -> Option<Self> {
        let mut sums = [0u64; 3];
        let mut count = 0u64;

        for pixel in region.pixels() {
            sums[0] += pixel[0] as u64;
            sums[1] += pixel[1] as u64;
            sums[2] += pixel[2] as u64;
            count += 1;
        }

        if count == 0 {
            return None;
        }

        let n = count as f64;
        Some(Self::new(sums[0] as f64 / n, sums[1] as f64 / n, sums[2] as f64 / n))
    }

    pub fn is_red_family(&self) -> bool {
        self.red > RED_FAMILY_MIN_RED
            && self.blue < RED_FAMILY_MAX_OTHER
            && self.green < RED_FAMILY_MAX_OTHER
    }

    pub fn is_black_family(&self) -> bool {
        self.blue < BLACK_FAMILY_MAX && self.green < BLACK_FAMILY_MAX && self.red < BLACK_FAMILY_MAX
    }
}

/// Fixed-threshold colour classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionClassifier;

impl RegionClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Label for `region`, or `None` for a region without pixels
    pub fn classify(&self, region: &CandidateRegion<'_>) -> Option<Label> {
        ChannelMeans::of(region).map(|means| self.label_for(&means))
    }

    /// Apply the priority-ordered rules to precomputed means
    pub fn label_for(&self, means: &ChannelMeans) -> Label {
        if means.is_red_family() {
            Label::HeartOrDiamond
        } else if means.is_black_family() {
            Label::SpadeOrClub
        } else {
            Label::UnknownCard
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bbox::BBox;
    use crate::frame::Frame;
    use image::{Rgb, RgbImage};

    fn classify_uniform(r: u8, g: u8, b: u8) -> Option<Label> {
        let frame = Frame::filled(100, 100, [r, g, b]);
        RegionClassifier::new().classify(&frame.region(BBox::new(0, 0, 100, 100)))
    }

    #[test]
    fn test_scenario_colours() {
        assert_eq!(classify_uniform(200, 50, 50), Some(Label::HeartOrDiamond));
        assert_eq!(classify_uniform(30, 30, 30), Some(Label::SpadeOrClub));
        assert_eq!(classify_uniform(100, 100, 100), Some(Label::UnknownCard));
    }

    #[test]
    fn test_single_pixel_regions() {
        let cases = [
            ([200, 50, 50], Label::HeartOrDiamond),
            ([30, 30, 30], Label::SpadeOrClub),
            ([100, 100, 100], Label::UnknownCard),
        ];
        for (color, expected) in cases {
            let frame = Frame::filled(1, 1, color);
            let label = RegionClassifier::new().classify(&frame.region(BBox::new(0, 0, 1, 1)));
            assert_eq!(label, Some(expected), "colour {:?}", color);
        }
    }

    #[test]
    fn test_empty_region_is_no_match() {
        let frame = Frame::filled(10, 10, [30, 30, 30]);
        let classifier = RegionClassifier::new();

        assert_eq!(classifier.classify(&frame.region(BBox::new(0, 0, 0, 10))), None);
        assert_eq!(classifier.classify(&frame.region(BBox::new(20, 20, 5, 5))), None);
    }

    #[test]
    fn test_means_average_mixed_pixels() {
        // left half pure red, right half black: mean red 127.5 is not red family
        let image = RgbImage::from_fn(10, 10, |x, _| if x < 5 { Rgb([255, 0, 0]) } else { Rgb([0, 0, 0]) });
        let frame = Frame::new(image);
        let region = frame.region(BBox::new(0, 0, 10, 10));

        let means = ChannelMeans::of(&region).unwrap();
        assert_eq!(means, ChannelMeans::new(127.5, 0.0, 0.0));
        assert_eq!(RegionClassifier::new().classify(&region), Some(Label::UnknownCard));

        let red_half = frame.region(BBox::new(0, 0, 5, 10));
        assert_eq!(RegionClassifier::new().classify(&red_half), Some(Label::HeartOrDiamond));
    }

    #[test]
    fn test_thresholds_are_strict() {
        let classifier = RegionClassifier::new();
        assert_eq!(classifier.label_for(&ChannelMeans::new(150.0, 0.0, 0.0)), Label::UnknownCard);
        assert_eq!(classifier.label_for(&ChannelMeans::new(150.5, 99.9, 99.9)), Label::HeartOrDiamond);
        assert_eq!(classifier.label_for(&ChannelMeans::new(255.0, 100.0, 0.0)), Label::UnknownCard);
        assert_eq!(classifier.label_for(&ChannelMeans::new(49.9, 49.9, 49.9)), Label::SpadeOrClub);
        assert_eq!(classifier.label_for(&ChannelMeans::new(50.0, 0.0, 0.0)), Label::UnknownCard);
    }

    #[test]
    fn test_rules_never_overlap() {
        let mut samples: Vec<f64> = (0..=255).map(f64::from).collect();
        samples.extend([49.999, 50.001, 99.999, 100.001, 149.999, 150.001]);

        for &red in &samples {
            for &green in samples.iter().step_by(7) {
                for &blue in samples.iter().step_by(7) {
                    let means = ChannelMeans::new(red, green, blue);
                    assert!(
                        !(means.is_red_family() && means.is_black_family()),
                        "both families match {:?}",
                        means
                    );
                }
            }
        }
    }

    #[test]
    fn test_red_family_wins_priority() {
        // lowest red that passes rule 1 with the darkest possible other channels
        let means = ChannelMeans::new(RED_FAMILY_MIN_RED + 1e-9, 0.0, 0.0);
        assert!(means.is_red_family());
        assert_eq!(RegionClassifier::new().label_for(&means), Label::HeartOrDiamond);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let image = RgbImage::from_fn(37, 53, |x, y| Rgb([(x * 7) as u8, (y * 3) as u8, ((x + y) % 256) as u8]));
        let frame = Frame::new(image);
        let region = frame.region(BBox::new(3, 4, 30, 40));
        let classifier = RegionClassifier::new();

        let first = classifier.classify(&region);
        for _ in 0..10 {
            assert_eq!(classifier.classify(&region), first);
        }
    }
}
