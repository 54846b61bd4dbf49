use super::label::Label;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-label counters with one pre-allocated slot for every known label.
///
/// Used both as the per-frame tally and as the cumulative session map.
/// Serialized as a map containing only the labels seen at least once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Label, u64>", into = "BTreeMap<Label, u64>")]
pub struct LabelCounts {
    counts: [u64; Label::COUNT],
}

/// Label counts scoped to a single frame
pub type FrameTally = LabelCounts;

impl LabelCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a single occurrence of `label`
    pub fn increment(&mut self, label: Label) {
        self.add(label, 1);
    }

    /// Add `count` occurrences of `label`
    pub fn add(&mut self, label: Label, count: u64) {
        self.counts[label.index()] += count;
    }

    pub fn get(&self, label: Label) -> u64 {
        self.counts[label.index()]
    }

    /// Sum over all labels
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Every label with its count, zero entries included
    pub fn iter(&self) -> impl Iterator<Item = (Label, u64)> + '_ {
        Label::ALL.into_iter().map(|label| (label, self.get(label)))
    }

    /// Only the labels that occurred at least once
    pub fn present(&self) -> impl Iterator<Item = (Label, u64)> + '_ {
        self.iter().filter(|(_, count)| *count > 0)
    }
}

impl FromIterator<Label> for LabelCounts {
    fn from_iter<T: IntoIterator<Item = Label>>(iter: T) -> Self {
        let mut counts = Self::new();
        for label in iter {
            counts.increment(label);
        }
        counts
    }
}

impl From<BTreeMap<Label, u64>> for LabelCounts {
    fn from(map: BTreeMap<Label, u64>) -> Self {
        let mut counts = Self::new();
        for (label, count) in map {
            counts.add(label, count);
        }
        counts
    }
}

impl From<LabelCounts> for BTreeMap<Label, u64> {
    fn from(counts: LabelCounts) -> Self {
        counts.present().collect()
    }
}
