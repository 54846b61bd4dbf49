use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse colour-family outcome for a candidate region.
///
/// These are not suits or ranks: two colour families plus a fallback for
/// card-shaped regions whose colour matched neither family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    HeartOrDiamond,
    SpadeOrClub,
    UnknownCard,
}

impl Label {
    /// Number of labels in the fixed set
    pub const COUNT: usize = 3;

    /// Every label, in index order
    pub const ALL: [Label; Label::COUNT] =
        [Label::HeartOrDiamond, Label::SpadeOrClub, Label::UnknownCard];

    /// Stable identifier used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::HeartOrDiamond => "heart_or_diamond",
            Label::SpadeOrClub => "spade_or_club",
            Label::UnknownCard => "unknown_card",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Label::HeartOrDiamond => 0,
            Label::SpadeOrClub => 1,
            Label::UnknownCard => 2,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Label::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| format!("unknown label: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_all_order() {
        for (i, label) in Label::ALL.iter().enumerate() {
            assert_eq!(label.index(), i);
        }
    }

    #[test]
    fn test_label_names_round_trip() {
        for label in Label::ALL {
            assert_eq!(label.as_str().parse::<Label>().unwrap(), label);
        }
        assert!("spade".parse::<Label>().is_err());
    }

    #[test]
    fn test_serde_uses_report_names() {
        let json = serde_json::to_string(&Label::HeartOrDiamond).unwrap();
        assert_eq!(json, "\"heart_or_diamond\"");
    }
}
