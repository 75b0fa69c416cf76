use serde::{Deserialize, Serialize};
use std::fmt;

/// Air quality classification bucket assigned to each hourly observation.
///
/// The declaration order is the canonical display order: every output that
/// lists or keys categories preserves it, which is why `Ord` is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Excellent,
    Good,
    #[serde(rename = "Slightly Polluted")]
    SlightlyPolluted,
    #[serde(rename = "Lightly Polluted")]
    LightlyPolluted,
    #[serde(rename = "Moderately Polluted")]
    ModeratelyPolluted,
    #[serde(rename = "Heavily Polluted")]
    HeavilyPolluted,
}

/// All categories in canonical order.
pub const ALL_CATEGORIES: [Category; 6] = [
    Category::Excellent,
    Category::Good,
    Category::SlightlyPolluted,
    Category::LightlyPolluted,
    Category::ModeratelyPolluted,
    Category::HeavilyPolluted,
];

impl Category {
    /// Parse the label used in the source dataset.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Excellent" => Some(Category::Excellent),
            "Good" => Some(Category::Good),
            "Slightly Polluted" => Some(Category::SlightlyPolluted),
            "Lightly Polluted" => Some(Category::LightlyPolluted),
            "Moderately Polluted" => Some(Category::ModeratelyPolluted),
            "Heavily Polluted" => Some(Category::HeavilyPolluted),
            _ => None,
        }
    }

    /// The dataset label for this category.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Excellent => "Excellent",
            Category::Good => "Good",
            Category::SlightlyPolluted => "Slightly Polluted",
            Category::LightlyPolluted => "Lightly Polluted",
            Category::ModeratelyPolluted => "Moderately Polluted",
            Category::HeavilyPolluted => "Heavily Polluted",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
