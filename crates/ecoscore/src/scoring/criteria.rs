use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Free-form parameter map passed alongside a strategy identifier.
pub type ScoringParams = BTreeMap<String, f64>;

/// Criteria a custom weighting can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Energy,
    Water,
    Waste,
    Recyclability,
    RecycledContent,
}

impl Criterion {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Energy,
            Self::Water,
            Self::Waste,
            Self::Recyclability,
            Self::RecycledContent,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Energy => "energy",
            Self::Water => "water",
            Self::Waste => "waste",
            Self::Recyclability => "recyclability",
            Self::RecycledContent => "recycled_content",
        }
    }

    /// Penalties are subtracted from the base score, bonuses added to it.
    pub const fn is_penalty(self) -> bool {
        matches!(self, Self::Energy | Self::Water | Self::Waste)
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCriterion(pub String);

impl fmt::Display for UnknownCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown scoring criterion '{}'", self.0)
    }
}

impl std::error::Error for UnknownCriterion {}

impl FromStr for Criterion {
    type Err = UnknownCriterion;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Criterion::ordered()
            .into_iter()
            .find(|criterion| criterion.as_str() == normalized)
            .ok_or_else(|| UnknownCriterion(value.to_string()))
    }
}
