use super::strategy::ScoringStrategy;
use crate::error::CoreError;
use crate::product::CompositeNode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Anything that can produce a score.
pub trait ScoredEntity {
    fn compute_score(&self) -> f64;

    /// Badges layered on this entity, innermost first.
    fn badges(&self) -> Vec<BadgeKind> {
        Vec::new()
    }
}

/// A strategy evaluated against a product tree. The tree is aggregated on
/// every call.
pub struct StrategyScore<'a> {
    strategy: Box<dyn ScoringStrategy>,
    product: &'a CompositeNode,
}

impl<'a> StrategyScore<'a> {
    pub fn new(strategy: Box<dyn ScoringStrategy>, product: &'a CompositeNode) -> Self {
        Self { strategy, product }
    }

    pub fn strategy_id(&self) -> &'static str {
        self.strategy.id()
    }
}

impl ScoredEntity for StrategyScore<'_> {
    fn compute_score(&self) -> f64 {
        self.strategy.score(&self.product.aggregate())
    }
}

/// A score known up front, e.g. one loaded from storage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedScore(pub f64);

impl ScoredEntity for FixedScore {
    fn compute_score(&self) -> f64 {
        self.0
    }
}

/// Certification or compliance flag with a fixed score delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeKind {
    Fairtrade,
    Vegan,
    #[serde(rename = "oekotex")]
    OekoTex,
    NonCompliant,
}

impl BadgeKind {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Fairtrade,
            Self::Vegan,
            Self::OekoTex,
            Self::NonCompliant,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fairtrade => "fairtrade",
            Self::Vegan => "vegan",
            Self::OekoTex => "oekotex",
            Self::NonCompliant => "non_compliant",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Fairtrade => "Fairtrade",
            Self::Vegan => "Vegan",
            Self::OekoTex => "OEKO-TEX",
            Self::NonCompliant => "Non-compliant",
        }
    }

    /// Negative values are bonuses, positive values maluses.
    pub const fn modifier(self) -> f64 {
        match self {
            Self::Fairtrade => -5.0,
            Self::Vegan => -3.0,
            Self::OekoTex => -4.0,
            Self::NonCompliant => 10.0,
        }
    }
}

impl fmt::Display for BadgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BadgeKind {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        BadgeKind::ordered()
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| CoreError::UnknownBadge(value.to_string()))
    }
}

/// Adds a badge's fixed delta to the wrapped entity's score. Layers commute
/// because each one only adds a constant.
pub struct BadgeDecorator<'a> {
    inner: Box<dyn ScoredEntity + 'a>,
    badge: BadgeKind,
}

impl<'a> BadgeDecorator<'a> {
    pub fn new(inner: Box<dyn ScoredEntity + 'a>, badge: BadgeKind) -> Self {
        Self { inner, badge }
    }

    pub fn badge(&self) -> BadgeKind {
        self.badge
    }
}

impl ScoredEntity for BadgeDecorator<'_> {
    fn compute_score(&self) -> f64 {
        self.inner.compute_score() + self.badge.modifier()
    }

    fn badges(&self) -> Vec<BadgeKind> {
        let mut badges = self.inner.badges();
        badges.push(self.badge);
        badges
    }
}

/// Wraps `entity` in the badge named by `badge`. Applying the same badge
/// twice stacks its modifier.
pub fn apply_badge<'a>(
    entity: Box<dyn ScoredEntity + 'a>,
    badge: &str,
) -> Result<Box<dyn ScoredEntity + 'a>, CoreError> {
    let kind: BadgeKind = badge.parse()?;

    if entity.badges().contains(&kind) {
        warn!(badge = kind.as_str(), "badge applied more than once; modifiers stack");
    } else {
        debug!(badge = kind.as_str(), modifier = kind.modifier(), "applying badge");
    }

    Ok(Box::new(BadgeDecorator::new(entity, kind)))
}
