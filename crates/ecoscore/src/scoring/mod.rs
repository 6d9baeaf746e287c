//! Pluggable scoring strategies, badge decorators and the engine that ties
//! them to a product tree.

mod badge;
mod criteria;
mod registry;
pub mod scorecard;
mod strategy;
pub mod weights;

#[cfg(test)]
mod tests;

pub use badge::{apply_badge, BadgeDecorator, BadgeKind, FixedScore, ScoredEntity, StrategyScore};
pub use criteria::{Criterion, ScoringParams, UnknownCriterion};
pub use registry::{StrategyFactory, StrategyRegistry};
pub use scorecard::{Scorecard, ScorecardAction, ScorecardError, ScorecardState};
pub use strategy::{
    CarbonFootprintStrategy, CircularEconomyStrategy, CustomStrategy, HiggIndexStrategy,
    ScoringStrategy, CO2_PER_MJ,
};
pub use weights::{WeightChange, WeightConfig, WeightHistory, WeightListener, WeightLogEntry};

use crate::config::ScoringConfig;
use crate::error::CoreError;
use crate::product::CompositeNode;
use serde::Serialize;
use tracing::debug;

/// Strategies blended into a product's headline average.
pub const SUMMARY_STRATEGIES: [&str; 3] = [
    HiggIndexStrategy::ID,
    CarbonFootprintStrategy::ID,
    CircularEconomyStrategy::ID,
];

pub(crate) fn round_score(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Score of one strategy run, before and after badges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub strategy: String,
    pub base_score: f64,
    pub badges: Vec<BadgeKind>,
    pub badge_adjustment: f64,
    pub final_score: f64,
    pub clamped: bool,
}

/// Stateless facade resolving strategies by identifier and applying badges.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    registry: StrategyRegistry,
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self::with_registry(StrategyRegistry::standard(), config)
    }

    pub fn with_registry(registry: StrategyRegistry, config: ScoringConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    pub fn config(&self) -> ScoringConfig {
        self.config
    }

    /// Runs `strategy_id` against the product's aggregated impact.
    pub fn score(
        &self,
        product: &CompositeNode,
        strategy_id: &str,
        params: &ScoringParams,
    ) -> Result<f64, CoreError> {
        let strategy = self.registry.build(strategy_id, params)?;
        let score = strategy.score(&product.aggregate());
        debug!(strategy = strategy.id(), product = product.name(), score, "scored product");
        Ok(self.clamp(score).0)
    }

    /// Scores the product, then layers the named badges on top.
    pub fn scorecard<S: AsRef<str>>(
        &self,
        product: &CompositeNode,
        strategy_id: &str,
        params: &ScoringParams,
        badges: &[S],
    ) -> Result<ScoreBreakdown, CoreError> {
        let strategy = self.registry.build(strategy_id, params)?;
        let strategy_name = strategy.id().to_string();
        let base = StrategyScore::new(strategy, product);
        let base_score = base.compute_score();

        let mut entity: Box<dyn ScoredEntity + '_> = Box::new(base);
        for badge in badges {
            entity = apply_badge(entity, badge.as_ref())?;
        }

        let applied = entity.badges();
        let badge_adjustment: f64 = applied.iter().map(|badge| badge.modifier()).sum();
        let (final_score, clamped) = self.clamp(entity.compute_score());

        Ok(ScoreBreakdown {
            strategy: strategy_name,
            base_score,
            badges: applied,
            badge_adjustment,
            final_score,
            clamped,
        })
    }

    /// Mean of the summary strategies after badges, to one decimal.
    pub fn average_score<S: AsRef<str>>(
        &self,
        product: &CompositeNode,
        badges: &[S],
    ) -> Result<f64, CoreError> {
        let params = ScoringParams::new();
        let mut total = 0.0;
        for strategy_id in SUMMARY_STRATEGIES {
            total += self
                .scorecard(product, strategy_id, &params, badges)?
                .final_score;
        }
        Ok(round_score(total / SUMMARY_STRATEGIES.len() as f64, 1))
    }

    fn clamp(&self, score: f64) -> (f64, bool) {
        if !self.config.clamp_scores {
            return (score, false);
        }
        let clamped = score.clamp(0.0, 100.0);
        (clamped, clamped != score)
    }
}
