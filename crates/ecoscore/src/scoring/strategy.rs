use super::criteria::{Criterion, ScoringParams};
use super::round_score;
use crate::product::ImpactRecord;
use std::collections::BTreeMap;
use tracing::warn;

/// kg CO2e emitted per MJ of process energy.
pub const CO2_PER_MJ: f64 = 0.15;

/// A pure mapping from aggregated impact to a sustainability score.
///
/// Scores are rounded to two decimals and are not clamped; see
/// [`ScoringConfig`](crate::config::ScoringConfig) for the clamping switch.
pub trait ScoringStrategy: Send + Sync {
    fn id(&self) -> &'static str;
    fn score(&self, impact: &ImpactRecord) -> f64;
}

/// Multi-impact score modelled on the Higg Materials Sustainability Index.
///
/// Each impact is compared against a "poor performance" benchmark and the
/// resulting sub-scores are blended by fixed shares. Sub-scores are not
/// floored at zero: an impact past its benchmark keeps pulling the blend
/// down, so the result equals `100 - (0.70 * energy + 0.06 * water)` per kg.
#[derive(Debug, Clone, Copy, Default)]
pub struct HiggIndexStrategy;

impl HiggIndexStrategy {
    pub const ID: &'static str = "higg_index";

    const CO2_SHARE: f64 = 0.45;
    const WATER_SHARE: f64 = 0.30;
    const ENERGY_SHARE: f64 = 0.25;

    const CO2_BENCHMARK: f64 = 15.0;
    const WATER_BENCHMARK: f64 = 500.0;
    const ENERGY_BENCHMARK: f64 = 100.0;
}

impl ScoringStrategy for HiggIndexStrategy {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn score(&self, impact: &ImpactRecord) -> f64 {
        let normalized = impact.per_kg();
        let co2_per_kg = normalized.energy_per_kg * CO2_PER_MJ;

        let co2_score = 100.0 - co2_per_kg / Self::CO2_BENCHMARK * 100.0;
        let water_score = 100.0 - normalized.water_per_kg / Self::WATER_BENCHMARK * 100.0;
        let energy_score = 100.0 - normalized.energy_per_kg / Self::ENERGY_BENCHMARK * 100.0;

        round_score(
            co2_score * Self::CO2_SHARE
                + water_score * Self::WATER_SHARE
                + energy_score * Self::ENERGY_SHARE,
            2,
        )
    }
}

/// Starts from 100 and subtracts a fixed penalty per kg CO2e per kg product.
#[derive(Debug, Clone, Copy, Default)]
pub struct CarbonFootprintStrategy;

impl CarbonFootprintStrategy {
    pub const ID: &'static str = "carbon_footprint";

    const PENALTY_FACTOR: f64 = 12.0;
}

impl ScoringStrategy for CarbonFootprintStrategy {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn score(&self, impact: &ImpactRecord) -> f64 {
        let co2_per_kg = impact.per_kg().energy_per_kg * CO2_PER_MJ;
        round_score(100.0 - co2_per_kg * Self::PENALTY_FACTOR, 2)
    }
}

/// Rewards recycled input and recyclable output, penalises waste.
/// Energy and water do not participate.
#[derive(Debug, Clone, Copy, Default)]
pub struct CircularEconomyStrategy;

impl CircularEconomyStrategy {
    pub const ID: &'static str = "circular_economy";

    const CIRCULARITY_SHARE: f64 = 0.6;
    const WASTE_SHARE: f64 = 0.4;
    /// kg of waste per kg of product considered critical.
    const WASTE_BENCHMARK: f64 = 2.0;
}

impl ScoringStrategy for CircularEconomyStrategy {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn score(&self, impact: &ImpactRecord) -> f64 {
        let normalized = impact.per_kg();
        let circularity =
            normalized.recycled_content * 100.0 * 0.5 + normalized.recyclability * 100.0 * 0.5;
        let waste_score = 100.0 - normalized.waste_per_kg / Self::WASTE_BENCHMARK * 100.0;

        round_score(
            circularity * Self::CIRCULARITY_SHARE + waste_score * Self::WASTE_SHARE,
            2,
        )
    }
}

/// Caller-weighted score: `100 - Σ penalty weights · per-kg impact + Σ bonus
/// weights · ratio`. Criteria without a weight contribute nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomStrategy {
    weights: BTreeMap<Criterion, f64>,
}

impl CustomStrategy {
    pub const ID: &'static str = "custom";

    pub fn new(weights: BTreeMap<Criterion, f64>) -> Self {
        Self { weights }
    }

    pub fn from_params(params: &ScoringParams) -> Self {
        let mut weights = BTreeMap::new();
        for (key, weight) in params {
            match key.parse::<Criterion>() {
                Ok(criterion) => {
                    weights.insert(criterion, *weight);
                }
                Err(err) => warn!(%err, "ignoring custom weight"),
            }
        }
        Self { weights }
    }

    pub fn weight(&self, criterion: Criterion) -> f64 {
        self.weights.get(&criterion).copied().unwrap_or(0.0)
    }
}

impl ScoringStrategy for CustomStrategy {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn score(&self, impact: &ImpactRecord) -> f64 {
        let normalized = impact.per_kg();

        let penalty = normalized.energy_per_kg * self.weight(Criterion::Energy)
            + normalized.water_per_kg * self.weight(Criterion::Water)
            + normalized.waste_per_kg * self.weight(Criterion::Waste);
        let bonus = normalized.recyclability * self.weight(Criterion::Recyclability)
            + normalized.recycled_content * self.weight(Criterion::RecycledContent);

        round_score(100.0 - penalty + bonus, 2)
    }
}
