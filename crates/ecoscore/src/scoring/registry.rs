use super::criteria::ScoringParams;
use super::strategy::{
    CarbonFootprintStrategy, CircularEconomyStrategy, CustomStrategy, HiggIndexStrategy,
    ScoringStrategy,
};
use crate::error::CoreError;
use std::collections::BTreeMap;

/// Builds a strategy instance with its parameters bound.
pub type StrategyFactory = fn(&ScoringParams) -> Box<dyn ScoringStrategy>;

/// Strategy lookup table keyed by identifier, consulted at call time.
#[derive(Clone)]
pub struct StrategyRegistry {
    factories: BTreeMap<&'static str, StrategyFactory>,
}

impl StrategyRegistry {
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// The four built-in strategies.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(HiggIndexStrategy::ID, |_| Box::new(HiggIndexStrategy));
        registry.register(CarbonFootprintStrategy::ID, |_| {
            Box::new(CarbonFootprintStrategy)
        });
        registry.register(CircularEconomyStrategy::ID, |_| {
            Box::new(CircularEconomyStrategy)
        });
        registry.register(CustomStrategy::ID, |params| {
            Box::new(CustomStrategy::from_params(params))
        });
        registry
    }

    /// Adds or replaces the factory for `id`.
    pub fn register(&mut self, id: &'static str, factory: StrategyFactory) {
        self.factories.insert(id, factory);
    }

    pub fn build(
        &self,
        id: &str,
        params: &ScoringParams,
    ) -> Result<Box<dyn ScoringStrategy>, CoreError> {
        let factory = self
            .factories
            .get(id.trim())
            .ok_or_else(|| CoreError::UnknownStrategy(id.to_string()))?;
        Ok(factory(params))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id.trim())
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("strategies", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}
