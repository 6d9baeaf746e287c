use super::cache::{CacheStats, ResolutionCache};
use super::clock::{Clock, SystemClock};
use super::{
    CarbonEstimator, DataSource, FixedEstimate, ResolutionRequest, ResolutionResult,
    StaticSupplierTable, SupplierLookup,
};
use crate::config::ResolverConfig;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Real sources tried in insertion order, then the estimator.
pub struct ResolverChain {
    sources: Vec<Box<dyn SupplierLookup>>,
    estimator: Box<dyn CarbonEstimator>,
}

impl ResolverChain {
    pub fn new(estimator: impl CarbonEstimator + 'static) -> Self {
        Self {
            sources: Vec::new(),
            estimator: Box::new(estimator),
        }
    }

    pub fn with_source(mut self, source: impl SupplierLookup + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Sample supplier table backed by the fixed placeholder estimate.
    pub fn standard() -> Self {
        Self::new(FixedEstimate::default()).with_source(StaticSupplierTable::sample())
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub fn resolve(&self, request: &ResolutionRequest) -> ResolutionResult {
        for (position, source) in self.sources.iter().enumerate() {
            if let Some(facts) = source.lookup(request) {
                debug!(
                    supplier_id = %request.supplier_id,
                    source_position = position,
                    "supplier data resolved from real source"
                );
                return ResolutionResult::from_facts(request, facts, DataSource::Real);
            }
        }

        info!(
            supplier_id = %request.supplier_id,
            "no real supplier data; falling back to estimate"
        );
        let facts = self.estimator.estimate(request);
        ResolutionResult::from_facts(request, facts, DataSource::AiEstimated)
    }
}

impl std::fmt::Debug for ResolverChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverChain")
            .field("sources", &self.sources.len())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    #[serde(flatten)]
    pub result: ResolutionResult,
    pub cached: bool,
}

/// Caching front for a [`ResolverChain`].
///
/// Each call is cache check, then chain walk, then cache store. Concurrent
/// misses for the same fingerprint may both walk the chain.
#[derive(Debug)]
pub struct SupplyDataResolver {
    chain: ResolverChain,
    cache: ResolutionCache,
}

impl SupplyDataResolver {
    pub fn new(chain: ResolverChain, config: &ResolverConfig) -> Self {
        Self::with_clock(chain, config.cache_ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(chain: ResolverChain, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            chain,
            cache: ResolutionCache::new(ttl, clock),
        }
    }

    pub fn resolve(&self, request: &ResolutionRequest) -> Resolution {
        let key = request.fingerprint();

        if let Some(result) = self.cache.get(&key) {
            debug!(fingerprint = %key, "resolution cache hit");
            return Resolution {
                result,
                cached: true,
            };
        }

        debug!(fingerprint = %key, "resolution cache miss");
        let result = self.chain.resolve(request);
        self.cache.store(key, result.clone());
        Resolution {
            result,
            cached: false,
        }
    }

    pub fn invalidate_cache(&self) -> usize {
        let removed = self.cache.invalidate();
        info!(removed, "resolution cache invalidated");
        removed
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::supply_chain::SupplierFacts;

    #[test]
    fn first_real_source_wins() {
        let chain = ResolverChain::new(FixedEstimate::default())
            .with_source(|_: &ResolutionRequest| -> Option<SupplierFacts> { None })
            .with_source(StaticSupplierTable::sample())
            .with_source(|_: &ResolutionRequest| {
                Some(SupplierFacts {
                    supplier_name: "Shadowed".to_string(),
                    carbon_footprint_kg: 9.9,
                })
            });

        let result = chain.resolve(&ResolutionRequest::new("SUP001"));
        assert_eq!(result.supplier_name, "EcoTextiles");
        assert_eq!(result.source, DataSource::Real);
        assert_eq!(chain.source_count(), 3);
    }

    #[test]
    fn estimator_closes_the_chain() {
        let chain = ResolverChain::new(FixedEstimate::default());
        let result = chain.resolve(&ResolutionRequest::new("SUP777"));
        assert_eq!(result.source, DataSource::AiEstimated);
        assert_eq!(result.supplier_id, "SUP777");
        assert_eq!(result.supplier_name, "AI_Estimated_SUP777");
        assert_eq!(result.carbon_footprint_kg, 3.5);
    }

    #[test]
    fn resolution_serializes_flat() {
        let resolver =
            SupplyDataResolver::new(ResolverChain::standard(), &ResolverConfig::default());
        let resolution = resolver.resolve(&ResolutionRequest::new("SUP002"));
        let json = serde_json::to_value(&resolution).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "supplier_id": "SUP002",
                "supplier_name": "GreenFabrics",
                "carbon_footprint_kg": 2.0,
                "source": "real",
                "cached": false,
            })
        );
    }
}
