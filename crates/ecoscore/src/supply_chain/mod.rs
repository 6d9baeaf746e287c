//! Resolution of missing supplier carbon data: an ordered chain of real
//! sources ending in a synthetic estimate, memoised behind a TTL cache.

mod cache;
mod clock;
mod resolver;

pub use cache::{CacheStats, ResolutionCache};
pub use clock::{Clock, SystemClock};
pub use resolver::{Resolution, ResolverChain, SupplyDataResolver};

use crate::product::materials::normalize_material_id;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionRequest {
    pub supplier_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_id: Option<String>,
}

impl ResolutionRequest {
    pub fn new(supplier_id: impl Into<String>) -> Self {
        Self {
            supplier_id: supplier_id.into(),
            material_id: None,
        }
    }

    pub fn with_material(mut self, material_id: impl Into<String>) -> Self {
        self.material_id = Some(material_id.into());
        self
    }

    /// Cache key covering every dimension of the request.
    pub fn fingerprint(&self) -> Fingerprint {
        let supplier = self.supplier_id.trim();
        match self.material_id.as_deref().map(normalize_material_id) {
            Some(material) if !material.is_empty() => {
                Fingerprint(format!("supplier={supplier}|material={material}"))
            }
            _ => Fingerprint(format!("supplier={supplier}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Real,
    AiEstimated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierFacts {
    pub supplier_name: String,
    pub carbon_footprint_kg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionResult {
    pub supplier_id: String,
    pub supplier_name: String,
    pub carbon_footprint_kg: f64,
    pub source: DataSource,
}

impl ResolutionResult {
    fn from_facts(request: &ResolutionRequest, facts: SupplierFacts, source: DataSource) -> Self {
        Self {
            supplier_id: request.supplier_id.clone(),
            supplier_name: facts.supplier_name,
            carbon_footprint_kg: facts.carbon_footprint_kg,
            source,
        }
    }
}

/// A source of verified supplier data. `None` means "no data", never an error.
pub trait SupplierLookup: Send + Sync {
    fn lookup(&self, request: &ResolutionRequest) -> Option<SupplierFacts>;
}

impl<F> SupplierLookup for F
where
    F: Fn(&ResolutionRequest) -> Option<SupplierFacts> + Send + Sync,
{
    fn lookup(&self, request: &ResolutionRequest) -> Option<SupplierFacts> {
        self(request)
    }
}

/// Last link of the chain; always produces a value.
pub trait CarbonEstimator: Send + Sync {
    fn estimate(&self, request: &ResolutionRequest) -> SupplierFacts;
}

impl<F> CarbonEstimator for F
where
    F: Fn(&ResolutionRequest) -> SupplierFacts + Send + Sync,
{
    fn estimate(&self, request: &ResolutionRequest) -> SupplierFacts {
        self(request)
    }
}

/// In-memory supplier table keyed by supplier id.
#[derive(Debug, Clone, Default)]
pub struct StaticSupplierTable {
    suppliers: HashMap<String, SupplierFacts>,
}

impl StaticSupplierTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample() -> Self {
        Self::new()
            .with_supplier("SUP001", "EcoTextiles", 1.5)
            .with_supplier("SUP002", "GreenFabrics", 2.0)
    }

    pub fn with_supplier(
        mut self,
        supplier_id: impl Into<String>,
        supplier_name: impl Into<String>,
        carbon_footprint_kg: f64,
    ) -> Self {
        self.suppliers.insert(
            supplier_id.into(),
            SupplierFacts {
                supplier_name: supplier_name.into(),
                carbon_footprint_kg,
            },
        );
        self
    }

    pub fn len(&self) -> usize {
        self.suppliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suppliers.is_empty()
    }
}

impl SupplierLookup for StaticSupplierTable {
    fn lookup(&self, request: &ResolutionRequest) -> Option<SupplierFacts> {
        self.suppliers.get(request.supplier_id.trim()).cloned()
    }
}

/// Placeholder estimator returning the same footprint for every supplier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedEstimate {
    pub carbon_footprint_kg: f64,
}

impl FixedEstimate {
    pub const DEFAULT_CARBON_FOOTPRINT_KG: f64 = 3.5;
}

impl Default for FixedEstimate {
    fn default() -> Self {
        Self {
            carbon_footprint_kg: Self::DEFAULT_CARBON_FOOTPRINT_KG,
        }
    }
}

impl CarbonEstimator for FixedEstimate {
    fn estimate(&self, request: &ResolutionRequest) -> SupplierFacts {
        let supplier = request.supplier_id.trim();
        let supplier = if supplier.is_empty() { "unknown" } else { supplier };
        SupplierFacts {
            supplier_name: format!("AI_Estimated_{supplier}"),
            carbon_footprint_kg: self.carbon_footprint_kg,
        }
    }
}
