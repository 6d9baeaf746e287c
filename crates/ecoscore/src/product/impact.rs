use serde::{Deserialize, Serialize};

/// Raw environmental metrics for one unit of material.
///
/// `energy_mj`, `water_l` and `waste_kg` are extensive totals for the whole
/// unit; `recyclability` and `recycled_content` are intensive ratios in
/// `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ImpactRecord {
    pub energy_mj: f64,
    pub water_l: f64,
    pub waste_kg: f64,
    pub recyclability: f64,
    pub recycled_content: f64,
    pub weight_kg: f64,
}

impl ImpactRecord {
    /// Validates and builds a record. Values are never clamped.
    pub fn new(
        energy_mj: f64,
        water_l: f64,
        waste_kg: f64,
        recyclability: f64,
        recycled_content: f64,
        weight_kg: f64,
    ) -> Result<Self, ImpactDataError> {
        non_negative("energy_mj", energy_mj)?;
        non_negative("water_l", water_l)?;
        non_negative("waste_kg", waste_kg)?;
        ratio("recyclability", recyclability)?;
        ratio("recycled_content", recycled_content)?;
        non_negative("weight_kg", weight_kg)?;

        Ok(Self {
            energy_mj,
            water_l,
            waste_kg,
            recyclability,
            recycled_content,
            weight_kg,
        })
    }

    pub const fn zero() -> Self {
        Self {
            energy_mj: 0.0,
            water_l: 0.0,
            waste_kg: 0.0,
            recyclability: 0.0,
            recycled_content: 0.0,
            weight_kg: 0.0,
        }
    }

    /// Extensive metrics divided by weight. A weight of zero is treated as
    /// one kilogram so strategies never divide by zero.
    pub fn per_kg(&self) -> NormalizedImpact {
        let weight = if self.weight_kg > 0.0 {
            self.weight_kg
        } else {
            1.0
        };

        NormalizedImpact {
            energy_per_kg: self.energy_mj / weight,
            water_per_kg: self.water_l / weight,
            waste_per_kg: self.waste_kg / weight,
            recyclability: self.recyclability,
            recycled_content: self.recycled_content,
        }
    }
}

/// Weight-normalised view of an [`ImpactRecord`] consumed by strategies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizedImpact {
    pub energy_per_kg: f64,
    pub water_per_kg: f64,
    pub waste_per_kg: f64,
    pub recyclability: f64,
    pub recycled_content: f64,
}

/// Rejected impact input. Raised when a node is built, never later.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ImpactDataError {
    #[error("{field} must be a finite, non-negative number (got {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be a ratio between 0 and 1 (got {value})")]
    RatioOutOfRange { field: &'static str, value: f64 },
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ImpactDataError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ImpactDataError::Negative { field, value })
    }
}

fn ratio(field: &'static str, value: f64) -> Result<(), ImpactDataError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ImpactDataError::RatioOutOfRange { field, value })
    }
}
