use super::ProductVisitor;
use crate::product::materials::material_impact;
use crate::product::{ComponentNode, CompositeNode};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialShare {
    pub material: String,
    pub component_count: usize,
    pub weight_kg: f64,
    /// Fraction of total product weight, `0.0` when the product weighs nothing.
    pub weight_share: f64,
    pub co2e_kg: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MaterialBreakdownReport {
    pub product: String,
    pub total_weight_kg: f64,
    /// Materials in order of first appearance.
    pub materials: Vec<MaterialShare>,
}

/// Groups leaf weight and CO2e by material.
#[derive(Debug, Default)]
pub struct MaterialBreakdownVisitor {
    product: Option<String>,
    materials: Vec<MaterialShare>,
}

impl ProductVisitor for MaterialBreakdownVisitor {
    type Output = MaterialBreakdownReport;

    fn visit_composite(&mut self, node: &CompositeNode, _depth: usize) {
        if self.product.is_none() {
            self.product = Some(node.name().to_string());
        }
    }

    fn visit_component(&mut self, node: &ComponentNode, _depth: usize) {
        let material = node.material_id();
        let position = match self
            .materials
            .iter()
            .position(|share| share.material == material)
        {
            Some(position) => position,
            None => {
                self.materials.push(MaterialShare {
                    material: material.to_string(),
                    component_count: 0,
                    weight_kg: 0.0,
                    weight_share: 0.0,
                    co2e_kg: 0.0,
                });
                self.materials.len() - 1
            }
        };

        let share = &mut self.materials[position];
        share.component_count += 1;
        share.weight_kg += node.weight_kg();
        share.co2e_kg += material_impact(material) * node.weight_kg();
    }

    fn finish(mut self) -> Self::Output {
        let total_weight_kg: f64 = self.materials.iter().map(|share| share.weight_kg).sum();
        if total_weight_kg > 0.0 {
            for share in &mut self.materials {
                share.weight_share = share.weight_kg / total_weight_kg;
            }
        }

        MaterialBreakdownReport {
            product: self.product.unwrap_or_default(),
            total_weight_kg,
            materials: self.materials,
        }
    }
}
