use super::ProductVisitor;
use crate::product::{ComponentNode, ComponentRole, CompositeNode, ImpactRecord};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentLine {
    pub name: String,
    pub material: String,
    pub role: ComponentRole,
    pub role_label: &'static str,
    pub weight_kg: f64,
    pub environmental_impact: f64,
    pub energy_consumption_mj: f64,
    pub water_usage_liters: f64,
    pub waste_generation_kg: f64,
    pub recyclability_score: f64,
    pub recycled_content_percentage: f64,
}

impl ComponentLine {
    fn from_node(node: &ComponentNode) -> Self {
        let impact = node.impact();
        Self {
            name: node.name().to_string(),
            material: node.material_id().to_string(),
            role: node.role(),
            role_label: node.role().label(),
            weight_kg: impact.weight_kg,
            environmental_impact: node.environmental_impact(),
            energy_consumption_mj: impact.energy_mj,
            water_usage_liters: impact.water_l,
            waste_generation_kg: impact.waste_kg,
            recyclability_score: impact.recyclability,
            recycled_content_percentage: impact.recycled_content,
        }
    }
}

/// One product or sub-assembly with the components directly beneath it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSection {
    pub name: String,
    pub depth: usize,
    pub impact_factors: ImpactRecord,
    pub components: Vec<ComponentLine>,
}

/// Structured data a PDF renderer lays out, one section per composite.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PdfReport {
    pub products: Vec<ProductSection>,
}

impl PdfReport {
    /// Plain-text rendering of the same data.
    pub fn render_text(&self) -> String {
        let mut lines = Vec::new();
        for section in &self.products {
            let indent = "  ".repeat(section.depth);
            lines.push(format!("{indent}Product Report: {}", section.name));
            lines.push(format!("{indent}{}", "-".repeat(60)));
            for component in &section.components {
                lines.push(format!(
                    "{indent}  - Component: {:<20} | Material: {:<20} | Weight: {:.2} kg",
                    component.name, component.material, component.weight_kg
                ));
            }
            lines.push(String::new());
        }
        lines.join("\n")
    }
}

#[derive(Debug, Default)]
pub struct PdfReportVisitor {
    sections: Vec<ProductSection>,
    /// Index into `sections` for each open composite, by depth.
    open: Vec<usize>,
}

impl ProductVisitor for PdfReportVisitor {
    type Output = PdfReport;

    fn visit_composite(&mut self, node: &CompositeNode, depth: usize) {
        self.open.truncate(depth);
        self.open.push(self.sections.len());
        self.sections.push(ProductSection {
            name: node.name().to_string(),
            depth,
            impact_factors: node.aggregate(),
            components: Vec::new(),
        });
    }

    fn visit_component(&mut self, node: &ComponentNode, depth: usize) {
        self.open.truncate(depth);
        if let Some(&parent) = self.open.last() {
            self.sections[parent]
                .components
                .push(ComponentLine::from_node(node));
        }
    }

    fn finish(self) -> Self::Output {
        PdfReport {
            products: self.sections,
        }
    }
}
