use super::impact::ImpactRecord;
use super::node::{ComponentNode, ComponentRole, CompositeNode, ProductNode};
use crate::error::CoreError;
use serde::{Deserialize, Serialize};

/// Already-parsed component data handed over by the boundary layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub name: String,
    pub material: String,
    pub weight_kg: f64,
    #[serde(default)]
    pub role: ComponentRole,
    #[serde(default)]
    pub energy_consumption_mj: f64,
    #[serde(default)]
    pub water_usage_liters: f64,
    #[serde(default)]
    pub waste_generation_kg: f64,
    #[serde(default)]
    pub recyclability_score: f64,
    #[serde(default)]
    pub recycled_content_percentage: f64,
}

impl ComponentRecord {
    pub fn new(name: impl Into<String>, material: impl Into<String>, weight_kg: f64) -> Self {
        Self {
            name: name.into(),
            material: material.into(),
            weight_kg,
            role: ComponentRole::default(),
            energy_consumption_mj: 0.0,
            water_usage_liters: 0.0,
            waste_generation_kg: 0.0,
            recyclability_score: 0.0,
            recycled_content_percentage: 0.0,
        }
    }

    pub fn into_node(self) -> Result<ComponentNode, CoreError> {
        let impact = ImpactRecord {
            energy_mj: self.energy_consumption_mj,
            water_l: self.water_usage_liters,
            waste_kg: self.waste_generation_kg,
            recyclability: self.recyclability_score,
            recycled_content: self.recycled_content_percentage,
            weight_kg: self.weight_kg,
        };
        Ok(ComponentNode::new(
            self.name,
            self.material,
            self.role,
            impact,
        )?)
    }
}

/// A loaded product or sub-assembly, possibly nested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: String,
    #[serde(default)]
    pub components: Vec<ComponentRecord>,
    #[serde(default)]
    pub assemblies: Vec<ProductRecord>,
    /// Badge identifiers applied when the product is scored.
    #[serde(default)]
    pub badges: Vec<String>,
}

/// Builds the composite tree for a loaded product. Direct components come
/// first, nested assemblies after them, each in input order.
pub fn build_tree(record: &ProductRecord) -> Result<CompositeNode, CoreError> {
    let mut children = Vec::with_capacity(record.components.len() + record.assemblies.len());

    for component in &record.components {
        children.push(ProductNode::Component(component.clone().into_node()?));
    }
    for assembly in &record.assemblies {
        children.push(ProductNode::Composite(build_tree(assembly)?));
    }

    Ok(CompositeNode::new(record.name.clone(), children))
}

/// Step-by-step construction of a garment from its parts.
#[derive(Debug, Clone)]
pub struct ProductBuilder {
    name: String,
    parts: Vec<Part>,
}

#[derive(Debug, Clone)]
enum Part {
    Component(ComponentRecord),
    Assembly(CompositeNode),
}

impl ProductBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parts: Vec::new(),
        }
    }

    pub fn add_fabric(self, component: ComponentRecord) -> Self {
        self.add_with_role(component, ComponentRole::Fabric)
    }

    pub fn add_lining(self, component: ComponentRecord) -> Self {
        self.add_with_role(component, ComponentRole::Lining)
    }

    pub fn add_accessory(self, component: ComponentRecord) -> Self {
        self.add_with_role(component, ComponentRole::Accessory)
    }

    pub fn add_trim(self, component: ComponentRecord) -> Self {
        self.add_with_role(component, ComponentRole::Trim)
    }

    pub fn add_assembly(mut self, assembly: CompositeNode) -> Self {
        self.parts.push(Part::Assembly(assembly));
        self
    }

    /// Validates every staged component; the first invalid one aborts.
    pub fn build(self) -> Result<CompositeNode, CoreError> {
        let mut children = Vec::with_capacity(self.parts.len());
        for part in self.parts {
            let node = match part {
                Part::Component(record) => ProductNode::Component(record.into_node()?),
                Part::Assembly(assembly) => ProductNode::Composite(assembly),
            };
            children.push(node);
        }
        Ok(CompositeNode::new(self.name, children))
    }

    fn add_with_role(mut self, mut component: ComponentRecord, role: ComponentRole) -> Self {
        component.role = role;
        self.parts.push(Part::Component(component));
        self
    }
}
