use super::impact::{ImpactDataError, ImpactRecord};
use super::materials::{material_impact, normalize_material_id};
use crate::reports::ProductVisitor;
use serde::{Deserialize, Serialize};

/// Position of a component within the garment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentRole {
    #[default]
    Fabric,
    Lining,
    Accessory,
    Trim,
}

impl ComponentRole {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fabric => "Fabric",
            Self::Lining => "Lining",
            Self::Accessory => "Accessory",
            Self::Trim => "Trim",
        }
    }
}

/// Leaf of the product tree. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentNode {
    name: String,
    material_id: String,
    role: ComponentRole,
    impact: ImpactRecord,
}

impl ComponentNode {
    pub fn new(
        name: impl Into<String>,
        material_id: impl Into<String>,
        role: ComponentRole,
        impact: ImpactRecord,
    ) -> Result<Self, ImpactDataError> {
        let impact = ImpactRecord::new(
            impact.energy_mj,
            impact.water_l,
            impact.waste_kg,
            impact.recyclability,
            impact.recycled_content,
            impact.weight_kg,
        )?;

        Ok(Self {
            name: name.into(),
            material_id: normalize_material_id(&material_id.into()),
            role,
            impact,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn material_id(&self) -> &str {
        &self.material_id
    }

    pub fn role(&self) -> ComponentRole {
        self.role
    }

    pub fn weight_kg(&self) -> f64 {
        self.impact.weight_kg
    }

    pub fn impact(&self) -> &ImpactRecord {
        &self.impact
    }

    /// CO2e estimate for this component based on its material factor.
    pub fn environmental_impact(&self) -> f64 {
        material_impact(&self.material_id) * self.impact.weight_kg
    }
}

/// Product or sub-assembly. Children are fixed at construction time, which
/// keeps the structure a tree.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeNode {
    name: String,
    children: Vec<ProductNode>,
}

impl CompositeNode {
    pub fn new(name: impl Into<String>, children: Vec<ProductNode>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    pub fn with_child(mut self, child: impl Into<ProductNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[ProductNode] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Recomputed on every call; nothing is memoised on the node.
    pub fn aggregate(&self) -> ImpactRecord {
        let mut totals = ImpactTotals::default();
        for child in &self.children {
            totals.accumulate(child);
        }
        totals.into_record()
    }

    /// All leaf descendants in depth-first order.
    pub fn components(&self) -> Vec<&ComponentNode> {
        let mut leaves = Vec::new();
        collect_components(&self.children, &mut leaves);
        leaves
    }

    pub fn accept<V: ProductVisitor>(&self, visitor: &mut V) {
        self.walk(visitor, 0);
    }

    fn walk<V: ProductVisitor>(&self, visitor: &mut V, depth: usize) {
        visitor.visit_composite(self, depth);
        for child in &self.children {
            child.walk(visitor, depth + 1);
        }
    }
}

/// A node of the product tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductNode {
    Component(ComponentNode),
    Composite(CompositeNode),
}

impl ProductNode {
    pub fn name(&self) -> &str {
        match self {
            ProductNode::Component(component) => component.name(),
            ProductNode::Composite(composite) => composite.name(),
        }
    }

    pub fn aggregate(&self) -> ImpactRecord {
        aggregate(self)
    }

    /// Depth-first traversal: a composite is visited before its children,
    /// children in insertion order.
    pub fn accept<V: ProductVisitor>(&self, visitor: &mut V) {
        self.walk(visitor, 0);
    }

    fn walk<V: ProductVisitor>(&self, visitor: &mut V, depth: usize) {
        match self {
            ProductNode::Component(component) => visitor.visit_component(component, depth),
            ProductNode::Composite(composite) => composite.walk(visitor, depth),
        }
    }
}

impl From<ComponentNode> for ProductNode {
    fn from(value: ComponentNode) -> Self {
        Self::Component(value)
    }
}

impl From<CompositeNode> for ProductNode {
    fn from(value: CompositeNode) -> Self {
        Self::Composite(value)
    }
}

/// Leaf records come back unchanged. Containers sum extensive metrics over
/// their leaf descendants and weight-average the intensive ones; with zero
/// total weight the intensive metrics are `0.0`.
pub fn aggregate(node: &ProductNode) -> ImpactRecord {
    match node {
        ProductNode::Component(component) => *component.impact(),
        ProductNode::Composite(composite) => composite.aggregate(),
    }
}

#[derive(Debug, Default)]
struct ImpactTotals {
    energy_mj: f64,
    water_l: f64,
    waste_kg: f64,
    weighted_recyclability: f64,
    weighted_recycled_content: f64,
    weight_kg: f64,
}

impl ImpactTotals {
    fn accumulate(&mut self, node: &ProductNode) {
        match node {
            ProductNode::Component(component) => self.add_leaf(component.impact()),
            ProductNode::Composite(composite) => {
                for child in composite.children() {
                    self.accumulate(child);
                }
            }
        }
    }

    fn add_leaf(&mut self, impact: &ImpactRecord) {
        self.energy_mj += impact.energy_mj;
        self.water_l += impact.water_l;
        self.waste_kg += impact.waste_kg;
        self.weighted_recyclability += impact.recyclability * impact.weight_kg;
        self.weighted_recycled_content += impact.recycled_content * impact.weight_kg;
        self.weight_kg += impact.weight_kg;
    }

    fn into_record(self) -> ImpactRecord {
        let (recyclability, recycled_content) = if self.weight_kg > 0.0 {
            (
                self.weighted_recyclability / self.weight_kg,
                self.weighted_recycled_content / self.weight_kg,
            )
        } else {
            (0.0, 0.0)
        };

        ImpactRecord {
            energy_mj: self.energy_mj,
            water_l: self.water_l,
            waste_kg: self.waste_kg,
            recyclability,
            recycled_content,
            weight_kg: self.weight_kg,
        }
    }
}

fn collect_components<'a>(children: &'a [ProductNode], leaves: &mut Vec<&'a ComponentNode>) {
    for child in children {
        match child {
            ProductNode::Component(component) => leaves.push(component),
            ProductNode::Composite(composite) => collect_components(composite.children(), leaves),
        }
    }
}
