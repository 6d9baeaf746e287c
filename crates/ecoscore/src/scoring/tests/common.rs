use crate::product::{ComponentNode, ComponentRole, CompositeNode, ImpactRecord};

pub(super) fn component(
    name: &str,
    weight_kg: f64,
    energy_mj: f64,
    water_l: f64,
    waste_kg: f64,
    recyclability: f64,
    recycled_content: f64,
) -> ComponentNode {
    ComponentNode::new(
        name,
        "cotton",
        ComponentRole::Fabric,
        ImpactRecord::new(
            energy_mj,
            water_l,
            waste_kg,
            recyclability,
            recycled_content,
            weight_kg,
        )
        .expect("valid impact"),
    )
    .expect("valid component")
}

pub(super) fn single(node: ComponentNode) -> CompositeNode {
    CompositeNode::new(node.name().to_string(), vec![node.into()])
}

/// 1 kg, 50 MJ, 200 L, 0.5 kg waste, 0.6 recyclable, 0.3 recycled.
pub(super) fn typical_fabric() -> CompositeNode {
    single(component("Test Fabric", 1.0, 50.0, 200.0, 0.5, 0.6, 0.3))
}

pub(super) fn eco_fabric() -> CompositeNode {
    single(component("Eco Fabric", 1.0, 20.0, 50.0, 0.1, 0.9, 0.8))
}

pub(super) fn high_impact_fabric() -> CompositeNode {
    single(component("Synthetic Fabric", 1.0, 150.0, 500.0, 2.0, 0.2, 0.0))
}

/// No energy, water or waste and fully circular materials.
pub(super) fn zero_burden_product() -> CompositeNode {
    CompositeNode::new("Ideal", Vec::new())
        .with_child(component("a", 0.3, 0.0, 0.0, 0.0, 1.0, 1.0))
        .with_child(CompositeNode::new(
            "trim",
            vec![component("b", 0.7, 0.0, 0.0, 0.0, 1.0, 1.0).into()],
        ))
}
