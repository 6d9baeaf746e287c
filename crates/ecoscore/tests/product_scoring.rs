use ecoscore::config::ScoringConfig;
use ecoscore::error::CoreError;
use ecoscore::product::{
    build_tree, ComponentNode, ComponentRecord, ComponentRole, CompositeNode, ImpactDataError,
    ImpactRecord, ProductBuilder, ProductRecord,
};
use ecoscore::scoring::{
    apply_badge, HiggIndexStrategy, ScoredEntity, ScoringEngine, ScoringParams, StrategyScore,
};

const EPSILON: f64 = 1e-9;

fn leaf(name: &str, weight_kg: f64, energy_mj: f64, recyclability: f64) -> ComponentNode {
    ComponentNode::new(
        name,
        "cotton",
        ComponentRole::Fabric,
        ImpactRecord::new(energy_mj, 10.0, 0.01, recyclability, 0.0, weight_kg)
            .expect("valid impact"),
    )
    .expect("valid component")
}

/// One 0.2 kg cotton part: 10 MJ, 540 L, 0.04 kg waste, fully recyclable, no
/// recycled input.
fn cotton_tee() -> CompositeNode {
    ProductBuilder::new("Cotton Tee")
        .add_fabric(ComponentRecord {
            energy_consumption_mj: 10.0,
            water_usage_liters: 540.0,
            waste_generation_kg: 0.04,
            recyclability_score: 1.0,
            recycled_content_percentage: 0.0,
            ..ComponentRecord::new("Body", "cotton", 0.2)
        })
        .build()
        .expect("valid product")
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn intensive_metrics_are_weight_averaged() {
    let product = CompositeNode::new(
        "Blend",
        vec![leaf("light", 0.2, 4.0, 1.0).into(), leaf("heavy", 0.8, 6.0, 0.0).into()],
    );

    let aggregate = product.aggregate();
    assert_close(aggregate.weight_kg, 1.0);
    assert_close(aggregate.energy_mj, 10.0);
    assert_close(aggregate.water_l, 20.0);
    assert_close(aggregate.recyclability, 0.2);
}

#[test]
fn aggregation_ignores_child_order_and_nesting() {
    let a = leaf("a", 0.3, 12.0, 0.9);
    let b = leaf("b", 0.5, 3.0, 0.1);
    let c = leaf("c", 1.2, 40.0, 0.6);

    let flat = CompositeNode::new(
        "flat",
        vec![a.clone().into(), b.clone().into(), c.clone().into()],
    );
    let nested = CompositeNode::new(
        "nested",
        vec![
            c.into(),
            CompositeNode::new("inner", vec![b.into(), a.into()]).into(),
        ],
    );

    let left = flat.aggregate();
    let right = nested.aggregate();
    assert_close(left.weight_kg, right.weight_kg);
    assert_close(left.energy_mj, right.energy_mj);
    assert_close(left.water_l, right.water_l);
    assert_close(left.waste_kg, right.waste_kg);
    assert_close(left.recyclability, right.recyclability);
    assert_close(left.recycled_content, right.recycled_content);
}

#[test]
fn empty_and_weightless_products_aggregate_to_zero_ratios() {
    assert_eq!(CompositeNode::new("empty", Vec::new()).aggregate(), ImpactRecord::zero());

    let weightless = CompositeNode::new("ghost", vec![leaf("ghost", 0.0, 5.0, 1.0).into()]);
    let aggregate = weightless.aggregate();
    assert_close(aggregate.energy_mj, 5.0);
    assert_close(aggregate.weight_kg, 0.0);
    assert_close(aggregate.recyclability, 0.0);
}

#[test]
fn vegan_cotton_tee_scores_deterministically() {
    let product = cotton_tee();
    let engine = ScoringEngine::new(ScoringConfig::default());
    let params = ScoringParams::new();

    let first = engine
        .scorecard(&product, HiggIndexStrategy::ID, &params, &["vegan"])
        .expect("scorecard");
    assert_close(first.base_score, -97.0);
    assert_close(first.badge_adjustment, -3.0);
    assert_close(first.final_score, -100.0);
    assert!(!first.clamped);

    for _ in 0..5 {
        let again = engine
            .scorecard(&product, HiggIndexStrategy::ID, &params, &["vegan"])
            .expect("scorecard");
        assert_eq!(again, first);
    }

    let entity: Box<dyn ScoredEntity + '_> =
        Box::new(StrategyScore::new(Box::new(HiggIndexStrategy), &product));
    let decorated = apply_badge(entity, "vegan").expect("known badge");
    assert_close(decorated.compute_score(), -100.0);
}

#[test]
fn clamping_is_opt_in() {
    let product = cotton_tee();
    let params = ScoringParams::new();
    let clamping = ScoringEngine::new(ScoringConfig { clamp_scores: true });

    let breakdown = clamping
        .scorecard(&product, HiggIndexStrategy::ID, &params, &["vegan"])
        .expect("scorecard");
    assert_eq!(breakdown.final_score, 0.0);
    assert!(breakdown.clamped);
}

#[test]
fn unknown_strategy_leaves_tree_untouched() {
    let product = cotton_tee();
    let before = product.clone();
    let engine = ScoringEngine::default();

    let err = engine
        .score(&product, "does_not_exist", &ScoringParams::new())
        .expect_err("unknown strategy");
    assert_eq!(err, CoreError::UnknownStrategy("does_not_exist".to_string()));
    assert_eq!(product, before);
}

#[test]
fn product_records_deserialize_into_trees() {
    let record: ProductRecord = serde_json::from_value(serde_json::json!({
        "name": "Parka",
        "badges": ["oekotex"],
        "assemblies": [
            { "name": "Hood", "components": [
                { "name": "Fur trim", "material": "faux leather", "weight_kg": 0.1, "role": "trim" }
            ]}
        ],
        "components": [
            {
                "name": "Shell",
                "material": "nylon",
                "weight_kg": 0.9,
                "energy_consumption_mj": 40.0
            }
        ]
    }))
    .expect("valid record");

    let product = build_tree(&record).expect("valid tree");
    let names: Vec<_> = product.children().iter().map(|child| child.name()).collect();
    assert_eq!(names, vec!["Shell", "Hood"]);

    let leaves = product.components();
    assert_eq!(leaves[1].material_id(), "faux_leather");
    assert_eq!(leaves[1].role(), ComponentRole::Trim);
    assert_close(product.aggregate().weight_kg, 1.0);
}

#[test]
fn invalid_component_data_is_rejected() {
    let record = ProductRecord {
        name: "Broken".to_string(),
        components: vec![ComponentRecord::new("Shell", "cotton", -1.0)],
        ..ProductRecord::default()
    };

    match build_tree(&record) {
        Err(CoreError::InvalidImpactData(ImpactDataError::Negative { field, value })) => {
            assert_eq!(field, "weight_kg");
            assert_eq!(value, -1.0);
        }
        other => panic!("expected negative weight error, got {other:?}"),
    }
}
