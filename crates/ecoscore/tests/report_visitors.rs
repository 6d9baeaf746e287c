use ecoscore::error::CoreError;
use ecoscore::product::{ComponentNode, ComponentRole, CompositeNode, ImpactRecord};
use ecoscore::reports::{
    run, run_visitor, AuditSeverity, ComplianceAuditVisitor, MaterialBreakdownVisitor,
    PdfReportVisitor, ProductVisitor, ReportPayload, VisitorRegistry,
};

#[allow(clippy::too_many_arguments)]
fn part(
    name: &str,
    material: &str,
    weight_kg: f64,
    energy_mj: f64,
    water_l: f64,
    waste_kg: f64,
    recyclability: f64,
    recycled_content: f64,
) -> ComponentNode {
    ComponentNode::new(
        name,
        material,
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

/// Jacket
/// ├── Shell
/// ├── Inner
/// │   ├── Lining
/// │   └── Zipper
/// └── Patch
fn jacket() -> CompositeNode {
    CompositeNode::new("Jacket", Vec::new())
        .with_child(part("Shell", "cotton", 0.5, 20.0, 100.0, 0.05, 0.8, 0.5))
        .with_child(CompositeNode::new(
            "Inner",
            vec![
                part("Lining", "organic cotton", 0.2, 10.0, 540.0, 0.04, 1.0, 0.0).into(),
                part("Zipper", "metal", 0.05, 9.0, 2.0, 0.01, 0.9, 0.3).into(),
            ],
        ))
        .with_child(part("Patch", "mystery fibre", 0.0, 0.0, 0.0, 0.0, 0.0, 0.0))
}

#[derive(Default)]
struct TraceVisitor {
    visits: Vec<(String, usize)>,
}

impl ProductVisitor for TraceVisitor {
    type Output = Vec<(String, usize)>;

    fn visit_composite(&mut self, node: &CompositeNode, depth: usize) {
        self.visits.push((format!("composite:{}", node.name()), depth));
    }

    fn visit_component(&mut self, node: &ComponentNode, depth: usize) {
        self.visits.push((format!("component:{}", node.name()), depth));
    }

    fn finish(self) -> Self::Output {
        self.visits
    }
}

#[test]
fn traversal_is_depth_first_parent_before_children() {
    let trace = run(&jacket(), TraceVisitor::default());
    let expected = [
        ("composite:Jacket", 0),
        ("component:Shell", 1),
        ("composite:Inner", 1),
        ("component:Lining", 2),
        ("component:Zipper", 2),
        ("component:Patch", 1),
    ];
    let expected: Vec<(String, usize)> = expected
        .iter()
        .map(|(name, depth)| (name.to_string(), *depth))
        .collect();
    assert_eq!(trace, expected);
}

#[test]
fn pdf_report_groups_components_under_their_assembly() {
    let report = run(&jacket(), PdfReportVisitor::default());
    assert_eq!(report.products.len(), 2);

    let root = &report.products[0];
    assert_eq!(root.name, "Jacket");
    assert_eq!(root.depth, 0);
    let root_parts: Vec<_> = root.components.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(root_parts, vec!["Shell", "Patch"]);
    assert!((root.impact_factors.weight_kg - 0.75).abs() < 1e-9);

    let inner = &report.products[1];
    assert_eq!(inner.depth, 1);
    let inner_parts: Vec<_> = inner.components.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(inner_parts, vec!["Lining", "Zipper"]);
    assert!((inner.components[1].environmental_impact - 0.75).abs() < 1e-9);

    let text = report.render_text();
    assert!(text.contains("Product Report: Jacket"));
    assert!(text.contains("  Product Report: Inner"));
}

#[test]
fn compliance_audit_flags_threshold_breaches() {
    let report = run(&jacket(), ComplianceAuditVisitor::default());
    assert_eq!(report.product, "Jacket");
    assert_eq!(report.components_checked, 4);
    assert!(report.passed);
    assert_eq!(report.highest_severity(), Some(AuditSeverity::Warning));

    let flagged = |path: &str| {
        report
            .findings
            .iter()
            .filter(|finding| finding.path == path)
            .map(|finding| finding.severity)
            .collect::<Vec<_>>()
    };

    assert!(flagged("Jacket / Shell").is_empty());
    assert_eq!(flagged("Jacket / Inner / Lining"), vec![AuditSeverity::Warning]);
    assert_eq!(flagged("Jacket / Inner / Zipper"), vec![AuditSeverity::Warning]);
    assert_eq!(
        flagged("Jacket / Patch"),
        vec![
            AuditSeverity::Info,
            AuditSeverity::Info,
            AuditSeverity::Warning
        ]
    );
    assert_eq!(report.findings.len(), 5);
}

#[test]
fn compliance_audit_fails_on_critical_waste() {
    let product = CompositeNode::new(
        "Offcut Bag",
        vec![part("Body", "polyester", 1.0, 10.0, 10.0, 3.0, 0.6, 0.6).into()],
    );
    let report = run(&product, ComplianceAuditVisitor::default());
    assert!(!report.passed);
    assert_eq!(report.highest_severity(), Some(AuditSeverity::Critical));
}

#[test]
fn material_breakdown_shares_sum_to_one() {
    let report = run(&jacket(), MaterialBreakdownVisitor::default());
    let materials: Vec<_> = report.materials.iter().map(|m| m.material.as_str()).collect();
    assert_eq!(
        materials,
        vec!["cotton", "organic_cotton", "metal", "mystery_fibre"]
    );

    let total_share: f64 = report.materials.iter().map(|m| m.weight_share).sum();
    assert!((total_share - 1.0).abs() < 1e-9);
    assert!((report.materials[0].weight_share - 0.5 / 0.75).abs() < 1e-9);
    assert!((report.materials[0].co2e_kg - 4.0).abs() < 1e-9);
    assert_eq!(report.materials[3].weight_share, 0.0);
}

#[test]
fn weightless_product_has_zero_shares() {
    let product = CompositeNode::new(
        "Sample",
        vec![part("Swatch", "linen", 0.0, 0.0, 0.0, 0.0, 0.5, 0.5).into()],
    );
    let report = run(&product, MaterialBreakdownVisitor::default());
    assert_eq!(report.total_weight_kg, 0.0);
    assert_eq!(report.materials[0].weight_share, 0.0);
}

#[test]
fn registry_dispatches_by_identifier_without_mutating_the_tree() {
    let product = jacket();
    let before = product.clone();

    let payload =
        run_visitor(&product, VisitorRegistry::MATERIAL_BREAKDOWN).expect("known visitor");
    assert!(matches!(payload, ReportPayload::MaterialBreakdown(_)));
    let json = serde_json::to_value(&payload).expect("serialize");
    assert_eq!(json["report"], "material_breakdown");
    assert_eq!(json["product"], "Jacket");

    let err = run_visitor(&product, "social").expect_err("unknown visitor");
    assert_eq!(err, CoreError::UnknownVisitor("social".to_string()));
    assert_eq!(product, before);

    let ids: Vec<_> = VisitorRegistry::standard().ids().collect();
    assert_eq!(ids, vec!["compliance_audit", "material_breakdown", "pdf"]);
}

#[derive(Default)]
struct RoleCountVisitor {
    assemblies: usize,
    components: usize,
}

#[derive(serde::Serialize)]
struct RoleCount {
    assemblies: usize,
    components: usize,
}

impl ProductVisitor for RoleCountVisitor {
    type Output = RoleCount;

    fn visit_composite(&mut self, _node: &CompositeNode, _depth: usize) {
        self.assemblies += 1;
    }

    fn visit_component(&mut self, _node: &ComponentNode, _depth: usize) {
        self.components += 1;
    }

    fn finish(self) -> Self::Output {
        RoleCount {
            assemblies: self.assemblies,
            components: self.components,
        }
    }
}

#[test]
fn registry_accepts_new_visitors_with_their_own_output() {
    let mut registry = VisitorRegistry::standard();
    registry.register("node_count", |product| {
        ReportPayload::custom("node_count", &run(product, RoleCountVisitor::default()))
    });
    assert!(registry.contains("node_count"));

    let payload = registry.run(&jacket(), "node_count").expect("registered");
    let json = serde_json::to_value(&payload).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!({
            "report": "custom",
            "visitor": "node_count",
            "data": { "assemblies": 2, "components": 4 },
        })
    );
}

#[test]
fn registry_lookup_ignores_surrounding_whitespace() {
    let registry = VisitorRegistry::standard();
    assert!(registry.contains(" pdf "));
    assert!(registry.run(&jacket(), " pdf ").is_ok());
    assert!(!registry.contains("social"));
}
