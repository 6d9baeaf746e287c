use super::ProductVisitor;
use crate::product::materials::known_material_impact;
use crate::product::{ComponentNode, CompositeNode};
use serde::Serialize;

const WATER_BENCHMARK_L_PER_KG: f64 = 500.0;
const ENERGY_BENCHMARK_MJ_PER_KG: f64 = 100.0;
const CRITICAL_WASTE_KG_PER_KG: f64 = 2.0;
const LINEAR_RECYCLABILITY_FLOOR: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSeverity {
    Info,
    Warning,
    Critical,
}

impl AuditSeverity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditFinding {
    /// Slash-separated path from the root product to the flagged node.
    pub path: String,
    pub severity: AuditSeverity,
    pub severity_label: &'static str,
    pub issue: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComplianceAuditReport {
    pub product: String,
    pub components_checked: usize,
    pub findings: Vec<AuditFinding>,
    /// False when any finding is critical.
    pub passed: bool,
}

impl ComplianceAuditReport {
    pub fn highest_severity(&self) -> Option<AuditSeverity> {
        self.findings.iter().map(|finding| finding.severity).max()
    }
}

/// Flags components whose impact data breaches audit thresholds.
#[derive(Debug, Default)]
pub struct ComplianceAuditVisitor {
    product: Option<String>,
    ancestors: Vec<String>,
    components_checked: usize,
    findings: Vec<AuditFinding>,
}

impl ComplianceAuditVisitor {
    fn path_to(&self, name: &str) -> String {
        let mut segments: Vec<&str> = self.ancestors.iter().map(String::as_str).collect();
        segments.push(name);
        segments.join(" / ")
    }

    fn flag(&mut self, path: &str, severity: AuditSeverity, issue: String) {
        self.findings.push(AuditFinding {
            path: path.to_string(),
            severity,
            severity_label: severity.label(),
            issue,
        });
    }
}

impl ProductVisitor for ComplianceAuditVisitor {
    type Output = ComplianceAuditReport;

    fn visit_composite(&mut self, node: &CompositeNode, depth: usize) {
        self.ancestors.truncate(depth);
        if self.product.is_none() {
            self.product = Some(node.name().to_string());
        }
        if node.is_empty() {
            let path = self.path_to(node.name());
            self.flag(
                &path,
                AuditSeverity::Info,
                "assembly has no components".to_string(),
            );
        }
        self.ancestors.push(node.name().to_string());
    }

    fn visit_component(&mut self, node: &ComponentNode, depth: usize) {
        self.ancestors.truncate(depth);
        self.components_checked += 1;

        let path = self.path_to(node.name());
        let impact = node.impact();
        let per_kg = impact.per_kg();

        if impact.weight_kg == 0.0 {
            self.flag(
                &path,
                AuditSeverity::Info,
                "zero weight; excluded from weighted averages".to_string(),
            );
        }
        if known_material_impact(node.material_id()).is_none() {
            self.flag(
                &path,
                AuditSeverity::Info,
                format!(
                    "material '{}' not in catalogue; default factor applied",
                    node.material_id()
                ),
            );
        }
        if per_kg.water_per_kg > WATER_BENCHMARK_L_PER_KG {
            self.flag(
                &path,
                AuditSeverity::Warning,
                format!(
                    "water use {:.1} L/kg exceeds benchmark {:.0}",
                    per_kg.water_per_kg, WATER_BENCHMARK_L_PER_KG
                ),
            );
        }
        if per_kg.energy_per_kg > ENERGY_BENCHMARK_MJ_PER_KG {
            self.flag(
                &path,
                AuditSeverity::Warning,
                format!(
                    "energy use {:.1} MJ/kg exceeds benchmark {:.0}",
                    per_kg.energy_per_kg, ENERGY_BENCHMARK_MJ_PER_KG
                ),
            );
        }
        if impact.recycled_content == 0.0 && impact.recyclability < LINEAR_RECYCLABILITY_FLOOR {
            self.flag(
                &path,
                AuditSeverity::Warning,
                "linear material: no recycled content and poor recyclability".to_string(),
            );
        }
        if per_kg.waste_per_kg > CRITICAL_WASTE_KG_PER_KG {
            self.flag(
                &path,
                AuditSeverity::Critical,
                format!(
                    "waste {:.2} kg/kg exceeds critical threshold {:.1}",
                    per_kg.waste_per_kg, CRITICAL_WASTE_KG_PER_KG
                ),
            );
        }
    }

    fn finish(self) -> Self::Output {
        let passed = self
            .findings
            .iter()
            .all(|finding| finding.severity != AuditSeverity::Critical);

        ComplianceAuditReport {
            product: self.product.unwrap_or_default(),
            components_checked: self.components_checked,
            findings: self.findings,
            passed,
        }
    }
}
