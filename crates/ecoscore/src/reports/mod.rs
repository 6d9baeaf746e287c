//! Read-only analyses over a product tree. New reports are added as new
//! visitor types; the node types never change for them.

mod compliance;
mod materials;
mod pdf;

pub use compliance::{AuditFinding, AuditSeverity, ComplianceAuditReport, ComplianceAuditVisitor};
pub use materials::{MaterialBreakdownReport, MaterialBreakdownVisitor, MaterialShare};
pub use pdf::{ComponentLine, PdfReport, PdfReportVisitor, ProductSection};

use crate::error::CoreError;
use crate::product::{ComponentNode, CompositeNode};
use serde::Serialize;
use std::collections::BTreeMap;

/// Depth-first traversal callbacks. Composites are visited before their
/// children; the root has depth `0`.
pub trait ProductVisitor {
    type Output;

    fn visit_composite(&mut self, node: &CompositeNode, depth: usize);
    fn visit_component(&mut self, node: &ComponentNode, depth: usize);
    fn finish(self) -> Self::Output;
}

/// Runs `visitor` over `product` and returns its accumulated output.
pub fn run<V: ProductVisitor>(product: &CompositeNode, mut visitor: V) -> V::Output {
    product.accept(&mut visitor);
    visitor.finish()
}

/// Output of any registered visitor, tagged by report kind.
///
/// Visitors registered outside this crate report through `Custom`, so a new
/// output type needs no new variant here.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "report", rename_all = "snake_case")]
pub enum ReportPayload {
    Pdf(PdfReport),
    ComplianceAudit(ComplianceAuditReport),
    MaterialBreakdown(MaterialBreakdownReport),
    Custom {
        visitor: String,
        data: serde_json::Value,
    },
}

impl ReportPayload {
    /// Wraps an arbitrary visitor output. Outputs that cannot be represented
    /// as JSON become `null`.
    pub fn custom<T: Serialize>(visitor: impl Into<String>, output: &T) -> Self {
        Self::Custom {
            visitor: visitor.into(),
            data: serde_json::to_value(output).unwrap_or(serde_json::Value::Null),
        }
    }
}

pub type VisitorRunner = fn(&CompositeNode) -> ReportPayload;

/// Visitor lookup table keyed by identifier.
#[derive(Clone)]
pub struct VisitorRegistry {
    runners: BTreeMap<&'static str, VisitorRunner>,
}

impl VisitorRegistry {
    pub const PDF: &'static str = "pdf";
    pub const COMPLIANCE_AUDIT: &'static str = "compliance_audit";
    pub const MATERIAL_BREAKDOWN: &'static str = "material_breakdown";

    pub fn standard() -> Self {
        let mut runners: BTreeMap<&'static str, VisitorRunner> = BTreeMap::new();
        runners.insert(Self::PDF, |product| {
            ReportPayload::Pdf(run(product, PdfReportVisitor::default()))
        });
        runners.insert(Self::COMPLIANCE_AUDIT, |product| {
            ReportPayload::ComplianceAudit(run(product, ComplianceAuditVisitor::default()))
        });
        runners.insert(Self::MATERIAL_BREAKDOWN, |product| {
            ReportPayload::MaterialBreakdown(run(product, MaterialBreakdownVisitor::default()))
        });
        Self { runners }
    }

    pub fn register(&mut self, id: &'static str, runner: VisitorRunner) {
        self.runners.insert(id, runner);
    }

    pub fn run(
        &self,
        product: &CompositeNode,
        visitor_id: &str,
    ) -> Result<ReportPayload, CoreError> {
        let runner = self
            .runners
            .get(visitor_id.trim())
            .ok_or_else(|| CoreError::UnknownVisitor(visitor_id.to_string()))?;
        Ok(runner(product))
    }

    pub fn contains(&self, visitor_id: &str) -> bool {
        self.runners.contains_key(visitor_id.trim())
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.runners.keys().copied()
    }
}

impl Default for VisitorRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for VisitorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisitorRegistry")
            .field("visitors", &self.runners.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Runs the standard visitor named `visitor_id`.
pub fn run_visitor(product: &CompositeNode, visitor_id: &str) -> Result<ReportPayload, CoreError> {
    VisitorRegistry::standard().run(product, visitor_id)
}
