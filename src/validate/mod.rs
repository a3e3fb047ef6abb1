//! Validation phase: structural checks, then the semantic layer.
//!
//! Every entry point is pure: same graph in, same report out.

pub mod dag;
pub mod node_rules;
pub mod ports;
pub mod structural;

use tracing::{debug, instrument};

use crate::config::ValidatorConfig;
use crate::parse::graph::PipelineGraph;
use crate::report::ValidationReport;

/// Validate with the default configuration (semantic layer on).
pub fn validate(graph: &PipelineGraph) -> ValidationReport {
    validate_with(graph, &ValidatorConfig::default())
}

#[instrument(skip_all, fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn validate_with(graph: &PipelineGraph, config: &ValidatorConfig) -> ValidationReport {
    let dag = dag::check_acyclic(graph);

    let mut diagnostics = dag.diagnostics.clone();
    diagnostics.extend(structural::validate_structural(graph, &dag));
    if config.semantic_checks {
        diagnostics.extend(node_rules::validate_semantics(graph));
    }

    let report = ValidationReport::assemble(
        graph.node_count(),
        graph.edge_count(),
        dag.is_dag,
        dag.cycle,
        diagnostics,
    );
    debug!(
        is_dag = report.is_dag,
        is_pipeline = report.is_pipeline,
        findings = report.diagnostics.len(),
        "validation finished"
    );
    report
}
