//! Pipeline well-formedness rules (V001–V008).
//!
//! V001–V003 short-circuit: an empty, single-node or edgeless graph gets one
//! message and nothing else. The remaining rules all run, so several can
//! fire on the same graph.

use std::collections::HashSet;

use petgraph::algo::connected_components;
use petgraph::visit::Dfs;

use super::dag::{DagOutcome, format_path};
use crate::parse::graph::PipelineGraph;
use crate::report::Diagnostic;

/// Run all pipeline rules. Reuses the cycle detection result.
pub fn validate_structural(graph: &PipelineGraph, dag: &DagOutcome) -> Vec<Diagnostic> {
    let mut errors = Vec::new();

    if graph.is_empty() {
        errors.push(Diagnostic::pipeline("V001", "Empty graph (no nodes)"));
        return errors;
    }
    if graph.node_count() == 1 {
        errors.push(Diagnostic::pipeline(
            "V002",
            "Invalid pipeline: contains only a single node",
        ));
        return errors;
    }
    if graph.edge_count() == 0 {
        errors.push(Diagnostic::pipeline(
            "V003",
            "Invalid pipeline: nodes exist but no connections between them",
        ));
        return errors;
    }

    v004_acyclic(dag, &mut errors);
    v005_single_component(graph, &mut errors);
    let has_start = v006_has_start_node(graph, &mut errors);
    v007_has_end_node(graph, &mut errors);
    if has_start {
        v008_all_reachable_from_start(graph, &mut errors);
    }

    errors
}

fn v004_acyclic(dag: &DagOutcome, errors: &mut Vec<Diagnostic>) {
    if dag.is_dag {
        return;
    }
    let message = match &dag.cycle {
        Some(cycle) => format!("Invalid pipeline: contains a cycle ({})", format_path(cycle)),
        None => "Invalid pipeline: contains a cycle".to_string(),
    };
    errors.push(Diagnostic::pipeline("V004", message));
}

fn v005_single_component(graph: &PipelineGraph, errors: &mut Vec<Diagnostic>) {
    let components = connected_components(&graph.graph);
    if components > 1 {
        errors.push(Diagnostic::pipeline(
            "V005",
            format!(
                "Invalid pipeline: disconnected nodes detected ({} components)",
                components
            ),
        ));
    }
}

fn v006_has_start_node(graph: &PipelineGraph, errors: &mut Vec<Diagnostic>) -> bool {
    if graph.sources().is_empty() {
        errors.push(Diagnostic::pipeline(
            "V006",
            "Invalid pipeline: no start node found (all nodes have incoming edges)",
        ));
        return false;
    }
    true
}

fn v007_has_end_node(graph: &PipelineGraph, errors: &mut Vec<Diagnostic>) {
    if graph.sinks().is_empty() {
        errors.push(Diagnostic::pipeline(
            "V007",
            "Invalid pipeline: no end node found (all nodes have outgoing edges)",
        ));
    }
}

fn v008_all_reachable_from_start(graph: &PipelineGraph, errors: &mut Vec<Diagnostic>) {
    let mut reached = HashSet::new();
    let mut dfs = Dfs::empty(&graph.graph);
    for start in graph.sources() {
        let Some(&idx) = graph.node_indices.get(start) else {
            continue;
        };
        dfs.move_to(idx);
        while let Some(nx) = dfs.next(&graph.graph) {
            reached.insert(nx);
        }
    }

    let mut unreachable: Vec<&str> = graph
        .node_indices
        .iter()
        .filter(|(_, idx)| !reached.contains(*idx))
        .map(|(id, _)| id.as_str())
        .collect();
    if unreachable.is_empty() {
        return;
    }
    unreachable.sort_unstable();
    errors.push(Diagnostic::pipeline(
        "V008",
        format!(
            "Invalid pipeline: nodes unreachable from any start node: {}",
            unreachable.join(", ")
        ),
    ));
}
