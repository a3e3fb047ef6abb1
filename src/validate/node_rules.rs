//! Node-type legality and port compatibility along edges (N001–N006).
//!
//! Untyped nodes are invisible here: edges touching them are not checked.
//! Unrecognized types produce a warning and are otherwise skipped as well.

use std::collections::HashSet;

use tracing::debug;

use super::ports::{self, Resolved};
use crate::parse::graph::{EdgeView, GraphNode, PipelineGraph};
use crate::parse::types::RECOGNIZED_TAGS;
use crate::report::Diagnostic;

/// Run all semantic rules. Returns every finding, warnings included.
pub fn validate_semantics(graph: &PipelineGraph) -> Vec<Diagnostic> {
    let mut errors = Vec::new();

    n001_recognized_types(graph, &mut errors);
    let connected = check_edges(graph, &mut errors);
    n006_required_inputs_connected(graph, &connected, &mut errors);

    debug!(findings = errors.len(), "semantic checks finished");
    errors
}

fn n001_recognized_types(graph: &PipelineGraph, errors: &mut Vec<Diagnostic>) {
    for node in graph.nodes() {
        let Some(node_type) = &node.node_type else {
            continue;
        };
        if !node_type.is_recognized() {
            errors.push(Diagnostic::semantic_warning(
                "N001",
                format!(
                    "Node '{}' has unrecognized type '{}' (expected one of: {})",
                    node.id,
                    node_type,
                    RECOGNIZED_TAGS.join(", ")
                ),
                Some(node.id.clone()),
            ));
        }
    }
}

/// N002–N005, in edge order. Returns the `(node id, port)` pairs that have
/// at least one incoming connection.
fn check_edges<'g>(
    graph: &'g PipelineGraph,
    errors: &mut Vec<Diagnostic>,
) -> HashSet<(&'g str, &'static str)> {
    let mut connected = HashSet::new();
    let mut reported_no_ports: HashSet<&str> = HashSet::new();

    for edge in graph.edges() {
        let output = endpoint_spec(edge.source)
            .map(|spec| spec.resolve_output(edge.label.source_handle.as_deref()));
        let input = endpoint_spec(edge.target)
            .map(|spec| spec.resolve_input(edge.label.target_handle.as_deref()));

        match output {
            Some(Resolved::NoPorts) => {
                if reported_no_ports.insert(edge.source.id.as_str()) {
                    errors.push(Diagnostic::semantic(
                        "N002",
                        format!(
                            "Node '{}' of type '{}' cannot have output connections",
                            edge.source.id,
                            type_tag(edge.source)
                        ),
                        Some(edge.source.id.clone()),
                    ));
                }
            }
            Some(Resolved::UnknownHandle) => unknown_handle(
                edge,
                "source",
                edge.source,
                edge.label.source_handle.as_deref(),
                errors,
            ),
            _ => {}
        }

        match input {
            Some(Resolved::NoPorts) => {
                if reported_no_ports.insert(edge.target.id.as_str()) {
                    errors.push(Diagnostic::semantic(
                        "N003",
                        format!(
                            "Node '{}' of type '{}' cannot have input connections",
                            edge.target.id,
                            type_tag(edge.target)
                        ),
                        Some(edge.target.id.clone()),
                    ));
                }
            }
            Some(Resolved::UnknownHandle) => unknown_handle(
                edge,
                "target",
                edge.target,
                edge.label.target_handle.as_deref(),
                errors,
            ),
            Some(Resolved::Port(port)) => {
                connected.insert((edge.target.id.as_str(), port.name));
            }
            _ => {}
        }

        let source_type = output.and_then(|r| r.data_type());
        let target_type = input.and_then(|r| r.data_type());
        if let (Some(source_type), Some(target_type)) = (source_type, target_type) {
            if !ports::accepts(source_type, target_type) {
                errors.push(Diagnostic::semantic(
                    "N005",
                    format!(
                        "Data type mismatch: {} outputs '{}' but {} expects '{}'",
                        edge.source.id, source_type, edge.target.id, target_type
                    ),
                    Some(edge.target.id.clone()),
                ));
            }
        }
    }

    connected
}

fn unknown_handle(
    edge: EdgeView<'_>,
    side: &str,
    node: &GraphNode,
    handle: Option<&str>,
    errors: &mut Vec<Diagnostic>,
) {
    errors.push(Diagnostic::semantic_warning(
        "N004",
        format!(
            "Edge '{}' uses unknown {} handle '{}' on node '{}'",
            edge.label.id,
            side,
            handle.unwrap_or_default(),
            node.id
        ),
        Some(node.id.clone()),
    ));
}

fn n006_required_inputs_connected(
    graph: &PipelineGraph,
    connected: &HashSet<(&str, &'static str)>,
    errors: &mut Vec<Diagnostic>,
) {
    let missing: Vec<&str> = graph
        .nodes()
        .filter(|node| {
            endpoint_spec(node).is_some_and(|spec| {
                spec.required_inputs()
                    .any(|port| !connected.contains(&(node.id.as_str(), port.name)))
            })
        })
        .map(|node| node.id.as_str())
        .collect();

    if !missing.is_empty() {
        errors.push(Diagnostic::semantic(
            "N006",
            format!(
                "Pipeline has {} node(s) with unconnected required inputs: {}",
                missing.len(),
                missing.join(", ")
            ),
            None,
        ));
    }
}

fn endpoint_spec(node: &GraphNode) -> Option<&'static ports::NodeSpec> {
    node.node_type.as_ref().and_then(ports::spec_for)
}

fn type_tag(node: &GraphNode) -> &str {
    node.node_type.as_ref().map_or("untyped", |t| t.tag())
}
