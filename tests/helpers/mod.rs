use pipeline_validator::parse::{EdgeRef, NodeRef, PipelineGraph, PipelineRequest};
use pipeline_validator::{ValidationReport, validate};

// =============================================================================
// Request builders
// =============================================================================

fn edges(edges: &[(&str, &str)]) -> Vec<EdgeRef> {
    edges
        .iter()
        .enumerate()
        .map(|(i, (source, target))| EdgeRef::new(format!("e{}", i + 1), *source, *target))
        .collect()
}

/// Untyped nodes: only topology matters.
pub fn request(nodes: &[&str], edge_list: &[(&str, &str)]) -> PipelineRequest {
    PipelineRequest {
        nodes: nodes.iter().map(|id| NodeRef::new(*id)).collect(),
        edges: edges(edge_list),
    }
}

/// Nodes given as `(id, nodeType)` pairs.
pub fn typed_request(nodes: &[(&str, &str)], edge_list: &[(&str, &str)]) -> PipelineRequest {
    PipelineRequest {
        nodes: nodes
            .iter()
            .map(|(id, node_type)| NodeRef::typed(*id, node_type))
            .collect(),
        edges: edges(edge_list),
    }
}

pub fn build(request: &PipelineRequest) -> PipelineGraph {
    PipelineGraph::build(request).expect("request should build")
}

// =============================================================================
// One-shot validation
// =============================================================================

pub fn report(nodes: &[&str], edge_list: &[(&str, &str)]) -> ValidationReport {
    validate(&build(&request(nodes, edge_list)))
}

pub fn typed_report(nodes: &[(&str, &str)], edge_list: &[(&str, &str)]) -> ValidationReport {
    validate(&build(&typed_request(nodes, edge_list)))
}

pub fn report_for(request: &PipelineRequest) -> ValidationReport {
    validate(&build(request))
}

// =============================================================================
// Assertions
// =============================================================================

/// `cycle` is closed (first == last) and, once opened, is a rotation of
/// `expected`.
pub fn is_rotation_of(cycle: &[String], expected: &[&str]) -> bool {
    if cycle.len() != expected.len() + 1 || cycle.first() != cycle.last() {
        return false;
    }
    let open = &cycle[..expected.len()];
    (0..expected.len()).any(|shift| {
        open.iter()
            .enumerate()
            .all(|(i, id)| id == expected[(i + shift) % expected.len()])
    })
}

pub fn assert_has_code(report: &ValidationReport, code: &str) {
    assert!(
        report.has_code(code),
        "Expected diagnostic {}, got: {:?}",
        code,
        report.diagnostics
    );
}

pub fn assert_no_code(report: &ValidationReport, code: &str) {
    assert!(
        !report.has_code(code),
        "Did not expect diagnostic {}, but got: {:?}",
        code,
        report.diagnostics
    );
}
