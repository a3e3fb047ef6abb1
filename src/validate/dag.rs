//! Cycle detection (`is_dag`).
//!
//! Three-colour depth-first traversal over vertices: unvisited (white),
//! in progress (gray), done (black). An edge into a gray vertex closes a
//! cycle, and the gray vertices on the explicit stack are the path to report.
//! The stack lives on the heap, so traversal depth is not bounded by the
//! call stack.

use petgraph::graph::NodeIndex;
use tracing::debug;

use crate::parse::graph::PipelineGraph;
use crate::report::Diagnostic;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DagOutcome {
    pub is_dag: bool,
    /// Node ids along the first cycle found, ending with the starting id.
    pub cycle: Option<Vec<String>>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Decide acyclicity and describe the first cycle found, if any.
pub fn check_acyclic(graph: &PipelineGraph) -> DagOutcome {
    let cycle = find_cycle(graph);
    let diagnostics = cycle.as_deref().map(describe_cycle).into_iter().collect();

    debug!(is_dag = cycle.is_none(), "cycle detection finished");
    DagOutcome {
        is_dag: cycle.is_none(),
        cycle,
        diagnostics,
    }
}

/// Every unvisited vertex is tried as a root, in request order; the first
/// back edge ends the search.
pub fn find_cycle(graph: &PipelineGraph) -> Option<Vec<String>> {
    let g = &graph.graph;
    let mut color = vec![Color::White; g.node_count()];

    for root in g.node_indices() {
        if color[root.index()] != Color::White {
            continue;
        }
        color[root.index()] = Color::Gray;
        let mut stack = vec![(root, g.neighbors(root))];

        while let Some((node, successors)) = stack.last_mut() {
            let node = *node;
            match successors.next() {
                Some(next) => match color[next.index()] {
                    Color::White => {
                        color[next.index()] = Color::Gray;
                        stack.push((next, g.neighbors(next)));
                    }
                    Color::Gray => {
                        // every gray vertex is on the stack
                        let start = stack.iter().position(|(n, _)| *n == next).unwrap_or(0);
                        let mut cycle: Vec<NodeIndex> =
                            stack[start..].iter().map(|(n, _)| *n).collect();
                        cycle.push(next);
                        return Some(cycle.into_iter().map(|idx| g[idx].id.clone()).collect());
                    }
                    Color::Black => {}
                },
                None => {
                    color[node.index()] = Color::Black;
                    stack.pop();
                }
            }
        }
    }

    None
}

pub fn format_path(cycle: &[String]) -> String {
    cycle.join(" → ")
}

fn describe_cycle(cycle: &[String]) -> Diagnostic {
    let path = format_path(cycle);
    match cycle.len() {
        2 => Diagnostic::dag(
            "D001",
            format!("Self-loop detected (node connected to itself): {}", path),
            cycle.first().cloned(),
        ),
        3 => Diagnostic::dag("D002", format!("Direct cycle detected: {}", path), None),
        _ => Diagnostic::dag("D002", format!("Complex cycle detected: {}", path), None),
    }
}
