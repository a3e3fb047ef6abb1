//! petgraph-based directed graph wrapper for the editor pipeline.
//!
//! One vertex per node; handles stay on the edge weight so that multi-port
//! nodes collapse to a single vertex for structural checks.

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef as _;
use tracing::{debug, warn};

use super::types::{NodeType, PipelineRequest};
use crate::error::{InputIssue, MalformedInputError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub id: String,
    /// `None` for untyped nodes.
    pub node_type: Option<NodeType>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeLabel {
    pub id: String,
    pub source_handle: Option<String>,
    pub target_handle: Option<String>,
}

/// Borrowed view of one edge with both endpoints resolved.
#[derive(Debug, Clone, Copy)]
pub struct EdgeView<'g> {
    pub source: &'g GraphNode,
    pub target: &'g GraphNode,
    pub label: &'g EdgeLabel,
}

#[derive(Debug, Clone)]
pub struct PipelineGraph {
    pub graph: DiGraph<GraphNode, EdgeLabel>,
    pub node_indices: HashMap<String, NodeIndex>,
}

impl PipelineGraph {
    /// Check reference integrity and build the adjacency representation.
    /// Collects every issue in the request before failing.
    pub fn build(request: &PipelineRequest) -> Result<Self, MalformedInputError> {
        let mut graph = DiGraph::with_capacity(request.nodes.len(), request.edges.len());
        let mut node_indices = HashMap::with_capacity(request.nodes.len());
        let mut issues = Vec::new();

        for (index, node) in request.nodes.iter().enumerate() {
            let Some(id) = node.id() else {
                issues.push(InputIssue::MissingNodeId { index });
                continue;
            };
            if node_indices.contains_key(id) {
                issues.push(InputIssue::DuplicateNodeId {
                    index,
                    id: id.to_string(),
                });
                continue;
            }
            let idx = graph.add_node(GraphNode {
                id: id.to_string(),
                node_type: node.declared_type(),
            });
            node_indices.insert(id.to_string(), idx);
        }

        for (index, edge) in request.edges.iter().enumerate() {
            let edge_id = if edge.id.is_empty() {
                format!("#{}", index)
            } else {
                edge.id.clone()
            };
            let source_idx = node_indices.get(&edge.source).copied();
            let target_idx = node_indices.get(&edge.target).copied();

            if source_idx.is_none() {
                issues.push(InputIssue::UnknownSource {
                    index,
                    edge: edge_id.clone(),
                    node: edge.source.clone(),
                });
            }
            if target_idx.is_none() {
                issues.push(InputIssue::UnknownTarget {
                    index,
                    edge: edge_id.clone(),
                    node: edge.target.clone(),
                });
            }

            if let (Some(s), Some(t)) = (source_idx, target_idx) {
                graph.add_edge(
                    s,
                    t,
                    EdgeLabel {
                        id: edge_id,
                        source_handle: edge.source_handle.clone().filter(|h| !h.is_empty()),
                        target_handle: edge.target_handle.clone().filter(|h| !h.is_empty()),
                    },
                );
            }
        }

        if !issues.is_empty() {
            warn!(issues = issues.len(), "rejecting malformed pipeline graph");
            return Err(MalformedInputError { issues });
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built pipeline graph"
        );
        Ok(PipelineGraph {
            graph,
            node_indices,
        })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Nodes in request order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.graph.node_weights()
    }

    pub fn node(&self, node_id: &str) -> Option<&GraphNode> {
        self.node_indices.get(node_id).map(|&idx| &self.graph[idx])
    }

    /// Edges in request order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeView<'_>> {
        self.graph.edge_references().map(|e| EdgeView {
            source: &self.graph[e.source()],
            target: &self.graph[e.target()],
            label: e.weight(),
        })
    }

    pub fn successors(&self, node_id: &str) -> Vec<&str> {
        self.neighbors(node_id, Direction::Outgoing)
    }

    pub fn predecessors(&self, node_id: &str) -> Vec<&str> {
        self.neighbors(node_id, Direction::Incoming)
    }

    /// Counts parallel edges separately.
    pub fn incoming_count(&self, node_id: &str) -> usize {
        self.degree(node_id, Direction::Incoming)
    }

    pub fn outgoing_count(&self, node_id: &str) -> usize {
        self.degree(node_id, Direction::Outgoing)
    }

    /// Nodes with no incoming edges, in request order.
    pub fn sources(&self) -> Vec<&str> {
        self.nodes()
            .filter(|n| self.incoming_count(&n.id) == 0)
            .map(|n| n.id.as_str())
            .collect()
    }

    /// Nodes with no outgoing edges, in request order.
    pub fn sinks(&self) -> Vec<&str> {
        self.nodes()
            .filter(|n| self.outgoing_count(&n.id) == 0)
            .map(|n| n.id.as_str())
            .collect()
    }

    fn neighbors(&self, node_id: &str, dir: Direction) -> Vec<&str> {
        let Some(&idx) = self.node_indices.get(node_id) else {
            return vec![];
        };
        self.graph
            .neighbors_directed(idx, dir)
            .map(|n| self.graph[n].id.as_str())
            .collect()
    }

    fn degree(&self, node_id: &str, dir: Direction) -> usize {
        let Some(&idx) = self.node_indices.get(node_id) else {
            return 0;
        };
        self.graph.edges_directed(idx, dir).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::types::{EdgeRef, NodeRef};

    fn request(nodes: &[&str], edges: &[(&str, &str)]) -> PipelineRequest {
        PipelineRequest {
            nodes: nodes.iter().map(|id| NodeRef::new(*id)).collect(),
            edges: edges
                .iter()
                .enumerate()
                .map(|(i, (s, t))| EdgeRef::new(format!("e{}", i), *s, *t))
                .collect(),
        }
    }

    #[test]
    fn parallel_edges_are_kept() {
        let graph = PipelineGraph::build(&request(&["a", "b"], &[("a", "b"), ("a", "b")])).unwrap();
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.outgoing_count("a"), 2);
        assert_eq!(graph.incoming_count("b"), 2);
    }

    #[test]
    fn sources_and_sinks_follow_request_order() {
        let graph =
            PipelineGraph::build(&request(&["c", "a", "b"], &[("a", "b"), ("c", "b")])).unwrap();
        assert_eq!(graph.sources(), vec!["c", "a"]);
        assert_eq!(graph.sinks(), vec!["b"]);
    }

    #[test]
    fn edge_with_both_ends_unknown_reports_two_issues() {
        let err = PipelineGraph::build(&request(&["a"], &[("x", "y")])).unwrap_err();
        assert_eq!(err.issues.len(), 2);
        assert!(matches!(err.issues[0], InputIssue::UnknownSource { .. }));
        assert!(matches!(err.issues[1], InputIssue::UnknownTarget { .. }));
    }

    #[test]
    fn unnamed_edges_are_labelled_by_position() {
        let mut req = request(&["a"], &[("a", "ghost")]);
        req.edges[0].id.clear();
        let err = PipelineGraph::build(&req).unwrap_err();
        assert_eq!(
            err.issues[0].to_string(),
            "Edge '#0' references unknown target node 'ghost'"
        );
    }
}
