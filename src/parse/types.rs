//! Rust types mirroring the editor's pipeline payload.
//!
//! These types are the serde target for the frontend `{ nodes, edges }` JSON.
//! Editor-only fields (`width`, `selected`, `dragging`, edge `style`,
//! `markerEnd`, ...) are accepted and dropped on the floor.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// TOP-LEVEL REQUEST
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineRequest {
    pub nodes: Vec<NodeRef>,
    pub edges: Vec<EdgeRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRef {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
}

impl EdgeRef {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        EdgeRef {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
        }
    }

    pub fn with_handles(mut self, source_handle: &str, target_handle: &str) -> Self {
        self.source_handle = Some(source_handle.to_string());
        self.target_handle = Some(target_handle.to_string());
        self
    }
}

// =============================================================================
// NODES
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRef {
    #[serde(default)]
    pub id: Option<String>,
    /// Editor component name; only consulted when `data.nodeType` is absent.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    /// Canvas position, kept opaque: any JSON shape is accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<NodeData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    /// Everything else the editor stores on a node (`label`, settings, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl NodeRef {
    /// Untyped node, as sent by callers that only care about topology.
    pub fn new(id: impl Into<String>) -> Self {
        NodeRef {
            id: Some(id.into()),
            component: None,
            position: None,
            data: None,
        }
    }

    pub fn typed(id: impl Into<String>, node_type: &str) -> Self {
        NodeRef {
            data: Some(NodeData {
                node_type: Some(node_type.to_string()),
                ..NodeData::default()
            }),
            ..Self::new(id)
        }
    }

    /// The node id, or `None` when missing or blank.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.trim().is_empty())
    }

    /// Declared type tag: `data.nodeType` first, then the top-level `type`.
    pub fn declared_type(&self) -> Option<NodeType> {
        self.data
            .as_ref()
            .and_then(|d| d.node_type.as_deref())
            .or(self.component.as_deref())
            .map(NodeType::from_tag)
    }
}

// =============================================================================
// NODE TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeType {
    Input,
    Output,
    Transform,
    Filter,
    Aggregate,
    Llm,
    Http,
    Text,
    Debug,
    Unknown(String),
}

/// Canonical tags of every recognized node type.
pub const RECOGNIZED_TAGS: [&str; 9] = [
    "input",
    "output",
    "text",
    "llm",
    "filter",
    "aggregate",
    "transform",
    "http",
    "debug",
];

impl NodeType {
    /// Case-insensitive lookup, including the editor's component aliases.
    pub fn from_tag(tag: &str) -> NodeType {
        match tag.trim().to_ascii_lowercase().as_str() {
            "input" | "custominput" => NodeType::Input,
            "output" | "customoutput" => NodeType::Output,
            "text" => NodeType::Text,
            "llm" => NodeType::Llm,
            "filter" => NodeType::Filter,
            "aggregate" => NodeType::Aggregate,
            "transform" => NodeType::Transform,
            "http" | "httprequest" | "http_request" => NodeType::Http,
            "debug" => NodeType::Debug,
            _ => NodeType::Unknown(tag.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            NodeType::Input => "input",
            NodeType::Output => "output",
            NodeType::Text => "text",
            NodeType::Llm => "llm",
            NodeType::Filter => "filter",
            NodeType::Aggregate => "aggregate",
            NodeType::Transform => "transform",
            NodeType::Http => "http",
            NodeType::Debug => "debug",
            NodeType::Unknown(tag) => tag,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, NodeType::Unknown(_))
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
