//! Port catalog for every recognized node type, plus the data-class
//! compatibility table used by the semantic layer.
//! Match arms here must track `NodeType` in `parse/types.rs`.

use serde::Serialize;

use crate::parse::types::NodeType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Any,
    String,
    Array,
    Object,
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::Any => write!(f, "any"),
            DataType::String => write!(f, "string"),
            DataType::Array => write!(f, "array"),
            DataType::Object => write!(f, "object"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortSpec {
    pub name: &'static str,
    pub data_type: DataType,
    pub required: bool,
}

const fn port(name: &'static str, data_type: DataType) -> PortSpec {
    PortSpec {
        name,
        data_type,
        required: false,
    }
}

const fn required(name: &'static str, data_type: DataType) -> PortSpec {
    PortSpec {
        name,
        data_type,
        required: true,
    }
}

#[derive(Debug)]
pub struct NodeSpec {
    pub inputs: &'static [PortSpec],
    pub outputs: &'static [PortSpec],
    /// Text nodes grow one `any` input per template variable.
    pub dynamic_inputs: bool,
}

// =============================================================================
// CATALOG
// =============================================================================

static INPUT: NodeSpec = NodeSpec {
    inputs: &[],
    outputs: &[port("data", DataType::Any)],
    dynamic_inputs: false,
};

static OUTPUT: NodeSpec = NodeSpec {
    inputs: &[required("data", DataType::Any)],
    outputs: &[],
    dynamic_inputs: false,
};

static TEXT: NodeSpec = NodeSpec {
    inputs: &[],
    outputs: &[port("text", DataType::String)],
    dynamic_inputs: true,
};

static LLM: NodeSpec = NodeSpec {
    inputs: &[
        required("prompt", DataType::String),
        port("system", DataType::String),
        port("context", DataType::String),
    ],
    outputs: &[port("response", DataType::String)],
    dynamic_inputs: false,
};

static FILTER: NodeSpec = NodeSpec {
    inputs: &[required("data", DataType::Array)],
    outputs: &[port("filtered_data", DataType::Array)],
    dynamic_inputs: false,
};

static AGGREGATE: NodeSpec = NodeSpec {
    inputs: &[
        required("data", DataType::Array),
        port("key", DataType::String),
    ],
    outputs: &[port("aggregated", DataType::Object)],
    dynamic_inputs: false,
};

static TRANSFORM: NodeSpec = NodeSpec {
    inputs: &[required("data", DataType::Any)],
    outputs: &[port("transformed", DataType::Any)],
    dynamic_inputs: false,
};

static HTTP: NodeSpec = NodeSpec {
    inputs: &[
        port("url", DataType::String),
        port("headers", DataType::Object),
        port("body", DataType::Any),
    ],
    outputs: &[port("response", DataType::Object)],
    dynamic_inputs: false,
};

static DEBUG: NodeSpec = NodeSpec {
    inputs: &[required("data", DataType::Any)],
    outputs: &[port("data", DataType::Any)],
    dynamic_inputs: false,
};

/// `None` for unrecognized types.
pub fn spec_for(node_type: &NodeType) -> Option<&'static NodeSpec> {
    match node_type {
        NodeType::Input => Some(&INPUT),
        NodeType::Output => Some(&OUTPUT),
        NodeType::Text => Some(&TEXT),
        NodeType::Llm => Some(&LLM),
        NodeType::Filter => Some(&FILTER),
        NodeType::Aggregate => Some(&AGGREGATE),
        NodeType::Transform => Some(&TRANSFORM),
        NodeType::Http => Some(&HTTP),
        NodeType::Debug => Some(&DEBUG),
        NodeType::Unknown(_) => None,
    }
}

/// Whether a value of class `source` may feed a port of class `target`.
pub fn accepts(source: DataType, target: DataType) -> bool {
    match (source, target) {
        (DataType::Any, _) | (_, DataType::Any) => true,
        (DataType::String, DataType::String)
        | (DataType::Array, DataType::Array)
        | (DataType::Object, DataType::Object) => true,
        _ => false,
    }
}

// =============================================================================
// HANDLE RESOLUTION
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    Port(&'static PortSpec),
    /// A template variable on a Text node.
    Dynamic,
    /// The node has no ports on this side at all.
    NoPorts,
    UnknownHandle,
}

impl Resolved {
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Resolved::Port(p) => Some(p.data_type),
            Resolved::Dynamic => Some(DataType::Any),
            Resolved::NoPorts | Resolved::UnknownHandle => None,
        }
    }
}

impl NodeSpec {
    pub fn resolve_input(&'static self, handle: Option<&str>) -> Resolved {
        resolve(self.inputs, self.dynamic_inputs, handle)
    }

    pub fn resolve_output(&'static self, handle: Option<&str>) -> Resolved {
        resolve(self.outputs, false, handle)
    }

    pub fn required_inputs(&'static self) -> impl Iterator<Item = &'static PortSpec> {
        self.inputs.iter().filter(|p| p.required)
    }
}

/// No handle picks the first port. Otherwise an exact port name, then the
/// editor's `<node-id>-<port>` form, longest port name first.
fn resolve(ports: &'static [PortSpec], dynamic: bool, handle: Option<&str>) -> Resolved {
    if ports.is_empty() && !dynamic {
        return Resolved::NoPorts;
    }
    let Some(handle) = handle else {
        return ports.first().map_or(Resolved::Dynamic, Resolved::Port);
    };

    if let Some(p) = ports.iter().find(|p| p.name == handle) {
        return Resolved::Port(p);
    }
    let by_suffix = ports
        .iter()
        .filter(|p| {
            handle
                .strip_suffix(p.name)
                .is_some_and(|rest| rest.ends_with('-'))
        })
        .max_by_key(|p| p.name.len());

    match by_suffix {
        Some(p) => Resolved::Port(p),
        None if dynamic => Resolved::Dynamic,
        None => Resolved::UnknownHandle,
    }
}
