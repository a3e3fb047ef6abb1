//! Parse phase: JSON → Rust types + graph construction.

pub mod graph;
pub mod types;

pub use graph::PipelineGraph;
pub use types::*;

use serde::Deserialize;
use tracing::warn;

use crate::config::ValidatorConfig;
use crate::error::Error;

/// Wire shape before the required-field check.
#[derive(Deserialize)]
struct RawRequest {
    nodes: Option<Vec<NodeRef>>,
    edges: Option<Vec<EdgeRef>>,
}

/// Deserialize a pipeline payload with the default configuration.
pub fn parse(json: &str) -> Result<PipelineRequest, Error> {
    parse_with(json, &ValidatorConfig::default())
}

/// Deserialize a pipeline payload, enforcing the size limit and the
/// presence of both `nodes` and `edges`.
pub fn parse_with(json: &str, config: &ValidatorConfig) -> Result<PipelineRequest, Error> {
    if json.len() > config.max_payload_bytes {
        warn!(
            size = json.len(),
            max = config.max_payload_bytes,
            "rejecting oversized payload"
        );
        return Err(Error::PayloadTooLarge {
            size: json.len(),
            max: config.max_payload_bytes,
        });
    }

    let raw: RawRequest = serde_json::from_str(json)?;
    let nodes = raw.nodes.ok_or(Error::MissingField("nodes"))?;
    let edges = raw.edges.ok_or(Error::MissingField("edges"))?;
    Ok(PipelineRequest { nodes, edges })
}

/// Parse JSON and build the graph in one step.
pub fn parse_and_build(
    json: &str,
    config: &ValidatorConfig,
) -> Result<(PipelineRequest, PipelineGraph), Error> {
    let request = parse_with(json, config)?;
    let graph = PipelineGraph::build(&request)?;
    Ok((request, graph))
}
