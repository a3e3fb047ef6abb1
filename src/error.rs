//! Input failures raised before any validation runs.
//!
//! Only problems with the payload itself are errors. A cyclic or disconnected
//! graph is a successful validation whose findings live in
//! [`Diagnostic`](crate::report::Diagnostic)s.

use thiserror::Error;

/// A single reference-integrity problem found while building the graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputIssue {
    #[error("Node at index {index} is missing a required id")]
    MissingNodeId { index: usize },

    #[error("Duplicate node id '{id}'")]
    DuplicateNodeId { index: usize, id: String },

    #[error("Edge '{edge}' references unknown source node '{node}'")]
    UnknownSource {
        index: usize,
        edge: String,
        node: String,
    },

    #[error("Edge '{edge}' references unknown target node '{node}'")]
    UnknownTarget {
        index: usize,
        edge: String,
        node: String,
    },
}

impl InputIssue {
    pub fn code(&self) -> &'static str {
        match self {
            InputIssue::UnknownSource { .. } | InputIssue::UnknownTarget { .. } => "P002",
            InputIssue::DuplicateNodeId { .. } => "P003",
            InputIssue::MissingNodeId { .. } => "P004",
        }
    }

    /// Path of the offending field inside the request payload.
    pub fn field(&self) -> String {
        match self {
            InputIssue::MissingNodeId { index } | InputIssue::DuplicateNodeId { index, .. } => {
                format!("nodes[{}].id", index)
            }
            InputIssue::UnknownSource { index, .. } => format!("edges[{}].source", index),
            InputIssue::UnknownTarget { index, .. } => format!("edges[{}].target", index),
        }
    }
}

/// Every integrity issue found in one request. Never reaches the validators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed pipeline graph: {}", summarize(.issues))]
pub struct MalformedInputError {
    pub issues: Vec<InputIssue>,
}

impl MalformedInputError {
    pub fn first(&self) -> Option<&InputIssue> {
        self.issues.first()
    }
}

fn summarize(issues: &[InputIssue]) -> String {
    match issues {
        [] => "no details".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{} (and {} more)", first, rest.len()),
    }
}

/// Crate-level error for the decode + build path.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to parse pipeline JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Invalid validator config: {0}")]
    InvalidConfig(#[source] serde_json::Error),

    #[error("Request is missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Request payload too large: {size} bytes (maximum: {max} bytes)")]
    PayloadTooLarge { size: usize, max: usize },

    #[error(transparent)]
    Malformed(#[from] MalformedInputError),
}

impl Error {
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidJson(_) => "P001",
            Error::Malformed(e) => e.first().map(InputIssue::code).unwrap_or("P002"),
            Error::PayloadTooLarge { .. } => "P005",
            Error::MissingField(_) => "P006",
            Error::InvalidConfig(_) => "P007",
        }
    }

    /// HTTP-equivalent status for a transport collaborator.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::InvalidJson(_) | Error::InvalidConfig(_) | Error::MissingField(_) => 400,
            Error::PayloadTooLarge { .. } => 413,
            Error::Malformed(_) => 422,
        }
    }

    pub fn field(&self) -> Option<String> {
        match self {
            Error::MissingField(name) => Some((*name).to_string()),
            Error::Malformed(e) => e.first().map(InputIssue::field),
            Error::InvalidJson(_) | Error::InvalidConfig(_) | Error::PayloadTooLarge { .. } => None,
        }
    }
}
