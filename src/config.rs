//! Validator configuration.

use serde::{Deserialize, Serialize};

/// Largest accepted payload, matching the editor backend's request limit.
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidatorConfig {
    /// Payloads above this size are rejected before decoding.
    pub max_payload_bytes: usize,
    /// Run the node-type / port compatibility layer.
    pub semantic_checks: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        ValidatorConfig {
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
            semantic_checks: true,
        }
    }
}

impl ValidatorConfig {
    /// Parse a partial JSON object; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn structural_only() -> Self {
        ValidatorConfig {
            semantic_checks: false,
            ..Self::default()
        }
    }
}
