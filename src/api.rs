//! Transport-facing entry points.
//!
//! Maps the two failure tiers onto a single tagged response: input errors
//! become `status: "error"` with a client-error status code, while every
//! graph that decodes and builds (cyclic or not) is a `status: "ok"` report.

use serde::Serialize;
use tracing::instrument;

use crate::config::ValidatorConfig;
use crate::error::Error;
use crate::parse;
use crate::parse::types::RECOGNIZED_TAGS;
use crate::report::ValidationReport;
use crate::validate;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Response {
    Ok(ValidationReport),
    Error(ErrorBody),
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub http_status: u16,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Every integrity issue when the graph itself was malformed.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<IssueBody>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IssueBody {
    pub code: String,
    pub field: String,
    pub message: String,
}

impl From<&Error> for ErrorBody {
    fn from(err: &Error) -> Self {
        let issues = match err {
            Error::Malformed(e) => e
                .issues
                .iter()
                .map(|issue| IssueBody {
                    code: issue.code().to_string(),
                    field: issue.field(),
                    message: issue.to_string(),
                })
                .collect(),
            _ => Vec::new(),
        };
        ErrorBody {
            http_status: err.status_code(),
            code: err.code().to_string(),
            message: err.to_string(),
            field: err.field(),
            issues,
        }
    }
}

impl Response {
    pub fn status_code(&self) -> u16 {
        match self {
            Response::Ok(_) => 200,
            Response::Error(body) => body.http_status,
        }
    }

    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            Response::Ok(report) => Some(report),
            Response::Error(_) => None,
        }
    }
}

/// Decode, build and validate one payload.
pub fn run(json: &str, config: &ValidatorConfig) -> Result<ValidationReport, Error> {
    let (_, graph) = parse::parse_and_build(json, config)?;
    Ok(validate::validate_with(&graph, config))
}

#[instrument(skip_all, fields(bytes = json.len()))]
pub fn validate_json(json: &str, config: &ValidatorConfig) -> Response {
    match run(json, config) {
        Ok(report) => Response::Ok(report),
        Err(err) => Response::Error(ErrorBody::from(&err)),
    }
}

/// Like [`validate_json`], taking the config as a partial JSON object.
pub fn validate_json_with_config(json: &str, config_json: &str) -> Response {
    match ValidatorConfig::from_json(config_json) {
        Ok(config) => validate_json(json, &config),
        Err(e) => Response::Error(ErrorBody::from(&Error::InvalidConfig(e))),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EngineInfo {
    pub service: &'static str,
    pub version: &'static str,
    pub node_types: Vec<&'static str>,
}

/// Service identity for health checks.
pub fn engine_info() -> EngineInfo {
    EngineInfo {
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        node_types: RECOGNIZED_TAGS.to_vec(),
    }
}
