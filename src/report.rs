//! Validation report returned to the caller.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Dag,
    Pipeline,
    Semantic,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Dag => write!(f, "DAG"),
            Stage::Pipeline => write!(f, "Pipeline"),
            Stage::Semantic => write!(f, "Semantic"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// One finding. Findings are data, never `Err`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: String,
    pub stage: Stage,
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.node_id {
            Some(id) => write!(
                f,
                "[{}:{}] {} (node '{}')",
                self.stage, self.code, self.message, id
            ),
            None => write!(f, "[{}:{}] {}", self.stage, self.code, self.message),
        }
    }
}

impl Diagnostic {
    pub fn dag(code: &str, message: impl Into<String>, node_id: Option<String>) -> Self {
        Diagnostic {
            code: code.into(),
            stage: Stage::Dag,
            severity: Severity::Error,
            message: message.into(),
            node_id,
        }
    }

    pub fn pipeline(code: &str, message: impl Into<String>) -> Self {
        Diagnostic {
            code: code.into(),
            stage: Stage::Pipeline,
            severity: Severity::Error,
            message: message.into(),
            node_id: None,
        }
    }

    pub fn semantic(code: &str, message: impl Into<String>, node_id: Option<String>) -> Self {
        Diagnostic {
            code: code.into(),
            stage: Stage::Semantic,
            severity: Severity::Error,
            message: message.into(),
            node_id,
        }
    }

    pub fn semantic_warning(code: &str, message: impl Into<String>, node_id: Option<String>) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            ..Self::semantic(code, message, node_id)
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub num_nodes: usize,
    pub num_edges: usize,
    pub is_dag: bool,
    pub is_pipeline: bool,
    pub dag_validation_messages: Vec<String>,
    pub pipeline_validation_messages: Vec<String>,
    /// First cycle found, closing with its starting node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycle: Option<Vec<String>>,
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    /// Derive flags and message lists from the collected diagnostics.
    /// Semantic findings share the pipeline message list.
    pub fn assemble(
        num_nodes: usize,
        num_edges: usize,
        is_dag: bool,
        cycle: Option<Vec<String>>,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        let is_pipeline = is_dag
            && !diagnostics
                .iter()
                .any(|d| d.stage != Stage::Dag && d.is_error());

        let messages = |keep: fn(Stage) -> bool| -> Vec<String> {
            diagnostics
                .iter()
                .filter(|d| keep(d.stage))
                .map(|d| d.message.clone())
                .collect()
        };
        let dag_validation_messages = messages(|s| s == Stage::Dag);
        let pipeline_validation_messages = messages(|s| s != Stage::Dag);

        ValidationReport {
            num_nodes,
            num_edges,
            is_dag,
            is_pipeline,
            dag_validation_messages,
            pipeline_validation_messages,
            cycle,
            diagnostics,
        }
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_error())
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.diagnostics.iter().any(|d| d.code == code)
    }
}
