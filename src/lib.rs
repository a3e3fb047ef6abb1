pub mod api;
pub mod config;
pub mod error;
pub mod parse;
pub mod report;
pub mod validate;
pub mod wasm;

pub use config::ValidatorConfig;
pub use error::{Error, InputIssue, MalformedInputError};
pub use parse::PipelineGraph;
pub use report::{Diagnostic, ValidationReport};
pub use validate::{validate, validate_with};
