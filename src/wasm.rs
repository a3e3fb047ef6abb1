//! WASM entry points for browser use.

use wasm_bindgen::prelude::*;

use crate::api;
use crate::config::ValidatorConfig;

/// Validate a pipeline JSON payload with default settings.
/// Returns the tagged `Response` object (`status: "ok" | "error"`).
#[wasm_bindgen]
pub fn validate_pipeline(json: &str) -> JsValue {
    let result = api::validate_json(json, &ValidatorConfig::default());
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

/// Same as `validate_pipeline`, with a partial JSON config object.
#[wasm_bindgen]
pub fn validate_pipeline_with_config(json: &str, config_json: &str) -> JsValue {
    let result = api::validate_json_with_config(json, config_json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

#[wasm_bindgen]
pub fn engine_info() -> JsValue {
    serde_wasm_bindgen::to_value(&api::engine_info()).unwrap_or(JsValue::NULL)
}
