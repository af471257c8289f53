use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::classify::Classifier;
use crate::classify::revert::default_revert_codes;
use crate::classify::rules::{self, ErrorRule};
use crate::deployment::DeploymentMetadata;
use crate::era::{RawEraValue, convert_raw_era_value, parse_raw_era_value};

fn to_js(value: &serde_json::Value) -> JsValue {
    // json_compatible keeps maps as plain JS objects.
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value.serialize(&serializer).unwrap_or(JsValue::NULL)
}

fn error_result(msg: &str) -> JsValue {
    to_js(&serde_json::json!({"error": msg}))
}

fn parse_error_value(error_json: &str) -> serde_json::Value {
    // Non-JSON input is a plain message string.
    serde_json::from_str(error_json)
        .unwrap_or_else(|_| serde_json::Value::String(error_json.to_owned()))
}

/// Resolve a raw era snapshot against the current era.
///
/// Returns `{current, after?}` with amounts as decimal strings — token
/// amounts exceed the JS safe-integer range.
#[wasm_bindgen]
pub fn parse_era_value(raw_json: &str, current_era: Option<u32>) -> JsValue {
    let raw: RawEraValue = match serde_json::from_str(raw_json) {
        Ok(v) => v,
        Err(_) => return error_result("Invalid era snapshot JSON"),
    };
    let resolved = parse_raw_era_value(&convert_raw_era_value(&raw), current_era);
    let mut result = serde_json::json!({"current": resolved.current.to_string()});
    if let Some(after) = resolved.after {
        result["after"] = serde_json::Value::String(after.to_string());
    }
    to_js(&result)
}

/// Classify an error payload (JSON object or plain string) into a
/// display message, or `null` for a falsy error.
#[wasm_bindgen]
pub fn classify_error(error_json: &str) -> Option<String> {
    Classifier::default().classify(&parse_error_value(error_json))
}

/// Like [`classify_error`], but returns `{category, message}`.
#[wasm_bindgen]
pub fn classify_error_detailed(error_json: &str) -> JsValue {
    match Classifier::default().classify_detailed(&parse_error_value(error_json)) {
        Some(classified) => to_js(&serde_json::json!({
            "category": classified.category.as_ref(),
            "message": classified.message,
        })),
        None => JsValue::NULL,
    }
}

fn rules_to_js(rule_table: &[ErrorRule]) -> JsValue {
    let value = serde_json::to_value(rule_table).unwrap_or(serde_json::Value::Null);
    to_js(&value)
}

/// The standard operational-error rule table.
#[wasm_bindgen]
pub fn get_default_rules() -> JsValue {
    rules_to_js(rules::default_rules())
}

/// Rules for wallet-connection failures.
#[wasm_bindgen]
pub fn get_wallet_connection_rules() -> JsValue {
    rules_to_js(rules::wallet_connection_rules())
}

/// The bundled contract revert-code table as `{code: reason}`.
#[wasm_bindgen]
pub fn get_revert_codes() -> JsValue {
    let map: serde_json::Map<String, serde_json::Value> = default_revert_codes()
        .iter()
        .map(|(code, reason)| {
            (
                code.to_owned(),
                serde_json::Value::String(reason.to_owned()),
            )
        })
        .collect();
    to_js(&serde_json::Value::Object(map))
}

/// Deployment sync progress from proxy metadata (bare document or the
/// `{"data":{"_metadata":…}}` envelope).
#[wasm_bindgen]
pub fn deployment_progress(metadata_json: &str) -> JsValue {
    let metadata = DeploymentMetadata::from_json(metadata_json)
        .or_else(|_| DeploymentMetadata::from_response_json(metadata_json));
    match metadata {
        Ok(metadata) => to_js(&serde_json::json!({
            "progress": metadata.progress(),
            "indexerHealthy": metadata.indexer_healthy,
        })),
        Err(_) => error_result("Invalid deployment metadata JSON"),
    }
}
