//! Shared helpers for WASM API operations
//!
//! Logging macros, serde conversions across the JS boundary and the mapping
//! of session results onto JavaScript values.

use wasm_bindgen::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{AnnotatorError, EditResult};
use super::types::ApiOutcome;

// ============================================================================
// Logging Macros
// ============================================================================

/// Log a debug message with [WASM] prefix
#[macro_export]
macro_rules! wasm_log {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_debug(&format!($($arg)*))
    };
}

/// Log an info message with [WASM] prefix
#[macro_export]
macro_rules! wasm_info {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_info(&format!($($arg)*))
    };
}

/// Log a warning message with [WASM] ⚠️ prefix
#[macro_export]
macro_rules! wasm_warn {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_warn(&format!($($arg)*))
    };
}

/// Log an error message with [WASM] ❌ prefix
#[macro_export]
macro_rules! wasm_error {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_error(&format!($($arg)*))
    };
}

// ============================================================================
// Logging Helper Functions (called by macros)
// ============================================================================
//
// These go through the `log` facade; in the browser `console_log` forwards
// them to the console, natively they reach whatever logger the host set up.

pub fn log_debug(msg: &str) {
    log::debug!("[WASM] {}", msg);
}

pub fn log_info(msg: &str) {
    log::info!("[WASM] {}", msg);
}

pub fn log_warn(msg: &str) {
    log::warn!("[WASM] ⚠️ {}", msg);
}

pub fn log_error(msg: &str) {
    log::error!("[WASM] ❌ {}", msg);
}

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Deserialize a value from JavaScript with automatic error handling
pub fn deserialize<T: DeserializeOwned>(
    value: JsValue,
    error_context: &str,
) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log_error(&msg);
        JsValue::from_str(&msg)
    })
}

/// Serialize a value to JavaScript with automatic error handling
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log_error(&msg);
        JsValue::from_str(&msg)
    })
}

// ============================================================================
// Result Mapping
// ============================================================================

/// Hard errors become a rejected promise / thrown string
pub fn annotator_error(err: AnnotatorError, operation: &str) -> JsValue {
    let msg = format!("{} failed: {}", operation, err);
    log_error(&msg);
    JsValue::from_str(&msg)
}

/// Guard rejections become an ordinary `{ status: "rejected" }` value
pub fn edit_outcome<T: Serialize>(result: EditResult<T>, operation: &str) -> Result<JsValue, JsValue> {
    let outcome = match result {
        Ok(value) => ApiOutcome::ok(value),
        Err(violation) => {
            log_warn(&format!("{} rejected: {}", operation, violation));
            ApiOutcome::rejected(&violation)
        }
    };
    serialize(&outcome, operation)
}
