//! Shared types for the WASM API
//!
//! Result shapes returned to JavaScript from the annotator methods.

use serde::{Deserialize, Serialize};

use crate::error::GuardViolation;
use crate::models::chord::ChordComponent;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Ok,
    Rejected,
}

/// Result of an edit request: the value on success, or why it was turned down
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ApiOutcome<T> {
    pub status: OutcomeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl<T> ApiOutcome<T> {
    pub fn ok(value: T) -> Self {
        Self {
            status: OutcomeStatus::Ok,
            value: Some(value),
            reason: None,
            code: None,
        }
    }

    pub fn rejected(violation: &GuardViolation) -> Self {
        Self {
            status: OutcomeStatus::Rejected,
            value: None,
            reason: Some(violation.to_string()),
            code: Some(violation.code().to_string()),
        }
    }
}

/// Picker click forwarded from the chord table
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ComponentPick {
    pub component: ChordComponent,
    pub value: String,
}

/// Result of `importDocument`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum ImportResult {
    Loaded { annotations: usize, warnings: Vec<String> },
    AwaitingConfirmation { kind: String, message: String },
    Rejected { reason: String, code: String },
}
