//! User confirmations as explicit request/response pairs
//!
//! A request is recorded on the session and handed to the UI, which shows a
//! modal and reports the answer exactly once. Only one request may be open
//! at a time.

use serde::{Deserialize, Serialize};

use crate::models::document::{AnnotationForm, ImportedDocument};
use crate::models::marker::MarkerId;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ConfirmationKind {
    DeleteMarker,
    DeleteAnnotation,
    SaveChoice,
    CancelEditing,
    DiscardOnImport,
}

/// What the UI should ask the user
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ConfirmationRequest {
    pub kind: ConfirmationKind,
    pub message: String,
}

/// Save prompt contents: message, whether "replace" is offered, form defaults
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SavePrompt {
    pub request: ConfirmationRequest,
    pub replace_offered: bool,
    pub defaults: AnnotationForm,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SaveChoice {
    /// Append as a separate annotation
    Save,
    /// Overwrite the selected annotation
    Replace,
}

/// Answer to a save prompt
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SaveDecision {
    pub choice: SaveChoice,
    #[serde(default)]
    pub form: AnnotationForm,
}

/// What happened when a confirmation was resolved
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum Resolution {
    Dismissed { kind: ConfirmationKind },
    MarkerDeleted { id: MarkerId },
    AnnotationDeleted { index: usize },
    EditingCancelled,
    DocumentImported { annotations: usize, warnings: Vec<String> },
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum PendingAction {
    DeleteMarker(MarkerId),
    DeleteAnnotation(usize),
    Save,
    CancelEditing,
    Import(Box<ImportedDocument>),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PendingConfirmation {
    pub request: ConfirmationRequest,
    pub action: PendingAction,
}

impl PendingConfirmation {
    pub fn new(kind: ConfirmationKind, message: String, action: PendingAction) -> Self {
        Self {
            request: ConfirmationRequest { kind, message },
            action,
        }
    }

    pub fn kind(&self) -> ConfirmationKind {
        self.request.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_decision_from_js_shape() {
        let decision: SaveDecision = serde_json::from_str(
            r#"{"choice": "replace", "form": {"curator_name": "George", "data_source": "collaborative"}}"#,
        )
        .unwrap();
        assert_eq!(decision.choice, SaveChoice::Replace);
        assert_eq!(decision.form.curator_name, "George");
        assert!(decision.form.description.is_empty());
    }

    #[test]
    fn test_resolution_is_tagged() {
        let json = serde_json::to_value(Resolution::AnnotationDeleted { index: 2 }).unwrap();
        assert_eq!(json["outcome"], "annotation-deleted");
        assert_eq!(json["index"], 2);
    }
}
