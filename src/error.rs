//! Error types for chord annotation handling
//!
//! Hard failures (a label that cannot be parsed, a document that cannot be
//! imported) are `AnnotatorError`s. Rejected edit requests are not errors;
//! they are reported as `GuardViolation`s.

use thiserror::Error;

use crate::models::marker::MarkerId;

/// Errors raised by the label codec and the document importer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnnotatorError {
    /// A chord label that is neither `N`/`X` nor `Root[Accidental]:Shorthand[/Bass]`
    #[error("Malformed chord label: {label:?}")]
    MalformedLabel { label: String },

    /// An annotation entry whose namespace is not `chord` (skipped on import)
    #[error("Unsupported annotation namespace '{namespace}' at index {index}")]
    UnsupportedNamespace { namespace: String, index: usize },

    /// The imported bytes are not a usable annotation document
    #[error("Invalid annotation document: {0}")]
    InvalidDocument(String),

    /// Editor configuration with out-of-range values
    #[error("Invalid editor configuration: {0}")]
    InvalidConfig(String),
}

impl AnnotatorError {
    pub fn malformed(label: &str) -> Self {
        AnnotatorError::MalformedLabel {
            label: label.to_string(),
        }
    }

    /// True for errors that abort the whole operation they occurred in
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AnnotatorError::InvalidDocument(_) | AnnotatorError::InvalidConfig(_)
        )
    }
}

impl From<serde_json::Error> for AnnotatorError {
    fn from(err: serde_json::Error) -> Self {
        AnnotatorError::InvalidDocument(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AnnotatorError>;

/// Why an edit request was turned down.
///
/// These are reachable through ordinary UI races (a drag on the anchor, a
/// double click while audio plays), so they are returned to the caller as a
/// rejection and never treated as failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GuardViolation {
    #[error("The anchor marker at 0s cannot be moved or deleted")]
    AnchorMarker,

    #[error("A marker already exists at {time}s")]
    OccupiedTime { time: f64 },

    #[error("Time {time}s is outside the track")]
    OutOfRange { time: f64 },

    #[error("No marker with id {0}")]
    UnknownMarker(MarkerId),

    #[error("Edit mode is not enabled")]
    NotEditing,

    #[error("Markers cannot be added while audio is playing")]
    AudioPlaying,

    #[error("The automatic analysis annotation cannot be replaced or deleted")]
    ProgramAnnotation,

    #[error("The last remaining annotation cannot be deleted")]
    LastAnnotation,

    #[error("Annotation index {index} out of bounds (count: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Another confirmation is still pending")]
    ConfirmationPending,

    #[error("There is no pending confirmation of that kind")]
    NoPendingConfirmation,

    #[error("A chord edit is in progress")]
    ChordEditInProgress,

    #[error("No chord edit is in progress")]
    NoChordEdit,

    #[error("The selected chord is the same as the current one")]
    ChordUnchanged,

    #[error("There are unsaved changes")]
    UnsavedChanges,

    #[error("There are no changes to save")]
    NothingToSave,

    #[error("No annotation document is loaded")]
    NoDocument,
}

impl GuardViolation {
    /// Stable identifier for the JavaScript side
    pub fn code(&self) -> &'static str {
        match self {
            GuardViolation::AnchorMarker => "anchor-marker",
            GuardViolation::OccupiedTime { .. } => "occupied-time",
            GuardViolation::OutOfRange { .. } => "out-of-range",
            GuardViolation::UnknownMarker(_) => "unknown-marker",
            GuardViolation::NotEditing => "not-editing",
            GuardViolation::AudioPlaying => "audio-playing",
            GuardViolation::ProgramAnnotation => "program-annotation",
            GuardViolation::LastAnnotation => "last-annotation",
            GuardViolation::IndexOutOfRange { .. } => "index-out-of-range",
            GuardViolation::ConfirmationPending => "confirmation-pending",
            GuardViolation::NoPendingConfirmation => "no-pending-confirmation",
            GuardViolation::ChordEditInProgress => "chord-edit-in-progress",
            GuardViolation::NoChordEdit => "no-chord-edit",
            GuardViolation::ChordUnchanged => "chord-unchanged",
            GuardViolation::UnsavedChanges => "unsaved-changes",
            GuardViolation::NothingToSave => "nothing-to-save",
            GuardViolation::NoDocument => "no-document",
        }
    }
}

pub type EditResult<T> = std::result::Result<T, GuardViolation>;
