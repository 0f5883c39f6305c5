//! `ChordAnnotator`: the edit session exposed to JavaScript
//!
//! One instance is created per loaded track. Methods that can be turned down
//! return `{ status: "ok", value }` or `{ status: "rejected", reason, code }`;
//! only malformed input and unreadable documents throw.

use wasm_bindgen::prelude::*;

use crate::config::EditorConfig;
use crate::models::chord::ChordSelection;
use crate::models::marker::MarkerId;
use crate::session::{EditSession, ImportOutcome, SaveDecision};
use crate::{wasm_info, wasm_log, wasm_warn};

use super::helpers::{annotator_error, deserialize, edit_outcome, serialize};
use super::host::WaveformHost;
use super::types::{ComponentPick, ImportResult};

#[wasm_bindgen]
pub struct ChordAnnotator {
    session: EditSession,
}

#[wasm_bindgen]
impl ChordAnnotator {
    /// Create an annotator; `config` may be omitted or partial
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<ChordAnnotator, JsValue> {
        let config = config_from_js(config)?;
        wasm_info!("ChordAnnotator created (precision={})", config.duration_precision);
        Ok(ChordAnnotator {
            session: EditSession::new(config),
        })
    }

    #[wasm_bindgen(js_name = getConfig)]
    pub fn get_config(&self) -> Result<JsValue, JsValue> {
        serialize(self.session.config(), "getConfig")
    }

    #[wasm_bindgen(js_name = updateConfig)]
    pub fn update_config(&mut self, config: JsValue) -> Result<(), JsValue> {
        let config = config_from_js(config)?;
        self.session
            .set_config(config)
            .map_err(|e| annotator_error(e, "updateConfig"))
    }

    // ---- document ----

    /// Load a JAMS file from its raw bytes
    #[wasm_bindgen(js_name = importDocument)]
    pub fn import_document(&mut self, bytes: &[u8]) -> Result<JsValue, JsValue> {
        wasm_info!("importDocument called: {} bytes", bytes.len());
        let outcome = self
            .session
            .import_document(bytes)
            .map_err(|e| annotator_error(e, "importDocument"))?;

        let result = match outcome {
            ImportOutcome::Loaded { annotations, warnings } => {
                for warning in &warnings {
                    wasm_warn!("{}", warning);
                }
                ImportResult::Loaded {
                    annotations,
                    warnings: warnings.iter().map(ToString::to_string).collect(),
                }
            }
            ImportOutcome::AwaitingConfirmation(request) => ImportResult::AwaitingConfirmation {
                kind: "discard-on-import".to_string(),
                message: request.message,
            },
            ImportOutcome::Rejected(violation) => ImportResult::Rejected {
                reason: violation.to_string(),
                code: violation.code().to_string(),
            },
        };
        serialize(&result, "importDocument")
    }

    /// Serialize the document as indented JAMS
    #[wasm_bindgen(js_name = exportDocument)]
    pub fn export_document(&self) -> Result<js_sys::Uint8Array, JsValue> {
        let bytes = self
            .session
            .export_document()
            .map_err(|e| annotator_error(e, "exportDocument"))?;
        wasm_info!("exportDocument: {} bytes", bytes.len());
        Ok(js_sys::Uint8Array::from(bytes.as_slice()))
    }

    #[wasm_bindgen(js_name = exportFileName)]
    pub fn export_file_name(&self) -> String {
        self.session.config().export_file_name.clone()
    }

    #[wasm_bindgen(js_name = setTrackDuration)]
    pub fn set_track_duration(&mut self, duration: f64) {
        self.session.set_track_duration(duration);
    }

    #[wasm_bindgen(js_name = selectAnnotation)]
    pub fn select_annotation(&mut self, index: usize) -> Result<JsValue, JsValue> {
        edit_outcome(self.session.select_annotation(index), "selectAnnotation")
    }

    #[wasm_bindgen(js_name = deleteAnnotation)]
    pub fn delete_annotation(&mut self, index: usize) -> Result<JsValue, JsValue> {
        edit_outcome(self.session.delete_annotation(index), "deleteAnnotation")
    }

    #[wasm_bindgen(js_name = annotationOptions)]
    pub fn annotation_options(&self) -> Result<JsValue, JsValue> {
        serialize(&self.session.annotation_options(), "annotationOptions")
    }

    #[wasm_bindgen(js_name = canReplace)]
    pub fn can_replace(&self, index: usize) -> bool {
        self.session.can_replace(index)
    }

    // ---- view ----

    /// Complete marker/region view model for the waveform layer
    pub fn render(&self) -> Result<JsValue, JsValue> {
        serialize(&self.session.render(), "render")
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        serialize(&self.session.state(), "state")
    }

    #[wasm_bindgen(js_name = hasUnsavedChanges)]
    pub fn has_unsaved_changes(&self) -> bool {
        self.session.has_unsaved_changes()
    }

    #[wasm_bindgen(js_name = tempoAt)]
    pub fn tempo_at(&self, time: f64) -> Option<u32> {
        self.session.tempo_at(time)
    }

    #[wasm_bindgen(js_name = setSnapOnBeats)]
    pub fn set_snap_on_beats(&mut self, enabled: bool) {
        self.session.set_snap_on_beats(enabled);
    }

    /// Seek progress (0..1) for a region click, or undefined when no seek applies
    #[wasm_bindgen(js_name = snapSeek)]
    pub fn snap_seek(&self, region_start: f64, host: &WaveformHost) -> Option<f64> {
        self.session.snap_seek(region_start, host)
    }

    #[wasm_bindgen(js_name = toggleEditMode)]
    pub fn toggle_edit_mode(&mut self, host: &WaveformHost) -> Result<JsValue, JsValue> {
        edit_outcome(self.session.toggle_edit_mode(host), "toggleEditMode")
    }

    // ---- markers ----

    #[wasm_bindgen(js_name = isAnchor)]
    pub fn is_anchor(&self, marker_id: u32) -> bool {
        self.session.is_anchor(MarkerId(marker_id))
    }

    #[wasm_bindgen(js_name = selectMarker)]
    pub fn select_marker(&mut self, marker_id: u32) -> Result<JsValue, JsValue> {
        edit_outcome(self.session.select_marker(MarkerId(marker_id)), "selectMarker")
    }

    #[wasm_bindgen(js_name = clearMarkerSelection)]
    pub fn clear_marker_selection(&mut self) {
        self.session.clear_marker_selection();
    }

    #[wasm_bindgen(js_name = addMarkerAtPlayhead)]
    pub fn add_marker_at_playhead(
        &mut self,
        host: &WaveformHost,
        inherited_label: Option<String>,
    ) -> Result<JsValue, JsValue> {
        let result = self
            .session
            .add_marker_at_playhead(host, inherited_label.as_deref());
        edit_outcome(result, "addMarkerAtPlayhead")
    }

    #[wasm_bindgen(js_name = moveMarker)]
    pub fn move_marker(&mut self, marker_id: u32, new_time: f64) -> Result<JsValue, JsValue> {
        wasm_log!("moveMarker called: id={}, time={}", marker_id, new_time);
        edit_outcome(self.session.move_marker(MarkerId(marker_id), new_time), "moveMarker")
    }

    /// Ask for deletion; the marker is removed once `resolveConfirmation(true)` arrives
    #[wasm_bindgen(js_name = deleteMarker)]
    pub fn delete_marker(&mut self, marker_id: u32) -> Result<JsValue, JsValue> {
        edit_outcome(self.session.delete_marker(MarkerId(marker_id)), "deleteMarker")
    }

    // ---- chord picker ----

    #[wasm_bindgen(js_name = beginChordEdit)]
    pub fn begin_chord_edit(&mut self, marker_id: u32) -> Result<JsValue, JsValue> {
        let result = self
            .session
            .begin_chord_edit(MarkerId(marker_id))
            .cloned();
        edit_outcome(result, "beginChordEdit")
    }

    /// `pick` is `{ component: "root" | "accidental" | "variation", value }`
    #[wasm_bindgen(js_name = pickChordComponent)]
    pub fn pick_chord_component(&mut self, pick: JsValue) -> Result<JsValue, JsValue> {
        let pick: ComponentPick = deserialize(pick, "pickChordComponent")?;
        edit_outcome(
            self.session.pick_chord_component(pick.component, &pick.value),
            "pickChordComponent",
        )
    }

    #[wasm_bindgen(js_name = applyChordEdit)]
    pub fn apply_chord_edit(&mut self, selection: JsValue) -> Result<JsValue, JsValue> {
        let selection: Option<ChordSelection> = if selection.is_undefined() || selection.is_null() {
            None
        } else {
            Some(deserialize(selection, "applyChordEdit")?)
        };
        edit_outcome(self.session.apply_chord_edit(selection), "applyChordEdit")
    }

    #[wasm_bindgen(js_name = cancelChordEdit)]
    pub fn cancel_chord_edit(&mut self) -> Result<JsValue, JsValue> {
        edit_outcome(self.session.cancel_chord_edit(), "cancelChordEdit")
    }

    // ---- save / cancel / confirmations ----

    #[wasm_bindgen(js_name = requestSave)]
    pub fn request_save(&mut self) -> Result<JsValue, JsValue> {
        edit_outcome(self.session.request_save(), "requestSave")
    }

    /// `decision` is `{ choice: "save" | "replace", form }`, or null to dismiss
    #[wasm_bindgen(js_name = resolveSavePrompt)]
    pub fn resolve_save_prompt(&mut self, decision: JsValue) -> Result<JsValue, JsValue> {
        let decision: Option<SaveDecision> = if decision.is_undefined() || decision.is_null() {
            None
        } else {
            Some(deserialize(decision, "resolveSavePrompt")?)
        };
        edit_outcome(self.session.resolve_save_prompt(decision), "resolveSavePrompt")
    }

    #[wasm_bindgen(js_name = requestCancelEditing)]
    pub fn request_cancel_editing(&mut self) -> Result<JsValue, JsValue> {
        edit_outcome(self.session.request_cancel_editing(), "requestCancelEditing")
    }

    #[wasm_bindgen(js_name = resolveConfirmation)]
    pub fn resolve_confirmation(&mut self, confirmed: bool) -> Result<JsValue, JsValue> {
        edit_outcome(self.session.resolve_confirmation(confirmed), "resolveConfirmation")
    }
}

impl ChordAnnotator {
    /// Borrow the underlying session (native callers and tests)
    pub fn session(&self) -> &EditSession {
        &self.session
    }
}

fn config_from_js(value: JsValue) -> Result<EditorConfig, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(EditorConfig::default());
    }
    let config: EditorConfig = deserialize(value, "Invalid editor configuration")?;
    config
        .validate()
        .map_err(|e| annotator_error(e, "config"))?;
    Ok(config)
}
