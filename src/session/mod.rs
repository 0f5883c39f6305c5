//! Edit session for one loaded annotation document
//!
//! The session owns the document, the timeline of the selected annotation
//! and every piece of UI state (edit mode, open chord picker, pending
//! confirmation, unsaved changes). Requests that are not allowed in the
//! current state come back as a `GuardViolation` and leave everything as it
//! was.

mod chord_edit;
mod confirm;
mod host;
mod render;

pub use chord_edit::ChordEdit;
pub use confirm::{
    ConfirmationKind, ConfirmationRequest, Resolution, SaveChoice, SaveDecision, SavePrompt,
};
pub use host::{PlaybackHost, SeekTarget, StaticPlayback, ViewportChange};
pub use render::{AnnotationOption, MarkerView, RegionView, RenderPlan};

use serde::{Deserialize, Serialize};

use confirm::{PendingAction, PendingConfirmation};

use crate::config::EditorConfig;
use crate::error::{AnnotatorError, EditResult, GuardViolation, Result};
use crate::models::chord::{ChordComponent, ChordSelection, NO_CHORD};
use crate::models::document::{
    AnnotationDocument, AnnotationForm, AnnotationMetadata, AnnotationSet, Curator, DataSource,
    ImportedDocument,
};
use crate::models::marker::{MarkerId, MarkerKind};
use crate::renderers::chord_symbol;
use crate::timeline::{estimate_tempo, AnnotationTimeline};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SessionState {
    Viewing,
    Editing,
    ChordPicking,
    SaveOrCancelPending,
}

/// Outcome of `import_document` once the bytes parsed
#[derive(Clone, Debug, PartialEq)]
pub enum ImportOutcome {
    Loaded {
        annotations: usize,
        warnings: Vec<AnnotatorError>,
    },
    /// Unsaved edits exist; the parsed document waits for a confirmation
    AwaitingConfirmation(ConfirmationRequest),
    Rejected(GuardViolation),
}

pub struct EditSession {
    config: EditorConfig,
    document: AnnotationDocument,
    selected: usize,
    timeline: AnnotationTimeline,
    /// Track length reported by the player; wins over anything in the file
    host_duration: Option<f64>,
    edit_mode: bool,
    dirty: bool,
    snap_on_beats: bool,
    selected_marker: Option<MarkerId>,
    chord_edit: Option<ChordEdit>,
    pending: Option<PendingConfirmation>,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditSession {
    pub fn new(config: EditorConfig) -> Self {
        let timeline = AnnotationTimeline::new(0.0, config.duration_precision);
        Self {
            config,
            document: AnnotationDocument::default(),
            selected: 0,
            timeline,
            host_duration: None,
            edit_mode: false,
            dirty: false,
            snap_on_beats: false,
            selected_marker: None,
            chord_edit: None,
            pending: None,
        }
    }

    /// Start a session on an already parsed document
    pub fn with_document(document: AnnotationDocument, track_duration: f64, config: EditorConfig) -> Self {
        let mut session = Self::new(config);
        session.host_duration = known_duration(track_duration);
        session.install(document);
        session
    }

    // ---- queries ----

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Replace the configuration; precision changes apply from the next rebuild
    pub fn set_config(&mut self, config: EditorConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn document(&self) -> &AnnotationDocument {
        &self.document
    }

    pub fn timeline(&self) -> &AnnotationTimeline {
        &self.timeline
    }

    /// Index of the displayed annotation, if a document is loaded
    pub fn selected_index(&self) -> Option<usize> {
        if self.document.is_empty() {
            None
        } else {
            Some(self.selected)
        }
    }

    pub fn state(&self) -> SessionState {
        match self.pending.as_ref().map(PendingConfirmation::kind) {
            Some(ConfirmationKind::SaveChoice) | Some(ConfirmationKind::CancelEditing) => {
                SessionState::SaveOrCancelPending
            }
            _ if self.chord_edit.is_some() => SessionState::ChordPicking,
            _ if self.edit_mode => SessionState::Editing,
            _ => SessionState::Viewing,
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    pub fn pending_confirmation(&self) -> Option<&ConfirmationRequest> {
        self.pending.as_ref().map(|p| &p.request)
    }

    pub fn chord_edit(&self) -> Option<&ChordEdit> {
        self.chord_edit.as_ref()
    }

    pub fn selected_marker(&self) -> Option<MarkerId> {
        self.selected_marker
    }

    pub fn is_anchor(&self, id: MarkerId) -> bool {
        self.timeline.is_anchor(id)
    }

    /// Program annotations are never overwritten
    pub fn can_replace(&self, index: usize) -> bool {
        self.document.get(index).map_or(false, |set| !set.is_program())
    }

    /// Program annotations and the last remaining one are never deleted
    pub fn can_delete(&self, index: usize) -> bool {
        self.can_replace(index) && self.document.len() > 1
    }

    pub fn annotation_options(&self) -> Vec<AnnotationOption> {
        self.document
            .annotations
            .iter()
            .enumerate()
            .map(|(index, set)| AnnotationOption {
                index,
                label: set.list_label(),
                selected: index == self.selected,
                deletable: self.can_delete(index),
                replaceable: self.can_replace(index),
            })
            .collect()
    }

    pub fn render(&self) -> RenderPlan {
        RenderPlan {
            state: self.state(),
            edit_mode: self.edit_mode,
            has_unsaved_changes: self.dirty,
            selected_annotation: self.selected_index(),
            markers: render::marker_views(&self.timeline, self.edit_mode, self.selected_marker),
            regions: render::region_views(&self.timeline),
        }
    }

    /// Tempo suggestion from the length of the region under `time`
    pub fn tempo_at(&self, time: f64) -> Option<u32> {
        self.timeline
            .region_at(time)
            .map(|region| estimate_tempo(region.duration(), self.config.min_tempo, self.config.max_tempo))
    }

    // ---- guards ----

    fn ensure_document(&self) -> EditResult<()> {
        if self.document.is_empty() {
            Err(GuardViolation::NoDocument)
        } else {
            Ok(())
        }
    }

    fn ensure_no_pending(&self) -> EditResult<()> {
        if self.pending.is_some() {
            Err(GuardViolation::ConfirmationPending)
        } else {
            Ok(())
        }
    }

    fn ensure_idle(&self) -> EditResult<()> {
        self.ensure_no_pending()?;
        if self.chord_edit.is_some() {
            return Err(GuardViolation::ChordEditInProgress);
        }
        Ok(())
    }

    fn ensure_editing(&self) -> EditResult<()> {
        if !self.edit_mode {
            return Err(GuardViolation::NotEditing);
        }
        self.ensure_idle()
    }

    fn ensure_marker(&self, id: MarkerId) -> EditResult<()> {
        if self.timeline.get(id).is_none() {
            return Err(GuardViolation::UnknownMarker(id));
        }
        Ok(())
    }

    fn ensure_index(&self, index: usize) -> EditResult<()> {
        if index >= self.document.len() {
            return Err(GuardViolation::IndexOutOfRange {
                index,
                len: self.document.len(),
            });
        }
        Ok(())
    }

    // ---- document and annotation selection ----

    fn install(&mut self, document: AnnotationDocument) {
        let track_duration = self
            .host_duration
            .or_else(|| document.file_duration())
            .or_else(|| last_observation_end(document.get(0)))
            .unwrap_or(0.0);
        self.document = document;
        self.selected = 0;
        self.edit_mode = false;
        self.chord_edit = None;
        self.selected_marker = None;
        self.timeline = AnnotationTimeline::new(track_duration, self.config.duration_precision);
        self.rebuild_timeline();
    }

    /// Rebuild the timeline from the selected, stored annotation
    fn rebuild_timeline(&mut self) {
        let track_duration = self.timeline.track_duration();
        self.timeline = match self.document.get(self.selected) {
            Some(set) => AnnotationTimeline::from_observations(
                &set.data,
                track_duration,
                self.config.duration_precision,
            ),
            None => AnnotationTimeline::new(track_duration, self.config.duration_precision),
        };
        self.dirty = false;
        self.selected_marker = None;
    }

    /// Parse and load a JAMS file.
    ///
    /// Parse failures are returned as errors and leave the session as it
    /// was. With unsaved edits the parsed document is parked behind a
    /// discard confirmation.
    pub fn import_document(&mut self, bytes: &[u8]) -> Result<ImportOutcome> {
        let imported = AnnotationDocument::from_json_bytes(bytes)?;

        if let Err(violation) = self.ensure_idle() {
            return Ok(ImportOutcome::Rejected(violation));
        }

        if self.dirty {
            let pending = PendingConfirmation::new(
                ConfirmationKind::DiscardOnImport,
                "You have unsaved changes. Loading a new file will discard them. Continue?".to_string(),
                PendingAction::Import(Box::new(imported)),
            );
            let request = pending.request.clone();
            self.pending = Some(pending);
            return Ok(ImportOutcome::AwaitingConfirmation(request));
        }

        let ImportedDocument { document, warnings } = imported;
        let annotations = document.len();
        self.install(document);
        Ok(ImportOutcome::Loaded { annotations, warnings })
    }

    pub fn export_document(&self) -> Result<Vec<u8>> {
        if self.document.is_empty() {
            return Err(AnnotatorError::InvalidDocument(
                "no annotation document is loaded".to_string(),
            ));
        }
        self.document.to_json_bytes()
    }

    /// Display another annotation set; refused while edits are unsaved
    pub fn select_annotation(&mut self, index: usize) -> EditResult<()> {
        self.ensure_idle()?;
        self.ensure_index(index)?;
        if self.dirty {
            return Err(GuardViolation::UnsavedChanges);
        }
        self.selected = index;
        self.rebuild_timeline();
        Ok(())
    }

    pub fn delete_annotation(&mut self, index: usize) -> EditResult<ConfirmationRequest> {
        self.ensure_idle()?;
        self.ensure_index(index)?;
        if self.dirty {
            return Err(GuardViolation::UnsavedChanges);
        }
        if !self.can_replace(index) {
            return Err(GuardViolation::ProgramAnnotation);
        }
        if self.document.len() <= 1 {
            return Err(GuardViolation::LastAnnotation);
        }

        let label = self
            .document
            .get(index)
            .map(AnnotationSet::list_label)
            .unwrap_or_default();
        let pending = PendingConfirmation::new(
            ConfirmationKind::DeleteAnnotation,
            format!("Are you sure you want to delete the annotation \"{}\"?", label),
            PendingAction::DeleteAnnotation(index),
        );
        let request = pending.request.clone();
        self.pending = Some(pending);
        Ok(request)
    }

    pub fn set_track_duration(&mut self, track_duration: f64) {
        self.host_duration = known_duration(track_duration);
        self.timeline.set_track_duration(track_duration);
    }

    // ---- modes and navigation ----

    pub fn toggle_edit_mode(&mut self, host: &dyn PlaybackHost) -> EditResult<ViewportChange> {
        self.ensure_document()?;
        self.ensure_idle()?;
        self.edit_mode = !self.edit_mode;
        log::info!("Edit mode {}", if self.edit_mode { "enabled" } else { "disabled" });
        Ok(ViewportChange::for_toggle(host, self.edit_mode, self.config.edit_zoom_factor))
    }

    pub fn set_snap_on_beats(&mut self, enabled: bool) {
        self.snap_on_beats = enabled;
    }

    pub fn snap_on_beats(&self) -> bool {
        self.snap_on_beats
    }

    /// Seek progress for a click on a region, when snapping applies
    pub fn snap_seek(&self, region_start: f64, host: &dyn PlaybackHost) -> Option<f64> {
        if !self.snap_on_beats || (self.edit_mode && !host.is_playing()) {
            return None;
        }
        let duration = host.duration();
        if duration > 0.0 {
            Some((region_start / duration).clamp(0.0, 1.0))
        } else {
            None
        }
    }

    pub fn select_marker(&mut self, id: MarkerId) -> EditResult<()> {
        self.ensure_marker(id)?;
        self.selected_marker = Some(id);
        Ok(())
    }

    pub fn clear_marker_selection(&mut self) {
        self.selected_marker = None;
    }

    // ---- marker edits ----

    /// Insert a marker at the playhead carrying `inherited_label`, or the
    /// label of the region under the playhead when none is given
    pub fn add_marker_at_playhead(
        &mut self,
        host: &dyn PlaybackHost,
        inherited_label: Option<&str>,
    ) -> EditResult<MarkerId> {
        self.ensure_editing()?;
        if host.is_playing() {
            return Err(GuardViolation::AudioPlaying);
        }

        let time = host.current_time();
        let label = match inherited_label {
            Some(label) => label.to_string(),
            None => self
                .timeline
                .region_at(time)
                .map(|region| region.chord_label.clone())
                .unwrap_or_else(|| NO_CHORD.to_string()),
        };

        let id = self.timeline.insert(time, &label, MarkerKind::New, true)?.id;
        self.dirty = true;
        self.selected_marker = Some(id);
        log::debug!("Added marker {} at {}s ({})", id, time, label);
        Ok(id)
    }

    pub fn move_marker(&mut self, id: MarkerId, new_time: f64) -> EditResult<()> {
        self.ensure_editing()?;
        self.timeline.move_to(id, new_time)?;
        self.dirty = true;
        Ok(())
    }

    pub fn delete_marker(&mut self, id: MarkerId) -> EditResult<ConfirmationRequest> {
        self.ensure_editing()?;
        let marker = self.timeline.get(id).ok_or(GuardViolation::UnknownMarker(id))?;
        if marker.is_anchor() {
            return Err(GuardViolation::AnchorMarker);
        }

        let message = format!(
            "You are about to delete the marker at {:.2} seconds with label {}. Are you sure?",
            marker.time,
            chord_symbol::display_text_for(&marker.raw_label)
        );
        let pending = PendingConfirmation::new(
            ConfirmationKind::DeleteMarker,
            message,
            PendingAction::DeleteMarker(id),
        );
        let request = pending.request.clone();
        self.pending = Some(pending);
        Ok(request)
    }

    // ---- chord picker ----

    pub fn begin_chord_edit(&mut self, id: MarkerId) -> EditResult<&ChordEdit> {
        self.ensure_editing()?;
        let marker = self.timeline.get(id).ok_or(GuardViolation::UnknownMarker(id))?;
        let edit = ChordEdit::begin(marker);
        self.selected_marker = Some(id);
        Ok(&*self.chord_edit.insert(edit))
    }

    /// Record one picker selection and preview it on the marker.
    /// Returns whether apply is available.
    pub fn pick_chord_component(&mut self, component: ChordComponent, value: &str) -> EditResult<bool> {
        let edit = self.chord_edit.as_mut().ok_or(GuardViolation::NoChordEdit)?;
        edit.pick(component, value);
        let (marker, label, can_apply) = (edit.marker, edit.new_label(), edit.can_apply());
        self.timeline.relabel(marker, &label, MarkerKind::Replaced)?;
        Ok(can_apply)
    }

    /// Commit the picked chord, optionally overriding the picker state
    pub fn apply_chord_edit(&mut self, selection: Option<ChordSelection>) -> EditResult<MarkerId> {
        let edit = self.chord_edit.as_mut().ok_or(GuardViolation::NoChordEdit)?;
        if let Some(selection) = selection {
            edit.new = selection;
        }
        if !edit.can_apply() {
            return Err(GuardViolation::ChordUnchanged);
        }
        let (marker, label) = (edit.marker, edit.new_label());

        self.timeline.relabel(marker, &label, MarkerKind::Replaced)?;
        self.chord_edit = None;
        self.dirty = true;
        log::debug!("Relabelled marker {} as {}", marker, label);
        Ok(marker)
    }

    /// Close the picker and restore the marker exactly as it was
    pub fn cancel_chord_edit(&mut self) -> EditResult<()> {
        let edit = self.chord_edit.take().ok_or(GuardViolation::NoChordEdit)?;
        self.timeline
            .relabel(edit.marker, edit.original_label(), edit.original_kind())?;
        Ok(())
    }

    // ---- save / cancel ----

    /// Form defaults for the save prompt
    pub fn save_prompt(&self) -> SavePrompt {
        let selected = self.document.get(self.selected);
        let replace_offered = self.can_replace(self.selected);
        let defaults = match selected {
            Some(set) if !set.is_program() => AnnotationForm {
                curator_name: set.annotation_metadata.curator.name.clone(),
                data_source: set.data_source().clone(),
                description: set.sandbox.description.clone(),
            },
            Some(set) => AnnotationForm {
                curator_name: set.annotation_metadata.curator.name.clone(),
                data_source: DataSource::User,
                description: String::new(),
            },
            None => AnnotationForm::default(),
        };
        let message = if replace_offered {
            "Save the changes as a new annotation or replace the selected one?"
        } else {
            "Save the changes as a new annotation?"
        };
        SavePrompt {
            request: ConfirmationRequest {
                kind: ConfirmationKind::SaveChoice,
                message: message.to_string(),
            },
            replace_offered,
            defaults,
        }
    }

    pub fn request_save(&mut self) -> EditResult<SavePrompt> {
        self.ensure_document()?;
        self.ensure_editing()?;
        if !self.dirty {
            return Err(GuardViolation::NothingToSave);
        }
        let prompt = self.save_prompt();
        self.pending = Some(PendingConfirmation {
            request: prompt.request.clone(),
            action: PendingAction::Save,
        });
        Ok(prompt)
    }

    /// Answer the save prompt; `None` dismisses it and keeps editing
    pub fn resolve_save_prompt(&mut self, decision: Option<SaveDecision>) -> EditResult<Option<AnnotationSet>> {
        match self.pending.as_ref().map(|p| &p.action) {
            Some(PendingAction::Save) => {}
            _ => return Err(GuardViolation::NoPendingConfirmation),
        }
        let decision = match decision {
            Some(decision) => decision,
            None => {
                self.pending = None;
                return Ok(None);
            }
        };
        if decision.choice == SaveChoice::Replace && !self.can_replace(self.selected) {
            return Err(GuardViolation::ProgramAnnotation);
        }
        self.pending = None;
        self.commit_save(decision.choice, &decision.form).map(Some)
    }

    /// Store the timeline as an annotation set, appended or in place of the
    /// selected one, and leave edit mode
    pub fn save_as_new_or_replace(&mut self, choice: SaveChoice, form: &AnnotationForm) -> EditResult<AnnotationSet> {
        self.ensure_document()?;
        self.ensure_idle()?;
        self.commit_save(choice, form)
    }

    fn commit_save(&mut self, choice: SaveChoice, form: &AnnotationForm) -> EditResult<AnnotationSet> {
        if choice == SaveChoice::Replace && !self.can_replace(self.selected) {
            return Err(GuardViolation::ProgramAnnotation);
        }

        let set = self.build_annotation_set(form);
        let index = match choice {
            SaveChoice::Replace => {
                self.document.replace_at(self.selected, set.clone());
                self.selected
            }
            SaveChoice::Save => self.document.append(set.clone()),
        };
        log::info!(
            "{} annotation {} ({} observations)",
            if choice == SaveChoice::Replace { "Replaced" } else { "Saved" },
            index,
            set.data.len()
        );

        self.selected = index;
        self.edit_mode = false;
        self.rebuild_timeline();
        Ok(set)
    }

    fn build_annotation_set(&self, form: &AnnotationForm) -> AnnotationSet {
        let name = form.curator_name.trim();
        let data_source = match &form.data_source {
            // Edited annotations never claim to be automatic analysis
            DataSource::Program => DataSource::User,
            other => other.clone(),
        };
        let metadata = AnnotationMetadata {
            curator: Curator {
                name: if name.is_empty() {
                    self.config.default_curator.clone()
                } else {
                    name.to_string()
                },
                email: String::new(),
            },
            data_source,
            annotation_tools: self.config.annotation_tool.clone(),
            ..AnnotationMetadata::default()
        };
        AnnotationSet::new(metadata, &form.description, self.timeline.observations())
    }

    pub fn request_cancel_editing(&mut self) -> EditResult<ConfirmationRequest> {
        self.ensure_editing()?;
        let pending = PendingConfirmation::new(
            ConfirmationKind::CancelEditing,
            "Discard all changes made since the last save?".to_string(),
            PendingAction::CancelEditing,
        );
        let request = pending.request.clone();
        self.pending = Some(pending);
        Ok(request)
    }

    /// Throw away marker edits and leave edit mode
    pub fn cancel(&mut self) -> EditResult<()> {
        self.ensure_no_pending()?;
        self.discard_edits();
        Ok(())
    }

    fn discard_edits(&mut self) {
        self.chord_edit = None;
        self.edit_mode = false;
        self.rebuild_timeline();
    }

    // ---- confirmations ----

    /// Answer a yes/no confirmation (everything except the save prompt)
    pub fn resolve_confirmation(&mut self, confirmed: bool) -> EditResult<Resolution> {
        let pending = match self.pending.take() {
            Some(p) if p.kind() != ConfirmationKind::SaveChoice => p,
            other => {
                self.pending = other;
                return Err(GuardViolation::NoPendingConfirmation);
            }
        };
        if !confirmed {
            return Ok(Resolution::Dismissed { kind: pending.kind() });
        }

        match pending.action {
            PendingAction::DeleteMarker(id) => {
                self.timeline.remove(id)?;
                if self.selected_marker == Some(id) {
                    self.selected_marker = None;
                }
                self.dirty = true;
                Ok(Resolution::MarkerDeleted { id })
            }
            PendingAction::DeleteAnnotation(index) => {
                self.document.remove_at(index);
                self.selected = 0;
                self.rebuild_timeline();
                Ok(Resolution::AnnotationDeleted { index })
            }
            PendingAction::CancelEditing => {
                self.discard_edits();
                Ok(Resolution::EditingCancelled)
            }
            PendingAction::Import(imported) => {
                let ImportedDocument { document, warnings } = *imported;
                let annotations = document.len();
                self.install(document);
                Ok(Resolution::DocumentImported {
                    annotations,
                    warnings: warnings.iter().map(ToString::to_string).collect(),
                })
            }
            PendingAction::Save => Err(GuardViolation::NoPendingConfirmation),
        }
    }
}

fn known_duration(duration: f64) -> Option<f64> {
    Some(duration).filter(|d| d.is_finite() && *d > 0.0)
}

fn last_observation_end(set: Option<&AnnotationSet>) -> Option<f64> {
    set?.data
        .iter()
        .map(|obs| obs.time + obs.duration)
        .fold(None, |acc: Option<f64>, end| Some(acc.map_or(end, |a| a.max(end))))
        .filter(|end| *end > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::Observation;

    fn set(source: DataSource, curator: &str, labels: &[(f64, &str)]) -> AnnotationSet {
        let mut metadata = AnnotationMetadata::default();
        metadata.data_source = source;
        metadata.curator.name = curator.to_string();
        let data = labels
            .iter()
            .map(|&(time, value)| Observation::new(time, 0.0, value))
            .collect();
        AnnotationSet::new(metadata, "", data)
    }

    fn session() -> EditSession {
        let document = AnnotationDocument::new(vec![
            set(DataSource::Program, "", &[(0.0, "N"), (2.0, "C:maj"), (5.5, "G:maj")]),
            set(DataSource::User, "Ringo", &[(0.0, "A:min"), (4.0, "D:min")]),
        ]);
        EditSession::with_document(document, 10.0, EditorConfig::default())
    }

    fn editing() -> EditSession {
        let mut session = session();
        session.toggle_edit_mode(&StaticPlayback::paused_at(10.0, 0.0)).unwrap();
        session
    }

    fn marker_at(session: &EditSession, time: f64) -> MarkerId {
        session.timeline().marker_at_time(time).unwrap().id
    }

    #[test]
    fn test_states() {
        let mut session = session();
        assert_eq!(session.state(), SessionState::Viewing);
        session.toggle_edit_mode(&StaticPlayback::default()).unwrap();
        assert_eq!(session.state(), SessionState::Editing);

        let id = marker_at(&session, 2.0);
        session.begin_chord_edit(id).unwrap();
        assert_eq!(session.state(), SessionState::ChordPicking);
        session.cancel_chord_edit().unwrap();

        session.request_cancel_editing().unwrap();
        assert_eq!(session.state(), SessionState::SaveOrCancelPending);
        session.resolve_confirmation(true).unwrap();
        assert_eq!(session.state(), SessionState::Viewing);
    }

    #[test]
    fn test_add_marker_inherits_region_label() {
        let mut session = editing();
        let id = session
            .add_marker_at_playhead(&StaticPlayback::paused_at(10.0, 3.0), None)
            .unwrap();
        let marker = session.timeline().get(id).unwrap();
        assert_eq!(marker.raw_label, "C:maj");
        assert_eq!(marker.kind, MarkerKind::New);
        assert!(session.has_unsaved_changes());
    }

    #[test]
    fn test_add_marker_rejected_while_playing_or_viewing() {
        let mut session = session();
        let host = StaticPlayback::paused_at(10.0, 3.0);
        assert_eq!(session.add_marker_at_playhead(&host, None), Err(GuardViolation::NotEditing));

        let mut session = editing();
        let playing = StaticPlayback::playing_at(10.0, 3.0);
        assert_eq!(session.add_marker_at_playhead(&playing, None), Err(GuardViolation::AudioPlaying));
        assert_eq!(session.timeline().len(), 3);
    }

    #[test]
    fn test_delete_marker_confirmation() {
        let mut session = editing();
        let id = marker_at(&session, 2.0);
        let request = session.delete_marker(id).unwrap();
        assert_eq!(request.kind, ConfirmationKind::DeleteMarker);
        assert!(request.message.contains("2.00 seconds"));

        assert_eq!(session.delete_marker(marker_at(&session, 5.5)), Err(GuardViolation::ConfirmationPending));

        assert_eq!(
            session.resolve_confirmation(false).unwrap(),
            Resolution::Dismissed { kind: ConfirmationKind::DeleteMarker }
        );
        assert_eq!(session.timeline().len(), 3);

        session.delete_marker(id).unwrap();
        assert_eq!(session.resolve_confirmation(true).unwrap(), Resolution::MarkerDeleted { id });
        assert_eq!(session.timeline().len(), 2);
    }

    #[test]
    fn test_anchor_is_guarded() {
        let mut session = editing();
        let anchor = marker_at(&session, 0.0);
        assert!(session.is_anchor(anchor));
        assert_eq!(session.delete_marker(anchor), Err(GuardViolation::AnchorMarker));
        assert_eq!(session.move_marker(anchor, 1.0), Err(GuardViolation::AnchorMarker));
        assert!(session.pending_confirmation().is_none());
        assert!(!session.has_unsaved_changes());
    }

    #[test]
    fn test_chord_edit_apply_and_cancel() {
        let mut session = editing();
        let id = marker_at(&session, 2.0);

        session.begin_chord_edit(id).unwrap();
        assert!(session.pick_chord_component(ChordComponent::Variation, "min7").unwrap());
        assert_eq!(session.timeline().get(id).unwrap().raw_label, "C:min7");
        session.cancel_chord_edit().unwrap();
        let marker = session.timeline().get(id).unwrap();
        assert_eq!(marker.raw_label, "C:maj");
        assert_eq!(marker.kind, MarkerKind::New);

        session.begin_chord_edit(id).unwrap();
        assert_eq!(session.apply_chord_edit(None), Err(GuardViolation::ChordUnchanged));
        session
            .apply_chord_edit(Some(ChordSelection::new("F", "#", "min")))
            .unwrap();
        let marker = session.timeline().get(id).unwrap();
        assert_eq!(marker.raw_label, "F#:min");
        assert_eq!(marker.kind, MarkerKind::Replaced);
        assert_eq!(marker.time, 2.0);
        assert!(session.chord_edit().is_none());
    }

    #[test]
    fn test_relabel_of_inverted_chord_is_root_position() {
        let document = AnnotationDocument::new(vec![set(
            DataSource::User,
            "Linda",
            &[(0.0, "N"), (2.0, "C:maj/3")],
        )]);
        let mut session = EditSession::with_document(document, 10.0, EditorConfig::default());
        session.toggle_edit_mode(&StaticPlayback::paused_at(10.0, 0.0)).unwrap();
        let id = marker_at(&session, 2.0);

        session.begin_chord_edit(id).unwrap();
        session.pick_chord_component(ChordComponent::Variation, "min").unwrap();
        session.cancel_chord_edit().unwrap();
        assert_eq!(session.timeline().get(id).unwrap().raw_label, "C:maj/3");

        session.begin_chord_edit(id).unwrap();
        session.pick_chord_component(ChordComponent::Variation, "min").unwrap();
        session.apply_chord_edit(None).unwrap();
        assert_eq!(session.timeline().get(id).unwrap().raw_label, "C:min");
    }

    #[test]
    fn test_replace_program_is_rejected() {
        let mut session = editing();
        session
            .add_marker_at_playhead(&StaticPlayback::paused_at(10.0, 1.0), Some("E:min"))
            .unwrap();
        let before = session.document().clone();

        let prompt = session.request_save().unwrap();
        assert!(!prompt.replace_offered);
        assert_eq!(prompt.defaults.data_source, DataSource::User);

        let decision = SaveDecision {
            choice: SaveChoice::Replace,
            form: AnnotationForm::default(),
        };
        assert_eq!(session.resolve_save_prompt(Some(decision)), Err(GuardViolation::ProgramAnnotation));
        assert_eq!(session.document(), &before);
    }

    #[test]
    fn test_save_appends_and_selects() {
        let mut session = editing();
        session
            .add_marker_at_playhead(&StaticPlayback::paused_at(10.0, 1.0), Some("E:min"))
            .unwrap();
        session.request_save().unwrap();
        let saved = session
            .resolve_save_prompt(Some(SaveDecision {
                choice: SaveChoice::Save,
                form: AnnotationForm {
                    curator_name: "  ".into(),
                    data_source: DataSource::Program,
                    description: "intro fix".into(),
                },
            }))
            .unwrap()
            .unwrap();

        assert_eq!(saved.annotation_metadata.curator.name, "Anonymous");
        assert_eq!(saved.annotation_metadata.data_source, DataSource::User);
        assert_eq!(saved.annotation_metadata.annotation_tools, "ChordFinder");
        assert_eq!(saved.sandbox.description, "intro fix");
        assert_eq!(saved.data[1], Observation::new(1.0, 1.0, "E:min"));
        assert_eq!(session.selected_index(), Some(2));
        assert_eq!(session.document().len(), 3);
        assert!(!session.is_edit_mode());
        assert!(!session.has_unsaved_changes());
    }

    #[test]
    fn test_replace_user_annotation_in_place() {
        let mut session = session();
        session.select_annotation(1).unwrap();
        session.toggle_edit_mode(&StaticPlayback::default()).unwrap();
        let id = marker_at(&session, 4.0);
        session.move_marker(id, 6.0).unwrap();

        let prompt = session.request_save().unwrap();
        assert!(prompt.replace_offered);
        assert_eq!(prompt.defaults.curator_name, "Ringo");

        let form = prompt.defaults.clone();
        session
            .resolve_save_prompt(Some(SaveDecision { choice: SaveChoice::Replace, form }))
            .unwrap();
        assert_eq!(session.document().len(), 2);
        assert_eq!(session.document().annotations[1].data[1].time, 6.0);
        assert_eq!(session.selected_index(), Some(1));
    }

    #[test]
    fn test_select_annotation_blocked_by_unsaved_changes() {
        let mut session = editing();
        let id = marker_at(&session, 2.0);
        session.move_marker(id, 3.0).unwrap();
        assert_eq!(session.select_annotation(1), Err(GuardViolation::UnsavedChanges));
    }

    #[test]
    fn test_delete_annotation_guards() {
        let mut session = session();
        assert_eq!(session.delete_annotation(0), Err(GuardViolation::ProgramAnnotation));
        assert_eq!(
            session.delete_annotation(5),
            Err(GuardViolation::IndexOutOfRange { index: 5, len: 2 })
        );

        session.delete_annotation(1).unwrap();
        assert_eq!(session.resolve_confirmation(true).unwrap(), Resolution::AnnotationDeleted { index: 1 });
        assert_eq!(session.document().len(), 1);
    }

    #[test]
    fn test_annotation_options() {
        let session = session();
        let options = session.annotation_options();
        assert_eq!(options[0].label, "(automatic analysis)");
        assert!(options[0].selected);
        assert!(!options[0].deletable);
        assert_eq!(options[1].label, "Edit by Ringo");
        assert!(options[1].deletable);
    }

    #[test]
    fn test_snap_seek() {
        let mut session = session();
        let paused = StaticPlayback::paused_at(10.0, 0.0);
        let playing = StaticPlayback::playing_at(10.0, 0.0);
        assert_eq!(session.snap_seek(2.0, &paused), None);

        session.set_snap_on_beats(true);
        assert_eq!(session.snap_seek(2.0, &paused), Some(0.2));

        session.toggle_edit_mode(&paused).unwrap();
        assert_eq!(session.snap_seek(2.0, &paused), None);
        assert_eq!(session.snap_seek(2.0, &playing), Some(0.2));
    }

    #[test]
    fn test_tempo_at() {
        let session = session();
        // region 2.0..5.5 lasts 3.5s
        assert_eq!(session.tempo_at(3.0), Some(30));
        assert_eq!(session.tempo_at(1.0), Some(30));
    }

    #[test]
    fn test_render_plan() {
        let session = session();
        let plan = session.render();
        assert_eq!(plan.state, SessionState::Viewing);
        assert_eq!(plan.markers.len(), 3);
        assert!(!plan.markers[0].show_label);
        assert_eq!(plan.markers[1].label_text, "C");
        assert_eq!(plan.regions[2].tooltip, "G major\nTime: 5.5s\nDuration: 4.5s");
    }

    #[test]
    fn test_track_duration_falls_back_to_observations() {
        let document = AnnotationDocument::new(vec![AnnotationSet::new(
            AnnotationMetadata::default(),
            "",
            vec![Observation::new(0.0, 2.0, "N"), Observation::new(2.0, 3.0, "C:maj")],
        )]);
        let session = EditSession::with_document(document, 0.0, EditorConfig::default());
        assert_eq!(session.timeline().track_duration(), 5.0);
    }

    fn jams_with_duration(duration: f64) -> String {
        format!(
            r#"{{"file_metadata": {{"duration": {}}},
                "annotations": [{{"annotation_metadata": {{"data_source": "program"}},
                "namespace": "chord",
                "data": [{{"time": 0.0, "duration": 1.0, "value": "N"}},
                         {{"time": 1.0, "duration": 9.0, "value": "C:maj"}}]}}]}}"#,
            duration
        )
    }

    #[test]
    fn test_reimport_uses_new_file_duration() {
        let mut session = EditSession::default();
        session.import_document(jams_with_duration(200.0).as_bytes()).unwrap();
        assert_eq!(session.timeline().track_duration(), 200.0);

        session.import_document(jams_with_duration(100.0).as_bytes()).unwrap();
        assert_eq!(session.timeline().track_duration(), 100.0);
        assert_eq!(session.timeline().regions().last().unwrap().end, 100.0);
    }

    #[test]
    fn test_player_duration_wins_over_file() {
        let mut session = EditSession::default();
        session.set_track_duration(150.0);
        session.import_document(jams_with_duration(200.0).as_bytes()).unwrap();
        assert_eq!(session.timeline().track_duration(), 150.0);
        session.import_document(jams_with_duration(100.0).as_bytes()).unwrap();
        assert_eq!(session.timeline().track_duration(), 150.0);
    }
}
