//! Assessment session: explicit state threaded through the engine.
//!
//! One session owns one catalog, one selection set and one record in
//! progress; nothing is ambient or global. Classification is refreshed
//! synchronously after every mutation, so the displayed category is always
//! consistent with the current selection.

use crate::catalog::CriteriaCatalog;
use crate::engine::classify;
use crate::error::{Error, Result};
use crate::record::{build_record, save_record};
use crate::selection::SelectionSet;
use crate::sink::RecordSink;
use crate::types::{AssessmentRecord, RecordMetadata, SessionPhase, SeverityLevel, TriageCategory};

/// A single-clinician, single-patient triage assessment session.
///
/// Phases: `NotStarted` → `InProgress` (first toggle) → `Classified`
/// (after every mutation once classification runs) → `Saved` (successful
/// save) → `Locked` (external encounter closure). Toggling after `Saved`
/// re-enters the in-progress flow; the next save yields a brand-new record.
pub struct AssessmentSession {
    catalog: CriteriaCatalog,
    selection: SelectionSet,
    category: Option<SeverityLevel>,
    manual_override: Option<TriageCategory>,
    phase: SessionPhase,
}

impl AssessmentSession {
    /// Start a session over a catalog loaded for this encounter
    pub fn new(catalog: CriteriaCatalog) -> Self {
        Self {
            catalog,
            selection: SelectionSet::new(),
            category: None,
            manual_override: None,
            phase: SessionPhase::NotStarted,
        }
    }

    /// Toggle a criterion and synchronously refresh the derived category.
    ///
    /// Returns the category after reclassification. No-op when locked.
    pub fn toggle(&mut self, criterion_id: &str) -> Option<SeverityLevel> {
        if self.phase == SessionPhase::Locked {
            tracing::warn!(
                "Toggle of '{}' ignored: assessment is locked",
                criterion_id
            );
            return self.category;
        }

        let next = self.selection.toggle(criterion_id, &self.catalog);
        if next == self.selection {
            // Unknown id absorbed inside the toggle: selection is
            // unchanged, so the phase must not advance either
            return self.category;
        }

        self.selection = next;
        self.phase = SessionPhase::InProgress;
        self.reclassify()
    }

    /// Re-run classification against the current selection.
    ///
    /// No-op on a locked session: the cached category is returned as-is.
    pub fn reclassify(&mut self) -> Option<SeverityLevel> {
        if self.phase == SessionPhase::Locked {
            return self.category;
        }
        self.category = classify(&self.selection, &self.catalog);
        self.phase = SessionPhase::Classified;
        self.category
    }

    /// Manual category override, the only path to `Black`
    pub fn set_override(&mut self, category: TriageCategory) {
        if self.phase == SessionPhase::Locked {
            tracing::warn!("Override ignored: assessment is locked");
            return;
        }
        self.manual_override = Some(category);
    }

    pub fn clear_override(&mut self) {
        if self.phase == SessionPhase::Locked {
            tracing::warn!("Override change ignored: assessment is locked");
            return;
        }
        self.manual_override = None;
    }

    /// Explicit user-driven reset: empty selection, no category, no
    /// override, back to `NotStarted`. No-op when locked.
    pub fn reset(&mut self) {
        if self.phase == SessionPhase::Locked {
            tracing::warn!("Reset ignored: assessment is locked");
            return;
        }
        self.selection.clear();
        self.category = None;
        self.manual_override = None;
        self.phase = SessionPhase::NotStarted;
    }

    /// Assemble the record a save attempt would persist
    pub fn build(&self, metadata: &RecordMetadata) -> AssessmentRecord {
        build_record(
            &self.selection,
            &self.catalog,
            self.manual_override,
            metadata,
        )
    }

    /// Build, validate and persist a record for the current state.
    ///
    /// On success the session enters `Saved` and the persisted record is
    /// returned. On any failure (validation or sink) the session state is
    /// left untouched so the clinician can review and re-submit. A locked
    /// session refuses the save outright; the sink is never contacted.
    pub fn save(
        &mut self,
        metadata: &RecordMetadata,
        sink: &mut dyn RecordSink,
    ) -> Result<AssessmentRecord> {
        if self.phase == SessionPhase::Locked {
            tracing::warn!("Save refused: assessment is locked");
            return Err(Error::State("assessment is locked".into()));
        }

        let record = self.build(metadata);
        save_record(&record, sink)?;
        self.phase = SessionPhase::Saved;
        Ok(record)
    }

    /// External encounter closure; every mutation becomes a no-op
    pub fn lock(&mut self) {
        self.phase = SessionPhase::Locked;
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Category as of the last reclassification
    pub fn category(&self) -> Option<SeverityLevel> {
        self.category
    }

    pub fn manual_override(&self) -> Option<TriageCategory> {
        self.manual_override
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn catalog(&self) -> &CriteriaCatalog {
        &self.catalog
    }
}
