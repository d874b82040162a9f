//! Assessment record assembly, validation and persistence.
//!
//! A record is built fresh for every save attempt from the current
//! selection plus clinician metadata. Validation collects every violation
//! before save; a record with any violation never reaches the sink.

use crate::catalog::CriteriaCatalog;
use crate::engine::classify;
use crate::error::{Error, Result};
use crate::selection::SelectionSet;
use crate::sink::RecordSink;
use crate::types::{AssessmentRecord, RecordMetadata, TriageCategory};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A single validation failure on an assessment record
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("triage category is unset")]
    MissingCategory,

    #[error("assessment timestamp {0} is in the future")]
    FutureTimestamp(DateTime<Utc>),

    #[error("assessing clinician is not identified")]
    MissingAssessedBy,
}

/// Assemble an assessment record from the current selection.
///
/// Selected ids are expanded into full criterion descriptors in catalog
/// order; ids the catalog no longer knows are skipped with a warning.
/// The category is the manual override verbatim when supplied (the only
/// path to `Black`), otherwise the classification engine's derivation.
pub fn build_record(
    selection: &SelectionSet,
    catalog: &CriteriaCatalog,
    manual_override: Option<TriageCategory>,
    metadata: &RecordMetadata,
) -> AssessmentRecord {
    let selected_criteria: Vec<_> = catalog
        .iter()
        .filter(|c| selection.contains(&c.id))
        .cloned()
        .collect();

    let stale = selection.len() - selected_criteria.len();
    if stale > 0 {
        tracing::warn!("{} selected id(s) not found in catalog, omitted from record", stale);
    }

    let triage_category = match manual_override {
        Some(category) => {
            tracing::info!("Manual triage override applied: {:?}", category);
            Some(category)
        }
        None => classify(selection, catalog).map(TriageCategory::from),
    };

    AssessmentRecord {
        id: Uuid::new_v4(),
        triage_category,
        selected_criteria,
        assessed_at: metadata.assessed_at,
        assessed_by: metadata.assessed_by.clone(),
        clinical_notes: metadata.clinical_notes.clone(),
    }
}

/// Validate a record for persistence.
///
/// Returns every violation found, or an empty Vec if the record is valid.
pub fn validate_record(record: &AssessmentRecord) -> Vec<Violation> {
    let mut violations = Vec::new();

    if record.triage_category.is_none() {
        violations.push(Violation::MissingCategory);
    }
    if record.assessed_at > Utc::now() {
        violations.push(Violation::FutureTimestamp(record.assessed_at));
    }
    if record.assessed_by.trim().is_empty() {
        violations.push(Violation::MissingAssessedBy);
    }

    violations
}

/// Persist a record through the external sink.
///
/// A record with any validation violation is rejected locally; the sink is
/// never contacted. Sink rejection surfaces as [`Error::Persistence`] and
/// is never retried automatically: a clinical-safety record must be
/// re-submitted deliberately by a human after reviewing the failure.
pub fn save_record(record: &AssessmentRecord, sink: &mut dyn RecordSink) -> Result<()> {
    let violations = validate_record(record);
    if !violations.is_empty() {
        tracing::warn!(
            "Record {} rejected before save: {} violation(s)",
            record.id,
            violations.len()
        );
        return Err(Error::Validation(violations));
    }

    sink.submit(record).map_err(|e| match e {
        Error::Persistence(_) => e,
        other => Error::Persistence(other.to_string()),
    })?;

    tracing::info!(
        "Persisted assessment record {} ({:?})",
        record.id,
        record.triage_category
    );
    Ok(())
}
