//! Core domain types for the triage classification engine.
//!
//! This module defines the fundamental types used throughout the system:
//! - Exam areas and severity levels
//! - Criteria (checkable clinical findings)
//! - Assessment records and their metadata
//! - Session phases

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Exam Areas and Severity Levels
// ============================================================================

/// Clinical subsystem assessed during triage
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExamArea {
    Airway,
    BreathingPattern,
    Circulation,
    Disability,
    Other,
}

impl ExamArea {
    /// All exam areas in their fixed display/evaluation order
    pub const ALL: [ExamArea; 5] = [
        ExamArea::Airway,
        ExamArea::BreathingPattern,
        ExamArea::Circulation,
        ExamArea::Disability,
        ExamArea::Other,
    ];

    /// Parse an exam-area key as it appears in master data
    pub fn from_key(key: &str) -> Option<ExamArea> {
        match key.to_lowercase().as_str() {
            "airway" => Some(ExamArea::Airway),
            "breathing_pattern" | "breathing" => Some(ExamArea::BreathingPattern),
            "circulation" => Some(ExamArea::Circulation),
            "disability" => Some(ExamArea::Disability),
            "other" => Some(ExamArea::Other),
            _ => None,
        }
    }
}

/// Ordered acuity bucket. `Red` is the most urgent; ordering follows
/// clinical priority (`Red < Yellow` means Red outranks Yellow).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SeverityLevel {
    Red,
    Yellow,
    Green,
    Blue,
}

impl SeverityLevel {
    /// Fixed classification priority order, most urgent first
    pub const PRIORITY_ORDER: [SeverityLevel; 4] = [
        SeverityLevel::Red,
        SeverityLevel::Yellow,
        SeverityLevel::Green,
        SeverityLevel::Blue,
    ];

    /// Numeric rank, 1 (Red) through 4 (Blue)
    pub fn rank(&self) -> u8 {
        match self {
            SeverityLevel::Red => 1,
            SeverityLevel::Yellow => 2,
            SeverityLevel::Green => 3,
            SeverityLevel::Blue => 4,
        }
    }

    /// Parse a severity-level key as it appears in master data
    pub fn from_key(key: &str) -> Option<SeverityLevel> {
        match key.to_lowercase().as_str() {
            "red" | "1" => Some(SeverityLevel::Red),
            "yellow" | "2" => Some(SeverityLevel::Yellow),
            "green" | "3" => Some(SeverityLevel::Green),
            "blue" | "4" => Some(SeverityLevel::Blue),
            _ => None,
        }
    }
}

/// Overall triage category recorded on an assessment.
///
/// The four colour levels are derivable by the classification engine;
/// `Black` (deceased/expectant) is reachable only through an explicit
/// manual override supplied by the clinician.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TriageCategory {
    Red,
    Yellow,
    Green,
    Blue,
    Black,
}

impl From<SeverityLevel> for TriageCategory {
    fn from(level: SeverityLevel) -> Self {
        match level {
            SeverityLevel::Red => TriageCategory::Red,
            SeverityLevel::Yellow => TriageCategory::Yellow,
            SeverityLevel::Green => TriageCategory::Green,
            SeverityLevel::Blue => TriageCategory::Blue,
        }
    }
}

// ============================================================================
// Criteria
// ============================================================================

/// A single checkable clinical finding, belonging to exactly one exam area
/// and exactly one severity level. Ids are unique and stable for a session.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Criterion {
    pub id: String,
    pub label: String,
    pub exam_area: ExamArea,
    pub severity_level: SeverityLevel,
}

// ============================================================================
// Assessment Records
// ============================================================================

/// Clinician-supplied portion of an assessment record
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecordMetadata {
    pub assessed_at: DateTime<Utc>,
    pub assessed_by: String,
    pub clinical_notes: String,
}

/// A persistable triage assessment.
///
/// Once persisted a record is immutable/append-only: corrections are issued
/// as a brand-new record (fresh `id`), never as an edit of the old one.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub id: Uuid,
    pub triage_category: Option<TriageCategory>,
    pub selected_criteria: Vec<Criterion>,
    pub assessed_at: DateTime<Utc>,
    pub assessed_by: String,
    pub clinical_notes: String,
}

// ============================================================================
// Session Phases
// ============================================================================

/// Lifecycle phase of a triage assessment session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// No criterion has been toggled yet
    NotStarted,
    /// At least one toggle applied, classification not yet refreshed
    InProgress,
    /// Classification has run against the current selection
    Classified,
    /// A record built from this session was successfully persisted
    Saved,
    /// Visit/encounter closed externally; all mutations are no-ops
    Locked,
}
