#![forbid(unsafe_code)]

//! Core domain model and business logic for emergency-triage classification.
//!
//! This crate provides:
//! - Domain types (exam areas, severity levels, criteria, assessment records)
//! - Criteria catalog loading and lookup
//! - Level-exclusive selection toggling
//! - Deterministic triage classification
//! - Assessment record assembly, validation and persistence

pub mod types;
pub mod error;
pub mod catalog;
pub mod logging;
pub mod selection;
pub mod engine;
pub mod record;
pub mod sink;
pub mod session;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{CatalogSource, CriteriaCatalog, RawCatalog, RawCriterion};
pub use selection::SelectionSet;
pub use engine::classify;
pub use record::{build_record, save_record, validate_record, Violation};
pub use sink::{read_records, JsonlSink, RecordSink};
pub use session::AssessmentSession;
