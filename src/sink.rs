//! Persistence sink boundary and the append-only JSONL reference sink.
//!
//! Hosts normally implement [`RecordSink`] over their own transport. The
//! JSONL sink here is the reference implementation: records are appended
//! as JSON lines under an exclusive file lock, and never rewritten —
//! corrections arrive as new records with fresh ids.

use crate::error::Result;
use crate::types::AssessmentRecord;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// External persistence collaborator for assessment records
pub trait RecordSink {
    fn submit(&mut self, record: &AssessmentRecord) -> Result<()>;
}

/// JSONL-based record sink with file locking
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    /// Create a new JSONL sink for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Ensure the parent directory exists
    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl RecordSink for JsonlSink {
    fn submit(&mut self, record: &AssessmentRecord) -> Result<()> {
        self.ensure_parent_dir()?;

        // Open file for appending
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        // Acquire exclusive lock
        file.lock_exclusive()?;

        // Write record as JSON line
        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(record)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        file.unlock()?;

        tracing::debug!("Appended assessment record {} to sink", record.id);
        Ok(())
    }
}

/// Read all persisted records from a JSONL sink file.
///
/// Malformed lines are skipped with a warning rather than failing the read.
pub fn read_records(path: &Path) -> Result<Vec<AssessmentRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    // Acquire shared lock for reading
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut records = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<AssessmentRecord>(&line) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!("Failed to parse record at line {}: {}", line_num + 1, e);
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} assessment records from sink", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Criterion, ExamArea, SeverityLevel, TriageCategory};
    use chrono::Utc;
    use uuid::Uuid;

    fn create_test_record() -> AssessmentRecord {
        AssessmentRecord {
            id: Uuid::new_v4(),
            triage_category: Some(TriageCategory::Red),
            selected_criteria: vec![Criterion {
                id: "R1".into(),
                label: "No palpable pulse".into(),
                exam_area: ExamArea::Circulation,
                severity_level: SeverityLevel::Red,
            }],
            assessed_at: Utc::now(),
            assessed_by: "nurse_ito".into(),
            clinical_notes: String::new(),
        }
    }

    #[test]
    fn test_submit_and_read_single_record() {
        let temp_dir = tempfile::tempdir().unwrap();
        let sink_path = temp_dir.path().join("assessments.jsonl");

        let record = create_test_record();
        let record_id = record.id;

        let mut sink = JsonlSink::new(&sink_path);
        sink.submit(&record).unwrap();

        let records = read_records(&sink_path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, record_id);
        assert_eq!(records[0].triage_category, Some(TriageCategory::Red));
    }

    #[test]
    fn test_corrections_append_rather_than_rewrite() {
        let temp_dir = tempfile::tempdir().unwrap();
        let sink_path = temp_dir.path().join("assessments.jsonl");

        let mut sink = JsonlSink::new(&sink_path);
        let original = create_test_record();
        let mut correction = create_test_record();
        correction.triage_category = Some(TriageCategory::Yellow);

        sink.submit(&original).unwrap();
        sink.submit(&correction).unwrap();

        let records = read_records(&sink_path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, original.id);
        assert_eq!(records[1].id, correction.id);
    }

    #[test]
    fn test_read_empty_sink() {
        let temp_dir = tempfile::tempdir().unwrap();
        let sink_path = temp_dir.path().join("nonexistent.jsonl");

        let records = read_records(&sink_path).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_read_skips_malformed_lines() {
        let temp_dir = tempfile::tempdir().unwrap();
        let sink_path = temp_dir.path().join("assessments.jsonl");

        let mut sink = JsonlSink::new(&sink_path);
        sink.submit(&create_test_record()).unwrap();

        let mut file = OpenOptions::new().append(true).open(&sink_path).unwrap();
        writeln!(file, "{{ not json").unwrap();
        drop(file);

        sink.submit(&create_test_record()).unwrap();

        let records = read_records(&sink_path).unwrap();
        assert_eq!(records.len(), 2);
    }
}
