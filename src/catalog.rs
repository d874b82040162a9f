//! Criteria catalog: loading, normalization and lookup.
//!
//! The catalog is fetched once per session from an external master-data
//! collaborator and is read-only for the lifetime of the assessment.
//! Normalization is strict at the boundary: entries with missing fields,
//! unknown area/level keys or duplicate ids are dropped with a warning
//! rather than silently defaulted.

use crate::error::{Error, Result};
use crate::types::{Criterion, ExamArea, SeverityLevel};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

/// A single `{id, label}` entry as it appears on the wire. Both fields are
/// optional there; entries missing either are discarded during load.
#[derive(Clone, Debug, Deserialize)]
pub struct RawCriterion {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}

/// Wire shape of the master-data response: keyed first by exam-area,
/// then by severity-level, yielding lists of raw entries.
pub type RawCatalog = HashMap<String, HashMap<String, Vec<RawCriterion>>>;

/// Master-data collaborator the catalog is loaded from.
///
/// The hosting layer owns transport, authentication and timeouts; a fetch
/// failure of any kind is surfaced by [`CriteriaCatalog::load`] as
/// [`Error::CatalogUnavailable`].
pub trait CatalogSource {
    fn fetch(&self) -> Result<RawCatalog>;
}

/// Normalized, immutable-per-session criteria catalog:
/// exam area → severity level → ordered list of criteria.
#[derive(Clone, Debug, Default)]
pub struct CriteriaCatalog {
    areas: BTreeMap<ExamArea, BTreeMap<SeverityLevel, Vec<Criterion>>>,
    by_id: HashMap<String, Criterion>,
}

impl CriteriaCatalog {
    /// Load and normalize the catalog from a master-data source.
    ///
    /// Absent area/level keys are treated as empty buckets. Malformed
    /// entries are dropped individually; a partial response yields a
    /// partial catalog rather than an abort.
    pub fn load(source: &dyn CatalogSource) -> Result<Self> {
        let raw = source.fetch().map_err(|e| match e {
            Error::CatalogUnavailable(_) => e,
            other => Error::CatalogUnavailable(other.to_string()),
        })?;

        let mut catalog = Self::default();
        let mut dropped = 0usize;

        for (area_key, levels) in raw {
            let Some(area) = ExamArea::from_key(&area_key) else {
                let count: usize = levels.values().map(Vec::len).sum();
                tracing::warn!(
                    "Unknown exam-area key '{}' in master data, dropping {} entries",
                    area_key,
                    count
                );
                dropped += count;
                continue;
            };

            for (level_key, entries) in levels {
                let Some(level) = SeverityLevel::from_key(&level_key) else {
                    tracing::warn!(
                        "Unknown severity-level key '{}' under '{}', dropping {} entries",
                        level_key,
                        area_key,
                        entries.len()
                    );
                    dropped += entries.len();
                    continue;
                };

                for entry in entries {
                    match normalize_entry(entry, area, level) {
                        Some(criterion) => {
                            if !catalog.insert(criterion) {
                                dropped += 1;
                            }
                        }
                        None => dropped += 1,
                    }
                }
            }
        }

        if dropped > 0 {
            tracing::warn!("Catalog loaded with {} malformed entries dropped", dropped);
        }
        tracing::info!("Loaded criteria catalog with {} criteria", catalog.len());
        Ok(catalog)
    }

    /// Build a catalog directly from typed criteria.
    ///
    /// For hosts that already hold validated master data, and for tests.
    /// Duplicate ids keep the first occurrence, as in [`Self::load`].
    pub fn from_criteria(criteria: impl IntoIterator<Item = Criterion>) -> Self {
        let mut catalog = Self::default();
        for criterion in criteria {
            catalog.insert(criterion);
        }
        catalog
    }

    /// Insert a criterion, rejecting duplicate ids. Returns false if dropped.
    fn insert(&mut self, criterion: Criterion) -> bool {
        if self.by_id.contains_key(&criterion.id) {
            tracing::warn!(
                "Duplicate criterion id '{}' in master data, keeping first occurrence",
                criterion.id
            );
            return false;
        }

        self.by_id.insert(criterion.id.clone(), criterion.clone());
        self.areas
            .entry(criterion.exam_area)
            .or_default()
            .entry(criterion.severity_level)
            .or_default()
            .push(criterion);
        true
    }

    /// Severity level of a criterion id, or None if the id is unknown
    pub fn lookup_level(&self, criterion_id: &str) -> Option<SeverityLevel> {
        self.by_id.get(criterion_id).map(|c| c.severity_level)
    }

    /// Full criterion for an id, or None if unknown
    pub fn lookup(&self, criterion_id: &str) -> Option<&Criterion> {
        self.by_id.get(criterion_id)
    }

    /// Criteria in one exam-area/severity-level bucket, in wire order.
    /// Absent buckets yield an empty slice.
    pub fn criteria_at(&self, area: ExamArea, level: SeverityLevel) -> &[Criterion] {
        self.areas
            .get(&area)
            .and_then(|levels| levels.get(&level))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All criteria in deterministic catalog order (area, then level,
    /// then wire order within the bucket)
    pub fn iter(&self) -> impl Iterator<Item = &Criterion> {
        self.areas
            .values()
            .flat_map(|levels| levels.values())
            .flatten()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Validate one raw entry into a criterion, or drop it with a warning
fn normalize_entry(
    entry: RawCriterion,
    area: ExamArea,
    level: SeverityLevel,
) -> Option<Criterion> {
    let id = match entry.id {
        Some(id) if !id.trim().is_empty() => id,
        _ => {
            tracing::warn!(
                "Catalog entry under {:?}/{:?} has no id, dropping",
                area,
                level
            );
            return None;
        }
    };

    let label = match entry.label {
        Some(label) if !label.trim().is_empty() => label,
        _ => {
            tracing::warn!("Catalog entry '{}' has no label, dropping", id);
            return None;
        }
    };

    Some(Criterion {
        id,
        label,
        exam_area: area,
        severity_level: level,
    })
}
