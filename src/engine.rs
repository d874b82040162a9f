//! Classification engine: derive an overall triage category from the
//! current selection.
//!
//! `classify` is a pure function of its two inputs. Severity levels are
//! evaluated in fixed priority order (Red, Yellow, Green, Blue); the first
//! level with any selected criterion wins. An empty selection yields no
//! category at all; the clinician must act, the engine never invents one.
//! `Black` is never derived here; it is manual-override-only.

use crate::catalog::CriteriaCatalog;
use crate::selection::SelectionSet;
use crate::types::{ExamArea, SeverityLevel};

/// Derive the overall severity level for a selection, or None if the
/// selection is empty (or references nothing the catalog knows).
pub fn classify(selection: &SelectionSet, catalog: &CriteriaCatalog) -> Option<SeverityLevel> {
    if selection.is_empty() {
        return None;
    }

    for level in SeverityLevel::PRIORITY_ORDER {
        for area in ExamArea::ALL {
            if catalog
                .criteria_at(area, level)
                .iter()
                .any(|c| selection.contains(&c.id))
            {
                tracing::debug!("Classified selection as {:?} (matched in {:?})", level, area);
                return Some(level);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Criterion;

    fn criterion(id: &str, area: ExamArea, level: SeverityLevel) -> Criterion {
        Criterion {
            id: id.into(),
            label: format!("finding {}", id),
            exam_area: area,
            severity_level: level,
        }
    }

    fn test_catalog() -> CriteriaCatalog {
        CriteriaCatalog::from_criteria(vec![
            criterion("R1", ExamArea::Circulation, SeverityLevel::Red),
            criterion("Y1", ExamArea::Disability, SeverityLevel::Yellow),
            criterion("G1", ExamArea::Other, SeverityLevel::Green),
            criterion("B1", ExamArea::Other, SeverityLevel::Blue),
        ])
    }

    #[test]
    fn test_empty_selection_yields_no_category() {
        let catalog = test_catalog();
        assert_eq!(classify(&SelectionSet::new(), &catalog), None);
    }

    #[test]
    fn test_single_selection_yields_its_level() {
        let catalog = test_catalog();
        let selection = SelectionSet::new().toggle("G1", &catalog);
        assert_eq!(classify(&selection, &catalog), Some(SeverityLevel::Green));
    }

    #[test]
    fn test_priority_order_red_beats_yellow() {
        let catalog = test_catalog();
        // Invariant-bypassing multi-level set; classify must still resolve
        // by priority, independent of insertion order.
        let a = SelectionSet::from_ids(["R1", "Y1"]);
        let b = SelectionSet::from_ids(["Y1", "R1"]);
        assert_eq!(classify(&a, &catalog), Some(SeverityLevel::Red));
        assert_eq!(classify(&b, &catalog), Some(SeverityLevel::Red));
    }

    #[test]
    fn test_priority_order_full_ladder() {
        let catalog = test_catalog();
        let all = SelectionSet::from_ids(["B1", "G1", "Y1", "R1"]);
        assert_eq!(classify(&all, &catalog), Some(SeverityLevel::Red));

        let no_red = SelectionSet::from_ids(["B1", "G1", "Y1"]);
        assert_eq!(classify(&no_red, &catalog), Some(SeverityLevel::Yellow));

        let low_only = SelectionSet::from_ids(["B1", "G1"]);
        assert_eq!(classify(&low_only, &catalog), Some(SeverityLevel::Green));

        let blue_only = SelectionSet::from_ids(["B1"]);
        assert_eq!(classify(&blue_only, &catalog), Some(SeverityLevel::Blue));
    }

    #[test]
    fn test_classify_is_deterministic() {
        let catalog = test_catalog();
        let selection = SelectionSet::from_ids(["Y1", "G1"]);
        let first = classify(&selection, &catalog);
        for _ in 0..10 {
            assert_eq!(classify(&selection, &catalog), first);
        }
    }

    #[test]
    fn test_selection_of_only_unknown_ids_yields_none() {
        let catalog = test_catalog();
        let stale = SelectionSet::from_ids(["GONE"]);
        assert_eq!(classify(&stale, &catalog), None);
    }
}
