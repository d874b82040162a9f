//! Selection set with level-exclusive toggling.
//!
//! The enforced invariant: every id in the set resolves to criteria of one
//! single severity level. Toggling a criterion from a different level
//! silently evicts the previous level's selections.

use crate::catalog::CriteriaCatalog;
use std::collections::HashSet;

/// Set of currently checked criterion ids
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: HashSet<String>,
}

impl SelectionSet {
    /// Empty selection, the state at session start
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw construction from ids, without enforcing the single-level
    /// invariant. For hosts restoring persisted checkbox state; the
    /// invariant is re-established on the next [`SelectionSet::toggle`].
    pub fn from_ids(ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Toggle a criterion, returning the new selection.
    ///
    /// - Already selected: removed (shrinking never violates the invariant).
    /// - Unknown to the catalog: absorbed as a logged no-op; such an id
    ///   implies stale caller state against a closed-world catalog.
    /// - Otherwise: every selected id whose level differs from the new
    ///   criterion's level is evicted, then the id is added.
    pub fn toggle(&self, criterion_id: &str, catalog: &CriteriaCatalog) -> SelectionSet {
        if self.ids.contains(criterion_id) {
            let mut next = self.clone();
            next.ids.remove(criterion_id);
            tracing::debug!("Deselected criterion '{}'", criterion_id);
            return next;
        }

        let Some(level) = catalog.lookup_level(criterion_id) else {
            tracing::warn!(
                "Toggle ignored: criterion '{}' is not in the catalog",
                criterion_id
            );
            return self.clone();
        };

        let mut next = self.clone();
        let before = next.ids.len();
        next.ids
            .retain(|id| catalog.lookup_level(id) == Some(level));
        let evicted = before - next.ids.len();
        if evicted > 0 {
            tracing::debug!(
                "Selecting '{}' ({:?}) evicted {} selection(s) from other levels",
                criterion_id,
                level,
                evicted
            );
        }

        next.ids.insert(criterion_id.to_string());
        next
    }

    pub fn contains(&self, criterion_id: &str) -> bool {
        self.ids.contains(criterion_id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Explicit user-driven reset to the empty selection
    pub fn clear(&mut self) {
        self.ids.clear();
    }
}
