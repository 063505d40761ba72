//! Per-category replacement counters
//!
//! Tracks, per substitution run, how many occurrences of each category
//! were found in the document and how many were replaced. The two are
//! equal today; keeping both makes a dry-run mode trivial and mirrors
//! the shape of the audit record.

use crate::domain::category::EntityCategory;
use std::collections::BTreeMap;

/// Occurrence counters for one substitution pass (or a fold of several).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementCounts {
    found: BTreeMap<EntityCategory, usize>,
    replaced: BTreeMap<EntityCategory, usize>,
}

impl ReplacementCounts {
    /// Zeroed counters for every category.
    pub fn new() -> Self {
        let mut found = BTreeMap::new();
        let mut replaced = BTreeMap::new();
        for category in EntityCategory::ALL {
            found.insert(category, 0);
            replaced.insert(category, 0);
        }
        Self { found, replaced }
    }

    pub fn add_found(&mut self, category: EntityCategory, n: usize) {
        *self.found.entry(category).or_insert(0) += n;
    }

    pub fn add_replaced(&mut self, category: EntityCategory, n: usize) {
        *self.replaced.entry(category).or_insert(0) += n;
    }

    pub fn found(&self, category: EntityCategory) -> usize {
        self.found.get(&category).copied().unwrap_or(0)
    }

    pub fn replaced(&self, category: EntityCategory) -> usize {
        self.replaced.get(&category).copied().unwrap_or(0)
    }

    /// Adds another run's counters into this one.
    pub fn merge(&mut self, other: &ReplacementCounts) {
        for category in EntityCategory::ALL {
            self.add_found(category, other.found(category));
            self.add_replaced(category, other.replaced(category));
        }
    }

    pub fn total_found(&self) -> usize {
        self.found.values().sum()
    }

    pub fn total_replaced(&self) -> usize {
        self.replaced.values().sum()
    }

    pub fn has_replacements(&self) -> bool {
        self.total_replaced() > 0
    }

    /// Flattens to `{count_key}_found` / `{count_key}_replaced` keys for
    /// audit records and summaries.
    pub fn to_flat_map(&self) -> BTreeMap<String, usize> {
        let mut map = BTreeMap::new();
        for category in EntityCategory::ALL {
            map.insert(format!("{}_found", category.count_key()), self.found(category));
            map.insert(
                format!("{}_replaced", category.count_key()),
                self.replaced(category),
            );
        }
        map
    }
}

impl Default for ReplacementCounts {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_counts_are_zero_for_every_category() {
        let counts = ReplacementCounts::new();
        for category in EntityCategory::ALL {
            assert_eq!(counts.found(category), 0);
            assert_eq!(counts.replaced(category), 0);
        }
        assert_eq!(counts.total_found(), 0);
        assert!(!counts.has_replacements());
    }

    #[test]
    fn test_add_accumulates() {
        let mut counts = ReplacementCounts::new();
        counts.add_found(EntityCategory::Person, 2);
        counts.add_found(EntityCategory::Person, 3);
        counts.add_replaced(EntityCategory::Person, 5);
        assert_eq!(counts.found(EntityCategory::Person), 5);
        assert_eq!(counts.replaced(EntityCategory::Person), 5);
        assert!(counts.has_replacements());
    }

    #[test]
    fn test_merge_folds_both_counters() {
        let mut a = ReplacementCounts::new();
        a.add_found(EntityCategory::Email, 1);
        a.add_replaced(EntityCategory::Email, 1);

        let mut b = ReplacementCounts::new();
        b.add_found(EntityCategory::Email, 2);
        b.add_replaced(EntityCategory::Email, 2);
        b.add_found(EntityCategory::Person, 4);
        b.add_replaced(EntityCategory::Person, 4);

        a.merge(&b);
        assert_eq!(a.found(EntityCategory::Email), 3);
        assert_eq!(a.replaced(EntityCategory::Person), 4);
        assert_eq!(a.total_replaced(), 7);
    }

    #[test]
    fn test_flat_map_uses_count_key_stems() {
        let mut counts = ReplacementCounts::new();
        counts.add_found(EntityCategory::PhoneNumber, 2);
        counts.add_replaced(EntityCategory::PhoneNumber, 2);

        let flat = counts.to_flat_map();
        assert_eq!(flat.get("phone_number_found"), Some(&2));
        assert_eq!(flat.get("phone_number_replaced"), Some(&2));
        assert_eq!(flat.get("person_found"), Some(&0));
        assert_eq!(flat.len(), EntityCategory::ALL.len() * 2);
    }
}
