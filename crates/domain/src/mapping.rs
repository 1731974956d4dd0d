// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Column-to-field mapping state.
//!
//! A header can be in one of three states: no decision yet (absent from the
//! mapping), explicitly skipped, or mapped to a canonical field. No two headers
//! ever target the same field at the same time.

use std::collections::BTreeMap;

use crate::types::{CanonicalField, ImportCategory};

/// An explicit decision for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingTarget {
    /// The column feeds this canonical field.
    Field(CanonicalField),
    /// The column is ignored.
    Skipped,
}

/// The state of a single column, including "no decision yet".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnDecision {
    /// Nothing has been decided for this column.
    Undecided,
    /// The column is ignored.
    Skipped,
    /// The column feeds a canonical field.
    Mapped(CanonicalField),
}

/// A best-guess mapping returned by the suggestion service.
///
/// Partial: headers with no suggestion are simply absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SuggestedMapping {
    entries: BTreeMap<String, CanonicalField>,
}

impl SuggestedMapping {
    /// Creates an empty suggestion.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Records a suggestion for `header`.
    pub fn insert(&mut self, header: impl Into<String>, field: CanonicalField) {
        self.entries.insert(header.into(), field);
    }

    /// Returns the suggested field for `header`.
    #[must_use]
    pub fn get(&self, header: &str) -> Option<CanonicalField> {
        self.entries.get(header).copied()
    }

    /// Number of suggested headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the suggestion is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates suggestions in header-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, CanonicalField)> {
        self.entries.iter().map(|(h, f)| (h.as_str(), *f))
    }

    /// Suggestions that cannot be applied: unknown headers or fields outside
    /// the category.
    #[must_use]
    pub fn ignored_entries(
        &self,
        headers: &[&str],
        category: ImportCategory,
    ) -> Vec<(&str, CanonicalField)> {
        self.iter()
            .filter(|(header, field)| !headers.contains(header) || !category.accepts(*field))
            .collect()
    }
}

impl FromIterator<(String, CanonicalField)> for SuggestedMapping {
    fn from_iter<I: IntoIterator<Item = (String, CanonicalField)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// The current header → canonical field assignment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldMapping {
    entries: BTreeMap<String, MappingTarget>,
}

impl FieldMapping {
    /// Creates an empty mapping where every column is undecided.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Seeds a mapping from a suggestion.
    ///
    /// Every header with an applicable suggestion is mapped, in header order,
    /// through [`FieldMapping::set_mapping`]; every other header is skipped.
    #[must_use]
    pub fn seeded(
        headers: &[&str],
        suggestion: &SuggestedMapping,
        category: ImportCategory,
    ) -> Self {
        let mut mapping: Self = Self::new();
        for header in headers {
            let target: MappingTarget = suggestion
                .get(header)
                .filter(|field| category.accepts(*field))
                .map_or(MappingTarget::Skipped, MappingTarget::Field);
            mapping.set_mapping(header, target);
        }
        mapping
    }

    /// Assigns `target` to `header`.
    ///
    /// If `target` is a field already held by another header, that header is
    /// reset to [`MappingTarget::Skipped`] first and its name is returned.
    pub fn set_mapping(&mut self, header: &str, target: MappingTarget) -> Option<String> {
        let mut displaced: Option<String> = None;

        if let MappingTarget::Field(field) = target
            && let Some(previous) = self.header_for(field)
            && previous != header
        {
            let previous: String = previous.to_string();
            self.entries.insert(previous.clone(), MappingTarget::Skipped);
            displaced = Some(previous);
        }

        self.entries.insert(header.to_string(), target);
        displaced
    }

    /// Returns `header` to the undecided state.
    pub fn clear(&mut self, header: &str) -> Option<MappingTarget> {
        self.entries.remove(header)
    }

    /// The current decision for `header`.
    #[must_use]
    pub fn decision(&self, header: &str) -> ColumnDecision {
        match self.entries.get(header) {
            None => ColumnDecision::Undecided,
            Some(MappingTarget::Skipped) => ColumnDecision::Skipped,
            Some(MappingTarget::Field(field)) => ColumnDecision::Mapped(*field),
        }
    }

    /// The header currently mapped to `field`, if any.
    #[must_use]
    pub fn header_for(&self, field: CanonicalField) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, target)| **target == MappingTarget::Field(field))
            .map(|(header, _)| header.as_str())
    }

    /// Mapped headers only, without skipped or undecided columns.
    #[must_use]
    pub fn resolved(&self) -> BTreeMap<String, CanonicalField> {
        self.entries
            .iter()
            .filter_map(|(header, target)| match target {
                MappingTarget::Field(field) => Some((header.clone(), *field)),
                MappingTarget::Skipped => None,
            })
            .collect()
    }

    /// Required fields of `category` that no header targets.
    #[must_use]
    pub fn missing_required(&self, category: ImportCategory) -> Vec<CanonicalField> {
        category
            .required_fields()
            .iter()
            .copied()
            .filter(|field| self.target_count(*field) == 0)
            .collect()
    }

    /// Whether every required field of `category` is targeted exactly once.
    #[must_use]
    pub fn is_complete(&self, category: ImportCategory) -> bool {
        category
            .required_fields()
            .iter()
            .all(|field| self.target_count(*field) == 1)
    }

    /// Iterates explicit decisions in header-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, MappingTarget)> {
        self.entries.iter().map(|(h, t)| (h.as_str(), *t))
    }

    /// Number of columns with an explicit decision.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no column has a decision.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn target_count(&self, field: CanonicalField) -> usize {
        self.entries
            .values()
            .filter(|target| **target == MappingTarget::Field(field))
            .count()
    }
}
