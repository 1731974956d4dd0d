// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Client-side completeness check for mapped rows.
//!
//! This module applies a mapping to every row of a parsed table and reports
//! which rows carry a value for each required field. The result is advisory:
//! it never blocks submission, and the remote importer remains the
//! authoritative validator.

use std::collections::{BTreeMap, HashMap};

use crate::mapping::FieldMapping;
use crate::table::{RawRecord, RawTable};
use crate::types::{CanonicalField, ImportCategory};

/// Fields whose values are expected to be unique across a roster.
const UNIQUE_FIELDS: &[CanonicalField] = &[CanonicalField::Username, CanonicalField::Email];

/// Status of a normalized row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatus {
    /// Every required field has a value.
    Complete,
    /// At least one required field is unmapped or empty.
    Incomplete,
}

/// A single row after the mapping has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRow {
    /// The row number (1-based, excluding header).
    pub row_number: usize,
    /// Canonical field → raw value. Skipped and undecided columns are omitted.
    pub record: BTreeMap<CanonicalField, String>,
    /// Required fields with no usable value.
    pub missing: Vec<CanonicalField>,
    /// Advisory notes, such as values repeated within the file.
    pub notes: Vec<String>,
    /// The row status.
    pub status: RowStatus,
}

impl CandidateRow {
    /// Whether every required field has a value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status == RowStatus::Complete
    }
}

/// Result of normalizing a whole table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizationReport {
    /// Per-row results in file order.
    pub rows: Vec<CandidateRow>,
    /// Total number of rows.
    pub total_rows: usize,
    /// Number of complete rows.
    pub complete_count: usize,
    /// Number of incomplete rows.
    pub incomplete_count: usize,
}

impl NormalizationReport {
    /// Only the rows that are missing required values.
    pub fn incomplete_rows(&self) -> impl Iterator<Item = &CandidateRow> {
        self.rows.iter().filter(|row| !row.is_complete())
    }
}

/// Applies the mapping to one record.
fn map_record(
    record: &RawRecord,
    columns: &BTreeMap<String, CanonicalField>,
) -> BTreeMap<CanonicalField, String> {
    columns
        .iter()
        .filter_map(|(header, field)| {
            record
                .get(header)
                .map(|value| (*field, value.to_string()))
        })
        .collect()
}

/// Required fields that are unmapped, absent, or blank in `record`.
fn missing_required(
    record: &BTreeMap<CanonicalField, String>,
    category: ImportCategory,
) -> Vec<CanonicalField> {
    category
        .required_fields()
        .iter()
        .copied()
        .filter(|field| record.get(field).is_none_or(|value| value.trim().is_empty()))
        .collect()
}

/// Normalizes every row of `table` with `mapping`.
///
/// # Arguments
///
/// * `table` - The parsed file
/// * `mapping` - The current column mapping
/// * `category` - The import category, which decides the required fields
#[must_use]
pub fn normalize_rows(
    table: &RawTable,
    mapping: &FieldMapping,
    category: ImportCategory,
) -> NormalizationReport {
    let columns: BTreeMap<String, CanonicalField> = mapping.resolved();
    let mut seen: HashMap<(CanonicalField, String), usize> = HashMap::new();
    let mut rows: Vec<CandidateRow> = Vec::with_capacity(table.row_count());

    for (idx, raw) in table.rows().iter().enumerate() {
        let row_number: usize = idx + 1;
        let record: BTreeMap<CanonicalField, String> = map_record(raw, &columns);
        let missing: Vec<CanonicalField> = missing_required(&record, category);

        // Track unique-field values for intra-file duplicate notes
        let mut notes: Vec<String> = Vec::new();
        for field in UNIQUE_FIELDS {
            let Some(value) = record.get(field).map(|v| v.trim().to_lowercase()) else {
                continue;
            };
            if value.is_empty() {
                continue;
            }
            if let Some(first) = seen.get(&(*field, value.clone())) {
                notes.push(format!(
                    "{field}: duplicate within file - same value as row {first}"
                ));
            } else {
                seen.insert((*field, value), row_number);
            }
        }

        let status: RowStatus = if missing.is_empty() {
            RowStatus::Complete
        } else {
            RowStatus::Incomplete
        };

        rows.push(CandidateRow {
            row_number,
            record,
            missing,
            notes,
            status,
        });
    }

    let total_rows: usize = rows.len();
    let complete_count: usize = rows.iter().filter(|r| r.is_complete()).count();
    let incomplete_count: usize = total_rows - complete_count;

    NormalizationReport {
        rows,
        total_rows,
        complete_count,
        incomplete_count,
    }
}
