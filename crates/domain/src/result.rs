// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// A per-row failure reported by the remote importer.
///
/// Purely informational: a row error never fails the job and is never retried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowError {
    /// The row number as reported by the importer (1-based). Zero when the
    /// importer did not report a usable number.
    #[serde(default, deserialize_with = "lenient_count")]
    pub row_number: u64,
    /// Why the row was rejected.
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

impl RowError {
    /// Creates a new row error.
    pub fn new(row_number: u64, message: impl Into<String>) -> Self {
        Self {
            row_number,
            message: message.into(),
        }
    }
}

/// Summary returned by the remote importer for one batch.
///
/// Fields missing from the payload, or sent as `null`, default to zero or
/// empty. A result that arrived is always kept, whatever its shape.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportResult {
    /// Number of accounts created.
    #[serde(deserialize_with = "lenient_count")]
    pub success_count: u64,
    /// Number of rows rejected.
    #[serde(deserialize_with = "lenient_count")]
    pub failure_count: u64,
    /// Row-level failures, in the order reported.
    #[serde(deserialize_with = "null_as_default")]
    pub errors: Vec<RowError>,
}

/// The shapes a count may arrive in.
#[derive(Deserialize)]
#[serde(untagged)]
enum CountRepr {
    Number(u64),
    Text(String),
    Other(IgnoredAny),
}

/// Reads a count sent as a number or numeric string; anything else is zero.
fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let count: u64 = match Option::<CountRepr>::deserialize(deserializer)? {
        Some(CountRepr::Number(n)) => n,
        Some(CountRepr::Text(text)) => text.trim().parse().unwrap_or_default(),
        Some(CountRepr::Other(_)) | None => 0,
    };
    Ok(count)
}

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The most recent import result, held read-only for display.
///
/// The counts are kept exactly as reported. A mismatch between the reported
/// totals and the number of submitted rows is surfaced, never corrected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    result: ImportResult,
    rows_submitted: Option<usize>,
    received_at: OffsetDateTime,
}

impl ImportReport {
    /// Wraps a remote result.
    ///
    /// # Arguments
    ///
    /// * `result` - The result exactly as returned
    /// * `rows_submitted` - Rows sent, when known (unknown for quick imports)
    /// * `received_at` - When the response arrived
    #[must_use]
    pub const fn new(
        result: ImportResult,
        rows_submitted: Option<usize>,
        received_at: OffsetDateTime,
    ) -> Self {
        Self {
            result,
            rows_submitted,
            received_at,
        }
    }

    /// The underlying result.
    #[must_use]
    pub const fn result(&self) -> &ImportResult {
        &self.result
    }

    /// Number of accounts created.
    #[must_use]
    pub const fn success_count(&self) -> u64 {
        self.result.success_count
    }

    /// Number of rows rejected.
    #[must_use]
    pub const fn failure_count(&self) -> u64 {
        self.result.failure_count
    }

    /// Row-level failures.
    #[must_use]
    pub fn row_errors(&self) -> &[RowError] {
        &self.result.errors
    }

    /// Rows sent to the importer, when known.
    #[must_use]
    pub const fn rows_submitted(&self) -> Option<usize> {
        self.rows_submitted
    }

    /// When the response arrived.
    #[must_use]
    pub const fn received_at(&self) -> OffsetDateTime {
        self.received_at
    }

    /// `success_count + failure_count` as reported.
    #[must_use]
    pub const fn reported_total(&self) -> u64 {
        self.result
            .success_count
            .saturating_add(self.result.failure_count)
    }

    /// Whether the reported totals match the rows submitted.
    ///
    /// `None` when the number of submitted rows is unknown.
    #[must_use]
    pub fn is_consistent(&self) -> Option<bool> {
        self.rows_submitted
            .map(|submitted| u64::try_from(submitted).is_ok_and(|n| n == self.reported_total()))
    }
}

impl std::fmt::Display for ImportReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let received: String = self
            .received_at
            .format(&Rfc3339)
            .map_err(|_| std::fmt::Error)?;
        writeln!(
            f,
            "Import finished at {received}: {} succeeded, {} failed",
            self.result.success_count, self.result.failure_count
        )?;
        for error in &self.result.errors {
            if error.row_number == 0 {
                writeln!(f, "  row ?: {}", error.message)?;
            } else {
                writeln!(f, "  row {}: {}", error.row_number, error.message)?;
            }
        }
        if let (Some(false), Some(submitted)) = (self.is_consistent(), self.rows_submitted) {
            writeln!(
                f,
                "  note: {} outcome(s) reported for {submitted} submitted row(s)",
                self.reported_total()
            )?;
        }
        Ok(())
    }
}
