// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Structural parsing of uploaded roster files.
//!
//! This module turns raw file contents into a [`RawTable`]: an ordered header
//! list and one string-keyed record per data line. No semantic validation
//! happens here.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ParseError;

/// Number of data rows shown when previewing a parsed table.
pub const PREVIEW_ROW_LIMIT: usize = 5;

/// File extensions the upload form advertises.
///
/// Advisory only: binary spreadsheet formats must be converted to delimited
/// text before they reach the parser.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["csv", "xlsx", "xls"];

const DELIMITER: char = ',';

/// How lines are split into cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// Split on every comma. No quoting, no embedded newlines.
    #[default]
    Naive,
    /// RFC 4180 quoting: quoted cells may contain commas and newlines.
    Quoted,
}

/// A user-supplied file, held in memory.
#[derive(Clone, PartialEq, Eq)]
pub struct SourceFile {
    name: String,
    contents: Vec<u8>,
}

impl SourceFile {
    /// Creates a new source file from its name and raw bytes.
    pub fn new(name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }

    /// Returns the file name as supplied by the user.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw file bytes.
    #[must_use]
    pub fn contents(&self) -> &[u8] {
        &self.contents
    }

    /// Returns the lowercased extension, if the name has one.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
    }

    /// Checks the extension against [`ACCEPTED_EXTENSIONS`].
    #[must_use]
    pub fn has_accepted_extension(&self) -> bool {
        self.extension()
            .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()))
    }
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("name", &self.name)
            .field("bytes", &self.contents.len())
            .finish()
    }
}

/// One data row, keyed by header.
///
/// Cells beyond the end of a short line are absent rather than empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(BTreeMap<String, String>);

impl RawRecord {
    /// Zips cells positionally against headers. Extra cells are dropped; when
    /// two columns share a header the right-most value is kept.
    fn from_cells(headers: &[String], cells: Vec<String>) -> Self {
        let mut values: BTreeMap<String, String> = BTreeMap::new();
        for (header, cell) in headers.iter().zip(cells) {
            values.insert(header.clone(), cell);
        }
        Self(values)
    }

    /// Returns the value for `header`, if the row has that cell.
    #[must_use]
    pub fn get(&self, header: &str) -> Option<&str> {
        self.0.get(header).map(String::as_str)
    }

    /// Number of cells present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the row has no cells at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates `(header, value)` pairs in header-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<const N: usize> From<[(&str, &str); N]> for RawRecord {
    fn from(pairs: [(&str, &str); N]) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

/// The structured form of an uploaded file.
///
/// Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<RawRecord>,
}

impl RawTable {
    /// Decodes and parses raw file bytes.
    ///
    /// A leading UTF-8 byte order mark is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The bytes are not valid UTF-8 (`UnreadableFile`)
    /// - The file has no non-blank lines (`EmptyFile`)
    pub fn parse(contents: &[u8], dialect: Dialect) -> Result<Self, ParseError> {
        let text: &str = std::str::from_utf8(contents).map_err(|e| ParseError::UnreadableFile {
            reason: format!("not valid UTF-8 text ({e})"),
        })?;
        Self::parse_text(text, dialect)
    }

    /// Parses already-decoded text.
    ///
    /// # Errors
    ///
    /// Returns `EmptyFile` if the text has no non-blank lines, or
    /// `UnreadableFile` if a quoted record is malformed.
    pub fn parse_text(text: &str, dialect: Dialect) -> Result<Self, ParseError> {
        let text: &str = text.strip_prefix('\u{feff}').unwrap_or(text);
        let lines: Vec<Vec<String>> = match dialect {
            Dialect::Naive => split_naive(text),
            Dialect::Quoted => split_quoted(text)?,
        };
        Self::assemble(lines)
    }

    fn assemble(lines: Vec<Vec<String>>) -> Result<Self, ParseError> {
        let mut lines = lines.into_iter();
        let headers: Vec<String> = lines.next().ok_or(ParseError::EmptyFile)?;
        let rows: Vec<RawRecord> = lines
            .map(|cells| RawRecord::from_cells(&headers, cells))
            .collect();
        Ok(Self { headers, rows })
    }

    /// Column names in file order, duplicates included.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Column names in file order with repeats removed.
    #[must_use]
    pub fn distinct_headers(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.headers.len());
        for header in &self.headers {
            if !seen.contains(&header.as_str()) {
                seen.push(header);
            }
        }
        seen
    }

    /// Checks whether `header` names a column of this table.
    #[must_use]
    pub fn has_header(&self, header: &str) -> bool {
        self.headers.iter().any(|h| h == header)
    }

    /// All data rows in file order.
    #[must_use]
    pub fn rows(&self) -> &[RawRecord] {
        &self.rows
    }

    /// Number of data rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The first [`PREVIEW_ROW_LIMIT`] rows.
    #[must_use]
    pub fn preview(&self) -> &[RawRecord] {
        &self.rows[..self.rows.len().min(PREVIEW_ROW_LIMIT)]
    }
}

fn split_naive(text: &str) -> Vec<Vec<String>> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            line.split(DELIMITER)
                .map(|cell| cell.trim().to_string())
                .collect()
        })
        .collect()
}

fn split_quoted(text: &str) -> Result<Vec<Vec<String>>, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut lines: Vec<Vec<String>> = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| ParseError::UnreadableFile {
            reason: format!("malformed record {}: {e}", idx + 1),
        })?;

        // A whitespace-only line comes back as a single blank field
        if record.len() == 1 && record.get(0).is_some_and(|cell| cell.trim().is_empty()) {
            continue;
        }

        lines.push(record.iter().map(str::to_string).collect());
    }
    Ok(lines)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reference_example() {
        let table: RawTable =
            RawTable::parse_text("name,email\nAda,ada@x.com\nBob,bob@x.com", Dialect::Naive)
                .unwrap();

        assert_eq!(table.headers(), ["name", "email"]);
        assert_eq!(
            table.rows(),
            [
                RawRecord::from([("name", "Ada"), ("email", "ada@x.com")]),
                RawRecord::from([("name", "Bob"), ("email", "bob@x.com")]),
            ]
        );
    }

    #[test]
    fn test_blank_lines_are_discarded() {
        let table: RawTable =
            RawTable::parse_text("\n\n  \nname,email\n\nAda,ada@x.com\n   \n", Dialect::Naive)
                .unwrap();

        assert_eq!(table.headers().len(), 2);
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_empty_file_fails() {
        assert_eq!(
            RawTable::parse_text("", Dialect::Naive),
            Err(ParseError::EmptyFile)
        );
        assert_eq!(
            RawTable::parse_text(" \n\t\n\r\n", Dialect::Naive),
            Err(ParseError::EmptyFile)
        );
        assert_eq!(
            RawTable::parse_text("\n \n", Dialect::Quoted),
            Err(ParseError::EmptyFile)
        );
    }

    #[test]
    fn test_invalid_utf8_is_unreadable() {
        let result = RawTable::parse(&[0x50, 0x4b, 0x03, 0x04, 0xff, 0xfe], Dialect::Naive);
        assert!(matches!(result, Err(ParseError::UnreadableFile { .. })));
    }

    #[test]
    fn test_short_rows_leave_cells_absent() {
        let table: RawTable =
            RawTable::parse_text("a,b,c\n1,2\n1\n", Dialect::Naive).unwrap();

        let first: &RawRecord = &table.rows()[0];
        assert_eq!(first.get("a"), Some("1"));
        assert_eq!(first.get("b"), Some("2"));
        assert_eq!(first.get("c"), None);
        assert_eq!(table.rows()[1].len(), 1);
    }

    #[test]
    fn test_extra_cells_are_dropped() {
        let table: RawTable = RawTable::parse_text("a,b\n1,2,3,4\n", Dialect::Naive).unwrap();

        assert_eq!(table.rows()[0].len(), 2);
        assert!(table.rows()[0].iter().all(|(k, _)| k == "a" || k == "b"));
    }

    #[test]
    fn test_empty_middle_cell_is_present() {
        let table: RawTable = RawTable::parse_text("a,b,c\n1,,3\n", Dialect::Naive).unwrap();
        assert_eq!(table.rows()[0].get("b"), Some(""));
    }

    #[test]
    fn test_crlf_and_bom_are_stripped() {
        let table: RawTable = RawTable::parse(
            "\u{feff}name , email\r\nAda , ada@x.com\r\n".as_bytes(),
            Dialect::Naive,
        )
        .unwrap();

        assert_eq!(table.headers(), ["name", "email"]);
        assert_eq!(table.rows()[0].get("email"), Some("ada@x.com"));
    }

    #[test]
    fn test_naive_dialect_splits_inside_quotes() {
        let table: RawTable =
            RawTable::parse_text("name,address\nAda,\"1 Main St, Springfield\"\n", Dialect::Naive)
                .unwrap();

        // The quoted comma splits the cell and the tail is dropped
        assert_eq!(table.rows()[0].get("address"), Some("\"1 Main St"));
    }

    #[test]
    fn test_quoted_dialect_keeps_embedded_delimiters() {
        let table: RawTable = RawTable::parse_text(
            "name,address\nAda,\"1 Main St, Springfield\"\n\nBob,\"line one\nline two\"\n",
            Dialect::Quoted,
        )
        .unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(
            table.rows()[0].get("address"),
            Some("1 Main St, Springfield")
        );
        assert_eq!(table.rows()[1].get("address"), Some("line one\nline two"));
    }

    #[test]
    fn test_quoted_dialect_matches_naive_on_simple_input() {
        let text: &str = "name,email,phone\nAda,ada@x.com\nBob,bob@x.com,555,extra\n";
        assert_eq!(
            RawTable::parse_text(text, Dialect::Naive),
            RawTable::parse_text(text, Dialect::Quoted)
        );
    }

    #[test]
    fn test_duplicate_headers_keep_position_and_last_value() {
        let table: RawTable = RawTable::parse_text("email,name,email\na@x,Ada,b@x\n", Dialect::Naive)
            .unwrap();

        assert_eq!(table.headers(), ["email", "name", "email"]);
        assert_eq!(table.distinct_headers(), ["email", "name"]);
        assert_eq!(table.rows()[0].get("email"), Some("b@x"));
    }

    #[test]
    fn test_preview_is_bounded() {
        let mut text: String = String::from("n\n");
        for i in 0..12 {
            text.push_str(&format!("{i}\n"));
        }
        let table: RawTable = RawTable::parse_text(&text, Dialect::Naive).unwrap();

        assert_eq!(table.row_count(), 12);
        assert_eq!(table.preview().len(), PREVIEW_ROW_LIMIT);
        assert_eq!(table.preview()[0].get("n"), Some("0"));
    }

    #[test]
    fn test_source_file_extension_check() {
        assert!(SourceFile::new("roster.CSV", "a").has_accepted_extension());
        assert!(SourceFile::new("roster.xlsx", "a").has_accepted_extension());
        assert!(!SourceFile::new("roster.txt", "a").has_accepted_extension());
        assert!(!SourceFile::new("roster", "a").has_accepted_extension());
    }
}
