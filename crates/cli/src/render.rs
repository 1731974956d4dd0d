// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Plain-text rendering of a job for the terminal.

use std::fmt::Write;

use directory_import::ImportJob;
use directory_import_domain::{
    CanonicalField, ColumnDecision, FieldMapping, NormalizationReport, RawTable,
    ValidationWarning,
};

/// Preview, mapping, warnings and row check for an advanced job.
pub fn job_summary(job: &ImportJob) -> String {
    let mut out: String = String::new();

    if let Some(table) = job.table() {
        out.push_str(&preview(table));
    }
    if let (Some(table), Some(mapping)) = (job.table(), job.mapping()) {
        out.push_str(&mapping_lines(table, mapping));
    }
    if let Some(warning) = job.mapping_warning() {
        out.push_str(&warning_line(&warning));
    }
    if let Some(report) = job.normalization() {
        out.push_str(&row_check(&report));
    }
    out
}

fn preview(table: &RawTable) -> String {
    let mut out: String = format!(
        "Preview ({} of {} rows)\n  {}\n",
        table.preview().len(),
        table.row_count(),
        table.headers().join(" | ")
    );
    for record in table.preview() {
        let cells: Vec<&str> = table
            .headers()
            .iter()
            .map(|header| record.get(header).unwrap_or_default())
            .collect();
        let _ = writeln!(out, "  {}", cells.join(" | "));
    }
    out
}

fn mapping_lines(table: &RawTable, mapping: &FieldMapping) -> String {
    let mut out: String = String::from("Mapping\n");
    for header in table.distinct_headers() {
        let target: String = match mapping.decision(header) {
            ColumnDecision::Mapped(field) => field.to_string(),
            ColumnDecision::Skipped => String::from("(skipped)"),
            ColumnDecision::Undecided => String::from("(undecided)"),
        };
        let _ = writeln!(out, "  {header} -> {target}");
    }
    out
}

fn warning_line(warning: &ValidationWarning) -> String {
    format!("Warning: {warning}\n")
}

fn row_check(report: &NormalizationReport) -> String {
    let mut out: String = format!(
        "Rows: {} complete, {} incomplete\n",
        report.complete_count, report.incomplete_count
    );
    for row in &report.rows {
        if !row.missing.is_empty() {
            let missing: Vec<&str> = row.missing.iter().map(CanonicalField::as_str).collect();
            let _ = writeln!(out, "  row {}: missing {}", row.row_number, missing.join(", "));
        }
        for note in &row.notes {
            let _ = writeln!(out, "  row {}: {note}", row.row_number);
        }
    }
    out
}
