// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod mapping;
mod normalize;
mod result;
mod table;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::{DomainError, ParseError, ValidationWarning};
pub use mapping::{ColumnDecision, FieldMapping, MappingTarget, SuggestedMapping};
pub use normalize::{CandidateRow, NormalizationReport, RowStatus, normalize_rows};
pub use result::{ImportReport, ImportResult, RowError};
pub use table::{
    ACCEPTED_EXTENSIONS, Dialect, PREVIEW_ROW_LIMIT, RawRecord, RawTable, SourceFile,
};
pub use types::{CanonicalField, ImportCategory, Workflow};
pub use validation::{
    check_mapping_completeness, validate_default_password, validate_field_for_category,
};
