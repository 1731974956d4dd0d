// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::future::Future;

use directory_import::{AdvancedSubmission, QuickSubmission};
use directory_import_domain::{ImportCategory, ImportResult, SuggestedMapping};

use crate::error::ClientError;

/// Proposes a header-to-field mapping for a set of column headers.
pub trait MappingSuggester {
    /// Requests a suggestion for `headers` in `category`.
    ///
    /// The suggestion may be partial; headers it omits are skipped.
    fn suggest_mapping(
        &self,
        category: ImportCategory,
        headers: &[String],
    ) -> impl Future<Output = Result<SuggestedMapping, ClientError>> + Send;
}

/// Performs batch imports and reports per-row outcomes.
pub trait BatchImporter {
    /// Imports raw rows under a resolved mapping.
    fn import_rows(
        &self,
        submission: &AdvancedSubmission,
    ) -> impl Future<Output = Result<ImportResult, ClientError>> + Send;

    /// Imports an unparsed file.
    fn import_file(
        &self,
        submission: &QuickSubmission,
    ) -> impl Future<Output = Result<ImportResult, ClientError>> + Send;
}
