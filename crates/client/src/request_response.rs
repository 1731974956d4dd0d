// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wire shapes for the directory import endpoints.
//!
//! Import results use [`directory_import_domain::ImportResult`] directly.

use std::collections::BTreeMap;

use directory_import_domain::{CanonicalField, ImportCategory, RawRecord};
use serde::{Deserialize, Serialize};

/// Body of a mapping-suggestion request.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionRequestBody<'a> {
    pub category: ImportCategory,
    pub headers: &'a [String],
}

/// Response to a mapping-suggestion request.
///
/// Field names stay strings here so that one unknown name does not reject
/// the whole suggestion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SuggestionResponse {
    #[serde(default)]
    pub mapping: BTreeMap<String, String>,
}

/// Body of an advanced import request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRowsRequest<'a> {
    pub category: ImportCategory,
    pub rows: &'a [RawRecord],
    pub mapping: &'a BTreeMap<String, CanonicalField>,
    pub default_password: &'a str,
    pub auto_approve: bool,
}

/// Error body returned with non-success statuses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorResponse {
    /// The first non-blank of `message` and `error`.
    #[must_use]
    pub fn text(self) -> Option<String> {
        self.message
            .into_iter()
            .chain(self.error)
            .map(|text| text.trim().to_string())
            .find(|text| !text.is_empty())
    }
}
