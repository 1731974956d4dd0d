// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;

use directory_import_domain::{CanonicalField, ImportCategory, RawRecord, SourceFile};

use crate::state::{DefaultPassword, RequestTicket};

/// Asks the suggestion service for a best-guess mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRequest {
    /// Correlates the answer with the issuing job.
    pub ticket: RequestTicket,
    /// The import category.
    pub category: ImportCategory,
    /// Distinct column names in file order.
    pub headers: Vec<String>,
}

/// A batch built from a client-side mapping.
///
/// Rows are sent raw so the remote importer keeps its own validation
/// authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvancedSubmission {
    /// Correlates the answer with the issuing job.
    pub ticket: RequestTicket,
    /// The import category.
    pub category: ImportCategory,
    /// Every parsed row, unmodified.
    pub rows: Vec<RawRecord>,
    /// Mapped columns only; skipped columns are left out.
    pub mapping: BTreeMap<String, CanonicalField>,
    /// Password for every created account.
    pub default_password: DefaultPassword,
    /// Whether accounts are approved on creation.
    pub auto_approve: bool,
}

/// A batch where parsing and mapping happen server-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickSubmission {
    /// Correlates the answer with the issuing job.
    pub ticket: RequestTicket,
    /// The import category.
    pub category: ImportCategory,
    /// The original file.
    pub file: SourceFile,
    /// Password for every created account.
    pub default_password: DefaultPassword,
    /// Whether accounts are approved on creation.
    pub auto_approve: bool,
}

/// A remote call a transition asks the caller to perform.
///
/// The outcome must be fed back as the matching completion command carrying
/// the same ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch a mapping suggestion.
    RequestSuggestion(SuggestionRequest),
    /// Submit rows with an explicit mapping.
    SubmitAdvanced(AdvancedSubmission),
    /// Submit the raw file.
    SubmitQuick(QuickSubmission),
}

impl Effect {
    /// The ticket the completion must carry.
    #[must_use]
    pub const fn ticket(&self) -> RequestTicket {
        match self {
            Self::RequestSuggestion(request) => request.ticket,
            Self::SubmitAdvanced(submission) => submission.ticket,
            Self::SubmitQuick(submission) => submission.ticket,
        }
    }
}
