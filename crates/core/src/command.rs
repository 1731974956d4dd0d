// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use directory_import_domain::{CanonicalField, ImportResult, SourceFile, SuggestedMapping};
use time::OffsetDateTime;

use crate::state::{DefaultPassword, RequestTicket};

/// A command represents user intent or a remote outcome as data only.
///
/// Commands are the only way to change an import job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A file was selected.
    ChooseFile {
        /// The selected file.
        file: SourceFile,
    },
    /// The mapping suggestion arrived.
    SuggestionReceived {
        /// The ticket of the suggestion request.
        ticket: RequestTicket,
        /// The suggested mapping.
        suggestion: SuggestedMapping,
    },
    /// The mapping suggestion call failed.
    SuggestionFailed {
        /// The ticket of the suggestion request.
        ticket: RequestTicket,
        /// What went wrong.
        message: String,
    },
    /// Move from the preview to the mapping step.
    ContinueToMapping,
    /// Move from the mapping step back to the preview.
    BackToPreview,
    /// Map a column to a canonical field.
    AssignField {
        /// The column header.
        header: String,
        /// The target field.
        field: CanonicalField,
    },
    /// Ignore a column.
    SkipColumn {
        /// The column header.
        header: String,
    },
    /// Return a column to "no decision yet".
    ClearColumn {
        /// The column header.
        header: String,
    },
    /// Set the password given to imported accounts.
    SetDefaultPassword {
        /// The password.
        password: DefaultPassword,
    },
    /// Choose whether imported accounts are approved automatically.
    SetAutoApprove {
        /// The new setting.
        enabled: bool,
    },
    /// Send the batch.
    Submit,
    /// The batch call returned a result.
    SubmissionSucceeded {
        /// The ticket of the submission.
        ticket: RequestTicket,
        /// The result exactly as returned.
        result: ImportResult,
        /// When the response arrived.
        received_at: OffsetDateTime,
    },
    /// The batch call itself failed.
    SubmissionFailed {
        /// The ticket of the submission.
        ticket: RequestTicket,
        /// What went wrong.
        message: String,
    },
    /// Discard the job and start over.
    Reset,
}

impl Command {
    /// A short, stable name for logs and errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ChooseFile { .. } => "ChooseFile",
            Self::SuggestionReceived { .. } => "SuggestionReceived",
            Self::SuggestionFailed { .. } => "SuggestionFailed",
            Self::ContinueToMapping => "ContinueToMapping",
            Self::BackToPreview => "BackToPreview",
            Self::AssignField { .. } => "AssignField",
            Self::SkipColumn { .. } => "SkipColumn",
            Self::ClearColumn { .. } => "ClearColumn",
            Self::SetDefaultPassword { .. } => "SetDefaultPassword",
            Self::SetAutoApprove { .. } => "SetAutoApprove",
            Self::Submit => "Submit",
            Self::SubmissionSucceeded { .. } => "SubmissionSucceeded",
            Self::SubmissionFailed { .. } => "SubmissionFailed",
            Self::Reset => "Reset",
        }
    }

    /// The ticket carried by a completion command.
    #[must_use]
    pub const fn ticket(&self) -> Option<RequestTicket> {
        match self {
            Self::SuggestionReceived { ticket, .. }
            | Self::SuggestionFailed { ticket, .. }
            | Self::SubmissionSucceeded { ticket, .. }
            | Self::SubmissionFailed { ticket, .. } => Some(*ticket),
            _ => None,
        }
    }
}
