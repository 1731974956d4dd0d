// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use directory_import_domain::{DomainError, ParseError, ValidationWarning, Workflow};

use crate::state::{Phase, RequestTicket};

/// Reasons a command is rejected. A rejected command never changes the job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The chosen file could not be parsed.
    Parse(ParseError),
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// A local precondition for advancing is not met.
    Validation(ValidationWarning),
    /// The command is not accepted in the current phase or workflow.
    InvalidPhase {
        /// The rejected command.
        command: &'static str,
        /// The job's phase.
        phase: Phase,
        /// The job's workflow.
        workflow: Workflow,
    },
    /// A batch is already in flight for this job.
    SubmissionInFlight,
    /// A quick import was submitted before a file was chosen.
    NoFileSelected,
    /// A remote outcome arrived for a request this job no longer awaits.
    StaleResponse {
        /// The ticket carried by the late outcome.
        ticket: RequestTicket,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "Parse error: {err}"),
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::Validation(warning) => write!(f, "Validation failed: {warning}"),
            Self::InvalidPhase {
                command,
                phase,
                workflow,
            } => write!(
                f,
                "{command} is not allowed in the {phase} phase of the {workflow} workflow"
            ),
            Self::SubmissionInFlight => write!(f, "An import is already being submitted"),
            Self::NoFileSelected => write!(f, "No file has been selected"),
            Self::StaleResponse { ticket } => {
                write!(f, "Discarded response for request {ticket}")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<ParseError> for CoreError {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<ValidationWarning> for CoreError {
    fn from(warning: ValidationWarning) -> Self {
        Self::Validation(warning)
    }
}
