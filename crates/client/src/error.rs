// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for remote calls and the import session.

use directory_import::{CoreError, JobError, Phase};
use thiserror::Error;

/// Failures talking to the directory service.
///
/// These never describe individual rows; row failures arrive inside a
/// successful [`directory_import_domain::ImportResult`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent or the response could not be read.
    #[error("Could not reach the directory service: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service refused the caller's credentials.
    #[error("Not authorized to import (HTTP {status})")]
    Unauthorized { status: u16 },

    /// The service answered with a non-success status.
    #[error("The directory service returned HTTP {status}: {message}")]
    Remote { status: u16, message: String },

    /// A success response whose body did not match the expected shape.
    #[error("Unexpected response from the directory service: {0}")]
    Decode(String),

    /// The client could not be built from its configuration.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    /// The message recorded on the job when a remote call fails.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(err) if err.is_timeout() => {
                String::from("The directory service did not respond in time")
            }
            Self::Transport(_) => String::from("Could not reach the directory service"),
            Self::Unauthorized { .. } => {
                String::from("You are not authorized to import into the directory")
            }
            Self::Remote { message, .. } => message.clone(),
            Self::Decode(_) => String::from("Unexpected response from the directory service"),
            Self::InvalidConfig(reason) => format!("Invalid client configuration: {reason}"),
        }
    }
}

/// Failures surfaced by [`crate::ImportSession`].
#[derive(Debug, Error)]
pub enum SessionError {
    /// The job rejected a command.
    #[error(transparent)]
    Rejected(#[from] CoreError),

    /// The job recorded a remote failure.
    #[error("{0}")]
    Failed(JobError),

    /// The job has not reached the completed phase.
    #[error("The import has not finished (currently {phase})")]
    Unfinished { phase: Phase },
}
