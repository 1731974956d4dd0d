// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The import job state machine.
//!
//! A job moves through upload, preview, mapping and submission. Every change
//! is a pure function of the current job and a [`Command`]; remote work is
//! described as an [`Effect`] for the caller to perform, and its outcome is
//! fed back in as another command carrying the [`RequestTicket`] it was
//! issued with.

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

mod apply;
mod command;
mod effect;
mod error;
mod state;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::apply;
pub use command::Command;
pub use effect::{AdvancedSubmission, Effect, QuickSubmission, SuggestionRequest};
pub use error::CoreError;
pub use state::{
    DefaultPassword, ImportJob, JobError, JobErrorKind, JobId, Phase, RequestTicket, Transition,
};
