// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Drives one import job through its remote collaborators.
//!
//! [`ImportSession::dispatch`] applies a user action and hands back any
//! remote call to make, [`execute`] performs that call and turns its outcome
//! into a completion command, and [`ImportSession::deliver`] feeds the
//! completion back. Keeping the three apart lets a caller reset the job while
//! a call is in flight; the late completion is then discarded.

use directory_import::{
    Command, CoreError, DefaultPassword, Effect, ImportJob, RequestTicket, Transition, apply,
};
use directory_import_domain::{
    CanonicalField, ImportReport, ImportResult, SourceFile, ValidationWarning,
};
use time::OffsetDateTime;
use tracing::{error, info, warn};

use crate::collaborators::{BatchImporter, MappingSuggester};
use crate::error::{ClientError, SessionError};

/// What happened to a delivered completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The completion advanced the job.
    Applied,
    /// The completion was not for the current request and was dropped.
    Discarded,
}

/// One import job together with the collaborator that serves it.
#[derive(Debug)]
pub struct ImportSession<C> {
    job: ImportJob,
    collaborator: C,
    warnings: Vec<ValidationWarning>,
}

impl<C> ImportSession<C>
where
    C: MappingSuggester + BatchImporter + Sync,
{
    /// Creates a session for `job`.
    pub const fn new(job: ImportJob, collaborator: C) -> Self {
        Self {
            job,
            collaborator,
            warnings: Vec::new(),
        }
    }

    /// The current job.
    pub const fn job(&self) -> &ImportJob {
        &self.job
    }

    /// The collaborator remote calls go through.
    pub const fn collaborator(&self) -> &C {
        &self.collaborator
    }

    /// Warnings raised by the most recent accepted command.
    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    /// Applies a user action and returns the remote call it requires, if any.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Rejected` if the job does not accept the
    /// command; the job is left unchanged.
    pub fn dispatch(&mut self, command: Command) -> Result<Option<Effect>, SessionError> {
        let name: &'static str = command.name();
        match apply(&self.job, command) {
            Ok(transition) => Ok(self.accept(name, transition)),
            Err(err) => {
                warn!(job = %self.job.id(), command = name, error = %err, "Command rejected");
                Err(SessionError::Rejected(err))
            }
        }
    }

    /// Feeds a completion produced by [`execute`] back into the job.
    pub fn deliver(&mut self, completion: Command) -> Delivery {
        let name: &'static str = completion.name();
        self.log_ignored_suggestions(&completion);
        match apply(&self.job, completion) {
            Ok(transition) => {
                self.accept(name, transition);
                Delivery::Applied
            }
            Err(CoreError::StaleResponse { ticket }) => {
                info!(job = %self.job.id(), ticket = %ticket, "Discarding late response");
                Delivery::Discarded
            }
            Err(err) => {
                warn!(job = %self.job.id(), command = name, error = %err, "Discarding response");
                Delivery::Discarded
            }
        }
    }

    /// Dispatches `command`, performs any remote call, and delivers the result.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Rejected` if the job does not accept the
    /// command. Remote failures are recorded on the job instead.
    pub async fn run(&mut self, command: Command) -> Result<(), SessionError> {
        if let Some(effect) = self.dispatch(command)? {
            let completion: Command = execute(&self.collaborator, effect).await;
            self.deliver(completion);
        }
        Ok(())
    }

    /// Chooses a file; in the advanced workflow this also fetches a mapping
    /// suggestion.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Rejected` if the file cannot be parsed or the
    /// job is not in a phase that accepts a file.
    pub async fn choose_file(&mut self, file: SourceFile) -> Result<(), SessionError> {
        self.run(Command::ChooseFile { file }).await
    }

    /// Moves from the preview to the mapping editor.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Rejected` outside the previewed phase.
    pub fn continue_to_mapping(&mut self) -> Result<(), SessionError> {
        self.dispatch(Command::ContinueToMapping).map(drop)
    }

    /// Returns from the mapping editor to the preview.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Rejected` outside the mapping phase.
    pub fn back_to_preview(&mut self) -> Result<(), SessionError> {
        self.dispatch(Command::BackToPreview).map(drop)
    }

    /// Maps `header` to `field`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Rejected` for unknown headers, fields outside
    /// the category, or outside the mapping phase.
    pub fn assign_field(&mut self, header: &str, field: CanonicalField) -> Result<(), SessionError> {
        self.dispatch(Command::AssignField {
            header: header.to_string(),
            field,
        })
        .map(drop)
    }

    /// Marks `header` as not imported.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Rejected` for unknown headers or outside the
    /// mapping phase.
    pub fn skip_column(&mut self, header: &str) -> Result<(), SessionError> {
        self.dispatch(Command::SkipColumn {
            header: header.to_string(),
        })
        .map(drop)
    }

    /// Returns `header` to undecided.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Rejected` for unknown headers or outside the
    /// mapping phase.
    pub fn clear_column(&mut self, header: &str) -> Result<(), SessionError> {
        self.dispatch(Command::ClearColumn {
            header: header.to_string(),
        })
        .map(drop)
    }

    /// Sets the password given to every created account.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Rejected` outside the step before submission.
    pub fn set_default_password(&mut self, password: DefaultPassword) -> Result<(), SessionError> {
        self.dispatch(Command::SetDefaultPassword { password })
            .map(drop)
    }

    /// Sets whether created accounts are approved immediately.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Rejected` outside the step before submission.
    pub fn set_auto_approve(&mut self, enabled: bool) -> Result<(), SessionError> {
        self.dispatch(Command::SetAutoApprove { enabled }).map(drop)
    }

    /// Submits the job and waits for the outcome.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Rejected` if the job cannot be submitted, such
    /// as when the default password is missing.
    pub async fn submit(&mut self) -> Result<(), SessionError> {
        self.run(Command::Submit).await
    }

    /// Abandons the job and starts a fresh one for the same category.
    pub fn reset(&mut self) {
        let previous = self.job.id();
        // Reset is accepted in every phase
        if let Ok(transition) = apply(&self.job, Command::Reset) {
            self.accept("Reset", transition);
            info!(job = %self.job.id(), previous = %previous, "Job reset");
        }
    }

    /// The final report of a completed job.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Failed` if the job holds a remote failure, or
    /// `SessionError::Unfinished` if it has not completed.
    pub fn outcome(&self) -> Result<&ImportReport, SessionError> {
        if let Some(report) = self.job.report() {
            return Ok(report);
        }
        if let Some(job_error) = self.job.error() {
            return Err(SessionError::Failed(job_error.clone()));
        }
        Err(SessionError::Unfinished {
            phase: self.job.phase(),
        })
    }

    fn log_ignored_suggestions(&self, completion: &Command) {
        let (Command::SuggestionReceived { ticket, suggestion }, Some(table)) =
            (completion, self.job.table())
        else {
            return;
        };
        if self.job.pending() != Some(*ticket) {
            return;
        }
        let headers: Vec<&str> = table.distinct_headers();
        for (header, field) in suggestion.ignored_entries(&headers, self.job.category()) {
            warn!(
                job = %self.job.id(),
                header = header,
                field = %field,
                "Ignoring suggestion that does not fit this import"
            );
        }
    }

    fn accept(&mut self, name: &'static str, transition: Transition) -> Option<Effect> {
        let Transition {
            job,
            effect,
            warnings,
        } = transition;

        for warning in &warnings {
            warn!(job = %job.id(), warning = %warning, "Import warning");
        }
        if let Some(job_error) = job.error().filter(|e| self.job.error() != Some(*e)) {
            error!(job = %job.id(), error = %job_error, "Import job failed");
        }
        if job.phase() != self.job.phase() {
            info!(
                job = %job.id(),
                command = name,
                from = %self.job.phase(),
                to = %job.phase(),
                "Phase changed"
            );
        }

        self.job = job;
        self.warnings = warnings;
        effect
    }
}

/// Performs a remote call and returns the completion to deliver.
///
/// Failures are logged here and become failure completions; they never
/// escape as errors.
pub async fn execute<C>(collaborator: &C, effect: Effect) -> Command
where
    C: MappingSuggester + BatchImporter + Sync,
{
    match effect {
        Effect::RequestSuggestion(request) => {
            match collaborator
                .suggest_mapping(request.category, &request.headers)
                .await
            {
                Ok(suggestion) => Command::SuggestionReceived {
                    ticket: request.ticket,
                    suggestion,
                },
                Err(err) => {
                    error!(ticket = %request.ticket, error = %err, "Mapping suggestion failed");
                    Command::SuggestionFailed {
                        ticket: request.ticket,
                        message: err.user_message(),
                    }
                }
            }
        }
        Effect::SubmitAdvanced(submission) => {
            let outcome = collaborator.import_rows(&submission).await;
            submission_outcome(submission.ticket, outcome)
        }
        Effect::SubmitQuick(submission) => {
            let outcome = collaborator.import_file(&submission).await;
            submission_outcome(submission.ticket, outcome)
        }
    }
}

fn submission_outcome(ticket: RequestTicket, outcome: Result<ImportResult, ClientError>) -> Command {
    match outcome {
        Ok(result) => {
            info!(
                ticket = %ticket,
                succeeded = result.success_count,
                failed = result.failure_count,
                "Import finished"
            );
            Command::SubmissionSucceeded {
                ticket,
                result,
                received_at: OffsetDateTime::now_utc(),
            }
        }
        Err(err) => {
            error!(ticket = %ticket, error = %err, "Import submission failed");
            Command::SubmissionFailed {
                ticket,
                message: err.user_message(),
            }
        }
    }
}
