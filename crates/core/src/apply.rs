// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use directory_import_domain::{
    DomainError, FieldMapping, ImportReport, ImportResult, MappingTarget, RawRecord, RawTable,
    SourceFile, SuggestedMapping, ValidationWarning, Workflow, check_mapping_completeness,
    validate_default_password, validate_field_for_category,
};
use time::OffsetDateTime;

use crate::command::Command;
use crate::effect::{AdvancedSubmission, Effect, QuickSubmission, SuggestionRequest};
use crate::error::CoreError;
use crate::state::{ImportJob, JobError, JobErrorKind, Phase, RequestTicket, Transition};

/// Applies a command to a job, producing the next job.
///
/// # Arguments
///
/// * `job` - The current job (immutable)
/// * `command` - The command to apply
///
/// # Returns
///
/// * `Ok(Transition)` containing the new job, any remote call to perform, and
///   non-blocking warnings
/// * `Err(CoreError)` if the command is rejected; the job is unchanged
///
/// # Errors
///
/// Returns an error if:
/// - The command is not accepted in the job's phase or workflow
/// - A chosen file cannot be parsed
/// - A mapping edit names an unknown column or a field outside the category
/// - A submission is attempted without a default password, or while another
///   is in flight
/// - A remote outcome carries a ticket the job is not waiting for
pub fn apply(job: &ImportJob, command: Command) -> Result<Transition, CoreError> {
    let name: &'static str = command.name();

    match (job.workflow, job.phase, command) {
        (_, _, Command::Reset) => Ok(Transition::new(job.reset())),

        // Upload
        (Workflow::Advanced, Phase::Upload | Phase::Previewed, Command::ChooseFile { file }) => {
            choose_file_for_preview(job, &file)
        }
        (Workflow::Quick, Phase::Upload, Command::ChooseFile { file }) => {
            let mut next: ImportJob = job.clone();
            next.source = Some(file);
            next.error = None;
            Ok(Transition::new(next))
        }

        // Preview
        (
            Workflow::Advanced,
            Phase::Previewing,
            Command::SuggestionReceived { ticket, suggestion },
        ) => {
            ensure_awaited(job, ticket)?;
            Ok(receive_suggestion(job, &suggestion))
        }
        (Workflow::Advanced, Phase::Previewing, Command::SuggestionFailed { ticket, message }) => {
            ensure_awaited(job, ticket)?;
            let mut next: ImportJob = job.clone();
            next.phase = Phase::Upload;
            next.table = None;
            next.mapping = None;
            next.pending = None;
            next.error = Some(JobError {
                kind: JobErrorKind::Suggestion,
                message,
            });
            Ok(Transition::new(next))
        }
        (Workflow::Advanced, Phase::Previewed, Command::ContinueToMapping) => {
            let mut next: ImportJob = job.clone();
            next.phase = Phase::Mapping;
            Ok(Transition::new(next))
        }

        // Mapping
        (Workflow::Advanced, Phase::Mapping, Command::BackToPreview) => {
            let mut next: ImportJob = job.clone();
            next.phase = Phase::Previewed;
            Ok(Transition::new(next))
        }
        (Workflow::Advanced, Phase::Mapping, Command::AssignField { header, field }) => {
            validate_field_for_category(field, job.category)?;
            edit_mapping(job, &header, |mapping| {
                mapping.set_mapping(&header, MappingTarget::Field(field));
            })
        }
        (Workflow::Advanced, Phase::Mapping, Command::SkipColumn { header }) => {
            edit_mapping(job, &header, |mapping| {
                mapping.set_mapping(&header, MappingTarget::Skipped);
            })
        }
        (Workflow::Advanced, Phase::Mapping, Command::ClearColumn { header }) => {
            edit_mapping(job, &header, |mapping| {
                mapping.clear(&header);
            })
        }

        // Options, collected in the step before submission
        (Workflow::Advanced, Phase::Mapping, Command::SetDefaultPassword { password })
        | (Workflow::Quick, Phase::Upload, Command::SetDefaultPassword { password }) => {
            let mut next: ImportJob = job.clone();
            next.default_password = password;
            Ok(Transition::new(next))
        }
        (Workflow::Advanced, Phase::Mapping, Command::SetAutoApprove { enabled })
        | (Workflow::Quick, Phase::Upload, Command::SetAutoApprove { enabled }) => {
            let mut next: ImportJob = job.clone();
            next.auto_approve = enabled;
            Ok(Transition::new(next))
        }

        // Submission
        (_, Phase::Submitting, Command::Submit) => Err(CoreError::SubmissionInFlight),
        (Workflow::Advanced, Phase::Mapping, Command::Submit) => submit_advanced(job),
        (Workflow::Quick, Phase::Upload, Command::Submit) => submit_quick(job),
        (
            _,
            Phase::Submitting,
            Command::SubmissionSucceeded {
                ticket,
                result,
                received_at,
            },
        ) => {
            ensure_awaited(job, ticket)?;
            Ok(complete(job, result, received_at))
        }
        (_, Phase::Submitting, Command::SubmissionFailed { ticket, message }) => {
            ensure_awaited(job, ticket)?;
            let mut next: ImportJob = job.clone();
            next.phase = match job.workflow {
                Workflow::Advanced => Phase::Mapping,
                Workflow::Quick => Phase::Upload,
            };
            next.pending = None;
            next.error = Some(JobError {
                kind: JobErrorKind::Submission,
                message,
            });
            Ok(Transition::new(next))
        }

        // A remote outcome outside the phase that awaits it is always late
        (
            _,
            _,
            Command::SuggestionReceived { ticket, .. }
            | Command::SuggestionFailed { ticket, .. }
            | Command::SubmissionSucceeded { ticket, .. }
            | Command::SubmissionFailed { ticket, .. },
        ) => Err(CoreError::StaleResponse { ticket }),

        (workflow, phase, _) => Err(CoreError::InvalidPhase {
            command: name,
            phase,
            workflow,
        }),
    }
}

/// Rejects outcomes whose ticket is not the job's outstanding request.
fn ensure_awaited(job: &ImportJob, ticket: RequestTicket) -> Result<(), CoreError> {
    if job.pending != Some(ticket) {
        return Err(CoreError::StaleResponse { ticket });
    }
    Ok(())
}

fn choose_file_for_preview(job: &ImportJob, file: &SourceFile) -> Result<Transition, CoreError> {
    let table: RawTable = RawTable::parse(file.contents(), job.dialect)?;
    let headers: Vec<String> = table
        .distinct_headers()
        .into_iter()
        .map(str::to_string)
        .collect();

    let mut next: ImportJob = job.clone();
    next.source = None;
    next.table = Some(table);
    next.mapping = Some(FieldMapping::new());
    next.error = None;
    next.phase = Phase::Previewing;
    let ticket: RequestTicket = next.issue_ticket();

    let effect: Effect = Effect::RequestSuggestion(SuggestionRequest {
        ticket,
        category: job.category,
        headers,
    });
    Ok(Transition::new(next).with_effect(effect))
}

fn receive_suggestion(job: &ImportJob, suggestion: &SuggestedMapping) -> Transition {
    let mut next: ImportJob = job.clone();
    if let Some(table) = &job.table {
        next.mapping = Some(FieldMapping::seeded(
            &table.distinct_headers(),
            suggestion,
            job.category,
        ));
    }
    next.pending = None;
    next.phase = Phase::Previewed;
    Transition::new(next)
}

/// Applies a mapping edit after checking the header exists in the table.
fn edit_mapping(
    job: &ImportJob,
    header: &str,
    edit: impl FnOnce(&mut FieldMapping),
) -> Result<Transition, CoreError> {
    if !job.table.as_ref().is_some_and(|table| table.has_header(header)) {
        return Err(CoreError::DomainViolation(DomainError::UnknownHeader(
            header.to_string(),
        )));
    }

    let mut next: ImportJob = job.clone();
    edit(next.mapping.get_or_insert_with(FieldMapping::new));
    Ok(Transition::new(next))
}

fn submit_advanced(job: &ImportJob) -> Result<Transition, CoreError> {
    validate_default_password(job.default_password.expose())?;

    let mapping: FieldMapping = job.mapping.clone().unwrap_or_default();
    let rows: Vec<RawRecord> = job
        .table
        .as_ref()
        .map(|table| table.rows().to_vec())
        .unwrap_or_default();

    // Completeness is advisory; the remote importer is the real gate
    let incomplete: Option<ValidationWarning> = check_mapping_completeness(&mapping, job.category);

    let mut next: ImportJob = job.clone();
    next.error = None;
    next.phase = Phase::Submitting;
    let ticket: RequestTicket = next.issue_ticket();

    let effect: Effect = Effect::SubmitAdvanced(AdvancedSubmission {
        ticket,
        category: job.category,
        rows,
        mapping: mapping.resolved(),
        default_password: job.default_password.clone(),
        auto_approve: job.auto_approve,
    });

    let mut transition: Transition = Transition::new(next).with_effect(effect);
    transition.warnings.extend(incomplete);
    Ok(transition)
}

fn submit_quick(job: &ImportJob) -> Result<Transition, CoreError> {
    let file: SourceFile = job.source.clone().ok_or(CoreError::NoFileSelected)?;
    validate_default_password(job.default_password.expose())?;

    let mut next: ImportJob = job.clone();
    next.error = None;
    next.phase = Phase::Submitting;
    let ticket: RequestTicket = next.issue_ticket();

    let effect: Effect = Effect::SubmitQuick(QuickSubmission {
        ticket,
        category: job.category,
        file,
        default_password: job.default_password.clone(),
        auto_approve: job.auto_approve,
    });
    Ok(Transition::new(next).with_effect(effect))
}

fn complete(job: &ImportJob, result: ImportResult, received_at: OffsetDateTime) -> Transition {
    let rows_submitted: Option<usize> = match job.workflow {
        Workflow::Advanced => job.table.as_ref().map(RawTable::row_count),
        Workflow::Quick => None,
    };

    let mut next: ImportJob = job.clone();
    next.pending = None;
    next.phase = Phase::Completed;
    next.report = Some(ImportReport::new(result, rows_submitted, received_at));
    Transition::new(next)
}
