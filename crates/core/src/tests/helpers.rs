// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use directory_import_domain::{
    CanonicalField, ImportCategory, ImportResult, SourceFile, SuggestedMapping, Workflow,
};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{Command, DefaultPassword, Effect, ImportJob, Phase, RequestTicket, apply};

pub const LAWYER_CSV: &str = "\
Name,Mail,Practice,Bar #,City,Notes
Amina Yusuf,amina@example.org,Family law,BN-001,Kampala,
Jonas Okello,jonas@example.org,Labour law,BN-002,Gulu,prefers phone
";

pub fn lawyer_file() -> SourceFile {
    SourceFile::new("lawyers.csv", LAWYER_CSV)
}

pub fn received_at() -> OffsetDateTime {
    datetime!(2026-03-01 10:15:00 UTC)
}

pub fn lawyer_suggestion() -> SuggestedMapping {
    let mut suggestion: SuggestedMapping = SuggestedMapping::new();
    suggestion.insert("Name", CanonicalField::Username);
    suggestion.insert("Mail", CanonicalField::Email);
    suggestion.insert("Practice", CanonicalField::Specialization);
    suggestion.insert("Bar #", CanonicalField::BarNumber);
    suggestion.insert("City", CanonicalField::Location);
    suggestion
}

pub fn successful_result(count: u64) -> ImportResult {
    ImportResult {
        success_count: count,
        failure_count: 0,
        errors: Vec::new(),
    }
}

/// Extracts the ticket of the effect emitted by a transition.
pub fn ticket_of(effect: Option<&Effect>) -> RequestTicket {
    effect.expect("transition should emit an effect").ticket()
}

/// A lawyer advanced job sitting in the previewing phase, with its ticket.
pub fn previewing_job() -> (ImportJob, RequestTicket) {
    let job: ImportJob = ImportJob::new(ImportCategory::Lawyer, Workflow::Advanced);
    let transition = apply(
        &job,
        Command::ChooseFile {
            file: lawyer_file(),
        },
    )
    .unwrap();
    let ticket: RequestTicket = ticket_of(transition.effect.as_ref());
    (transition.job, ticket)
}

/// A lawyer advanced job in the mapping phase with suggestions applied.
pub fn mapping_job() -> ImportJob {
    let (job, ticket) = previewing_job();
    let job: ImportJob = apply(
        &job,
        Command::SuggestionReceived {
            ticket,
            suggestion: lawyer_suggestion(),
        },
    )
    .unwrap()
    .job;
    let job: ImportJob = apply(&job, Command::ContinueToMapping).unwrap().job;
    assert_eq!(job.phase(), Phase::Mapping);
    job
}

/// A lawyer advanced job that has been submitted, with its ticket.
pub fn submitting_job() -> (ImportJob, RequestTicket) {
    let job: ImportJob = mapping_job();
    let job: ImportJob = apply(
        &job,
        Command::SetDefaultPassword {
            password: DefaultPassword::new("Welcome2026!"),
        },
    )
    .unwrap()
    .job;
    let transition = apply(&job, Command::Submit).unwrap();
    let ticket: RequestTicket = ticket_of(transition.effect.as_ref());
    (transition.job, ticket)
}
