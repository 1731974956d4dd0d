// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use directory_import_domain::{
    Dialect, FieldMapping, ImportCategory, ImportReport, NormalizationReport, RawRecord, RawTable,
    SourceFile, ValidationWarning, Workflow, check_mapping_completeness, normalize_rows,
};

use crate::effect::Effect;

/// Identifies one import job.
///
/// A reset produces a fresh job with the next identifier, so responses issued
/// for the old job can be recognized and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId(u64);

impl JobId {
    /// The identifier of the first job in a session.
    #[must_use]
    pub const fn first() -> Self {
        Self(1)
    }

    /// The identifier that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// The numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "job-{}", self.0)
    }
}

/// Correlates a remote call with the job state that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket {
    /// The job that issued the request.
    pub job: JobId,
    /// Per-job request counter.
    pub sequence: u64,
}

impl std::fmt::Display for RequestTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.job, self.sequence)
    }
}

/// Where a job is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Waiting for a file (and, in quick mode, the import options).
    Upload,
    /// The file is parsed; the mapping suggestion is in flight.
    Previewing,
    /// The parsed table and suggested mapping are available for review.
    Previewed,
    /// The user edits the mapping and import options.
    Mapping,
    /// The batch request is in flight.
    Submitting,
    /// The remote importer answered; the report is available.
    Completed,
}

impl Phase {
    /// Whether a remote call is outstanding in this phase.
    #[must_use]
    pub const fn awaits_remote(self) -> bool {
        matches!(self, Self::Previewing | Self::Submitting)
    }

    /// Returns the string form of this phase.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Previewing => "previewing",
            Self::Previewed => "previewed",
            Self::Mapping => "mapping",
            Self::Submitting => "submitting",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which remote call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobErrorKind {
    /// The mapping suggestion call failed.
    Suggestion,
    /// The batch import call failed.
    Submission,
}

/// A job-level failure held alongside the phase control returned to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobError {
    /// Which call failed.
    pub kind: JobErrorKind,
    /// User-facing description.
    pub message: String,
}

impl std::fmt::Display for JobError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            JobErrorKind::Suggestion => write!(f, "Could not preview the file: {}", self.message),
            JobErrorKind::Submission => write!(f, "Import failed: {}", self.message),
        }
    }
}

/// The default password given to every imported account.
///
/// Opaque: never printed by `Debug`.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct DefaultPassword(String);

impl DefaultPassword {
    /// Wraps a password value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Exposes the value for transmission.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether no password has been entered. Whitespace alone does not
    /// count as a password.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Debug for DefaultPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            write!(f, "DefaultPassword(<unset>)")
        } else {
            write!(f, "DefaultPassword(<redacted>)")
        }
    }
}

/// One import job: the value threaded through every state transition.
///
/// Jobs are independent; a lawyer import and an NGO import never share state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportJob {
    pub(crate) id: JobId,
    pub(crate) category: ImportCategory,
    pub(crate) workflow: Workflow,
    pub(crate) dialect: Dialect,
    pub(crate) phase: Phase,
    pub(crate) source: Option<SourceFile>,
    pub(crate) table: Option<RawTable>,
    pub(crate) mapping: Option<FieldMapping>,
    pub(crate) default_password: DefaultPassword,
    pub(crate) auto_approve: bool,
    pub(crate) error: Option<JobError>,
    pub(crate) report: Option<ImportReport>,
    pub(crate) pending: Option<RequestTicket>,
    pub(crate) next_sequence: u64,
}

impl ImportJob {
    /// Creates a job in the upload phase.
    ///
    /// # Arguments
    ///
    /// * `category` - The directory being imported, fixed for this job
    /// * `workflow` - Quick or advanced
    #[must_use]
    pub const fn new(category: ImportCategory, workflow: Workflow) -> Self {
        Self::with_id(JobId::first(), category, workflow, Dialect::Naive)
    }

    const fn with_id(
        id: JobId,
        category: ImportCategory,
        workflow: Workflow,
        dialect: Dialect,
    ) -> Self {
        Self {
            id,
            category,
            workflow,
            dialect,
            phase: Phase::Upload,
            source: None,
            table: None,
            mapping: None,
            default_password: DefaultPassword(String::new()),
            auto_approve: false,
            error: None,
            report: None,
            pending: None,
            next_sequence: 1,
        }
    }

    /// Selects the parsing dialect used when a file is chosen.
    #[must_use]
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// A fresh job with the same category, workflow and dialect.
    #[must_use]
    pub(crate) const fn reset(&self) -> Self {
        Self::with_id(self.id.next(), self.category, self.workflow, self.dialect)
    }

    /// Issues a ticket for a new remote call and records it as outstanding.
    pub(crate) const fn issue_ticket(&mut self) -> RequestTicket {
        let ticket: RequestTicket = RequestTicket {
            job: self.id,
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        self.pending = Some(ticket);
        ticket
    }

    /// The job identifier.
    #[must_use]
    pub const fn id(&self) -> JobId {
        self.id
    }

    /// The import category.
    #[must_use]
    pub const fn category(&self) -> ImportCategory {
        self.category
    }

    /// The workflow.
    #[must_use]
    pub const fn workflow(&self) -> Workflow {
        self.workflow
    }

    /// The parsing dialect.
    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// The current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// The chosen file, held for quick imports.
    #[must_use]
    pub const fn source(&self) -> Option<&SourceFile> {
        self.source.as_ref()
    }

    /// The parsed table, once a file has been parsed.
    #[must_use]
    pub const fn table(&self) -> Option<&RawTable> {
        self.table.as_ref()
    }

    /// The current mapping, once a file has been parsed.
    #[must_use]
    pub const fn mapping(&self) -> Option<&FieldMapping> {
        self.mapping.as_ref()
    }

    /// The first rows of the parsed table.
    #[must_use]
    pub fn preview(&self) -> &[RawRecord] {
        match &self.table {
            Some(table) => table.preview(),
            None => &[],
        }
    }

    /// Whether a default password has been entered. The value itself is
    /// never exposed by the job.
    #[must_use]
    pub fn has_default_password(&self) -> bool {
        !self.default_password.is_empty()
    }

    /// Whether imported accounts are approved automatically.
    #[must_use]
    pub const fn auto_approve(&self) -> bool {
        self.auto_approve
    }

    /// The last job-level error, if control was returned after a failure.
    #[must_use]
    pub const fn error(&self) -> Option<&JobError> {
        self.error.as_ref()
    }

    /// The import report, once completed.
    #[must_use]
    pub const fn report(&self) -> Option<&ImportReport> {
        self.report.as_ref()
    }

    /// The outstanding remote call, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<RequestTicket> {
        self.pending
    }

    /// Advisory completeness check of every row under the current mapping.
    #[must_use]
    pub fn normalization(&self) -> Option<NormalizationReport> {
        match (&self.table, &self.mapping) {
            (Some(table), Some(mapping)) => Some(normalize_rows(table, mapping, self.category)),
            _ => None,
        }
    }

    /// Warning for required fields that have no column, if any.
    #[must_use]
    pub fn mapping_warning(&self) -> Option<ValidationWarning> {
        self.mapping
            .as_ref()
            .and_then(|mapping| check_mapping_completeness(mapping, self.category))
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects on the input job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The job after the transition.
    pub job: ImportJob,
    /// A remote call the caller must now perform, if any.
    pub effect: Option<Effect>,
    /// Non-blocking warnings raised by the transition.
    pub warnings: Vec<ValidationWarning>,
}

impl Transition {
    pub(crate) const fn new(job: ImportJob) -> Self {
        Self {
            job,
            effect: None,
            warnings: Vec::new(),
        }
    }

    pub(crate) fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = Some(effect);
        self
    }
}
