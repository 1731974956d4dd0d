// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod render;

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use directory_import::{Command, DefaultPassword, Effect, ImportJob};
use directory_import_client::{
    ClientConfig, DEFAULT_BASE_URL, Delivery, HttpDirectoryClient, ImportSession, SessionError,
};
use directory_import_domain::{
    CanonicalField, Dialect, ImportCategory, SourceFile, SuggestedMapping, Workflow,
};
use tracing::{error, info, warn};

/// Directory Import - bulk-load lawyers or NGOs into the legal aid directory
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// CSV or spreadsheet file to import.
    file: PathBuf,

    /// Directory to import into (lawyer or ngo).
    #[arg(short, long)]
    category: ImportCategory,

    /// Send the file as-is and let the server parse and map it.
    #[arg(long)]
    quick: bool,

    /// Base URL of the directory API.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Bearer token for the admin endpoints.
    #[arg(long, env = "DIRECTORY_IMPORT_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Password given to every account the import creates.
    #[arg(long, env = "DIRECTORY_IMPORT_DEFAULT_PASSWORD", hide_env_values = true)]
    default_password: Option<String>,

    /// Approve created accounts immediately.
    #[arg(long)]
    auto_approve: bool,

    /// Map a column to a field, overriding the suggestion. Repeatable.
    #[arg(
        long = "map",
        value_name = "HEADER=FIELD",
        value_parser = parse_override,
        conflicts_with = "quick"
    )]
    overrides: Vec<(String, CanonicalField)>,

    /// Leave a column out of the import. Repeatable.
    #[arg(long = "skip", value_name = "HEADER", conflicts_with = "quick")]
    skipped: Vec<String>,

    /// Honor double-quoted cells containing commas or newlines. Files with
    /// stray quotes parse differently than with the default splitter.
    #[arg(long)]
    quoted: bool,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Parse and map locally, print the preview, and stop.
    #[arg(long, conflicts_with = "quick")]
    dry_run: bool,
}

impl Args {
    const fn workflow(&self) -> Workflow {
        if self.quick {
            Workflow::Quick
        } else {
            Workflow::Advanced
        }
    }

    const fn dialect(&self) -> Dialect {
        if self.quoted {
            Dialect::Quoted
        } else {
            Dialect::Naive
        }
    }

    fn client_config(&self) -> ClientConfig {
        let config: ClientConfig = ClientConfig::new(self.base_url.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs));
        match &self.token {
            Some(token) => config.with_bearer_token(token.clone()),
            None => config,
        }
    }

    fn default_password(&self) -> DefaultPassword {
        DefaultPassword::new(self.default_password.clone().unwrap_or_default())
    }
}

/// Parses a `HEADER=FIELD` override. The header may itself contain `=`;
/// the last one separates the field.
fn parse_override(value: &str) -> Result<(String, CanonicalField), String> {
    let (header, field) = value
        .rsplit_once('=')
        .ok_or_else(|| format!("expected HEADER=FIELD, got '{value}'"))?;
    let header: &str = header.trim();
    if header.is_empty() {
        return Err(format!("missing header in '{value}'"));
    }
    let field: CanonicalField = field.parse().map_err(|err| format!("{err}"))?;
    Ok((header.to_string(), field))
}

fn read_source(path: &Path) -> Result<SourceFile, Box<dyn std::error::Error>> {
    let contents: Vec<u8> = std::fs::read(path)
        .map_err(|err| format!("Could not read {}: {err}", path.display()))?;
    let name: String = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    let file: SourceFile = SourceFile::new(name, contents);
    if !file.has_accepted_extension() {
        warn!(file = file.name(), "File does not look like CSV or a spreadsheet");
    }
    Ok(file)
}

/// Applies `--map` and `--skip` on top of whatever the mapping holds.
fn apply_overrides(
    session: &mut ImportSession<HttpDirectoryClient>,
    args: &Args,
) -> Result<(), SessionError> {
    for (header, field) in &args.overrides {
        session.assign_field(header, *field)?;
    }
    for header in &args.skipped {
        session.skip_column(header)?;
    }
    Ok(())
}

/// Parses and maps the file without contacting the server.
fn dry_run(args: &Args, file: SourceFile) -> Result<(), Box<dyn std::error::Error>> {
    let config: ClientConfig = args.client_config();
    let client: HttpDirectoryClient = HttpDirectoryClient::new(&config)?;
    let job: ImportJob =
        ImportJob::new(args.category, Workflow::Advanced).with_dialect(args.dialect());
    let mut session: ImportSession<HttpDirectoryClient> = ImportSession::new(job, client);

    let Some(Effect::RequestSuggestion(request)) = session.dispatch(Command::ChooseFile { file })?
    else {
        return Err("file selection did not produce a preview".into());
    };

    // Start from the overrides alone; no suggestion is fetched offline
    let suggestion: SuggestedMapping = args.overrides.iter().cloned().collect();
    let delivery: Delivery = session.deliver(Command::SuggestionReceived {
        ticket: request.ticket,
        suggestion,
    });
    if delivery == Delivery::Discarded {
        return Err("local preview was discarded".into());
    }
    session.continue_to_mapping()?;
    apply_overrides(&mut session, args)?;

    print!("{}", render::job_summary(session.job()));
    info!(job = %session.job().id(), "Dry run finished; nothing was sent");
    Ok(())
}

async fn run(args: &Args, file: SourceFile) -> Result<(), Box<dyn std::error::Error>> {
    let config: ClientConfig = args.client_config();
    info!(
        base_url = %config.base_url,
        workflow = %args.workflow(),
        category = %args.category,
        "Starting import"
    );

    let client: HttpDirectoryClient = HttpDirectoryClient::new(&config)?;
    let job: ImportJob =
        ImportJob::new(args.category, args.workflow()).with_dialect(args.dialect());
    let mut session: ImportSession<HttpDirectoryClient> = ImportSession::new(job, client);

    session.choose_file(file).await?;
    if let Some(job_error) = session.job().error() {
        return Err(Box::new(SessionError::Failed(job_error.clone())));
    }

    if args.workflow() == Workflow::Advanced {
        session.continue_to_mapping()?;
        apply_overrides(&mut session, args)?;
        print!("{}", render::job_summary(session.job()));
    }

    session.set_default_password(args.default_password())?;
    session.set_auto_approve(args.auto_approve)?;
    session.submit().await?;

    let report = session.outcome()?;
    print!("{report}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Logs go to stderr so that reports on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let file: SourceFile = read_source(&args.file)?;

    let result: Result<(), Box<dyn std::error::Error>> = if args.dry_run {
        dry_run(&args, file)
    } else {
        run(&args, file).await
    };

    if let Err(err) = &result {
        error!(error = %err, "Import did not complete");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_override() {
        assert_eq!(
            parse_override("Bar No=barNumber"),
            Ok((String::from("Bar No"), CanonicalField::BarNumber))
        );
    }

    #[test]
    fn test_parse_override_splits_on_last_equals() {
        assert_eq!(
            parse_override("a=b=email"),
            Ok((String::from("a=b"), CanonicalField::Email))
        );
    }

    #[test]
    fn test_parse_override_rejects_bad_input() {
        assert!(parse_override("no separator").is_err());
        assert!(parse_override(" =email").is_err());
        assert_eq!(
            parse_override("Fax=faxNumber"),
            Err(String::from("Unknown field 'faxNumber'"))
        );
    }

    #[test]
    fn test_args_parse_with_repeated_overrides() {
        let args: Args = Args::try_parse_from([
            "directory-import",
            "lawyers.csv",
            "--category",
            "lawyers",
            "--map",
            "Name=username",
            "--map",
            "Mail=email",
            "--skip",
            "Notes",
            "--quoted",
        ])
        .unwrap_or_else(|err| panic!("{err}"));

        assert_eq!(args.category, ImportCategory::Lawyer);
        assert_eq!(args.workflow(), Workflow::Advanced);
        assert_eq!(args.dialect(), Dialect::Quoted);
        assert_eq!(args.overrides.len(), 2);
        assert_eq!(args.skipped, vec![String::from("Notes")]);
        assert_eq!(args.timeout_secs, 30);
    }

    #[test]
    fn test_dry_run_conflicts_with_quick() {
        let result = Args::try_parse_from([
            "directory-import",
            "ngos.xlsx",
            "--category",
            "ngo",
            "--quick",
            "--dry-run",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn test_column_overrides_conflict_with_quick() {
        for extra in [["--map", "Name=username"], ["--skip", "Notes"]] {
            let result = Args::try_parse_from(
                ["directory-import", "ngos.xlsx", "--category", "ngo", "--quick"]
                    .into_iter()
                    .chain(extra),
            );

            assert!(result.is_err(), "{extra:?} should be rejected with --quick");
        }
    }

    #[test]
    fn test_dry_run_does_not_need_a_server() {
        let args: Args = Args::try_parse_from([
            "directory-import",
            "lawyers.csv",
            "--category",
            "lawyer",
            "--dry-run",
            "--base-url",
            "http://127.0.0.1:9",
            "--map",
            "Name=username",
        ])
        .unwrap_or_else(|err| panic!("{err}"));
        let file: SourceFile = SourceFile::new("lawyers.csv", "Name,Notes\nAmina,x\n");

        assert!(dry_run(&args, file).is_ok());
    }
}
