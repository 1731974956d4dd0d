// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::{Arc, Mutex};

use axum::Router;
use directory_import::{AdvancedSubmission, QuickSubmission};
use directory_import_domain::{
    CanonicalField, ImportCategory, ImportResult, RowError, SourceFile, SuggestedMapping,
};

use crate::{BatchImporter, ClientConfig, ClientError, MappingSuggester};

pub const LAWYER_CSV: &str = "\
Full Name,E-mail,Practice Area,Bar No,City
Amina Yusuf,amina@example.org,Family law,BN-001,Kampala
Jonas Okello,jonas@example.org,Labour law,,Gulu
";

pub fn lawyer_file() -> SourceFile {
    SourceFile::new("lawyers.csv", LAWYER_CSV)
}

pub fn lawyer_suggestion() -> SuggestedMapping {
    let mut suggestion: SuggestedMapping = SuggestedMapping::new();
    suggestion.insert("Full Name", CanonicalField::Username);
    suggestion.insert("E-mail", CanonicalField::Email);
    suggestion.insert("Practice Area", CanonicalField::Specialization);
    suggestion.insert("Bar No", CanonicalField::BarNumber);
    suggestion.insert("City", CanonicalField::Location);
    suggestion
}

pub fn mixed_result() -> ImportResult {
    ImportResult {
        success_count: 1,
        failure_count: 1,
        errors: vec![RowError::new(2, "missing barNumber")],
    }
}

/// What the fake directory records about the calls it receives.
#[derive(Debug, Default)]
pub struct Recorded {
    pub suggestion_headers: Vec<Vec<String>>,
    pub advanced: Vec<AdvancedSubmission>,
    pub quick: Vec<QuickSubmission>,
}

/// In-memory collaborator with scripted outcomes.
#[derive(Debug, Clone)]
pub struct FakeDirectory {
    pub suggestion: Option<SuggestedMapping>,
    pub result: Option<ImportResult>,
    pub recorded: Arc<Mutex<Recorded>>,
}

impl FakeDirectory {
    pub fn succeeding() -> Self {
        Self {
            suggestion: Some(lawyer_suggestion()),
            result: Some(mixed_result()),
            recorded: Arc::new(Mutex::new(Recorded::default())),
        }
    }

    pub fn without_suggestions() -> Self {
        Self {
            suggestion: None,
            ..Self::succeeding()
        }
    }

    pub fn refusing_imports() -> Self {
        Self {
            result: None,
            ..Self::succeeding()
        }
    }

    fn import_outcome(&self) -> Result<ImportResult, ClientError> {
        self.result
            .clone()
            .ok_or(ClientError::Unauthorized { status: 403 })
    }
}

impl MappingSuggester for FakeDirectory {
    async fn suggest_mapping(
        &self,
        _category: ImportCategory,
        headers: &[String],
    ) -> Result<SuggestedMapping, ClientError> {
        self.recorded
            .lock()
            .unwrap()
            .suggestion_headers
            .push(headers.to_vec());
        self.suggestion.clone().ok_or_else(|| ClientError::Remote {
            status: 503,
            message: String::from("Suggestion service unavailable"),
        })
    }
}

impl BatchImporter for FakeDirectory {
    async fn import_rows(&self, submission: &AdvancedSubmission) -> Result<ImportResult, ClientError> {
        self.recorded
            .lock()
            .unwrap()
            .advanced
            .push(submission.clone());
        self.import_outcome()
    }

    async fn import_file(&self, submission: &QuickSubmission) -> Result<ImportResult, ClientError> {
        self.recorded.lock().unwrap().quick.push(submission.clone());
        self.import_outcome()
    }
}

/// Serves `router` on an ephemeral local port and returns a config for it.
pub async fn serve(router: Router) -> ClientConfig {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    ClientConfig::new(format!("http://{addr}/api/"))
}
