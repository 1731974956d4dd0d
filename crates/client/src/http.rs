// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP implementation of the import collaborators.

use std::str::FromStr;

use directory_import::{AdvancedSubmission, QuickSubmission};
use directory_import_domain::{CanonicalField, ImportCategory, ImportResult, SuggestedMapping};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::collaborators::{BatchImporter, MappingSuggester};
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::request_response::{
    ErrorResponse, ImportRowsRequest, SuggestionRequestBody, SuggestionResponse,
};

/// Talks to the directory admin import endpoints.
#[derive(Debug, Clone)]
pub struct HttpDirectoryClient {
    client: Client,
    base_url: String,
}

impl HttpDirectoryClient {
    /// Builds a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidConfig` if the base URL or token is not
    /// usable, or `ClientError::Transport` if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base_url: String = config.normalized_base_url()?.to_string();

        let mut headers: HeaderMap = HeaderMap::new();
        if let Some(token) = &config.bearer_token {
            let mut value: HeaderValue = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
                .map_err(|_| {
                    ClientError::InvalidConfig(String::from(
                        "bearer token contains characters not allowed in a header",
                    ))
                })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client: Client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .user_agent(concat!("directory-import/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// The normalized base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, category: ImportCategory, suffix: &str) -> String {
        format!(
            "{}/admin/import/{}{suffix}",
            self.base_url,
            collection_segment(category)
        )
    }
}

/// Path segment naming the directory a category imports into.
const fn collection_segment(category: ImportCategory) -> &'static str {
    match category {
        ImportCategory::Lawyer => "lawyers",
        ImportCategory::Ngo => "ngos",
    }
}

/// Checks the status and decodes a JSON body.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status: StatusCode = response.status();

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ClientError::Unauthorized {
            status: status.as_u16(),
        });
    }

    if !status.is_success() {
        let body: String = response.text().await.unwrap_or_default();
        return Err(ClientError::Remote {
            status: status.as_u16(),
            message: remote_message(&body, status),
        });
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|err| ClientError::Decode(err.to_string()))
}

/// The message of an error body: its `message` or `error` field, else the
/// raw text, else the status reason.
fn remote_message(body: &str, status: StatusCode) -> String {
    if let Some(text) = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(ErrorResponse::text)
    {
        return text;
    }

    let trimmed: &str = body.trim();
    if trimmed.is_empty() {
        return status
            .canonical_reason()
            .map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_string);
    }
    trimmed.to_string()
}

/// Converts wire field names, dropping any this client does not know.
fn into_suggestion(response: SuggestionResponse) -> SuggestedMapping {
    response
        .mapping
        .into_iter()
        .filter_map(|(header, name)| match CanonicalField::from_str(&name) {
            Ok(field) => Some((header, field)),
            Err(_) => {
                warn!(header = %header, field = %name, "Ignoring unknown suggested field");
                None
            }
        })
        .collect()
}

impl MappingSuggester for HttpDirectoryClient {
    async fn suggest_mapping(
        &self,
        category: ImportCategory,
        headers: &[String],
    ) -> Result<SuggestedMapping, ClientError> {
        let url: String = self.endpoint(category, "/mapping-suggestion");
        debug!(url = %url, headers = headers.len(), "Requesting mapping suggestion");

        let response: Response = self
            .client
            .post(&url)
            .json(&SuggestionRequestBody { category, headers })
            .send()
            .await?;

        let body: SuggestionResponse = decode(response).await?;
        Ok(into_suggestion(body))
    }
}

impl BatchImporter for HttpDirectoryClient {
    async fn import_rows(&self, submission: &AdvancedSubmission) -> Result<ImportResult, ClientError> {
        let url: String = self.endpoint(submission.category, "");
        debug!(
            url = %url,
            ticket = %submission.ticket,
            rows = submission.rows.len(),
            "Submitting rows"
        );

        let body: ImportRowsRequest<'_> = ImportRowsRequest {
            category: submission.category,
            rows: &submission.rows,
            mapping: &submission.mapping,
            default_password: submission.default_password.expose(),
            auto_approve: submission.auto_approve,
        };
        let response: Response = self.client.post(&url).json(&body).send().await?;
        decode(response).await
    }

    async fn import_file(&self, submission: &QuickSubmission) -> Result<ImportResult, ClientError> {
        let url: String = self.endpoint(submission.category, "/quick");
        debug!(
            url = %url,
            ticket = %submission.ticket,
            file = submission.file.name(),
            "Submitting file"
        );

        let file: Part = Part::bytes(submission.file.contents().to_vec())
            .file_name(submission.file.name().to_string());
        let form: Form = Form::new()
            .part("file", file)
            .text(
                "defaultPassword",
                submission.default_password.expose().to_string(),
            )
            .text("autoApprove", submission.auto_approve.to_string());

        let response: Response = self.client.post(&url).multipart(form).send().await?;
        decode(response).await
    }
}
