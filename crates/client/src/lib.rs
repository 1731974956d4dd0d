// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Remote collaborators for directory imports and the session that drives a
//! job through them.

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

mod collaborators;
mod config;
mod error;
mod http;
mod request_response;
mod session;

#[cfg(test)]
mod tests;

pub use collaborators::{BatchImporter, MappingSuggester};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{ClientError, SessionError};
pub use http::HttpDirectoryClient;
pub use request_response::{
    ErrorResponse, ImportRowsRequest, SuggestionRequestBody, SuggestionResponse,
};
pub use session::{Delivery, ImportSession, execute};
