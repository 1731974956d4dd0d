// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{CanonicalField, ImportCategory};

/// Errors raised while turning file contents into a `RawTable`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The file contains no non-blank lines.
    EmptyFile,
    /// The file could not be decoded as text.
    UnreadableFile {
        /// Why decoding failed.
        reason: String,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFile => write!(f, "The file is empty"),
            Self::UnreadableFile { reason } => write!(f, "The file could not be read: {reason}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The category name is not recognized.
    UnknownCategory(String),
    /// The canonical field name is not recognized.
    UnknownField(String),
    /// The field exists but does not belong to the job's category.
    FieldNotInCategory {
        /// The offending field.
        field: CanonicalField,
        /// The active category.
        category: ImportCategory,
    },
    /// The header is not a column of the parsed table.
    UnknownHeader(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCategory(name) => {
                write!(f, "Unknown import category '{name}' (must be lawyer or ngo)")
            }
            Self::UnknownField(name) => write!(f, "Unknown field '{name}'"),
            Self::FieldNotInCategory { field, category } => {
                write!(f, "Field '{field}' is not valid for {category} imports")
            }
            Self::UnknownHeader(header) => {
                write!(f, "Column '{header}' does not exist in the uploaded file")
            }
        }
    }
}

impl std::error::Error for DomainError {}

/// Local, user-visible problems detected before anything reaches the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    /// Required fields have no column mapped to them.
    MappingIncomplete {
        /// The required fields with no column.
        missing: Vec<CanonicalField>,
    },
    /// No default password was provided.
    PasswordMissing,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MappingIncomplete { missing } => {
                let names: Vec<&str> = missing.iter().map(CanonicalField::as_str).collect();
                write!(f, "Required fields are not mapped: {}", names.join(", "))
            }
            Self::PasswordMissing => write!(f, "A default password is required"),
        }
    }
}

impl std::error::Error for ValidationWarning {}
