// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The kind of directory being imported.
///
/// Chosen before a file is parsed and fixed for the lifetime of an import job.
/// It decides which canonical fields are valid and which remote endpoints are
/// addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportCategory {
    /// Lawyer roster.
    Lawyer,
    /// NGO roster.
    Ngo,
}

const LAWYER_REQUIRED: &[CanonicalField] = &[
    CanonicalField::Username,
    CanonicalField::Email,
    CanonicalField::Specialization,
    CanonicalField::BarNumber,
    CanonicalField::Location,
];

const NGO_REQUIRED: &[CanonicalField] = &[
    CanonicalField::Username,
    CanonicalField::Email,
    CanonicalField::RegistrationNumber,
    CanonicalField::FocusArea,
    CanonicalField::Location,
];

const SHARED_OPTIONAL: &[CanonicalField] = &[CanonicalField::Phone, CanonicalField::Address];

impl ImportCategory {
    /// All categories, in display order.
    pub const ALL: [Self; 2] = [Self::Lawyer, Self::Ngo];

    /// Returns the wire name of this category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lawyer => "lawyer",
            Self::Ngo => "ngo",
        }
    }

    /// Canonical fields that every imported row must populate.
    #[must_use]
    pub const fn required_fields(&self) -> &'static [CanonicalField] {
        match self {
            Self::Lawyer => LAWYER_REQUIRED,
            Self::Ngo => NGO_REQUIRED,
        }
    }

    /// Canonical fields that may be populated but are not required.
    #[must_use]
    pub const fn optional_fields(&self) -> &'static [CanonicalField] {
        SHARED_OPTIONAL
    }

    /// Every canonical field valid for this category, required fields first.
    pub fn fields(&self) -> impl Iterator<Item = CanonicalField> + '_ {
        self.required_fields()
            .iter()
            .chain(self.optional_fields())
            .copied()
    }

    /// Checks whether `field` belongs to this category's field set.
    #[must_use]
    pub fn accepts(&self, field: CanonicalField) -> bool {
        self.fields().any(|f| f == field)
    }

    /// Checks whether `field` is required for this category.
    #[must_use]
    pub fn requires(&self, field: CanonicalField) -> bool {
        self.required_fields().contains(&field)
    }
}

impl std::fmt::Display for ImportCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ImportCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lawyer" | "lawyers" => Ok(Self::Lawyer),
            "ngo" | "ngos" => Ok(Self::Ngo),
            _ => Err(DomainError::UnknownCategory(s.to_string())),
        }
    }
}

/// A normalized target attribute that imported data populates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CanonicalField {
    /// Account login name.
    Username,
    /// Contact email address.
    Email,
    /// Legal specialization (lawyers).
    Specialization,
    /// Bar registration number (lawyers).
    BarNumber,
    /// Registration number (NGOs).
    RegistrationNumber,
    /// Focus area (NGOs).
    FocusArea,
    /// City or region.
    Location,
    /// Phone number.
    Phone,
    /// Postal address.
    Address,
}

impl CanonicalField {
    /// Returns the wire name of this field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Email => "email",
            Self::Specialization => "specialization",
            Self::BarNumber => "barNumber",
            Self::RegistrationNumber => "registrationNumber",
            Self::FocusArea => "focusArea",
            Self::Location => "location",
            Self::Phone => "phone",
            Self::Address => "address",
        }
    }
}

impl std::fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CanonicalField {
    type Err = DomainError;

    /// Parses a wire field name. Matching ignores case, spaces and underscores
    /// so that `bar_number` and `Bar Number` resolve to `barNumber`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_lowercase();
        match folded.as_str() {
            "username" => Ok(Self::Username),
            "email" => Ok(Self::Email),
            "specialization" => Ok(Self::Specialization),
            "barnumber" => Ok(Self::BarNumber),
            "registrationnumber" => Ok(Self::RegistrationNumber),
            "focusarea" => Ok(Self::FocusArea),
            "location" => Ok(Self::Location),
            "phone" => Ok(Self::Phone),
            "address" => Ok(Self::Address),
            _ => Err(DomainError::UnknownField(s.to_string())),
        }
    }
}

/// Which of the two import workflows a job follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Workflow {
    /// Mapping inference happens entirely server-side; the raw file is sent.
    Quick,
    /// Explicit preview and mapping edit before submission.
    Advanced,
}

impl std::fmt::Display for Workflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Quick => write!(f, "quick"),
            Self::Advanced => write!(f, "advanced"),
        }
    }
}
