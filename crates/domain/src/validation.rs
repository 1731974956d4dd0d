// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::{DomainError, ValidationWarning};
use crate::mapping::FieldMapping;
use crate::types::{CanonicalField, ImportCategory};

/// Validates that a default password was provided.
///
/// The password is opaque: only presence is checked. A value made up solely of
/// whitespace counts as missing.
///
/// # Errors
///
/// Returns `ValidationWarning::PasswordMissing` if the password is empty.
pub fn validate_default_password(password: &str) -> Result<(), ValidationWarning> {
    if password.trim().is_empty() {
        return Err(ValidationWarning::PasswordMissing);
    }
    Ok(())
}

/// Checks mapping completeness for a category.
///
/// Returns `None` when every required field is mapped. This is a warning, not
/// an error: an incomplete mapping may still be submitted.
#[must_use]
pub fn check_mapping_completeness(
    mapping: &FieldMapping,
    category: ImportCategory,
) -> Option<ValidationWarning> {
    if mapping.is_complete(category) {
        return None;
    }
    Some(ValidationWarning::MappingIncomplete {
        missing: mapping.missing_required(category),
    })
}

/// Validates that `field` may be targeted in a `category` import.
///
/// # Errors
///
/// Returns `DomainError::FieldNotInCategory` if the field belongs to the
/// other category's set.
pub fn validate_field_for_category(
    field: CanonicalField,
    category: ImportCategory,
) -> Result<(), DomainError> {
    if !category.accepts(field) {
        return Err(DomainError::FieldNotInCategory { field, category });
    }
    Ok(())
}
