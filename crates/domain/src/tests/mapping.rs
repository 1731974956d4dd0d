// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    CanonicalField, ColumnDecision, FieldMapping, ImportCategory, MappingTarget, SuggestedMapping,
};

fn complete_lawyer_mapping() -> FieldMapping {
    let mut mapping: FieldMapping = FieldMapping::new();
    mapping.set_mapping("Name", MappingTarget::Field(CanonicalField::Username));
    mapping.set_mapping("Mail", MappingTarget::Field(CanonicalField::Email));
    mapping.set_mapping("Practice", MappingTarget::Field(CanonicalField::Specialization));
    mapping.set_mapping("Bar #", MappingTarget::Field(CanonicalField::BarNumber));
    mapping.set_mapping("City", MappingTarget::Field(CanonicalField::Location));
    mapping
}

#[test]
fn test_new_mapping_is_undecided() {
    let mapping: FieldMapping = FieldMapping::new();
    assert!(mapping.is_empty());
    assert_eq!(mapping.decision("anything"), ColumnDecision::Undecided);
}

#[test]
fn test_reassigning_field_skips_previous_header() {
    let mut mapping: FieldMapping = FieldMapping::new();

    let displaced = mapping.set_mapping("email", MappingTarget::Field(CanonicalField::Email));
    assert_eq!(displaced, None);

    let displaced = mapping.set_mapping("mail", MappingTarget::Field(CanonicalField::Email));
    assert_eq!(displaced.as_deref(), Some("email"));

    assert_eq!(mapping.decision("email"), ColumnDecision::Skipped);
    assert_eq!(
        mapping.decision("mail"),
        ColumnDecision::Mapped(CanonicalField::Email)
    );
    assert_eq!(mapping.header_for(CanonicalField::Email), Some("mail"));
}

#[test]
fn test_reassigning_same_header_is_not_a_displacement() {
    let mut mapping: FieldMapping = FieldMapping::new();
    mapping.set_mapping("email", MappingTarget::Field(CanonicalField::Email));

    let displaced = mapping.set_mapping("email", MappingTarget::Field(CanonicalField::Email));
    assert_eq!(displaced, None);
    assert_eq!(
        mapping.decision("email"),
        ColumnDecision::Mapped(CanonicalField::Email)
    );
}

#[test]
fn test_skip_and_clear_are_distinct() {
    let mut mapping: FieldMapping = FieldMapping::new();
    mapping.set_mapping("notes", MappingTarget::Skipped);
    assert_eq!(mapping.decision("notes"), ColumnDecision::Skipped);

    assert_eq!(mapping.clear("notes"), Some(MappingTarget::Skipped));
    assert_eq!(mapping.decision("notes"), ColumnDecision::Undecided);
}

#[test]
fn test_resolved_excludes_skipped_and_undecided() {
    let mut mapping: FieldMapping = FieldMapping::new();
    mapping.set_mapping("email", MappingTarget::Field(CanonicalField::Email));
    mapping.set_mapping("notes", MappingTarget::Skipped);

    let resolved = mapping.resolved();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved.get("email"), Some(&CanonicalField::Email));
}

#[test]
fn test_complete_lawyer_mapping() {
    let mapping: FieldMapping = complete_lawyer_mapping();
    assert!(mapping.is_complete(ImportCategory::Lawyer));
    assert!(mapping.missing_required(ImportCategory::Lawyer).is_empty());
    assert!(!mapping.is_complete(ImportCategory::Ngo));
}

#[test]
fn test_optional_fields_do_not_affect_completeness() {
    let mut mapping: FieldMapping = complete_lawyer_mapping();
    mapping.set_mapping("Tel", MappingTarget::Field(CanonicalField::Phone));
    assert!(mapping.is_complete(ImportCategory::Lawyer));

    mapping.clear("Tel");
    assert!(mapping.is_complete(ImportCategory::Lawyer));
}

#[test]
fn test_missing_required_reports_unmapped_fields() {
    let mut mapping: FieldMapping = complete_lawyer_mapping();
    mapping.set_mapping("Bar #", MappingTarget::Skipped);
    mapping.clear("City");

    assert!(!mapping.is_complete(ImportCategory::Lawyer));
    assert_eq!(
        mapping.missing_required(ImportCategory::Lawyer),
        vec![CanonicalField::BarNumber, CanonicalField::Location]
    );
}

#[test]
fn test_moving_required_field_keeps_completeness() {
    let mut mapping: FieldMapping = complete_lawyer_mapping();
    mapping.set_mapping("Town", MappingTarget::Field(CanonicalField::Location));

    assert!(mapping.is_complete(ImportCategory::Lawyer));
    assert_eq!(mapping.decision("City"), ColumnDecision::Skipped);
}

#[test]
fn test_seeded_defaults_unsuggested_headers_to_skipped() {
    let mut suggestion: SuggestedMapping = SuggestedMapping::new();
    suggestion.insert("Email Address", CanonicalField::Email);

    let mapping: FieldMapping = FieldMapping::seeded(
        &["Full Name", "Email Address", "Notes"],
        &suggestion,
        ImportCategory::Lawyer,
    );

    assert_eq!(mapping.len(), 3);
    assert_eq!(
        mapping.decision("Email Address"),
        ColumnDecision::Mapped(CanonicalField::Email)
    );
    assert_eq!(mapping.decision("Full Name"), ColumnDecision::Skipped);
    assert_eq!(mapping.decision("Notes"), ColumnDecision::Skipped);
}

#[test]
fn test_seeded_drops_fields_outside_category() {
    let mut suggestion: SuggestedMapping = SuggestedMapping::new();
    suggestion.insert("Focus", CanonicalField::FocusArea);
    suggestion.insert("Bar", CanonicalField::BarNumber);

    let mapping: FieldMapping =
        FieldMapping::seeded(&["Focus", "Bar"], &suggestion, ImportCategory::Lawyer);

    assert_eq!(mapping.decision("Focus"), ColumnDecision::Skipped);
    assert_eq!(
        mapping.decision("Bar"),
        ColumnDecision::Mapped(CanonicalField::BarNumber)
    );
    assert_eq!(
        suggestion.ignored_entries(&["Focus", "Bar"], ImportCategory::Lawyer),
        vec![("Focus", CanonicalField::FocusArea)]
    );
}

#[test]
fn test_seeded_keeps_later_header_when_suggestions_collide() {
    let mut suggestion: SuggestedMapping = SuggestedMapping::new();
    suggestion.insert("Work Email", CanonicalField::Email);
    suggestion.insert("Email", CanonicalField::Email);

    let mapping: FieldMapping = FieldMapping::seeded(
        &["Work Email", "Email"],
        &suggestion,
        ImportCategory::Ngo,
    );

    assert_eq!(mapping.decision("Work Email"), ColumnDecision::Skipped);
    assert_eq!(
        mapping.decision("Email"),
        ColumnDecision::Mapped(CanonicalField::Email)
    );
}

#[test]
fn test_ignored_entries_reports_unknown_headers() {
    let suggestion: SuggestedMapping =
        [(String::from("Ghost"), CanonicalField::Email)].into_iter().collect();

    assert_eq!(
        suggestion.ignored_entries(&["Email"], ImportCategory::Ngo),
        vec![("Ghost", CanonicalField::Email)]
    );
}
