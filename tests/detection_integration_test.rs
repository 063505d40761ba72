//! Integration tests for the bundled recognizer stack

use cloak::adapters::recognizer::{CompositeRecognizer, DetectionAdapter, PatternRecognizer};
use cloak::domain::EntityCategory;
use std::sync::Arc;

fn standard_adapter() -> DetectionAdapter {
    let patterns = PatternRecognizer::bundled().expect("Failed to load bundled catalog");
    DetectionAdapter::new(Arc::new(CompositeRecognizer::standard(patterns)))
}

#[test]
fn test_detects_each_category_in_a_realistic_note() {
    let text = "Interview notes\n\n\
                Maria Garcia arrived at 9. Contact: maria.garcia@example.com.\n\
                Her case number is AB-1234567.\n\
                Call 12 34 56 78 before 12.03.2024.\n\
                CPR 010203-1234 is on file.\n";

    let adapter = standard_adapter();
    let detections = adapter.collect(text, "en").unwrap();

    assert_eq!(detections.strings(EntityCategory::Person), ["Maria Garcia"]);
    assert_eq!(
        detections.strings(EntityCategory::Email),
        ["maria.garcia@example.com"]
    );
    assert_eq!(
        detections.strings(EntityCategory::IdNumber),
        ["AB-1234567"]
    );
    assert_eq!(
        detections.strings(EntityCategory::PhoneNumber),
        ["12 34 56 78"]
    );
    assert_eq!(
        detections.strings(EntityCategory::DateNumber),
        ["12.03.2024"]
    );
    assert_eq!(
        detections.strings(EntityCategory::NationalId),
        ["010203-1234"]
    );
    // Every digit run was claimed by a higher-confidence pattern.
    assert!(detections.strings(EntityCategory::GeneralNumber).is_empty());
}

#[test]
fn test_digit_fallback_catches_unshaped_numbers() {
    let adapter = standard_adapter();
    let detections = adapter.collect("Reference 9988776655 filed.", "en").unwrap();

    assert_eq!(
        detections.strings(EntityCategory::GeneralNumber),
        ["9988776655"]
    );
}

#[test]
fn test_national_id_outranks_the_digit_fallback() {
    let adapter = standard_adapter();
    let detections = adapter.collect("CPR 010203-1234.", "en").unwrap();

    assert_eq!(
        detections.strings(EntityCategory::NationalId),
        ["010203-1234"]
    );
    assert!(detections.strings(EntityCategory::GeneralNumber).is_empty());
}

#[test]
fn test_address_outranks_the_name_heuristic() {
    let adapter = standard_adapter();
    let detections = adapter
        .collect("Send mail to 123 Main Street, Springfield, IL today.", "en")
        .unwrap();

    assert_eq!(
        detections.strings(EntityCategory::Location),
        ["123 Main Street, Springfield, IL"]
    );
    // "Main Street" sits inside the address span and must not surface
    // as a person.
    assert!(detections.strings(EntityCategory::Person).is_empty());
}

#[test]
fn test_merge_keeps_first_seen_order_across_documents() {
    let adapter = standard_adapter();
    let mut all = adapter.collect("Maria Garcia called.", "en").unwrap();
    let second = adapter
        .collect("Maria Garcia and John Doe met.", "en")
        .unwrap();
    all.merge(second);

    assert_eq!(
        all.strings(EntityCategory::Person),
        ["Maria Garcia", "John Doe"]
    );
}

#[test]
fn test_abbreviated_name_form_is_detected() {
    let adapter = standard_adapter();
    let detections = adapter.collect("Signed by J. Doe on behalf.", "en").unwrap();

    assert_eq!(detections.strings(EntityCategory::Person), ["J. Doe"]);
}
