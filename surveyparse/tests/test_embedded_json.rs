use pretty_assertions::assert_eq;
use surveyparse::{
    classify, embedded::find_balanced_object, to_interactive, Classification, EmbeddedSource,
    QuestionType,
};

// ============================================================================
// Whole-Turn Objects
// ============================================================================

#[test]
fn test_whole_object_returned_verbatim() {
    let text = "  {\"type\": \"yes_no\", \"question\": \"Ready?\"}\n";
    let outcome = classify(text);
    let Classification::Embedded(found) = &outcome else {
        panic!("expected embedded JSON, got {outcome:?}");
    };
    assert_eq!(found.source(), EmbeddedSource::Whole);
    assert_eq!(to_interactive(text), text);
}

#[test]
fn test_non_question_object_still_short_circuits() {
    let text = r#"{"message": "Do you own a car?"}"#;
    let outcome = classify(text);
    assert!(matches!(outcome, Classification::Embedded(_)));
    assert!(!outcome.is_interactive());
    assert!(outcome.payload().metadata.json_extracted);
}

// ============================================================================
// Objects Inside Prose
// ============================================================================

#[test]
fn test_object_in_prose_extracted() {
    let text = r#"Here is the next question: {"type": "multiple_choice", "question": "Pick?", "options": ["A", "B"]} Good luck!"#;
    assert_eq!(
        to_interactive(text),
        r#"{"type": "multiple_choice", "question": "Pick?", "options": ["A", "B"]}"#
    );
    assert_eq!(classify(text).question_type(), Some(QuestionType::MultipleChoice));
}

#[test]
fn test_nested_object_kept_whole() {
    let text = r#"Result: {"type": "email", "question": "Email?", "meta": {"step": 2}}."#;
    assert_eq!(
        to_interactive(text),
        r#"{"type": "email", "question": "Email?", "meta": {"step": 2}}"#
    );
}

#[test]
fn test_only_first_object_considered() {
    let text = r#"{"a": 1} and then {"b": 2}"#;
    assert_eq!(to_interactive(text), r#"{"a": 1}"#);
}

#[test]
fn test_invalid_object_falls_through_to_detectors() {
    let outcome = classify("Is this ok? {broken: json}");
    assert!(!matches!(outcome, Classification::Embedded(_)));
    assert_eq!(outcome.detector(), Some("fallback"));
}

// ============================================================================
// Brace Inside A String Literal
// ============================================================================

#[test]
fn test_brace_in_string_truncates_span() {
    let text = r#"Note {"question": "Use } here?"}"#;
    assert_eq!(find_balanced_object(text), Some(r#"{"question": "Use }"#));

    // The truncated span is not JSON, so the turn goes to the detectors.
    let outcome = classify(text);
    assert_eq!(outcome.detector(), Some("fallback"));
}

#[test]
fn test_brace_in_string_fine_for_whole_turn() {
    let text = r#"{"type": "open_ended", "question": "Use } here?"}"#;
    assert_eq!(to_interactive(text), text);
}
