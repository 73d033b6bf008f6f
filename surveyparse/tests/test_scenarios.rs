//! End-to-end scenarios: model turns in, front-end responses out.

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use surveyparse::{classify, to_interactive, Classification, QuestionType};

fn response_json(text: &str) -> Value {
    serde_json::from_str(&to_interactive(text)).expect("response should be JSON")
}

// ============================================================================
// Reference Turns
// ============================================================================

#[test]
fn test_multiple_choice_colors() {
    assert_eq!(
        to_interactive("What is your favorite color?\nA) Red\nB) Blue\nC) Green"),
        r#"{"type":"multiple_choice","question":"What is your favorite color?","options":["Red","Blue","Green"],"required":true}"#
    );
}

#[test]
fn test_scale_one_to_ten() {
    let labels: Vec<String> = (1..=10).map(|n| n.to_string()).collect();
    assert_eq!(
        response_json("On a scale of 1 to 10, how satisfied are you?"),
        json!({
            "type": "scale",
            "question": "On a scale of 1 to 10, how satisfied are you?",
            "scale_min": 1,
            "scale_max": 10,
            "scale_labels": labels,
            "required": true,
        })
    );
}

#[test]
fn test_yes_no() {
    assert_eq!(
        to_interactive("Do you own a car?"),
        r#"{"type":"yes_no","question":"Do you own a car?","required":true}"#
    );
}

#[test]
fn test_statement_without_question_mark_unchanged() {
    let text = "Please describe your experience with our service.";
    assert_eq!(classify(text), Classification::Unchanged(text.to_string()));
}

#[test]
fn test_embedded_question_unchanged() {
    let text = r#"{"type":"open_ended","question":"Tell me more?"}"#;
    assert_eq!(to_interactive(text), text);
    assert!(matches!(classify(text), Classification::Embedded(_)));
}

#[test]
fn test_email() {
    assert_eq!(
        to_interactive("What is your email?"),
        r#"{"type":"email","question":"What is your email?","required":true}"#
    );
}

// ============================================================================
// Other Question Shapes
// ============================================================================

#[test]
fn test_dropdown_dash_lines() {
    let outcome = classify("What is your highest education level?\n- High school\n- Bachelor\n- Master");
    assert_eq!(outcome.detector(), Some("dropdown"));
    let question = outcome.descriptor().unwrap();
    assert_eq!(question.question(), "What is your highest education level?");
    assert_eq!(question.options().unwrap(), ["High school", "Bachelor", "Master"]);
    assert!(question.required());
}

#[test]
fn test_open_ended_with_placeholder() {
    assert_eq!(
        to_interactive("How do you feel about remote work?"),
        r#"{"type":"open_ended","question":"How do you feel about remote work?","placeholder":"Please share your thoughts...","required":false}"#
    );
}

#[test]
fn test_multiple_select_without_question_mark() {
    let outcome = classify("Select all that apply:\nA) Email\nB) Phone\nC) Post");
    assert_eq!(outcome.question_type(), Some(QuestionType::MultipleSelect));
    let question = outcome.descriptor().unwrap();
    assert_eq!(question.question(), "Select all that apply:");
    assert_eq!(question.options().unwrap(), ["Email", "Phone", "Post"]);
    assert!(!question.required());
}

#[test]
fn test_birthday_is_date() {
    assert_eq!(
        to_interactive("When is your birthday?"),
        r#"{"type":"date","question":"When is your birthday?","required":true}"#
    );
}

#[test]
fn test_time_of_day() {
    let outcome = classify("What time do you usually wake up?");
    assert_eq!(outcome.question_type(), Some(QuestionType::Time));
}

#[test]
fn test_phone() {
    let outcome = classify("What is your mobile number?");
    assert_eq!(outcome.question_type(), Some(QuestionType::Phone));
    assert_eq!(outcome.detector(), Some("phone"));
}

#[test]
fn test_fallback_open_ended() {
    assert_eq!(
        to_interactive("Anything else you'd like to add?"),
        r#"{"type":"open_ended","question":"Anything else you'd like to add?","placeholder":"Please provide your answer...","required":false}"#
    );
}

#[test]
fn test_question_taken_from_its_own_line() {
    let outcome = classify("Thanks for that.\nWhat is your email?\nWe never share it.");
    assert_eq!(outcome.detector(), Some("email"));
    assert_eq!(outcome.descriptor().unwrap().question(), "What is your email?");
}

// ============================================================================
// Text Preparation
// ============================================================================

#[test]
fn test_invisible_characters_ignored() {
    let outcome = classify("\u{FEFF}Do you own a car?\u{200B}");
    assert_eq!(outcome.detector(), Some("yes_no"));
    assert_eq!(outcome.descriptor().unwrap().question(), "Do you own a car?");
}

#[test]
fn test_options_are_nfc_normalized() {
    // "Cafe\u{301}" is "Café" in decomposed form.
    let outcome = classify("Where do you eat?\nA) Cafe\u{301}\nB) Home");
    let options = outcome.descriptor().unwrap().options().unwrap();
    assert_eq!(options[0], "Caf\u{e9}");
}

#[test]
fn test_payload_metadata() {
    let payload = classify("Do you own a car?").payload();
    assert!(payload.metadata.interactive);
    assert!(payload.metadata.json_extracted);
    assert_eq!(payload.metadata.question_type, Some(QuestionType::YesNo));
    assert_eq!(payload.metadata.detector.as_deref(), Some("yes_no"));

    let payload = classify("Thanks!").payload();
    assert!(!payload.metadata.interactive);
    assert!(!payload.metadata.json_extracted);
    assert_eq!(payload.response, "Thanks!");
}
