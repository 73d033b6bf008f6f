use surveyparse::{classify, Classification, QuestionType};

#[test]
fn test_zero_width_space() {
    // Zero-width space (U+200B) inside the question
    let outcome = classify("What is your e\u{200B}mail?");
    assert_eq!(outcome.question_type(), Some(QuestionType::Email));
    assert_eq!(outcome.descriptor().unwrap().question(), "What is your email?");
}

#[test]
fn test_bom_at_start() {
    // BOM (Byte Order Mark) at the beginning
    let outcome = classify("\u{FEFF}Do you own a car?");
    assert_eq!(outcome.question_type(), Some(QuestionType::YesNo));
}

#[test]
fn test_zero_width_joiner_in_option() {
    // Zero-width joiner (U+200D) inside an option label
    let outcome = classify("Pick a colour?\nA) Re\u{200D}d\nB) Blue");
    let options = outcome.descriptor().unwrap().options().unwrap();
    assert_eq!(options[0], "Red");
}

#[test]
fn test_rtl_marks() {
    // Right-to-left and left-to-right marks around the keyword
    let outcome = classify("\u{200F}What is your \u{200E}phone number?\u{202C}");
    assert_eq!(outcome.question_type(), Some(QuestionType::Phone));
}

#[test]
fn test_original_returned_on_no_match() {
    // Stripping only affects analysis; unmatched turns come back untouched.
    let text = "\u{FEFF}Thanks\u{200B} for taking part.";
    assert_eq!(classify(text), Classification::Unchanged(text.to_string()));
}

#[test]
fn test_only_invisible_chars() {
    let text = "\u{200B}\u{200C}\u{200D}\u{FEFF}";
    assert_eq!(classify(text), Classification::Unchanged(text.to_string()));
}
