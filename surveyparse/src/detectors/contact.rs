//! Contact detail questions: email addresses and phone numbers.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{degenerate, Detector};
use crate::{
    descriptor::{QuestionDescriptor, QuestionType},
    error::Result,
    turn::Turn,
};

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(email|e-mail)\b").expect("Invalid email pattern"));
static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(phone|telephone|mobile|cell)\b").expect("Invalid phone pattern")
});

/// Shared rule: keyword plus `?`, question is the first `?` line.
fn detect_contact(
    turn: &Turn<'_>,
    keyword: &Regex,
    kind: QuestionType,
    name: &'static str,
) -> Result<Option<QuestionDescriptor>> {
    if !turn.has_question_mark() || !keyword.is_match(turn.text()) {
        return Ok(None);
    }
    let Some(question) = turn.first_question_line() else {
        return Ok(None);
    };
    QuestionDescriptor::new(kind, question)
        .map(Some)
        .map_err(degenerate(name))
}

/// Detects questions asking for an email address.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailDetector;

impl Detector for EmailDetector {
    #[inline]
    fn name(&self) -> &'static str {
        "email"
    }

    fn detect(&self, turn: &Turn<'_>) -> Result<Option<QuestionDescriptor>> {
        detect_contact(turn, &EMAIL, QuestionType::Email, self.name())
    }

    #[inline]
    fn priority(&self) -> u8 {
        8
    }
}

/// Detects questions asking for a phone number.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhoneDetector;

impl Detector for PhoneDetector {
    #[inline]
    fn name(&self) -> &'static str {
        "phone"
    }

    fn detect(&self, turn: &Turn<'_>) -> Result<Option<QuestionDescriptor>> {
        detect_contact(turn, &PHONE, QuestionType::Phone, self.name())
    }

    #[inline]
    fn priority(&self) -> u8 {
        9
    }
}
