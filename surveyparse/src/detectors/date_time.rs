//! Date and time-of-day detection.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{degenerate, Detector};
use crate::{
    descriptor::{QuestionDescriptor, QuestionType},
    error::{ClassifyError, Result},
    turn::Turn,
};

const NAME: &str = "date_time";

static TRIGGER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(date|time|when|birthday|birth|age)\b").expect("Invalid date/time pattern")
});
static BIRTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(birthday|birth)\b").expect("Invalid birth pattern"));
static TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\btime\b").expect("Invalid time pattern"));

/// Detects date questions (birthdays) and time-of-day questions.
///
/// Other temporal cues (`when`, `age`, a bare `date`) trigger the detector
/// but are not specific enough to pick a widget, so the turn falls through.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeDetector;

impl Detector for DateTimeDetector {
    #[inline]
    fn name(&self) -> &'static str {
        NAME
    }

    fn detect(&self, turn: &Turn<'_>) -> Result<Option<QuestionDescriptor>> {
        let text = turn.text();
        if !turn.has_question_mark() || !TRIGGER.is_match(text) {
            return Ok(None);
        }
        let Some(question) = turn.first_question_line() else {
            return Ok(None);
        };

        let kind = if BIRTH.is_match(text) {
            QuestionType::Date
        } else if TIME.is_match(text) {
            QuestionType::Time
        } else {
            return Err(ClassifyError::malformed(
                NAME,
                "temporal cue without birth or time keyword",
            ));
        };

        QuestionDescriptor::new(kind, question)
            .map(Some)
            .map_err(degenerate(NAME))
    }

    #[inline]
    fn priority(&self) -> u8 {
        7
    }
}
