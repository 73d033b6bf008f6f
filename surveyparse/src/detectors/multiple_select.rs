//! Multiple-select detection ("select all that apply").

use once_cell::sync::Lazy;
use regex::Regex;

use super::{degenerate, multiple_choice::MARKERS, Detector};
use crate::{
    descriptor::{QuestionDescriptor, QuestionType},
    error::Result,
    turn::Turn,
};

const NAME: &str = "multiple_select";

static TRIGGER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)select all|all that apply|check all").expect("Invalid multiple-select pattern")
});

/// Detects select-many questions with `A)` style option lines.
///
/// The last line containing `?` or "apply" is the question. Only uppercase
/// lettered markers count as options.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultipleSelectDetector;

impl Detector for MultipleSelectDetector {
    #[inline]
    fn name(&self) -> &'static str {
        NAME
    }

    fn detect(&self, turn: &Turn<'_>) -> Result<Option<QuestionDescriptor>> {
        let letters = &MARKERS[0];
        if !TRIGGER.is_match(turn.text()) || !letters.anywhere.is_match(turn.text()) {
            return Ok(None);
        }

        let mut question = "";
        let mut options = Vec::new();
        for line in turn.lines() {
            if line.contains('?') || line.to_lowercase().contains("apply") {
                question = line;
            } else if letters.leading.is_match(line) {
                options.push(letters.strip(line));
            }
        }

        QuestionDescriptor::choice(QuestionType::MultipleSelect, question, options)
            .map(Some)
            .map_err(degenerate(NAME))
    }

    #[inline]
    fn priority(&self) -> u8 {
        6
    }
}
