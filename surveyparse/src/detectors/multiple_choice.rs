//! Multiple-choice detection from enumerated option lines.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::{degenerate, Detector};
use crate::{
    descriptor::{QuestionDescriptor, QuestionType},
    error::Result,
    turn::{char_len, Turn},
};

const NAME: &str = "multiple_choice";

/// One family of interchangeable option markers, e.g. `A)` or `(A)`.
#[derive(Debug)]
pub(crate) struct MarkerFamily {
    /// Human-readable marker shape.
    pub label: &'static str,
    /// Marker anywhere in the text.
    pub anywhere: Regex,
    /// Marker at the start of a line.
    pub leading: Regex,
}

impl MarkerFamily {
    fn new(label: &'static str, marker: &str) -> Self {
        Self {
            label,
            anywhere: Regex::new(&format!(r"{marker}\s*")).expect("Invalid option marker pattern"),
            leading: Regex::new(&format!(r"^{marker}\s*")).expect("Invalid option marker pattern"),
        }
    }

    /// Strips the leading marker from an option line.
    pub fn strip<'t>(&self, line: &'t str) -> &'t str {
        match self.leading.find(line) {
            Some(m) => line[m.end()..].trim(),
            None => line,
        }
    }
}

/// Marker families, tried in this order.
pub(crate) static MARKERS: Lazy<[MarkerFamily; 4]> = Lazy::new(|| {
    [
        MarkerFamily::new("A)", r"[A-Z]\)"),
        MarkerFamily::new("(A)", r"\([A-Z]\)"),
        MarkerFamily::new("1)", r"[0-9]\)"),
        MarkerFamily::new("a)", r"[a-z]\)"),
    ]
});

/// Detects questions followed by lettered or numbered option lines.
///
/// Requires a `?` somewhere in the turn. For each marker family present in
/// the text, the longest `?` line that is not an option becomes the
/// question and every marked line becomes an option. The first family that
/// yields a question and at least two options wins.
///
/// # Examples
///
/// ```
/// use surveyparse::detectors::{Detector, MultipleChoiceDetector};
/// use surveyparse::turn::Turn;
///
/// let turn = Turn::new("Pick a colour?\nA) Red\nB) Blue");
/// let q = MultipleChoiceDetector.detect(&turn).unwrap().unwrap();
/// assert_eq!(q.options().unwrap(), ["Red", "Blue"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MultipleChoiceDetector;

impl MultipleChoiceDetector {
    fn extract(turn: &Turn<'_>, family: &MarkerFamily) -> (String, Vec<String>) {
        let mut question = "";
        let mut options = Vec::new();

        for line in turn.lines() {
            let is_option = family.leading.is_match(line);
            if line.contains('?') && !is_option {
                if question.is_empty() || char_len(line) > char_len(question) {
                    question = line;
                }
            } else if is_option {
                let option = family.strip(line);
                if !option.is_empty() {
                    options.push(option.to_string());
                }
            }
        }

        (question.to_string(), options)
    }
}

impl Detector for MultipleChoiceDetector {
    #[inline]
    fn name(&self) -> &'static str {
        NAME
    }

    fn detect(&self, turn: &Turn<'_>) -> Result<Option<QuestionDescriptor>> {
        if !turn.has_question_mark() {
            return Ok(None);
        }

        let mut last_error = None;
        for family in MARKERS.iter() {
            if !family.anywhere.is_match(turn.text()) {
                continue;
            }

            let (question, options) = Self::extract(turn, family);
            match QuestionDescriptor::choice(QuestionType::MultipleChoice, question, options) {
                Ok(descriptor) => {
                    debug!(marker = family.label, "multiple choice options found");
                    return Ok(Some(descriptor));
                }
                Err(err) => {
                    debug!(marker = family.label, error = %err, "marker family rejected");
                    last_error = Some(err);
                }
            }
        }

        match last_error {
            Some(err) => Err(degenerate(NAME)(err)),
            None => Ok(None),
        }
    }

    #[inline]
    fn priority(&self) -> u8 {
        1
    }
}
