//! Yes/no detection for simple binary questions.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::{degenerate, Detector};
use crate::{
    descriptor::{QuestionDescriptor, QuestionType},
    error::Result,
    turn::Turn,
};

const NAME: &str = "yes_no";

/// Binary answer pairs and sentence-initial binary openers.
static PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\b(yes|no)\b.*\?",
        r"(?i)\b(true|false)\b.*\?",
        r"(?i)\b(agree|disagree)\b.*\?",
        r"(?i)^do you (like|want|need|have|own|use)\b",
        r"(?i)^have you (ever|been|done|tried|used)\b",
        r"(?i)^are you (a|an|currently|planning|interested)\b",
        r"(?i)^will you\b",
        r"(?i)^would you (like|prefer|consider|be)\b",
        r"(?i)^can you\b",
        r"(?i)^did you\b",
    ]
    .into_iter()
    .map(|p| Regex::new(p).expect("Invalid yes/no pattern"))
    .collect()
});

/// Interrogatives that make a question too open for a yes/no widget.
static COMPLEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(how|what|why|explain|describe)\b").expect("Invalid interrogative pattern")
});

/// Detects simple binary questions ("Do you own a car?").
///
/// Declines any turn that also contains `how`, `what`, `why`, `explain` or
/// `describe`, even when a binary opener is present.
#[derive(Debug, Clone, Copy, Default)]
pub struct YesNoDetector;

impl Detector for YesNoDetector {
    #[inline]
    fn name(&self) -> &'static str {
        NAME
    }

    fn detect(&self, turn: &Turn<'_>) -> Result<Option<QuestionDescriptor>> {
        let text = turn.text();
        if !turn.has_question_mark() {
            return Ok(None);
        }
        let Some(pattern) = PATTERNS.iter().find(|p| p.is_match(text)) else {
            return Ok(None);
        };
        if COMPLEX.is_match(text) {
            debug!(pattern = pattern.as_str(), "binary cue overruled by interrogative");
            return Ok(None);
        }
        let Some(question) = turn.first_question_line() else {
            return Ok(None);
        };

        QuestionDescriptor::new(QuestionType::YesNo, question)
            .map(Some)
            .map_err(degenerate(NAME))
    }

    #[inline]
    fn priority(&self) -> u8 {
        5
    }
}
