//! Open-ended detection for reflective or elaborative questions.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::{degenerate, Detector};
use crate::{
    config::DEFAULT_OPEN_ENDED_PLACEHOLDER,
    descriptor::{QuestionDescriptor, QuestionType},
    error::Result,
    turn::Turn,
};

const NAME: &str = "open_ended";

/// Cues that the respondent is asked to elaborate.
static KEYWORDS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        "explain",
        "describe",
        "detail",
        "motivate",
        "change",
        "why",
        "how.*think",
        "how.*feel",
        "how.*should",
        "how.*would",
        "what.*think",
        "what.*feel",
        "what.*opinion",
        "what.*should",
        "tell.*about",
        "share.*thoughts",
        "elaborate",
        "comment",
        "feedback",
        "suggestions",
        "improvements",
        "experience",
        "thoughts",
        "feelings",
        "concerns",
        "ideas",
    ]
    .into_iter()
    .map(|k| Regex::new(&format!("(?i){k}")).expect("Invalid open-ended keyword pattern"))
    .collect()
});

/// Detects questions inviting a free-text answer.
///
/// Runs ahead of yes/no so that "how do you feel about ..." style turns
/// are not reduced to a binary choice. Requires a `?`.
#[derive(Debug, Clone)]
pub struct OpenEndedDetector {
    placeholder: String,
}

impl Default for OpenEndedDetector {
    fn default() -> Self {
        Self::new(DEFAULT_OPEN_ENDED_PLACEHOLDER)
    }
}

impl OpenEndedDetector {
    /// Creates a detector that attaches `placeholder` to its descriptors.
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
        }
    }
}

impl Detector for OpenEndedDetector {
    #[inline]
    fn name(&self) -> &'static str {
        NAME
    }

    fn detect(&self, turn: &Turn<'_>) -> Result<Option<QuestionDescriptor>> {
        if !turn.has_question_mark() {
            return Ok(None);
        }
        let Some(keyword) = KEYWORDS.iter().find(|k| k.is_match(turn.text())) else {
            return Ok(None);
        };
        let Some(question) = turn.first_question_line() else {
            return Ok(None);
        };

        debug!(keyword = keyword.as_str(), "open-ended cue found");
        QuestionDescriptor::new(QuestionType::OpenEnded, question)
            .map(|q| Some(q.with_placeholder(self.placeholder.as_str())))
            .map_err(degenerate(NAME))
    }

    #[inline]
    fn priority(&self) -> u8 {
        4
    }
}
