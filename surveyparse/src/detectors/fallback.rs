//! Last-resort open-ended question for any turn with a `?`.

use super::{degenerate, Detector};
use crate::{
    config::DEFAULT_FALLBACK_PLACEHOLDER,
    descriptor::{QuestionDescriptor, QuestionType},
    error::Result,
    turn::Turn,
};

const NAME: &str = "fallback";

/// Turns the first `?` line into an optional open-ended question.
#[derive(Debug, Clone)]
pub struct FallbackDetector {
    placeholder: String,
}

impl Default for FallbackDetector {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK_PLACEHOLDER)
    }
}

impl FallbackDetector {
    /// Creates a fallback that attaches `placeholder` to its descriptors.
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
        }
    }
}

impl Detector for FallbackDetector {
    #[inline]
    fn name(&self) -> &'static str {
        NAME
    }

    fn detect(&self, turn: &Turn<'_>) -> Result<Option<QuestionDescriptor>> {
        let Some(question) = turn.first_question_line() else {
            return Ok(None);
        };
        QuestionDescriptor::new(QuestionType::OpenEnded, question)
            .map(|q| Some(q.with_placeholder(self.placeholder.as_str())))
            .map_err(degenerate(NAME))
    }

    #[inline]
    fn priority(&self) -> u8 {
        10
    }
}
