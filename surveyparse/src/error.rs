//! Error types for survey-turn classification.
//!
//! None of these escape [`crate::classify`]: the dispatcher downgrades every
//! detector error to "no match". They are public so custom detectors and
//! callers of the lower-level APIs can use them.

use std::fmt;

/// Result type alias for classification operations.
pub type Result<T> = std::result::Result<T, ClassifyError>;

/// Errors that can occur while classifying a turn.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    /// The detector found nothing in the turn. Recorded as the reason for
    /// every detector that declines.
    #[error("No question pattern matched")]
    NoMatch,

    /// A detector matched but the extracted pieces broke a descriptor invariant.
    #[error("{detector} matched but extraction was degenerate: {reason}")]
    MalformedExtraction {
        /// Name of the detector that matched.
        detector: &'static str,
        /// Why the extraction was rejected.
        reason: String,
    },

    /// Braces were balanced but the content was not valid JSON.
    #[error("Embedded JSON is invalid: {0}")]
    InvalidEmbeddedJson(#[from] serde_json::Error),

    /// A descriptor failed its own field invariants.
    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(String),

    /// Configuration error.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ClassifyError {
    /// Creates a malformed extraction error.
    #[inline]
    pub fn malformed(detector: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedExtraction {
            detector,
            reason: reason.into(),
        }
    }

    /// Creates an invalid descriptor error.
    #[inline]
    pub fn invalid_descriptor(message: impl Into<String>) -> Self {
        Self::InvalidDescriptor(message.into())
    }
}

/// A detector that declined a turn, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectorMiss {
    /// Name of the detector.
    pub detector: &'static str,
    /// Reason it did not produce a descriptor.
    pub reason: String,
}

impl DetectorMiss {
    /// Creates a new detector miss.
    #[inline]
    pub fn new(detector: &'static str, reason: impl Into<String>) -> Self {
        Self {
            detector,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for DetectorMiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.detector, self.reason)
    }
}

/// Reasons a respondent's answer is not acceptable for a question.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnswerError {
    /// The question is required and the answer is blank.
    #[error("This question is required")]
    Required,

    /// The answer is not one of the offered options.
    #[error("'{answer}' is not one of the offered options")]
    UnknownOption {
        /// The rejected answer fragment.
        answer: String,
    },

    /// The answer is not a number inside the scale.
    #[error("'{answer}' is outside the scale {min}..={max}")]
    OutOfScale {
        /// The rejected answer.
        answer: String,
        /// Lowest accepted value.
        min: i64,
        /// Highest accepted value.
        max: i64,
    },

    /// A yes/no question got something other than yes or no.
    #[error("Expected Yes or No, got '{0}'")]
    NotYesNo(String),
}
