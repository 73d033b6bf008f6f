//! # surveyparse
//!
//! Turns free-text survey questions written by a language model into
//! structured, renderable question objects.
//!
//! A model asked to run a survey usually answers in prose, sometimes with
//! lettered options, a rating range or a yes/no cue. This crate recognises
//! those shapes and rewrites the turn as a JSON question descriptor the chat
//! front end can render as a widget.
//!
//! ## Quick Start
//!
//! ```rust
//! use surveyparse::to_interactive;
//!
//! let response = to_interactive("On a scale of 1 to 10, how satisfied are you?");
//! let json: serde_json::Value = serde_json::from_str(&response).unwrap();
//!
//! assert_eq!(json["type"], "scale");
//! assert_eq!(json["scale_min"], 1);
//! assert_eq!(json["scale_max"], 10);
//! ```
//!
//! ## Behaviour
//!
//! - **Embedded JSON first**: a turn that already carries a JSON object is
//!   returned as that object, untouched.
//! - **Ordered detectors**: structural shapes (option markers, numeric
//!   ranges) are tried before keyword-only ones; the first match wins.
//! - **Total**: classification never fails. Unrecognised turns come back
//!   exactly as given.
//!
//! ## Advanced Usage
//!
//! ```rust
//! use surveyparse::{Classifier, ClassifierConfig, DetectorKind, QuestionType};
//!
//! let config = ClassifierConfig {
//!     disabled_detectors: vec![DetectorKind::Fallback],
//!     ..ClassifierConfig::default()
//! };
//! let classifier = Classifier::with_config(config).unwrap();
//!
//! let outcome = classifier.classify("What color do you like?\nA) Red\nB) Blue");
//! assert_eq!(outcome.question_type(), Some(QuestionType::MultipleChoice));
//!
//! // The front end rejects answers the widget would not allow.
//! let question = outcome.descriptor().unwrap();
//! assert!(question.check_answer("Red").is_ok());
//! assert!(question.check_answer("Green").is_err());
//! ```

pub mod classification;
pub mod classifier;
pub mod config;
pub mod descriptor;
pub mod detectors;
pub mod embedded;
pub mod error;
pub mod turn;

use once_cell::sync::Lazy;

pub use classification::{Classification, TurnMetadata, TurnPayload};
pub use classifier::Classifier;
pub use config::ClassifierConfig;
pub use descriptor::{QuestionDescriptor, QuestionType};
pub use detectors::{Detector, DetectorKind};
pub use embedded::{EmbeddedJson, EmbeddedJsonExtractor, EmbeddedSource};
pub use error::{AnswerError, ClassifyError, DetectorMiss, Result};

static DEFAULT_CLASSIFIER: Lazy<Classifier> = Lazy::new(Classifier::new);

/// Classifies a turn with the default classifier.
///
/// # Examples
///
/// ```
/// use surveyparse::{classify, Classification};
///
/// let outcome = classify("Do you own a car?");
/// assert_eq!(outcome.detector(), Some("yes_no"));
///
/// let outcome = classify("Thanks for your time.");
/// assert_eq!(outcome, Classification::Unchanged("Thanks for your time.".to_string()));
/// ```
pub fn classify(text: &str) -> Classification {
    DEFAULT_CLASSIFIER.classify(text)
}

/// Classifies a turn with the default classifier and returns the response
/// string: serialized question JSON, the embedded JSON, or the text as given.
///
/// # Examples
///
/// ```
/// use surveyparse::to_interactive;
///
/// assert_eq!(
///     to_interactive("What is your email?"),
///     r#"{"type":"email","question":"What is your email?","required":true}"#
/// );
/// ```
pub fn to_interactive(text: &str) -> String {
    DEFAULT_CLASSIFIER.to_interactive(text)
}
