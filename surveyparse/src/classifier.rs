//! The dispatcher that runs extraction and detectors over a turn.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::{
    classification::Classification,
    config::ClassifierConfig,
    detectors::{default_detectors, Detector},
    embedded::EmbeddedJsonExtractor,
    error::{ClassifyError, DetectorMiss, Result},
    turn::Turn,
};

/// Which step of the pipeline decided the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Path {
    Oversize,
    EmbeddedJson,
    Detector,
    NoMatch,
}

impl Path {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Oversize => "oversize",
            Self::EmbeddedJson => "embedded_json",
            Self::Detector => "detector",
            Self::NoMatch => "no_match",
        }
    }
}

/// Classifies model turns into interactive questions.
///
/// Embedded JSON is checked first. Otherwise detectors run in priority order
/// and the first descriptor wins. A detector that declines or fails never
/// stops the run, so classification always produces an outcome.
///
/// # Examples
///
/// ```
/// use surveyparse::{Classifier, QuestionType};
///
/// let classifier = Classifier::new();
/// let outcome = classifier.classify("Do you own a car?");
/// assert_eq!(outcome.question_type(), Some(QuestionType::YesNo));
/// assert_eq!(outcome.detector(), Some("yes_no"));
/// ```
#[derive(Debug, Clone)]
pub struct Classifier {
    config: ClassifierConfig,
    extractor: EmbeddedJsonExtractor,
    /// Detectors in priority order, shared between clones.
    detectors: Vec<Arc<dyn Detector>>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    /// Creates a classifier with the default configuration.
    ///
    /// Default detectors (in priority order):
    /// 1. multiple choice
    /// 2. scale
    /// 3. dropdown
    /// 4. open-ended
    /// 5. yes/no
    /// 6. multiple select
    /// 7. date/time
    /// 8. email
    /// 9. phone
    /// 10. fallback open-ended
    pub fn new() -> Self {
        Self::from_valid_config(ClassifierConfig::default())
    }

    /// Creates a classifier from a configuration.
    ///
    /// # Errors
    ///
    /// Returns `ClassifyError::InvalidConfig` if the configuration is invalid.
    pub fn with_config(config: ClassifierConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    /// Creates a classifier with a custom detector set.
    ///
    /// Detectors are sorted by priority automatically. Clones of the
    /// classifier share the same detector set.
    pub fn with_detectors(detectors: Vec<Box<dyn Detector>>) -> Self {
        Self::assemble(ClassifierConfig::default(), detectors)
    }

    fn from_valid_config(config: ClassifierConfig) -> Self {
        let detectors = default_detectors(&config);
        Self::assemble(config, detectors)
    }

    fn assemble(config: ClassifierConfig, detectors: Vec<Box<dyn Detector>>) -> Self {
        let mut detectors: Vec<Arc<dyn Detector>> =
            detectors.into_iter().map(Arc::from).collect();
        detectors.sort_by_key(|d| d.priority());
        Self {
            config,
            extractor: EmbeddedJsonExtractor::new(),
            detectors,
        }
    }

    /// Classifies a turn.
    ///
    /// Never fails: when nothing applies the original text comes back as
    /// [`Classification::Unchanged`].
    pub fn classify(&self, text: &str) -> Classification {
        self.dispatch(text, &mut Vec::new()).0
    }

    /// Classifies a turn and returns the response string.
    pub fn to_interactive(&self, text: &str) -> String {
        self.classify(text).into_response()
    }

    /// Classifies a turn and describes how the outcome was reached.
    ///
    /// # Examples
    ///
    /// ```
    /// use surveyparse::Classifier;
    ///
    /// let trace = Classifier::new().explain("What is your email?");
    /// assert_eq!(trace["path"], "detector");
    /// assert_eq!(trace["detector"], "email");
    /// assert!(trace["misses"].as_array().unwrap().len() >= 7);
    /// ```
    pub fn explain(&self, text: &str) -> Value {
        let mut misses = Vec::new();
        let (outcome, path) = self.dispatch(text, &mut misses);

        let misses_json: Vec<Value> = misses
            .iter()
            .map(|m| json!({"detector": m.detector, "reason": m.reason}))
            .collect();

        let embedded = match &outcome {
            Classification::Embedded(found) => json!({"source": found.source().as_str()}),
            _ => Value::Null,
        };

        json!({
            "path": path.as_str(),
            "detector": outcome.detector(),
            "question_type": outcome.question_type(),
            "embedded": embedded,
            "misses": misses_json,
            "response": outcome.response(),
        })
    }

    fn dispatch(&self, text: &str, misses: &mut Vec<DetectorMiss>) -> (Classification, Path) {
        if text.len() > self.config.max_input_bytes {
            warn!(
                bytes = text.len(),
                limit = self.config.max_input_bytes,
                "turn exceeds size limit, returning it unchanged"
            );
            return (Classification::Unchanged(text.to_string()), Path::Oversize);
        }

        if self.config.extract_embedded_json {
            if let Some(found) = self.extractor.extract(text) {
                info!(
                    outcome = "embedded_json",
                    source = found.source().as_str(),
                    "returning embedded JSON"
                );
                return (Classification::Embedded(found), Path::EmbeddedJson);
            }
        }

        let turn = Turn::prepare(text, self.config.strip_invisible_chars);
        for detector in &self.detectors {
            match detector
                .detect(&turn)
                .and_then(|found| found.ok_or(ClassifyError::NoMatch))
            {
                Ok(descriptor) => {
                    info!(
                        outcome = "question",
                        detector = detector.name(),
                        question_type = descriptor.kind().as_str(),
                        "converted turn to interactive question"
                    );
                    let outcome = Classification::Question {
                        descriptor,
                        detector: detector.name(),
                    };
                    return (outcome, Path::Detector);
                }
                Err(ClassifyError::NoMatch) => {
                    debug!(detector = detector.name(), "detector declined");
                    let reason = ClassifyError::NoMatch.to_string();
                    misses.push(DetectorMiss::new(detector.name(), reason));
                }
                Err(err) => {
                    debug!(detector = detector.name(), reason = %err, "detector failed");
                    misses.push(DetectorMiss::new(detector.name(), err.to_string()));
                }
            }
        }

        info!(outcome = "unchanged", "no question pattern matched");
        (Classification::Unchanged(turn.original().to_string()), Path::NoMatch)
    }

    /// Returns the number of active detectors.
    #[inline]
    pub fn detector_count(&self) -> usize {
        self.detectors.len()
    }

    /// Returns the names of the active detectors in priority order.
    pub fn detector_names(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    /// The configuration this classifier was built with.
    #[inline]
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }
}
