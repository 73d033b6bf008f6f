//! Classifier configuration.

use serde::{Deserialize, Serialize};

use crate::{
    detectors::DetectorKind,
    error::{ClassifyError, Result},
};

/// Placeholder attached to open-ended questions.
pub const DEFAULT_OPEN_ENDED_PLACEHOLDER: &str = "Please share your thoughts...";

/// Placeholder attached to fallback open-ended questions.
pub const DEFAULT_FALLBACK_PLACEHOLDER: &str = "Please provide your answer...";

/// Inputs longer than this are returned unchanged.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 1024 * 1024;

/// Settings for a [`crate::Classifier`].
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```
/// use surveyparse::{config::ClassifierConfig, detectors::DetectorKind};
///
/// let config = ClassifierConfig::from_json_str(r#"{"disabled_detectors": ["fallback"]}"#).unwrap();
/// assert_eq!(config.disabled_detectors, vec![DetectorKind::Fallback]);
/// assert!(config.extract_embedded_json);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Maximum input size in bytes.
    pub max_input_bytes: usize,

    /// Remove zero-width and bidi control characters before analysis.
    pub strip_invisible_chars: bool,

    /// Return embedded JSON objects verbatim instead of running detectors.
    pub extract_embedded_json: bool,

    /// Placeholder for open-ended questions.
    pub open_ended_placeholder: String,

    /// Placeholder for the fallback detector.
    pub fallback_placeholder: String,

    /// Built-in detectors to leave out.
    pub disabled_detectors: Vec<DetectorKind>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            strip_invisible_chars: true,
            extract_embedded_json: true,
            open_ended_placeholder: DEFAULT_OPEN_ENDED_PLACEHOLDER.to_string(),
            fallback_placeholder: DEFAULT_FALLBACK_PLACEHOLDER.to_string(),
            disabled_detectors: Vec::new(),
        }
    }
}

impl ClassifierConfig {
    /// Reads and validates a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns `ClassifyError::InvalidConfig` if the document does not parse
    /// (including unknown detector names) or fails [`Self::validate`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ClassifyError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the settings.
    ///
    /// # Errors
    ///
    /// Returns `ClassifyError::InvalidConfig` for a zero size limit or a
    /// blank placeholder.
    pub fn validate(&self) -> Result<()> {
        if self.max_input_bytes == 0 {
            return Err(ClassifyError::InvalidConfig(
                "max_input_bytes must be greater than zero".to_string(),
            ));
        }
        if self.open_ended_placeholder.trim().is_empty() {
            return Err(ClassifyError::InvalidConfig(
                "open_ended_placeholder must not be blank".to_string(),
            ));
        }
        if self.fallback_placeholder.trim().is_empty() {
            return Err(ClassifyError::InvalidConfig(
                "fallback_placeholder must not be blank".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether a built-in detector is enabled.
    pub fn is_enabled(&self, kind: DetectorKind) -> bool {
        !self.disabled_detectors.contains(&kind)
    }
}
