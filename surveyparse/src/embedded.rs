//! Embedded JSON extraction.
//!
//! Models sometimes answer with an already structured question object, on
//! its own or wrapped in prose. When such an object parses, it is trusted
//! as-is and the detectors are skipped.

use serde_json::Value;
use tracing::{debug, warn};

use crate::{descriptor::QuestionDescriptor, error::Result};

/// How an embedded object was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddedSource {
    /// The whole trimmed turn is one JSON object.
    Whole,
    /// The first balanced `{ ... }` span inside the turn.
    Balanced,
}

impl EmbeddedSource {
    /// Short name used in traces and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Whole => "whole",
            Self::Balanced => "balanced",
        }
    }
}

/// A JSON object found in a turn.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedJson {
    raw: String,
    value: Value,
    source: EmbeddedSource,
}

impl EmbeddedJson {
    /// The JSON text to return to the caller.
    ///
    /// For [`EmbeddedSource::Whole`] this is the turn exactly as given;
    /// for [`EmbeddedSource::Balanced`] it is the extracted span.
    #[inline]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Consumes self and returns the JSON text.
    #[inline]
    pub fn into_raw(self) -> String {
        self.raw
    }

    /// The parsed value.
    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Where the object was found.
    #[inline]
    pub const fn source(&self) -> EmbeddedSource {
        self.source
    }

    /// Reads the object as a question descriptor, if it is one.
    pub fn descriptor(&self) -> Option<QuestionDescriptor> {
        QuestionDescriptor::from_value(&self.value).ok()
    }
}

/// Finds an embedded JSON object in a turn.
///
/// Two checks run in order:
/// 1. the trimmed turn starts with `{`, ends with `}` and parses;
/// 2. the span from the first `{` to its matching `}` parses.
///
/// Brace matching counts every `{` and `}`, including those inside string
/// literals, and never looks past the first opening brace.
///
/// # Examples
///
/// ```
/// use surveyparse::embedded::{EmbeddedJsonExtractor, EmbeddedSource};
///
/// let extractor = EmbeddedJsonExtractor::new();
/// let found = extractor
///     .extract(r#"Sure: {"type": "yes_no", "question": "Ready?"} thanks"#)
///     .unwrap();
/// assert_eq!(found.source(), EmbeddedSource::Balanced);
/// assert_eq!(found.raw(), r#"{"type": "yes_no", "question": "Ready?"}"#);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedJsonExtractor;

impl EmbeddedJsonExtractor {
    /// Creates a new extractor.
    #[inline]
    pub const fn new() -> Self {
        Self
    }

    /// Returns the embedded object, or `None` if there is no valid one.
    pub fn extract(&self, text: &str) -> Option<EmbeddedJson> {
        if let Some(found) = self.extract_whole(text) {
            return Some(found);
        }

        match self.extract_balanced(text) {
            Ok(found) => found,
            Err(err) => {
                warn!(error = %err, "found a JSON-like object, but it was invalid");
                None
            }
        }
    }

    /// Accepts the whole turn when it is a single JSON object.
    pub fn extract_whole(&self, text: &str) -> Option<EmbeddedJson> {
        let trimmed = text.trim();
        if !(trimmed.starts_with('{') && trimmed.ends_with('}')) {
            return None;
        }

        match serde_json::from_str::<Value>(trimmed) {
            Ok(value) => Some(EmbeddedJson {
                raw: text.to_string(),
                value,
                source: EmbeddedSource::Whole,
            }),
            Err(err) => {
                debug!(error = %err, "turn is brace-delimited but not valid JSON");
                None
            }
        }
    }

    /// Parses the first balanced `{ ... }` span.
    ///
    /// Returns `Ok(None)` when there is no balanced span.
    ///
    /// # Errors
    ///
    /// Returns `ClassifyError::InvalidEmbeddedJson` when a span is balanced
    /// but does not parse.
    pub fn extract_balanced(&self, text: &str) -> Result<Option<EmbeddedJson>> {
        let Some(span) = find_balanced_object(text) else {
            return Ok(None);
        };

        let value = serde_json::from_str::<Value>(span)?;
        Ok(Some(EmbeddedJson {
            raw: span.to_string(),
            value,
            source: EmbeddedSource::Balanced,
        }))
    }
}

/// Returns the span from the first `{` to the `}` that brings the brace depth
/// back to zero.
///
/// Returns `None` if the text has no `{` or the first one is never closed.
pub fn find_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;

    for (offset, ch) in text[start..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + ch.len_utf8();
                    return Some(&text[start..end]);
                }
            }
            _ => {}
        }
    }

    None // Unbalanced
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ClassifyError;

    #[test]
    fn test_whole_object_returned_verbatim() {
        let input = "  {\"type\": \"open_ended\", \"question\": \"Tell me more?\"}\n";
        let found = EmbeddedJsonExtractor::new().extract(input).unwrap();
        assert_eq!(found.source(), EmbeddedSource::Whole);
        assert_eq!(found.raw(), input);
    }

    #[test]
    fn test_object_in_prose() {
        let input = r#"Here you go: {"a": 1} and more text"#;
        let found = EmbeddedJsonExtractor::new().extract(input).unwrap();
        assert_eq!(found.source(), EmbeddedSource::Balanced);
        assert_eq!(found.value(), &json!({"a": 1}));
    }

    #[test]
    fn test_nested_object() {
        let input = r#"x {"a": {"b": {"c": 2}}} y {"z": 0}"#;
        assert_eq!(
            find_balanced_object(input),
            Some(r#"{"a": {"b": {"c": 2}}}"#)
        );
    }

    #[test]
    fn test_only_first_object_considered() {
        // The first span is invalid; the valid one after it is not scanned.
        let input = r#"{not json} then {"a": 1}"#;
        let extractor = EmbeddedJsonExtractor::new();
        assert!(extractor.extract(input).is_none());
        assert!(matches!(
            extractor.extract_balanced(input),
            Err(ClassifyError::InvalidEmbeddedJson(_))
        ));
    }

    #[test]
    fn test_unbalanced_braces() {
        assert_eq!(find_balanced_object(r#"{"a": {"b": 1}"#), None);
        assert!(EmbeddedJsonExtractor::new()
            .extract(r#"{"a": {"b": 1}"#)
            .is_none());
    }

    #[test]
    fn test_closing_brace_before_opening() {
        assert_eq!(find_balanced_object("} oops {x}"), Some("{x}"));
    }

    #[test]
    fn test_brace_inside_string_truncates_span() {
        // Braces inside string literals are counted like any other brace.
        let input = r#"Q: {"question": "pick } one?"}"#;
        assert_eq!(find_balanced_object(input), Some(r#"{"question": "pick }"#));
        assert!(EmbeddedJsonExtractor::new().extract(input).is_none());
    }

    #[test]
    fn test_no_braces() {
        assert_eq!(find_balanced_object("plain text"), None);
        assert!(EmbeddedJsonExtractor::new().extract("").is_none());
    }

    #[test]
    fn test_multibyte_text_around_object() {
        let input = "Voilà ✓ {\"ok\": true} ✓";
        let found = EmbeddedJsonExtractor::new().extract(input).unwrap();
        assert_eq!(found.raw(), "{\"ok\": true}");
    }

    #[test]
    fn test_descriptor_view() {
        let input = r#"{"type": "email", "question": "Your email?"}"#;
        let found = EmbeddedJsonExtractor::new().extract(input).unwrap();
        let descriptor = found.descriptor().unwrap();
        assert!(descriptor.required());

        let other = EmbeddedJsonExtractor::new().extract(r#"{"a": 1}"#).unwrap();
        assert!(other.descriptor().is_none());
    }
}
