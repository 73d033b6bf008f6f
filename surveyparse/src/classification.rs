//! Classification outcomes and the payload handed to the chat front end.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::{
    descriptor::{QuestionDescriptor, QuestionType},
    embedded::EmbeddedJson,
};

/// What the classifier made of a turn.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// The turn already contained a JSON object; it is passed through.
    Embedded(EmbeddedJson),

    /// A detector recognised a question.
    Question {
        /// The extracted question.
        descriptor: QuestionDescriptor,
        /// Name of the detector that produced it.
        detector: &'static str,
    },

    /// Nothing matched; the original text is passed through.
    Unchanged(String),
}

impl Classification {
    /// The string that goes into the `response` field.
    ///
    /// A recognised question is serialized to compact JSON. The other two
    /// outcomes borrow their text.
    pub fn response(&self) -> Cow<'_, str> {
        match self {
            Self::Embedded(found) => Cow::Borrowed(found.raw()),
            Self::Question { descriptor, .. } => Cow::Owned(descriptor.to_json()),
            Self::Unchanged(text) => Cow::Borrowed(text),
        }
    }

    /// Consumes self and returns the response string.
    pub fn into_response(self) -> String {
        match self {
            Self::Embedded(found) => found.into_raw(),
            Self::Question { descriptor, .. } => descriptor.to_json(),
            Self::Unchanged(text) => text,
        }
    }

    /// The descriptor a detector produced, if any.
    ///
    /// Embedded objects are not reinterpreted here; see
    /// [`EmbeddedJson::descriptor`].
    #[inline]
    pub fn descriptor(&self) -> Option<&QuestionDescriptor> {
        match self {
            Self::Question { descriptor, .. } => Some(descriptor),
            _ => None,
        }
    }

    /// The question type the front end will render, if any.
    pub fn question_type(&self) -> Option<QuestionType> {
        match self {
            Self::Embedded(found) => found.descriptor().map(|q| q.kind()),
            Self::Question { descriptor, .. } => Some(descriptor.kind()),
            Self::Unchanged(_) => None,
        }
    }

    /// Whether the response will render as an interactive widget.
    pub fn is_interactive(&self) -> bool {
        self.question_type().is_some()
    }

    /// Whether the response is a JSON object.
    #[inline]
    pub fn json_extracted(&self) -> bool {
        !matches!(self, Self::Unchanged(_))
    }

    /// Name of the detector that matched.
    #[inline]
    pub fn detector(&self) -> Option<&'static str> {
        match self {
            Self::Question { detector, .. } => Some(*detector),
            _ => None,
        }
    }

    /// Builds the response payload with its metadata.
    pub fn payload(&self) -> TurnPayload {
        TurnPayload {
            response: self.response().into_owned(),
            metadata: TurnMetadata {
                interactive: self.is_interactive(),
                json_extracted: self.json_extracted(),
                question_type: self.question_type(),
                detector: self.detector().map(str::to_string),
            },
        }
    }
}

/// A classified turn as sent to the chat front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnPayload {
    /// JSON question object or plain text.
    pub response: String,
    /// How the response was produced.
    pub metadata: TurnMetadata,
}

/// Metadata describing how a response was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnMetadata {
    /// The response renders as a question widget.
    pub interactive: bool,
    /// The response is a JSON object, embedded or generated.
    pub json_extracted: bool,
    /// Type of the rendered question.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub question_type: Option<QuestionType>,
    /// Detector that produced the question.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub detector: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedded::EmbeddedJsonExtractor;

    fn yes_no() -> Classification {
        Classification::Question {
            descriptor: QuestionDescriptor::new(QuestionType::YesNo, "Ready?").unwrap(),
            detector: "yes_no",
        }
    }

    #[test]
    fn test_question_response_is_json() {
        let outcome = yes_no();
        assert_eq!(
            outcome.response(),
            r#"{"type":"yes_no","question":"Ready?","required":true}"#
        );
        assert_eq!(outcome.detector(), Some("yes_no"));
        assert!(outcome.is_interactive());
        assert!(outcome.json_extracted());
    }

    #[test]
    fn test_unchanged_passes_text_through() {
        let outcome = Classification::Unchanged("Thanks!".to_string());
        assert!(matches!(outcome.response(), Cow::Borrowed("Thanks!")));
        assert!(!outcome.is_interactive());
        assert!(!outcome.json_extracted());
        assert_eq!(outcome.into_response(), "Thanks!");
    }

    #[test]
    fn test_embedded_question_is_interactive() {
        let found = EmbeddedJsonExtractor::new()
            .extract(r#"{"type":"email","question":"Your email?"}"#)
            .unwrap();
        let outcome = Classification::Embedded(found);
        assert_eq!(outcome.question_type(), Some(QuestionType::Email));
        assert!(outcome.descriptor().is_none());
        assert!(outcome.detector().is_none());
    }

    #[test]
    fn test_embedded_non_question_is_not_interactive() {
        let found = EmbeddedJsonExtractor::new().extract(r#"{"a": 1}"#).unwrap();
        let outcome = Classification::Embedded(found);
        assert!(outcome.json_extracted());
        assert!(!outcome.is_interactive());
    }

    #[test]
    fn test_payload_shape() {
        let payload = serde_json::to_value(yes_no().payload()).unwrap();
        assert_eq!(payload["metadata"]["question_type"], "yes_no");
        assert_eq!(payload["metadata"]["detector"], "yes_no");
        assert_eq!(payload["metadata"]["interactive"], true);

        let plain = serde_json::to_value(Classification::Unchanged("Hi".into()).payload()).unwrap();
        assert!(plain["metadata"].get("detector").is_none());
        assert_eq!(plain["response"], "Hi");
    }
}
