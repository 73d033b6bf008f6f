//! Canonical question descriptors.
//!
//! A [`QuestionDescriptor`] is the structured form of one survey question,
//! ready to be rendered as a widget. Descriptors can only be built through
//! validating constructors, so a value of this type always satisfies its
//! field invariants:
//!
//! - `question` is non-empty
//! - choice-like types carry at least two options
//! - scales have `scale_min < scale_max` and one label per step

use serde::{Deserialize, Serialize};
use serde_json::Value;
use unicode_normalization::UnicodeNormalization;

use crate::error::{AnswerError, ClassifyError, Result};

/// Minimum number of options a choice-like question must offer.
pub const MIN_OPTIONS: usize = 2;

/// Maximum number of steps a scale may span.
pub const MAX_SCALE_STEPS: u64 = 101;

/// The widget shape of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    /// Single answer picked from lettered or numbered options.
    MultipleChoice,
    /// Integer rating between two bounds.
    Scale,
    /// Single answer picked from a list rendered as a select box.
    Dropdown,
    /// Binary yes/no answer.
    YesNo,
    /// Any number of answers picked from options.
    MultipleSelect,
    /// Free text.
    OpenEnded,
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
    /// Email address.
    Email,
    /// Phone number.
    Phone,
}

impl QuestionType {
    /// All question types.
    pub const ALL: [QuestionType; 10] = [
        Self::MultipleChoice,
        Self::Scale,
        Self::Dropdown,
        Self::YesNo,
        Self::MultipleSelect,
        Self::OpenEnded,
        Self::Date,
        Self::Time,
        Self::Email,
        Self::Phone,
    ];

    /// Wire name of the type, as it appears in the `type` field.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MultipleChoice => "multiple_choice",
            Self::Scale => "scale",
            Self::Dropdown => "dropdown",
            Self::YesNo => "yes_no",
            Self::MultipleSelect => "multiple_select",
            Self::OpenEnded => "open_ended",
            Self::Date => "date",
            Self::Time => "time",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }

    /// Parses a wire name. Returns `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    /// Whether a question of this type is required unless stated otherwise.
    #[inline]
    pub const fn default_required(self) -> bool {
        !matches!(self, Self::OpenEnded | Self::MultipleSelect)
    }

    /// Whether this type carries an option list.
    #[inline]
    pub const fn is_choice(self) -> bool {
        matches!(
            self,
            Self::MultipleChoice | Self::Dropdown | Self::MultipleSelect
        )
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized, renderable survey question.
///
/// Serializes to the JSON object the survey front end consumes, e.g.
/// `{"type":"yes_no","question":"Do you own a car?","required":true}`.
/// Absent fields are omitted rather than written as `null`.
///
/// # Examples
///
/// ```
/// use surveyparse::descriptor::{QuestionDescriptor, QuestionType};
///
/// let q = QuestionDescriptor::choice(
///     QuestionType::MultipleChoice,
///     "Pick one?",
///     vec!["Red".to_string(), "Blue".to_string()],
/// )
/// .unwrap();
/// assert_eq!(
///     q.to_json(),
///     r#"{"type":"multiple_choice","question":"Pick one?","options":["Red","Blue"],"required":true}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionDescriptor {
    #[serde(rename = "type")]
    kind: QuestionType,
    question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scale_min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scale_max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scale_labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    placeholder: Option<String>,
    required: bool,
}

impl QuestionDescriptor {
    /// Builds a question without options or bounds.
    ///
    /// Valid for yes/no and the free-text types. Use [`Self::choice`] and
    /// [`Self::scale`] for the others.
    ///
    /// # Errors
    ///
    /// Returns `ClassifyError::InvalidDescriptor` if the question is blank or
    /// `kind` needs options or bounds.
    pub fn new(kind: QuestionType, question: impl AsRef<str>) -> Result<Self> {
        if kind.is_choice() || kind == QuestionType::Scale {
            return Err(ClassifyError::invalid_descriptor(format!(
                "{kind} needs options or bounds"
            )));
        }
        Ok(Self::bare(kind, normalize_question(question.as_ref())?))
    }

    /// Builds a choice-like question.
    ///
    /// Options are trimmed and NFC-normalized; blank ones are dropped.
    ///
    /// # Errors
    ///
    /// Returns `ClassifyError::InvalidDescriptor` if the question is blank,
    /// `kind` is not choice-like, or fewer than [`MIN_OPTIONS`] options remain.
    pub fn choice<I, S>(kind: QuestionType, question: impl AsRef<str>, options: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !kind.is_choice() {
            return Err(ClassifyError::invalid_descriptor(format!(
                "{kind} does not take options"
            )));
        }
        let question = normalize_question(question.as_ref())?;
        let options: Vec<String> = options
            .into_iter()
            .map(|o| normalize_text(o.as_ref()))
            .filter(|o| !o.is_empty())
            .collect();
        if options.len() < MIN_OPTIONS {
            return Err(ClassifyError::invalid_descriptor(format!(
                "{} option(s), need at least {MIN_OPTIONS}",
                options.len()
            )));
        }

        let mut descriptor = Self::bare(kind, question);
        descriptor.options = Some(options);
        Ok(descriptor)
    }

    /// Builds a scale question with one label per integer step.
    ///
    /// # Errors
    ///
    /// Returns `ClassifyError::InvalidDescriptor` if the question is blank or
    /// `min >= max`, or the range spans more than [`MAX_SCALE_STEPS`] steps.
    pub fn scale(question: impl AsRef<str>, min: i64, max: i64) -> Result<Self> {
        scale_steps(min, max)?;
        let labels = (min..=max).map(|v| v.to_string()).collect();
        Self::scale_with_labels(question, min, max, labels)
    }

    fn scale_with_labels(
        question: impl AsRef<str>,
        min: i64,
        max: i64,
        labels: Vec<String>,
    ) -> Result<Self> {
        let steps = scale_steps(min, max)?;
        if labels.len() as u64 != steps {
            return Err(ClassifyError::invalid_descriptor(format!(
                "{} scale labels for {steps} steps",
                labels.len()
            )));
        }

        let mut descriptor = Self::bare(QuestionType::Scale, normalize_question(question.as_ref())?);
        descriptor.scale_min = Some(min);
        descriptor.scale_max = Some(max);
        descriptor.scale_labels = Some(labels);
        Ok(descriptor)
    }

    fn bare(kind: QuestionType, question: String) -> Self {
        Self {
            kind,
            question,
            options: None,
            scale_min: None,
            scale_max: None,
            scale_labels: None,
            placeholder: None,
            required: kind.default_required(),
        }
    }

    /// Sets the advisory placeholder text.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Overrides the type's default `required` flag.
    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Reads a descriptor from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns `ClassifyError::InvalidEmbeddedJson` if the string is not JSON,
    /// and `ClassifyError::InvalidDescriptor` if it is not a valid question.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Reads a descriptor from a JSON value.
    ///
    /// An object counts as a question when it has a known `type` and a
    /// non-empty `question`. A missing `required` takes the type default.
    /// Missing `scale_labels` are generated from the bounds.
    ///
    /// # Errors
    ///
    /// Returns `ClassifyError::InvalidDescriptor` if the object is not a
    /// question or breaks a field invariant.
    pub fn from_value(value: &Value) -> Result<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| ClassifyError::invalid_descriptor("not a JSON object"))?;

        let kind = obj
            .get("type")
            .and_then(Value::as_str)
            .and_then(QuestionType::from_name)
            .ok_or_else(|| ClassifyError::invalid_descriptor("missing or unknown `type`"))?;
        let question = obj
            .get("question")
            .and_then(Value::as_str)
            .ok_or_else(|| ClassifyError::invalid_descriptor("missing `question`"))?;

        let mut descriptor = match kind {
            QuestionType::Scale => {
                let bound = |key: &str| {
                    obj.get(key).and_then(Value::as_i64).ok_or_else(|| {
                        ClassifyError::invalid_descriptor(format!("missing integer `{key}`"))
                    })
                };
                let (min, max) = (bound("scale_min")?, bound("scale_max")?);
                match obj.get("scale_labels").and_then(Value::as_array) {
                    Some(labels) => {
                        Self::scale_with_labels(question, min, max, string_items(labels))?
                    }
                    None => Self::scale(question, min, max)?,
                }
            }
            kind if kind.is_choice() => {
                let options = obj
                    .get("options")
                    .and_then(Value::as_array)
                    .map(|items| string_items(items))
                    .unwrap_or_default();
                Self::choice(kind, question, options)?
            }
            kind => Self::new(kind, question)?,
        };

        if let Some(placeholder) = obj.get("placeholder").and_then(Value::as_str) {
            descriptor.placeholder = Some(placeholder.to_string());
        }
        if let Some(required) = obj.get("required").and_then(Value::as_bool) {
            descriptor.required = required;
        }
        Ok(descriptor)
    }

    /// Serializes the descriptor to compact JSON.
    pub fn to_json(&self) -> String {
        // Only strings, integers and bools: serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Serializes the descriptor to a JSON value.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// The question type.
    #[inline]
    pub const fn kind(&self) -> QuestionType {
        self.kind
    }

    /// The question sentence.
    #[inline]
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Options of a choice-like question.
    #[inline]
    pub fn options(&self) -> Option<&[String]> {
        self.options.as_deref()
    }

    /// Scale bounds as `(min, max)`.
    #[inline]
    pub fn scale_bounds(&self) -> Option<(i64, i64)> {
        self.scale_min.zip(self.scale_max)
    }

    /// Scale labels, one per step.
    #[inline]
    pub fn scale_labels(&self) -> Option<&[String]> {
        self.scale_labels.as_deref()
    }

    /// Advisory placeholder text.
    #[inline]
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// Whether an answer is required.
    #[inline]
    pub const fn required(&self) -> bool {
        self.required
    }

    /// Checks a respondent's answer against what the question's widget allows.
    ///
    /// Multiple-select answers are the selected options joined with `", "`.
    /// An option that itself contains `", "` therefore cannot be selected.
    ///
    /// # Errors
    ///
    /// Returns the [`AnswerError`] describing why the answer was rejected.
    pub fn check_answer(&self, answer: &str) -> std::result::Result<(), AnswerError> {
        let answer = answer.trim();
        if answer.is_empty() {
            return if self.required {
                Err(AnswerError::Required)
            } else {
                Ok(())
            };
        }

        match self.kind {
            QuestionType::MultipleChoice | QuestionType::Dropdown => self.check_option(answer),
            QuestionType::MultipleSelect => answer
                .split(", ")
                .try_for_each(|part| self.check_option(part.trim())),
            QuestionType::Scale => {
                let (min, max) = self.scale_bounds().unwrap_or((0, 0));
                match answer.parse::<i64>() {
                    Ok(v) if (min..=max).contains(&v) => Ok(()),
                    _ => Err(AnswerError::OutOfScale {
                        answer: answer.to_string(),
                        min,
                        max,
                    }),
                }
            }
            QuestionType::YesNo => {
                if answer.eq_ignore_ascii_case("yes") || answer.eq_ignore_ascii_case("no") {
                    Ok(())
                } else {
                    Err(AnswerError::NotYesNo(answer.to_string()))
                }
            }
            QuestionType::OpenEnded
            | QuestionType::Date
            | QuestionType::Time
            | QuestionType::Email
            | QuestionType::Phone => Ok(()),
        }
    }

    fn check_option(&self, answer: &str) -> std::result::Result<(), AnswerError> {
        let known = self
            .options
            .as_ref()
            .is_some_and(|opts| opts.iter().any(|o| o == answer));
        if known {
            Ok(())
        } else {
            Err(AnswerError::UnknownOption {
                answer: answer.to_string(),
            })
        }
    }
}

/// Trims and NFC-normalizes a fragment of extracted text.
pub fn normalize_text(text: &str) -> String {
    text.trim().nfc().collect()
}

fn normalize_question(question: &str) -> Result<String> {
    let question = normalize_text(question);
    if question.is_empty() {
        return Err(ClassifyError::invalid_descriptor("question is empty"));
    }
    Ok(question)
}

/// Number of integer steps in `min..=max`, bounded by [`MAX_SCALE_STEPS`].
fn scale_steps(min: i64, max: i64) -> Result<u64> {
    if min >= max {
        return Err(ClassifyError::invalid_descriptor(format!(
            "scale bounds {min}..{max} are empty"
        )));
    }
    let steps = max.abs_diff(min).saturating_add(1);
    if steps > MAX_SCALE_STEPS {
        return Err(ClassifyError::invalid_descriptor(format!(
            "scale {min}..={max} has {steps} steps, at most {MAX_SCALE_STEPS} allowed"
        )));
    }
    Ok(steps)
}

fn string_items(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
        .collect()
}
