//! Pattern detectors that recognise question shapes in free text.
//!
//! Each detector is an independent rule. The [`crate::Classifier`] runs them
//! in ascending [`Detector::priority`] and keeps the first descriptor
//! produced. Structurally signalled shapes (option markers, numeric ranges)
//! come before keyword-only ones so that broad rules do not steal their
//! turns.

mod contact;
mod date_time;
mod dropdown;
mod fallback;
mod multiple_choice;
mod multiple_select;
mod open_ended;
mod scale;
mod yes_no;

pub use contact::{EmailDetector, PhoneDetector};
pub use date_time::DateTimeDetector;
pub use dropdown::DropdownDetector;
pub use fallback::FallbackDetector;
pub use multiple_choice::MultipleChoiceDetector;
pub use multiple_select::MultipleSelectDetector;
pub use open_ended::OpenEndedDetector;
pub use scale::ScaleDetector;
pub use yes_no::YesNoDetector;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    config::ClassifierConfig,
    descriptor::QuestionDescriptor,
    error::{ClassifyError, Result},
    turn::{char_len, Turn},
};

/// A rule that maps a turn to a question descriptor.
///
/// Return values:
/// - `Ok(Some(descriptor))`: the rule matched and extraction succeeded
/// - `Ok(None)`: the rule does not apply to this turn
/// - `Err(_)`: the rule matched but extraction was degenerate
///
/// The dispatcher treats the last two the same way and moves on.
pub trait Detector: Send + Sync + std::fmt::Debug {
    /// Returns the name of this detector for traces and configuration.
    fn name(&self) -> &'static str;

    /// Attempts to build a descriptor from the turn.
    fn detect(&self, turn: &Turn<'_>) -> Result<Option<QuestionDescriptor>>;

    /// Returns the priority of this detector. Lower values run first.
    fn priority(&self) -> u8;
}

/// The built-in detectors, in dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectorKind {
    MultipleChoice,
    Scale,
    Dropdown,
    OpenEnded,
    YesNo,
    MultipleSelect,
    DateTime,
    Email,
    Phone,
    Fallback,
}

impl DetectorKind {
    /// All built-in detectors in dispatch order.
    pub const ALL: [DetectorKind; 10] = [
        Self::MultipleChoice,
        Self::Scale,
        Self::Dropdown,
        Self::OpenEnded,
        Self::YesNo,
        Self::MultipleSelect,
        Self::DateTime,
        Self::Email,
        Self::Phone,
        Self::Fallback,
    ];

    /// The detector's name, as reported by [`Detector::name`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::MultipleChoice => "multiple_choice",
            Self::Scale => "scale",
            Self::Dropdown => "dropdown",
            Self::OpenEnded => "open_ended",
            Self::YesNo => "yes_no",
            Self::MultipleSelect => "multiple_select",
            Self::DateTime => "date_time",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Fallback => "fallback",
        }
    }

    /// Instantiates the detector with settings from `config`.
    pub fn build(self, config: &ClassifierConfig) -> Box<dyn Detector> {
        match self {
            Self::MultipleChoice => Box::new(MultipleChoiceDetector),
            Self::Scale => Box::new(ScaleDetector),
            Self::Dropdown => Box::new(DropdownDetector),
            Self::OpenEnded => Box::new(OpenEndedDetector::new(
                config.open_ended_placeholder.clone(),
            )),
            Self::YesNo => Box::new(YesNoDetector),
            Self::MultipleSelect => Box::new(MultipleSelectDetector),
            Self::DateTime => Box::new(DateTimeDetector),
            Self::Email => Box::new(EmailDetector),
            Self::Phone => Box::new(PhoneDetector),
            Self::Fallback => Box::new(FallbackDetector::new(config.fallback_placeholder.clone())),
        }
    }
}

/// Builds the enabled built-in detectors for `config`, in dispatch order.
pub fn default_detectors(config: &ClassifierConfig) -> Vec<Box<dyn Detector>> {
    DetectorKind::ALL
        .into_iter()
        .filter(|kind| config.is_enabled(*kind))
        .map(|kind| kind.build(config))
        .collect()
}

/// Maps a descriptor construction error to a degenerate-extraction error.
pub(crate) fn degenerate(detector: &'static str) -> impl FnOnce(ClassifyError) -> ClassifyError {
    move |err| ClassifyError::malformed(detector, err.to_string())
}

/// Splits `text` on `delimiters`, trims the pieces and keeps those of at
/// least `min_chars` characters.
pub(crate) fn split_options(delimiters: &Regex, text: &str, min_chars: usize) -> Vec<String> {
    delimiters
        .split(text)
        .map(str::trim)
        .filter(|piece| !piece.is_empty() && char_len(piece) >= min_chars)
        .map(str::to_string)
        .collect()
}
