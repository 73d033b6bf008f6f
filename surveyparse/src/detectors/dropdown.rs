//! Dropdown detection for selection-style questions with listed options.
//!
//! Options can be laid out four ways. The layout is chosen from the
//! characters present in the turn, checked in this order:
//!
//! 1. dash lines (`- Bachelor`)
//! 2. bullet lines (`• Bachelor`, `* Bachelor`)
//! 3. inline lists after the question (`Is it A, B, or C?`)
//! 4. a colon list (`Education: High school, Bachelor, Master`)

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::{degenerate, split_options, Detector};
use crate::{
    descriptor::{QuestionDescriptor, QuestionType},
    error::{ClassifyError, Result},
    turn::Turn,
};

const NAME: &str = "dropdown";

static KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(education|degree|select|choose|is it|which|what.*level|what.*type|category|status|prefer)",
    )
    .expect("Invalid dropdown keyword pattern")
});

/// Everything up to and including the first `?`.
static QUESTION_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)(.+?)\?").expect("Invalid question prefix pattern"));

/// Ways an inline option list can follow the question, tried in order.
static INLINE_LISTS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?is)is it (.+?)\?",
        r"(?is)(?:choose|select).*?:(.+?)\?",
        r"(?is)(?:level|type|category).*?:(.+?)\?",
        r"(?is)completed\?\s*(.+?)\?",
        r"(?is)\?\s*(.+?)\?",
    ]
    .into_iter()
    .map(|p| Regex::new(p).expect("Invalid inline option pattern"))
    .collect()
});

/// Capitalised items separated by commas, optionally ending in "or X".
static CAPITALISED_LIST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Z][^,?]+(?:,\s*[A-Z][^,?]+)*(?:,?\s*or\s*[A-Z][^,?]+)?)")
        .expect("Invalid capitalised list pattern")
});

static INLINE_DELIMITERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",|\bor\b|;|\band\b").expect("Invalid delimiter pattern"));
static LIST_DELIMITERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",|\bor\b").expect("Invalid delimiter pattern"));
static COLON_DELIMITERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",|\bor\b|;").expect("Invalid delimiter pattern"));

/// Option layout a dropdown was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    Dash,
    Bullet,
    Inline,
    Colon,
}

/// Detects select-one questions whose options are listed in the text.
///
/// Triggered by selection keywords (`education`, `which`, `is it`, ...) or
/// by a turn containing both a comma and a `?`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropdownDetector;

impl DropdownDetector {
    /// Reads lines starting with one of `markers`. The last non-option line
    /// with a `?` is the question.
    fn prefixed(turn: &Turn<'_>, markers: &[char]) -> (String, Vec<String>) {
        let mut question = "";
        let mut options = Vec::new();

        for line in turn.lines() {
            let marker = line.chars().next().filter(|c| markers.contains(c));
            match marker {
                Some(marker) => {
                    let option = line[marker.len_utf8()..].trim();
                    if !option.is_empty() {
                        options.push(option.to_string());
                    }
                }
                None if line.contains('?') => question = line,
                None => {}
            }
        }

        (question.to_string(), options)
    }

    /// Reads options listed inline around the first question.
    fn inline(text: &str) -> (String, Vec<String>) {
        let Some(full_question) = QUESTION_PREFIX.find(text).map(|m| m.as_str()) else {
            return (String::new(), Vec::new());
        };

        let mut options = Vec::new();
        for pattern in INLINE_LISTS.iter() {
            let Some(list) = pattern.captures(text).and_then(|caps| caps.get(1)) else {
                continue;
            };
            options = split_options(&INLINE_DELIMITERS, list.as_str(), 2);
            if options.len() >= 2 {
                debug!(pattern = pattern.as_str(), count = options.len(), "inline options");
                break;
            }
        }

        if options.is_empty() && (full_question.contains(',') || full_question.contains(" or ")) {
            if let Some(list) = CAPITALISED_LIST.find(full_question) {
                options = split_options(&LIST_DELIMITERS, list.as_str(), 1);
            }
        }

        (full_question.to_string(), options)
    }

    /// Reads `label: opt, opt, opt`. The label becomes the question.
    fn colon(text: &str) -> (String, Vec<String>) {
        let mut parts = text.split(':');
        let (Some(label), Some(list)) = (parts.next(), parts.next()) else {
            return (String::new(), Vec::new());
        };
        (
            format!("{}?", label.trim()),
            split_options(&COLON_DELIMITERS, list.trim(), 2),
        )
    }
}

impl Detector for DropdownDetector {
    #[inline]
    fn name(&self) -> &'static str {
        NAME
    }

    fn detect(&self, turn: &Turn<'_>) -> Result<Option<QuestionDescriptor>> {
        let text = turn.text();
        let comma_question = text.contains(',') && text.contains('?');
        if !KEYWORDS.is_match(text) && !comma_question {
            return Ok(None);
        }

        let (layout, (question, options)) = if text.contains('-') {
            (Layout::Dash, Self::prefixed(turn, &['-']))
        } else if text.contains('\u{2022}') || text.contains('*') {
            (Layout::Bullet, Self::prefixed(turn, &['\u{2022}', '*']))
        } else if comma_question {
            (Layout::Inline, Self::inline(text))
        } else if text.contains(':') {
            (Layout::Colon, Self::colon(text))
        } else {
            return Err(ClassifyError::malformed(NAME, "keyword matched but no option layout"));
        };

        debug!(?layout, count = options.len(), "dropdown candidate");
        QuestionDescriptor::choice(QuestionType::Dropdown, question, options)
            .map(Some)
            .map_err(degenerate(NAME))
    }

    #[inline]
    fn priority(&self) -> u8 {
        3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(text: &str) -> Result<Option<QuestionDescriptor>> {
        DropdownDetector.detect(&Turn::new(text))
    }

    fn options(text: &str) -> Vec<String> {
        detect(text)
            .unwrap()
            .unwrap()
            .options()
            .unwrap()
            .to_vec()
    }

    #[test]
    fn test_dash_lines() {
        let q = detect("What is your highest education level?\n- High school\n- Bachelor\n- Master")
            .unwrap()
            .unwrap();
        assert_eq!(q.kind(), QuestionType::Dropdown);
        assert_eq!(q.question(), "What is your highest education level?");
        assert_eq!(q.options().unwrap(), ["High school", "Bachelor", "Master"]);
        assert!(q.required());
    }

    #[test]
    fn test_bullet_lines() {
        assert_eq!(
            options("Which department are you in?\n\u{2022} Sales\n\u{2022} Support"),
            ["Sales", "Support"]
        );
        assert_eq!(
            options("Which department are you in?\n* Sales\n* Support"),
            ["Sales", "Support"]
        );
    }

    #[test]
    fn test_is_it_inline_list() {
        let q = detect("Is it red, green, or blue?").unwrap().unwrap();
        assert_eq!(q.question(), "Is it red, green, or blue?");
        assert_eq!(q.options().unwrap(), ["red", "green", "blue"]);
    }

    #[test]
    fn test_choose_colon_inline_list() {
        assert_eq!(
            options("Please choose one: Tea, Coffee, Juice?"),
            ["Tea", "Coffee", "Juice"]
        );
    }

    #[test]
    fn test_list_after_question() {
        assert_eq!(
            options("What degree have you completed? Bachelor, Master, or PhD?"),
            ["Bachelor", "Master", "PhD"]
        );
    }

    #[test]
    fn test_short_fragments_dropped() {
        // Single-character pieces are not options.
        assert_eq!(options("Is it Apple, B, or Cherry?"), ["Apple", "Cherry"]);
    }

    #[test]
    fn test_capitalised_list_fallback() {
        // No inline pattern captures anything, so the capitalised run is used.
        let q = detect("Pick Red, Blue or Green?").unwrap().unwrap();
        assert_eq!(q.options().unwrap(), ["Pick Red", "Blue", "Green"]);
    }

    #[test]
    fn test_colon_list() {
        let q = detect("Select your education: High school, Bachelor, Master")
            .unwrap()
            .unwrap();
        assert_eq!(q.question(), "Select your education?");
        assert_eq!(q.options().unwrap(), ["High school", "Bachelor", "Master"]);
    }

    #[test]
    fn test_keyword_without_layout_is_degenerate() {
        let result = detect("Which one do you prefer");
        assert!(matches!(
            result,
            Err(ClassifyError::MalformedExtraction { detector: "dropdown", .. })
        ));
    }

    #[test]
    fn test_too_few_options_is_degenerate() {
        assert!(detect("Which city?\n- London").is_err());
    }

    #[test]
    fn test_not_triggered() {
        assert!(detect("Do you own a car?").unwrap().is_none());
        assert!(detect("Please describe your experience with our service.")
            .unwrap()
            .is_none());
    }
}
