//! Numeric rating scale detection.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::{degenerate, Detector};
use crate::{descriptor::QuestionDescriptor, error::Result, turn::Turn};

const NAME: &str = "scale";

/// A supported rating range and the phrasings that announce it.
#[derive(Debug)]
struct ScaleRange {
    min: i64,
    max: i64,
    pattern: Regex,
}

impl ScaleRange {
    fn new(min: i64, max: i64) -> Self {
        let pattern = format!(
            r"(?i)scale.*?{min}.*?{max}|{min}.*?{max}.*?scale|rate.*?{min}.*?{max}|{min}.*?{max}.*?rate|{min}\s*-\s*{max}|{min}\s*to\s*{max}"
        );
        Self {
            min,
            max,
            pattern: Regex::new(&pattern).expect("Invalid scale range pattern"),
        }
    }
}

/// Supported ranges, tried in this order.
static RANGES: Lazy<[ScaleRange; 4]> = Lazy::new(|| {
    [
        ScaleRange::new(1, 5),
        ScaleRange::new(1, 10),
        ScaleRange::new(1, 7),
        ScaleRange::new(0, 10),
    ]
});

/// Text leading up to the scale phrase.
static LEAD_IN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(.+?)(?:scale|rate|1)").expect("Invalid scale lead-in pattern"));

/// Detects rating questions such as "on a scale of 1 to 10" or "rate 1-5".
///
/// The first supported range whose phrasing appears wins. The question is
/// the first line with a `?`; failing that, the text before the scale
/// phrase; failing that, the first line.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScaleDetector;

impl ScaleDetector {
    fn question<'t>(turn: &'t Turn<'_>) -> &'t str {
        if let Some(line) = turn.first_question_line() {
            return line;
        }
        match LEAD_IN.captures(turn.text()).and_then(|caps| caps.get(1)) {
            Some(lead_in) => lead_in.as_str().trim(),
            None => turn.first_line(),
        }
    }
}

impl Detector for ScaleDetector {
    #[inline]
    fn name(&self) -> &'static str {
        NAME
    }

    fn detect(&self, turn: &Turn<'_>) -> Result<Option<QuestionDescriptor>> {
        let Some(range) = RANGES.iter().find(|r| r.pattern.is_match(turn.text())) else {
            return Ok(None);
        };

        debug!(min = range.min, max = range.max, "scale phrasing found");
        QuestionDescriptor::scale(Self::question(turn), range.min, range.max)
            .map(Some)
            .map_err(degenerate(NAME))
    }

    #[inline]
    fn priority(&self) -> u8 {
        2
    }
}
