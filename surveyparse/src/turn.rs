//! Prepared view of one model-generated survey turn.

use std::borrow::Cow;

/// Characters removed before analysis: zero-width spaces and joiners, the
/// byte order mark, and bidi control marks.
const INVISIBLE_CHARS: [char; 11] = [
    '\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}', '\u{200E}', '\u{200F}', '\u{202A}',
    '\u{202B}', '\u{202C}', '\u{202D}', '\u{202E}',
];

/// A turn as seen by the detectors.
///
/// Keeps the caller's text untouched (it is what gets returned when nothing
/// matches) next to a trimmed analysis copy with invisible characters removed.
///
/// # Examples
///
/// ```
/// use surveyparse::turn::Turn;
///
/// let turn = Turn::new("  Hello\u{200B}?\n  A) Yes  ");
/// assert_eq!(turn.text(), "Hello?\n  A) Yes");
/// assert_eq!(turn.lines().collect::<Vec<_>>(), vec!["Hello?", "A) Yes"]);
/// ```
#[derive(Debug, Clone)]
pub struct Turn<'a> {
    original: &'a str,
    text: Cow<'a, str>,
}

impl<'a> Turn<'a> {
    /// Prepares a turn, stripping invisible characters.
    #[inline]
    pub fn new(original: &'a str) -> Self {
        Self::prepare(original, true)
    }

    /// Prepares a turn, optionally stripping invisible characters.
    pub fn prepare(original: &'a str, strip_invisible: bool) -> Self {
        let text = if strip_invisible && original.contains(INVISIBLE_CHARS) {
            Cow::Owned(remove_invisible_chars(original).trim().to_string())
        } else {
            Cow::Borrowed(original.trim())
        };
        Self { original, text }
    }

    /// The text exactly as the caller passed it.
    #[inline]
    pub fn original(&self) -> &'a str {
        self.original
    }

    /// The trimmed analysis text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lines of the analysis text, each trimmed.
    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.text.split('\n').map(str::trim)
    }

    /// The first line, trimmed.
    pub fn first_line(&self) -> &str {
        self.lines().next().unwrap_or_default()
    }

    /// Whether a question mark appears anywhere in the turn.
    #[inline]
    pub fn has_question_mark(&self) -> bool {
        self.text.contains('?')
    }

    /// Trimmed lines containing a question mark, in order.
    pub fn question_lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.lines().filter(|line| line.contains('?'))
    }

    /// The first trimmed line containing a question mark.
    pub fn first_question_line(&self) -> Option<&str> {
        self.question_lines().next()
    }
}

/// Removes zero-width and bidi control characters.
pub fn remove_invisible_chars(input: &str) -> String {
    input.replace(INVISIBLE_CHARS, "")
}

/// Character length, as used by the length rules of the detectors.
#[inline]
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}
