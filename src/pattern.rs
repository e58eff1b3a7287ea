//! Pattern matching over text buffers.
//!
//! A [`Pattern`] locates a byte span inside a buffer. Plain literals and
//! regexes cover most anchors; the compound variants express the positional
//! constraints that would otherwise need lookaround (which the `regex` crate
//! does not support) as an explicit two-phase match: find the bounding region
//! first, search inside it, then translate the inner offset back into the
//! outer buffer.
//!
//! Compound patterns only ever consider the *first* bounding region. Callers
//! that need the last occurrence of something use [`Pattern::locate_last`].

use regex::Regex;
use std::fmt;
use std::ops::Range;

/// A locatable anchor in a text buffer.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// First occurrence of a literal substring
    Literal(String),
    /// First match of a regular expression
    Regex(Regex),
    /// Zero-width position at the end of the inner match
    EndOf(Box<Pattern>),
    /// `inner` searched from the end of `anchor`'s match onwards
    After {
        anchor: Box<Pattern>,
        inner: Box<Pattern>,
    },
    /// `inner` searched only inside the span matched by `scope`
    Within {
        scope: Box<Pattern>,
        inner: Box<Pattern>,
    },
    /// `inner` searched between the end of `open` and the start of the
    /// first `close` that follows it
    Between {
        open: Box<Pattern>,
        close: Box<Pattern>,
        inner: Box<Pattern>,
    },
}

impl Pattern {
    pub fn literal(text: impl Into<String>) -> Self {
        Pattern::Literal(text.into())
    }

    /// Compile a regex pattern.
    pub fn regex(source: &str) -> Result<Self, regex::Error> {
        Ok(Pattern::Regex(Regex::new(source)?))
    }

    /// Zero-width anchor placed right after this pattern's match.
    pub fn end(self) -> Self {
        Pattern::EndOf(Box::new(self))
    }

    /// Search `inner` only after this pattern's match.
    pub fn then(self, inner: Pattern) -> Self {
        Pattern::After {
            anchor: Box::new(self),
            inner: Box::new(inner),
        }
    }

    /// Search `inner` only inside this pattern's match.
    pub fn containing(self, inner: Pattern) -> Self {
        Pattern::Within {
            scope: Box::new(self),
            inner: Box::new(inner),
        }
    }

    pub fn between(open: Pattern, close: Pattern, inner: Pattern) -> Self {
        Pattern::Between {
            open: Box::new(open),
            close: Box::new(close),
            inner: Box::new(inner),
        }
    }

    /// Locate the first match in `buffer`.
    pub fn locate(&self, buffer: &str) -> Option<Range<usize>> {
        self.locate_in(buffer, 0, buffer.len())
    }

    /// Locate the last non-overlapping match in `buffer`.
    pub fn locate_last(&self, buffer: &str) -> Option<Range<usize>> {
        let mut last = None;
        let mut pos = 0;

        while pos <= buffer.len() {
            let Some(found) = self.locate_in(buffer, pos, buffer.len()) else {
                break;
            };
            pos = if found.is_empty() {
                next_char_boundary(buffer, found.end)
            } else {
                found.end
            };
            last = Some(found);
        }

        last
    }

    /// Whether the pattern matches anywhere in `buffer`.
    pub fn is_match(&self, buffer: &str) -> bool {
        self.locate(buffer).is_some()
    }

    /// Search `buffer[start..end]`, returning offsets into the whole buffer.
    ///
    /// Regex assertions (`^`, `\b`) see the text before `start`; the region
    /// end acts as end of text.
    fn locate_in(&self, buffer: &str, start: usize, end: usize) -> Option<Range<usize>> {
        if start > end {
            return None;
        }
        let haystack = &buffer[..end];

        match self {
            Pattern::Literal(text) => haystack[start..]
                .find(text.as_str())
                .map(|offset| start + offset..start + offset + text.len()),
            Pattern::Regex(re) => re.find_at(haystack, start).map(|m| m.range()),
            Pattern::EndOf(inner) => inner
                .locate_in(buffer, start, end)
                .map(|found| found.end..found.end),
            Pattern::After { anchor, inner } => {
                let anchor = anchor.locate_in(buffer, start, end)?;
                inner.locate_in(buffer, anchor.end, end)
            }
            Pattern::Within { scope, inner } => {
                let scope = scope.locate_in(buffer, start, end)?;
                inner.locate_in(buffer, scope.start, scope.end)
            }
            Pattern::Between { open, close, inner } => {
                let open = open.locate_in(buffer, start, end)?;
                let close = close.locate_in(buffer, open.end, end)?;
                inner.locate_in(buffer, open.end, close.start)
            }
        }
    }
}

fn next_char_boundary(buffer: &str, pos: usize) -> usize {
    buffer[pos..]
        .chars()
        .next()
        .map_or(buffer.len() + 1, |c| pos + c.len_utf8())
}

impl From<Regex> for Pattern {
    fn from(re: Regex) -> Self {
        Pattern::Regex(re)
    }
}

/// The source text of the pattern.
///
/// Compound patterns render as the pattern that produces the final span.
impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Literal(text) => f.write_str(text),
            Pattern::Regex(re) => f.write_str(re.as_str()),
            Pattern::EndOf(inner) => inner.fmt(f),
            Pattern::After { inner, .. }
            | Pattern::Within { inner, .. }
            | Pattern::Between { inner, .. } => inner.fmt(f),
        }
    }
}
