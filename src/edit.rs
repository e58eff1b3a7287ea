//! In-memory mutations of a text buffer.
//!
//! Every mutation compiles down to a single primitive, [`Splice`]: a byte-span
//! replacement. Insertion is a splice over an empty span. The functions here
//! are pure; persisting the new buffer is the caller's job.

use crate::pattern::Pattern;
use std::ops::Range;
use thiserror::Error;

/// Byte-span replacement inside a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "Splice does nothing until apply() is called"]
pub struct Splice {
    /// Starting byte offset (inclusive)
    pub byte_start: usize,
    /// Ending byte offset (exclusive)
    pub byte_end: usize,
    /// Text placed at [byte_start, byte_end)
    pub new_text: String,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SpliceError {
    #[error("Invalid byte range: [{byte_start}, {byte_end}) in buffer of length {len}")]
    InvalidByteRange {
        byte_start: usize,
        byte_end: usize,
        len: usize,
    },

    #[error("Byte range [{byte_start}, {byte_end}) splits a UTF-8 character")]
    NotCharBoundary { byte_start: usize, byte_end: usize },
}

impl Splice {
    pub fn replace(range: Range<usize>, new_text: impl Into<String>) -> Self {
        Self {
            byte_start: range.start,
            byte_end: range.end,
            new_text: new_text.into(),
        }
    }

    pub fn insert(at: usize, new_text: impl Into<String>) -> Self {
        Self::replace(at..at, new_text)
    }

    fn validate(&self, buffer: &str) -> Result<(), SpliceError> {
        if self.byte_start > self.byte_end || self.byte_end > buffer.len() {
            return Err(SpliceError::InvalidByteRange {
                byte_start: self.byte_start,
                byte_end: self.byte_end,
                len: buffer.len(),
            });
        }
        if !buffer.is_char_boundary(self.byte_start) || !buffer.is_char_boundary(self.byte_end) {
            return Err(SpliceError::NotCharBoundary {
                byte_start: self.byte_start,
                byte_end: self.byte_end,
            });
        }
        Ok(())
    }

    /// Produce the buffer with this splice applied.
    pub fn apply(&self, buffer: &str) -> Result<String, SpliceError> {
        self.validate(buffer)?;

        let mut out =
            String::with_capacity(buffer.len() + self.new_text.len() - (self.byte_end - self.byte_start));
        out.push_str(&buffer[..self.byte_start]);
        out.push_str(&self.new_text);
        out.push_str(&buffer[self.byte_end..]);
        Ok(out)
    }
}

/// Replace the first match of `pattern` with `content`.
///
/// Returns `None` when the pattern does not match.
pub fn replace(buffer: &str, pattern: &Pattern, content: &str) -> Option<String> {
    let found = pattern.locate(buffer)?;
    splice(buffer, Splice::replace(found, content))
}

/// Insert `content` immediately before the first match of `anchor`.
pub fn insert_before(buffer: &str, anchor: &Pattern, content: &str) -> Option<String> {
    let found = anchor.locate(buffer)?;
    splice(buffer, Splice::insert(found.start, content))
}

/// Insert `content` immediately before the last match of `anchor`.
pub fn insert_before_last(buffer: &str, anchor: &Pattern, content: &str) -> Option<String> {
    let found = anchor.locate_last(buffer)?;
    splice(buffer, Splice::insert(found.start, content))
}

// Pattern offsets always fall on char boundaries inside the buffer.
fn splice(buffer: &str, splice: Splice) -> Option<String> {
    splice.apply(buffer).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn re(source: &str) -> Pattern {
        Pattern::regex(source).unwrap()
    }

    #[test]
    fn test_splice_replace() {
        let out = Splice::replace(0..5, "HELLO").apply("hello world").unwrap();
        assert_eq!(out, "HELLO world");
    }

    #[test]
    fn test_splice_insert() {
        let out = Splice::insert(5, ",").apply("hello world").unwrap();
        assert_eq!(out, "hello, world");
    }

    #[test]
    fn test_splice_invalid_range() {
        let err = Splice::replace(5..20, "x").apply("hello world").unwrap_err();
        assert!(matches!(err, SpliceError::InvalidByteRange { .. }));

        let err = Splice::replace(8..3, "x").apply("hello world").unwrap_err();
        assert!(matches!(err, SpliceError::InvalidByteRange { .. }));
    }

    #[test]
    fn test_splice_rejects_split_char() {
        let err = Splice::insert(1, "x").apply("é").unwrap_err();
        assert!(matches!(err, SpliceError::NotCharBoundary { .. }));
    }

    #[test]
    fn test_replace_first_match_only() {
        let out = replace("a=1\na=2\n", &re(r"a=\d"), "a=9").unwrap();
        assert_eq!(out, "a=9\na=2\n");
    }

    #[test]
    fn test_replace_no_match() {
        assert_eq!(replace("abc", &Pattern::literal("z"), "y"), None);
    }

    #[test]
    fn test_insert_before_anchor() {
        let text = "<resources>\n</resources>\n";
        let out = insert_before(text, &re(r"(?m)^(.*?)</resources>(.*?)$"), "  <x/>\n").unwrap();
        assert_eq!(out, "<resources>\n  <x/>\n</resources>\n");
    }

    #[test]
    fn test_insert_after_via_end_anchor() {
        let text = "package a;\nclass B {}\n";
        let anchor = re(r"(?m)^.*?package .*$").end();
        let out = insert_before(text, &anchor, "\n\nimport c;").unwrap();
        assert_eq!(out, "package a;\n\nimport c;\nclass B {}\n");
    }

    #[test]
    fn test_insert_before_last() {
        let text = "class A {\n  void f() {\n  }\n}\n";
        let out = insert_before_last(text, &re(r"(?m)^\s*\}\s*$"), "  // end\n").unwrap();
        assert_eq!(out, "class A {\n  void f() {\n  }\n  // end\n}\n");
    }

    #[test]
    fn test_insert_before_last_no_match() {
        assert_eq!(insert_before_last("abc", &Pattern::literal("}"), "x"), None);
    }
}
