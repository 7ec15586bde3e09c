//! Best-effort recovery of developer comments from the raw catalog text.
//!
//! The structured decoder owns keys and values but throws comments away, so
//! this pass re-reads the text and pairs every `/* ... */` block with the
//! quoted key right after it. Values are skipped, never interpreted.
//!
//! Nothing in here is fatal. An unreadable file is reported as a
//! [`ScanError`] for the caller to absorb, and malformed text only means fewer
//! comments are found.

use std::{collections::HashMap, path::Path};

use thiserror::Error;

use crate::text;

const START_COMMENT: &str = "/*";
const END_COMMENT: &str = "*/";
const QUOTE: &str = "\"";

/// Why the scan pass produced nothing at all.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("catalog text could not be read: {0}")]
    Unreadable(#[from] std::io::Error),
}

/// Re-reads the file at `path` and collects `key -> comment` pairs.
pub fn scan_file<P: AsRef<Path>>(path: P) -> Result<HashMap<String, String>, ScanError> {
    let text = text::read_text(path)?;
    Ok(scan_comments(&text))
}

/// Collects `key -> comment` pairs from catalog text.
///
/// A comment belongs to a key only when the key's opening quote is the next
/// non-whitespace character after `*/`. If the same key is commented twice,
/// the last comment wins. Blocks that are empty after trimming are ignored.
pub fn scan_comments(text: &str) -> HashMap<String, String> {
    let mut scanner = Scanner::new(text);
    let mut comments = HashMap::new();

    while !scanner.is_at_end() {
        let Some(comment) = scanner.scan_comment() else {
            break;
        };

        let Some(key) = scanner.scan_quoted_string() else {
            continue;
        };

        if !comment.is_empty() {
            comments.insert(key, comment);
        }

        // Skip the value so a `/*` inside it is not taken for a comment.
        scanner.scan_up_to(QUOTE);
        scanner.scan_quoted_string();
    }

    comments
}

/// A cursor over text with optional implicit whitespace skipping.
///
/// Every `scan_*` method skips leading whitespace first while
/// `skip_whitespace` is set.
struct Scanner<'a> {
    text: &'a str,
    position: usize,
    skip_whitespace: bool,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Scanner {
            text,
            position: 0,
            skip_whitespace: true,
        }
    }

    fn remaining(&self) -> &'a str {
        &self.text[self.position..]
    }

    fn is_at_end(&self) -> bool {
        let rest = self.remaining();
        if self.skip_whitespace {
            rest.trim_start().is_empty()
        } else {
            rest.is_empty()
        }
    }

    fn skip(&mut self) {
        if self.skip_whitespace {
            let rest = self.remaining();
            self.position += rest.len() - rest.trim_start().len();
        }
    }

    /// Consumes `expected` if the text continues with it.
    fn scan_string(&mut self, expected: &str) -> bool {
        self.skip();
        if self.remaining().starts_with(expected) {
            self.position += expected.len();
            true
        } else {
            false
        }
    }

    /// Consumes text up to, not including, `stop`, or to the end of the text
    /// when `stop` never occurs. Returns `None` if nothing was consumed.
    fn scan_up_to(&mut self, stop: &str) -> Option<&'a str> {
        self.skip();
        let rest = self.remaining();
        let end = rest.find(stop).unwrap_or(rest.len());
        if end == 0 {
            return None;
        }
        self.position += end;
        Some(&rest[..end])
    }

    /// Finds the next comment block and returns its trimmed content.
    ///
    /// `None` once there are no more blocks, or when the next one is never
    /// closed; the cursor is then at the end of the text.
    fn scan_comment(&mut self) -> Option<String> {
        self.scan_up_to(START_COMMENT);
        if !self.scan_string(START_COMMENT) {
            return None;
        }

        let body = self.scan_up_to(END_COMMENT).unwrap_or_default();
        if !self.scan_string(END_COMMENT) {
            return None;
        }

        Some(body.trim().to_string())
    }

    /// Scans a `"`-delimited string, decoding the escapes `\n`, `\t` and `\"`.
    ///
    /// Any other escaped character stands for itself, so `\u0041` reads as
    /// `u0041`. Returns `None` when no quote follows or the string is never
    /// closed.
    fn scan_quoted_string(&mut self) -> Option<String> {
        if !self.scan_string(QUOTE) {
            return None;
        }

        let skip_whitespace = std::mem::replace(&mut self.skip_whitespace, false);
        let value = self.scan_quoted_body();
        self.skip_whitespace = skip_whitespace;
        value
    }

    fn scan_quoted_body(&mut self) -> Option<String> {
        let mut value = String::new();
        loop {
            match self.scan_character()? {
                '"' => return Some(value),
                '\\' => value.push(self.scan_escaped_character()?),
                character => value.push(character),
            }
        }
    }

    fn scan_character(&mut self) -> Option<char> {
        let character = self.remaining().chars().next()?;
        self.position += character.len_utf8();
        Some(character)
    }

    fn scan_escaped_character(&mut self) -> Option<char> {
        let character = match self.scan_character()? {
            'n' => '\n',
            't' => '\t',
            '"' => '"',
            other => other,
        };
        Some(character)
    }
}
