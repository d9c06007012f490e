//! Bracket-depth and quote aware helpers over normalized fragment text.
//!
//! A declaration's punctuation only means something at parenthesis depth
//! zero and outside string literals: the comma in `number(10,2)` does not
//! separate arguments, and the semicolon in `'a;b'` does not end a constant.
//! Everything here walks text through [`TopLevel`] so those rules live in one
//! place.

use plspec_foundation::{Error, Result};

/// Walks the bytes of a text, skipping over quoted sections.
///
/// Yields `(offset, byte, depth)` for every byte outside `'...'` string
/// literals and `"..."` quoted identifiers. An opening parenthesis is reported
/// at the depth outside it, and so is its closing parenthesis, so both
/// delimiters of a top-level group are seen at depth zero.
///
/// All delimiters are ASCII, so walking bytes of UTF-8 text is safe.
#[derive(Clone, Debug)]
pub struct TopLevel<'a> {
    bytes: &'a [u8],
    pos: usize,
    depth: i32,
    underflow: bool,
}

impl<'a> TopLevel<'a> {
    /// Creates a walker over the given text.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
            depth: 0,
            underflow: false,
        }
    }

    /// Returns true if every opened parenthesis was closed and no closing
    /// parenthesis appeared without an opener.
    ///
    /// Only meaningful once the walker has been run to the end.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.depth == 0 && !self.underflow
    }

    /// Skips a quoted section starting at `pos`. Doubled quotes are escapes.
    fn skip_quoted(&mut self, quote: u8) {
        let mut i = self.pos + 1;
        while i < self.bytes.len() {
            if self.bytes[i] == quote {
                if self.bytes.get(i + 1) == Some(&quote) {
                    i += 2;
                    continue;
                }
                self.pos = i + 1;
                return;
            }
            i += 1;
        }
        // Unterminated literal swallows the rest of the text.
        self.pos = self.bytes.len();
    }
}

impl Iterator for TopLevel<'_> {
    type Item = (usize, u8, i32);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let &b = self.bytes.get(self.pos)?;
            match b {
                b'\'' | b'"' => self.skip_quoted(b),
                b'(' => {
                    let item = (self.pos, b, self.depth);
                    self.depth += 1;
                    self.pos += 1;
                    return Some(item);
                }
                b')' => {
                    self.depth -= 1;
                    if self.depth < 0 {
                        self.underflow = true;
                    }
                    let item = (self.pos, b, self.depth);
                    self.pos += 1;
                    return Some(item);
                }
                _ => {
                    let item = (self.pos, b, self.depth);
                    self.pos += 1;
                    return Some(item);
                }
            }
        }
    }
}

/// Returns true if parentheses in the text are balanced.
#[must_use]
pub fn is_balanced(text: &str) -> bool {
    let mut walker = TopLevel::new(text);
    walker.by_ref().for_each(drop);
    walker.is_balanced()
}

/// Splits text on `separator` wherever it occurs at depth zero.
///
/// Pieces are trimmed. Empty input yields no pieces; an empty piece between
/// two separators is kept so the caller can reject it.
///
/// # Errors
/// Returns `UnbalancedParentheses` if the depth does not end at zero.
pub fn split_top_level(text: &str, separator: u8) -> Result<Vec<&str>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    let mut walker = TopLevel::new(text);
    for (i, b, depth) in walker.by_ref() {
        if b == separator && depth == 0 {
            pieces.push(text[start..i].trim());
            start = i + 1;
        }
    }
    if !walker.is_balanced() {
        return Err(Error::unbalanced(text));
    }
    pieces.push(text[start..].trim());
    Ok(pieces)
}

/// Returns the offset of the parenthesis closing the one at `open`.
#[must_use]
pub fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let mut walker = TopLevel::new(text);
    let (_, _, outer) = walker.find(|&(i, b, _)| i == open && b == b'(')?;
    walker
        .find(|&(_, b, depth)| b == b')' && depth == outer)
        .map(|(i, _, _)| i)
}

/// Finds the first depth-zero occurrence of a punctuation sequence like `:=`.
#[must_use]
pub fn find_top_level(text: &str, needle: &str) -> Option<usize> {
    let first = *needle.as_bytes().first()?;
    TopLevel::new(text)
        .find(|&(i, b, depth)| depth == 0 && b == first && text[i..].starts_with(needle))
        .map(|(i, _, _)| i)
}

/// Finds the first depth-zero, whole-word, case-insensitive occurrence of a
/// keyword.
#[must_use]
pub fn find_keyword(text: &str, keyword: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    TopLevel::new(text)
        .find(|&(i, _, depth)| {
            depth == 0
                && text
                    .get(i..i + keyword.len())
                    .is_some_and(|s| s.eq_ignore_ascii_case(keyword))
                && (i == 0 || !is_word_byte(bytes[i - 1]))
                && bytes.get(i + keyword.len()).is_none_or(|&b| !is_word_byte(b))
        })
        .map(|(i, _, _)| i)
}

/// Returns true for bytes that may appear in an unquoted identifier.
#[must_use]
pub const fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'$' | b'#') || b >= 0x80
}
