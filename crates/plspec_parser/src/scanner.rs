//! Scanner for package specifications.
//!
//! The scanner cuts specification text into statements at top-level
//! semicolons, strips comments, collapses whitespace to single spaces, and
//! keeps only the statements that declare a function, a procedure, or a
//! constant. Everything else in a specification (the package header, type
//! and variable declarations, pragmas, `end`) is skipped.

use std::fmt;

use plspec_foundation::Span;
use tracing::trace;

use crate::splitter::is_word_byte;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What kind of declaration a fragment holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FragmentKind {
    /// Starts with the `function` keyword.
    Function,
    /// Starts with the `procedure` keyword.
    Procedure,
    /// Matches `<identifier> constant ...`.
    Constant,
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function => write!(f, "function"),
            Self::Procedure => write!(f, "procedure"),
            Self::Constant => write!(f, "constant"),
        }
    }
}

/// One declaration cut out of a specification, in single-line form.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawFragment {
    /// Declaration kind recognized from the leading keywords.
    pub kind: FragmentKind,
    /// Normalized text, from the first keyword through the semicolon.
    pub text: String,
    /// Where the declaration sits in the original source.
    pub span: Span,
    /// False if the source ended before a terminating semicolon.
    pub terminated: bool,
}

/// A source position of one byte of normalized text.
#[derive(Clone, Copy, Debug)]
struct Position {
    offset: usize,
    line: u32,
    column: u32,
}

/// A statement collected between top-level semicolons.
#[derive(Clone, Debug, Default)]
struct Statement {
    text: String,
    /// Parallel to the bytes of `text`.
    positions: Vec<Position>,
    end: usize,
    terminated: bool,
}

impl Statement {
    fn push(&mut self, c: char, at: Position) {
        self.text.push(c);
        self.positions
            .extend(std::iter::repeat_n(at, c.len_utf8()));
    }

    /// Pushes a single space unless the text is empty or already ends in one.
    fn push_space(&mut self, at: Position) {
        if !self.text.is_empty() && !self.text.ends_with(' ') {
            self.push(' ', at);
        }
    }

    fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Scanner over the text of one package specification.
#[derive(Clone)]
pub struct Scanner<'src> {
    /// Remaining source text.
    rest: &'src str,
    /// Current byte offset in source.
    position: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based).
    column: u32,
}

impl<'src> Scanner<'src> {
    /// Creates a new scanner for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            rest: source,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Scans the source into declaration fragments, in source order.
    ///
    /// A source with no declarations yields an empty vector.
    #[must_use]
    pub fn scan(self) -> Vec<RawFragment> {
        self.statements()
            .into_iter()
            .filter_map(into_fragment)
            .collect()
    }

    /// Cuts the source into normalized statements.
    fn statements(mut self) -> Vec<Statement> {
        let mut statements = Vec::new();
        let mut current = Statement::default();
        let mut depth: i32 = 0;
        // First `;` seen inside open parentheses, and the scanner just past it.
        let mut fallback: Option<(Statement, Self)> = None;

        loop {
            let Some(c) = self.peek_char() else {
                match fallback.take() {
                    Some((statement, resume)) if depth > 0 => {
                        trace!(
                            statement = %statement.text.trim(),
                            "unclosed parenthesis, cutting at first semicolon"
                        );
                        statements.push(statement);
                        self = resume;
                        current = Statement::default();
                        depth = 0;
                        continue;
                    }
                    _ => break,
                }
            };
            match c {
                '-' if self.peek_char_n(1) == Some('-') => {
                    let at = self.here();
                    self.skip_line_comment();
                    current.push_space(at);
                }
                '/' if self.peek_char_n(1) == Some('*') => {
                    let at = self.here();
                    self.skip_block_comment();
                    current.push_space(at);
                }
                '\'' | '"' => self.copy_quoted(c, &mut current),
                ';' if depth <= 0 => {
                    current.push(';', self.here());
                    self.advance();
                    current.end = self.position;
                    current.terminated = true;
                    statements.push(std::mem::take(&mut current));
                    depth = 0;
                    fallback = None;
                }
                ';' => {
                    current.push(';', self.here());
                    self.advance();
                    if fallback.is_none() {
                        let mut cut = current.clone();
                        cut.end = self.position;
                        cut.terminated = true;
                        fallback = Some((cut, self.clone()));
                    }
                }
                c if c.is_whitespace() => {
                    current.push_space(self.here());
                    self.advance();
                }
                c => {
                    match c {
                        '(' => depth += 1,
                        ')' => depth -= 1,
                        _ => {}
                    }
                    current.push(c, self.here());
                    self.advance();
                }
            }
        }

        if !current.is_blank() {
            current.end = self.position;
            statements.push(current);
        }
        statements
    }

    fn here(&self) -> Position {
        Position {
            offset: self.position,
            line: self.line,
            column: self.column,
        }
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&self) -> Option<char> {
        self.rest.chars().next()
    }

    /// Peeks at the character `n` positions ahead.
    fn peek_char_n(&self, n: usize) -> Option<char> {
        self.rest.chars().nth(n)
    }

    /// Advances past the next character.
    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            let len = c.len_utf8();
            self.rest = &self.rest[len..];
            self.position += len;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    /// Skips a `--` comment up to (not including) the newline.
    fn skip_line_comment(&mut self) {
        while let Some(c) = self.peek_char() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Skips a `/* ... */` comment. An unterminated comment runs to the end.
    fn skip_block_comment(&mut self) {
        self.advance();
        self.advance();
        while let Some(c) = self.peek_char() {
            if c == '*' && self.peek_char_n(1) == Some('/') {
                self.advance();
                self.advance();
                return;
            }
            self.advance();
        }
    }

    /// Copies a string literal or quoted identifier verbatim.
    ///
    /// A doubled quote inside the literal is an escaped quote.
    fn copy_quoted(&mut self, quote: char, into: &mut Statement) {
        into.push(quote, self.here());
        self.advance();
        while let Some(c) = self.peek_char() {
            into.push(c, self.here());
            self.advance();
            if c == quote {
                if self.peek_char() == Some(quote) {
                    into.push(quote, self.here());
                    self.advance();
                    continue;
                }
                return;
            }
        }
    }
}

/// Scans a package specification into declaration fragments.
#[must_use]
pub fn scan(source: &str) -> Vec<RawFragment> {
    Scanner::new(source).scan()
}

/// Extracts the package name from a `[create [or replace]] package NAME is`
/// header, dropping any schema qualifier and identifier quotes.
///
/// Returns `None` when the source has no package header or declares a
/// package body.
#[must_use]
pub fn package_name(source: &str) -> Option<String> {
    let first = Scanner::new(source).statements().into_iter().next()?;
    let words = words(&first.text);
    let at = words
        .iter()
        .position(|&(_, word)| word.eq_ignore_ascii_case("package"))?;
    let (offset, _) = *words.get(at + 1)?;

    let qualified = first.text[offset..]
        .split(|c: char| c.is_whitespace() || c == '(' || c == ';')
        .next()?;
    let name = qualified.rsplit('.').next()?.trim_matches('"');
    if name.is_empty() || name.eq_ignore_ascii_case("body") {
        return None;
    }
    Some(name.to_string())
}

/// Turns a statement into a fragment if it holds a declaration.
fn into_fragment(statement: Statement) -> Option<RawFragment> {
    let Some((offset, kind)) = declaration_start(&statement.text) else {
        trace!(statement = %statement.text.trim(), "skipping non-declaration statement");
        return None;
    };

    let at = statement.positions[offset];
    let fragment = RawFragment {
        kind,
        text: statement.text[offset..].trim_end().to_string(),
        span: Span::new(at.offset, statement.end, at.line, at.column),
        terminated: statement.terminated,
    };
    trace!(%kind, line = at.line, text = %fragment.text, "scanned fragment");
    Some(fragment)
}

/// Finds the first word that starts a declaration.
fn declaration_start(text: &str) -> Option<(usize, FragmentKind)> {
    let words = words(text);
    words.iter().enumerate().find_map(|(i, &(offset, word))| {
        if word.eq_ignore_ascii_case("function") {
            Some((offset, FragmentKind::Function))
        } else if word.eq_ignore_ascii_case("procedure") {
            Some((offset, FragmentKind::Procedure))
        } else if words
            .get(i + 1)
            .is_some_and(|&(_, next)| next.eq_ignore_ascii_case("constant"))
        {
            Some((offset, FragmentKind::Constant))
        } else {
            None
        }
    })
}

/// Splits text into words, skipping string literals. Quoted identifiers are
/// single words including their quotes.
fn words(text: &str) -> Vec<(usize, &str)> {
    let bytes = text.as_bytes();
    let mut words = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'\'' || b == b'"' {
            let end = quoted_end(bytes, i);
            if b == b'"' {
                words.push((i, &text[i..end]));
            }
            i = end;
        } else if is_word_byte(b) {
            let start = i;
            while i < bytes.len() && is_word_byte(bytes[i]) {
                i += 1;
            }
            words.push((start, &text[start..i]));
        } else {
            i += 1;
        }
    }
    words
}

/// Returns the offset just past the quoted section starting at `start`.
fn quoted_end(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        if bytes[i] == quote {
            if bytes.get(i + 1) == Some(&quote) {
                i += 2;
                continue;
            }
            return i + 1;
        }
        i += 1;
    }
    bytes.len()
}
