//! Syntax error payloads and the layout of their three-line report block.
//!
//! A parser hands over everything it consumed up to the failure, so the line
//! shown to the user is the last physical line of that text and the column
//! offset has to be rebased from the full text onto that line. All lengths are
//! counted in characters, the same unit as the spaces of the caret line.

use crate::error::{ReportError, ReportResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A parse failure as reported by the analyzer.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct SyntaxErrorInfo {
    /// The path of the file that failed to parse.
    pub filename: String,
    /// The parser's explanation of the failure.
    pub message: String,
    /// The 1-based line number of the failure.
    pub lineno: usize,
    /// The 0-based column offset, measured against the whole of `text`.
    pub offset: Option<usize>,
    /// The source consumed up to and including the failing line.
    pub text: String,
}

impl SyntaxErrorInfo {
    /// Creates a new syntax error payload.
    pub fn new(
        filename: impl Into<String>,
        message: impl Into<String>,
        lineno: usize,
        offset: Option<usize>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            message: message.into(),
            lineno,
            offset,
            text: text.into(),
        }
    }

    /// Returns the line that will be printed under the header.
    pub fn display_line(&self) -> ReportResult<&str> {
        display_line(&self.filename, &self.text)
    }

    /// Returns the offset rebased onto [`display_line`](Self::display_line), if one was given.
    pub fn caret_column(&self) -> ReportResult<Option<usize>> {
        let line = self.display_line()?;
        self.offset
            .map(|offset| rebase(&self.filename, offset, &self.text, line))
            .transpose()
    }

    /// Lays out the report block, validating the payload first.
    pub fn render(&self) -> ReportResult<SyntaxErrorBlock<'_>> {
        SyntaxErrorBlock::new(
            &self.filename,
            &self.message,
            self.lineno,
            self.offset,
            &self.text,
        )
    }
}

/// A validated syntax error block, ready to be written.
///
/// Produced before any output happens so a malformed payload never leaves a
/// half-written block behind.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SyntaxErrorBlock<'a> {
    /// `{filename}:{lineno}: {message}`
    pub header: String,
    /// The last physical line of the consumed source, verbatim.
    pub source_line: &'a str,
    /// Spaces followed by `^`, present only when a column offset was given.
    pub caret: Option<String>,
}

impl<'a> SyntaxErrorBlock<'a> {
    /// Lays out a block from the raw parts of a syntax error.
    pub fn new(
        filename: &str,
        message: &str,
        lineno: usize,
        offset: Option<usize>,
        text: &'a str,
    ) -> ReportResult<Self> {
        let source_line = display_line(filename, text)?;
        let caret = offset
            .map(|offset| rebase(filename, offset, text, source_line))
            .transpose()?
            .map(caret_line);
        Ok(Self {
            header: format!("{filename}:{lineno}: {message}"),
            source_line,
            caret,
        })
    }
}

impl fmt::Display for SyntaxErrorBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header)?;
        writeln!(f, "{}", self.source_line)?;
        if let Some(caret) = &self.caret {
            writeln!(f, "{caret}")?;
        }
        Ok(())
    }
}

/// Returns the last physical line of `text`, or `None` if it has no lines.
///
/// Splits on `\n`, `\r\n`, `\r`, vertical tab, form feed, the file, group and
/// record separators, NEL, and the Unicode line and paragraph separators. A
/// terminator at the very end closes the last line instead of opening an
/// empty one.
pub fn last_line(text: &str) -> Option<&str> {
    if text.is_empty() {
        return None;
    }
    let body = match text.strip_suffix("\r\n") {
        Some(body) => body,
        None => match text.chars().next_back() {
            Some(c) if is_line_break(c) => &text[..text.len() - c.len_utf8()],
            _ => text,
        },
    };
    let start = body
        .char_indices()
        .rev()
        .find(|&(_, c)| is_line_break(c))
        .map_or(0, |(idx, c)| idx + c.len_utf8());
    Some(&body[start..])
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\u{0b}'
            | '\u{0c}'
            | '\u{1c}'
            | '\u{1d}'
            | '\u{1e}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

fn display_line<'a>(filename: &str, text: &'a str) -> ReportResult<&'a str> {
    last_line(text).ok_or_else(|| ReportError::EmptySource {
        filename: filename.to_string(),
    })
}

/// Rebases `offset` from the whole of `text` onto `line`, its last line.
///
/// The subtraction uses the full length of `text`, trailing terminator
/// included. The result may sit one past the end of the line, where parsers
/// point for unexpected end of input; anything further out is rejected.
fn rebase(filename: &str, offset: usize, text: &str, line: &str) -> ReportResult<usize> {
    let line_len = line.chars().count();
    let consumed = text.chars().count() - line_len;
    offset
        .checked_sub(consumed)
        .filter(|&column| column <= line_len)
        .ok_or_else(|| ReportError::OffsetOutOfRange {
            filename: filename.to_string(),
            offset,
            line_len,
        })
}

fn caret_line(column: usize) -> String {
    format!("{}^", " ".repeat(column + 1))
}
