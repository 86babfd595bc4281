//! The reporter: turns analysis outcomes into text on two destinations.

use crate::destination::{Destination, Stream};
use crate::error::{Channel, ReportError, ReportResult};
use crate::finding::RenderText;
use crate::syntax_error::{SyntaxErrorBlock, SyntaxErrorInfo};
use std::io;
use tracing::{debug, warn};

/// Writes lint findings, syntax errors and unexpected errors as plain text.
///
/// Findings go to the findings destination; everything else goes to the
/// error destination. Output formats:
///
/// ```text
/// {filename}: {message}               unexpected error
/// {filename}:{lineno}: {message}      syntax error header
/// {source line}
///    ^                                caret, only when a column is known
/// {finding}                           finding
/// ```
///
/// The reporter keeps no state between calls. It never flushes or closes its
/// destinations, and it does not serialize concurrent callers: share one
/// behind a lock, or give each worker its own.
#[derive(Debug)]
pub struct Reporter<F, E> {
    findings: F,
    errors: E,
}

impl Reporter<Stream<io::Stdout>, Stream<io::Stderr>> {
    /// Creates the default reporter: findings on standard output, errors on standard error.
    pub fn stdio() -> Self {
        Self::new(Stream::new(io::stdout()), Stream::new(io::stderr()))
    }
}

impl<F: Destination, E: Destination> Reporter<F, E> {
    /// Creates a reporter over the given findings and error destinations.
    pub fn new(findings: F, errors: E) -> Self {
        Self { findings, errors }
    }

    /// Reports that `filename` could not be processed for a reason other than
    /// a syntax error.
    pub fn unexpected_error(&mut self, filename: &str, message: &str) -> ReportResult<()> {
        debug!(filename, "reporting unexpected error");
        self.write_error(&format!("{filename}: {message}\n"))
    }

    /// Reports a syntax error in `filename`.
    ///
    /// `text` is the source consumed up to the failure; its last line is
    /// printed. `offset` is measured against the whole of `text` and is
    /// rebased onto that line before the caret is drawn. Nothing is written
    /// if `text` is empty or the rebased offset falls off the line.
    pub fn syntax_error(
        &mut self,
        filename: &str,
        message: &str,
        lineno: usize,
        offset: Option<usize>,
        text: &str,
    ) -> ReportResult<()> {
        debug!(filename, lineno, ?offset, "reporting syntax error");
        let block = SyntaxErrorBlock::new(filename, message, lineno, offset, text)?;
        self.write_block(&block)
    }

    /// Reports a syntax error from a prepared payload.
    pub fn syntax_error_info(&mut self, info: &SyntaxErrorInfo) -> ReportResult<()> {
        debug!(filename = %info.filename, lineno = info.lineno, "reporting syntax error");
        let block = info.render()?;
        self.write_block(&block)
    }

    /// Reports a lint finding.
    pub fn flake<M: RenderText + ?Sized>(&mut self, finding: &M) -> ReportResult<()> {
        let text = finding.render_text();
        debug!(finding = %text, "reporting finding");
        write_to(&mut self.findings, Channel::Findings, &text)?;
        write_to(&mut self.findings, Channel::Findings, "\n")
    }

    /// Returns the findings destination.
    pub fn findings_mut(&mut self) -> &mut F {
        &mut self.findings
    }

    /// Returns the error destination.
    pub fn errors_mut(&mut self) -> &mut E {
        &mut self.errors
    }

    /// Gives the destinations back as `(findings, errors)`.
    pub fn into_parts(self) -> (F, E) {
        (self.findings, self.errors)
    }

    fn write_block(&mut self, block: &SyntaxErrorBlock<'_>) -> ReportResult<()> {
        self.write_error(&format!("{}\n", block.header))?;
        self.write_error(block.source_line)?;
        self.write_error("\n")?;
        if let Some(caret) = &block.caret {
            self.write_error(&format!("{caret}\n"))?;
        }
        Ok(())
    }

    fn write_error(&mut self, text: &str) -> ReportResult<()> {
        write_to(&mut self.errors, Channel::Errors, text)
    }
}

fn write_to<D: Destination>(dest: &mut D, channel: Channel, text: &str) -> ReportResult<()> {
    dest.write_text(text).map_err(|source| {
        warn!(%channel, error = %source, "destination rejected write");
        ReportError::Write { channel, source }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    /// Accepts a fixed number of writes, then fails like a closed pipe.
    struct Flaky {
        remaining: usize,
        written: String,
    }

    impl Flaky {
        fn new(remaining: usize) -> Self {
            Self {
                remaining,
                written: String::new(),
            }
        }
    }

    impl Destination for Flaky {
        fn write_text(&mut self, text: &str) -> io::Result<()> {
            if self.remaining == 0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
            }
            self.remaining -= 1;
            self.written.push_str(text);
            Ok(())
        }
    }

    struct UndefinedName(&'static str);

    impl fmt::Display for UndefinedName {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "a.py:3: undefined name '{}'", self.0)
        }
    }

    fn capture() -> Reporter<String, String> {
        Reporter::new(String::new(), String::new())
    }

    #[test]
    fn unexpected_error_goes_to_errors() {
        let mut reporter = capture();
        reporter
            .unexpected_error("source.py", "No such file or directory")
            .unwrap();
        let (out, err) = reporter.into_parts();
        assert_eq!(out, "");
        assert_eq!(err, "source.py: No such file or directory\n");
    }

    #[test]
    fn syntax_error_single_line() {
        let mut reporter = capture();
        reporter
            .syntax_error("a.py", "invalid syntax", 1, Some(2), "x==")
            .unwrap();
        let (out, err) = reporter.into_parts();
        assert_eq!(out, "");
        assert_eq!(err, "a.py:1: invalid syntax\nx==\n   ^\n");
    }

    #[test]
    fn syntax_error_multi_line_uses_last_line() {
        let mut reporter = capture();
        let text = "def foo(\n  bar\n  baz)\n";
        // The ')' sits at offset 21 of the full text.
        reporter
            .syntax_error("foo.py", "invalid syntax", 3, Some(21), text)
            .unwrap();
        let caret = format!("{}^\n", " ".repeat(6));
        assert_eq!(
            reporter.errors_mut().as_str(),
            format!("foo.py:3: invalid syntax\n  baz)\n{caret}")
        );
    }

    #[test]
    fn syntax_error_without_offset_has_two_lines() {
        let mut reporter = capture();
        reporter
            .syntax_error("a.py", "EOF while scanning", 1, None, "s = 'abc\n")
            .unwrap();
        assert_eq!(
            reporter.errors_mut().as_str(),
            "a.py:1: EOF while scanning\ns = 'abc\n"
        );
    }

    #[test]
    fn syntax_error_info_matches_raw_call() {
        let info = SyntaxErrorInfo::new("a.py", "invalid syntax", 2, Some(10), "a = 1\nb = (\n");
        let mut from_info = capture();
        from_info.syntax_error_info(&info).unwrap();
        let mut from_parts = capture();
        from_parts
            .syntax_error("a.py", "invalid syntax", 2, Some(10), "a = 1\nb = (\n")
            .unwrap();
        assert_eq!(from_info.into_parts(), from_parts.into_parts());
    }

    #[test]
    fn malformed_syntax_error_writes_nothing() {
        let mut reporter = capture();
        let err = reporter
            .syntax_error("a.py", "invalid syntax", 1, Some(9), "x==")
            .unwrap_err();
        assert!(matches!(err, ReportError::OffsetOutOfRange { .. }));
        let err = reporter
            .syntax_error("a.py", "invalid syntax", 1, None, "")
            .unwrap_err();
        assert!(matches!(err, ReportError::EmptySource { .. }));
        assert_eq!(reporter.into_parts(), (String::new(), String::new()));
    }

    #[test]
    fn flake_goes_to_findings() {
        let mut reporter = capture();
        reporter.flake(&UndefinedName("foo")).unwrap();
        reporter.flake("already rendered").unwrap();
        let (out, err) = reporter.into_parts();
        assert_eq!(out, "a.py:3: undefined name 'foo'\nalready rendered\n");
        assert_eq!(err, "");
    }

    #[test]
    fn write_failure_surfaces_with_channel() {
        let mut reporter = Reporter::new(Flaky::new(0), String::new());
        let err = reporter.flake("lost").unwrap_err();
        assert!(matches!(
            err,
            ReportError::Write {
                channel: Channel::Findings,
                ..
            }
        ));
    }

    #[test]
    fn partial_write_is_not_masked() {
        let mut reporter = Reporter::new(String::new(), Flaky::new(2));
        let err = reporter
            .syntax_error("a.py", "invalid syntax", 1, Some(2), "x==")
            .unwrap_err();
        assert!(err.is_write_failure());
        let (_, errors) = reporter.into_parts();
        assert_eq!(errors.written, "a.py:1: invalid syntax\nx==");
    }

    #[test]
    fn borrowed_destinations() {
        let mut out = String::new();
        let mut err = String::new();
        {
            let mut reporter = Reporter::new(&mut out, &mut err);
            reporter.flake("f").unwrap();
            reporter.unexpected_error("g.py", "oops").unwrap();
        }
        assert_eq!(out, "f\n");
        assert_eq!(err, "g.py: oops\n");
    }

    #[test]
    fn stream_destinations() {
        let mut reporter = Reporter::new(Stream::new(Vec::new()), Stream::new(Vec::new()));
        reporter
            .syntax_error("a.py", "invalid syntax", 1, Some(0), "\u{3bb}=")
            .unwrap();
        let (out, err) = reporter.into_parts();
        assert!(out.into_inner().is_empty());
        assert_eq!(
            String::from_utf8(err.into_inner()).unwrap(),
            "a.py:1: invalid syntax\n\u{3bb}=\n ^\n"
        );
    }

    #[test]
    fn stdio_reporter_is_send() {
        fn assert_send<T: Send>(_: &T) {}
        assert_send(&Reporter::stdio());
    }
}
