//! Error and result types for the reporter.

use std::fmt;

/// The result type returned by every reporting operation.
pub type ReportResult<T> = Result<T, ReportError>;

/// Which of the reporter's two destinations a write was aimed at.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Channel {
    /// The destination receiving lint findings (conventionally standard output).
    Findings,
    /// The destination receiving unexpected and syntax errors (conventionally standard error).
    Errors,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Findings => write!(f, "findings"),
            Channel::Errors => write!(f, "error"),
        }
    }
}

/// Errors surfaced by a [`Reporter`](crate::Reporter) call.
///
/// Write failures are passed through untouched; the reporter never retries.
/// The two malformed-input variants are raised before anything is written,
/// so a rejected syntax error leaves the error destination untouched.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The destination rejected a write.
    #[error("failed to write to {channel} destination: {source}")]
    Write {
        /// The destination that failed.
        channel: Channel,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A syntax error arrived without any source text to display.
    #[error("syntax error in {filename} has no source text to display")]
    EmptySource {
        /// The file the syntax error belongs to.
        filename: String,
    },

    /// A column offset does not land on the displayed source line after rebasing.
    #[error("column offset {offset} in {filename} is outside the displayed line of {line_len} characters")]
    OffsetOutOfRange {
        /// The file the syntax error belongs to.
        filename: String,
        /// The offset as supplied, measured against the full source text.
        offset: usize,
        /// Length of the displayed line in characters.
        line_len: usize,
    },
}

impl ReportError {
    /// Returns `true` if the error came from a destination rather than from the input.
    pub fn is_write_failure(&self) -> bool {
        matches!(self, ReportError::Write { .. })
    }
}
