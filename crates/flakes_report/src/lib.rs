//! Plain-text reporting of lint findings, syntax errors and unexpected errors.
//!
//! A [`Reporter`] holds two [`Destination`]s: one for findings and one for
//! errors. It renders each event into newline-terminated text and writes it
//! to the matching destination. Syntax errors get the offending source line
//! and, when the column is known, a caret line beneath it.

#![warn(missing_docs)]

pub mod destination;
pub mod error;
pub mod finding;
pub mod reporter;
pub mod syntax_error;

pub use destination::{Destination, Stream};
pub use error::{Channel, ReportError, ReportResult};
pub use finding::RenderText;
pub use reporter::Reporter;
pub use syntax_error::{last_line, SyntaxErrorBlock, SyntaxErrorInfo};
