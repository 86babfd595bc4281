//! The rendering capability the reporter needs from lint findings.

use std::fmt;

/// A finding that can render itself as a single line of text.
///
/// Every [`Display`](fmt::Display) type gets this for free, so analyzer
/// message types only need a `Display` impl. The reporter never looks past it.
pub trait RenderText {
    /// Returns the user-facing text of this finding, without a trailing newline.
    fn render_text(&self) -> String;
}

impl<T: fmt::Display + ?Sized> RenderText for T {
    fn render_text(&self) -> String {
        self.to_string()
    }
}
