//! The two strings a UI renders after every command.

use serde::Serialize;

/// Rendered engine output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// The current operand, or the error marker.
    pub display: String,
    /// The expression history, or the error message.
    pub trail: String,
    /// Whether the engine is in the error state.
    pub is_error: bool,
}

impl Snapshot {
    /// Text for the result line: `= <display>`, or `! <display>` on error.
    pub fn result_line(&self) -> String {
        let marker = if self.is_error { '!' } else { '=' };
        format!("{} {}", marker, self.display)
    }
}
