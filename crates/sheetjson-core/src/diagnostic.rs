use std::fmt;

use crate::value::Key;

/// Advisory notice raised while decoding. Never aborts the document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// A basic-typed cell was blank; its field or element is left out.
    BlankCell { row: u32, column: u32 },
    /// A key appeared twice; the entry from `row` replaced the earlier one.
    ///
    /// `column` is the map's anchor column, or `2` for object documents.
    DuplicateKey { key: Key, row: u32, column: u32 },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::BlankCell { row, column } => {
                write!(f, "cell is blank [row {row}, column {column}]")
            }
            Diagnostic::DuplicateKey { key, row, column } => write!(
                f,
                "duplicate key `{key}` in row {row} overwrites the earlier entry [column {column}]"
            ),
        }
    }
}
