//! `sheetjson-core` turns a spreadsheet whose header rows declare a per-column
//! type schema into a nested document (array of records, or records keyed by
//! a value).
//!
//! The crate works on any [`Grid`] (1-indexed cell text + dimensions), so
//! workbook readers and tests share one decoder:
//! - [`Schema::read`] parses the header rows once
//! - [`span::width`] computes how many columns a declared type occupies
//! - [`group::resolve_group`] finds the rows of a repeated array/map group
//! - [`Decoder`] turns cells into [`Value`]s
//! - [`assemble`] builds the final [`Document`]
//!
//! Fatal problems are returned as [`DecodeError`]; advisory notices (blank
//! cells, duplicate keys) are returned as [`Diagnostic`]s next to the document.

mod assemble;
mod decode;
mod diagnostic;
mod error;
mod grid;
pub mod group;
mod schema;
pub mod span;
mod value;

pub use assemble::{assemble, Decoded};
pub use decode::{parse_basic, Decoder};
pub use diagnostic::Diagnostic;
pub use error::{DecodeError, SchemaError, ValueError};
pub use grid::{Grid, TextGrid};
pub use schema::{BasicType, Column, ColumnType, DocumentKind, Schema, FIRST_DATA_ROW};
pub use value::{Document, Key, Record, Table, Value};

/// Read the schema of `grid` and decode its document.
pub fn decode_sheet<G: Grid + ?Sized>(grid: &G) -> Result<Decoded, DecodeError> {
    let schema = Schema::read(grid)?;
    assemble(grid, &schema)
}
