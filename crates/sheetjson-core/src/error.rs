use thiserror::Error;

use crate::schema::BasicType;

/// The header rows do not describe a decodable sheet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("sheet has {rows} rows; need a comment row, a type row, a name row and at least one data row")]
    TooFewRows { rows: u32 },
    #[error("type token in row 2, column {column} is empty")]
    EmptyTypeToken { column: u32 },
    #[error("row 2, column 1 must be `array` or `object`, found `{marker}`")]
    UnknownDocumentType { marker: String },
    #[error("invalid type `{token}` in column {column}; expected `class` followed by a property count (e.g. `class2`)")]
    InvalidClassArity { column: u32, token: String },
    #[error("field name in row 3, column {column} is empty")]
    EmptyFieldName { column: u32 },
    #[error("no data rows found (column 1 is blank in every row from row 4 on)")]
    NoDataRows,
    #[error("column {column} is referenced by the structure in column {from}, but the sheet only has {last} columns")]
    ColumnOutOfRange { column: u32, from: u32, last: u32 },
    #[error("key column {column} must hold a basic type, found `{token}`")]
    NonScalarKey { column: u32, token: String },
}

/// A data cell does not match its declared type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("cannot convert `{text}` to {expected} [row {row}, column {column}]")]
    Parse {
        text: String,
        expected: BasicType,
        row: u32,
        column: u32,
    },
    #[error("unsupported data type `{token}` [row {row}, column {column}]")]
    UnsupportedType { token: String, row: u32, column: u32 },
}

/// Fatal error that aborts decoding of the current document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Value(#[from] ValueError),
}
