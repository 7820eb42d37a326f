//! Header rows → column schema.
//!
//! Sheet layout:
//! - row 1: free-form comment (ignored)
//! - row 2: column 1 holds the document marker (`array` / `object`), the other
//!   columns hold type tokens
//! - row 3: field names (blank for columns that only exist as structure)
//! - rows 4+: data; a non-blank column-1 cell starts a top-level entry

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::SchemaError;
use crate::grid::Grid;
use crate::span;

/// First row holding data.
pub const FIRST_DATA_ROW: u32 = 4;
const TYPE_ROW: u32 = 2;
const NAME_ROW: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicType {
    /// Integer unless the text contains a `.`, then floating point.
    Number,
    Int,
    Long,
    Float,
    Double,
    Bool,
    String,
}

impl BasicType {
    pub fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "number" => BasicType::Number,
            "int" | "integer" => BasicType::Int,
            "long" => BasicType::Long,
            "float" => BasicType::Float,
            "double" => BasicType::Double,
            "bool" | "boolean" => BasicType::Bool,
            "string" => BasicType::String,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BasicType::Number => "number",
            BasicType::Int => "integer",
            BasicType::Long => "long integer",
            BasicType::Float => "float",
            BasicType::Double => "double",
            BasicType::Bool => "boolean",
            BasicType::String => "string",
        }
    }
}

impl fmt::Display for BasicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoding rule declared by a type token.
///
/// Composite types only record their own shape; the element, key, value and
/// property types live in the columns to their right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    Basic(BasicType),
    /// A token outside every known family. Only an error once a non-blank
    /// cell has to be decoded with it.
    Unsupported(String),
    /// `arr*`: element type in `column + 1`.
    Array,
    /// `dict*`: key in `column + 1`, value type in `column + 2`.
    Map,
    /// `class<N>`: `N` properties laid out from `column + 1`.
    Class { properties: u32 },
}

impl ColumnType {
    /// Parse a raw type token. Matching is case-insensitive.
    pub fn parse(token: &str, column: u32) -> Result<Self, SchemaError> {
        static CLASS_RE: OnceLock<Regex> = OnceLock::new();

        let lower = token.trim().to_lowercase();
        if lower.starts_with("arr") {
            return Ok(ColumnType::Array);
        }
        if lower.starts_with("dict") {
            return Ok(ColumnType::Map);
        }
        if lower.starts_with("class") {
            let re = CLASS_RE.get_or_init(|| Regex::new(r"^class(\d+)$").expect("valid regex"));
            let invalid = || SchemaError::InvalidClassArity {
                column,
                token: token.trim().to_string(),
            };
            let caps = re.captures(&lower).ok_or_else(|| invalid())?;
            let properties = caps[1].parse::<u32>().map_err(|_| invalid())?;
            return Ok(ColumnType::Class { properties });
        }

        Ok(match BasicType::from_token(&lower) {
            Some(basic) => ColumnType::Basic(basic),
            None => ColumnType::Unsupported(lower),
        })
    }

    /// Whether the type occupies exactly one cell (usable as a key).
    pub fn is_scalar(&self) -> bool {
        matches!(self, ColumnType::Basic(_) | ColumnType::Unsupported(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub ty: ColumnType,
    /// Type token as written in row 2.
    pub raw_type: String,
    /// Field name from row 3, trimmed. May be empty.
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// One record per data row.
    Array,
    /// Records keyed by the value decoded from column 2.
    Object,
}

impl DocumentKind {
    fn parse(marker: &str) -> Result<Self, SchemaError> {
        match marker.trim().to_lowercase().as_str() {
            "array" => Ok(DocumentKind::Array),
            "object" => Ok(DocumentKind::Object),
            _ => Err(SchemaError::UnknownDocumentType {
                marker: marker.trim().to_string(),
            }),
        }
    }

    /// Whether every top-level field must be named. Array documents take
    /// names as written, blank included.
    pub fn requires_field_names(self) -> bool {
        self == DocumentKind::Object
    }

    /// First column holding record fields.
    pub fn first_field_column(self) -> u32 {
        match self {
            DocumentKind::Array => 2,
            DocumentKind::Object => 3,
        }
    }
}

/// Immutable description of one sheet, built once from its header rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    document: DocumentKind,
    columns: Vec<Column>,
    data_rows: Vec<u32>,
    last_row: u32,
}

impl Schema {
    /// Read the header rows of `grid` and locate its top-level data rows.
    pub fn read<G: Grid + ?Sized>(grid: &G) -> Result<Self, SchemaError> {
        let (last_row, last_col) = grid.dimensions();
        log::info!("sheet has {last_col} columns and {last_row} rows; delete empty trailing columns if decoding fails");

        if last_row < FIRST_DATA_ROW {
            return Err(SchemaError::TooFewRows { rows: last_row });
        }

        let mut columns = Vec::with_capacity(last_col as usize);
        for column in 1..=last_col {
            let raw_type = grid.cell_text(TYPE_ROW, column).trim().to_string();
            if raw_type.is_empty() {
                return Err(SchemaError::EmptyTypeToken { column });
            }
            // Column 1 holds the document marker; it is never decoded.
            let ty = if column == 1 {
                ColumnType::Unsupported(raw_type.to_lowercase())
            } else {
                ColumnType::parse(&raw_type, column)?
            };
            columns.push(Column {
                ty,
                raw_type,
                name: grid.cell_text(NAME_ROW, column).trim().to_string(),
            });
        }

        let data_rows: Vec<u32> = (FIRST_DATA_ROW..=last_row)
            .filter(|&row| !grid.is_blank(row, 1))
            .collect();
        if data_rows.is_empty() {
            return Err(SchemaError::NoDataRows);
        }

        let document = DocumentKind::parse(&grid.cell_text(TYPE_ROW, 1))?;

        let schema = Self {
            document,
            columns,
            data_rows,
            last_row,
        };
        schema.check_layout()?;
        Ok(schema)
    }

    pub fn document_kind(&self) -> DocumentKind {
        self.document
    }

    pub fn column_count(&self) -> u32 {
        self.columns.len() as u32
    }

    /// Column `column` (1-based), if it exists.
    pub fn column(&self, column: u32) -> Option<&Column> {
        column
            .checked_sub(1)
            .and_then(|idx| self.columns.get(idx as usize))
    }

    /// Rows with a non-blank marker in column 1, in sheet order.
    pub fn data_rows(&self) -> &[u32] {
        &self.data_rows
    }

    pub fn last_row(&self) -> u32 {
        self.last_row
    }

    /// Like [`Schema::column`], but reports which structure pointed past the
    /// last column.
    pub(crate) fn column_for(&self, column: u32, from: u32) -> Result<&Column, SchemaError> {
        self.column(column).ok_or(SchemaError::ColumnOutOfRange {
            column,
            from,
            last: self.column_count(),
        })
    }

    /// Walk the top-level field layout once so structural problems surface
    /// before any row is decoded.
    fn check_layout(&self) -> Result<(), SchemaError> {
        if self.document == DocumentKind::Object {
            let key = self.column_for(2, 1)?;
            if !key.ty.is_scalar() {
                return Err(SchemaError::NonScalarKey {
                    column: 2,
                    token: key.raw_type.clone(),
                });
            }
        }

        let mut column = self.document.first_field_column();
        while column <= self.column_count() {
            let field = self.column_for(column, column)?;
            if self.document.requires_field_names() && field.name.is_empty() {
                return Err(SchemaError::EmptyFieldName { column });
            }
            column += span::width(self, column)?;
        }
        Ok(())
    }
}
