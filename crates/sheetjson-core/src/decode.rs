//! Recursive cell-range → [`Value`] decoding.

use crate::diagnostic::Diagnostic;
use crate::error::{DecodeError, SchemaError, ValueError};
use crate::grid::Grid;
use crate::group::resolve_group;
use crate::schema::{BasicType, ColumnType, Schema};
use crate::span::width;
use crate::value::{Key, Record, Table, Value};

/// Decodes values of one sheet.
///
/// The grid and schema are only read; the decoder's own state is the list of
/// diagnostics collected so far.
pub struct Decoder<'a, G: Grid + ?Sized> {
    grid: &'a G,
    schema: &'a Schema,
    diagnostics: Vec<Diagnostic>,
}

impl<'a, G: Grid + ?Sized> Decoder<'a, G> {
    pub fn new(grid: &'a G, schema: &'a Schema) -> Self {
        Self {
            grid,
            schema,
            diagnostics: Vec::new(),
        }
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Decode the type declared in `column` at `row`.
    ///
    /// Returns the value (`None` when absent) and the number of columns the
    /// type occupies.
    pub fn decode(&mut self, column: u32, row: u32) -> Result<(Option<Value>, u32), DecodeError> {
        let schema = self.schema;
        let declared = schema.column_for(column, column)?;
        match &declared.ty {
            ColumnType::Basic(basic) => Ok((self.decode_basic(Some(*basic), column, row)?, 1)),
            ColumnType::Unsupported(_) => Ok((self.decode_basic(None, column, row)?, 1)),
            ColumnType::Array => {
                let value = self.decode_array(column, row)?;
                Ok((value, width(schema, column)?))
            }
            ColumnType::Map => {
                let value = self.decode_map(column, row)?;
                Ok((value, width(schema, column)?))
            }
            ColumnType::Class { properties } => {
                let (value, used) = self.decode_class(*properties, column, row)?;
                Ok((value, used))
            }
        }
    }

    /// Decode `column` at `row` as a key. Only scalar columns can be keys.
    pub fn decode_key(&mut self, column: u32, row: u32) -> Result<Option<Key>, DecodeError> {
        let (value, _) = self.decode(column, row)?;
        match value {
            None => Ok(None),
            Some(value) => match Key::from_value(value) {
                Some(key) => Ok(Some(key)),
                None => {
                    let declared = self.schema.column_for(column, column)?;
                    Err(SchemaError::NonScalarKey {
                        column,
                        token: declared.raw_type.clone(),
                    }
                    .into())
                }
            },
        }
    }

    /// Decode fields from `start` through the last column into a record.
    ///
    /// Object documents require every field column to be named.
    pub fn decode_record(&mut self, start: u32, row: u32) -> Result<Record, DecodeError> {
        let schema = self.schema;
        let mut record = Record::new();
        let mut column = start;
        while column <= schema.column_count() {
            let name = if schema.document_kind().requires_field_names() {
                self.field_name(column)?
            } else {
                schema.column_for(column, column)?.name.clone()
            };
            let (value, used) = self.decode(column, row)?;
            if let Some(value) = value {
                record.insert(name, value);
            }
            column += used;
        }
        Ok(record)
    }

    fn field_name(&self, column: u32) -> Result<String, SchemaError> {
        let declared = self.schema.column_for(column, column)?;
        if declared.name.is_empty() {
            return Err(SchemaError::EmptyFieldName { column });
        }
        Ok(declared.name.clone())
    }

    fn decode_basic(
        &mut self,
        basic: Option<BasicType>,
        column: u32,
        row: u32,
    ) -> Result<Option<Value>, ValueError> {
        let grid = self.grid;
        let text = grid.cell_text(row, column);
        if text.trim().is_empty() {
            self.report(Diagnostic::BlankCell { row, column });
            return Ok(None);
        }

        let Some(basic) = basic else {
            let token = self
                .schema
                .column(column)
                .map(|declared| declared.raw_type.clone())
                .unwrap_or_default();
            return Err(ValueError::UnsupportedType { token, row, column });
        };

        parse_basic(basic, &text, row, column).map(Some)
    }

    fn decode_array(&mut self, column: u32, row: u32) -> Result<Option<Value>, DecodeError> {
        let mut items = Vec::new();
        for element_row in resolve_group(self.grid, row, column) {
            let (value, _) = self.decode(column + 1, element_row)?;
            if let Some(value) = value {
                items.push(value);
            }
        }
        Ok((!items.is_empty()).then_some(Value::Sequence(items)))
    }

    fn decode_map(&mut self, column: u32, row: u32) -> Result<Option<Value>, DecodeError> {
        let mut table = Table::new();
        for entry_row in resolve_group(self.grid, row, column) {
            let Some(key) = self.decode_key(column + 1, entry_row)? else {
                continue;
            };
            let (value, _) = self.decode(column + 2, entry_row)?;
            let Some(value) = value else {
                continue;
            };
            if table.contains_key(&key) {
                self.report(Diagnostic::DuplicateKey {
                    key: key.clone(),
                    row: entry_row,
                    column,
                });
            }
            table.insert(key, value);
        }
        Ok((!table.is_empty()).then_some(Value::Table(table)))
    }

    fn decode_class(
        &mut self,
        properties: u32,
        column: u32,
        row: u32,
    ) -> Result<(Option<Value>, u32), DecodeError> {
        let mut record = Record::new();
        let mut property = column + 1;
        for _ in 0..properties {
            // Property columns must exist before their names are checked.
            self.schema.column_for(property, column)?;
            let name = self.field_name(property)?;
            let (value, used) = self.decode(property, row)?;
            if let Some(value) = value {
                record.insert(name, value);
            }
            property += used;
        }
        let used = property - column;
        Ok(((!record.is_empty()).then_some(Value::Record(record)), used))
    }

    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        log::debug!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }
}

/// Parse non-blank cell text as `basic`.
pub fn parse_basic(basic: BasicType, text: &str, row: u32, column: u32) -> Result<Value, ValueError> {
    let fail = || ValueError::Parse {
        text: text.to_string(),
        expected: basic,
        row,
        column,
    };

    match basic {
        BasicType::Number if text.contains('.') => parse_float(text).ok_or_else(fail),
        BasicType::Number | BasicType::Int | BasicType::Long => {
            text.trim().parse::<i64>().map(Value::Int).map_err(|_| fail())
        }
        BasicType::Float | BasicType::Double => parse_float(text).ok_or_else(fail),
        BasicType::Bool => match text.trim().to_lowercase().as_str() {
            "1" | "t" | "true" => Ok(Value::Bool(true)),
            "0" | "f" | "false" => Ok(Value::Bool(false)),
            _ => Err(fail()),
        },
        BasicType::String => Ok(Value::Text(text.to_string())),
    }
}

fn parse_float(text: &str) -> Option<Value> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Value::Float)
}
