//! Column spans: how many consecutive columns a declared type occupies,
//! counting its own column and all nested structure.

use crate::error::SchemaError;
use crate::schema::{ColumnType, Schema};

/// Number of columns occupied by the type declared in `column`.
///
/// Depends on the schema only, never on row contents. Always `>= 1`.
pub fn width(schema: &Schema, column: u32) -> Result<u32, SchemaError> {
    width_from(schema, column, column)
}

fn width_from(schema: &Schema, column: u32, from: u32) -> Result<u32, SchemaError> {
    let declared = schema.column_for(column, from)?;
    match &declared.ty {
        ColumnType::Basic(_) | ColumnType::Unsupported(_) => Ok(1),
        ColumnType::Array => Ok(1 + width_from(schema, column + 1, column)?),
        ColumnType::Map => {
            let key = schema.column_for(column + 1, column)?;
            if !key.ty.is_scalar() {
                return Err(SchemaError::NonScalarKey {
                    column: column + 1,
                    token: key.raw_type.clone(),
                });
            }
            Ok(2 + width_from(schema, column + 2, column)?)
        }
        ColumnType::Class { properties } => {
            let mut total = 1;
            let mut property = column + 1;
            for _ in 0..*properties {
                let w = width_from(schema, property, column)?;
                total += w;
                property += w;
            }
            Ok(total)
        }
    }
}
