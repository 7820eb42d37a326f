use indexmap::IndexMap;

use crate::decode::Decoder;
use crate::diagnostic::Diagnostic;
use crate::error::DecodeError;
use crate::grid::Grid;
use crate::schema::{DocumentKind, Schema};
use crate::value::Document;

/// Column holding the key of each entry in an object document.
const OBJECT_KEY_COLUMN: u32 = 2;

/// A decoded document together with the notices raised while building it.
#[derive(Clone, Debug, PartialEq)]
pub struct Decoded {
    pub document: Document,
    pub diagnostics: Vec<Diagnostic>,
}

/// Build the document for `grid` from its top-level data rows.
pub fn assemble<G: Grid + ?Sized>(grid: &G, schema: &Schema) -> Result<Decoded, DecodeError> {
    let mut decoder = Decoder::new(grid, schema);
    let first_field = schema.document_kind().first_field_column();

    let document = match schema.document_kind() {
        DocumentKind::Array => {
            let mut records = Vec::with_capacity(schema.data_rows().len());
            for &row in schema.data_rows() {
                let record = decoder.decode_record(first_field, row)?;
                if !record.is_empty() {
                    records.push(record);
                }
            }
            Document::Array(records)
        }
        DocumentKind::Object => {
            let mut table = IndexMap::new();
            for &row in schema.data_rows() {
                let Some(key) = decoder.decode_key(OBJECT_KEY_COLUMN, row)? else {
                    continue;
                };
                let record = decoder.decode_record(first_field, row)?;
                if record.is_empty() {
                    continue;
                }
                if table.contains_key(&key) {
                    decoder.report(Diagnostic::DuplicateKey {
                        key: key.clone(),
                        row,
                        column: OBJECT_KEY_COLUMN,
                    });
                }
                table.insert(key, record);
            }
            Document::Object(table)
        }
    };

    Ok(Decoded {
        document,
        diagnostics: decoder.into_diagnostics(),
    })
}
