use proptest::prelude::*;
use sheetjson_core::group::resolve_group;
use sheetjson_core::span::width;
use sheetjson_core::{ColumnType, DocumentKind, Schema, SchemaError, TextGrid};

fn grid(rows: &[&[&str]]) -> TextGrid {
    TextGrid::from_rows(rows.iter().map(|row| row.iter().copied()))
}

/// Array-document schema whose columns 2.. carry `tokens`, every column named.
fn schema_with(tokens: &[&str]) -> Schema {
    let mut sheet = TextGrid::new();
    sheet.set(2, 1, "array");
    sheet.set(4, 1, "1");
    for (idx, token) in tokens.iter().enumerate() {
        let column = idx as u32 + 2;
        sheet.set(2, column, *token);
        sheet.set(3, column, format!("f{column}"));
    }
    Schema::read(&sheet).expect("schema")
}

#[test]
fn reads_header_rows_and_data_rows() {
    let sheet = grid(&[
        &["comment"],
        &["Object", "string", "Class2", "int", "dict"],
        &["", "id", "pos", "x", "y"],
        &["1", "a"],
        &[""],
        &["2", "b"],
        &[" "],
    ]);

    // `dict` is the last column, so the layout check needs its key column.
    assert_eq!(
        Schema::read(&sheet),
        Err(SchemaError::ColumnOutOfRange {
            column: 6,
            from: 5,
            last: 5,
        })
    );

    let sheet = grid(&[
        &["comment"],
        &["Object", "string", "Class2", "int", "long"],
        &["", "id", "pos", "x", "y"],
        &["1", "a"],
        &[""],
        &["2", "b"],
        &[" "],
    ]);
    let schema = Schema::read(&sheet).expect("schema");
    assert_eq!(schema.document_kind(), DocumentKind::Object);
    assert_eq!(schema.column_count(), 5);
    assert_eq!(schema.data_rows(), &[4, 6]);
    assert_eq!(schema.last_row(), 7);
    let pos = schema.column(3).expect("column 3");
    assert_eq!(pos.ty, ColumnType::Class { properties: 2 });
    assert_eq!(pos.raw_type, "Class2");
    assert_eq!(pos.name, "pos");
    assert!(schema.column(6).is_none());
    assert!(schema.column(0).is_none());
}

#[test]
fn too_few_rows() {
    let sheet = grid(&[&[""], &["array", "int"], &["", "id"]]);
    assert_eq!(Schema::read(&sheet), Err(SchemaError::TooFewRows { rows: 3 }));
}

#[test]
fn empty_type_token() {
    let sheet = grid(&[&[""], &["array", "int", " "], &["", "id", "x"], &["1"]]);
    assert_eq!(
        Schema::read(&sheet),
        Err(SchemaError::EmptyTypeToken { column: 3 })
    );
}

#[test]
fn no_data_rows() {
    let sheet = grid(&[&[""], &["array", "int"], &["", "id"], &["", "5"]]);
    assert_eq!(Schema::read(&sheet), Err(SchemaError::NoDataRows));
}

#[test]
fn unknown_document_marker() {
    let sheet = grid(&[&[""], &["list", "int"], &["", "id"], &["1", "5"]]);
    assert_eq!(
        Schema::read(&sheet),
        Err(SchemaError::UnknownDocumentType {
            marker: "list".to_string()
        })
    );
}

#[test]
fn class_arity_must_be_numeric() {
    let sheet = grid(&[&[""], &["array", "classA", "int"], &["", "c", "x"], &["1"]]);
    assert_eq!(
        Schema::read(&sheet),
        Err(SchemaError::InvalidClassArity {
            column: 2,
            token: "classA".to_string(),
        })
    );
}

#[test]
fn object_fields_need_names() {
    let sheet = grid(&[
        &[""],
        &["object", "int", "int", "int"],
        &["", "id", "x", ""],
        &["1"],
    ]);
    assert_eq!(
        Schema::read(&sheet),
        Err(SchemaError::EmptyFieldName { column: 4 })
    );
}

#[test]
fn array_fields_may_be_unnamed() {
    let sheet = grid(&[&[""], &["array", "int", "int"], &["", "id", ""], &["1"]]);
    let schema = Schema::read(&sheet).expect("schema");
    assert_eq!(schema.column(3).expect("column 3").name, "");
}

#[test]
fn array_in_last_column_runs_out_of_columns() {
    let sheet = grid(&[&[""], &["array", "int", "array"], &["", "id", "tags"], &["1"]]);
    assert_eq!(
        Schema::read(&sheet),
        Err(SchemaError::ColumnOutOfRange {
            column: 4,
            from: 3,
            last: 3,
        })
    );
}

#[test]
fn object_key_and_map_keys_must_be_basic() {
    let sheet = grid(&[
        &[""],
        &["object", "array", "int", "string"],
        &["", "k", "", "v"],
        &["1"],
    ]);
    assert_eq!(
        Schema::read(&sheet),
        Err(SchemaError::NonScalarKey {
            column: 2,
            token: "array".to_string(),
        })
    );

    let sheet = grid(&[
        &[""],
        &["array", "dict", "class1", "int", "int"],
        &["", "m", "", "x", ""],
        &["1"],
    ]);
    assert_eq!(
        Schema::read(&sheet),
        Err(SchemaError::NonScalarKey {
            column: 3,
            token: "class1".to_string(),
        })
    );
}

#[test]
fn composite_widths() {
    let schema = schema_with(&["int"]);
    assert_eq!(width(&schema, 2), Ok(1));

    let schema = schema_with(&["array", "int"]);
    assert_eq!(width(&schema, 2), Ok(2));

    let schema = schema_with(&["dict", "string", "int"]);
    assert_eq!(width(&schema, 2), Ok(3));

    let schema = schema_with(&["class2", "int", "string"]);
    assert_eq!(width(&schema, 2), Ok(3));

    // class2 { array<dict<string, int>>, bool } then a trailing basic.
    let schema = schema_with(&["class2", "array", "dict", "string", "int", "bool", "int"]);
    assert_eq!(width(&schema, 2), Ok(6));
    assert_eq!(width(&schema, 3), Ok(4));
    assert_eq!(width(&schema, 8), Ok(1));
}

#[test]
fn class_zero_is_a_single_column() {
    let schema = schema_with(&["class0", "int"]);
    assert_eq!(width(&schema, 2), Ok(1));
}

const BASICS: [&str; 9] = [
    "int", "integer", "long", "float", "double", "number", "bool", "boolean", "string",
];

proptest! {
    #[test]
    fn every_basic_token_spans_one_column(idx in 0usize..BASICS.len(), upper in any::<bool>()) {
        let token = if upper { BASICS[idx].to_uppercase() } else { BASICS[idx].to_string() };
        let schema = schema_with(&[token.as_str()]);
        prop_assert_eq!(width(&schema, 2), Ok(1));
    }

    #[test]
    fn nested_arrays_add_one_column_per_level(depth in 0usize..8, leaf in 0usize..BASICS.len()) {
        let mut tokens = vec!["array"; depth];
        tokens.push(BASICS[leaf]);
        let schema = schema_with(&tokens);
        prop_assert_eq!(width(&schema, 2), Ok(depth as u32 + 1));
    }

    #[test]
    fn nested_maps_add_two_columns_per_level(depth in 0usize..6) {
        let mut tokens = Vec::new();
        for _ in 0..depth {
            tokens.push("dict");
            tokens.push("string");
        }
        tokens.push("int");
        let schema = schema_with(&tokens);
        prop_assert_eq!(width(&schema, 2), Ok(2 * depth as u32 + 1));
    }

    #[test]
    fn class_of_basics_spans_arity_plus_one(arity in 0usize..10) {
        let class = format!("class{arity}");
        let mut tokens = vec![class.as_str()];
        tokens.extend(std::iter::repeat("string").take(arity));
        let schema = schema_with(&tokens);
        prop_assert_eq!(width(&schema, 2), Ok(arity as u32 + 1));
    }

    #[test]
    fn group_never_contains_blank_rows_or_a_second_sentinel(
        cells in proptest::collection::vec(prop_oneof![Just(""), Just("1"), Just("2"), Just("x")], 1..20)
    ) {
        let sheet = TextGrid::from_rows(cells.iter().map(|cell| vec![*cell]));
        let rows = resolve_group(&sheet, 1, 1);

        if cells[0].is_empty() {
            prop_assert!(rows.is_empty());
        }
        let sentinels = rows.iter().filter(|&&row| cells[row as usize - 1] == "1").count();
        prop_assert!(sentinels <= 1);
        for window in rows.windows(2) {
            prop_assert!(window[0] < window[1]);
        }
        for &row in &rows {
            prop_assert!(!cells[row as usize - 1].is_empty());
        }
    }
}
