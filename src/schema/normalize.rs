//! Schema payload normalization
//!
//! Hosts supply schema data in one of four shapes: `{tables: [...]}`, a
//! single table as `{columns: [...]}`, a bare array of table descriptors,
//! or nothing at all. Normalization never fails: unrecognized input
//! degrades to an empty table list, which the shell renders as "No schema".

use serde_json::Value;

use super::{Column, Table};

/// Name given to tables whose descriptor carries no usable `name` field.
const PLACEHOLDER_TABLE_NAME: &str = "table";

/// The recognized top-level payload shapes, checked in priority order.
enum RawSchema<'a> {
    /// `{ "tables": [...] }`
    Tagged(&'a [Value]),
    /// `{ "columns": [...] }` without a `tables` field: one anonymous table
    SingleTable(&'a [Value]),
    /// bare `[...]` of table descriptors
    Bare(&'a [Value]),
    /// anything else, including null
    Empty,
}

fn classify(value: &Value) -> RawSchema<'_> {
    if let Some(obj) = value.as_object() {
        match obj.get("tables") {
            Some(Value::Array(tables)) => return RawSchema::Tagged(tables),
            // A `tables` field of the wrong shape disqualifies the payload
            // rather than falling through to the `columns` interpretation.
            Some(_) => return RawSchema::Empty,
            None => {}
        }
        if let Some(Value::Array(columns)) = obj.get("columns") {
            return RawSchema::SingleTable(columns);
        }
        return RawSchema::Empty;
    }
    if let Some(list) = value.as_array() {
        return RawSchema::Bare(list);
    }
    RawSchema::Empty
}

/// Normalize a raw schema payload into the canonical table list.
pub fn normalize(value: &Value) -> Vec<Table> {
    match classify(value) {
        RawSchema::Tagged(list) | RawSchema::Bare(list) => {
            list.iter().map(table_from_value).collect()
        }
        RawSchema::SingleTable(columns) => vec![Table {
            name: PLACEHOLDER_TABLE_NAME.to_string(),
            columns: Some(columns.iter().map(column_from_value).collect()),
        }],
        RawSchema::Empty => Vec::new(),
    }
}

/// Normalize a schema supplied as JSON text. Parse failure is treated the
/// same as a missing schema.
pub fn normalize_str(text: &str) -> Vec<Table> {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => normalize(&value),
        Err(_) => Vec::new(),
    }
}

fn table_from_value(value: &Value) -> Table {
    let name = value
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or(PLACEHOLDER_TABLE_NAME)
        .to_string();
    let columns = value
        .get("columns")
        .and_then(Value::as_array)
        .map(|cols| cols.iter().map(column_from_value).collect());
    Table { name, columns }
}

fn column_from_value(value: &Value) -> Column {
    if let Some(name) = value.get("name").and_then(Value::as_str) {
        let ty = value
            .get("type")
            .and_then(Value::as_str)
            .or_else(|| value.get("dataType").and_then(Value::as_str))
            .map(str::to_string);
        return Column {
            name: name.to_string(),
            ty,
        };
    }
    // No usable name field: the element itself names the column.
    Column {
        name: display_string(value),
        ty: None,
    }
}

fn display_string(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}
