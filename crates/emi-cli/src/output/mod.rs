pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}

/// Scalar fields of a result object, with nested objects flattened to
/// `parent.child` keys. Arrays of rows are left to `row_sets`.
pub(crate) fn scalar_fields(map: &Map<String, Value>) -> Vec<(String, Value)> {
    let mut fields = Vec::new();
    collect_scalars("", map, &mut fields);
    fields
}

fn collect_scalars(prefix: &str, map: &Map<String, Value>, out: &mut Vec<(String, Value)>) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match val {
            Value::Object(inner) => collect_scalars(&name, inner, out),
            Value::Array(arr) if is_row_set(arr) => {}
            _ => out.push((name, val.clone())),
        }
    }
}

/// Arrays of objects inside a result object (e.g. schedule entries).
pub(crate) fn row_sets(map: &Map<String, Value>) -> Vec<(&str, &[Value])> {
    map.iter()
        .filter_map(|(key, val)| match val {
            Value::Array(arr) if is_row_set(arr) => Some((key.as_str(), arr.as_slice())),
            _ => None,
        })
        .collect()
}

fn is_row_set(arr: &[Value]) -> bool {
    matches!(arr.first(), Some(Value::Object(_)))
}

/// Render a scalar for table or csv cells.
pub(crate) fn format_cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_cell).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
