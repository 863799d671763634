use serde_json::{Map, Value};
use std::io::{self, Write};

use super::{format_cell, row_sets, scalar_fields};

/// Write output as CSV to stdout.
///
/// Results carrying rows (a schedule) print one record per row; anything
/// else prints two-column `field,value` records.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_csv(stdout.lock(), value) {
        eprintln!("CSV output error: {}", e);
    }
}

fn write_csv<W: Write>(writer: W, value: &Value) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);

    match value {
        Value::Object(map) => {
            let body = match map.get("result") {
                Some(Value::Object(result)) => result,
                _ => map,
            };
            match row_sets(body).first() {
                Some((_, rows)) => write_rows(&mut wtr, rows)?,
                None => write_fields(&mut wtr, body)?,
            }
        }
        Value::Array(arr) => write_rows(&mut wtr, arr)?,
        _ => wtr.write_record([format_cell(value)])?,
    }

    wtr.flush()?;
    Ok(())
}

fn write_fields<W: Write>(
    wtr: &mut csv::Writer<W>,
    map: &Map<String, Value>,
) -> Result<(), csv::Error> {
    wtr.write_record(["field", "value"])?;
    for (key, val) in scalar_fields(map) {
        wtr.write_record([key, format_cell(&val)])?;
    }
    Ok(())
}

fn write_rows<W: Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> Result<(), csv::Error> {
    let Some(Value::Object(first)) = rows.first() else {
        for item in rows {
            wtr.write_record([format_cell(item)])?;
        }
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    wtr.write_record(&headers)?;

    for map in rows.iter().filter_map(Value::as_object) {
        let row: Vec<String> = headers
            .iter()
            .map(|h| map.get(*h).map(format_cell).unwrap_or_default())
            .collect();
        wtr.write_record(&row)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: &Value) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, value).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_emi_result_is_field_value_pairs() {
        let v = json!({"result": {"duration_months": 10, "monthly_installment": "4000"}, "warnings": []});
        assert_eq!(
            render(&v),
            "field,value\nduration_months,10\nmonthly_installment,4000\n"
        );
    }

    #[test]
    fn test_schedule_result_is_one_row_per_month() {
        let v = json!({"result": {
            "entries": [
                {"month": 1, "remaining_balance": "20"},
                {"month": 2, "remaining_balance": "0"}
            ],
            "loan": {"monthly_installment": "20"}
        }});
        assert_eq!(render(&v), "month,remaining_balance\n1,20\n2,0\n");
    }
}
