use serde_json::{Map, Value};
use std::io::{self, Write};

/// Result fields that hold one record per row, such as per-lender quotes.
const RECORD_LISTS: &[&str] = &["quotes"];

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) -> Result<(), csv::Error> {
    write_csv(io::stdout().lock(), value)
}

fn write_csv<W: Write>(out: W, value: &Value) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(out);
    for row in rows(value) {
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Records become a header plus one row each; any other object becomes
/// `field,value` pairs. The `result` of an output envelope is unwrapped first.
fn rows(value: &Value) -> Vec<Vec<String>> {
    match value {
        Value::Object(map) => {
            let body = match map.get("result") {
                Some(Value::Object(result)) => result,
                _ => map,
            };
            match record_list(body) {
                Some(records) => record_rows(records),
                None => field_rows(body),
            }
        }
        Value::Array(arr) => record_rows(arr),
        _ => vec![vec![cell(value)]],
    }
}

fn record_list(body: &Map<String, Value>) -> Option<&[Value]> {
    RECORD_LISTS.iter().find_map(|key| match body.get(*key) {
        Some(Value::Array(items)) => Some(items.as_slice()),
        _ => None,
    })
}

fn field_rows(map: &Map<String, Value>) -> Vec<Vec<String>> {
    std::iter::once(vec!["field".to_string(), "value".to_string()])
        .chain(map.iter().map(|(key, val)| vec![key.clone(), cell(val)]))
        .collect()
}

fn record_rows(records: &[Value]) -> Vec<Vec<String>> {
    let Some(Value::Object(first)) = records.first() else {
        return records.iter().map(|item| vec![cell(item)]).collect();
    };

    // Columns follow the first record
    let headers: Vec<String> = first.keys().cloned().collect();
    let body = records.iter().filter_map(Value::as_object).map(|record| {
        headers
            .iter()
            .map(|h| record.get(h).map(cell).unwrap_or_default())
            .collect::<Vec<String>>()
    });
    std::iter::once(headers.clone()).chain(body).collect()
}

fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
