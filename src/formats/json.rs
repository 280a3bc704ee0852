use super::{FormatError, Result};
use crate::model::{Party, RawTable, RawValue};
use serde_json::{Map, Value};

fn to_raw(value: &Value) -> RawValue {
    match value {
        Value::Null => RawValue::Empty,
        Value::Bool(b) => RawValue::Bool(*b),
        Value::Number(n) => n.as_f64().map(RawValue::Number).unwrap_or(RawValue::Empty),
        Value::String(s) => RawValue::Text(s.clone()),
        other => RawValue::Text(other.to_string()),
    }
}

/// Array of `{column: value}` records; headers in first-seen order.
fn from_records(records: &[Value]) -> Result<RawTable> {
    let mut headers: Vec<String> = Vec::new();
    for record in records {
        let object = record.as_object().ok_or_else(|| {
            FormatError::UnrecognizedShape(format!("expected a record, found {}", record))
        })?;
        for key in object.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let mut table = RawTable::new(headers);
    for record in records {
        let object = record.as_object();
        let row = table
            .headers
            .iter()
            .map(|h| {
                object
                    .and_then(|o| o.get(h))
                    .map(to_raw)
                    .unwrap_or(RawValue::Empty)
            })
            .collect();
        table.push_row(row);
    }
    Ok(table)
}

/// Row labels of a column given as `{label: value}`. Integer labels are
/// ordered numerically so that `"10"` comes after `"2"`.
fn ordered_labels<'a>(columns: impl Iterator<Item = &'a Map<String, Value>>) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for column in columns {
        for key in column.keys() {
            if !labels.contains(key) {
                labels.push(key.clone());
            }
        }
    }
    if labels.iter().all(|l| l.parse::<i64>().is_ok()) {
        labels.sort_by_key(|l| l.parse::<i64>().unwrap_or(0));
    }
    labels
}

/// Object of columns: `{column: [values]}` or `{column: {label: value}}`.
fn from_columns(columns: &Map<String, Value>) -> Result<RawTable> {
    let headers: Vec<String> = columns.keys().cloned().collect();
    let mut table = RawTable::new(headers.clone());

    if columns.values().all(Value::is_array) {
        let len = columns
            .values()
            .filter_map(Value::as_array)
            .map(Vec::len)
            .max()
            .unwrap_or(0);
        for i in 0..len {
            let row = headers
                .iter()
                .map(|h| {
                    columns[h]
                        .as_array()
                        .and_then(|values| values.get(i))
                        .map(to_raw)
                        .unwrap_or(RawValue::Empty)
                })
                .collect();
            table.push_row(row);
        }
        return Ok(table);
    }

    if columns.values().all(Value::is_object) {
        let labels = ordered_labels(columns.values().filter_map(Value::as_object));
        for label in &labels {
            let row = headers
                .iter()
                .map(|h| {
                    columns[h]
                        .get(label)
                        .map(to_raw)
                        .unwrap_or(RawValue::Empty)
                })
                .collect();
            table.push_row(row);
        }
        return Ok(table);
    }

    Err(FormatError::UnrecognizedShape(
        "columns must all be arrays or all be objects".to_string(),
    ))
}

/// Parse any of the accepted JSON table shapes.
pub fn parse_json(input: &str) -> Result<RawTable> {
    let value: Value = serde_json::from_str(input)?;
    match &value {
        Value::Array(records) => from_records(records),
        Value::Object(object) => match object.get("data") {
            Some(Value::Array(records)) => from_records(records),
            _ => from_columns(object),
        },
        other => Err(FormatError::UnrecognizedShape(format!(
            "expected an array or object, found {}",
            other
        ))),
    }
}

/// JSON array of `{"Partido": .., "Votos": ..}` records.
pub fn to_json(parties: &[Party]) -> Result<String> {
    Ok(serde_json::to_string(parties)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizers::normalize;
    use pretty_assertions::assert_eq;

    fn expected() -> Vec<Party> {
        vec![Party::new("A", 10), Party::new("B", 5)]
    }

    #[test]
    fn array_of_records() {
        let table = parse_json(r#"[{"Partido":"A","Votos":10},{"Partido":"B","Votos":"5"}]"#)
            .unwrap();
        assert_eq!(normalize(&table), expected());
    }

    #[test]
    fn data_wrapper() {
        let table =
            parse_json(r#"{"data":[{"Partido":"A","Votos":10},{"Partido":"B","Votos":5}]}"#)
                .unwrap();
        assert_eq!(normalize(&table), expected());
    }

    #[test]
    fn column_arrays() {
        let table = parse_json(r#"{"Partido":["A","B"],"Votos":[10,5]}"#).unwrap();
        assert_eq!(normalize(&table), expected());
    }

    #[test]
    fn column_objects_keep_numeric_label_order() {
        let mut names = Vec::new();
        let mut votes = Vec::new();
        for i in 0..12 {
            names.push(format!(r#""{}":"P{}""#, i, i));
            votes.push(format!(r#""{}":{}"#, i, i));
        }
        let input = format!(
            r#"{{"Partido":{{{}}},"Votos":{{{}}}}}"#,
            names.join(","),
            votes.join(",")
        );
        let parties = normalize(&parse_json(&input).unwrap());
        assert_eq!(parties.len(), 12);
        assert_eq!(parties[2], Party::new("P2", 2));
        assert_eq!(parties[11], Party::new("P11", 11));
    }

    #[test]
    fn rejects_scalars() {
        assert!(matches!(
            parse_json("42"),
            Err(FormatError::UnrecognizedShape(_))
        ));
        assert!(matches!(
            parse_json(r#"{"Partido":"A","Votos":1}"#),
            Err(FormatError::UnrecognizedShape(_))
        ));
        assert!(matches!(parse_json("[1,2]"), Err(FormatError::UnrecognizedShape(_))));
    }

    #[test]
    fn writes_records_verbatim() {
        let json = to_json(&[Party::new("Perú", 3)]).unwrap();
        assert_eq!(json, r#"[{"Partido":"Perú","Votos":3}]"#);
    }
}
