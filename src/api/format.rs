use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::{json, Value};
use sqlx::mysql::MySqlRow;
use sqlx::types::BigDecimal;
use sqlx::{Column, Row, TypeInfo, ValueRef};

/// RFC 1123 date as emitted for DATETIME/TIMESTAMP/DATE columns
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Convert a result row into a JSON array, one element per column, in
/// column order. Undecodable values degrade to text, then to null.
pub fn row_to_values(row: &MySqlRow) -> Vec<Value> {
    row.columns()
        .iter()
        .map(|column| {
            let index = column.ordinal();
            match row.try_get_raw(index) {
                Ok(raw) if raw.is_null() => Value::Null,
                Ok(_) => decode_column(row, index, column.type_info().name()),
                Err(_) => Value::Null,
            }
        })
        .collect()
}

fn decode_column(row: &MySqlRow, index: usize, type_name: &str) -> Value {
    let decoded = match type_name {
        "BOOLEAN" | "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => row
            .try_get::<i64, _>(index)
            .map(Value::from)
            .or_else(|_| row.try_get::<u64, _>(index).map(Value::from))
            .ok(),
        name if name.ends_with("UNSIGNED") => row.try_get::<u64, _>(index).ok().map(Value::from),
        "FLOAT" => row.try_get::<f32, _>(index).ok().map(|f| float_value(f as f64)),
        "DOUBLE" => row.try_get::<f64, _>(index).ok().map(float_value),
        "DECIMAL" => row
            .try_get::<BigDecimal, _>(index)
            .ok()
            .map(|d| Value::String(d.to_string())),
        "DATETIME" | "TIMESTAMP" => row
            .try_get::<NaiveDateTime, _>(index)
            .ok()
            .map(|dt| Value::String(http_date(dt))),
        "DATE" => row
            .try_get::<NaiveDate, _>(index)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| Value::String(http_date(dt))),
        "TIME" => row
            .try_get::<NaiveTime, _>(index)
            .ok()
            .map(|t| Value::String(t.format("%H:%M:%S").to_string())),
        "JSON" => row.try_get::<Value, _>(index).ok(),
        _ => None,
    };

    decoded.unwrap_or_else(|| decode_fallback(row, index))
}

fn decode_fallback(row: &MySqlRow, index: usize) -> Value {
    if let Ok(text) = row.try_get::<String, _>(index) {
        return Value::String(text);
    }
    if let Ok(bytes) = row.try_get::<Vec<u8>, _>(index) {
        return Value::String(String::from_utf8_lossy(&bytes).into_owned());
    }
    tracing::warn!("Column {} could not be decoded; returning null", index);
    Value::Null
}

fn float_value(f: f64) -> Value {
    if f.is_finite() {
        json!(f)
    } else {
        Value::Null
    }
}

pub fn http_date(dt: NaiveDateTime) -> String {
    dt.format(HTTP_DATE_FORMAT).to_string()
}
