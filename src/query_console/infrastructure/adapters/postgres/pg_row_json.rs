use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::Value;
use sqlx::{
    Column, Decode, Postgres, Row, Type, TypeInfo, ValueRef,
    postgres::{PgColumn, PgRow},
};
use uuid::Uuid;

use crate::query_console::domain::model::value_objects::column_descriptor::ColumnDescriptor;

pub fn describe_columns(columns: &[PgColumn]) -> Vec<ColumnDescriptor> {
    columns
        .iter()
        .map(|column| ColumnDescriptor {
            name: column.name().to_string(),
            data_type: column.type_info().name().to_lowercase(),
        })
        .collect()
}

pub fn row_to_values(row: &PgRow) -> Vec<Value> {
    (0..row.len()).map(|index| column_value(row, index)).collect()
}

fn column_value(row: &PgRow, index: usize) -> Value {
    match row.try_get_raw(index) {
        Ok(raw) if !raw.is_null() => {}
        _ => return Value::Null,
    }

    let type_name = row.column(index).type_info().name().to_string();

    let value = match type_name.as_str() {
        "BOOL" => decode::<bool>(row, index).map(Value::Bool),
        "INT2" => decode::<i16>(row, index).map(Value::from),
        "INT4" => decode::<i32>(row, index).map(Value::from),
        "INT8" => decode::<i64>(row, index).map(Value::from),
        "FLOAT4" => decode::<f32>(row, index).map(|v| Value::from(f64::from(v))),
        "FLOAT8" => decode::<f64>(row, index).map(Value::from),
        "NUMERIC" => decode::<BigDecimal>(row, index).map(|v| Value::String(v.to_string())),
        "JSON" | "JSONB" => decode::<Value>(row, index),
        "UUID" => decode::<Uuid>(row, index).map(|v| Value::String(v.to_string())),
        "TIMESTAMPTZ" => decode::<DateTime<Utc>>(row, index).map(|v| Value::String(v.to_rfc3339())),
        "TIMESTAMP" => decode::<NaiveDateTime>(row, index)
            .map(|v| Value::String(v.format("%Y-%m-%dT%H:%M:%S%.f").to_string())),
        "DATE" => decode::<NaiveDate>(row, index).map(|v| Value::String(v.to_string())),
        "TIME" => decode::<NaiveTime>(row, index).map(|v| Value::String(v.to_string())),
        "BYTEA" => decode::<Vec<u8>>(row, index).map(|bytes| Value::String(hex_bytes(&bytes))),
        "TEXT[]" | "VARCHAR[]" => decode::<Vec<String>>(row, index).map(Value::from),
        "INT4[]" => decode::<Vec<i32>>(row, index).map(Value::from),
        "INT8[]" => decode::<Vec<i64>>(row, index).map(Value::from),
        "BOOL[]" => decode::<Vec<bool>>(row, index).map(Value::from),
        _ => decode::<String>(row, index).map(Value::String),
    };

    value.unwrap_or(Value::Null)
}

fn decode<'r, T>(row: &'r PgRow, index: usize) -> Option<T>
where
    T: Decode<'r, Postgres> + Type<Postgres>,
{
    row.try_get::<T, _>(index).ok()
}

fn hex_bytes(bytes: &[u8]) -> String {
    let mut encoded = String::with_capacity(2 + bytes.len() * 2);
    encoded.push_str("\\x");
    for byte in bytes {
        encoded.push_str(&format!("{byte:02x}"));
    }
    encoded
}
