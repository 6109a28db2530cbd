use crate::domain::model::Document;
use crate::utils::error::{FirestoreConnError, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// REST API 回傳的原始文件格式
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawDocument {
    pub name: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
    pub create_time: Option<DateTime<Utc>>,
    pub update_time: Option<DateTime<Utc>>,
}

impl RawDocument {
    pub(crate) fn into_document(self) -> Result<Document> {
        let fields = decode_fields(&self.fields)?;
        Ok(Document {
            name: self.name,
            fields,
            create_time: self.create_time,
            update_time: self.update_time,
        })
    }
}

fn decode_error(message: String) -> FirestoreConnError {
    FirestoreConnError::DecodeError { message }
}

fn decode_fields(fields: &Map<String, Value>) -> Result<BTreeMap<String, Value>> {
    fields
        .iter()
        .map(|(name, value)| Ok((name.clone(), decode_value(value)?)))
        .collect()
}

/// 把 `{"integerValue": "42"}` 這類帶型別的值轉成一般 JSON
pub fn decode_value(value: &Value) -> Result<Value> {
    let obj = value
        .as_object()
        .ok_or_else(|| decode_error(format!("expected typed value object, got {}", value)))?;

    let (kind, inner) = obj
        .iter()
        .next()
        .ok_or_else(|| decode_error("empty value object".to_string()))?;

    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" => Ok(inner.clone()),
        "doubleValue" => decode_double(inner),
        // int64 在 JSON 中以字串傳送
        "integerValue" => {
            let n = match inner {
                Value::String(s) => s
                    .parse::<i64>()
                    .map_err(|e| decode_error(format!("bad integerValue '{}': {}", s, e)))?,
                Value::Number(n) => n
                    .as_i64()
                    .ok_or_else(|| decode_error(format!("bad integerValue {}", n)))?,
                other => return Err(decode_error(format!("bad integerValue {}", other))),
            };
            Ok(Value::from(n))
        }
        "stringValue" | "timestampValue" | "bytesValue" | "referenceValue" => Ok(inner.clone()),
        "geoPointValue" => Ok(serde_json::json!({
            "latitude": inner.get("latitude").cloned().unwrap_or(Value::from(0.0)),
            "longitude": inner.get("longitude").cloned().unwrap_or(Value::from(0.0)),
        })),
        "arrayValue" => {
            let values = match inner.get("values") {
                Some(Value::Array(items)) => items
                    .iter()
                    .map(decode_value)
                    .collect::<Result<Vec<_>>>()?,
                _ => Vec::new(),
            };
            Ok(Value::Array(values))
        }
        "mapValue" => {
            let decoded = match inner.get("fields") {
                Some(Value::Object(fields)) => decode_fields(fields)?,
                _ => BTreeMap::new(),
            };
            Ok(Value::Object(decoded.into_iter().collect()))
        }
        other => Err(decode_error(format!("unsupported value type '{}'", other))),
    }
}

/// double 通常是 JSON number；NaN 與 ±Infinity 以字串傳送。
/// JSON 無法表示這三個值，因此保留成 `"NaN"` / `"Infinity"` / `"-Infinity"` 字串，
/// 其他數字字串則轉回 number。
fn decode_double(inner: &Value) -> Result<Value> {
    match inner {
        Value::Number(_) => Ok(inner.clone()),
        Value::String(s) if matches!(s.as_str(), "NaN" | "Infinity" | "-Infinity") => {
            Ok(inner.clone())
        }
        Value::String(s) => {
            let n = s
                .parse::<f64>()
                .map_err(|e| decode_error(format!("bad doubleValue '{}': {}", s, e)))?;
            serde_json::Number::from_f64(n)
                .map(Value::Number)
                .ok_or_else(|| decode_error(format!("bad doubleValue '{}'", s)))
        }
        other => Err(decode_error(format!("bad doubleValue {}", other))),
    }
}
