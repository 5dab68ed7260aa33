//! Decoding of Firestore typed values into plain JSON.
//!
//! The REST API wraps every field in a type marker
//! (`{"stringValue": "x"}`, `{"mapValue": {"fields": {...}}}`, ...).
//! Extraction scans serialized payloads, so documents are flattened to
//! ordinary `serde_json::Value` trees first.

use serde_json::{Map, Value};

/// Decodes a document's `fields` map into a plain JSON object.
pub fn decode_fields(fields: &Map<String, Value>) -> Value {
    let mut out = Map::with_capacity(fields.len());
    for (key, value) in fields {
        out.insert(key.clone(), decode_value(value));
    }
    Value::Object(out)
}

/// Decodes one typed value. Unknown type markers decode to `null` rather
/// than failing, matching the best-effort posture of extraction.
pub fn decode_value(value: &Value) -> Value {
    let Some(obj) = value.as_object() else {
        return Value::Null;
    };

    if let Some(v) = obj.get("stringValue") {
        return v.clone();
    }
    if let Some(v) = obj.get("integerValue") {
        // 64-bit integers arrive as decimal strings.
        return v
            .as_str()
            .and_then(|s| s.parse::<i64>().ok())
            .map(Value::from)
            .unwrap_or_else(|| v.clone());
    }
    if let Some(v) = obj.get("doubleValue") {
        return v.clone();
    }
    if let Some(v) = obj.get("booleanValue") {
        return v.clone();
    }
    if obj.contains_key("nullValue") {
        return Value::Null;
    }
    if let Some(v) = obj.get("timestampValue") {
        return v.clone();
    }
    if let Some(v) = obj.get("referenceValue") {
        return v.clone();
    }
    if let Some(v) = obj.get("bytesValue") {
        return v.clone();
    }
    if let Some(v) = obj.get("geoPointValue") {
        return v.clone();
    }
    if let Some(map) = obj.get("mapValue") {
        return match map.get("fields").and_then(Value::as_object) {
            Some(fields) => decode_fields(fields),
            None => Value::Object(Map::new()),
        };
    }
    if let Some(arr) = obj.get("arrayValue") {
        let values = arr
            .get("values")
            .and_then(Value::as_array)
            .map(|vs| vs.iter().map(decode_value).collect())
            .unwrap_or_default();
        return Value::Array(values);
    }

    Value::Null
}
