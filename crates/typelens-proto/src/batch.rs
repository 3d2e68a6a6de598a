use std::collections::HashSet;

use serde_json::Value;

use crate::TypeData;

/// Decode a list of snapshots, dropping malformed items.
///
/// `null` decodes to an empty batch. A payload that is not an array at all
/// yields an empty batch as well, with a warning.
pub fn decode_type_batch(value: Value) -> Vec<TypeData> {
    let items = match value {
        Value::Array(items) => items,
        Value::Null => return Vec::new(),
        other => {
            tracing::warn!(
                target: "typelens.proto",
                found = json_type_name(&other),
                "expected an array of type snapshots"
            );
            return Vec::new();
        }
    };

    let total = items.len();
    let decoded: Vec<TypeData> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match TypeData::decode(item) {
            Ok(data) => Some(data),
            Err(err) => {
                tracing::warn!(
                    target: "typelens.proto",
                    index,
                    error = %err,
                    "dropping malformed type snapshot"
                );
                None
            }
        })
        .collect();

    if decoded.len() != total {
        tracing::debug!(
            target: "typelens.proto",
            kept = decoded.len(),
            dropped = total - decoded.len(),
            "decoded partial type batch"
        );
    }
    decoded
}

/// Decode a list of package names, dropping non-string and duplicate items.
pub fn decode_package_batch(value: Value) -> Vec<String> {
    let items = match value {
        Value::Array(items) => items,
        Value::Null => return Vec::new(),
        other => {
            tracing::warn!(
                target: "typelens.proto",
                found = json_type_name(&other),
                "expected an array of package names"
            );
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match item {
            Value::String(name) => {
                if seen.insert(name.clone()) {
                    out.push(name);
                }
            }
            other => tracing::warn!(
                target: "typelens.proto",
                index,
                found = json_type_name(&other),
                "dropping malformed package name"
            ),
        }
    }
    out
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
