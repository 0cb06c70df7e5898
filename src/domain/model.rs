use serde_json::{Map, Value};

/// Field name to value mapping exchanged with `from_mapping` / `to_mapping`.
///
/// Keys keep insertion order, so a record's mapping lists its fields in
/// declaration order and its JSON form does too.
pub type Mapping = Map<String, Value>;

/// Human readable name of a JSON value's type, used in schema errors.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
