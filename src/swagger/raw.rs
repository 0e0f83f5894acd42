//! Lenient accessors over raw JSON nodes.
//!
//! Every accessor returns a default instead of failing: absent or mistyped
//! fields become empty strings, `false` or empty lists.

use serde_json::{Map, Value};

/// Prefix of local definition references.
pub const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// Default-valued field access on JSON nodes.
pub trait NodeExt {
    /// String field, empty when absent. Numbers and booleans are stringified.
    fn str_field(&self, key: &str) -> String;

    /// Boolean field, `false` when absent or not a boolean.
    fn bool_field(&self, key: &str) -> bool;

    /// Array of scalars as strings, empty when absent.
    fn string_list(&self, key: &str) -> Vec<String>;

    /// Object field, `None` when absent or not an object.
    fn object_field(&self, key: &str) -> Option<&Map<String, Value>>;

    /// Scalar field rendered as text, `None` when absent.
    fn scalar_field(&self, key: &str) -> Option<String>;

    /// Reference carried by this node, normalized to `#/definitions/<id>`.
    ///
    /// `$ref` wins; the springfox `originalRef` field is used as a fallback.
    fn reference(&self) -> Option<String>;
}

impl NodeExt for Value {
    fn str_field(&self, key: &str) -> String {
        self.get(key).and_then(scalar_text).unwrap_or_default()
    }

    fn bool_field(&self, key: &str) -> bool {
        match self.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    fn string_list(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
            _ => Vec::new(),
        }
    }

    fn object_field(&self, key: &str) -> Option<&Map<String, Value>> {
        self.get(key).and_then(Value::as_object)
    }

    fn scalar_field(&self, key: &str) -> Option<String> {
        match self.get(key) {
            None | Some(Value::Null) => None,
            Some(v @ (Value::Array(_) | Value::Object(_))) => Some(v.to_string()),
            Some(v) => scalar_text(v),
        }
    }

    fn reference(&self) -> Option<String> {
        let direct = self
            .get("$ref")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty());
        let original = self
            .get("originalRef")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty());
        direct.or(original).map(normalize_ref)
    }
}

/// Normalize a reference to the `#/definitions/<id>` form.
pub fn normalize_ref(reference: &str) -> String {
    if reference.starts_with("#/") {
        reference.to_string()
    } else {
        format!("{}{}", DEFINITIONS_PREFIX, reference)
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
