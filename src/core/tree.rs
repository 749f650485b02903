//! Dotted-path access over `serde_json::Value` trees.
//!
//! Paths are `.`-separated keys (`"user.address.city"`). Reads never fail: a
//! missing field reads as `null`. Writes create intermediate objects.

use serde_json::{Map, Value};
use tracing::debug;

/// Read the value at a dotted path. Missing fields read as `null`.
///
/// On an array, a numeric segment selects one element; any other segment is
/// applied to every element and the hits are collected into an array
/// (`"items.id"` over `[{"id":1},{"id":2}]` gives `[1,2]`). If no element
/// has the field the result is `null`.
pub fn get_path(doc: &Value, path: &str) -> Value {
    if path.is_empty() {
        return doc.clone();
    }
    let segments: Vec<&str> = path.split('.').collect();
    lookup(doc, &segments)
}

fn lookup(node: &Value, segments: &[&str]) -> Value {
    let Some((first, rest)) = segments.split_first() else {
        return node.clone();
    };

    match node {
        Value::Object(map) => map
            .get(*first)
            .map(|child| lookup(child, rest))
            .unwrap_or(Value::Null),
        Value::Array(items) => {
            if let Ok(index) = first.parse::<usize>() {
                return items
                    .get(index)
                    .map(|child| lookup(child, rest))
                    .unwrap_or(Value::Null);
            }
            let hits: Vec<Value> = items
                .iter()
                .map(|item| lookup(item, segments))
                .filter(|v| !v.is_null())
                .collect();
            if hits.is_empty() {
                Value::Null
            } else {
                Value::Array(hits)
            }
        }
        _ => Value::Null,
    }
}

/// Write `value` at a dotted path, creating intermediate objects.
///
/// If an existing intermediate is not an object the write is skipped and the
/// document is left as it was.
pub fn set_path(doc: &mut Value, path: &str, value: Value) {
    let segments: Vec<&str> = path.split('.').collect();
    let Some((last, parents)) = segments.split_last() else {
        return;
    };

    let mut node = doc;
    for segment in parents {
        let Value::Object(map) = node else {
            debug!(path, segment, "intermediate is not an object, write skipped");
            return;
        };
        node = map
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }

    match node {
        Value::Object(map) => {
            map.insert(last.to_string(), value);
        }
        other => debug!(path, found = kind_name(other), "parent is not an object, write skipped"),
    }
}

/// Name of a value's JSON kind, for error messages.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Render a value as text: strings unquoted, everything else compact JSON.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> Value {
        json!({
            "name": "Ana",
            "age": 30,
            "address": {"city": "Lisbon", "geo": {"lat": 38.7}},
            "tags": ["a", "b"],
            "items": [{"id": 1}, {"id": 2, "sku": "x"}, {"other": true}]
        })
    }

    #[test]
    fn test_get_top_level() {
        assert_eq!(get_path(&doc(), "name"), json!("Ana"));
        assert_eq!(get_path(&doc(), "age"), json!(30));
    }

    #[test]
    fn test_get_nested() {
        assert_eq!(get_path(&doc(), "address.city"), json!("Lisbon"));
        assert_eq!(get_path(&doc(), "address.geo.lat"), json!(38.7));
    }

    #[test]
    fn test_get_missing_is_null() {
        assert_eq!(get_path(&doc(), "nope"), Value::Null);
        assert_eq!(get_path(&doc(), "address.zip"), Value::Null);
        assert_eq!(get_path(&doc(), "name.first"), Value::Null);
    }

    #[test]
    fn test_get_empty_path_is_document() {
        assert_eq!(get_path(&doc(), ""), doc());
    }

    #[test]
    fn test_get_array_index() {
        assert_eq!(get_path(&doc(), "tags.1"), json!("b"));
        assert_eq!(get_path(&doc(), "items.0.id"), json!(1));
        assert_eq!(get_path(&doc(), "tags.9"), Value::Null);
    }

    #[test]
    fn test_get_array_fan_out_skips_misses() {
        assert_eq!(get_path(&doc(), "items.id"), json!([1, 2]));
        assert_eq!(get_path(&doc(), "items.sku"), json!(["x"]));
        assert_eq!(get_path(&doc(), "items.missing"), Value::Null);
    }

    #[test]
    fn test_set_top_level() {
        let mut out = json!({});
        set_path(&mut out, "fullName", json!("Ana"));
        assert_eq!(out, json!({"fullName": "Ana"}));
    }

    #[test]
    fn test_set_creates_intermediates() {
        let mut out = json!({});
        set_path(&mut out, "person.contact.email", json!("a@b.c"));
        assert_eq!(out, json!({"person": {"contact": {"email": "a@b.c"}}}));
    }

    #[test]
    fn test_set_keeps_siblings() {
        let mut out = json!({"person": {"name": "Ana"}});
        set_path(&mut out, "person.age", json!(30));
        assert_eq!(out, json!({"person": {"name": "Ana", "age": 30}}));
    }

    #[test]
    fn test_set_overwrites() {
        let mut out = json!({"a": 1});
        set_path(&mut out, "a", json!(2));
        assert_eq!(out, json!({"a": 2}));
    }

    #[test]
    fn test_set_skips_scalar_intermediate() {
        let mut out = json!({"a": "scalar"});
        set_path(&mut out, "a.b", json!(true));
        assert_eq!(out, json!({"a": "scalar"}));
    }

    #[test]
    fn test_set_skips_array_intermediate() {
        let mut out = json!({"a": [1, 2]});
        set_path(&mut out, "a.b.c", json!(true));
        assert_eq!(out, json!({"a": [1, 2]}));
    }

    #[test]
    fn test_set_through_existing_object() {
        let mut out = json!({"a": {"x": 1}});
        set_path(&mut out, "a.y", json!(2));
        assert_eq!(out, json!({"a": {"x": 1, "y": 2}}));
    }

    #[test]
    fn test_set_null_is_written() {
        let mut out = json!({});
        set_path(&mut out, "gone", Value::Null);
        assert_eq!(out, json!({"gone": null}));
    }

    #[test]
    fn test_set_preserves_insertion_order() {
        let mut out = json!({});
        set_path(&mut out, "zeta", json!(1));
        set_path(&mut out, "alpha", json!(2));
        assert_eq!(out.to_string(), r#"{"zeta":1,"alpha":2}"#);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(kind_name(&Value::Null), "null");
        assert_eq!(kind_name(&json!(true)), "bool");
        assert_eq!(kind_name(&json!(1.5)), "number");
        assert_eq!(kind_name(&json!("s")), "string");
        assert_eq!(kind_name(&json!([])), "array");
        assert_eq!(kind_name(&json!({})), "object");
    }

    #[test]
    fn test_stringify() {
        assert_eq!(stringify(&json!("Ana")), "Ana");
        assert_eq!(stringify(&json!(30)), "30");
        assert_eq!(stringify(&json!(2.5)), "2.5");
        assert_eq!(stringify(&json!(false)), "false");
        assert_eq!(stringify(&Value::Null), "null");
        assert_eq!(stringify(&json!({"a": [1]})), r#"{"a":[1]}"#);
    }
}
