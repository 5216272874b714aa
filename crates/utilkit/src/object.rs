//! JSON object helpers.
//!
//! All functions take their input by reference and build new values; key order
//! of the input is preserved in the output.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::is::{coerce_string, is_truthy, is_truthy_and_not_empty};

fn omit_keys(map: &Map<String, Value>, keys: &[&str]) -> Map<String, Value> {
    map.iter()
        .filter(|(k, _)| !keys.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn pick_keys(map: &Map<String, Value>, keys: &[&str]) -> Map<String, Value> {
    map.iter()
        .filter(|(k, _)| keys.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn map_objects(value: &Value, f: impl Fn(&Map<String, Value>) -> Map<String, Value>) -> Value {
    match value {
        Value::Object(map) => Value::Object(f(map)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| match item {
                    Value::Object(map) => Value::Object(f(map)),
                    other => other.clone(),
                })
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Copy an object (or every object of an array) without the given keys.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use utilkit::object::omit;
///
/// let user = json!({"id": 1, "name": "Ann", "password": "x"});
/// assert_eq!(omit(&user, &["password"]), json!({"id": 1, "name": "Ann"}));
///
/// let users = json!([{"a": 1, "b": 2}, {"a": 3, "b": 4}]);
/// assert_eq!(omit(&users, &["b"]), json!([{"a": 1}, {"a": 3}]));
/// ```
pub fn omit(value: &Value, keys: &[&str]) -> Value {
    map_objects(value, |map| omit_keys(map, keys))
}

/// Copy an object (or every object of an array) keeping only the given keys.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use utilkit::object::pick;
///
/// let user = json!({"id": 1, "name": "Ann", "password": "x"});
/// assert_eq!(pick(&user, &["id", "name"]), json!({"id": 1, "name": "Ann"}));
/// ```
pub fn pick(value: &Value, keys: &[&str]) -> Value {
    map_objects(value, |map| pick_keys(map, keys))
}

/// Lift the properties of nested objects to the top level.
///
/// Arrays are kept as values. When keys collide, the later one wins.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use utilkit::object::flatten_object;
///
/// let obj = json!({"a": 1, "b": {"c": 2, "d": {"e": 3}}, "f": [1, 2]});
/// let flat = flatten_object(obj.as_object().unwrap());
/// assert_eq!(serde_json::Value::Object(flat), json!({"a": 1, "c": 2, "e": 3, "f": [1, 2]}));
/// ```
pub fn flatten_object(map: &Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::new();
    flatten_into(map, &mut out);
    out
}

fn flatten_into(map: &Map<String, Value>, out: &mut Map<String, Value>) {
    for (key, value) in map {
        match value {
            Value::Object(inner) => flatten_into(inner, out),
            other => {
                out.insert(key.clone(), other.clone());
            }
        }
    }
}

/// Drop entries whose value is falsy or an empty array/object.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use utilkit::object::filter_falsy_from_object;
///
/// let obj = json!({"a": 1, "b": 0, "c": false, "d": null, "e": "", "f": [], "g": {}});
/// let kept = filter_falsy_from_object(obj.as_object().unwrap());
/// assert_eq!(serde_json::Value::Object(kept), json!({"a": 1}));
/// ```
pub fn filter_falsy_from_object(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .filter(|(_, v)| is_truthy_and_not_empty(v))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Deep-merge `right` over `left`, skipping falsy values from either side.
///
/// Nested objects merge recursively. Any other value overwrites what was there.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use utilkit::object::union_with_exclusion;
///
/// let left = json!({"a": 1, "b": 0, "n": {"x": 1}});
/// let right = json!({"a": 2, "c": null, "n": {"y": 2}});
/// let merged = union_with_exclusion(left.as_object().unwrap(), right.as_object().unwrap());
/// assert_eq!(serde_json::Value::Object(merged), json!({"a": 2, "n": {"x": 1, "y": 2}}));
/// ```
pub fn union_with_exclusion(left: &Map<String, Value>, right: &Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::new();
    merge_into(&mut out, left);
    merge_into(&mut out, right);
    out
}

fn merge_into(target: &mut Map<String, Value>, source: &Map<String, Value>) {
    for (key, value) in source {
        if !is_truthy(value) {
            continue;
        }
        match value {
            Value::Object(inner) => {
                let mut merged = match target.get(key) {
                    Some(Value::Object(existing)) => existing.clone(),
                    _ => Map::new(),
                };
                merge_into(&mut merged, inner);
                target.insert(key.clone(), Value::Object(merged));
            }
            other => {
                target.insert(key.clone(), other.clone());
            }
        }
    }
}

/// Swap keys and values. Values become keys through string coercion; on
/// collisions the last key wins.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use utilkit::object::flip;
///
/// let obj = json!({"x": 1, "y": "b"});
/// let flipped = flip(obj.as_object().unwrap());
/// assert_eq!(serde_json::Value::Object(flipped), json!({"1": "x", "b": "y"}));
/// ```
pub fn flip(map: &Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::new();
    for (key, value) in map {
        out.insert(coerce_string(value), Value::String(key.clone()));
    }
    out
}

/// Remove objects that repeat an earlier object's `key` value.
///
/// The last object for a given key value is kept, at the position where that
/// key value first appeared. Objects lacking the key all share one slot.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use utilkit::object::unique_by_key;
///
/// let items = vec![json!({"id": 1, "v": "a"}), json!({"id": 2}), json!({"id": 1, "v": "b"})];
/// assert_eq!(
///     unique_by_key(&items, "id"),
///     vec![json!({"id": 1, "v": "b"}), json!({"id": 2})]
/// );
/// ```
pub fn unique_by_key(items: &[Value], key: &str) -> Vec<Value> {
    let mut by_key: IndexMap<Option<String>, &Value> = IndexMap::new();
    for item in items {
        // The serialized form tells `1` and `"1"` apart.
        let id = item.get(key).map(Value::to_string);
        by_key.insert(id, item);
    }
    by_key.into_values().cloned().collect()
}
