//! Loose-typing helpers over [`serde_json::Value`].
//!
//! Object and array utilities in this crate work on dynamic JSON values and
//! need a single, shared notion of truthiness, string coercion and numeric
//! coercion. Those live here.

use serde_json::{Map, Value};

/// Check whether a value is truthy.
///
/// `null`, `false`, `0`, `NaN` and `""` are falsy. Every array and object is
/// truthy, including empty ones.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use utilkit::is::is_truthy;
///
/// assert!(is_truthy(&json!("a")));
/// assert!(is_truthy(&json!([])));
/// assert!(!is_truthy(&json!(0)));
/// assert!(!is_truthy(&json!(null)));
/// ```
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Check whether a value is truthy and, for arrays and objects, non-empty.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use utilkit::is::is_truthy_and_not_empty;
///
/// assert!(is_truthy_and_not_empty(&json!([1])));
/// assert!(!is_truthy_and_not_empty(&json!([])));
/// assert!(!is_truthy_and_not_empty(&json!({})));
/// assert!(!is_truthy_and_not_empty(&json!("")));
/// ```
pub fn is_truthy_and_not_empty(value: &Value) -> bool {
    match value {
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        other => is_truthy(other),
    }
}

/// Check if a value is an object with an own property named `key`.
///
/// An empty key never matches, and non-object values have no properties.
pub fn has_property(value: &Value, key: &str) -> bool {
    if key.is_empty() {
        return false;
    }
    match value {
        Value::Object(map) => map.contains_key(key),
        _ => false,
    }
}

/// Check if a map has an own property named `key`.
pub fn has_property_map(map: &Map<String, Value>, key: &str) -> bool {
    !key.is_empty() && map.contains_key(key)
}

pub fn is_null(value: &Value) -> bool {
    value.is_null()
}

pub fn is_boolean(value: &Value) -> bool {
    value.is_boolean()
}

pub fn is_number(value: &Value) -> bool {
    value.is_number()
}

pub fn is_string(value: &Value) -> bool {
    value.is_string()
}

/// Arrays count as objects here; `null` does not.
pub fn is_object(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

/// Check for a plain key/value object (not an array).
pub fn is_plain_object(value: &Value) -> bool {
    value.is_object()
}

/// Get the raw type tag of a value: `Null`, `Boolean`, `Number`, `String`,
/// `Array` or `Object`.
pub fn to_raw_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "Null",
        Value::Bool(_) => "Boolean",
        Value::Number(_) => "Number",
        Value::String(_) => "String",
        Value::Array(_) => "Array",
        Value::Object(_) => "Object",
    }
}

/// Format a number the way loose string coercion does: integral values have
/// no fractional part, non-finite values are spelled out.
///
/// # Examples
///
/// ```
/// use utilkit::is::format_number;
///
/// assert_eq!(format_number(1.0), "1");
/// assert_eq!(format_number(2.5), "2.5");
/// assert_eq!(format_number(f64::NAN), "NaN");
/// ```
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        // Covers -0.0 as well.
        return "0".to_string();
    }
    if n.fract() == 0.0 && n.abs() < 1e21 {
        return format!("{n:.0}");
    }
    n.to_string()
}

/// Coerce a value to a string.
///
/// Strings are returned as-is, arrays are joined with `,` (nulls become empty),
/// and objects become `"[object Object]"`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use utilkit::is::coerce_string;
///
/// assert_eq!(coerce_string(&json!("hi")), "hi");
/// assert_eq!(coerce_string(&json!(42)), "42");
/// assert_eq!(coerce_string(&json!([1, null, "a"])), "1,,a");
/// assert_eq!(coerce_string(&json!({"a": 1})), "[object Object]");
/// ```
pub fn coerce_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                format_number(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => coerce_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Coerce a value to a number. Unconvertible values give `NaN`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use utilkit::is::coerce_number;
///
/// assert_eq!(coerce_number(&json!(" 12 ")), 12.0);
/// assert_eq!(coerce_number(&json!(true)), 1.0);
/// assert_eq!(coerce_number(&json!(null)), 0.0);
/// assert!(coerce_number(&json!("abc")).is_nan());
/// ```
pub fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => parse_number_str(s),
        Value::Array(items) => match items.as_slice() {
            [] => 0.0,
            [single] => coerce_number(single),
            _ => f64::NAN,
        },
        Value::Object(_) => f64::NAN,
    }
}

/// Parse a whole string as a number; blank strings are `0`.
pub(crate) fn parse_number_str(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        // Rust accepts "inf"/"nan" spellings that loose coercion rejects.
        t if t.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') => f64::NAN,
        t => t.parse::<f64>().unwrap_or(f64::NAN),
    }
}

/// Types that can be turned into a frequency-map or lookup key.
///
/// The key is the loose string coercion of the value, so `1`, `1.0` and `"1"`
/// all produce the key `"1"`.
pub trait StringKey {
    fn string_key(&self) -> String;
}

impl StringKey for Value {
    fn string_key(&self) -> String {
        coerce_string(self)
    }
}

impl StringKey for str {
    fn string_key(&self) -> String {
        self.to_string()
    }
}

impl StringKey for String {
    fn string_key(&self) -> String {
        self.clone()
    }
}

impl StringKey for bool {
    fn string_key(&self) -> String {
        self.to_string()
    }
}

impl StringKey for char {
    fn string_key(&self) -> String {
        self.to_string()
    }
}

impl StringKey for f64 {
    fn string_key(&self) -> String {
        format_number(*self)
    }
}

impl StringKey for f32 {
    fn string_key(&self) -> String {
        format_number(f64::from(*self))
    }
}

macro_rules! impl_string_key_int {
    ($($t:ty),*) => {
        $(
            impl StringKey for $t {
                fn string_key(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_string_key_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl<T: StringKey + ?Sized> StringKey for &T {
    fn string_key(&self) -> String {
        (**self).string_key()
    }
}
