//! Array helpers.
//!
//! Generic helpers work on slices of any element type; the ones that inspect
//! properties (`sort_asc`, `sort`, `sort_by`) work on slices of JSON values.
//! None of them mutate their input.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::Hash;

use indexmap::IndexMap;
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::Value;

use crate::is::{coerce_number, has_property, StringKey};

/// Where an index-based edit applies.
pub enum Position<'p, T> {
    /// A literal index.
    At(usize),
    /// The first element matching the predicate.
    Find(&'p dyn Fn(&T) -> bool),
}

impl<T> Position<'_, T> {
    fn resolve(&self, items: &[T]) -> Option<usize> {
        match self {
            Position::At(index) => Some(*index),
            Position::Find(predicate) => items.iter().position(|item| predicate(item)),
        }
    }
}

/// Sort direction for [`sort_by`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// Remove duplicates, keeping the first occurrence of each value.
///
/// # Examples
///
/// ```
/// use utilkit::array::unique;
///
/// assert_eq!(unique(&[3, 1, 3, 2, 1]), vec![3, 1, 2]);
/// ```
pub fn unique<T: Eq + Hash + Clone>(items: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .filter(|item| seen.insert(*item))
        .cloned()
        .collect()
}

/// Recursively flatten nested arrays into one level.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use utilkit::array::flatten_array;
///
/// let nested = vec![json!(1), json!([2, [3, [4]]]), json!("x")];
/// assert_eq!(flatten_array(&nested), vec![json!(1), json!(2), json!(3), json!(4), json!("x")]);
/// ```
pub fn flatten_array(items: &[Value]) -> Vec<Value> {
    let mut out = Vec::with_capacity(items.len());
    flatten_into(items, &mut out);
    out
}

fn flatten_into(items: &[Value], out: &mut Vec<Value>) {
    for item in items {
        match item {
            Value::Array(inner) => flatten_into(inner, out),
            other => out.push(other.clone()),
        }
    }
}

/// Drop every element equal to one of `values`.
pub fn remove_item<T: PartialEq + Clone>(items: &[T], values: &[T]) -> Vec<T> {
    items
        .iter()
        .filter(|item| !values.contains(item))
        .cloned()
        .collect()
}

/// Pick `count` random elements (with replacement).
///
/// A `count` of zero, or one larger than the input, returns the input as-is.
pub fn random_item<T: Clone>(items: &[T], count: usize) -> Vec<T> {
    random_item_with(&mut rand::thread_rng(), items, count)
}

pub fn random_item_with<T: Clone, R: Rng + ?Sized>(rng: &mut R, items: &[T], count: usize) -> Vec<T> {
    if count == 0 || count > items.len() {
        return items.to_vec();
    }
    (0..count)
        .map(|_| items[rng.gen_range(0..items.len())].clone())
        .collect()
}

/// Return a shuffled copy of the input.
pub fn shuffle_array<T: Clone>(items: &[T]) -> Vec<T> {
    shuffle_array_with(&mut rand::thread_rng(), items)
}

pub fn shuffle_array_with<T: Clone, R: Rng + ?Sized>(rng: &mut R, items: &[T]) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(rng);
    out
}

/// Relational comparison of two scalars.
///
/// Numbers and booleans compare numerically, strings lexically. Anything else
/// (mixed kinds, missing values, containers) is unordered.
fn loose_compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let ordering = match (a, b) {
        (Some(Value::String(x)), Some(Value::String(y))) => Some(x.cmp(y)),
        (Some(x @ (Value::Number(_) | Value::Bool(_))), Some(y @ (Value::Number(_) | Value::Bool(_)))) => {
            coerce_number(x).partial_cmp(&coerce_number(y))
        }
        _ => None,
    };
    ordering.unwrap_or(Ordering::Equal)
}

/// Stable sort of objects by their `"key"` property.
pub fn sort_asc(items: &[Value]) -> Vec<Value> {
    let mut out = items.to_vec();
    out.sort_by(|a, b| loose_compare(a.get("key"), b.get("key")));
    out
}

fn first_value_number(value: &Value) -> f64 {
    match value {
        Value::Object(map) => map.values().next().map(coerce_number).unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

/// Sort a copy of `items` with `compare`.
///
/// Without a comparator, objects are ordered by the numeric value of their first
/// property; values that are not numbers keep their relative order.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use utilkit::array::sort;
///
/// let items = vec![json!({"n": 3}), json!({"n": "1"}), json!({"n": 2})];
/// let sorted = sort(&items, None);
/// assert_eq!(sorted, vec![json!({"n": "1"}), json!({"n": 2}), json!({"n": 3})]);
/// ```
pub fn sort(items: &[Value], compare: Option<&dyn Fn(&Value, &Value) -> Ordering>) -> Vec<Value> {
    let mut out = items.to_vec();
    match compare {
        Some(compare) => out.sort_by(|a, b| compare(a, b)),
        None => out.sort_by(|a, b| {
            first_value_number(a)
                .partial_cmp(&first_value_number(b))
                .unwrap_or(Ordering::Equal)
        }),
    }
    out
}

/// Sort objects by the value under `key`.
///
/// When the key is empty or the first element lacks it, the input is returned
/// unchanged.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use utilkit::array::{sort_by, SortOrder};
///
/// let items = vec![json!({"a": 2}), json!({"a": 1}), json!({"a": 3})];
/// let desc = sort_by(&items, SortOrder::Desc, "a");
/// assert_eq!(desc, vec![json!({"a": 3}), json!({"a": 2}), json!({"a": 1})]);
/// ```
pub fn sort_by(items: &[Value], order: SortOrder, key: &str) -> Vec<Value> {
    match items.first() {
        Some(first) if has_property(first, key) => {}
        _ => return items.to_vec(),
    }
    let mut out = items.to_vec();
    out.sort_by(|m, n| order.apply(loose_compare(m.get(key), n.get(key))));
    out
}

/// Insert `value` before the element at `position`.
///
/// Returns an empty vector when there is no input, and the input itself when
/// the position does not resolve. Inserting at `len` appends.
///
/// # Examples
///
/// ```
/// use utilkit::array::{insert_item_at_index, Position};
///
/// let items = [1, 2, 4];
/// let out = insert_item_at_index(Some(&items[..]), Position::Find(&|x: &i32| *x > 2), 3);
/// assert_eq!(&*out, &[1, 2, 3, 4]);
/// ```
pub fn insert_item_at_index<'a, T: Clone>(items: Option<&'a [T]>, position: Position<'_, T>, value: T) -> Cow<'a, [T]> {
    let Some(items) = items else {
        return Cow::Owned(Vec::new());
    };
    match position.resolve(items) {
        Some(index) if index <= items.len() => {
            let mut out = Vec::with_capacity(items.len() + 1);
            out.extend_from_slice(&items[..index]);
            out.push(value);
            out.extend_from_slice(&items[index..]);
            Cow::Owned(out)
        }
        _ => Cow::Borrowed(items),
    }
}

/// Replace the element at `position` with `value`.
pub fn replace_item_at_index<'a, T: Clone>(items: Option<&'a [T]>, position: Position<'_, T>, value: T) -> Cow<'a, [T]> {
    let Some(items) = items else {
        return Cow::Owned(Vec::new());
    };
    match position.resolve(items) {
        Some(index) if index < items.len() => {
            let mut out = items.to_vec();
            out[index] = value;
            Cow::Owned(out)
        }
        _ => Cow::Borrowed(items),
    }
}

/// Remove the element at `position`.
pub fn remove_item_at_index<'a, T: Clone>(items: Option<&'a [T]>, position: Position<'_, T>) -> Cow<'a, [T]> {
    let Some(items) = items else {
        return Cow::Owned(Vec::new());
    };
    match position.resolve(items) {
        Some(index) if index < items.len() => {
            let mut out = items.to_vec();
            out.remove(index);
            Cow::Owned(out)
        }
        _ => Cow::Borrowed(items),
    }
}

/// Median of a list of numbers; `0.0` for an empty list.
///
/// # Examples
///
/// ```
/// use utilkit::array::median;
///
/// assert_eq!(median(&[5.0, 1.0, 3.0]), 3.0);
/// assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
/// assert_eq!(median(&[]), 0.0);
/// ```
pub fn median(items: &[f64]) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    let mut nums = items.to_vec();
    nums.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mid = nums.len() / 2;
    if nums.len() % 2 != 0 {
        nums[mid]
    } else {
        (nums[mid - 1] + nums[mid]) / 2.0
    }
}

/// Elements of `right` that also appear in `left`, in `right`'s order.
pub fn intersection<T: PartialEq + Clone>(left: &[T], right: &[T]) -> Vec<T> {
    right
        .iter()
        .filter(|item| left.contains(item))
        .cloned()
        .collect()
}

/// Count occurrences of each distinct value.
///
/// Values are keyed by their string coercion, so `1` and `"1"` share a
/// counter. Keys appear in first-seen order.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use utilkit::array::count_by;
///
/// let counts = count_by(&[json!(1), json!("2"), json!(true), json!("2"), json!(1)]);
/// assert_eq!(counts["1"], 2);
/// assert_eq!(counts["2"], 2);
/// assert_eq!(counts["true"], 1);
/// ```
pub fn count_by<T: StringKey>(items: &[T]) -> IndexMap<String, usize> {
    let mut counts = IndexMap::new();
    for item in items {
        *counts.entry(item.string_key()).or_insert(0) += 1;
    }
    counts
}
