//! utilkit - Everyday helpers for Rust applications
//!
//! A flat collection of independent utilities for slices, JSON objects,
//! strings, HTML text, dates and numbers, plus [`try_catch`], which runs a
//! callable and folds every failure into one error type with a status code.

pub mod array;
pub mod base;
pub mod cache;
pub mod country;
pub mod currency;
pub mod date;
pub mod function;
pub mod html;
pub mod is;
pub mod number;
pub mod object;
pub mod string;
pub mod try_catch;
pub mod url;
pub mod validators;

// Re-exports for convenience
pub use array::{
    count_by, flatten_array, insert_item_at_index, intersection, median, random_item, remove_item,
    remove_item_at_index, replace_item_at_index, shuffle_array, sort, sort_asc, sort_by, unique, Position, SortOrder,
};
pub use base::{bytes_to_size, perf_start, perf_stop, wait};
pub use cache::Cache;
pub use country::get_flag_emoji;
pub use currency::to_dollars;
pub use date::{DateError, DateInput, DateRange};
pub use function::{batch_invoke, pipe, Pipeline};
pub use is::{coerce_number, coerce_string, has_property, is_truthy, is_truthy_and_not_empty, StringKey};
pub use number::NumberError;
pub use object::{filter_falsy_from_object, flatten_object, flip, omit, pick, union_with_exclusion, unique_by_key};
pub use string::{camel_case, capitalize, kebab_case, mask_string, pascal_case, slugify, truncate};
pub use try_catch::{
    try_catch, try_catch_async, try_catch_async_with, try_catch_with, ErrorClass, StatusError, Thrown, ThrownValue,
    TryCatchOptions,
};
pub use url::add_trailing_slash;
