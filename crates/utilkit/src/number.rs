//! Number helpers: ranges, padding, random numbers and shorthand amounts.

use rand::Rng;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

use crate::is::parse_number_str;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NumberError {
    #[error("Length must be greater than zero")]
    NonPositiveLength,
    #[error("Length must be at most {max}")]
    LengthTooLarge { max: u32 },
}

/// Most integers [`range_parser`] will expand.
pub const MAX_RANGE_LEN: i64 = 1_000_000;

/// Longest digit count that fits a `u64` for every value of that length.
pub const MAX_NUMBER_LENGTH: u32 = 19;

fn range_separator_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[,-]").unwrap())
}

fn leading_number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+-]?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?").unwrap())
}

fn as_whole(n: f64) -> Option<i64> {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Some(n as i64)
    } else {
        None
    }
}

/// Expand a range expression into the integers it covers, inclusive.
///
/// `"N"` means `1..=N`; `"A-B"` and `"A,B"` mean `A..=B`. An end of `0` falls
/// back to the `"N"` form. Anything that does not describe whole numbers,
/// descending ranges and ranges longer than [`MAX_RANGE_LEN`] give an empty
/// vector.
///
/// # Examples
///
/// ```
/// use utilkit::number::range_parser;
///
/// assert_eq!(range_parser("5"), vec![1, 2, 3, 4, 5]);
/// assert_eq!(range_parser("2-5"), vec![2, 3, 4, 5]);
/// assert_eq!(range_parser("2,5"), vec![2, 3, 4, 5]);
/// assert!(range_parser("abc").is_empty());
/// ```
pub fn range_parser(range: &str) -> Vec<i64> {
    let mut parts = range_separator_regex().split(range).map(parse_number_str);
    let mut start = parts.next().unwrap_or(f64::NAN);
    let mut end = parts.next().unwrap_or(0.0);
    if end == 0.0 || end.is_nan() {
        end = start;
        start = 1.0;
    }
    match (as_whole(start), as_whole(end)) {
        (Some(start), Some(end)) => match end.checked_sub(start) {
            Some(span) if (0..MAX_RANGE_LEN).contains(&span) => (start..=end).collect(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Pad numbers up to 9 with a leading zero.
///
/// Negative numbers are padded too: `-1` becomes `"0-1"`.
///
/// # Examples
///
/// ```
/// use utilkit::number::add_zero;
///
/// assert_eq!(add_zero(7), "07");
/// assert_eq!(add_zero(10), "10");
/// ```
pub fn add_zero(n: i64) -> String {
    if n > 9 {
        n.to_string()
    } else {
        format!("0{n}")
    }
}

/// Random float in `[min, max)`.
pub fn get_random_number(min: f64, max: f64) -> f64 {
    get_random_number_with(&mut rand::thread_rng(), min, max)
}

pub fn get_random_number_with<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    rng.gen::<f64>() * (max - min) + min
}

/// Random integer with exactly `len` decimal digits.
///
/// # Examples
///
/// ```
/// use utilkit::number::{generate_number_with_length, NumberError};
///
/// let n = generate_number_with_length(4).unwrap();
/// assert!((1000..=9999).contains(&n));
/// assert_eq!(generate_number_with_length(0), Err(NumberError::NonPositiveLength));
/// ```
pub fn generate_number_with_length(len: u32) -> Result<u64, NumberError> {
    generate_number_with_length_with(&mut rand::thread_rng(), len)
}

pub fn generate_number_with_length_with<R: Rng + ?Sized>(rng: &mut R, len: u32) -> Result<u64, NumberError> {
    if len == 0 {
        return Err(NumberError::NonPositiveLength);
    }
    if len > MAX_NUMBER_LENGTH {
        return Err(NumberError::LengthTooLarge {
            max: MAX_NUMBER_LENGTH,
        });
    }
    let min = 10u64.pow(len - 1);
    let max = 10u64.pow(len) - 1;
    Ok(rng.gen_range(min..=max))
}

/// Parse shorthand amounts such as `"2k"` or `"1.5m"`.
///
/// The suffix is case-insensitive; any other trailing letter is ignored.
/// Missing, empty and unparseable input give `0`.
///
/// # Examples
///
/// ```
/// use utilkit::number::n_formatter;
///
/// assert_eq!(n_formatter(Some("2k")), 2000.0);
/// assert_eq!(n_formatter(Some("1.5M")), 1_500_000.0);
/// assert_eq!(n_formatter(Some("1x")), 1.0);
/// assert_eq!(n_formatter(None), 0.0);
/// ```
pub fn n_formatter(value: Option<&str>) -> f64 {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return 0.0;
    };
    let (body, multiplier) = match value.chars().last() {
        Some('k' | 'K') => (&value[..value.len() - 1], 1_000.0),
        Some('m' | 'M') => (&value[..value.len() - 1], 1_000_000.0),
        _ => (value, 1.0),
    };
    match leading_number_regex().find(body) {
        Some(m) => m.as_str().parse::<f64>().map(|n| n * multiplier).unwrap_or(0.0),
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    #[test]
    fn test_range_parser_edge_cases() {
        assert_eq!(range_parser("3-3"), vec![3]);
        assert_eq!(range_parser("4-0"), vec![1, 2, 3, 4]);
        assert_eq!(range_parser("1,3,9"), vec![1, 2, 3]);
        assert!(range_parser("0").is_empty());
        assert!(range_parser("5-2").is_empty());
        assert!(range_parser("1.5-3").is_empty());
        assert!(range_parser("").is_empty());
    }

    #[test]
    fn test_range_parser_length_cap() {
        assert!(range_parser("1-9000000000000000000").is_empty());
        assert!(range_parser("-9000000000000000000,9000000000000000000").is_empty());
        assert_eq!(range_parser(&MAX_RANGE_LEN.to_string()).len(), MAX_RANGE_LEN as usize);
        assert!(range_parser(&(MAX_RANGE_LEN + 1).to_string()).is_empty());
    }

    #[test]
    fn test_add_zero() {
        assert_eq!(add_zero(0), "00");
        assert_eq!(add_zero(9), "09");
        assert_eq!(add_zero(99), "99");
        assert_eq!(add_zero(1000), "1000");
        assert_eq!(add_zero(-1), "0-1");
        assert_eq!(add_zero(-100), "0-100");
    }

    #[test]
    fn test_get_random_number_bounds() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(3);
        for _ in 0..100 {
            let n = get_random_number_with(&mut rng, 5.0, 10.0);
            assert!((5.0..10.0).contains(&n));
        }
    }

    #[test]
    fn test_generate_number_with_length() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(11);
        for len in 1..=MAX_NUMBER_LENGTH {
            let n = generate_number_with_length_with(&mut rng, len).unwrap();
            assert_eq!(n.to_string().len(), len as usize);
        }
        assert_eq!(
            generate_number_with_length(20),
            Err(NumberError::LengthTooLarge { max: 19 })
        );
        assert_eq!(
            NumberError::NonPositiveLength.to_string(),
            "Length must be greater than zero"
        );
    }

    #[test]
    fn test_n_formatter() {
        assert_eq!(n_formatter(Some("")), 0.0);
        assert_eq!(n_formatter(Some("123")), 123.0);
        assert_eq!(n_formatter(Some("45.67")), 45.67);
        assert_eq!(n_formatter(Some("1k")), 1000.0);
        assert_eq!(n_formatter(Some("1K")), 1000.0);
        assert_eq!(n_formatter(Some("2.5k")), 2500.0);
        assert_eq!(n_formatter(Some("1m")), 1_000_000.0);
        assert_eq!(n_formatter(Some("3.2m")), 3_200_000.0);
        assert_eq!(n_formatter(Some("1b")), 1.0);
        assert_eq!(n_formatter(Some("abc")), 0.0);
    }
}
