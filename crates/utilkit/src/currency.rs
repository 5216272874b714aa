//! Currency formatting.

/// Format an amount of cents as US dollars, e.g. `"$1,234.56"`.
///
/// Fractions of a cent round half away from zero; negative amounts are
/// written `"-$10.00"`.
///
/// # Examples
///
/// ```
/// use utilkit::currency::to_dollars;
///
/// assert_eq!(to_dollars(1000.0), "$10.00");
/// assert_eq!(to_dollars(123_456.0), "$1,234.56");
/// assert_eq!(to_dollars(-1000.0), "-$10.00");
/// ```
pub fn to_dollars(cents: f64) -> String {
    let rounded = cents.round();
    let negative = rounded < 0.0;
    let total = rounded.abs() as u128;
    let dollars = group_thousands(&(total / 100).to_string());
    let sign = if negative { "-" } else { "" };
    format!("{sign}${dollars}.{:02}", total % 100)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
