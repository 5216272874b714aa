//! Country helpers.

const REGIONAL_INDICATOR_OFFSET: u32 = 127_397;

/// Turn a two-letter ISO 3166 code into its flag emoji.
///
/// Letters map to regional indicator symbols; other characters are kept as-is.
///
/// # Examples
///
/// ```
/// use utilkit::country::get_flag_emoji;
///
/// assert_eq!(get_flag_emoji("us"), "🇺🇸");
/// assert_eq!(get_flag_emoji("LV"), "🇱🇻");
/// ```
pub fn get_flag_emoji(country_code: &str) -> String {
    country_code
        .chars()
        .map(|c| {
            if c.is_ascii_alphabetic() {
                char::from_u32(REGIONAL_INDICATOR_OFFSET + u32::from(c.to_ascii_uppercase())).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}
