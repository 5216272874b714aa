//! URL helpers.

/// Append `/` unless the URL already ends with one.
///
/// # Examples
///
/// ```
/// use utilkit::url::add_trailing_slash;
///
/// assert_eq!(add_trailing_slash("https://a.dev/docs"), "https://a.dev/docs/");
/// assert_eq!(add_trailing_slash("https://a.dev/"), "https://a.dev/");
/// ```
pub fn add_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    }
}
