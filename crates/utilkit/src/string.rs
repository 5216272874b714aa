//! String helpers: case conversion, slugs, masking and random strings.

use rand::Rng;
use regex::Regex;
use std::sync::OnceLock;

fn non_alnum_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-zA-Z0-9 ]").unwrap())
}

fn space_word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+([A-Za-z0-9_])?").unwrap())
}

fn lower_upper_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([a-z])([A-Z])").unwrap())
}

fn space_underscore_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\s_]").unwrap())
}

fn uuid_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$").unwrap()
    })
}

fn whitespace_run_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

fn non_slug_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9_-]+").unwrap())
}

fn dash_run_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"--+").unwrap())
}

/// Convert to camelCase.
///
/// Punctuation acts as a word separator; the first word stays lowercase.
///
/// # Examples
///
/// ```
/// use utilkit::string::camel_case;
///
/// assert_eq!(camel_case("hello-world"), "helloWorld");
/// assert_eq!(camel_case("Foo Bar baz"), "fooBarBaz");
/// ```
pub fn camel_case(s: &str) -> String {
    let lower = s.to_lowercase();
    let spaced = non_alnum_regex().replace_all(&lower, " ");
    space_word_regex()
        .replace_all(&spaced, |caps: &regex::Captures| {
            caps.get(1)
                .map(|m| m.as_str().to_uppercase())
                .unwrap_or_default()
        })
        .into_owned()
}

/// Convert to PascalCase by splitting on `separator` and capitalizing each word.
///
/// # Examples
///
/// ```
/// use utilkit::string::pascal_case;
///
/// assert_eq!(pascal_case("hello world", " "), "HelloWorld");
/// assert_eq!(pascal_case("foo_bar", "_"), "FooBar");
/// ```
pub fn pascal_case(s: &str, separator: &str) -> String {
    s.split(separator)
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) if first.is_ascii_alphanumeric() || first == '_' => {
                    let mut out = String::with_capacity(word.len());
                    out.push(first.to_ascii_uppercase());
                    out.push_str(chars.as_str());
                    out
                }
                _ => word.to_string(),
            }
        })
        .collect()
}

/// Convert to kebab-case.
///
/// # Examples
///
/// ```
/// use utilkit::string::kebab_case;
///
/// assert_eq!(kebab_case("helloWorld"), "hello-world");
/// assert_eq!(kebab_case("snake_case and spaces"), "snake-case-and-spaces");
/// ```
pub fn kebab_case(s: &str) -> String {
    let split = lower_upper_regex().replace_all(s, "${1}-${2}");
    space_underscore_regex()
        .replace_all(&split, "-")
        .to_lowercase()
}

/// Escape `& < > " '` as HTML entities.
///
/// The apostrophe becomes `&#039;`. See [`crate::html::escape`] for the
/// `&#39;` variant.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// Strip zero-width characters (U+200B..U+200D and U+FEFF).
pub fn remove_zero_width_space(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '\u{200B}'..='\u{200D}' | '\u{FEFF}'))
        .collect()
}

pub fn ends_with_any<S: AsRef<str>>(s: &str, suffixes: &[S]) -> bool {
    suffixes.iter().any(|suffix| s.ends_with(suffix.as_ref()))
}

pub fn starts_with_any<S: AsRef<str>>(s: &str, prefixes: &[S]) -> bool {
    prefixes.iter().any(|prefix| s.starts_with(prefix.as_ref()))
}

/// Check the canonical 8-4-4-4-12 hexadecimal UUID layout.
pub fn is_valid_uuid(id: &str) -> bool {
    uuid_regex().is_match(id)
}

/// Random color in `#rrggbb` form.
pub fn random_hex_color_code() -> String {
    random_hex_color_code_with(&mut rand::thread_rng())
}

pub fn random_hex_color_code_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("#{:06x}", rng.gen_range(0..=0xFF_FFFFu32))
}

/// Random alphanumeric string of `len` characters, starting with `prefix`.
///
/// The prefix counts towards the length and is cut when longer than `len`.
pub fn random_str(len: usize, prefix: &str) -> String {
    random_str_with(&mut rand::thread_rng(), len, prefix)
}

pub fn random_str_with<R: Rng + ?Sized>(rng: &mut R, len: usize, prefix: &str) -> String {
    let mut out = String::from(prefix);
    for _ in 0..len {
        let r: f64 = rng.gen();
        let digit = (r * 36.0) as u32;
        let c = char::from_digit(digit.min(35), 36).unwrap_or('0');
        // Letters are uppercased for roughly two fifths of draws.
        if digit > 9 && r > 0.3 && r < 0.7 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out.chars().take(len).collect()
}

/// Turn text into a URL slug.
///
/// # Examples
///
/// ```
/// use utilkit::string::slugify;
///
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify("  --Rust  is   fun--  "), "rust-is-fun");
/// ```
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    let dashed = whitespace_run_regex().replace_all(&lower, "-");
    let stripped = non_slug_regex().replace_all(&dashed, "");
    let collapsed = dash_run_regex().replace_all(&stripped, "-");
    collapsed.trim_matches('-').to_string()
}

/// Uppercase the first character.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Cut to `len` characters and append `...` when longer than `len`.
///
/// # Examples
///
/// ```
/// use utilkit::string::truncate;
///
/// assert_eq!(truncate("Hello, world", 5), "Hello...");
/// assert_eq!(truncate("Hi", 5), "Hi");
/// ```
pub fn truncate(s: &str, len: usize) -> String {
    if s.chars().count() <= len {
        return s.to_string();
    }
    let mut out: String = s.chars().take(len).collect();
    out.push_str("...");
    out
}

/// Show the first and last four characters, masking the middle.
///
/// # Examples
///
/// ```
/// use utilkit::string::mask_string;
///
/// assert_eq!(mask_string("4242424242424242"), "4242 **** 4242");
/// ```
pub fn mask_string(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let head: String = chars.iter().take(4).collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("{head} **** {tail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("hello world"), "helloWorld");
        assert_eq!(camel_case("HELLO_WORLD"), "helloWorld");
        assert_eq!(camel_case("some.dotted.name"), "someDottedName");
        assert_eq!(camel_case("version 2 release"), "version2Release");
        assert_eq!(camel_case(""), "");
    }

    #[test]
    fn test_pascal_case() {
        assert_eq!(pascal_case("the quick fox", " "), "TheQuickFox");
        assert_eq!(pascal_case("a-b-c", "-"), "ABC");
        assert_eq!(pascal_case(" leading", " "), "Leading");
    }

    #[test]
    fn test_kebab_case() {
        assert_eq!(kebab_case("backgroundColor"), "background-color");
        assert_eq!(kebab_case("already-kebab"), "already-kebab");
        assert_eq!(kebab_case("Mixed Case_words"), "mixed-case-words");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#039;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_remove_zero_width_space() {
        assert_eq!(remove_zero_width_space("a\u{200B}b\u{200C}c\u{200D}d\u{FEFF}"), "abcd");
    }

    #[test]
    fn test_starts_and_ends_with_any() {
        assert!(starts_with_any("https://x", &["http://", "https://"]));
        assert!(!starts_with_any("ftp://x", &["http://", "https://"]));
        assert!(ends_with_any("photo.png", &[".jpg", ".png"]));
        assert!(!ends_with_any("photo.gif", &[".jpg", ".png"]));
        assert!(!ends_with_any::<&str>("x", &[]));
    }

    #[test]
    fn test_is_valid_uuid() {
        assert!(is_valid_uuid("123e4567-e89b-12d3-a456-426614174000"));
        assert!(is_valid_uuid("123E4567-E89B-12D3-A456-426614174000"));
        assert!(!is_valid_uuid("123e4567e89b12d3a456426614174000"));
        assert!(!is_valid_uuid("123e4567-e89b-12d3-a456-42661417400g"));
    }

    #[test]
    fn test_random_hex_color_code() {
        let re = Regex::new(r"^#[0-9A-Fa-f]{6}$").unwrap();
        let mut rng = Xoshiro256StarStar::seed_from_u64(1);
        for _ in 0..50 {
            assert!(re.is_match(&random_hex_color_code_with(&mut rng)));
        }
        assert!(re.is_match(&random_hex_color_code()));
    }

    #[test]
    fn test_random_str() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(9);
        let s = random_str_with(&mut rng, 32, "");
        assert_eq!(s.chars().count(), 32);
        assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));

        let s = random_str(10, "id_");
        assert!(s.starts_with("id_"));
        assert_eq!(s.len(), 10);

        assert_eq!(random_str(2, "prefix"), "pr");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Rust & Cargo: a guide"), "rust-cargo-a-guide");
        assert_eq!(slugify("under_score"), "under_score");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("hello"), "Hello");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("éclair"), "Éclair");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("héllo wörld", 5), "héllo...");
        assert_eq!(truncate("", 0), "");
    }

    #[test]
    fn test_mask_string_short() {
        assert_eq!(mask_string("abc"), "abc **** abc");
        assert_eq!(mask_string("abcdefgh"), "abcd **** efgh");
    }
}
