//! Format validators for emails, IP addresses and URLs.

use regex::Regex;
use std::sync::OnceLock;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))"#,
            r"@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$",
        ))
        .unwrap()
    })
}

fn ipv4_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9][0-9]|[0-9])(?:\.(?:25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9][0-9]|[0-9])){3}$")
            .unwrap()
    })
}

fn ipv6_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"(?i)(",
            r"([0-9a-f]{1,4}:){7}[0-9a-f]{1,4}|",
            r"([0-9a-f]{1,4}:){1,7}:|",
            r"([0-9a-f]{1,4}:){1,6}:[0-9a-f]{1,4}|",
            r"([0-9a-f]{1,4}:){1,5}(:[0-9a-f]{1,4}){1,2}|",
            r"([0-9a-f]{1,4}:){1,4}(:[0-9a-f]{1,4}){1,3}|",
            r"([0-9a-f]{1,4}:){1,3}(:[0-9a-f]{1,4}){1,4}|",
            r"([0-9a-f]{1,4}:){1,2}(:[0-9a-f]{1,4}){1,5}|",
            r"[0-9a-f]{1,4}:((:[0-9a-f]{1,4}){1,6})|",
            r":((:[0-9a-f]{1,4}){1,7}|:)|",
            r"fe80:(:[0-9a-f]{0,4}){0,4}%[0-9a-z]+|",
            r"::(ffff(:0{1,4})?:)?((25[0-5]|(2[0-4]|1?[0-9])?[0-9])\.){3}(25[0-5]|(2[0-4]|1?[0-9])?[0-9])|",
            r"([0-9a-f]{1,4}:){1,4}:((25[0-5]|(2[0-4]|1?[0-9])?[0-9])\.){3}(25[0-5]|(2[0-4]|1?[0-9])?[0-9])",
            r")",
        ))
        .unwrap()
    })
}

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"(?i)^(https?://)?",
            r"((([a-z0-9]([a-z0-9-]*[a-z0-9])*)\.)+[a-z]{2,}|",
            r"(([0-9]{1,3}\.){3}[0-9]{1,3}))",
            r"(:[0-9]+)?(/[-a-z0-9%_.~+]*)*",
            r"(\?[;&a-z0-9%_.~+=-]*)?",
            r"(#[-a-z0-9_]*)?$",
        ))
        .unwrap()
    })
}

/// Check an email address. Matching is case-insensitive.
///
/// # Examples
///
/// ```
/// use utilkit::validators::is_valid_email;
///
/// assert!(is_valid_email("example@email.com"));
/// assert!(!is_valid_email("example@email"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(&email.to_lowercase())
}

/// Check a dotted-quad IPv4 address.
pub fn is_valid_ipv4(ip: &str) -> bool {
    ipv4_regex().is_match(ip)
}

/// Check for an IPv6 address anywhere in the input.
///
/// The match is not anchored, so surrounding text is tolerated.
pub fn is_valid_ipv6(ip: &str) -> bool {
    ipv6_regex().is_match(ip)
}

/// Check an http(s) URL or bare domain.
///
/// A scheme is optional but only `http` and `https` are accepted. The host must
/// be a dotted domain with a top-level part, or an IPv4 address.
///
/// # Examples
///
/// ```
/// use utilkit::validators::is_valid_url;
///
/// assert!(is_valid_url("https://google.com"));
/// assert!(is_valid_url("example.com"));
/// assert!(!is_valid_url("ftp://example.com"));
/// ```
pub fn is_valid_url(url: &str) -> bool {
    url_regex().is_match(url)
}

/// Strip leading and trailing newline characters.
pub fn trim_new_lines(s: &str) -> &str {
    s.trim_matches('\n')
}
