//! Provider session credentials.

use std::fmt;
use std::sync::LazyLock;

use regex::{NoExpand, Regex};

/// Name of the anti-forgery cookie and the prefix used to find it.
const TOKEN_COOKIE: &str = "XSRF-TOKEN";

static TOKEN_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"XSRF-TOKEN=([^;]+)").expect("valid regex"));

static TOKEN_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"XSRF-TOKEN=[^;]*").expect("valid regex"));

/// CSRF token plus the cookie string that must accompany it.
///
/// The cookie string is opaque; the only part we ever touch is its
/// `XSRF-TOKEN=` segment.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    token: String,
    cookies: String,
}

impl Credentials {
    /// Use caller-supplied values verbatim.
    pub fn new(token: impl Into<String>, cookies: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            cookies: cookies.into(),
        }
    }

    /// Minimal credentials holding only a freshly issued token.
    pub fn from_token(token: impl Into<String>) -> Self {
        let token = token.into();
        let cookies = format!("{TOKEN_COOKIE}={token}");
        Self { token, cookies }
    }

    /// Replace the token, patching it into the existing cookie string.
    pub fn with_token(&self, token: &str) -> Self {
        Self {
            token: token.to_string(),
            cookies: patch_cookie_token(&self.cookies, token),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn cookies(&self) -> &str {
        &self.cookies
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &token_preview(&self.token))
            .field("cookies", &format_args!("<{} bytes>", self.cookies.len()))
            .finish()
    }
}

/// Pull the token out of a `Set-Cookie` header value.
pub fn extract_xsrf_token(set_cookie: &str) -> Option<&str> {
    TOKEN_VALUE
        .captures(set_cookie)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Replace the `XSRF-TOKEN=` segment of a cookie string, or prepend one.
///
/// ```
/// use ticket_bot::railway::patch_cookie_token;
///
/// assert_eq!(
///     patch_cookie_token("a=1; XSRF-TOKEN=old; b=2", "new"),
///     "a=1; XSRF-TOKEN=new; b=2"
/// );
/// assert_eq!(patch_cookie_token("a=1", "new"), "XSRF-TOKEN=new;a=1");
/// ```
pub fn patch_cookie_token(cookies: &str, token: &str) -> String {
    let segment = format!("{TOKEN_COOKIE}={token}");
    if cookies.is_empty() {
        segment
    } else if TOKEN_SEGMENT.is_match(cookies) {
        TOKEN_SEGMENT
            .replace_all(cookies, NoExpand(&segment))
            .into_owned()
    } else {
        format!("{segment};{cookies}")
    }
}

/// Short prefix of a token, safe to log.
pub fn token_preview(token: &str) -> String {
    let prefix: String = token.chars().take(8).collect();
    format!("{prefix}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_token_from_set_cookie() {
        assert_eq!(
            extract_xsrf_token("XSRF-TOKEN=abc123; Path=/; Secure"),
            Some("abc123")
        );
        assert_eq!(extract_xsrf_token("XSRF-TOKEN=abc123"), Some("abc123"));
        assert_eq!(extract_xsrf_token("session=xyz; Path=/"), None);
        assert_eq!(extract_xsrf_token("XSRF-TOKEN=; Path=/"), None);
    }

    #[test]
    fn patches_existing_segment() {
        assert_eq!(
            patch_cookie_token("_ga=1; XSRF-TOKEN=old; sid=2", "fresh"),
            "_ga=1; XSRF-TOKEN=fresh; sid=2"
        );
        // An empty value is still a segment to replace.
        assert_eq!(patch_cookie_token("XSRF-TOKEN=;sid=2", "t"), "XSRF-TOKEN=t;sid=2");
    }

    #[test]
    fn prepends_missing_segment() {
        assert_eq!(patch_cookie_token("sid=2", "fresh"), "XSRF-TOKEN=fresh;sid=2");
        assert_eq!(patch_cookie_token("", "fresh"), "XSRF-TOKEN=fresh");
    }

    #[test]
    fn replacement_is_literal() {
        assert_eq!(patch_cookie_token("XSRF-TOKEN=old", "$1x"), "XSRF-TOKEN=$1x");
    }

    #[test]
    fn minimal_credentials() {
        let creds = Credentials::from_token("tok");
        assert_eq!(creds.token(), "tok");
        assert_eq!(creds.cookies(), "XSRF-TOKEN=tok");

        let refreshed = Credentials::new("a", "x=1; XSRF-TOKEN=a").with_token("b");
        assert_eq!(refreshed.token(), "b");
        assert_eq!(refreshed.cookies(), "x=1; XSRF-TOKEN=b");
    }

    #[test]
    fn debug_redacts() {
        let creds = Credentials::new("0123456789abcdef", "XSRF-TOKEN=0123456789abcdef");
        let debug = format!("{creds:?}");
        assert!(debug.contains("01234567..."));
        assert!(!debug.contains("0123456789abcdef"));
    }
}
