//! Browser-cookie semantics over an in-memory jar
//!
//! Mirrors what a page script sees through `document.cookie`: the jar can be
//! seeded from a request `Cookie` header, values are percent-decoded on read
//! (`decodeURIComponent`) and percent-encoded on write, and every write
//! carries an expiry and the path-global scope `/`.

use chrono::{DateTime, Duration, Utc};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::error::Result;
use crate::store::{Clock, PreferenceStore, expiry, validate_key};

/// Characters `encodeURIComponent` leaves alone
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Expiry format used in `Set-Cookie` style assignments
const GMT_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// A single cookie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    /// Value in its encoded (wire) form
    pub value: String,
    /// `None` for session cookies
    pub expires: Option<DateTime<Utc>>,
    pub path: String,
}

/// Cookie jar for one client
#[derive(Debug, Clone)]
pub struct CookieJar {
    cookies: Vec<Cookie>,
    clock: Clock,
}

impl Default for CookieJar {
    fn default() -> Self {
        Self::new()
    }
}

impl CookieJar {
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            cookies: Vec::new(),
            clock,
        }
    }

    /// Seed a jar from a `name=value; other=value` header.
    ///
    /// Seeded cookies are session cookies on path `/`. Fragments without `=`
    /// are skipped; a repeated name keeps its first value.
    pub fn from_header(header: &str) -> Self {
        let mut jar = Self::new();
        jar.extend_from_header(header);
        jar
    }

    pub fn extend_from_header(&mut self, header: &str) {
        for fragment in header.split(';') {
            let Some((name, value)) = fragment.trim_start().split_once('=') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() || self.get(name).is_some() {
                continue;
            }
            self.cookies.push(Cookie {
                name: name.to_string(),
                value: value.to_string(),
                expires: None,
                path: "/".to_string(),
            });
        }
    }

    /// The live cookie called `name`
    pub fn get(&self, name: &str) -> Option<&Cookie> {
        let now = (self.clock)();
        self.cookies
            .iter()
            .find(|c| c.name == name && is_live(c, now))
    }

    /// Render live cookies the way `document.cookie` reads
    pub fn header(&self) -> String {
        let now = (self.clock)();
        self.cookies
            .iter()
            .filter(|c| is_live(c, now))
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// The assignment a page would make to persist `name`:
    /// `name=value;expires=<date>;path=/`
    pub fn set_cookie_line(&self, name: &str) -> Option<String> {
        let cookie = self.get(name)?;
        let mut line = format!("{}={}", cookie.name, cookie.value);
        if let Some(expires) = cookie.expires {
            line.push_str(";expires=");
            line.push_str(&expires.format(GMT_FORMAT).to_string());
        }
        line.push_str(";path=");
        line.push_str(&cookie.path);
        Some(line)
    }
}

fn is_live(cookie: &Cookie, now: DateTime<Utc>) -> bool {
    cookie.expires.is_none_or(|e| e > now)
}

impl PreferenceStore for CookieJar {
    fn read(&self, key: &str) -> Option<String> {
        let cookie = self.get(key)?;
        match percent_decode_str(&cookie.value).decode_utf8() {
            Ok(decoded) => Some(decoded.into_owned()),
            Err(_) => Some(cookie.value.clone()),
        }
    }

    fn write(&mut self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        validate_key(key)?;
        if ttl <= Duration::zero() {
            self.cookies.retain(|c| c.name != key);
            return Ok(());
        }
        let expires = expiry((self.clock)(), key, ttl)?;
        self.cookies.retain(|c| c.name != key);
        self.cookies.push(Cookie {
            name: key.to_string(),
            value: utf8_percent_encode(value, URI_COMPONENT).to_string(),
            expires: Some(expires),
            path: "/".to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_from_header_splits_and_trims() {
        let jar = CookieJar::from_header("theme=dark; groupsPref=%5B%22group-java%22%5D;broken");
        assert_eq!(jar.get("theme").unwrap().value, "dark");
        assert_eq!(
            jar.read("groupsPref").as_deref(),
            Some(r#"["group-java"]"#)
        );
        assert!(jar.get("broken").is_none());
    }

    #[test]
    fn test_raw_json_cookie_reads_unchanged() {
        let jar = CookieJar::from_header(r#"groupsPref=["group-sbt","group-java"]"#);
        assert_eq!(
            jar.read("groupsPref").as_deref(),
            Some(r#"["group-sbt","group-java"]"#)
        );
    }

    #[test]
    fn test_write_encodes_like_uri_component() {
        let mut jar = CookieJar::with_clock(fixed_now);
        jar.write("groupsPref", r#"{"build":"group-sbt"}"#, Duration::days(365))
            .unwrap();
        assert_eq!(
            jar.get("groupsPref").unwrap().value,
            "%7B%22build%22%3A%22group-sbt%22%7D"
        );
        assert_eq!(
            jar.read("groupsPref").as_deref(),
            Some(r#"{"build":"group-sbt"}"#)
        );
    }

    #[test]
    fn test_set_cookie_line_carries_expiry_and_path() {
        let mut jar = CookieJar::with_clock(fixed_now);
        jar.write("groupsPref", "x", Duration::days(365)).unwrap();
        assert_eq!(
            jar.set_cookie_line("groupsPref").as_deref(),
            Some("groupsPref=x;expires=Sat, 01 Mar 2025 12:00:00 GMT;path=/")
        );
    }

    #[test]
    fn test_out_of_range_expiry_keeps_the_old_cookie() {
        let mut jar = CookieJar::with_clock(fixed_now);
        jar.write("groupsPref", "kept", Duration::days(1)).unwrap();
        assert!(jar.write("groupsPref", "lost", Duration::MAX).is_err());
        assert_eq!(jar.read("groupsPref").as_deref(), Some("kept"));
    }

    #[test]
    fn test_write_replaces_and_header_lists_live_cookies() {
        let mut jar = CookieJar::with_clock(fixed_now);
        jar.extend_from_header("a=1");
        jar.write("b", "2", Duration::days(1)).unwrap();
        jar.write("b", "3", Duration::days(1)).unwrap();
        assert_eq!(jar.header(), "a=1; b=3");

        jar.write("b", "3", Duration::zero()).unwrap();
        assert_eq!(jar.header(), "a=1");
    }
}
