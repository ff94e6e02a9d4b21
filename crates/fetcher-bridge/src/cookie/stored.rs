use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// A cookie as kept by the jar, with the attributes needed for matching.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCookie {
    pub name: String,
    pub value: String,
    /// Lowercase domain without a leading dot.
    pub domain: String,
    /// `true` when no `Domain` attribute was given: only the exact host matches.
    pub host_only: bool,
    pub path: String,
    /// `None` for session cookies.
    pub expires: Option<DateTime<Utc>>,
    pub secure: bool,
    pub http_only: bool,
}

impl StoredCookie {
    /// Parse a `Set-Cookie` header value received from `url`.
    ///
    /// Returns `None` when the header is unusable or names a domain the
    /// request host cannot set. A `Max-Age` of zero or less yields a cookie
    /// that is already expired, which removes any stored copy.
    pub fn parse(header: &str, url: &Url, now: DateTime<Utc>) -> Option<Self> {
        let host = url.host_str()?.to_ascii_lowercase();
        let mut parts = header.split(';');

        let (name, value) = parts.next()?.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let mut domain_attr: Option<String> = None;
        let mut path_attr: Option<String> = None;
        let mut expires_attr: Option<DateTime<Utc>> = None;
        let mut max_age: Option<DateTime<Utc>> = None;
        let mut secure = false;
        let mut http_only = false;

        for attr in parts {
            let (key, val) = match attr.split_once('=') {
                Some((k, v)) => (k.trim(), v.trim()),
                None => (attr.trim(), ""),
            };
            match key.to_ascii_lowercase().as_str() {
                "domain" => {
                    let d = val.trim_start_matches('.').to_ascii_lowercase();
                    if !d.is_empty() {
                        domain_attr = Some(d);
                    }
                }
                "path" if val.starts_with('/') => path_attr = Some(val.to_string()),
                "expires" => {
                    if let Some(t) = parse_cookie_date(val) {
                        expires_attr = Some(t);
                    }
                }
                "max-age" => {
                    if let Ok(secs) = val.parse::<i64>() {
                        max_age = Some(if secs <= 0 {
                            now
                        } else {
                            Duration::try_seconds(secs)
                                .and_then(|d| now.checked_add_signed(d))
                                .unwrap_or(DateTime::<Utc>::MAX_UTC)
                        });
                    }
                }
                "secure" => secure = true,
                "httponly" => http_only = true,
                _ => {}
            }
        }

        let (domain, host_only) = match domain_attr {
            Some(d) if domain_matches(&host, &d) => (d, false),
            Some(_) => return None,
            None => (host, true),
        };

        Some(Self {
            name: name.to_string(),
            value: value.trim().to_string(),
            domain,
            host_only,
            path: path_attr.unwrap_or_else(|| default_path(url.path())),
            expires: max_age.or(expires_attr),
            secure,
            http_only,
        })
    }

    /// Identity within the jar: a later cookie with the same key replaces it.
    pub fn key(&self) -> (String, String, String) {
        (self.domain.clone(), self.path.clone(), self.name.clone())
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_some_and(|exp| exp <= now)
    }

    /// Whether this cookie should be sent with a request to `url`.
    pub fn matches(&self, url: &Url, now: DateTime<Utc>) -> bool {
        let Some(host) = url.host_str() else {
            return false;
        };
        let host = host.to_ascii_lowercase();

        let domain_ok = if self.host_only {
            host == self.domain
        } else {
            domain_matches(&host, &self.domain)
        };

        domain_ok
            && path_matches(url.path(), &self.path)
            && (!self.secure || url.scheme() == "https")
            && !self.is_expired(now)
    }

    /// `name=value` as sent in a `Cookie` header.
    pub fn to_cookie_header(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

/// RFC 6265 §5.1.3 domain matching.
fn domain_matches(host: &str, domain: &str) -> bool {
    host == domain
        || (host.len() > domain.len()
            && host.ends_with(domain)
            && host.as_bytes()[host.len() - domain.len() - 1] == b'.'
            && host.parse::<std::net::IpAddr>().is_err())
}

/// RFC 6265 §5.1.4 path matching.
fn path_matches(request_path: &str, cookie_path: &str) -> bool {
    request_path == cookie_path
        || (request_path.starts_with(cookie_path)
            && (cookie_path.ends_with('/') || request_path[cookie_path.len()..].starts_with('/')))
}

/// RFC 6265 §5.1.4 default path: the request path up to its last `/`.
fn default_path(request_path: &str) -> String {
    match request_path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(i) => request_path[..i].to_string(),
    }
}

/// `Expires` in the RFC 1123 form or the legacy dashed forms.
fn parse_cookie_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc2822(raw) {
        return Some(t.with_timezone(&Utc));
    }
    const LEGACY_FORMATS: &[&str] = &[
        "%a, %d-%b-%Y %H:%M:%S GMT",
        "%A, %d-%b-%y %H:%M:%S GMT",
        "%a, %d-%b-%y %H:%M:%S GMT",
        "%a %b %e %H:%M:%S %Y",
    ];
    LEGACY_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn parses_plain_session_cookie() {
        let c = StoredCookie::parse("session=abc123", &url("https://example.com/app/login"), now())
            .unwrap();
        assert_eq!(c.name, "session");
        assert_eq!(c.value, "abc123");
        assert_eq!(c.domain, "example.com");
        assert!(c.host_only);
        assert_eq!(c.path, "/app");
        assert_eq!(c.expires, None);
        assert!(!c.secure);
    }

    #[test]
    fn parses_attributes_case_insensitively() {
        let c = StoredCookie::parse(
            "id=7; DOMAIN=.Example.com; path=/; SECURE; HttpOnly; SameSite=Lax",
            &url("https://www.example.com/"),
            now(),
        )
        .unwrap();
        assert_eq!(c.domain, "example.com");
        assert!(!c.host_only);
        assert_eq!(c.path, "/");
        assert!(c.secure);
        assert!(c.http_only);
    }

    #[test]
    fn rejects_foreign_domain() {
        assert!(StoredCookie::parse(
            "a=1; Domain=evil.com",
            &url("https://example.com/"),
            now()
        )
        .is_none());
        assert!(StoredCookie::parse(
            "a=1; Domain=ample.com",
            &url("https://example.com/"),
            now()
        )
        .is_none());
    }

    #[test]
    fn rejects_nameless_cookie() {
        assert!(StoredCookie::parse("=value", &url("https://example.com/"), now()).is_none());
        assert!(StoredCookie::parse("novalue", &url("https://example.com/"), now()).is_none());
    }

    #[test]
    fn expires_rfc1123_and_legacy() {
        let c = StoredCookie::parse(
            "a=1; Expires=Wed, 21 Oct 2026 07:28:00 GMT",
            &url("https://example.com/"),
            now(),
        )
        .unwrap();
        assert_eq!(
            c.expires,
            Some(Utc.with_ymd_and_hms(2026, 10, 21, 7, 28, 0).unwrap())
        );

        let c = StoredCookie::parse(
            "a=1; expires=Wed, 21-Oct-2026 07:28:00 GMT",
            &url("https://example.com/"),
            now(),
        )
        .unwrap();
        assert_eq!(
            c.expires,
            Some(Utc.with_ymd_and_hms(2026, 10, 21, 7, 28, 0).unwrap())
        );
    }

    #[test]
    fn max_age_wins_over_expires() {
        let c = StoredCookie::parse(
            "a=1; Max-Age=60; Expires=Wed, 21 Oct 2026 07:28:00 GMT",
            &url("https://example.com/"),
            now(),
        )
        .unwrap();
        assert_eq!(c.expires, Some(now() + Duration::seconds(60)));
    }

    #[test]
    fn non_positive_max_age_is_already_expired() {
        let c = StoredCookie::parse("a=1; Max-Age=0", &url("https://example.com/"), now()).unwrap();
        assert!(c.is_expired(now()));
    }

    #[test]
    fn host_only_cookie_does_not_reach_subdomains() {
        let c = StoredCookie::parse("a=1", &url("https://example.com/"), now()).unwrap();
        assert!(c.matches(&url("https://example.com/x"), now()));
        assert!(!c.matches(&url("https://api.example.com/x"), now()));
    }

    #[test]
    fn domain_cookie_reaches_subdomains() {
        let c = StoredCookie::parse("a=1; Domain=example.com", &url("https://example.com/"), now())
            .unwrap();
        assert!(c.matches(&url("https://api.example.com/x"), now()));
        assert!(!c.matches(&url("https://notexample.com/x"), now()));
    }

    #[test]
    fn path_matching_respects_boundaries() {
        let c = StoredCookie::parse("a=1; Path=/api", &url("https://example.com/"), now()).unwrap();
        assert!(c.matches(&url("https://example.com/api"), now()));
        assert!(c.matches(&url("https://example.com/api/users"), now()));
        assert!(!c.matches(&url("https://example.com/apis"), now()));
        assert!(!c.matches(&url("https://example.com/"), now()));
    }

    #[test]
    fn secure_cookie_only_over_https() {
        let c = StoredCookie::parse("a=1; Secure", &url("https://example.com/"), now()).unwrap();
        assert!(c.matches(&url("https://example.com/"), now()));
        assert!(!c.matches(&url("http://example.com/"), now()));
    }

    #[test]
    fn expired_cookie_never_matches() {
        let c = StoredCookie::parse("a=1; Max-Age=10", &url("https://example.com/"), now()).unwrap();
        assert!(c.matches(&url("https://example.com/"), now()));
        assert!(!c.matches(&url("https://example.com/"), now() + Duration::seconds(11)));
    }

    #[test]
    fn default_path_rules() {
        assert_eq!(default_path(""), "/");
        assert_eq!(default_path("/"), "/");
        assert_eq!(default_path("/login"), "/");
        assert_eq!(default_path("/a/b/c"), "/a/b");
    }

    #[test]
    fn ip_hosts_only_match_exactly() {
        assert!(domain_matches("127.0.0.1", "127.0.0.1"));
        assert!(!domain_matches("10.0.0.1", "0.0.1"));
    }

    #[test]
    fn cookie_header_format() {
        let c = StoredCookie::parse("session=abc; Path=/", &url("https://example.com/"), now())
            .unwrap();
        assert_eq!(c.to_cookie_header(), "session=abc");
    }
}
