//! Parsed request values.

use std::fmt;
use std::str::FromStr;

use log::warn;
use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use url::Url;

use crate::config::{DEFAULT_HOST, DEFAULT_SCHEME, HEADER_HOST};
use crate::error_handling::ScanError;

/// Standard HTTP request methods recognised at the start of a request line.
///
/// Parsing is case-insensitive; rendering is upper-case.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
    Serialize,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
#[allow(missing_docs)]
pub enum Method {
    Connect,
    Delete,
    Get,
    Head,
    Options,
    Patch,
    Post,
    Put,
    Trace,
}

/// Protocol version in `HTTP/<major>.<minor>` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpVersion {
    /// Digit before the dot
    pub major: u8,
    /// Digit after the dot
    pub minor: u8,
}

impl FromStr for HttpVersion {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unsupported = || ScanError::UnsupportedVersion(s.to_string());
        let (major, minor) = s
            .strip_prefix("HTTP/")
            .and_then(|v| v.split_once('.'))
            .ok_or_else(unsupported)?;
        Ok(Self {
            major: major.parse().map_err(|_| unsupported())?,
            minor: minor.parse().map_err(|_| unsupported())?,
        })
    }
}

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP/{}.{}", self.major, self.minor)
    }
}

/// One `Name: value` header line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    /// Name as written, trimmed
    pub name: String,
    /// Everything after the first `:`, trimmed
    pub value: String,
}

impl Header {
    /// Creates a header from its parts.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Splits a header line on its first `:`, trimming both sides.
    ///
    /// A line without a colon becomes a header with an empty value.
    pub fn parse_line(line: &str) -> Self {
        match line.split_once(':') {
            Some((name, value)) => Self::new(name.trim(), value.trim()),
            None => Self::new(line.trim(), ""),
        }
    }
}

/// A request parsed from one request block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    url: Url,
    version: HttpVersion,
    headers: Vec<Header>,
    body: Vec<u8>,
}

impl Request {
    /// Creates a request with no headers and an empty body.
    pub fn new(method: Method, url: Url, version: HttpVersion) -> Self {
        Self {
            method,
            url,
            version,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Request method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Absolute request URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Protocol version, always `HTTP/1.1`.
    pub fn version(&self) -> HttpVersion {
        self.version
    }

    /// Headers in source order, duplicates included.
    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    /// Body bytes, each source line followed by `\n`.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Path plus query, as it appears in an origin-form request line.
    pub fn target(&self) -> String {
        match self.url.query() {
            Some(query) => format!("{}?{}", self.url.path(), query),
            None => self.url.path().to_string(),
        }
    }

    /// Host and optional port of the URL.
    pub fn authority(&self) -> String {
        let host = self.url.host_str().unwrap_or_default();
        match self.url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        }
    }

    /// First header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// Appends a header. A header named exactly `Host` also rewrites the
    /// URL's host and port.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidTarget`] when a `Host` value cannot serve
    /// as the URL authority; the header is not recorded.
    pub fn add_header(&mut self, header: Header) -> Result<(), ScanError> {
        if header.name == HEADER_HOST {
            self.set_authority(&header.value)?;
        }
        self.headers.push(header);
        Ok(())
    }

    /// Appends one body line followed by `\n`.
    pub fn push_body_line(&mut self, line: &str) {
        self.body.extend_from_slice(line.as_bytes());
        self.body.push(b'\n');
    }

    fn set_authority(&mut self, authority: &str) -> Result<(), ScanError> {
        let invalid = |source: url::ParseError| {
            warn!("Unusable Host header value {authority:?}: {source}");
            ScanError::InvalidTarget {
                target: authority.to_string(),
                source,
            }
        };
        let parsed = Url::parse(&format!("{DEFAULT_SCHEME}://{authority}")).map_err(invalid)?;
        let host = parsed
            .host_str()
            .ok_or_else(|| invalid(url::ParseError::EmptyHost))?;
        self.url.set_host(Some(host)).map_err(invalid)?;
        self.url
            .set_port(parsed.port())
            .map_err(|()| invalid(url::ParseError::InvalidPort))
    }
}

/// Builds the absolute URL for a request-line target.
///
/// Targets without a scheme get `http`; origin-form targets (`/path`) get a
/// placeholder host that a later `Host` header replaces.
pub fn resolve_target(target: &str) -> Result<Url, ScanError> {
    let absolute = if target.contains("://") {
        target.to_string()
    } else if target.starts_with("//") {
        format!("{DEFAULT_SCHEME}:{target}")
    } else if target.starts_with('/') {
        format!("{DEFAULT_SCHEME}://{DEFAULT_HOST}{target}")
    } else {
        format!("{DEFAULT_SCHEME}://{target}")
    };
    Url::parse(&absolute).map_err(|source| ScanError::InvalidTarget {
        target: target.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn request(target: &str) -> Request {
        Request::new(
            Method::Get,
            resolve_target(target).expect("valid target"),
            HttpVersion { major: 1, minor: 1 },
        )
    }

    #[test]
    fn test_method_parses_case_insensitively() {
        assert_eq!("post".parse::<Method>().ok(), Some(Method::Post));
        assert_eq!("PaTcH".parse::<Method>().ok(), Some(Method::Patch));
        assert!("FETCH".parse::<Method>().is_err());
    }

    #[test]
    fn test_method_renders_upper_case() {
        let names: Vec<String> = Method::iter().map(|m| m.to_string()).collect();
        assert_eq!(
            names,
            vec!["CONNECT", "DELETE", "GET", "HEAD", "OPTIONS", "PATCH", "POST", "PUT", "TRACE"]
        );
        assert_eq!(Method::Options.as_ref(), "OPTIONS");
    }

    #[test]
    fn test_http_version_parse() {
        let version: HttpVersion = "HTTP/1.1".parse().expect("valid version");
        assert_eq!(version, HttpVersion { major: 1, minor: 1 });
        assert_eq!(version.to_string(), "HTTP/1.1");
        assert!("HTTP/x".parse::<HttpVersion>().is_err());
        assert!("HTTP/1".parse::<HttpVersion>().is_err());
        assert!("SPDY/3.1".parse::<HttpVersion>().is_err());
    }

    #[test]
    fn test_resolve_target_forms() {
        assert_eq!(
            resolve_target("http://example.com/baz/").unwrap().as_str(),
            "http://example.com/baz/"
        );
        assert_eq!(
            resolve_target("https://example.com").unwrap().scheme(),
            "https"
        );
        assert_eq!(
            resolve_target("example.com:8080/x?y=1").unwrap().as_str(),
            "http://example.com:8080/x?y=1"
        );
        assert_eq!(
            resolve_target("//example.com/a").unwrap().as_str(),
            "http://example.com/a"
        );
        let origin = resolve_target("/foo/bar").unwrap();
        assert_eq!(origin.scheme(), "http");
        assert_eq!(origin.path(), "/foo/bar");
    }

    #[test]
    fn test_resolve_target_rejects_garbage() {
        let err = resolve_target("http://exa mple.com/").unwrap_err();
        assert!(matches!(err, ScanError::InvalidTarget { .. }));
    }

    #[test]
    fn test_header_parse_line() {
        assert_eq!(
            Header::parse_line("Content-Type :  application/json "),
            Header::new("Content-Type", "application/json")
        );
        assert_eq!(
            Header::parse_line("X-Time: 12:30:00"),
            Header::new("X-Time", "12:30:00")
        );
        assert_eq!(Header::parse_line("NoColon"), Header::new("NoColon", ""));
    }

    #[test]
    fn test_host_header_sets_url_host() {
        let mut req = request("/foo");
        req.add_header(Header::new("Host", "example.org")).unwrap();
        assert_eq!(req.url().host_str(), Some("example.org"));
        assert_eq!(req.header("host"), Some("example.org"));
        assert_eq!(req.authority(), "example.org");
    }

    #[test]
    fn test_host_header_with_port_replaces_port() {
        let mut req = request("http://localhost:9000/foo");
        req.add_header(Header::new("Host", "example.org:8080")).unwrap();
        assert_eq!(req.url().as_str(), "http://example.org:8080/foo");

        req.add_header(Header::new("Host", "other.org")).unwrap();
        assert_eq!(req.url().as_str(), "http://other.org/foo");
        assert_eq!(req.headers().len(), 2);
    }

    #[test]
    fn test_host_rule_is_case_sensitive() {
        let mut req = request("http://a.example/");
        req.add_header(Header::new("host", "b.example")).unwrap();
        assert_eq!(req.url().host_str(), Some("a.example"));
    }

    #[test]
    fn test_unusable_host_header_is_rejected() {
        let mut req = request("http://a.example/");
        let err = req.add_header(Header::new("Host", "bad host")).unwrap_err();
        assert!(matches!(err, ScanError::InvalidTarget { ref target, .. } if target == "bad host"));
        assert!(req.headers().is_empty());
        assert_eq!(req.header("Host"), None);
    }

    #[test]
    fn test_target_includes_query() {
        let req = request("http://a.example/p?q=1");
        assert_eq!(req.target(), "/p?q=1");
    }

    #[test]
    fn test_push_body_line() {
        let mut req = request("/");
        req.push_body_line("{");
        req.push_body_line("}");
        assert_eq!(req.body(), b"{\n}\n");
    }
}
