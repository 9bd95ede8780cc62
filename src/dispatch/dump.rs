//! Human-readable renderings of requests and responses.

use std::borrow::Cow;

use reqwest::header::HeaderMap;
use reqwest::{StatusCode, Version};
use serde::Serialize;

use crate::config::HEADER_HOST;
use crate::scan::{Header, Method, Request};

/// Renders `request` as an HTTP/1.1 message.
///
/// The `Host` line comes from the URL; `Host` headers are not repeated.
pub fn dump_request(request: &Request) -> String {
    let mut out = format!(
        "{} {} {}\r\nHost: {}\r\n",
        request.method(),
        request.target(),
        request.version(),
        request.authority()
    );
    for header in request
        .headers()
        .iter()
        .filter(|h| !h.name.eq_ignore_ascii_case(HEADER_HOST))
    {
        out.push_str(&format!("{}: {}\r\n", header.name, header.value));
    }
    out.push_str("\r\n");
    out.push_str(&String::from_utf8_lossy(request.body()));
    out
}

/// Renders a response status line and headers, ending with the blank line.
pub fn format_response_head(version: Version, status: StatusCode, headers: &HeaderMap) -> String {
    let mut out = format!("{version:?} {status}\r\n");
    for (name, value) in headers {
        out.push_str(&format!(
            "{}: {}\r\n",
            name,
            String::from_utf8_lossy(value.as_bytes())
        ));
    }
    out.push_str("\r\n");
    out
}

#[derive(Serialize)]
struct RequestRecord<'a> {
    method: Method,
    url: &'a str,
    version: String,
    headers: &'a [Header],
    body: Cow<'a, str>,
}

/// Renders `request` as a single-line JSON object.
pub fn request_to_json(request: &Request) -> serde_json::Result<String> {
    serde_json::to_string(&RequestRecord {
        method: request.method(),
        url: request.url().as_str(),
        version: request.version().to_string(),
        headers: request.headers(),
        body: String::from_utf8_lossy(request.body()),
    })
}
