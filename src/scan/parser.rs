//! Request block state machine.
//!
//! Consumes expanded content lines and builds one [`Request`] at a time:
//!
//! ```text
//! Seeking --request line--> RequestLine --> Headers --blank--> Body --blank/EOF--> Done
//! ```
//!
//! Lines seen while `Seeking` that do not start a request are dropped.

use log::trace;

use crate::config::{DEFAULT_METHOD, DEFAULT_TARGET, HTTP_VERSION};
use crate::error_handling::ScanError;
use crate::scan::request::{resolve_target, Header, HttpVersion, Method, Request};

/// Where the parser stands within the current request block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Waiting for a request line
    Seeking,
    /// Building the request from its request line
    RequestLine,
    /// Reading `Name: value` lines
    Headers,
    /// Reading body lines
    Body,
    /// A request was handed out; the next line starts over
    Done,
}

/// Builds requests from content lines.
#[derive(Debug)]
pub struct BlockParser {
    state: ParserState,
    request: Option<Request>,
}

impl Default for BlockParser {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockParser {
    /// Creates a parser waiting for a request line.
    pub fn new() -> Self {
        Self {
            state: ParserState::Seeking,
            request: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Feeds one expanded content line.
    ///
    /// Returns the finished request when `line` terminates its body.
    pub fn feed(&mut self, line: &str) -> Result<Option<Request>, ScanError> {
        if self.state == ParserState::Done {
            self.state = ParserState::Seeking;
        }

        match self.state {
            ParserState::Seeking => {
                if is_request_line(line) {
                    self.state = ParserState::RequestLine;
                    self.request = Some(build_request_line(line)?);
                    self.state = ParserState::Headers;
                }
                Ok(None)
            }
            ParserState::Headers => {
                if is_blank(line) {
                    self.state = ParserState::Body;
                } else if let Some(request) = self.request.as_mut() {
                    if let Err(e) = request.add_header(Header::parse_line(line)) {
                        self.request = None;
                        self.state = ParserState::Seeking;
                        return Err(e);
                    }
                }
                Ok(None)
            }
            ParserState::Body => {
                if is_blank(line) {
                    return Ok(self.complete());
                }
                if let Some(request) = self.request.as_mut() {
                    request.push_body_line(line);
                }
                Ok(None)
            }
            ParserState::RequestLine | ParserState::Done => Ok(None),
        }
    }

    /// Signals end of input, yielding a request still under construction.
    pub fn finish(&mut self) -> Option<Request> {
        match self.state {
            ParserState::Headers | ParserState::Body => self.complete(),
            _ => None,
        }
    }

    fn complete(&mut self) -> Option<Request> {
        self.state = ParserState::Done;
        self.request.take()
    }
}

/// Whether `line` opens a request block.
///
/// True when its first field is a standard method (any case), or when the
/// line is a single field that looks like a target (`/path`, `scheme://...`).
pub fn is_request_line(line: &str) -> bool {
    let mut fields = line.split_whitespace();
    let Some(first) = fields.next() else {
        return false;
    };
    if first.parse::<Method>().is_ok() {
        return true;
    }
    fields.next().is_none() && (first.starts_with('/') || first.contains("://"))
}

/// Builds the request for a request line.
///
/// One field is a bare target fetched with `GET`, even when it spells a
/// method name. With two or more fields the first is the method and the
/// second the target. Further fields, including any version token, are
/// ignored.
pub fn build_request_line(line: &str) -> Result<Request, ScanError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let (method, target) = match fields.as_slice() {
        [single] => (default_method(), *single),
        [method, target, ..] => (
            method.parse::<Method>().unwrap_or_else(|_| default_method()),
            *target,
        ),
        [] => (default_method(), DEFAULT_TARGET),
    };

    let url = resolve_target(target)?;
    let version: HttpVersion = HTTP_VERSION.parse()?;
    trace!("Request line {line:?} -> {method} {url} {version}");
    Ok(Request::new(method, url, version))
}

fn default_method() -> Method {
    DEFAULT_METHOD.parse().unwrap_or(Method::Get)
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
