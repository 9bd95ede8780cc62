//! Pull-based iteration over the requests of one input stream.

use std::io::{BufRead, Cursor};

use log::{debug, error};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::HANDOFF_CAPACITY;
use crate::error_handling::ScanError;
use crate::scan::parser::BlockParser;
use crate::scan::preprocess::LinePreprocessor;
use crate::scan::request::Request;
use crate::scan::symbols::SymbolTable;

/// Scans a line-oriented request batch, one request per [`Scanner::advance`].
///
/// The scanner owns its input cursor and its symbol table; definitions made
/// anywhere in the stream stay visible to every later request.
///
/// # Example
///
/// ```no_run
/// use http_batch::Scanner;
///
/// let input = "@host = localhost:8080\n\nGET http://{{host}}/health\n";
/// let mut scanner = Scanner::new(input.as_bytes());
/// while scanner.advance()? {
///     let request = scanner.request().expect("advance returned true");
///     println!("{} {}", request.method(), request.url());
/// }
/// # Ok::<(), http_batch::ScanError>(())
/// ```
#[derive(Debug)]
pub struct Scanner<R> {
    reader: R,
    buf: Vec<u8>,
    preprocessor: LinePreprocessor,
    parser: BlockParser,
    current: Option<Request>,
    exhausted: bool,
}

impl<R: BufRead> Scanner<R> {
    /// Creates a scanner with an empty symbol table.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            preprocessor: LinePreprocessor::new(),
            parser: BlockParser::new(),
            current: None,
            exhausted: false,
        }
    }

    /// Scans up to the end of the next request.
    ///
    /// `Ok(true)`: a request is available through [`Scanner::request`].
    /// `Ok(false)`: the stream is exhausted. `Err(_)`: the batch is broken;
    /// every later call returns `Ok(false)`.
    pub fn advance(&mut self) -> Result<bool, ScanError> {
        self.current = None;
        if self.exhausted {
            return Ok(false);
        }

        match self.scan_next() {
            Ok(Some(request)) => {
                self.current = Some(request);
                Ok(true)
            }
            Ok(None) => {
                self.exhausted = true;
                Ok(false)
            }
            Err(e) => {
                self.exhausted = true;
                error!("Stopping request batch: {e}");
                Err(e)
            }
        }
    }

    /// The request produced by the last successful [`Scanner::advance`].
    pub fn request(&self) -> Option<&Request> {
        self.current.as_ref()
    }

    /// Moves the current request out of the scanner.
    pub fn take_request(&mut self) -> Option<Request> {
        self.current.take()
    }

    /// Symbols defined so far.
    pub fn symbols(&self) -> &SymbolTable {
        self.preprocessor.symbols()
    }

    fn scan_next(&mut self) -> Result<Option<Request>, ScanError> {
        while let Some(raw) = self.read_line()? {
            let Some(line) = self.preprocessor.process(&raw) else {
                continue;
            };
            if let Some(request) = self.parser.feed(&line)? {
                return Ok(Some(request));
            }
        }
        Ok(self.parser.finish())
    }

    fn read_line(&mut self) -> Result<Option<String>, ScanError> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}

impl<R: BufRead> Iterator for Scanner<R> {
    type Item = Result<Request, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.advance() {
            Ok(true) => self.take_request().map(Ok),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// Parses the first request of `reader`, ignoring the rest.
pub fn parse_one<R: BufRead>(reader: R) -> Result<Option<Request>, ScanError> {
    let mut scanner = Scanner::new(reader);
    scanner.next().transpose()
}

/// Parses every request of `reader`, in source order.
pub fn parse_all<R: BufRead>(reader: R) -> Result<Vec<Request>, ScanError> {
    Scanner::new(reader).collect()
}

/// [`parse_one`] over a string.
pub fn parse_one_str(raw: &str) -> Result<Option<Request>, ScanError> {
    parse_one(Cursor::new(raw))
}

/// [`parse_all`] over a string.
pub fn parse_all_str(raw: &str) -> Result<Vec<Request>, ScanError> {
    parse_all(Cursor::new(raw))
}

/// Scans `reader` on a blocking task, handing requests over a channel of
/// capacity one so parsing stays a single request ahead of the consumer.
///
/// The join handle reports how the scan ended once the channel closes.
/// Dropping the receiver stops the scan at its next handoff.
///
/// Must be called from within a Tokio runtime.
pub fn parse_all_channel<R>(reader: R) -> (mpsc::Receiver<Request>, JoinHandle<Result<(), ScanError>>)
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(HANDOFF_CAPACITY);
    let handle = tokio::task::spawn_blocking(move || {
        for request in Scanner::new(reader) {
            if tx.blocking_send(request?).is_err() {
                debug!("Request consumer went away, stopping scan");
                break;
            }
        }
        Ok(())
    });
    (rx, handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BATCH: &str = "\
POST http://example.com/baz/ HTTP/1.1
Content-Type: application/json

{
    \"foo\": \"bar\"
}

@host = localhost:8080

POST http://{{host}}/baz/ HTTP/1.1
Content-Type: application/json

{
\t\"id\": \"{{$uuid}}\"
}
";

    #[test]
    fn test_advance_yields_requests_then_false_forever() {
        let mut scanner = Scanner::new(BATCH.as_bytes());
        assert!(scanner.advance().unwrap());
        assert_eq!(
            scanner.request().unwrap().url().as_str(),
            "http://example.com/baz/"
        );
        assert!(scanner.advance().unwrap());
        assert_eq!(
            scanner.request().unwrap().url().as_str(),
            "http://localhost:8080/baz/"
        );
        assert!(!scanner.advance().unwrap());
        assert!(scanner.request().is_none());
        assert!(!scanner.advance().unwrap());
        assert_eq!(scanner.symbols().get("host"), Some("localhost:8080"));
    }

    #[test]
    fn test_fatal_error_stops_iteration() {
        let input = "GET /ok\n\n\nGET http://[::1/\n\nGET /never\n";
        let mut scanner = Scanner::new(input.as_bytes());
        assert!(scanner.advance().unwrap());
        assert!(scanner.advance().is_err());
        assert!(!scanner.advance().unwrap());
    }

    #[test]
    fn test_crlf_line_endings() {
        let input = "GET /a\r\nAccept: text/plain\r\n\r\nbody\r\n";
        let req = parse_one_str(input).unwrap().unwrap();
        assert_eq!(req.header("Accept"), Some("text/plain"));
        assert_eq!(req.body(), b"body\n");
    }

    #[test]
    fn test_invalid_utf8_is_lossy() {
        let input: &[u8] = b"GET /a\n\nbad \xff byte\n";
        let req = parse_one(input).unwrap().unwrap();
        assert_eq!(req.body(), "bad \u{fffd} byte\n".as_bytes());
    }

    #[test]
    fn test_parse_one_stops_after_first() {
        let req = parse_one_str(BATCH).unwrap().unwrap();
        assert_eq!(req.url().host_str(), Some("example.com"));
    }

    #[test]
    fn test_parse_one_empty_input() {
        assert!(parse_one_str("").unwrap().is_none());
    }

    #[test]
    fn test_parse_all_matches_incremental() {
        let all = parse_all_str(BATCH).unwrap();
        let mut scanner = Scanner::new(BATCH.as_bytes());
        let mut incremental = Vec::new();
        while scanner.advance().unwrap() {
            incremental.push(scanner.take_request().unwrap());
        }
        assert_eq!(all.len(), incremental.len());
        for (a, b) in all.iter().zip(&incremental) {
            assert_eq!(a.method(), b.method());
            assert_eq!(a.url(), b.url());
            assert_eq!(a.headers(), b.headers());
        }
    }

    #[tokio::test]
    async fn test_parse_all_channel_drains_in_order() {
        let (mut rx, handle) = parse_all_channel(Cursor::new(BATCH.to_string()));
        let mut hosts = Vec::new();
        while let Some(req) = rx.recv().await {
            hosts.push(req.authority());
        }
        handle.await.unwrap().unwrap();
        assert_eq!(hosts, vec!["example.com", "localhost:8080"]);
    }

    #[tokio::test]
    async fn test_parse_all_channel_reports_error() {
        let (mut rx, handle) = parse_all_channel(Cursor::new("GET /a\n\n\nGET http://[::1/\n".to_string()));
        assert!(rx.recv().await.is_some());
        assert!(rx.recv().await.is_none());
        assert!(handle.await.unwrap().is_err());
    }

    #[tokio::test]
    async fn test_parse_all_channel_stops_when_receiver_dropped() {
        let (rx, handle) = parse_all_channel(Cursor::new(BATCH.to_string()));
        drop(rx);
        handle.await.unwrap().unwrap();
    }
}
