//! Placeholder resolution and `{{...}}` expansion.
//!
//! A placeholder span holds one verb followed by whitespace-separated
//! arguments. `$uuid` and `$time` are built in; any other verb names a
//! symbol. Resolution never fails: unknown symbols become the empty string.

use chrono::Utc;
use log::error;

use crate::config::{
    PLACEHOLDER_CLOSE, PLACEHOLDER_OPEN, UUID_SHORT_ARG, VERB_TIME, VERB_UUID,
};
use crate::scan::symbols::SymbolTable;
use crate::scan::time_format::render_time;

/// A parsed placeholder span, decided once per `{{...}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb<'a> {
    /// `$uuid` or `$uuid short`
    Uuid {
        /// Drop the hyphens
        short: bool,
    },
    /// `$time [zone [pattern]]`; more than two arguments render as bare `$time`
    Time {
        /// IANA zone name; UTC when absent or unknown
        zone: Option<&'a str>,
        /// Date pattern; RFC 3339 when absent
        pattern: Option<&'a str>,
    },
    /// Anything else: a symbol reference
    Symbol(&'a str),
    /// `{{}}` or a span holding only whitespace
    Empty,
}

impl<'a> Verb<'a> {
    /// Classifies the text between `{{` and `}}`.
    pub fn parse(span: &'a str) -> Self {
        let mut fields = span.split_whitespace();
        match fields.next() {
            Some(verb) => Self::from_parts(verb, &fields.collect::<Vec<_>>()),
            None => Verb::Empty,
        }
    }

    /// Classifies a verb token and its arguments.
    pub fn from_parts(verb: &'a str, args: &[&'a str]) -> Self {
        match verb {
            VERB_UUID => Verb::Uuid {
                short: args.first() == Some(&UUID_SHORT_ARG),
            },
            VERB_TIME => match *args {
                [zone] => Verb::Time {
                    zone: Some(zone),
                    pattern: None,
                },
                [zone, pattern] => Verb::Time {
                    zone: Some(zone),
                    pattern: Some(pattern),
                },
                _ => Verb::Time {
                    zone: None,
                    pattern: None,
                },
            },
            name => Verb::Symbol(name),
        }
    }

    /// Produces the replacement text for this verb.
    pub fn resolve(&self, symbols: &SymbolTable) -> String {
        match self {
            Verb::Uuid { short } => {
                let id = uuid::Builder::from_random_bytes(rand::random()).into_uuid();
                if *short {
                    id.simple().to_string()
                } else {
                    id.hyphenated().to_string()
                }
            }
            Verb::Time { zone, pattern } => render_time(Utc::now(), *zone, *pattern),
            Verb::Symbol(name) => symbols.get(name).unwrap_or_default().to_string(),
            Verb::Empty => String::new(),
        }
    }
}

/// Resolves `verb` with `args` against `symbols`.
pub fn resolve(verb: &str, args: &[&str], symbols: &SymbolTable) -> String {
    Verb::from_parts(verb, args).resolve(symbols)
}

/// Expands every `{{...}}` span in `line`.
///
/// An opening `{{` without a closing `}}` stops expansion: the remainder of
/// the line is kept as written and the event is logged.
pub fn expand_placeholders(line: &str, symbols: &SymbolTable) -> String {
    let mut out = String::with_capacity(line.len());
    let mut tail = line;

    while let Some(open) = tail.find(PLACEHOLDER_OPEN) {
        out.push_str(&tail[..open]);
        let inner = &tail[open + PLACEHOLDER_OPEN.len()..];
        let Some(close) = inner.find(PLACEHOLDER_CLOSE) else {
            error!("Unterminated placeholder: {}", &tail[open..]);
            out.push_str(&tail[open..]);
            return out;
        };
        out.push_str(&Verb::parse(&inner[..close]).resolve(symbols));
        tail = &inner[close + PLACEHOLDER_CLOSE.len()..];
    }

    out.push_str(tail);
    out
}
