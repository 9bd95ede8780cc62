//! Line classification and placeholder expansion.

use log::debug;

use crate::config::{COMMENT_PREFIX, SYMBOL_PREFIX, SYMBOL_SEPARATOR};
use crate::scan::placeholder::expand_placeholders;
use crate::scan::symbols::SymbolTable;

/// What a raw input line turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive<'a> {
    /// `# ...`
    Comment,
    /// `@name = value`
    SymbolDefinition { name: &'a str, value: &'a str },
    /// An `@` line lacking a name, a `=`, or a value.
    MalformedDefinition,
    /// Anything else, not yet expanded.
    Content(&'a str),
}

impl<'a> Directive<'a> {
    /// Classifies one raw line. Nothing is expanded here.
    pub fn classify(line: &'a str) -> Self {
        if line.starts_with(COMMENT_PREFIX) {
            return Directive::Comment;
        }
        let Some(definition) = line.strip_prefix(SYMBOL_PREFIX) else {
            return Directive::Content(line);
        };
        match definition.split_once(SYMBOL_SEPARATOR) {
            Some((name, value)) if !name.trim().is_empty() && !value.trim().is_empty() => {
                Directive::SymbolDefinition {
                    name: name.trim(),
                    value: value.trim(),
                }
            }
            _ => Directive::MalformedDefinition,
        }
    }
}

/// Turns raw lines into expanded content lines, recording symbol
/// definitions along the way.
#[derive(Debug, Default)]
pub struct LinePreprocessor {
    symbols: SymbolTable,
}

impl LinePreprocessor {
    /// Creates a preprocessor with no symbols defined.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the expanded line, or `None` when the line was consumed
    /// (comment or definition).
    pub fn process(&mut self, raw: &str) -> Option<String> {
        match Directive::classify(raw) {
            Directive::Comment => None,
            Directive::SymbolDefinition { name, value } => {
                self.symbols.define(name, value);
                None
            }
            Directive::MalformedDefinition => {
                debug!("Skipping malformed symbol definition: {raw}");
                None
            }
            Directive::Content(line) => Some(expand_placeholders(line, &self.symbols)),
        }
    }

    /// Symbols defined so far.
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }
}
