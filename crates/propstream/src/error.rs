use std::{io, path::PathBuf};

use thiserror::Error;

/// Error returned by every load operation.
///
/// `line` is the 1-based physical line on which the failing logical line
/// began, or `0` when the error happened before any input was read.
#[derive(Error, Debug)]
#[error("{source} at line {line}")]
pub struct ParserError {
    pub(crate) source: ErrorSource,
    pub(crate) line: usize,
}

impl ParserError {
    pub(crate) fn new(source: impl Into<ErrorSource>, line: usize) -> Self {
        Self {
            source: source.into(),
            line,
        }
    }

    /// What went wrong.
    #[must_use]
    pub fn kind(&self) -> &ErrorSource {
        &self.source
    }

    /// Physical line where the offending logical line started.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns `true` for malformed escape sequences and other decoding
    /// failures.
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        matches!(self.source, ErrorSource::Syntax(_))
    }
}

/// The cause behind a [`ParserError`].
#[derive(Error, Debug)]
pub enum ErrorSource {
    /// Neither a byte source nor a character source was supplied.
    #[error("no byte or character source supplied")]
    MissingSource,
    /// The underlying source failed; propagated untouched.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The input could not be decoded.
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    /// `load_file` was pointed at an XML document.
    #[error("XML property files are not supported: {}", .0.display())]
    XmlUnsupported(PathBuf),
}

/// Decoding failures inside a single logical line.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    /// A `\uXXXX` window held something other than a hex digit.
    #[error("malformed \\uxxxx encoding: invalid character '{0}'")]
    InvalidUnicodeEscapeChar(char),
    /// The substring ended before four hex digits were read.
    #[error("malformed \\uxxxx encoding: fewer than four hex digits")]
    TruncatedUnicodeEscape,
    /// Only reported with [`DecodeMode::Strict`](crate::DecodeMode::Strict).
    #[error("unpaired surrogate \\u{0:04X}")]
    UnpairedSurrogate(u16),
}
