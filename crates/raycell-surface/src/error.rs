//! Error types for surface parsing and construction.

use thiserror::Error;

/// Errors that can occur while parsing or constructing a surface.
#[derive(Error, Debug)]
pub enum SurfaceError {
    /// The definition line is empty.
    #[error("empty surface definition")]
    Empty,

    /// The leading token is not a signed integer id.
    #[error("invalid surface id: {0:?}")]
    BadId(String),

    /// The definition has an id but no type keyword.
    #[error("missing surface keyword")]
    MissingKeyword,

    /// The type keyword is not one the kernel knows.
    #[error("unknown surface keyword: {0:?}")]
    UnknownKeyword(String),

    /// The keyword was given the wrong number of parameters.
    #[error("surface keyword {keyword:?} expects {expected} parameters, got {got}")]
    WrongArity {
        /// The offending keyword.
        keyword: String,
        /// Number of parameters the keyword requires.
        expected: usize,
        /// Number of parameters actually supplied.
        got: usize,
    },

    /// A parameter failed to parse as a floating-point number.
    #[error("invalid numeric parameter: {0:?}")]
    BadNumber(String),

    /// The coefficients describe no real surface.
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    /// A surface id was defined twice in one registry.
    #[error("duplicate surface id: {0}")]
    DuplicateId(i32),

    /// Wrapper carrying the 1-indexed line number of a multi-line parse.
    #[error("line {line}: {source}")]
    AtLine {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// The underlying error.
        #[source]
        source: Box<SurfaceError>,
    },
}

impl SurfaceError {
    /// Create a degenerate-geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::Degenerate(message.into())
    }

    /// Wrap an error with the line number it occurred on.
    pub fn at_line(self, line: usize) -> Self {
        Self::AtLine {
            line,
            source: Box::new(self),
        }
    }
}
