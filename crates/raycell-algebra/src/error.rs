//! Error types for cell-algebra parsing and population.

use thiserror::Error;

/// Errors that can occur while parsing or resolving a rule tree.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AlgebraError {
    /// The expression contains no terms.
    #[error("empty cell expression")]
    Empty,

    /// Parentheses do not balance.
    #[error("unbalanced parentheses in cell expression")]
    Unbalanced,

    /// A character the lexer does not recognize.
    #[error("unexpected character {0:?} in cell expression")]
    UnexpectedChar(char),

    /// The expression ends in the middle of a token.
    #[error("unexpected end of cell expression")]
    UnexpectedEnd,

    /// A numeric literal failed to parse.
    #[error("invalid literal {0:?} in cell expression")]
    BadLiteral(String),

    /// Surface id 0 carries no sign and cannot be referenced.
    #[error("surface id 0 is not a valid reference")]
    ZeroSurfaceId,

    /// An operator appeared where a term was expected.
    #[error("misplaced operator in cell expression")]
    MisplacedOperator,

    /// `#` must be followed by a cell id or a parenthesized group.
    #[error("`#` must be followed by a cell id or `(`")]
    BareComplement,

    /// A clause cites a surface id missing from the registry.
    #[error("unresolved surface reference: {0}")]
    UnresolvedSurface(i32),

    /// The rule still contains an unsubstituted `#<cell>` reference.
    #[error("unresolved cell reference: #{0}")]
    UnresolvedCell(i32),
}
