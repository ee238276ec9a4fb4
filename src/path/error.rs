//! Error types for path construction and parsing.

use thiserror::Error;

use super::element::ElementKind;

/// Validation errors raised while constructing elements or paths.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// A path needs at least one element.
    #[error("path must contain at least one element")]
    Empty,
    /// Root appeared somewhere other than the first position.
    #[error("root element must only appear at the start of the path (found at position {position})")]
    MisplacedRoot { position: usize },
    #[error("absolute path must start with root element")]
    NotAbsolute,
    #[error("relative path must not start with root element")]
    NotRelative,
    /// Recursive descent wrapped around root or another recursive descent.
    #[error("recursive descent must not be applied to {kind}")]
    InvalidRecursiveDescent { kind: ElementKind },
    #[error("property list must contain at least one name")]
    EmptyPropertyList,
    #[error("array index list must contain at least one index")]
    EmptyIndexList,
    #[error("array index must not be negative: {0}")]
    NegativeIndex(isize),
    #[error("array slice step must not be zero")]
    ZeroStep,
    #[error("expression must not be empty")]
    EmptyExpression,
    #[error("single quote in property name is not allowed: {0}")]
    QuoteInPropertyName(String),
    /// The builder finished right after a recursive-descent marker.
    #[error("recursive descent must be followed by another element")]
    DanglingRecursiveDescent,
    /// The builder asked for root after other elements (or after `..`).
    #[error("root element must be the first element of the path")]
    RootNotFirst,
}

/// Grammar errors raised while reading path text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Unexpected token at a specific position.
    #[error("unexpected token '{found}' at position {position}, expected {expected}")]
    UnexpectedToken {
        position: usize,
        found: String,
        expected: String,
    },
    /// Unexpected end of input.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: String },
    /// Invalid syntax with description.
    #[error("invalid JSONPath syntax: {message}")]
    InvalidSyntax { message: String },
    /// Well-formed text describing an invalid element or path.
    #[error(transparent)]
    Invalid(#[from] PathError),
}
