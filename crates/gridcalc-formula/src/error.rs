//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur while building or evaluating an expression tree
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    /// A character the tokenizer does not recognise
    #[error("Unexpected character '{ch}' at position {pos}")]
    UnexpectedCharacter { ch: char, pos: usize },

    /// Malformed expression (missing operand, unbalanced parentheses, ...)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Evaluate was called on a tree that was never built
    #[error("Expression tree has not been built")]
    NotBuilt,
}
