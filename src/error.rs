use thiserror::Error;

/// Raised when text cannot be parsed into an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),

    #[error("unexpected token")]
    UnexpectedToken,

    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("unexpected tokens at end of input")]
    UnexpectedTokensAtEnd,

    #[error("malformed number")]
    MalformedNumber,

    #[error("number out of range")]
    NumberOutOfRange,

    #[error("matrix rows must be non-empty and of equal length")]
    MalformedMatrix,
}

/// Raised when an editing operation cannot be carried out. The tree is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("tree would exceed {maximum} nodes (currently {current}, adding {adding})")]
    CapacityExceeded { current: usize, adding: usize, maximum: usize },

    #[error("the cursor cannot move in that direction")]
    NoMovement,

    #[error("the field is not being edited")]
    NotEditing,
}
