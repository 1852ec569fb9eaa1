use thiserror::Error as ThisError;

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    // Construction.
    /// No registry entry exists for the symbol.
    #[error("unknown symbol `{0}`")]
    UnknownSymbol(String),
    /// The number of operands doesn't match the registered arity of the
    /// symbol.
    #[error("`{symbol}` expects {expected} operand(s), found {actual}")]
    ArityMismatch {
        symbol: String,
        expected: usize,
        actual: usize,
    },

    // Registration.
    /// The symbol is already registered with a different arity or notation.
    #[error("`{symbol}` is already registered with a different definition")]
    ConflictingRegistration { symbol: String },
    /// The notation template can't be used with the registered arity.
    #[error("invalid notation template for `{symbol}`: {reason}")]
    InvalidTemplate { symbol: String, reason: String },

    // Evaluation.
    /// A variable was not assigned a value before evaluating.
    #[error("variable `{0}` is not bound in the evaluation context")]
    UnboundVariable(String),
    /// The value encountered is not what was expected. For example, if a
    /// computation was expecting a number and finds a boolean value.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("integer division by zero")]
    DivisionByZero,
    #[error("integer overflow")]
    Overflow,
    /// The evaluation rule of a symbol failed.
    #[error("evaluating `{symbol}` failed: {source}")]
    Rule {
        symbol: String,
        #[source]
        source: Box<Error>,
    },
}
