use crate::parser::token::Token;
use thiserror::Error;

/// A per-token scanning failure: an unexpected character or a malformed
/// number. Non-fatal to the scan; the scanner reports it and resumes, so the
/// consumer decides whether to abort.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{name}: {message}")]
pub struct LexicalError {
    /// Name of the scan, for error reports.
    pub name: String,
    pub message: String,
}

/// A fatal tree-construction failure. Construction stops and no partial tree
/// is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An infix operator appeared with nothing before it to take as its
    /// left operand.
    #[error("infix operator {symbol:?} is missing a left operand")]
    MissingLeftOperand { symbol: String },
    /// A token kind the tree builder does not handle, such as a parenthesis.
    #[error("unsupported token {token} in expression")]
    UnsupportedToken { token: Token },
    #[error(transparent)]
    Lexical(#[from] LexicalError),
}
