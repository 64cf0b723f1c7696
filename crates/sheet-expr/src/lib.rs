//! sheet_expr — the formula grammar: cell positions, lexer, parser, AST,
//! and the `ExpressionTree` evaluation contract consumed by `sheet-engine`.
//!
//! This crate has no notion of a sheet or a cell graph; it only knows how
//! to turn formula text into a tree that can be evaluated against whatever
//! numeric values a [`Resolver`] supplies.

mod ast;
mod error;
mod lexer;
mod parser;
mod position;
mod resolver;
mod token;
mod tree;

pub use error::FormulaError;
pub use position::{Position, MAX_COLS, MAX_ROWS};
pub use resolver::Resolver;
pub use tree::{parse_expression, ExpressionTree};

/// A formula failed to parse. Carried by [`parse_expression`]; surfaces to
/// `sheet-engine` callers as the `Formula` structural error (§7).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("formula parse error: {message}")]
pub struct ParseError {
    message: String,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        ParseError { message: message.into() }
    }
}
