//! Structural errors raised by [`crate::Sheet`] operations.
//!
//! These are distinct from [`sheet_expr::FormulaError`], which is an
//! embedded *value* that never aborts an operation (§7 of the spec these
//! types implement draws this line explicitly).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SheetError {
    #[error("invalid position")]
    InvalidPosition,

    #[error("formula error: {0}")]
    Formula(#[from] sheet_expr::ParseError),

    #[error("circular dependency")]
    CircularDependency,
}

pub type Result<T> = std::result::Result<T, SheetError>;
