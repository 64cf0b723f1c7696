//! The value-lookup contract a formula evaluator needs from its host.

use crate::error::FormulaError;
use crate::position::Position;

/// Looks up the numeric value of a cell for formula evaluation.
///
/// Implemented by the spreadsheet's cell store; `sheet-expr` itself never
/// constructs one, it only consumes it through [`crate::ExpressionTree::evaluate`].
pub trait Resolver {
    fn resolve(&self, pos: Position) -> Result<f64, FormulaError>;
}

impl<F> Resolver for F
where
    F: Fn(Position) -> Result<f64, FormulaError>,
{
    fn resolve(&self, pos: Position) -> Result<f64, FormulaError> {
        self(pos)
    }
}
