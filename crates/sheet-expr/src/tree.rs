//! The parsed-formula type consumed by the cell graph: evaluation under a
//! resolver, canonical pretty-printing, and the list of referenced cells.

use crate::ast::{BinOp, Expr, UnOp};
use crate::error::FormulaError;
use crate::parser;
use crate::position::Position;
use crate::resolver::Resolver;
use crate::ParseError;

#[derive(Clone, Debug, PartialEq)]
pub struct ExpressionTree {
    expr: Expr,
}

impl ExpressionTree {
    /// Evaluate under `resolver`, which supplies numeric values for cell
    /// references. Arithmetic is plain IEEE-754 `f64`; any non-finite
    /// result — whether from a division, a resolved cell value, or an
    /// oversized numeric literal — becomes [`FormulaError::Div0`].
    /// Operands are evaluated left-to-right; the first error encountered
    /// wins.
    pub fn evaluate(&self, resolver: &dyn Resolver) -> Result<f64, FormulaError> {
        let result = eval_node(&self.expr, resolver)?;
        if result.is_finite() { Ok(result) } else { Err(FormulaError::Div0) }
    }

    /// Canonical infix form, stable and reparseable.
    pub fn pretty(&self) -> String {
        self.expr.pretty()
    }

    /// Distinct referenced positions, in stable first-appearance order.
    /// May include invalid positions; the resolver is expected to raise
    /// `Ref` for those at evaluation time.
    pub fn referenced_cells(&self) -> Vec<Position> {
        self.expr.referenced_cells()
    }
}

/// Parse formula text (without the leading `=`) into an evaluable tree.
pub fn parse_expression(text: &str) -> Result<ExpressionTree, ParseError> {
    parser::parse(text).map(|expr| ExpressionTree { expr })
}

fn eval_node(expr: &Expr, resolver: &dyn Resolver) -> Result<f64, FormulaError> {
    match expr {
        Expr::Number(n) => Ok(*n),
        Expr::CellRef(node) => {
            if !node.pos.is_valid() {
                Err(FormulaError::Ref)
            } else {
                resolver.resolve(node.pos)
            }
        }
        Expr::Unary(op, inner) => {
            let v = eval_node(inner, resolver)?;
            Ok(match op {
                UnOp::Plus => v,
                UnOp::Neg => -v,
            })
        }
        Expr::Binary(lhs, op, rhs) => {
            // Left-to-right evaluation: the first operand error wins.
            // Finiteness is checked once, at the top of `evaluate`, not
            // per node — it would otherwise need repeating in every arm.
            let l = eval_node(lhs, resolver)?;
            let r = eval_node(rhs, resolver)?;
            Ok(match op {
                BinOp::Add => l + r,
                BinOp::Sub => l - r,
                BinOp::Mul => l * r,
                BinOp::Div => l / r,
            })
        }
    }
}
