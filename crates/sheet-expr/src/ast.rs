//! Abstract syntax tree for the arithmetic formula grammar.
//!
//! A parsed formula is a tree of [`Expr`] nodes: numeric literals, cell
//! references (which may name an out-of-range position — validity is a
//! resolver-time concern, see [`crate::ExpressionTree::evaluate`]), unary
//! sign operators, and binary arithmetic.

use crate::position::Position;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    fn symbol(self) -> char {
        match self {
            BinOp::Add => '+',
            BinOp::Sub => '-',
            BinOp::Mul => '*',
            BinOp::Div => '/',
        }
    }

    /// Precedence: `*`/`/` bind tighter than `+`/`-`.
    fn precedence(self) -> u8 {
        match self {
            BinOp::Add | BinOp::Sub => 1,
            BinOp::Mul | BinOp::Div => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnOp {
    Plus,
    Neg,
}

/// A cell reference as it appeared in formula text. `pos` is the parsed
/// position (possibly out of range, never used for display directly);
/// `raw` is the literal text, kept so [`Expr::pretty`] can reproduce an
/// out-of-range or otherwise invalid reference verbatim — `Position`'s own
/// string form collapses any invalid position to `""` (see §4.1), which
/// would make such a formula un-reparseable.
#[derive(Clone, Debug, PartialEq)]
pub struct CellRefNode {
    pub pos: Position,
    pub raw: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Number(f64),
    CellRef(CellRefNode),
    Unary(UnOp, Box<Expr>),
    Binary(Box<Expr>, BinOp, Box<Expr>),
}

impl Expr {
    /// Distinct positions referenced by this expression, in the stable
    /// order they first appear as operands. May include invalid positions.
    pub fn referenced_cells(&self) -> Vec<Position> {
        let mut out = Vec::new();
        collect_refs(self, &mut out);
        out
    }

    /// Canonical infix rendering, with parentheses only where precedence
    /// requires them, so the result re-parses to an equivalent tree.
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        self.write_pretty(&mut out, 0);
        out
    }

    fn write_pretty(&self, out: &mut String, min_prec: u8) {
        match self {
            Expr::Number(n) => out.push_str(&format_number(*n)),
            Expr::CellRef(node) => out.push_str(&node.raw),
            Expr::Unary(op, inner) => {
                out.push(match op {
                    UnOp::Plus => '+',
                    UnOp::Neg => '-',
                });
                let needs_parens = matches!(inner.as_ref(), Expr::Binary(..));
                if needs_parens {
                    out.push('(');
                    inner.write_pretty(out, 0);
                    out.push(')');
                } else {
                    inner.write_pretty(out, 3);
                }
            }
            Expr::Binary(lhs, op, rhs) => {
                let prec = op.precedence();
                let needs_parens = prec < min_prec;
                if needs_parens {
                    out.push('(');
                }
                lhs.write_pretty(out, prec);
                out.push(op.symbol());
                // Right-hand side of a left-associative operator needs
                // parens if it has the same precedence (e.g. `1-(2-3)`).
                rhs.write_pretty(out, prec + 1);
                if needs_parens {
                    out.push(')');
                }
            }
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

fn collect_refs(expr: &Expr, out: &mut Vec<Position>) {
    match expr {
        Expr::Number(_) => {}
        Expr::CellRef(node) => {
            if !out.contains(&node.pos) {
                out.push(node.pos);
            }
        }
        Expr::Unary(_, inner) => collect_refs(inner, out),
        Expr::Binary(lhs, _, rhs) => {
            collect_refs(lhs, out);
            collect_refs(rhs, out);
        }
    }
}
