//! Recursive-descent parser for the arithmetic formula grammar:
//! infix `+ - * /`, unary `+`/`-`, parentheses, numeric literals, and
//! cell references.

use crate::ast::{BinOp, CellRefNode, Expr, UnOp};
use crate::lexer::Lexer;
use crate::position::Position;
use crate::token::Token;
use crate::ParseError;

pub fn parse(input: &str) -> Result<Expr, ParseError> {
    let tokens = Lexer::new(input).tokenize()?;
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_expr()?;
    parser.expect_eof()?;
    Ok(expr)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn expect_eof(&self) -> Result<(), ParseError> {
        if matches!(self.peek(), Token::Eof) {
            Ok(())
        } else {
            Err(ParseError::new(format!("unexpected trailing token {:?}", self.peek())))
        }
    }

    // expr := term (('+' | '-') term)*
    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_term()?;
        loop {
            let op = match self.peek() {
                Token::Plus => BinOp::Add,
                Token::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_term()?;
            lhs = Expr::Binary(Box::new(lhs), op, Box::new(rhs));
        }
        Ok(lhs)
    }

    // term := unary (('*' | '/') unary)*
    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                Token::Star => BinOp::Mul,
                Token::Slash => BinOp::Div,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_unary()?;
            lhs = Expr::Binary(Box::new(lhs), op, Box::new(rhs));
        }
        Ok(lhs)
    }

    // unary := ('+' | '-')? unary | primary
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        match self.peek() {
            Token::Plus => {
                self.advance();
                Ok(Expr::Unary(UnOp::Plus, Box::new(self.parse_unary()?)))
            }
            Token::Minus => {
                self.advance();
                Ok(Expr::Unary(UnOp::Neg, Box::new(self.parse_unary()?)))
            }
            _ => self.parse_primary(),
        }
    }

    // primary := Number | CellRef | '(' expr ')'
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.advance() {
            Token::Number(n) => Ok(Expr::Number(n)),
            Token::CellRef(raw) => {
                let pos = Position::parse_preserving_range(&raw);
                Ok(Expr::CellRef(CellRefNode { pos, raw }))
            }
            Token::LParen => {
                let inner = self.parse_expr()?;
                match self.advance() {
                    Token::RParen => Ok(inner),
                    other => Err(ParseError::new(format!("expected ')', found {other:?}"))),
                }
            }
            other => Err(ParseError::new(format!("unexpected token {other:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    #[test]
    fn parses_simple_arithmetic() {
        let expr = parse("1+2").unwrap();
        assert_eq!(
            expr,
            Expr::Binary(Box::new(Expr::Number(1.0)), BinOp::Add, Box::new(Expr::Number(2.0)))
        );
    }

    #[test]
    fn respects_precedence() {
        // 1+2*3 should parse as 1+(2*3), not (1+2)*3.
        let expr = parse("1+2*3").unwrap();
        match expr {
            Expr::Binary(lhs, BinOp::Add, rhs) => {
                assert_eq!(*lhs, Expr::Number(1.0));
                assert!(matches!(*rhs, Expr::Binary(_, BinOp::Mul, _)));
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn parses_parens_and_unary() {
        let expr = parse("-(1+2)").unwrap();
        assert!(matches!(expr, Expr::Unary(UnOp::Neg, _)));
    }

    #[test]
    fn collects_cell_refs() {
        let expr = parse("A1+B2*A1").unwrap();
        let refs = expr.referenced_cells();
        assert_eq!(refs, vec![Position::new(0, 0), Position::new(1, 1)]);
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert!(parse("1+2)").is_err());
        assert!(parse("1++ *").is_err());
    }

    #[test]
    fn rejects_empty_parens() {
        assert!(parse("()").is_err());
    }
}
