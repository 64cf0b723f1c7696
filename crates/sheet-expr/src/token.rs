//! Lexical tokens for the arithmetic formula grammar.

#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Number(f64),
    /// A letters-then-digits identifier, e.g. "A1" or "ZZZ3". May not be a
    /// *valid* position — validity is decided later, at reference time.
    CellRef(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    Eof,
}
