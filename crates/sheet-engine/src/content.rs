//! What a cell actually holds, as opposed to what it currently evaluates to.

use std::fmt;

use sheet_expr::{parse_expression, ExpressionTree, FormulaError, Position, Resolver};

use crate::error::SheetError;

/// The classified, committed contents of a cell.
#[derive(Clone, Debug, PartialEq)]
pub enum CellContent {
    Empty,
    Text(String),
    Formula(ExpressionTree),
}

impl CellContent {
    /// Classify raw input text per the cell-content rules: the empty
    /// string is `Empty`; text starting with `=` and at least two
    /// characters long is parsed as a `Formula` (a lone `=` is literal
    /// text, not a formula); everything else is `Text`.
    pub fn classify(text: &str) -> Result<CellContent, SheetError> {
        if text.is_empty() {
            return Ok(CellContent::Empty);
        }
        if text.len() > 1 && text.starts_with('=') {
            let tree = parse_expression(&text[1..])?;
            return Ok(CellContent::Formula(tree));
        }
        Ok(CellContent::Text(text.to_string()))
    }

    /// The text that would round-trip through `classify` unchanged.
    pub fn display_text(&self) -> String {
        match self {
            CellContent::Empty => String::new(),
            CellContent::Text(s) => s.clone(),
            CellContent::Formula(tree) => format!("={}", tree.pretty()),
        }
    }

    /// Distinct cell positions this content's formula refers to, in stable
    /// order. Always empty for `Empty`/`Text` content.
    pub fn referenced_cells(&self) -> Vec<Position> {
        match self {
            CellContent::Formula(tree) => tree.referenced_cells(),
            _ => Vec::new(),
        }
    }

    /// Compute the cell's value. Never fails: formula errors are captured
    /// as `CellValue::Error` rather than propagated.
    pub fn evaluate(&self, resolver: &dyn Resolver) -> CellValue {
        match self {
            CellContent::Empty => CellValue::Text(String::new()),
            CellContent::Text(s) => match s.strip_prefix('\'') {
                Some(rest) => CellValue::Text(rest.to_string()),
                None => CellValue::Text(s.clone()),
            },
            CellContent::Formula(tree) => match tree.evaluate(resolver) {
                Ok(n) => CellValue::Number(n),
                Err(e) => CellValue::Error(e),
            },
        }
    }
}

/// The computed value of a cell, as opposed to its raw content.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Error(FormulaError),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Error(e) => write!(f, "{e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_classifies_as_empty() {
        assert_eq!(CellContent::classify("").unwrap(), CellContent::Empty);
    }

    #[test]
    fn lone_equals_sign_is_text() {
        let content = CellContent::classify("=").unwrap();
        assert_eq!(content, CellContent::Text("=".to_string()));
        assert_eq!(content.display_text(), "=");
    }

    #[test]
    fn leading_equals_with_body_is_formula() {
        let content = CellContent::classify("=1+2").unwrap();
        assert!(matches!(content, CellContent::Formula(_)));
        assert_eq!(content.display_text(), "=1+2");
    }

    #[test]
    fn malformed_formula_is_a_structural_error() {
        assert!(CellContent::classify("=1+").is_err());
    }

    #[test]
    fn escaped_text_strips_leading_quote_from_value_only() {
        let content = CellContent::classify("'123").unwrap();
        assert_eq!(content.display_text(), "'123");
        struct NoRefs;
        impl Resolver for NoRefs {
            fn resolve(&self, _: Position) -> Result<f64, FormulaError> {
                Err(FormulaError::Ref)
            }
        }
        assert_eq!(content.evaluate(&NoRefs), CellValue::Text("123".to_string()));
    }

    #[test]
    fn plain_text_value_equals_display_text() {
        let content = CellContent::classify("meow").unwrap();
        struct NoRefs;
        impl Resolver for NoRefs {
            fn resolve(&self, _: Position) -> Result<f64, FormulaError> {
                Err(FormulaError::Ref)
            }
        }
        assert_eq!(content.evaluate(&NoRefs), CellValue::Text("meow".to_string()));
    }
}
