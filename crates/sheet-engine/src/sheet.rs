//! The sparse grid of cells and the operations that mutate it.

use std::collections::HashMap;
use std::fmt::Write as _;

use sheet_expr::{FormulaError, Position, Resolver};

use crate::cell::Cell;
use crate::content::CellContent;
use crate::error::{Result, SheetError};
use crate::graph;
use crate::size::Size;

/// An in-memory spreadsheet: a sparse grid of cells plus the tight bounding
/// box of everything currently non-empty.
///
/// Only positions that have ever been written to, or that are referenced by
/// some formula, occupy an entry in `cells` — a cell that has never been
/// touched simply isn't in the map, and reads as `Empty`/`Text("")`.
pub struct Sheet {
    cells: HashMap<Position, Cell>,
    size: Size,
}

impl Sheet {
    pub fn new() -> Sheet {
        Sheet { cells: HashMap::new(), size: Size::ZERO }
    }

    /// Set the text at `pos`, classifying and (for formulas) parsing it,
    /// checking for a circular dependency, and otherwise replacing the
    /// cell's content. A no-op write (new text equal to the cell's current
    /// display text) does nothing at all — no cache invalidation, no
    /// bounding-box recompute.
    ///
    /// Transactional: if classification fails (malformed formula) or the
    /// prospective content would create a circular dependency, the sheet
    /// is left completely unchanged and the corresponding structural error
    /// is returned.
    pub fn set_cell(&mut self, pos: Position, text: &str) -> Result<()> {
        if !pos.is_valid() {
            return Err(SheetError::InvalidPosition);
        }

        let current_text = self.cells.get(&pos).map(Cell::text).unwrap_or_default();
        if text == current_text {
            return Ok(());
        }

        let content = CellContent::classify(text)?;
        let new_refs = content.referenced_cells();

        if graph::would_create_cycle(pos, &new_refs, &self.cells) {
            return Err(SheetError::CircularDependency);
        }

        // Nothing past this point can fail.

        let old_refs: Vec<Position> =
            self.cells.get(&pos).map(Cell::referenced_cells).unwrap_or_default();
        for old_ref in old_refs {
            if let Some(target) = self.cells.get_mut(&old_ref) {
                target.inverse_edges.remove(&pos);
            }
        }

        self.cells.entry(pos).or_insert_with(Cell::new_empty).set_content(content);

        for new_ref in &new_refs {
            if !new_ref.is_valid() {
                continue;
            }
            self.cells.entry(*new_ref).or_insert_with(Cell::new_empty);
            self.cells.get_mut(new_ref).unwrap().inverse_edges.insert(pos);
        }

        graph::invalidate_transitive(pos, &self.cells);
        self.recompute_size();
        Ok(())
    }

    /// Reset `pos` to `Empty`. Equivalent to `set_cell(pos, "")`, which
    /// already handles the idempotent case (clearing an already-empty
    /// cell is a no-op).
    pub fn clear_cell(&mut self, pos: Position) -> Result<()> {
        self.set_cell(pos, "")
    }

    pub fn get_cell(&self, pos: Position) -> Result<Option<&Cell>> {
        if !pos.is_valid() {
            return Err(SheetError::InvalidPosition);
        }
        Ok(self.cells.get(&pos))
    }

    /// The cell's current value, computed (and memoized) on demand.
    /// Returns `None` for a position that has never been written to and is
    /// not referenced by any formula.
    pub fn value_at(&self, pos: Position) -> Result<Option<crate::content::CellValue>> {
        Ok(self.get_cell(pos)?.map(|cell| cell.value(self)))
    }

    pub fn printable_size(&self) -> Size {
        self.size
    }

    /// Tab-separated values, one row per line, padded with trailing tabs
    /// out to `printable_size().cols` columns. Empty cells print as the
    /// empty string.
    pub fn print_values(&self) -> String {
        self.print_rows(|cell| cell.value(self).to_string())
    }

    /// Like `print_values`, but prints each cell's raw text instead of its
    /// computed value.
    pub fn print_texts(&self) -> String {
        self.print_rows(Cell::text)
    }

    fn print_rows(&self, mut render: impl FnMut(&Cell) -> String) -> String {
        let mut out = String::new();
        for row in 0..self.size.rows {
            for col in 0..self.size.cols {
                if col > 0 {
                    out.push('\t');
                }
                if let Some(cell) = self.cells.get(&Position::new(row, col)) {
                    let _ = write!(out, "{}", render(cell));
                }
            }
            out.push('\n');
        }
        out
    }

    /// Recompute the tight bounding box over non-empty cells. Called after
    /// every committing `set_cell`; a sparse `HashMap` has no cheaper
    /// incremental update that stays correct when an edge cell empties out
    /// from underneath an earlier write, so this just rescans.
    fn recompute_size(&mut self) {
        let mut rows = 0;
        let mut cols = 0;
        for (pos, cell) in &self.cells {
            if !cell.is_empty() {
                rows = rows.max(pos.row + 1);
                cols = cols.max(pos.col + 1);
            }
        }
        self.size = Size { rows, cols };
    }
}

impl Default for Sheet {
    fn default() -> Sheet {
        Sheet::new()
    }
}

impl Resolver for Sheet {
    /// Coerce the value at `pos` to a number for use as a formula operand.
    /// An invalid position is always `Ref`. A position with no cell is
    /// treated as empty text without materializing an entry for it. Empty
    /// text coerces to `0`; other text is parsed as a full-string decimal
    /// number or else raises `Value`; an already-errored cell propagates
    /// its error; a `Number` passes through unchanged.
    fn resolve(&self, pos: Position) -> Result<f64, FormulaError> {
        if !pos.is_valid() {
            return Err(FormulaError::Ref);
        }
        let value = match self.cells.get(&pos) {
            Some(cell) => cell.value(self),
            None => crate::content::CellValue::Text(String::new()),
        };
        match value {
            crate::content::CellValue::Number(n) => Ok(n),
            crate::content::CellValue::Text(s) if s.is_empty() => Ok(0.0),
            crate::content::CellValue::Text(s) => s.parse::<f64>().map_err(|_| FormulaError::Value),
            crate::content::CellValue::Error(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::CellValue;

    fn pos(a1: &str) -> Position {
        Position::from_str(a1)
    }

    #[test]
    fn simple_arithmetic() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A1"), "=1+2").unwrap();
        assert_eq!(sheet.value_at(pos("A1")).unwrap(), Some(CellValue::Number(3.0)));
    }

    #[test]
    fn transitive_recompute_on_dependency_change() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A1"), "1").unwrap();
        sheet.set_cell(pos("B1"), "=A1+1").unwrap();
        assert_eq!(sheet.value_at(pos("B1")).unwrap(), Some(CellValue::Number(2.0)));
        sheet.set_cell(pos("A1"), "10").unwrap();
        assert_eq!(sheet.value_at(pos("B1")).unwrap(), Some(CellValue::Number(11.0)));
    }

    #[test]
    fn empty_cell_is_zero_and_text_is_number_if_numeric() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A2"), "=A1+1").unwrap();
        assert_eq!(sheet.value_at(pos("A2")).unwrap(), Some(CellValue::Number(1.0)));
        sheet.set_cell(pos("A3"), "5").unwrap();
        sheet.set_cell(pos("A4"), "=A3+1").unwrap();
        assert_eq!(sheet.value_at(pos("A4")).unwrap(), Some(CellValue::Number(6.0)));
    }

    #[test]
    fn non_numeric_text_operand_is_value_error() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A1"), "meow").unwrap();
        sheet.set_cell(pos("B1"), "=A1+1").unwrap();
        assert_eq!(
            sheet.value_at(pos("B1")).unwrap(),
            Some(CellValue::Error(FormulaError::Value))
        );
    }

    #[test]
    fn error_propagates_through_dependents() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A1"), "=1/0").unwrap();
        sheet.set_cell(pos("B1"), "=A1+1").unwrap();
        assert_eq!(
            sheet.value_at(pos("B1")).unwrap(),
            Some(CellValue::Error(FormulaError::Div0))
        );
    }

    #[test]
    fn out_of_range_reference_in_formula_is_ref_error() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A1"), "=ZZZ3+1").unwrap();
        assert_eq!(sheet.value_at(pos("A1")).unwrap(), Some(CellValue::Error(FormulaError::Ref)));
    }

    #[test]
    fn simple_self_cycle_is_rejected() {
        let mut sheet = Sheet::new();
        let err = sheet.set_cell(pos("A1"), "=A1").unwrap_err();
        assert_eq!(err, SheetError::CircularDependency);
    }

    #[test]
    fn longer_cycle_is_rejected() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A1"), "=B1").unwrap();
        sheet.set_cell(pos("B1"), "=C1").unwrap();
        let err = sheet.set_cell(pos("C1"), "=A1").unwrap_err();
        assert_eq!(err, SheetError::CircularDependency);
        // Rejected write must not have mutated anything.
        assert_eq!(sheet.value_at(pos("C1")).unwrap(), Some(CellValue::Text(String::new())));
    }

    #[test]
    fn malformed_formula_leaves_sheet_untouched() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A1"), "5").unwrap();
        let err = sheet.set_cell(pos("A1"), "=1+").unwrap_err();
        assert!(matches!(err, SheetError::Formula(_)));
        assert_eq!(sheet.get_cell(pos("A1")).unwrap().unwrap().text(), "5");
    }

    #[test]
    fn escape_sign_suppresses_formula_interpretation() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A1"), "'=1+2").unwrap();
        assert_eq!(sheet.get_cell(pos("A1")).unwrap().unwrap().text(), "'=1+2");
        assert_eq!(sheet.value_at(pos("A1")).unwrap(), Some(CellValue::Text("=1+2".to_string())));

        sheet.set_cell(pos("A2"), "'").unwrap();
        assert_eq!(sheet.get_cell(pos("A2")).unwrap().unwrap().text(), "'");
        assert_eq!(sheet.value_at(pos("A2")).unwrap(), Some(CellValue::Text(String::new())));
    }

    #[test]
    fn referencing_an_absent_cell_auto_creates_an_empty_placeholder() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("B1"), "=A1+1").unwrap();
        let placeholder = sheet.get_cell(pos("A1")).unwrap().unwrap();
        assert!(placeholder.is_empty());
        assert!(placeholder.is_referenced());
    }

    #[test]
    fn printable_region_shrinks_after_clearing_the_trailing_cell() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A2"), "meow").unwrap();
        sheet.set_cell(pos("B2"), "=1+2").unwrap();
        sheet.set_cell(pos("A1"), "=1/0").unwrap();

        assert_eq!(sheet.printable_size(), Size { rows: 2, cols: 2 });
        assert_eq!(sheet.print_values(), "#DIV/0!\t\nmeow\t3\n");

        sheet.clear_cell(pos("B2")).unwrap();
        assert_eq!(sheet.printable_size(), Size { rows: 2, cols: 1 });
    }

    #[test]
    fn idempotent_write_is_a_no_op() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A1"), "=1+2").unwrap();
        sheet.value_at(pos("A1")).unwrap();
        assert!(sheet.get_cell(pos("A1")).unwrap().unwrap().value(&sheet) == CellValue::Number(3.0));
        // Re-setting identical text must not disturb the cache.
        sheet.set_cell(pos("A1"), "=1+2").unwrap();
        assert!(sheet.get_cell(pos("A1")).unwrap().unwrap().value(&sheet) == CellValue::Number(3.0));
    }
}
