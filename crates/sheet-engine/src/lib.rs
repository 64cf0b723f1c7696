//! sheet_engine — the cell graph: classification, dependency tracking,
//! cycle detection, cache invalidation, and the sheet's printable surface.
//!
//! Built on top of `sheet_expr`, which owns the formula grammar and knows
//! nothing about sheets, cells, or dependency graphs.

mod cell;
mod content;
mod error;
mod graph;
mod sheet;
mod size;

pub use cell::Cell;
pub use content::{CellContent, CellValue};
pub use error::SheetError;
pub use sheet::Sheet;
pub use size::Size;

// Re-exported so callers never need a direct `sheet-expr` dependency just
// to name a position or an embedded formula error.
pub use sheet_expr::{FormulaError, Position};
