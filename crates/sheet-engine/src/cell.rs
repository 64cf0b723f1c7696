//! A single grid cell: its committed content, its memoized value, and the
//! set of cells that refer to it.

use std::cell::RefCell;
use std::collections::HashSet;

use sheet_expr::{Position, Resolver};

use crate::content::{CellContent, CellValue};

/// A cell in the grid.
///
/// `cache` is interior-mutable so that `value()` can memoize through a
/// shared reference — the sheet's store only ever hands out `&Cell`, never
/// `&mut Cell`, when evaluating formulas, since evaluation of one cell may
/// recurse into arbitrarily many others.
#[derive(Debug)]
pub struct Cell {
    content: CellContent,
    cache: RefCell<Option<CellValue>>,
    /// Positions of cells whose content refers to this one. The cell
    /// itself never walks its own outgoing edges through this field — that
    /// list comes straight from `content.referenced_cells()`. This only
    /// ever holds the reverse direction, which is what dependency-graph
    /// traversal (cycle detection, cache invalidation) needs.
    pub(crate) inverse_edges: HashSet<Position>,
}

impl Cell {
    pub fn new_empty() -> Cell {
        Cell {
            content: CellContent::Empty,
            cache: RefCell::new(None),
            inverse_edges: HashSet::new(),
        }
    }

    /// Replace this cell's content. Does not touch `inverse_edges` (the
    /// caller owns edge bookkeeping) and does not invalidate the cache —
    /// callers that change content are expected to invalidate explicitly,
    /// since invalidation must also reach this cell's dependents.
    pub(crate) fn set_content(&mut self, content: CellContent) {
        self.content = content;
    }

    pub(crate) fn clear_cache(&self) {
        *self.cache.borrow_mut() = None;
    }

    pub(crate) fn cache_is_populated(&self) -> bool {
        self.cache.borrow().is_some()
    }

    /// The text that, if written back via `set`, would reproduce this
    /// cell's content exactly (used for the idempotent-write check).
    pub fn text(&self) -> String {
        self.content.display_text()
    }

    /// The cell's value, computing and memoizing it on first access.
    pub fn value(&self, resolver: &dyn Resolver) -> CellValue {
        if let Some(cached) = self.cache.borrow().as_ref() {
            return cached.clone();
        }
        let value = self.content.evaluate(resolver);
        *self.cache.borrow_mut() = Some(value.clone());
        value
    }

    /// Distinct positions this cell's formula refers to, in stable order.
    pub fn referenced_cells(&self) -> Vec<Position> {
        self.content.referenced_cells()
    }

    /// Whether any other cell currently depends on this one.
    pub fn is_referenced(&self) -> bool {
        !self.inverse_edges.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.content, CellContent::Empty)
    }
}
