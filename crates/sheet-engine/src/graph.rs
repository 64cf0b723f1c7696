//! Free functions over the cell store's dependency edges: cycle detection
//! before a write commits, and cache invalidation after it does.
//!
//! These operate on `&HashMap<Position, Cell>` rather than owning any
//! structure of their own, mirroring how a cell only ever holds the
//! *positions* of the cells it depends on or is depended on by — never a
//! pointer to another `Cell` — which is what keeps the dependency graph
//! from being an ownership cycle.

use std::collections::{HashMap, HashSet};

use sheet_expr::Position;

use crate::cell::Cell;

/// Would installing `prospective_refs` as `start`'s outgoing edges create a
/// cycle? Performs a single-source DFS from `start`, following
/// `prospective_refs` for the first step and each subsequent cell's
/// *already-installed* outgoing edges after that. A cycle exists iff the
/// search reaches `start` again.
pub(crate) fn would_create_cycle(
    start: Position,
    prospective_refs: &[Position],
    store: &HashMap<Position, Cell>,
) -> bool {
    let mut visited: HashSet<Position> = HashSet::new();
    let mut stack: Vec<Position> =
        prospective_refs.iter().copied().filter(Position::is_valid).collect();

    while let Some(pos) = stack.pop() {
        if pos == start {
            return true;
        }
        if !visited.insert(pos) {
            continue;
        }
        if let Some(cell) = store.get(&pos) {
            stack.extend(cell.referenced_cells().into_iter().filter(Position::is_valid));
        }
    }
    false
}

/// Clear `start`'s cache, then recurse into its dependents (the cells
/// listed in its `inverse_edges`), stopping the recursion down any branch
/// whose cache is already empty — such a cell's own dependents were
/// already invalidated the last time its cache was cleared, so there is
/// nothing further to propagate.
pub(crate) fn invalidate_transitive(start: Position, store: &HashMap<Position, Cell>) {
    if let Some(cell) = store.get(&start) {
        cell.clear_cache();
    }
    invalidate_dependents(start, store);
}

fn invalidate_dependents(pos: Position, store: &HashMap<Position, Cell>) {
    let Some(cell) = store.get(&pos) else { return };
    for dep_pos in &cell.inverse_edges {
        if let Some(dep_cell) = store.get(dep_pos) {
            if dep_cell.cache_is_populated() {
                invalidate_dependents(*dep_pos, store);
                dep_cell.clear_cache();
            }
        }
    }
}
