//! Cell position parsing and formatting.
//!
//! Provides bidirectional conversion between spreadsheet-style cell
//! references (e.g. "A1", "B2", "XFD16384") and zero-indexed row/column
//! coordinates, plus the `NONE` sentinel used for absent/invalid positions.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Maximum number of rows a sheet can address (exclusive upper bound).
pub const MAX_ROWS: i64 = 16384;
/// Maximum number of columns a sheet can address (exclusive upper bound).
pub const MAX_COLS: i64 = 16384;
/// Longest accepted column-letter prefix ("XFD" is 3 letters).
const MAX_COL_LETTERS: usize = 3;

/// A cell coordinate. `row`/`col` are zero-indexed; negative values only
/// ever appear in [`Position::NONE`].
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct Position {
    pub row: i64,
    pub col: i64,
}

impl Position {
    /// Sentinel denoting "absent/invalid". Never a legitimate API argument.
    pub const NONE: Position = Position { row: -1, col: -1 };

    pub fn new(row: i64, col: i64) -> Position {
        Position { row, col }
    }

    pub fn is_valid(&self) -> bool {
        self.row >= 0 && self.row < MAX_ROWS && self.col >= 0 && self.col < MAX_COLS
    }

    /// Uppercase base-26 column label followed by the 1-indexed row.
    /// Returns the empty string for an invalid position.
    pub fn to_display_string(&self) -> String {
        if !self.is_valid() {
            return String::new();
        }
        format!("{}{}", col_to_letters(self.col), self.row + 1)
    }

    /// Parse spreadsheet notation such as "A1" or "AA10".
    ///
    /// Rejects (returning [`Position::NONE`]): empty input, lowercase
    /// letters, any ordering other than letters-then-digits, a letter
    /// prefix longer than three characters, any non-alphanumeric
    /// character, and a row/column that falls outside the valid range
    /// (including a row of "0", since rows are one-indexed).
    pub fn from_str(s: &str) -> Position {
        Self::parse_structural(s).filter(Position::is_valid).unwrap_or(Position::NONE)
    }

    /// Like [`Position::from_str`], but a structurally well-formed reference
    /// that merely falls outside `MAX_ROWS`/`MAX_COLS` is returned as-is
    /// instead of collapsing to `NONE`. Used by the formula lexer/parser so
    /// that an out-of-range reference like "ZZZ3" keeps enough information
    /// for [`crate::ExpressionTree::pretty`] to reproduce the original text,
    /// while still being `!is_valid()` for evaluation purposes (the
    /// resolver raises `Ref` for it). Genuinely malformed text (wrong
    /// character order, oversized letter prefix, non-alphanumeric input)
    /// still collapses to `NONE`, since there is no row/col to preserve.
    pub(crate) fn parse_preserving_range(s: &str) -> Position {
        Self::parse_structural(s).unwrap_or(Position::NONE)
    }

    fn parse_structural(s: &str) -> Option<Position> {
        let caps = position_re().captures(s)?;
        let letters = caps.get(1)?.as_str();
        let digits = caps.get(2)?.as_str();

        if letters.len() > MAX_COL_LETTERS {
            return None;
        }

        let mut col_acc: i64 = 0;
        for b in letters.bytes() {
            let digit = (b - b'A') as i64 + 1;
            col_acc = col_acc.checked_mul(26)?.checked_add(digit)?;
        }
        let col = col_acc.checked_sub(1)?;

        let row_number: i64 = digits.parse().ok()?;
        let row = row_number.checked_sub(1)?;

        Some(Position::new(row, col))
    }
}

fn position_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([A-Z]+)([0-9]+)$").expect("position regex must compile")
    })
}

/// Convert a zero-indexed column to its base-26 letters (0 -> "A", 25 -> "Z", 26 -> "AA").
pub fn col_to_letters(col: i64) -> String {
    let mut result = String::new();
    let mut n = col + 1;
    while n > 0 {
        n -= 1;
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        n /= 26;
    }
    result
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}
