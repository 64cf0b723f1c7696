//! The printable bounding box of a sheet.

/// Extent of the region a sheet would print: `rows`/`cols` are exclusive
/// upper bounds over positions holding non-`Empty` content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Size {
    pub rows: i64,
    pub cols: i64,
}

impl Size {
    pub const ZERO: Size = Size { rows: 0, cols: 0 };
}
