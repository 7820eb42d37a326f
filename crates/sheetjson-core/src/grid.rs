use std::borrow::Cow;

/// Read-only access to the text of a worksheet.
///
/// Rows and columns are **1-indexed**, matching the way sheet authors talk about
/// them (`row 2` holds the type tokens, `column 1` the row markers). Cells
/// outside the used range read as the empty string.
pub trait Grid {
    /// Display text of the cell at (`row`, `col`).
    fn cell_text(&self, row: u32, col: u32) -> Cow<'_, str>;

    /// `(last_row, last_col)` of the used range, or `(0, 0)` for an empty sheet.
    fn dimensions(&self) -> (u32, u32);

    fn is_blank(&self, row: u32, col: u32) -> bool {
        self.cell_text(row, col).trim().is_empty()
    }
}

impl<G: Grid + ?Sized> Grid for &G {
    fn cell_text(&self, row: u32, col: u32) -> Cow<'_, str> {
        (**self).cell_text(row, col)
    }

    fn dimensions(&self) -> (u32, u32) {
        (**self).dimensions()
    }
}

/// In-memory grid of plain strings.
///
/// Useful for tests and for callers that already hold cell text (e.g. a CSV
/// reader). Ragged rows are allowed; the column count is the widest row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextGrid {
    rows: Vec<Vec<String>>,
    last_col: u32,
}

impl TextGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        let last_col = rows.iter().map(Vec::len).max().unwrap_or(0) as u32;
        Self { rows, last_col }
    }

    /// Set a single cell, growing the grid as needed.
    pub fn set(&mut self, row: u32, col: u32, text: impl Into<String>) {
        if row == 0 || col == 0 {
            return;
        }
        let (r, c) = ((row - 1) as usize, (col - 1) as usize);
        if self.rows.len() <= r {
            self.rows.resize_with(r + 1, Vec::new);
        }
        let cells = &mut self.rows[r];
        if cells.len() <= c {
            cells.resize_with(c + 1, String::new);
        }
        cells[c] = text.into();
        self.last_col = self.last_col.max(col);
    }
}

impl Grid for TextGrid {
    fn cell_text(&self, row: u32, col: u32) -> Cow<'_, str> {
        if row == 0 || col == 0 {
            return Cow::Borrowed("");
        }
        self.rows
            .get((row - 1) as usize)
            .and_then(|cells| cells.get((col - 1) as usize))
            .map(|text| Cow::Borrowed(text.as_str()))
            .unwrap_or(Cow::Borrowed(""))
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.rows.len() as u32, self.last_col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_grid_reads_one_based_and_pads_ragged_rows() {
        let grid = TextGrid::from_rows(vec![vec!["a", "b", "c"], vec!["d"]]);
        assert_eq!(grid.dimensions(), (2, 3));
        assert_eq!(grid.cell_text(1, 1), "a");
        assert_eq!(grid.cell_text(1, 3), "c");
        assert_eq!(grid.cell_text(2, 3), "");
        assert_eq!(grid.cell_text(0, 1), "");
        assert_eq!(grid.cell_text(9, 9), "");
    }

    #[test]
    fn set_grows_grid() {
        let mut grid = TextGrid::new();
        grid.set(3, 4, "x");
        assert_eq!(grid.dimensions(), (3, 4));
        assert_eq!(grid.cell_text(3, 4), "x");
        assert!(grid.is_blank(1, 1));
    }
}
