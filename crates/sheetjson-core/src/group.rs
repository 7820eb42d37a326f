//! Row groups for repeated sub-elements (array elements, map entries).
//!
//! The anchor column of an array or map marks where its elements start. The
//! group is every non-blank row from the first `1` sentinel up to (not
//! including) the next `1` sentinel. Surrounding whitespace is ignored, so
//! `" 1 "` is a sentinel too:
//!
//! ```text
//! row  anchor
//!  5   1       <- first sentinel, joins the group
//!  6   5       <- joins
//!  7           <- blank, skipped
//!  8   1       <- second sentinel, ends the group
//! ```

use crate::grid::Grid;

/// Anchor value that opens (and, on its second occurrence, closes) a group.
pub const SENTINEL: &str = "1";

/// Rows forming the group anchored at (`start_row`, `column`).
///
/// A blank anchor cell means the array/map is intentionally absent and yields
/// an empty group.
pub fn resolve_group<G: Grid + ?Sized>(grid: &G, start_row: u32, column: u32) -> Vec<u32> {
    let mut rows = Vec::new();
    if grid.is_blank(start_row, column) {
        return rows;
    }

    let (last_row, _) = grid.dimensions();
    let mut seen_sentinel = false;
    for row in start_row..=last_row {
        let text = grid.cell_text(row, column);
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        if text == SENTINEL {
            if seen_sentinel {
                break;
            }
            seen_sentinel = true;
        }
        rows.push(row);
    }
    rows
}
