//! Workbook-backed [`Grid`] for `sheetjson-core`.
//!
//! Workbooks are read with `calamine`, so `.xlsx`, `.xlsm`, `.xlsb`, `.xls` and
//! `.ods` all work. Stored cell values are rendered to text before the core
//! decoder interprets them against the sheet schema.

use std::borrow::Cow;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, CellErrorType, Data, Range, Reader, Sheets};
use sheetjson_core::Grid;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkbookError {
    #[error("failed to open workbook {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },
    #[error("workbook {} has no worksheets", path.display())]
    NoSheets { path: PathBuf },
    #[error("worksheet `{name}` not found (available: {})", available.join(", "))]
    SheetNotFound { name: String, available: Vec<String> },
    #[error("failed to read worksheet: {0}")]
    Read(#[from] calamine::Error),
}

/// An open workbook.
pub struct Workbook {
    path: PathBuf,
    sheets: Sheets<BufReader<File>>,
}

impl Workbook {
    /// Open a workbook from disk, detecting the format from its extension.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, WorkbookError> {
        let path = path.as_ref();
        let sheets = open_workbook_auto(path).map_err(|source| WorkbookError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            sheets,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    /// The first worksheet, which is the one decoded by default.
    pub fn first_sheet(&mut self) -> Result<SheetGrid, WorkbookError> {
        let name = self
            .sheet_names()
            .into_iter()
            .next()
            .ok_or_else(|| WorkbookError::NoSheets {
                path: self.path.clone(),
            })?;
        self.sheet(&name)
    }

    pub fn sheet(&mut self, name: &str) -> Result<SheetGrid, WorkbookError> {
        let available = self.sheet_names();
        if !available.iter().any(|candidate| candidate == name) {
            return Err(WorkbookError::SheetNotFound {
                name: name.to_string(),
                available,
            });
        }
        let range = self.sheets.worksheet_range(name)?;
        log::debug!(
            "loaded worksheet `{name}` from {} ({:?} cells)",
            self.path.display(),
            range.get_size()
        );
        Ok(SheetGrid::new(name, range))
    }
}

/// One worksheet's cell values.
#[derive(Debug, Clone)]
pub struct SheetGrid {
    name: String,
    range: Range<Data>,
}

impl SheetGrid {
    pub fn new(name: impl Into<String>, range: Range<Data>) -> Self {
        Self {
            name: name.into(),
            range,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Grid for SheetGrid {
    fn cell_text(&self, row: u32, col: u32) -> Cow<'_, str> {
        if row == 0 || col == 0 {
            return Cow::Borrowed("");
        }
        // NOTE: `get_value` takes absolute (0-indexed) worksheet coordinates,
        // even when the used range does not start at A1.
        match self.range.get_value((row - 1, col - 1)) {
            Some(data) => render(data),
            None => Cow::Borrowed(""),
        }
    }

    fn dimensions(&self) -> (u32, u32) {
        match self.range.end() {
            Some((row, col)) if !self.range.is_empty() => (row + 1, col + 1),
            _ => (0, 0),
        }
    }
}

/// Text for a stored cell value.
///
/// Number formats are not applied: a date renders as its serial number and a
/// formula result renders at full `f64` precision, not as displayed in Excel.
pub fn render(data: &Data) -> Cow<'_, str> {
    match data {
        Data::Empty => Cow::Borrowed(""),
        Data::String(v) | Data::DateTimeIso(v) | Data::DurationIso(v) => Cow::Borrowed(v),
        Data::Int(v) => Cow::Owned(v.to_string()),
        Data::Float(v) => Cow::Owned(render_number(*v)),
        Data::Bool(true) => Cow::Borrowed("TRUE"),
        Data::Bool(false) => Cow::Borrowed("FALSE"),
        Data::DateTime(v) => Cow::Owned(render_number(v.as_f64())),
        Data::Error(e) => Cow::Borrowed(error_literal(e)),
    }
}

fn render_number(v: f64) -> String {
    // `f64`'s `Display` already omits a zero fraction (`10`, not `10.0`).
    if v == 0.0 {
        "0".to_string()
    } else {
        v.to_string()
    }
}

fn error_literal(err: &CellErrorType) -> &'static str {
    match err {
        CellErrorType::Div0 => "#DIV/0!",
        CellErrorType::NA => "#N/A",
        CellErrorType::Name => "#NAME?",
        CellErrorType::Null => "#NULL!",
        CellErrorType::Num => "#NUM!",
        CellErrorType::Ref => "#REF!",
        CellErrorType::Value => "#VALUE!",
        CellErrorType::GettingData => "#GETTING_DATA",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_render_like_the_grid_shows_them() {
        assert_eq!(render(&Data::Float(10.0)), "10");
        assert_eq!(render(&Data::Float(-0.0)), "0");
        assert_eq!(render(&Data::Float(2.5)), "2.5");
        assert_eq!(render(&Data::Int(-3)), "-3");
        assert_eq!(render(&Data::Float(1.0)), "1");
        assert_eq!(render(&Data::Float(0.1 + 0.2)), "0.30000000000000004");
    }

    #[test]
    fn other_values_render_as_text() {
        assert_eq!(render(&Data::Empty), "");
        assert_eq!(render(&Data::Bool(true)), "TRUE");
        assert_eq!(render(&Data::String(" x ".into())), " x ");
        assert_eq!(render(&Data::Error(CellErrorType::Div0)), "#DIV/0!");
    }

    #[test]
    fn range_offset_is_respected() {
        let mut range = Range::new((1, 1), (4, 2));
        range.set_value((1, 1), Data::String("array".into()));
        range.set_value((4, 2), Data::Float(7.0));
        let grid = SheetGrid::new("Sheet1", range);

        assert_eq!(grid.dimensions(), (5, 3));
        assert_eq!(grid.cell_text(2, 2), "array");
        assert_eq!(grid.cell_text(5, 3), "7");
        assert_eq!(grid.cell_text(1, 1), "");
    }

    #[test]
    fn empty_range_has_no_dimensions() {
        let grid = SheetGrid::new("Empty", Range::<Data>::empty());
        assert_eq!(grid.dimensions(), (0, 0));
        assert_eq!(grid.cell_text(1, 1), "");
    }
}
