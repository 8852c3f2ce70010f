//! First-sheet grid loading

use std::io::Cursor;

use calamine::{Data, Reader, Sheets, open_workbook_auto_from_rs};

use super::ImportError;
use super::hyperlinks::{HyperlinkMap, read_first_sheet_hyperlinks};

/// Cell grid of the first worksheet, anchored at A1
#[derive(Debug, Default)]
pub struct SheetGrid {
    pub name: String,
    /// Physical rows; row 0 is sheet row 1
    pub rows: Vec<Vec<Data>>,
    /// Hyperlink ranges over physical `(row, column)`
    pub hyperlinks: HyperlinkMap,
}

impl SheetGrid {
    pub fn hyperlink(&self, row: usize, col: usize) -> Option<&str> {
        self.hyperlinks
            .get(u32::try_from(row).ok()?, u32::try_from(col).ok()?)
    }
}

/// Load the first sheet (workbook order) of any supported workbook format
pub fn read_first_sheet(bytes: &[u8]) -> Result<SheetGrid, ImportError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| ImportError::Unreadable(e.to_string()))?;

    let name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(ImportError::NoSheets)?;

    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| ImportError::Unreadable(format!("sheet '{}': {}", name, e)))?;

    // Ranges start at the first populated cell; pad back out to A1
    let (row_offset, col_offset) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut rows: Vec<Vec<Data>> = vec![Vec::new(); row_offset];
    for row in range.rows() {
        let mut cells = vec![Data::Empty; col_offset];
        cells.extend_from_slice(row);
        rows.push(cells);
    }

    let hyperlinks = if matches!(workbook, Sheets::Xlsx(_)) {
        match read_first_sheet_hyperlinks(bytes) {
            Ok(map) => map,
            Err(e) => {
                log::warn!("Could not read hyperlinks from '{}': {:#}", name, e);
                HyperlinkMap::new()
            }
        }
    } else {
        log::debug!("Hyperlinks are only recovered from OOXML workbooks");
        HyperlinkMap::new()
    };

    log::debug!(
        "Loaded sheet '{}': {} rows, {} hyperlink ranges",
        name,
        rows.len(),
        hyperlinks.len()
    );

    Ok(SheetGrid {
        name,
        rows,
        hyperlinks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    #[test]
    fn test_grid_is_anchored_at_a1() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(1, 2, "Application No").unwrap();
        sheet.write_string(2, 2, "IN-1").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let grid = read_first_sheet(&bytes).unwrap();
        assert_eq!(grid.rows.len(), 3);
        assert!(grid.rows[0].is_empty());
        assert_eq!(grid.rows[2][2], Data::String("IN-1".to_string()));
        assert_eq!(grid.rows[2][0], Data::Empty);
    }

    #[test]
    fn test_only_first_sheet_is_read() {
        let mut workbook = Workbook::new();
        workbook
            .add_worksheet()
            .set_name("Register")
            .unwrap()
            .write_string(0, 0, "first")
            .unwrap();
        workbook
            .add_worksheet()
            .write_string(0, 0, "second")
            .unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let grid = read_first_sheet(&bytes).unwrap();
        assert_eq!(grid.name, "Register");
        assert_eq!(grid.rows[0][0], Data::String("first".to_string()));
    }

    #[test]
    fn test_garbage_is_unreadable() {
        let err = read_first_sheet(b"definitely not a workbook").unwrap_err();
        assert!(matches!(err, ImportError::Unreadable(_)));
    }
}
