//! Cell access helpers shared by header resolution and row extraction

use calamine::Data;

use crate::patents::CellValue;

/// Render a cell as trimmed text; missing and error cells are empty
///
/// Whole floats render without a fractional part so numeric application
/// numbers keep their written form.
pub fn cell_text(row: &[Data], col: usize) -> String {
    row.get(col)
        .map(|c| match c {
            Data::String(s) => s.trim().to_string(),
            Data::Int(i) => i.to_string(),
            Data::Float(f) => {
                if f.fract() == 0.0 && f.abs() < 1e15 {
                    (*f as i64).to_string()
                } else {
                    f.to_string()
                }
            }
            Data::Bool(b) => b.to_string(),
            Data::DateTime(dt) => dt.as_f64().to_string(),
            Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
            Data::Error(_) | Data::Empty => String::new(),
        })
        .unwrap_or_default()
}

/// Cell text, or `None` when the cell is empty after trimming
pub fn cell_opt_text(row: &[Data], col: usize) -> Option<String> {
    let text = cell_text(row, col);
    if text.is_empty() { None } else { Some(text) }
}

/// Convert a raw cell into its provenance value
pub fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

/// Provenance value at `col`, `None` when absent or empty
pub fn cell_value_at(row: &[Data], col: usize) -> Option<CellValue> {
    row.get(col).map(cell_value).and_then(CellValue::non_empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text_renders_numbers() {
        let row = vec![
            Data::Float(202011012345.0),
            Data::Float(1.5),
            Data::Int(7),
            Data::String("  padded ".to_string()),
            Data::Bool(true),
        ];

        assert_eq!(cell_text(&row, 0), "202011012345");
        assert_eq!(cell_text(&row, 1), "1.5");
        assert_eq!(cell_text(&row, 2), "7");
        assert_eq!(cell_text(&row, 3), "padded");
        assert_eq!(cell_text(&row, 4), "true");
        assert_eq!(cell_text(&row, 99), "");
    }

    #[test]
    fn test_cell_opt_text() {
        let row = vec![Data::String("   ".to_string()), Data::Empty];
        assert_eq!(cell_opt_text(&row, 0), None);
        assert_eq!(cell_opt_text(&row, 1), None);
    }

    #[test]
    fn test_cell_value_conversion() {
        assert_eq!(cell_value(&Data::Empty), CellValue::Empty);
        assert_eq!(cell_value(&Data::Int(3)), CellValue::Int(3));
        assert_eq!(
            cell_value(&Data::String("x".to_string())),
            CellValue::Text("x".to_string())
        );
        assert_eq!(cell_value_at(&[Data::String(" ".to_string())], 0), None);
    }
}
