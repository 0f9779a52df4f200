//! `.xlsx` reading: first worksheet to a text [`SheetGrid`].

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};

use toolcrib_inventory::SheetGrid;

/// Read the first worksheet of an `.xlsx` workbook.
///
/// The grid starts at the first non-empty row of the sheet. Integral numbers are
/// rendered without a fractional part so that a numeric "name" like `1001` stays
/// `1001`.
pub fn read_first_sheet(bytes: &[u8]) -> Result<SheetGrid, String> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).map_err(|e| e.to_string())?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| "workbook has no worksheets".to_string())?
        .map_err(|e| e.to_string())?;

    let first_row = range.start().map(|(row, _)| row as usize + 1).unwrap_or(1);
    let rows = range
        .rows()
        .map(|cells| cells.iter().map(cell_text).collect())
        .collect();

    Ok(SheetGrid { first_row, rows })
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some((*f as i64).to_string()),
        Data::Float(f) => Some(f.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    /// Build an in-memory workbook whose first sheet holds `rows` starting at A1.
    pub(crate) fn workbook(rows: &[&[&str]]) -> Vec<u8> {
        let mut wb = Workbook::new();
        let sheet = wb.add_worksheet();
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    sheet.write_string(r as u32, c as u16, *value).unwrap();
                }
            }
        }
        wb.save_to_buffer().unwrap()
    }

    #[test]
    fn reads_header_and_rows() {
        let bytes = workbook(&[
            &["name", "description"],
            &["MOLD 1", "SHELF ID 1"],
            &["MOLD 2", ""],
        ]);
        let grid = read_first_sheet(&bytes).unwrap();
        assert_eq!(grid.first_row, 1);
        assert_eq!(
            grid.rows,
            vec![
                vec![Some("name".to_string()), Some("description".to_string())],
                vec![Some("MOLD 1".to_string()), Some("SHELF ID 1".to_string())],
                vec![Some("MOLD 2".to_string()), None],
            ]
        );
    }

    #[test]
    fn integral_numbers_lose_the_fraction() {
        let mut wb = Workbook::new();
        let sheet = wb.add_worksheet();
        sheet.write_string(0, 0, "name").unwrap();
        sheet.write_number(1, 0, 1001.0).unwrap();
        sheet.write_number(2, 0, 2.5).unwrap();
        let bytes = wb.save_to_buffer().unwrap();

        let grid = read_first_sheet(&bytes).unwrap();
        assert_eq!(grid.rows[1], vec![Some("1001".to_string())]);
        assert_eq!(grid.rows[2], vec![Some("2.5".to_string())]);
    }

    #[test]
    fn garbage_bytes_are_an_error() {
        assert!(read_first_sheet(b"not a workbook").is_err());
    }
}
