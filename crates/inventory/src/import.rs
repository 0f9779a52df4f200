//! Bulk import row schema.
//!
//! A spreadsheet is reduced to a [`SheetGrid`] of optional text cells, turned into
//! typed [`ImportRow`]s by header lookup, then validated row by row into
//! [`NewProduct`]s. Validation never stops at the first bad row: every failure is
//! collected into an [`ImportReport`].

use serde::Serialize;

use toolcrib_core::{DomainError, DomainResult};

use crate::product::NewProduct;

pub const NAME_COLUMN: &str = "name";
pub const DESCRIPTION_COLUMN: &str = "description";

/// Uploads must carry this extension (compared case-insensitively).
pub const XLSX_EXTENSION: &str = ".xlsx";

/// Rectangular sheet contents as text cells; `None` is an empty cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetGrid {
    /// 1-based sheet row number of `rows[0]`.
    pub first_row: usize,
    pub rows: Vec<Vec<Option<String>>>,
}

/// One data row of an import, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRow {
    /// Sheet row number (1-based) for error reporting.
    pub row: usize,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ImportRow {
    pub fn new(row: usize, name: Option<String>, description: Option<String>) -> Self {
        Self {
            row,
            name,
            description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowFailure {
    pub row: usize,
    pub reason: String,
}

/// Aggregated per-row outcome of validating an import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub accepted: usize,
    pub failures: Vec<RowFailure>,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

pub fn ensure_xlsx_filename(filename: &str) -> DomainResult<()> {
    if filename.to_ascii_lowercase().ends_with(XLSX_EXTENSION) {
        Ok(())
    } else {
        Err(DomainError::validation(format!(
            "expected a {XLSX_EXTENSION} file, got '{filename}'"
        )))
    }
}

/// Locate the `name`/`description` columns in the header row and map every
/// following non-blank row to an [`ImportRow`].
pub fn rows_from_grid(grid: &SheetGrid) -> DomainResult<Vec<ImportRow>> {
    let Some((header, data)) = grid.rows.split_first() else {
        return Ok(Vec::new());
    };

    let column = |wanted: &str| {
        header.iter().position(|cell| {
            cell.as_deref()
                .is_some_and(|c| c.trim().eq_ignore_ascii_case(wanted))
        })
    };
    let name_col = column(NAME_COLUMN)
        .ok_or_else(|| DomainError::validation(format!("missing '{NAME_COLUMN}' column")))?;
    let description_col = column(DESCRIPTION_COLUMN);

    let rows = data
        .iter()
        .enumerate()
        .filter(|(_, cells)| cells.iter().any(|c| c.as_deref().is_some_and(|v| !v.trim().is_empty())))
        .map(|(idx, cells)| {
            let cell = |col: usize| cells.get(col).cloned().flatten();
            ImportRow::new(
                grid.first_row + idx + 1,
                cell(name_col),
                description_col.and_then(cell),
            )
        })
        .collect();

    Ok(rows)
}

/// Validate every row. Returns the products when all rows pass, otherwise the
/// report listing each failing row.
pub fn validate_rows(rows: Vec<ImportRow>) -> Result<Vec<NewProduct>, ImportReport> {
    let mut products = Vec::with_capacity(rows.len());
    let mut report = ImportReport::default();

    for row in rows {
        let Some(name) = row.name else {
            report.failures.push(RowFailure {
                row: row.row,
                reason: format!("missing {NAME_COLUMN}"),
            });
            continue;
        };
        match NewProduct::new(name, row.description) {
            Ok(p) => products.push(p),
            Err(e) => report.failures.push(RowFailure {
                row: row.row,
                reason: e.to_string(),
            }),
        }
    }

    report.accepted = products.len();
    if report.is_clean() {
        Ok(products)
    } else {
        Err(report)
    }
}
