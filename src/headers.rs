use std::env;
use std::path::Path;

use anyhow::{Context, Result, bail};
use calamine::{Reader, open_workbook_auto};

use crate::xl::data_to_string;

fn inspect(path: &Path, sheet_name: &str) -> Result<(usize, Vec<String>)> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("não foi possível abrir o ficheiro: {}", path.display()))?;

    let sheet_names = workbook.sheet_names();
    if !sheet_names.iter().any(|n| n == sheet_name) {
        bail!("Sheet não existe. Sheets: {}", sheet_names.join(", "));
    }

    let range = workbook
        .worksheet_range(sheet_name)
        .with_context(|| format!("não foi possível ler a sheet: {sheet_name}"))?;

    let Some((max_row, max_col)) = range.end() else {
        return Ok((0, Vec::new()));
    };

    let headers = (0..=max_col)
        .map(|col| data_to_string(range.get_value((0, col))))
        .filter(|h| !h.is_empty())
        .collect();

    // blank rows carry no data, same as the row-object view downstream
    let rows = (1..=max_row)
        .filter(|&row| {
            (0..=max_col).any(|col| !data_to_string(range.get_value((row, col))).is_empty())
        })
        .count();

    Ok((rows, headers))
}

pub fn run() -> Result<()> {
    let path = env::var("EXCEL_PATH").context("EXCEL_PATH não definido")?;
    let sheet_name = env::var("SHEET_NAME").context("SHEET_NAME não definido")?;

    let (rows, headers) = inspect(Path::new(&path), &sheet_name)?;
    println!("Total rows: {rows}");
    println!("Headers detectados: {headers:?}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_fixture(path: &Path) {
        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_active_sheet_mut();
        sheet.set_name("Products");
        sheet.get_cell_mut("A1").set_value("SKU");
        // B1 left without a header
        sheet.get_cell_mut("C1").set_value("Price");
        sheet.get_cell_mut("A2").set_value("A1");
        sheet.get_cell_mut("C2").set_value("10");
        // row 3 fully blank
        sheet.get_cell_mut("A4").set_value("A2");
        umya_spreadsheet::writer::xlsx::write(&book, path).unwrap();
    }

    #[test]
    fn counts_data_rows_and_lists_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("check.xlsx");
        write_fixture(&path);

        let (rows, headers) = inspect(&path, "Products").unwrap();
        assert_eq!(rows, 2);
        assert_eq!(headers, vec!["SKU".to_string(), "Price".to_string()]);
    }

    #[test]
    fn unknown_sheet_lists_the_existing_ones() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("check.xlsx");
        write_fixture(&path);

        let err = inspect(&path, "Inventory").unwrap_err();
        assert_eq!(err.to_string(), "Sheet não existe. Sheets: Products");
    }

    #[test]
    fn empty_sheet_reports_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");
        let book = umya_spreadsheet::new_file();
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();

        let (rows, headers) = inspect(&path, "Sheet1").unwrap();
        assert_eq!(rows, 0);
        assert!(headers.is_empty());
    }
}
