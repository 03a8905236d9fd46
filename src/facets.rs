//! Limpa as colunas de facets do ficheiro de variants preparado.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use calamine::{Reader, open_workbook_auto};

use crate::paths;
use crate::xl::{cell_ref, data_to_string};

// Headers que normalmente aparecem em imports (ajusta se precisares)
const MATCH_SUBSTRINGS: &[&str] = &[
    "facet",
    "facetvalue",
    "facet value",
    "facet_value",
    "facetvalueids",
    "facet_value_ids",
    "facetValueIds",
    "facets",
    "facetvalues",
    "facet values",
];

fn header_matches(header: &str) -> bool {
    let s = header.trim().to_lowercase();
    MATCH_SUBSTRINGS.iter().any(|m| s.contains(m.to_lowercase().as_str()))
}

struct SheetFacets {
    name: String,
    // matched columns, 1-based, left to right
    columns: Vec<u32>,
    // non-empty data cells in those columns, 1-based (row, column)
    cells: Vec<(u32, u32)>,
}

fn no_facets_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    let name = match input.extension() {
        Some(ext) => format!("{stem}_NO_FACETS.{}", ext.to_string_lossy()),
        None => format!("{stem}_NO_FACETS"),
    };
    input.with_file_name(name)
}

fn find_facet_cells(path: &Path) -> Result<Vec<SheetFacets>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("não foi possível abrir o ficheiro: {}", path.display()))?;

    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .with_context(|| format!("não foi possível ler a sheet: {name}"))?;

        // Absolute coordinates: row 1 of the sheet is the header row even
        // when the used range starts lower.
        let Some((max_row, max_col)) = range.end() else {
            continue;
        };

        let mut columns = Vec::new();
        for col in 0..=max_col {
            let header = data_to_string(range.get_value((0, col)));
            if header_matches(&header) {
                columns.push(col + 1);
            }
        }
        if columns.is_empty() {
            continue;
        }

        let mut cells = Vec::new();
        for &col in &columns {
            for row in 1..=max_row {
                let value = data_to_string(range.get_value((row, col - 1)));
                if !value.is_empty() {
                    // umya coordinates are 1-based
                    cells.push((row + 1, col));
                }
            }
        }

        sheets.push(SheetFacets { name, columns, cells });
    }

    Ok(sheets)
}

fn apply_clears_and_save(src: &Path, output: &Path, sheets: &[SheetFacets]) -> Result<()> {
    let mut book = umya_spreadsheet::reader::xlsx::read(src).with_context(|| {
        format!("não foi possível abrir o ficheiro (modo de escrita): {}", src.display())
    })?;

    for facets in sheets {
        let sheet = book
            .get_sheet_by_name_mut(&facets.name)
            .ok_or_else(|| anyhow!("sheet não encontrada: {}", facets.name))?;
        for &(row, col) in &facets.cells {
            let addr = cell_ref(col, row);
            sheet.get_cell_mut(addr.as_str()).set_value("");
        }
    }

    umya_spreadsheet::writer::xlsx::write(&book, output)
        .with_context(|| format!("não foi possível guardar o ficheiro: {}", output.display()))?;

    Ok(())
}

pub fn run() -> Result<()> {
    let src = paths::home_joined(paths::SOURCE_XLSX)?;
    let out = no_facets_path(&src);

    let sheets = find_facet_cells(&src)?;

    let mut total_cols = 0usize;
    let mut total_cells = 0usize;
    for facets in &sheets {
        total_cols += facets.columns.len();
        total_cells += facets.cells.len();
        let joined = facets
            .columns
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        println!("[{}] colunas limpas: {} -> {}", facets.name, facets.columns.len(), joined);
    }

    apply_clears_and_save(&src, &out, &sheets)?;

    println!();
    println!("OK!");
    println!("Ficheiro novo: {}", out.display());
    println!("Colunas limpas (total): {total_cols}");
    println!("Células limpas (total): {total_cells}");
    Ok(())
}
