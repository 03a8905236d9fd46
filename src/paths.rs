use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::BaseDirs;

/// The prepared variants workbook every step of the pipeline starts from.
pub(crate) const SOURCE_XLSX: &str =
    "carsandvibes/imports/source/2026_RRP_OMP_23102025_variants_options_prepared.xlsx";

/// Default landing spot for the generated Vendure import CSV.
pub(crate) const IMPORT_CSV: &str = "carsandvibes/imports/working/vendure_products_import.csv";

pub(crate) fn home_joined(relative: &str) -> Result<PathBuf> {
    let dirs = BaseDirs::new().context("não foi possível determinar a pasta home")?;
    Ok(dirs.home_dir().join(relative))
}
