use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use calamine::{Reader, open_workbook_auto};
use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::paths;
use crate::xl::data_to_string;

// tenta detetar colunas (ajusta aqui se necessário)
const VARIANT_SKU_HEADERS: &[&str] = &["variant_sku", "variant sku", "sku"];
const PRODUCT_SKU_HEADERS: &[&str] =
    &["product_sku", "product sku", "parent_sku", "reference", "model"];
const NAME_HEADERS: &[&str] = &["product_name", "name", "nome"];
const PRICE_HEADERS: &[&str] = &["rrp", "price", "preco", "pvp"];
const COLOR_HEADERS: &[&str] = &["color", "cor"];
const SIZE_HEADERS: &[&str] = &["size", "tamanho"];

const OUT_HEADERS: [&str; 8] = [
    "productName",
    "productSlug",
    "productDescription",
    "sku",
    "price",
    "currencyCode",
    "optionGroups",
    "optionValues",
];

struct Config {
    input: PathBuf,
    output: PathBuf,
    sheet_name: Option<String>,
    currency: String,
}

fn config_from_env() -> Result<Config> {
    let input = match env::var_os("INPUT_XLSX") {
        Some(p) => PathBuf::from(p),
        None => paths::home_joined(paths::SOURCE_XLSX)?,
    };
    let output = match env::var_os("OUT_CSV") {
        Some(p) => PathBuf::from(p),
        None => paths::home_joined(paths::IMPORT_CSV)?,
    };
    let sheet_name = env::var("SHEET_NAME").ok().filter(|s| !s.is_empty());
    let currency = env::var("CURRENCY_CODE").unwrap_or_else(|_| "EUR".to_string());
    Ok(Config { input, output, sheet_name, currency })
}

/// Exact match on the trimmed lower-cased header first (later duplicates
/// shadow earlier ones), then the first header containing any candidate.
fn find_header(headers: &[String], candidates: &[&str]) -> Option<(usize, String)> {
    let mut exact: HashMap<String, usize> = HashMap::new();
    for (idx, header) in headers.iter().enumerate() {
        let key = header.trim().to_lowercase();
        if !key.is_empty() {
            exact.insert(key, idx);
        }
    }
    for candidate in candidates {
        if let Some(&idx) = exact.get(*candidate) {
            return Some((idx, headers[idx].clone()));
        }
    }
    for (idx, header) in headers.iter().enumerate() {
        let lowered = header.trim().to_lowercase();
        if lowered.is_empty() {
            continue;
        }
        if candidates.iter().any(|candidate| lowered.contains(candidate)) {
            return Some((idx, headers[idx].clone()));
        }
    }
    None
}

fn detected_name<'a>(found: &'a Option<(usize, String)>, fallback: &'a str) -> &'a str {
    found.as_ref().map(|(_, name)| name.as_str()).unwrap_or(fallback)
}

// first comma only; the source sheets write decimals either way
fn to_cents(raw: &str) -> String {
    let normalized = raw.replacen(',', ".", 1);
    match normalized.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => ((n * 100.0).round() as i64).to_string(),
        _ => "0".to_string(),
    }
}

fn slugify(re: &Regex, raw: &str) -> String {
    let folded: String = raw
        .trim()
        .to_lowercase()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect();
    let slug = re.replace_all(&folded, "-");
    let slug: String = slug.trim_matches('-').chars().take(60).collect();
    if slug.is_empty() { "item".to_string() } else { slug }
}

fn product_key(variant_sku: &str, product_sku: &str) -> String {
    if !product_sku.is_empty() {
        return product_sku.to_string();
    }
    match variant_sku.rsplit_once('-') {
        Some((prefix, _)) => prefix.to_string(),
        None => variant_sku.to_string(),
    }
}

fn convert(config: &Config) -> Result<usize> {
    let mut workbook = open_workbook_auto(&config.input).with_context(|| {
        format!("não foi possível abrir o ficheiro: {}", config.input.display())
    })?;

    let sheet_names = workbook.sheet_names();
    let sheet_name = match &config.sheet_name {
        Some(name) => {
            if !sheet_names.iter().any(|n| n == name) {
                bail!("Sheet não encontrada. Sheets: {}", sheet_names.join(", "));
            }
            name.clone()
        }
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| anyhow!("Sheet não encontrada. Sheets: {}", sheet_names.join(", ")))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("não foi possível ler a sheet: {sheet_name}"))?;

    let (max_row, max_col) = match range.end() {
        Some((row, col)) if row > 0 => (row, col),
        _ => bail!("Sheet vazia."),
    };

    let headers: Vec<String> = (0..=max_col)
        .map(|col| data_to_string(range.get_value((0, col))))
        .collect();

    let variant_sku = find_header(&headers, VARIANT_SKU_HEADERS).ok_or_else(|| {
        let known: Vec<&str> =
            headers.iter().filter(|h| !h.is_empty()).map(String::as_str).collect();
        anyhow!("Não encontrei coluna variant sku. Headers: {}", known.join(" | "))
    })?;
    let product_sku = find_header(&headers, PRODUCT_SKU_HEADERS);
    let name_col = find_header(&headers, NAME_HEADERS);
    let price = find_header(&headers, PRICE_HEADERS);
    let color = find_header(&headers, COLOR_HEADERS);
    let size = find_header(&headers, SIZE_HEADERS);

    println!("Detetado:");
    println!(" - Variant SKU: {}", variant_sku.1);
    println!(" - Product SKU: {}", detected_name(&product_sku, "(fallback: prefixo do variant)"));
    println!(" - Name: {}", detected_name(&name_col, "(fallback: product sku)"));
    println!(" - Price: {}", detected_name(&price, "(vazio => 0)"));
    println!(" - Color: {}", detected_name(&color, "(sem)"));
    println!(" - Size: {}", detected_name(&size, "(sem)"));

    let slug_re =
        Regex::new(r"[^a-z0-9]+").context("não foi possível compilar a expressão regular")?;
    let cell = |row: u32, col: usize| {
        data_to_string(range.get_value((row, col as u32))).trim().to_string()
    };

    let mut records: Vec<[String; 8]> = Vec::new();
    for row in 1..=max_row {
        let sku = cell(row, variant_sku.0);
        if sku.is_empty() {
            continue;
        }

        let raw_product_sku = match &product_sku {
            Some((idx, _)) => cell(row, *idx),
            None => String::new(),
        };
        let key = product_key(&sku, &raw_product_sku);

        let name = match &name_col {
            Some((idx, _)) => cell(row, *idx),
            None => key.clone(),
        };

        let color_value = color.as_ref().map(|(idx, _)| cell(row, *idx)).unwrap_or_default();
        let size_value = size.as_ref().map(|(idx, _)| cell(row, *idx)).unwrap_or_default();

        let mut groups = Vec::new();
        let mut values = Vec::new();
        if !color_value.is_empty() {
            groups.push("Color");
            values.push(format!("Color:{color_value}"));
        }
        if !size_value.is_empty() {
            groups.push("Size");
            values.push(format!("Size:{size_value}"));
        }

        let price_value = match &price {
            Some((idx, _)) => to_cents(&cell(row, *idx)),
            None => "0".to_string(),
        };

        let slug_source = if name.is_empty() { key.clone() } else { name.clone() };

        records.push([
            name,
            slugify(&slug_re, &slug_source),
            String::new(),
            sku,
            price_value,
            config.currency.clone(),
            groups.join("|"),
            values.join("|"),
        ]);
    }

    if let Some(parent) = config.output.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("não foi possível criar a pasta: {}", parent.display()))?;
    }

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(&config.output)
        .with_context(|| {
            format!("não foi possível criar o ficheiro: {}", config.output.display())
        })?;
    writer
        .write_record(OUT_HEADERS)
        .context("não foi possível escrever o cabeçalho do CSV")?;
    for record in &records {
        writer.write_record(record).context("não foi possível escrever o CSV")?;
    }
    writer.flush().context("não foi possível escrever o CSV")?;

    Ok(records.len())
}

pub fn run() -> Result<()> {
    let config = config_from_env()?;
    let written = convert(&config)?;
    println!("OK -> {} ({} linhas)", config.output.display(), written);
    Ok(())
}
