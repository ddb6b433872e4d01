//! Table loading from delimited text files and spreadsheets.
//!
//! Every column is read as text (schema inference disabled) so the type
//! classifier sees raw cell values. Empty fields become missing values.

use crate::error::{ProfilingError, Result, ResultExt};
use crate::utils::format_value;
use calamine::{Data, Range, Reader, open_workbook_auto};
use polars::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Input formats recognised by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Tsv,
    /// Tab-delimited if that splits the header, comma-delimited otherwise.
    Txt,
    /// First worksheet of an Excel or OpenDocument workbook.
    Spreadsheet,
}

impl InputFormat {
    /// Detect the format from a path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(InputFormat::Csv),
            "tsv" => Some(InputFormat::Tsv),
            "txt" => Some(InputFormat::Txt),
            "xls" | "xlsx" | "xlsm" | "xlsb" | "ods" => Some(InputFormat::Spreadsheet),
            _ => None,
        }
    }
}

/// Load a table from a `.csv`, `.tsv`, `.txt` or spreadsheet file.
///
/// A path without a recognised extension is retried as `{path}.csv`, then
/// as `{path}.xlsx`.
pub fn load_table(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    info!("Loading table from: {}", path.display());

    let df = match InputFormat::from_path(path) {
        Some(InputFormat::Csv) => read_delimited(path, b',')?,
        Some(InputFormat::Tsv) => read_delimited(path, b'\t')?,
        Some(InputFormat::Txt) => read_txt(path)?,
        Some(InputFormat::Spreadsheet) => read_spreadsheet(path)?,
        None => read_without_extension(path)?,
    };

    info!("Table loaded: {:?}", df.shape());
    Ok(df)
}

/// Read a delimited file with every column as text.
pub fn read_delimited(path: &Path, separator: u8) -> Result<DataFrame> {
    std::fs::metadata(path)?;

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(
            CsvParseOptions::default()
                .with_separator(separator)
                .with_quote_char(Some(b'"')),
        )
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
        .context(format!("Failed to read '{}'", path.display()))
}

/// Try tab first, fall back to comma, fail if neither yields a table.
fn read_txt(path: &Path) -> Result<DataFrame> {
    std::fs::metadata(path)?;

    let tab = match read_delimited(path, b'\t') {
        Ok(df) if df.width() > 1 => {
            debug!("'{}' read as tab-delimited", path.display());
            return Ok(df);
        }
        other => other,
    };

    match read_delimited(path, b',') {
        Ok(df) => {
            debug!("'{}' read as comma-delimited", path.display());
            Ok(df)
        }
        Err(comma_err) => match tab {
            // A single-column file splits on neither delimiter
            Ok(df) => Ok(df),
            Err(tab_err) => {
                warn!(
                    "Delimiter detection failed (tab: {}; comma: {})",
                    tab_err, comma_err
                );
                Err(ProfilingError::DelimiterDetection(
                    path.display().to_string(),
                ))
            }
        },
    }
}

fn read_without_extension(path: &Path) -> Result<DataFrame> {
    let with_csv = append_extension(path, "csv");
    if with_csv.exists() {
        warn!(
            "No extension on '{}', reading '{}'",
            path.display(),
            with_csv.display()
        );
        return read_delimited(&with_csv, b',');
    }

    let with_xlsx = append_extension(path, "xlsx");
    if with_xlsx.exists() {
        warn!(
            "No extension on '{}', reading '{}'",
            path.display(),
            with_xlsx.display()
        );
        return read_spreadsheet(&with_xlsx);
    }

    Err(ProfilingError::UnsupportedFormat(format!(
        "{} (file name must include a type extension, e.g. .xlsx/.csv)",
        path.display()
    )))
}

/// Read the first worksheet of a workbook; its first row is the header.
pub fn read_spreadsheet(path: &Path) -> Result<DataFrame> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| {
            ProfilingError::UnsupportedFormat(format!(
                "{} (workbook has no worksheets)",
                path.display()
            ))
        })?;

    debug!("Reading worksheet '{}' of '{}'", sheet, path.display());
    let range = workbook.worksheet_range(&sheet)?;
    range_to_dataframe(&range).context(format!("Failed to read '{}'", path.display()))
}

/// Convert a worksheet range into a frame of text columns.
///
/// Blank header cells are named `Unnamed: {index}` and repeated names get a
/// `.{n}` suffix. Empty and error cells become missing values.
fn range_to_dataframe(range: &Range<Data>) -> Result<DataFrame> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(DataFrame::empty());
    };

    let names = header_names(header);
    let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); names.len()];
    for row in rows {
        for (j, cell) in row.iter().enumerate() {
            columns[j].push(cell_text(cell));
        }
    }

    let columns: Vec<Column> = names
        .into_iter()
        .zip(columns)
        .map(|(name, values)| Series::new(name.into(), values).into())
        .collect();

    Ok(DataFrame::new(columns)?)
}

fn header_names(header: &[Data]) -> Vec<String> {
    let mut seen = HashSet::new();
    header
        .iter()
        .enumerate()
        .map(|(j, cell)| {
            let base = cell_text(cell).unwrap_or_else(|| format!("Unnamed: {}", j));
            let mut name = base.clone();
            let mut n = 1;
            while !seen.insert(name.clone()) {
                name = format!("{}.{}", base, n);
                n += 1;
            }
            name
        })
        .collect()
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => Some(format_value(*f)),
        other => Some(other.to_string()),
    }
}

fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}
