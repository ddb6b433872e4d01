//! Side-by-side sheet output for profile reports.
//!
//! Each summary table occupies two columns (label, measure) with its headers
//! in the first row. Tables are laid out left to right in report order,
//! separated by a fixed number of empty spacer columns.

use crate::config::ProfileConfig;
use crate::error::{Result, ResultExt};
use crate::types::ProfileReport;
use polars::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::info;

/// Grid of optional cells, row-major. `None` is an empty cell.
pub type SheetGrid = Vec<Vec<Option<String>>>;

/// Writes every summary table of a report onto one sheet.
#[derive(Debug, Clone)]
pub struct SummaryWriter {
    spacer_columns: usize,
}

impl Default for SummaryWriter {
    fn default() -> Self {
        Self { spacer_columns: 1 }
    }
}

impl SummaryWriter {
    pub fn new(spacer_columns: usize) -> Self {
        Self { spacer_columns }
    }

    pub fn from_config(config: &ProfileConfig) -> Self {
        Self::new(config.spacer_columns)
    }

    /// First sheet column of the table at `index`.
    pub fn start_column(&self, index: usize) -> usize {
        index * (2 + self.spacer_columns)
    }

    /// Lay the report out as a row-major grid: headers first, shorter tables padded.
    pub fn layout(&self, report: &ProfileReport) -> SheetGrid {
        let tables = report.len();
        if tables == 0 {
            return Vec::new();
        }

        let width = self.start_column(tables - 1) + 2;
        let height = 1 + report
            .iter()
            .map(|(_, table)| table.len())
            .max()
            .unwrap_or(0);
        let mut grid: SheetGrid = vec![vec![None; width]; height];

        for (index, (_, table)) in report.iter().enumerate() {
            let col = self.start_column(index);
            grid[0][col] = Some(table.label_column.clone());
            grid[0][col + 1] = Some(table.measure_column.clone());

            for (offset, row) in table.rows.iter().enumerate() {
                grid[offset + 1][col] = row.label.clone();
                grid[offset + 1][col + 1] = Some(row.measure.to_string());
            }
        }

        grid
    }

    /// The laid-out sheet as a frame of text columns (headers in the first row).
    pub fn to_dataframe(&self, report: &ProfileReport) -> Result<DataFrame> {
        let grid = self.layout(report);
        let width = grid.first().map_or(0, Vec::len);

        let columns: Vec<Column> = (0..width)
            .map(|j| {
                let cells: Vec<Option<String>> = grid.iter().map(|row| row[j].clone()).collect();
                Series::new(format!("column_{}", j).into(), cells).into()
            })
            .collect();

        Ok(DataFrame::new(columns)?)
    }

    /// Write the sheet as CSV to `path`, creating parent directories.
    pub fn write(&self, report: &ProfileReport, path: &Path) -> Result<PathBuf> {
        let mut df = self.to_dataframe(report)?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut file = File::create(path)?;
        CsvWriter::new(&mut file)
            .include_header(false)
            .with_separator(b',')
            .with_quote_char(b'"')
            .finish(&mut df)
            .context(format!("Failed to write '{}'", path.display()))?;

        info!("file saved: {}", path.display());
        Ok(path.to_path_buf())
    }
}

/// Output path for a profiled input: `{dir}/{prefix}{stem}.csv`.
///
/// `dir` is the configured output directory, or the input's own directory.
pub fn output_path(input: &Path, config: &ProfileConfig) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let dir = config
        .output_dir
        .clone()
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();

    dir.join(format!("{}{}.csv", config.output_prefix, stem))
}
