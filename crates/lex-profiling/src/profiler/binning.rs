//! Equal-width frequency binning of numeric columns.

use crate::config::measure_prefix;
use crate::types::{Measure, SummaryMode, SummaryRow, SummaryTable};
use crate::utils::format_thousands;
use serde::Serialize;

/// Number of equal-width bins a numeric column is split into.
pub const BIN_COUNT: usize = 10;

/// One interval of the partition. Half-open `[lower, upper)` except the last.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: u64,
    pub label: String,
}

/// Bins of a numeric column plus its missing-value count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinnedSummary {
    pub total_rows: usize,
    pub missing_count: usize,
    pub bins: Vec<Bin>,
    pub normalize: bool,
}

impl BinnedSummary {
    /// Sum of the bin counts (present values only).
    pub fn binned_count(&self) -> u64 {
        self.bins.iter().map(|b| b.count).sum()
    }

    /// Output rows: the missing row first, then every bin in ascending order.
    pub fn rows(&self) -> Vec<SummaryRow> {
        let mut rows = Vec::with_capacity(self.bins.len() + 1);
        rows.push(SummaryRow {
            label: None,
            measure: self.measure(self.missing_count as u64),
        });
        rows.extend(self.bins.iter().map(|bin| SummaryRow {
            label: Some(bin.label.clone()),
            measure: self.measure(bin.count),
        }));
        rows
    }

    /// Summary table with `bins|{column}` and `{prefix}|{column}` headers.
    pub fn into_table(self, column: &str) -> SummaryTable {
        SummaryTable {
            label_column: format!("bins|{}", column),
            measure_column: format!("{}|{}", measure_prefix(self.normalize), column),
            mode: SummaryMode::Binned,
            rows: self.rows(),
        }
    }

    fn measure(&self, count: u64) -> Measure {
        Measure::from_count(count, self.total_rows, self.normalize)
    }
}

/// Label of a bin: `"{lower} to <{upper}"`, thousands-separated, no decimals.
pub fn bin_label(lower: f64, upper: f64) -> String {
    format!("{} to <{}", format_thousands(lower), format_thousands(upper))
}

/// Partition the present values of a numeric column into [`BIN_COUNT`] bins.
///
/// `None`, NaN and infinite cells count as missing. A column without present
/// values yields no bins; a single repeated value yields one zero-width bin
/// holding every present value.
pub fn bin_column(values: &[Option<f64>], normalize: bool) -> BinnedSummary {
    let present: Vec<f64> = values
        .iter()
        .flatten()
        .copied()
        .filter(|v| v.is_finite())
        .collect();
    let missing_count = values.len() - present.len();

    let bins = match bounds(&present) {
        None => Vec::new(),
        Some((min, max)) if min == max => vec![Bin {
            lower: min,
            upper: max,
            count: present.len() as u64,
            label: bin_label(min, max),
        }],
        Some((min, max)) => equal_width_bins(&present, min, max),
    };

    BinnedSummary {
        total_rows: values.len(),
        missing_count,
        bins,
        normalize,
    }
}

fn bounds(present: &[f64]) -> Option<(f64, f64)> {
    let first = *present.first()?;
    Some(
        present
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

/// Edges at `min + i * width`, the last one pinned to `max`.
///
/// When `max - min` overflows, edges are interpolated from the bounds instead.
fn bin_edges(min: f64, max: f64) -> Vec<f64> {
    let width = (max - min) / BIN_COUNT as f64;
    (0..=BIN_COUNT)
        .map(|i| {
            if i == BIN_COUNT {
                max
            } else if width.is_finite() {
                min + width * i as f64
            } else {
                let t = i as f64 / BIN_COUNT as f64;
                min * (1.0 - t) + max * t
            }
        })
        .collect()
}

/// Relative position of `value` within `[min, max]`, in `0.0..=1.0`.
fn position(value: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if span.is_finite() {
        (value - min) / span
    } else {
        (value / 2.0 - min / 2.0) / (max / 2.0 - min / 2.0)
    }
}

fn equal_width_bins(present: &[f64], min: f64, max: f64) -> Vec<Bin> {
    let edges = bin_edges(min, max);
    let mut counts = [0u64; BIN_COUNT];

    for &value in present {
        counts[bin_index(value, min, max, &edges)] += 1;
    }

    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| Bin {
            lower: edges[i],
            upper: edges[i + 1],
            count,
            label: bin_label(edges[i], edges[i + 1]),
        })
        .collect()
}

/// Index of the bin holding `value`, correcting float error against the edges.
fn bin_index(value: f64, min: f64, max: f64, edges: &[f64]) -> usize {
    let last = BIN_COUNT - 1;
    let scaled = position(value, min, max) * BIN_COUNT as f64;
    let mut index = (scaled as usize).min(last);

    while index > 0 && value < edges[index] {
        index -= 1;
    }
    while index < last && value >= edges[index + 1] {
        index += 1;
    }
    index
}
