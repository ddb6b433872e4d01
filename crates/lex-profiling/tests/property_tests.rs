//! Property tests for the summary invariants.

use lex_profiling::{
    ColumnData, ColumnType, Measure, SortBy, bin_column, clean_currency_value, summarize_column,
};
use proptest::prelude::*;

fn cells() -> impl Strategy<Value = Vec<Option<f64>>> {
    let value = prop_oneof![
        6 => -1.0e6..1.0e6f64,
        1 => Just(f64::INFINITY),
        1 => Just(f64::NEG_INFINITY),
        1 => Just(f64::NAN),
        1 => (f64::MAX / 2.0)..f64::MAX,
        1 => -f64::MAX..(-f64::MAX / 2.0),
    ];
    prop::collection::vec(prop::option::weighted(0.8, value), 0..200)
}

fn words() -> impl Strategy<Value = Vec<Option<String>>> {
    prop::collection::vec(prop::option::weighted(0.8, "[a-e]{1,2}"), 0..100)
}

fn currency_text() -> impl Strategy<Value = String> {
    let symbols = prop::sample::select(vec!["$", "€", "£", "USD", "GBP", "EUR", "¥", "₣", "₹", ""]);
    (symbols, 0u32..5_000_000, any::<bool>()).prop_map(|(symbol, amount, grouped)| {
        let digits = amount.to_string();
        let body = if grouped {
            let mut out = String::new();
            for (i, ch) in digits.chars().enumerate() {
                if i > 0 && (digits.len() - i) % 3 == 0 {
                    out.push(',');
                }
                out.push(ch);
            }
            out
        } else {
            digits
        };
        format!("{}{}", symbol, body)
    })
}

proptest! {
    #[test]
    fn binned_rows_account_for_every_row(values in cells()) {
        let summary = bin_column(&values, false);
        let binned = summary.binned_count() as usize;
        prop_assert_eq!(binned + summary.missing_count, values.len());
        prop_assert!(summary.bins.is_empty() || summary.bins.len() <= 10);
    }

    #[test]
    fn every_finite_value_lands_in_its_bin(values in cells()) {
        let summary = bin_column(&values, false);
        let finite: Vec<f64> = values
            .iter()
            .flatten()
            .copied()
            .filter(|v| v.is_finite())
            .collect();
        let last = summary.bins.len().saturating_sub(1);

        for (i, bin) in summary.bins.iter().enumerate() {
            prop_assert!(!bin.label.contains("NaN"), "label {}", bin.label);
            prop_assert!(bin.lower.is_finite() && bin.upper.is_finite());
            let members = finite
                .iter()
                .filter(|&&v| {
                    bin.lower <= v && (v < bin.upper || (i == last && v <= bin.upper))
                })
                .count();
            prop_assert_eq!(bin.count as usize, members);
        }

        if let Some(max) = finite.iter().copied().reduce(f64::max) {
            let closing = &summary.bins[last];
            prop_assert_eq!(closing.upper, max);
            prop_assert!(closing.count >= 1);
        }
    }

    #[test]
    fn normalized_bins_are_counts_over_rows(values in cells()) {
        prop_assume!(!values.is_empty());
        let counts = bin_column(&values, false).into_table("x");
        let fractions = bin_column(&values, true).into_table("x");

        for (raw, norm) in counts.rows.iter().zip(&fractions.rows) {
            prop_assert_eq!(&raw.label, &norm.label);
            let expected = raw.measure.as_f64() / values.len() as f64;
            prop_assert!((norm.measure.as_f64() - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn exact_counts_sum_to_row_count(values in words(), by_value in any::<bool>()) {
        let sort_by = if by_value { SortBy::Value } else { SortBy::Index };
        let column = ColumnData::new("w", values.clone());
        let table = summarize_column(&column, ColumnType::String, false, sort_by).unwrap();

        prop_assert_eq!(table.total() as usize, values.len());
        prop_assert_eq!(table.missing(), Some(Measure::Count(column.missing_count() as u64)));
        if sort_by == SortBy::Index {
            prop_assert!(table.rows.last().is_some_and(|r| r.is_missing()));
        }
    }

    #[test]
    fn value_order_is_non_increasing(values in words()) {
        let column = ColumnData::new("w", values);
        let table = summarize_column(&column, ColumnType::String, false, SortBy::Value).unwrap();
        let present: Vec<f64> = table
            .rows
            .iter()
            .filter(|r| !r.is_missing())
            .map(|r| r.measure.as_f64())
            .collect();

        prop_assert!(present.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn currency_cleaning_is_stable(text in currency_text()) {
        let once = clean_currency_value(&text);
        let twice = clean_currency_value(&once);
        prop_assert_eq!(once.parse::<f64>().ok(), twice.parse::<f64>().ok());
        prop_assert!(once.parse::<f64>().is_ok());
    }
}
