//! Proportion comparison table display

use strata_dataset::Stratum;
use strata_stats::proportion::{ComparisonRow, ProportionComparison};

const HEADERS: [&str; 6] = [
    "Income Category",
    "Overall %",
    "Stratified %",
    "Random %",
    "Strat. Error %",
    "Rand. Error %",
];

const LABEL_WIDTH: usize = 16;
const VALUE_WIDTH: usize = 14;

/// Print the comparison of `[stratified, random]` test sets against the population
pub(super) fn print_comparison_table(comparison: &ProportionComparison<Stratum>) {
    for line in table_lines(comparison) {
        println!("{line}");
    }
}

fn table_lines(comparison: &ProportionComparison<Stratum>) -> Vec<String> {
    let mut lines = vec![header_line(), separator_line()];
    lines.extend(comparison.rows().iter().map(row_line));
    lines
}

fn header_line() -> String {
    let [label, values @ ..] = HEADERS;
    let mut line = format!("{label:<LABEL_WIDTH$}");
    for value in values {
        line.push_str(&format!(" {value:>VALUE_WIDTH$}"));
    }
    line
}

fn separator_line() -> String {
    // label + 5 values, each preceded by a space
    "-".repeat(LABEL_WIDTH + (HEADERS.len() - 1) * (VALUE_WIDTH + 1))
}

fn row_line(row: &ComparisonRow<Stratum>) -> String {
    let fractions = row
        .subsets
        .iter()
        .map(|subset| subset.fraction.map(|f| f * 100.0));
    let errors = row.subsets.iter().map(|subset| subset.error_pct);
    let cells = std::iter::once(Some(row.overall * 100.0))
        .chain(fractions)
        .chain(errors);

    let mut line = format!("{:<LABEL_WIDTH$}", row.key.to_string());
    for cell in cells {
        line.push_str(&format!(" {:>VALUE_WIDTH$}", format_percent(cell)));
    }
    line
}

fn format_percent(value: Option<f64>) -> String {
    value.map_or("N/A".to_string(), |v| format!("{v:.2}"))
}
