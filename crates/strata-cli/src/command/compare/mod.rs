//! Stratified vs. random split comparison command
//!
//! Runs the whole pipeline on the housing dataset: acquire, load, derive the
//! income category, split twice with independent generators seeded alike,
//! and report how closely each test set follows the population's category
//! proportions.

mod table;

use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::Args;
use strata_dataset::load;
use strata_sampling::{
    analysis,
    rng::{self, seeded_rng},
    split::{self, StratifiedShuffleSplit, TestRatio},
    stratify,
};
use strata_stats::descriptive::DescriptiveStats;
use tracing::{info, warn};

use crate::{
    command::fetch::DatasetArg,
    model::report::{ComparisonReport, SplitSettings},
    util,
};

const DEFAULT_TEST_RATIO: f64 = 0.2;
const DEFAULT_SOURCE_FIELD: &str = "median_income";
const DEFAULT_LABEL_FIELD: &str = "income_cat";

#[derive(Debug, Clone, PartialEq, Args)]
pub(crate) struct CompareArg {
    #[command(flatten)]
    pub dataset: DatasetArg,
    /// Fraction of rows held out as the test set, strictly between 0 and 1
    #[arg(long, default_value_t = DEFAULT_TEST_RATIO, value_parser = parse_test_ratio)]
    pub test_ratio: f64,
    /// Seed shared by the random and the stratified split
    #[arg(long, default_value_t = rng::DEFAULT_SEED)]
    pub seed: u64,
    /// Number of stratified splits to draw; the first one is reported
    #[arg(long, default_value_t = 1, value_parser = parse_n_splits)]
    pub n_splits: usize,
    /// Numeric column the income category is derived from
    #[arg(long, default_value = DEFAULT_SOURCE_FIELD)]
    pub source_field: String,
    /// Name of the derived category column
    #[arg(long, default_value = DEFAULT_LABEL_FIELD)]
    pub label_field: String,
    /// Also write the comparison report to this path as JSON
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl Default for CompareArg {
    fn default() -> Self {
        Self {
            dataset: DatasetArg::default(),
            test_ratio: DEFAULT_TEST_RATIO,
            seed: rng::DEFAULT_SEED,
            n_splits: 1,
            source_field: DEFAULT_SOURCE_FIELD.to_owned(),
            label_field: DEFAULT_LABEL_FIELD.to_owned(),
            output: None,
        }
    }
}

fn parse_test_ratio(s: &str) -> Result<f64, String> {
    let ratio = s.parse::<f64>().map_err(|e| e.to_string())?;
    TestRatio::new(ratio)
        .map(TestRatio::get)
        .map_err(|e| e.to_string())
}

fn parse_n_splits(s: &str) -> Result<usize, String> {
    match s.parse::<usize>().map_err(|e| e.to_string())? {
        0 => Err("number of splits must be at least 1".to_owned()),
        n => Ok(n),
    }
}

pub(crate) fn run(arg: &CompareArg) -> anyhow::Result<()> {
    let csv_path = arg.dataset.acquire()?;
    let mut dataset = load::read_csv(&csv_path)
        .with_context(|| format!("Failed to load dataset: {}", csv_path.display()))?;
    info!(
        rows = dataset.len(),
        columns = dataset.schema().len(),
        "loaded dataset"
    );

    let source = dataset
        .schema()
        .numeric_field(&arg.source_field)
        .with_context(|| format!("Dataset has no usable '{}' column", arg.source_field))?;
    log_column_summary(&arg.source_field, dataset.numeric(source));

    let label =
        stratify::add_stratification_label(&mut dataset, &arg.source_field, &arg.label_field)
            .context("Failed to derive the stratification label")?;

    let ratio = TestRatio::new(arg.test_ratio)?;

    let random = split::random_split(dataset.len(), ratio, &mut seeded_rng(arg.seed));
    info!(
        train = random.train.len(),
        test = random.test.len(),
        "random split"
    );

    let stratified = StratifiedShuffleSplit::new(arg.n_splits, ratio)?
        .split(dataset.strata(label), &mut seeded_rng(arg.seed))
        .context("Stratified split failed")?
        .into_iter()
        .next()
        .context("Stratified split produced no partitions")?;
    info!(
        train = stratified.train.len(),
        test = stratified.test.len(),
        n_splits = arg.n_splits,
        "stratified split"
    );

    let (_, random_test) = random.select(&dataset);
    let (_, stratified_test) = stratified.select(&dataset);
    let comparison =
        analysis::compare_proportions(&dataset, &[&stratified_test, &random_test], label)
            .context("Failed to compare category proportions")?;

    table::print_comparison_table(&comparison);

    if let Some(path) = &arg.output {
        let settings = SplitSettings {
            source_field: arg.source_field.clone(),
            label_field: arg.label_field.clone(),
            test_ratio: arg.test_ratio,
            seed: arg.seed,
            n_splits: arg.n_splits,
            num_rows: dataset.len(),
        };
        let report = ComparisonReport::new(Utc::now(), settings, &comparison);
        util::save_json(&report, path)?;
        info!(path = %path.display(), "saved comparison report");
    }

    Ok(())
}

fn log_column_summary(field: &str, values: &[Option<f64>]) {
    let Some(stats) = DescriptiveStats::new(values.iter().copied()) else {
        warn!(field, "column has no finite values");
        return;
    };
    info!(
        field,
        count = stats.count,
        undefined = stats.skipped,
        min = stats.min,
        mean = stats.mean,
        median = stats.median,
        max = stats.max,
        "column summary"
    );
}
