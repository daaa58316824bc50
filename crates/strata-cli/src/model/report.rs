//! JSON form of a comparison run

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strata_dataset::Stratum;
use strata_stats::proportion::{ComparisonRow, ProportionComparison};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ComparisonReport {
    pub generated_at: DateTime<Utc>,
    pub settings: SplitSettings,
    pub categories: Vec<CategoryProportions>,
}

/// Parameters that determine the report contents.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SplitSettings {
    pub source_field: String,
    pub label_field: String,
    pub test_ratio: f64,
    pub seed: u64,
    pub n_splits: usize,
    pub num_rows: usize,
}

/// One report row; percentages are `None` where the test set lacks the category.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CategoryProportions {
    pub category: String,
    pub overall_pct: f64,
    pub stratified_pct: Option<f64>,
    pub random_pct: Option<f64>,
    pub stratified_error_pct: Option<f64>,
    pub random_error_pct: Option<f64>,
}

impl ComparisonReport {
    /// Builds a report from a comparison whose subsets are `[stratified, random]`.
    pub fn new(
        generated_at: DateTime<Utc>,
        settings: SplitSettings,
        comparison: &ProportionComparison<Stratum>,
    ) -> Self {
        Self {
            generated_at,
            settings,
            categories: comparison
                .rows()
                .iter()
                .map(CategoryProportions::from_row)
                .collect(),
        }
    }
}

impl CategoryProportions {
    fn from_row(row: &ComparisonRow<Stratum>) -> Self {
        let stratified = row.subsets.first();
        let random = row.subsets.get(1);
        Self {
            category: row.key.to_string(),
            overall_pct: row.overall * 100.0,
            stratified_pct: stratified.and_then(|s| s.fraction).map(|f| f * 100.0),
            random_pct: random.and_then(|s| s.fraction).map(|f| f * 100.0),
            stratified_error_pct: stratified.and_then(|s| s.error_pct),
            random_error_pct: random.and_then(|s| s.error_pct),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;
    use strata_stats::proportion::Proportions;

    use super::*;

    fn settings() -> SplitSettings {
        SplitSettings {
            source_field: "median_income".to_owned(),
            label_field: "income_cat".to_owned(),
            test_ratio: 0.2,
            seed: 42,
            n_splits: 1,
            num_rows: 4,
        }
    }

    fn comparison() -> ProportionComparison<Stratum> {
        let overall = Proportions::from_values([
            Stratum::Level(1),
            Stratum::Level(2),
            Stratum::Level(2),
            Stratum::Undefined,
        ]);
        let stratified = Proportions::from_values([Stratum::Level(2), Stratum::Level(2)]);
        let random = Proportions::from_values([Stratum::Level(1), Stratum::Undefined]);
        ProportionComparison::new(&overall, &[&stratified, &random]).unwrap()
    }

    #[test]
    fn test_rows_follow_comparison() {
        let generated_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let report = ComparisonReport::new(generated_at, settings(), &comparison());

        let categories = report
            .categories
            .iter()
            .map(|c| c.category.as_str())
            .collect::<Vec<_>>();
        assert_eq!(categories, ["1", "2", "undefined"]);

        let level2 = &report.categories[1];
        assert_eq!(level2.overall_pct, 50.0);
        assert_eq!(level2.stratified_pct, Some(100.0));
        assert_eq!(level2.stratified_error_pct, Some(100.0));
        assert_eq!(level2.random_pct, None);
        assert_eq!(level2.random_error_pct, None);
    }

    #[test]
    fn test_json_shape() {
        let generated_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let report = ComparisonReport::new(generated_at, settings(), &comparison());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["generated_at"], "2024-01-01T00:00:00Z");
        assert_eq!(json["settings"]["seed"], 42);
        assert_eq!(json["categories"][0]["category"], "1");
        assert!(json["categories"][0]["stratified_pct"].is_null());

        let back = serde_json::from_value::<ComparisonReport>(json).unwrap();
        assert_eq!(back, report);
    }
}
