//! Stratification label derivation
//!
//! A stratification label is an ordinal category computed from a continuous
//! column by fixed right-closed binning. For median income the bins are:
//!
//! | Level | Interval       |
//! |-------|----------------|
//! | 1     | (-inf, 1.5]    |
//! | 2     | (1.5, 3.0]     |
//! | 3     | (3.0, 4.5]     |
//! | 4     | (4.5, 6.0]     |
//! | 5     | (6.0, +inf)    |
//!
//! Missing or non-finite source values get [`Stratum::Undefined`] instead of
//! being dropped or forced into a level.

use strata_dataset::{Dataset, SchemaError, Stratum, StratumField};
use strata_stats::binning::RightClosedBins;
use tracing::{info, warn};

/// Upper edges of income levels 1 to 4; level 5 is unbounded.
pub const INCOME_BIN_EDGES: [f64; 4] = [1.5, 3.0, 4.5, 6.0];

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum StratifyError {
    #[display("invalid stratification source field '{field}'")]
    InvalidSource { field: String, source: SchemaError },
    #[display("cannot add stratification label '{field}'")]
    InvalidLabel { field: String, source: SchemaError },
    #[display("{bins} bins exceed the {max} supported stratification levels")]
    TooManyBins { bins: usize, max: usize },
}

/// Bins for the income stratification levels.
#[must_use]
pub fn income_bins() -> RightClosedBins {
    RightClosedBins::new(INCOME_BIN_EDGES.to_vec())
        .expect("income bin edges should be strictly increasing")
}

/// Maps a single source value to its stratum.
///
/// Bin `i` becomes level `i + 1`.
#[must_use]
pub fn stratum_of(bins: &RightClosedBins, value: Option<f64>) -> Stratum {
    value
        .and_then(|v| bins.bin_index(v))
        .and_then(|index| u8::try_from(index + 1).ok())
        .map_or(Stratum::Undefined, Stratum::Level)
}

/// Adds an income stratification label column derived from `source_field`.
///
/// # Example
///
/// ```
/// use strata_dataset::{ColumnData, Dataset, Stratum};
/// use strata_sampling::stratify::add_stratification_label;
///
/// let incomes = vec![Some(0.5), Some(2.0), Some(3.5), Some(5.0), Some(7.0)];
/// let mut dataset =
///     Dataset::from_columns(vec![("median_income".to_owned(), ColumnData::Numeric(incomes))])
///         .unwrap();
///
/// let label = add_stratification_label(&mut dataset, "median_income", "income_cat").unwrap();
/// let levels = dataset.strata(label).to_vec();
/// assert_eq!(levels, (1..=5).map(Stratum::Level).collect::<Vec<_>>());
/// ```
pub fn add_stratification_label(
    dataset: &mut Dataset,
    source_field: &str,
    label_field: &str,
) -> Result<StratumField, StratifyError> {
    add_stratification_label_with(dataset, source_field, label_field, &income_bins())
}

/// Like [`add_stratification_label`], but with caller-supplied bins.
pub fn add_stratification_label_with(
    dataset: &mut Dataset,
    source_field: &str,
    label_field: &str,
    bins: &RightClosedBins,
) -> Result<StratumField, StratifyError> {
    let max = usize::from(u8::MAX);
    if bins.num_bins() > max {
        return Err(StratifyError::TooManyBins {
            bins: bins.num_bins(),
            max,
        });
    }

    let source = dataset
        .schema()
        .numeric_field(source_field)
        .map_err(|source| StratifyError::InvalidSource {
            field: source_field.to_owned(),
            source,
        })?;

    let labels = dataset
        .numeric(source)
        .iter()
        .map(|&value| stratum_of(bins, value))
        .collect::<Vec<_>>();

    let undefined = labels.iter().filter(|s| **s == Stratum::Undefined).count();
    if undefined > 0 {
        warn!(
            field = source_field,
            rows = undefined,
            "rows with missing or non-finite values labeled undefined"
        );
    }
    info!(
        source = source_field,
        label = label_field,
        levels = bins.num_bins(),
        "derived stratification label"
    );

    dataset
        .add_stratum_column(label_field, labels)
        .map_err(|source| StratifyError::InvalidLabel {
            field: label_field.to_owned(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use strata_dataset::ColumnData;

    use super::*;

    fn with_text_column(incomes: Vec<Option<f64>>) -> Dataset {
        let ocean = vec![Some("INLAND".to_owned()); incomes.len()];
        Dataset::from_columns(vec![
            ("median_income".to_owned(), ColumnData::Numeric(incomes)),
            ("ocean_proximity".to_owned(), ColumnData::Text(ocean)),
        ])
        .unwrap()
    }

    fn income_only(incomes: Vec<Option<f64>>) -> Dataset {
        Dataset::from_columns(vec![(
            "median_income".to_owned(),
            ColumnData::Numeric(incomes),
        )])
        .unwrap()
    }

    #[test]
    fn test_one_row_per_level() {
        let mut dataset = income_only(vec![Some(0.5), Some(2.0), Some(3.5), Some(5.0), Some(7.0)]);
        let label = add_stratification_label(&mut dataset, "median_income", "income_cat").unwrap();
        assert_eq!(
            dataset.strata(label),
            &[
                Stratum::Level(1),
                Stratum::Level(2),
                Stratum::Level(3),
                Stratum::Level(4),
                Stratum::Level(5),
            ]
        );
    }

    #[test]
    fn test_boundaries_are_closed_on_the_right() {
        let mut dataset = income_only(vec![Some(1.5), Some(3.0), Some(4.5), Some(6.0), Some(-2.0)]);
        let label = add_stratification_label(&mut dataset, "median_income", "income_cat").unwrap();
        assert_eq!(
            dataset.strata(label),
            &[
                Stratum::Level(1),
                Stratum::Level(2),
                Stratum::Level(3),
                Stratum::Level(4),
                Stratum::Level(1),
            ]
        );
    }

    #[test]
    fn test_missing_values_are_undefined() {
        let mut dataset = income_only(vec![None, Some(f64::NAN), Some(f64::INFINITY), Some(2.0)]);
        let label = add_stratification_label(&mut dataset, "median_income", "income_cat").unwrap();
        assert_eq!(
            dataset.strata(label),
            &[
                Stratum::Undefined,
                Stratum::Undefined,
                Stratum::Undefined,
                Stratum::Level(2),
            ]
        );
    }

    #[test]
    fn test_missing_source_field() {
        let mut dataset = income_only(vec![Some(1.0)]);
        let err = add_stratification_label(&mut dataset, "income", "income_cat").unwrap_err();
        assert_eq!(
            err,
            StratifyError::InvalidSource {
                field: "income".to_owned(),
                source: SchemaError::MissingColumn {
                    name: "income".to_owned()
                },
            }
        );
        assert_eq!(dataset.schema().len(), 1);
    }

    #[test]
    fn test_label_name_collision() {
        let mut dataset = income_only(vec![Some(1.0)]);
        let err =
            add_stratification_label(&mut dataset, "median_income", "median_income").unwrap_err();
        assert!(matches!(err, StratifyError::InvalidLabel { .. }), "{err:?}");
    }

    #[test]
    fn test_other_fields_untouched() {
        let mut dataset = with_text_column(vec![Some(2.5), None]);
        let before = dataset.clone();
        add_stratification_label(&mut dataset, "median_income", "income_cat").unwrap();
        let income = before.schema().numeric_field("median_income").unwrap();
        let ocean = before.schema().text_field("ocean_proximity").unwrap();
        assert_eq!(dataset.numeric(income), before.numeric(income));
        assert_eq!(dataset.text(ocean), before.text(ocean));
    }

    #[test]
    fn test_custom_bins() {
        let bins = RightClosedBins::new(vec![0.0]).unwrap();
        let mut dataset = income_only(vec![Some(-1.0), Some(1.0)]);
        let label =
            add_stratification_label_with(&mut dataset, "median_income", "sign", &bins).unwrap();
        assert_eq!(
            dataset.strata(label),
            &[Stratum::Level(1), Stratum::Level(2)]
        );
    }
}
