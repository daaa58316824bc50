//! Stratum proportions of record sets
//!
//! Thin adapters from [`Dataset`] label columns to the generic proportion
//! tools in [`strata_stats::proportion`].

use strata_dataset::{Dataset, Stratum, StratumField};
use strata_stats::proportion::{ComparisonError, ProportionComparison, Proportions};

/// Fraction of rows in each observed stratum; unobserved strata are omitted.
#[must_use]
pub fn label_proportions(dataset: &Dataset, field: StratumField) -> Proportions<Stratum> {
    Proportions::from_values(dataset.strata(field).iter().copied())
}

/// Compares the stratum proportions of `subsets` against `full`.
///
/// Rows follow ascending stratum order, with `undefined` last. Subset cells
/// are `None` for strata the subset does not contain.
pub fn compare_proportions(
    full: &Dataset,
    subsets: &[&Dataset],
    field: StratumField,
) -> Result<ProportionComparison<Stratum>, ComparisonError> {
    let overall = label_proportions(full, field);
    let subsets = subsets
        .iter()
        .map(|subset| label_proportions(subset, field))
        .collect::<Vec<_>>();
    let subset_refs = subsets.iter().collect::<Vec<_>>();
    ProportionComparison::new(&overall, &subset_refs)
}
