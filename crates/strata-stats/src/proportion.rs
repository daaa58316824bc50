//! Category proportions and subset comparison
//!
//! [`Proportions`] is the normalized value count of a categorical sample:
//! each observed category mapped to `count / total`. Categories that never
//! occur are omitted rather than reported with a zero fraction.
//!
//! [`ProportionComparison`] lines up the proportions of several subsets
//! against the population they were drawn from and reports, for each
//! category, how far every subset deviates from the population:
//!
//! ```text
//! error % = (subset_fraction / overall_fraction - 1) * 100
//! ```
//!
//! # Examples
//!
//! ```
//! use strata_stats::proportion::{ProportionComparison, Proportions};
//!
//! let overall = Proportions::from_values([1, 1, 2, 2, 2, 3, 3, 3, 3, 3]);
//! let subset = Proportions::from_values([2, 3]);
//!
//! let comparison = ProportionComparison::new(&overall, &[&subset]).unwrap();
//! let rows = comparison.rows();
//!
//! // Category 1 is absent from the subset
//! assert_eq!(rows[0].key, 1);
//! assert_eq!(rows[0].subsets[0].fraction, None);
//!
//! // Category 3 is 50% of the population and 50% of the subset
//! assert_eq!(rows[2].subsets[0].error_pct, Some(0.0));
//! ```

use std::collections::{BTreeMap, BTreeSet};

/// Normalized frequency of each observed category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proportions<K> {
    counts: BTreeMap<K, usize>,
    total: usize,
}

impl<K> Default for Proportions<K> {
    fn default() -> Self {
        Self {
            counts: BTreeMap::new(),
            total: 0,
        }
    }
}

impl<K> Proportions<K>
where
    K: Ord,
{
    /// Counts every value of a categorical sample.
    #[must_use]
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let mut counts = BTreeMap::new();
        let mut total = 0;
        for value in values {
            *counts.entry(value).or_insert(0) += 1;
            total += 1;
        }
        Self { counts, total }
    }

    /// Number of values counted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of occurrences of `key`, zero when unobserved.
    #[must_use]
    pub fn count(&self, key: &K) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Fraction of values equal to `key`, or `None` when unobserved.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn fraction(&self, key: &K) -> Option<f64> {
        self.counts
            .get(key)
            .map(|&count| count as f64 / self.total as f64)
    }

    /// Observed categories in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.counts.keys()
    }

    /// `(category, fraction)` pairs in ascending category order.
    #[expect(clippy::cast_precision_loss)]
    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> + '_ {
        let total = self.total as f64;
        self.counts
            .iter()
            .map(move |(key, &count)| (key, count as f64 / total))
    }
}

/// Error returned when a deviation would require dividing by a zero population fraction.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ComparisonError {
    #[display("cannot compare proportions against an empty population")]
    EmptyPopulation,
    #[display("category {key} has a zero fraction in the population")]
    ZeroPopulationFraction { key: String },
}

/// One subset's view of a single category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubsetProportion {
    /// Fraction of the subset in this category (`None` if the subset has none).
    pub fraction: Option<f64>,
    /// Percentage deviation from the population fraction (`None` if `fraction` is `None`).
    pub error_pct: Option<f64>,
}

/// A row of a [`ProportionComparison`].
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow<K> {
    pub key: K,
    /// Fraction of the population in this category.
    pub overall: f64,
    /// One entry per subset, in the order the subsets were given.
    pub subsets: Vec<SubsetProportion>,
}

/// Population proportions compared against one or more subsets.
#[derive(Debug, Clone, PartialEq)]
pub struct ProportionComparison<K> {
    rows: Vec<ComparisonRow<K>>,
}

impl<K> ProportionComparison<K>
where
    K: Ord + Clone + std::fmt::Display,
{
    /// Aligns the population and every subset on the union of observed categories.
    ///
    /// Rows are sorted by category. A category missing from a subset yields a
    /// `None` cell for that subset; a category observed in a subset but not in
    /// the population is a division by zero and fails.
    pub fn new(
        overall: &Proportions<K>,
        subsets: &[&Proportions<K>],
    ) -> Result<Self, ComparisonError> {
        if overall.is_empty() {
            return Err(ComparisonError::EmptyPopulation);
        }

        let keys = overall
            .keys()
            .chain(subsets.iter().flat_map(|subset| subset.keys()))
            .collect::<BTreeSet<_>>();

        let rows = keys
            .into_iter()
            .map(|key| {
                let overall_fraction = overall
                    .fraction(key)
                    .filter(|fraction| *fraction > 0.0)
                    .ok_or_else(|| ComparisonError::ZeroPopulationFraction {
                        key: key.to_string(),
                    })?;
                let subsets = subsets
                    .iter()
                    .map(|subset| {
                        let fraction = subset.fraction(key);
                        SubsetProportion {
                            fraction,
                            error_pct: fraction.map(|f| error_pct(f, overall_fraction)),
                        }
                    })
                    .collect();
                Ok(ComparisonRow {
                    key: key.clone(),
                    overall: overall_fraction,
                    subsets,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rows })
    }

    /// Rows in ascending category order.
    #[must_use]
    pub fn rows(&self) -> &[ComparisonRow<K>] {
        &self.rows
    }
}

fn error_pct(subset: f64, overall: f64) -> f64 {
    (subset / overall - 1.0) * 100.0
}
