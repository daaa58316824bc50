//! Train/test partitioning strategies
//!
//! Two strategies split the row indices of a record set into disjoint,
//! exhaustive train and test sets:
//!
//! - [`random_split`]: a uniform permutation cut at `floor(n * r)`. Category
//!   balance in the result is left to chance.
//! - [`StratifiedShuffleSplit`]: rows are grouped by label and each group
//!   contributes its proportional share to the test set, so the test set's
//!   label distribution mirrors the population to within rounding.
//!
//! # Stratified Allocation
//!
//! For `n` rows and test ratio `r`, the test set has `ceil(n * r)` rows and
//! the train set the remaining `n_train`. Per-group sizes come from the
//! *approximate mode* of a multivariate hypergeometric draw:
//!
//! 1. Give each group `floor(count / n * n_draws)` draws
//! 2. Hand the leftover draws to the groups with the largest fractional
//!    remainders, one each, breaking ties uniformly at random
//!
//! Train sizes are allocated first over the full group counts, then test sizes
//! over what is left in each group. Each group's members are shuffled; the
//! first allocation goes to train and the next to test. Finally the train and
//! test index lists are shuffled themselves so groups are interleaved.

use std::{collections::BTreeMap, fmt};

use rand::{
    Rng,
    seq::{SliceRandom as _, index},
};
use strata_dataset::Dataset;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum SplitError {
    #[display("test ratio must lie strictly between 0 and 1, got {ratio}")]
    InvalidTestRatio { ratio: f64 },
    #[display("number of splits must be at least 1")]
    ZeroSplits,
    #[display("cannot split an empty record set")]
    EmptyRecordSet,
    #[display(
        "the least populated group ({label}) has only {count} member, but every group needs at least 2"
    )]
    GroupTooSmall { label: String, count: usize },
    #[display("train size {n_train} is smaller than the number of groups ({n_groups})")]
    TrainTooSmall { n_train: usize, n_groups: usize },
    #[display("test size {n_test} is smaller than the number of groups ({n_groups})")]
    TestTooSmall { n_test: usize, n_groups: usize },
}

/// Fraction of rows assigned to the test set, strictly between 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TestRatio(f64);

impl TestRatio {
    pub fn new(ratio: f64) -> Result<Self, SplitError> {
        if ratio > 0.0 && ratio < 1.0 {
            Ok(Self(ratio))
        } else {
            Err(SplitError::InvalidTestRatio { ratio })
        }
    }

    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }

    /// `floor(n * ratio)`
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    #[must_use]
    pub fn floor_len(self, n: usize) -> usize {
        (n as f64 * self.0).floor() as usize
    }

    /// `ceil(n * ratio)`
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    #[must_use]
    pub fn ceil_len(self, n: usize) -> usize {
        (n as f64 * self.0).ceil() as usize
    }
}

impl fmt::Display for TestRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Disjoint train and test row indices covering a whole record set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

impl Partition {
    /// Materializes `(train, test)` record sets from `dataset`.
    ///
    /// # Panics
    ///
    /// Panics if the partition was computed for a larger record set.
    #[must_use]
    pub fn select(&self, dataset: &Dataset) -> (Dataset, Dataset) {
        (dataset.take(&self.train), dataset.take(&self.test))
    }
}

/// Splits `n` rows uniformly at random.
///
/// The test set is the first `floor(n * ratio)` entries of a random
/// permutation of `0..n`; the train set is the rest, in permutation order.
///
/// # Example
///
/// ```
/// use strata_sampling::{rng::seeded_rng, split::{random_split, TestRatio}};
///
/// let partition = random_split(10, TestRatio::new(0.25).unwrap(), &mut seeded_rng(42));
/// assert_eq!(partition.test.len(), 2);
/// assert_eq!(partition.train.len(), 8);
/// ```
pub fn random_split<R>(n: usize, ratio: TestRatio, rng: &mut R) -> Partition
where
    R: Rng + ?Sized,
{
    let mut indices = (0..n).collect::<Vec<_>>();
    indices.shuffle(rng);
    let train = indices.split_off(ratio.floor_len(n));
    debug!(n, train = train.len(), test = indices.len(), "random split");
    Partition {
        train,
        test: indices,
    }
}

/// Repeated stratified shuffle splitting.
///
/// # Example
///
/// ```
/// use strata_sampling::{rng::seeded_rng, split::{StratifiedShuffleSplit, TestRatio}};
///
/// // 60% label 'a', 40% label 'b'
/// let labels = [vec!['a'; 60], vec!['b'; 40]].concat();
/// let splitter = StratifiedShuffleSplit::new(3, TestRatio::new(0.2).unwrap()).unwrap();
/// let partitions = splitter.split(&labels, &mut seeded_rng(42)).unwrap();
///
/// assert_eq!(partitions.len(), 3);
/// for partition in &partitions {
///     let test_a = partition.test.iter().filter(|&&i| labels[i] == 'a').count();
///     assert_eq!(partition.test.len(), 20);
///     assert_eq!(test_a, 12);
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StratifiedShuffleSplit {
    n_splits: usize,
    test_ratio: TestRatio,
}

impl StratifiedShuffleSplit {
    pub fn new(n_splits: usize, test_ratio: TestRatio) -> Result<Self, SplitError> {
        if n_splits == 0 {
            return Err(SplitError::ZeroSplits);
        }
        Ok(Self {
            n_splits,
            test_ratio,
        })
    }

    #[must_use]
    pub fn n_splits(&self) -> usize {
        self.n_splits
    }

    #[must_use]
    pub fn test_ratio(&self) -> TestRatio {
        self.test_ratio
    }

    /// Produces `n_splits` partitions of `labels.len()` rows.
    ///
    /// Successive partitions continue drawing from the same generator, so
    /// they are decorrelated but fully determined by its initial state.
    pub fn split<K, R>(&self, labels: &[K], rng: &mut R) -> Result<Vec<Partition>, SplitError>
    where
        K: Ord + fmt::Display,
        R: Rng + ?Sized,
    {
        let n = labels.len();
        if n == 0 {
            return Err(SplitError::EmptyRecordSet);
        }
        let n_test = self.test_ratio.ceil_len(n);
        let n_train = n - n_test;

        // Members of each group, groups in label order, members in row order
        let mut groups = BTreeMap::<&K, Vec<usize>>::new();
        for (row, label) in labels.iter().enumerate() {
            groups.entry(label).or_default().push(row);
        }
        let n_groups = groups.len();

        if let Some((label, members)) = groups.iter().min_by_key(|(_, members)| members.len())
            && members.len() < 2
        {
            return Err(SplitError::GroupTooSmall {
                label: label.to_string(),
                count: members.len(),
            });
        }
        if n_train < n_groups {
            return Err(SplitError::TrainTooSmall { n_train, n_groups });
        }
        if n_test < n_groups {
            return Err(SplitError::TestTooSmall { n_test, n_groups });
        }

        let groups = groups.into_values().collect::<Vec<_>>();
        let counts = groups.iter().map(Vec::len).collect::<Vec<_>>();
        debug!(n, n_train, n_test, n_groups, "stratified split");

        let partitions = (0..self.n_splits)
            .map(|_| {
                let train_counts = approximate_mode(&counts, n_train, rng);
                let remaining = counts
                    .iter()
                    .zip(&train_counts)
                    .map(|(count, train)| count - train)
                    .collect::<Vec<_>>();
                let test_counts = approximate_mode(&remaining, n_test, rng);

                let mut train = Vec::with_capacity(n_train);
                let mut test = Vec::with_capacity(n_test);
                for ((members, &n_i), &t_i) in groups.iter().zip(&train_counts).zip(&test_counts) {
                    let mut members = members.clone();
                    members.shuffle(rng);
                    train.extend_from_slice(&members[..n_i]);
                    test.extend_from_slice(&members[n_i..n_i + t_i]);
                }
                train.shuffle(rng);
                test.shuffle(rng);
                Partition { train, test }
            })
            .collect();

        Ok(partitions)
    }
}

/// Allocates `n_draws` among groups proportionally to `counts`.
///
/// Each group gets the floor of its proportional share; the leftover draws go
/// one each to the groups with the largest fractional remainders, with ties
/// broken by sampling without replacement. The result always sums to
/// `n_draws` when `n_draws <= counts.iter().sum()`.
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn approximate_mode<R>(counts: &[usize], n_draws: usize, rng: &mut R) -> Vec<usize>
where
    R: Rng + ?Sized,
{
    let total = counts.iter().sum::<usize>() as f64;
    let continuous = counts
        .iter()
        .map(|&count| count as f64 / total * n_draws as f64)
        .collect::<Vec<_>>();
    let mut floored = continuous
        .iter()
        .map(|share| share.floor() as usize)
        .collect::<Vec<_>>();
    let mut need_to_add = n_draws.saturating_sub(floored.iter().sum());
    if need_to_add == 0 {
        return floored;
    }

    let remainder = continuous
        .iter()
        .zip(&floored)
        .map(|(share, &floor)| share - floor as f64)
        .collect::<Vec<_>>();
    let mut order = (0..counts.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| remainder[b].total_cmp(&remainder[a]));

    for tied in order.chunk_by(|&a, &b| remainder[a].total_cmp(&remainder[b]).is_eq()) {
        let add_now = tied.len().min(need_to_add);
        for pick in index::sample(rng, tied.len(), add_now) {
            floored[tied[pick]] += 1;
        }
        need_to_add -= add_now;
        if need_to_add == 0 {
            break;
        }
    }
    floored
}
