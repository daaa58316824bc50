//! Stratification labels and train/test partitioning.
//!
//! This crate turns a loaded [`Dataset`](strata_dataset::Dataset) into
//! train/test partitions and measures how well each partition represents the
//! population.
//!
//! # Pipeline
//!
//! ```text
//! Dataset
//!     ↓ stratify::add_stratification_label
//! Dataset + label column
//!     ↓ split::random_split            ↓ split::StratifiedShuffleSplit
//! Partition (random)                  Partition (stratified)
//!     ↓                                ↓
//!     └──────── analysis::compare_proportions ────────┘
//!                       ↓
//!                ProportionComparison
//! ```
//!
//! # Reproducibility
//!
//! Every split takes its generator explicitly. [`rng::seeded_rng`] builds a
//! PCG generator from a 64-bit seed; giving each split strategy its own
//! generator keeps their results independent of call order.
//!
//! # Example
//!
//! ```
//! use strata_dataset::{ColumnData, Dataset};
//! use strata_sampling::{
//!     analysis, rng::seeded_rng,
//!     split::{self, StratifiedShuffleSplit, TestRatio},
//!     stratify,
//! };
//!
//! let incomes = (0..100_u32).map(|i| Some(f64::from(i) / 12.0)).collect();
//! let mut dataset =
//!     Dataset::from_columns(vec![("median_income".to_owned(), ColumnData::Numeric(incomes))])
//!         .unwrap();
//! let label = stratify::add_stratification_label(&mut dataset, "median_income", "income_cat")
//!     .unwrap();
//! let ratio = TestRatio::new(0.2).unwrap();
//!
//! let random = split::random_split(dataset.len(), ratio, &mut seeded_rng(42));
//! let stratified = StratifiedShuffleSplit::new(1, ratio)
//!     .unwrap()
//!     .split(dataset.strata(label), &mut seeded_rng(42))
//!     .unwrap()
//!     .remove(0);
//!
//! let (_, random_test) = random.select(&dataset);
//! let (_, strat_test) = stratified.select(&dataset);
//! let comparison =
//!     analysis::compare_proportions(&dataset, &[&strat_test, &random_test], label).unwrap();
//! assert_eq!(comparison.rows().len(), 5);
//! ```

pub mod analysis;
pub mod rng;
pub mod split;
pub mod stratify;
