//! Statistical utilities for the Strata workspace.
//!
//! This crate provides the dependency-light numeric building blocks used by
//! the sampling pipeline:
//!
//! - **Binning**: Assign continuous values to fixed right-closed intervals
//! - **Proportions**: Normalized category counts and multi-subset comparison
//! - **Descriptive statistics**: Summarize a numeric column with missing values
//!
//! # Modules
//!
//! - [`binning`]: Fixed-edge, right-closed interval binning
//! - [`proportion`]: Category proportions and deviation of subsets from a population
//! - [`descriptive`]: Descriptive statistics over possibly-missing values
//!
//! # Examples
//!
//! ## Binning values
//!
//! ```
//! use strata_stats::binning::RightClosedBins;
//!
//! let bins = RightClosedBins::new(vec![1.5, 3.0, 4.5, 6.0]).unwrap();
//! assert_eq!(bins.bin_index(3.5), Some(2));
//! ```
//!
//! ## Comparing a subset against its population
//!
//! ```
//! use strata_stats::proportion::{ProportionComparison, Proportions};
//!
//! let overall = Proportions::from_values(["a", "a", "b", "b"]);
//! let subset = Proportions::from_values(["a", "b", "b"]);
//! let comparison = ProportionComparison::new(&overall, &[&subset]).unwrap();
//! assert_eq!(comparison.rows().len(), 2);
//! ```

pub mod binning;
pub mod descriptive;
pub mod proportion;
