//! Fixed-edge interval binning
//!
//! This module assigns continuous values to ordinal bins delimited by a fixed,
//! strictly increasing list of edges. Every interval is closed on the right,
//! and the outermost bins are unbounded:
//!
//! ```text
//! edges = [e1, e2, ..., ek]
//!
//! bin 0 : (-inf, e1]
//! bin 1 : (e1,   e2]
//! ...
//! bin k : (ek,  +inf)
//! ```
//!
//! `k` edges therefore produce `k + 1` bins. Values that are not finite
//! (`NaN`, `±inf`) are not assigned to any bin.
//!
//! # Examples
//!
//! ```
//! use strata_stats::binning::RightClosedBins;
//!
//! let bins = RightClosedBins::new(vec![1.5, 3.0, 4.5, 6.0]).unwrap();
//! assert_eq!(bins.num_bins(), 5);
//!
//! // Edges belong to the bin on their left
//! assert_eq!(bins.bin_index(1.5), Some(0));
//! assert_eq!(bins.bin_index(1.500_001), Some(1));
//! assert_eq!(bins.bin_index(7.0), Some(4));
//!
//! // Missing data stays unbinned
//! assert_eq!(bins.bin_index(f64::NAN), None);
//! ```

/// Error returned when bin edges cannot describe a valid partition of the real line.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum BinEdgesError {
    #[display("bin edges must not be empty")]
    Empty,
    #[display("bin edge at position {index} is not finite")]
    NonFinite { index: usize },
    #[display("bin edges must be strictly increasing (position {index})")]
    NotIncreasing { index: usize },
}

/// Right-closed bins over the real line.
#[derive(Debug, Clone, PartialEq)]
pub struct RightClosedBins {
    edges: Vec<f64>,
}

impl RightClosedBins {
    /// Creates bins from strictly increasing, finite edges.
    pub fn new(edges: Vec<f64>) -> Result<Self, BinEdgesError> {
        if edges.is_empty() {
            return Err(BinEdgesError::Empty);
        }
        for (index, edge) in edges.iter().enumerate() {
            if !edge.is_finite() {
                return Err(BinEdgesError::NonFinite { index });
            }
        }
        for (index, pair) in edges.windows(2).enumerate() {
            if pair[0] >= pair[1] {
                return Err(BinEdgesError::NotIncreasing { index: index + 1 });
            }
        }
        Ok(Self { edges })
    }

    /// The interior edges, in ascending order.
    #[must_use]
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Number of bins, always `edges().len() + 1`.
    #[must_use]
    pub fn num_bins(&self) -> usize {
        self.edges.len() + 1
    }

    /// Returns the zero-based bin containing `value`.
    ///
    /// Returns `None` for non-finite values.
    #[must_use]
    pub fn bin_index(&self, value: f64) -> Option<usize> {
        if !value.is_finite() {
            return None;
        }
        // First edge that is >= value; the value sits in the bin ending at that edge.
        Some(self.edges.partition_point(|&edge| edge < value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn income_bins() -> RightClosedBins {
        RightClosedBins::new(vec![1.5, 3.0, 4.5, 6.0]).unwrap()
    }

    #[test]
    fn test_one_value_per_bin() {
        let bins = income_bins();
        let indices = [0.5, 2.0, 3.5, 5.0, 7.0]
            .into_iter()
            .map(|v| bins.bin_index(v))
            .collect::<Vec<_>>();
        assert_eq!(indices, vec![Some(0), Some(1), Some(2), Some(3), Some(4)]);
    }

    #[test]
    fn test_edges_are_right_closed() {
        let bins = income_bins();
        assert_eq!(bins.bin_index(1.5), Some(0));
        assert_eq!(bins.bin_index(3.0), Some(1));
        assert_eq!(bins.bin_index(4.5), Some(2));
        assert_eq!(bins.bin_index(6.0), Some(3));
    }

    #[test]
    fn test_unbounded_tails() {
        let bins = income_bins();
        assert_eq!(bins.bin_index(-1.0e9), Some(0));
        assert_eq!(bins.bin_index(0.0), Some(0));
        assert_eq!(bins.bin_index(1.0e9), Some(4));
    }

    #[test]
    fn test_non_finite_values() {
        let bins = income_bins();
        assert_eq!(bins.bin_index(f64::NAN), None);
        assert_eq!(bins.bin_index(f64::INFINITY), None);
        assert_eq!(bins.bin_index(f64::NEG_INFINITY), None);
    }

    #[test]
    fn test_invalid_edges() {
        assert_eq!(RightClosedBins::new(vec![]), Err(BinEdgesError::Empty));
        assert_eq!(
            RightClosedBins::new(vec![1.0, f64::NAN]),
            Err(BinEdgesError::NonFinite { index: 1 })
        );
        assert_eq!(
            RightClosedBins::new(vec![1.0, 3.0, 3.0]),
            Err(BinEdgesError::NotIncreasing { index: 2 })
        );
    }

    #[test]
    fn test_single_edge() {
        let bins = RightClosedBins::new(vec![0.0]).unwrap();
        assert_eq!(bins.num_bins(), 2);
        assert_eq!(bins.bin_index(0.0), Some(0));
        assert_eq!(bins.bin_index(0.1), Some(1));
    }
}
