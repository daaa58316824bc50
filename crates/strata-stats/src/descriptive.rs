/// Descriptive statistics summarizing a numeric column.
///
/// Only finite values take part in the summary; the number of skipped
/// (missing or non-finite) values is reported separately so callers can
/// tell a clean column from a sparse one.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStats {
    /// Number of finite values summarized.
    pub count: usize,
    /// Number of values skipped because they were missing or not finite.
    pub skipped: usize,
    /// The minimum finite value.
    pub min: f64,
    /// The maximum finite value.
    pub max: f64,
    /// The arithmetic mean of the finite values.
    pub mean: f64,
    /// The median of the finite values (upper median for even counts).
    pub median: f64,
    /// The population standard deviation of the finite values.
    pub std_dev: f64,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from possibly-missing values.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if at least one value is finite
    /// * `None` - otherwise
    ///
    /// # Examples
    ///
    /// ```
    /// # use strata_stats::descriptive::DescriptiveStats;
    /// let values = [Some(5.0), None, Some(1.0), Some(f64::NAN), Some(3.0)];
    /// let stats = DescriptiveStats::new(values).unwrap();
    /// assert_eq!(stats.count, 3);
    /// assert_eq!(stats.skipped, 2);
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// assert_eq!(stats.median, 3.0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let mut skipped = 0;
        let mut sorted = values
            .into_iter()
            .filter_map(|value| {
                let finite = value.filter(|v| v.is_finite());
                if finite.is_none() {
                    skipped += 1;
                }
                finite
            })
            .collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);

        let min = *sorted.first()?;
        let max = *sorted.last()?;
        let count = sorted.len();
        let n = count as f64;
        let mean = sorted.iter().sum::<f64>() / n;
        let median = sorted[count / 2];
        let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        Some(Self {
            count,
            skipped,
            min,
            max,
            mean,
            median,
            std_dev: variance.sqrt(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_missing() {
        assert_eq!(DescriptiveStats::new([None, Some(f64::INFINITY)]), None);
        assert_eq!(DescriptiveStats::new(std::iter::empty()), None);
    }

    #[test]
    fn test_constant_column() {
        let stats = DescriptiveStats::new([Some(2.5); 4]).unwrap();
        assert_eq!(stats.min, 2.5);
        assert_eq!(stats.max, 2.5);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.skipped, 0);
    }

    #[test]
    fn test_upper_median() {
        let stats = DescriptiveStats::new([Some(4.0), Some(1.0), Some(3.0), Some(2.0)]).unwrap();
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.mean, 2.5);
    }
}
