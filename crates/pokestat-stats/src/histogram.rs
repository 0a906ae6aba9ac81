use std::ops::Range;

/// A histogram representation of a dataset's distribution.
///
/// The histogram divides the data range `[min, max]` into equally wide bins and
/// counts the values falling into each bin. Binning is a presentation concern:
/// analyses hand raw values over and the display layer chooses the bin count.
#[derive(Debug, Clone)]
pub struct Histogram {
    /// The bins comprising the histogram, ordered by range.
    pub bins: Vec<HistogramBin>,
}

/// A single bin in a histogram.
#[derive(Debug, Clone)]
pub struct HistogramBin {
    /// The range of values covered by this bin (inclusive start, exclusive end).
    pub range: Range<f64>,
    /// The number of values that fall within this bin's range.
    pub count: u64,
}

impl Histogram {
    /// Creates an equal-width histogram from unsorted values.
    ///
    /// # Arguments
    ///
    /// * `values` - The data points to bin.
    /// * `num_bins` - The number of bins spanning `[min, max]`.
    ///
    /// # Returns
    ///
    /// A `Histogram` with `num_bins` bins, or no bins at all when `values` is
    /// empty or `num_bins` is zero. When every value is identical the bins
    /// span `[value, value + 1)`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use pokestat_stats::histogram::Histogram;
    /// let values = [1.0, 2.0, 2.0, 3.0, 10.0];
    /// let histogram = Histogram::equal_width(values, 3);
    /// assert_eq!(histogram.bins.len(), 3);
    /// assert_eq!(histogram.bins[0].count, 4);
    /// assert_eq!(histogram.bins[2].count, 1);
    /// ```
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn equal_width<I>(values: I, num_bins: usize) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        if values.is_empty() || num_bins == 0 {
            return Self { bins: vec![] };
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mut range = max - min;
        if range < f64::EPSILON {
            // All values equal; give the bins a unit span to avoid zero-width bins
            range = 1.0;
        }
        let bin_width = range / num_bins as f64;

        let mut bins = (0..num_bins)
            .map(|bin_idx| {
                // Recompute boundaries from the index to avoid accumulated rounding
                let start = min + range * bin_idx as f64 / num_bins as f64;
                let mut end = min + range * (bin_idx + 1) as f64 / num_bins as f64;
                if bin_idx == num_bins - 1 {
                    end = end.max(max).next_up();
                }
                HistogramBin {
                    range: start..end,
                    count: 0,
                }
            })
            .collect::<Vec<_>>();

        for val in values {
            let mut idx = (((val - min) / bin_width).floor() as usize).min(num_bins - 1);
            // Division may land one bin off at a boundary; settle against the stored ranges
            while idx + 1 < num_bins && val >= bins[idx + 1].range.start {
                idx += 1;
            }
            while idx > 0 && val < bins[idx].range.start {
                idx -= 1;
            }
            bins[idx].count += 1;
        }

        Self { bins }
    }

    /// Total number of values counted across all bins.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values() {
        assert!(Histogram::equal_width([], 10).bins.is_empty());
        assert!(Histogram::equal_width([1.0], 0).bins.is_empty());
    }

    #[test]
    fn test_single_value() {
        let histogram = Histogram::equal_width([42.0, 42.0], 4);
        assert_eq!(histogram.bins.len(), 4);
        assert_eq!(histogram.bins[0].count, 2);
        assert!(histogram.bins[0].range.contains(&42.0));
    }

    #[test]
    fn test_every_value_lands_in_its_bin() {
        let values = (0..100).map(f64::from).collect::<Vec<_>>();
        let histogram = Histogram::equal_width(values.iter().copied(), 30);
        assert_eq!(histogram.total_count(), 100);
        for bin in &histogram.bins {
            let inside = values.iter().filter(|v| bin.range.contains(v)).count();
            assert_eq!(inside as u64, bin.count, "bin {:?}", bin.range);
        }
    }

    #[test]
    fn test_bins_are_contiguous() {
        let histogram = Histogram::equal_width([3.0, 8.0, 15.0, 27.0], 5);
        for pair in histogram.bins.windows(2) {
            assert_eq!(pair[0].range.end, pair[1].range.start);
        }
        assert_eq!(histogram.bins[0].range.start, 3.0);
        assert!(histogram.bins[4].range.contains(&27.0));
    }
}
