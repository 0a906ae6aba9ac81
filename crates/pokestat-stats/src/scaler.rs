use crate::descriptive::DescriptiveStats;

/// Column standardization to zero mean and unit variance.
///
/// The scaler is fit on column-major data (one `Vec` per column) and stores the
/// per-column mean and scale. Columns with zero variance keep a scale of `1.0`
/// so that they map to all zeros instead of `NaN`.
///
/// # Examples
///
/// ```
/// use pokestat_stats::scaler::StandardScaler;
///
/// let columns = vec![vec![1.0, 3.0]];
/// let scaler = StandardScaler::fit(&columns);
/// assert_eq!(scaler.means(), &[2.0]);
/// assert_eq!(scaler.scales(), &[1.0]);
/// assert_eq!(scaler.transform(&columns), vec![vec![-1.0, 1.0]]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    means: Vec<f64>,
    scales: Vec<f64>,
}

impl StandardScaler {
    /// Fits the scaler on column-major data.
    ///
    /// Empty columns get mean `0.0` and scale `1.0`.
    #[must_use]
    pub fn fit(columns: &[Vec<f64>]) -> Self {
        let (means, scales) = columns
            .iter()
            .map(|column| match DescriptiveStats::mean_std(column.iter().copied()) {
                Some((mean, std_dev)) if std_dev > 0.0 => (mean, std_dev),
                Some((mean, _)) => (mean, 1.0),
                None => (0.0, 1.0),
            })
            .unzip();
        Self { means, scales }
    }

    /// Applies the fitted transformation to column-major data.
    ///
    /// # Panics
    ///
    /// Panics if the number of columns differs from the number the scaler was fit on.
    #[must_use]
    pub fn transform(&self, columns: &[Vec<f64>]) -> Vec<Vec<f64>> {
        assert_eq!(
            columns.len(),
            self.means.len(),
            "column count must match the fitted scaler"
        );
        columns
            .iter()
            .zip(self.means.iter().zip(&self.scales))
            .map(|(column, (mean, scale))| column.iter().map(|v| (v - mean) / scale).collect())
            .collect()
    }

    /// Fits on `columns` and returns the transformed data in one step.
    #[must_use]
    pub fn fit_transform(columns: &[Vec<f64>]) -> Vec<Vec<f64>> {
        Self::fit(columns).transform(columns)
    }

    #[must_use]
    pub fn means(&self) -> &[f64] {
        &self.means
    }

    #[must_use]
    pub fn scales(&self) -> &[f64] {
        &self.scales
    }
}
