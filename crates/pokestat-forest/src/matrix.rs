use crate::ForestError;

/// Column-major table of numeric features.
///
/// Every column holds one value per row; all columns have the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureMatrix {
    columns: Vec<Vec<f64>>,
    n_rows: usize,
}

impl FeatureMatrix {
    /// Builds a matrix from feature columns, rejecting ragged input.
    pub fn new(columns: Vec<Vec<f64>>) -> Result<Self, ForestError> {
        let n_rows = columns.first().map_or(0, Vec::len);
        if let Some((column, values)) = columns
            .iter()
            .enumerate()
            .find(|(_, values)| values.len() != n_rows)
        {
            return Err(ForestError::RaggedColumns {
                column,
                expected: n_rows,
                actual: values.len(),
            });
        }
        Ok(Self { columns, n_rows })
    }

    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    #[must_use]
    pub fn n_features(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn value(&self, row: usize, feature: usize) -> f64 {
        self.columns[feature][row]
    }

    /// Copies one row out of the matrix.
    #[must_use]
    pub fn row(&self, row: usize) -> Vec<f64> {
        self.columns.iter().map(|column| column[row]).collect()
    }
}
