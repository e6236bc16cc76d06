use nalgebra::DMatrix;

use crate::DimensionMismatch;

/// Samples as rows, features as columns, optionally with a name per feature
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    data: DMatrix<f64>,
    names: Option<Vec<String>>,
}

impl FeatureMatrix {
    /// Features without names, identified by position
    pub fn new(data: DMatrix<f64>) -> Self {
        Self { data, names: None }
    }

    /// Features identified by name, one name per column
    pub fn with_names<S: Into<String>>(
        data: DMatrix<f64>,
        names: Vec<S>,
    ) -> Result<Self, DimensionMismatch> {
        if names.len() != data.ncols() {
            return Err(DimensionMismatch {
                what: "feature name count",
                expected: data.ncols(),
                found: names.len(),
            });
        }

        Ok(Self {
            data,
            names: Some(names.into_iter().map(Into::into).collect()),
        })
    }

    pub(crate) fn from_parts(data: DMatrix<f64>, names: Option<Vec<String>>) -> Self {
        Self { data, names }
    }

    /// Build an unnamed matrix from values in row-major order
    pub fn from_row_slice(nrows: usize, ncols: usize, values: &[f64]) -> Self {
        Self::new(DMatrix::from_row_slice(nrows, ncols, values))
    }

    /// The raw values
    #[inline(always)]
    pub fn data(&self) -> &DMatrix<f64> {
        &self.data
    }

    /// The feature names, if any
    #[inline(always)]
    pub fn names(&self) -> Option<&[String]> {
        self.names.as_deref()
    }

    /// Number of rows
    #[inline(always)]
    pub fn nsamples(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns
    #[inline(always)]
    pub fn nfeatures(&self) -> usize {
        self.data.ncols()
    }
}
