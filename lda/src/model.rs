use nalgebra::{DMatrix, DVector, DVectorView};

use crate::{Column, DataTable, DimensionMismatch, FeatureMatrix, ProjectError};

/// The projection directions, one column per component and one row per feature
#[derive(Debug, Clone, PartialEq)]
pub struct Loadings {
    matrix: DMatrix<f64>,
    feature_names: Option<Vec<String>>,
    component_names: Vec<String>,
}

impl Loadings {
    pub(crate) fn new(
        matrix: DMatrix<f64>,
        feature_names: Option<Vec<String>>,
        component_names: Vec<String>,
    ) -> Self {
        Self {
            matrix,
            feature_names,
            component_names,
        }
    }

    /// The coefficients, features as rows
    #[inline(always)]
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// Row labels, present when the model was trained on named features
    #[inline(always)]
    pub fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    /// Column labels, `LDA1`, `LDA2`, ...
    #[inline(always)]
    pub fn component_names(&self) -> &[String] {
        &self.component_names
    }

    /// The coefficient of a named feature in a named component
    pub fn get(&self, feature: &str, component: &str) -> Option<f64> {
        let row = self.feature_names()?.iter().position(|n| n == feature)?;
        let col = self.component_names.iter().position(|n| n == component)?;
        Some(self.matrix[(row, col)])
    }
}

/// A fitted discriminant analysis. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionModel {
    eigenvalues: DVector<f64>,
    loadings: Loadings,
    classes: Vec<String>,
    regularization_coeff: f64,
}

impl ProjectionModel {
    pub(crate) fn new(
        eigenvalues: DVector<f64>,
        loadings: Loadings,
        classes: Vec<String>,
        regularization_coeff: f64,
    ) -> Self {
        Self {
            eigenvalues,
            loadings,
            classes,
            regularization_coeff,
        }
    }

    /// Separation quality of each component, strictly decreasing
    #[inline(always)]
    pub fn eigenvalues(&self) -> &DVector<f64> {
        &self.eigenvalues
    }

    /// The projection directions
    #[inline(always)]
    pub fn loadings(&self) -> &Loadings {
        &self.loadings
    }

    /// The class labels seen in training, sorted
    #[inline(always)]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// The regularization coefficient the model was fitted with
    #[inline(always)]
    pub fn regularization_coeff(&self) -> f64 {
        self.regularization_coeff
    }

    /// Number of projection directions, one less than the number of classes
    #[inline(always)]
    pub fn n_components(&self) -> usize {
        self.eigenvalues.len()
    }

    /// Project `new_data` onto the components.
    ///
    /// A model trained on named features picks the columns of `new_data` by
    /// name, in training order, ignoring any others. Without names the
    /// columns are taken by position. A trained-on name carried by more
    /// than one column is an error.
    pub fn project(&self, new_data: &FeatureMatrix) -> Result<Projection, ProjectError> {
        let selected = match self.loadings.feature_names() {
            Some(names) => {
                let available = new_data.names().unwrap_or(&[]);
                let mut columns: Vec<usize> = Vec::with_capacity(names.len());
                let mut missing: Vec<String> = Vec::new();
                for name in names {
                    let matches: Vec<usize> = available
                        .iter()
                        .enumerate()
                        .filter(|(_, a)| *a == name)
                        .map(|(j, _)| j)
                        .collect();
                    match matches.as_slice() {
                        [] => missing.push(name.clone()),
                        [j] => columns.push(*j),
                        _ => {
                            return Err(ProjectError::AmbiguousFeature {
                                name: name.clone(),
                                count: matches.len(),
                            })
                        }
                    }
                }
                if !missing.is_empty() {
                    return Err(ProjectError::MissingFeatures(missing));
                }
                new_data.data().select_columns(columns.iter())
            }
            None => {
                if new_data.nfeatures() != self.loadings.matrix.nrows() {
                    return Err(DimensionMismatch {
                        what: "feature count",
                        expected: self.loadings.matrix.nrows(),
                        found: new_data.nfeatures(),
                    }
                    .into());
                }
                new_data.data().clone()
            }
        };

        Ok(Projection {
            coordinates: selected * &self.loadings.matrix,
            component_names: self.loadings.component_names.clone(),
        })
    }

    /// Project the numeric columns of a table, see [`ProjectionModel::project`]
    pub fn project_table(&self, table: &DataTable) -> Result<Projection, ProjectError> {
        self.project(&table.numeric_features())
    }
}

/// Coordinates of projected samples, one column per component
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    coordinates: DMatrix<f64>,
    component_names: Vec<String>,
}

impl Projection {
    /// Samples as rows, components as columns
    #[inline(always)]
    pub fn coordinates(&self) -> &DMatrix<f64> {
        &self.coordinates
    }

    /// Column labels, `LDA1`, `LDA2`, ...
    #[inline(always)]
    pub fn component_names(&self) -> &[String] {
        &self.component_names
    }

    /// The coordinates along a named component
    pub fn component(&self, name: &str) -> Option<DVectorView<'_, f64>> {
        let col = self.component_names.iter().position(|n| n == name)?;
        Some(self.coordinates.column(col))
    }

    /// A copy of `table` with one numeric column appended per component
    pub fn append_to(&self, table: &DataTable) -> Result<DataTable, DimensionMismatch> {
        let mut out = table.clone();
        for (name, column) in self.component_names.iter().zip(self.coordinates.column_iter()) {
            out.push_column(name.clone(), Column::Numeric(column.iter().copied().collect()))?;
        }
        Ok(out)
    }
}
