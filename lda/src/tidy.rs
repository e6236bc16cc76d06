//! Long-format summaries of a fitted model

use crate::ProjectionModel;

/// Summary of a single component
#[derive(Debug, Clone, PartialEq)]
pub struct EigenvalueRow {
    /// Component name
    pub component: String,
    /// Separation quality of the component
    pub eigenvalue: f64,
    /// Share of the summed eigenvalues
    pub proportion: f64,
}

/// One coefficient of the loadings
#[derive(Debug, Clone, PartialEq)]
pub struct LoadingRow {
    /// Feature position in training order
    pub feature_index: usize,
    /// Feature name, if the model was trained on named features
    pub feature: Option<String>,
    /// Component name
    pub component: String,
    /// The coefficient
    pub value: f64,
}

/// One row per component, in model order
pub fn eigenvalues(model: &ProjectionModel) -> Vec<EigenvalueRow> {
    let sum: f64 = model.eigenvalues().iter().sum();
    model
        .loadings()
        .component_names()
        .iter()
        .zip(model.eigenvalues().iter())
        .map(|(name, &eigenvalue)| EigenvalueRow {
            component: name.clone(),
            eigenvalue,
            proportion: if sum != 0.0 { eigenvalue / sum } else { 0.0 },
        })
        .collect()
}

/// One row per feature and component, features varying fastest
pub fn loadings(model: &ProjectionModel) -> Vec<LoadingRow> {
    let loadings = model.loadings();
    let matrix = loadings.matrix();

    let mut rows = Vec::with_capacity(matrix.len());
    for (j, component) in loadings.component_names().iter().enumerate() {
        for i in 0..matrix.nrows() {
            rows.push(LoadingRow {
                feature_index: i,
                feature: loadings.feature_names().map(|names| names[i].clone()),
                component: component.clone(),
                value: matrix[(i, j)],
            });
        }
    }
    rows
}
