use std::collections::HashSet;

use gen_eigen::{CholeskyReduction, GeneralizedEigenSolver};
use nalgebra::DMatrix;

use crate::{
    scatter::scatter_of_classes, ClassIndex, DimensionMismatch, FeatureMatrix, FitError,
    LdaParams, Loadings, ProjectionModel, COMPONENT_PREFIX,
};

/// Fits discriminant models, using `S` to solve the generalized eigen problem
#[derive(Debug, Clone)]
pub struct LdaFitter<S> {
    params: LdaParams,
    solver: S,
}

impl LdaFitter<CholeskyReduction> {
    /// A fitter using the Cholesky reduction solver with the tolerance of `params`
    pub fn with_params(params: LdaParams) -> Self {
        let solver = CholeskyReduction {
            tolerance: params.tolerance,
            ..Default::default()
        };
        Self::new(params, solver)
    }
}

impl<S> LdaFitter<S>
where
    S: GeneralizedEigenSolver,
{
    /// Create a new fitter
    ///
    /// # Arguments:
    /// params: The fit parameters
    /// solver: The generalized eigen solver being used
    pub fn new(params: LdaParams, solver: S) -> Self {
        Self { params, solver }
    }

    /// The fit parameters
    #[inline(always)]
    pub fn params(&self) -> &LdaParams {
        &self.params
    }

    /// Find the `K - 1` most discriminating directions of `features`,
    /// where `K` is the number of distinct `labels`
    pub fn fit<L>(
        &self,
        features: &FeatureMatrix,
        labels: &[L],
    ) -> Result<ProjectionModel, FitError>
    where
        L: Ord + Clone + ToString,
    {
        let lambda = self.params.regularization_coeff;
        if !(lambda.is_finite() && lambda >= 0.0) {
            return Err(FitError::InvalidRegularization(lambda));
        }
        if labels.len() != features.nsamples() {
            return Err(DimensionMismatch {
                what: "label count",
                expected: features.nsamples(),
                found: labels.len(),
            }
            .into());
        }
        if features.nsamples() == 0 || features.nfeatures() == 0 {
            return Err(FitError::EmptyInput);
        }
        if let Some(names) = features.names() {
            let mut seen = HashSet::with_capacity(names.len());
            if let Some(dup) = names.iter().find(|name| !seen.insert(name.as_str())) {
                return Err(FitError::DuplicateFeature(dup.clone()));
            }
        }

        let classes = ClassIndex::encode(labels);
        let k = classes.n_classes();
        if k < 2 {
            return Err(FitError::InsufficientClasses(k));
        }
        let p = features.nfeatures();
        if k - 1 > p {
            return Err(FitError::TooManyClasses {
                classes: k,
                features: p,
            });
        }
        debug!("fitting {} samples, {} features, {} classes", features.nsamples(), p, k);

        let scatter = scatter_of_classes(features.data(), &classes);
        trace!("between: {}, within: {}", scatter.between, scatter.within);

        if lambda == 0.0 {
            warn!("fitting without regularization, a singular within-class scatter will fail");
        }
        let within = regularize(&scatter.within, lambda);

        let requested = k - 1;
        let res = self.solver.solve(&scatter.between, &within, requested)?;
        if res.converged() < requested {
            return Err(FitError::IncompleteSpectrum {
                requested,
                converged: res.converged(),
            });
        }
        debug!("eigenvalues: {}", res.eigenvalues.transpose());

        let component_names =
            (1..=requested).map(|i| format!("{}{}", COMPONENT_PREFIX, i)).collect();
        let loadings = Loadings::new(
            res.eigenvectors,
            features.names().map(|names| names.to_vec()),
            component_names,
        );
        let class_names = classes.labels().iter().map(ToString::to_string).collect();

        Ok(ProjectionModel::new(res.eigenvalues, loadings, class_names, lambda))
    }
}

/// Fit with the default solver and the given regularization coefficient
pub fn fit<L>(
    features: &FeatureMatrix,
    labels: &[L],
    lambda: f64,
) -> Result<ProjectionModel, FitError>
where
    L: Ord + Clone + ToString,
{
    let params = LdaParams {
        regularization_coeff: lambda,
        ..Default::default()
    };
    LdaFitter::with_params(params).fit(features, labels)
}

/// `within + lambda * max|within| * I`, the scale taken before the identity is added
pub fn regularize(within: &DMatrix<f64>, lambda: f64) -> DMatrix<f64> {
    let shift = lambda * within.amax();
    let mut regularized = within.clone();
    for i in 0..regularized.nrows().min(regularized.ncols()) {
        regularized[(i, i)] += shift;
    }
    regularized
}
