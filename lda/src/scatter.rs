use nalgebra::DMatrix;

use crate::{ClassIndex, DimensionMismatch, FitError};

/// Between-class and within-class scatter of a labelled data set,
/// both normalized by the number of samples
#[derive(Debug, Clone)]
pub struct Scatter {
    /// Scatter of the class means around the global mean
    pub between: DMatrix<f64>,
    /// Scatter of the samples around their own class mean
    pub within: DMatrix<f64>,
}

impl Scatter {
    /// Total scatter, the sum of both parts
    pub fn total(&self) -> DMatrix<f64> {
        &self.between + &self.within
    }
}

/// Compute the scatter matrices of `x`, with samples as rows, grouped by `labels`
pub fn compute_scatter<L>(x: &DMatrix<f64>, labels: &[L]) -> Result<Scatter, FitError>
where
    L: Ord + Clone,
{
    if labels.len() != x.nrows() {
        return Err(DimensionMismatch {
            what: "label count",
            expected: x.nrows(),
            found: labels.len(),
        }
        .into());
    }
    if x.nrows() == 0 || x.ncols() == 0 {
        return Err(FitError::EmptyInput);
    }
    let classes = ClassIndex::encode(labels);
    if classes.n_classes() < 2 {
        return Err(FitError::InsufficientClasses(classes.n_classes()));
    }

    Ok(scatter_of_classes(x, &classes))
}

/// Scatter matrices for already encoded and validated classes
pub(crate) fn scatter_of_classes<L>(x: &DMatrix<f64>, classes: &ClassIndex<L>) -> Scatter
where
    L: Ord + Clone,
{
    let (n, p) = x.shape();
    let codes = classes.codes();

    let mean = x.row_mean();
    let centered = DMatrix::from_fn(n, p, |i, j| x[(i, j)] - mean[j]);

    let mut class_means: DMatrix<f64> = DMatrix::zeros(classes.n_classes(), p);
    for (i, &c) in codes.iter().enumerate() {
        for j in 0..p {
            class_means[(c, j)] += centered[(i, j)];
        }
    }
    for (c, count) in classes.counts().into_iter().enumerate() {
        class_means.row_mut(c).iter_mut().for_each(|v| *v /= count as f64);
    }
    trace!("class means of centered data: {}", class_means);

    // a class with a single sample has a deviation of exactly zero
    let deviation = DMatrix::from_fn(n, p, |i, j| centered[(i, j)] - class_means[(codes[i], j)]);

    let within = symmetrize(deviation.transpose() * &deviation / n as f64);
    let total = symmetrize(centered.transpose() * &centered / n as f64);
    let between = symmetrize(total - &within);

    Scatter { between, within }
}

fn symmetrize(m: DMatrix<f64>) -> DMatrix<f64> {
    (&m + m.transpose()) * 0.5
}
