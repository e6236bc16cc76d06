//! Symmetric-definite generalized eigenvalue problems `A v = λ B v`,
//! solved for a selected part of the spectrum.

#![warn(missing_docs)]

#[macro_use]
extern crate log;

use nalgebra::{DMatrix, DVector};

mod cholesky_reduction;
mod error;

pub use cholesky_reduction::CholeskyReduction;
pub use error::{EigenSolveError, FailureKind};

/// Selects eigenpairs by their rank in the ascending spectrum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpectrumRange {
    /// Every eigenpair
    All,
    /// Ranks `lower..=upper`, 1-based
    Index {
        /// Smallest selected rank
        lower: usize,
        /// Largest selected rank
        upper: usize,
    },
}

impl SpectrumRange {
    /// The `k` largest eigenpairs of an `n`-dimensional problem,
    /// `None` unless `1 <= k <= n`
    pub fn top(n: usize, k: usize) -> Option<Self> {
        if k == 0 || k > n {
            return None;
        }
        Some(Self::Index {
            lower: n + 1 - k,
            upper: n,
        })
    }

    pub(crate) fn bounds(&self, n: usize) -> (usize, usize) {
        match *self {
            SpectrumRange::All => (1, n),
            SpectrumRange::Index { lower, upper } => (lower, upper),
        }
    }
}

/// Eigenpairs returned by a solver.
/// Column `i` of `eigenvectors` belongs to `eigenvalues[i]`.
#[derive(Debug, Clone)]
pub struct EigenResult {
    /// The converged eigenvalues
    pub eigenvalues: DVector<f64>,
    /// One column per converged eigenvalue
    pub eigenvectors: DMatrix<f64>,
    /// Ranks of the requested eigenpairs that did not converge
    pub failed: Vec<usize>,
}

impl EigenResult {
    /// Number of eigenpairs actually returned
    #[inline(always)]
    pub fn converged(&self) -> usize {
        self.eigenvalues.len()
    }
}

/// Generic way of solving the generalized symmetric eigenvalue problem
pub trait GeneralizedEigenSolver: Clone {
    /// Solve `A v = λ B v` for the eigenpairs whose ascending rank lies in `range`.
    /// Only the upper triangles of `a` and `b` are read.
    ///
    /// # Returns
    /// The eigenpairs in ascending order of eigenvalue
    fn solve_range(
        &self,
        a: &DMatrix<f64>,
        b: &DMatrix<f64>,
        range: SpectrumRange,
    ) -> Result<EigenResult, EigenSolveError>;

    /// Solve for the `num_components` largest eigenpairs of `A v = λ B v`
    ///
    /// # Returns
    /// The eigenpairs in decreasing order of eigenvalue
    fn solve(
        &self,
        a: &DMatrix<f64>,
        b: &DMatrix<f64>,
        num_components: usize,
    ) -> Result<EigenResult, EigenSolveError> {
        let range = SpectrumRange::top(a.nrows(), num_components)
            .ok_or_else(|| EigenSolveError::illegal_argument(3))?;
        let ascending = self.solve_range(a, b, range)?;

        let m = ascending.converged();
        let eigenvalues = DVector::from_iterator(m, ascending.eigenvalues.iter().rev().copied());
        let eigenvectors = DMatrix::from_fn(ascending.eigenvectors.nrows(), m, |i, j| {
            ascending.eigenvectors[(i, m - 1 - j)]
        });

        Ok(EigenResult {
            eigenvalues,
            eigenvectors,
            failed: ascending.failed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_selects_the_highest_ranks() {
        assert_eq!(SpectrumRange::top(5, 2), Some(SpectrumRange::Index { lower: 4, upper: 5 }));
        assert_eq!(SpectrumRange::top(3, 3), Some(SpectrumRange::Index { lower: 1, upper: 3 }));
    }

    #[test]
    fn top_rejects_counts_outside_the_dimension() {
        assert_eq!(SpectrumRange::top(3, 0), None);
        assert_eq!(SpectrumRange::top(3, 4), None);
        assert_eq!(SpectrumRange::top(3, 10), None);
        assert_eq!(SpectrumRange::top(0, 1), None);
    }
}
