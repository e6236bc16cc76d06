use nalgebra::{Cholesky, DMatrix, DVector, SymmetricEigen};

use super::{EigenResult, EigenSolveError, GeneralizedEigenSolver, SpectrumRange};

/// Solves `A v = λ B v` by reducing it to a standard symmetric problem.
/// With `B = L Lᵀ` the eigenpairs of `C = L⁻¹ A L⁻ᵀ` are computed and each
/// selected eigenvector is mapped back with `v = L⁻ᵀ w`, so that `vᵀ B v = 1`.
#[derive(Debug, Clone)]
pub struct CholeskyReduction {
    /// Convergence threshold of the symmetric eigen iteration
    pub tolerance: f64,
    /// Iteration budget, per dimension of the problem
    pub max_iterations_per_dim: usize,
}

impl Default for CholeskyReduction {
    fn default() -> Self {
        Self {
            tolerance: 1e-5,
            max_iterations_per_dim: 30,
        }
    }
}

impl CholeskyReduction {
    /// Check the arguments, returning the problem dimension
    fn validate(
        &self,
        a: &DMatrix<f64>,
        b: &DMatrix<f64>,
        range: SpectrumRange,
    ) -> Result<usize, EigenSolveError> {
        let n = a.nrows();
        if n == 0 || !a.is_square() || a.iter().any(|v| !v.is_finite()) {
            return Err(EigenSolveError::illegal_argument(1));
        }
        if b.shape() != (n, n) || b.iter().any(|v| !v.is_finite()) {
            return Err(EigenSolveError::illegal_argument(2));
        }
        let (lower, upper) = range.bounds(n);
        if lower == 0 || lower > upper || upper > n {
            return Err(EigenSolveError::illegal_argument(3));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(EigenSolveError::illegal_argument(4));
        }

        Ok(n)
    }
}

impl GeneralizedEigenSolver for CholeskyReduction {
    fn solve_range(
        &self,
        a: &DMatrix<f64>,
        b: &DMatrix<f64>,
        range: SpectrumRange,
    ) -> Result<EigenResult, EigenSolveError> {
        let n = self.validate(a, b, range)?;
        let (lower, upper) = range.bounds(n);

        let a = upper_symmetric(a);
        let b = upper_symmetric(b);

        let l = match Cholesky::new(b.clone()) {
            Some(chol) => chol.l(),
            None => {
                return Err(EigenSolveError::not_positive_definite(first_indefinite_minor(&b), n))
            }
        };
        let l_inv = l
            .solve_lower_triangular(&DMatrix::identity(n, n))
            .ok_or_else(|| EigenSolveError::not_positive_definite(first_indefinite_minor(&b), n))?;
        let l_inv_t = l_inv.transpose();

        let c = &l_inv * &a * &l_inv_t;
        let c = (&c + c.transpose()) * 0.5;
        trace!("reduced problem: {}", c);

        let max_niter = self.max_iterations_per_dim.saturating_mul(n).max(1);
        let eigen = SymmetricEigen::try_new(c, self.tolerance, max_niter)
            .ok_or_else(|| EigenSolveError::no_convergence(upper - lower + 1))?;

        // ascending ranks into the unordered spectrum
        let mut ranks: Vec<usize> = (0..n).collect();
        ranks.sort_by(|&i, &j| eigen.eigenvalues[i].total_cmp(&eigen.eigenvalues[j]));

        let mut values: Vec<f64> = Vec::with_capacity(upper - lower + 1);
        let mut vectors: Vec<DVector<f64>> = Vec::with_capacity(upper - lower + 1);
        let mut failed: Vec<usize> = Vec::new();
        for rank in lower..=upper {
            let idx = ranks[rank - 1];
            let value = eigen.eigenvalues[idx];
            let vector: DVector<f64> = &l_inv_t * eigen.eigenvectors.column(idx);
            if value.is_finite() && vector.iter().all(|v| v.is_finite()) {
                values.push(value);
                vectors.push(vector);
            } else {
                failed.push(rank);
            }
        }
        debug!(
            "solved {}-dimensional problem for ranks {}..={}, {} converged",
            n,
            lower,
            upper,
            values.len()
        );

        let eigenvectors =
            if vectors.is_empty() { DMatrix::zeros(n, 0) } else { DMatrix::from_columns(&vectors) };

        Ok(EigenResult {
            eigenvalues: DVector::from_vec(values),
            eigenvectors,
            failed,
        })
    }
}

/// Mirror the upper triangle onto the lower one
fn upper_symmetric(m: &DMatrix<f64>) -> DMatrix<f64> {
    DMatrix::from_fn(m.nrows(), m.ncols(), |i, j| if i <= j { m[(i, j)] } else { m[(j, i)] })
}

/// Order of the first leading minor of `b` that has no Cholesky factor.
/// Factorizable minors form a prefix, so a bisection over the order suffices.
fn first_indefinite_minor(b: &DMatrix<f64>) -> usize {
    let (mut lo, mut hi) = (0, b.nrows());
    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        if Cholesky::new(b.view((0, 0), (mid, mid)).clone_owned()).is_some() {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    hi
}

#[cfg(test)]
mod tests {
    use round::round;

    use super::*;
    use crate::FailureKind;

    fn residual(a: &DMatrix<f64>, b: &DMatrix<f64>, value: f64, vector: &DVector<f64>) -> f64 {
        (a * vector - value * (b * vector)).norm()
    }

    #[test]
    fn diagonal_top_two() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let a = DMatrix::from_diagonal(&DVector::from_vec(vec![1.0, 4.0, 2.0, 3.0]));
        let b = DMatrix::identity(4, 4);

        let res = CholeskyReduction::default().solve(&a, &b, 2).unwrap();
        info!("eigenvalues: {}, eigenvectors: {}", res.eigenvalues, res.eigenvectors);

        assert_eq!(res.converged(), 2);
        assert!(res.failed.is_empty());
        let values: Vec<f64> = res.eigenvalues.iter().map(|v| round(*v, 6)).collect();
        assert_eq!(values, vec![4.0, 3.0]);

        let mut vectors = res.eigenvectors.abs();
        vectors.iter_mut().for_each(|v| *v = round(*v, 6));
        let goal = DMatrix::from_row_slice(4, 2, &[0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
        assert_eq!(vectors, goal);
    }

    #[test]
    fn index_range_is_ascending() {
        let a = DMatrix::from_diagonal(&DVector::from_vec(vec![1.0, 4.0, 2.0, 3.0]));
        let b = DMatrix::identity(4, 4);

        let res = CholeskyReduction::default()
            .solve_range(&a, &b, SpectrumRange::Index { lower: 2, upper: 3 })
            .unwrap();
        let values: Vec<f64> = res.eigenvalues.iter().map(|v| round(*v, 6)).collect();
        assert_eq!(values, vec![2.0, 3.0]);
    }

    #[test]
    fn generalized_residuals() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let m = DMatrix::from_row_slice(
            4,
            4,
            &[1.0, 2.0, 0.5, -1.0, 0.0, 3.0, 1.5, 2.0, -2.0, 1.0, 0.0, 0.5, 1.0, -0.5, 2.5, 1.0],
        );
        let a = &m + m.transpose();
        let b = m.transpose() * &m + DMatrix::identity(4, 4);

        let solver = CholeskyReduction {
            tolerance: 1e-12,
            ..Default::default()
        };
        for k in 1..=4 {
            let res = solver.solve(&a, &b, k).unwrap();
            assert_eq!(res.converged(), k);
            assert_eq!(res.eigenvectors.ncols(), k);
            for i in 1..k {
                assert!(res.eigenvalues[i - 1] > res.eigenvalues[i]);
            }
            for i in 0..k {
                let v: DVector<f64> = res.eigenvectors.column(i).into_owned();
                assert!(residual(&a, &b, res.eigenvalues[i], &v) < 1e-8);
                // B-normalized
                assert!((v.dot(&(&b * &v)) - 1.0).abs() < 1e-8);
            }
        }
    }

    #[test]
    fn default_tolerance_residuals() {
        let a = DMatrix::from_row_slice(3, 3, &[4.0, 1.0, 0.5, 1.0, 3.0, 0.2, 0.5, 0.2, 1.0]);
        let b = DMatrix::from_row_slice(3, 3, &[2.0, 0.3, 0.0, 0.3, 1.0, 0.1, 0.0, 0.1, 1.5]);

        let res = CholeskyReduction::default().solve(&a, &b, 3).unwrap();
        assert!(res.eigenvalues[0] > res.eigenvalues[1]);
        assert!(res.eigenvalues[1] > res.eigenvalues[2]);
        for i in 0..3 {
            let v: DVector<f64> = res.eigenvectors.column(i).into_owned();
            assert!(residual(&a, &b, res.eigenvalues[i], &v) < 1e-4);
        }
    }

    #[test]
    fn lower_triangle_is_ignored() {
        let a = DMatrix::from_row_slice(3, 3, &[4.0, 1.0, 0.5, 1.0, 3.0, 0.2, 0.5, 0.2, 1.0]);
        let mut garbage = a.clone();
        garbage[(1, 0)] = 100.0;
        garbage[(2, 0)] = -7.0;
        garbage[(2, 1)] = 42.0;
        let b = DMatrix::identity(3, 3);

        let solver = CholeskyReduction::default();
        let clean = solver.solve(&a, &b, 2).unwrap();
        let dirty = solver.solve(&garbage, &b, 2).unwrap();
        assert_eq!(clean.eigenvalues, dirty.eigenvalues);
        assert_eq!(clean.eigenvectors, dirty.eigenvectors);
    }

    #[test]
    fn indefinite_b() {
        let a = DMatrix::identity(3, 3);
        let b = DMatrix::from_diagonal(&DVector::from_vec(vec![1.0, -1.0, 1.0]));

        let err = CholeskyReduction::default().solve(&a, &b, 1).unwrap_err();
        assert_eq!(err.code, 5);
        assert_eq!(err.kind, FailureKind::NotPositiveDefinite(2));
    }

    #[test]
    fn singular_b() {
        let a = DMatrix::identity(2, 2);
        let b = DMatrix::zeros(2, 2);

        let err = CholeskyReduction::default().solve(&a, &b, 1).unwrap_err();
        assert_eq!(err.code, 3);
        assert_eq!(err.kind, FailureKind::NotPositiveDefinite(1));
    }

    #[test]
    fn illegal_arguments() {
        let solver = CholeskyReduction::default();
        let a = DMatrix::identity(3, 3);
        let b = DMatrix::identity(3, 3);

        assert_eq!(solver.solve(&a, &b, 0).unwrap_err().code, -3);
        assert_eq!(solver.solve(&a, &b, 4).unwrap_err().code, -3);
        assert_eq!(solver.solve(&DMatrix::zeros(3, 2), &b, 1).unwrap_err().code, -1);
        assert_eq!(solver.solve(&a, &DMatrix::identity(2, 2), 1).unwrap_err().code, -2);

        let mut nan = a.clone();
        nan[(0, 1)] = f64::NAN;
        assert_eq!(solver.solve(&nan, &b, 1).unwrap_err().code, -1);

        let loose = CholeskyReduction {
            tolerance: 0.0,
            ..Default::default()
        };
        assert_eq!(loose.solve(&a, &b, 1).unwrap_err().code, -4);
    }

    #[test]
    fn repeated_solves_are_identical() {
        let a = DMatrix::from_row_slice(3, 3, &[4.0, 1.0, 0.5, 1.0, 3.0, 0.2, 0.5, 0.2, 1.0]);
        let b = DMatrix::from_row_slice(3, 3, &[2.0, 0.3, 0.0, 0.3, 1.0, 0.1, 0.0, 0.1, 1.5]);

        let solver = CholeskyReduction::default();
        let first = solver.solve(&a, &b, 2).unwrap();
        let second = solver.solve(&a, &b, 2).unwrap();
        assert_eq!(first.eigenvalues, second.eigenvalues);
        assert_eq!(first.eigenvectors, second.eigenvectors);
    }
}
