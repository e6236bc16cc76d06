use thiserror::Error;

/// What went wrong in a generalized eigen solve
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureKind {
    /// The argument at this position has an illegal value
    #[error("argument {0} has an illegal value")]
    IllegalArgument(usize),
    /// This many eigenpairs failed to converge
    #[error("{0} eigenpairs failed to converge")]
    NoConvergence(usize),
    /// The leading minor of this order of `B` is not positive definite
    #[error("leading minor of order {0} of B is not positive definite")]
    NotPositiveDefinite(usize),
}

/// A failed solve, carrying the diagnostic status code of the routine.
///
/// `-i` for an illegal argument `i`, `i` for `i` unconverged eigenpairs and
/// `n + i` when the leading minor of order `i` of `B` is not positive definite.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("generalized eigen solve failed with info = {code}: {kind}")]
pub struct EigenSolveError {
    /// Diagnostic status code
    pub code: i32,
    /// Decoded meaning of `code`
    pub kind: FailureKind,
}

impl EigenSolveError {
    pub(crate) fn illegal_argument(position: usize) -> Self {
        Self {
            code: -(position as i32),
            kind: FailureKind::IllegalArgument(position),
        }
    }

    pub(crate) fn no_convergence(count: usize) -> Self {
        Self {
            code: count as i32,
            kind: FailureKind::NoConvergence(count),
        }
    }

    pub(crate) fn not_positive_definite(order: usize, dim: usize) -> Self {
        Self {
            code: (dim + order) as i32,
            kind: FailureKind::NotPositiveDefinite(order),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(EigenSolveError::illegal_argument(3).code, -3);
        assert_eq!(EigenSolveError::no_convergence(2).code, 2);
        assert_eq!(EigenSolveError::not_positive_definite(2, 5).code, 7);
    }

    #[test]
    fn message_contains_code() {
        let err = EigenSolveError::not_positive_definite(1, 4);
        assert_eq!(
            err.to_string(),
            "generalized eigen solve failed with info = 5: leading minor of order 1 of B is not positive definite"
        );
    }
}
