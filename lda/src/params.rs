/// The parameters of a discriminant analysis fit
#[derive(Debug, Clone)]
pub struct LdaParams {
    /// Regularization of the within-class scatter. The identity added to it
    /// is scaled by this times the largest absolute entry of the scatter.
    pub regularization_coeff: f64,
    /// Convergence threshold of the eigen solver
    pub tolerance: f64,
}

impl Default for LdaParams {
    fn default() -> Self {
        Self {
            regularization_coeff: 0.1,
            tolerance: 1e-5,
        }
    }
}
