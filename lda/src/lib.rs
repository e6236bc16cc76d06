//! Linear discriminant analysis.
//!
//! Finds the directions that maximize the ratio of between-class to
//! within-class scatter by solving the generalized eigen problem
//! `SB v = λ SW' v`, where `SW'` is the regularized within-class scatter.

#![warn(missing_docs)]

#[macro_use]
extern crate log;

mod classes;
mod error;
mod features;
mod fitter;
mod input;
mod model;
mod params;
mod scatter;
mod table;
pub mod tidy;

pub use classes::ClassIndex;
pub use error::{DimensionMismatch, FitError, InputError, ProjectError};
pub use features::FeatureMatrix;
pub use fitter::{fit, regularize, LdaFitter};
pub use input::{normalize, TrainingData, TrainingInput};
pub use model::{Loadings, Projection, ProjectionModel};
pub use params::LdaParams;
pub use scatter::{compute_scatter, Scatter};
pub use table::{Column, ColumnRef, DataTable};

pub use gen_eigen::{CholeskyReduction, EigenSolveError, GeneralizedEigenSolver};

/// Prefix of the component names, `LDA1`, `LDA2`, ...
pub const COMPONENT_PREFIX: &str = "LDA";
