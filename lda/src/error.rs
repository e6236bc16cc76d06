use gen_eigen::EigenSolveError;
use thiserror::Error;

/// Two sizes that have to agree but don't
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("dimension mismatch: {what} is {found}, expected {expected}")]
pub struct DimensionMismatch {
    /// The size being checked
    pub what: &'static str,
    /// The size it has to match
    pub expected: usize,
    /// The size it has
    pub found: usize,
}

/// Errors of fitting a model
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    /// Sizes that disagree
    #[error(transparent)]
    DimensionMismatch(#[from] DimensionMismatch),
    /// No samples or no features
    #[error("training data is empty")]
    EmptyInput,
    /// Fewer than two distinct labels
    #[error("need at least 2 distinct classes, found {0}")]
    InsufficientClasses(usize),
    /// More components requested than the feature space has dimensions
    #[error("{classes} classes need {} components, but there are only {features} features", .classes - 1)]
    TooManyClasses {
        /// Number of distinct labels
        classes: usize,
        /// Number of features
        features: usize,
    },
    /// A feature name occurs more than once
    #[error("feature name {0:?} is not unique")]
    DuplicateFeature(String),
    /// Negative or non-finite regularization coefficient
    #[error("regularization coefficient must be finite and >= 0, got {0}")]
    InvalidRegularization(f64),
    /// The eigen solver reported a failure
    #[error(transparent)]
    EigenSolve(#[from] EigenSolveError),
    /// The solver isolated fewer eigenpairs than requested
    #[error("requested {requested} components, but only {converged} converged")]
    IncompleteSpectrum {
        /// Number of components asked for
        requested: usize,
        /// Number of eigenpairs returned
        converged: usize,
    },
}

/// Errors of projecting data onto a fitted model
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectError {
    /// Trained-on features absent from the new data, in training order
    #[error("missing features: {}", .0.join(", "))]
    MissingFeatures(Vec<String>),
    /// A trained-on feature names more than one column of the new data
    #[error("feature {name:?} names {count} columns")]
    AmbiguousFeature {
        /// The feature name
        name: String,
        /// Number of columns carrying it
        count: usize,
    },
    /// Sizes that disagree
    #[error(transparent)]
    DimensionMismatch(#[from] DimensionMismatch),
}

/// Errors of turning tables and formulas into training data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// No column has this name
    #[error("no column named {0:?}")]
    UnknownColumn(String),
    /// Several columns have this name
    #[error("{count} columns are named {name:?}")]
    AmbiguousColumn {
        /// The name looked up
        name: String,
        /// How many columns carry it
        count: usize,
    },
    /// Column index past the last column
    #[error("column index {index} is out of range for {ncols} columns")]
    ColumnIndexOutOfRange {
        /// The index looked up
        index: usize,
        /// Number of columns in the table
        ncols: usize,
    },
    /// A feature column holds categories instead of numbers
    #[error("feature column {0:?} is not numeric")]
    NonNumericFeature(String),
    /// Nothing left to use as a feature
    #[error("no feature columns selected")]
    NoFeatures,
    /// The formula could not be parsed
    #[error("malformed formula {formula:?}: {reason}")]
    Formula {
        /// The formula as given
        formula: String,
        /// What is wrong with it
        reason: &'static str,
    },
    /// Sizes that disagree
    #[error(transparent)]
    DimensionMismatch(#[from] DimensionMismatch),
}
