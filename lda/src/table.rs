use nalgebra::DMatrix;

use crate::{DimensionMismatch, FeatureMatrix, InputError};

/// A column of a [`DataTable`]
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Real values
    Numeric(Vec<f64>),
    /// Category names
    Categorical(Vec<String>),
}

impl Column {
    /// Number of entries
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(v) => v.len(),
            Column::Categorical(v) => v.len(),
        }
    }

    /// Whether the column has no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The entries as strings, numbers in their display form
    pub fn to_labels(&self) -> Vec<String> {
        match self {
            Column::Numeric(v) => v.iter().map(ToString::to_string).collect(),
            Column::Categorical(v) => v.clone(),
        }
    }
}

/// Refers to a column of a [`DataTable`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnRef {
    /// By exact name, which must be unique
    Name(String),
    /// By position
    Index(usize),
}

impl From<&str> for ColumnRef {
    fn from(name: &str) -> Self {
        ColumnRef::Name(name.to_string())
    }
}

impl From<usize> for ColumnRef {
    fn from(index: usize) -> Self {
        ColumnRef::Index(index)
    }
}

/// Named columns of equal length
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    names: Vec<String>,
    columns: Vec<Column>,
}

impl DataTable {
    /// An empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`DataTable::push_column`]
    pub fn with_column<S: Into<String>>(
        mut self,
        name: S,
        column: Column,
    ) -> Result<Self, DimensionMismatch> {
        self.push_column(name, column)?;
        Ok(self)
    }

    /// Append a column, which must have as many entries as the table has rows
    pub fn push_column<S: Into<String>>(
        &mut self,
        name: S,
        column: Column,
    ) -> Result<(), DimensionMismatch> {
        if !self.columns.is_empty() && column.len() != self.nrows() {
            return Err(DimensionMismatch {
                what: "column length",
                expected: self.nrows(),
                found: column.len(),
            });
        }
        self.names.push(name.into());
        self.columns.push(column);
        Ok(())
    }

    /// Number of rows, zero for a table without columns
    pub fn nrows(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Number of columns
    #[inline(always)]
    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    /// The column names, in order
    #[inline(always)]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The column at position `index`
    #[inline(always)]
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Position of the referenced column
    pub fn resolve(&self, column: &ColumnRef) -> Result<usize, InputError> {
        match column {
            ColumnRef::Index(index) => {
                if *index < self.ncols() {
                    Ok(*index)
                } else {
                    Err(InputError::ColumnIndexOutOfRange {
                        index: *index,
                        ncols: self.ncols(),
                    })
                }
            }
            ColumnRef::Name(name) => {
                let matches: Vec<usize> = self
                    .names
                    .iter()
                    .enumerate()
                    .filter(|(_, n)| *n == name)
                    .map(|(i, _)| i)
                    .collect();
                match matches.as_slice() {
                    [] => Err(InputError::UnknownColumn(name.clone())),
                    [index] => Ok(*index),
                    _ => Err(InputError::AmbiguousColumn {
                        name: name.clone(),
                        count: matches.len(),
                    }),
                }
            }
        }
    }

    /// Feature matrix of the given columns, which all have to be numeric
    pub fn select_features(&self, columns: &[usize]) -> Result<FeatureMatrix, InputError> {
        if columns.is_empty() {
            return Err(InputError::NoFeatures);
        }
        let mut values: Vec<&[f64]> = Vec::with_capacity(columns.len());
        for &c in columns {
            match self.columns.get(c) {
                Some(Column::Numeric(v)) => values.push(v),
                Some(Column::Categorical(_)) => {
                    return Err(InputError::NonNumericFeature(self.names[c].clone()))
                }
                None => {
                    return Err(InputError::ColumnIndexOutOfRange {
                        index: c,
                        ncols: self.ncols(),
                    })
                }
            }
        }

        let data = DMatrix::from_fn(self.nrows(), columns.len(), |i, j| values[j][i]);
        let names: Vec<String> = columns.iter().map(|&c| self.names[c].clone()).collect();
        Ok(FeatureMatrix::with_names(data, names)?)
    }

    /// Feature matrix of every numeric column, skipping the categorical ones
    pub fn numeric_features(&self) -> FeatureMatrix {
        let numeric: Vec<(&String, &Vec<f64>)> = self
            .names
            .iter()
            .zip(&self.columns)
            .filter_map(|(name, column)| match column {
                Column::Numeric(v) => Some((name, v)),
                Column::Categorical(_) => None,
            })
            .collect();

        let data = DMatrix::from_fn(self.nrows(), numeric.len(), |i, j| numeric[j].1[i]);
        let names = numeric.iter().map(|(name, _)| (*name).clone()).collect();
        FeatureMatrix::from_parts(data, Some(names))
    }
}
