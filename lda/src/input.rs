use crate::{ColumnRef, DataTable, DimensionMismatch, FeatureMatrix, InputError};

/// The ways of specifying training data
#[derive(Debug, Clone)]
pub enum TrainingInput<'a> {
    /// Features with a separate label per sample
    Matrix {
        /// Samples as rows
        features: FeatureMatrix,
        /// One label per row of `features`
        labels: Vec<String>,
    },
    /// A table holding the labels in one column and features in all others
    Table {
        /// The data
        table: &'a DataTable,
        /// The label column
        label: ColumnRef,
    },
    /// A formula like `species ~ .` or `species ~ width + height` over a table
    Formula {
        /// Label and feature columns, `label ~ terms`
        formula: &'a str,
        /// The data
        table: &'a DataTable,
    },
}

/// Features and labels with matching sample counts
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingData {
    /// Samples as rows
    pub features: FeatureMatrix,
    /// One label per sample
    pub labels: Vec<String>,
}

/// Resolve any form of training input into features and labels
pub fn normalize(input: TrainingInput<'_>) -> Result<TrainingData, InputError> {
    match input {
        TrainingInput::Matrix { features, labels } => {
            if labels.len() != features.nsamples() {
                return Err(DimensionMismatch {
                    what: "label count",
                    expected: features.nsamples(),
                    found: labels.len(),
                }
                .into());
            }
            Ok(TrainingData { features, labels })
        }
        TrainingInput::Table { table, label } => {
            let label = table.resolve(&label)?;
            let columns: Vec<usize> = (0..table.ncols()).filter(|&c| c != label).collect();
            from_columns(table, label, &columns)
        }
        TrainingInput::Formula { formula, table } => {
            let parsed = Formula::parse(formula)?;
            debug!("formula {:?} parsed as {:?}", formula, parsed);
            let label = table.resolve(&ColumnRef::Name(parsed.response.clone()))?;
            let columns: Vec<usize> = match parsed.terms {
                Terms::AllExcept(excluded) => {
                    let excluded = excluded
                        .into_iter()
                        .map(|name| table.resolve(&ColumnRef::Name(name)))
                        .collect::<Result<Vec<usize>, InputError>>()?;
                    (0..table.ncols()).filter(|c| *c != label && !excluded.contains(c)).collect()
                }
                Terms::Only(names) => {
                    let columns = names
                        .into_iter()
                        .map(|name| table.resolve(&ColumnRef::Name(name)))
                        .collect::<Result<Vec<usize>, InputError>>()?;
                    if columns.contains(&label) {
                        return Err(InputError::Formula {
                            formula: formula.to_string(),
                            reason: "the response is also a term",
                        });
                    }
                    columns
                }
            };
            from_columns(table, label, &columns)
        }
    }
}

fn from_columns(
    table: &DataTable,
    label: usize,
    columns: &[usize],
) -> Result<TrainingData, InputError> {
    let features = table.select_features(columns)?;
    let labels = table.column(label).map(|c| c.to_labels()).unwrap_or_default();
    Ok(TrainingData { features, labels })
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Terms {
    /// `.` with optional `- name` exclusions
    AllExcept(Vec<String>),
    /// `a + b + c`
    Only(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Formula {
    response: String,
    terms: Terms,
}

impl Formula {
    fn parse(formula: &str) -> Result<Self, InputError> {
        let malformed = |reason| InputError::Formula {
            formula: formula.to_string(),
            reason,
        };

        let (lhs, rhs) = formula.split_once('~').ok_or_else(|| malformed("missing '~'"))?;
        let response = lhs.trim();
        if !is_name(response) {
            return Err(malformed("the response must be a single column name"));
        }
        let rhs = rhs.trim();

        let terms = if let Some(rest) = rhs.strip_prefix('.') {
            let mut parts = rest.split('-').map(str::trim);
            if parts.next() != Some("") {
                return Err(malformed("only '- name' may follow '.'"));
            }
            let excluded: Vec<String> = parts.map(str::to_string).collect();
            if !excluded.iter().all(|n| is_name(n)) {
                return Err(malformed("empty or invalid excluded term"));
            }
            Terms::AllExcept(excluded)
        } else {
            let names: Vec<String> = rhs.split('+').map(|n| n.trim().to_string()).collect();
            if !names.iter().all(|n| is_name(n)) {
                return Err(malformed("empty or invalid term"));
            }
            Terms::Only(names)
        };

        Ok(Self {
            response: response.to_string(),
            terms,
        })
    }
}

fn is_name(s: &str) -> bool {
    !s.is_empty() && !s.contains(|c: char| matches!(c, '~' | '+' | '-') || c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use nalgebra::DMatrix;

    use super::*;
    use crate::Column;

    fn table() -> DataTable {
        DataTable::new()
            .with_column("width", Column::Numeric(vec![1.0, 2.0, 3.0]))
            .unwrap()
            .with_column("species", Column::Categorical(vec!["a".into(), "b".into(), "a".into()]))
            .unwrap()
            .with_column("height", Column::Numeric(vec![4.0, 5.0, 6.0]))
            .unwrap()
            .with_column("weight", Column::Numeric(vec![7.0, 8.0, 9.0]))
            .unwrap()
    }

    #[test]
    fn parse_formulas() {
        assert_eq!(
            Formula::parse("species ~ .").unwrap(),
            Formula {
                response: "species".to_string(),
                terms: Terms::AllExcept(vec![])
            }
        );
        assert_eq!(
            Formula::parse("species~. - weight -height").unwrap().terms,
            Terms::AllExcept(vec!["weight".to_string(), "height".to_string()])
        );
        assert_eq!(
            Formula::parse(" species ~ width + height ").unwrap().terms,
            Terms::Only(vec!["width".to_string(), "height".to_string()])
        );

        for bad in ["species", "~ width", "a b ~ .", "species ~ width +", "species ~ .x", "y ~ . -"] {
            assert!(
                matches!(Formula::parse(bad), Err(InputError::Formula { .. })),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn table_with_label_column() {
        let table = table();
        let by_name = normalize(TrainingInput::Table {
            table: &table,
            label: "species".into(),
        })
        .unwrap();
        let by_index = normalize(TrainingInput::Table {
            table: &table,
            label: 1.into(),
        })
        .unwrap();

        assert_eq!(by_name, by_index);
        assert_eq!(by_name.labels, vec!["a", "b", "a"]);
        assert_eq!(by_name.features.names().unwrap(), &["width", "height", "weight"]);
    }

    #[test]
    fn non_numeric_feature_in_table() {
        let table = table();
        let err = normalize(TrainingInput::Table {
            table: &table,
            label: "width".into(),
        })
        .unwrap_err();
        assert_eq!(err, InputError::NonNumericFeature("species".to_string()));
    }

    #[test]
    fn formula_input() {
        let table = table();
        let all = normalize(TrainingInput::Formula {
            formula: "species ~ . - height",
            table: &table,
        })
        .unwrap();
        assert_eq!(all.features.names().unwrap(), &["width", "weight"]);

        let some = normalize(TrainingInput::Formula {
            formula: "species ~ weight + width",
            table: &table,
        })
        .unwrap();
        assert_eq!(some.features.names().unwrap(), &["weight", "width"]);
        assert_eq!(some.features.data().column(0).as_slice(), &[7.0, 8.0, 9.0]);

        let err = normalize(TrainingInput::Formula {
            formula: "species ~ species + width",
            table: &table,
        })
        .unwrap_err();
        assert!(matches!(err, InputError::Formula { .. }));

        let err = normalize(TrainingInput::Formula {
            formula: "species ~ depth",
            table: &table,
        })
        .unwrap_err();
        assert_eq!(err, InputError::UnknownColumn("depth".to_string()));
    }

    #[test]
    fn ambiguous_columns_fail_early() {
        let table = table().with_column("width", Column::Numeric(vec![0.0; 3])).unwrap();
        let err = normalize(TrainingInput::Formula {
            formula: "species ~ width",
            table: &table,
        })
        .unwrap_err();
        assert_eq!(
            err,
            InputError::AmbiguousColumn {
                name: "width".to_string(),
                count: 2
            }
        );
    }

    #[test]
    fn matrix_input_checks_label_count() {
        let features = FeatureMatrix::new(DMatrix::zeros(3, 2));
        let err = normalize(TrainingInput::Matrix {
            features,
            labels: vec!["a".to_string()],
        })
        .unwrap_err();
        assert!(matches!(err, InputError::DimensionMismatch(_)));
    }
}
