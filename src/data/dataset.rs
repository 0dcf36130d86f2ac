use crate::error::{Result, SymgpError};
use std::collections::{HashMap, HashSet};

/// Random access to one row's feature values by name.
pub trait FeatureRow {
    fn feature(&self, name: &str) -> Option<f64>;
}

impl FeatureRow for HashMap<String, f64> {
    fn feature(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl FeatureRow for [(&str, f64)] {
    fn feature(&self, name: &str) -> Option<f64> {
        self.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
    }
}

/// Tabular data with named feature columns and an aligned target column.
///
/// Row count and column names are fixed for the lifetime of a run.
pub trait Dataset {
    /// Feature names, target excluded.
    fn feature_names(&self) -> &[String];

    fn row_count(&self) -> usize;

    fn feature_value(&self, row: usize, feature: &str) -> Option<f64>;

    /// Target column, aligned with rows by index.
    fn targets(&self) -> &[f64];

    fn row(&self, index: usize) -> DatasetRow<'_, Self>
    where
        Self: Sized,
    {
        DatasetRow {
            dataset: self,
            index,
        }
    }

    /// Shape checks the evolution loop relies on.
    fn check_schema(&self) -> Result<()> {
        if self.feature_names().is_empty() {
            return Err(SymgpError::Schema("Dataset has no feature columns".to_string()));
        }
        if self.row_count() == 0 {
            return Err(SymgpError::Schema("Dataset has no rows".to_string()));
        }
        if self.targets().len() != self.row_count() {
            return Err(SymgpError::Schema(format!(
                "Target column has {} values for {} rows",
                self.targets().len(),
                self.row_count()
            )));
        }
        Ok(())
    }
}

/// View of a single dataset row.
#[derive(Debug)]
pub struct DatasetRow<'a, D: Dataset> {
    dataset: &'a D,
    index: usize,
}

impl<D: Dataset> FeatureRow for DatasetRow<'_, D> {
    fn feature(&self, name: &str) -> Option<f64> {
        self.dataset.feature_value(self.index, name)
    }
}

/// Column-major dataset held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryDataset {
    feature_names: Vec<String>,
    index: HashMap<String, usize>,
    columns: Vec<Vec<f64>>,
    targets: Vec<f64>,
}

impl InMemoryDataset {
    pub fn new(
        feature_names: Vec<String>,
        columns: Vec<Vec<f64>>,
        targets: Vec<f64>,
    ) -> Result<Self> {
        if feature_names.len() != columns.len() {
            return Err(SymgpError::Schema(format!(
                "{} feature names for {} columns",
                feature_names.len(),
                columns.len()
            )));
        }

        let mut seen = HashSet::new();
        for name in &feature_names {
            if !seen.insert(name.as_str()) {
                return Err(SymgpError::Schema(format!("Duplicate feature column: {}", name)));
            }
        }

        for (name, column) in feature_names.iter().zip(&columns) {
            if column.len() != targets.len() {
                return Err(SymgpError::Schema(format!(
                    "Column {} has {} rows, target has {}",
                    name,
                    column.len(),
                    targets.len()
                )));
            }
        }

        let index = feature_names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        Ok(Self {
            feature_names,
            index,
            columns,
            targets,
        })
    }

    /// Build from row-major feature values.
    pub fn from_rows(
        feature_names: Vec<String>,
        rows: &[Vec<f64>],
        targets: Vec<f64>,
    ) -> Result<Self> {
        let mut columns = vec![Vec::with_capacity(rows.len()); feature_names.len()];
        for (i, row) in rows.iter().enumerate() {
            if row.len() != feature_names.len() {
                return Err(SymgpError::Schema(format!(
                    "Row {} has {} values, expected {}",
                    i,
                    row.len(),
                    feature_names.len()
                )));
            }
            for (column, value) in columns.iter_mut().zip(row) {
                column.push(*value);
            }
        }
        Self::new(feature_names, columns, targets)
    }

    pub fn column(&self, feature: &str) -> Option<&[f64]> {
        self.index.get(feature).map(|&i| self.columns[i].as_slice())
    }
}

impl Dataset for InMemoryDataset {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn row_count(&self) -> usize {
        self.targets.len()
    }

    fn feature_value(&self, row: usize, feature: &str) -> Option<f64> {
        self.index
            .get(feature)
            .and_then(|&i| self.columns[i].get(row))
            .copied()
    }

    fn targets(&self) -> &[f64] {
        &self.targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_rows_and_access() {
        let data = InMemoryDataset::from_rows(
            names(&["x", "z"]),
            &[vec![1.0, 10.0], vec![2.0, 20.0]],
            vec![3.0, 4.0],
        )
        .unwrap();

        assert_eq!(data.row_count(), 2);
        assert_eq!(data.feature_value(1, "z"), Some(20.0));
        assert_eq!(data.feature_value(0, "missing"), None);
        assert_eq!(data.feature_value(5, "x"), None);
        assert_eq!(data.row(0).feature("x"), Some(1.0));
        assert_eq!(data.column("z"), Some(&[10.0, 20.0][..]));
        assert!(data.check_schema().is_ok());
    }

    #[test]
    fn test_rejects_ragged_columns() {
        let err = InMemoryDataset::new(names(&["x"]), vec![vec![1.0]], vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(err, SymgpError::Schema(_)));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let result = InMemoryDataset::new(
            names(&["x", "x"]),
            vec![vec![1.0], vec![2.0]],
            vec![0.0],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_dataset_fails_schema_check() {
        let data = InMemoryDataset::new(names(&["x"]), vec![vec![]], vec![]).unwrap();
        assert!(data.check_schema().is_err());
    }

    #[test]
    fn test_slice_row() {
        let row: &[(&str, f64)] = &[("a", 1.5), ("b", -2.0)];
        assert_eq!(row.feature("b"), Some(-2.0));
        assert_eq!(row.feature("c"), None);
    }
}
