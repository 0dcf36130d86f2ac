use crate::config::DataConfig;
use crate::data::InMemoryDataset;
use crate::engines::evaluation::median;
use crate::error::{Result, SymgpError};
use polars::prelude::*;
use std::path::Path;

pub struct CsvConnector;

impl CsvConnector {
    /// Read the delimited file described by `config` into a DataFrame.
    pub fn load(config: &DataConfig) -> Result<DataFrame> {
        let null_values = if config.null_values.is_empty() {
            None
        } else {
            Some(NullValues::AllColumns(
                config.null_values.iter().map(|v| v.as_str().into()).collect(),
            ))
        };
        if !config.separator.is_ascii() {
            return Err(SymgpError::Configuration(format!(
                "Separator {:?} must be a single ASCII character",
                config.separator
            )));
        }
        let separator = config.separator as u8;

        let mut df = CsvReadOptions::default()
            .with_has_header(config.has_header)
            .map_parse_options(move |options| {
                options
                    .with_separator(separator)
                    .with_null_values(null_values.clone())
            })
            .try_into_reader_with_file_path(Some(config.path.clone()))?
            .finish()
            .map_err(|e| {
                SymgpError::DataLoading(format!("Failed to read {}: {}", config.path.display(), e))
            })?;

        if let Some(names) = &config.column_names {
            if names.len() != df.width() {
                return Err(SymgpError::DataLoading(format!(
                    "{} column names given for {} columns",
                    names.len(),
                    df.width()
                )));
            }
            df.set_column_names(names.iter().map(|s| s.as_str()))?;
        }

        Ok(df)
    }

    /// Load, clean and split the file into features and target.
    pub fn load_dataset(config: &DataConfig) -> Result<InMemoryDataset> {
        let df = Self::load(config)?;
        Self::to_dataset(&df, config)
    }

    /// Split a frame into numeric feature columns and the target column.
    ///
    /// Configured and non-numeric columns are dropped. Missing feature values
    /// are filled with the column median; missing targets are an error.
    pub fn to_dataset(df: &DataFrame, config: &DataConfig) -> Result<InMemoryDataset> {
        let column_names: Vec<String> =
            df.get_column_names().iter().map(|s| s.to_string()).collect();
        if !column_names.iter().any(|c| c == &config.target_column) {
            return Err(SymgpError::Schema(format!(
                "Target column {} not found in {:?}",
                config.target_column, column_names
            )));
        }

        let mut feature_names = Vec::new();
        let mut columns = Vec::new();
        let mut targets = Vec::new();

        for name in &column_names {
            if config.drop_columns.contains(name) {
                log::debug!("Dropping configured column {}", name);
                continue;
            }

            let column = df.column(name)?;
            let is_target = name == &config.target_column;
            if !is_numeric(column.dtype()) {
                if is_target {
                    return Err(SymgpError::Schema(format!(
                        "Target column {} is not numeric ({:?})",
                        name,
                        column.dtype()
                    )));
                }
                log::warn!("Dropping non-numeric column {} ({:?})", name, column.dtype());
                continue;
            }

            let values = numeric_values(column)?;
            if is_target {
                targets = values
                    .into_iter()
                    .collect::<Option<Vec<f64>>>()
                    .ok_or_else(|| {
                        SymgpError::Schema(format!("Target column {} has missing values", name))
                    })?;
            } else {
                feature_names.push(name.clone());
                columns.push(impute_median(name, values)?);
            }
        }

        InMemoryDataset::new(feature_names, columns, targets)
    }

    /// Write targets and predictions side by side.
    pub fn write_predictions<P: AsRef<Path>>(
        path: P,
        targets: &[f64],
        predictions: &[f64],
    ) -> Result<()> {
        if targets.len() != predictions.len() {
            return Err(SymgpError::Schema(format!(
                "{} predictions for {} targets",
                predictions.len(),
                targets.len()
            )));
        }

        let mut df = DataFrame::new(vec![
            Column::new("target".into(), targets),
            Column::new("pred".into(), predictions),
        ])?;
        let mut file = std::fs::File::create(path.as_ref())?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)?;
        Ok(())
    }
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float64
            | DataType::Float32
            | DataType::Int64
            | DataType::Int32
            | DataType::Int16
            | DataType::Int8
            | DataType::UInt64
            | DataType::UInt32
            | DataType::UInt16
            | DataType::UInt8
    )
}

fn numeric_values(column: &Column) -> Result<Vec<Option<f64>>> {
    let cast = column.cast(&DataType::Float64)?;
    let values = cast.f64()?;
    Ok(values.into_iter().collect())
}

fn impute_median(name: &str, values: Vec<Option<f64>>) -> Result<Vec<f64>> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    let missing = values.len() - present.len();
    if missing == 0 {
        return Ok(present);
    }

    let fill = median(&present).ok_or_else(|| {
        SymgpError::Schema(format!("Column {} has no values to impute from", name))
    })?;
    log::warn!(
        "Column {}: filled {} missing values with median {}",
        name,
        missing,
        fill
    );
    Ok(values.into_iter().map(|v| v.unwrap_or(fill)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dataset;
    use polars::df;

    #[test]
    fn test_impute_median() {
        let filled = impute_median("hp", vec![Some(1.0), None, Some(3.0), Some(10.0)]).unwrap();
        assert_eq!(filled, vec![1.0, 3.0, 3.0, 10.0]);
    }

    #[test]
    fn test_impute_all_missing_fails() {
        assert!(impute_median("hp", vec![None, None]).is_err());
    }

    #[test]
    fn test_to_dataset_splits_target_and_drops_text() {
        let df = df! {
            "mpg" => &[18.0, 15.0, 18.0],
            "cylinders" => &[8i64, 8, 8],
            "horsepower" => &[Some(130.0), None, Some(150.0)],
            "car name" => &["chevrolet", "buick", "plymouth"],
        }
        .unwrap();
        let config = DataConfig::default();

        let dataset = CsvConnector::to_dataset(&df, &config).unwrap();
        assert_eq!(dataset.feature_names(), &["cylinders".to_string(), "horsepower".to_string()]);
        assert_eq!(dataset.targets(), &[18.0, 15.0, 18.0]);
        assert_eq!(dataset.column("horsepower"), Some(&[130.0, 140.0, 150.0][..]));
    }

    #[test]
    fn test_non_ascii_separator_rejected() {
        let config = DataConfig {
            separator: '§',
            ..Default::default()
        };
        assert!(matches!(
            CsvConnector::load(&config),
            Err(SymgpError::Configuration(_))
        ));
    }

    #[test]
    fn test_missing_target_column() {
        let df = df! { "x" => &[1.0, 2.0] }.unwrap();
        let config = DataConfig::default();
        assert!(matches!(
            CsvConnector::to_dataset(&df, &config),
            Err(SymgpError::Schema(_))
        ));
    }
}
