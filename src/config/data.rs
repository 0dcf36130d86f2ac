use super::traits::ConfigSection;
use crate::error::SymgpError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the training table lives and how to read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub path: PathBuf,
    pub target_column: String,
    /// Single ASCII delimiter. Whitespace-aligned files such as the UCI
    /// `auto-mpg.data` must be converted to a delimited file first.
    pub separator: char,
    pub has_header: bool,
    /// Header to apply to files that have none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_names: Option<Vec<String>>,
    /// Cell values read as missing.
    pub null_values: Vec<String>,
    pub drop_columns: Vec<String>,
    /// Where the best program's predictions are written.
    pub output_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("auto-mpg.csv"),
            target_column: "mpg".to_string(),
            separator: ',',
            has_header: true,
            column_names: None,
            null_values: vec!["?".to_string()],
            drop_columns: Vec::new(),
            output_path: PathBuf::from("best_pred.csv"),
        }
    }
}

impl ConfigSection for DataConfig {
    fn section_name() -> &'static str {
        "data"
    }

    fn validate(&self) -> Result<(), SymgpError> {
        if self.target_column.trim().is_empty() {
            return Err(SymgpError::Configuration(
                "Target column must be named".to_string()
            ));
        }
        if !self.separator.is_ascii() {
            return Err(SymgpError::Configuration(format!(
                "Separator {:?} must be a single ASCII character",
                self.separator
            )));
        }
        if self.drop_columns.iter().any(|c| c == &self.target_column) {
            return Err(SymgpError::Configuration(format!(
                "Target column {} cannot also be dropped",
                self.target_column
            )));
        }
        if let Some(names) = &self.column_names {
            if !names.iter().any(|c| c == &self.target_column) {
                return Err(SymgpError::Configuration(format!(
                    "Column names do not include the target column {}",
                    self.target_column
                )));
            }
        }
        Ok(())
    }
}
