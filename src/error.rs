use thiserror::Error;

#[derive(Error, Debug)]
pub enum SymgpError {
    /// A leaf names a feature the row or dataset does not provide, or the
    /// dataset shape does not line up with its targets.
    #[error("Schema error: {0}")]
    Schema(String),

    /// Tree construction bug: arity mismatch or an edit point with no parent.
    #[error("Structural invariant violated: {0}")]
    StructuralInvariant(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Data loading error: {0}")]
    DataLoading(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Config source error: {0}")]
    ConfigSource(#[from] ::config::ConfigError),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, SymgpError>;
