//! Symbolic regression by genetic programming over arithmetic expression
//! trees.

pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod functions;
pub mod types;

pub use engines::generation::{run, EvolutionEngine, EvolutionOutcome, Program};
pub use error::{Result, SymgpError};
pub use types::Node;
