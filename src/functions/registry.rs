use super::primitives::{Operator, BUILTIN_OPERATORS, MAX_ARITY};
use crate::error::{Result, SymgpError};

/// Fixed, ordered catalog of operators available to a run.
///
/// Built once at startup and only read afterwards. Indexing by a uniformly
/// drawn index in `[0, count)` is how the generator picks operators.
#[derive(Debug, Clone)]
pub struct OperatorRegistry {
    operators: Vec<&'static Operator>,
}

impl OperatorRegistry {
    /// Registry holding every built-in operator.
    pub fn new() -> Self {
        Self {
            operators: BUILTIN_OPERATORS.to_vec(),
        }
    }

    /// Build a registry from an explicit operator list, checking each entry.
    pub fn from_operators(operators: Vec<&'static Operator>) -> Result<Self> {
        if operators.is_empty() {
            return Err(SymgpError::Configuration(
                "Operator registry cannot be empty".to_string(),
            ));
        }
        for op in &operators {
            if op.arity() == 0 || op.arity() > MAX_ARITY {
                return Err(SymgpError::StructuralInvariant(format!(
                    "Operator {} has arity {}, expected 1..={}",
                    op.name(),
                    op.arity(),
                    MAX_ARITY
                )));
            }
            if op.placeholder_count() != op.arity() {
                return Err(SymgpError::StructuralInvariant(format!(
                    "Operator {} template {:?} has {} placeholders for arity {}",
                    op.name(),
                    op.template(),
                    op.placeholder_count(),
                    op.arity()
                )));
            }
        }
        Ok(Self { operators })
    }

    /// Subset of the built-ins selected by name, in the order given.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let builtins = Self::new();
        let operators = names
            .iter()
            .map(|name| {
                builtins.get_by_name(name.as_ref()).ok_or_else(|| {
                    SymgpError::Configuration(format!("Unknown operator: {}", name.as_ref()))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_operators(operators)
    }

    pub fn count(&self) -> usize {
        self.operators.len()
    }

    pub fn get(&self, index: usize) -> Option<&'static Operator> {
        self.operators.get(index).copied()
    }

    pub fn get_by_name(&self, name: &str) -> Option<&'static Operator> {
        self.operators.iter().copied().find(|op| op.name() == name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.operators.iter().map(|op| op.name()).collect()
    }
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
