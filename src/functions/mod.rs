pub mod primitives;
pub mod registry;

pub use primitives::{Operator, BUILTIN_OPERATORS, MAX_ARITY};
pub use registry::OperatorRegistry;
