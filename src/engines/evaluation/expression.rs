use crate::data::{Dataset, FeatureRow};
use crate::error::{Result, SymgpError};
use crate::functions::MAX_ARITY;
use crate::types::Node;

/// Evaluate a tree against one row.
///
/// Leaves read the row's value for their feature; internal nodes evaluate
/// their children left to right and apply the operator. A feature missing
/// from the row is a schema error, a child count that disagrees with the
/// operator's arity is a structural error.
pub fn evaluate<R: FeatureRow + ?Sized>(node: &Node, row: &R) -> Result<f64> {
    match node {
        Node::Leaf { feature } => row.feature(feature).ok_or_else(|| {
            SymgpError::Schema(format!("Feature '{}' is not present in the row", feature))
        }),
        Node::Internal { operator, children } => {
            if children.len() != operator.arity() || children.len() > MAX_ARITY {
                return Err(SymgpError::StructuralInvariant(format!(
                    "Operator {} expects {} children, found {}",
                    operator.name(),
                    operator.arity(),
                    children.len()
                )));
            }
            let mut args = [0.0; MAX_ARITY];
            for (slot, child) in args.iter_mut().zip(children) {
                *slot = evaluate(child, row)?;
            }
            Ok(operator.apply(&args[..children.len()]))
        }
    }
}

/// Prediction vector of a tree over every dataset row, in row order.
pub fn predict<D: Dataset>(node: &Node, data: &D) -> Result<Vec<f64>> {
    (0..data.row_count())
        .map(|i| evaluate(node, &data.row(i)))
        .collect()
}
