use crate::error::{Result, SymgpError};
use crate::functions::OperatorRegistry;
use crate::types::Node;
use rand::Rng;

/// Upper bound (inclusive) of the integer draw that shapes trees.
pub const SHAPE_DRAW_MAX: usize = 10;

/// Depth from which every generated node is a leaf.
pub const LEAF_ONLY_DEPTH: usize = SHAPE_DRAW_MAX / 2 + 1;

/// Random tree source over a fixed operator set and feature schema.
#[derive(Debug, Clone, Copy)]
pub struct ProgramGenerator<'a> {
    registry: &'a OperatorRegistry,
    feature_names: &'a [String],
}

impl<'a> ProgramGenerator<'a> {
    pub fn new(registry: &'a OperatorRegistry, feature_names: &'a [String]) -> Result<Self> {
        if feature_names.is_empty() {
            return Err(SymgpError::Schema(
                "Cannot generate programs without feature columns".to_string(),
            ));
        }
        if registry.count() == 0 {
            return Err(SymgpError::Configuration(
                "Cannot generate programs without operators".to_string(),
            ));
        }
        Ok(Self {
            registry,
            feature_names,
        })
    }

    pub fn registry(&self) -> &'a OperatorRegistry {
        self.registry
    }

    pub fn feature_names(&self) -> &'a [String] {
        self.feature_names
    }

    /// Grow a random tree rooted at `depth`.
    ///
    /// Draws `r` in `[0, 10]`: `r >= 2 * depth` yields an operator node whose
    /// children are grown at `depth + 1`, anything else a leaf on a uniformly
    /// chosen feature. Depth 0 always yields an operator node and depth 6 and
    /// beyond always a leaf.
    pub fn random_program<R: Rng>(&self, depth: usize, rng: &mut R) -> Node {
        let r = rng.gen_range(0..=SHAPE_DRAW_MAX);
        if r >= depth * 2 {
            let idx = rng.gen_range(0..self.registry.count());
            match self.registry.get(idx) {
                Some(operator) => {
                    let children = (0..operator.arity())
                        .map(|_| self.random_program(depth + 1, rng))
                        .collect();
                    Node::Internal { operator, children }
                }
                None => self.random_leaf(rng),
            }
        } else {
            self.random_leaf(rng)
        }
    }

    fn random_leaf<R: Rng>(&self, rng: &mut R) -> Node {
        let idx = rng.gen_range(0..self.feature_names.len());
        Node::leaf(self.feature_names[idx].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn features() -> Vec<String> {
        vec!["x".to_string(), "y".to_string(), "z".to_string()]
    }

    #[test]
    fn test_root_is_always_internal() {
        let registry = OperatorRegistry::new();
        let names = features();
        let generator = ProgramGenerator::new(&registry, &names).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let tree = generator.random_program(0, &mut rng);
            assert!(!tree.is_leaf());
            assert!(tree.validate().is_ok());
            assert!(tree.depth() <= LEAF_ONLY_DEPTH);
        }
    }

    #[test]
    fn test_deep_start_yields_leaf() {
        let registry = OperatorRegistry::new();
        let names = features();
        let generator = ProgramGenerator::new(&registry, &names).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let node = generator.random_program(LEAF_ONLY_DEPTH, &mut rng);
            match node {
                Node::Leaf { feature } => assert!(names.contains(&feature)),
                Node::Internal { .. } => panic!("expected a leaf at depth {}", LEAF_ONLY_DEPTH),
            }
        }
    }

    #[test]
    fn test_same_seed_same_tree() {
        let registry = OperatorRegistry::new();
        let names = features();
        let generator = ProgramGenerator::new(&registry, &names).unwrap();
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            assert_eq!(
                generator.random_program(0, &mut a),
                generator.random_program(0, &mut b)
            );
        }
    }

    #[test]
    fn test_empty_features_rejected() {
        let registry = OperatorRegistry::new();
        let names: Vec<String> = Vec::new();
        assert!(ProgramGenerator::new(&registry, &names).is_err());
    }
}
