use crate::data::{Dataset, FeatureRow};
use crate::engines::evaluation;
use crate::error::Result;
use crate::types::Node;
use serde::Serialize;

/// How an individual came into being.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ProgramOrigin {
    #[default]
    Random,
    Mutation,
    Crossover,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgramMetadata {
    pub origin: ProgramOrigin,
    /// Generation whose population first held this program.
    pub generation: usize,
}

/// One evolvable individual. Owns its whole tree exclusively.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub root: Node,
    pub metadata: ProgramMetadata,
}

impl Program {
    pub fn new(root: Node) -> Self {
        Self {
            root,
            metadata: ProgramMetadata::default(),
        }
    }

    pub fn with_metadata(root: Node, origin: ProgramOrigin, generation: usize) -> Self {
        Self {
            root,
            metadata: ProgramMetadata { origin, generation },
        }
    }

    pub fn size(&self) -> usize {
        self.root.size()
    }

    pub fn render(&self) -> String {
        self.root.render()
    }

    pub fn evaluate<R: FeatureRow + ?Sized>(&self, row: &R) -> Result<f64> {
        evaluation::evaluate(&self.root, row)
    }

    pub fn predict<D: Dataset>(&self, data: &D) -> Result<Vec<f64>> {
        evaluation::predict(&self.root, data)
    }
}

impl From<Node> for Program {
    fn from(root: Node) -> Self {
        Self::new(root)
    }
}
