use crate::error::{Result, SymgpError};
use crate::functions::Operator;

/// Child indices leading from a root to one of its nodes. Empty means the root.
pub type TreePath = Vec<usize>;

/// Expression tree node
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Reference to a named feature column.
    Leaf { feature: String },
    /// Operator applied to `operator.arity()` ordered children.
    Internal {
        operator: &'static Operator,
        children: Vec<Node>,
    },
}

impl Node {
    pub fn leaf(feature: impl Into<String>) -> Self {
        Node::Leaf {
            feature: feature.into(),
        }
    }

    /// Build an internal node, rejecting a child count that disagrees with
    /// the operator's arity.
    pub fn internal(operator: &'static Operator, children: Vec<Node>) -> Result<Self> {
        if children.len() != operator.arity() {
            return Err(arity_violation(operator, children.len()));
        }
        Ok(Node::Internal { operator, children })
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Leaf { .. } => &[],
            Node::Internal { children, .. } => children,
        }
    }

    /// Total node count; leaves count as one.
    pub fn size(&self) -> usize {
        1 + self.children().iter().map(Node::size).sum::<usize>()
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.children()
            .iter()
            .map(|c| c.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Render the tree with each operator's display template.
    pub fn render(&self) -> String {
        match self {
            Node::Leaf { feature } => feature.clone(),
            Node::Internal { operator, children } => {
                let rendered: Vec<String> = children.iter().map(Node::render).collect();
                operator.format(&rendered)
            }
        }
    }

    /// Check arity against child count for the whole tree.
    pub fn validate(&self) -> Result<()> {
        if let Node::Internal { operator, children } = self {
            if children.len() != operator.arity() {
                return Err(arity_violation(operator, children.len()));
            }
            for child in children {
                child.validate()?;
            }
        }
        Ok(())
    }

    pub fn get(&self, path: &[usize]) -> Option<&Node> {
        path.iter()
            .try_fold(self, |node, &idx| node.children().get(idx))
    }

    pub fn get_mut(&mut self, path: &[usize]) -> Option<&mut Node> {
        let mut node = self;
        for &idx in path {
            node = match node {
                Node::Leaf { .. } => return None,
                Node::Internal { children, .. } => children.get_mut(idx)?,
            };
        }
        Some(node)
    }

    /// Replace child `index` of the internal node at `parent`.
    pub fn replace_child(&mut self, parent: &[usize], index: usize, subtree: Node) -> Result<()> {
        let target = self.get_mut(parent).ok_or_else(|| {
            SymgpError::StructuralInvariant(format!("No node at path {:?}", parent))
        })?;
        match target {
            Node::Leaf { feature } => Err(SymgpError::StructuralInvariant(format!(
                "Cannot replace a child of leaf '{}' at path {:?}",
                feature, parent
            ))),
            Node::Internal { children, .. } => {
                let slot = children.get_mut(index).ok_or_else(|| {
                    SymgpError::StructuralInvariant(format!(
                        "Child index {} out of range for node at path {:?}",
                        index, parent
                    ))
                })?;
                *slot = subtree;
                Ok(())
            }
        }
    }
}

fn arity_violation(operator: &Operator, found: usize) -> SymgpError {
    SymgpError::StructuralInvariant(format!(
        "Operator {} expects {} children, found {}",
        operator.name(),
        operator.arity(),
        found
    ))
}
