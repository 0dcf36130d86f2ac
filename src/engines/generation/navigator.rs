use super::generator::SHAPE_DRAW_MAX;
use crate::error::{Result, SymgpError};
use crate::types::{Node, TreePath};
use rand::Rng;

/// Where a root-biased walk through a tree stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSelection {
    /// Path of the node the walk stopped on.
    pub node: TreePath,
    /// Path of that node's parent; `None` when the walk stopped on the root.
    pub parent: Option<TreePath>,
    /// Whether the node the walk stopped on is a leaf.
    pub stopped_on_leaf: bool,
}

impl NodeSelection {
    /// Internal node whose child is to be replaced.
    ///
    /// A walk that stops on an internal node edits that node; a walk that
    /// reaches a leaf edits the leaf's parent. A leaf root has no parent, so
    /// there is nothing to splice into and the selection is rejected.
    pub fn edit_point(&self) -> Result<&[usize]> {
        if !self.stopped_on_leaf {
            return Ok(self.node.as_slice());
        }
        self.parent.as_deref().ok_or_else(|| {
            SymgpError::StructuralInvariant(
                "Selected node is a leaf root; it has no parent to edit".to_string(),
            )
        })
    }
}

/// Walk from the root toward a node to edit, favouring shallow nodes.
///
/// At an internal node at depth `d` draw `r` in `[0, 10]`: stop if
/// `r < 2 * d`, otherwise descend into a uniformly chosen child. Reaching a
/// leaf stops without a draw. The root is never a stopping point for an
/// internal root since `r < 0` is impossible.
pub fn select_node<R: Rng>(root: &Node, rng: &mut R) -> NodeSelection {
    let mut node = root;
    let mut path: TreePath = Vec::new();
    let mut parent: Option<TreePath> = None;
    let mut depth = 0usize;

    loop {
        let children = match node {
            Node::Leaf { .. } => {
                return NodeSelection {
                    node: path,
                    parent,
                    stopped_on_leaf: true,
                }
            }
            Node::Internal { children, .. } => children,
        };

        let r = rng.gen_range(0..=SHAPE_DRAW_MAX);
        if r < 2 * depth || children.is_empty() {
            return NodeSelection {
                node: path,
                parent,
                stopped_on_leaf: false,
            };
        }

        let idx = rng.gen_range(0..children.len());
        parent = Some(path.clone());
        path.push(idx);
        node = &children[idx];
        depth += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::primitives::{ADD, NEG};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tree() -> Node {
        // (-(a) + (b + c))
        Node::Internal {
            operator: &ADD,
            children: vec![
                Node::Internal {
                    operator: &NEG,
                    children: vec![Node::leaf("a")],
                },
                Node::Internal {
                    operator: &ADD,
                    children: vec![Node::leaf("b"), Node::leaf("c")],
                },
            ],
        }
    }

    #[test]
    fn test_edit_point_is_always_internal() {
        let t = tree();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let selection = select_node(&t, &mut rng);
            let edit = selection.edit_point().unwrap();
            let node = t.get(edit).unwrap();
            assert!(!node.is_leaf());
        }
    }

    #[test]
    fn test_never_stops_on_internal_root() {
        let t = tree();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let selection = select_node(&t, &mut rng);
            assert!(!selection.node.is_empty());
            assert!(selection.parent.is_some());
        }
    }

    #[test]
    fn test_parent_is_prefix_of_node() {
        let t = tree();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let selection = select_node(&t, &mut rng);
            let parent = selection.parent.clone().unwrap();
            assert_eq!(&selection.node[..selection.node.len() - 1], parent.as_slice());
        }
    }

    #[test]
    fn test_leaf_root_has_no_edit_point() {
        let leaf = Node::leaf("x");
        let mut rng = StdRng::seed_from_u64(0);
        let selection = select_node(&leaf, &mut rng);
        assert!(selection.stopped_on_leaf);
        assert!(selection.parent.is_none());
        assert!(matches!(
            selection.edit_point(),
            Err(SymgpError::StructuralInvariant(_))
        ));
    }
}
