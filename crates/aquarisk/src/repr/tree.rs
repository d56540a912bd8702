//! Immutable SoA tree storage and traversal.

use super::categories::{float_to_category, CategorySets};
use super::node::SplitType;
use super::NodeId;

/// Structural validation errors for [`Tree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeValidationError {
    /// Tree has no nodes.
    EmptyTree,
    /// A child pointer references an out-of-bounds node.
    ChildOutOfBounds {
        node: NodeId,
        child: NodeId,
        n_nodes: usize,
    },
    /// A node references itself as a child.
    SelfLoop { node: NodeId },
    /// A node was reached by more than one path (cycle or DAG).
    DuplicateVisit { node: NodeId },
    /// A node exists in storage but is unreachable from the root.
    UnreachableNode { node: NodeId },
    /// A categorical split node has no category set.
    MissingCategorySet { node: NodeId },
}

/// Structure-of-Arrays decision tree for cache-friendly traversal.
///
/// All arrays are indexed by [`NodeId`], with node 0 as the root. Child
/// indices are local to the tree.
#[derive(Debug, Clone)]
pub struct Tree {
    split_indices: Box<[u32]>,
    split_thresholds: Box<[f32]>,
    left_children: Box<[u32]>,
    right_children: Box<[u32]>,
    default_left: Box<[bool]>,
    is_leaf: Box<[bool]>,
    leaf_values: Box<[f32]>,
    split_types: Box<[SplitType]>,
    categories: CategorySets,
}

impl Tree {
    /// Create a tree from parallel arrays.
    ///
    /// All arrays must have the same length (number of nodes). For trees
    /// without categorical splits, pass `SplitType::Numeric` for all nodes
    /// and `CategorySets::empty()`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        split_indices: Vec<u32>,
        split_thresholds: Vec<f32>,
        left_children: Vec<u32>,
        right_children: Vec<u32>,
        default_left: Vec<bool>,
        is_leaf: Vec<bool>,
        leaf_values: Vec<f32>,
        split_types: Vec<SplitType>,
        categories: CategorySets,
    ) -> Self {
        let n_nodes = split_indices.len();
        debug_assert_eq!(n_nodes, split_thresholds.len());
        debug_assert_eq!(n_nodes, left_children.len());
        debug_assert_eq!(n_nodes, right_children.len());
        debug_assert_eq!(n_nodes, default_left.len());
        debug_assert_eq!(n_nodes, is_leaf.len());
        debug_assert_eq!(n_nodes, leaf_values.len());
        debug_assert_eq!(n_nodes, split_types.len());

        Self {
            split_indices: split_indices.into_boxed_slice(),
            split_thresholds: split_thresholds.into_boxed_slice(),
            left_children: left_children.into_boxed_slice(),
            right_children: right_children.into_boxed_slice(),
            default_left: default_left.into_boxed_slice(),
            is_leaf: is_leaf.into_boxed_slice(),
            leaf_values: leaf_values.into_boxed_slice(),
            split_types: split_types.into_boxed_slice(),
            categories,
        }
    }

    /// A single-leaf tree with a constant value.
    pub fn leaf(value: f32) -> Self {
        Self::new(
            vec![0],
            vec![0.0],
            vec![0],
            vec![0],
            vec![true],
            vec![true],
            vec![value],
            vec![SplitType::Numeric],
            CategorySets::empty(),
        )
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of nodes in the tree.
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.is_leaf.len()
    }

    /// Check if a node is a leaf.
    #[inline]
    pub fn is_leaf(&self, node: NodeId) -> bool {
        self.is_leaf[node as usize]
    }

    /// Feature index for a split node.
    #[inline]
    pub fn split_index(&self, node: NodeId) -> u32 {
        self.split_indices[node as usize]
    }

    /// Threshold for a numeric split node.
    #[inline]
    pub fn split_threshold(&self, node: NodeId) -> f32 {
        self.split_thresholds[node as usize]
    }

    /// Left child index.
    #[inline]
    pub fn left_child(&self, node: NodeId) -> NodeId {
        self.left_children[node as usize]
    }

    /// Right child index.
    #[inline]
    pub fn right_child(&self, node: NodeId) -> NodeId {
        self.right_children[node as usize]
    }

    /// Default direction for missing values.
    #[inline]
    pub fn default_left(&self, node: NodeId) -> bool {
        self.default_left[node as usize]
    }

    /// Split type (numeric or categorical).
    #[inline]
    pub fn split_type(&self, node: NodeId) -> SplitType {
        self.split_types[node as usize]
    }

    /// Leaf value at a leaf node.
    #[inline]
    pub fn leaf_value(&self, node: NodeId) -> f32 {
        self.leaf_values[node as usize]
    }

    /// Category sets for categorical splits.
    #[inline]
    pub fn categories(&self) -> &CategorySets {
        &self.categories
    }

    // =========================================================================
    // Traversal
    // =========================================================================

    /// Traverse from the root to a leaf for one feature row.
    ///
    /// NaN values take the node's default direction. Out-of-range feature
    /// indices read as NaN.
    #[inline]
    pub fn traverse_to_leaf(&self, features: &[f32]) -> NodeId {
        let mut node: NodeId = 0;

        while !self.is_leaf(node) {
            let feat_idx = self.split_index(node) as usize;
            let fvalue = features.get(feat_idx).copied().unwrap_or(f32::NAN);

            node = if fvalue.is_nan() {
                if self.default_left(node) {
                    self.left_child(node)
                } else {
                    self.right_child(node)
                }
            } else {
                match self.split_type(node) {
                    SplitType::Numeric => {
                        if fvalue < self.split_threshold(node) {
                            self.left_child(node)
                        } else {
                            self.right_child(node)
                        }
                    }
                    SplitType::Categorical => {
                        let category = float_to_category(fvalue);
                        if self.categories.category_goes_right(node, category) {
                            self.right_child(node)
                        } else {
                            self.left_child(node)
                        }
                    }
                }
            };
        }

        node
    }

    /// Leaf value reached by one feature row.
    pub fn predict_row(&self, features: &[f32]) -> f32 {
        self.leaf_value(self.traverse_to_leaf(features))
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Validate structural invariants.
    ///
    /// Checks reachability, child bounds, cycles, and that every categorical
    /// split node carries a category set. Intended for artifact loading and
    /// tests.
    pub fn validate(&self) -> Result<(), TreeValidationError> {
        let n_nodes = self.n_nodes();
        if n_nodes == 0 {
            return Err(TreeValidationError::EmptyTree);
        }

        let mut seen = vec![false; n_nodes];
        let mut stack: Vec<NodeId> = vec![0];

        while let Some(node) = stack.pop() {
            let idx = node as usize;
            if seen[idx] {
                // Reaching a node twice covers both cycles and shared subtrees.
                return Err(TreeValidationError::DuplicateVisit { node });
            }
            seen[idx] = true;

            if self.is_leaf(node) {
                continue;
            }

            if self.split_type(node) == SplitType::Categorical && self.categories.set(node).is_none()
            {
                return Err(TreeValidationError::MissingCategorySet { node });
            }

            for child in [self.left_child(node), self.right_child(node)] {
                if child == node {
                    return Err(TreeValidationError::SelfLoop { node });
                }
                if child as usize >= n_nodes {
                    return Err(TreeValidationError::ChildOutOfBounds {
                        node,
                        child,
                        n_nodes,
                    });
                }
                stack.push(child);
            }
        }

        if let Some(node) = seen.iter().position(|&s| !s) {
            return Err(TreeValidationError::UnreachableNode {
                node: node as NodeId,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// root: feat0 < threshold ? left leaf : right leaf
    fn stump(feature: u32, threshold: f32, left: f32, right: f32) -> Tree {
        Tree::new(
            vec![feature, 0, 0],
            vec![threshold, 0.0, 0.0],
            vec![1, 0, 0],
            vec![2, 0, 0],
            vec![true, true, true],
            vec![false, true, true],
            vec![0.0, left, right],
            vec![SplitType::Numeric; 3],
            CategorySets::empty(),
        )
    }

    fn categorical_stump(feature: u32, right_categories: Vec<u32>, left: f32, right: f32) -> Tree {
        Tree::new(
            vec![feature, 0, 0],
            vec![0.0, 0.0, 0.0],
            vec![1, 0, 0],
            vec![2, 0, 0],
            vec![true, true, true],
            vec![false, true, true],
            vec![0.0, left, right],
            vec![SplitType::Categorical, SplitType::Numeric, SplitType::Numeric],
            CategorySets::from_pairs(3, [(0, right_categories)]),
        )
    }

    #[test]
    fn numeric_split_routing() {
        let tree = stump(0, 0.5, 1.0, 2.0);
        assert_eq!(tree.predict_row(&[0.3]), 1.0);
        assert_eq!(tree.predict_row(&[0.7]), 2.0);
        // Boundary goes right.
        assert_eq!(tree.predict_row(&[0.5]), 2.0);
    }

    #[test]
    fn missing_value_takes_default_direction() {
        let tree = stump(0, 0.5, 1.0, 2.0);
        assert_eq!(tree.predict_row(&[f32::NAN]), 1.0);
        // Short row reads as missing.
        assert_eq!(tree.predict_row(&[]), 1.0);
    }

    #[test]
    fn categorical_split_routing() {
        let tree = categorical_stump(0, vec![1, 3], -1.0, 1.0);
        assert_eq!(tree.predict_row(&[0.0]), -1.0);
        assert_eq!(tree.predict_row(&[1.0]), 1.0);
        assert_eq!(tree.predict_row(&[2.0]), -1.0);
        assert_eq!(tree.predict_row(&[3.0]), 1.0);
    }

    #[test]
    fn single_leaf_tree() {
        let tree = Tree::leaf(0.25);
        assert_eq!(tree.predict_row(&[1.0, 2.0]), 0.25);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn validate_accepts_well_formed_tree() {
        assert!(stump(0, 0.5, 1.0, 2.0).validate().is_ok());
        assert!(categorical_stump(2, vec![0], 0.1, 0.2).validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_bounds_child() {
        let tree = Tree::new(
            vec![0, 0],
            vec![0.5, 0.0],
            vec![1, 0],
            vec![9, 0],
            vec![true, true],
            vec![false, true],
            vec![0.0, 1.0],
            vec![SplitType::Numeric; 2],
            CategorySets::empty(),
        );
        assert_eq!(
            tree.validate(),
            Err(TreeValidationError::ChildOutOfBounds {
                node: 0,
                child: 9,
                n_nodes: 2
            })
        );
    }

    #[test]
    fn validate_rejects_self_loop() {
        let tree = Tree::new(
            vec![0],
            vec![0.5],
            vec![0],
            vec![0],
            vec![true],
            vec![false],
            vec![0.0],
            vec![SplitType::Numeric],
            CategorySets::empty(),
        );
        assert_eq!(tree.validate(), Err(TreeValidationError::SelfLoop { node: 0 }));
    }

    #[test]
    fn validate_rejects_shared_subtree() {
        // Both children of the root point at the same leaf.
        let tree = Tree::new(
            vec![0, 0],
            vec![0.5, 0.0],
            vec![1, 0],
            vec![1, 0],
            vec![true, true],
            vec![false, true],
            vec![0.0, 1.0],
            vec![SplitType::Numeric; 2],
            CategorySets::empty(),
        );
        assert_eq!(
            tree.validate(),
            Err(TreeValidationError::DuplicateVisit { node: 1 })
        );
    }

    #[test]
    fn validate_rejects_unreachable_node() {
        let tree = Tree::new(
            vec![0, 0],
            vec![0.0, 0.0],
            vec![0, 0],
            vec![0, 0],
            vec![true, true],
            vec![true, true],
            vec![1.0, 2.0],
            vec![SplitType::Numeric; 2],
            CategorySets::empty(),
        );
        assert_eq!(
            tree.validate(),
            Err(TreeValidationError::UnreachableNode { node: 1 })
        );
    }

    #[test]
    fn validate_rejects_categorical_split_without_set() {
        let tree = Tree::new(
            vec![0, 0, 0],
            vec![0.0, 0.0, 0.0],
            vec![1, 0, 0],
            vec![2, 0, 0],
            vec![true, true, true],
            vec![false, true, true],
            vec![0.0, 1.0, 2.0],
            vec![SplitType::Categorical, SplitType::Numeric, SplitType::Numeric],
            CategorySets::empty(),
        );
        assert_eq!(
            tree.validate(),
            Err(TreeValidationError::MissingCategorySet { node: 0 })
        );
    }
}
