//! Decision tree ensemble representation.
//!
//! Inference-only structure-of-arrays storage for gradient-boosted trees:
//! - [`Tree`]: immutable SoA tree with numeric and categorical splits
//! - [`Forest`]: trees plus group assignments and per-group base scores
//!
//! Missing feature values are represented as `f32::NAN` and routed through
//! each node's default direction.

/// Node identifier: an index into a tree's SoA arrays.
pub type NodeId = u32;

pub mod categories;
pub mod forest;
pub mod node;
pub mod tree;

pub use categories::{float_to_category, CategorySets};
pub use forest::{Forest, ForestValidationError};
pub use node::SplitType;
pub use tree::{Tree, TreeValidationError};
