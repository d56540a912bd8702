//! Schema types for model serialization.
//!
//! These types define the on-disk artifact format independent of runtime
//! types, so the format can evolve (and be validated) without leaking
//! storage concerns into the inference path. The artifact is a single JSON
//! document with an explicit `format_version`.

use serde::{Deserialize, Serialize};

use crate::model::OutputTransform;

/// Current artifact format version.
pub const FORMAT_VERSION: u32 = 1;

/// Feature type, tagged for readable JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeatureTypeSchema {
    /// Numeric feature.
    Numeric,
    /// Categorical feature with its encoding vocabulary (order matters).
    Categorical { categories: Vec<String> },
}

/// One named input feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSpecSchema {
    pub name: String,
    #[serde(flatten)]
    pub kind: FeatureTypeSchema,
}

/// Model metadata schema: input features and ordered output labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetaSchema {
    /// Output labels in group order. Length must equal `forest.n_groups`.
    pub labels: Vec<String>,
    /// Input features in model column order.
    pub features: Vec<FeatureSpecSchema>,
}

/// Category sets for one tree's categorical splits.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CategoriesSchema {
    /// Node indices that have category sets.
    pub node_indices: Vec<u32>,
    /// Category sets (one per node in `node_indices`).
    pub category_sets: Vec<Vec<u32>>,
}

impl CategoriesSchema {
    fn is_empty(&self) -> bool {
        self.node_indices.is_empty()
    }
}

fn is_categories_empty(c: &CategoriesSchema) -> bool {
    c.is_empty()
}

/// Tree schema (parallel arrays, one entry per node).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeSchema {
    /// Number of nodes (internal + leaves).
    pub num_nodes: u32,
    /// Split feature index for each node.
    pub split_indices: Vec<u32>,
    /// Split threshold for each node (unused for categorical/leaf nodes).
    pub thresholds: Vec<f64>,
    /// Left child index for each node (unused for leaves).
    pub children_left: Vec<u32>,
    /// Right child index for each node (unused for leaves).
    pub children_right: Vec<u32>,
    /// Default direction for missing values (true = left).
    pub default_left: Vec<bool>,
    /// Whether each node is a leaf.
    pub is_leaf: Vec<bool>,
    /// Leaf values (unused for internal nodes).
    pub leaf_values: Vec<f64>,
    /// Split types (0 = numeric, 1 = categorical).
    pub split_types: Vec<u8>,
    /// Category sets for categorical splits.
    #[serde(default, skip_serializing_if = "is_categories_empty")]
    pub categories: CategoriesSchema,
}

/// Forest schema (collection of trees).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestSchema {
    /// Trees in boosting order.
    pub trees: Vec<TreeSchema>,
    /// Output group assignment for each tree.
    pub tree_groups: Vec<u32>,
    /// Number of output groups.
    pub n_groups: u32,
    /// Base score per group.
    pub base_score: Vec<f64>,
}

/// Full model artifact schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifactSchema {
    /// Artifact format version; readers reject versions they do not know.
    pub format_version: u32,
    /// Feature schema and output labels.
    pub meta: ModelMetaSchema,
    /// Tree ensemble.
    pub forest: ForestSchema,
    /// Inference-time output transform.
    pub output_transform: OutputTransform,
}
