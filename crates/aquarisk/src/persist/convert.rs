//! Conversion between runtime types and schema types.
//!
//! Runtime → schema is lossless and infallible. Schema → runtime performs
//! the full artifact validation: parallel-array consistency, structural
//! tree/forest checks, feature-index and category-range checks against the
//! metadata, and the label/group contract.

use crate::model::{
    FeatureSpec, FeatureType, ModelContractError, ModelMeta, RiskModel,
};
use crate::repr::{CategorySets, Forest, ForestValidationError, SplitType, Tree};

use super::schema::{
    CategoriesSchema, FeatureSpecSchema, FeatureTypeSchema, ForestSchema, ModelArtifactSchema,
    ModelMetaSchema, TreeSchema, FORMAT_VERSION,
};

/// Artifact validation failures (schema → runtime).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("tree {tree}: {field} has length {actual}, expected {expected}")]
    ArrayLenMismatch {
        tree: usize,
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("forest has {trees} trees but {groups} group assignments")]
    TreeGroupsLenMismatch { trees: usize, groups: usize },
    #[error("forest is structurally invalid: {error:?}")]
    InvalidForest { error: ForestValidationError },
    #[error("tree {tree} node {node}: split feature {feature} out of range ({n_features} features)")]
    SplitIndexOutOfRange {
        tree: usize,
        node: u32,
        feature: u32,
        n_features: usize,
    },
    #[error("tree {tree} node {node}: categorical split on numeric feature {name:?}")]
    CategoricalSplitOnNumericFeature { tree: usize, node: u32, name: String },
    #[error(
        "tree {tree} node {node}: category {category} out of range for feature {name:?} ({n_categories} categories)"
    )]
    CategoryOutOfRange {
        tree: usize,
        node: u32,
        category: u32,
        name: String,
        n_categories: usize,
    },
    #[error(transparent)]
    Contract(#[from] ModelContractError),
}

// =============================================================================
// Runtime -> schema
// =============================================================================

impl From<&FeatureSpec> for FeatureSpecSchema {
    fn from(spec: &FeatureSpec) -> Self {
        Self {
            name: spec.name.clone(),
            kind: match &spec.kind {
                FeatureType::Numeric => FeatureTypeSchema::Numeric,
                FeatureType::Categorical { categories } => FeatureTypeSchema::Categorical {
                    categories: categories.clone(),
                },
            },
        }
    }
}

impl From<&ModelMeta> for ModelMetaSchema {
    fn from(meta: &ModelMeta) -> Self {
        Self {
            labels: meta.labels.clone(),
            features: meta.features.iter().map(Into::into).collect(),
        }
    }
}

impl From<&Tree> for TreeSchema {
    fn from(tree: &Tree) -> Self {
        let n_nodes = tree.n_nodes();
        let mut schema = TreeSchema {
            num_nodes: n_nodes as u32,
            split_indices: Vec::with_capacity(n_nodes),
            thresholds: Vec::with_capacity(n_nodes),
            children_left: Vec::with_capacity(n_nodes),
            children_right: Vec::with_capacity(n_nodes),
            default_left: Vec::with_capacity(n_nodes),
            is_leaf: Vec::with_capacity(n_nodes),
            leaf_values: Vec::with_capacity(n_nodes),
            split_types: Vec::with_capacity(n_nodes),
            categories: CategoriesSchema::default(),
        };

        for node in 0..n_nodes as u32 {
            schema.split_indices.push(tree.split_index(node));
            schema.thresholds.push(tree.split_threshold(node) as f64);
            schema.children_left.push(tree.left_child(node));
            schema.children_right.push(tree.right_child(node));
            schema.default_left.push(tree.default_left(node));
            schema.is_leaf.push(tree.is_leaf(node));
            schema.leaf_values.push(tree.leaf_value(node) as f64);
            schema.split_types.push(tree.split_type(node) as u8);
        }

        for (node, set) in tree.categories().iter() {
            schema.categories.node_indices.push(node);
            schema.categories.category_sets.push(set.to_vec());
        }

        schema
    }
}

impl From<&Forest> for ForestSchema {
    fn from(forest: &Forest) -> Self {
        Self {
            trees: forest
                .trees_with_groups()
                .map(|(tree, _)| tree.into())
                .collect(),
            tree_groups: forest.tree_groups().to_vec(),
            n_groups: forest.n_groups(),
            base_score: forest.base_score().iter().map(|&s| s as f64).collect(),
        }
    }
}

impl From<&RiskModel> for ModelArtifactSchema {
    fn from(model: &RiskModel) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            meta: model.meta().into(),
            forest: model.forest().into(),
            output_transform: model.transform(),
        }
    }
}

// =============================================================================
// Schema -> runtime
// =============================================================================

impl From<FeatureSpecSchema> for FeatureSpec {
    fn from(schema: FeatureSpecSchema) -> Self {
        Self {
            name: schema.name,
            kind: match schema.kind {
                FeatureTypeSchema::Numeric => FeatureType::Numeric,
                FeatureTypeSchema::Categorical { categories } => {
                    FeatureType::Categorical { categories }
                }
            },
        }
    }
}

impl From<ModelMetaSchema> for ModelMeta {
    fn from(schema: ModelMetaSchema) -> Self {
        Self {
            labels: schema.labels,
            features: schema.features.into_iter().map(Into::into).collect(),
        }
    }
}

fn tree_from_schema(tree_idx: usize, schema: TreeSchema) -> Result<Tree, ValidationError> {
    let n_nodes = schema.num_nodes as usize;
    let check = |field: &'static str, actual: usize| {
        if actual != n_nodes {
            Err(ValidationError::ArrayLenMismatch {
                tree: tree_idx,
                field,
                expected: n_nodes,
                actual,
            })
        } else {
            Ok(())
        }
    };
    check("split_indices", schema.split_indices.len())?;
    check("thresholds", schema.thresholds.len())?;
    check("children_left", schema.children_left.len())?;
    check("children_right", schema.children_right.len())?;
    check("default_left", schema.default_left.len())?;
    check("is_leaf", schema.is_leaf.len())?;
    check("leaf_values", schema.leaf_values.len())?;
    check("split_types", schema.split_types.len())?;

    if schema.categories.node_indices.len() != schema.categories.category_sets.len() {
        return Err(ValidationError::ArrayLenMismatch {
            tree: tree_idx,
            field: "category_sets",
            expected: schema.categories.node_indices.len(),
            actual: schema.categories.category_sets.len(),
        });
    }

    let categories = CategorySets::from_pairs(
        n_nodes,
        schema
            .categories
            .node_indices
            .into_iter()
            .zip(schema.categories.category_sets),
    );

    Ok(Tree::new(
        schema.split_indices,
        schema.thresholds.into_iter().map(|t| t as f32).collect(),
        schema.children_left,
        schema.children_right,
        schema.default_left,
        schema.is_leaf,
        schema.leaf_values.into_iter().map(|v| v as f32).collect(),
        schema.split_types.into_iter().map(SplitType::from).collect(),
        categories,
    ))
}

fn forest_from_schema(schema: ForestSchema) -> Result<Forest, ValidationError> {
    if schema.trees.len() != schema.tree_groups.len() {
        return Err(ValidationError::TreeGroupsLenMismatch {
            trees: schema.trees.len(),
            groups: schema.tree_groups.len(),
        });
    }

    let mut forest = Forest::new(schema.n_groups)
        .with_base_score(schema.base_score.into_iter().map(|s| s as f32).collect());

    for (idx, (tree, group)) in schema
        .trees
        .into_iter()
        .zip(schema.tree_groups)
        .enumerate()
    {
        forest.push_tree(tree_from_schema(idx, tree)?, group);
    }

    forest
        .validate()
        .map_err(|error| ValidationError::InvalidForest { error })?;

    Ok(forest)
}

/// Check every split against the feature schema: indices in range,
/// categorical splits only on categorical features, categories within the
/// feature's vocabulary.
fn validate_splits_against_meta(forest: &Forest, meta: &ModelMeta) -> Result<(), ValidationError> {
    let n_features = meta.n_features();

    for (tree_idx, (tree, _)) in forest.trees_with_groups().enumerate() {
        for node in 0..tree.n_nodes() as u32 {
            if tree.is_leaf(node) {
                continue;
            }
            let feature = tree.split_index(node);
            let spec = meta.features.get(feature as usize).ok_or(
                ValidationError::SplitIndexOutOfRange {
                    tree: tree_idx,
                    node,
                    feature,
                    n_features,
                },
            )?;

            if tree.split_type(node) == SplitType::Categorical {
                let n_categories = spec.kind.n_categories().ok_or_else(|| {
                    ValidationError::CategoricalSplitOnNumericFeature {
                        tree: tree_idx,
                        node,
                        name: spec.name.clone(),
                    }
                })?;
                if let Some(set) = tree.categories().set(node) {
                    for &category in set {
                        if category as usize >= n_categories {
                            return Err(ValidationError::CategoryOutOfRange {
                                tree: tree_idx,
                                node,
                                category,
                                name: spec.name.clone(),
                                n_categories,
                            });
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

/// Build a validated [`RiskModel`] from a parsed artifact.
pub fn model_from_artifact(schema: ModelArtifactSchema) -> Result<RiskModel, ValidationError> {
    let meta: ModelMeta = schema.meta.into();
    let forest = forest_from_schema(schema.forest)?;
    validate_splits_against_meta(&forest, &meta)?;
    Ok(RiskModel::new(forest, meta, schema.output_transform)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OutputTransform;
    use crate::testing;

    #[test]
    fn roundtrip_preserves_predictions() {
        let model = testing::demo_model();
        let row = testing::demo_row();

        let artifact: ModelArtifactSchema = (&model).into();
        let restored = model_from_artifact(artifact).unwrap();

        assert_eq!(model.predict_margins(&row), restored.predict_margins(&row));
        assert_eq!(model.meta(), restored.meta());
        assert_eq!(model.transform(), restored.transform());
    }

    #[test]
    fn rejects_array_len_mismatch() {
        let mut artifact: ModelArtifactSchema = (&testing::demo_model()).into();
        artifact.forest.trees[0].thresholds.pop();
        let err = model_from_artifact(artifact).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::ArrayLenMismatch { tree: 0, field: "thresholds", .. }
        ));
    }

    #[test]
    fn rejects_tree_groups_len_mismatch() {
        let mut artifact: ModelArtifactSchema = (&testing::demo_model()).into();
        artifact.forest.tree_groups.pop();
        assert!(matches!(
            model_from_artifact(artifact).unwrap_err(),
            ValidationError::TreeGroupsLenMismatch { .. }
        ));
    }

    #[test]
    fn rejects_structural_damage() {
        let mut artifact: ModelArtifactSchema = (&testing::demo_model()).into();
        // Point a child past the end of the node arrays.
        artifact.forest.trees[0].children_right[0] = 999;
        assert!(matches!(
            model_from_artifact(artifact).unwrap_err(),
            ValidationError::InvalidForest { .. }
        ));
    }

    #[test]
    fn rejects_split_index_out_of_range() {
        let mut artifact: ModelArtifactSchema = (&testing::demo_model()).into();
        artifact.forest.trees[0].split_indices[0] = 200;
        assert!(matches!(
            model_from_artifact(artifact).unwrap_err(),
            ValidationError::SplitIndexOutOfRange { feature: 200, .. }
        ));
    }

    #[test]
    fn rejects_categorical_split_on_numeric_feature() {
        let mut artifact: ModelArtifactSchema = (&testing::demo_model()).into();
        // Retarget a categorical split at the numeric age column.
        let tree = artifact
            .forest
            .trees
            .iter_mut()
            .find(|t| !t.categories.node_indices.is_empty())
            .expect("demo model has a categorical split");
        tree.split_indices[tree.categories.node_indices[0] as usize] = 0;
        assert!(matches!(
            model_from_artifact(artifact).unwrap_err(),
            ValidationError::CategoricalSplitOnNumericFeature { .. }
        ));
    }

    #[test]
    fn rejects_category_out_of_vocabulary() {
        let mut artifact: ModelArtifactSchema = (&testing::demo_model()).into();
        let tree = artifact
            .forest
            .trees
            .iter_mut()
            .find(|t| !t.categories.node_indices.is_empty())
            .expect("demo model has a categorical split");
        tree.categories.category_sets[0].push(42);
        assert!(matches!(
            model_from_artifact(artifact).unwrap_err(),
            ValidationError::CategoryOutOfRange { category: 42, .. }
        ));
    }

    #[test]
    fn rejects_label_arity_mismatch() {
        let mut artifact: ModelArtifactSchema = (&testing::demo_model()).into();
        artifact.meta.labels.pop();
        assert!(matches!(
            model_from_artifact(artifact).unwrap_err(),
            ValidationError::Contract(ModelContractError::LabelArityMismatch { .. })
        ));
    }

    #[test]
    fn transform_survives_roundtrip() {
        let artifact: ModelArtifactSchema = (&testing::demo_model()).into();
        assert_eq!(artifact.output_transform, OutputTransform::Sigmoid);
    }
}
