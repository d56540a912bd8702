//! Risk model: forest plus metadata plus output transform.

use ndarray::{Array2, ArrayView2};

use crate::repr::Forest;

use super::meta::ModelMeta;
use super::transform::OutputTransform;

/// Violations of the model-level contract between forest and metadata.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelContractError {
    #[error("label count {labels} does not match forest output groups {groups}")]
    LabelArityMismatch { labels: usize, groups: usize },
    #[error("duplicate feature name {name:?} in schema")]
    DuplicateFeature { name: String },
    #[error("duplicate label {label:?}")]
    DuplicateLabel { label: String },
}

/// A loaded classifier, immutable for the lifetime of the process.
///
/// Holds the tree ensemble, the feature/label metadata, and the output
/// transform. Construction enforces the label/group contract so response
/// labeling can never drift from the forest's output order.
#[derive(Debug, Clone)]
pub struct RiskModel {
    forest: Forest,
    meta: ModelMeta,
    transform: OutputTransform,
}

impl RiskModel {
    /// Assemble a model, checking the metadata contract.
    pub fn new(
        forest: Forest,
        meta: ModelMeta,
        transform: OutputTransform,
    ) -> Result<Self, ModelContractError> {
        if meta.n_labels() != forest.n_groups() as usize {
            return Err(ModelContractError::LabelArityMismatch {
                labels: meta.n_labels(),
                groups: forest.n_groups() as usize,
            });
        }
        for (i, feature) in meta.features.iter().enumerate() {
            if meta.features[..i].iter().any(|f| f.name == feature.name) {
                return Err(ModelContractError::DuplicateFeature {
                    name: feature.name.clone(),
                });
            }
        }
        for (i, label) in meta.labels.iter().enumerate() {
            if meta.labels[..i].contains(label) {
                return Err(ModelContractError::DuplicateLabel {
                    label: label.clone(),
                });
            }
        }

        Ok(Self {
            forest,
            meta,
            transform,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The underlying forest.
    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// Feature schema and output labels.
    pub fn meta(&self) -> &ModelMeta {
        &self.meta
    }

    /// The persisted output transform.
    pub fn transform(&self) -> OutputTransform {
        self.transform
    }

    // =========================================================================
    // Prediction
    // =========================================================================

    /// Raw logits for one encoded feature row, one per output group.
    pub fn predict_margins(&self, features: &[f32]) -> Vec<f32> {
        debug_assert_eq!(features.len(), self.meta.n_features());
        self.forest.predict_row(features)
    }

    /// Transformed scores for one encoded feature row.
    ///
    /// With the sigmoid transform, each entry is a probability in (0, 1).
    pub fn predict(&self, features: &[f32]) -> Vec<f32> {
        let mut output = self.predict_margins(features);
        self.transform.apply(&mut output);
        output
    }

    /// Transformed scores paired with their labels, in contract order.
    pub fn labeled_scores(&self, features: &[f32]) -> Vec<(&str, f32)> {
        self.meta
            .labels
            .iter()
            .map(String::as_str)
            .zip(self.predict(features))
            .collect()
    }

    /// Transformed scores for a batch of rows, `[n_samples, n_groups]`.
    pub fn predict_batch(&self, features: ArrayView2<f32>) -> Array2<f32> {
        let mut output = self.forest.predict_batch(features);
        for mut row in output.rows_mut() {
            self.transform
                .apply(row.as_slice_mut().expect("row-major output is contiguous"));
        }
        output
    }
}
