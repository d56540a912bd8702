//! Model metadata.
//!
//! The metadata carries the two contracts the artifact must make explicit:
//! the input feature schema (names, types, categorical vocabularies) and the
//! ordered output label list. Both travel with the serialized model so the
//! service never relies on positional assumptions baked into code.

/// Feature type information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureType {
    /// Numeric feature (counts, flags, and measurements alike).
    Numeric,
    /// Categorical feature with its value vocabulary.
    ///
    /// Vocabulary order defines the integer encoding the trees were built
    /// against; it is part of the model contract, not a presentation detail.
    Categorical { categories: Vec<String> },
}

impl FeatureType {
    /// True for categorical features.
    pub fn is_categorical(&self) -> bool {
        matches!(self, FeatureType::Categorical { .. })
    }

    /// Number of categories, if categorical.
    pub fn n_categories(&self) -> Option<usize> {
        match self {
            FeatureType::Numeric => None,
            FeatureType::Categorical { categories } => Some(categories.len()),
        }
    }
}

/// One named input feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSpec {
    pub name: String,
    pub kind: FeatureType,
}

impl FeatureSpec {
    /// A numeric feature.
    pub fn numeric(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FeatureType::Numeric,
        }
    }

    /// A categorical feature with the given vocabulary.
    pub fn categorical(
        name: impl Into<String>,
        categories: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: FeatureType::Categorical {
                categories: categories.into_iter().map(Into::into).collect(),
            },
        }
    }
}

/// Shared model metadata: input schema and output labels.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModelMeta {
    /// Input features in model column order.
    pub features: Vec<FeatureSpec>,
    /// Output labels in group order (one per forest output group).
    pub labels: Vec<String>,
}

impl ModelMeta {
    pub fn new(features: Vec<FeatureSpec>, labels: Vec<String>) -> Self {
        Self { features, labels }
    }

    /// Number of input features.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.features.len()
    }

    /// Number of output labels.
    #[inline]
    pub fn n_labels(&self) -> usize {
        self.labels.len()
    }

    /// Look up a feature by name.
    pub fn feature(&self, name: &str) -> Option<&FeatureSpec> {
        self.features.iter().find(|f| f.name == name)
    }
}
