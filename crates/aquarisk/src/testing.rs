//! Test fixtures: a small deterministic model over the full feature schema.
//!
//! The demo model mirrors the shipped artifact's shape (17 features, six
//! labeled output groups, mixed numeric/categorical splits) with hand-built
//! trees, so tests exercise every routing path without a training step.

use serde_json::json;

use crate::model::{FeatureSpec, ModelMeta, OutputTransform, RiskModel};
use crate::record::FeatureRecord;
use crate::repr::{CategorySets, Forest, SplitType, Tree};

/// Single numeric split: `feature < threshold` → left leaf, else right leaf.
pub fn numeric_stump(feature: u32, threshold: f32, left: f32, right: f32) -> Tree {
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

/// Single categorical split: categories in `right_set` → right leaf.
pub fn categorical_stump(feature: u32, right_set: Vec<u32>, left: f32, right: f32) -> Tree {
    Tree::new(
        vec![feature, 0, 0],
        vec![0.0, 0.0, 0.0],
        vec![1, 0, 0],
        vec![2, 0, 0],
        vec![true, true, true],
        vec![false, true, true],
        vec![0.0, left, right],
        vec![SplitType::Categorical, SplitType::Numeric, SplitType::Numeric],
        CategorySets::from_pairs(3, [(0, right_set)]),
    )
}

/// Feature schema matching the shipped model's input contract.
pub fn demo_meta() -> ModelMeta {
    ModelMeta::new(
        vec![
            FeatureSpec::numeric("age"),
            FeatureSpec::categorical("gender", ["female", "male"]),
            FeatureSpec::categorical("water_src", ["tap", "well", "spring", "river", "pond"]),
            FeatureSpec::categorical("sanitation", ["poor", "average", "good"]),
            FeatureSpec::numeric("vacc_typhoid"),
            FeatureSpec::numeric("vacc_hepA"),
            FeatureSpec::numeric("diarrhea_count"),
            FeatureSpec::numeric("vomit_count"),
            FeatureSpec::numeric("body_temp"),
            FeatureSpec::numeric("dehydration"),
            FeatureSpec::numeric("jaundice"),
            FeatureSpec::numeric("dark_urine"),
            FeatureSpec::numeric("pale_stool"),
            FeatureSpec::numeric("headache"),
            FeatureSpec::numeric("fatigue"),
            FeatureSpec::numeric("muscle_ache"),
            FeatureSpec::categorical("stool_type", ["normal", "loose", "watery", "bloody"]),
        ],
        vec![
            "disease_prob".into(),
            "cholera".into(),
            "typhoid".into(),
            "hepatitis_a".into(),
            "shigellosis".into(),
            "giardia".into(),
        ],
    )
}

/// A small six-group model with plausible margins.
pub fn demo_model() -> RiskModel {
    let mut forest = Forest::new(6).with_base_score(vec![-0.4, -1.2, -1.0, -1.5, -1.3, -1.1]);

    // disease_prob: fever and diarrhea burden
    forest.push_tree(numeric_stump(8, 38.0, -0.8, 1.2), 0);
    forest.push_tree(numeric_stump(6, 2.5, -0.4, 0.9), 0);

    // cholera: unsafe water sources (spring, river, pond) and watery stool
    forest.push_tree(categorical_stump(2, vec![2, 3, 4], -0.5, 0.8), 1);
    forest.push_tree(categorical_stump(16, vec![2], -0.3, 1.0), 1);

    // typhoid: unvaccinated
    forest.push_tree(numeric_stump(4, 0.5, 0.7, -0.9), 2);

    // hepatitis_a: unvaccinated, poor sanitation
    forest.push_tree(numeric_stump(5, 0.5, 0.8, -1.0), 3);
    forest.push_tree(categorical_stump(3, vec![0], -0.2, 0.6), 3);

    // shigellosis: dehydration
    forest.push_tree(numeric_stump(9, 0.5, -0.3, 0.5), 4);

    // giardia: well and pond water
    forest.push_tree(categorical_stump(2, vec![1, 4], -0.4, 0.7), 5);

    RiskModel::new(forest, demo_meta(), OutputTransform::Sigmoid)
        .expect("demo model satisfies its own contract")
}

/// The canonical example record (the client probe's payload).
pub fn demo_record() -> FeatureRecord {
    serde_json::from_value(json!({
        "age": 51,
        "gender": "female",
        "water_src": "spring",
        "sanitation": "good",
        "vacc_typhoid": 0,
        "vacc_hepA": 1,
        "diarrhea_count": 3,
        "vomit_count": 2,
        "body_temp": 40.16,
        "dehydration": 1,
        "jaundice": 0,
        "dark_urine": 0,
        "pale_stool": 0,
        "headache": 0,
        "fatigue": 1,
        "muscle_ache": 1,
        "stool_type": "watery"
    }))
    .expect("example record is a valid feature record")
}

/// The example record encoded against [`demo_meta`].
pub fn demo_row() -> Vec<f32> {
    demo_record()
        .encode(&demo_meta())
        .expect("example record matches the demo schema")
}
