//! Output transformation for inference.
//!
//! Models persist an [`OutputTransform`] next to the forest so prediction
//! never needs to know the training objective. The shipped disease model
//! uses [`Sigmoid`](OutputTransform::Sigmoid): each group's logit becomes an
//! independent probability in (0, 1).

use serde::{Deserialize, Serialize};

/// Inference-time output transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputTransform {
    /// No transformation; output = margin.
    #[default]
    Identity,
    /// Logistic sigmoid: output = 1 / (1 + exp(-margin)).
    Sigmoid,
}

impl OutputTransform {
    /// Apply the transformation elementwise in place.
    ///
    /// NaN inputs propagate through without panics.
    #[inline]
    pub fn apply(&self, margins: &mut [f32]) {
        match self {
            OutputTransform::Identity => {}
            OutputTransform::Sigmoid => {
                for x in margins.iter_mut() {
                    *x = sigmoid(*x);
                }
            }
        }
    }
}

/// Numerically stable sigmoid.
/// Clamps input to [-500, 500] to prevent overflow in exp.
#[inline]
pub fn sigmoid(x: f32) -> f32 {
    let clamped = x.clamp(-500.0, 500.0);
    if clamped >= 0.0 {
        1.0 / (1.0 + (-clamped).exp())
    } else {
        let e = clamped.exp();
        e / (1.0 + e)
    }
}
