//! On-disk format of the trained risk model.
//!
//! The artifact is produced offline by the training pipeline and exported as
//! JSON: a multinomial logistic model over the fixed feature schema, with the
//! categorical `FamilySupport` column one-hot encoded and the label encoder's
//! class vocabulary stored alongside.

use std::path::Path;

use serde::{Deserialize, Serialize};

use ppd_core::models::demographics::FamilySupport;
use ppd_core::models::features::{FEATURE_NAMES, NUMERIC_FEATURE_NAMES};

use crate::error::PredictorError;

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    /// Column names the model was fitted on, in order.
    pub features: Vec<String>,
    /// Order of the one-hot `FamilySupport` columns.
    pub family_support_levels: Vec<String>,
    /// Label-encoder vocabulary; position is the encoded value.
    pub classes: Vec<String>,
    /// One entry per class, aligned with `classes`.
    pub class_weights: Vec<ClassWeights>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassWeights {
    pub intercept: f64,
    /// Weights for the numeric features, in `NUMERIC_FEATURE_NAMES` order.
    pub coefficients: Vec<f64>,
    /// Weights for each one-hot support column, in `family_support_levels` order.
    pub family_support: Vec<f64>,
}

impl ModelArtifact {
    pub fn from_json(raw: &str) -> Result<Self, PredictorError> {
        let artifact: Self = serde_json::from_str(raw)?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Read and validate an artifact. Any failure here means the predictor is
    /// unavailable; callers must not continue without one.
    pub fn load(path: &Path) -> Result<Self, PredictorError> {
        let unavailable = |reason: String| PredictorError::Unavailable {
            path: path.to_path_buf(),
            reason,
        };

        let raw = std::fs::read_to_string(path).map_err(|e| unavailable(e.to_string()))?;
        Self::from_json(&raw).map_err(|e| unavailable(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), PredictorError> {
        if self.format_version != FORMAT_VERSION {
            return Err(invalid(format!(
                "unsupported format version {} (expected {FORMAT_VERSION})",
                self.format_version
            )));
        }

        if self.features.iter().map(String::as_str).ne(FEATURE_NAMES) {
            return Err(invalid(format!(
                "feature schema {:?} does not match {:?}",
                self.features, FEATURE_NAMES
            )));
        }

        let mut seen = Vec::with_capacity(FamilySupport::ALL.len());
        for level in &self.family_support_levels {
            let parsed: FamilySupport = level
                .parse()
                .map_err(|_| invalid(format!("unknown family support level {level:?}")))?;
            if seen.contains(&parsed) {
                return Err(invalid(format!("duplicate family support level {level:?}")));
            }
            seen.push(parsed);
        }
        if seen.len() != FamilySupport::ALL.len() {
            return Err(invalid(format!(
                "expected {} family support levels, found {}",
                FamilySupport::ALL.len(),
                seen.len()
            )));
        }

        if self.classes.len() != self.class_weights.len() {
            return Err(invalid(format!(
                "{} classes but {} weight rows",
                self.classes.len(),
                self.class_weights.len()
            )));
        }

        for (class, weights) in self.classes.iter().zip(&self.class_weights) {
            if weights.coefficients.len() != NUMERIC_FEATURE_NAMES.len() {
                return Err(invalid(format!(
                    "class {class:?}: expected {} coefficients, found {}",
                    NUMERIC_FEATURE_NAMES.len(),
                    weights.coefficients.len()
                )));
            }
            if weights.family_support.len() != self.family_support_levels.len() {
                return Err(invalid(format!(
                    "class {class:?}: expected {} family support weights, found {}",
                    self.family_support_levels.len(),
                    weights.family_support.len()
                )));
            }
            let finite = std::iter::once(&weights.intercept)
                .chain(&weights.coefficients)
                .chain(&weights.family_support)
                .all(|w| w.is_finite());
            if !finite {
                return Err(invalid(format!("class {class:?}: non-finite weight")));
            }
        }

        Ok(())
    }
}

fn invalid(message: String) -> PredictorError {
    PredictorError::InvalidArtifact(message)
}
