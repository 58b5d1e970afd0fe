use std::path::Path;

use ppd_core::models::demographics::FamilySupport;
use ppd_core::models::features::FeatureRecord;

use crate::artifact::{ClassWeights, ModelArtifact};
use crate::encoder::LabelEncoder;
use crate::error::PredictorError;
use crate::{Predictor, RawPrediction};

/// Multinomial linear classifier: the class with the highest score wins, and
/// the reported probability is its softmax share.
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    support_levels: Vec<FamilySupport>,
    weights: Vec<ClassWeights>,
    encoder: LabelEncoder,
}

impl LinearClassifier {
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, PredictorError> {
        artifact.validate()?;

        let support_levels = artifact
            .family_support_levels
            .iter()
            .map(|level| {
                level
                    .parse()
                    .map_err(|_| PredictorError::InvalidArtifact(level.clone()))
            })
            .collect::<Result<Vec<FamilySupport>, _>>()?;

        Ok(Self {
            support_levels,
            weights: artifact.class_weights,
            encoder: LabelEncoder::new(artifact.classes)?,
        })
    }

    pub fn load(path: &Path) -> Result<Self, PredictorError> {
        let artifact = ModelArtifact::load(path)?;
        let model = Self::from_artifact(artifact).map_err(|e| PredictorError::Unavailable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        tracing::info!(
            path = %path.display(),
            classes = model.encoder.len(),
            "risk model loaded"
        );
        Ok(model)
    }

    pub fn class_count(&self) -> usize {
        self.encoder.len()
    }

    fn class_scores(&self, record: &FeatureRecord) -> Vec<f64> {
        let numeric = record.numeric_features();
        self.weights
            .iter()
            .map(|w| {
                let linear: f64 = w
                    .coefficients
                    .iter()
                    .zip(numeric.iter())
                    .map(|(c, x)| c * x)
                    .sum();
                let support: f64 = self
                    .support_levels
                    .iter()
                    .zip(&w.family_support)
                    .filter(|(level, _)| **level == record.family_support)
                    .map(|(_, weight)| weight)
                    .sum();
                w.intercept + linear + support
            })
            .collect()
    }
}

impl Predictor for LinearClassifier {
    fn predict(&self, record: &FeatureRecord) -> Result<RawPrediction, PredictorError> {
        let scores = self.class_scores(record);

        // First maximum wins ties, matching argmax.
        let (best, best_score) = scores.iter().copied().enumerate().fold(
            (0usize, f64::NEG_INFINITY),
            |(bi, bs), (i, s)| if s > bs { (i, s) } else { (bi, bs) },
        );

        let denominator: f64 = scores.iter().map(|s| (s - best_score).exp()).sum();
        let probability = (denominator.is_finite() && denominator > 0.0).then(|| 1.0 / denominator);

        let encoded = u8::try_from(best).map_err(|_| PredictorError::EncodedOutOfRange {
            encoded: u8::MAX,
            classes: scores.len(),
        })?;

        Ok(RawPrediction {
            encoded,
            probability,
        })
    }

    fn decode(&self, encoded: u8) -> Result<&str, PredictorError> {
        self.encoder.inverse_transform(encoded)
    }
}
