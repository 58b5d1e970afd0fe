//! ppd-predictor
//!
//! The risk model behind the screening. The model is an external trained
//! artifact: this crate loads it once, feeds it the fixed feature record and
//! decodes its output into a [`RiskLabel`]. Nothing here knows where the
//! model's decision boundaries lie.

pub mod artifact;
pub mod encoder;
pub mod error;
pub mod linear;

use ppd_core::models::features::FeatureRecord;
use ppd_core::models::outcome::PredictionResult;
use ppd_core::models::risk::RiskLabel;

use error::PredictorError;

/// Raw model output before label decoding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPrediction {
    pub encoded: u8,
    pub probability: Option<f64>,
}

/// A loaded classifier plus its label decoder.
///
/// Implementations are immutable once loaded and shared read-only between
/// sessions.
pub trait Predictor: Send + Sync {
    fn predict(&self, record: &FeatureRecord) -> Result<RawPrediction, PredictorError>;

    /// Map an encoded class back to the label text the model was trained on.
    fn decode(&self, encoded: u8) -> Result<&str, PredictorError>;

    /// Predict and decode. An encoded class whose text is not one of the four
    /// known labels is an error rather than a best guess.
    fn classify(&self, record: &FeatureRecord) -> Result<PredictionResult, PredictorError> {
        let raw = self.predict(record)?;
        let text = self.decode(raw.encoded)?;
        let label: RiskLabel = text
            .parse()
            .map_err(|_| PredictorError::UnrecognizedLabel(text.to_string()))?;

        tracing::debug!(encoded = raw.encoded, label = %label, "prediction decoded");

        Ok(PredictionResult {
            label,
            encoded_value: raw.encoded,
            probability: raw.probability,
        })
    }
}
