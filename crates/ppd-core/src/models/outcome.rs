use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::features::FeatureRecord;
use super::risk::{RiskLabel, RiskPresentation};
use super::score::EpdsScore;

/// Decoded output of the risk predictor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PredictionResult {
    pub label: RiskLabel,
    /// Index the model produced before label decoding.
    pub encoded_value: u8,
    /// Probability the model assigned to `label`, if it reports one.
    pub probability: Option<f64>,
}

/// A completed screening: what was sent to the model and what came back.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScreeningOutcome {
    pub session_id: Uuid,
    pub features: FeatureRecord,
    pub epds_score: EpdsScore,
    pub prediction: PredictionResult,
    pub predicted_at: jiff::Timestamp,
}

impl ScreeningOutcome {
    pub fn presentation(&self) -> RiskPresentation {
        self.prediction.label.presentation()
    }
}
