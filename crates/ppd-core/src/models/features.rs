//! The feature record handed to the risk predictor.
//!
//! Field names and order are a hard compatibility boundary with the model
//! artifact: `Age, FamilySupport, Q1..Q10, EPDS_Score`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::demographics::{Age, FamilySupport};
use super::score::EpdsScore;

/// Feature names in schema order.
pub const FEATURE_NAMES: [&str; 13] = [
    "Age",
    "FamilySupport",
    "Q1",
    "Q2",
    "Q3",
    "Q4",
    "Q5",
    "Q6",
    "Q7",
    "Q8",
    "Q9",
    "Q10",
    "EPDS_Score",
];

/// Names of the numeric features, in the order returned by
/// [`FeatureRecord::numeric_features`].
pub const NUMERIC_FEATURE_NAMES: [&str; 12] = [
    "Age",
    "Q1",
    "Q2",
    "Q3",
    "Q4",
    "Q5",
    "Q6",
    "Q7",
    "Q8",
    "Q9",
    "Q10",
    "EPDS_Score",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FeatureRecord {
    #[serde(rename = "Age")]
    pub age: u8,
    #[serde(rename = "FamilySupport")]
    pub family_support: FamilySupport,
    #[serde(rename = "Q1")]
    pub q1: u8,
    #[serde(rename = "Q2")]
    pub q2: u8,
    #[serde(rename = "Q3")]
    pub q3: u8,
    #[serde(rename = "Q4")]
    pub q4: u8,
    #[serde(rename = "Q5")]
    pub q5: u8,
    #[serde(rename = "Q6")]
    pub q6: u8,
    #[serde(rename = "Q7")]
    pub q7: u8,
    #[serde(rename = "Q8")]
    pub q8: u8,
    #[serde(rename = "Q9")]
    pub q9: u8,
    #[serde(rename = "Q10")]
    pub q10: u8,
    #[serde(rename = "EPDS_Score")]
    pub epds_score: u8,
}

impl FeatureRecord {
    pub fn new(age: Age, family_support: FamilySupport, items: [u8; 10], score: EpdsScore) -> Self {
        let [q1, q2, q3, q4, q5, q6, q7, q8, q9, q10] = items;
        Self {
            age: age.years(),
            family_support,
            q1,
            q2,
            q3,
            q4,
            q5,
            q6,
            q7,
            q8,
            q9,
            q10,
            epds_score: score.value(),
        }
    }

    pub fn items(&self) -> [u8; 10] {
        [
            self.q1, self.q2, self.q3, self.q4, self.q5, self.q6, self.q7, self.q8, self.q9,
            self.q10,
        ]
    }

    /// Numeric features as floats, ordered as [`NUMERIC_FEATURE_NAMES`].
    pub fn numeric_features(&self) -> [f64; 12] {
        let mut out = [0.0; 12];
        out[0] = f64::from(self.age);
        for (slot, code) in out[1..11].iter_mut().zip(self.items()) {
            *slot = f64::from(code);
        }
        out[11] = f64::from(self.epds_score);
        out
    }
}
