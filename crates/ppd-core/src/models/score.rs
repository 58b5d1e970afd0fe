use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Total EPDS score: the flat sum of ten item codes, each 0–3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(try_from = "u8", into = "u8")]
#[ts(export)]
pub struct EpdsScore(u8);

impl EpdsScore {
    pub const MAX: u8 = 30;

    /// Sum ten item codes. Returns `None` if any code is above 3.
    pub fn from_items(items: &[u8; 10]) -> Option<Self> {
        if items.iter().any(|&code| code > 3) {
            return None;
        }
        Some(Self(items.iter().sum()))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for EpdsScore {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > Self::MAX {
            return Err(format!("EPDS score {value} is outside range [0, {}]", Self::MAX));
        }
        Ok(Self(value))
    }
}

impl From<EpdsScore> for u8 {
    fn from(score: EpdsScore) -> Self {
        score.0
    }
}

impl std::fmt::Display for EpdsScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
