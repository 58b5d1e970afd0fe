use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, IncompleteInputError};

/// Age in whole years, limited to the range the screening model was built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(try_from = "u8", into = "u8")]
#[ts(export)]
pub struct Age(u8);

impl Age {
    pub const MIN: u8 = 18;
    pub const MAX: u8 = 45;
    pub const DEFAULT: u8 = 25;

    pub fn new(years: u8) -> Result<Self, CoreError> {
        if !(Self::MIN..=Self::MAX).contains(&years) {
            return Err(CoreError::AgeOutOfRange(years));
        }
        Ok(Self(years))
    }

    pub fn years(&self) -> u8 {
        self.0
    }
}

impl Default for Age {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<u8> for Age {
    type Error = CoreError;

    fn try_from(years: u8) -> Result<Self, Self::Error> {
        Self::new(years)
    }
}

impl From<Age> for u8 {
    fn from(age: Age) -> Self {
        age.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}

impl std::str::FromStr for YesNo {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Yes" => Ok(Self::Yes),
            "No" => Ok(Self::No),
            other => Err(CoreError::InvalidChoice {
                field: "yes/no",
                value: other.to_string(),
            }),
        }
    }
}

/// Self-reported level of family support. Also a predictor feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum FamilySupport {
    Low,
    Medium,
    High,
}

impl FamilySupport {
    pub const ALL: [FamilySupport; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl std::str::FromStr for FamilySupport {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| CoreError::InvalidChoice {
                field: "family support",
                value: s.to_string(),
            })
    }
}

impl std::fmt::Display for FamilySupport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Demographic answers collected before the questionnaire.
///
/// `None` is the "not selected yet" sentinel. Age has no sentinel: it always
/// starts at [`Age::DEFAULT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Demographics {
    pub age: Age,
    pub is_pregnant: Option<YesNo>,
    pub recent_birth: Option<YesNo>,
    pub family_support: Option<FamilySupport>,
}

impl Demographics {
    /// True once every enum field has a value. Age never invalidates.
    pub fn is_valid(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn missing_fields(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if self.is_pregnant.is_none() {
            missing.push("is_pregnant".to_string());
        }
        if self.recent_birth.is_none() {
            missing.push("recent_birth".to_string());
        }
        if self.family_support.is_none() {
            missing.push("family_support".to_string());
        }
        missing
    }

    /// The family-support level, or the list of unset fields.
    ///
    /// This is the gate in front of a prediction request: the record is only
    /// usable once all three enum fields are set.
    pub fn require_valid(&self) -> Result<FamilySupport, IncompleteInputError> {
        match (self.is_pregnant, self.recent_birth, self.family_support) {
            (Some(_), Some(_), Some(support)) => Ok(support),
            _ => Err(IncompleteInputError::demographics(self.missing_fields())),
        }
    }
}
