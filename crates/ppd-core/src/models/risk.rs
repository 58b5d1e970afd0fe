use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Risk category produced by the screening model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RiskLabel {
    Mild,
    Moderate,
    Severe,
    Profound,
}

/// Display colour and guidance text paired with a [`RiskLabel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskPresentation {
    pub color: &'static str,
    pub message: &'static str,
}

impl RiskLabel {
    pub const ALL: [RiskLabel; 4] = [Self::Mild, Self::Moderate, Self::Severe, Self::Profound];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mild => "Mild",
            Self::Moderate => "Moderate",
            Self::Severe => "Severe",
            Self::Profound => "Profound",
        }
    }

    /// Position on the 0–3 severity axis used by the results chart.
    pub fn severity(&self) -> u8 {
        match self {
            Self::Mild => 0,
            Self::Moderate => 1,
            Self::Severe => 2,
            Self::Profound => 3,
        }
    }

    pub fn presentation(&self) -> RiskPresentation {
        match self {
            Self::Mild => RiskPresentation {
                color: "green",
                message: "Your responses indicate a Mild risk. This suggests good overall \
                          well-being. Continue to monitor your feelings and practice self-care. \
                          If concerns arise, don't hesitate to reach out.",
            },
            Self::Moderate => RiskPresentation {
                color: "orange",
                message: "Your responses indicate a Moderate risk. It's a good time to reflect \
                          on what might be contributing to these feelings. We highly recommend \
                          talking to a healthcare provider, a therapist, or a trusted \
                          friend or family member. Early support can make a significant difference.",
            },
            Self::Severe => RiskPresentation {
                color: "red",
                message: "Your responses indicate a Severe risk. This is a strong signal for \
                          concern. It is crucial to seek professional medical advice immediately. \
                          Please contact your doctor, a mental health professional, or an \
                          emergency service. Support is available, and you are not alone.",
            },
            Self::Profound => RiskPresentation {
                color: "darkred",
                message: "Your responses indicate a Profound risk. This requires urgent \
                          attention. Please seek immediate professional medical attention. If you \
                          are in distress or feel overwhelmed, please reach out to an emergency \
                          service or a mental health crisis line without delay.",
            },
        }
    }
}

impl std::str::FromStr for RiskLabel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| CoreError::UnrecognizedLabel(s.to_string()))
    }
}

impl std::fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Look up the presentation for a label as returned by a predictor.
///
/// Fails closed: a label outside the known set is an error, never blank styling.
pub fn presentation_for(label: &str) -> Result<(RiskLabel, RiskPresentation), CoreError> {
    let label: RiskLabel = label.parse()?;
    Ok((label, label.presentation()))
}
