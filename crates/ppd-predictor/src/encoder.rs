use crate::error::PredictorError;

/// Maps class indices to label text, in the order the model was trained with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Result<Self, PredictorError> {
        if classes.is_empty() {
            return Err(PredictorError::InvalidArtifact("no classes".to_string()));
        }
        if classes.len() > usize::from(u8::MAX) + 1 {
            return Err(PredictorError::InvalidArtifact(format!(
                "{} classes exceed the encodable range",
                classes.len()
            )));
        }
        Ok(Self { classes })
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn inverse_transform(&self, encoded: u8) -> Result<&str, PredictorError> {
        self.classes
            .get(usize::from(encoded))
            .map(String::as_str)
            .ok_or(PredictorError::EncodedOutOfRange {
                encoded,
                classes: self.classes.len(),
            })
    }
}
