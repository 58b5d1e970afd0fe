use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

use ppd_core::error::IncompleteInputError;
use ppd_core::models::score::EpdsScore;

use crate::Instrument;
use crate::error::InstrumentError;
use crate::instruments::epds::{EPDS, ITEM_COUNT};

/// Identifier of an EPDS item, `Q1` through `Q10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuestionId(u8);

impl QuestionId {
    /// Build from a 1-based item number.
    pub fn new(number: u8) -> Option<Self> {
        (1..=ITEM_COUNT as u8).contains(&number).then_some(Self(number))
    }

    /// Build from a 0-based position in the questionnaire.
    pub fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index + 1).ok().and_then(Self::new)
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    pub fn index(&self) -> usize {
        usize::from(self.0 - 1)
    }

    pub fn all() -> impl Iterator<Item = QuestionId> {
        (1..=ITEM_COUNT as u8).map(Self)
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Q{}", self.0)
    }
}

impl std::str::FromStr for QuestionId {
    type Err = InstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix('Q')
            .and_then(|n| n.parse::<u8>().ok())
            .and_then(Self::new)
            .ok_or_else(|| InstrumentError::UnknownQuestion(s.to_string()))
    }
}

impl Serialize for QuestionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for QuestionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One answer option and the item code it contributes.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Choice {
    pub text: String,
    pub score: u8,
}

/// A question with its options in display order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    #[ts(type = "string")]
    pub id: QuestionId,
    pub prompt: String,
    pub choices: Vec<Choice>,
}

impl Question {
    pub fn choice(&self, text: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.text == text)
    }
}

/// The selected choice text for each EPDS item; `None` means unanswered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EpdsAnswers {
    selections: [Option<String>; ITEM_COUNT],
}

impl EpdsAnswers {
    pub fn get(&self, id: QuestionId) -> Option<&str> {
        self.selections[id.index()].as_deref()
    }

    /// Store a selection without checking it against the answer key.
    /// [`crate::questionnaire::Questionnaire::select_answer`] is the checked path.
    pub fn set(&mut self, id: QuestionId, choice: impl Into<String>) {
        self.selections[id.index()] = Some(choice.into());
    }

    pub fn clear(&mut self) {
        self.selections = Default::default();
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, Option<&str>)> {
        QuestionId::all().zip(self.selections.iter().map(Option::as_deref))
    }

    pub fn answered_count(&self) -> usize {
        self.selections.iter().filter(|s| s.is_some()).count()
    }
}

/// Per-item codes for a full set of answers.
///
/// Fails with the list of items that are unanswered or whose text is not a
/// recognised option. Never yields a partial result.
pub fn item_scores(answers: &EpdsAnswers) -> Result<[u8; ITEM_COUNT], IncompleteInputError> {
    let mut codes = [0u8; ITEM_COUNT];
    let mut missing = Vec::new();

    for (id, selection) in answers.iter() {
        match selection.and_then(|choice| EPDS.score_choice(id, choice)) {
            Some(code) => codes[id.index()] = code,
            None => missing.push(id.to_string()),
        }
    }

    if missing.is_empty() {
        Ok(codes)
    } else {
        Err(IncompleteInputError::questionnaire(missing))
    }
}

/// EPDS total: the flat sum of the ten item codes.
pub fn score(answers: &EpdsAnswers) -> Result<EpdsScore, IncompleteInputError> {
    let codes = item_scores(answers)?;
    EpdsScore::from_items(&codes).ok_or_else(|| {
        // Unreachable with the built-in key: every code is 0–3.
        IncompleteInputError::questionnaire(Vec::new())
    })
}
