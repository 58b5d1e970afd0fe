use crate::Instrument;
use crate::scoring::{Choice, Question, QuestionId};

pub const ITEM_COUNT: usize = 10;

/// The process-wide EPDS answer key.
pub static EPDS: Epds = Epds;

/// EPDS: Edinburgh Postnatal Depression Scale.
/// Ten items, each coded 0–3, total 0–30. Several items are reverse-keyed:
/// the first listed option scores 0 on Q1, Q2 and Q4 but 3 elsewhere.
pub struct Epds;

impl Instrument for Epds {
    fn id(&self) -> &str {
        "epds"
    }

    fn name(&self) -> &str {
        "Edinburgh Postnatal Depression Scale"
    }

    fn instructions(&self) -> &str {
        "Answer the following based on how you've felt over the past 7 days."
    }

    fn questions(&self) -> &[Question] {
        static QUESTIONS: std::sync::LazyLock<Vec<Question>> = std::sync::LazyLock::new(|| {
            vec![
                question(
                    1,
                    "I have been able to laugh and see the funny side of things.",
                    &[
                        ("As much as I always could", 0),
                        ("Not quite so much now", 1),
                        ("Definitely not so much now", 2),
                        ("Not at all", 3),
                    ],
                ),
                question(
                    2,
                    "I have looked forward with enjoyment to things.",
                    &[
                        ("As much as I ever did", 0),
                        ("Rather less than I used to", 1),
                        ("Definitely less than I used to", 2),
                        ("Hardly at all", 3),
                    ],
                ),
                question(
                    3,
                    "I have blamed myself unnecessarily when things went wrong.",
                    &[
                        ("Yes, most of the time", 3),
                        ("Yes, some of the time", 2),
                        ("Not very often", 1),
                        ("No, never", 0),
                    ],
                ),
                question(
                    4,
                    "I have been anxious or worried for no good reason.",
                    &[
                        ("No, not at all", 0),
                        ("Hardly ever", 1),
                        ("Yes, sometimes", 2),
                        ("Yes, very often", 3),
                    ],
                ),
                question(
                    5,
                    "I have felt scared or panicky for no very good reason.",
                    &[
                        ("Yes, quite a lot", 3),
                        ("Yes, sometimes", 2),
                        ("No, not much", 1),
                        ("No, not at all", 0),
                    ],
                ),
                question(
                    6,
                    "Things have been getting on top of me.",
                    &[
                        ("Yes, most of the time I haven't been able to cope at all", 3),
                        ("Yes, sometimes I haven't been coping as well as usual", 2),
                        ("No, most of the time I have coped quite well", 1),
                        ("No, I have been coping as well as ever", 0),
                    ],
                ),
                question(
                    7,
                    "I have been so unhappy that I have had difficulty sleeping.",
                    &[
                        ("Yes, most of the time", 3),
                        ("Yes, sometimes", 2),
                        ("Not very often", 1),
                        ("No, not at all", 0),
                    ],
                ),
                question(
                    8,
                    "I have felt sad or miserable.",
                    &[
                        ("Yes, most of the time", 3),
                        ("Yes, quite often", 2),
                        ("Not very often", 1),
                        ("No, not at all", 0),
                    ],
                ),
                question(
                    9,
                    "I have been so unhappy that I have been crying.",
                    &[
                        ("Yes, most of the time", 3),
                        ("Yes, quite often", 2),
                        ("Only occasionally", 1),
                        ("No, never", 0),
                    ],
                ),
                question(
                    10,
                    "The thought of harming myself has occurred to me.",
                    &[
                        ("Yes, quite often", 3),
                        ("Sometimes", 2),
                        ("Hardly ever", 1),
                        ("Never", 0),
                    ],
                ),
            ]
        });
        &QUESTIONS
    }
}

impl Epds {
    /// The option text that carries `code` for the given item.
    pub fn choice_for_code(&self, id: QuestionId, code: u8) -> Option<&str> {
        self.question(id)?
            .choices
            .iter()
            .find(|c| c.score == code)
            .map(|c| c.text.as_str())
    }
}

fn question(number: u8, prompt: &str, choices: &[(&str, u8)]) -> Question {
    Question {
        id: QuestionId::new(number).unwrap_or_else(|| panic!("EPDS item {number} out of range")),
        prompt: prompt.to_string(),
        choices: choices
            .iter()
            .map(|&(text, score)| Choice {
                text: text.to_string(),
                score,
            })
            .collect(),
    }
}
