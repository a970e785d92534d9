use chrono::{Local, NaiveDateTime, SubsecRound, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// The three keyed collections that make up the data root.
///
/// Every collection is keyed by note title, so a title is the join key
/// between a note, its question file and its stats file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Collection {
    Notes,
    Questions,
    Stats,
}

impl Collection {
    pub fn dir_name(&self) -> &'static str {
        match self {
            Collection::Notes => "notes",
            Collection::Questions => "questions",
            Collection::Stats => "stats",
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            Collection::Notes => ".txt",
            Collection::Questions => ".json",
            Collection::Stats => "_stats.json",
        }
    }

    pub fn file_name(&self, key: &str) -> String {
        format!("{}{}", key, self.suffix())
    }

    /// Recover the key from a file name, if the name belongs to this collection.
    pub fn key_from_file_name<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        file_name
            .strip_suffix(self.suffix())
            .filter(|key| !key.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub title: String,
    pub content: String,
}

impl Note {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// A generated prompt/answer pair. The `reponse` key is the on-disk name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub reponse: String,
}

impl Question {
    pub fn new(text: impl Into<String>, reponse: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reponse: reponse.into(),
        }
    }
}

/// The question file of one note, exactly as the model produced it.
///
/// Entries are kept as raw JSON: nothing checks that they have the
/// `{text, reponse}` shape. [`QuestionSet::questions`] gives the typed view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionSet {
    entries: Vec<Value>,
}

impl QuestionSet {
    pub fn new(entries: Vec<Value>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Value] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries that deserialize as a [`Question`], in file order.
    pub fn questions(&self) -> Vec<Question> {
        self.entries
            .iter()
            .filter_map(|entry| serde_json::from_value(entry.clone()).ok())
            .collect()
    }
}

impl From<Vec<Question>> for QuestionSet {
    fn from(questions: Vec<Question>) -> Self {
        let entries = questions
            .into_iter()
            .map(|q| serde_json::json!({ "text": q.text, "reponse": q.reponse }))
            .collect();
        Self { entries }
    }
}

/// A 0–5 grade. Values read from disk are clamped like any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Score(u8);

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Score::clamped)
    }
}

impl Score {
    pub const MAX: u8 = 5;

    /// Build a score, clamping anything outside 0–5.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(0, Self::MAX as i64) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub score: Score,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    /// Local wall-clock time, no offset (`2024-05-01T10:22:03.123456`).
    #[serde(serialize_with = "serialize_isoformat")]
    pub timestamp: NaiveDateTime,
    pub question: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub score: Score,
}

impl Attempt {
    pub fn now(
        question: impl Into<String>,
        user_answer: impl Into<String>,
        correct_answer: impl Into<String>,
        score: Score,
    ) -> Self {
        Self {
            timestamp: Local::now().naive_local().trunc_subsecs(6),
            question: question.into(),
            user_answer: user_answer.into(),
            correct_answer: correct_answer.into(),
            score,
        }
    }
}

/// Microsecond precision; the fraction is left out when it is zero.
fn serialize_isoformat<S: Serializer>(
    timestamp: &NaiveDateTime,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let format = if timestamp.nanosecond() / 1_000 == 0 {
        "%Y-%m-%dT%H:%M:%S"
    } else {
        "%Y-%m-%dT%H:%M:%S%.6f"
    };
    serializer.collect_str(&timestamp.format(format))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub attempts: Vec<Attempt>,
}

impl Stats {
    pub fn summary(&self) -> StatsSummary {
        let attempts = self.attempts.len();
        let total: u32 = self.attempts.iter().map(|a| a.score.value() as u32).sum();
        StatsSummary {
            attempts,
            average_score: if attempts == 0 {
                None
            } else {
                Some(total as f64 / attempts as f64)
            },
            best_score: self.attempts.iter().map(|a| a.score).max(),
            last_attempt: self.attempts.iter().map(|a| a.timestamp).max(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSummary {
    pub attempts: usize,
    pub average_score: Option<f64>,
    pub best_score: Option<Score>,
    pub last_attempt: Option<NaiveDateTime>,
}
