use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One word pair with its lifetime correctness counters. Counters only grow;
/// gameplay never resets them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabItem {
    pub id: String,
    pub original: String,
    pub translation: String,
    #[serde(default)]
    pub correct_count: u32,
    #[serde(default)]
    pub wrong_count: u32,
}

impl VocabItem {
    pub fn attempts(&self) -> u32 {
        self.correct_count + self.wrong_count
    }

    /// Lifetime success rate; items with zero attempts rate 0.
    pub fn success_rate(&self) -> f64 {
        let total = self.attempts();
        if total == 0 {
            0.0
        } else {
            f64::from(self.correct_count) / f64::from(total)
        }
    }

    /// Additive patch application: counters grow, text is untouched.
    pub fn apply_delta(&self, delta: CounterDelta) -> VocabItem {
        VocabItem {
            correct_count: self.correct_count + delta.correct,
            wrong_count: self.wrong_count + delta.wrong,
            ..self.clone()
        }
    }

    /// Text shown as the question for the given direction.
    pub fn prompt_text(&self, direction: QuizDirection) -> &str {
        match direction {
            QuizDirection::OriginalToTranslation => &self.original,
            QuizDirection::TranslationToOriginal => &self.translation,
        }
    }

    /// Text expected as the answer for the given direction.
    pub fn answer_text(&self, direction: QuizDirection) -> &str {
        match direction {
            QuizDirection::OriginalToTranslation => &self.translation,
            QuizDirection::TranslationToOriginal => &self.original,
        }
    }
}

/// Counter increments accumulated for one item during a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterDelta {
    pub correct: u32,
    pub wrong: u32,
}

/// Free-text description of where a set came from; all fields may be empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetMetadata {
    pub language: String,
    pub grade: String,
    pub chapter: String,
    pub page: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabSet {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    #[serde(default)]
    pub metadata: SetMetadata,
    pub items: Vec<VocabItem>,
    pub created_at: DateTime<Utc>,
    /// Score of the most recent direct play of this set. Tough Mode never
    /// writes this.
    pub last_score: Option<u8>,
}

/// Which side of the pair is the question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizDirection {
    OriginalToTranslation,
    TranslationToOriginal,
}

/// What a session was started from. The tough aggregate is synthetic: it has
/// no owning set and must never be written back as a set of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaySource {
    Set(String),
    ToughAggregate,
}

/// Result of one completed session: the round score plus the merge-patch of
/// counter increments for the items touched this session. Built once at
/// completion, applied additively by the reconciler exactly once, then
/// discarded.
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    pub score_percentage: u8,
    pub patch: HashMap<String, CounterDelta>,
}

/// Output shape of the external extraction service (image -> word pairs).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedSet {
    #[serde(default)]
    pub metadata: SetMetadata,
    pub vocabulary: Vec<ExtractedPair>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedPair {
    pub original: String,
    pub translation: String,
}
