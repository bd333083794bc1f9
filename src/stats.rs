use serde::Serialize;

use crate::constants::MAX_PROBLEM_WORDS;
use crate::model::{VocabItem, VocabSet};

/// Lifetime aggregates across the whole collection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStats {
    pub total_sets: usize,
    pub total_items: usize,
    pub total_correct: u64,
    pub total_wrong: u64,
    pub total_attempts: u64,
    pub success_rate_percent: u8,
}

pub fn overview(sets: &[VocabSet]) -> OverviewStats {
    let mut total_items = 0usize;
    let mut total_correct = 0u64;
    let mut total_wrong = 0u64;
    for set in sets {
        total_items += set.items.len();
        for item in &set.items {
            total_correct += u64::from(item.correct_count);
            total_wrong += u64::from(item.wrong_count);
        }
    }
    let total_attempts = total_correct + total_wrong;
    let success_rate_percent = if total_attempts > 0 {
        ((total_correct as f64 / total_attempts as f64) * 100.0).round() as u8
    } else {
        0
    };
    OverviewStats {
        total_sets: sets.len(),
        total_items,
        total_correct,
        total_wrong,
        total_attempts,
        success_rate_percent,
    }
}

/// An often-failed item tagged with the set it lives in.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemWord {
    pub item: VocabItem,
    pub set_title: String,
}

/// Items failed at least once, worst first, capped at ten. Ties keep the
/// stored collection order (stable sort).
pub fn problem_words(sets: &[VocabSet]) -> Vec<ProblemWord> {
    let mut words: Vec<ProblemWord> = sets
        .iter()
        .flat_map(|set| {
            set.items
                .iter()
                .filter(|item| item.wrong_count > 0)
                .map(|item| ProblemWord {
                    item: item.clone(),
                    set_title: set.title.clone(),
                })
        })
        .collect();
    words.sort_by(|a, b| b.item.wrong_count.cmp(&a.item.wrong_count));
    words.truncate(MAX_PROBLEM_WORDS);
    words
}
