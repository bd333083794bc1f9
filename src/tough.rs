use crate::constants::TOUGH_RATE_THRESHOLD;
use crate::model::{VocabItem, VocabSet};

/// Stateless threshold classification, recomputed in full on every call.
/// Iterates sets and items in stored order so results are deterministic.
pub fn tough_items(sets: &[VocabSet]) -> Vec<VocabItem> {
    let mut tough = Vec::new();
    for set in sets {
        for item in &set.items {
            if is_tough(item) {
                tough.push(item.clone());
            }
        }
    }
    tough
}

/// Strictly below the threshold; never-practiced items rate 0 and qualify.
pub fn is_tough(item: &VocabItem) -> bool {
    item.success_rate() < TOUGH_RATE_THRESHOLD
}
