use crate::model::{PlaySource, SessionOutcome, VocabSet};

/// Merges a finished session back into the owning sets and returns the full
/// replacement collection; the caller persists it. Performs no I/O.
///
/// Every set is scanned, not just the one that was played: a Tough Mode
/// session fans its items out across however many sets they came from. The
/// patch is applied additively per item (counters only, text untouched);
/// patch entries whose owning set disappeared mid-session find no home and
/// are dropped.
pub fn commit(sets: &[VocabSet], source: &PlaySource, outcome: &SessionOutcome) -> Vec<VocabSet> {
    sets.iter()
        .map(|set| {
            let items = set
                .items
                .iter()
                .map(|item| match outcome.patch.get(&item.id) {
                    Some(delta) => item.apply_delta(*delta),
                    None => item.clone(),
                })
                .collect();

            // Only a direct play moves the set's score; the tough aggregate
            // belongs to no set.
            let last_score = match source {
                PlaySource::Set(played_id) if *played_id == set.id => {
                    Some(outcome.score_percentage)
                }
                _ => set.last_score,
            };

            VocabSet {
                items,
                last_score,
                ..set.clone()
            }
        })
        .collect()
}
