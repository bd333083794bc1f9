use std::collections::HashMap;

use crate::model::{CounterDelta, SessionOutcome};

/// Session-local scoring state shared by the engines: the delta map that
/// lives for the whole session, plus the correct counter of the current
/// round (flashcard mistake replays score per round but commit per session).
#[derive(Debug, Default)]
pub struct ScoreCard {
    deltas: HashMap<String, CounterDelta>,
    round_correct: u32,
}

impl ScoreCard {
    /// Records one graded event for an item.
    pub fn record(&mut self, item_id: &str, correct: bool) {
        let delta = self.deltas.entry(item_id.to_string()).or_default();
        if correct {
            delta.correct += 1;
            self.round_correct += 1;
        } else {
            delta.wrong += 1;
        }
    }

    pub fn round_correct(&self) -> u32 {
        self.round_correct
    }

    /// Starts a new scoring round without losing accumulated deltas.
    pub fn reset_round(&mut self) {
        self.round_correct = 0;
    }

    /// Drops everything; only valid when a brand-new session starts.
    pub fn reset_session(&mut self) {
        self.deltas.clear();
        self.round_correct = 0;
    }

    pub fn deltas(&self) -> &HashMap<String, CounterDelta> {
        &self.deltas
    }

    /// Freezes the accumulated delta map into a session outcome.
    pub fn outcome(&self, score_percentage: u8) -> SessionOutcome {
        SessionOutcome {
            score_percentage,
            patch: self.deltas.clone(),
        }
    }
}

/// `round(100 * correct / total)` clamped to 0..=100; an empty total is 0.
pub fn percentage(correct: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (f64::from(correct) * 100.0 / f64::from(total)).round();
    pct.clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_for_one_item_sum_up() {
        let mut card = ScoreCard::default();
        card.record("a", true);
        card.record("a", false);
        card.record("a", false);
        card.record("b", true);

        let deltas = card.deltas();
        assert_eq!(
            deltas.get("a"),
            Some(&CounterDelta {
                correct: 1,
                wrong: 2
            })
        );
        assert_eq!(
            deltas.get("b"),
            Some(&CounterDelta {
                correct: 1,
                wrong: 0
            })
        );
        assert_eq!(card.round_correct(), 2);
    }

    #[test]
    fn outcome_carries_only_touched_items() {
        let mut card = ScoreCard::default();
        card.record("a", true);
        let outcome = card.outcome(50);
        assert_eq!(outcome.score_percentage, 50);
        assert_eq!(outcome.patch.len(), 1);
        assert!(outcome.patch.contains_key("a"));
    }

    #[test]
    fn reset_round_keeps_deltas() {
        let mut card = ScoreCard::default();
        card.record("a", true);
        card.reset_round();
        assert_eq!(card.round_correct(), 0);
        assert_eq!(card.deltas().get("a").unwrap().correct, 1);
    }

    #[test]
    fn reset_session_drops_deltas() {
        let mut card = ScoreCard::default();
        card.record("a", false);
        card.reset_session();
        assert!(card.deltas().is_empty());
    }

    #[test]
    fn percentage_rounds_and_clamps() {
        assert_eq!(percentage(4, 5), 80);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(7, 6), 100);
    }
}
