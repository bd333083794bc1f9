use crate::engine::score::{percentage, ScoreCard};
use crate::engine::shuffle::shuffled;
use crate::engine::{EngineError, GamePhase};
use crate::model::{QuizDirection, SessionOutcome, VocabItem};

/// Sequential reveal/self-assessment deck with a mistake-replay sub-loop.
///
/// One engine instance spans one session: a full pass plus any number of
/// mistake replays. The delta map accumulates across replays and is only
/// flattened into an outcome when the caller commits; `restart_full_set`
/// opens a brand-new session on the same instance.
#[derive(Debug)]
pub struct FlashcardEngine {
    direction: QuizDirection,
    source_items: Vec<VocabItem>,
    deck: Vec<VocabItem>,
    cursor: usize,
    flipped: bool,
    mistakes: Vec<VocabItem>,
    card: ScoreCard,
    phase: GamePhase,
}

impl FlashcardEngine {
    pub fn new(items: Vec<VocabItem>, direction: QuizDirection) -> Result<Self, EngineError> {
        if items.is_empty() {
            return Err(EngineError::EmptyDeck);
        }
        let deck = shuffled(&items);
        Ok(Self {
            direction,
            source_items: items,
            deck,
            cursor: 0,
            flipped: false,
            mistakes: Vec::new(),
            card: ScoreCard::default(),
            phase: GamePhase::InProgress,
        })
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == GamePhase::Complete
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn mistake_count(&self) -> usize {
        self.mistakes.len()
    }

    pub fn current(&self) -> Option<&VocabItem> {
        if self.phase == GamePhase::Complete {
            return None;
        }
        self.deck.get(self.cursor)
    }

    pub fn prompt(&self) -> Option<&str> {
        self.current().map(|item| item.prompt_text(self.direction))
    }

    pub fn solution(&self) -> Option<&str> {
        self.current().map(|item| item.answer_text(self.direction))
    }

    /// Toggles the card face. Display-only, allowed any number of times.
    pub fn flip(&mut self) {
        if self.phase == GamePhase::InProgress {
            self.flipped = !self.flipped;
        }
    }

    /// Grades the current card and advances. Ignored once the round is
    /// complete, so duplicate input cannot double-grade.
    pub fn grade(&mut self, known: bool) {
        if self.phase == GamePhase::Complete {
            return;
        }
        let Some(item) = self.deck.get(self.cursor).cloned() else {
            return;
        };
        self.card.record(&item.id, known);
        if !known {
            self.mistakes.push(item);
        }
        self.flipped = false;
        self.cursor += 1;
        if self.cursor >= self.deck.len() {
            self.phase = GamePhase::Complete;
        }
    }

    /// Score and counter patch of the session, available once the current
    /// round is complete. The percentage is taken over the round that just
    /// finished (a replay of 3 mistakes scores out of 3); the patch spans
    /// every round since the session began.
    pub fn outcome(&self) -> Option<SessionOutcome> {
        if self.phase != GamePhase::Complete {
            return None;
        }
        let pct = percentage(self.card.round_correct(), self.deck.len() as u32);
        Some(self.card.outcome(pct))
    }

    /// Re-shuffles the full original list into a fresh deck and opens a
    /// brand-new session: round counter, mistakes and delta map all cleared.
    /// Lifetime counters already committed are unaffected.
    pub fn restart_full_set(&mut self) {
        self.deck = shuffled(&self.source_items);
        self.cursor = 0;
        self.flipped = false;
        self.mistakes.clear();
        self.card.reset_session();
        self.phase = GamePhase::InProgress;
    }

    /// Replays only the mistakes of the finished round. No-op when the round
    /// is still running or nothing was missed. The delta map is kept: earlier
    /// rounds still commit together with the replay on eventual completion.
    pub fn repeat_mistakes(&mut self) {
        if self.phase != GamePhase::Complete || self.mistakes.is_empty() {
            return;
        }
        self.deck = shuffled(&self.mistakes);
        self.mistakes.clear();
        self.cursor = 0;
        self.flipped = false;
        self.card.reset_round();
        self.phase = GamePhase::InProgress;
    }
}
