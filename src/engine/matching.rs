use std::collections::HashSet;

use crate::constants::MATCHING_PAGE_SIZE;
use crate::engine::score::{percentage, ScoreCard};
use crate::engine::shuffle::{sample, shuffled};
use crate::engine::{EngineError, GamePhase};
use crate::model::{QuizDirection, SessionOutcome, VocabItem};

/// Paginated left/right pairing grid. The deck is shuffled once and chunked
/// into pages of six; a short final page is padded with items from elsewhere
/// in the set so the grid stays uniform (ids within one page stay distinct,
/// repeats across pages are fine). Both columns reshuffle per page.
#[derive(Debug)]
pub struct MatchingEngine {
    direction: QuizDirection,
    pages: Vec<Vec<VocabItem>>,
    page_index: usize,
    left: Vec<VocabItem>,
    right: Vec<VocabItem>,
    matched: HashSet<String>,
    selected_left: Option<String>,
    mismatch: Option<(String, String)>,
    card: ScoreCard,
    phase: GamePhase,
}

impl MatchingEngine {
    pub fn new(items: Vec<VocabItem>, direction: QuizDirection) -> Result<Self, EngineError> {
        if items.is_empty() {
            return Err(EngineError::EmptyDeck);
        }
        let pages = build_pages(&items);
        let mut engine = Self {
            direction,
            pages,
            page_index: 0,
            left: Vec::new(),
            right: Vec::new(),
            matched: HashSet::new(),
            selected_left: None,
            mismatch: None,
            card: ScoreCard::default(),
            phase: GamePhase::InProgress,
        };
        engine.deal_page();
        Ok(engine)
    }

    fn deal_page(&mut self) {
        let page = &self.pages[self.page_index];
        self.left = shuffled(page);
        self.right = shuffled(page);
        self.matched.clear();
        self.selected_left = None;
        self.mismatch = None;
    }

    pub fn direction(&self) -> QuizDirection {
        self.direction
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == GamePhase::Complete
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn left_column(&self) -> &[VocabItem] {
        &self.left
    }

    pub fn right_column(&self) -> &[VocabItem] {
        &self.right
    }

    pub fn is_matched(&self, id: &str) -> bool {
        self.matched.contains(id)
    }

    pub fn selected_left(&self) -> Option<&str> {
        self.selected_left.as_deref()
    }

    /// The (left, right) pair currently flashed as wrong, if any.
    pub fn mismatch(&self) -> Option<(&str, &str)> {
        self.mismatch
            .as_ref()
            .map(|(l, r)| (l.as_str(), r.as_str()))
    }

    /// Selects a left-column card. Matched cards and unknown ids are ignored;
    /// a stale mismatch flash is dismissed.
    pub fn select_left(&mut self, id: &str) {
        if self.phase == GamePhase::Complete || self.matched.contains(id) {
            return;
        }
        if !self.left.iter().any(|item| item.id == id) {
            return;
        }
        self.mismatch = None;
        self.selected_left = Some(id.to_string());
    }

    /// Pairs the selection with a right-column card. Matching ids score a
    /// correct event and lock the pair; a mismatch scores a wrong event for
    /// the left-selected item and enters the flash state, which ends with
    /// `clear_mismatch`. Ignored without a selection, on matched cards, and
    /// while a mismatch is still showing.
    pub fn select_right(&mut self, id: &str) {
        if self.phase == GamePhase::Complete
            || self.mismatch.is_some()
            || self.matched.contains(id)
        {
            return;
        }
        let Some(selected) = self.selected_left.clone() else {
            return;
        };
        if !self.right.iter().any(|item| item.id == id) {
            return;
        }

        if selected == id {
            self.matched.insert(id.to_string());
            self.card.record(id, true);
            self.selected_left = None;
        } else {
            self.card.record(&selected, false);
            self.mismatch = Some((selected, id.to_string()));
        }
    }

    /// Ends the mismatch flash, dropping flag and selection together.
    pub fn clear_mismatch(&mut self) {
        self.mismatch = None;
        self.selected_left = None;
    }

    /// True when every pair on the current page is matched.
    pub fn page_cleared(&self) -> bool {
        self.phase == GamePhase::InProgress
            && self.matched.len() == self.pages[self.page_index].len()
    }

    /// Moves past a fully matched page; completes after the last one. The UI
    /// calls this after its brief pause, no timer lives in the engine.
    pub fn advance_page(&mut self) {
        if !self.page_cleared() {
            return;
        }
        self.page_index += 1;
        if self.page_index >= self.pages.len() {
            self.phase = GamePhase::Complete;
        } else {
            self.deal_page();
        }
    }

    /// Outcome once complete. The percentage is taken over all match slots
    /// (pages x 6), so padded repeats overcount the denominator slightly;
    /// the score is capped at 100 rather than renormalised.
    pub fn outcome(&self) -> Option<SessionOutcome> {
        if self.phase != GamePhase::Complete {
            return None;
        }
        let slots = (self.pages.len() * MATCHING_PAGE_SIZE) as u32;
        let pct = percentage(self.card.round_correct(), slots);
        Some(self.card.outcome(pct))
    }
}

fn build_pages(items: &[VocabItem]) -> Vec<Vec<VocabItem>> {
    let deck = shuffled(items);
    let mut pages = Vec::new();
    for chunk in deck.chunks(MATCHING_PAGE_SIZE) {
        let mut page = chunk.to_vec();
        // Pad a short final page from the rest of the set, but only once the
        // set is big enough to fill a page at all.
        if page.len() < MATCHING_PAGE_SIZE && deck.len() >= MATCHING_PAGE_SIZE {
            let pool: Vec<VocabItem> = deck
                .iter()
                .filter(|item| !page.iter().any(|p| p.id == item.id))
                .cloned()
                .collect();
            let needed = MATCHING_PAGE_SIZE - page.len();
            page.extend(sample(&pool, needed));
        }
        pages.push(page);
    }
    pages
}
