use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::engine::choice::MultipleChoiceEngine;
use crate::engine::flashcard::FlashcardEngine;
use crate::engine::matching::MatchingEngine;
use crate::engine::EngineError;
use crate::model::{ExtractedSet, PlaySource, QuizDirection, SessionOutcome, VocabItem, VocabSet};
use crate::reconcile;
use crate::stats::{self, OverviewStats, ProblemWord};
use crate::store::operations::streaks::StreakInfo;
use crate::store::{Store, StoreError};
use crate::tough;
use crate::validation;

#[derive(Debug, Error)]
pub enum TrainerError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
    #[error("set not found: {0}")]
    SetNotFound(String),
    #[error("a session is already running")]
    SessionActive,
    #[error("no active session")]
    NoActiveSession,
    #[error("session is not complete")]
    SessionNotComplete,
    #[error("action only applies to a flashcard session")]
    WrongGameMode,
    #[error("validation error: {0}")]
    Validation(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Flashcards,
    Matching,
    MultipleChoice,
}

/// One running game, tagged by mode. The UI drives the engine directly
/// through this handle; the trainer owns its lifecycle.
#[derive(Debug)]
pub enum ActiveGame {
    Flashcards(FlashcardEngine),
    Matching(MatchingEngine),
    MultipleChoice(MultipleChoiceEngine),
}

impl ActiveGame {
    pub fn is_complete(&self) -> bool {
        match self {
            ActiveGame::Flashcards(engine) => engine.is_complete(),
            ActiveGame::Matching(engine) => engine.is_complete(),
            ActiveGame::MultipleChoice(engine) => engine.is_complete(),
        }
    }

    fn outcome(&self) -> Option<SessionOutcome> {
        match self {
            ActiveGame::Flashcards(engine) => engine.outcome(),
            ActiveGame::Matching(engine) => engine.outcome(),
            ActiveGame::MultipleChoice(engine) => engine.outcome(),
        }
    }
}

#[derive(Debug)]
struct ActiveSession {
    source: PlaySource,
    game: ActiveGame,
}

/// Owns one owner's in-memory working copy of the set collection and drives
/// session lifecycle around it. Sole writer of the persisted collection: the
/// reconciler runs exactly once per completed session and never for an
/// abandoned one, so lifetime counters only move on explicit commit.
pub struct Trainer {
    store: Arc<Store>,
    owner_id: String,
    sets: Vec<VocabSet>,
    session: Option<ActiveSession>,
}

impl Trainer {
    pub fn open(store: Arc<Store>, owner_id: &str) -> Result<Self, TrainerError> {
        let sets = store.load_sets(owner_id)?;
        Ok(Self {
            store,
            owner_id: owner_id.to_string(),
            sets,
            session: None,
        })
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn sets(&self) -> &[VocabSet] {
        &self.sets
    }

    pub fn set(&self, set_id: &str) -> Option<&VocabSet> {
        self.sets.iter().find(|set| set.id == set_id)
    }

    /// Builds a set from the extraction service's output, newest first in
    /// the collection, and persists immediately.
    pub fn create_set(&mut self, title: &str, extracted: ExtractedSet) -> Result<&VocabSet, TrainerError> {
        validation::validate_set_title(title).map_err(TrainerError::Validation)?;
        validation::validate_vocabulary(&extracted.vocabulary).map_err(TrainerError::Validation)?;

        let items = extracted
            .vocabulary
            .into_iter()
            .map(|pair| VocabItem {
                id: Uuid::new_v4().to_string(),
                original: pair.original.trim().to_string(),
                translation: pair.translation.trim().to_string(),
                correct_count: 0,
                wrong_count: 0,
            })
            .collect();
        let set = VocabSet {
            id: Uuid::new_v4().to_string(),
            owner_id: self.owner_id.clone(),
            title: title.trim().to_string(),
            metadata: extracted.metadata,
            items,
            created_at: Utc::now(),
            last_score: None,
        };

        self.sets.insert(0, set);
        self.store.save_sets(&self.owner_id, &self.sets)?;
        tracing::info!(owner = %self.owner_id, set = %self.sets[0].id, "Set created");
        Ok(&self.sets[0])
    }

    pub fn delete_set(&mut self, set_id: &str) -> Result<(), TrainerError> {
        let before = self.sets.len();
        self.sets.retain(|set| set.id != set_id);
        if self.sets.len() == before {
            return Err(TrainerError::SetNotFound(set_id.to_string()));
        }
        self.store.save_sets(&self.owner_id, &self.sets)?;
        tracing::info!(owner = %self.owner_id, set = %set_id, "Set deleted");
        Ok(())
    }

    /// Size of the current tough working set; recomputed on every call.
    pub fn tough_item_count(&self) -> usize {
        tough::tough_items(&self.sets).len()
    }

    /// Starts a session over a set or the tough aggregate. Empty item lists
    /// are rejected here, before any engine exists.
    pub fn start(
        &mut self,
        source: PlaySource,
        mode: GameMode,
        direction: QuizDirection,
    ) -> Result<(), TrainerError> {
        if self.session.is_some() {
            return Err(TrainerError::SessionActive);
        }
        let items = match &source {
            PlaySource::Set(set_id) => self
                .set(set_id)
                .ok_or_else(|| TrainerError::SetNotFound(set_id.clone()))?
                .items
                .clone(),
            PlaySource::ToughAggregate => tough::tough_items(&self.sets),
        };
        let game = match mode {
            GameMode::Flashcards => {
                ActiveGame::Flashcards(FlashcardEngine::new(items, direction)?)
            }
            GameMode::Matching => ActiveGame::Matching(MatchingEngine::new(items, direction)?),
            GameMode::MultipleChoice => {
                ActiveGame::MultipleChoice(MultipleChoiceEngine::new(items, direction)?)
            }
        };
        tracing::info!(owner = %self.owner_id, ?mode, "Session started");
        self.session = Some(ActiveSession { source, game });
        Ok(())
    }

    pub fn game(&self) -> Option<&ActiveGame> {
        self.session.as_ref().map(|session| &session.game)
    }

    pub fn game_mut(&mut self) -> Option<&mut ActiveGame> {
        self.session.as_mut().map(|session| &mut session.game)
    }

    /// Commits the completed session and closes it: counters are reconciled
    /// into the owning sets, the collection is persisted, the streak bumped.
    /// Returns the session score.
    pub fn finish(&mut self) -> Result<u8, TrainerError> {
        let score = self.commit_completed()?;
        self.session = None;
        Ok(score)
    }

    /// Flashcards only: commits the finished round, then replays the full
    /// set as a brand-new session on the same engine.
    pub fn restart_full_set(&mut self) -> Result<u8, TrainerError> {
        match self.session.as_ref().map(|session| &session.game) {
            Some(ActiveGame::Flashcards(_)) => {}
            Some(_) => return Err(TrainerError::WrongGameMode),
            None => return Err(TrainerError::NoActiveSession),
        }
        let score = self.commit_completed()?;
        if let Some(ActiveGame::Flashcards(engine)) = self.game_mut() {
            engine.restart_full_set();
        }
        Ok(score)
    }

    /// Flashcards only: replays the finished round's mistakes within the
    /// same session. Nothing is committed yet; the accumulated deltas land
    /// together when the session eventually finishes.
    pub fn repeat_mistakes(&mut self) -> Result<(), TrainerError> {
        let session = self.session.as_mut().ok_or(TrainerError::NoActiveSession)?;
        match &mut session.game {
            ActiveGame::Flashcards(engine) => {
                engine.repeat_mistakes();
                Ok(())
            }
            _ => Err(TrainerError::WrongGameMode),
        }
    }

    /// Drops the running session without reconciling anything: abandoned
    /// progress is discarded, never partially committed.
    pub fn abandon(&mut self) {
        if self.session.take().is_some() {
            tracing::info!(owner = %self.owner_id, "Session abandoned");
        }
    }

    pub fn has_active_session(&self) -> bool {
        self.session.is_some()
    }

    pub fn overview(&self) -> OverviewStats {
        stats::overview(&self.sets)
    }

    pub fn problem_words(&self) -> Vec<ProblemWord> {
        stats::problem_words(&self.sets)
    }

    pub fn streak_info(&self) -> Result<StreakInfo, TrainerError> {
        Ok(self.store.streak_info(&self.owner_id)?)
    }

    fn commit_completed(&mut self) -> Result<u8, TrainerError> {
        let session = self.session.as_ref().ok_or(TrainerError::NoActiveSession)?;
        let outcome = session
            .game
            .outcome()
            .ok_or(TrainerError::SessionNotComplete)?;
        let source = session.source.clone();

        self.sets = reconcile::commit(&self.sets, &source, &outcome);
        self.store.save_sets(&self.owner_id, &self.sets)?;
        self.store.record_activity(&self.owner_id)?;
        tracing::info!(
            owner = %self.owner_id,
            score = outcome.score_percentage,
            "Session committed"
        );
        Ok(outcome.score_percentage)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use crate::model::{ExtractedPair, SetMetadata};

    use super::*;

    fn extracted(pairs: &[(&str, &str)]) -> ExtractedSet {
        ExtractedSet {
            metadata: SetMetadata::default(),
            vocabulary: pairs
                .iter()
                .map(|(o, t)| ExtractedPair {
                    original: o.to_string(),
                    translation: t.to_string(),
                })
                .collect(),
        }
    }

    fn open_trainer(dir: &tempfile::TempDir) -> Trainer {
        let store =
            Arc::new(Store::open(dir.path().join("trainer-db").to_str().unwrap()).unwrap());
        Trainer::open(store, "u1").unwrap()
    }

    fn grade_whole_deck(trainer: &mut Trainer, known: bool) {
        let Some(ActiveGame::Flashcards(engine)) = trainer.game_mut() else {
            panic!("expected flashcard session");
        };
        while !engine.is_complete() {
            engine.grade(known);
        }
    }

    #[test]
    fn create_set_validates_and_persists() {
        let dir = tempdir().unwrap();
        let mut trainer = open_trainer(&dir);

        let err = trainer.create_set("  ", extracted(&[("a", "b")]));
        assert!(matches!(err, Err(TrainerError::Validation(_))));

        trainer
            .create_set("Lektion 1", extracted(&[("el gato", "die Katze")]))
            .unwrap();
        assert_eq!(trainer.sets().len(), 1);
        assert_eq!(trainer.sets()[0].items[0].attempts(), 0);
    }

    #[test]
    fn starting_an_empty_source_is_rejected() {
        let dir = tempdir().unwrap();
        let mut trainer = open_trainer(&dir);
        // no sets at all: the tough aggregate is empty
        let err = trainer.start(
            PlaySource::ToughAggregate,
            GameMode::Flashcards,
            QuizDirection::OriginalToTranslation,
        );
        assert!(matches!(err, Err(TrainerError::Engine(EngineError::EmptyDeck))));
        assert!(!trainer.has_active_session());
    }

    #[test]
    fn finish_commits_counters_and_score() {
        let dir = tempdir().unwrap();
        let mut trainer = open_trainer(&dir);
        let set_id = trainer
            .create_set("L1", extracted(&[("uno", "eins"), ("dos", "zwei")]))
            .unwrap()
            .id
            .clone();

        trainer
            .start(
                PlaySource::Set(set_id.clone()),
                GameMode::Flashcards,
                QuizDirection::OriginalToTranslation,
            )
            .unwrap();
        grade_whole_deck(&mut trainer, true);
        let score = trainer.finish().unwrap();

        assert_eq!(score, 100);
        let set = trainer.set(&set_id).unwrap();
        assert_eq!(set.last_score, Some(100));
        assert!(set.items.iter().all(|item| item.correct_count == 1));
        assert!(!trainer.has_active_session());
        assert_eq!(trainer.streak_info().unwrap().current, 1);
    }

    #[test]
    fn abandon_discards_partial_progress() {
        let dir = tempdir().unwrap();
        let mut trainer = open_trainer(&dir);
        let set_id = trainer
            .create_set("L1", extracted(&[("uno", "eins"), ("dos", "zwei")]))
            .unwrap()
            .id
            .clone();

        trainer
            .start(
                PlaySource::Set(set_id.clone()),
                GameMode::Flashcards,
                QuizDirection::OriginalToTranslation,
            )
            .unwrap();
        if let Some(ActiveGame::Flashcards(engine)) = trainer.game_mut() {
            engine.grade(false);
        }
        trainer.abandon();

        let set = trainer.set(&set_id).unwrap();
        assert!(set.items.iter().all(|item| item.attempts() == 0));
        assert_eq!(set.last_score, None);
        assert_eq!(trainer.streak_info().unwrap().current, 0);
    }

    #[test]
    fn finish_requires_a_complete_game() {
        let dir = tempdir().unwrap();
        let mut trainer = open_trainer(&dir);
        let set_id = trainer
            .create_set("L1", extracted(&[("uno", "eins")]))
            .unwrap()
            .id
            .clone();
        trainer
            .start(
                PlaySource::Set(set_id),
                GameMode::Flashcards,
                QuizDirection::OriginalToTranslation,
            )
            .unwrap();
        assert!(matches!(
            trainer.finish(),
            Err(TrainerError::SessionNotComplete)
        ));
    }

    #[test]
    fn only_one_session_at_a_time() {
        let dir = tempdir().unwrap();
        let mut trainer = open_trainer(&dir);
        let set_id = trainer
            .create_set("L1", extracted(&[("uno", "eins")]))
            .unwrap()
            .id
            .clone();
        trainer
            .start(
                PlaySource::Set(set_id.clone()),
                GameMode::Flashcards,
                QuizDirection::OriginalToTranslation,
            )
            .unwrap();
        assert!(matches!(
            trainer.start(
                PlaySource::Set(set_id),
                GameMode::Matching,
                QuizDirection::OriginalToTranslation,
            ),
            Err(TrainerError::SessionActive)
        ));
    }

    #[test]
    fn restart_commits_the_previous_round() {
        let dir = tempdir().unwrap();
        let mut trainer = open_trainer(&dir);
        let set_id = trainer
            .create_set("L1", extracted(&[("uno", "eins"), ("dos", "zwei")]))
            .unwrap()
            .id
            .clone();

        trainer
            .start(
                PlaySource::Set(set_id.clone()),
                GameMode::Flashcards,
                QuizDirection::OriginalToTranslation,
            )
            .unwrap();
        grade_whole_deck(&mut trainer, false);
        let score = trainer.restart_full_set().unwrap();
        assert_eq!(score, 0);

        // first round is already in the books, session keeps running
        assert!(trainer.has_active_session());
        let set = trainer.set(&set_id).unwrap();
        assert!(set.items.iter().all(|item| item.wrong_count == 1));
        assert_eq!(set.last_score, Some(0));

        grade_whole_deck(&mut trainer, true);
        trainer.finish().unwrap();
        let set = trainer.set(&set_id).unwrap();
        assert!(set
            .items
            .iter()
            .all(|item| item.correct_count == 1 && item.wrong_count == 1));
        assert_eq!(set.last_score, Some(100));
    }

    #[test]
    fn repeat_mistakes_commits_once_with_both_rounds() {
        let dir = tempdir().unwrap();
        let mut trainer = open_trainer(&dir);
        let set_id = trainer
            .create_set("L1", extracted(&[("uno", "eins"), ("dos", "zwei")]))
            .unwrap()
            .id
            .clone();

        trainer
            .start(
                PlaySource::Set(set_id.clone()),
                GameMode::Flashcards,
                QuizDirection::OriginalToTranslation,
            )
            .unwrap();
        grade_whole_deck(&mut trainer, false);
        trainer.repeat_mistakes().unwrap();

        // nothing persisted yet
        assert!(trainer
            .set(&set_id)
            .unwrap()
            .items
            .iter()
            .all(|item| item.attempts() == 0));

        grade_whole_deck(&mut trainer, true);
        trainer.finish().unwrap();

        let set = trainer.set(&set_id).unwrap();
        assert!(set
            .items
            .iter()
            .all(|item| item.correct_count == 1 && item.wrong_count == 1));
    }

    #[test]
    fn repeat_mistakes_rejects_other_modes() {
        let dir = tempdir().unwrap();
        let mut trainer = open_trainer(&dir);
        let set_id = trainer
            .create_set("L1", extracted(&[("uno", "eins")]))
            .unwrap()
            .id
            .clone();
        trainer
            .start(
                PlaySource::Set(set_id),
                GameMode::MultipleChoice,
                QuizDirection::OriginalToTranslation,
            )
            .unwrap();
        assert!(matches!(
            trainer.repeat_mistakes(),
            Err(TrainerError::WrongGameMode)
        ));
    }
}
