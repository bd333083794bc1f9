pub mod choice;
pub mod flashcard;
pub mod matching;
pub mod score;
pub mod shuffle;

use thiserror::Error;

/// Lifecycle shared by all three game engines. A completed engine exposes
/// its session outcome and ignores further gameplay input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    InProgress,
    Complete,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("cannot start a session without items")]
    EmptyDeck,
}
