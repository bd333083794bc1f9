use crate::constants::CHOICE_OPTION_COUNT;
use crate::engine::score::{percentage, ScoreCard};
use crate::engine::shuffle::{sample, shuffled};
use crate::engine::{EngineError, GamePhase};
use crate::model::{QuizDirection, SessionOutcome, VocabItem};

/// Feedback shown after a question is answered, until `advance` is called.
#[derive(Debug, Clone)]
pub struct AnswerFeedback {
    pub choice: String,
    pub correct: bool,
}

/// Single-question multiple choice. Distractors are other items' answer-side
/// texts drawn from the whole set without replacement; sets smaller than the
/// option count simply show fewer options. Distractor texts are not checked
/// against the correct answer, duplicate translations in the data can
/// produce a coinciding option.
#[derive(Debug)]
pub struct MultipleChoiceEngine {
    direction: QuizDirection,
    source_items: Vec<VocabItem>,
    deck: Vec<VocabItem>,
    cursor: usize,
    options: Vec<String>,
    feedback: Option<AnswerFeedback>,
    card: ScoreCard,
    phase: GamePhase,
}

impl MultipleChoiceEngine {
    pub fn new(items: Vec<VocabItem>, direction: QuizDirection) -> Result<Self, EngineError> {
        if items.is_empty() {
            return Err(EngineError::EmptyDeck);
        }
        let deck = shuffled(&items);
        let mut engine = Self {
            direction,
            source_items: items,
            deck,
            cursor: 0,
            options: Vec::new(),
            feedback: None,
            card: ScoreCard::default(),
            phase: GamePhase::InProgress,
        };
        engine.deal_question();
        Ok(engine)
    }

    fn deal_question(&mut self) {
        let current = self.deck[self.cursor].clone();
        let others: Vec<VocabItem> = self
            .source_items
            .iter()
            .filter(|item| item.id != current.id)
            .cloned()
            .collect();
        let mut options: Vec<String> = sample(&others, CHOICE_OPTION_COUNT - 1)
            .iter()
            .map(|item| item.answer_text(self.direction).to_string())
            .collect();
        options.push(current.answer_text(self.direction).to_string());
        self.options = shuffled(&options);
        self.feedback = None;
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

    pub fn current(&self) -> Option<&VocabItem> {
        if self.phase == GamePhase::Complete {
            return None;
        }
        self.deck.get(self.cursor)
    }

    pub fn question(&self) -> Option<&str> {
        self.current().map(|item| item.prompt_text(self.direction))
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn feedback(&self) -> Option<&AnswerFeedback> {
        self.feedback.as_ref()
    }

    /// Grades the chosen option against the answer-side text (exact string
    /// match) and enters the feedback state. Ignored while feedback is
    /// already showing or after completion, so double-submits never
    /// double-count.
    pub fn answer(&mut self, choice: &str) {
        if self.phase == GamePhase::Complete || self.feedback.is_some() {
            return;
        }
        let Some(current) = self.deck.get(self.cursor) else {
            return;
        };
        let correct = choice == current.answer_text(self.direction);
        let item_id = current.id.clone();
        self.card.record(&item_id, correct);
        self.feedback = Some(AnswerFeedback {
            choice: choice.to_string(),
            correct,
        });
    }

    /// Leaves the feedback state: next question, or completion after the
    /// last one. The UI calls this when its feedback pause ends.
    pub fn advance(&mut self) {
        if self.phase == GamePhase::Complete || self.feedback.is_none() {
            return;
        }
        self.cursor += 1;
        if self.cursor >= self.deck.len() {
            self.phase = GamePhase::Complete;
        } else {
            self.deal_question();
        }
    }

    pub fn outcome(&self) -> Option<SessionOutcome> {
        if self.phase != GamePhase::Complete {
            return None;
        }
        let pct = percentage(self.card.round_correct(), self.deck.len() as u32);
        Some(self.card.outcome(pct))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<VocabItem> {
        (0..n)
            .map(|i| VocabItem {
                id: format!("i{i}"),
                original: format!("orig-{i}"),
                translation: format!("trans-{i}"),
                correct_count: 0,
                wrong_count: 0,
            })
            .collect()
    }

    fn answer_current(engine: &mut MultipleChoiceEngine, correctly: bool) {
        let current = engine.current().unwrap();
        let correct_text = current
            .answer_text(QuizDirection::OriginalToTranslation)
            .to_string();
        if correctly {
            engine.answer(&correct_text);
        } else {
            engine.answer("definitely not a translation");
        }
        engine.advance();
    }

    #[test]
    fn options_hold_the_answer_and_three_distractors() {
        let engine =
            MultipleChoiceEngine::new(items(10), QuizDirection::OriginalToTranslation).unwrap();
        assert_eq!(engine.options().len(), CHOICE_OPTION_COUNT);
        let current = engine.current().unwrap();
        let correct = current.answer_text(QuizDirection::OriginalToTranslation);
        assert!(engine.options().iter().any(|option| option == correct));
    }

    #[test]
    fn tiny_sets_show_fewer_options() {
        let engine =
            MultipleChoiceEngine::new(items(2), QuizDirection::OriginalToTranslation).unwrap();
        assert_eq!(engine.options().len(), 2);

        let engine =
            MultipleChoiceEngine::new(items(1), QuizDirection::OriginalToTranslation).unwrap();
        assert_eq!(engine.options().len(), 1);
    }

    #[test]
    fn answering_every_question_completes() {
        let mut engine =
            MultipleChoiceEngine::new(items(4), QuizDirection::OriginalToTranslation).unwrap();
        answer_current(&mut engine, true);
        answer_current(&mut engine, true);
        answer_current(&mut engine, false);
        answer_current(&mut engine, true);
        assert!(engine.is_complete());

        let outcome = engine.outcome().unwrap();
        assert_eq!(outcome.score_percentage, 75);
        let wrong_total: u32 = outcome.patch.values().map(|delta| delta.wrong).sum();
        assert_eq!(wrong_total, 1);
    }

    #[test]
    fn double_submit_counts_once() {
        let mut engine =
            MultipleChoiceEngine::new(items(3), QuizDirection::OriginalToTranslation).unwrap();
        let correct_text = engine
            .current()
            .unwrap()
            .answer_text(QuizDirection::OriginalToTranslation)
            .to_string();
        engine.answer(&correct_text);
        engine.answer(&correct_text);
        engine.answer("something else");
        assert_eq!(engine.card.round_correct(), 1);
        assert_eq!(engine.cursor(), 0);
    }

    #[test]
    fn advance_without_an_answer_is_ignored() {
        let mut engine =
            MultipleChoiceEngine::new(items(3), QuizDirection::OriginalToTranslation).unwrap();
        engine.advance();
        assert_eq!(engine.cursor(), 0);
    }

    #[test]
    fn direction_flips_question_and_answer_sides() {
        let engine =
            MultipleChoiceEngine::new(items(5), QuizDirection::TranslationToOriginal).unwrap();
        let question = engine.question().unwrap();
        assert!(question.starts_with("trans-"));
        assert!(engine.options().iter().all(|o| o.starts_with("orig-")));
    }
}
