/// Lifetime success rate below which an item counts as "tough".
pub const TOUGH_RATE_THRESHOLD: f64 = 0.81;

/// Pairs shown on one matching page; short final pages are padded up to this.
pub const MATCHING_PAGE_SIZE: usize = 6;

/// Answer options per multiple-choice question (1 correct + 3 distractors).
pub const CHOICE_OPTION_COUNT: usize = 4;

/// Maximum entries in the problem-word statistics list.
pub const MAX_PROBLEM_WORDS: usize = 10;

/// Maximum set title length in characters.
pub const MAX_TITLE_CHARS: usize = 120;
