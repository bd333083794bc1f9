//! Input validation for set creation, shared by every caller that turns
//! user or extraction input into a persisted set.

use crate::constants::MAX_TITLE_CHARS;
use crate::model::ExtractedPair;

pub fn validate_set_title(title: &str) -> Result<(), &'static str> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err("set title must not be empty");
    }
    if trimmed.chars().count() > MAX_TITLE_CHARS {
        return Err("set title is too long");
    }
    Ok(())
}

/// At least one pair, text on both sides. Long texts are fine, phrases are
/// legitimate vocabulary.
pub fn validate_vocabulary(pairs: &[ExtractedPair]) -> Result<(), &'static str> {
    if pairs.is_empty() {
        return Err("a set needs at least one word pair");
    }
    for pair in pairs {
        if pair.original.trim().is_empty() || pair.translation.trim().is_empty() {
            return Err("word pairs must have text on both sides");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(original: &str, translation: &str) -> ExtractedPair {
        ExtractedPair {
            original: original.to_string(),
            translation: translation.to_string(),
        }
    }

    #[test]
    fn normal_title_accepted() {
        assert!(validate_set_title("Unité 3 - La famille").is_ok());
    }

    #[test]
    fn blank_title_rejected() {
        assert!(validate_set_title("   ").is_err());
    }

    #[test]
    fn over_long_title_rejected() {
        assert!(validate_set_title(&"x".repeat(MAX_TITLE_CHARS + 1)).is_err());
    }

    #[test]
    fn unicode_title_length_uses_chars() {
        assert!(validate_set_title(&"ü".repeat(MAX_TITLE_CHARS)).is_ok());
    }

    #[test]
    fn empty_vocabulary_rejected() {
        assert!(validate_vocabulary(&[]).is_err());
    }

    #[test]
    fn one_sided_pair_rejected() {
        assert!(validate_vocabulary(&[pair("la maison", " ")]).is_err());
        assert!(validate_vocabulary(&[pair("", "das Haus")]).is_err());
    }

    #[test]
    fn phrases_accepted() {
        assert!(validate_vocabulary(&[pair("avoir l'air de", "aussehen wie")]).is_ok());
    }
}
