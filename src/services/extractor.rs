use thiserror::Error;

use crate::model::{ExtractedPair, ExtractedSet, SetMetadata};

/// Boundary to the external extraction service that turns a photographed
/// word list into metadata plus word pairs. The core only consumes the
/// output shape; transport and credentials live outside this crate.
pub trait VocabExtractor {
    fn extract(&self, image: &[u8]) -> Result<ExtractedSet, ExtractError>;
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("extraction service unavailable: {0}")]
    Unavailable(String),
    #[error("no vocabulary found in image")]
    NoVocabulary,
}

/// Canned extractor for tests and offline development.
#[derive(Debug, Clone, Default)]
pub struct MockExtractor {
    pub pairs: Vec<(String, String)>,
}

impl MockExtractor {
    pub fn with_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            pairs: pairs
                .iter()
                .map(|(o, t)| (o.to_string(), t.to_string()))
                .collect(),
        }
    }
}

impl VocabExtractor for MockExtractor {
    fn extract(&self, _image: &[u8]) -> Result<ExtractedSet, ExtractError> {
        if self.pairs.is_empty() {
            return Err(ExtractError::NoVocabulary);
        }
        Ok(ExtractedSet {
            metadata: SetMetadata::default(),
            vocabulary: self
                .pairs
                .iter()
                .map(|(original, translation)| ExtractedPair {
                    original: original.clone(),
                    translation: translation.clone(),
                })
                .collect(),
        })
    }
}
