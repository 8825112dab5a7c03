// Language model: tokenizer + lemmatizer + entity recognizer, built once
use anyhow::Result;
use std::path::Path;
use tracing::{debug, info};

use super::lemma::Lemmatizer;
use super::ner::{EntityRecognizer, GazetteerFile};
use super::tokenize::{self, is_abbreviation};
use super::{EntityRecord, LanguageEngine, TokenRecord};
use crate::error::NlpResult;

/// Immutable after construction; share it behind an `Arc`.
#[derive(Debug)]
pub struct LanguageModel {
    lemmatizer: Lemmatizer,
    recognizer: EntityRecognizer,
}

impl LanguageModel {
    pub fn load(gazetteer: Option<&Path>) -> NlpResult<Self> {
        let extra = gazetteer.map(GazetteerFile::load).transpose()?;
        if let Some(path) = gazetteer {
            info!(path = %path.display(), "loaded custom gazetteer");
        }
        Ok(Self {
            lemmatizer: Lemmatizer::new(),
            recognizer: EntityRecognizer::new(extra)?,
        })
    }
}

impl LanguageEngine for LanguageModel {
    fn tokens(&self, text: &str) -> Result<Vec<TokenRecord>> {
        let tokens = tokenize::tokenize(text);
        debug!(count = tokens.len(), "tokenized");

        Ok(tokens
            .iter()
            .map(|token| {
                let surface = token.text(text);
                let proper = looks_proper(surface, token.sentence_start);
                TokenRecord {
                    text: surface.to_string(),
                    lemma: self.lemmatizer.lemmatize(surface, proper),
                }
            })
            .collect())
    }

    fn entities(&self, text: &str) -> Result<Vec<EntityRecord>> {
        let entities = self.recognizer.extract(text);
        debug!(count = entities.len(), "entities recognized");
        Ok(entities)
    }
}

// Capitalised mid-sentence words and initialisms are treated as proper nouns
fn looks_proper(word: &str, sentence_start: bool) -> bool {
    let capitalised = word.chars().next().is_some_and(char::is_uppercase);
    capitalised && (!sentence_start || is_abbreviation(word))
}
