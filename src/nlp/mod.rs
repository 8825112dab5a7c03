// NLP engines for NLPiffy
use anyhow::Result;
use serde::{Deserialize, Serialize};

pub mod engine;
pub mod lemma;
pub mod ner;
pub mod sentiment;
pub mod summarization;
pub mod tokenize;

pub use engine::LanguageModel;
pub use sentiment::LexiconScorer;
pub use summarization::ExtractiveSummarizer;

/// One token with the base form the engine assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub text: String,
    pub lemma: String,
}

/// A labelled span of the input, offsets in bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub text: String,
    pub label: String,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub polarity: f64,
    pub subjectivity: f64,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SummarizerKind {
    /// Graph centrality over sentence similarity
    #[default]
    #[value(name = "lexrank")]
    LexRank,
    /// Latent semantic analysis of the term/sentence matrix
    #[value(name = "lsa")]
    Lsa,
}

impl SummarizerKind {
    pub fn display_name(self) -> &'static str {
        match self {
            SummarizerKind::LexRank => "LexRank",
            SummarizerKind::Lsa => "LSA",
        }
    }
}

/// Segmentation, lemmatization and entity recognition.
pub trait LanguageEngine: Send + Sync {
    fn tokens(&self, text: &str) -> Result<Vec<TokenRecord>>;
    fn entities(&self, text: &str) -> Result<Vec<EntityRecord>>;
}

pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> Result<SentimentResult>;
}

/// Selects up to `count` sentences of `text`, returned in document order.
pub trait Summarizer: Send + Sync {
    fn summarize(&self, text: &str, kind: SummarizerKind, count: usize) -> Result<Vec<String>>;
}
