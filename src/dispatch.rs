// Request validation and routing to exactly one analysis handler
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::NlpResult;
use crate::nlp::sentiment::SentimentLabel;
use crate::nlp::{
    EntityRecord, ExtractiveSummarizer, LanguageEngine, LanguageModel, LexiconScorer,
    SentimentScorer, Summarizer, SummarizerKind, TokenRecord,
};

pub const SUMMARY_SENTENCES: usize = 3;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    #[default]
    Tokenize,
    Ner,
    Sentiment,
    Summarize,
}

impl Feature {
    pub const ALL: [Feature; 4] = [
        Feature::Tokenize,
        Feature::Ner,
        Feature::Sentiment,
        Feature::Summarize,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Feature::Tokenize => "Tokenization & Lemmatization",
            Feature::Ner => "Named Entity Recognition",
            Feature::Sentiment => "Sentiment Analysis",
            Feature::Summarize => "Text Summarization",
        }
    }

    /// Form/JSON value, matching the serde name.
    pub fn key(self) -> &'static str {
        match self {
            Feature::Tokenize => "tokenize",
            Feature::Ner => "ner",
            Feature::Sentiment => "sentiment",
            Feature::Summarize => "summarize",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisRequest {
    pub text: String,
    #[serde(default)]
    pub feature: Feature,
    #[serde(default)]
    pub summarizer: SummarizerKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    EmptyInput,
    Tokens {
        tokens: Vec<TokenRecord>,
    },
    Entities {
        entities: Vec<EntityRecord>,
        count: usize,
    },
    Sentiment {
        polarity: f64,
        subjectivity: f64,
        label: SentimentLabel,
    },
    Summary {
        method: SummarizerKind,
        sentences: Vec<String>,
    },
}

impl Outcome {
    pub const EMPTY_INPUT_MESSAGE: &'static str = "Please enter some text to analyze!";

    pub fn summary_text(sentences: &[String]) -> String {
        sentences.join(" ")
    }
}

/// The analysis collaborators, constructed once and shared read-only.
#[derive(Clone)]
pub struct Services {
    pub engine: Arc<dyn LanguageEngine>,
    pub sentiment: Arc<dyn SentimentScorer>,
    pub summarizer: Arc<dyn Summarizer>,
}

impl Services {
    pub fn load(gazetteer: Option<&Path>) -> NlpResult<Self> {
        let engine = LanguageModel::load(gazetteer)?;
        info!("language model ready");
        Ok(Self {
            engine: Arc::new(engine),
            sentiment: Arc::new(LexiconScorer::new()),
            summarizer: Arc::new(ExtractiveSummarizer::new()),
        })
    }
}

pub fn dispatch(services: &Services, request: &AnalysisRequest) -> Result<Outcome> {
    if request.text.trim().is_empty() {
        warn!("empty input, nothing to analyze");
        return Ok(Outcome::EmptyInput);
    }

    let text = request.text.as_str();
    info!(
        feature = request.feature.key(),
        chars = text.chars().count(),
        "running analysis"
    );

    let outcome = match request.feature {
        Feature::Tokenize => {
            let tokens = services.engine.tokens(text).context("tokenization failed")?;
            Outcome::Tokens { tokens }
        }
        Feature::Ner => {
            let entities = services
                .engine
                .entities(text)
                .context("entity recognition failed")?;
            let count = entities.len();
            Outcome::Entities { entities, count }
        }
        Feature::Sentiment => {
            let result = services.sentiment.score(text).context("sentiment scoring failed")?;
            Outcome::Sentiment {
                polarity: result.polarity,
                subjectivity: result.subjectivity,
                label: SentimentLabel::from_polarity(result.polarity),
            }
        }
        Feature::Summarize => {
            let sentences = services
                .summarizer
                .summarize(text, request.summarizer, SUMMARY_SENTENCES)
                .context("summarization failed")?;
            Outcome::Summary {
                method: request.summarizer,
                sentences,
            }
        }
    };
    Ok(outcome)
}
