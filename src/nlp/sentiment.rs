// Sentiment Analysis module using lexicon-based approach
// Each lexicon word carries a (polarity, subjectivity) pair; the document score
// is the mean over matched words after intensifier and negation adjustments.
use anyhow::Result;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

use super::{SentimentResult, SentimentScorer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Sign of the raw polarity, no tolerance band.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.0 {
            SentimentLabel::Positive
        } else if polarity < 0.0 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
        };
        f.write_str(name)
    }
}

// word -> (polarity, subjectivity)
static LEXICON: Lazy<HashMap<&'static str, (f64, f64)>> = Lazy::new(|| {
    [
        ("good", (0.7, 0.6)), ("great", (0.8, 0.75)), ("excellent", (1.0, 1.0)),
        ("wonderful", (1.0, 1.0)), ("fantastic", (0.4, 0.9)), ("amazing", (0.6, 0.9)),
        ("awesome", (1.0, 1.0)), ("love", (0.5, 0.6)), ("loved", (0.7, 0.8)),
        ("lovely", (0.5, 0.75)), ("happy", (0.8, 1.0)), ("glad", (0.5, 1.0)),
        ("pleased", (0.5, 1.0)), ("delighted", (0.7, 1.0)), ("satisfied", (0.5, 1.0)),
        ("perfect", (1.0, 1.0)), ("beautiful", (0.85, 1.0)), ("brilliant", (0.9, 1.0)),
        ("outstanding", (0.5, 0.67)), ("superb", (1.0, 1.0)), ("magnificent", (1.0, 1.0)),
        ("marvelous", (0.8, 0.9)), ("terrific", (1.0, 1.0)), ("fabulous", (0.4, 0.9)),
        ("exceptional", (0.67, 1.0)), ("impressive", (1.0, 1.0)), ("remarkable", (0.75, 0.75)),
        ("best", (1.0, 0.3)), ("better", (0.5, 0.5)), ("nice", (0.6, 1.0)),
        ("positive", (0.23, 0.55)), ("success", (0.3, 0.4)), ("successful", (0.75, 0.95)),
        ("enjoy", (0.4, 0.5)), ("enjoyed", (0.4, 0.5)), ("pleasant", (0.73, 0.97)),
        ("comfortable", (0.4, 0.75)), ("excited", (0.38, 0.75)), ("exciting", (0.3, 0.8)),
        ("thrilled", (0.6, 0.8)), ("favorite", (0.5, 1.0)), ("like", (0.1, 0.2)),
        ("fun", (0.3, 0.2)), ("cool", (0.35, 0.65)), ("fine", (0.42, 0.5)),
        ("helpful", (0.5, 0.5)), ("easy", (0.43, 0.83)), ("fast", (0.2, 0.6)),
        ("interesting", (0.5, 0.5)), ("smart", (0.21, 0.64)), ("win", (0.8, 0.4)),
        ("bad", (-0.7, 0.67)), ("terrible", (-1.0, 1.0)), ("awful", (-1.0, 1.0)),
        ("horrible", (-1.0, 1.0)), ("poor", (-0.4, 0.6)), ("worst", (-1.0, 1.0)),
        ("worse", (-0.4, 0.6)), ("hate", (-0.8, 0.9)), ("hated", (-0.9, 0.7)),
        ("angry", (-0.5, 1.0)), ("sad", (-0.5, 1.0)), ("upset", (-0.3, 0.4)),
        ("disappointed", (-0.75, 0.75)), ("disappointing", (-0.6, 0.7)),
        ("unhappy", (-0.6, 0.9)), ("failed", (-0.5, 0.3)), ("failure", (-0.32, 0.3)),
        ("wrong", (-0.5, 0.9)), ("difficult", (-0.5, 1.0)), ("hard", (-0.29, 0.54)),
        ("broken", (-0.4, 0.4)), ("painful", (-0.7, 0.9)), ("ugly", (-0.7, 1.0)),
        ("boring", (-1.0, 1.0)), ("stupid", (-0.8, 1.0)), ("annoying", (-0.8, 0.9)),
        ("frustrating", (-0.4, 0.6)), ("frustrated", (-0.7, 0.7)), ("nasty", (-1.0, 1.0)),
        ("unpleasant", (-0.56, 0.6)), ("uncomfortable", (-0.5, 0.5)), ("slow", (-0.3, 0.39)),
        ("useless", (-0.5, 0.0)), ("disaster", (-0.6, 0.7)), ("negative", (-0.3, 0.4)),
        ("scary", (-0.5, 1.0)), ("dangerous", (-0.6, 0.9)), ("dirty", (-0.6, 0.8)),
    ]
    .iter()
    .copied()
    .collect()
});

// word -> multiplier applied to the following lexicon word
static INTENSIFIERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    [
        ("very", 1.3), ("really", 1.2), ("extremely", 1.5), ("absolutely", 1.5),
        ("incredibly", 1.4), ("highly", 1.3), ("totally", 1.3), ("so", 1.2),
        ("quite", 1.1), ("pretty", 1.1), ("slightly", 0.6), ("somewhat", 0.7),
    ]
    .iter()
    .copied()
    .collect()
});

static NEGATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "not", "no", "never", "nothing", "nobody", "nowhere", "neither", "nor", "none",
        "n't", "cannot",
    ]
    .iter()
    .copied()
    .collect()
});

const NEGATION_FACTOR: f64 = -0.5;
// Preceding words searched for a negation
const NEGATION_WINDOW: usize = 2;

#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl LexiconScorer {
    pub fn new() -> Self {
        LexiconScorer
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> Result<SentimentResult> {
        Ok(analyze_sentiment_text(text))
    }
}

pub fn analyze_sentiment_text(text: &str) -> SentimentResult {
    let words = sentiment_words(text);

    let mut polarity_sum = 0.0;
    let mut subjectivity_sum = 0.0;
    let mut matched = 0usize;

    for (i, word) in words.iter().enumerate() {
        let Some(&(polarity, subjectivity)) = LEXICON.get(word.as_str()) else {
            continue;
        };

        let multiplier = i
            .checked_sub(1)
            .and_then(|p| INTENSIFIERS.get(words[p].as_str()))
            .copied()
            .unwrap_or(1.0);

        // Negation may sit before an intensifier: "not very good"
        let is_negated = words[i.saturating_sub(NEGATION_WINDOW)..i]
            .iter()
            .any(|w| NEGATIONS.contains(w.as_str()));

        let mut p = (polarity * multiplier).clamp(-1.0, 1.0);
        let s = (subjectivity * multiplier).clamp(0.0, 1.0);
        if is_negated {
            p *= NEGATION_FACTOR;
        }

        polarity_sum += p;
        subjectivity_sum += s;
        matched += 1;
    }

    if matched == 0 {
        return SentimentResult {
            polarity: 0.0,
            subjectivity: 0.0,
        };
    }

    SentimentResult {
        polarity: (polarity_sum / matched as f64).clamp(-1.0, 1.0),
        subjectivity: (subjectivity_sum / matched as f64).clamp(0.0, 1.0),
    }
}

// Lowercased words with "n't" split off so "isn't good" reads as a negation
fn sentiment_words(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    for raw in text
        .to_lowercase()
        .replace('’', "'")
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .map(|w| w.trim_matches('\''))
        .filter(|s| !s.is_empty())
    {
        match raw.strip_suffix("n't") {
            Some(stem) if !stem.is_empty() => {
                words.push(stem.to_string());
                words.push("n't".to_string());
            }
            _ => words.push(raw.to_string()),
        }
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_sentiment_positive() {
        let result = analyze_sentiment_text("I love this! It is amazing and wonderful.");
        assert!(result.polarity > 0.0);
        assert_eq!(
            SentimentLabel::from_polarity(result.polarity),
            SentimentLabel::Positive
        );
        assert!((result.polarity - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_analyze_sentiment_negative() {
        let result = analyze_sentiment_text("This is terrible and awful. I hate it!");
        assert!(result.polarity < 0.0);
        assert!(result.subjectivity > 0.5);
    }

    #[test]
    fn test_analyze_sentiment_neutral() {
        let result = analyze_sentiment_text("The sky is blue. The grass is green.");
        assert_eq!(result.polarity, 0.0);
        assert_eq!(result.subjectivity, 0.0);
        assert_eq!(
            SentimentLabel::from_polarity(result.polarity),
            SentimentLabel::Neutral
        );
    }

    #[test]
    fn test_negation_handling() {
        let result = analyze_sentiment_text("This is not good at all.");
        assert!(result.polarity < 0.0);

        let contracted = analyze_sentiment_text("This isn't good.");
        assert!((contracted.polarity - result.polarity).abs() < 1e-9);
    }

    #[test]
    fn test_negation_window_is_two_words() {
        let negated = analyze_sentiment_text("not very good");
        assert!(negated.polarity < 0.0);

        let distant = analyze_sentiment_text("No one is good");
        assert!((distant.polarity - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_intensifier_strengthens() {
        let plain = analyze_sentiment_text("good");
        let intense = analyze_sentiment_text("very good");
        assert!(intense.polarity > plain.polarity);
        assert!(intense.polarity <= 1.0);
    }

    #[test]
    fn test_scores_stay_in_range() {
        let result = analyze_sentiment_text("extremely perfect absolutely excellent");
        assert!((-1.0..=1.0).contains(&result.polarity));
        assert!((0.0..=1.0).contains(&result.subjectivity));
    }

    #[test]
    fn test_label_is_sign_exact() {
        assert_eq!(SentimentLabel::from_polarity(0.0), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_polarity(-0.0), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_polarity(0.4999), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_polarity(-0.0001), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_polarity(1e-12), SentimentLabel::Positive);
    }
}
