// Text Summarization module using extractive ranking
// Sentences are ranked with LexRank (centrality over a cosine-similarity graph)
// or LSA (singular vectors of the term/sentence matrix); the top sentences are
// returned in document order.
use anyhow::Result;
use once_cell::sync::Lazy;
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use tracing::debug;

use super::lemma::Lemmatizer;
use super::tokenize::{sentence_spans, tokenize};
use super::{Summarizer, SummarizerKind};

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is",
        "it", "its", "of", "on", "that", "the", "to", "was", "will", "with", "this", "but",
        "they", "have", "had", "what", "when", "where", "who", "which", "why", "how", "i",
        "you", "she", "we", "do", "not", "or", "so", "if", "than", "then", "there", "these",
        "those", "their", "them", "his", "her", "our", "my", "your", "can", "would", "could",
        "should", "about", "into", "also", "just", "all", "any", "some", "such", "no", "more",
        "most", "very", "been", "being", "were", "did", "does",
    ]
    .iter()
    .copied()
    .collect()
});

// Similarity below this does not create a LexRank edge
const LEXRANK_THRESHOLD: f64 = 0.1;
const DAMPING: f64 = 0.85;
const MAX_ITERATIONS: usize = 100;
const CONVERGENCE: f64 = 1e-6;
const EIGEN_ITERATIONS: usize = 1000;
const EIGEN_EPSILON: f64 = 1e-12;
const EIGEN_CONVERGENCE: f64 = 1e-10;

#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractiveSummarizer {
    lemmatizer: Lemmatizer,
}

impl ExtractiveSummarizer {
    pub fn new() -> Self {
        Self {
            lemmatizer: Lemmatizer::new(),
        }
    }

    /// Lemmatised content words of a sentence, in order.
    fn terms(&self, sentence: &str) -> Vec<String> {
        tokenize(sentence)
            .iter()
            .map(|t| t.text(sentence))
            .filter(|w| w.chars().any(char::is_alphanumeric))
            .map(|w| self.lemmatizer.lemmatize(w, false).to_lowercase())
            .filter(|w| !STOP_WORDS.contains(w.as_str()))
            .collect()
    }
}

impl Summarizer for ExtractiveSummarizer {
    fn summarize(&self, text: &str, kind: SummarizerKind, count: usize) -> Result<Vec<String>> {
        let sentences = split_sentences(text);
        if sentences.len() <= count {
            debug!(sentences = sentences.len(), "text shorter than summary, returning as is");
            return Ok(sentences.into_iter().map(String::from).collect());
        }

        let terms: Vec<Vec<String>> = sentences.iter().map(|s| self.terms(s)).collect();
        let scores = match kind {
            SummarizerKind::LexRank => lexrank_scores(&terms),
            SummarizerKind::Lsa => lsa_scores(&terms, count),
        };
        debug!(method = kind.display_name(), ?scores, "sentences ranked");

        let selected = select_top(&scores, count);
        Ok(selected.into_iter().map(|i| sentences[i].to_string()).collect())
    }
}

/// Sentences of `text` that contain at least one letter or digit.
pub fn split_sentences(text: &str) -> Vec<&str> {
    sentence_spans(text)
        .into_iter()
        .map(|(start, end)| &text[start..end])
        .filter(|s| s.chars().any(char::is_alphanumeric))
        .collect()
}

// Indices of the `count` best scores, ties broken by position, in document order
fn select_top(scores: &[f64], count: usize) -> Vec<usize> {
    let mut ranked: Vec<usize> = (0..scores.len()).collect();
    ranked.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.cmp(&b))
    });
    ranked.truncate(count);
    ranked.sort_unstable();
    ranked
}

fn lexrank_scores(terms: &[Vec<String>]) -> Vec<f64> {
    let n = terms.len();
    let document_frequency = document_frequency(terms);
    let idf: HashMap<&str, f64> = document_frequency
        .iter()
        .map(|(term, &df)| (*term, ((1.0 + n as f64) / (1.0 + df as f64)).ln() + 1.0))
        .collect();

    let vectors: Vec<HashMap<&str, f64>> = terms
        .iter()
        .map(|sentence| {
            let tf = term_frequency(sentence);
            let max_tf = tf.values().copied().fold(0.0, f64::max);
            tf.into_iter()
                .map(|(term, count)| (term, count / max_tf * idf[term]))
                .collect()
        })
        .collect();

    let adjacency: Vec<Vec<usize>> = (0..n)
        .into_par_iter()
        .map(|i| {
            (0..n)
                .filter(|&j| {
                    i != j && cosine_similarity(&vectors[i], &vectors[j]) >= LEXRANK_THRESHOLD
                })
                .collect()
        })
        .collect();

    power_iteration(&adjacency)
}

// PageRank over an unweighted graph without self-loops; sentences without edges
// spread their mass uniformly
fn power_iteration(adjacency: &[Vec<usize>]) -> Vec<f64> {
    let n = adjacency.len();
    let teleport = (1.0 - DAMPING) / n as f64;
    let mut scores = vec![1.0 / n as f64; n];
    let mut next = vec![0.0; n];

    for iteration in 0..MAX_ITERATIONS {
        let dangling_mass: f64 = adjacency
            .iter()
            .zip(&scores)
            .filter(|(neighbours, _)| neighbours.is_empty())
            .map(|(_, score)| score)
            .sum();
        next.fill(teleport + DAMPING * dangling_mass / n as f64);

        for (node, neighbours) in adjacency.iter().enumerate() {
            if neighbours.is_empty() {
                continue;
            }
            let share = DAMPING * scores[node] / neighbours.len() as f64;
            for &neighbour in neighbours {
                next[neighbour] += share;
            }
        }

        let delta: f64 = scores.iter().zip(&next).map(|(a, b)| (a - b).abs()).sum();
        std::mem::swap(&mut scores, &mut next);
        if delta < CONVERGENCE {
            debug!(iterations = iteration + 1, "lexrank converged");
            break;
        }
    }
    scores
}

// Cost is O(n² · terms) for the Gram matrix plus O(n²) per power-iteration
// step, for `dimensions` eigenpairs only
fn lsa_scores(terms: &[Vec<String>], dimensions: usize) -> Vec<f64> {
    let n = terms.len();
    let frequencies: Vec<HashMap<&str, f64>> =
        terms.iter().map(|sentence| term_frequency(sentence)).collect();
    let max_frequency = frequencies
        .iter()
        .flat_map(|tf| tf.values().copied())
        .fold(0.0, f64::max);

    // Sparse columns of the smoothed term-by-sentence matrix
    let columns: Vec<HashMap<&str, f64>> = frequencies
        .into_iter()
        .map(|tf| {
            tf.into_iter()
                .map(|(term, count)| (term, 0.4 + 0.6 * (count / max_frequency)))
                .collect()
        })
        .collect();

    // Eigenpairs of the sentence Gram matrix give squared singular values and right singular vectors
    let mut gram = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in i..n {
            let dot = dot_product(&columns[i], &columns[j]);
            gram[i][j] = dot;
            gram[j][i] = dot;
        }
    }
    let pairs = top_eigenpairs(gram, dimensions.min(n));

    (0..n)
        .map(|sentence| {
            pairs
                .iter()
                .map(|(value, vector)| value.max(0.0) * vector[sentence].powi(2))
                .sum::<f64>()
                .sqrt()
        })
        .collect()
}

/// Largest `count` eigenpairs of a symmetric positive semi-definite matrix,
/// by power iteration with deflation. Stops early once the remainder is zero.
fn top_eigenpairs(mut a: Vec<Vec<f64>>, count: usize) -> Vec<(f64, Vec<f64>)> {
    let n = a.len();
    let mut pairs = Vec::with_capacity(count);

    for _ in 0..count {
        // Uneven start so it is not orthogonal to a uniform eigenvector
        let mut vector: Vec<f64> = (0..n).map(|i| 1.0 + (i as f64 + 1.0).sqrt()).collect();
        normalize(&mut vector);
        let mut value = 0.0;

        for _ in 0..EIGEN_ITERATIONS {
            let mut next: Vec<f64> = a
                .iter()
                .map(|row| row.iter().zip(&vector).map(|(x, y)| x * y).sum())
                .collect();
            value = normalize(&mut next);
            if value < EIGEN_EPSILON {
                break;
            }
            let delta: f64 = next.iter().zip(&vector).map(|(x, y)| (x - y).abs()).sum();
            vector = next;
            if delta < EIGEN_CONVERGENCE {
                break;
            }
        }
        if value < EIGEN_EPSILON {
            break;
        }

        for (i, row) in a.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell -= value * vector[i] * vector[j];
            }
        }
        pairs.push((value, vector));
    }
    pairs
}

// Scales to unit length and returns the previous length
fn normalize(vector: &mut [f64]) -> f64 {
    let norm = vector.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        vector.iter_mut().for_each(|x| *x /= norm);
    }
    norm
}

fn document_frequency(terms: &[Vec<String>]) -> HashMap<&str, usize> {
    let mut df = HashMap::new();
    for sentence in terms {
        let unique: HashSet<&str> = sentence.iter().map(String::as_str).collect();
        for term in unique {
            *df.entry(term).or_insert(0) += 1;
        }
    }
    df
}

fn term_frequency(sentence: &[String]) -> HashMap<&str, f64> {
    let mut tf = HashMap::new();
    for term in sentence {
        *tf.entry(term.as_str()).or_insert(0.0) += 1.0;
    }
    tf
}

fn dot_product(a: &HashMap<&str, f64>, b: &HashMap<&str, f64>) -> f64 {
    a.iter()
        .filter_map(|(term, x)| b.get(term).map(|y| x * y))
        .sum()
}

fn cosine_similarity(a: &HashMap<&str, f64>, b: &HashMap<&str, f64>) -> f64 {
    let dot = dot_product(a, b);
    let norm_a = a.values().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.values().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE: &str = "Natural language processing is a field of artificial intelligence. \
        It focuses on the interaction between computers and human language. \
        Cats are small furry animals that sleep most of the day. \
        Language models help computers process natural language text. \
        Artificial intelligence research drives progress in language processing.";

    fn summarize(text: &str, kind: SummarizerKind) -> Vec<String> {
        ExtractiveSummarizer::new().summarize(text, kind, 3).unwrap()
    }

    #[test]
    fn test_lexrank_selects_three_source_sentences() {
        let summary = summarize(ARTICLE, SummarizerKind::LexRank);
        assert_eq!(summary.len(), 3);
        for sentence in &summary {
            assert!(ARTICLE.contains(sentence.as_str()));
        }
        // The off-topic sentence shares no terms with the rest
        assert!(!summary.iter().any(|s| s.starts_with("Cats")));
    }

    #[test]
    fn test_lsa_selects_three_source_sentences() {
        let summary = summarize(ARTICLE, SummarizerKind::Lsa);
        assert_eq!(summary.len(), 3);
        for sentence in &summary {
            assert!(ARTICLE.contains(sentence.as_str()));
        }
    }

    #[test]
    fn test_summary_keeps_document_order() {
        let summary = summarize(ARTICLE, SummarizerKind::LexRank);
        let positions: Vec<usize> = summary
            .iter()
            .map(|s| ARTICLE.find(s.as_str()).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_short_text_returned_whole() {
        let text = "This is a short text. It has two sentences.";
        assert_eq!(
            summarize(text, SummarizerKind::Lsa),
            vec!["This is a short text.", "It has two sentences."]
        );
        assert_eq!(
            summarize("Just one sentence", SummarizerKind::LexRank),
            vec!["Just one sentence"]
        );
    }

    #[test]
    fn test_sentence_after_initialism_is_counted() {
        assert_eq!(
            summarize("I moved to the U.K. It rains a lot there.", SummarizerKind::LexRank),
            vec!["I moved to the U.K.", "It rains a lot there."]
        );
    }

    #[test]
    fn test_punctuation_only_yields_nothing() {
        assert!(summarize("?! ... !!", SummarizerKind::LexRank).is_empty());
        assert!(summarize("", SummarizerKind::Lsa).is_empty());
    }

    #[test]
    fn test_identical_sentences_still_limited() {
        let text = "Same words here. Same words here. Same words here. Same words here.";
        assert_eq!(summarize(text, SummarizerKind::LexRank).len(), 3);
        assert_eq!(summarize(text, SummarizerKind::Lsa).len(), 3);
    }

    #[test]
    fn test_top_eigenpairs_two_by_two() {
        let pairs = top_eigenpairs(vec![vec![2.0, 1.0], vec![1.0, 2.0]], 2);
        assert_eq!(pairs.len(), 2);
        assert!((pairs[0].0 - 3.0).abs() < 1e-6);
        assert!((pairs[1].0 - 1.0).abs() < 1e-6);
        let (_, first) = &pairs[0];
        assert!((first[0].abs() - first[1].abs()).abs() < 1e-6);
        for (_, vector) in &pairs {
            let norm: f64 = vector.iter().map(|x| x * x).sum();
            assert!((norm - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_top_eigenpairs_stops_at_rank() {
        // Rank one: a second eigenpair does not exist
        let pairs = top_eigenpairs(vec![vec![1.0; 3]; 3], 3);
        assert_eq!(pairs.len(), 1);
        assert!((pairs[0].0 - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_lsa_handles_long_input() {
        let text: String = (0..300)
            .map(|i| format!("Sentence number {i} talks about topic {} and data. ", i % 7))
            .collect();
        assert_eq!(summarize(&text, SummarizerKind::Lsa).len(), 3);
    }

    #[test]
    fn test_power_iteration_sums_to_one() {
        let scores = power_iteration(&[vec![1], vec![0, 2], vec![1], vec![]]);
        let total: f64 = scores.iter().sum();
        assert!((total - 1.0).abs() < 1e-6);
        assert!(scores[1] > scores[3]);
    }

    #[test]
    fn test_isolated_sentence_ranks_below_connected() {
        let scores = power_iteration(&[vec![1], vec![0], vec![]]);
        assert!(scores[2] < scores[0]);
        assert!((scores[0] - scores[1]).abs() < 1e-9);
    }

    #[test]
    fn test_select_top_breaks_ties_by_position() {
        assert_eq!(select_top(&[0.5, 0.9, 0.5, 0.9, 0.1], 3), vec![0, 1, 3]);
    }
}
