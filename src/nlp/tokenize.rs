// Rule-based English tokenizer with sentence boundaries
//
// Splits on whitespace, then peels prefix/suffix punctuation and English
// clitics off each chunk. Offsets are byte positions into the source text.
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub start: usize,
    pub end: usize,
    pub sentence_start: bool,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

static CHUNK_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").unwrap());

static INITIALISM_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[A-Za-z]\.){2,}$").unwrap());

const PREFIXES: &[char] = &[
    '"', '\'', '(', '[', '{', '<', '$', '£', '€', '¥', '#', '“', '‘', '«',
];

const SUFFIXES: &[char] = &[
    '.', ',', '!', '?', ';', ':', ')', ']', '}', '>', '"', '\'', '%', '”', '’', '»',
];

const SENTENCE_TERMINALS: &[&str] = &[".", "!", "?", "...", "…"];

// Closing marks that stay attached to the sentence they end
const CLOSERS: &[&str] = &["\"", "'", ")", "]", "”", "’", "»"];

// Longest first so "n't" wins over "'t"-like overlaps
const CLITICS: &[&str] = &[
    "n't", "n’t", "'re", "’re", "'ve", "’ve", "'ll", "’ll", "'s", "’s", "'m", "’m", "'d", "’d",
];

// Abbreviations that precede a name and never close a sentence
const TITLES: &[&str] = &[
    "mr.", "mrs.", "ms.", "dr.", "prof.", "sr.", "jr.", "st.", "mt.", "ft.", "gen.", "gov.",
    "sen.", "rep.", "vs.", "no.", "fig.",
];

static ABBREVIATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "mr.", "mrs.", "ms.", "dr.", "prof.", "sr.", "jr.", "st.", "vs.", "etc.", "inc.",
        "corp.", "ltd.", "co.", "no.", "jan.", "feb.", "mar.", "apr.", "jun.", "jul.", "aug.",
        "sep.", "sept.", "oct.", "nov.", "dec.", "mt.", "ft.", "gen.", "gov.", "sen.", "rep.",
        "dept.", "est.", "approx.", "fig.",
    ]
    .iter()
    .copied()
    .collect()
});

pub fn tokenize(text: &str) -> Vec<Token> {
    let mut spans = Vec::new();
    for chunk in CHUNK_PATTERN.find_iter(text) {
        split_chunk(chunk.as_str(), chunk.start(), &mut spans);
    }

    let mut tokens = Vec::with_capacity(spans.len());
    let mut at_boundary = true;
    let mut after_terminal = false;
    let mut after_abbreviation = false;
    for (start, end) in spans {
        let piece = &text[start..end];
        if after_terminal && !CLOSERS.contains(&piece) {
            at_boundary = true;
            after_terminal = false;
        }
        // "the U.K. It rains": the abbreviation's period also ends the sentence
        if after_abbreviation && piece.chars().next().is_some_and(char::is_uppercase) {
            at_boundary = true;
        }
        tokens.push(Token {
            start,
            end,
            sentence_start: at_boundary,
        });
        at_boundary = false;
        after_abbreviation = may_close_sentence(piece);
        if SENTENCE_TERMINALS.contains(&piece) {
            after_terminal = true;
        }
    }
    tokens
}

/// Byte ranges of sentences, each running from its first token to its last.
pub fn sentence_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut current: Option<(usize, usize)> = None;
    for token in tokenize(text) {
        if token.sentence_start {
            if let Some(span) = current.take() {
                spans.push(span);
            }
        }
        current = Some(match current {
            Some((start, _)) => (start, token.end),
            None => (token.start, token.end),
        });
    }
    if let Some(span) = current {
        spans.push(span);
    }
    spans
}

pub fn is_abbreviation(word: &str) -> bool {
    ABBREVIATIONS.contains(word.to_lowercase().as_str()) || INITIALISM_PATTERN.is_match(word)
}

fn may_close_sentence(piece: &str) -> bool {
    piece.len() > 1
        && piece.ends_with('.')
        && is_abbreviation(piece)
        && !TITLES.contains(&piece.to_lowercase().as_str())
}

fn split_chunk(chunk: &str, offset: usize, out: &mut Vec<(usize, usize)>) {
    let mut start = 0;
    let mut end = chunk.len();

    while end - start > 1 {
        match chunk[start..end].chars().next() {
            Some(c) if PREFIXES.contains(&c) => {
                out.push((offset + start, offset + start + c.len_utf8()));
                start += c.len_utf8();
            }
            _ => break,
        }
    }

    let mut suffixes = Vec::new();
    while end - start > 1 {
        let core = &chunk[start..end];
        if core == "..." {
            break;
        }
        if core.ends_with("...") {
            suffixes.push((end - 3, end));
            end -= 3;
            continue;
        }
        match core.chars().next_back() {
            Some('.') if is_abbreviation(core) => break,
            Some(c) if SUFFIXES.contains(&c) => {
                suffixes.push((end - c.len_utf8(), end));
                end -= c.len_utf8();
            }
            _ => break,
        }
    }

    let core = &chunk[start..end];
    match clitic_split(core) {
        Some(at) => {
            out.push((offset + start, offset + start + at));
            out.push((offset + start + at, offset + end));
        }
        None if start < end => out.push((offset + start, offset + end)),
        None => {}
    }
    out.extend(suffixes.into_iter().rev().map(|(s, e)| (offset + s, offset + e)));
}

fn clitic_split(core: &str) -> Option<usize> {
    // ASCII lowercasing keeps byte offsets aligned with `core`
    let lower = core.to_ascii_lowercase();
    CLITICS
        .iter()
        .find(|c| lower.len() > c.len() && lower.ends_with(*c))
        .map(|c| core.len() - c.len())
        .filter(|&at| core.is_char_boundary(at))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(text: &str) -> Vec<&str> {
        tokenize(text).iter().map(|t| t.text(text)).collect()
    }

    #[test]
    fn test_splits_trailing_punctuation() {
        assert_eq!(
            texts("Hello, world! This is a test."),
            vec!["Hello", ",", "world", "!", "This", "is", "a", "test", "."]
        );
    }

    #[test]
    fn test_keeps_initialisms_and_splits_currency() {
        assert_eq!(
            texts("Apple is looking at buying a U.K. startup for $1 billion."),
            vec![
                "Apple", "is", "looking", "at", "buying", "a", "U.K.", "startup", "for", "$", "1",
                "billion", "."
            ]
        );
    }

    #[test]
    fn test_splits_clitics() {
        assert_eq!(
            texts("I don't think it's Bob's."),
            vec!["I", "do", "n't", "think", "it", "'s", "Bob", "'s", "."]
        );
    }

    #[test]
    fn test_brackets_and_quotes() {
        assert_eq!(texts("(\"quoted\")"), vec!["(", "\"", "quoted", "\"", ")"]);
    }

    #[test]
    fn test_ellipsis_is_one_token() {
        assert_eq!(texts("Wait... what"), vec!["Wait", "...", "what"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t").is_empty());
    }

    #[test]
    fn test_sentence_starts() {
        let text = "One fish. Two fish! Red fish?";
        let starts: Vec<&str> = tokenize(text)
            .iter()
            .filter(|t| t.sentence_start)
            .map(|t| t.text(text))
            .collect();
        assert_eq!(starts, vec!["One", "Two", "Red"]);
    }

    #[test]
    fn test_sentence_spans_are_substrings() {
        let text = "He said \"stop.\" Then he left. Dr. Smith stayed";
        let sentences: Vec<&str> = sentence_spans(text)
            .into_iter()
            .map(|(s, e)| &text[s..e])
            .collect();
        assert_eq!(
            sentences,
            vec!["He said \"stop.\"", "Then he left.", "Dr. Smith stayed"]
        );
    }

    #[test]
    fn test_initialism_can_end_a_sentence() {
        let text = "I moved to the U.K. It rains a lot there. Prof. Jones agrees.";
        let sentences: Vec<&str> = sentence_spans(text)
            .into_iter()
            .map(|(s, e)| &text[s..e])
            .collect();
        assert_eq!(
            sentences,
            vec!["I moved to the U.K.", "It rains a lot there.", "Prof. Jones agrees."]
        );

        let mid_sentence = "A U.K. startup grew.";
        assert_eq!(sentence_spans(mid_sentence).len(), 1);
    }

    #[test]
    fn test_offsets_with_multibyte_text() {
        let text = "Café “naïve” résumé.";
        let tokens = tokenize(text);
        for t in &tokens {
            assert!(text.is_char_boundary(t.start) && text.is_char_boundary(t.end));
        }
        assert_eq!(
            texts(text),
            vec!["Café", "“", "naïve", "”", "résumé", "."]
        );
    }
}
