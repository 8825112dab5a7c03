// Named Entity Recognition using patterns and a gazetteer
// Candidates from every recognizer are collected, then overlaps are resolved
// by recognizer priority (earlier wins) and span length (longer wins).
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs::File;
use std::path::Path;
use tracing::debug;

use super::EntityRecord;
use crate::error::{NlpError, NlpResult};

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}\b").unwrap()
});

static MONEY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:[$£€¥]\s?\d+(?:,\d{3})*(?:\.\d+)?(?:\s?(?:thousand|million|billion|trillion)\b|[kKmMbB]n?\b)?)|\b\d+(?:,\d{3})*(?:\.\d+)?(?:\s(?:thousand|million|billion|trillion))?\s?(?:dollars?|euros?|pounds?|yen|cents?|USD|EUR|GBP)\b",
    )
    .unwrap()
});

static PERCENT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d+(?:\.\d+)?(?:%|\s?percent\b|\s?per cent\b)").unwrap()
});

static TIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b\d{1,2}:\d{2}(?:\s?(?:am\b|pm\b|a\.m\.|p\.m\.))?|\b\d{1,2}\s?(?:am\b|pm\b|a\.m\.|p\.m\.)|\b(?:noon|midnight|tonight)\b",
    )
    .unwrap()
});

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:\d{1,2}[/-]\d{1,2}[/-]\d{2,4}|\d{4}-\d{1,2}-\d{1,2}|(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\.?\s+\d{1,2}(?:st|nd|rd|th)?(?:,?\s+\d{4})?|\d{1,2}(?:st|nd|rd|th)?\s+(?:January|February|March|April|May|June|July|August|September|October|November|December)(?:\s+\d{4})?|(?:January|February|March|April|June|July|August|September|October|November|December)\s+\d{4}|(?:Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday)|(?:yesterday|today|tomorrow)|(?:19|20)\d{2}s?)\b",
    )
    .unwrap()
});

static ORGANIZATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:[A-Z][\w&'-]*\s+)+(?:Inc|LLC|Corp|Corporation|Ltd|Limited|Company|Co|Group|Institute|University|College|Bank|Foundation|Association|Agency|Council|Committee)\b\.?|\b(?:University|Bank|Institute|Department|Ministry) of(?:\s+[A-Z][\w-]*)+",
    )
    .unwrap()
});

static PERSON_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Z][a-z]+(?:\s+(?:[A-Z]\.\s+)?[A-Z][a-z]+)+\b").unwrap()
});

static ORDINAL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:\d+(?:st|nd|rd|th)|first|second|third|fourth|fifth|sixth|seventh|eighth|ninth|tenth)\b").unwrap()
});

static CARDINAL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:\d+(?:,\d{3})*(?:\.\d+)?|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve|dozen|hundred|thousand|million|billion)\b").unwrap()
});

// Capitalised words that start a capitalised run without being part of a name
static NAME_BREAKERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "The", "A", "An", "This", "That", "These", "Those", "In", "On", "At", "By", "For",
        "From", "To", "With", "And", "But", "Or", "If", "When", "While", "After", "Before",
        "He", "She", "It", "We", "They", "I", "You", "His", "Her", "Their", "Our", "My",
        "Mr", "Mrs", "Ms", "Dr", "Yesterday", "Today", "Tomorrow", "Monday", "Tuesday",
        "Wednesday", "Thursday", "Friday", "Saturday", "Sunday", "January", "February",
        "March", "April", "May", "June", "July", "August", "September", "October",
        "November", "December",
    ]
    .iter()
    .copied()
    .collect()
});

const BUILTIN_GAZETTEER: &[(&str, &[&str])] = &[
    (
        "ORG",
        &[
            "Apple", "Google", "Microsoft", "Amazon", "Facebook", "Meta", "Tesla", "IBM",
            "Intel", "Netflix", "Twitter", "OpenAI", "Nvidia", "Samsung", "Sony", "Toyota",
            "Uber", "Airbnb", "Spotify", "Oracle", "Adobe", "Walmart", "Disney", "Boeing",
            "NASA", "FBI", "CIA", "NATO", "UN", "United Nations", "European Union", "EU", "WHO",
            "BBC", "CNN", "Reuters", "Congress", "Senate", "Parliament", "Harvard", "Stanford",
            "MIT", "Oxford", "Cambridge University",
        ],
    ),
    (
        "GPE",
        &[
            "U.K.", "UK", "U.S.", "U.S.A.", "USA", "United States", "United Kingdom", "America",
            "Britain", "England", "Scotland", "Ireland", "France", "Germany", "Italy", "Spain",
            "Portugal", "China", "Japan", "India", "Russia", "Canada", "Mexico", "Brazil",
            "Australia", "Egypt", "Nigeria", "Kenya", "South Africa", "Korea", "South Korea",
            "New York", "California", "Texas", "Florida", "Hawaii", "London", "Paris", "Tokyo",
            "Beijing", "Washington", "Chicago", "Los Angeles", "San Francisco", "Boston",
            "Seattle", "Miami", "Austin", "Denver", "Portland", "Atlanta", "Berlin", "Madrid",
            "Rome", "Moscow", "Dublin", "Sydney", "Toronto", "Mumbai", "Delhi", "Cairo",
        ],
    ),
    (
        "LOC",
        &[
            "Europe", "Asia", "Africa", "Antarctica", "North America", "South America",
            "Middle East", "Pacific Ocean", "Atlantic Ocean", "Indian Ocean", "Mount Everest",
            "Sahara", "Amazon River", "Alps", "Himalayas",
        ],
    ),
];

/// Extra gazetteer entries, label -> names, loaded from JSON.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct GazetteerFile(BTreeMap<String, Vec<String>>);

impl GazetteerFile {
    pub fn load(path: &Path) -> NlpResult<Self> {
        let file = File::open(path).map_err(|source| NlpError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed: GazetteerFile =
            serde_json::from_reader(file).map_err(|e| NlpError::Gazetteer {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        for (label, names) in &parsed.0 {
            let valid_label = !label.is_empty()
                && label.chars().all(|c| c.is_ascii_uppercase() || c == '_');
            if !valid_label {
                return Err(NlpError::Gazetteer {
                    path: path.to_path_buf(),
                    reason: format!("label {label:?} must be upper-case ASCII"),
                });
            }
            if names.iter().any(|n| n.trim().is_empty()) {
                return Err(NlpError::Gazetteer {
                    path: path.to_path_buf(),
                    reason: format!("label {label} has an empty name"),
                });
            }
        }
        Ok(parsed)
    }
}

#[derive(Debug)]
struct Candidate {
    start: usize,
    end: usize,
    label: String,
    priority: usize,
}

#[derive(Debug)]
pub struct EntityRecognizer {
    names: Regex,
    labels: HashMap<String, String>,
}

impl EntityRecognizer {
    pub fn new(extra: Option<GazetteerFile>) -> NlpResult<Self> {
        let mut labels = HashMap::new();
        for (label, names) in BUILTIN_GAZETTEER {
            for name in *names {
                labels.insert((*name).to_string(), (*label).to_string());
            }
        }
        if let Some(GazetteerFile(extra)) = extra {
            for (label, names) in extra {
                for name in names {
                    labels.insert(name.trim().to_string(), label.clone());
                }
            }
        }

        // Longest alternatives first so "United States" beats "United"
        let mut keys: Vec<&String> = labels.keys().collect();
        keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        let alternation = keys
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        let names = Regex::new(&format!("(?:{alternation})")).map_err(|e| {
            NlpError::Gazetteer {
                path: "<built-in>".into(),
                reason: e.to_string(),
            }
        })?;

        debug!(entries = labels.len(), "entity gazetteer ready");
        Ok(Self { names, labels })
    }

    pub fn extract(&self, text: &str) -> Vec<EntityRecord> {
        let mut candidates = Vec::new();
        let mut push = |start: usize, end: usize, label: &str, priority: usize| {
            candidates.push(Candidate {
                start,
                end,
                label: label.to_string(),
                priority,
            });
        };

        for m in EMAIL_PATTERN.find_iter(text) {
            push(m.start(), m.end(), "EMAIL", 0);
        }
        for m in MONEY_PATTERN.find_iter(text) {
            push(m.start(), m.end(), "MONEY", 1);
        }
        for m in PERCENT_PATTERN.find_iter(text) {
            push(m.start(), m.end(), "PERCENT", 2);
        }
        for m in TIME_PATTERN.find_iter(text) {
            push(m.start(), m.end(), "TIME", 3);
        }
        for m in DATE_PATTERN.find_iter(text) {
            push(m.start(), m.end(), "DATE", 4);
        }
        for m in ORGANIZATION_PATTERN.find_iter(text) {
            let (start, end) = trim_name_breakers(text, m.start(), m.end());
            push(start, end, "ORG", 5);
        }
        for m in self.names.find_iter(text) {
            if is_word_bounded(text, m.start(), m.end()) {
                if let Some(label) = self.labels.get(m.as_str()) {
                    push(m.start(), m.end(), label, 6);
                }
            }
        }
        for m in PERSON_PATTERN.find_iter(text) {
            let (start, end) = trim_name_breakers(text, m.start(), m.end());
            // A single remaining word is too weak to call a person
            if text[start..end].contains(char::is_whitespace) {
                push(start, end, "PERSON", 7);
            }
        }
        for m in ORDINAL_PATTERN.find_iter(text) {
            push(m.start(), m.end(), "ORDINAL", 8);
        }
        for m in CARDINAL_PATTERN.find_iter(text) {
            push(m.start(), m.end(), "CARDINAL", 9);
        }

        resolve(candidates)
            .into_iter()
            .map(|c| EntityRecord {
                text: text[c.start..c.end].to_string(),
                label: c.label,
                start: c.start,
                end: c.end,
            })
            .collect()
    }
}

fn resolve(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| (b.end - b.start).cmp(&(a.end - a.start)))
            .then_with(|| a.start.cmp(&b.start))
    });

    let mut accepted: Vec<Candidate> = Vec::new();
    for candidate in candidates {
        if candidate.start == candidate.end {
            continue;
        }
        let overlaps = accepted
            .iter()
            .any(|a| candidate.start < a.end && a.start < candidate.end);
        if !overlaps {
            accepted.push(candidate);
        }
    }

    accepted.sort_by_key(|c| c.start);
    accepted
}

// Drop leading capitalised function words ("The", "In", ...) from a name span
fn trim_name_breakers(text: &str, mut start: usize, end: usize) -> (usize, usize) {
    loop {
        let span = &text[start..end];
        let first = span.split_whitespace().next().unwrap_or("");
        let bare = first.trim_end_matches('.');
        if !NAME_BREAKERS.contains(bare) || first.len() == span.len() {
            return (start, end);
        }
        let rest = &span[first.len()..];
        start = end - rest.trim_start().len();
    }
}

fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}
