// Lemmatizer: exception tables first, then English suffix rules
use once_cell::sync::Lazy;
use std::collections::HashMap;

static EXCEPTIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        // pronouns and clitics
        ("i", "I"), ("me", "I"), ("him", "he"), ("her", "she"), ("us", "we"), ("them", "they"),
        ("n't", "not"), ("n’t", "not"), ("'m", "be"), ("’m", "be"), ("'re", "be"), ("’re", "be"),
        ("'ve", "have"), ("’ve", "have"), ("'ll", "will"), ("’ll", "will"), ("'d", "would"),
        ("’d", "would"), ("ca", "can"), ("wo", "will"), ("sha", "shall"),
        // auxiliaries
        ("am", "be"), ("is", "be"), ("are", "be"), ("was", "be"), ("were", "be"), ("been", "be"),
        ("being", "be"), ("has", "have"), ("had", "have"), ("having", "have"), ("does", "do"),
        ("did", "do"), ("done", "do"), ("doing", "do"),
        // irregular verbs
        ("went", "go"), ("gone", "go"), ("goes", "go"), ("said", "say"), ("says", "say"),
        ("made", "make"), ("took", "take"), ("taken", "take"), ("came", "come"), ("saw", "see"),
        ("seen", "see"), ("got", "get"), ("gotten", "get"), ("knew", "know"), ("known", "know"),
        ("thought", "think"), ("gave", "give"), ("given", "give"), ("found", "find"),
        ("told", "tell"), ("became", "become"), ("left", "leave"), ("felt", "feel"),
        ("brought", "bring"), ("began", "begin"), ("begun", "begin"), ("kept", "keep"),
        ("held", "hold"), ("wrote", "write"), ("written", "write"), ("stood", "stand"),
        ("heard", "hear"), ("meant", "mean"), ("met", "meet"), ("ran", "run"), ("paid", "pay"),
        ("sat", "sit"), ("spoke", "speak"), ("spoken", "speak"), ("led", "lead"), ("grew", "grow"),
        ("grown", "grow"), ("lost", "lose"), ("fell", "fall"), ("fallen", "fall"),
        ("sent", "send"), ("built", "build"), ("understood", "understand"), ("drew", "draw"),
        ("drawn", "draw"), ("broke", "break"), ("broken", "break"), ("spent", "spend"),
        ("bought", "buy"), ("sold", "sell"), ("taught", "teach"), ("caught", "catch"),
        ("fought", "fight"), ("won", "win"), ("ate", "eat"), ("eaten", "eat"), ("used", "use"),
        ("agreed", "agree"), ("lying", "lie"), ("dying", "die"), ("tied", "tie"), ("died", "die"),
        // irregular nouns
        ("children", "child"), ("men", "man"), ("women", "woman"), ("mice", "mouse"),
        ("feet", "foot"), ("teeth", "tooth"), ("geese", "goose"), ("data", "datum"),
        ("analyses", "analysis"), ("crises", "crisis"),
        // degree
        ("better", "well"), ("best", "well"), ("worse", "bad"), ("worst", "bad"),
        ("bigger", "big"), ("biggest", "big"), ("larger", "large"), ("largest", "large"),
        ("smaller", "small"), ("smallest", "small"), ("greater", "great"), ("greatest", "great"),
        ("older", "old"), ("oldest", "old"), ("newer", "new"), ("newest", "new"),
        // words the suffix rules would damage
        ("this", "this"), ("its", "its"), ("his", "his"), ("yes", "yes"), ("news", "news"),
        ("always", "always"), ("perhaps", "perhaps"), ("series", "series"),
        ("species", "species"), ("whereas", "whereas"), ("during", "during"),
        ("something", "something"), ("nothing", "nothing"), ("anything", "anything"),
        ("everything", "everything"), ("morning", "morning"), ("evening", "evening"),
        ("building", "building"), ("wedding", "wedding"), ("ceiling", "ceiling"),
        ("hundred", "hundred"), ("indeed", "indeed"), ("naked", "naked"), ("sacred", "sacred"),
        ("wicked", "wicked"), ("kindred", "kindred"), ("billion", "billion"),
    ]
    .iter()
    .copied()
    .collect()
});

/// Dictionary/rule lemmatizer. Stateless apart from its shared tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lemmatizer;

impl Lemmatizer {
    pub fn new() -> Self {
        Lemmatizer
    }

    /// Base form of `word`. Proper nouns and tokens without letters are
    /// returned unchanged; everything else is lowercased.
    pub fn lemmatize(&self, word: &str, proper_noun: bool) -> String {
        if !word.chars().any(char::is_alphabetic) {
            return word.to_string();
        }

        let lower = word.to_lowercase();
        if let Some(base) = EXCEPTIONS.get(lower.as_str()) {
            return (*base).to_string();
        }
        if proper_noun || is_acronym(word) {
            return word.to_string();
        }
        apply_suffix_rules(&lower)
    }
}

fn is_acronym(word: &str) -> bool {
    let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() > 1 && letters.iter().all(|c| c.is_uppercase())
}

fn apply_suffix_rules(word: &str) -> String {
    let len = word.chars().count();

    if len > 4 && word.ends_with("ies") {
        return format!("{}y", &word[..word.len() - 3]);
    }
    if len > 4 && word.ends_with("sses") {
        return word[..word.len() - 2].to_string();
    }
    if len > 4 && ["ches", "shes", "xes", "zzes"].iter().any(|s| word.ends_with(s)) {
        return word[..word.len() - 2].to_string();
    }
    if len > 3
        && word.ends_with('s')
        && !["ss", "us", "is", "ous", "'s"].iter().any(|s| word.ends_with(s))
    {
        return word[..word.len() - 1].to_string();
    }
    if len > 5 && word.ends_with("iest") {
        return format!("{}y", &word[..word.len() - 4]);
    }
    if len > 4 && word.ends_with("ier") {
        return format!("{}y", &word[..word.len() - 3]);
    }
    if len > 5 && word.ends_with("ing") {
        return restore_stem(&word[..word.len() - 3]);
    }
    if len > 4 && word.ends_with("ied") {
        return format!("{}y", &word[..word.len() - 3]);
    }
    if len > 4 && word.ends_with("ed") && !word.ends_with("eed") {
        return restore_stem(&word[..word.len() - 2]);
    }
    word.to_string()
}

// Undo consonant doubling ("runn" -> "run") or restore a dropped "e" ("mak" -> "make")
fn restore_stem(stem: &str) -> String {
    let chars: Vec<char> = stem.chars().collect();
    let n = chars.len();
    if n >= 2 {
        let (a, b) = (chars[n - 2], chars[n - 1]);
        if a == b && !is_vowel(b) && !matches!(b, 'l' | 's' | 'z') {
            return chars[..n - 1].iter().collect();
        }
    }
    if (3..=4).contains(&n) {
        let (c1, v, c2) = (chars[n - 3], chars[n - 2], chars[n - 1]);
        if !is_vowel(c1) && is_vowel(v) && !is_vowel(c2) && !matches!(c2, 'w' | 'x' | 'y') {
            return format!("{stem}e");
        }
    }
    stem.to_string()
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lemma(word: &str) -> String {
        Lemmatizer::new().lemmatize(word, false)
    }

    #[test]
    fn test_irregular_forms() {
        assert_eq!(lemma("was"), "be");
        assert_eq!(lemma("went"), "go");
        assert_eq!(lemma("children"), "child");
        assert_eq!(lemma("n't"), "not");
        assert_eq!(lemma("ca"), "can");
    }

    #[test]
    fn test_suffix_rules() {
        assert_eq!(lemma("running"), "run");
        assert_eq!(lemma("looking"), "look");
        assert_eq!(lemma("buying"), "buy");
        assert_eq!(lemma("making"), "make");
        assert_eq!(lemma("stopped"), "stop");
        assert_eq!(lemma("studies"), "study");
        assert_eq!(lemma("boxes"), "box");
        assert_eq!(lemma("startups"), "startup");
        assert_eq!(lemma("happier"), "happy");
    }

    #[test]
    fn test_words_left_alone() {
        assert_eq!(lemma("glass"), "glass");
        assert_eq!(lemma("famous"), "famous");
        assert_eq!(lemma("thing"), "thing");
        assert_eq!(lemma("need"), "need");
        assert_eq!(lemma("something"), "something");
    }

    #[test]
    fn test_lowercases_common_words() {
        assert_eq!(lemma("The"), "the");
        assert_eq!(lemma("Running"), "run");
    }

    #[test]
    fn test_proper_nouns_and_symbols_keep_surface() {
        let lemmatizer = Lemmatizer::new();
        assert_eq!(lemmatizer.lemmatize("Apple", true), "Apple");
        assert_eq!(lemmatizer.lemmatize("NASA", false), "NASA");
        assert_eq!(lemmatizer.lemmatize("U.K.", false), "U.K.");
        assert_eq!(lemmatizer.lemmatize("$", false), "$");
        assert_eq!(lemmatizer.lemmatize("1,000", false), "1,000");
        assert_eq!(lemmatizer.lemmatize("I", false), "I");
    }
}
