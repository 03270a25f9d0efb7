//! Static vocabulary tables: synonyms, stopwords and keyword boosts.
//!
//! All tables deserialize from JSON so a deployment can swap in its own
//! language; the defaults cover English skin-condition vocabulary.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

lazy_static! {
    static ref DEFAULT_STOPWORDS: Vec<&'static str> = vec![
        "a","about","after","again","all","also","am","an","and","any","are","around","as","at",
        "be","been","before","being","bit","but","by",
        "can","could","did","do","does","doing","during",
        "each","every","feel","feeling","feels","few","for","from",
        "get","gets","getting","got","had","has","have","having","he","her","here","his","how",
        "i","i'm","i've","if","in","into","is","it","it's","its","just",
        "like","little","lot","lots","me","more","most","much","my","myself",
        "no","not","now","of","off","on","once","only","or","other","our","over",
        "quite","really","she","since","so","some","still","such",
        "than","that","the","their","them","then","there","these","they","this","those","to","too",
        "under","until","up","very","was","we","were","what","when","where","which","while","who","why","with","would",
        "you","your",
    ];
}

/// One canonical term and the colloquial phrases that imply it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymEntry {
    pub canonical: String,
    pub phrases: Vec<String>,
}

/// Canonical term → synonym phrases, iterated in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SynonymTable {
    entries: Vec<SynonymEntry>,
}

impl SynonymTable {
    pub fn new() -> Self { Self::default() }

    /// Adds phrases for `canonical`. A canonical term already present keeps
    /// its original position and gains the new phrases.
    pub fn insert<I, S>(&mut self, canonical: &str, phrases: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let phrases: Vec<String> = phrases.into_iter().map(|p| p.into()).collect();
        match self.entries.iter_mut().find(|e| e.canonical == canonical) {
            Some(entry) => {
                for p in phrases {
                    if !entry.phrases.contains(&p) {
                        entry.phrases.push(p);
                    }
                }
            }
            None => self.entries.push(SynonymEntry { canonical: canonical.to_string(), phrases }),
        }
        self
    }

    pub fn with(mut self, canonical: &str, phrases: &[&str]) -> Self {
        self.insert(canonical, phrases.iter().copied());
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &SynonymEntry> { self.entries.iter() }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn english() -> Self {
        SynonymTable::new()
            .with("itch", &["itchy", "itching", "itches", "pruritus", "scratchy"])
            .with("rash", &["rashes", "hives", "welts", "eruption"])
            .with("pain", &["painful", "sore", "aching", "ache", "tender", "hurts", "hurting"])
            .with("fever", &["feverish", "high temperature", "pyrexia", "chills"])
            .with("swelling", &["swollen", "puffy", "inflamed"])
            .with("blister", &["blisters", "vesicle", "fluid-filled"])
            .with("scaly", &["flaky", "flaking", "peeling", "scales"])
            .with("redness", &["reddish", "flushed", "erythema"])
            .with("pus", &["pustule", "oozing", "discharge"])
            .with("dry", &["dryness", "parched", "cracked"])
            .with("pimple", &["acne", "zit", "whitehead", "blackhead"])
            .with("face", &["facial", "cheek", "forehead"])
            .with("hand", &["palm", "fingers", "knuckle"])
            .with("foot", &["feet", "toes", "heel", "sole of"])
    }
}

/// Tokens excluded from indexing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopwordSet(HashSet<String>);

impl StopwordSet {
    pub fn contains(&self, token: &str) -> bool { self.0.contains(token) }
    pub fn insert(&mut self, token: impl Into<String>) -> bool { self.0.insert(token.into()) }
    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn english() -> Self {
        DEFAULT_STOPWORDS.iter().map(|s| s.to_string()).collect()
    }
}

impl FromIterator<String> for StopwordSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        StopwordSet(iter.into_iter().collect())
    }
}

/// Token → boost multiplier. A boosted token is repeated `weight` times in
/// the token stream, raising its term frequency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordWeightTable(HashMap<String, u32>);

impl KeywordWeightTable {
    pub fn new() -> Self { Self::default() }

    pub fn from_pairs(pairs: &[(&str, u32)]) -> Self {
        let mut table = Self::new();
        for (k, w) in pairs {
            table.insert(*k, *w);
        }
        table
    }

    pub fn insert(&mut self, keyword: impl Into<String>, weight: u32) {
        self.0.insert(keyword.into(), weight.max(1));
    }

    /// Boost for `token`; never below 1 for listed keywords.
    pub fn weight(&self, token: &str) -> Option<u32> {
        self.0.get(token).map(|w| (*w).max(1))
    }

    /// Keywords in lexicographic order.
    pub fn keywords(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.0.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Union of two tables; a keyword listed in both keeps the larger boost.
    pub fn merged(&self, other: &KeywordWeightTable) -> KeywordWeightTable {
        let mut out = self.clone();
        for (k, w) in &other.0 {
            let slot = out.0.entry(k.clone()).or_insert(0);
            *slot = (*slot).max(*w);
        }
        out
    }

    /// Largest boost in the table, 0 when empty.
    pub fn max_weight(&self) -> u32 {
        self.0.values().copied().max().unwrap_or(0)
    }

    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

/// The full set of vocabulary tables an engine is configured with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    pub synonyms: SynonymTable,
    pub stopwords: StopwordSet,
    pub symptom_keywords: KeywordWeightTable,
    /// Also drive the location bonus during scoring.
    pub location_keywords: KeywordWeightTable,
}

impl Default for Lexicon {
    fn default() -> Self {
        Lexicon {
            synonyms: SynonymTable::english(),
            stopwords: StopwordSet::english(),
            symptom_keywords: KeywordWeightTable::from_pairs(&[
                ("itch", 2), ("rash", 2), ("pain", 2), ("fever", 2), ("blister", 2),
                ("swelling", 2), ("pus", 2), ("scaly", 2), ("redness", 2),
            ]),
            location_keywords: KeywordWeightTable::from_pairs(&[
                ("face", 2), ("scalp", 2), ("neck", 2), ("chest", 2), ("back", 2),
                ("arm", 2), ("arms", 2), ("leg", 2), ("legs", 2), ("hand", 2), ("foot", 2),
                ("groin", 2), ("armpit", 2), ("mouth", 2), ("lip", 2), ("lips", 2),
                ("elbow", 2), ("knee", 2),
            ]),
        }
    }
}
