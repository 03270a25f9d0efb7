use crate::lexicon::{KeywordWeightTable, StopwordSet};
use crate::segment::Segmenter;
use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::sync::Arc;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
}

/// NFKC normalization, lowercasing, and whitespace collapsing.
pub fn normalize(text: &str) -> String {
    let folded = text.nfkc().collect::<String>().to_lowercase();
    WHITESPACE.replace_all(folded.trim(), " ").into_owned()
}

fn is_numeric(token: &str) -> bool {
    token.chars().any(char::is_numeric) && token.chars().all(|c| c.is_numeric() || c == '.' || c == ',')
}

/// Turns text into index terms: segment, filter noise, stem (optional), and
/// repeat boosted keywords `weight` times.
#[derive(Clone)]
pub struct Tokenizer {
    segmenter: Arc<dyn Segmenter>,
    stopwords: StopwordSet,
    boosts: KeywordWeightTable,
    stem: bool,
}

impl Tokenizer {
    pub fn new(
        segmenter: Arc<dyn Segmenter>,
        stopwords: StopwordSet,
        boosts: KeywordWeightTable,
        stem: bool,
    ) -> Self {
        Self { segmenter, stopwords, boosts, stem }
    }

    pub fn segmenter(&self) -> Arc<dyn Segmenter> { Arc::clone(&self.segmenter) }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized = normalize(text);
        let mut tokens = Vec::new();
        for word in self.segmenter.segment(&normalized) {
            if !self.keep(word) { continue; }
            let term = if self.stem { STEMMER.stem(word).into_owned() } else { word.to_string() };
            if !self.keep(&term) { continue; }
            let copies = self.boosts.weight(&term).unwrap_or(1);
            for _ in 1..copies {
                tokens.push(term.clone());
            }
            tokens.push(term);
        }
        tokens
    }

    fn keep(&self, token: &str) -> bool {
        token.chars().count() > 1 && !self.stopwords.contains(token) && !is_numeric(token)
    }
}

impl std::fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokenizer")
            .field("segmenter", &self.segmenter.name())
            .field("stopwords", &self.stopwords.len())
            .field("boosts", &self.boosts.len())
            .field("stem", &self.stem)
            .finish()
    }
}
