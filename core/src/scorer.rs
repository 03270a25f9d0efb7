use crate::config::{LocationMatch, ScoringWeights};
use crate::index::{QueryVector, SparseVector, VectorIndex};
use crate::knowledge::Corpus;
use crate::lexicon::KeywordWeightTable;
use crate::segment::Segmenter;
use crate::tokenizer::normalize;
use serde::Serialize;
use std::collections::HashSet;

/// Per-record similarity features and their weighted sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub cosine: f32,
    pub jaccard: f32,
    pub location_bonus: f32,
    pub composite: f32,
}

/// Dot product of two unit vectors, clamped against rounding drift.
pub fn cosine(query: &SparseVector, doc: &SparseVector) -> f32 {
    query.dot(doc).clamp(0.0, 1.0)
}

/// `|a ∩ b| / |a ∪ b|`, 0 when both sets are empty.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f32 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let inter = small.iter().filter(|t| large.contains(*t)).count();
    let union = a.len() + b.len() - inter;
    if union == 0 { 0.0 } else { inter as f32 / union as f32 }
}

/// Combines cosine, token overlap, and location agreement into one score.
///
/// Location keywords are compared as whole segmented words by default, so
/// "surface" never counts as "face". [`LocationMatch::Substring`] restores
/// plain substring search for scripts written without spaces.
#[derive(Debug, Clone)]
pub struct SimilarityScorer {
    weights: ScoringWeights,
    location_keywords: Vec<LocationKeyword>,
    record_locations: Vec<LocationText>,
}

#[derive(Debug, Clone)]
struct LocationKeyword {
    text: String,
    words: Vec<String>,
}

/// A normalized text together with its segmented words.
#[derive(Debug, Clone)]
struct LocationText {
    text: String,
    words: Vec<String>,
}

impl LocationText {
    fn new(raw: &str, segmenter: &dyn Segmenter) -> Self {
        let text = normalize(raw);
        let words = segmenter.segment(&text).into_iter().map(str::to_string).collect();
        Self { text, words }
    }

    fn mentions(&self, keyword: &LocationKeyword, mode: LocationMatch) -> bool {
        match mode {
            LocationMatch::Substring => self.text.contains(keyword.text.as_str()),
            LocationMatch::Tokens => {
                !keyword.words.is_empty()
                    && self.words.windows(keyword.words.len()).any(|w| w == keyword.words.as_slice())
            }
        }
    }
}

impl SimilarityScorer {
    pub fn new(
        weights: ScoringWeights,
        location_keywords: &KeywordWeightTable,
        corpus: &Corpus,
        segmenter: &dyn Segmenter,
    ) -> Self {
        let mut keywords: Vec<LocationKeyword> = location_keywords
            .keywords()
            .into_iter()
            .map(|k| {
                let parsed = LocationText::new(k, segmenter);
                LocationKeyword { text: parsed.text, words: parsed.words }
            })
            .filter(|k| !k.text.is_empty())
            .collect();
        keywords.dedup_by(|a, b| a.text == b.text);
        let record_locations = corpus
            .records()
            .iter()
            .map(|r| LocationText::new(&r.common_locations, segmenter))
            .collect();
        Self { weights, location_keywords: keywords, record_locations }
    }

    pub fn weights(&self) -> &ScoringWeights { &self.weights }

    /// Location keywords mentioned in the raw query text.
    pub fn query_locations(&self, raw_query: &str, segmenter: &dyn Segmenter) -> Vec<&str> {
        let query = LocationText::new(raw_query, segmenter);
        self.location_keywords
            .iter()
            .filter(|k| query.mentions(k, self.weights.location_match))
            .map(|k| k.text.as_str())
            .collect()
    }

    pub fn location_bonus(&self, query_locations: &[&str], record: usize) -> f32 {
        let Some(location) = self.record_locations.get(record) else { return 0.0 };
        let hits = self
            .location_keywords
            .iter()
            .filter(|k| query_locations.contains(&k.text.as_str()))
            .filter(|k| location.mentions(k, self.weights.location_match))
            .count();
        let bonus = hits as f32 * self.weights.location_step;
        match self.weights.location_cap {
            Some(cap) => bonus.min(cap),
            None => bonus,
        }
    }

    pub fn score(
        &self,
        index: &VectorIndex,
        query: &QueryVector,
        query_locations: &[&str],
        record: usize,
    ) -> ScoreBreakdown {
        let cos = index.doc_vector(record).map(|d| cosine(&query.vector, d)).unwrap_or(0.0);
        let jac = index.doc_tokens(record).map(|t| jaccard(&query.tokens, t)).unwrap_or(0.0);
        let bonus = self.location_bonus(query_locations, record);
        let w = &self.weights;
        ScoreBreakdown {
            cosine: cos,
            jaccard: jac,
            location_bonus: bonus,
            composite: w.cosine * cos + w.jaccard * jac + w.location * bonus,
        }
    }

    /// Scores every record in corpus order.
    pub fn score_all(
        &self,
        index: &VectorIndex,
        query: &QueryVector,
        raw_query: &str,
    ) -> Vec<ScoreBreakdown> {
        let segmenter = index.analyzer().tokenizer().segmenter();
        let locations = self.query_locations(raw_query, segmenter.as_ref());
        (0..index.num_docs()).map(|doc| self.score(index, query, &locations, doc)).collect()
    }
}
