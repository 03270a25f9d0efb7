use crate::analyzer::Analyzer;
use crate::error::{EngineError, Result};
use std::collections::{HashMap, HashSet};

pub type TermId = u32;

/// Sparse vector as `(term_id, weight)` pairs sorted by term id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(TermId, f32)>,
}

impl SparseVector {
    /// Builds an L2-normalized vector from raw weights. An all-zero input
    /// stays empty.
    pub fn normalized(weights: HashMap<TermId, f32>) -> Self {
        let mut entries: Vec<(TermId, f32)> = weights.into_iter().filter(|(_, w)| *w > 0.0).collect();
        entries.sort_unstable_by_key(|(tid, _)| *tid);
        let norm = entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for (_, w) in entries.iter_mut() {
                *w /= norm;
            }
        }
        Self { entries }
    }

    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j, mut sum) = (0, 0, 0.0f32);
        while i < self.entries.len() && j < other.entries.len() {
            let (a, wa) = self.entries[i];
            let (b, wb) = other.entries[j];
            match a.cmp(&b) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt()
    }

    pub fn weight(&self, term: TermId) -> f32 {
        self.entries.binary_search_by_key(&term, |(tid, _)| *tid).map(|i| self.entries[i].1).unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(TermId, f32)> { self.entries.iter() }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

/// A query projected into the fitted vector space.
#[derive(Debug, Clone, Default)]
pub struct QueryVector {
    pub vector: SparseVector,
    /// Distinct tokens after filtering, before n-grams.
    pub tokens: HashSet<String>,
}

/// TF-IDF index over a fixed set of documents. Vocabulary and IDF are
/// computed once in [`VectorIndex::fit`] and never change afterwards;
/// queries are projected with [`VectorIndex::transform`].
#[derive(Debug, Clone)]
pub struct VectorIndex {
    analyzer: Analyzer,
    dictionary: HashMap<String, TermId>,
    df: Vec<u32>,
    idf: Vec<f32>,
    docs: Vec<SparseVector>,
    doc_tokens: Vec<HashSet<String>>,
    sublinear_tf: bool,
}

#[inline]
fn tf_weight(count: u32, sublinear: bool) -> f32 {
    match count {
        0 => 0.0,
        c if sublinear => 1.0 + (c as f32).ln(),
        c => c as f32,
    }
}

/// Smoothed IDF, `ln((1 + n) / (1 + df)) + 1`. Always ≥ 1 for `df ≤ n`.
#[inline]
fn smoothed_idf(num_docs: usize, df: u32) -> f32 {
    ((1.0 + num_docs as f32) / (1.0 + df as f32)).ln() + 1.0
}

impl VectorIndex {
    pub fn fit(analyzer: Analyzer, documents: &[String], sublinear_tf: bool) -> Result<Self> {
        if documents.is_empty() {
            return Err(EngineError::CorpusEmpty);
        }

        let mut dictionary: HashMap<String, TermId> = HashMap::new();
        let mut df: Vec<u32> = Vec::new();
        let mut doc_counts: Vec<HashMap<TermId, u32>> = Vec::with_capacity(documents.len());
        let mut doc_tokens: Vec<HashSet<String>> = Vec::with_capacity(documents.len());

        for text in documents {
            let tokens = analyzer.tokens(text);
            let mut counts: HashMap<TermId, u32> = HashMap::new();
            for term in analyzer.terms(&tokens) {
                let next_id = dictionary.len() as TermId;
                let tid = *dictionary.entry(term).or_insert_with(|| {
                    df.push(0);
                    next_id
                });
                *counts.entry(tid).or_insert(0) += 1;
            }
            for tid in counts.keys() {
                df[*tid as usize] += 1;
            }
            doc_counts.push(counts);
            doc_tokens.push(tokens.into_iter().collect());
        }

        let n = documents.len();
        let idf: Vec<f32> = df.iter().map(|d| smoothed_idf(n, *d)).collect();
        let docs = doc_counts
            .into_iter()
            .map(|counts| {
                let weights = counts
                    .into_iter()
                    .map(|(tid, c)| (tid, tf_weight(c, sublinear_tf) * idf[tid as usize]))
                    .collect();
                SparseVector::normalized(weights)
            })
            .collect();

        tracing::info!(
            num_docs = n,
            num_terms = dictionary.len(),
            sublinear_tf,
            "fitted tf-idf index"
        );
        Ok(Self { analyzer, dictionary, df, idf, docs, doc_tokens, sublinear_tf })
    }

    /// Projects `text` onto the fitted vocabulary. Terms the index has never
    /// seen contribute nothing.
    pub fn transform(&self, text: &str) -> QueryVector {
        let tokens = self.analyzer.tokens(text);
        let mut counts: HashMap<TermId, u32> = HashMap::new();
        for term in self.analyzer.terms(&tokens) {
            if let Some(&tid) = self.dictionary.get(&term) {
                *counts.entry(tid).or_insert(0) += 1;
            }
        }
        let weights = counts
            .into_iter()
            .map(|(tid, c)| (tid, tf_weight(c, self.sublinear_tf) * self.idf[tid as usize]))
            .collect();
        QueryVector { vector: SparseVector::normalized(weights), tokens: tokens.into_iter().collect() }
    }

    pub fn analyzer(&self) -> &Analyzer { &self.analyzer }
    pub fn num_docs(&self) -> usize { self.docs.len() }
    pub fn vocabulary_len(&self) -> usize { self.dictionary.len() }
    pub fn term_id(&self, term: &str) -> Option<TermId> { self.dictionary.get(term).copied() }
    pub fn idf(&self, term: &str) -> Option<f32> { self.term_id(term).map(|tid| self.idf[tid as usize]) }
    pub fn doc_freq(&self, term: &str) -> Option<u32> { self.term_id(term).map(|tid| self.df[tid as usize]) }
    pub fn doc_vector(&self, doc: usize) -> Option<&SparseVector> { self.docs.get(doc) }
    pub fn doc_tokens(&self, doc: usize) -> Option<&HashSet<String>> { self.doc_tokens.get(doc) }
}
