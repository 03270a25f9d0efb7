//! The assembled matching engine and a reloadable handle to it.
//!
//! An [`Engine`] is built once from a validated configuration and a list of
//! records, and is read-only afterwards: every request works on `&Engine`
//! and any number of threads may diagnose concurrently. Replacing the data
//! means building a new engine and swapping it in through [`SharedEngine`].

use crate::analyzer::Analyzer;
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::index::VectorIndex;
use crate::knowledge::{Corpus, DiseaseRecord, KnowledgeBuilder};
use crate::scorer::SimilarityScorer;
use crate::segment::Segmenter;
use crate::selector::{rank, DiagnosisResult, DiagnosisSelector, ScoredCandidate};
use crate::synonym::SynonymExpander;
use crate::tokenizer::Tokenizer;
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    corpus: Corpus,
    index: VectorIndex,
    scorer: SimilarityScorer,
    selector: DiagnosisSelector,
}

/// Builder for [`Engine`], for callers that bring their own segmenter.
#[derive(Default)]
pub struct EngineBuilder {
    config: EngineConfig,
    segmenter: Option<Arc<dyn Segmenter>>,
}

impl EngineBuilder {
    pub fn new() -> Self { Self::default() }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Overrides the segmenter named in the configuration.
    pub fn segmenter(mut self, segmenter: Arc<dyn Segmenter>) -> Self {
        self.segmenter = Some(segmenter);
        self
    }

    pub fn build(self, records: Vec<DiseaseRecord>) -> Result<Engine> {
        let config = self.config;
        config.validate()?;

        let lexicon = &config.lexicon;
        let segmenter = self.segmenter.unwrap_or_else(|| config.analysis.segmenter.build());
        let tokenizer = Tokenizer::new(
            Arc::clone(&segmenter),
            lexicon.stopwords.clone(),
            lexicon.symptom_keywords.merged(&lexicon.location_keywords),
            config.analysis.stem,
        );
        let analyzer = Analyzer::new(
            SynonymExpander::new(&lexicon.synonyms),
            tokenizer,
            config.analysis.ngram_min,
            config.analysis.ngram_max,
        );

        let corpus = Corpus::build(records, &KnowledgeBuilder::new(config.fields.clone()))?;
        let index = VectorIndex::fit(analyzer, corpus.texts(), config.analysis.sublinear_tf)?;
        let scorer =
            SimilarityScorer::new(config.scoring.clone(), &lexicon.location_keywords, &corpus, segmenter.as_ref());
        let selector = DiagnosisSelector::new(config.selection.clone());

        Ok(Engine { config, corpus, index, scorer, selector })
    }
}

impl Engine {
    pub fn builder() -> EngineBuilder { EngineBuilder::new() }

    pub fn build(records: Vec<DiseaseRecord>, config: EngineConfig) -> Result<Self> {
        EngineBuilder::new().config(config).build(records)
    }

    pub fn diagnose(&self, symptoms: &str) -> Result<DiagnosisResult> {
        let ranked = self.rank(symptoms)?;
        let result = self.selector.select_ranked(&ranked, &self.corpus);
        tracing::debug!(
            top_score = ranked.first().map(|c| c.score.composite).unwrap_or(0.0),
            found = result.found,
            disease = result.disease.as_deref().unwrap_or("-"),
            "diagnosed"
        );
        Ok(result)
    }

    /// Every record with its score breakdown, best first.
    pub fn rank(&self, symptoms: &str) -> Result<Vec<ScoredCandidate>> {
        if symptoms.trim().is_empty() {
            return Err(EngineError::EmptyQuery);
        }
        let query = self.index.transform(symptoms);
        let scores = self.scorer.score_all(&self.index, &query, symptoms);
        Ok(rank(&scores))
    }

    pub fn config(&self) -> &EngineConfig { &self.config }
    pub fn corpus(&self) -> &Corpus { &self.corpus }
    pub fn index(&self) -> &VectorIndex { &self.index }
    pub fn segmenter(&self) -> Arc<dyn Segmenter> { self.index.analyzer().tokenizer().segmenter() }
}

/// Cloneable handle to the live engine. Readers take an `Arc` snapshot and
/// never block a reload; a reload builds the replacement first and swaps it
/// in whole.
#[derive(Clone)]
pub struct SharedEngine {
    inner: Arc<RwLock<Arc<Engine>>>,
}

impl SharedEngine {
    pub fn new(engine: Engine) -> Self {
        Self { inner: Arc::new(RwLock::new(Arc::new(engine))) }
    }

    pub fn current(&self) -> Arc<Engine> {
        Arc::clone(&self.inner.read())
    }

    pub fn diagnose(&self, symptoms: &str) -> Result<DiagnosisResult> {
        self.current().diagnose(symptoms)
    }

    /// Rebuilds over `records` with the current configuration and segmenter.
    /// On error the running engine keeps serving.
    pub fn reload(&self, records: Vec<DiseaseRecord>) -> Result<()> {
        let current = self.current();
        let engine = EngineBuilder::new()
            .config(current.config().clone())
            .segmenter(current.segmenter())
            .build(records)?;
        let num_records = engine.corpus().len();
        self.replace(engine);
        tracing::info!(num_records, "engine reloaded");
        Ok(())
    }

    pub fn replace(&self, engine: Engine) {
        *self.inner.write() = Arc::new(engine);
    }
}
