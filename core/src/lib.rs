//! Symptom matching: ranks a small knowledge base of conditions against a
//! free-text symptom description.
//!
//! Pipeline: [`synonym`] expansion → [`tokenizer`] → TF-IDF [`index`] →
//! [`scorer`] → [`selector`]. [`engine::Engine`] wires the stages together.

pub mod analyzer;
pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod knowledge;
pub mod lexicon;
pub mod scorer;
pub mod segment;
pub mod selector;
pub mod synonym;
pub mod tokenizer;

pub use config::{AnalysisConfig, EngineConfig, FieldWeights, ScoringWeights, SelectionConfig};
pub use engine::{Engine, EngineBuilder, SharedEngine};
pub use error::{EngineError, Result};
pub use index::{QueryVector, SparseVector, TermId, VectorIndex};
pub use knowledge::{Corpus, DiseaseRecord, KnowledgeBuilder, RawDiseaseRecord};
pub use lexicon::{KeywordWeightTable, Lexicon, StopwordSet, SynonymTable};
pub use scorer::{ScoreBreakdown, SimilarityScorer};
pub use selector::{Alternative, DiagnosisResult, DiagnosisSelector, ScoredCandidate};
