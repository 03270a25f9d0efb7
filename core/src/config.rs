//! Engine configuration.
//!
//! Every tunable lives here as one explicit value. Sections default
//! independently, so a JSON file only needs the keys it overrides.

use crate::error::{EngineError, Result};
use crate::lexicon::Lexicon;
use crate::segment::SegmenterKind;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Ceiling for keyword boosts and field repetition counts. Each unit adds one
/// token copy per occurrence, so larger values only inflate the token stream.
pub const MAX_REPEAT: u32 = 16;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub analysis: AnalysisConfig,
    pub fields: FieldWeights,
    pub scoring: ScoringWeights,
    pub selection: SelectionConfig,
    pub lexicon: Lexicon,
}

/// Text analysis and vectorization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Shortest token n-gram indexed; 1 keeps single tokens.
    pub ngram_min: usize,
    pub ngram_max: usize,
    /// Term frequency as `1 + ln(count)` instead of the raw count. Dampens
    /// the repetition introduced by keyword boosts and field weights.
    pub sublinear_tf: bool,
    /// English Snowball stemming after filtering.
    pub stem: bool,
    pub segmenter: SegmenterKind,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            ngram_min: 1,
            ngram_max: 3,
            sublinear_tf: true,
            stem: false,
            segmenter: SegmenterKind::UnicodeWords,
        }
    }
}

/// How many times each record field is repeated in its knowledge text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldWeights {
    pub name: usize,
    pub primary_symptoms: usize,
    pub secondary_symptoms: usize,
    pub common_locations: usize,
    pub treatment: usize,
    /// Copied into secondary symptoms when the treatment mentions it and the
    /// secondary symptoms do not. Empty disables the rule.
    pub fever_cue: String,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            name: 2,
            primary_symptoms: 4,
            secondary_symptoms: 2,
            common_locations: 3,
            treatment: 1,
            fever_cue: "fever".to_string(),
        }
    }
}

/// `composite = cosine·cos + jaccard·jac + location·bonus`.
///
/// `bonus` grows by `location_step` per location keyword found in both the
/// query and the record and is clamped to `location_cap`. With the defaults
/// the composite stays within [0, 1]; with no cap its upper bound is
/// `cosine + jaccard + location·location_step·k` for `k` location keywords.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub cosine: f32,
    pub jaccard: f32,
    pub location: f32,
    pub location_step: f32,
    pub location_cap: Option<f32>,
    pub location_match: LocationMatch,
}

/// How a location keyword is found in the query and in a record's
/// location field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationMatch {
    /// The keyword's words appear as consecutive segmented words.
    #[default]
    Tokens,
    /// The keyword appears anywhere in the normalized text. For scripts
    /// written without spaces when no dictionary segmenter is available.
    Substring,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            cosine: 0.7,
            jaccard: 0.2,
            location: 0.1,
            location_step: 0.3,
            location_cap: Some(1.0),
            location_match: LocationMatch::Tokens,
        }
    }
}

impl ScoringWeights {
    /// Largest composite score these weights can produce, given how many
    /// location keywords exist.
    pub fn upper_bound(&self, location_keywords: usize) -> f32 {
        let bonus = match self.location_cap {
            Some(cap) => cap.min(self.location_step * location_keywords as f32),
            None => self.location_step * location_keywords as f32,
        };
        self.cosine + self.jaccard + self.location * bonus
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Minimum composite score for a positive diagnosis.
    pub confidence_threshold: f32,
    /// Runner-ups scoring at least `closeness_band × top` are reported as
    /// alternatives.
    pub closeness_band: f32,
    pub max_alternatives: usize,
    /// Returned when nothing clears the threshold.
    pub follow_up_prompts: Vec<String>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.1,
            closeness_band: 0.75,
            max_alternatives: 2,
            follow_up_prompts: vec![
                "Where on the body do the symptoms appear?".to_string(),
                "How intense are the symptoms, and are they getting worse?".to_string(),
                "What does it feel like: itching, burning, or pain?".to_string(),
            ],
        }
    }
}

impl EngineConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&text)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let a = &self.analysis;
        if a.ngram_min == 0 || a.ngram_min > a.ngram_max {
            return Err(EngineError::config(format!(
                "ngram range {}..={} is empty or starts at 0",
                a.ngram_min, a.ngram_max
            )));
        }

        let f = &self.fields;
        let repeats = [
            ("fields.name", f.name),
            ("fields.primary_symptoms", f.primary_symptoms),
            ("fields.secondary_symptoms", f.secondary_symptoms),
            ("fields.common_locations", f.common_locations),
            ("fields.treatment", f.treatment),
            ("lexicon.symptom_keywords", self.lexicon.symptom_keywords.max_weight() as usize),
            ("lexicon.location_keywords", self.lexicon.location_keywords.max_weight() as usize),
        ];
        for (name, value) in repeats {
            if value > MAX_REPEAT as usize {
                return Err(EngineError::config(format!(
                    "{name} repeats {value} times, at most {MAX_REPEAT} allowed"
                )));
            }
        }

        let s = &self.scoring;
        let weights = [
            ("cosine", s.cosine),
            ("jaccard", s.jaccard),
            ("location", s.location),
            ("location_step", s.location_step),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::config(format!(
                    "scoring weight {name} must be a non-negative number, got {value}"
                )));
            }
        }
        if let Some(cap) = s.location_cap {
            if !cap.is_finite() || cap < 0.0 {
                return Err(EngineError::config(format!(
                    "location_cap must be a non-negative number, got {cap}"
                )));
            }
        }

        let sel = &self.selection;
        if !sel.confidence_threshold.is_finite() || sel.confidence_threshold < 0.0 {
            return Err(EngineError::config(format!(
                "confidence_threshold must be non-negative, got {}",
                sel.confidence_threshold
            )));
        }
        if !(sel.closeness_band > 0.0 && sel.closeness_band <= 1.0) {
            return Err(EngineError::config(format!(
                "closeness_band must be in (0, 1], got {}",
                sel.closeness_band
            )));
        }
        Ok(())
    }
}
