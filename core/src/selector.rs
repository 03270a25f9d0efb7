use crate::config::SelectionConfig;
use crate::knowledge::Corpus;
use crate::scorer::ScoreBreakdown;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredCandidate {
    pub record: usize,
    pub score: ScoreBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alternative {
    pub disease: String,
    pub confidence: f64,
}

/// Outcome of one diagnosis. `found = false` is the "no confident match"
/// state and carries follow-up prompts instead of a disease.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosisResult {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<usize>,
    pub disease: Option<String>,
    /// Composite score as a percentage with two decimals.
    pub confidence: f64,
    pub recommendation: Option<String>,
    pub herbs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternatives: Option<Vec<Alternative>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

/// `round(score × 100, 2)`.
pub fn confidence(score: f32) -> f64 {
    (score as f64 * 10_000.0).round() / 100.0
}

/// Orders candidates by composite score, highest first; equal scores keep
/// the lower record index first.
pub fn rank(scores: &[ScoreBreakdown]) -> Vec<ScoredCandidate> {
    let mut ranked: Vec<ScoredCandidate> =
        scores.iter().enumerate().map(|(record, score)| ScoredCandidate { record, score: *score }).collect();
    ranked.sort_by(|a, b| {
        b.score.composite.total_cmp(&a.score.composite).then(a.record.cmp(&b.record))
    });
    ranked
}

#[derive(Debug, Clone, Default)]
pub struct DiagnosisSelector {
    config: SelectionConfig,
}

impl DiagnosisSelector {
    pub fn new(config: SelectionConfig) -> Self { Self { config } }

    pub fn config(&self) -> &SelectionConfig { &self.config }

    pub fn select(&self, scores: &[ScoreBreakdown], corpus: &Corpus) -> DiagnosisResult {
        self.select_ranked(&rank(scores), corpus)
    }

    pub fn select_ranked(&self, ranked: &[ScoredCandidate], corpus: &Corpus) -> DiagnosisResult {
        let top = match ranked.first() {
            Some(top) if top.score.composite >= self.config.confidence_threshold => top,
            _ => return self.no_match(),
        };
        let Some(record) = corpus.record(top.record) else { return self.no_match() };

        let floor = top.score.composite * self.config.closeness_band;
        let alternatives: Vec<Alternative> = ranked
            .iter()
            .skip(1)
            .take(self.config.max_alternatives)
            .take_while(|c| c.score.composite >= floor)
            .filter_map(|c| {
                let r = corpus.record(c.record)?;
                Some(Alternative { disease: r.name.clone(), confidence: confidence(c.score.composite) })
            })
            .collect();

        DiagnosisResult {
            found: true,
            record_id: Some(record.id),
            disease: Some(record.name.clone()),
            confidence: confidence(top.score.composite),
            recommendation: Some(record.treatment.clone()).filter(|t| !t.is_empty()),
            herbs: record.related_herbs.clone(),
            alternatives: if alternatives.is_empty() { None } else { Some(alternatives) },
            suggestions: None,
        }
    }

    fn no_match(&self) -> DiagnosisResult {
        DiagnosisResult {
            found: false,
            record_id: None,
            disease: None,
            confidence: 0.0,
            recommendation: None,
            herbs: Vec::new(),
            alternatives: None,
            suggestions: Some(self.config.follow_up_prompts.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::{DiseaseRecord, KnowledgeBuilder};

    fn score(composite: f32) -> ScoreBreakdown {
        ScoreBreakdown { composite, ..Default::default() }
    }

    fn corpus(names: &[&str]) -> Corpus {
        let records = names
            .iter()
            .map(|n| DiseaseRecord {
                name: n.to_string(),
                treatment: format!("treat {n}"),
                related_herbs: vec!["aloe".into()],
                ..Default::default()
            })
            .collect();
        Corpus::build(records, &KnowledgeBuilder::default()).unwrap()
    }

    #[test]
    fn confidence_rounds_to_two_decimals() {
        assert_eq!(confidence(0.7), 70.0);
        assert_eq!(confidence(0.123456), 12.35);
        assert_eq!(confidence(0.0), 0.0);
    }

    #[test]
    fn ties_resolve_to_lowest_index() {
        let ranked = rank(&[score(0.2), score(0.5), score(0.5), score(0.1)]);
        let order: Vec<usize> = ranked.iter().map(|c| c.record).collect();
        assert_eq!(order, vec![1, 2, 0, 3]);
    }

    #[test]
    fn below_threshold_returns_follow_up_prompts() {
        let result = DiagnosisSelector::default().select(&[score(0.05), score(0.01)], &corpus(&["x1", "x2"]));
        assert!(!result.found);
        assert_eq!(result.confidence, 0.0);
        assert!(result.disease.is_none());
        assert!(!result.suggestions.unwrap().is_empty());
    }

    #[test]
    fn alternatives_within_band_only() {
        let c = corpus(&["top", "close", "closer", "far"]);
        let result = DiagnosisSelector::default().select(&[score(0.8), score(0.61), score(0.59), score(0.7)], &c);
        assert!(result.found);
        assert_eq!(result.disease.as_deref(), Some("top"));
        assert_eq!(result.recommendation.as_deref(), Some("treat top"));
        assert_eq!(result.herbs, vec!["aloe"]);
        let alts = result.alternatives.unwrap();
        let names: Vec<&str> = alts.iter().map(|a| a.disease.as_str()).collect();
        assert_eq!(names, vec!["far", "close"]);
        assert_eq!(alts[0].confidence, 70.0);
    }

    #[test]
    fn distant_runner_up_means_no_alternatives() {
        let result = DiagnosisSelector::default().select(&[score(0.8), score(0.3)], &corpus(&["a1", "b1"]));
        assert!(result.found);
        assert!(result.alternatives.is_none());
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("alternatives").is_none());
        assert!(json.get("suggestions").is_none());
        assert_eq!(json["confidence"], 80.0);
    }
}
