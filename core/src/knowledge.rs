//! Disease records and the weighted knowledge text indexed for each one.

use crate::config::FieldWeights;
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;

/// One condition in the knowledge base. Absent source fields are empty
/// strings, never missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiseaseRecord {
    /// Position in the corpus; assigned by [`Corpus::build`].
    pub id: usize,
    pub name: String,
    pub primary_symptoms: String,
    pub secondary_symptoms: String,
    pub common_locations: String,
    pub cause: String,
    pub treatment: String,
    pub related_herbs: Vec<String>,
}

/// A dataset row as it appears on disk, before coercion. Column names seen
/// in real spreadsheets are accepted as aliases.
#[derive(Debug, Default, Deserialize)]
pub struct RawDiseaseRecord {
    #[serde(default, alias = "Disease", alias = "Diseases", alias = "รายชื่อโรค")]
    pub name: Option<Value>,
    #[serde(default, alias = "symptoms", alias = "Main Symptoms", alias = "อาการหลัก")]
    pub primary_symptoms: Option<Value>,
    #[serde(default, alias = "subSymptoms", alias = "Secondary symptoms", alias = "อาการรอง")]
    pub secondary_symptoms: Option<Value>,
    #[serde(default, alias = "locations", alias = "location", alias = "ตำแหน่งที่พบบ่อย")]
    pub common_locations: Option<Value>,
    #[serde(default, alias = "สาเหตุ")]
    pub cause: Option<Value>,
    #[serde(default, alias = "วิธีรักษาเบื้องต้น", alias = "วิธีรักษาเบื้อต้น")]
    pub treatment: Option<Value>,
    #[serde(default, alias = "herbs", alias = "สมุนไพรที่เกี่ยวข้อง")]
    pub related_herbs: Option<Value>,
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn cell_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Object(_) => None,
        Value::String(s) => Some(collapse(s)),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(|v| cell_text(Some(v)))
                .filter(|s| !s.is_empty())
                .collect();
            Some(parts.join(", "))
        }
    }
}

fn herb_list(value: Option<&Value>) -> Option<Vec<String>> {
    let items: Vec<String> = match value? {
        Value::Array(items) => items.iter().filter_map(|v| cell_text(Some(v))).collect(),
        other => cell_text(Some(other))?.split(',').map(collapse).collect(),
    };
    Some(items.into_iter().filter(|s| !s.is_empty() && s != "-").collect())
}

impl DiseaseRecord {
    /// Coerces a raw row into a record. Missing fields become empty and are
    /// reported, never rejected.
    pub fn from_raw(id: usize, raw: &RawDiseaseRecord) -> Self {
        let mut missing = Vec::new();
        let mut text = |field: &'static str, value: &Option<Value>| match cell_text(value.as_ref()) {
            Some(s) => s,
            None => {
                missing.push(field);
                String::new()
            }
        };
        let name = text("name", &raw.name);
        let primary_symptoms = text("primary_symptoms", &raw.primary_symptoms);
        let secondary_symptoms = text("secondary_symptoms", &raw.secondary_symptoms);
        let common_locations = text("common_locations", &raw.common_locations);
        let cause = text("cause", &raw.cause);
        let treatment = text("treatment", &raw.treatment);
        let related_herbs = herb_list(raw.related_herbs.as_ref()).unwrap_or_else(|| {
            missing.push("related_herbs");
            Vec::new()
        });

        if missing.contains(&"name") || missing.contains(&"primary_symptoms") {
            tracing::warn!(id, name = %name, ?missing, "malformed record, missing fields coerced to empty");
        } else if !missing.is_empty() {
            tracing::debug!(id, name = %name, ?missing, "record has empty optional fields");
        }

        DiseaseRecord {
            id,
            name,
            primary_symptoms,
            secondary_symptoms,
            common_locations,
            cause,
            treatment,
            related_herbs,
        }
    }
}

/// Builds the composite text a record is indexed under. Each field is
/// repeated according to [`FieldWeights`] so important fields weigh more in
/// term frequency.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBuilder {
    weights: FieldWeights,
}

impl KnowledgeBuilder {
    pub fn new(weights: FieldWeights) -> Self { Self { weights } }

    pub fn build(&self, record: &DiseaseRecord) -> String {
        let w = &self.weights;
        let secondary = self.secondary_with_cue(record);
        let mut parts: Vec<&str> = Vec::new();
        push_repeated(&mut parts, &record.name, w.name);
        push_repeated(&mut parts, &record.primary_symptoms, w.primary_symptoms);
        push_repeated(&mut parts, &secondary, w.secondary_symptoms);
        push_repeated(&mut parts, &record.common_locations, w.common_locations);
        push_repeated(&mut parts, &record.treatment, w.treatment);
        parts.join(" ")
    }

    /// Secondary symptoms, with the fever cue appended when only the
    /// treatment mentions it.
    fn secondary_with_cue<'a>(&self, record: &'a DiseaseRecord) -> Cow<'a, str> {
        let cue = self.weights.fever_cue.trim().to_lowercase();
        if cue.is_empty()
            || !record.treatment.to_lowercase().contains(&cue)
            || record.secondary_symptoms.to_lowercase().contains(&cue)
        {
            return Cow::Borrowed(&record.secondary_symptoms);
        }
        if record.secondary_symptoms.trim().is_empty() {
            Cow::Owned(cue)
        } else {
            Cow::Owned(format!("{} {}", record.secondary_symptoms, cue))
        }
    }
}

fn push_repeated<'a>(parts: &mut Vec<&'a str>, field: &'a str, times: usize) {
    let field = field.trim();
    if field.is_empty() {
        return;
    }
    for _ in 0..times {
        parts.push(field);
    }
}

/// The records an engine serves plus their knowledge texts. Fixed once built.
#[derive(Debug, Clone)]
pub struct Corpus {
    records: Vec<DiseaseRecord>,
    texts: Vec<String>,
}

impl Corpus {
    /// Renumbers records by position and composes their knowledge texts.
    pub fn build(records: Vec<DiseaseRecord>, builder: &KnowledgeBuilder) -> Result<Self> {
        if records.is_empty() {
            return Err(EngineError::CorpusEmpty);
        }
        let records: Vec<DiseaseRecord> = records
            .into_iter()
            .enumerate()
            .map(|(id, record)| DiseaseRecord { id, ..record })
            .collect();
        let texts = records.iter().map(|r| builder.build(r)).collect();
        Ok(Self { records, texts })
    }

    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
    pub fn records(&self) -> &[DiseaseRecord] { &self.records }
    pub fn record(&self, id: usize) -> Option<&DiseaseRecord> { self.records.get(id) }
    pub fn texts(&self) -> &[String] { &self.texts }
    pub fn knowledge_text(&self, id: usize) -> Option<&str> { self.texts.get(id).map(String::as_str) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> DiseaseRecord {
        DiseaseRecord {
            name: "Impetigo".into(),
            primary_symptoms: "honey crust sores".into(),
            secondary_symptoms: "itch".into(),
            common_locations: "face".into(),
            treatment: "antibiotic cream".into(),
            ..Default::default()
        }
    }

    #[test]
    fn fields_repeat_by_weight() {
        let text = KnowledgeBuilder::default().build(&record());
        assert_eq!(
            text,
            "Impetigo Impetigo honey crust sores honey crust sores honey crust sores honey crust sores \
             itch itch face face face antibiotic cream"
        );
    }

    #[test]
    fn empty_fields_are_skipped() {
        let r = DiseaseRecord { name: "A".into(), primary_symptoms: "red bump".into(), ..Default::default() };
        let weights = FieldWeights { name: 1, primary_symptoms: 1, ..Default::default() };
        assert_eq!(KnowledgeBuilder::new(weights).build(&r), "A red bump");
    }

    #[test]
    fn fever_cue_moves_into_secondary_symptoms() {
        let r = DiseaseRecord { treatment: "Rest, reduce Fever with fluids".into(), ..record() };
        let weights = FieldWeights { name: 0, primary_symptoms: 0, common_locations: 0, treatment: 0, ..Default::default() };
        assert_eq!(KnowledgeBuilder::new(weights).build(&r), "itch fever itch fever");

        let already = DiseaseRecord { secondary_symptoms: "mild fever".into(), ..r.clone() };
        let weights = FieldWeights { name: 0, primary_symptoms: 0, common_locations: 0, treatment: 0, ..Default::default() };
        assert_eq!(KnowledgeBuilder::new(weights).build(&already), "mild fever mild fever");
    }

    #[test]
    fn raw_rows_coerce_missing_and_aliased_fields() {
        let raw: RawDiseaseRecord = serde_json::from_str(
            r#"{ "Disease": "  Tinea   corporis ", "symptoms": "ring rash", "cause": null,
                 "herbs": "Turmeric, Aloe vera ,, -", "location": 12 }"#,
        )
        .unwrap();
        let r = DiseaseRecord::from_raw(7, &raw);
        assert_eq!(r.id, 7);
        assert_eq!(r.name, "Tinea corporis");
        assert_eq!(r.primary_symptoms, "ring rash");
        assert_eq!(r.cause, "");
        assert_eq!(r.treatment, "");
        assert_eq!(r.common_locations, "12");
        assert_eq!(r.related_herbs, vec!["Turmeric", "Aloe vera"]);
    }

    #[test]
    fn thai_column_names_are_accepted() {
        let raw: RawDiseaseRecord = serde_json::from_str(
            r#"{ "รายชื่อโรค": "สิวอักเสบ", "อาการหลัก": "ตุ่มแดง เจ็บ", "สมุนไพรที่เกี่ยวข้อง": ["ขมิ้นชัน"] }"#,
        )
        .unwrap();
        let r = DiseaseRecord::from_raw(0, &raw);
        assert_eq!(r.name, "สิวอักเสบ");
        assert_eq!(r.primary_symptoms, "ตุ่มแดง เจ็บ");
        assert_eq!(r.related_herbs, vec!["ขมิ้นชัน"]);
    }

    #[test]
    fn corpus_renumbers_and_rejects_empty() {
        let corpus = Corpus::build(vec![DiseaseRecord { id: 40, ..record() }, record()], &KnowledgeBuilder::default()).unwrap();
        let ids: Vec<usize> = corpus.records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![0, 1]);
        assert_eq!(corpus.knowledge_text(1), Some(corpus.texts()[1].as_str()));
        assert!(matches!(Corpus::build(Vec::new(), &KnowledgeBuilder::default()), Err(EngineError::CorpusEmpty)));
    }
}
