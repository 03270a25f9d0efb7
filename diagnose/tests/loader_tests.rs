use std::fs;
use std::io::Cursor;
use symptom_core::EngineConfig;
use tempfile::tempdir;

const ARRAY: &str = r#"[
  { "name": "Acne vulgaris", "symptoms": "pimple whitehead blackhead", "locations": "face chest back",
    "treatment": "gentle cleanser", "herbs": "Turmeric, Green tea" },
  { "name": "Atopic eczema", "primary_symptoms": "dry itchy patches", "location": "elbow knee" }
]"#;

const LINES: &str = r#"{ "Disease": "Urticaria", "Main Symptoms": "raised welts hives", "related_herbs": ["Aloe vera"] }

{ "name": "Tinea corporis", "symptoms": "ring shaped rash scaly border", "locations": "groin" }
"#;

#[test]
fn loads_json_and_jsonl_from_a_directory_in_name_order() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("a_conditions.json"), ARRAY).unwrap();
    fs::write(dir.path().join("nested/b_more.jsonl"), LINES).unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let files = diagnose::discover_files(dir.path()).unwrap();
    assert_eq!(files.len(), 2);

    let records = diagnose::load_records(dir.path()).unwrap();
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Acne vulgaris", "Atopic eczema", "Urticaria", "Tinea corporis"]);
    let ids: Vec<usize> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
    assert_eq!(records[0].related_herbs, vec!["Turmeric", "Green tea"]);
    assert_eq!(records[1].common_locations, "elbow knee");
    assert_eq!(records[1].treatment, "");
    assert_eq!(records[2].related_herbs, vec!["Aloe vera"]);
}

#[test]
fn single_object_file_is_one_record() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("one.json");
    fs::write(&path, r#"{ "name": "Scabies", "symptoms": "itch at night burrows" }"#).unwrap();
    let records = diagnose::load_records(&path).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].primary_symptoms, "itch at night burrows");
}

#[test]
fn missing_path_and_bad_json_are_errors() {
    let dir = tempdir().unwrap();
    assert!(diagnose::load_records(&dir.path().join("absent")).is_err());

    let bad = dir.path().join("bad.jsonl");
    fs::write(&bad, "{ not json").unwrap();
    let err = diagnose::load_records(&bad).unwrap_err();
    assert!(format!("{err:#}").contains("bad.jsonl:1"));
}

#[test]
fn empty_dataset_cannot_build_an_engine() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("empty.json"), "[]").unwrap();
    assert!(diagnose::build_engine(dir.path(), EngineConfig::default()).is_err());
}

#[test]
fn batch_writes_one_line_per_query() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("data.json"), ARRAY).unwrap();
    let engine = diagnose::build_engine(dir.path(), EngineConfig::default()).unwrap();

    let input = Cursor::new("whitehead pimples on my face\n\nzebra quantum\n");
    let mut output = Vec::new();
    let answered = diagnose::run_batch(&engine, input, &mut output).unwrap();
    assert_eq!(answered, 2);

    let lines: Vec<serde_json::Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["disease"], "Acne vulgaris");
    assert_eq!(lines[0]["herbs"][0], "Turmeric");
    assert_eq!(lines[1]["error"], "query is empty");
    assert_eq!(lines[2]["found"], false);
    assert!(lines[2]["suggestions"].as_array().is_some_and(|s| !s.is_empty()));
}

#[test]
fn stats_report_vocabulary_and_records() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("data.json"), ARRAY).unwrap();
    let engine = diagnose::build_engine(dir.path(), EngineConfig::default()).unwrap();
    let stats = diagnose::stats(&engine);
    assert_eq!(stats.num_records, 2);
    assert!(stats.vocabulary > 0);
    assert!(stats.records.iter().all(|r| r.tokens > 0 && r.terms >= r.tokens));
}

#[test]
fn config_file_overrides_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("engine.json");
    fs::write(&path, r#"{ "selection": { "confidence_threshold": 0.02 } }"#).unwrap();
    let config = diagnose::load_config(Some(&path)).unwrap();
    assert_eq!(config.selection.confidence_threshold, 0.02);
    assert_eq!(diagnose::load_config(None).unwrap(), EngineConfig::default());
}
