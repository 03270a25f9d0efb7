use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use symptom_core::{DiseaseRecord, Engine, EngineConfig, RawDiseaseRecord};
use walkdir::WalkDir;

/// Dataset files under `input`: the file itself, or every `.json` /
/// `.jsonl` file below a directory in file-name order.
pub fn discover_files(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        anyhow::bail!("dataset path {} does not exist", input.display());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(input).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
        let p = entry.path();
        if p.is_file() {
            if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                if matches!(ext, "json" | "jsonl") {
                    files.push(p.to_path_buf());
                }
            }
        }
    }
    Ok(files)
}

/// Reads every record under `input`, numbering them in load order.
pub fn load_records(input: &Path) -> Result<Vec<DiseaseRecord>> {
    let mut raw = Vec::new();
    for file in discover_files(input)? {
        let before = raw.len();
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(&file, &mut raw)?;
        } else {
            read_json(&file, &mut raw)?;
        }
        tracing::debug!(file = %file.display(), records = raw.len() - before, "read dataset file");
    }
    let records: Vec<DiseaseRecord> = raw.iter().enumerate().map(|(id, r)| DiseaseRecord::from_raw(id, r)).collect();
    tracing::info!(num_records = records.len(), input = %input.display(), "loaded records");
    Ok(records)
}

fn read_jsonl(file: &Path, out: &mut Vec<RawDiseaseRecord>) -> Result<()> {
    let reader = BufReader::new(File::open(file).with_context(|| format!("opening {}", file.display()))?);
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let rec: RawDiseaseRecord = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid record", file.display(), lineno + 1))?;
        out.push(rec);
    }
    Ok(())
}

fn read_json(file: &Path, out: &mut Vec<RawDiseaseRecord>) -> Result<()> {
    let reader = BufReader::new(File::open(file).with_context(|| format!("opening {}", file.display()))?);
    let json: serde_json::Value =
        serde_json::from_reader(reader).with_context(|| format!("parsing {}", file.display()))?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                let rec = serde_json::from_value::<RawDiseaseRecord>(v)
                    .with_context(|| format!("{}: invalid record", file.display()))?;
                out.push(rec);
            }
        }
        serde_json::Value::Object(_) => {
            let rec = serde_json::from_value::<RawDiseaseRecord>(json)
                .with_context(|| format!("{}: invalid record", file.display()))?;
            out.push(rec);
        }
        _ => tracing::warn!(file = %file.display(), "skipping file that is neither an object nor an array"),
    }
    Ok(())
}

/// Engine configuration from `path`, or the defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            EngineConfig::from_json_file(path).with_context(|| format!("loading config {}", path.display()))
        }
        None => Ok(EngineConfig::default()),
    }
}

pub fn build_engine(data: &Path, config: EngineConfig) -> Result<Engine> {
    let records = load_records(data)?;
    Engine::build(records, config).context("building engine")
}

/// Answers one query per input line, writing one JSON object per line.
/// A failing line produces an `error` object and the batch continues.
pub fn run_batch<R: BufRead, W: Write>(engine: &Engine, input: R, mut output: W) -> Result<usize> {
    let mut answered = 0;
    for line in input.lines() {
        let line = line?;
        let value = match engine.diagnose(&line) {
            Ok(result) => {
                answered += 1;
                serde_json::to_value(&result)?
            }
            Err(e) => serde_json::json!({ "query": line, "error": e.to_string() }),
        };
        writeln!(output, "{}", serde_json::to_string(&value)?)?;
    }
    output.flush()?;
    Ok(answered)
}

#[derive(Debug, Serialize)]
pub struct RecordStats {
    pub id: usize,
    pub name: String,
    pub tokens: usize,
    pub terms: usize,
}

#[derive(Debug, Serialize)]
pub struct IndexStats {
    pub num_records: usize,
    pub vocabulary: usize,
    pub records: Vec<RecordStats>,
}

pub fn stats(engine: &Engine) -> IndexStats {
    let index = engine.index();
    let records = engine
        .corpus()
        .records()
        .iter()
        .map(|r| RecordStats {
            id: r.id,
            name: r.name.clone(),
            tokens: index.doc_tokens(r.id).map_or(0, |t| t.len()),
            terms: index.doc_vector(r.id).map_or(0, |v| v.len()),
        })
        .collect();
    IndexStats { num_records: engine.corpus().len(), vocabulary: index.vocabulary_len(), records }
}
