use anyhow::Result;
use search_core::{DocumentId, DocumentStatus, Rating, SearchServer};
use serde::Deserialize;
use walkdir::WalkDir;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct InputDoc {
    pub id: DocumentId,
    pub text: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub ratings: Vec<Rating>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    pub added: usize,
    pub rejected: usize,
}

/// JSON / JSONL files under `input`, or `input` itself when it is a file.
pub fn input_files(input: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(extension(p), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    }
    files
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|s| s.to_str())
}

/// Add every document found under `input`. Documents the engine rejects are
/// logged and skipped; unreadable or malformed files abort the load.
pub fn load(input: &Path, server: &mut SearchServer) -> Result<LoadStats> {
    let mut stats = LoadStats::default();
    for file in input_files(input) {
        let docs = if extension(&file) == Some("jsonl") { read_jsonl(&file)? } else { read_json(&file)? };
        for doc in docs {
            match server.add_document(doc.id, &doc.text, doc.status, &doc.ratings) {
                Ok(()) => stats.added += 1,
                Err(err) => {
                    tracing::warn!(document_id = doc.id, file = %file.display(), %err, "document rejected");
                    stats.rejected += 1;
                }
            }
        }
    }
    tracing::info!(added = stats.added, rejected = stats.rejected, "corpus loaded");
    Ok(stats)
}

fn read_jsonl(file: &Path) -> Result<Vec<InputDoc>> {
    let reader = BufReader::new(File::open(file)?);
    let mut docs = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        docs.push(serde_json::from_str(&line)?);
    }
    Ok(docs)
}

fn read_json(file: &Path) -> Result<Vec<InputDoc>> {
    let reader = BufReader::new(File::open(file)?);
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    let docs = match json {
        serde_json::Value::Array(arr) => {
            arr.into_iter().map(serde_json::from_value).collect::<Result<Vec<InputDoc>, _>>()?
        }
        serde_json::Value::Object(_) => vec![serde_json::from_value(json)?],
        _ => Vec::new(),
    };
    Ok(docs)
}
