//! Report files for headnotes, sentences and frequency tables.
//!
//! Reports are YAML unless the output path ends in `.json`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MinerError, Result};
use crate::extract::Sentence;
use crate::html::Headnotes;
use crate::vocab::FrequencyTable;

/// Payload of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Payload {
    Headnotes(Headnotes),
    Sentences(Vec<Sentence>),
    Frequencies(FrequencyTable),
}

/// A report with provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// RFC 3339 timestamp.
    pub generated_at: String,
    /// Input files the payload was derived from.
    pub sources: Vec<PathBuf>,
    #[serde(flatten)]
    pub payload: Payload,
}

impl Report {
    /// Wrap a payload, stamped with the current time.
    pub fn new(sources: Vec<PathBuf>, payload: Payload) -> Self {
        Self {
            generated_at: chrono::Local::now().to_rfc3339(),
            sources,
            payload,
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

/// Serialize a report as YAML.
pub fn to_yaml(report: &Report) -> Result<String> {
    Ok(serde_yaml_ng::to_string(report)?)
}

/// Write a report, creating parent directories as needed.
pub fn save_report(report: &Report, path: &Path) -> Result<()> {
    let content = if is_json(path) {
        let mut json = serde_json::to_string_pretty(report)?;
        json.push('\n');
        json
    } else {
        to_yaml(report)?
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    tracing::debug!(path = %path.display(), "Saved report");
    Ok(())
}

/// Read a report written by [`save_report`].
pub fn load_report(path: &Path) -> Result<Report> {
    let content = fs::read_to_string(path).map_err(|source| MinerError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    if is_json(path) {
        Ok(serde_json::from_str(&content)?)
    } else {
        Ok(serde_yaml_ng::from_str(&content)?)
    }
}

/// Read the frequency table of a report; other payloads yield an empty table.
pub fn load_frequency_table(path: &Path) -> Result<FrequencyTable> {
    match load_report(path)?.payload {
        Payload::Frequencies(table) => Ok(table),
        _ => {
            tracing::warn!(path = %path.display(), "Report holds no frequency table");
            Ok(FrequencyTable::default())
        }
    }
}

/// Merge a frequency table into the report stored at `path`, if there is one.
///
/// Labels in `table` replace the same labels of the stored table. Sources are
/// the stored ones followed by any new `sources`, without repeats.
pub fn merge_frequency_report(
    path: &Path,
    sources: &[PathBuf],
    table: FrequencyTable,
) -> Result<Report> {
    let (mut merged_sources, mut merged) = if path.exists() {
        let previous = load_report(path)?;
        let stored = match previous.payload {
            Payload::Frequencies(stored) => stored,
            _ => {
                tracing::warn!(path = %path.display(), "Replacing report that holds no frequency table");
                FrequencyTable::default()
            }
        };
        (previous.sources, stored)
    } else {
        (Vec::new(), FrequencyTable::default())
    };

    for source in sources {
        if !merged_sources.contains(source) {
            merged_sources.push(source.clone());
        }
    }
    merged.extend(table);
    Ok(Report::new(merged_sources, Payload::Frequencies(merged)))
}
