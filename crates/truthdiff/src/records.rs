//! Comparison records
//!
//! A record file is a JSON array; each entry pairs the ground truth lines
//! with the candidate lines produced for the same question.

use anyhow::{bail, Context, Result};
use log::{debug, info};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;

/// One ground truth / candidate pair with its display metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Identifier shown above the comparison
    #[serde(deserialize_with = "string_or_number")]
    pub question_id: String,

    /// Reference lines (left column)
    pub ground_truth: Vec<String>,

    /// Candidate lines (right column)
    pub question_base: Vec<String>,

    /// Line error rate of the candidate, if scored
    #[serde(default)]
    pub ler_base: Option<f64>,

    /// Image the texts were read from
    #[serde(default)]
    pub img_link: Option<String>,
}

/// Accept identifiers written either as strings or as numbers
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number identifier, found {}",
            other
        ))),
    }
}

/// Parse a JSON array of records
pub fn parse_records(json: &str) -> Result<Vec<Record>> {
    let records: Vec<Record> = serde_json::from_str(json).context("Invalid record file")?;
    debug!("Parsed {} records", records.len());
    Ok(records)
}

/// Read and parse a record file
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    info!("Loading records from: {:?}", path);
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read record file {}", path.display()))?;
    parse_records(&json).with_context(|| format!("Failed to load {}", path.display()))
}

/// Look up a record by its 1-based position
pub fn nth_record(records: &[Record], question: usize) -> Result<&Record> {
    if records.is_empty() {
        bail!("The record file contains no records");
    }
    if question == 0 || question > records.len() {
        bail!(
            "Question {} is out of range (expected 1 to {})",
            question,
            records.len()
        );
    }
    Ok(&records[question - 1])
}

/// Read a text file as a sequence of lines
pub fn load_lines(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(text.lines().map(str::to_string).collect())
}
