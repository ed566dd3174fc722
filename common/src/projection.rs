//! Output field projection for the `clean` command
//!
//! Keeps the essential fields, then whichever optional fields are present.
//! Anything else (scraped payloads, link scores) is dropped.

use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// Fields every cleaned record carries
pub const ESSENTIAL_FIELDS: &[&str] = &[
    "name",
    "research_papers",
    "interest_areas",
    "interest_scores",
    "degree_level",
    "normalized_specialization",
    "normalized_university",
];

/// Fields kept when present
pub const OPTIONAL_FIELDS: &[&str] = &[
    "url_image",
    "original_degree",
    "original_university",
    "specialization",
];

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectionSummary {
    pub records: usize,
    pub kept_fields: Vec<String>,
    pub removed_fields: Vec<String>,
    pub original_bytes: usize,
    pub cleaned_bytes: usize,
}

impl ProjectionSummary {
    /// Size reduction as a percentage of the original
    pub fn reduction_percent(&self) -> f64 {
        if self.original_bytes == 0 {
            return 0.0;
        }
        (1.0 - self.cleaned_bytes as f64 / self.original_bytes as f64) * 100.0
    }
}

/// Project one record onto the published fields; absent fields stay absent
pub fn project_record(record: &Map<String, Value>) -> Map<String, Value> {
    ESSENTIAL_FIELDS
        .iter()
        .chain(OPTIONAL_FIELDS)
        .filter_map(|field| record.get(*field).map(|value| (field.to_string(), value.clone())))
        .collect()
}

/// Project a whole document (a JSON array of records)
pub fn project_document(document: &Value) -> Result<(Value, ProjectionSummary)> {
    let records = document
        .as_array()
        .ok_or_else(|| Error::Parse("document is not a JSON array".to_string()))?;

    let mut kept: Vec<String> = Vec::new();
    let mut removed: Vec<String> = Vec::new();
    let mut cleaned = Vec::with_capacity(records.len());

    for (idx, record) in records.iter().enumerate() {
        let obj = record
            .as_object()
            .ok_or_else(|| Error::Parse(format!("record {} is not an object", idx)))?;

        for key in obj.keys() {
            let is_kept = ESSENTIAL_FIELDS.contains(&key.as_str()) || OPTIONAL_FIELDS.contains(&key.as_str());
            let bucket = if is_kept { &mut kept } else { &mut removed };
            if !bucket.contains(key) {
                bucket.push(key.clone());
            }
        }

        cleaned.push(Value::Object(project_record(obj)));
    }

    let cleaned = Value::Array(cleaned);
    let summary = ProjectionSummary {
        records: records.len(),
        kept_fields: kept,
        removed_fields: removed,
        original_bytes: serde_json::to_string_pretty(document)?.len(),
        cleaned_bytes: serde_json::to_string_pretty(&cleaned)?.len(),
    };

    Ok((cleaned, summary))
}
