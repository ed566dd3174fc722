//! Input loading
//!
//! Roster (CSV or XLSX), scraped result groups (JSON) and the optional
//! interest dictionary (JSON). Every loader names the artifact in its error.

mod roster;
mod scraped;

pub use roster::{dedupe_roster, load_roster};
pub use scraped::{filter_groups, load_scraped};

use crate::error::{LinkerError, Result};
use faculty_common::ClassifiedProfessorRecord;
use serde_json::Value;
use std::path::Path;

/// Candidate interest labels with the keywords describing each
///
/// Key order in the source file is the label order handed to the oracle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterestDictionary {
    entries: Vec<(String, Vec<String>)>,
}

impl InterestDictionary {
    pub fn new(entries: Vec<(String, Vec<String>)>) -> Self {
        Self { entries }
    }

    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|(label, _)| label.clone()).collect()
    }

    pub fn keywords(&self, label: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, kws)| kws.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(l, k)| (l.as_str(), k.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, String> {
        let value: Value = serde_json::from_str(json).map_err(|e| e.to_string())?;
        let obj = value
            .as_object()
            .ok_or_else(|| "expected an object of label -> keywords".to_string())?;

        let mut entries = Vec::with_capacity(obj.len());
        for (label, keywords) in obj {
            let keywords = match keywords {
                Value::Array(items) => items
                    .iter()
                    .map(|k| {
                        k.as_str()
                            .map(str::to_string)
                            .ok_or_else(|| format!("keyword under {} is not a string", label))
                    })
                    .collect::<std::result::Result<Vec<_>, _>>()?,
                Value::Null => Vec::new(),
                _ => return Err(format!("keywords for {} must be a list", label)),
            };
            entries.push((label.clone(), keywords));
        }

        Ok(Self { entries })
    }
}

fn read_required(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(LinkerError::MissingInput(path.display().to_string()));
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Load the interest dictionary
pub fn load_interest_dictionary(path: &Path) -> Result<InterestDictionary> {
    let content = read_required(path)?;
    let dictionary =
        InterestDictionary::from_json(&content).map_err(|reason| LinkerError::malformed(path.display(), reason))?;
    tracing::info!(labels = dictionary.len(), "loaded interest dictionary from {}", path.display());
    Ok(dictionary)
}

/// Load an output document for the post-processing commands
pub fn load_document(path: &Path) -> Result<Vec<ClassifiedProfessorRecord>> {
    let content = read_required(path)?;
    serde_json::from_str(&content).map_err(|e| LinkerError::malformed(path.display(), e))
}

/// Load an output document as untyped JSON (field projection keeps unknown keys visible)
pub fn load_document_value(path: &Path) -> Result<Value> {
    let content = read_required(path)?;
    let value: Value = serde_json::from_str(&content).map_err(|e| LinkerError::malformed(path.display(), e))?;
    if !value.is_array() {
        return Err(LinkerError::malformed(path.display(), "expected a JSON array of records"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dictionary_keeps_key_order() {
        let dict = InterestDictionary::from_json(
            r#"{"Robotics": ["robot"], "Energy": ["solar", "wind"], "Art": []}"#,
        )
        .unwrap();
        assert_eq!(dict.labels(), vec!["Robotics", "Energy", "Art"]);
        assert_eq!(dict.keywords("Energy").unwrap(), ["solar", "wind"]);
        assert!(dict.keywords("Missing").is_none());
    }

    #[test]
    fn test_dictionary_rejects_bad_shapes() {
        assert!(InterestDictionary::from_json("[1, 2]").is_err());
        assert!(InterestDictionary::from_json(r#"{"A": "robot"}"#).is_err());
        assert!(InterestDictionary::from_json(r#"{"A": [1]}"#).is_err());
    }

    #[test]
    fn test_missing_dictionary_is_missing_input() {
        let err = load_interest_dictionary(Path::new("/nonexistent/interests.json")).unwrap_err();
        assert!(matches!(err, LinkerError::MissingInput(_)));
    }
}
