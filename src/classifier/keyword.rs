use super::oracle::{ClassificationOracle, LabelScores};
use crate::error::Result;
use crate::ingest::InterestDictionary;
use async_trait::async_trait;
use faculty_common::normalize_name;

/// Offline scorer: share of a label's keywords found in the text
///
/// Matching ignores case and diacritics. Labels without keywords score 0.
pub struct KeywordOracle {
    keywords: Vec<(String, Vec<String>)>,
}

impl KeywordOracle {
    pub fn new(dictionary: &InterestDictionary) -> Self {
        let keywords = dictionary
            .iter()
            .map(|(label, kws)| {
                let normalized = kws
                    .iter()
                    .map(|k| normalize_name(k))
                    .filter(|k| !k.is_empty())
                    .collect();
                (label.to_string(), normalized)
            })
            .collect();
        Self { keywords }
    }

    fn score(&self, padded_text: &str, label: &str) -> f64 {
        let Some((_, keywords)) = self.keywords.iter().find(|(l, _)| l == label) else {
            return 0.0;
        };
        if keywords.is_empty() {
            return 0.0;
        }
        let found = keywords
            .iter()
            .filter(|k| padded_text.contains(&format!(" {} ", k)))
            .count();
        found as f64 / keywords.len() as f64
    }
}

#[async_trait]
impl ClassificationOracle for KeywordOracle {
    async fn classify(&self, text: &str, labels: &[String]) -> Result<LabelScores> {
        // pad so keywords only match on word boundaries
        let padded = format!(" {} ", normalize_name(text));
        Ok(labels
            .iter()
            .map(|label| (label.clone(), self.score(&padded, label)))
            .collect())
    }

    fn name(&self) -> &str {
        "keyword"
    }
}
