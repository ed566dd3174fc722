//! Professor record types
//!
//! Shared by every stage of the pipeline:
//! - RawBaseRecord / ScrapedEntry: immutable inputs
//! - ScrapedIdentity: one per scraped group, keyed by its match key
//! - LinkedProfessorRecord: roster row merged with its accepted scraped group
//! - ClassifiedProfessorRecord: final exported record

use serde::{Deserialize, Serialize};
use std::fmt;

/// One roster row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawBaseRecord {
    pub name: String,
    pub degree: String,
    pub university: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_image: Option<String>,
}

/// One search result inside a scraped group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapedEntry {
    pub title: String,
    pub content: String,
    #[serde(rename = "score", alias = "relevanceScore", alias = "relevance_score")]
    pub relevance_score: f64,
}

/// Ordered search results for one unidentified person
pub type ScrapedGroup = Vec<ScrapedEntry>;

/// Identity derived from a scraped group
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapedIdentity {
    /// Longest candidate name found in the group's titles
    pub display_name: String,
    /// Normalized display name, used only for matching
    pub match_key: String,
    pub entries: Vec<ScrapedEntry>,
}

/// Roster row after linking
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkedProfessorRecord {
    pub name: String,
    pub match_key: String,
    pub degree_raw: String,
    pub university_raw: String,
    pub url_image: Option<String>,
    /// Display name of the accepted scraped identity
    pub scraped_name: Option<String>,
    /// Present only when a link was accepted
    pub scraped_info: Option<Vec<ScrapedEntry>>,
    /// Similarity (0-100) of the accepted link
    pub link_score: Option<f64>,
}

impl LinkedProfessorRecord {
    pub fn is_linked(&self) -> bool {
        self.scraped_info.is_some()
    }

    /// Number of retained scraped entries
    pub fn entry_count(&self) -> usize {
        self.scraped_info.as_ref().map_or(0, Vec::len)
    }
}

/// Academic level, ordered from highest to lowest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DegreeLevel {
    PhD,
    Master,
    #[default]
    Bachelor,
}

impl DegreeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DegreeLevel::PhD => "PhD",
            DegreeLevel::Master => "Master",
            DegreeLevel::Bachelor => "Bachelor",
        }
    }
}

impl fmt::Display for DegreeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interest areas as parallel label/score sequences, descending by score
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterestAreas {
    pub labels: Vec<String>,
    pub scores: Vec<f64>,
}

impl InterestAreas {
    pub fn from_pairs(pairs: Vec<(String, f64)>) -> Self {
        let (labels, scores) = pairs.into_iter().unzip();
        Self { labels, scores }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.scores.iter().copied())
    }
}

/// Final exported record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifiedProfessorRecord {
    pub name: String,
    pub research_papers: usize,
    pub interest_areas: Vec<String>,
    pub interest_scores: Vec<f64>,
    pub degree_level: DegreeLevel,
    pub normalized_specialization: String,
    pub normalized_university: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_image: Option<String>,
    pub original_degree: String,
    pub original_university: String,
    pub specialization: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scraped_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scraped_info: Option<Vec<ScrapedEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_score: Option<f64>,
}

impl ClassifiedProfessorRecord {
    pub fn interests(&self) -> InterestAreas {
        InterestAreas {
            labels: self.interest_areas.clone(),
            scores: self.interest_scores.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_record_missing_fields() {
        let json = r#"{"name": "Ana Ruiz"}"#;
        let record: RawBaseRecord = serde_json::from_str(json).expect("deserialize failed");
        assert_eq!(record.name, "Ana Ruiz");
        assert_eq!(record.degree, "");
        assert_eq!(record.university, "");
        assert!(record.url_image.is_none());
    }

    #[test]
    fn test_scraped_entry_score_aliases() {
        let a: ScrapedEntry =
            serde_json::from_str(r#"{"title": "x", "content": "y", "score": 0.8}"#).unwrap();
        let b: ScrapedEntry =
            serde_json::from_str(r#"{"title": "x", "content": "y", "relevanceScore": 0.8}"#)
                .unwrap();
        assert_eq!(a, b);

        let json = serde_json::to_string(&a).unwrap();
        assert!(json.contains("\"score\":0.8"));
    }

    #[test]
    fn test_degree_level_serialize() {
        assert_eq!(serde_json::to_string(&DegreeLevel::PhD).unwrap(), "\"PhD\"");
        let level: DegreeLevel = serde_json::from_str("\"Master\"").unwrap();
        assert_eq!(level, DegreeLevel::Master);
        assert_eq!(DegreeLevel::default(), DegreeLevel::Bachelor);
    }

    #[test]
    fn test_interest_areas_from_pairs() {
        let areas = InterestAreas::from_pairs(vec![
            ("Robotics".to_string(), 0.91),
            ("Energy".to_string(), 0.42),
        ]);
        assert_eq!(areas.labels, vec!["Robotics", "Energy"]);
        assert_eq!(areas.scores, vec![0.91, 0.42]);
        assert_eq!(areas.iter().next(), Some(("Robotics", 0.91)));
    }

    #[test]
    fn test_classified_record_roundtrip() {
        let original = ClassifiedProfessorRecord {
            name: "José García".to_string(),
            research_papers: 2,
            interest_areas: vec!["Robotics".to_string(), "Control".to_string()],
            interest_scores: vec![0.912, 0.305],
            degree_level: DegreeLevel::PhD,
            normalized_specialization: "Robotics and Mechatronics".to_string(),
            normalized_university: "PUCP".to_string(),
            url_image: Some("https://example.org/jg.png".to_string()),
            original_degree: "PhD in Robotics".to_string(),
            original_university: "Pontificia Universidad Católica del Perú".to_string(),
            specialization: "Robotics".to_string(),
            scraped_name: Some("José García".to_string()),
            scraped_info: Some(vec![ScrapedEntry {
                title: "José García - Google Scholar".to_string(),
                content: "Robot control".to_string(),
                relevance_score: 0.93,
            }]),
            link_score: Some(100.0),
        };

        let json = serde_json::to_string(&original).expect("serialize failed");
        let restored: ClassifiedProfessorRecord =
            serde_json::from_str(&json).expect("deserialize failed");
        assert_eq!(original, restored);
    }

    #[test]
    fn test_classified_record_unlinked_omits_optional() {
        let record = ClassifiedProfessorRecord {
            name: "Ana Ruiz".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        let obj = value.as_object().unwrap();
        assert!(!obj.contains_key("scraped_info"));
        assert!(!obj.contains_key("link_score"));
        assert!(!obj.contains_key("url_image"));
        assert_eq!(obj["degree_level"], "Bachelor");
        assert_eq!(obj["interest_areas"], serde_json::json!([]));
    }
}
