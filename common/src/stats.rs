//! Distribution counts over exported records

use crate::types::ClassifiedProfessorRecord;
use serde::Serialize;
use std::collections::HashMap;

/// Value counts, most frequent first; ties keep first-seen order
pub fn count_values<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for value in values {
        if value.is_empty() {
            continue;
        }
        let count = counts.entry(value).or_insert_with(|| {
            order.push(value);
            0
        });
        *count += 1;
    }

    let mut result: Vec<(String, usize)> = order
        .into_iter()
        .map(|value| (value.to_string(), counts[value]))
        .collect();
    // stable sort keeps first-seen order among equal counts
    result.sort_by(|a, b| b.1.cmp(&a.1));
    result
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Distributions {
    pub total: usize,
    pub linked: usize,
    pub degree_levels: Vec<(String, usize)>,
    pub specializations: Vec<(String, usize)>,
    pub universities: Vec<(String, usize)>,
    pub interest_areas: Vec<(String, usize)>,
}

impl Distributions {
    pub fn from_records(records: &[ClassifiedProfessorRecord]) -> Self {
        Self {
            total: records.len(),
            linked: records.iter().filter(|r| r.link_score.is_some()).count(),
            degree_levels: count_values(records.iter().map(|r| r.degree_level.as_str())),
            specializations: count_values(records.iter().map(|r| r.normalized_specialization.as_str())),
            universities: count_values(records.iter().map(|r| r.normalized_university.as_str())),
            interest_areas: count_values(
                records
                    .iter()
                    .flat_map(|r| r.interest_areas.iter().map(|a| a.as_str())),
            ),
        }
    }
}

/// Distinct (original, normalized) university pairs where normalization changed the text
pub fn university_rewrites(records: &[ClassifiedProfessorRecord], limit: usize) -> Vec<(String, String)> {
    let mut seen: Vec<(String, String)> = Vec::new();
    for record in records {
        let original = record.original_university.trim();
        if original.is_empty() || original == record.normalized_university {
            continue;
        }
        let pair = (original.to_string(), record.normalized_university.clone());
        if !seen.contains(&pair) {
            seen.push(pair);
        }
        if seen.len() >= limit {
            break;
        }
    }
    seen
}
