//! Interest-area assignment
//!
//! Builds the text sent to the oracle, then applies the threshold and
//! ordering policy to whatever the oracle returns. Oracle failures degrade
//! to an empty assignment for that record.

use super::oracle::{ClassificationOracle, LabelScores};
use crate::error::LinkerError;
use faculty_common::text::{collapse_whitespace, truncate_chars};
use faculty_common::{InterestAreas, LinkedProfessorRecord};
use std::collections::HashSet;
use std::time::Duration;

/// Scraped contents this short or shorter are left out of the text
const MIN_CONTENT_CHARS: usize = 20;

/// Concatenate a record's free text for classification
pub fn build_text_content(record: &LinkedProfessorRecord, max_chars: usize) -> String {
    let mut parts: Vec<String> = Vec::new();

    let degree = record.degree_raw.trim();
    if !degree.is_empty() {
        parts.push(format!("Degree: {}", degree));
    }

    let university = record.university_raw.trim();
    if !university.is_empty() {
        parts.push(format!("University: {}", university));
    }

    if let Some(entries) = &record.scraped_info {
        for entry in entries {
            let content = collapse_whitespace(&entry.content);
            if content.chars().count() > MIN_CONTENT_CHARS {
                parts.push(content);
            }
        }
    }

    truncate_chars(&parts.join(" "), max_chars)
}

fn round3(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0
}

/// Threshold, dedupe and order oracle output
///
/// Keeps requested labels scoring at least `min_score` (first occurrence of
/// a label wins), sorts by descending score with ties in oracle order, and
/// rounds scores to 3 decimals.
pub fn select_interest_areas(scores: LabelScores, labels: &[String], min_score: f64) -> InterestAreas {
    let mut seen: HashSet<String> = HashSet::new();
    let mut kept: LabelScores = scores
        .into_iter()
        .filter(|(label, score)| {
            score.is_finite() && *score >= min_score && labels.contains(label) && seen.insert(label.clone())
        })
        .collect();

    // stable: equal scores keep oracle order
    kept.sort_by(|a, b| b.1.total_cmp(&a.1));

    InterestAreas::from_pairs(
        kept.into_iter()
            .map(|(label, score)| (label, round3(score.clamp(0.0, 1.0))))
            .collect(),
    )
}

pub struct InterestAreaAssigner<'a> {
    oracle: &'a dyn ClassificationOracle,
    labels: Vec<String>,
    min_score: f64,
    timeout: Duration,
}

impl<'a> InterestAreaAssigner<'a> {
    pub fn new(oracle: &'a dyn ClassificationOracle, labels: Vec<String>, min_score: f64, timeout: Duration) -> Self {
        Self {
            oracle,
            labels,
            min_score,
            timeout,
        }
    }

    /// Assign interest areas to one text; never fails
    pub async fn assign(&self, name: &str, text: &str) -> InterestAreas {
        if text.trim().is_empty() || self.labels.is_empty() {
            return InterestAreas::default();
        }

        match self.try_assign(text).await {
            Ok(areas) => areas,
            Err(e) => {
                tracing::warn!("interest areas for {} left empty: {}", name, e);
                InterestAreas::default()
            }
        }
    }

    async fn try_assign(&self, text: &str) -> crate::error::Result<InterestAreas> {
        let scores = tokio::time::timeout(self.timeout, self.oracle.classify(text, &self.labels))
            .await
            .map_err(|_| LinkerError::OracleTimeout(self.timeout.as_secs()))??;
        Ok(select_interest_areas(scores, &self.labels, self.min_score))
    }
}
