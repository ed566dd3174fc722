use crate::error::{LinkerError, Result};
use faculty_common::ScrapedGroup;
use std::path::Path;

/// Load scraped result groups and drop low-relevance entries
pub fn load_scraped(path: &Path, min_relevance: f64) -> Result<Vec<ScrapedGroup>> {
    if !path.exists() {
        return Err(LinkerError::MissingInput(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let groups: Vec<ScrapedGroup> =
        serde_json::from_str(&content).map_err(|e| LinkerError::malformed(path.display(), e))?;

    let total_entries: usize = groups.iter().map(|g| g.len()).sum();
    let groups = filter_groups(groups, min_relevance);
    let kept_entries: usize = groups.iter().map(|g| g.len()).sum();

    tracing::info!(
        groups = groups.len(),
        entries = kept_entries,
        discarded = total_entries - kept_entries,
        "loaded scraped data from {}",
        path.display()
    );

    Ok(groups)
}

/// Keep entries scoring above `min_relevance`; groups left empty disappear
pub fn filter_groups(groups: Vec<ScrapedGroup>, min_relevance: f64) -> Vec<ScrapedGroup> {
    groups
        .into_iter()
        .map(|group| {
            group
                .into_iter()
                .filter(|entry| entry.relevance_score > min_relevance)
                .collect::<ScrapedGroup>()
        })
        .filter(|group| !group.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use faculty_common::ScrapedEntry;

    fn entry(title: &str, score: f64) -> ScrapedEntry {
        ScrapedEntry {
            title: title.into(),
            content: String::new(),
            relevance_score: score,
        }
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let groups = vec![vec![entry("a", 0.6), entry("b", 0.61)]];
        let filtered = filter_groups(groups, 0.6);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].len(), 1);
        assert_eq!(filtered[0][0].title, "b");
    }

    #[test]
    fn test_empty_groups_dropped() {
        let groups = vec![vec![entry("a", 0.1)], vec![entry("b", 0.9)]];
        let filtered = filter_groups(groups, 0.6);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0][0].title, "b");
    }

    #[test]
    fn test_relevance_score_alias() {
        let groups: Vec<ScrapedGroup> = serde_json::from_str(
            r#"[[{"title": "Ana Ruiz - PUCP", "content": "x", "relevanceScore": 0.8}]]"#,
        )
        .unwrap();
        assert!((groups[0][0].relevance_score - 0.8).abs() < f64::EPSILON);
    }
}
