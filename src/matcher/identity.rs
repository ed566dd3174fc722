//! Scraped identities derived from search-result titles

use faculty_common::{normalize_name, ScrapedEntry, ScrapedGroup, ScrapedIdentity};
use regex::Regex;
use std::collections::HashSet;

lazy_static::lazy_static! {
    // embedding, override and isolate controls plus LRM/RLM
    static ref BIDI_CONTROLS: Regex =
        Regex::new(r"[\u{200E}\u{200F}\u{202A}-\u{202E}\u{2066}-\u{2069}]").unwrap();
    static ref TITLE_SEPARATOR: Regex = Regex::new(r"\s*-\s*|\s*\|\s*").unwrap();
}

/// Candidate person name from a search-result title
///
/// "Ana Ruiz - PUCP | LinkedIn" -> "Ana Ruiz"
pub fn extract_name_from_title(title: &str) -> String {
    let cleaned = BIDI_CONTROLS.replace_all(title, "");
    TITLE_SEPARATOR
        .split(&cleaned)
        .next()
        .unwrap_or("")
        .trim()
        .to_string()
}

/// Identity for one group: the longest candidate name across its titles
pub fn derive_identity(group: &[ScrapedEntry]) -> Option<ScrapedIdentity> {
    let mut best: Option<String> = None;
    for entry in group {
        let candidate = extract_name_from_title(&entry.title);
        if candidate.is_empty() {
            continue;
        }
        let longer = best
            .as_ref()
            .map_or(true, |b| candidate.chars().count() > b.chars().count());
        if longer {
            best = Some(candidate);
        }
    }

    best.map(|display_name| ScrapedIdentity {
        match_key: normalize_name(&display_name),
        display_name,
        entries: group.to_vec(),
    })
}

/// One identity per distinct match key, first group wins
pub fn derive_identities(groups: &[ScrapedGroup]) -> Vec<ScrapedIdentity> {
    let mut seen = HashSet::new();
    let mut identities = Vec::new();

    for identity in groups.iter().filter_map(|g| derive_identity(g)) {
        if identity.match_key.is_empty() {
            tracing::debug!("skipping scraped identity without a usable name: {}", identity.display_name);
            continue;
        }
        if seen.insert(identity.match_key.clone()) {
            identities.push(identity);
        } else {
            tracing::debug!("duplicate scraped identity dropped: {}", identity.display_name);
        }
    }

    identities
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str) -> ScrapedEntry {
        ScrapedEntry {
            title: title.into(),
            content: "content".into(),
            relevance_score: 0.9,
        }
    }

    #[test]
    fn test_extract_name_from_title() {
        assert_eq!(extract_name_from_title("Ana Ruiz - PUCP"), "Ana Ruiz");
        assert_eq!(extract_name_from_title("Ana Ruiz | LinkedIn"), "Ana Ruiz");
        assert_eq!(extract_name_from_title("\u{202a}Ana Ruiz\u{202c} - Google Scholar"), "Ana Ruiz");
        assert_eq!(extract_name_from_title("Ana Ruiz"), "Ana Ruiz");
        assert_eq!(extract_name_from_title(" - PUCP"), "");
    }

    #[test]
    fn test_longest_candidate_wins() {
        let group = vec![entry("Ana Ruiz - PUCP"), entry("Ana María Ruiz | ORCID"), entry("Ruiz - x")];
        let identity = derive_identity(&group).unwrap();
        assert_eq!(identity.display_name, "Ana María Ruiz");
        assert_eq!(identity.match_key, "ana maria ruiz");
        assert_eq!(identity.entries.len(), 3);
    }

    #[test]
    fn test_length_ties_take_first() {
        let group = vec![entry("Ana Ruiz - a"), entry("Eva Soto - b")];
        assert_eq!(derive_identity(&group).unwrap().display_name, "Ana Ruiz");
    }

    #[test]
    fn test_group_without_names() {
        assert!(derive_identity(&[entry(" | x")]).is_none());
        assert!(derive_identity(&[]).is_none());
    }

    #[test]
    fn test_dedupe_by_match_key() {
        let groups = vec![
            vec![entry("José García - UNI")],
            vec![entry("Jose Garcia | Scholar")],
            vec![entry("Eva Soto")],
        ];
        let identities = derive_identities(&groups);
        assert_eq!(identities.len(), 2);
        assert_eq!(identities[0].display_name, "José García");
        assert_eq!(identities[1].match_key, "eva soto");
    }
}
