use super::fuzzy::{FuzzyMatcher, WeightedRatio};
use faculty_common::{normalize_name, LinkedProfessorRecord, RawBaseRecord, ScrapedIdentity};
use rayon::prelude::*;

/// Default link acceptance score (inclusive)
pub const DEFAULT_LINK_THRESHOLD: u8 = 80;

/// Merges roster rows with scraped identities
///
/// Each roster row is matched independently, so one identity may back
/// several rows.
pub struct RecordLinker<M: FuzzyMatcher = WeightedRatio> {
    matcher: M,
    threshold: u8,
}

impl Default for RecordLinker<WeightedRatio> {
    fn default() -> Self {
        Self::new(WeightedRatio, DEFAULT_LINK_THRESHOLD)
    }
}

impl<M: FuzzyMatcher> RecordLinker<M> {
    pub fn new(matcher: M, threshold: u8) -> Self {
        Self { matcher, threshold }
    }

    /// One linked record per roster row, in roster order
    pub fn link(&self, base: &[RawBaseRecord], identities: &[ScrapedIdentity]) -> Vec<LinkedProfessorRecord> {
        let keys: Vec<String> = identities.iter().map(|i| i.match_key.clone()).collect();

        base.par_iter()
            .map(|record| self.link_one(record, identities, &keys))
            .collect()
    }

    fn link_one(
        &self,
        record: &RawBaseRecord,
        identities: &[ScrapedIdentity],
        keys: &[String],
    ) -> LinkedProfessorRecord {
        let match_key = normalize_name(&record.name);
        let mut linked = LinkedProfessorRecord {
            name: record.name.clone(),
            match_key,
            degree_raw: record.degree.clone(),
            university_raw: record.university.clone(),
            url_image: record.url_image.clone(),
            ..Default::default()
        };

        match self.matcher.best_match(&linked.match_key, keys) {
            Some(m) if m.score >= self.threshold => {
                let identity = &identities[m.index];
                tracing::debug!(
                    score = m.score,
                    "linked {} -> {}",
                    record.name,
                    identity.display_name
                );
                linked.scraped_name = Some(identity.display_name.clone());
                linked.scraped_info = Some(identity.entries.clone());
                linked.link_score = Some(f64::from(m.score));
            }
            Some(m) => {
                tracing::debug!(score = m.score, "no link for {}", record.name);
            }
            None => {}
        }

        linked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::derive_identities;
    use faculty_common::ScrapedEntry;

    fn raw(name: &str) -> RawBaseRecord {
        RawBaseRecord {
            name: name.into(),
            degree: "PhD in Physics".into(),
            university: "PUCP".into(),
            url_image: None,
        }
    }

    fn group(title: &str) -> Vec<ScrapedEntry> {
        vec![ScrapedEntry {
            title: title.into(),
            content: "Research on solar cells and perovskite materials".into(),
            relevance_score: 0.9,
        }]
    }

    /// Scores every pair with the same fixed value
    struct Constant(u8);

    impl FuzzyMatcher for Constant {
        fn score(&self, _query: &str, _candidate: &str) -> u8 {
            self.0
        }
    }

    #[test]
    fn test_threshold_boundary() {
        let identities = derive_identities(&[group("Jose Garcia Perez - UNI")]);
        let base = vec![raw("Jose Garcia")];

        let linked = RecordLinker::new(Constant(80), 80).link(&base, &identities);
        assert!(linked[0].scraped_info.is_some());
        assert_eq!(linked[0].link_score, Some(80.0));
        assert_eq!(linked[0].scraped_name.as_deref(), Some("Jose Garcia Perez"));

        let linked = RecordLinker::new(Constant(79), 80).link(&base, &identities);
        assert!(linked[0].scraped_info.is_none());
        assert!(linked[0].link_score.is_none());
        assert!(linked[0].scraped_name.is_none());
    }

    #[test]
    fn test_no_scraped_data_leaves_all_unlinked() {
        let base = vec![raw("Ana Ruiz"), raw("Luis Soto")];
        let linked = RecordLinker::default().link(&base, &[]);
        assert_eq!(linked.len(), 2);
        assert!(linked.iter().all(|l| !l.is_linked()));
        assert_eq!(linked[0].match_key, "ana ruiz");
    }

    #[test]
    fn test_identity_may_back_several_rows() {
        let identities = derive_identities(&[group("José García - UNI")]);
        let base = vec![raw("Jose Garcia"), raw("José García")];
        let linked = RecordLinker::default().link(&base, &identities);
        assert!(linked[0].is_linked());
        assert!(linked[1].is_linked());
    }

    #[test]
    fn test_preserves_roster_order() {
        let identities = derive_identities(&[group("Eva Paz - PUCP"), group("Ana Ruiz - UNI")]);
        let base = vec![raw("Ana Ruiz"), raw("Zoe Quispe"), raw("Eva Paz")];
        let linked = RecordLinker::default().link(&base, &identities);
        let names: Vec<&str> = linked.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Ana Ruiz", "Zoe Quispe", "Eva Paz"]);
        assert_eq!(linked[0].scraped_name.as_deref(), Some("Ana Ruiz"));
        assert!(!linked[1].is_linked());
        assert_eq!(linked[2].scraped_name.as_deref(), Some("Eva Paz"));
    }
}
