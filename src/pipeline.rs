//! Pipeline orchestration
//!
//! roster + scraped groups -> RecordLinker -> per-record degree,
//! specialization and university resolution -> interest areas -> output
//! records in roster order.

use crate::classifier::{build_text_content, ClassificationOracle, InterestAreaAssigner};
use crate::config::Config;
use crate::matcher::{derive_identities, RecordLinker, WeightedRatio};
use faculty_common::{
    classify_degree, extract_specialization, normalize_specialization, normalize_university, Catalogs,
    ClassifiedProfessorRecord, DegreeLevel, InterestAreas, LinkedProfessorRecord, RawBaseRecord, ScrapedGroup,
};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub link_threshold: u8,
    pub min_score: f64,
    pub timeout: Duration,
    pub max_concurrency: usize,
    pub max_text_chars: usize,
    /// Keep only linked professors with at least one retained entry
    pub linked_only: bool,
    pub show_progress: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for PipelineOptions {
    fn from(config: &Config) -> Self {
        Self {
            link_threshold: config.link_threshold,
            min_score: config.min_score,
            timeout: Duration::from_secs(config.timeout_seconds),
            max_concurrency: config.max_concurrency.max(1),
            max_text_chars: config.max_text_chars,
            linked_only: false,
            show_progress: false,
        }
    }
}

/// Degree, specialization and university resolved from roster text
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAttributes {
    pub degree_level: DegreeLevel,
    pub specialization: String,
    pub normalized_specialization: String,
    pub normalized_university: String,
}

pub fn resolve_attributes(degree: &str, university: &str, catalogs: &Catalogs) -> ResolvedAttributes {
    let specialization = extract_specialization(degree, &catalogs.special_cases);
    let normalized_specialization = normalize_specialization(
        &specialization,
        &catalogs.specializations,
        &catalogs.specialization_keywords,
    );
    ResolvedAttributes {
        degree_level: classify_degree(degree),
        normalized_specialization,
        specialization,
        normalized_university: normalize_university(
            university,
            &catalogs.universities,
            &catalogs.university_keywords,
        ),
    }
}

/// Re-run attribute resolution on an exported record from its original fields
pub fn renormalize(record: &mut ClassifiedProfessorRecord, catalogs: &Catalogs) {
    let resolved = resolve_attributes(&record.original_degree, &record.original_university, catalogs);
    record.degree_level = resolved.degree_level;
    record.specialization = resolved.specialization;
    record.normalized_specialization = resolved.normalized_specialization;
    record.normalized_university = resolved.normalized_university;
}

/// Assemble the exported record
pub fn build_record(
    linked: LinkedProfessorRecord,
    interests: InterestAreas,
    catalogs: &Catalogs,
) -> ClassifiedProfessorRecord {
    let resolved = resolve_attributes(&linked.degree_raw, &linked.university_raw, catalogs);
    ClassifiedProfessorRecord {
        research_papers: linked.entry_count(),
        interest_areas: interests.labels,
        interest_scores: interests.scores,
        degree_level: resolved.degree_level,
        normalized_specialization: resolved.normalized_specialization,
        normalized_university: resolved.normalized_university,
        url_image: linked.url_image,
        original_degree: linked.degree_raw,
        original_university: linked.university_raw,
        specialization: resolved.specialization,
        scraped_name: linked.scraped_name,
        scraped_info: linked.scraped_info,
        link_score: linked.link_score,
        name: linked.name,
    }
}

pub struct Pipeline<'a> {
    catalogs: &'a Catalogs,
    oracle: Option<&'a dyn ClassificationOracle>,
    labels: Vec<String>,
    options: PipelineOptions,
}

impl<'a> Pipeline<'a> {
    pub fn new(catalogs: &'a Catalogs, options: PipelineOptions) -> Self {
        Self {
            catalogs,
            oracle: None,
            labels: Vec::new(),
            options,
        }
    }

    /// Score interest areas with `oracle` over the candidate `labels`
    pub fn with_oracle(mut self, oracle: &'a dyn ClassificationOracle, labels: Vec<String>) -> Self {
        self.oracle = Some(oracle);
        self.labels = labels;
        self
    }

    /// Link roster rows with scraped groups
    pub fn link(&self, roster: &[RawBaseRecord], groups: &[ScrapedGroup]) -> Vec<LinkedProfessorRecord> {
        let identities = derive_identities(groups);
        tracing::info!(identities = identities.len(), "derived scraped identities");

        let linker = RecordLinker::new(WeightedRatio, self.options.link_threshold);
        let linked = linker.link(roster, &identities);

        let linked_count = linked.iter().filter(|l| l.is_linked()).count();
        tracing::info!(linked = linked_count, total = linked.len(), "linking finished");

        if self.options.linked_only {
            linked.into_iter().filter(|l| l.entry_count() > 0).collect()
        } else {
            linked
        }
    }

    /// Classify linked records; output keeps input order
    pub async fn classify(&self, linked: Vec<LinkedProfessorRecord>) -> Vec<ClassifiedProfessorRecord> {
        let interests = match self.oracle {
            Some(oracle) if !self.labels.is_empty() => self.assign_interests(oracle, &linked).await,
            _ => vec![InterestAreas::default(); linked.len()],
        };

        linked
            .into_iter()
            .zip(interests)
            .map(|(record, areas)| build_record(record, areas, self.catalogs))
            .collect()
    }

    async fn assign_interests(
        &self,
        oracle: &dyn ClassificationOracle,
        linked: &[LinkedProfessorRecord],
    ) -> Vec<InterestAreas> {
        let assigner = InterestAreaAssigner::new(
            oracle,
            self.labels.clone(),
            self.options.min_score,
            self.options.timeout,
        );

        let progress = if self.options.show_progress {
            progress_bar(linked.len() as u64)
        } else {
            ProgressBar::hidden()
        };

        let assigner = &assigner;
        let progress_ref = &progress;
        let max_text_chars = self.options.max_text_chars;

        // `buffered` keeps results in input order
        let results: Vec<InterestAreas> = stream::iter(linked)
            .map(|record| async move {
                let text = build_text_content(record, max_text_chars);
                let areas = assigner.assign(&record.name, &text).await;
                progress_ref.inc(1);
                areas
            })
            .buffered(self.options.max_concurrency.max(1))
            .collect()
            .await;

        progress.finish_and_clear();
        results
    }

    /// Link then classify
    pub async fn run(&self, roster: &[RawBaseRecord], groups: &[ScrapedGroup]) -> Vec<ClassifiedProfessorRecord> {
        let linked = self.link(roster, groups);
        self.classify(linked).await
    }
}

fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("  [{elapsed_precise}] {bar:30.cyan/blue} {pos}/{len} Assigning interest areas...")
    {
        pb.set_style(style.progress_chars("█▉▊▋▌▍▎▏  "));
    }
    pb
}
