//! Degree level classification
//!
//! PhD indicators are checked before Master indicators; anything else falls
//! to `Bachelor`.

use crate::types::DegreeLevel;
use regex::Regex;

/// Values the roster uses for "no data"
const PLACEHOLDERS: &[&str] = &["not found", "no encontrado", "unknown"];

lazy_static::lazy_static! {
    static ref PHD_PATTERNS: Vec<Regex> = [
        r"\bphd\b",
        r"\bdoctorado\b",
        r"\bdoctor\b",
        r"\bdoctora\b",
        r"\bph\.d\b",
        r"\bd\.phil\b",
        r"\bdphil\b",
        r"\bdoctoral\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    static ref MASTER_PATTERNS: Vec<Regex> = [
        r"\bmaster\b",
        r"\bmagíster\b",
        r"\bmagister\b",
        r"\bmaestría\b",
        r"\bmaestria\b",
        r"\bmáster\b",
        r"\bm\.s\b",
        r"\bm\.sc\b",
        r"\bm\.a\b",
        r"\bmsc\b",
        r"\bms\b",
        r"\bmba\b",
        r"\bm\.eng\b",
        r"\bmeng\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();
}

/// Empty or a known "no data" marker
pub fn is_placeholder(value: &str) -> bool {
    let trimmed = value.trim().to_lowercase();
    trimmed.is_empty() || PLACEHOLDERS.contains(&trimmed.as_str())
}

/// Classify a free-text degree into a level
///
/// # Examples
/// ```
/// use faculty_common::{classify_degree, DegreeLevel};
///
/// assert_eq!(classify_degree("PhD, previously Master's in Physics"), DegreeLevel::PhD);
/// assert_eq!(classify_degree("Magíster en Educación"), DegreeLevel::Master);
/// assert_eq!(classify_degree("No encontrado"), DegreeLevel::Bachelor);
/// ```
pub fn classify_degree(degree: &str) -> DegreeLevel {
    if is_placeholder(degree) {
        return DegreeLevel::Bachelor;
    }

    let lower = degree.to_lowercase();

    if PHD_PATTERNS.iter().any(|re| re.is_match(&lower)) {
        return DegreeLevel::PhD;
    }

    if MASTER_PATTERNS.iter().any(|re| re.is_match(&lower)) {
        return DegreeLevel::Master;
    }

    DegreeLevel::Bachelor
}
