//! Specialization extraction and normalization
//!
//! ## Extraction
//! 1. Verbatim special cases
//! 2. Ordered degree-title patterns, most specific first; the first match
//!    captures the phrase up to a comma or the end
//! 3. Otherwise the whole string minus any leading degree title
//!
//! ## Normalization cascade (first hit wins)
//! 1. Exact lowercase dictionary match
//! 2. Best word-overlap ratio against dictionary keys (> 0.3)
//! 3. Keyword fragment contained in the phrase, in table order
//! 4. Title-cased phrase

use crate::catalog::Catalog;
use crate::degree::is_placeholder;
use crate::text::{collapse_whitespace, title_case};
use regex::Regex;
use std::collections::HashSet;

/// Extraction result for missing or unusable degrees
pub const GENERAL: &str = "General";

/// Minimum word-overlap ratio for the partial tier (exclusive)
const MIN_OVERLAP_RATIO: f64 = 0.3;

/// Shortest specialization kept after cleanup
const MIN_SPECIALIZATION_CHARS: usize = 3;

lazy_static::lazy_static! {
    static ref EXTRACTION_PATTERNS: Vec<Regex> = [
        // PhD with connector
        r"(?i)(?:Doctorado|Doctor|Doctora|PhD|Ph\.D\.?)\s+(?:en|in|de)\s+(.+?)(?:\s*,|$)",
        // Doctorado without connector
        r"(?i)(?:Doctorado|Doctor|Doctora)\s+(.+?)(?:\s*,|$)",
        // PhD without connector
        r"(?i)PhD\s*[,.]?\s*(.+?)(?:\s*,|$)",
        // Master with connector
        r"(?i)(?:Magíster|Máster|Master'?s?\s*(?:Degree)?|Maestría)\s+(?:en|in|de|con\s+mención\s+en)\s+(.+?)(?:\s*,|$)",
        // Master without connector
        r"(?i)(?:Magíster|Máster|Maestría)\s+(.+?)(?:\s*,|$)",
        // Licenciado / Ingeniero
        r"(?i)(?:Licenciado|Licenciada|Ingeniero|Ingeniería)\s+(?:en|de)?\s*(.+?)(?:\s*,|$)",
        r"(?i)(?:Licenciado|Licenciada)\s+(.+?)(?:\s*,|$)",
        // Bachelor abbreviations
        r"(?i)(?:Bachelor|B\.S\.?|B\.Sc\.?|B\.A\.?)\s+(?:in|of|en)\s+(.+?)(?:\s*,|$)",
        // Master abbreviations
        r"(?i)(?:M\.S\.?|M\.Sc\.?|M\.A\.?|MSc|MS)\s+(?:in|of|en)\s+(.+?)(?:\s*,|$)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    static ref DEGREE_PREFIX: Regex = Regex::new(
        r"(?i)^(?:\(c\))?\s*(?:Doctorado|Doctor|Doctora|PhD|Ph\.D\.?|Magíster|Máster|Master'?s?\s*(?:Degree)?|Maestría|Licenciado|Licenciada|Ingeniero|Bachelor|B\.S\.?|B\.Sc\.?|B\.A\.?|M\.S\.?|M\.Sc\.?|M\.A\.?|MSc|MS)\s*"
    ).unwrap();
}

/// Extract the specialization phrase from a degree string
///
/// # Examples
/// ```
/// use faculty_common::{extract_specialization, Catalogs};
///
/// let catalogs = Catalogs::builtin();
/// assert_eq!(extract_specialization("PhD in Physics", &catalogs.special_cases), "Physics");
/// assert_eq!(extract_specialization("", &catalogs.special_cases), "General");
/// ```
pub fn extract_specialization(degree: &str, special_cases: &Catalog) -> String {
    if is_placeholder(degree) {
        return GENERAL.to_string();
    }

    let original = degree.trim();

    if let Some(special) = special_cases.get(original) {
        return special.to_string();
    }

    let captured = EXTRACTION_PATTERNS
        .iter()
        .find_map(|re| re.captures(original))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string());

    let specialization = match captured {
        Some(spec) => spec,
        None => DEGREE_PREFIX.replace(original, "").into_owned(),
    };

    let cleaned = collapse_whitespace(&specialization);
    let cleaned = cleaned.trim_matches(|c| c == '.' || c == ',').trim();

    if cleaned.chars().count() < MIN_SPECIALIZATION_CHARS {
        return GENERAL.to_string();
    }

    cleaned.to_string()
}

/// Normalize a specialization into a category
pub fn normalize_specialization(
    specialization: &str,
    dictionary: &Catalog,
    keywords: &Catalog,
) -> String {
    let lower = specialization.trim().to_lowercase();

    if let Some(category) = dictionary.get(&lower) {
        return category.to_string();
    }

    if let Some(category) = best_overlap(&lower, dictionary) {
        return category.to_string();
    }

    if let Some((_, category)) = keywords.iter().find(|(kw, _)| lower.contains(kw)) {
        return category.to_string();
    }

    title_case(specialization)
}

/// Dictionary value whose key shares the largest share of words with the phrase
fn best_overlap<'a>(phrase: &str, dictionary: &'a Catalog) -> Option<&'a str> {
    let phrase_words: HashSet<&str> = phrase.split_whitespace().collect();
    let mut best: Option<(&str, f64)> = None;

    for (key, category) in dictionary.iter() {
        let key_words: HashSet<&str> = key.split_whitespace().collect();
        let common = key_words.intersection(&phrase_words).count();
        if common == 0 {
            continue;
        }

        let ratio = common as f64 / key_words.len().max(phrase_words.len()) as f64;
        let best_ratio = best.map_or(0.0, |(_, r)| r);
        if ratio > best_ratio && ratio > MIN_OVERLAP_RATIO {
            best = Some((category, ratio));
        }
    }

    best.map(|(category, _)| category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalogs;

    fn extract(degree: &str) -> String {
        extract_specialization(degree, &Catalogs::builtin().special_cases)
    }

    fn normalize(spec: &str) -> String {
        let catalogs = Catalogs::builtin();
        normalize_specialization(spec, &catalogs.specializations, &catalogs.specialization_keywords)
    }

    #[test]
    fn test_extract_placeholders() {
        assert_eq!(extract(""), "General");
        assert_eq!(extract("Unknown"), "General");
        assert_eq!(extract("No encontrado"), "General");
        assert_eq!(extract("Not found"), "General");
    }

    #[test]
    fn test_extract_special_cases() {
        assert_eq!(extract("PhD, ISyE"), "Industrial and Systems Engineering");
        assert_eq!(extract("Master of Science"), "General Science");
        assert_eq!(extract("  Ingeniero Mecánico "), "Mechanical Engineering");
    }

    #[test]
    fn test_extract_patterns() {
        assert_eq!(extract("PhD in Physics"), "Physics");
        assert_eq!(extract("Doctor en Ciencias de la Educación, PUCP"), "Ciencias de la Educación");
        assert_eq!(extract("Doctorado Ingeniería Civil"), "Ingeniería Civil");
        assert_eq!(extract("PhD, Computer Science"), "Computer Science");
        assert_eq!(extract("Magíster con mención en Energía"), "Energía");
        assert_eq!(extract("Master's Degree in Robotics"), "Robotics");
        assert_eq!(extract("Maestría Gestión Pública"), "Gestión Pública");
        assert_eq!(extract("Licenciada en Literatura"), "Literatura");
        assert_eq!(extract("B.S. in Chemistry"), "Chemistry");
        assert_eq!(extract("MSc in Applied Mathematics, 2010"), "Applied Mathematics");
    }

    #[test]
    fn test_extract_fallback_strips_prefix() {
        assert_eq!(extract("Bachelor, Economics"), "Economics");
        assert_eq!(extract("MBA Finanzas"), "MBA Finanzas");
        assert_eq!(extract("Economía  aplicada."), "Economía aplicada");
    }

    #[test]
    fn test_extract_too_short_is_general() {
        assert_eq!(extract("PhD"), "General");
        assert_eq!(extract("MS."), "General");
    }

    #[test]
    fn test_normalize_exact() {
        assert_eq!(normalize("Physics"), "Physics");
        assert_eq!(normalize("Ingeniería Mecánica"), "Mechanical Engineering");
        assert_eq!(normalize("General"), "General");
    }

    #[test]
    fn test_normalize_exact_beats_keyword() {
        // "química" is an exact entry (Chemistry) and also hits the
        // "químic" keyword (Chemical Engineering)
        assert_eq!(normalize("Química"), "Chemistry");
    }

    #[test]
    fn test_normalize_partial_overlap() {
        // shares "computer science" with the dictionary key
        assert_eq!(normalize("Computer Science and AI"), "Computer Science");
        // 1 of 3 words (0.33) still clears the threshold
        assert_eq!(normalize("Sociology of Migration"), "Social Sciences");
    }

    #[test]
    fn test_normalize_partial_ties_take_first() {
        let dictionary = Catalog::from_pairs(&[("alpha beta", "First"), ("beta gamma", "Second")]);
        let keywords = Catalog::default();
        assert_eq!(normalize_specialization("beta delta", &dictionary, &keywords), "First");
    }

    #[test]
    fn test_normalize_partial_threshold_exclusive() {
        let dictionary = Catalog::from_pairs(&[("one two three four", "Wide")]);
        let keywords = Catalog::default();
        // 1 of 4 words = 0.25, below the threshold
        assert_eq!(normalize_specialization("one", &dictionary, &keywords), "One");
    }

    #[test]
    fn test_normalize_keyword_fallback() {
        assert_eq!(normalize("Electromagnetismo"), "Electrical Engineering");
        assert_eq!(normalize("Biomedicina"), "Biomedical Engineering");
    }

    #[test]
    fn test_normalize_title_case_fallback() {
        assert_eq!(normalize("quantum optics"), "Quantum Optics");
        assert_eq!(normalize("ARQUEOLOGÍA andina"), "Arqueología Andina");
    }
}
