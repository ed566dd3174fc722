//! Institution name normalization
//!
//! Exact lowercase dictionary match, then keyword fragments in table order,
//! then the title-cased input.

use crate::catalog::Catalog;
use crate::text::title_case;

/// Result for an empty institution
pub const UNKNOWN_UNIVERSITY: &str = "Unknown";

/// Normalize an institution into its canonical name
///
/// # Examples
/// ```
/// use faculty_common::{normalize_university, Catalogs};
///
/// let catalogs = Catalogs::builtin();
/// let normalize = |u| normalize_university(u, &catalogs.universities, &catalogs.university_keywords);
/// assert_eq!(normalize("Pontificia Universidad Católica del Perú"), "PUCP");
/// assert_eq!(normalize(""), "Unknown");
/// ```
pub fn normalize_university(university: &str, dictionary: &Catalog, keywords: &Catalog) -> String {
    let trimmed = university.trim();
    if trimmed.is_empty() {
        return UNKNOWN_UNIVERSITY.to_string();
    }

    let lower = trimmed.to_lowercase();

    if let Some(canonical) = dictionary.get(&lower) {
        return canonical.to_string();
    }

    if let Some((_, canonical)) = keywords.iter().find(|(kw, _)| lower.contains(kw)) {
        return canonical.to_string();
    }

    title_case(trimmed)
}
