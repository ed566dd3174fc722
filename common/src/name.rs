//! Match keys for person and institution names
//!
//! A match key is the diacritic-free, lowercase, letters-and-spaces form of a
//! name. It is only compared, never shown.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Build the match key for a name
///
/// # Examples
/// ```
/// use faculty_common::normalize_name;
///
/// assert_eq!(normalize_name("  José  GARCÍA-Pérez "), "jose garciaperez");
/// assert_eq!(normalize_name(""), "");
/// ```
pub fn normalize_name(name: &str) -> String {
    let stripped: String = name
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_lowercase() || c.is_whitespace())
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
