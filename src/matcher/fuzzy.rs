//! Token-aware similarity on match keys
//!
//! `WeightedRatio` blends a plain edit-distance ratio with token-sort,
//! token-set and (for strings of very different length) partial-window
//! variants, keeping the best. Scores are integers in 0..=100.

use strsim::normalized_levenshtein;

/// Scale applied to token-based variants
const UNBASE_SCALE: f64 = 0.95;
/// Scale applied to partial-window variants
const PARTIAL_SCALE: f64 = 0.90;
/// Partial scale when one string is more than 8x the other
const LONG_PARTIAL_SCALE: f64 = 0.60;

/// Best candidate for a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Position in the candidate slice
    pub index: usize,
    pub score: u8,
}

pub trait FuzzyMatcher: Send + Sync {
    /// Similarity in 0..=100
    fn score(&self, query: &str, candidate: &str) -> u8;

    /// Highest-scoring candidate; ties go to the earliest one. `None` only
    /// for an empty candidate set.
    fn best_match(&self, query: &str, candidates: &[String]) -> Option<Match> {
        let mut best: Option<Match> = None;
        for (index, candidate) in candidates.iter().enumerate() {
            let score = self.score(query, candidate);
            if best.map_or(true, |b| score > b.score) {
                best = Some(Match { index, score });
                if score == 100 {
                    break;
                }
            }
        }
        best
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedRatio;

impl FuzzyMatcher for WeightedRatio {
    fn score(&self, query: &str, candidate: &str) -> u8 {
        weighted_ratio(query, candidate)
    }
}

pub fn weighted_ratio(a: &str, b: &str) -> u8 {
    let a = a.trim();
    let b = b.trim();
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let len_a = a.chars().count() as f64;
    let len_b = b.chars().count() as f64;
    let len_ratio = len_a.max(len_b) / len_a.min(len_b);

    let base = ratio(a, b);

    let best = if len_ratio < 1.5 {
        let sorted = token_sort_ratio(a, b, false) * UNBASE_SCALE;
        let set = token_set_ratio(a, b, false) * UNBASE_SCALE;
        base.max(sorted).max(set)
    } else {
        let scale = if len_ratio > 8.0 { LONG_PARTIAL_SCALE } else { PARTIAL_SCALE };
        let partial = partial_ratio(a, b) * scale;
        let sorted = token_sort_ratio(a, b, true) * UNBASE_SCALE * scale;
        let set = token_set_ratio(a, b, true) * UNBASE_SCALE * scale;
        base.max(partial).max(sorted).max(set)
    };

    best.round().clamp(0.0, 100.0) as u8
}

/// Edit-distance similarity, 0..=100
pub fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    normalized_levenshtein(a, b) * 100.0
}

/// Best ratio of the shorter string against equally long windows of the longer
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let (short, long) = if a.chars().count() <= b.chars().count() { (a, b) } else { (b, a) };
    let short_len = short.chars().count();
    let long_chars: Vec<char> = long.chars().collect();

    if short_len == 0 {
        return 0.0;
    }

    let mut best: f64 = 0.0;
    for start in 0..=(long_chars.len() - short_len) {
        let window: String = long_chars[start..start + short_len].iter().collect();
        best = best.max(ratio(short, &window));
        if best >= 100.0 {
            break;
        }
    }
    best
}

fn sorted_tokens(s: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens
}

fn pick(partial: bool) -> fn(&str, &str) -> f64 {
    if partial {
        partial_ratio
    } else {
        ratio
    }
}

/// Ratio after sorting the tokens of both strings
pub fn token_sort_ratio(a: &str, b: &str, partial: bool) -> f64 {
    let a = sorted_tokens(a).join(" ");
    let b = sorted_tokens(b).join(" ");
    pick(partial)(&a, &b)
}

/// Ratio built on the shared tokens plus each side's remainder
pub fn token_set_ratio(a: &str, b: &str, partial: bool) -> f64 {
    let mut tokens_a = sorted_tokens(a);
    tokens_a.dedup();
    let mut tokens_b = sorted_tokens(b);
    tokens_b.dedup();

    let common: Vec<&str> = tokens_a.iter().filter(|t| tokens_b.contains(t)).copied().collect();
    let only_a: Vec<&str> = tokens_a.iter().filter(|t| !tokens_b.contains(t)).copied().collect();
    let only_b: Vec<&str> = tokens_b.iter().filter(|t| !tokens_a.contains(t)).copied().collect();

    let common_str = common.join(" ");
    let combined_a = format!("{} {}", common_str, only_a.join(" ")).trim().to_string();
    let combined_b = format!("{} {}", common_str, only_b.join(" ")).trim().to_string();

    let score = pick(partial);
    let mut best = score(&combined_a, &combined_b);
    if !common_str.is_empty() {
        best = best
            .max(score(&common_str, &combined_a))
            .max(score(&common_str, &combined_b));
    }
    best
}
