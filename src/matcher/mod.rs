//! Record linkage between the roster and scraped result groups

mod fuzzy;
mod identity;
mod linker;

pub use fuzzy::{
    partial_ratio, ratio, token_set_ratio, token_sort_ratio, weighted_ratio, FuzzyMatcher, Match, WeightedRatio,
};
pub use identity::{derive_identities, derive_identity, extract_name_from_title};
pub use linker::{RecordLinker, DEFAULT_LINK_THRESHOLD};
