//! Interest-area classification
//!
//! - `oracle`: the label-scoring capability boundary
//! - `http` / `keyword`: oracle implementations
//! - `cache`: on-disk score cache wrapping any oracle
//! - `assigner`: threshold and ordering policy over oracle output

mod assigner;
mod cache;
mod http;
mod keyword;
mod oracle;
mod provider;

pub use assigner::{build_text_content, select_interest_areas, InterestAreaAssigner};
pub use cache::{cache_key, CacheFile, CachingOracle, CACHE_FILE_NAME};
pub use http::{parse_response, HttpOracle};
pub use keyword::KeywordOracle;
pub use oracle::{ClassificationOracle, LabelScores};
pub use provider::OracleProvider;
