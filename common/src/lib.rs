//! Faculty Common Library
//!
//! Data model and pure normalization algorithms shared by the linker CLI
//! and the post-processing commands. No I/O beyond catalog loading.

pub mod catalog;
pub mod degree;
pub mod error;
pub mod graph;
pub mod name;
pub mod projection;
pub mod specialization;
pub mod stats;
pub mod text;
pub mod types;
pub mod university;

pub use catalog::{Catalog, Catalogs};
pub use degree::{classify_degree, is_placeholder};
pub use error::{Error, Result};
pub use graph::{build_graph, GraphPayload, Group, GroupBy};
pub use name::normalize_name;
pub use projection::{project_document, project_record, ProjectionSummary};
pub use specialization::{extract_specialization, normalize_specialization, GENERAL};
pub use stats::{count_values, university_rewrites, Distributions};
pub use types::{
    ClassifiedProfessorRecord, DegreeLevel, InterestAreas, LinkedProfessorRecord, RawBaseRecord,
    ScrapedEntry, ScrapedGroup, ScrapedIdentity,
};
pub use university::{normalize_university, UNKNOWN_UNIVERSITY};
