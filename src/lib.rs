//! faculty-linker
//!
//! Links a professor roster with web-scraped result groups, normalizes
//! degree, specialization and institution, and tags interest areas through
//! a pluggable classification oracle.

pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod ingest;
pub mod matcher;
pub mod pipeline;

pub use error::{LinkerError, Result};
pub use pipeline::{Pipeline, PipelineOptions};
