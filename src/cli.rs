use crate::classifier::OracleProvider;
use clap::{Parser, Subcommand};
use faculty_common::GroupBy;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "faculty-linker")]
#[command(about = "Professor record linkage, normalization and interest-area tagging", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON file extending the built-in specialization/university catalogs
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Link roster with scraped data, classify, and write the output document
    Run {
        /// Roster file (`;`-separated CSV or .xlsx)
        #[arg(required = true)]
        roster: PathBuf,

        /// Scraped result groups (JSON)
        #[arg(short, long)]
        scraped: Option<PathBuf>,

        /// Interest dictionary (JSON object label -> keywords)
        #[arg(short, long)]
        interests: Option<PathBuf>,

        /// Output JSON document
        #[arg(short, long, default_value = "professors.json")]
        output: PathBuf,

        /// Interest-area oracle
        #[arg(long, default_value = "keyword")]
        oracle: OracleProvider,

        /// Minimum interest score (overrides config)
        #[arg(long)]
        min_score: Option<f64>,

        /// Link acceptance score 0-100 (overrides config)
        #[arg(long)]
        link_threshold: Option<u8>,

        /// Concurrent oracle requests (overrides config)
        #[arg(short = 'j', long)]
        concurrency: Option<usize>,

        /// Keep only professors linked to scraped data
        #[arg(long)]
        linked_only: bool,

        /// Skip the oracle score cache
        #[arg(long)]
        no_cache: bool,
    },

    /// Re-run degree/specialization/university normalization on a document
    Normalize {
        /// Output document to normalize
        #[arg(required = true)]
        input: PathBuf,

        /// Output file (defaults to overwriting the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the summary without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Trim every record to the published field set
    Clean {
        #[arg(required = true)]
        input: PathBuf,

        /// Output file (defaults to overwriting the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build the node/group graph payload for the visualization
    Graph {
        #[arg(required = true)]
        input: PathBuf,

        /// Grouping (interest-areas / specialization)
        #[arg(short, long, default_value = "interest-areas")]
        group_by: GroupBy,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print distributions, optionally writing an Excel report
    Report {
        #[arg(required = true)]
        input: PathBuf,

        /// Excel workbook to write
        #[arg(long)]
        excel: Option<PathBuf>,
    },

    /// Show or edit configuration
    Config {
        /// Store the oracle API key
        #[arg(long)]
        set_api_key: Option<String>,

        /// Store the oracle endpoint URL
        #[arg(long)]
        set_endpoint: Option<String>,

        /// Show configuration
        #[arg(long)]
        show: bool,
    },

    /// Oracle cache management
    Cache {
        /// Delete the cache
        #[arg(long)]
        clear: bool,

        /// Folder holding the cache (defaults to the current directory)
        #[arg(short, long)]
        folder: Option<PathBuf>,

        /// Show cache information
        #[arg(long)]
        info: bool,
    },
}
