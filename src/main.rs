use clap::Parser;
use faculty_common::{
    build_graph, project_document, university_rewrites, Catalogs, ClassifiedProfessorRecord, Distributions,
};
use faculty_linker::classifier::{CacheFile, CachingOracle, ClassificationOracle, HttpOracle, KeywordOracle, OracleProvider};
use faculty_linker::cli::{Cli, Commands};
use faculty_linker::config::Config;
use faculty_linker::error::{LinkerError, Result};
use faculty_linker::ingest::{self, InterestDictionary};
use faculty_linker::pipeline::{renormalize, Pipeline, PipelineOptions};
use faculty_linker::export;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const SAMPLE_SIZE: usize = 10;
const REWRITE_EXAMPLES: usize = 10;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_catalogs(path: Option<&Path>) -> Result<Catalogs> {
    match path {
        None => Ok(Catalogs::builtin()),
        Some(path) => {
            if !path.exists() {
                return Err(LinkerError::MissingInput(path.display().to_string()));
            }
            let overrides =
                Catalogs::from_file(path).map_err(|e| LinkerError::malformed(path.display(), e))?;
            tracing::info!("catalog overrides loaded from {}", path.display());
            Ok(Catalogs::builtin_with(&overrides))
        }
    }
}

fn build_oracle(
    provider: OracleProvider,
    config: &Config,
    dictionary: &InterestDictionary,
) -> Result<Box<dyn ClassificationOracle>> {
    Ok(match provider {
        OracleProvider::Keyword => Box::new(KeywordOracle::new(dictionary)),
        OracleProvider::Http => {
            let api_key = match config.get_api_key() {
                Ok(key) => Some(key),
                Err(_) => {
                    tracing::warn!("no API key configured, calling {} anonymously", config.oracle_endpoint);
                    None
                }
            };
            Box::new(HttpOracle::new(
                config.oracle_endpoint.clone(),
                api_key,
                Duration::from_secs(config.timeout_seconds),
            )?)
        }
    })
}

fn print_counts(title: &str, counts: &[(String, usize)]) {
    println!("\n{}:", title);
    if counts.is_empty() {
        println!("  (none)");
    }
    for (value, count) in counts {
        println!("  {:<40} {}", value, count);
    }
}

fn print_distributions(records: &[ClassifiedProfessorRecord]) {
    let dist = Distributions::from_records(records);
    println!("Professors: {} ({} linked)", dist.total, dist.linked);
    print_counts("Degree level", &dist.degree_levels);
    print_counts("Specialization", &dist.specializations);
    print_counts("University", &dist.universities);
    print_counts("Interest areas", &dist.interest_areas);
}

fn output_folder(output: &Path) -> PathBuf {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load()?;
    let catalog_path = cli.catalog.clone();

    match cli.command {
        Commands::Run {
            roster,
            scraped,
            interests,
            output,
            oracle,
            min_score,
            link_threshold,
            concurrency,
            linked_only,
            no_cache,
        } => {
            println!("faculty-linker - run\n");

            if let Some(v) = min_score {
                config.min_score = v;
            }
            if let Some(v) = link_threshold {
                config.link_threshold = v;
            }
            if let Some(v) = concurrency {
                config.max_concurrency = v;
            }
            config.validate()?;

            let catalogs = load_catalogs(catalog_path.as_deref())?;

            // 1. inputs
            println!("[1/4] Loading inputs...");
            let roster = ingest::load_roster(&roster)?;
            let groups = match &scraped {
                Some(path) => ingest::load_scraped(path, config.min_relevance)?,
                None => Vec::new(),
            };
            let dictionary = match &interests {
                Some(path) => ingest::load_interest_dictionary(path)?,
                None => InterestDictionary::default(),
            };
            println!(
                "✔ {} professors, {} scraped groups, {} interest labels\n",
                roster.len(),
                groups.len(),
                dictionary.len()
            );

            let mut options = PipelineOptions::from(&config);
            options.linked_only = linked_only;
            options.show_progress = true;

            let folder = output_folder(&output);
            let labels = dictionary.labels();
            let mut caching: Option<Arc<CachingOracle<Box<dyn ClassificationOracle>>>> = None;
            let classifier: Option<Box<dyn ClassificationOracle>> = if labels.is_empty() {
                None
            } else {
                let base = build_oracle(oracle, &config, &dictionary)?;
                if no_cache {
                    Some(base)
                } else {
                    let cached = Arc::new(CachingOracle::new(base, &folder));
                    caching = Some(cached.clone());
                    let boxed: Box<dyn ClassificationOracle> = Box::new(cached);
                    Some(boxed)
                }
            };

            let mut pipeline = Pipeline::new(&catalogs, options);
            if let Some(classifier) = classifier.as_deref() {
                pipeline = pipeline.with_oracle(classifier, labels);
            }

            // 2. linking
            println!("[2/4] Linking records...");
            let linked = pipeline.link(&roster, &groups);
            let linked_count = linked.iter().filter(|l| l.is_linked()).count();
            println!("✔ {} of {} linked\n", linked_count, linked.len());

            // 3. classification
            if classifier.is_some() {
                println!(
                    "[3/4] Assigning interest areas ({} oracle{})...",
                    oracle.name(),
                    if no_cache { "" } else { ", cache enabled" }
                );
            } else {
                println!("[3/4] No interest dictionary, interest areas left empty");
            }
            let records = pipeline.classify(linked).await;

            if let Some(cache) = &caching {
                if let Err(e) = cache.persist() {
                    tracing::warn!("could not save oracle cache: {}", e);
                }
                println!("✔ Classification done ({} cache hits)\n", cache.hits());
            } else {
                println!("✔ Classification done\n");
            }

            // 4. output
            println!("[4/4] Writing {}...", output.display());
            export::write_document(&records, &output)?;
            println!("✔ {} records written", records.len());

            export::print_sample(&records, SAMPLE_SIZE);
            println!("\n✅ Done");
        }

        Commands::Normalize { input, output, dry_run } => {
            println!("faculty-linker - normalize\n");

            let catalogs = load_catalogs(catalog_path.as_deref())?;
            let mut records = ingest::load_document(&input)?;
            for record in &mut records {
                renormalize(record, &catalogs);
            }

            print_distributions(&records);

            let rewrites = university_rewrites(&records, REWRITE_EXAMPLES);
            if !rewrites.is_empty() {
                println!("\nUniversity rewrites:");
                for (original, normalized) in &rewrites {
                    println!("  {} -> {}", original, normalized);
                }
            }

            if dry_run {
                println!("\n(dry run, nothing written)");
            } else {
                let target = output.unwrap_or(input);
                export::write_document(&records, &target)?;
                println!("\n✔ Saved: {}", target.display());
            }
        }

        Commands::Clean { input, output } => {
            println!("faculty-linker - clean\n");

            let document = ingest::load_document_value(&input)?;
            let (cleaned, summary) = project_document(&document)?;

            let target = output.unwrap_or(input);
            export::write_json(&cleaned, &target)?;

            println!("Records: {}", summary.records);
            println!("Kept fields: {}", summary.kept_fields.join(", "));
            if summary.removed_fields.is_empty() {
                println!("Removed fields: (none)");
            } else {
                println!("Removed fields: {}", summary.removed_fields.join(", "));
            }
            println!(
                "Size: {} -> {} bytes ({:.1}% smaller)",
                summary.original_bytes,
                summary.cleaned_bytes,
                summary.reduction_percent()
            );
            println!("✔ Saved: {}", target.display());
        }

        Commands::Graph { input, group_by, output } => {
            let records = ingest::load_document(&input)?;
            let graph = build_graph(&records, group_by)?;

            match output {
                Some(path) => {
                    export::write_json(&graph, &path)?;
                    println!(
                        "✔ {} nodes, {} groups written to {}",
                        graph.nodes.len(),
                        graph.groups.len(),
                        path.display()
                    );
                }
                None => println!("{}", serde_json::to_string_pretty(&graph)?),
            }
        }

        Commands::Report { input, excel } => {
            println!("faculty-linker - report\n");

            let records = ingest::load_document(&input)?;
            print_distributions(&records);

            if let Some(path) = excel {
                export::excel::generate_report(&records, &path)?;
                println!("\n✔ Excel report: {}", path.display());
            }
        }

        Commands::Config { set_api_key, set_endpoint, show } => {
            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ API key saved");
            }

            if let Some(endpoint) = set_endpoint {
                config.set_endpoint(endpoint)?;
                println!("✔ Endpoint saved");
            }

            if show {
                println!("Configuration ({}):", Config::config_path()?.display());
                println!("  Endpoint: {}", config.oracle_endpoint);
                println!("  API key: {}", if config.get_api_key().is_ok() { "set" } else { "not set" });
                println!("  Timeout: {}s", config.timeout_seconds);
                println!("  Concurrency: {}", config.max_concurrency);
                println!("  Min interest score: {}", config.min_score);
                println!("  Link threshold: {}", config.link_threshold);
                println!("  Min relevance: {}", config.min_relevance);
                println!("  Max text chars: {}", config.max_text_chars);
            }
        }

        Commands::Cache { clear, folder, info } => {
            let target = folder.unwrap_or_else(|| PathBuf::from("."));
            let cache_path = CacheFile::path(&target);

            if info || !clear {
                if cache_path.exists() {
                    let cache = CacheFile::load(&target);
                    println!("Oracle cache:");
                    println!("  Path: {}", cache_path.display());
                    println!("  Entries: {}", cache.len());
                    if let Some((oldest, newest)) = cache.time_span() {
                        println!("  Oldest: {}", oldest.format("%Y-%m-%d %H:%M:%S"));
                        println!("  Newest: {}", newest.format("%Y-%m-%d %H:%M:%S"));
                    }
                    if let Ok(meta) = std::fs::metadata(&cache_path) {
                        println!("  Size: {} bytes", meta.len());
                    }
                } else {
                    println!("No cache file: {}", cache_path.display());
                }
            }

            if clear {
                match CacheFile::clear(&target) {
                    Ok(true) => println!("✔ Cache deleted: {}", cache_path.display()),
                    Ok(false) => println!("No cache file"),
                    Err(e) => println!("Could not delete cache: {}", e),
                }
            }
        }
    }

    Ok(())
}
