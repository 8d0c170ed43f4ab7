//! bimslice CLI: extract story and keyword filtered subsets of a model
//!
//! Usage:
//!   bimslice filter <input.json> [--story NAME]... [--keywords a,b] [--product TYPE] [-o out]
//!   bimslice options <input.json>

use bimslice::model::Model;
use bimslice::patch::{default_output_name, ensure_extension, parse_keywords, ModelOptions, StorySelection};
use bimslice::{patch, FilterMode, FilterSpec, PatchOutcome};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, Level};

/// Extension of the model documents this tool reads and writes
const MODEL_EXTENSION: &str = "json";

/// Exit code when the filter selected nothing
const EXIT_NO_MATCH: i32 = 2;

#[derive(Parser)]
#[command(
    name = "bimslice",
    version,
    about = "Extract filtered subsets of building-information models"
)]
struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the matching elements and their ancestors into a new model
    Filter {
        /// Model document to read
        input: PathBuf,
        /// Where to write the result (defaults to a name derived from the filter)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// YAML filter spec; flags below override its fields
        #[arg(long)]
        config: Option<PathBuf>,
        /// Story to keep (repeatable)
        #[arg(long = "story")]
        stories: Vec<String>,
        /// Keep every story in the model
        #[arg(long, conflicts_with = "stories")]
        all_stories: bool,
        /// Comma separated keywords matched against element names
        #[arg(long)]
        keywords: Option<String>,
        /// Product type an element must have (e.g. IfcWall)
        #[arg(long)]
        product: Option<String>,
        /// Filtering mode (inferred from --product when omitted)
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
    },
    /// List the stories and product types a model offers
    Options {
        /// Model document to read
        input: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    TypeAndKeyword,
    KeywordOnly,
}

impl From<ModeArg> for FilterMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::TypeAndKeyword => FilterMode::TypeAndKeyword,
            ModeArg::KeywordOnly => FilterMode::KeywordOnly,
        }
    }
}

fn init_logging(level: &str) {
    let level = Level::from_str(level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using 'warn' instead.", level);
        Level::WARN
    });
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_model(path: &Path) -> Result<Model, String> {
    Model::load(path).map_err(|e| format!("Failed to open model '{}': {}", path.display(), e))
}

/// Merge the YAML spec (if any) with command-line overrides
fn build_spec(
    config: Option<&Path>,
    stories: Vec<String>,
    all_stories: bool,
    keywords: Option<String>,
    product: Option<String>,
    mode: Option<ModeArg>,
) -> Result<FilterSpec, String> {
    let mut spec = match config {
        Some(path) => FilterSpec::load(path)
            .map_err(|e| format!("Failed to read filter spec '{}': {}", path.display(), e))?,
        None => FilterSpec::default(),
    };
    if all_stories {
        spec.stories = StorySelection::All;
    } else if !stories.is_empty() {
        spec.stories = StorySelection::Named(stories);
    }
    if let Some(keywords) = keywords {
        spec.keywords = parse_keywords(&keywords);
    }
    if product.is_some() {
        spec.product = product;
    }
    if let Some(mode) = mode {
        spec.mode = Some(mode.into());
    }
    Ok(spec)
}

fn output_path(input: &Path, explicit: Option<PathBuf>, name: String) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }
    let file = ensure_extension(&name, MODEL_EXTENSION);
    match input.parent() {
        Some(dir) => dir.join(file),
        None => PathBuf::from(file),
    }
}

fn cmd_filter(input: &Path, output: Option<PathBuf>, spec: FilterSpec) -> i32 {
    let model = match load_model(input) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let config = match spec.resolve(&model) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    debug!(?config, "resolved filter");

    let outcome = match patch(&model, &config) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error during filtering: {}", e);
            return 1;
        }
    };
    let extraction = match outcome {
        PatchOutcome::Extracted(extraction) => extraction,
        PatchOutcome::NoMatchingElements(_) => {
            eprintln!("No objects found matching the given criteria.");
            return EXIT_NO_MATCH;
        }
    };

    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "model".to_string());
    let name = spec
        .output
        .clone()
        .unwrap_or_else(|| default_output_name(&stem, &config));
    let path = output_path(input, output, name);

    if let Err(e) = extraction.model.save(&path) {
        eprintln!("Error: cannot write '{}': {}", path.display(), e);
        return 1;
    }

    let stories: Vec<&str> = config.stories.iter().map(String::as_str).collect();
    println!("Stories:  {}", stories.join(", "));
    if config.mode == FilterMode::TypeAndKeyword {
        if let Some(product) = &config.product_type {
            println!("Product:  {}", product);
        }
    }
    println!("Keywords: {}", config.keywords.join(", "));
    println!(
        "Extracted {} element(s) into {} entities and {} relation(s): {}",
        extraction.selected.len(),
        extraction.model.entity_count(),
        extraction.relations.total(),
        path.display()
    );
    0
}

fn cmd_options(input: &Path) -> i32 {
    let model = match load_model(input) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let options = ModelOptions::from_model(&model);
    println!("STORIES");
    if options.stories.is_empty() {
        println!("  (none)");
    }
    for story in &options.stories {
        println!("  {}", story);
    }
    println!("PRODUCT TYPES");
    for product in &options.product_types {
        println!("  {}", product);
    }
    0
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let code = match cli.command {
        Commands::Filter {
            input,
            output,
            config,
            stories,
            all_stories,
            keywords,
            product,
            mode,
        } => match build_spec(config.as_deref(), stories, all_stories, keywords, product, mode) {
            Ok(spec) => cmd_filter(&input, output, spec),
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        },
        Commands::Options { input } => cmd_options(&input),
    };
    std::process::exit(code);
}
