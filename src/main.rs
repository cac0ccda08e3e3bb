//! xdocs config extractor CLI
//!
//! Entry point for the `xdocs-extract` command-line tool.

use clap::{ArgAction, Parser, Subcommand};
use config_tree::{sort_properties, FixtureParser, InlineConfigParser};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use xdocs_config_extractor::config::DEFAULT_CONFIG_FILE;
use xdocs_config_extractor::logging::{effective_level, init_logging};
use xdocs_config_extractor::{
    load_template, ConfigSerializer, EffectiveConfig, ExtractorConfig, Extractor,
};

#[derive(Parser)]
#[command(name = "xdocs-extract")]
#[command(about = "Extract inline example configurations into XML config files", version)]
struct Cli {
    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Decrease log verbosity (repeatable)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    quiet: u8,

    /// Path to config file (default: .xdocs-extract.toml if present)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one config file per fixture found under a directory
    Extract {
        /// Directory searched recursively for Example<N>.java / Example<N>.txt
        #[arg(long, short = 'i')]
        input: Option<PathBuf>,

        /// Directory receiving one sub-directory per fixture
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Template file (default: bundled TreeWalker template)
        #[arg(long, short = 't')]
        template: Option<PathBuf>,

        /// Also write a merged document covering every fixture
        #[arg(long)]
        all_in_one: bool,

        /// Re-sort property lines of every written document
        #[arg(long)]
        sort: bool,

        /// Output the report in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Render a single fixture
    Render {
        fixture: PathBuf,

        /// Template file (default: bundled TreeWalker template)
        #[arg(long, short = 't')]
        template: Option<PathBuf>,

        /// Write to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Render several fixtures into one document with per-fixture ids
    Merge {
        #[arg(required = true)]
        fixtures: Vec<PathBuf>,

        /// Template file (default: bundled TreeWalker template)
        #[arg(long, short = 't')]
        template: Option<PathBuf>,

        /// Write to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Sort runs of <property> lines in an existing XML file
    Sort {
        file: PathBuf,

        /// Rewrite the file instead of printing to stdout
        #[arg(long)]
        in_place: bool,
    },

    /// Print the parsed configuration tree of a fixture as JSON
    Inspect { fixture: PathBuf },

    /// Print the effective configuration, or one value of it, as JSON
    Config {
        /// Dot-separated key, e.g. `all_in_one.file_name`
        key: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let verbosity = (cli.verbose as i8).saturating_sub(cli.quiet as i8);
    let _logger = match init_logging(effective_level(&cli.log_level, verbosity)) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Failed to initialise logging: {}", e);
            None
        }
    };

    let config_path = cli.config.clone().or_else(|| {
        let default = PathBuf::from(DEFAULT_CONFIG_FILE);
        default.exists().then_some(default)
    });

    match cli.command {
        Commands::Extract {
            input,
            output,
            template,
            all_in_one,
            sort,
            json,
        } => {
            let mut overrides = Map::new();
            insert_path(&mut overrides, "input_dir", input);
            insert_path(&mut overrides, "output_dir", output);
            insert_path(&mut overrides, "template", template);
            if all_in_one {
                overrides.insert("all_in_one".to_string(), serde_json::json!({"enabled": true}));
            }
            if sort {
                overrides.insert("sort_output".to_string(), Value::Bool(true));
            }
            let config = load_config(config_path.as_deref(), overrides);
            run_extract(config, json);
        }
        Commands::Render {
            fixture,
            template,
            output,
        } => {
            let config = load_config(config_path.as_deref(), Map::new());
            run_render(&config, &fixture, template, output);
        }
        Commands::Merge {
            fixtures,
            template,
            output,
        } => {
            let config = load_config(config_path.as_deref(), Map::new());
            run_merge(&config, &fixtures, template, output);
        }
        Commands::Sort { file, in_place } => {
            run_sort(&file, in_place);
        }
        Commands::Inspect { fixture } => {
            run_inspect(&fixture);
        }
        Commands::Config { key } => {
            run_config(config_path.as_deref(), key.as_deref());
        }
    }
}

fn insert_path(overrides: &mut Map<String, Value>, key: &str, path: Option<PathBuf>) {
    if let Some(path) = path {
        overrides.insert(
            key.to_string(),
            Value::String(path.to_string_lossy().to_string()),
        );
    }
}

/// Build the layered config and pin its project root to an absolute path
fn load_config(config_path: Option<&Path>, overrides: Map<String, Value>) -> ExtractorConfig {
    let cli = (!overrides.is_empty()).then_some(Value::Object(overrides));
    let mut config = match EffectiveConfig::build(config_path, cli).and_then(|e| e.extractor_config())
    {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            process::exit(1);
        }
    };

    if config.project_root.is_relative() {
        match std::env::current_dir() {
            Ok(cwd) => config.project_root = cwd.join(&config.project_root),
            Err(e) => {
                eprintln!("Cannot determine working directory: {}", e);
                process::exit(1);
            }
        }
    }
    log::debug!("Project root: {}", config.project_root.display());
    config
}

fn run_extract(config: ExtractorConfig, json_output: bool) {
    let extractor = match Extractor::new(config) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let report = match extractor.run() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Extraction failed: {}", e);
            process::exit(1);
        }
    };

    if json_output {
        match report.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    } else {
        println!("{}", report.to_human());
    }

    if report.has_failures() {
        process::exit(1);
    }
}

fn resolve_template(config: &ExtractorConfig, template: Option<PathBuf>) -> String {
    let path = template
        .or_else(|| config.template.clone())
        .map(|p| config.resolve(&p));
    match load_template(path.as_deref()) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error loading template: {}", e);
            process::exit(1);
        }
    }
}

fn emit(document: &str, output: Option<PathBuf>) {
    match output {
        Some(path) => {
            if let Err(e) = fs::write(&path, document) {
                eprintln!("Error writing {}: {}", path.display(), e);
                process::exit(1);
            }
            log::info!("Wrote {}", path.display());
        }
        None => println!("{}", document),
    }
}

fn run_render(
    config: &ExtractorConfig,
    fixture: &Path,
    template: Option<PathBuf>,
    output: Option<PathBuf>,
) {
    let template = resolve_template(config, template);
    let serializer = ConfigSerializer::from_config(config);
    match serializer.render_single(fixture, &template) {
        Ok(document) => emit(&document, output),
        Err(e) => {
            eprintln!("Failed to process file: {}", e);
            process::exit(1);
        }
    }
}

fn run_merge(
    config: &ExtractorConfig,
    fixtures: &[PathBuf],
    template: Option<PathBuf>,
    output: Option<PathBuf>,
) {
    let template = resolve_template(config, template);
    let serializer = ConfigSerializer::from_config(config);
    match serializer.render_merged(fixtures, &template) {
        Ok(document) => emit(&document, output),
        Err(e) => {
            eprintln!("Failed to generate all-in-one configuration: {}", e);
            process::exit(1);
        }
    }
}

fn run_sort(file: &Path, in_place: bool) {
    let content = match fs::read_to_string(file) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading {}: {}", file.display(), e);
            process::exit(1);
        }
    };
    let sorted = sort_properties(&content);
    if in_place {
        emit(&sorted, Some(file.to_path_buf()));
    } else {
        print!("{}", sorted);
    }
}

fn run_inspect(fixture: &Path) {
    let tree = match InlineConfigParser::new().parse(fixture) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Failed to parse {}: {}", fixture.display(), e);
            process::exit(1);
        }
    };
    match serde_json::to_string_pretty(&tree) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}

fn run_config(config_path: Option<&Path>, key: Option<&str>) {
    let effective = match EffectiveConfig::build(config_path, None) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    };

    let output = match key {
        Some(key) => match effective.get(key) {
            Some(value) => serde_json::to_string_pretty(value),
            None => {
                eprintln!("Unknown configuration key: {}", key);
                process::exit(1);
            }
        },
        None => effective.to_json(),
    };
    match output {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}
