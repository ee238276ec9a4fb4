use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info};
use serde::Serialize;

use pathquill::config::Config;
use pathquill::file::loader::{build_matching_set, load_patterns, load_patterns_from_stdin};
use pathquill::matching::MatchingSet;
use pathquill::path::{JsonPath, Tribool};

/// PathQuill - JSONPath pattern containment matching
#[derive(Parser)]
#[command(name = "pathquill")]
#[command(version)]
#[command(about = "Checks whether JSONPath patterns contain other JSONPath expressions", long_about = None)]
struct Cli {
    /// Output format (default: from config, else text)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check whether PATTERN contains PATH
    Match {
        /// Pattern expression, e.g. '$.a.*.c[*]'
        pattern: String,
        /// Expression to test, e.g. '$.a.b.c[42]'
        path: String,
    },
    /// Match paths against every pattern in a pattern file
    Query {
        /// Pattern file, one expression per line ('-' reads stdin)
        #[arg(short, long)]
        patterns: Option<String>,
        /// Keep patterns as written instead of normalizing them
        #[arg(long)]
        no_normalize: bool,
        /// Expressions to test
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Print the normalized form of each expression
    Normalize {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Report whether each expression is absolute, strict and normalized
    Check {
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct QueryReport<'a> {
    path: &'a JsonPath,
    result: Tribool,
    matched: Vec<&'a JsonPath>,
}

#[derive(Serialize)]
struct CheckReport<'a> {
    path: &'a JsonPath,
    absolute: bool,
    strict: bool,
    normalized: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = Config::load();

    // RUST_LOG wins over the configured level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    match run(cli, &config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(2)
        }
    }
}

/// Runs the selected command; returns whether every tested path matched.
fn run(cli: Cli, config: &Config) -> Result<bool> {
    // CLI format overrides config format
    let format = cli.format.unwrap_or(if config.json_output() {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    });

    match cli.command {
        Command::Match { pattern, path } => {
            let pattern = parse_path(&pattern)?;
            let path = parse_path(&path)?;
            let result = pattern.matches(&path);
            match format {
                OutputFormat::Text => println!("{}", result),
                OutputFormat::Json => println!("{}", serde_json::to_string(&result)?),
            }
            Ok(is_match(result, config))
        }
        Command::Query {
            patterns,
            no_normalize,
            paths,
        } => {
            let set = load_set(patterns, !no_normalize && config.normalize_patterns, config)?;
            let paths = parse_paths(&paths)?;

            let reports: Vec<QueryReport> = paths
                .iter()
                .map(|path| QueryReport {
                    path,
                    result: set.matches(path),
                    matched: set.matched_by(path),
                })
                .collect();

            match format {
                OutputFormat::Text => {
                    for report in &reports {
                        println!("{}\t{}", report.path, report.result);
                        for pattern in &report.matched {
                            println!("  {}", pattern);
                        }
                    }
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
            }
            Ok(reports.iter().all(|report| is_match(report.result, config)))
        }
        Command::Normalize { paths } => {
            let normalized: Vec<JsonPath> = parse_paths(&paths)?
                .iter()
                .map(JsonPath::normalized)
                .collect();
            match format {
                OutputFormat::Text => normalized.iter().for_each(|path| println!("{}", path)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&normalized)?),
            }
            Ok(true)
        }
        Command::Check { paths } => {
            let paths = parse_paths(&paths)?;
            let reports: Vec<CheckReport> = paths
                .iter()
                .map(|path| CheckReport {
                    path,
                    absolute: path.is_absolute(),
                    strict: path.is_strict(),
                    normalized: path.is_normalized(),
                })
                .collect();
            match format {
                OutputFormat::Text => {
                    for report in &reports {
                        println!(
                            "{}\tabsolute={} strict={} normalized={}",
                            report.path, report.absolute, report.strict, report.normalized
                        );
                    }
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
            }
            Ok(true)
        }
    }
}

fn is_match(result: Tribool, config: &Config) -> bool {
    match result {
        Tribool::True => true,
        Tribool::Unknown => config.unknown_is_match,
        Tribool::False => false,
    }
}

fn parse_path(text: &str) -> Result<JsonPath> {
    text.parse()
        .with_context(|| format!("Invalid JSONPath expression: {}", text))
}

fn parse_paths(texts: &[String]) -> Result<Vec<JsonPath>> {
    texts.iter().map(|text| parse_path(text)).collect()
}

/// Loads the pattern set; the CLI file overrides the configured one.
fn load_set(
    patterns_file: Option<String>,
    normalize: bool,
    config: &Config,
) -> Result<MatchingSet<JsonPath>> {
    let file = patterns_file
        .or_else(|| config.patterns_file.clone())
        .context("No pattern file given (use --patterns or set patterns_file in the config)")?;

    let patterns = if file == "-" {
        load_patterns_from_stdin()?
    } else {
        load_patterns(&file)?
    };
    debug!("Building matching set (normalize: {})", normalize);
    let set = build_matching_set(patterns, normalize);
    info!("Loaded {} patterns from {}", set.len(), file);
    Ok(set)
}
