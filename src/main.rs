use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use codeoutline::config::{load_config, load_config_file, OutlineConfig};
use codeoutline::outline::{parse_batch, parse_file, scan_directory};
use tracing_subscriber::EnvFilter;

/// Declaration outlines for Python, JavaScript and TypeScript sources.
#[derive(Parser)]
#[command(
    name = "codeoutline",
    about = "Declaration outlines for Python, JavaScript and TypeScript sources"
)]
struct Cli {
    /// Configuration file (default: built-in settings)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pretty: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Outline a single file
    File {
        /// Source file path
        path: PathBuf,
    },
    /// Outline every path in a JSON array read from stdin
    Batch,
    /// Outline every supported file under a directory
    Scan {
        /// Directory path (default: current directory)
        path: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> codeoutline::errors::Result<()> {
    let explicit_config = match &cli.config {
        Some(path) => Some(load_config_file(path)?),
        None => None,
    };
    match cli.command {
        Commands::File { path } => {
            let config = explicit_config.unwrap_or_default();
            print_json(&parse_file(&path, &config), cli.pretty)?;
        }
        Commands::Batch => {
            let config = explicit_config.unwrap_or_default();
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            let paths: Vec<PathBuf> = match serde_json::from_str(&input) {
                Ok(paths) => paths,
                Err(e) => {
                    let message = serde_json::json!({ "error": format!("Invalid JSON input: {e}") });
                    println!("{}", message);
                    process::exit(1);
                }
            };
            print_json(&parse_batch(&paths, &config), cli.pretty)?;
        }
        Commands::Scan { path } => {
            let root = resolve_path(path);
            let config: OutlineConfig = match explicit_config {
                Some(config) => config,
                None => load_config(&root)?,
            };
            let files = scan_directory(&root, &config)?;
            print_json(&parse_batch(&files, &config), cli.pretty)?;
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> codeoutline::errors::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}

/// Resolves an optional path argument, defaulting to the current directory.
fn resolve_path(path: Option<PathBuf>) -> PathBuf {
    match path {
        Some(p) => p,
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}
