use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use stringkit::{Catalog, FileTypeParser, ParserOptions, StringsFileParser};
use stringkit_cli::{expand_inputs, load_config, render_json, render_view, sort_catalogs};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    commands: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse `.strings` catalogs and print their entries with comments.
    Parse {
        /// Files, directories or glob patterns to parse
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Separator used to split keys into components
        #[arg(short, long)]
        separator: Option<String>,

        /// TOML config file with a `[strings]` table
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Display full values without truncation
        #[arg(long)]
        full: bool,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_parse(
    inputs: Vec<String>,
    separator: Option<String>,
    config: Option<PathBuf>,
    format: OutputFormat,
    full: bool,
) -> Result<bool, String> {
    let mut options = match config {
        Some(path) => load_config(path)?.strings,
        None => ParserOptions::default(),
    };
    if let Some(separator) = separator {
        options = options.with_separator(separator);
    }
    debug!(separator = %options.separator, "parser options");

    let paths = expand_inputs(&inputs)?;
    info!(count = paths.len(), "parsing catalogs");

    let parser = StringsFileParser::new(options);
    let results: Vec<_> = paths.par_iter().map(|path| parser.parse_catalog(path)).collect();

    let mut catalogs: Vec<Catalog> = Vec::with_capacity(results.len());
    let mut failed = false;
    for result in results {
        match result {
            Ok(catalog) => catalogs.push(catalog),
            Err(e) => {
                eprintln!("Error: {}", e);
                failed = true;
            }
        }
    }

    sort_catalogs(&mut catalogs);
    match format {
        OutputFormat::Text => print!("{}", render_view(&catalogs, full)),
        OutputFormat::Json => println!("{}", render_json(&catalogs)?),
    }

    Ok(!failed)
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let result = match args.commands {
        Commands::Parse {
            inputs,
            separator,
            config,
            format,
            full,
        } => run_parse(inputs, separator, config, format, full),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
