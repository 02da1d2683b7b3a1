use bsonquery::cli as prog_cli;
use bsonquery::config::{CompositeMode, RangeOperatorMode, TranslatorConfig};
use bsonquery::{QueryTranslator, logger};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;

/// Translate select descriptors into MongoDB filter/sort documents
#[derive(Parser, Debug)]
#[command(name = "bsonquery", version, long_about = None)]
struct Cli {
    /// Path to a config file (TOML). If omitted, $BSONQUERY_CONFIG or
    /// ./bsonquery.toml is used when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Field to sort by when no sort descriptors are given. Takes precedence
    /// over config/env.
    #[arg(long)]
    default_sort: Option<String>,
    /// Keep composite OR-groups apart ($and of $or) instead of flattening them
    #[arg(long)]
    nested: bool,
    /// Translate between/in/not_in to $gte+$lte/$in/$nin instead of the $eq
    /// placeholder
    #[arg(long)]
    native_ranges: bool,
    /// Log level: error|warn|info|debug|trace
    #[arg(long)]
    log_level: Option<String>,
    /// Write bsonquery.log into this directory as well as stderr
    #[arg(long)]
    log_dir: Option<PathBuf>,
    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print {"filter": ..., "sort": ...} for a SelectParameter JSON document
    Translate {
        /// Input file; reads stdin when omitted
        file: Option<PathBuf>,
    },
    /// Print only the filter document
    Filter {
        /// Input file; reads stdin when omitted
        file: Option<PathBuf>,
    },
    /// Print only the sort document
    Sort {
        /// Input file; reads stdin when omitted
        file: Option<PathBuf>,
    },
    /// Print the sort document for a spec like -age,+name
    #[command(name = "sort-spec")]
    SortSpec {
        /// Comma-separated fields; prefix - for descending, + or nothing for
        /// ascending
        #[arg(allow_hyphen_values = true)]
        spec: String,
    },
}

fn read_input(file: Option<PathBuf>) -> std::io::Result<String> {
    match file {
        Some(p) => std::fs::read_to_string(p),
        None => {
            let mut s = String::new();
            std::io::stdin().read_to_string(&mut s)?;
            Ok(s)
        }
    }
}

fn load_config(cli: &Cli) -> Result<TranslatorConfig, Box<dyn std::error::Error>> {
    // Precedence: CLI > env > config file > defaults
    let mut cfg = TranslatorConfig::load(cli.config.as_deref())?;
    if let Some(field) = &cli.default_sort {
        cfg.default_sort_field = field.clone();
    }
    if cli.nested {
        cfg.composite_mode = CompositeMode::Nested;
    }
    if cli.native_ranges {
        cfg.range_operators = RangeOperatorMode::Native;
    }
    Ok(cfg)
}

fn execute(cli: Cli) -> Result<String, Box<dyn std::error::Error>> {
    let cfg = load_config(&cli)?;
    let translator = QueryTranslator::with_config(cfg);
    let cmd = match cli.command {
        Commands::Translate { file } => prog_cli::Command::Translate {
            select_json: read_input(file)?,
        },
        Commands::Filter { file } => prog_cli::Command::Filter {
            select_json: read_input(file)?,
        },
        Commands::Sort { file } => prog_cli::Command::Sort {
            select_json: read_input(file)?,
        },
        Commands::SortSpec { spec } => prog_cli::Command::SortSpec { spec },
    };
    Ok(prog_cli::run(&translator, cmd, cli.pretty)?)
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = logger::configure_logging(cli.log_dir.as_deref(), cli.log_level.as_deref()) {
        eprintln!("warning: logging disabled: {e}");
    }
    match execute(cli) {
        Ok(out) => println!("{out}"),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
