use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use legisdoc_lib::commands::{self, ingest::IngestRequest};
use legisdoc_lib::config::{self, Config};
use legisdoc_lib::models::enums::Dimension;
use legisdoc_lib::models::SearchFilters;

#[derive(Parser)]
#[command(name = "legisdoc")]
#[command(about = "Legislative document archive: ingest, search and report", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// SQLite database file
    #[arg(long, env = config::ENV_DATABASE, global = true)]
    database: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract, parse and store every supported file in a directory
    Ingest {
        /// Directory to sweep (defaults to the configured input directory)
        directory: Option<PathBuf>,

        /// Parse files and print the records without storing them
        #[arg(long)]
        dry_run: bool,

        /// Skip files whose content is already stored
        #[arg(long)]
        skip_duplicates: bool,
    },

    /// Ranked full-text search
    Search {
        query: String,

        /// Restrict to a document type id
        #[arg(long = "type")]
        type_id: Option<i64>,

        /// Restrict to an organ id
        #[arg(long = "organ")]
        organ_id: Option<i64>,

        /// Restrict to a year
        #[arg(long)]
        year: Option<i32>,
    },

    /// Values available for search filters
    Filters,

    /// Document counts per type, organ or year
    Stats {
        /// Single dimension to count (all when omitted)
        #[arg(long, value_enum)]
        by: Option<DimensionArg>,
    },

    /// List every stored document
    List,

    /// Create or migrate the database
    Init,
}

#[derive(Clone, Copy, ValueEnum)]
enum DimensionArg {
    Type,
    Organ,
    Year,
}

impl From<DimensionArg> for Dimension {
    fn from(arg: DimensionArg) -> Self {
        match arg {
            DimensionArg::Type => Dimension::Type,
            DimensionArg::Organ => Dimension::Organ,
            DimensionArg::Year => Dimension::Year,
        }
    }
}

fn main() -> ExitCode {
    legisdoc_lib::init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let mut config = Config::from_env().map_err(|e| format!("Configuration error: {e}"))?;
    if let Some(database) = cli.database {
        config.database_path = database;
    }
    tracing::debug!(
        version = config::APP_VERSION,
        database = %config.database_path.display(),
        "Configuration loaded"
    );

    match cli.command {
        Commands::Ingest {
            directory,
            dry_run,
            skip_duplicates,
        } => {
            let report = commands::ingest::ingest_directory(
                &config,
                &IngestRequest {
                    directory,
                    dry_run,
                    skip_duplicates,
                },
            )?;
            print_json(&report)
        }
        Commands::Search {
            query,
            type_id,
            organ_id,
            year,
        } => {
            let filters = SearchFilters {
                type_id,
                organ_id,
                year,
            };
            print_json(&commands::search::search_documents(&config, &query, &filters)?)
        }
        Commands::Filters => print_json(&commands::search::list_filters(&config)?),
        Commands::Stats { by } => {
            print_json(&commands::report::document_counts(&config, by.map(Dimension::from))?)
        }
        Commands::List => print_json(&commands::report::list_documents(&config)?),
        Commands::Init => print_json(&commands::init_database(&config)?),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let json =
        serde_json::to_string_pretty(value).map_err(|e| format!("Serialization failed: {e}"))?;
    println!("{json}");
    Ok(())
}
