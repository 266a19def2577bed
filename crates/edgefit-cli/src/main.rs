//! edgefit CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use edgefit_core::model::Section;

mod commands;

#[derive(Parser)]
#[command(
    name = "edgefit",
    version,
    about = "Edge AI developer career-fit self-assessment"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take the assessment interactively
    Take {
        /// Catalog TOML to use instead of the configured or built-in one
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output directory for exported reports
        #[arg(long)]
        output: Option<PathBuf>,

        /// Report formats: markdown, html, json, all, none (comma-separated)
        #[arg(long)]
        format: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Score a pre-filled answer sheet
    Score {
        /// Answer sheet TOML
        #[arg(long)]
        answers: PathBuf,

        /// Catalog TOML to use instead of the configured or built-in one
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output directory for exported reports
        #[arg(long)]
        output: Option<PathBuf>,

        /// Report formats to export (default: none)
        #[arg(long, default_value = "none")]
        format: String,

        /// Print the score breakdown as JSON
        #[arg(long)]
        json: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List catalog questions
    Questions {
        /// Only list one section: psychometric, technical, wiscar
        #[arg(long)]
        section: Option<Section>,

        /// Catalog TOML to use instead of the configured or built-in one
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate catalog and guidance TOML files
    Validate {
        /// Catalog file to check
        #[arg(long)]
        catalog: PathBuf,

        /// Guidance file to check
        #[arg(long)]
        guidance: Option<PathBuf>,
    },

    /// Create a starter config and answer sheet
    Init,
}

fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("edgefit=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Take {
            catalog,
            output,
            format,
            config,
        } => commands::take::execute(catalog, output, format, config),
        Commands::Score {
            answers,
            catalog,
            output,
            format,
            json,
            config,
        } => commands::score::execute(answers, catalog, output, format, json, config),
        Commands::Questions {
            section,
            catalog,
            config,
        } => commands::questions::execute(section, catalog, config),
        Commands::Validate { catalog, guidance } => commands::validate::execute(catalog, guidance),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
