//! Strata CLI: the main entry point.
//!
//! Commands:
//! - `pipelines`: List registered pipelines
//! - `stages`: Show the stages of selected pipelines
//! - `strategies`: Show the strategies of selected stages
//! - `compose`: Compose a prompt from an ordered strategy list
//! - `tools`: Print the agent tool definitions
//! - `call`: Invoke an agent tool with JSON arguments
//! - `catalog`: Validate catalog files
//! - `config`: Show or initialize configuration
//! - `status`: Show configuration and registry counts

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use strata_config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "strata",
    about = "Strata: hierarchical prompt registry and composer",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Load an extra catalog file (repeatable)
    #[arg(long = "catalog", value_name = "FILE", global = true)]
    catalogs: Vec<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List every registered pipeline
    Pipelines,

    /// Show the stages of the given pipelines
    Stages {
        /// Pipeline ids, case-insensitive
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Show the strategies of the given stages
    Strategies {
        /// Stage ids, case-insensitive
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Compose a prompt from strategies, in the order given
    Compose {
        /// Strategy ids, case-insensitive
        ids: Vec<String>,
    },

    /// Print the agent tool definitions as JSON
    Tools,

    /// Invoke an agent tool
    Call {
        /// Tool name (e.g. get_available_stages)
        tool: String,

        /// Arguments as a JSON object
        #[arg(default_value = "{}")]
        args: String,
    },

    /// Catalog file management
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show configuration and registry counts
    Status,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Parse and check a catalog file without registering it
    Validate {
        /// Path to the catalog TOML file
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let loaded = AppConfig::load();

    // Initialize tracing
    let filter = if cli.verbose {
        "debug".to_string()
    } else {
        loaded
            .as_ref()
            .map(|c| c.log_level.clone())
            .unwrap_or_else(|_| "info".into())
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // These work even when the config file is broken.
    match &cli.command {
        Commands::Config { action } => {
            return match action {
                ConfigAction::Show => commands::config_cmd::show().await,
                ConfigAction::Path => commands::config_cmd::path().await,
                ConfigAction::Init { force } => commands::config_cmd::init(*force).await,
            };
        }
        Commands::Catalog {
            action: CatalogAction::Validate { file },
        } => return commands::catalog::validate(file).await,
        _ => {}
    }

    let config = loaded?;
    let orchestrator = commands::bootstrap(&config, &cli.catalogs)?;
    let include_instructions = config.tools.include_instructions;

    match cli.command {
        Commands::Pipelines => commands::registry::pipelines(&orchestrator).await?,
        Commands::Stages { ids } => commands::registry::stages(&orchestrator, &ids).await?,
        Commands::Strategies { ids } => {
            commands::registry::strategies(&orchestrator, &ids).await?
        }
        Commands::Compose { ids } => commands::registry::compose(&orchestrator, &ids).await?,
        Commands::Tools => commands::tools::list(orchestrator, include_instructions).await?,
        Commands::Call { tool, args } => {
            commands::tools::call(orchestrator, include_instructions, &tool, &args).await?
        }
        Commands::Status => commands::status::run(&config, &orchestrator).await?,
        Commands::Catalog { .. } | Commands::Config { .. } => {}
    }

    Ok(())
}
