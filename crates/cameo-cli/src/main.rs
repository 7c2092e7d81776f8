use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod console;

#[derive(Parser)]
#[command(name = "cameo")]
#[command(about = "CAMEO - persona sessions, archives and catalogs at the console", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive console session with a persona
    Run {
        /// Persona kind, e.g. wellness_guide; defaults to the configured one
        #[arg(long)]
        persona: Option<String>,
    },
    /// Inspect archived conversation records
    Archive {
        #[command(subcommand)]
        action: ArchiveAction,
    },
    /// Inspect the reference catalogs
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// List the shipped persona presets
    Personas,
}

#[derive(Subcommand)]
enum ArchiveAction {
    /// Every record for a persona, oldest first
    List {
        #[arg(long)]
        persona: String,
    },
    /// The newest records for a persona
    Tail {
        #[arg(long)]
        persona: String,
        /// How many records to show
        #[arg(long, default_value_t = 3)]
        count: usize,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Print a catalog as it resolves (file override or built-in)
    Show {
        /// One of: faq, groceries, storefront, cases, topics
        #[arg(long)]
        domain: String,
    },
    /// Run a keyword lookup the way the personas do
    Find {
        /// One of: faq, groceries, storefront, cases, topics
        #[arg(long)]
        domain: String,
        /// The query, in the caller's words
        query: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { persona } => commands::run::run(persona).await?,
        Commands::Archive { action } => match action {
            ArchiveAction::List { persona } => commands::archive::list(&persona).await?,
            ArchiveAction::Tail { persona, count } => {
                commands::archive::tail(&persona, count).await?
            }
        },
        Commands::Catalog { action } => match action {
            CatalogAction::Show { domain } => commands::catalog::show(&domain).await?,
            CatalogAction::Find { domain, query } => {
                commands::catalog::find(&domain, &query).await?
            }
        },
        Commands::Personas => commands::personas::list().await?,
    }

    Ok(())
}
