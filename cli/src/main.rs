mod categories;
mod fixtures;
mod repl;

use anyhow::{Context, Result};
use basket_core::{categorize, parse, AssistantConfig, Catalog, Locale, ProductSearch};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "basket")]
#[command(about = "Basket voice shopping assistant CLI", long_about = None)]
struct Cli {
    /// Catalog JSON file (default: $BASKET_CATALOG_PATH, then the embedded catalog)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an utterance and print the command as JSON
    Parse {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Print the category for an item name
    Categorize {
        #[arg(required = true)]
        name: Vec<String>,
    },
    /// Search the catalog by name or brand
    Search {
        #[arg(required = true)]
        query: Vec<String>,
        /// Only show products at or below this price
        #[arg(long)]
        max_price: Option<f64>,
    },
    /// Run an interactive session; each line is a finalized utterance
    Repl {
        /// Recognizer locale (en-IN, en-US, hi-IN)
        #[arg(long)]
        locale: Option<Locale>,
    },
    /// List categories and their keywords
    Categories,
    /// Record a curated command parsing fixture
    AddFixture {
        /// Fixture file name (without .json)
        #[arg(long)]
        name: String,
        /// Fixtures directory (default: basket-core/tests/fixtures/command_parsing/curated)
        #[arg(long)]
        dir: Option<PathBuf>,
        #[arg(required = true)]
        text: Vec<String>,
    },
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut config = AssistantConfig::from_env().context("Invalid environment configuration")?;
    if let Some(path) = cli.catalog {
        config.catalog_path = Some(path);
    }

    match cli.command {
        Commands::Parse { text } => {
            let command = parse(&text.join(" "));
            println!("{}", serde_json::to_string_pretty(&command)?);
        }
        Commands::Categorize { name } => {
            println!("{}", categorize(&name.join(" ")));
        }
        Commands::Search { query, max_price } => {
            let catalog = load_catalog(&config)?;
            let results = catalog.search(&query.join(" "), max_price);
            if results.is_empty() {
                println!("No results.");
            }
            for product in results {
                println!("{} ({}) ${:.2}", product.name, product.brand, product.price);
            }
        }
        Commands::Repl { locale } => {
            if let Some(locale) = locale {
                config.locale = locale;
            }
            let catalog = load_catalog(&config)?;
            repl::run(&config, catalog)?;
        }
        Commands::Categories => {
            categories::print();
        }
        Commands::AddFixture { name, dir, text } => {
            fixtures::add(&name, dir.as_deref(), &text.join(" "))?;
        }
    }

    Ok(())
}

fn load_catalog(config: &AssistantConfig) -> Result<Catalog> {
    Catalog::load(config.catalog_path.as_deref()).context("Failed to load catalog")
}
