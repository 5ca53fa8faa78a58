//! Parts Interchange Buddy CLI
//!
//! ```bash
//! interchange serve --port 8080
//! interchange search --year 2001 --make Dodge --model "Ram 1500" \
//!     --category Engine --part "Starter Motor"
//! interchange catalog models --make Ford
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use interchange_config::InterchangeConfig;
use interchange_core::{PartQuery, Vehicle};
use interchange_form::{InterchangeMatcher, Page, StaticMatcher};
use interchange_web::{templates, AppState};

#[derive(Parser)]
#[command(name = "interchange")]
#[command(about = "Parts Interchange Buddy - find parts that fit across vehicle years and models")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.config/interchange/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web GUI
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Look up interchangeable parts for one vehicle
    Search {
        #[arg(long)]
        year: String,

        #[arg(long)]
        make: String,

        #[arg(long)]
        model: String,

        #[arg(long)]
        category: String,

        /// Catalog part name; anything else is searched as a custom name
        #[arg(long)]
        part: String,

        /// Optional OEM part number
        #[arg(long)]
        part_number: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Browse the selection catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },

    /// Print the web route table
    Routes,
}

#[derive(Subcommand)]
enum CatalogCommands {
    /// Model years, newest first
    Years,
    /// Vehicle makes
    Makes,
    /// Models for a make
    Models {
        #[arg(long)]
        make: String,
    },
    /// Part categories
    Categories,
    /// Parts in a category
    Parts {
        #[arg(long)]
        category: String,
    },
}

fn init_logging(default_filter: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = InterchangeConfig::load(cli.config.as_deref()).context("loading config")?;
    init_logging(&config.log_filter, cli.log_json);
    match &config.source {
        Some(path) => tracing::info!(path = %path.display(), "loaded config"),
        None => tracing::debug!("no config file found, using defaults"),
    }

    match cli.command {
        Commands::Serve { host, port } => cmd_serve(config, host, port).await,
        Commands::Search {
            year,
            make,
            model,
            category,
            part,
            part_number,
            json,
        } => {
            let vehicle = Vehicle::new(year, make, model);
            let mut part = PartQuery::new(category, part);
            part.part_number = part_number;
            cmd_search(&config, &vehicle, &part, json)
        }
        Commands::Catalog { command } => cmd_catalog(&config, command),
        Commands::Routes => {
            interchange_web::routes::print_routes();
            Ok(())
        }
    }
}

async fn cmd_serve(mut config: InterchangeConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let dataset = config.load_dataset().context("loading catalog")?;
    tracing::info!(
        makes = dataset.catalog.make_entries().len(),
        categories = dataset.catalog.category_entries().len(),
        records = dataset.results.len(),
        "catalog ready"
    );

    let addr = config.server.bind_addr();
    println!("Parts Interchange Buddy ready at http://{}", addr);
    interchange_web::serve(Arc::new(AppState::from_dataset(dataset)), &addr)
        .await
        .with_context(|| format!("serving on {}", addr))
}

fn cmd_search(config: &InterchangeConfig, vehicle: &Vehicle, part: &PartQuery, json: bool) -> Result<()> {
    let dataset = config.load_dataset().context("loading catalog")?;
    let matcher: Arc<dyn InterchangeMatcher> = Arc::new(StaticMatcher::new(dataset.results));

    let (page, _) = Page::search_for(Arc::new(dataset.catalog), matcher, vehicle, part)?;
    let view = page.results_view();

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", templates::results_text(&view));
    }
    Ok(())
}

fn cmd_catalog(config: &InterchangeConfig, command: CatalogCommands) -> Result<()> {
    let catalog = config.load_dataset().context("loading catalog")?.catalog;

    let entries: Vec<String> = match command {
        CatalogCommands::Years => catalog.years(),
        CatalogCommands::Makes => catalog.makes().map(str::to_string).collect(),
        CatalogCommands::Models { make } => {
            let models = catalog.models(&make);
            if models.is_empty() {
                anyhow::bail!("unknown make: {}", make);
            }
            models.to_vec()
        }
        CatalogCommands::Categories => catalog.categories().map(str::to_string).collect(),
        CatalogCommands::Parts { category } => {
            let parts = catalog.parts(&category);
            if parts.is_empty() {
                anyhow::bail!("unknown category: {}", category);
            }
            parts.to_vec()
        }
    };

    for entry in entries {
        println!("{}", entry);
    }
    Ok(())
}
