use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use toolshelf::app::App;
use toolshelf::catalog::{Catalog, Selection, ToolSort};
use toolshelf::config::{default_config_path, Config};
use toolshelf::listing::{self, ListKind, ListRequest};
use toolshelf::ui;
use toolshelf::util::MAX_SEARCH_QUERY_LENGTH;

#[derive(Parser, Debug)]
#[command(
    name = "toolshelf",
    about = "Browse AI developer tools, their changelogs and best-practice articles"
)]
struct Args {
    /// Load this catalog file instead of the built-in catalog
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Config file (default: ~/.config/toolshelf/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print a listing and exit instead of starting the browser
    #[arg(long, value_enum, value_name = "KIND")]
    list: Option<ListKind>,

    /// Category id to filter tools or articles by ("all" for everything)
    #[arg(long, value_name = "ID", requires = "list")]
    category: Option<String>,

    /// Tool sort order: name, rating or updated
    #[arg(long, value_name = "KEY", requires = "list")]
    sort: Option<ToolSort>,

    /// Free-text article filter
    #[arg(long, value_name = "TEXT", requires = "list")]
    query: Option<String>,

    /// Tool id to filter the changelog by
    #[arg(long, value_name = "ID", requires = "list")]
    tool: Option<String>,

    /// Print the listing as JSON
    #[arg(long, requires = "list")]
    json: bool,

    /// Validate the catalog, print any findings and exit
    #[arg(long, conflicts_with = "list")]
    check: bool,
}

/// Catalog source, in priority order: `--catalog`, config `catalog_path`,
/// then the built-in catalog.
fn load_catalog(args: &Args, config: &Config) -> Result<Catalog> {
    match args.catalog.as_ref().or(config.catalog_path.as_ref()) {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display())),
        None => Catalog::builtin().context("Built-in catalog is invalid"),
    }
}

fn load_config(args: &Args) -> Result<Config> {
    match args.config.clone().or_else(default_config_path) {
        Some(path) => Config::load(&path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => {
            tracing::debug!("HOME not set, using default configuration");
            Ok(Config::default())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with listings on stdout
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let catalog = load_catalog(&args, &config)?;

    let report = catalog.validate();
    for finding in report.findings() {
        tracing::warn!(finding = %finding, "Catalog inconsistency");
    }

    if args.check {
        if report.is_consistent() {
            println!(
                "Catalog OK: {} tools, {} changelog entries, {} articles",
                catalog.tools.len(),
                catalog.changelog.len(),
                catalog.articles.len()
            );
            return Ok(());
        }
        for finding in report.findings() {
            println!("{}", finding);
        }
        std::process::exit(1);
    }

    if let Some(kind) = args.list {
        let query = args.query.clone().unwrap_or_default();
        if query.chars().count() > MAX_SEARCH_QUERY_LENGTH {
            anyhow::bail!(
                "Search query too long (max {} chars)",
                MAX_SEARCH_QUERY_LENGTH
            );
        }
        let request = ListRequest {
            category: Selection::from_option(args.category.as_deref()),
            sort: args.sort.unwrap_or_else(|| config.sort_key()),
            query,
            tool: Selection::from_option(args.tool.as_deref()),
            json: args.json,
        };
        let output = listing::render(&catalog, kind, &request)
            .context("Failed to serialize listing")?;
        print!("{}", output);
        if args.json {
            println!();
        }
        return Ok(());
    }

    let mut app = App::new(&catalog);
    let warnings = app.configure(&config);
    if let Some(first) = warnings.first() {
        app.set_status(format!("Config: {}", first));
    }
    if !report.is_consistent() {
        app.set_status(format!(
            "Catalog has {} inconsistencies (run --check)",
            report.findings().len()
        ));
    }

    ui::run(&mut app).await?;

    Ok(())
}
