use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use publist::config::{find_config_file, load_config, save_config, Config, LOCAL_CONFIG_FILE};
use publist::models::RecordCollection;
use publist::sources::{build_chain, cache_bust_token, EmbeddedSource, SourceChain};
use publist::utils::HttpClient;
use publist::view::{build_grouped, build_latest, render_html, render_plain, PublicationsView};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// publist - Turn a BibTeX bibliography into publication lists
#[derive(Parser, Debug)]
#[command(name = "publist")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Turn a BibTeX bibliography into latest and by-year publication lists", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    format: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Bibliography path or URL (overrides the configured bib_path)
    #[arg(long, global = true)]
    bib: Option<String>,

    /// Use this bibliography file only, without trying fallback locations
    #[arg(long, global = true)]
    embedded: Option<PathBuf>,

    /// Page URL that relative locations are resolved against
    #[arg(long, global = true)]
    page_url: Option<String>,

    /// Prefix for the asset-directory fallback locations
    #[arg(long, global = true)]
    asset_dir: Option<String>,

    /// Do not append a cache-busting query parameter to HTTP requests
    #[arg(long, global = true)]
    no_cache_bust: bool,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Read the bibliography from standard input
    #[arg(long, global = true)]
    stdin: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
    /// HTML list items
    Html,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the most recent publications
    #[command(alias = "l")]
    Latest {
        /// Number of publications (default: display.latest_limit)
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },

    /// Show all publications grouped by year
    #[command(alias = "a")]
    All,

    /// Print the parsed records as JSON
    #[command(alias = "p")]
    Parse,

    /// List the locations that would be tried, in order
    #[command(alias = "ls")]
    Locations,

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Show supported environment variables
    Env,
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Write a default configuration file
    Init {
        /// Where to write it (default: ./publist.toml)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

/// Print all available environment variables
fn print_env_vars() {
    println!("publist - Environment Variables");
    println!();
    println!("Source Settings:");
    println!("  PUBLIST_SOURCE__BIB_PATH          Bibliography path or URL (default: publications.bib)");
    println!("  PUBLIST_SOURCE__PAGE_URL          Page URL relative locations resolve against");
    println!("  PUBLIST_SOURCE__ASSET_DIR         Prefix for asset-directory fallbacks");
    println!("  PUBLIST_SOURCE__DEFAULT_LOCATION  Last location tried (default: /publications.bib)");
    println!("  PUBLIST_SOURCE__EMBEDDED          Bibliography file used exclusively");
    println!("  PUBLIST_SOURCE__CACHE_BUST        Append v=<millis> to HTTP requests (default: true)");
    println!("  PUBLIST_SOURCE__TIMEOUT_SECS      HTTP timeout in seconds (default: 30)");
    println!();
    println!("Display Settings:");
    println!("  PUBLIST_DISPLAY__LATEST_LIMIT     Entries in the latest list (default: 5)");
    println!();
    println!("Other Settings:");
    println!("  PUBLIST_LOGGING__LEVEL            Log level when -v is not given (default: info)");
    println!("  RUST_LOG                          Rust logging filter (overrides everything else)");
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Env = cli.command {
        print_env_vars();
        return Ok(());
    }

    // Load configuration from file if specified or found in default locations
    let config_path = cli.config.clone().or_else(find_config_file);
    let mut config = load_config(config_path.as_deref()).with_context(|| match &config_path {
        Some(path) => format!("Failed to load config file {}", path.display()),
        None => "Failed to load configuration from environment".to_string(),
    })?;

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("publist={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }

    apply_overrides(&mut config, &cli);

    match &cli.command {
        Commands::Env => unreachable!(),

        Commands::Config { command } => match command {
            ConfigCommands::Init { path, force } => {
                let path = path.clone().unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE));
                save_config(&Config::default(), &path, *force)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                if !cli.quiet {
                    println!("Wrote default configuration to {}", path.display());
                }
            }
            ConfigCommands::Show => {
                if config_path.is_none() {
                    tracing::info!("No config file found; showing defaults and environment overrides");
                }
                print!("{}", toml::to_string_pretty(&config)?);
            }
        },

        Commands::Locations => {
            let chain = source_chain(&config, &cli).await?;
            for (i, id) in chain.ids().iter().enumerate() {
                println!("{:>2}. {}", i + 1, id);
            }
        }

        Commands::Latest { limit } => {
            let limit = limit.unwrap_or(config.display.latest_limit);
            let records = load_records(&config, &cli).await?;
            let view = match records {
                Some(records) => build_latest(&records, limit),
                None => PublicationsView::unavailable(),
            };
            output_view(&view, cli.format)?;
        }

        Commands::All => {
            let records = load_records(&config, &cli).await?;
            let view = match records {
                Some(records) => build_grouped(&records),
                None => PublicationsView::unavailable(),
            };
            output_view(&view, cli.format)?;
        }

        Commands::Parse => match load_records(&config, &cli).await? {
            Some(records) => println!("{}", serde_json::to_string_pretty(&records)?),
            None => output_view(&PublicationsView::unavailable(), OutputFormat::Json)?,
        },
    }

    Ok(())
}

/// Command-line flags win over file and environment settings
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(bib) = &cli.bib {
        config.source.bib_path = bib.clone();
    }
    if let Some(embedded) = &cli.embedded {
        config.source.embedded = Some(embedded.clone());
    }
    if let Some(page_url) = &cli.page_url {
        config.source.page_url = Some(page_url.clone());
    }
    if let Some(asset_dir) = &cli.asset_dir {
        config.source.asset_dir = Some(asset_dir.clone());
    }
    if cli.no_cache_bust {
        config.source.cache_bust = false;
    }
    if let Some(timeout) = cli.timeout {
        config.source.timeout_secs = timeout;
    }
}

async fn source_chain(config: &Config, cli: &Cli) -> Result<SourceChain> {
    if cli.stdin {
        let mut bytes = Vec::new();
        tokio::io::stdin()
            .read_to_end(&mut bytes)
            .await
            .context("Failed to read bibliography from stdin")?;
        return Ok(SourceChain::new().with(EmbeddedSource::from_bytes("stdin", &bytes)));
    }

    let client = HttpClient::with_timeout(Duration::from_secs(config.source.timeout_secs))?;
    let token = config.source.cache_bust.then(cache_bust_token);
    Ok(build_chain(&config.source, &client, token.as_deref()))
}

async fn load_records(config: &Config, cli: &Cli) -> Result<Option<RecordCollection>> {
    let chain = source_chain(config, cli).await?;
    Ok(chain.load_records().await)
}

fn output_view(view: &PublicationsView, format: OutputFormat) -> Result<()> {
    let is_tty = std::io::stdout().is_terminal();
    let actual_format = if format == OutputFormat::Auto {
        if is_tty {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        format
    };

    match actual_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(view)?);
        }
        OutputFormat::Plain => {
            print!("{}", render_plain(view, is_tty));
        }
        OutputFormat::Html => {
            print!("{}", render_html(view));
        }
        OutputFormat::Table => print_table(view),
        OutputFormat::Auto => unreachable!(),
    }

    Ok(())
}

fn print_table(view: &PublicationsView) {
    use comfy_table::{Attribute, Cell, Table};

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);

    match view {
        PublicationsView::Latest { items } => {
            table.set_header(vec!["Title", "Details", "Link"]);
            for item in items {
                table.add_row(vec![
                    Cell::new(&item.title).add_attribute(Attribute::Bold),
                    Cell::new(&item.meta),
                    Cell::new(item.link.as_deref().unwrap_or("")),
                ]);
            }
        }
        PublicationsView::Grouped { groups } => {
            table.set_header(vec!["Year", "Title", "Details", "Link"]);
            for group in groups {
                for item in &group.items {
                    table.add_row(vec![
                        Cell::new(&group.label),
                        Cell::new(&item.title).add_attribute(Attribute::Bold),
                        Cell::new(&item.meta),
                        Cell::new(item.link.as_deref().unwrap_or("")),
                    ]);
                }
            }
        }
        PublicationsView::Unavailable { message } => {
            println!("{}", message);
            return;
        }
    }

    println!("{table}");
}
