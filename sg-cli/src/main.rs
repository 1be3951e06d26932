//! SG CLI - read Solid Games mission announcements from the terminal

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sg_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{MissionArgs, SectionsArgs};

/// Read mission announcements from the Solid Games feed
#[derive(Parser, Debug)]
#[command(name = "sg")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ~/.config/sg/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Site URL (overrides config and env)
    #[arg(long, global = true, env = "SG_URL")]
    url: Option<String>,

    /// Number of feed items to inspect (overrides config and env)
    #[arg(long, global = true, env = "SG_FEED_LIMIT")]
    feed_limit: Option<usize>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// List every announcement section found on the page
    #[command(visible_alias = "s")]
    Sections(SectionsArgs),

    /// Show one mission of the latest announcement
    #[command(visible_alias = "m")]
    Mission(MissionArgs),

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so command output stays pipeable
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = Config::load_with_overrides(cli.config.as_deref(), cli.url.clone(), cli.feed_limit)?;

    if cli.verbose {
        tracing::info!(
            url = %config.site.url,
            feed_item_limit = config.extract.feed_item_limit,
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("sg {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Sections(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::Mission(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::Config) => {
            println!("SG Configuration");
            println!("================");
            println!();
            println!("Site:");
            println!("  url: {}", config.site.url);
            println!();
            println!("Extraction:");
            println!("  allowed_titles: {}", config.extract.allowed_titles.join(" | "));
            println!("  feed_item_limit: {}", config.extract.feed_item_limit);
            println!("  server_label_prefix: {}", config.extract.server_label_prefix);
            println!("  side_suffix: {}", config.extract.side_suffix);
            println!();
            println!("Fetch:");
            println!("  timeout: {:?}", config.fetch.timeout);
            println!("  poll_interval: {:?}", config.fetch.poll_interval);
            println!();
            let path = cli.config.clone().or_else(Config::default_config_path);
            if let Some(path) = path {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
        }
        None => {
            println!("sg - Solid Games announcement reader");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
