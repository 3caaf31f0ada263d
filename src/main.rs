use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use dealscout::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Seed for simulated data, for reproducible output
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for dealscout::AppCommand {
    fn from(cmd: Commands) -> dealscout::AppCommand {
        match cmd {
            Commands::Search { query } => dealscout::AppCommand::Search {
                query: query.join(" "),
            },
            Commands::Chart {
                product,
                days,
                target,
            } => dealscout::AppCommand::Chart {
                product: product.join(" "),
                days,
                target,
            },
            Commands::Ask { question } => dealscout::AppCommand::Ask {
                question: question.join(" "),
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Search offers for a product across shopping platforms
    Search {
        /// Product to search for
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Display the price history and forecast chart for a product
    Chart {
        /// Product name
        #[arg(required = true)]
        product: Vec<String>,
        /// Day window to fetch history for
        #[arg(short, long)]
        days: Option<u32>,
        /// Target price the forecast should converge to
        #[arg(short, long)]
        target: Option<f64>,
    },
    /// Ask the shopping assistant a question
    Ask {
        /// Question text
        #[arg(required = true)]
        question: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(cmd) => dealscout::run_command(cmd.into(), cli.config_path.as_deref(), cli.seed).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = dealscout::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
providers:
  shopping:
    base_url: "https://serpapi.com"
    # api_key: "your-key"
  history:
    base_url: "https://api.pricehistory.app"
  assistant:
    base_url: "https://generativelanguage.googleapis.com"
    # api_key: "your-key"

currency: "INR"
history_days: 90
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
