pub mod cli;
pub mod core;
pub mod providers;

pub use crate::core::config;

use crate::core::cache::Cache;
use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tracing::debug;

/// Commands the CLI can dispatch after argument parsing.
pub enum AppCommand {
    Search {
        query: String,
    },
    Chart {
        product: String,
        days: Option<u32>,
        target: Option<f64>,
    },
    Ask {
        question: String,
    },
}

/// Loads configuration, wires up the shared caches and API clients once,
/// and runs the requested command. A `seed` makes every synthetic-data path
/// reproducible.
pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    seed: Option<u64>,
) -> Result<()> {
    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    // One shared cache and client per upstream API, for the process lifetime
    let offer_cache = Arc::new(Cache::new());
    let history_cache = Arc::new(Cache::new());

    let (shop_base, shop_key) = config
        .providers
        .shopping
        .as_ref()
        .map_or(("https://serpapi.com", None), |p| {
            (p.base_url.as_str(), p.api_key.as_deref())
        });
    let search_provider =
        providers::shopsearch::ShopSearchProvider::new(shop_base, shop_key, offer_cache);

    let history_base = config
        .providers
        .history
        .as_ref()
        .map_or("https://api.pricehistory.app", |p| &p.base_url);
    let history_provider =
        providers::pricehistory::PriceHistoryProvider::new(history_base, history_cache);

    let (assistant_base, assistant_key) = config.providers.assistant.as_ref().map_or(
        ("https://generativelanguage.googleapis.com", None),
        |p| (p.base_url.as_str(), p.api_key.as_deref()),
    );
    let assistant = providers::assistant::GenerativeAssistant::new(assistant_base, assistant_key);

    match command {
        AppCommand::Search { query } => {
            cli::search::run(&query, &search_provider, &history_provider, &config, &mut rng).await
        }
        AppCommand::Chart {
            product,
            days,
            target,
        } => {
            cli::chart::run(
                &product,
                days,
                target,
                &history_provider,
                &config,
                &mut rng,
            )
            .await
        }
        AppCommand::Ask { question } => cli::ask::run(&question, &assistant).await,
    }
}
