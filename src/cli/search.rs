//! The `search` command: aggregated offers plus the price chart.

use crate::cli::{chart, ui};
use crate::core::config::AppConfig;
use crate::core::offer::{HistoryProvider, Offer, SearchProvider};
use crate::core::price::{currency_symbol, format_price, to_display_price};
use crate::core::reconcile;
use crate::core::session::Session;
use crate::core::synthetic;
use anyhow::Result;
use chrono::Utc;
use comfy_table::Cell;
use futures::future;
use rand::Rng;
use tracing::debug;

/// Renders the offer list as a styled table with the best price called out.
pub fn render_offers(offers: &[Offer], currency: &str, simulated: bool) -> String {
    let symbol = currency_symbol(currency);
    let best = Offer::best_price(offers);

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Platform"),
        ui::header_cell("Title"),
        ui::header_cell("Price"),
        ui::header_cell("Availability"),
    ]);

    for offer in offers {
        table.add_row(vec![
            Cell::new(&offer.platform),
            Cell::new(&offer.title),
            ui::price_cell(offer.numeric_price.map(to_display_price), &symbol),
            ui::availability_cell(&offer.availability),
        ]);
    }

    let mut output = format!("{}\n\n", ui::style_text("Offers", ui::StyleType::Title));
    if simulated {
        output.push_str(&format!(
            "{}\n\n",
            ui::style_text(
                "Live search unavailable; showing simulated offers.",
                ui::StyleType::Subtle
            )
        ));
    }
    output.push_str(&table.to_string());

    let best_text = best.map_or("N/A".to_string(), |p| {
        format_price(to_display_price(p), &symbol)
    });
    output.push_str(&format!(
        "\n\nBest Price: {}",
        ui::style_text(&best_text, ui::StyleType::Highlight)
    ));
    output
}

/// Searches for offers and the product's price history concurrently, fills
/// the session, and renders the dashboard. Either fetch may fail; both
/// degrade to synthetic data and the command itself never errors on an
/// upstream failure.
pub async fn run(
    query: &str,
    search_provider: &(dyn SearchProvider + Send + Sync),
    history_provider: &(dyn HistoryProvider + Send + Sync),
    config: &AppConfig,
    rng: &mut impl Rng,
) -> Result<()> {
    let symbol = currency_symbol(&config.currency);
    let spinner = ui::new_spinner("Searching platforms...");

    let (offers_result, history_result) = future::join(
        search_provider.search(query),
        history_provider.fetch_history(query, config.history_days),
    )
    .await;
    spinner.finish_and_clear();

    let (offers, simulated) = match offers_result {
        Ok(offers) => (offers, false),
        Err(e) => {
            debug!(error = %e, "Search failed, substituting simulated offers");
            (synthetic::offers_for(query, &symbol, rng), true)
        }
    };

    let mut session = Session::new();
    session.select(query);
    if let Some(best) = Offer::best_price(&offers) {
        session.set_current_price(best);
    }
    session.set_offers(offers);

    let history = match history_result {
        Ok(series) => series,
        Err(e) => {
            debug!(error = %e, "History fetch failed, substituting fallback series");
            let current = session.selection().and_then(|s| s.current_price);
            reconcile::fallback_series(current, Utc::now().date_naive())
        }
    };
    session.set_history(history);

    println!("{}", render_offers(session.offers(), &config.currency, simulated));

    let chart_points = session.chart(rng);
    println!("\n{}", chart::render_chart(&chart_points, &config.currency));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(platform: &str, price: &str, numeric: Option<f64>) -> Offer {
        Offer {
            title: "Apple iPhone 15".to_string(),
            platform: platform.to_string(),
            price: price.to_string(),
            numeric_price: numeric,
            availability: "In Stock".to_string(),
            link: None,
        }
    }

    #[test]
    fn test_render_offers_shows_best_price() {
        let offers = vec![
            offer("Amazon", "₹65,999", Some(65999.0)),
            offer("Flipkart", "₹64,999", Some(64999.0)),
        ];
        let rendered = render_offers(&offers, "INR", false);

        assert!(rendered.contains("Amazon"));
        assert!(rendered.contains("Flipkart"));
        assert!(rendered.contains("₹64,999"));
        assert!(rendered.contains("Best Price"));
        assert!(!rendered.contains("simulated offers"));
    }

    #[test]
    fn test_render_offers_marks_simulated_results() {
        let rendered = render_offers(&[], "INR", true);
        assert!(rendered.contains("simulated offers"));
        assert!(rendered.contains("N/A"));
    }
}
