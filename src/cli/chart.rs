//! Price chart rendering and the standalone `chart` command.

use crate::cli::ui;
use crate::core::config::AppConfig;
use crate::core::offer::HistoryProvider;
use crate::core::price::{ChartPoint, currency_symbol};
use crate::core::session::Session;
use crate::core::synthetic;
use anyhow::Result;
use chrono::Utc;
use comfy_table::Cell;
use rand::Rng;
use tracing::debug;

const BAR_WIDTH: usize = 24;

/// Renders the chart as a table: one row per calendar label with actual and
/// predicted columns and a proportional bar.
pub fn render_chart(chart: &[ChartPoint], currency: &str) -> String {
    let symbol = currency_symbol(currency);
    let max = chart
        .iter()
        .filter_map(|p| p.actual.or(p.predicted))
        .max()
        .unwrap_or(0);

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Month"),
        ui::header_cell("Actual"),
        ui::header_cell("Predicted"),
        ui::header_cell("Trend"),
    ]);

    for point in chart {
        let value = point.actual.or(point.predicted).unwrap_or(0);
        table.add_row(vec![
            Cell::new(&point.label),
            ui::price_cell(point.actual, &symbol),
            ui::predicted_price_cell(point.predicted, &symbol),
            Cell::new(ui::bar_text(value, max, BAR_WIDTH)),
        ]);
    }

    let mut output = format!(
        "{}\n\n",
        ui::style_text("Price History & Forecast", ui::StyleType::Title)
    );
    output.push_str(&table.to_string());
    output.push_str(&format!(
        "\n\n{}",
        ui::style_text(
            "Forecast values are simulated estimates, not purchase advice.",
            ui::StyleType::Subtle
        )
    ));
    output
}

/// The `chart` command: fetch (or synthesize) a history for one product and
/// display the reconciled chart with a short projection.
pub async fn run(
    product: &str,
    days: Option<u32>,
    target: Option<f64>,
    history_provider: &(dyn HistoryProvider + Send + Sync),
    config: &AppConfig,
    rng: &mut impl Rng,
) -> Result<()> {
    let days = days.unwrap_or(config.history_days);

    let spinner = ui::new_spinner("Fetching price history...");
    let history = match history_provider.fetch_history(product, days).await {
        Ok(series) => series,
        Err(e) => {
            debug!(error = %e, "History fetch failed, substituting synthetic series");
            synthetic::daily_series(product, days, Utc::now().date_naive(), rng)
        }
    };
    spinner.finish_and_clear();

    let mut session = Session::new();
    session.select(product);
    session.set_history(history);

    let chart = session.chart_with_target(target, rng);
    println!("{}", render_chart(&chart, &config.currency));
    Ok(())
}
