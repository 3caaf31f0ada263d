//! Synthetic price data for when no real source is available.
//!
//! Every network path in the app degrades to this module: failed offer
//! searches get simulated offers, failed history fetches get a random-walk
//! series. Generators take the RNG by argument so tests can seed them.

use crate::core::offer::Offer;
use crate::core::price::{ChartPoint, MONTH_LABELS, PricePoint, format_price};
use chrono::NaiveDate;
use rand::Rng;
use tracing::debug;

/// Keyword -> base price table used to classify a product name. Order is
/// significant: the first matching bracket wins, so "samsung watch" lands in
/// the phone bracket, not the watch bracket. Matching is a case-insensitive
/// substring test.
const BASE_PRICES: &[(&[&str], u64)] = &[
    (&["iphone", "samsung", "phone", "smartphone"], 50_000),
    (&["macbook", "laptop"], 80_000),
    (&["watch"], 15_000),
    (&["headphone", "earbuds", "airpods"], 8_000),
    (&["tv", "television"], 40_000),
    (&["camera"], 35_000),
    (&["tablet", "ipad"], 30_000),
    (&["shoe", "sneaker"], 5_000),
];

const DEFAULT_BASE_PRICE: u64 = 1_000;

/// Simulated storefronts for the offer fallback.
const PLATFORMS: &[&str] = &["Amazon", "Flipkart", "Croma", "Reliance Digital", "Tata Cliq"];

/// Category-inferred anchor price for a product name.
pub fn base_price_for(name: &str) -> u64 {
    let lowered = name.to_lowercase();
    for (keywords, price) in BASE_PRICES {
        if keywords.iter().any(|kw| lowered.contains(kw)) {
            return *price;
        }
    }
    DEFAULT_BASE_PRICE
}

/// Builds the fixed 12-label chart series: 8 historical months ("Jan".."Aug")
/// as a multiplicative random walk within ±15% per step, then 4
/// prediction-only months ("Sep".."Dec") with a -2% compounding drift and a
/// smaller ±5% jitter.
pub fn monthly_chart(name: &str, rng: &mut impl Rng) -> Vec<ChartPoint> {
    let base = base_price_for(name);
    debug!(product = %name, base, "Generating synthetic monthly chart");

    let mut points = Vec::with_capacity(12);
    let mut price = base as f64;

    for label in &MONTH_LABELS[..8] {
        price *= 1.0 + rng.gen_range(-0.15..=0.15);
        price = price.round().max(0.0);
        points.push(ChartPoint::actual(*label, price as u64));
    }

    for label in &MONTH_LABELS[8..] {
        price *= 0.98;
        price *= 1.0 + rng.gen_range(-0.05..=0.05);
        price = price.round().max(0.0);
        points.push(ChartPoint::predicted(*label, price as u64));
    }

    points
}

/// Builds one point per day for the `days`-day window ending at `today`,
/// using the same category anchor and random walk as the monthly variant.
pub fn daily_series(name: &str, days: u32, today: NaiveDate, rng: &mut impl Rng) -> Vec<PricePoint> {
    let days = days.max(1);
    let base = base_price_for(name);
    debug!(product = %name, days, base, "Generating synthetic daily series");

    let mut points = Vec::with_capacity(days as usize);
    let mut price = base as f64;

    for offset in (0..days).rev() {
        price *= 1.0 + rng.gen_range(-0.15..=0.15);
        price = price.round().max(0.0);
        let date = today - chrono::Duration::days(offset as i64);
        points.push(PricePoint::new(date.format("%Y-%m-%d").to_string(), price as u64));
    }

    points
}

/// Simulated offers across the known storefronts, each within ±8% of the
/// category anchor. Used when the search provider fails.
pub fn offers_for(name: &str, symbol: &str, rng: &mut impl Rng) -> Vec<Offer> {
    let base = base_price_for(name) as f64;
    debug!(product = %name, "Generating simulated offers");

    PLATFORMS
        .iter()
        .map(|platform| {
            let price = (base * (1.0 + rng.gen_range(-0.08..=0.08))).round().max(0.0);
            let in_stock = rng.gen_range(0..10) < 9;
            Offer {
                title: name.to_string(),
                platform: platform.to_string(),
                price: format_price(price as u64, symbol),
                numeric_price: Some(price),
                availability: if in_stock { "In Stock" } else { "Out of Stock" }.to_string(),
                link: None,
            }
        })
        .collect()
}
