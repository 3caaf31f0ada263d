//! Aligns a fetched price history to the authoritative current price.
//!
//! The chart's rightmost value and the "current price" shown on the offer
//! cards come from independent sources; shifting the whole series by a
//! constant offset keeps the month-to-month shape while making the two
//! numbers agree exactly.

use crate::core::price::{PricePoint, to_display_price};
use chrono::NaiveDate;
use tracing::debug;

/// Number of weekly points in the fallback series produced when the history
/// fetch fails.
const FALLBACK_POINTS: usize = 6;

/// Shifts every point by `current_price - last.price`, clamping to zero,
/// then forces the last point to exactly the (rounded) current price so no
/// rounding or clamping drift survives. Returns a new series of the same
/// length and order; with no known current price or an empty series the
/// input is returned as-is.
pub fn reconcile(series: &[PricePoint], current_price: Option<f64>) -> Vec<PricePoint> {
    let Some(current) = current_price else {
        return series.to_vec();
    };
    let Some(last) = series.last() else {
        return Vec::new();
    };

    let target = to_display_price(current);
    let offset = target as i64 - last.price as i64;
    debug!(offset, target, "Reconciling history against current price");

    let mut adjusted: Vec<PricePoint> = series
        .iter()
        .map(|p| {
            let shifted = (p.price as i64 + offset).max(0) as u64;
            PricePoint::new(p.date.clone(), shifted)
        })
        .collect();

    if let Some(last) = adjusted.last_mut() {
        last.price = target;
    }
    adjusted
}

/// Minimal substitute series when the history fetch fails: weekly points
/// ending at `today`, all pinned to the current price (zero if unknown).
pub fn fallback_series(current_price: Option<f64>, today: NaiveDate) -> Vec<PricePoint> {
    let price = current_price.map(to_display_price).unwrap_or(0);
    debug!(price, "Building fallback history series");

    (0..FALLBACK_POINTS)
        .map(|i| {
            let weeks_back = (FALLBACK_POINTS - 1 - i) as i64;
            let date = today - chrono::Duration::weeks(weeks_back);
            PricePoint::new(date.format("%Y-%m-%d").to_string(), price)
        })
        .collect()
}
