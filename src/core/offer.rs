//! Offer model and the provider seams the core consumes

use crate::core::price::PricePoint;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single platform's listing for a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    pub title: String,
    pub platform: String,
    /// Raw currency-formatted price string as the platform reported it.
    pub price: String,
    /// Numeric price extracted from `price`; `None` when unparseable.
    pub numeric_price: Option<f64>,
    pub availability: String,
    pub link: Option<String>,
}

impl Offer {
    /// The lowest parseable price across a set of offers, used as the
    /// authoritative "current price" for chart reconciliation.
    pub fn best_price(offers: &[Offer]) -> Option<f64> {
        offers
            .iter()
            .filter_map(|o| o.numeric_price)
            .filter(|p| p.is_finite() && *p >= 0.0)
            .min_by(|a, b| a.total_cmp(b))
    }
}

/// Searches shopping platforms for offers matching a free-text query.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<Offer>>;
}

/// Fetches an observed price history for a product over a day window.
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    async fn fetch_history(&self, product: &str, days: u32) -> Result<Vec<PricePoint>>;
}

/// Answers a free-text shopping question.
#[async_trait]
pub trait AssistantProvider: Send + Sync {
    async fn ask(&self, question: &str) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(platform: &str, numeric_price: Option<f64>) -> Offer {
        Offer {
            title: "Test Product".to_string(),
            platform: platform.to_string(),
            price: "₹0".to_string(),
            numeric_price,
            availability: "In Stock".to_string(),
            link: None,
        }
    }

    #[test]
    fn test_best_price_picks_lowest_parseable() {
        let offers = vec![
            offer("A", Some(49999.0)),
            offer("B", None),
            offer("C", Some(48500.0)),
        ];
        assert_eq!(Offer::best_price(&offers), Some(48500.0));
    }

    #[test]
    fn test_best_price_empty_or_unparseable_is_unknown() {
        assert_eq!(Offer::best_price(&[]), None);
        assert_eq!(Offer::best_price(&[offer("A", None)]), None);
    }
}
