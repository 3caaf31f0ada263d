//! Price-history API client.
//!
//! The upstream returns a JSON array of `{date, price}` samples with
//! currency-agnostic float prices; they are clamped and rounded to the
//! display integers used everywhere downstream. Fetch failures are absorbed
//! by the caller via the reconciler's fallback series.

use super::util::{urlencode, with_retry};
use crate::core::cache::Cache;
use crate::core::offer::HistoryProvider;
use crate::core::price::{PricePoint, to_display_price};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, instrument};

#[derive(Debug, Deserialize)]
struct HistorySample {
    date: String,
    price: f64,
}

pub struct PriceHistoryProvider {
    base_url: String,
    client: reqwest::Client,
    cache: Arc<Cache<String, Vec<PricePoint>>>,
}

impl PriceHistoryProvider {
    pub fn new(base_url: &str, cache: Arc<Cache<String, Vec<PricePoint>>>) -> Self {
        Self {
            base_url: base_url.to_string(),
            client: reqwest::Client::new(),
            cache,
        }
    }
}

#[async_trait]
impl HistoryProvider for PriceHistoryProvider {
    #[instrument(name = "HistoryFetch", skip(self), fields(product = %product, days))]
    async fn fetch_history(&self, product: &str, days: u32) -> Result<Vec<PricePoint>> {
        let cache_key = format!("{product}:{days}");
        if let Some(cached) = self.cache.get(&cache_key).await {
            return Ok(cached);
        }

        let url = format!(
            "{}/history?product={}&days={}",
            self.base_url,
            urlencode(product),
            days
        );
        debug!("Requesting price history");

        let response = with_retry(|| self.client.get(&url).send(), 3, 500)
            .await
            .context("Price history request failed")?;
        let samples = response
            .json::<Vec<HistorySample>>()
            .await
            .context("Failed to parse price history response")?;

        if samples.is_empty() {
            return Err(anyhow!("Empty price history for product: {product}"));
        }

        let series: Vec<PricePoint> = samples
            .into_iter()
            .map(|s| PricePoint::new(s.date, to_display_price(s.price)))
            .collect();

        self.cache.put(cache_key, series.clone()).await;
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MOCK_JSON: &str = r#"[
        {"date": "2026-01-05", "price": 64999.5},
        {"date": "2026-01-12", "price": 63499.0},
        {"date": "2026-01-19", "price": -10.0}
    ]"#;

    async fn mock_history_server(body: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/history"))
            .and(query_param("days", "90"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_fetch_history_rounds_and_clamps() {
        let server = mock_history_server(MOCK_JSON).await;
        let cache = Arc::new(Cache::new());
        let provider = PriceHistoryProvider::new(&server.uri(), cache);

        let series = provider.fetch_history("iphone 15", 90).await.unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series[0], PricePoint::new("2026-01-05", 65000));
        assert_eq!(series[1], PricePoint::new("2026-01-12", 63499));
        // Negative upstream prices clamp to zero on ingest.
        assert_eq!(series[2].price, 0);
    }

    #[tokio::test]
    async fn test_fetch_history_empty_is_error() {
        let server = mock_history_server("[]").await;
        let cache = Arc::new(Cache::new());
        let provider = PriceHistoryProvider::new(&server.uri(), cache);

        assert!(provider.fetch_history("iphone 15", 90).await.is_err());
    }

    #[tokio::test]
    async fn test_fetch_history_cache_key_includes_days() {
        let server = mock_history_server(MOCK_JSON).await;
        let cache = Arc::new(Cache::new());
        let provider = PriceHistoryProvider::new(&server.uri(), Arc::clone(&cache));

        provider.fetch_history("iphone 15", 90).await.unwrap();
        assert!(cache.get(&"iphone 15:90".to_string()).await.is_some());
        assert!(cache.get(&"iphone 15:30".to_string()).await.is_none());
    }
}
