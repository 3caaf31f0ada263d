//! Shopping-search API client.
//!
//! Talks to a SerpApi-style endpoint that returns a `shopping_results`
//! array. Failures bubble up to the caller, which substitutes simulated
//! offers; the user never sees an error from this path.

use super::util::{urlencode, with_retry};
use crate::core::cache::Cache;
use crate::core::offer::{Offer, SearchProvider};
use crate::core::price::parse_price;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, instrument};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    shopping_results: Option<Vec<ShoppingResult>>,
}

#[derive(Debug, Deserialize)]
struct ShoppingResult {
    title: String,
    source: Option<String>,
    price: Option<String>,
    extracted_price: Option<f64>,
    delivery: Option<String>,
    link: Option<String>,
}

pub struct ShopSearchProvider {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
    cache: Arc<Cache<String, Vec<Offer>>>,
}

impl ShopSearchProvider {
    pub fn new(base_url: &str, api_key: Option<&str>, cache: Arc<Cache<String, Vec<Offer>>>) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_key: api_key.map(str::to_string),
            client: reqwest::Client::new(),
            cache,
        }
    }
}

impl From<ShoppingResult> for Offer {
    fn from(item: ShoppingResult) -> Offer {
        let price = item.price.unwrap_or_default();
        let numeric_price = item.extracted_price.or_else(|| parse_price(&price));
        Offer {
            title: item.title,
            platform: item.source.unwrap_or_else(|| "Unknown".to_string()),
            price,
            numeric_price,
            availability: item.delivery.unwrap_or_else(|| "In Stock".to_string()),
            link: item.link,
        }
    }
}

#[async_trait]
impl SearchProvider for ShopSearchProvider {
    #[instrument(name = "ShoppingSearch", skip(self), fields(query = %query))]
    async fn search(&self, query: &str) -> Result<Vec<Offer>> {
        if let Some(cached) = self.cache.get(&query.to_string()).await {
            return Ok(cached);
        }

        let mut url = format!(
            "{}/search.json?engine=google_shopping&q={}",
            self.base_url,
            urlencode(query)
        );
        if let Some(key) = &self.api_key {
            url.push_str(&format!("&api_key={key}"));
        }
        debug!("Requesting shopping results");

        let response = with_retry(|| self.client.get(&url).send(), 3, 500)
            .await
            .context("Shopping search request failed")?;
        let data = response
            .json::<SearchResponse>()
            .await
            .context("Failed to parse shopping search response")?;

        let results = data
            .shopping_results
            .ok_or_else(|| anyhow!("No shopping results for query: {query}"))?;
        let offers: Vec<Offer> = results.into_iter().map(Offer::from).collect();
        if offers.is_empty() {
            return Err(anyhow!("Empty shopping results for query: {query}"));
        }

        self.cache.put(query.to_string(), offers.clone()).await;
        Ok(offers)
    }
}
