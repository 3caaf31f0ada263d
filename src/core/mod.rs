//! Core data shaping: parsing, synthetic data, reconciliation, projection

pub mod cache;
pub mod config;
pub mod forecast;
pub mod log;
pub mod offer;
pub mod price;
pub mod reconcile;
pub mod session;
pub mod synthetic;

// Re-export main types for cleaner imports
pub use offer::{AssistantProvider, HistoryProvider, Offer, SearchProvider};
pub use price::{ChartPoint, PricePoint};
pub use session::Session;
