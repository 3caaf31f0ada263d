//! HTTP clients for the external APIs

pub mod assistant;
pub mod pricehistory;
pub mod shopsearch;
pub mod util;
