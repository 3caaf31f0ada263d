//! Session-scoped selection state.
//!
//! One product is "selected" at a time; the selection owns the fetched
//! history and the authoritative current price, and the latest offer list is
//! carried alongside so the search command can hand results to the dashboard
//! rendering without an untyped side channel. Updates are issued serially by
//! the command that triggered them; nothing here is shared across tasks.

use crate::core::forecast;
use crate::core::offer::Offer;
use crate::core::price::{ChartPoint, PricePoint};
use crate::core::reconcile;
use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::debug;

/// The currently selected product. Replaced wholesale on every new
/// selection.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub name: String,
    pub current_price: Option<f64>,
    pub history: Vec<PricePoint>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Explicit store for the selection and the latest offers.
#[derive(Debug, Default)]
pub struct Session {
    selection: Option<Selection>,
    offers: Vec<Offer>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh selection for `name`, discarding any previous one.
    pub fn select(&mut self, name: &str) {
        debug!(product = %name, "Selecting product");
        self.selection = Some(Selection {
            name: name.to_string(),
            ..Selection::default()
        });
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn set_current_price(&mut self, price: f64) {
        if let Some(selection) = self.selection.as_mut() {
            selection.current_price = Some(price);
            selection.last_updated = Some(Utc::now());
        }
    }

    pub fn set_history(&mut self, history: Vec<PricePoint>) {
        if let Some(selection) = self.selection.as_mut() {
            selection.history = history;
            selection.last_updated = Some(Utc::now());
        }
    }

    pub fn set_offers(&mut self, offers: Vec<Offer>) {
        self.offers = offers;
    }

    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    /// Resets the selection and offers to their initial state.
    pub fn clear(&mut self) {
        debug!("Clearing selection");
        self.selection = None;
        self.offers.clear();
    }

    /// The display chart for the current selection: history reconciled
    /// against the known current price, the most recent points labeled from
    /// "Jan", and a short projection toward the naive trend target appended.
    pub fn chart(&self, rng: &mut impl Rng) -> Vec<ChartPoint> {
        self.chart_with_target(None, rng)
    }

    /// Same as [`Session::chart`] but with an explicit target price for the
    /// projection; the naive trend target is used when `target` is `None`.
    pub fn chart_with_target(&self, target: Option<f64>, rng: &mut impl Rng) -> Vec<ChartPoint> {
        let Some(selection) = &self.selection else {
            return Vec::new();
        };

        let reconciled = reconcile::reconcile(&selection.history, selection.current_price);
        let start = reconciled.len().saturating_sub(8);
        let slice = &reconciled[start..];
        let target = target.or_else(|| forecast::trend_target(slice));
        forecast::project(slice, target, rng)
    }
}
