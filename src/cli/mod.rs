//! Command implementations and terminal rendering

pub mod ask;
pub mod chart;
pub mod search;
pub mod ui;
