pub mod store;

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::aggregation::CounterBook;
use crate::rating::RatingBook;

pub use store::StateStore;

/// Cumulative results of every run processed so far
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalState {
    /// Latest match timestamp merged so far
    pub last_timestamp: i64,
    pub stats: CounterBook,
    pub ratings: RatingBook,
}

impl GlobalState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the high-water mark forward. Returns whether it changed.
    pub fn advance_high_water(&mut self, timestamp: i64) -> bool {
        if timestamp > self.last_timestamp {
            self.last_timestamp = timestamp;
            true
        } else {
            false
        }
    }
}

/// Renders a unix timestamp as UTC for log and console output
pub fn display_timestamp(timestamp: i64) -> String {
    match DateTime::from_timestamp(timestamp, 0) {
        Some(time) => time.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => timestamp.to_string(),
    }
}
