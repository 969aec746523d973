use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Maximum number of shared palettes kept in history.
pub const HISTORY_LIMIT: usize = 10;

/// A palette recorded in history or favorites.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteItem {
    pub colors: Vec<String>,
    /// Creation time in epoch milliseconds.
    pub timestamp: i64,
    pub is_favorite: bool,
}

impl PaletteItem {
    pub fn new(colors: Vec<String>) -> Self {
        Self {
            colors,
            timestamp: Utc::now().timestamp_millis(),
            is_favorite: false,
        }
    }
}

/// Addresses a palette held by the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaletteSlot {
    History(usize),
    Favorite(usize),
}
