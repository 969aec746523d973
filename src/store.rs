/// Palette store: current colors, shared-palette history and favorites.
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use url::Url;

use crate::color::{normalize_color, normalize_palette, palettes_equal};
use crate::share;
use crate::storage::{FAVORITES_KEY, HISTORY_KEY, PaletteStorage, StorageError};
use crate::types::{HISTORY_LIMIT, PaletteItem, PaletteSlot};

/// Holds the current colors and the persisted palette lists.
///
/// Each action writes a changed list to storage before replacing the
/// in-memory copy, so memory never runs ahead of storage.
pub struct PaletteStore<S: PaletteStorage> {
    storage: S,
    current_colors: Vec<String>,
    history: Vec<PaletteItem>,
    favorites: Vec<PaletteItem>,
}

impl<S: PaletteStorage> PaletteStore<S> {
    /// Creates an empty store. Call [`Self::load_from_storage`] to restore state.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            current_colors: Vec::new(),
            history: Vec::new(),
            favorites: Vec::new(),
        }
    }

    pub fn current_colors(&self) -> &[String] {
        &self.current_colors
    }

    /// Shared palettes, most recent first.
    pub fn history(&self) -> &[PaletteItem] {
        &self.history
    }

    /// Favorite palettes, most recent first.
    pub fn favorites(&self) -> &[PaletteItem] {
        &self.favorites
    }

    #[cfg(test)]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// True when at least one current color normalizes.
    pub fn has_valid_colors(&self) -> bool {
        self.current_colors
            .iter()
            .any(|color| normalize_color(color).is_some())
    }

    /// Share link for the current colors, or an empty string.
    pub fn shareable_url(&self, base: &Url) -> String {
        share::shareable_url(base, &self.current_colors)
    }

    /// Replaces the current colors, recording them in history when shared.
    pub fn update_colors(&mut self, colors: Vec<String>, shared: bool) -> Result<(), StorageError> {
        self.current_colors = colors;
        if shared {
            let colors = self.current_colors.clone();
            self.add_to_history(&colors, true)?;
        }
        Ok(())
    }

    /// Records a shared palette at the front of history.
    ///
    /// Unshared, empty and all-invalid palettes are ignored, as is a palette
    /// already present in history.
    pub fn add_to_history<C: AsRef<str>>(&mut self, colors: &[C], shared: bool) -> Result<(), StorageError> {
        if !shared || colors.is_empty() {
            return Ok(());
        }

        let valid_colors = normalize_palette(colors);
        if valid_colors.is_empty() {
            debug!("no valid colors to record");
            return Ok(());
        }

        if contains_palette(&self.history, &valid_colors) {
            debug!(colors = ?valid_colors, "palette already in history");
            return Ok(());
        }

        let mut history = Vec::with_capacity(HISTORY_LIMIT + 1);
        history.push(PaletteItem::new(valid_colors));
        history.extend(self.history.iter().cloned());
        if history.len() > HISTORY_LIMIT {
            let evicted = history.len() - HISTORY_LIMIT;
            history.truncate(HISTORY_LIMIT);
            debug!(evicted, "trimmed history");
        }

        self.save_history(history)?;
        info!(entries = self.history.len(), "recorded shared palette");
        Ok(())
    }

    /// Flips the favorite flag of the palette at `slot`.
    ///
    /// Favoriting copies the palette to the front of favorites unless an equal
    /// one is already there; unfavoriting removes the equal favorite. History
    /// flags are resynced and both lists are persisted. An out-of-range slot
    /// is ignored.
    pub fn toggle_favorite(&mut self, slot: PaletteSlot) -> Result<(), StorageError> {
        let item = match slot {
            PaletteSlot::History(index) => self.history.get(index),
            PaletteSlot::Favorite(index) => self.favorites.get(index),
        };
        let Some(item) = item else {
            debug!(?slot, "no palette at slot");
            return Ok(());
        };
        let mut toggled = item.clone();
        toggled.is_favorite = !toggled.is_favorite;

        let mut favorites = self.favorites.clone();
        if let PaletteSlot::Favorite(index) = slot {
            favorites[index].is_favorite = toggled.is_favorite;
        }
        if toggled.is_favorite {
            if !contains_palette(&favorites, &toggled.colors) {
                favorites.insert(0, toggled.clone());
            }
        } else if let Some(index) = favorites
            .iter()
            .position(|fav| palettes_equal(&fav.colors, &toggled.colors))
        {
            favorites.remove(index);
        }

        self.save_favorites(favorites)?;
        info!(favorite = toggled.is_favorite, colors = ?toggled.colors, "toggled favorite");

        let history = synced_history(&self.history, &self.favorites);
        self.save_history(history)
    }

    /// Restores history and favorites from storage.
    ///
    /// Missing entries leave the lists untouched. Corrupt entries are logged
    /// and treated as empty.
    pub fn load_from_storage(&mut self) -> Result<(), StorageError> {
        let saved_history = self.read_list(HISTORY_KEY)?;
        let saved_favorites = self.read_list(FAVORITES_KEY)?;

        if let Some(history) = saved_history {
            self.history = match &saved_favorites {
                Some(favorites) => synced_history(&history, favorites),
                None => history,
            };
        }
        if let Some(favorites) = saved_favorites {
            self.favorites = favorites;
        }
        debug!(
            history = self.history.len(),
            favorites = self.favorites.len(),
            "loaded palettes from storage"
        );
        Ok(())
    }

    /// Writes `history` under its storage key, then adopts it.
    pub fn save_history(&mut self, history: Vec<PaletteItem>) -> Result<(), StorageError> {
        write_list(&mut self.storage, HISTORY_KEY, &history)?;
        self.history = history;
        Ok(())
    }

    /// Writes `favorites` under its storage key, then adopts it.
    pub fn save_favorites(&mut self, favorites: Vec<PaletteItem>) -> Result<(), StorageError> {
        write_list(&mut self.storage, FAVORITES_KEY, &favorites)?;
        self.favorites = favorites;
        Ok(())
    }

    pub fn reset_colors(&mut self) {
        self.current_colors.clear();
    }

    pub fn clear_history(&mut self) -> Result<(), StorageError> {
        self.save_history(Vec::new())?;
        info!("cleared history");
        Ok(())
    }

    /// Replaces favorites wholesale and resyncs history flags.
    pub fn import_favorites(&mut self, favorites: Vec<PaletteItem>) -> Result<(), StorageError> {
        self.save_favorites(favorites)?;
        info!(favorites = self.favorites.len(), "imported favorites");

        let history = synced_history(&self.history, &self.favorites);
        self.save_history(history)
    }

    /// Favorites in the persisted JSON format.
    pub fn export_favorites(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string_pretty(&self.favorites)?)
    }

    fn read_list(&self, key: &str) -> Result<Option<Vec<PaletteItem>>, StorageError> {
        let Some(raw) = self.storage.get(key)? else {
            return Ok(None);
        };
        Ok(Some(parse_or_empty(key, &raw)))
    }
}

fn write_list<S: PaletteStorage>(
    storage: &mut S,
    key: &str,
    items: &[PaletteItem],
) -> Result<(), StorageError> {
    let content = serde_json::to_string(items)?;
    storage.set(key, &content)
}

fn contains_palette(items: &[PaletteItem], colors: &[String]) -> bool {
    items.iter().any(|item| palettes_equal(&item.colors, colors))
}

/// History with every `is_favorite` flag recomputed against `favorites`.
fn synced_history(history: &[PaletteItem], favorites: &[PaletteItem]) -> Vec<PaletteItem> {
    history
        .iter()
        .map(|item| PaletteItem {
            is_favorite: contains_palette(favorites, &item.colors),
            ..item.clone()
        })
        .collect()
}

fn parse_or_empty<T: DeserializeOwned>(key: &str, raw: &str) -> Vec<T> {
    match serde_json::from_str::<Vec<T>>(raw) {
        Ok(items) => items,
        Err(error) => {
            warn!("Failed to parse stored {key}: {error}");
            Vec::new()
        }
    }
}
