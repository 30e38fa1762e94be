//! # Favorite-Station Persistence
//!
//! The favorites list is the only state that survives between sessions: an
//! ordered list of station ids, stored as a JSON array in a single file.
//!
//! The store follows the same contract as the rest of the crate: loading
//! never fails (missing or corrupt content degrades to an empty list) and
//! saving never fails the caller (a write error is logged and swallowed,
//! leaving the in-memory list as the source of truth for the session).
//! There is no locking; the store assumes it is the sole writer of its
//! file.
//!
//! [`toggle_favorite`] and [`is_favorite`] are pure list operations so they
//! can be exercised without touching the filesystem.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default location of the persisted favorites list.
pub const FAVORITES_FILE: &str = "tide-favorites.json";

/// File-backed store for the favorite-station id list.
///
/// The backing path is injected so tests (and any second list) can point at
/// their own file instead of a hard-coded global.
pub struct FavoritesStore {
    path: PathBuf,
}

impl Default for FavoritesStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FavoritesStore {
    /// Store backed by [`FAVORITES_FILE`] in the working directory.
    pub fn new() -> Self {
        Self::at_path(FAVORITES_FILE)
    }

    /// Store backed by an explicit file.
    pub fn at_path<P: AsRef<Path>>(path: P) -> Self {
        FavoritesStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read the persisted list.
    ///
    /// A missing file is the normal first run and yields an empty list;
    /// unreadable or non-JSON content does the same, with a warning.
    pub fn load(&self) -> Vec<String> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(_) => return Vec::new(),
        };

        match serde_json::from_slice(&data) {
            Ok(favorites) => favorites,
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "unreadable favorites file, starting empty"
                );
                Vec::new()
            }
        }
    }

    /// Overwrite the persisted list wholesale.
    ///
    /// Persistence failures are logged and swallowed.
    pub fn save(&self, favorites: &[String]) {
        let data = match serde_json::to_vec(favorites) {
            Ok(data) => data,
            Err(_) => return,
        };

        if let Err(err) = fs::write(&self.path, data) {
            warn!(
                path = %self.path.display(),
                error = %err,
                "could not persist favorites"
            );
        }
    }
}

/// Toggle a station's membership, returning a new list.
///
/// Removes the first occurrence of `station_id` if present, otherwise
/// appends it at the end. The input list is left untouched.
pub fn toggle_favorite(station_id: &str, favorites: &[String]) -> Vec<String> {
    let mut next = favorites.to_vec();
    match next.iter().position(|id| id == station_id) {
        Some(index) => {
            next.remove(index);
        }
        None => next.push(station_id.to_string()),
    }
    next
}

/// Whether `station_id` is in the favorites list.
pub fn is_favorite(station_id: &str, favorites: &[String]) -> bool {
    favorites.iter().any(|id| id == station_id)
}
