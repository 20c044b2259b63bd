//! # Favorites Store
//!
//! An ordered list of favorited countries that survives restarts.
//!
//! The store is an owned value, not ambient state: it is built from a
//! [`FavoritesStorage`] backend, rehydrates from it once, and writes the full
//! list back after every mutation.
//!
//! ```text
//! FavoritesStore
//! ├── entries: Vec<FavoriteEntry>     // insertion order, one per country code
//! └── storage: Box<dyn FavoritesStorage>
//!         ├── JsonFileStorage         // ~/.atlas/countries-favorites.json
//!         └── MemoryStorage           // tests, --no-persist
//! ```
//!
//! Persisted shape: `{ "favorites": [ { ...country, "addedAt": <ms> } ] }`.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::catalog::Country;
use crate::core::pipeline::{SortOrder, contains_ignore_case};

/// Fixed storage identifier; also the file stem of the on-disk store.
pub const FAVORITES_KEY: &str = "countries-favorites";

/// A favorited country plus the moment it was favorited.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntry {
    #[serde(flatten)]
    pub country: Country,
    /// Milliseconds since the Unix epoch.
    pub added_at: i64,
}

/// The persisted document.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoritesSnapshot {
    pub favorites: Vec<FavoriteEntry>,
}

// ============================================================================
// Storage backends
// ============================================================================

/// Durable key-value slot holding the favorites document.
pub trait FavoritesStorage: Send {
    /// Returns the stored snapshot, or `None` if absent or unreadable.
    fn load(&self) -> Option<FavoritesSnapshot>;

    /// Replaces the stored snapshot.
    fn save(&self, snapshot: &FavoritesSnapshot) -> io::Result<()>;
}

/// Stores favorites as a single JSON file.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `~/.atlas/countries-favorites.json`, if a home directory exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".atlas").join(format!("{FAVORITES_KEY}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FavoritesStorage for JsonFileStorage {
    fn load(&self) -> Option<FavoritesSnapshot> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No favorites file at {}", self.path.display());
                return None;
            }
            Err(e) => {
                warn!("Failed to read favorites {}: {}", self.path.display(), e);
                return None;
            }
        };
        match serde_json::from_str(&json) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("Ignoring malformed favorites {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn save(&self, snapshot: &FavoritesSnapshot) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        atomic_write_json(&self.path, snapshot)
    }
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// In-process storage. Clones share the same slot, so a test can keep a handle
/// and inspect what the store wrote.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<FavoritesSnapshot>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: FavoritesSnapshot) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(snapshot))),
        }
    }

    /// The last snapshot written (or seeded).
    pub fn snapshot(&self) -> Option<FavoritesSnapshot> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl FavoritesStorage for MemoryStorage {
    fn load(&self) -> Option<FavoritesSnapshot> {
        self.snapshot()
    }

    fn save(&self, snapshot: &FavoritesSnapshot) -> io::Result<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| io::Error::other("favorites slot poisoned"))?;
        *slot = Some(snapshot.clone());
        Ok(())
    }
}

// ============================================================================
// Queries
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum FavoriteSortKey {
    #[default]
    AddedAt,
    Name,
    Population,
}

impl FavoriteSortKey {
    pub fn next(self) -> Self {
        match self {
            FavoriteSortKey::AddedAt => FavoriteSortKey::Name,
            FavoriteSortKey::Name => FavoriteSortKey::Population,
            FavoriteSortKey::Population => FavoriteSortKey::AddedAt,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FavoriteSortKey::AddedAt => "date added",
            FavoriteSortKey::Name => "name",
            FavoriteSortKey::Population => "population",
        }
    }
}

/// Search, region and sort settings of the favorites page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoritesQuery {
    pub search_term: String,
    /// Empty means no region filter.
    pub region_filter: String,
    pub sort_key: FavoriteSortKey,
    pub sort_order: SortOrder,
}

impl Default for FavoritesQuery {
    fn default() -> Self {
        // Newest favorites first
        Self {
            search_term: String::new(),
            region_filter: String::new(),
            sort_key: FavoriteSortKey::AddedAt,
            sort_order: SortOrder::Desc,
        }
    }
}

/// Aggregates over the current favorites, computed on read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FavoriteStats {
    pub total_count: usize,
    pub regions: BTreeMap<String, usize>,
    pub total_population: u64,
    /// Rounded half-up; 0 when there are no favorites.
    pub average_population: u64,
    /// Name of the most populous favorite; ties go to the earliest added.
    pub most_populous: Option<String>,
}

fn matches_search(entry: &FavoriteEntry, term: &str) -> bool {
    let country = &entry.country;
    contains_ignore_case(&country.common_name, term)
        || contains_ignore_case(&country.region, term)
        || country
            .capital()
            .is_some_and(|capital| contains_ignore_case(capital, term))
}

fn sort_entries(entries: &mut [&FavoriteEntry], key: FavoriteSortKey, order: SortOrder) {
    entries.sort_by(|a, b| {
        let ordering = match key {
            FavoriteSortKey::AddedAt => a.added_at.cmp(&b.added_at),
            FavoriteSortKey::Name => a.country.common_name.cmp(&b.country.common_name),
            FavoriteSortKey::Population => a.country.population.cmp(&b.country.population),
        };
        order.apply(ordering)
    });
}

// ============================================================================
// Store
// ============================================================================

pub struct FavoritesStore {
    entries: Vec<FavoriteEntry>,
    storage: Box<dyn FavoritesStorage>,
}

impl FavoritesStore {
    /// Builds a store and rehydrates it from `storage`.
    ///
    /// Duplicate codes in the stored document are collapsed to the first entry.
    pub fn load(storage: Box<dyn FavoritesStorage>) -> Self {
        let mut entries: Vec<FavoriteEntry> = Vec::new();
        for entry in storage.load().unwrap_or_default().favorites {
            if entries.iter().any(|e| e.country.code == entry.country.code) {
                warn!("Dropping duplicate favorite {}", entry.country.code);
                continue;
            }
            entries.push(entry);
        }
        info!("Loaded {} favorites", entries.len());
        Self { entries, storage }
    }

    /// Store backed by a fresh [`MemoryStorage`].
    pub fn in_memory() -> Self {
        Self::load(Box::new(MemoryStorage::new()))
    }

    /// All favorites in insertion order.
    pub fn entries(&self) -> &[FavoriteEntry] {
        &self.entries
    }

    /// Adds `country` stamped with the current time. Returns false if it was
    /// already a favorite, in which case nothing changes.
    pub fn add(&mut self, country: &Country) -> bool {
        self.add_at(country, Utc::now().timestamp_millis())
    }

    /// Adds `country` with an explicit `added_at` timestamp.
    pub fn add_at(&mut self, country: &Country, added_at: i64) -> bool {
        if self.is_favorite(&country.code) {
            debug!("{} is already a favorite", country.code);
            return false;
        }
        self.entries.push(FavoriteEntry {
            country: country.clone(),
            added_at,
        });
        self.persist();
        true
    }

    /// Removes the favorite with `code`. Returns false if there was none.
    pub fn remove(&mut self, code: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.country.code != code);
        if self.entries.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Removes `country` if present, otherwise adds it. Returns whether it is a
    /// favorite afterwards.
    pub fn toggle(&mut self, country: &Country) -> bool {
        if self.remove(&country.code) {
            false
        } else {
            self.add(country)
        }
    }

    pub fn is_favorite(&self, code: &str) -> bool {
        self.entries.iter().any(|e| e.country.code == code)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.persist();
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn by_region(&self, region: &str) -> Vec<&FavoriteEntry> {
        self.entries
            .iter()
            .filter(|e| e.country.region == region)
            .collect()
    }

    pub fn has_region(&self, region: &str) -> bool {
        self.entries.iter().any(|e| e.country.region == region)
    }

    /// Non-empty regions present among the favorites, sorted.
    pub fn regions(&self) -> Vec<String> {
        self.stats()
            .regions
            .into_keys()
            .filter(|r| !r.is_empty())
            .collect()
    }

    pub fn stats(&self) -> FavoriteStats {
        let mut regions = BTreeMap::new();
        let mut total_population = 0u64;
        let mut most_populous: Option<&FavoriteEntry> = None;

        for entry in &self.entries {
            *regions.entry(entry.country.region.clone()).or_insert(0) += 1;
            total_population += entry.country.population;

            let best = most_populous.map_or(0, |e| e.country.population);
            if entry.country.population > best {
                most_populous = Some(entry);
            }
        }

        let total_count = self.entries.len();
        let average_population = if total_count > 0 {
            (total_population as f64 / total_count as f64).round() as u64
        } else {
            0
        };

        FavoriteStats {
            total_count,
            regions,
            total_population,
            average_population,
            most_populous: most_populous.map(|e| e.country.common_name.clone()),
        }
    }

    /// All favorites ordered by `key`. Ties keep insertion order.
    pub fn sorted_by(&self, key: FavoriteSortKey, order: SortOrder) -> Vec<&FavoriteEntry> {
        let mut entries: Vec<&FavoriteEntry> = self.entries.iter().collect();
        sort_entries(&mut entries, key, order);
        entries
    }

    /// Favorites whose name, region or first capital contains `term`,
    /// case-insensitively. An empty term returns everything.
    pub fn search(&self, term: &str) -> Vec<&FavoriteEntry> {
        self.entries
            .iter()
            .filter(|e| matches_search(e, term))
            .collect()
    }

    /// Search, then region filter, then sort.
    pub fn query(&self, query: &FavoritesQuery) -> Vec<&FavoriteEntry> {
        let mut entries: Vec<&FavoriteEntry> = self
            .entries
            .iter()
            .filter(|e| matches_search(e, &query.search_term))
            .filter(|e| query.region_filter.is_empty() || e.country.region == query.region_filter)
            .collect();
        sort_entries(&mut entries, query.sort_key, query.sort_order);
        entries
    }

    fn persist(&self) {
        let snapshot = FavoritesSnapshot {
            favorites: self.entries.clone(),
        };
        if let Err(e) = self.storage.save(&snapshot) {
            warn!("Failed to save favorites: {}", e);
        } else {
            debug!("Favorites saved ({} entries)", snapshot.favorites.len());
        }
    }
}
