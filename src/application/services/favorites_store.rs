//! Persistent favorites with change notification.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{RwLock, broadcast};
use tracing::{debug, warn};

use crate::domain::entities::{FavoriteChange, PhotoId};
use crate::domain::ports::KeyValueStorePort;

/// Storage key the favorite set persists under.
const FAVORITES_KEY: &str = "favorite_photos";

/// Capacity of the change broadcast channel. A subscriber that falls further
/// behind observes `Lagged` and should re-read membership on resume.
const EVENT_CAPACITY: usize = 64;

/// On-disk shape of the favorite set.
#[derive(Debug, Default, Serialize, Deserialize)]
struct FavoritesRecord {
    ids: Vec<String>,
}

/// Set of favorited photo ids, persisted across restarts.
///
/// Mutations persist the full set before returning and always emit a
/// [`FavoriteChange`], including idempotent re-adds and re-removes, so any
/// open screen can refresh its favorite indicator. Persistence failures are
/// logged and swallowed; the in-memory set stays authoritative.
pub struct FavoritesStore {
    storage: Arc<dyn KeyValueStorePort>,
    ids: RwLock<HashSet<PhotoId>>,
    events: broadcast::Sender<FavoriteChange>,
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore").finish_non_exhaustive()
    }
}

impl FavoritesStore {
    /// Constructs a store from persisted state.
    ///
    /// Absent or malformed data yields an empty set; neither is an error.
    pub async fn load(storage: Arc<dyn KeyValueStorePort>) -> Self {
        let ids = match storage.get(FAVORITES_KEY).await {
            Ok(Some(bytes)) => Self::decode(&bytes),
            Ok(None) => HashSet::new(),
            Err(error) => {
                warn!(error = %error, "Failed to read favorites, starting empty");
                HashSet::new()
            }
        };
        debug!(count = ids.len(), "Favorites loaded");

        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            storage,
            ids: RwLock::new(ids),
            events,
        }
    }

    /// Adds a photo to the favorites. Idempotent.
    pub async fn add(&self, photo_id: &PhotoId) {
        let snapshot = {
            let mut ids = self.ids.write().await;
            ids.insert(photo_id.clone());
            ids.clone()
        };
        self.persist(&snapshot).await;
        self.emit(FavoriteChange::new(photo_id.clone(), true));
    }

    /// Removes a photo from the favorites. Idempotent.
    pub async fn remove(&self, photo_id: &PhotoId) {
        let snapshot = {
            let mut ids = self.ids.write().await;
            ids.remove(photo_id);
            ids.clone()
        };
        self.persist(&snapshot).await;
        self.emit(FavoriteChange::new(photo_id.clone(), false));
    }

    /// Flips membership and returns the new state.
    pub async fn toggle(&self, photo_id: &PhotoId) -> bool {
        if self.contains(photo_id).await {
            self.remove(photo_id).await;
            false
        } else {
            self.add(photo_id).await;
            true
        }
    }

    /// Returns true if the photo is favorited.
    pub async fn contains(&self, photo_id: &PhotoId) -> bool {
        self.ids.read().await.contains(photo_id)
    }

    /// Snapshot of current membership.
    pub async fn all_ids(&self) -> HashSet<PhotoId> {
        self.ids.read().await.clone()
    }

    /// Subscribes to change events. Dropping the receiver unsubscribes.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<FavoriteChange> {
        self.events.subscribe()
    }

    fn decode(bytes: &[u8]) -> HashSet<PhotoId> {
        let Ok(text) = std::str::from_utf8(bytes) else {
            warn!("Persisted favorites are not valid UTF-8, starting empty");
            return HashSet::new();
        };
        match toml::from_str::<FavoritesRecord>(text) {
            Ok(record) => record.ids.into_iter().map(PhotoId::new).collect(),
            Err(error) => {
                warn!(error = %error, "Persisted favorites are malformed, starting empty");
                HashSet::new()
            }
        }
    }

    async fn persist(&self, ids: &HashSet<PhotoId>) {
        let mut sorted: Vec<String> = ids.iter().map(|id| id.as_str().to_string()).collect();
        sorted.sort_unstable();
        let record = FavoritesRecord { ids: sorted };

        let encoded = match toml::to_string_pretty(&record) {
            Ok(encoded) => encoded,
            Err(error) => {
                warn!(error = %error, "Failed to encode favorites");
                return;
            }
        };

        if let Err(error) = self.storage.set(FAVORITES_KEY, encoded.as_bytes()).await {
            warn!(error = %error, "Failed to persist favorites");
        }
    }

    /// Send errors mean no subscriber is listening, which is fine.
    fn emit(&self, change: FavoriteChange) {
        let _ = self.events.send(change);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MemoryKeyValueStore;

    async fn make_store() -> (FavoritesStore, MemoryKeyValueStore) {
        let storage = MemoryKeyValueStore::new();
        let store = FavoritesStore::load(Arc::new(storage.clone())).await;
        (store, storage)
    }

    #[tokio::test]
    async fn test_membership_reflects_last_operation() {
        let (store, _storage) = make_store().await;
        let id = PhotoId::new("abc");

        assert!(!store.contains(&id).await);
        store.add(&id).await;
        assert!(store.contains(&id).await);
        store.remove(&id).await;
        assert!(!store.contains(&id).await);
    }

    #[tokio::test]
    async fn test_every_mutation_emits_event() {
        let (store, _storage) = make_store().await;
        let mut rx = store.subscribe();
        let id = PhotoId::new("abc");

        store.add(&id).await;
        store.add(&id).await; // idempotent re-add still emits
        store.remove(&id).await;

        assert_eq!(rx.recv().await.unwrap(), FavoriteChange::new("abc", true));
        assert_eq!(rx.recv().await.unwrap(), FavoriteChange::new("abc", true));
        assert_eq!(rx.recv().await.unwrap(), FavoriteChange::new("abc", false));
    }

    #[tokio::test]
    async fn test_all_subscribers_see_emission_order() {
        let (store, _storage) = make_store().await;
        let mut first = store.subscribe();
        let mut second = store.subscribe();

        store.add(&PhotoId::new("a")).await;
        store.add(&PhotoId::new("b")).await;

        for rx in [&mut first, &mut second] {
            assert_eq!(rx.recv().await.unwrap().photo_id.as_str(), "a");
            assert_eq!(rx.recv().await.unwrap().photo_id.as_str(), "b");
        }
    }

    #[tokio::test]
    async fn test_persist_reload_round_trip() {
        let (store, storage) = make_store().await;

        store.add(&PhotoId::new("a")).await;
        store.add(&PhotoId::new("b")).await;
        store.remove(&PhotoId::new("a")).await;

        let reloaded = FavoritesStore::load(Arc::new(storage)).await;
        assert!(!reloaded.contains(&PhotoId::new("a")).await);
        assert!(reloaded.contains(&PhotoId::new("b")).await);
    }

    #[tokio::test]
    async fn test_malformed_persisted_data_starts_empty() {
        let storage = MemoryKeyValueStore::new();
        storage.seed(FAVORITES_KEY, b"ids = [ this is not toml").await;

        let store = FavoritesStore::load(Arc::new(storage)).await;
        assert!(store.all_ids().await.is_empty());
    }

    #[tokio::test]
    async fn test_toggle_returns_new_state() {
        let (store, _storage) = make_store().await;
        let id = PhotoId::new("abc");

        assert!(store.toggle(&id).await);
        assert!(store.contains(&id).await);
        assert!(!store.toggle(&id).await);
        assert!(!store.contains(&id).await);
    }
}
