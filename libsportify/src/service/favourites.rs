//! Favourites service
//!
//! The plain mutations (`add_favourite`, `remove_favourite`,
//! `clear_favourites`) only touch memory. The `*_and_save` operations and
//! `toggle` mutate and persist under one lock, so the stored list matches
//! the in-memory list once they resolve.

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::store::{selectors, AsyncResult, FavouritesAction, Store};
use crate::types::Team;
use crate::Storage;

#[derive(Clone)]
pub struct FavouritesService {
    store: Store,
    storage: Storage,
    write_lock: Arc<Mutex<()>>,
}

impl FavouritesService {
    pub fn new(store: Store, storage: Storage) -> Self {
        Self {
            store,
            storage,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Add to memory only; no-op if the id is already present
    pub fn add_favourite(&self, team: Team) {
        self.store.dispatch(FavouritesAction::Add(team));
    }

    pub fn remove_favourite(&self, team_id: impl Into<String>) {
        self.store.dispatch(FavouritesAction::Remove(team_id.into()));
    }

    /// Empty the in-memory list; the stored list is left alone
    pub fn clear_favourites(&self) {
        self.store.dispatch(FavouritesAction::Clear);
    }

    pub fn favourites(&self) -> Vec<Team> {
        self.store.state().favourites.favourites
    }

    pub fn is_favourite(&self, team_id: &str) -> bool {
        selectors::is_favourite(&self.store.state().favourites, team_id)
    }

    /// Replace the in-memory list with the stored one
    ///
    /// An unreadable store leaves the in-memory list as it was and returns
    /// an empty list.
    pub async fn load_favourites_from_storage(&self) -> Vec<Team> {
        self.store.dispatch(FavouritesAction::LoadFromStorage(AsyncResult::Pending));

        match self.storage.try_load_favourites().await {
            Ok(favourites) => {
                tracing::debug!("Loaded {} favourites from storage", favourites.len());
                let loaded = AsyncResult::Success(favourites.clone());
                self.store.dispatch(FavouritesAction::LoadFromStorage(loaded));
                favourites
            }
            Err(e) => {
                tracing::error!("Error loading favourites: {}", e);
                let failed = AsyncResult::Failure(e.to_string());
                self.store.dispatch(FavouritesAction::LoadFromStorage(failed));
                Vec::new()
            }
        }
    }

    /// Write `snapshot` to storage, then mirror it into memory
    ///
    /// A failed write leaves the in-memory list untouched.
    pub async fn save_favourites_to_storage(&self, snapshot: Vec<Team>) {
        self.store.dispatch(FavouritesAction::SaveToStorage(AsyncResult::Pending));

        match self.storage.try_save_favourites(&snapshot).await {
            Ok(()) => {
                let saved = AsyncResult::Success(snapshot);
                self.store.dispatch(FavouritesAction::SaveToStorage(saved));
            }
            Err(e) => {
                tracing::error!("Error saving favourites: {}", e);
                let failed = AsyncResult::Failure(e.to_string());
                self.store.dispatch(FavouritesAction::SaveToStorage(failed));
            }
        }
    }

    /// Add and persist; returns the resulting list
    pub async fn add_and_save(&self, team: Team) -> Vec<Team> {
        let _guard = self.write_lock.lock().await;
        let state = self.store.dispatch(FavouritesAction::Add(team));
        self.persist(state.favourites.favourites).await
    }

    /// Remove and persist; returns the resulting list
    pub async fn remove_and_save(&self, team_id: impl Into<String>) -> Vec<Team> {
        let _guard = self.write_lock.lock().await;
        let state = self.store.dispatch(FavouritesAction::Remove(team_id.into()));
        self.persist(state.favourites.favourites).await
    }

    /// Empty the list and persist; returns how many favourites were removed
    pub async fn clear_and_save(&self) -> usize {
        let _guard = self.write_lock.lock().await;
        let removed = self.store.state().favourites.favourites.len();
        let state = self.store.dispatch(FavouritesAction::Clear);
        self.persist(state.favourites.favourites).await;
        removed
    }

    /// Flip membership and persist; returns whether the team is now a favourite
    pub async fn toggle(&self, team: Team) -> bool {
        let _guard = self.write_lock.lock().await;

        let was_favourite = selectors::is_favourite(&self.store.state().favourites, &team.id);
        let action = if was_favourite {
            FavouritesAction::Remove(team.id)
        } else {
            FavouritesAction::Add(team)
        };

        let state = self.store.dispatch(action);
        self.persist(state.favourites.favourites).await;
        !was_favourite
    }

    async fn persist(&self, snapshot: Vec<Team>) -> Vec<Team> {
        self.save_favourites_to_storage(snapshot.clone()).await;
        snapshot
    }
}
