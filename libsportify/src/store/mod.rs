//! Slice-based state store
//!
//! Holds the `AppState` behind a single writer. `dispatch` applies one pure
//! reduction at a time and publishes the resulting state on the event bus, so
//! front ends can either poll `state()` or follow `subscribe()`.
//!
//! # Example
//!
//! ```
//! use libsportify::store::{actions::FavouritesAction, Store};
//! use libsportify::Team;
//!
//! let store = Store::new();
//! store.dispatch(FavouritesAction::Add(Team::new("1", "Perth Scorchers")));
//! assert_eq!(store.state().favourites.favourites.len(), 1);
//! ```

use std::sync::{Arc, Mutex, PoisonError};

pub mod actions;
pub mod events;
pub mod reducer;
pub mod selectors;
pub mod state;

pub use actions::{Action, AsyncResult, AuthAction, FavouritesAction, TeamsAction};
pub use events::{EventBus, EventReceiver, StoreEvent};
pub use state::{AppState, AuthState, FavouritesState, TeamsState};

/// Shared handle to the application state
#[derive(Clone)]
pub struct Store {
    state: Arc<Mutex<AppState>>,
    events: EventBus,
}

impl Store {
    pub fn new() -> Self {
        Self::with_state(AppState::new())
    }

    pub fn with_state(state: AppState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            events: EventBus::default(),
        }
    }

    /// Empty state with a larger per-subscriber event buffer
    pub fn with_event_capacity(capacity: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(AppState::new())),
            events: EventBus::new(capacity),
        }
    }

    /// Apply an action and return the resulting state
    pub fn dispatch(&self, action: impl Into<Action>) -> AppState {
        let action = action.into();
        let name = action.name();
        tracing::debug!(action = name, "dispatch");

        // Reducers never write through the guard, so a poisoned lock still holds valid state
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let next = reducer::reduce(guard.clone(), action);
        *guard = next.clone();

        // Emit under the lock so events follow the order of state changes
        self.events.emit(StoreEvent {
            action: name,
            state: next.clone(),
        });
        drop(guard);

        next
    }

    /// Snapshot of the current state
    pub fn state(&self) -> AppState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Follow every state change from now on
    pub fn subscribe(&self) -> EventReceiver {
        self.events.subscribe()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Team;

    #[test]
    fn test_dispatch_returns_new_state() {
        let store = Store::new();
        let state = store.dispatch(TeamsAction::SetSelectedTeam(Team::new("1", "A")));

        assert!(state.teams.selected_team.is_some());
        assert_eq!(store.state(), state);
    }

    #[test]
    fn test_clones_share_state() {
        let store = Store::new();
        let other = store.clone();

        other.dispatch(FavouritesAction::Add(Team::new("1", "A")));
        assert_eq!(store.state().favourites.favourites.len(), 1);
    }

    #[tokio::test]
    async fn test_dispatch_publishes_event() {
        let store = Store::new();
        let mut rx = store.subscribe();

        store.dispatch(FavouritesAction::Add(Team::new("1", "A")));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.action, "favourites/addFavourite");
        assert_eq!(event.state.favourites.favourites.len(), 1);
    }

    #[tokio::test]
    async fn test_events_arrive_in_dispatch_order() {
        let store = Store::new();
        let mut rx = store.subscribe();

        store.dispatch(TeamsAction::GetTeams(AsyncResult::Pending));
        store.dispatch(TeamsAction::GetTeams(AsyncResult::Success(vec![])));

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert_eq!(first.action, "teams/getTeams/pending");
        assert!(first.state.teams.loading);
        assert_eq!(second.action, "teams/getTeams/fulfilled");
        assert!(!second.state.teams.loading);
    }

    #[test]
    fn test_concurrent_dispatches_are_serialized() {
        let store = Store::new();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store.dispatch(FavouritesAction::Add(Team::new(i.to_string(), "T")));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.state().favourites.favourites.len(), 8);
    }

    #[test]
    fn test_concurrent_dispatch_events_follow_state_order() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 50;

        let store = Store::with_event_capacity(THREADS * PER_THREAD);
        let mut rx = store.subscribe();

        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for i in 0..PER_THREAD {
                        let id = format!("{}-{}", t, i);
                        store.dispatch(FavouritesAction::Add(Team::new(id, "T")));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut last = 0;
        for _ in 0..THREADS * PER_THREAD {
            let event = rx.try_recv().unwrap();
            let count = event.state.favourites.favourites.len();
            assert_eq!(count, last + 1);
            last = count;
        }
        assert_eq!(last, THREADS * PER_THREAD);
    }
}
