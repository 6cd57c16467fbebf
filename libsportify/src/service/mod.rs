//! Service layer for Sportify
//!
//! The async handlers of the app, consumed by any front end (the CLI today).
//! `SportifyService` is the facade; it owns the store and storage and hands
//! out the per-slice sub-services:
//!
//! - `AuthService`: login, logout, session restore
//! - `TeamsService`: team list, selection, search and detail lookups
//! - `FavouritesService`: favourites in memory and on disk
//!
//! # Example
//!
//! ```no_run
//! use libsportify::service::SportifyService;
//! use libsportify::{Config, Credentials};
//!
//! # async fn example() -> libsportify::Result<()> {
//! let service = SportifyService::from_config(Config::load_or_default()?).await?;
//! service.bootstrap().await;
//!
//! if !service.store().state().is_authenticated() {
//!     service.auth().login(&Credentials::new("emilys", "emilyspass")).await?;
//! }
//!
//! let teams = service.teams().get_teams(None).await?;
//! service.favourites().add_and_save(teams[0].clone()).await;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod favourites;
pub mod teams;

use std::sync::Arc;
use tokio::sync::OnceCell;

use self::auth::AuthService;
use self::favourites::FavouritesService;
use self::teams::TeamsService;
use crate::api::http::HttpApiClient;
use crate::api::{AuthApi, SportsApi};
use crate::error::{ConfigError, SportifyError};
use crate::storage::SqliteStore;
use crate::store::{EventReceiver, Store};
use crate::{Config, Result, Storage};

/// Main service facade
///
/// All sub-services share one `Store` and one `Storage`.
pub struct SportifyService {
    store: Store,
    storage: Storage,
    auth: AuthService,
    teams: TeamsService,
    favourites: FavouritesService,
    bootstrapped: OnceCell<bool>,
}

impl SportifyService {
    /// Create a service backed by SQLite storage and the HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The storage path cannot be resolved
    /// - The database cannot be opened or migrated
    /// - The HTTP client cannot be built
    pub async fn from_config(config: Config) -> Result<Self> {
        let storage_path = crate::config::resolve_storage_path(Some(&config.storage.path))?;
        let storage_path = storage_path.to_str().ok_or_else(|| {
            SportifyError::Config(ConfigError::MissingField(
                "Invalid storage path".to_string(),
            ))
        })?;
        let backend = SqliteStore::new(storage_path).await?;

        let client = Arc::new(HttpApiClient::new(&config.api)?);
        let auth_api: Arc<dyn AuthApi> = client.clone();
        let sports_api: Arc<dyn SportsApi> = client;

        Ok(Self::with_parts(
            auth_api,
            sports_api,
            Storage::new(Arc::new(backend)),
        ))
    }

    /// Assemble a service from explicit parts
    pub fn with_parts(
        auth_api: Arc<dyn AuthApi>,
        sports_api: Arc<dyn SportsApi>,
        storage: Storage,
    ) -> Self {
        let store = Store::new();

        let auth = AuthService::new(auth_api, store.clone(), storage.clone());
        let teams = TeamsService::new(sports_api, store.clone());
        let favourites = FavouritesService::new(store.clone(), storage.clone());

        Self {
            store,
            storage,
            auth,
            teams,
            favourites,
            bootstrapped: OnceCell::new(),
        }
    }

    /// Restore the saved session and load favourites
    ///
    /// Runs once per service; later calls return the first result without
    /// touching storage. Returns whether a session was restored.
    pub async fn bootstrap(&self) -> bool {
        *self
            .bootstrapped
            .get_or_init(|| async {
                let restored = self.auth.restore_saved_session().await;
                self.favourites.load_favourites_from_storage().await;
                tracing::debug!(restored, "Bootstrap complete");
                restored
            })
            .await
    }

    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    pub fn teams(&self) -> &TeamsService {
        &self.teams
    }

    pub fn favourites(&self) -> &FavouritesService {
        &self.favourites
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Subscribe to store events
    pub fn subscribe(&self) -> EventReceiver {
        self.store.subscribe()
    }
}
