//! Application state
//!
//! Plain data, one struct per slice. All transitions go through the reducer
//! (see `reducer.rs`).

use crate::types::{Team, UserProfile, DEFAULT_LEAGUE};

/// Root state: the three slices side by side
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub auth: AuthState,
    pub teams: TeamsState,
    pub favourites: FavouritesState,
}

/// Session state
///
/// `is_authenticated` is true exactly when both `user` and `token` are set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<UserProfile>,
    pub token: Option<String>,
    pub is_authenticated: bool,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamsState {
    pub teams: Vec<Team>,
    pub loading: bool,
    pub error: Option<String>,
    /// Subject of the detail view
    pub selected_team: Option<Team>,
    pub selected_league: String,
}

/// Favourite teams, unique by id, in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FavouritesState {
    pub favourites: Vec<Team>,
    pub loading: bool,
}

impl Default for TeamsState {
    fn default() -> Self {
        Self {
            teams: Vec::new(),
            loading: false,
            error: None,
            selected_team: None,
            selected_league: DEFAULT_LEAGUE.to_string(),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated
    }
}

impl AuthState {
    /// Check the session invariant
    pub fn is_consistent(&self) -> bool {
        self.is_authenticated == (self.user.is_some() && self.token.is_some())
    }
}
