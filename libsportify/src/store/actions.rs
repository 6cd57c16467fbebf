//! Actions for the reducer pattern
//!
//! Synchronous operations map to one action each. Asynchronous operations
//! carry an `AsyncResult`: the handler dispatches `Pending` before the side
//! effect and `Success` or `Failure` once it settles.

use crate::types::{Team, UserProfile};

/// Lifecycle of an asynchronous operation
#[derive(Debug, Clone, PartialEq)]
pub enum AsyncResult<T> {
    Pending,
    Success(T),
    Failure(String),
}

/// Root action, routed to one slice
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Auth(AuthAction),
    Teams(TeamsAction),
    Favourites(FavouritesAction),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    Login(AsyncResult<UserProfile>),
    Logout,
    /// Trusts the stored token and profile without asking the server
    RestoreSession { token: String, user: UserProfile },
    ClearError,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TeamsAction {
    GetTeams(AsyncResult<Vec<Team>>),
    SetSelectedTeam(Team),
    ClearSelectedTeam,
    SetSelectedLeague(String),
    ClearTeamsError,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FavouritesAction {
    Add(Team),
    /// Remove by team id
    Remove(String),
    Clear,
    LoadFromStorage(AsyncResult<Vec<Team>>),
    SaveToStorage(AsyncResult<Vec<Team>>),
}

impl Action {
    /// Short name used in logs and store events, e.g. `auth/login/pending`
    pub fn name(&self) -> &'static str {
        match self {
            Action::Auth(action) => match action {
                AuthAction::Login(AsyncResult::Pending) => "auth/login/pending",
                AuthAction::Login(AsyncResult::Success(_)) => "auth/login/fulfilled",
                AuthAction::Login(AsyncResult::Failure(_)) => "auth/login/rejected",
                AuthAction::Logout => "auth/logout",
                AuthAction::RestoreSession { .. } => "auth/restoreSession",
                AuthAction::ClearError => "auth/clearError",
            },
            Action::Teams(action) => match action {
                TeamsAction::GetTeams(AsyncResult::Pending) => "teams/getTeams/pending",
                TeamsAction::GetTeams(AsyncResult::Success(_)) => "teams/getTeams/fulfilled",
                TeamsAction::GetTeams(AsyncResult::Failure(_)) => "teams/getTeams/rejected",
                TeamsAction::SetSelectedTeam(_) => "teams/setSelectedTeam",
                TeamsAction::ClearSelectedTeam => "teams/clearSelectedTeam",
                TeamsAction::SetSelectedLeague(_) => "teams/setSelectedLeague",
                TeamsAction::ClearTeamsError => "teams/clearTeamsError",
            },
            Action::Favourites(action) => match action {
                FavouritesAction::Add(_) => "favourites/addFavourite",
                FavouritesAction::Remove(_) => "favourites/removeFavourite",
                FavouritesAction::Clear => "favourites/clearFavourites",
                FavouritesAction::LoadFromStorage(AsyncResult::Pending) => {
                    "favourites/loadFromStorage/pending"
                }
                FavouritesAction::LoadFromStorage(AsyncResult::Success(_)) => {
                    "favourites/loadFromStorage/fulfilled"
                }
                FavouritesAction::LoadFromStorage(AsyncResult::Failure(_)) => {
                    "favourites/loadFromStorage/rejected"
                }
                FavouritesAction::SaveToStorage(AsyncResult::Pending) => {
                    "favourites/saveToStorage/pending"
                }
                FavouritesAction::SaveToStorage(AsyncResult::Success(_)) => {
                    "favourites/saveToStorage/fulfilled"
                }
                FavouritesAction::SaveToStorage(AsyncResult::Failure(_)) => {
                    "favourites/saveToStorage/rejected"
                }
            },
        }
    }
}

impl From<AuthAction> for Action {
    fn from(action: AuthAction) -> Self {
        Action::Auth(action)
    }
}

impl From<TeamsAction> for Action {
    fn from(action: TeamsAction) -> Self {
        Action::Teams(action)
    }
}

impl From<FavouritesAction> for Action {
    fn from(action: FavouritesAction) -> Self {
        Action::Favourites(action)
    }
}
