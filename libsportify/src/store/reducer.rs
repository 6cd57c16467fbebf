//! Pure reducer functions for state transitions
//!
//! `(State, Action) -> State`, one function per slice plus a root function
//! that routes by action. No I/O happens here: persistence and network calls
//! live in the service layer, which dispatches the outcome back as actions.

use super::actions::{Action, AsyncResult, AuthAction, FavouritesAction, TeamsAction};
use super::state::{AppState, AuthState, FavouritesState, TeamsState};

/// Root reducer
pub fn reduce(state: AppState, action: Action) -> AppState {
    match action {
        Action::Auth(action) => AppState {
            auth: reduce_auth(state.auth, action),
            ..state
        },
        Action::Teams(action) => AppState {
            teams: reduce_teams(state.teams, action),
            ..state
        },
        Action::Favourites(action) => AppState {
            favourites: reduce_favourites(state.favourites, action),
            ..state
        },
    }
}

pub fn reduce_auth(state: AuthState, action: AuthAction) -> AuthState {
    match action {
        AuthAction::Login(AsyncResult::Pending) => AuthState {
            loading: true,
            error: None,
            ..state
        },

        AuthAction::Login(AsyncResult::Success(user)) => AuthState {
            token: Some(user.token.clone()),
            user: Some(user),
            is_authenticated: true,
            loading: false,
            error: None,
        },

        // A failed login leaves no half-session behind
        AuthAction::Login(AsyncResult::Failure(message)) => AuthState {
            user: None,
            token: None,
            is_authenticated: false,
            loading: false,
            error: Some(message),
        },

        AuthAction::Logout => AuthState {
            user: None,
            token: None,
            is_authenticated: false,
            error: None,
            ..state
        },

        AuthAction::RestoreSession { token, user } => AuthState {
            user: Some(user),
            token: Some(token),
            is_authenticated: true,
            ..state
        },

        AuthAction::ClearError => AuthState {
            error: None,
            ..state
        },
    }
}

pub fn reduce_teams(state: TeamsState, action: TeamsAction) -> TeamsState {
    match action {
        TeamsAction::GetTeams(AsyncResult::Pending) => TeamsState {
            loading: true,
            error: None,
            ..state
        },

        // Replace wholesale; no merging
        TeamsAction::GetTeams(AsyncResult::Success(teams)) => TeamsState {
            teams,
            loading: false,
            error: None,
            ..state
        },

        // Keep whatever was loaded before
        TeamsAction::GetTeams(AsyncResult::Failure(message)) => TeamsState {
            loading: false,
            error: Some(message),
            ..state
        },

        TeamsAction::SetSelectedTeam(team) => TeamsState {
            selected_team: Some(team),
            ..state
        },

        TeamsAction::ClearSelectedTeam => TeamsState {
            selected_team: None,
            ..state
        },

        TeamsAction::SetSelectedLeague(league) => TeamsState {
            selected_league: league,
            ..state
        },

        TeamsAction::ClearTeamsError => TeamsState {
            error: None,
            ..state
        },
    }
}

pub fn reduce_favourites(state: FavouritesState, action: FavouritesAction) -> FavouritesState {
    match action {
        FavouritesAction::Add(team) => {
            if state.favourites.iter().any(|fav| fav.id == team.id) {
                return state;
            }
            let mut favourites = state.favourites;
            favourites.push(team);
            FavouritesState {
                favourites,
                ..state
            }
        }

        FavouritesAction::Remove(team_id) => {
            let mut favourites = state.favourites;
            favourites.retain(|team| team.id != team_id);
            FavouritesState {
                favourites,
                ..state
            }
        }

        FavouritesAction::Clear => FavouritesState {
            favourites: Vec::new(),
            ..state
        },

        FavouritesAction::LoadFromStorage(AsyncResult::Pending) => FavouritesState {
            loading: true,
            ..state
        },

        FavouritesAction::LoadFromStorage(AsyncResult::Success(favourites)) => FavouritesState {
            favourites,
            loading: false,
        },

        FavouritesAction::LoadFromStorage(AsyncResult::Failure(_)) => FavouritesState {
            loading: false,
            ..state
        },

        // Saving does not show a spinner; memory mirrors the snapshot once written
        FavouritesAction::SaveToStorage(AsyncResult::Pending) => state,

        FavouritesAction::SaveToStorage(AsyncResult::Success(favourites)) => FavouritesState {
            favourites,
            ..state
        },

        FavouritesAction::SaveToStorage(AsyncResult::Failure(_)) => state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use crate::types::Team;

    fn team(id: &str, name: &str) -> Team {
        Team::new(id, name)
    }

    fn one_favourite() -> FavouritesState {
        reduce_favourites(FavouritesState::default(), FavouritesAction::Add(team("1", "A")))
    }

    #[test]
    fn test_reducer_is_pure() {
        let state = AppState::new();
        let original = state.clone();

        let action = TeamsAction::SetSelectedLeague("Big Bash League".into());
        let new_state = reduce(state.clone(), action.into());

        assert_eq!(state, original);
        assert_eq!(new_state.teams.selected_league, "Big Bash League");
    }

    #[test]
    fn test_reduce_routes_to_one_slice() {
        let state = AppState::new();
        let new_state = reduce(state, FavouritesAction::Add(team("1", "A")).into());

        assert_eq!(new_state.favourites.favourites.len(), 1);
        assert_eq!(new_state.auth, AuthState::default());
        assert_eq!(new_state.teams, TeamsState::default());
    }

    // ---- auth ----

    #[test]
    fn test_login_pending_sets_loading_and_clears_error() {
        let state = AuthState {
            error: Some("old".to_string()),
            ..Default::default()
        };

        let state = reduce_auth(state, AuthAction::Login(AsyncResult::Pending));
        assert!(state.loading);
        assert!(state.error.is_none());
        assert!(!state.is_authenticated);
    }

    #[test]
    fn test_login_success_authenticates() {
        let user = MockApi::profile_for("emilys");
        let state = reduce_auth(AuthState::default(), AuthAction::Login(AsyncResult::Pending));
        let state = reduce_auth(state, AuthAction::Login(AsyncResult::Success(user.clone())));

        assert!(state.is_authenticated);
        assert!(!state.loading);
        assert_eq!(state.token.as_deref(), Some("mock-token-emilys"));
        assert_eq!(state.user, Some(user));
        assert!(state.error.is_none());
        assert!(state.is_consistent());
    }

    #[test]
    fn test_login_failure_clears_session() {
        let authenticated = reduce_auth(
            AuthState::default(),
            AuthAction::Login(AsyncResult::Success(MockApi::profile_for("emilys"))),
        );

        let state = reduce_auth(
            authenticated,
            AuthAction::Login(AsyncResult::Failure("Invalid credentials".to_string())),
        );

        assert!(!state.is_authenticated);
        assert!(state.user.is_none());
        assert!(state.token.is_none());
        assert_eq!(state.error.as_deref(), Some("Invalid credentials"));
        assert!(!state.loading);
        assert!(state.is_consistent());
    }

    #[test]
    fn test_logout_clears_session() {
        let state = reduce_auth(
            AuthState::default(),
            AuthAction::Login(AsyncResult::Success(MockApi::profile_for("emilys"))),
        );

        let state = reduce_auth(state, AuthAction::Logout);
        assert!(!state.is_authenticated);
        assert!(state.user.is_none());
        assert!(state.token.is_none());
        assert!(state.error.is_none());
        assert!(state.is_consistent());
    }

    #[test]
    fn test_restore_session_trusts_any_token() {
        // No server check happens on restore; even a garbage token authenticates
        let state = reduce_auth(
            AuthState::default(),
            AuthAction::RestoreSession {
                token: "definitely-not-valid".to_string(),
                user: MockApi::profile_for("emilys"),
            },
        );

        assert!(state.is_authenticated);
        assert_eq!(state.token.as_deref(), Some("definitely-not-valid"));
        assert!(state.is_consistent());
    }

    #[test]
    fn test_clear_error() {
        let state = reduce_auth(
            AuthState::default(),
            AuthAction::Login(AsyncResult::Failure("boom".to_string())),
        );
        let state = reduce_auth(state, AuthAction::ClearError);
        assert!(state.error.is_none());
    }

    // ---- teams ----

    #[test]
    fn test_get_teams_success_replaces_list() {
        let state = TeamsState {
            teams: vec![team("old", "Old")],
            ..Default::default()
        };

        let state = reduce_teams(state, TeamsAction::GetTeams(AsyncResult::Pending));
        assert!(state.loading);

        let state = reduce_teams(
            state,
            TeamsAction::GetTeams(AsyncResult::Success(vec![team("1", "A"), team("2", "B")])),
        );
        assert!(!state.loading);
        assert_eq!(state.teams.len(), 2);
        assert!(state.teams.iter().all(|t| t.id != "old"));
    }

    #[test]
    fn test_get_teams_failure_keeps_previous_teams() {
        let state = TeamsState {
            teams: vec![team("1", "A")],
            ..Default::default()
        };

        let state = reduce_teams(state, TeamsAction::GetTeams(AsyncResult::Pending));
        let state = reduce_teams(
            state,
            TeamsAction::GetTeams(AsyncResult::Failure("Failed to fetch teams from API".into())),
        );

        assert!(!state.loading);
        assert_eq!(state.teams, vec![team("1", "A")]);
        assert_eq!(state.error.as_deref(), Some("Failed to fetch teams from API"));

        let state = reduce_teams(state, TeamsAction::ClearTeamsError);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_selected_team_set_and_clear() {
        let state =
            reduce_teams(TeamsState::default(), TeamsAction::SetSelectedTeam(team("1", "A")));
        assert_eq!(state.selected_team.as_ref().map(|t| t.id.as_str()), Some("1"));

        let state = reduce_teams(state, TeamsAction::ClearSelectedTeam);
        assert!(state.selected_team.is_none());
    }

    #[test]
    fn test_default_selected_league() {
        assert_eq!(TeamsState::default().selected_league, "Indian Premier League");
    }

    // ---- favourites ----

    #[test]
    fn test_add_favourite_is_idempotent_by_id() {
        let state = one_favourite();
        let state = reduce_favourites(state, FavouritesAction::Add(team("1", "A renamed")));

        assert_eq!(state.favourites.len(), 1);
        assert_eq!(state.favourites[0].name, "A");
    }

    #[test]
    fn test_add_favourite_preserves_insertion_order() {
        let mut state = FavouritesState::default();
        for (id, name) in [("3", "C"), ("1", "A"), ("2", "B")] {
            state = reduce_favourites(state, FavouritesAction::Add(team(id, name)));
        }

        let ids: Vec<&str> = state.favourites.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_remove_missing_favourite_is_noop() {
        let state = one_favourite();
        let before = state.clone();

        let state = reduce_favourites(state, FavouritesAction::Remove("999".to_string()));
        assert_eq!(state, before);
    }

    #[test]
    fn test_remove_favourite_removes_all_matches() {
        // Duplicates can only arrive via a storage snapshot
        let state = FavouritesState {
            favourites: vec![team("1", "A"), team("2", "B"), team("1", "A")],
            loading: false,
        };

        let state = reduce_favourites(state, FavouritesAction::Remove("1".to_string()));
        assert_eq!(state.favourites, vec![team("2", "B")]);
    }

    #[test]
    fn test_clear_favourites() {
        let state = one_favourite();
        let state = reduce_favourites(state, FavouritesAction::Clear);
        assert!(state.favourites.is_empty());
    }

    #[test]
    fn test_load_from_storage_replaces_wholesale() {
        let state = one_favourite();

        let state =
            reduce_favourites(state, FavouritesAction::LoadFromStorage(AsyncResult::Pending));
        assert!(state.loading);

        let state = reduce_favourites(
            state,
            FavouritesAction::LoadFromStorage(AsyncResult::Success(vec![team("2", "B")])),
        );
        assert!(!state.loading);
        assert_eq!(state.favourites, vec![team("2", "B")]);
    }

    #[test]
    fn test_save_to_storage_mirrors_snapshot() {
        let state = one_favourite();

        let pending =
            reduce_favourites(state.clone(), FavouritesAction::SaveToStorage(AsyncResult::Pending));
        assert_eq!(pending, state);

        let snapshot = vec![team("1", "A"), team("2", "B")];
        let saved = reduce_favourites(
            pending,
            FavouritesAction::SaveToStorage(AsyncResult::Success(snapshot)),
        );
        assert_eq!(saved.favourites.len(), 2);
    }

    #[test]
    fn test_storage_failures_keep_favourites() {
        let state = one_favourite();

        let pending = FavouritesAction::LoadFromStorage(AsyncResult::Pending);
        let loading = reduce_favourites(state.clone(), pending);
        let failed = reduce_favourites(
            loading,
            FavouritesAction::LoadFromStorage(AsyncResult::Failure("unavailable".into())),
        );
        assert_eq!(failed, state);

        let failed = reduce_favourites(
            state.clone(),
            FavouritesAction::SaveToStorage(AsyncResult::Failure("unavailable".into())),
        );
        assert_eq!(failed, state);
    }
}
