//! Teams service: team list, selection and lookups

use std::sync::Arc;

use crate::api::SportsApi;
use crate::store::{AsyncResult, Store, TeamsAction};
use crate::types::Team;
use crate::Result;

#[derive(Clone)]
pub struct TeamsService {
    api: Arc<dyn SportsApi>,
    store: Store,
}

impl TeamsService {
    pub fn new(api: Arc<dyn SportsApi>, store: Store) -> Self {
        Self { api, store }
    }

    /// Fetch the team list into the teams slice
    ///
    /// `league` is accepted for API compatibility but the sports client
    /// always queries its first configured league. On failure the previous
    /// list stays in place and the message lands in `teams.error`.
    ///
    /// # Errors
    ///
    /// Returns the classified `ApiError` from the sports client.
    pub async fn get_teams(&self, league: Option<&str>) -> Result<Vec<Team>> {
        if let Some(league) = league {
            tracing::debug!("League {:?} requested; fetching the default league", league);
        }

        self.store.dispatch(TeamsAction::GetTeams(AsyncResult::Pending));

        match self.api.fetch_teams().await {
            Ok(teams) => {
                tracing::debug!("Fetched {} teams", teams.len());
                self.store.dispatch(TeamsAction::GetTeams(AsyncResult::Success(teams.clone())));
                Ok(teams)
            }
            Err(e) => {
                tracing::warn!("Fetching teams failed: {}", e);
                let failed = AsyncResult::Failure(e.message().to_string());
                self.store.dispatch(TeamsAction::GetTeams(failed));
                Err(e.into())
            }
        }
    }

    pub fn set_selected_team(&self, team: Team) {
        self.store.dispatch(TeamsAction::SetSelectedTeam(team));
    }

    pub fn clear_selected_team(&self) {
        self.store.dispatch(TeamsAction::ClearSelectedTeam);
    }

    /// Record the chosen league; the fetch does not read it
    pub fn set_selected_league(&self, league: impl Into<String>) {
        self.store.dispatch(TeamsAction::SetSelectedLeague(league.into()));
    }

    pub fn clear_teams_error(&self) {
        self.store.dispatch(TeamsAction::ClearTeamsError);
    }

    /// Search teams by name; leaves the teams slice untouched
    pub async fn search_teams(&self, name: &str) -> Result<Vec<Team>> {
        Ok(self.api.search_teams(name).await?)
    }

    /// Look up one team by id; leaves the teams slice untouched
    pub async fn team_details(&self, team_id: &str) -> Result<Option<Team>> {
        Ok(self.api.get_team_details(team_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use crate::error::ApiError;

    fn teams() -> Vec<Team> {
        vec![
            Team::new("1", "Chennai Super Kings"),
            Team::new("2", "Mumbai Indians"),
        ]
    }

    #[tokio::test]
    async fn test_get_teams_fills_slice() {
        let store = Store::new();
        let service = TeamsService::new(Arc::new(MockApi::with_teams(teams())), store.clone());

        let fetched = service.get_teams(None).await.unwrap();
        assert_eq!(fetched.len(), 2);

        let state = store.state();
        assert_eq!(state.teams.teams, teams());
        assert!(!state.teams.loading);
        assert!(state.teams.error.is_none());
    }

    #[tokio::test]
    async fn test_league_argument_is_ignored() {
        let api = Arc::new(MockApi::with_teams(teams()));
        let store = Store::new();
        let service = TeamsService::new(api.clone(), store.clone());

        let default = service.get_teams(None).await.unwrap();
        let other = service.get_teams(Some("Big Bash League")).await.unwrap();

        assert_eq!(default, other);
        assert_eq!(api.fetch_calls(), 2);
    }

    #[tokio::test]
    async fn test_get_teams_failure_keeps_previous_list() {
        let store = Store::new();
        TeamsService::new(Arc::new(MockApi::with_teams(teams())), store.clone())
            .get_teams(None)
            .await
            .unwrap();

        let failing = TeamsService::new(
            Arc::new(MockApi::sports_failure(ApiError::NoResponse(
                "No response from sports API. Check your internet connection.".to_string(),
            ))),
            store.clone(),
        );
        assert!(failing.get_teams(None).await.is_err());

        let state = store.state();
        assert_eq!(state.teams.teams.len(), 2);
        assert_eq!(
            state.teams.error.as_deref(),
            Some("No response from sports API. Check your internet connection.")
        );

        failing.clear_teams_error();
        assert!(store.state().teams.error.is_none());
    }

    #[tokio::test]
    async fn test_selection_and_league() {
        let store = Store::new();
        let service = TeamsService::new(Arc::new(MockApi::with_teams(teams())), store.clone());

        service.set_selected_team(Team::new("1", "Chennai Super Kings"));
        assert_eq!(
            store.state().teams.selected_team.map(|t| t.id),
            Some("1".to_string())
        );
        service.clear_selected_team();
        assert!(store.state().teams.selected_team.is_none());

        service.set_selected_league("Big Bash League");
        assert_eq!(store.state().teams.selected_league, "Big Bash League");
    }

    #[tokio::test]
    async fn test_lookups_do_not_touch_slice() {
        let store = Store::new();
        let service = TeamsService::new(Arc::new(MockApi::with_teams(teams())), store.clone());

        let found = service.search_teams("mumbai").await.unwrap();
        assert_eq!(found.len(), 1);
        assert!(service.team_details("2").await.unwrap().is_some());

        assert!(store.state().teams.teams.is_empty());
    }
}
