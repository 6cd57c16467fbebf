//! Read-only views derived from state

use super::state::{AppState, FavouritesState};
use crate::types::Team;

/// True when a team with this id is a favourite
pub fn is_favourite(state: &FavouritesState, team_id: &str) -> bool {
    state.favourites.iter().any(|team| team.id == team_id)
}

pub fn favourite_ids(state: &FavouritesState) -> Vec<&str> {
    state.favourites.iter().map(|team| team.id.as_str()).collect()
}

pub fn favourites_count(state: &AppState) -> usize {
    state.favourites.favourites.len()
}

/// Case-insensitive substring match on team name
///
/// An empty or blank query returns every team.
pub fn filter_teams<'a>(teams: &'a [Team], query: &str) -> Vec<&'a Team> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return teams.iter().collect();
    }

    teams
        .iter()
        .filter(|team| team.name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teams() -> Vec<Team> {
        let mut csk = Team::new("1", "Chennai Super Kings");
        csk.league = Some("Indian Premier League".to_string());
        let mut mi = Team::new("2", "Mumbai Indians");
        mi.league = Some("Indian Premier League".to_string());
        let scorchers = Team::new("3", "Perth Scorchers");
        vec![csk, mi, scorchers]
    }

    #[test]
    fn test_is_favourite() {
        let state = FavouritesState {
            favourites: vec![Team::new("1", "A")],
            loading: false,
        };
        assert!(is_favourite(&state, "1"));
        assert!(!is_favourite(&state, "2"));
        assert_eq!(favourite_ids(&state), vec!["1"]);
    }

    #[test]
    fn test_filter_by_name_case_insensitive() {
        let teams = teams();
        let found = filter_teams(&teams, "MUMBAI");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "2");
    }

    #[test]
    fn test_filter_ignores_league() {
        let teams = teams();
        assert!(filter_teams(&teams, "premier").is_empty());
        assert_eq!(filter_teams(&teams, "s").len(), 3);
    }

    #[test]
    fn test_blank_query_returns_all() {
        let teams = teams();
        assert_eq!(filter_teams(&teams, "").len(), 3);
        assert_eq!(filter_teams(&teams, "   ").len(), 3);
    }

    #[test]
    fn test_no_match() {
        let teams = teams();
        assert!(filter_teams(&teams, "zzz").is_empty());
    }

    #[test]
    fn test_favourites_count() {
        let mut state = AppState::new();
        assert_eq!(favourites_count(&state), 0);
        state.favourites.favourites.push(Team::new("1", "A"));
        assert_eq!(favourites_count(&state), 1);
    }
}
