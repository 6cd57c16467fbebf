//! Mock API client for testing
//!
//! Configurable stand-in for both remote services. It records how often each
//! endpoint was called so tests can assert, for example, that a restored
//! session never hit the login endpoint.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use super::{ApiResult, AuthApi, SportsApi};
use crate::error::ApiError;
use crate::types::{Credentials, Team, UserProfile};

/// Configuration for mock client behavior
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Accepted username/password pair; anything else is rejected
    pub accepted: Option<(String, String)>,

    /// Error returned for every login, overriding `accepted`
    pub login_error: Option<ApiError>,

    /// Teams served by `fetch_teams`
    pub teams: Vec<Team>,

    /// Error returned by the sports endpoints
    pub sports_error: Option<ApiError>,

    /// Delay before completing operations (simulates network latency)
    pub delay: Duration,

    pub login_call_count: Arc<Mutex<usize>>,
    pub fetch_call_count: Arc<Mutex<usize>>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            accepted: Some(("emilys".to_string(), "emilyspass".to_string())),
            login_error: None,
            teams: Vec::new(),
            sports_error: None,
            delay: Duration::from_millis(0),
            login_call_count: Arc::new(Mutex::new(0)),
            fetch_call_count: Arc::new(Mutex::new(0)),
        }
    }
}

/// Mock implementation of `AuthApi` and `SportsApi`
#[derive(Debug, Clone)]
pub struct MockApi {
    config: MockConfig,
}

impl MockApi {
    pub fn new(config: MockConfig) -> Self {
        Self { config }
    }

    /// Accepts the demo credentials and serves the given teams
    pub fn with_teams(teams: Vec<Team>) -> Self {
        Self::new(MockConfig {
            teams,
            ..Default::default()
        })
    }

    /// Every login fails with `error`
    pub fn login_failure(error: ApiError) -> Self {
        Self::new(MockConfig {
            login_error: Some(error),
            ..Default::default()
        })
    }

    /// Every sports call fails with `error`
    pub fn sports_failure(error: ApiError) -> Self {
        Self::new(MockConfig {
            sports_error: Some(error),
            ..Default::default()
        })
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.config.delay = delay;
        self
    }

    pub fn login_calls(&self) -> usize {
        *self.config.login_call_count.lock().unwrap()
    }

    pub fn fetch_calls(&self) -> usize {
        *self.config.fetch_call_count.lock().unwrap()
    }

    /// Profile issued for a successful login
    pub fn profile_for(username: &str) -> UserProfile {
        UserProfile {
            id: Some(1),
            username: username.to_string(),
            email: Some(format!("{}@example.com", username)),
            first_name: Some("Emily".to_string()),
            last_name: Some("Johnson".to_string()),
            gender: None,
            image: None,
            age: Some(28),
            token: format!("mock-token-{}", username),
            refresh_token: None,
        }
    }

    async fn simulate_latency(&self) {
        if !self.config.delay.is_zero() {
            sleep(self.config.delay).await;
        }
    }
}

#[async_trait]
impl AuthApi for MockApi {
    async fn login_user(&self, credentials: &Credentials) -> ApiResult<UserProfile> {
        *self.config.login_call_count.lock().unwrap() += 1;
        self.simulate_latency().await;

        if let Some(error) = &self.config.login_error {
            return Err(error.clone());
        }

        match &self.config.accepted {
            Some((username, password))
                if username == &credentials.username && password == credentials.password() =>
            {
                Ok(Self::profile_for(username))
            }
            _ => Err(ApiError::Server {
                status: Some(400),
                message: "Invalid credentials".to_string(),
            }),
        }
    }
}

#[async_trait]
impl SportsApi for MockApi {
    async fn fetch_teams(&self) -> ApiResult<Vec<Team>> {
        *self.config.fetch_call_count.lock().unwrap() += 1;
        self.simulate_latency().await;

        match &self.config.sports_error {
            Some(error) => Err(error.clone()),
            None => Ok(self.config.teams.clone()),
        }
    }

    async fn search_teams(&self, name: &str) -> ApiResult<Vec<Team>> {
        self.simulate_latency().await;

        if let Some(error) = &self.config.sports_error {
            return Err(error.clone());
        }
        let needle = name.to_lowercase();
        Ok(self
            .config
            .teams
            .iter()
            .filter(|team| team.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn get_team_details(&self, team_id: &str) -> ApiResult<Option<Team>> {
        self.simulate_latency().await;

        if let Some(error) = &self.config.sports_error {
            return Err(error.clone());
        }
        Ok(self.config.teams.iter().find(|team| team.id == team_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_accepts_demo_credentials() {
        let api = MockApi::with_teams(Vec::new());

        let profile = api
            .login_user(&Credentials::new("emilys", "emilyspass"))
            .await
            .unwrap();
        assert_eq!(profile.token, "mock-token-emilys");
        assert_eq!(api.login_calls(), 1);
    }

    #[tokio::test]
    async fn test_mock_rejects_wrong_password() {
        let api = MockApi::with_teams(Vec::new());

        let err = api
            .login_user(&Credentials::new("emilys", "nope123"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[tokio::test]
    async fn test_mock_counts_fetches() {
        let api = MockApi::with_teams(vec![Team::new("1", "Perth Scorchers")]);

        api.fetch_teams().await.unwrap();
        api.fetch_teams().await.unwrap();
        assert_eq!(api.fetch_calls(), 2);
    }

    #[tokio::test]
    async fn test_mock_search_and_details() {
        let api = MockApi::with_teams(vec![
            Team::new("1", "Perth Scorchers"),
            Team::new("2", "Sydney Sixers"),
        ]);

        let found = api.search_teams("sixers").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "2");

        assert!(api.get_team_details("1").await.unwrap().is_some());
        assert!(api.get_team_details("3").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mock_sports_failure() {
        let api = MockApi::sports_failure(ApiError::NoResponse("offline".to_string()));
        assert!(api.fetch_teams().await.is_err());
        assert!(api.search_teams("x").await.is_err());
    }
}
