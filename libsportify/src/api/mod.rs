//! Remote service clients
//!
//! Two remote services back the app: an auth service that exchanges
//! credentials for a profile and token, and a sports-metadata service that
//! serves team records. Each is described by a trait so the store's async
//! handlers can run against the real HTTP client or a mock.
//!
//! # Examples
//!
//! ```no_run
//! use libsportify::api::{http::HttpApiClient, AuthApi, SportsApi};
//! use libsportify::{Config, Credentials};
//!
//! # async fn example() -> Result<(), libsportify::ApiError> {
//! let client = HttpApiClient::new(&Config::default_config().api)?;
//!
//! let profile = client.login_user(&Credentials::new("emilys", "emilyspass")).await?;
//! println!("Logged in as {}", profile.username);
//!
//! let teams = client.fetch_teams().await?;
//! println!("{} teams", teams.len());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::error::ApiError;
use crate::types::{Credentials, Team, UserProfile};

pub mod http;

// Mock client is available for all builds (not just tests) to support integration tests
pub mod mock;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Authentication service
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a user profile carrying a session token
    ///
    /// # Errors
    ///
    /// - `ApiError::Server` with the service's own message (or "Login failed")
    ///   when the credentials are rejected
    /// - `ApiError::NoResponse` when the service cannot be reached
    /// - `ApiError::Other` for anything else
    async fn login_user(&self, credentials: &Credentials) -> ApiResult<UserProfile>;
}

/// Sports-metadata service
#[async_trait]
pub trait SportsApi: Send + Sync {
    /// Fetch all teams of the client's first configured league
    ///
    /// Takes no league argument: the client always queries `LEAGUES[0]`.
    async fn fetch_teams(&self) -> ApiResult<Vec<Team>>;

    /// Search teams by name
    async fn search_teams(&self, name: &str) -> ApiResult<Vec<Team>>;

    /// Look up a single team by id
    async fn get_team_details(&self, team_id: &str) -> ApiResult<Option<Team>>;
}

/// Which remote call failed; selects the user-facing messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Login,
    FetchTeams,
    SearchTeams,
    TeamDetails,
}

impl Operation {
    /// Message when the server answered with an error status
    ///
    /// Login prefers the server's own message when one was sent.
    pub fn server_message(self, server_message: Option<String>) -> String {
        match self {
            Operation::Login => server_message.unwrap_or_else(|| "Login failed".to_string()),
            Operation::FetchTeams => "Failed to fetch teams from API".to_string(),
            Operation::SearchTeams => "Failed to search teams".to_string(),
            Operation::TeamDetails => "Failed to fetch team details".to_string(),
        }
    }

    /// Message when the request was sent but nothing came back
    pub fn no_response_message(self) -> String {
        match self {
            Operation::Login => {
                "No response from server. Check your internet connection.".to_string()
            }
            Operation::FetchTeams => {
                "No response from sports API. Check your internet connection.".to_string()
            }
            Operation::SearchTeams | Operation::TeamDetails => self.server_message(None),
        }
    }

    /// Message for failures before a request went out or after a bad response
    pub fn other_message(self) -> String {
        match self {
            Operation::Login => "An error occurred during login".to_string(),
            Operation::FetchTeams => "An error occurred while fetching teams".to_string(),
            Operation::SearchTeams | Operation::TeamDetails => self.server_message(None),
        }
    }
}
