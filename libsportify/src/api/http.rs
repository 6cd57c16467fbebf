//! reqwest-backed implementation of the service traits

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{ApiResult, AuthApi, Operation, SportsApi};
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::types::{Credentials, Team, TeamsResponse, UserProfile, LEAGUES};

/// HTTP client for both remote services
#[derive(Clone)]
pub struct HttpApiClient {
    client: Client,
    auth_base_url: String,
    sports_base_url: String,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    username: &'a str,
    password: &'a str,
}

/// Error body shape used by the auth service
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl HttpApiClient {
    /// Create a client for the configured base URLs
    ///
    /// No timeout is set beyond the transport default.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("sportify/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                ApiError::Other("Failed to initialize HTTP client".to_string())
            })?;

        Ok(Self {
            client,
            auth_base_url: config.auth_base_url.trim_end_matches('/').to_string(),
            sports_base_url: config.sports_base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn send(&self, request: RequestBuilder, op: Operation) -> ApiResult<Response> {
        let response = request.send().await.map_err(|e| classify(e, op))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // Only the auth service sends a useful message body
        let server_message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message);
        tracing::warn!(
            "{:?} rejected with HTTP {}: {}",
            op,
            status.as_u16(),
            server_message.as_deref().unwrap_or("<no message>")
        );

        Err(ApiError::Server {
            status: Some(status.as_u16()),
            message: op.server_message(server_message),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        op: Operation,
    ) -> ApiResult<T> {
        let url = format!("{}/{}", self.sports_base_url, path);
        tracing::debug!("GET {} {:?}", url, query);

        let response = self.send(self.client.get(&url).query(query), op).await?;
        response.json::<T>().await.map_err(|e| classify(e, op))
    }
}

/// Sort a transport error into server / no response / other
fn classify(error: reqwest::Error, op: Operation) -> ApiError {
    if let Some(status) = error.status() {
        return ApiError::Server {
            status: Some(status.as_u16()),
            message: op.server_message(None),
        };
    }

    if error.is_connect() || error.is_timeout() || error.is_request() {
        tracing::warn!("{:?}: no response: {}", op, error);
        ApiError::NoResponse(op.no_response_message())
    } else {
        tracing::warn!("{:?}: request failed: {}", op, error);
        ApiError::Other(op.other_message())
    }
}

#[async_trait]
impl AuthApi for HttpApiClient {
    async fn login_user(&self, credentials: &Credentials) -> ApiResult<UserProfile> {
        let url = format!("{}/auth/login", self.auth_base_url);
        tracing::debug!("POST {} as {}", url, credentials.username);

        let body = LoginBody {
            username: &credentials.username,
            password: credentials.password(),
        };

        let response = self
            .send(self.client.post(&url).json(&body), Operation::Login)
            .await?;
        response
            .json::<UserProfile>()
            .await
            .map_err(|e| classify(e, Operation::Login))
    }
}

#[async_trait]
impl SportsApi for HttpApiClient {
    async fn fetch_teams(&self) -> ApiResult<Vec<Team>> {
        let response: TeamsResponse = self
            .get_json(
                "search_all_teams.php",
                &[("l", LEAGUES[0])],
                Operation::FetchTeams,
            )
            .await?;
        Ok(response.into_teams())
    }

    async fn search_teams(&self, name: &str) -> ApiResult<Vec<Team>> {
        let response: TeamsResponse = self
            .get_json("searchteams.php", &[("t", name)], Operation::SearchTeams)
            .await?;
        Ok(response.into_teams())
    }

    async fn get_team_details(&self, team_id: &str) -> ApiResult<Option<Team>> {
        let response: TeamsResponse = self
            .get_json("lookupteam.php", &[("id", team_id)], Operation::TeamDetails)
            .await?;
        Ok(response.into_teams().into_iter().next())
    }
}
