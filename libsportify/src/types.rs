//! Core data types for Sportify

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SportifyError};

/// Leagues known to the sports client, in lookup order
pub const LEAGUES: [&str; 4] = [
    "Indian Premier League",
    "Big Bash League",
    "Pakistan Super League",
    "Caribbean Premier League",
];

pub const DEFAULT_LEAGUE: &str = LEAGUES[0];

const MIN_USERNAME_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 6;

/// Login credentials
///
/// The password is kept in a `SecretString` so it is zeroed on drop and
/// redacted from `Debug` output.
#[derive(Debug)]
pub struct Credentials {
    pub username: String,
    password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }

    /// Form-level validation performed before dispatching a login
    pub fn validate(&self) -> Result<()> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err(SportifyError::InvalidInput("Username is required".to_string()));
        }
        if username.chars().count() < MIN_USERNAME_LEN {
            return Err(SportifyError::InvalidInput(format!(
                "Username must be at least {} characters",
                MIN_USERNAME_LEN
            )));
        }
        if self.password().is_empty() {
            return Err(SportifyError::InvalidInput("Password is required".to_string()));
        }
        if self.password().chars().count() < MIN_PASSWORD_LEN {
            return Err(SportifyError::InvalidInput(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        Ok(())
    }
}

/// Profile returned by the auth service, including the issued token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<u64>,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    /// Session token; newer deployments of the auth service call it `accessToken`
    #[serde(alias = "accessToken")]
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl UserProfile {
    /// "First Last", falling back to the username
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            _ => self.username.clone(),
        }
    }

    /// Avatar initial: first name, then username, then `U`
    pub fn initial(&self) -> char {
        self.first_name
            .as_deref()
            .and_then(|name| name.chars().next())
            .or_else(|| self.username.chars().next())
            .unwrap_or('U')
    }
}

/// A team record from the sports-metadata service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(rename = "idTeam")]
    pub id: String,
    #[serde(rename = "strTeam")]
    pub name: String,
    #[serde(rename = "strTeamShort", default)]
    pub short_name: Option<String>,
    #[serde(rename = "strLeague", default)]
    pub league: Option<String>,
    #[serde(rename = "strSport", default)]
    pub sport: Option<String>,
    #[serde(rename = "strCountry", default)]
    pub country: Option<String>,
    #[serde(rename = "strStadium", default)]
    pub stadium: Option<String>,
    #[serde(rename = "strLocation", default)]
    pub location: Option<String>,
    #[serde(rename = "intStadiumCapacity", default)]
    pub stadium_capacity: Option<String>,
    #[serde(rename = "intFormedYear", default)]
    pub formed_year: Option<String>,
    #[serde(rename = "strTeamBadge", default)]
    pub team_badge: Option<String>,
    #[serde(rename = "strBadge", default)]
    pub badge: Option<String>,
    #[serde(rename = "strLogo", default)]
    pub logo: Option<String>,
    #[serde(rename = "strBanner", default)]
    pub banner: Option<String>,
    #[serde(rename = "strDescriptionEN", default)]
    pub description: Option<String>,
    #[serde(rename = "strWebsite", default)]
    pub website: Option<String>,
    #[serde(rename = "strFacebook", default)]
    pub facebook: Option<String>,
    #[serde(rename = "strTwitter", default)]
    pub twitter: Option<String>,
    #[serde(rename = "strInstagram", default)]
    pub instagram: Option<String>,
    #[serde(rename = "strYoutube", default)]
    pub youtube: Option<String>,
    #[serde(rename = "strColour1", default)]
    pub colour1: Option<String>,
    #[serde(rename = "strColour2", default)]
    pub colour2: Option<String>,
    #[serde(rename = "strColour3", default)]
    pub colour3: Option<String>,
}

impl Team {
    /// Minimal team with only id and name set
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            short_name: None,
            league: None,
            sport: None,
            country: None,
            stadium: None,
            location: None,
            stadium_capacity: None,
            formed_year: None,
            team_badge: None,
            badge: None,
            logo: None,
            banner: None,
            description: None,
            website: None,
            facebook: None,
            twitter: None,
            instagram: None,
            youtube: None,
            colour1: None,
            colour2: None,
            colour3: None,
        }
    }

    /// Badge image URL; the service renamed the field at some point
    pub fn badge_url(&self) -> Option<&str> {
        non_empty(&self.team_badge).or_else(|| non_empty(&self.badge))
    }

    /// Website as an openable URL (the service stores bare host names)
    pub fn website_url(&self) -> Option<String> {
        non_empty(&self.website).map(with_scheme)
    }

    /// Social links that are present, as openable URLs
    pub fn social_links(&self) -> Vec<(&'static str, String)> {
        [
            ("facebook", &self.facebook),
            ("twitter", &self.twitter),
            ("instagram", &self.instagram),
            ("youtube", &self.youtube),
        ]
        .into_iter()
        .filter_map(|(name, link)| non_empty(link).map(|l| (name, with_scheme(l))))
        .collect()
    }

    /// League label for list rows
    pub fn league_label(&self) -> &str {
        non_empty(&self.league).unwrap_or("League Unknown")
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn with_scheme(url: &str) -> String {
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// Envelope used by every sports-metadata endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TeamsResponse {
    #[serde(default)]
    pub teams: Option<Vec<Team>>,
}

impl TeamsResponse {
    pub fn into_teams(self) -> Vec<Team> {
        self.teams.unwrap_or_default()
    }
}
