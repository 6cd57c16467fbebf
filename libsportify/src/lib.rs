//! Sportify - browse sports teams and keep a list of favourites
//!
//! This library provides the client core: a slice-based state store, a thin
//! REST layer over the auth and sports-metadata services, and a local
//! key-value persistence layer that survives restarts.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod navigation;
pub mod service;
pub mod storage;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{ApiError, Result, SportifyError};
pub use navigation::{Navigator, Route, Tab};
pub use service::SportifyService;
pub use storage::{KeyValueStore, Storage};
pub use store::{AppState, Store};
pub use types::{Credentials, Team, UserProfile};
