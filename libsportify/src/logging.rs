//! Logging setup shared by the library and the `sportify` binary
//!
//! Output goes to stderr so command output on stdout stays pipeable.
//! Format and level come from `SPORTIFY_LOG_FORMAT` and `SPORTIFY_LOG_LEVEL`;
//! `RUST_LOG` still wins when set.
//!
//! ```no_run
//! use libsportify::logging::{LogFormat, LoggingConfig};
//!
//! LoggingConfig::from_env().verbose(true).init();
//! // or explicitly
//! LoggingConfig::new(LogFormat::Json, "debug").init();
//! ```

use std::str::FromStr;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Plain single-line text
    Text,
    /// One JSON object per line
    Json,
    /// Multi-line, coloured output for development
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            other => Err(format!(
                "Invalid log format: '{}'. Valid options: text, json, pretty",
                other
            )),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
            LogFormat::Pretty => "pretty",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub level: String,
}

impl LoggingConfig {
    pub fn new(format: LogFormat, level: impl Into<String>) -> Self {
        Self {
            format,
            level: level.into(),
        }
    }

    /// Read format and level from the environment, defaulting to text at `warn`
    pub fn from_env() -> Self {
        let format = std::env::var("SPORTIFY_LOG_FORMAT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(LogFormat::Text);
        let level = std::env::var("SPORTIFY_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());

        Self { format, level }
    }

    /// Force debug level when `verbose` is set
    pub fn verbose(mut self, verbose: bool) -> Self {
        if verbose {
            self.level = "debug".to_string();
        }
        self
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
    }

    /// Install the global subscriber
    ///
    /// Returns `false` if a subscriber was already installed (tests, or a
    /// host application that set up its own).
    pub fn init(&self) -> bool {
        let result = match self.format {
            LogFormat::Json => tracing_subscriber::fmt()
                .json()
                .with_env_filter(self.filter())
                .with_writer(std::io::stderr)
                .flatten_event(true)
                .with_target(true)
                .try_init(),
            LogFormat::Pretty => tracing_subscriber::fmt()
                .pretty()
                .with_env_filter(self.filter())
                .with_writer(std::io::stderr)
                .with_line_number(true)
                .try_init(),
            LogFormat::Text => tracing_subscriber::fmt()
                .with_env_filter(self.filter())
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init(),
        };
        result.is_ok()
    }
}
