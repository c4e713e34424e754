//! Environment-driven settings shared by the CLI and the web front end.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `TSXDESK_DIRECTORY_URL` | [`DEFAULT_DIRECTORY_URL`] |
//! | `TSXDESK_EXPORT_DIR` | `.` |
//! | `TSXDESK_USER_AGENT` | `tsxdesk/<version>` |
//! | `TSXDESK_TIMEOUT_MS` | unset, requests are unbounded |
//! | `TSXDESK_YAHOO_CRUMB` | unset, crumb is fetched per session |
//! | `TSXDESK_BIND` | `127.0.0.1:8000` |

use std::path::PathBuf;

pub const DEFAULT_DIRECTORY_URL: &str =
    "https://www.tsx.com/files/trading/interlisted-companies.txt";
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub directory_url: String,
    pub export_dir: PathBuf,
    pub user_agent: String,
    pub timeout_ms: Option<u64>,
    pub yahoo_crumb: Option<String>,
    pub bind: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            directory_url: String::from(DEFAULT_DIRECTORY_URL),
            export_dir: PathBuf::from("."),
            user_agent: format!("tsxdesk/{}", env!("CARGO_PKG_VERSION")),
            timeout_ms: None,
            yahoo_crumb: None,
            bind: String::from(DEFAULT_BIND),
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let timeout_ms = get("TSXDESK_TIMEOUT_MS").and_then(|raw| match raw.parse::<u64>() {
            Ok(value) if value > 0 => Some(value),
            _ => {
                tracing::warn!(value = %raw, "ignoring invalid TSXDESK_TIMEOUT_MS");
                None
            }
        });

        Self {
            directory_url: get("TSXDESK_DIRECTORY_URL").unwrap_or(defaults.directory_url),
            export_dir: get("TSXDESK_EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.export_dir),
            user_agent: get("TSXDESK_USER_AGENT").unwrap_or(defaults.user_agent),
            timeout_ms,
            yahoo_crumb: get("TSXDESK_YAHOO_CRUMB"),
            bind: get("TSXDESK_BIND").unwrap_or(defaults.bind),
        }
    }

    pub fn with_export_dir(mut self, export_dir: impl Into<PathBuf>) -> Self {
        self.export_dir = export_dir.into();
        self
    }
}
