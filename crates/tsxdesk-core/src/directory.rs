//! Symbol directory fetcher.
//!
//! Downloads the exchange's plain-text listing of interlisted companies and
//! reduces it to an ordered list of tickers. Header and footer lines are
//! recognised by prefix; every other non-blank line contributes its first
//! whitespace-delimited token. Duplicates are kept as they appear.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::Settings;
use crate::error::NetworkError;
use crate::http_client::{HttpClient, HttpRequest};
use crate::Ticker;

const SKIPPED_PREFIXES: [&str; 2] = ["As of", "Symbol"];

/// Fetches and parses the remote symbol directory.
#[derive(Clone)]
pub struct SymbolDirectory {
    http_client: Arc<dyn HttpClient>,
    url: String,
    timeout_ms: Option<u64>,
}

impl SymbolDirectory {
    pub fn new(http_client: Arc<dyn HttpClient>, url: impl Into<String>) -> Self {
        Self {
            http_client,
            url: url.into(),
            timeout_ms: None,
        }
    }

    pub fn from_settings(http_client: Arc<dyn HttpClient>, settings: &Settings) -> Self {
        Self::new(http_client, settings.directory_url.clone()).with_timeout_ms(settings.timeout_ms)
    }

    pub fn with_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Download the listing and parse it.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError`] on transport failure or a non-2xx status.
    pub async fn fetch_symbols(&self) -> Result<Vec<Ticker>, NetworkError> {
        debug!(url = %self.url, "fetching symbol directory");

        let request = HttpRequest::get(&self.url).with_timeout_ms(self.timeout_ms);
        let response = self.http_client.execute(request).await?;
        if !response.is_success() {
            return Err(NetworkError::status(response.status, &self.url));
        }

        let symbols = parse_listing(&response.body);
        info!(count = symbols.len(), "parsed symbol directory");
        Ok(symbols)
    }
}

/// Parse the raw listing text into tickers, preserving order.
pub fn parse_listing(text: &str) -> Vec<Ticker> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !SKIPPED_PREFIXES.iter().any(|prefix| line.starts_with(prefix)))
        .filter_map(|line| line.split_whitespace().next())
        .filter_map(|token| match Ticker::from_listing_token(token) {
            Ok(ticker) => Some(ticker),
            Err(error) => {
                debug!(token, %error, "skipping unusable directory token");
                None
            }
        })
        .collect()
}
