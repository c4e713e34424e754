//! # tsxdesk core
//!
//! Data access and presentation helpers for the tsxdesk tools.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Market-data provider adapters (Yahoo) |
//! | [`config`] | Environment-driven settings |
//! | [`directory`] | Exchange symbol directory fetcher |
//! | [`domain`] | Ticker and company record types |
//! | [`error`] | Core error types |
//! | [`etf`] | ETF report and screen |
//! | [`export`] | Symbol export to xlsx |
//! | [`format`] | Value formatters |
//! | [`http_client`] | HTTP client abstraction |
//! | [`provider`] | Provider contract |
//! | [`report`] | Four-tab company report |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tsxdesk_core::{fetch_company_info, CompanyReport, ReqwestHttpClient, Ticker, YahooProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let http = Arc::new(ReqwestHttpClient::new("tsxdesk")?);
//!     let provider = YahooProvider::new(http);
//!
//!     let info = fetch_company_info(&provider, &Ticker::parse("RY.TO")?).await?;
//!     println!("{}", CompanyReport::from_info(&info));
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐      ┌──────────────────┐
//! │  CLI / Web   │─────▶│ Report / ETF     │──▶ format
//! └──────┬───────┘      └──────────────────┘
//!        │
//!        ├──────────────▶ SymbolExporter ──▶ SymbolDirectory ─┐
//!        │                                                    ▼
//!        └──────────────▶ MarketDataProvider (Yahoo) ──▶ HttpClient
//! ```

pub mod adapters;
pub mod config;
pub mod directory;
pub mod domain;
pub mod error;
pub mod etf;
pub mod export;
pub mod format;
pub mod http_client;
pub mod provider;
pub mod report;

pub use adapters::{YahooProvider, YahooSession};
pub use config::Settings;
pub use directory::{parse_listing, SymbolDirectory};
pub use domain::{CompanyField, CompanyInfo, FieldValue, Ticker};
pub use error::{CoreError, NetworkError, ProviderError, ProviderErrorKind, ValidationError};
pub use etf::{screen_etf, EtfReport, EtfVerdict};
pub use export::{next_free_path, SymbolExporter};
pub use http_client::{HttpClient, HttpRequest, HttpResponse, ReqwestHttpClient, StaticHttpClient};
pub use provider::{fetch_company_info, MarketDataProvider};
pub use report::CompanyReport;
