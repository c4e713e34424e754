//! Market-data provider contract.
//!
//! The front ends only ever ask a provider for one thing: the flat field
//! mapping for a single ticker. Implementations must not cache; each call is
//! one fresh lookup.

use std::future::Future;
use std::pin::Pin;

use crate::error::ProviderError;
use crate::{CompanyInfo, Ticker};

/// Company info lookup capability.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the web front end shares one
/// instance per request across the executor.
pub trait MarketDataProvider: Send + Sync {
    /// Short provider name used in logs and output.
    fn name(&self) -> &'static str;

    /// Fetch the company/financial record for `ticker`.
    ///
    /// A record missing some or all fields is a success; callers treat every
    /// field as optional.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the lookup itself fails. No partial
    /// record is returned alongside an error.
    fn company_info<'a>(
        &'a self,
        ticker: &'a Ticker,
    ) -> Pin<Box<dyn Future<Output = Result<CompanyInfo, ProviderError>> + Send + 'a>>;
}

/// Fetch company info through any provider.
pub async fn fetch_company_info(
    provider: &dyn MarketDataProvider,
    ticker: &Ticker,
) -> Result<CompanyInfo, ProviderError> {
    tracing::debug!(provider = provider.name(), %ticker, "fetching company info");
    provider.company_info(ticker).await
}
