use std::sync::Arc;

use tsxdesk_core::{
    HttpClient, MarketDataProvider, Settings, SymbolExporter, YahooProvider, YahooSession,
};

/// Immutable services shared by every request.
///
/// Providers and exporters are built per request from these. The Yahoo crumb
/// is set at most once and then only read.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub http_client: Arc<dyn HttpClient>,
    yahoo_session: YahooSession,
}

impl AppState {
    pub fn new(settings: Settings, http_client: Arc<dyn HttpClient>) -> Self {
        let yahoo_session = YahooSession::from_settings(&settings);
        Self {
            settings: Arc::new(settings),
            http_client,
            yahoo_session,
        }
    }

    pub fn provider(&self) -> Arc<dyn MarketDataProvider> {
        Arc::new(
            YahooProvider::new(Arc::clone(&self.http_client))
                .with_timeout_ms(self.settings.timeout_ms)
                .with_session(self.yahoo_session.clone()),
        )
    }

    pub fn exporter(&self) -> SymbolExporter {
        SymbolExporter::from_settings(Arc::clone(&self.http_client), &self.settings)
    }
}
