use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tsxdesk_core::{
    fetch_company_info, CompanyInfo, FieldValue, HttpResponse, MarketDataProvider, ProviderError,
    StaticHttpClient, Ticker, YahooProvider,
};

const YAHOO_SUMMARY: &str = r#"{
    "quoteSummary": {
        "result": [{
            "price": {"longName": "Contract Corp", "marketCap": {"raw": 5000000000}},
            "financialData": {"currentPrice": {"raw": 42.5}}
        }],
        "error": null
    }
}"#;

/// In-memory provider that counts lookups.
struct FixtureProvider {
    calls: AtomicUsize,
}

impl MarketDataProvider for FixtureProvider {
    fn name(&self) -> &'static str {
        "fixture"
    }

    fn company_info<'a>(
        &'a self,
        ticker: &'a Ticker,
    ) -> Pin<Box<dyn Future<Output = Result<CompanyInfo, ProviderError>> + Send + 'a>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(CompanyInfo::empty(ticker.clone())
                .with_field("longName", FieldValue::Text("Contract Corp".into())))
        })
    }
}

struct ProviderCase {
    name: &'static str,
    provider: Arc<dyn MarketDataProvider>,
    lookups: Box<dyn Fn() -> usize>,
}

fn provider_cases() -> Vec<ProviderCase> {
    let http = Arc::new(
        StaticHttpClient::new()
            .route(
                "https://query2.finance.yahoo.com/v10/finance/quoteSummary/",
                HttpResponse::ok(YAHOO_SUMMARY),
            ),
    );
    let yahoo_http = Arc::clone(&http);

    let fixture = Arc::new(FixtureProvider {
        calls: AtomicUsize::new(0),
    });
    let fixture_calls = Arc::clone(&fixture);

    vec![
        ProviderCase {
            name: "yahoo",
            provider: Arc::new(YahooProvider::new(http).with_crumb("contract")),
            lookups: Box::new(move || yahoo_http.recorded_requests().len()),
        },
        ProviderCase {
            name: "fixture",
            provider: fixture,
            lookups: Box::new(move || fixture_calls.calls.load(Ordering::SeqCst)),
        },
    ]
}

#[tokio::test]
async fn record_belongs_to_requested_ticker_for_all_providers() {
    let ticker = Ticker::parse("CC.TO").expect("valid ticker");

    for case in provider_cases() {
        assert_eq!(case.provider.name(), case.name);

        let info = fetch_company_info(case.provider.as_ref(), &ticker)
            .await
            .unwrap_or_else(|error| panic!("provider '{}' lookup failed: {error}", case.name));

        assert_eq!(info.ticker, ticker, "provider '{}': ticker", case.name);
        assert_eq!(
            info.text("longName"),
            Some("Contract Corp"),
            "provider '{}': longName",
            case.name
        );
    }
}

#[tokio::test]
async fn every_call_is_a_fresh_lookup_for_all_providers() {
    let ticker = Ticker::parse("CC.TO").expect("valid ticker");

    for case in provider_cases() {
        for _ in 0..3 {
            fetch_company_info(case.provider.as_ref(), &ticker)
                .await
                .unwrap_or_else(|error| panic!("provider '{}' lookup failed: {error}", case.name));
        }

        assert_eq!((case.lookups)(), 3, "provider '{}': lookups", case.name);
    }
}

#[tokio::test]
async fn missing_fields_read_as_absent_for_all_providers() {
    let ticker = Ticker::parse("CC.TO").expect("valid ticker");

    for case in provider_cases() {
        let info = fetch_company_info(case.provider.as_ref(), &ticker)
            .await
            .unwrap_or_else(|error| panic!("provider '{}' lookup failed: {error}", case.name));

        assert_eq!(info.number("payoutRatio"), None, "provider '{}'", case.name);
        assert_eq!(info.text("sector"), None, "provider '{}'", case.name);
    }
}
