use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Map, Value};
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::config::Settings;
use crate::error::ProviderError;
use crate::http_client::{HttpClient, HttpRequest, HttpResponse};
use crate::provider::MarketDataProvider;
use crate::{CompanyInfo, FieldValue, Ticker};

const REFERER: &str = "https://finance.yahoo.com/";
const COOKIE_URL: &str = "https://fc.yahoo.com";
const CRUMB_URLS: [&str; 2] = [
    "https://query1.finance.yahoo.com/v1/test/getcrumb",
    "https://query2.finance.yahoo.com/v1/test/getcrumb",
];
const QUOTE_SUMMARY_URL: &str = "https://query2.finance.yahoo.com/v10/finance/quoteSummary";

/// Modules requested from quoteSummary. Earlier modules win on key clashes.
pub const MODULES: [&str; 6] = [
    "assetProfile",
    "price",
    "summaryDetail",
    "defaultKeyStatistics",
    "financialData",
    "fundProfile",
];

/// Per-module bookkeeping keys that are not company data.
const IGNORED_KEYS: [&str; 1] = ["maxAge"];

// ============================================================================
// Yahoo session - cookie/crumb handshake
// ============================================================================

/// Crumb shared by every provider built from the same session.
///
/// Yahoo's quoteSummary endpoint requires a session cookie from
/// `fc.yahoo.com` (kept by the transport's cookie jar) plus a crumb token
/// passed as a query parameter. Clones share one crumb, so the handshake runs
/// at most once per session.
#[derive(Debug, Clone, Default)]
pub struct YahooSession {
    crumb: Arc<OnceCell<String>>,
}

impl YahooSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session that never handshakes and always sends `crumb`.
    pub fn with_crumb(crumb: impl Into<String>) -> Self {
        Self {
            crumb: Arc::new(OnceCell::new_with(Some(crumb.into()))),
        }
    }

    /// Use the configured crumb when there is one.
    pub fn from_settings(settings: &Settings) -> Self {
        match &settings.yahoo_crumb {
            Some(crumb) => Self::with_crumb(crumb.clone()),
            None => Self::new(),
        }
    }

    async fn crumb(
        &self,
        http_client: &dyn HttpClient,
        timeout_ms: Option<u64>,
    ) -> Result<&str, ProviderError> {
        self.crumb
            .get_or_try_init(|| handshake(http_client, timeout_ms))
            .await
            .map(String::as_str)
    }
}

async fn handshake(
    http_client: &dyn HttpClient,
    timeout_ms: Option<u64>,
) -> Result<String, ProviderError> {
    // fc.yahoo.com answers 404 but sets the session cookie; only transport
    // failures matter here.
    let cookie_request = HttpRequest::get(COOKIE_URL)
        .with_header("referer", REFERER)
        .with_timeout_ms(timeout_ms);
    http_client.execute(cookie_request).await.map_err(|e| {
        ProviderError::session(format!("failed to fetch yahoo cookie: {}", e.message()))
    })?;

    for endpoint in CRUMB_URLS {
        let crumb_request = HttpRequest::get(endpoint)
            .with_header("referer", REFERER)
            .with_timeout_ms(timeout_ms);

        match http_client.execute(crumb_request).await {
            Ok(response) if response.is_success() => {
                let body = response.body.trim();

                if body.to_ascii_lowercase().contains("too many requests") {
                    return Err(ProviderError::session(
                        "yahoo rate limited the crumb request",
                    ));
                }

                if is_plausible_crumb(body) {
                    debug!(endpoint, "obtained yahoo crumb");
                    return Ok(body.to_owned());
                }
            }
            Ok(response) => debug!(endpoint, status = response.status, "crumb endpoint refused"),
            Err(error) => debug!(endpoint, %error, "crumb endpoint unreachable"),
        }
    }

    Err(ProviderError::session(
        "failed to fetch yahoo crumb from all endpoints",
    ))
}

fn is_plausible_crumb(body: &str) -> bool {
    !body.is_empty()
        && body.len() < 100
        && !body.contains(char::is_whitespace)
        && !body.contains('<')
}

// ============================================================================
// Yahoo provider
// ============================================================================

/// Company info lookups against Yahoo Finance quoteSummary.
pub struct YahooProvider {
    http_client: Arc<dyn HttpClient>,
    session: YahooSession,
    timeout_ms: Option<u64>,
}

impl YahooProvider {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            session: YahooSession::default(),
            timeout_ms: None,
        }
    }

    pub fn from_settings(http_client: Arc<dyn HttpClient>, settings: &Settings) -> Self {
        Self::new(http_client)
            .with_timeout_ms(settings.timeout_ms)
            .with_session(YahooSession::from_settings(settings))
    }

    /// Skip the handshake and use a known crumb.
    pub fn with_crumb(self, crumb: impl Into<String>) -> Self {
        self.with_session(YahooSession::with_crumb(crumb))
    }

    /// Share a crumb with other providers.
    pub fn with_session(mut self, session: YahooSession) -> Self {
        self.session = session;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    async fn fetch(&self, ticker: &Ticker) -> Result<CompanyInfo, ProviderError> {
        let crumb = self
            .session
            .crumb(self.http_client.as_ref(), self.timeout_ms)
            .await?;

        let endpoint = format!(
            "{}/{}?modules={}&crumb={}",
            QUOTE_SUMMARY_URL,
            urlencoding::encode(ticker.as_str()),
            MODULES.join(","),
            urlencoding::encode(crumb)
        );
        let request = HttpRequest::get(endpoint)
            .with_header("referer", REFERER)
            .with_timeout_ms(self.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|e| {
            ProviderError::unavailable(format!("yahoo transport error: {}", e.message()))
        })?;

        parse_quote_summary(ticker, &response)
    }
}

impl MarketDataProvider for YahooProvider {
    fn name(&self) -> &'static str {
        "yahoo"
    }

    fn company_info<'a>(
        &'a self,
        ticker: &'a Ticker,
    ) -> Pin<Box<dyn Future<Output = Result<CompanyInfo, ProviderError>> + Send + 'a>> {
        Box::pin(self.fetch(ticker))
    }
}

/// Turn a quoteSummary response into a flat record.
fn parse_quote_summary(
    ticker: &Ticker,
    response: &HttpResponse,
) -> Result<CompanyInfo, ProviderError> {
    let parsed = serde_json::from_str::<QuoteSummaryResponse>(&response.body);

    if !response.is_success() {
        if response.status == 404 {
            if let Ok(summary) = &parsed {
                if summary.quote_summary.is_not_found() {
                    warn!(%ticker, "yahoo has no quote for ticker; returning empty record");
                    return Ok(CompanyInfo::empty(ticker.clone()));
                }
            }
        }
        return Err(ProviderError::upstream(format!(
            "yahoo returned status {}",
            response.status
        )));
    }

    let summary = parsed
        .map_err(|e| ProviderError::malformed(format!("failed to parse yahoo response: {e}")))?
        .quote_summary;

    if let Some(error) = summary.error {
        return Err(ProviderError::upstream(format!(
            "yahoo API error: {}",
            error.describe()
        )));
    }

    let fields = summary
        .result
        .and_then(|results| results.into_iter().next())
        .map(|modules| flatten_modules(&modules))
        .unwrap_or_default();

    Ok(CompanyInfo::new(ticker.clone(), fields))
}

/// Merge the requested modules into one mapping, first module first.
pub(crate) fn flatten_modules(modules: &Map<String, Value>) -> BTreeMap<String, FieldValue> {
    let mut fields = BTreeMap::new();

    for module in MODULES {
        let Some(Value::Object(entries)) = modules.get(module) else {
            continue;
        };

        for (key, value) in entries {
            if IGNORED_KEYS.contains(&key.as_str()) || fields.contains_key(key) {
                continue;
            }
            if let Some(field) = flatten_value(value) {
                fields.insert(key.clone(), field);
            }
        }
    }

    fields
}

/// Yahoo wraps most numbers as `{"raw": 1.0, "fmt": "1.00"}`; empty wrappers
/// (`{}`) mean the value is absent.
fn flatten_value(value: &Value) -> Option<FieldValue> {
    match value {
        Value::Number(number) => number.as_f64().map(FieldValue::Number),
        Value::String(text) => Some(FieldValue::Text(text.clone())),
        Value::Bool(flag) => Some(FieldValue::Flag(*flag)),
        Value::Object(wrapper) => wrapper
            .get("raw")
            .and_then(Value::as_f64)
            .map(FieldValue::Number),
        Value::Null | Value::Array(_) => None,
    }
}

// ============================================================================
// Yahoo quoteSummary response structures
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummaryData,
}

#[derive(Debug, Clone, Deserialize)]
struct QuoteSummaryData {
    #[serde(default)]
    result: Option<Vec<Map<String, Value>>>,
    #[serde(default)]
    error: Option<QuoteSummaryError>,
}

impl QuoteSummaryData {
    fn is_not_found(&self) -> bool {
        self.error
            .as_ref()
            .and_then(|error| error.code.as_deref())
            .is_some_and(|code| code.eq_ignore_ascii_case("Not Found"))
    }
}

#[derive(Debug, Clone, Deserialize)]
struct QuoteSummaryError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl QuoteSummaryError {
    fn describe(&self) -> String {
        match (&self.code, &self.description) {
            (Some(code), Some(description)) => format!("{code}: {description}"),
            (Some(code), None) => code.clone(),
            (None, Some(description)) => description.clone(),
            (None, None) => String::from("unknown error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{NetworkError, ProviderErrorKind};
    use crate::http_client::StaticHttpClient;
    use crate::CompanyField;

    const SUMMARY_BODY: &str = r#"{
        "quoteSummary": {
            "result": [{
                "assetProfile": {
                    "sector": "Financial Services",
                    "industry": "Banks - Diversified",
                    "website": "https://www.rbc.com",
                    "longBusinessSummary": "Royal Bank of Canada operates as a diversified financial service company.",
                    "companyOfficers": [],
                    "maxAge": 86400
                },
                "price": {
                    "longName": "Royal Bank of Canada",
                    "exchange": "TOR",
                    "marketCap": {"raw": 190000000000, "fmt": "190B"},
                    "maxAge": 1
                },
                "summaryDetail": {
                    "trailingPE": {"raw": 12.5, "fmt": "12.50"},
                    "dividendYield": {"raw": 0.0412, "fmt": "4.12%"},
                    "marketCap": {"raw": 1, "fmt": "1"},
                    "forwardPE": {}
                },
                "financialData": {
                    "currentPrice": {"raw": 140.25, "fmt": "140.25"},
                    "recommendationKey": "buy",
                    "returnOnEquity": {"raw": 0.143, "fmt": "14.30%"}
                },
                "defaultKeyStatistics": {
                    "isin": null,
                    "priceHint": {"raw": 2}
                }
            }],
            "error": null
        }
    }"#;

    fn ticker() -> Ticker {
        Ticker::parse("RY.TO").expect("valid ticker")
    }

    fn handshake_client() -> StaticHttpClient {
        StaticHttpClient::new()
            .route(COOKIE_URL, HttpResponse::with_status(404, "<html>not here</html>"))
            .route(CRUMB_URLS[0], HttpResponse::ok("Zx9crumb"))
    }

    #[tokio::test]
    async fn flattens_modules_into_one_record() {
        let client = Arc::new(
            handshake_client().route(QUOTE_SUMMARY_URL, HttpResponse::ok(SUMMARY_BODY)),
        );
        let provider = YahooProvider::new(client.clone());

        let info = provider
            .company_info(&ticker())
            .await
            .expect("lookup should succeed");

        assert_eq!(info.text(CompanyField::LongName), Some("Royal Bank of Canada"));
        assert_eq!(info.text(CompanyField::Sector), Some("Financial Services"));
        assert_eq!(info.text(CompanyField::Exchange), Some("TOR"));
        assert_eq!(info.text(CompanyField::RecommendationKey), Some("buy"));
        assert_eq!(info.number(CompanyField::MarketCap), Some(190_000_000_000.0));
        assert_eq!(info.number(CompanyField::TrailingPe), Some(12.5));
        assert_eq!(info.number(CompanyField::CurrentPrice), Some(140.25));
        assert_eq!(info.get(CompanyField::ForwardPe), None);
        assert_eq!(info.get("maxAge"), None);
        assert_eq!(info.get("companyOfficers"), None);
        assert_eq!(info.get("isin"), None);
    }

    #[tokio::test]
    async fn crumb_is_fetched_once_and_sent_with_lookup() {
        let client = Arc::new(
            handshake_client().route(QUOTE_SUMMARY_URL, HttpResponse::ok(SUMMARY_BODY)),
        );
        let provider = YahooProvider::new(client.clone());

        provider.company_info(&ticker()).await.expect("first lookup");
        provider.company_info(&ticker()).await.expect("second lookup");

        let urls = client
            .recorded_requests()
            .into_iter()
            .map(|request| request.url)
            .collect::<Vec<_>>();
        assert_eq!(urls.iter().filter(|url| url.starts_with(COOKIE_URL)).count(), 1);

        let lookups = urls
            .iter()
            .filter(|url| url.starts_with(QUOTE_SUMMARY_URL))
            .collect::<Vec<_>>();
        assert_eq!(lookups.len(), 2, "lookups are never cached");
        assert!(lookups[0].contains("/RY.TO?modules=assetProfile,price,"));
        assert!(lookups[0].ends_with("&crumb=Zx9crumb"));
    }

    #[tokio::test]
    async fn providers_sharing_a_session_handshake_once() {
        let client = Arc::new(
            handshake_client().route(QUOTE_SUMMARY_URL, HttpResponse::ok(SUMMARY_BODY)),
        );
        let session = YahooSession::new();

        for _ in 0..3 {
            let provider = YahooProvider::new(client.clone()).with_session(session.clone());
            provider.company_info(&ticker()).await.expect("lookup should succeed");
        }

        let requests = client.recorded_requests();
        let count = |prefix: &str| {
            requests
                .iter()
                .filter(|request| request.url.starts_with(prefix))
                .count()
        };
        assert_eq!(count(COOKIE_URL), 1);
        assert_eq!(count(CRUMB_URLS[0]), 1);
        assert_eq!(count(QUOTE_SUMMARY_URL), 3);
    }

    #[tokio::test]
    async fn configured_crumb_skips_handshake() {
        let client = Arc::new(
            StaticHttpClient::new().route(QUOTE_SUMMARY_URL, HttpResponse::ok(SUMMARY_BODY)),
        );
        let provider = YahooProvider::new(client.clone()).with_crumb("preset");

        provider.company_info(&ticker()).await.expect("lookup should succeed");

        let requests = client.recorded_requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].url.ends_with("&crumb=preset"));
    }

    #[tokio::test]
    async fn unknown_ticker_yields_empty_record() {
        let body = r#"{"quoteSummary":{"result":null,"error":{"code":"Not Found","description":"Quote not found for symbol: NOPE"}}}"#;
        let client = Arc::new(
            handshake_client().route(QUOTE_SUMMARY_URL, HttpResponse::with_status(404, body)),
        );
        let provider = YahooProvider::new(client);
        let nope = Ticker::parse("NOPE").expect("valid ticker");

        let info = provider.company_info(&nope).await.expect("not found is not an error");
        assert!(info.is_empty());
        assert_eq!(info.ticker, nope);
    }

    #[tokio::test]
    async fn server_error_is_upstream_failure() {
        let client = Arc::new(
            handshake_client()
                .route(QUOTE_SUMMARY_URL, HttpResponse::with_status(500, "oops")),
        );
        let provider = YahooProvider::new(client);

        let error = provider.company_info(&ticker()).await.expect_err("500 must fail");
        assert_eq!(error.kind(), ProviderErrorKind::Upstream);
    }

    #[tokio::test]
    async fn transport_failure_is_unavailable() {
        let client = Arc::new(
            handshake_client().fail(QUOTE_SUMMARY_URL, NetworkError::transport("reset by peer")),
        );
        let provider = YahooProvider::new(client);

        let error = provider.company_info(&ticker()).await.expect_err("must fail");
        assert_eq!(error.kind(), ProviderErrorKind::Unavailable);
        assert!(error.message().contains("reset by peer"));
    }

    #[tokio::test]
    async fn garbage_body_is_malformed() {
        let client = Arc::new(
            handshake_client().route(QUOTE_SUMMARY_URL, HttpResponse::ok("<html></html>")),
        );
        let provider = YahooProvider::new(client);

        let error = provider.company_info(&ticker()).await.expect_err("must fail");
        assert_eq!(error.kind(), ProviderErrorKind::Malformed);
    }

    #[tokio::test]
    async fn html_crumb_fails_session() {
        let client = Arc::new(
            StaticHttpClient::new()
                .route(COOKIE_URL, HttpResponse::ok(""))
                .route(CRUMB_URLS[0], HttpResponse::ok("<!DOCTYPE html>"))
                .route(CRUMB_URLS[1], HttpResponse::with_status(401, "")),
        );
        let provider = YahooProvider::new(client);

        let error = provider.company_info(&ticker()).await.expect_err("must fail");
        assert_eq!(error.kind(), ProviderErrorKind::Session);
    }

    #[test]
    fn earlier_module_wins_on_key_clash() {
        let modules = serde_json::from_str::<Map<String, Value>>(
            r#"{
                "summaryDetail": {"marketCap": {"raw": 2}},
                "price": {"marketCap": {"raw": 1}}
            }"#,
        )
        .expect("valid json");

        let fields = flatten_modules(&modules);
        assert_eq!(fields.get("marketCap"), Some(&FieldValue::Number(1.0)));
    }
}
