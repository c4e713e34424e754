use std::collections::BTreeMap;

use axum::extract::{FromRequest, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tsxdesk_core::{fetch_company_info, CompanyReport, FieldValue, Ticker, ValidationError};

use crate::state::AppState;

pub const MISSING_SYMBOL: &str = "Please provide a stock symbol";
pub const INVALID_METHOD: &str = "Invalid request method";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/analyze", post(analyze).fallback(invalid_method))
        .route("/export", post(export).fallback(invalid_method))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
struct SymbolInput {
    #[serde(default)]
    symbol: String,
}

#[derive(Debug, Serialize)]
struct AnalyzeResponse<'a> {
    success: bool,
    symbol: &'a Ticker,
    info: &'a BTreeMap<String, FieldValue>,
    report: &'a CompanyReport,
}

#[derive(Debug, Serialize)]
struct ExportResponse {
    success: bool,
    filename: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

fn failure(error: impl ToString) -> Response {
    Json(ErrorResponse {
        success: false,
        error: error.to_string(),
    })
    .into_response()
}

/// Read `symbol` from a JSON or url-encoded body.
async fn read_symbol(request: Request) -> Result<String, String> {
    let is_json = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"));

    let input = if is_json {
        Json::<SymbolInput>::from_request(request, &())
            .await
            .map(|Json(input)| input)
            .map_err(|rejection| rejection.body_text())?
    } else {
        Form::<SymbolInput>::from_request(request, &())
            .await
            .map(|Form(input)| input)
            .map_err(|rejection| rejection.body_text())?
    };

    Ok(input.symbol)
}

async fn analyze(State(state): State<AppState>, request: Request) -> Response {
    let raw = match read_symbol(request).await {
        Ok(raw) => raw,
        Err(error) => return failure(error),
    };

    let ticker = match Ticker::parse(&raw) {
        Ok(ticker) => ticker,
        Err(ValidationError::EmptyTicker) => return failure(MISSING_SYMBOL),
        Err(error) => return failure(error),
    };

    let provider = state.provider();
    match fetch_company_info(provider.as_ref(), &ticker).await {
        Ok(info) => {
            let report = CompanyReport::from_info(&info);
            Json(AnalyzeResponse {
                success: true,
                symbol: &ticker,
                info: &info.fields,
                report: &report,
            })
            .into_response()
        }
        Err(error) => {
            tracing::warn!(%ticker, %error, "company lookup failed");
            failure(error)
        }
    }
}

async fn export(State(state): State<AppState>) -> Response {
    match state.exporter().export_all_symbols().await {
        Ok(path) => Json(ExportResponse {
            success: true,
            filename: path.display().to_string(),
        })
        .into_response(),
        Err(error) => {
            tracing::warn!(%error, "symbol export failed");
            failure(error)
        }
    }
}

async fn invalid_method() -> Response {
    failure(INVALID_METHOD)
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
