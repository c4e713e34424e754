use serde::Serialize;
use tsxdesk_core::{fetch_company_info, CompanyInfo, CompanyReport, MarketDataProvider, Ticker};

use super::CommandOutput;
use crate::cli::TickerArgs;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct InfoResponseData<'a> {
    symbol: &'a Ticker,
    info: &'a CompanyInfo,
    report: &'a CompanyReport,
}

pub async fn run(
    args: &TickerArgs,
    provider: &dyn MarketDataProvider,
) -> Result<CommandOutput, CliError> {
    let ticker = Ticker::parse(&args.ticker)?;
    let info = fetch_company_info(provider, &ticker).await?;
    if info.is_empty() {
        tracing::warn!(%ticker, "provider returned no fields");
    }

    let report = CompanyReport::from_info(&info);
    let data = serde_json::to_value(InfoResponseData {
        symbol: &ticker,
        info: &info,
        report: &report,
    })?;

    Ok(CommandOutput {
        data,
        text: report.to_string(),
    })
}
