use serde::Serialize;
use tsxdesk_core::{
    fetch_company_info, screen_etf, EtfReport, EtfVerdict, MarketDataProvider, Ticker,
};

use super::CommandOutput;
use crate::cli::TickerArgs;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct EtfResponseData<'a> {
    symbol: &'a Ticker,
    report: &'a EtfReport,
    screen: &'a EtfVerdict,
}

pub async fn run(
    args: &TickerArgs,
    provider: &dyn MarketDataProvider,
) -> Result<CommandOutput, CliError> {
    let ticker = Ticker::parse(&args.ticker)?;
    let info = fetch_company_info(provider, &ticker).await?;

    let report = EtfReport::from_info(&info);
    let verdict = screen_etf(&info);
    let data = serde_json::to_value(EtfResponseData {
        symbol: &ticker,
        report: &report,
        screen: &verdict,
    })?;

    Ok(CommandOutput {
        data,
        text: format!("{report}\n{verdict}\n"),
    })
}
