use serde::Serialize;
use tsxdesk_core::{SymbolDirectory, Ticker};

use super::{CommandOutput, Context};
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct SymbolsResponseData<'a> {
    count: usize,
    symbols: &'a [Ticker],
}

pub async fn run(context: &Context) -> Result<CommandOutput, CliError> {
    let directory = SymbolDirectory::from_settings(context.http_client.clone(), &context.settings);
    let symbols = directory.fetch_symbols().await?;

    let data = serde_json::to_value(SymbolsResponseData {
        count: symbols.len(),
        symbols: &symbols,
    })?;
    let text = symbols
        .iter()
        .map(|symbol| format!("{symbol}\n"))
        .collect::<String>();

    Ok(CommandOutput { data, text })
}
