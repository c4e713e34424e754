use serde::Serialize;
use tsxdesk_core::SymbolExporter;

use super::{CommandOutput, Context};
use crate::cli::ExportArgs;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct ExportResponseData {
    filename: String,
}

pub async fn run(args: &ExportArgs, context: &Context) -> Result<CommandOutput, CliError> {
    let settings = match &args.dir {
        Some(dir) => context.settings.clone().with_export_dir(dir),
        None => context.settings.clone(),
    };
    let exporter = SymbolExporter::from_settings(context.http_client.clone(), &settings);

    let path = exporter.export_all_symbols().await?;
    let filename = path.display().to_string();

    Ok(CommandOutput {
        data: serde_json::to_value(ExportResponseData {
            filename: filename.clone(),
        })?,
        text: format!("Exported symbols to {filename}\n"),
    })
}
