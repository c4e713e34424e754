mod etf;
mod export;
mod info;
mod symbols;

use std::sync::Arc;

use serde_json::Value;
use tsxdesk_core::{HttpClient, MarketDataProvider, Settings, YahooProvider};

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// What a command produced: JSON data plus its plain-text rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutput {
    pub data: Value,
    pub text: String,
}

/// Shared services for one CLI invocation.
pub struct Context {
    pub settings: Settings,
    pub http_client: Arc<dyn HttpClient>,
}

impl Context {
    pub fn new(settings: Settings, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            settings,
            http_client,
        }
    }

    fn provider(&self) -> Arc<dyn MarketDataProvider> {
        Arc::new(YahooProvider::from_settings(
            Arc::clone(&self.http_client),
            &self.settings,
        ))
    }
}

pub async fn run(cli: &Cli, context: &Context) -> Result<CommandOutput, CliError> {
    match &cli.command {
        Command::Symbols => symbols::run(context).await,
        Command::Info(args) => info::run(args, context.provider().as_ref()).await,
        Command::Etf(args) => etf::run(args, context.provider().as_ref()).await,
        Command::Export(args) => export::run(args, context).await,
    }
}
