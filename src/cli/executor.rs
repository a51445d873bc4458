//! Command executor for dispatching CLI commands
//!
//! This module provides the main entry point for executing CLI commands
//! after parsing and configuration loading.

use std::sync::Arc;

use super::handlers::{
    BrowseCommandHandler, CheckCommandHandler, ListCommandHandler, MutateCommandHandler,
};
use super::parser::{Cli, Commands};
use crate::config::Environment;
use crate::config::settings::Settings;
use crate::error::AppResult;
use crate::services::{AutoConfirm, Confirmer, PromptConfirmer, Services};

/// Execute a CLI command with the given settings
///
/// Builds the services the command needs and dispatches to its handler.
/// Rendered output goes to stdout; logs and notifications go to stderr.
///
/// # Errors
/// Returns errors from command handlers or service construction
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    let mut out = std::io::stdout();

    match &cli.command {
        Commands::Check => {
            let environment = cli
                .env
                .or_else(|| Environment::from_env().ok())
                .unwrap_or_default();
            CheckCommandHandler::new(settings, environment).execute(&mut out)
        }
        Commands::List { kind, page, paging } => {
            let services = Services::from_settings(&settings, Arc::new(AutoConfirm))?;
            ListCommandHandler::new(services, settings.pagination)
                .execute(*kind, *page, paging, &mut out)
                .await
        }
        Commands::Browse { kind, paging } => {
            let services = Services::from_settings(&settings, Arc::new(PromptConfirmer))?;
            BrowseCommandHandler::new(services, settings.pagination)
                .execute(*kind, paging, &mut out)
                .await
        }
        Commands::Create { kind, data } => {
            let services = Services::from_settings(&settings, Arc::new(AutoConfirm))?;
            MutateCommandHandler::new(services)
                .create(*kind, data, &mut out)
                .await
        }
        Commands::Update { kind, id, data } => {
            let services = Services::from_settings(&settings, Arc::new(AutoConfirm))?;
            MutateCommandHandler::new(services)
                .update(*kind, id, data, &mut out)
                .await
        }
        Commands::Delete { kind, id, yes } => {
            let confirmer: Arc<dyn Confirmer> = if *yes {
                Arc::new(AutoConfirm)
            } else {
                Arc::new(PromptConfirmer)
            };
            let services = Services::from_settings(&settings, confirmer)?;
            MutateCommandHandler::new(services)
                .delete(*kind, id, &mut out)
                .await
        }
    }
}
