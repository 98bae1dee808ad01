//! Command executor for dispatching CLI commands
//!
//! This module provides the main entry point for executing CLI commands
//! after parsing and configuration loading.

use super::handlers::{CheckCommandHandler, PostProcessCommandHandler, SendCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};

/// Execute a CLI command with the given settings
///
/// Dispatches to the appropriate command handler based on the parsed CLI
/// arguments. Without a subcommand the tool behaves as a download client
/// post-processing step.
///
/// # Arguments
/// * `cli` - Parsed CLI arguments
/// * `settings` - Merged and validated settings
///
/// # Errors
/// Returns errors from command handlers or validation failures
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    // Validate CLI arguments and configuration
    validate_command_args(cli)?;

    match &cli.command {
        Some(Commands::Send { title, body, .. }) => {
            SendCommandHandler::new(settings)
                .execute(title, body)
                .await?;
            Ok(())
        }
        Some(Commands::PostProcess) | None => {
            PostProcessCommandHandler::new(settings).execute().await?;
            Ok(())
        }
        Some(Commands::Check { .. }) => CheckCommandHandler::new(settings).execute().await,
    }
}

/// Validate command arguments before execution
fn validate_command_args(cli: &Cli) -> AppResult<()> {
    if let Some(Commands::Send { title, body, .. }) = &cli.command {
        if title.trim().is_empty() {
            return Err(AppError::Validation {
                field: "title".to_string(),
                reason: "Title cannot be empty".to_string(),
            });
        }
        if body.trim().is_empty() {
            return Err(AppError::Validation {
                field: "body".to_string(),
                reason: "Body cannot be empty".to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[tokio::test]
    async fn test_empty_title_rejected() {
        let cli = Cli::try_parse_from([
            "notify-rs",
            "send",
            "--servers",
            "growl://h",
            "--title",
            "  ",
        ])
        .unwrap();

        let result = execute_command(&cli, Settings::default()).await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }
}
