//! Configuration merger for CLI arguments and config files
//!
//! This module handles merging CLI argument overrides with file-based
//! configuration, implementing the configuration precedence logic.

use std::path::PathBuf;

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, settings::Settings};

/// Configuration merger that handles CLI argument integration with
/// file-based configuration
///
/// CLI arguments override configuration file values.
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    /// Create a new configuration merger with base configuration
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Create a configuration merger by loading configuration from the
    /// specified path or the default layered loader
    ///
    /// # Arguments
    /// * `config_path` - Optional path to a single configuration file
    /// * `environment` - Optional environment override from the --env flag
    ///
    /// # Errors
    /// Returns ConfigError if configuration loading or validation fails
    pub fn from_config_path(
        config_path: Option<&PathBuf>,
        environment: Option<crate::config::Environment>,
    ) -> Result<Self, ConfigError> {
        let config = if let Some(path) = config_path {
            ConfigLoader::from_file(path).load()?
        } else {
            let loader = match environment {
                Some(environment) => ConfigLoader::with_environment(environment)?,
                None => ConfigLoader::new()?,
            };
            loader.load()?
        };

        Ok(Self::new(config))
    }

    /// Merge CLI arguments with the base configuration
    ///
    /// # Arguments
    /// * `cli` - Parsed CLI arguments
    ///
    /// # Returns
    /// A new Settings instance with CLI overrides applied
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        // Apply global CLI overrides
        self.apply_global_overrides(&mut config, cli);

        // Apply command-specific overrides
        if let Some(ref command) = cli.command {
            self.apply_command_overrides(&mut config, command);
        }

        // Validate the merged configuration
        config.validate()?;

        Ok(config)
    }

    /// Apply global CLI argument overrides
    fn apply_global_overrides(&self, config: &mut Settings, cli: &Cli) {
        // Logging level overrides from global flags
        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }
    }

    /// Apply command-specific CLI argument overrides
    fn apply_command_overrides(&self, config: &mut Settings, command: &Commands) {
        match command {
            Commands::Send {
                servers,
                include_image,
                ..
            } => {
                if let Some(servers) = servers {
                    config.notify.servers = servers.clone();
                }
                if *include_image {
                    config.notify.include_image = true;
                }
            }
            Commands::Check { servers } => {
                if let Some(servers) = servers {
                    config.notify.servers = servers.clone();
                }
            }
            Commands::PostProcess => {}
        }
    }
}
