//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

// Include shadow-rs generated build information
use shadow_rs::shadow;
shadow!(build);

/// Route download notifications to push services
#[derive(Parser, Debug)]
#[command(name = "notify-rs")]
#[command(about = "Route download notifications to push services")]
#[command(long_about = "
notify-rs sends a download job's completion status to one or more push
services, each addressed by a compact URL like growl://mypass@localhost or
pover://user@token/device. Addresses are separated by whitespace or commas,
and a failure against one service never prevents delivery to the others.

EXAMPLES:
    # Send a test notification to two services
    notify-rs send --servers \"growl://mypass@localhost, json://myhost:8080\" \\
        --title \"Download Successful\" --body \"file.nzb\"

    # Validate the configured addresses without delivering anything
    notify-rs check

    # Run as a download client post-processing step (reads NZBPP_* variables)
    notify-rs post-process

    # Use a custom configuration file
    notify-rs --config /etc/notify-rs/production.toml send --servers growl://host

For more information about configuration options, see the documentation.
")]
#[command(version = build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Specify a custom configuration file to use instead of the default
    /// layered lookup. The file should be in TOML format and must exist and
    /// be readable.
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Force the application to use a specific environment configuration.
    /// This affects which configuration files are loaded.
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging
    ///
    /// Increases log output to debug level. Cannot be used with --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    ///
    /// Reduces log output to error level only. Cannot be used with --verbose.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a notification to the addressed push services
    ///
    /// Examples:
    ///   notify-rs send -s growl://localhost -t "Done" -b "file.nzb"
    ///   notify-rs send -s "pover://user@token, json://host:8080" -i
    Send {
        /// Push target addresses, e.g. growl://mypass@localhost
        ///
        /// More than one address may be given, separated by whitespace or
        /// commas. Falls back to the configured server list when omitted.
        #[arg(short, long, value_name = "URLS", env = "NOTIFY_SERVERS")]
        servers: Option<String>,

        /// Title of the notification message
        #[arg(short, long, default_value = "Test Notify Title")]
        title: String,

        /// Body of the notification message
        #[arg(short, long, default_value = "Test Notify Body")]
        body: String,

        /// Include an image with the message if the protocol supports it
        #[arg(short, long)]
        include_image: bool,
    },

    /// Run as a download client post-processing step
    ///
    /// Reads the job outcome from NZBPP_* environment variables supplied by
    /// the download client and notifies the configured server list. This is
    /// also the default when no subcommand is given.
    PostProcess,

    /// Parse and validate addresses without delivering anything
    ///
    /// Prints what would be dispatched for each address. Useful to verify a
    /// server list before wiring it into the download client.
    Check {
        /// Addresses to check instead of the configured server list
        #[arg(short, long, value_name = "URLS")]
        servers: Option<String>,
    },
}

/// Application environment selector for the --env flag
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Development environment
    #[value(alias = "dev")]
    Development,
    /// Test environment
    Test,
    /// Production environment
    #[value(alias = "prod")]
    Production,
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_send_arguments() {
        let cli = Cli::try_parse_from([
            "notify-rs",
            "send",
            "--servers",
            "growl://localhost",
            "--title",
            "Download Successful",
            "--body",
            "file.nzb",
            "--include-image",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Send {
                servers,
                title,
                body,
                include_image,
            }) => {
                assert_eq!(servers.as_deref(), Some("growl://localhost"));
                assert_eq!(title, "Download Successful");
                assert_eq!(body, "file.nzb");
                assert!(include_image);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["notify-rs", "-v", "-q", "check"]).is_err());
    }

    #[test]
    fn test_no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["notify-rs"]).unwrap();
        assert!(cli.command.is_none());
    }
}
