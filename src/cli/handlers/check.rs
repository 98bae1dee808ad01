//! Check command handler
//!
//! Parses and builds every configured target without delivering anything, a
//! dry run for the address list.

use crate::config::settings::Settings;
use crate::error::AppResult;
use crate::services::notifications::{
    DEFAULT_SCHEMA, Schema, build_provider, parse_address, split_server_list,
};

/// Handler for the check command
pub struct CheckCommandHandler {
    config: Settings,
}

impl CheckCommandHandler {
    /// Create a new check command handler
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Validate each configured address, printing one line per target.
    ///
    /// Invalid addresses are reported but never fail the command; the
    /// command mirrors the dispatcher's skip-and-continue behavior.
    pub async fn execute(&self) -> AppResult<()> {
        let addresses = split_server_list(&self.config.notify.servers);
        if addresses.is_empty() {
            println!("No addresses configured");
            return Ok(());
        }

        let mut valid = 0usize;
        for address in &addresses {
            match self.check_address(address) {
                Ok(name) => {
                    valid += 1;
                    println!("✓ {address} -> {name}");
                }
                Err(reason) => println!("✗ {address}: {reason}"),
            }
        }

        println!("{valid} of {} addresses valid", addresses.len());
        Ok(())
    }

    /// Runs one address through parse, registry check and construction
    fn check_address(&self, address: &str) -> Result<&'static str, String> {
        let descriptor = parse_address(address, DEFAULT_SCHEMA).map_err(|e| e.to_string())?;

        let schema = Schema::from_token(&descriptor.schema)
            .ok_or_else(|| format!("{} is not a supported service type", descriptor.schema))?;

        let provider = build_provider(schema, &descriptor, self.config.notify.include_image)
            .map_err(|e| e.to_string())?;

        Ok(provider.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler_with_servers(servers: &str) -> CheckCommandHandler {
        let mut config = Settings::default();
        config.notify.servers = servers.to_string();
        CheckCommandHandler::new(config)
    }

    #[test]
    fn test_valid_address_resolves_to_provider_name() {
        let handler = handler_with_servers("");
        assert_eq!(
            handler.check_address("pover://user@TOKEN/deviceA"),
            Ok("pushover")
        );
        assert_eq!(handler.check_address("kodis://host"), Ok("xbmc"));
    }

    #[test]
    fn test_invalid_addresses_report_reasons() {
        let handler = handler_with_servers("");
        assert!(handler.check_address("://nohost").is_err());
        assert!(handler.check_address("bogus://x").is_err());
        assert!(handler.check_address("pover://TOKEN").is_err());
    }

    #[tokio::test]
    async fn test_execute_never_fails_on_bad_addresses() {
        let handler = handler_with_servers("growl://host, bogus://x");
        assert!(handler.execute().await.is_ok());
    }
}
