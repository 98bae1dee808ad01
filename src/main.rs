use clap::Parser;
use notify_rs::cli::{self, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let settings = match cli::load_and_merge_config(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(2);
        }
    };

    if let Err(e) = cli::init_logger_from_settings(&settings) {
        eprintln!("Logger error: {e}");
        std::process::exit(2);
    }

    if let Err(e) = cli::execute_command(&cli, settings).await {
        tracing::error!(error = %e, "command failed");
        std::process::exit(1);
    }
}
