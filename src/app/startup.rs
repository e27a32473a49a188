//! Process startup: arguments, configuration, logging, dispatch

use crate::app::cli::args::Args;
use crate::app::cli::config::{load_config_file, Settings};
use crate::app::commands::{self, CommandContext};
use crate::core::error_handling::log_error_with_context;
use crate::core::logging::init_logging;
use crate::core::styles::palette_to_clap;
use clap::{CommandFactory, FromArgMatches};
use std::io::IsTerminal;

/// Run the application and return the process exit status
pub async fn startup() -> i32 {
    let tty = std::io::stdout().is_terminal();
    let matches = Args::command().styles(palette_to_clap(tty)).get_matches();
    let args = match Args::from_arg_matches(&matches) {
        Ok(args) => args,
        Err(e) => e.exit(),
    };

    // Logging is configured from the resolved settings, so a bad config file
    // is reported after falling back to command-line settings
    let (settings, config_error) = match load_config_file(args.config_file.as_deref())
        .await
        .and_then(|file| Settings::resolve(&args, file))
    {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::from_args(&args), Some(e)),
    };

    let color = settings.color.unwrap_or(tty);
    colored::control::set_override(color);

    if let Err(e) = init_logging(
        settings.log_level.as_deref(),
        settings.log_format.as_deref(),
        settings.log_file.as_deref(),
        color,
    ) {
        eprintln!("Error: failed to initialise logging: {e}");
        return 1;
    }

    if let Some(e) = config_error {
        log_error_with_context(&e, "Failed to load configuration");
        return 1;
    }

    log::info!("raffle-admin {} starting", env!("CARGO_PKG_VERSION"));
    log::debug!("Settings: api_url={:?} timings={:?}", settings.api_url, settings.timings);

    let ctx = CommandContext { settings, color };
    match commands::run(args.command, &ctx).await {
        Ok(()) => 0,
        Err(e) => {
            log_error_with_context(&e, "Command failed");
            1
        }
    }
}
