//! CLI TOML configuration tests
//!
//! Config files written to disk, loaded and merged under flags and environment.

use clap::Parser;
use raffle_admin::app::cli::args::Args;
use raffle_admin::app::cli::config::{load_config_file, ConfigError, Settings};
use serial_test::serial;
use std::io::Write;
use std::time::Duration;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

async fn settings_for(argv: &[&str], config: &tempfile::NamedTempFile) -> Result<Settings, ConfigError> {
    let args = Args::try_parse_from(
        ["raffle-admin", "-c"]
            .into_iter()
            .chain(config.path().to_str())
            .chain(argv.iter().copied()),
    )
    .unwrap();
    let file = load_config_file(args.config_file.as_deref()).await?;
    Settings::resolve(&args, file)
}

#[tokio::test]
#[serial]
async fn test_environment_wins_over_file() {
    let config = write_config(
        "api_url = \"http://file.example.com\"\ntoken = \"file-token\"\n",
    );

    std::env::set_var("RAFFLE_TOKEN", "env-token");
    let result = settings_for(&["users", "list"], &config).await;
    std::env::remove_var("RAFFLE_TOKEN");

    let settings = result.unwrap();
    assert_eq!(settings.token.as_deref(), Some("env-token"));
    assert_eq!(settings.api_url.as_deref(), Some("http://file.example.com"));
}

#[tokio::test]
#[serial]
async fn test_checkin_section_sets_banner_delays() {
    let config = write_config(
        r#"
api_url = "https://raffle.example.com/api"

[checkin]
success_reset_ms = 800
error_reset_ms = 2500
invalid_reset_ms = 1500
"#,
    );

    let settings = settings_for(&["checkin", "7"], &config).await.unwrap();
    assert_eq!(settings.timings.success_reset, Duration::from_millis(800));
    assert_eq!(settings.timings.error_reset, Duration::from_millis(2500));
    assert_eq!(settings.timings.invalid_reset, Duration::from_millis(1500));
}

#[tokio::test]
#[serial]
async fn test_malformed_file_names_its_path() {
    let config = write_config("api_url = [\n");
    let err = settings_for(&["users", "list"], &config).await.unwrap_err();

    assert!(matches!(err, ConfigError::Parse { .. }));
    let path = config.path().display().to_string();
    assert!(err.to_string().contains(&path));
}

#[tokio::test]
#[serial]
async fn test_flags_override_file_logging() {
    let config = write_config("log_level = \"warn\"\nlog_format = \"json\"\ncolor = true\n");
    let settings = settings_for(
        &["users", "list", "--log-level", "trace", "--no-color"],
        &config,
    )
    .await
    .unwrap();

    assert_eq!(settings.log_level.as_deref(), Some("trace"));
    assert_eq!(settings.log_format.as_deref(), Some("json"));
    assert_eq!(settings.color, Some(false));
    assert!(matches!(
        settings.require_api_url(),
        Err(ConfigError::MissingApiUrl)
    ));
}
