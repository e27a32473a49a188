//! CLI argument parsing tests

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use raffle_admin::app::cli::args::*;
use serial_test::serial;

#[test]
fn test_command_definition_is_consistent() {
    Args::command().debug_assert();
}

#[test]
#[serial]
fn test_subcommand_is_required() {
    assert!(Args::try_parse_from(["raffle-admin"]).is_err());
}

#[test]
#[serial]
fn test_version_flag() {
    let err = Args::try_parse_from(["raffle-admin", "--version"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DisplayVersion);
}

#[test]
#[serial]
fn test_event_ids_must_be_numeric() {
    assert!(Args::try_parse_from(["raffle-admin", "checkin", "seven"]).is_err());
    assert!(Args::try_parse_from(["raffle-admin", "events", "show", "7"]).is_ok());
}

#[test]
#[serial]
fn test_delete_confirmation_can_be_skipped() {
    let args = Args::try_parse_from(["raffle-admin", "events", "delete", "7", "--yes"]).unwrap();
    assert!(matches!(
        args.command,
        Command::Events {
            action: EventsCommand::Delete { id: 7, yes: true }
        }
    ));

    let args = Args::try_parse_from(["raffle-admin", "gifts", "delete", "7", "12"]).unwrap();
    assert!(matches!(
        args.command,
        Command::Gifts {
            action: GiftsCommand::Delete {
                event: 7,
                gift: 12,
                yes: false
            }
        }
    ));
}

#[test]
#[serial]
fn test_api_url_from_environment() {
    std::env::set_var("RAFFLE_API_URL", "http://localhost:4000/api/");
    let result = Args::try_parse_from(["raffle-admin", "users", "list"]);
    std::env::remove_var("RAFFLE_API_URL");

    let args = result.unwrap();
    assert_eq!(args.api_url.as_deref(), Some("http://localhost:4000/api"));
}

#[test]
#[serial]
fn test_events_list_search() {
    let args = Args::try_parse_from(["raffle-admin", "events", "list", "-s", "party"]).unwrap();
    match args.command {
        Command::Events {
            action: EventsCommand::List { search },
        } => assert_eq!(search.as_deref(), Some("party")),
        other => panic!("unexpected command {other:?}"),
    }
}
