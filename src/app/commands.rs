//! Subcommand handlers

use crate::app::cli::args::{
    AttendArgs, CheckinArgs, Command, EventsCommand, GiftsCommand, ParticipantsCommand,
    ReportArgs, UsersCommand,
};
use crate::app::cli::config::Settings;
use crate::app::cli::display;
use crate::app::error::AppResult;
use crate::app::renderer::TerminalRenderer;
use crate::checkin::{CheckinSession, SessionConfig, SessionHandle, SessionSummary};
use crate::core::shutdown::ShutdownCoordinator;
use crate::core::validation::ValidationError;
use crate::remote::api::{
    ApiClient, AttendanceMarkRequest, AttendanceService, Event, NewEvent, NewGift, UserId,
};
use crate::report::{default_filename, render, ReportError, ReportFormat, WinnerReport};
use crate::scanner::{DecodeSource, FixtureSource, LineSource};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;

/// Everything a command needs besides its own arguments
pub struct CommandContext {
    pub settings: Settings,
    pub color: bool,
}

impl CommandContext {
    fn client(&self) -> AppResult<ApiClient> {
        let url = self.settings.require_api_url()?;
        let client = ApiClient::new(url, self.settings.token.clone())?;
        client.ensure_authenticated()?;
        Ok(client)
    }
}

pub async fn run(command: Command, ctx: &CommandContext) -> AppResult<()> {
    match command {
        Command::Events { action } => events(action, ctx).await,
        Command::Gifts { action } => gifts(action, ctx).await,
        Command::Participants { action } => participants(action, ctx).await,
        Command::Users { action } => users(action, ctx).await,
        Command::Attend(args) => attend(args, ctx).await,
        Command::Checkin(args) => checkin(args, ctx).await.map(|_| ()),
        Command::Report(args) => report(args, ctx).await,
    }
}

async fn events(action: EventsCommand, ctx: &CommandContext) -> AppResult<()> {
    let client = ctx.client()?;
    match action {
        EventsCommand::List { search } => {
            let events = client.list_events().await?;
            let shown = display::filter_events(&events, search.as_deref());
            print!("{}", display::events_table(&shown, ctx.color));
        }
        EventsCommand::Create { title, date } => {
            let title = non_blank("Event title", &title)?;
            client
                .create_event(&NewEvent {
                    title: title.clone(),
                    date,
                })
                .await?;
            println!("Created event '{title}'");
        }
        EventsCommand::Delete { id, yes } => {
            if !yes && !confirm("Are you sure? This will remove all associated data.").await? {
                println!("Cancelled");
                return Ok(());
            }
            client.delete_event(id).await?;
            println!("Deleted event {id}");
        }
        EventsCommand::Show { id } => {
            let event = client.fetch_event(id).await?;
            print!(
                "{}",
                display::event_details(&event, client.base_url(), ctx.color)
            );
        }
    }
    Ok(())
}

async fn gifts(action: GiftsCommand, ctx: &CommandContext) -> AppResult<()> {
    let client = ctx.client()?;
    match action {
        GiftsCommand::Add {
            event,
            name,
            image_url,
            rank,
        } => {
            let gift = NewGift {
                name: non_blank("Prize name", &name)?,
                image_url: non_blank("Image URL", &image_url)?,
                rank,
            };
            client.add_gift(event, &gift).await?;
            println!("Added prize #{} '{}' to event {event}", gift.rank, gift.name);
        }
        GiftsCommand::Delete { event, gift, yes } => {
            if !yes && !confirm("Are you sure you want to delete this prize?").await? {
                println!("Cancelled");
                return Ok(());
            }
            client.delete_gift(event, gift).await?;
            println!("Deleted prize {gift} from event {event}");
        }
    }
    Ok(())
}

async fn participants(action: ParticipantsCommand, ctx: &CommandContext) -> AppResult<()> {
    let client = ctx.client()?;
    match action {
        ParticipantsCommand::Add { event, users } => {
            let details = client.fetch_event(event).await?;
            let to_add = new_participants(&details, &users);
            if to_add.is_empty() {
                return Err(ValidationError::new(
                    "All selected users already participate in this event",
                )
                .into());
            }
            client.add_participants(event, &to_add).await?;
            let skipped = users.len() - to_add.len();
            println!(
                "Added {} participant(s) to '{}'{}",
                to_add.len(),
                details.title,
                if skipped > 0 {
                    format!(" ({skipped} skipped)")
                } else {
                    String::new()
                }
            );
        }
    }
    Ok(())
}

/// Requested users that are not participants yet, de-duplicated in request order
pub fn new_participants(event: &Event, requested: &[UserId]) -> Vec<UserId> {
    let mut seen = BTreeSet::new();
    requested
        .iter()
        .copied()
        .filter(|id| !event.is_participant(*id) && seen.insert(*id))
        .collect()
}

async fn users(action: UsersCommand, ctx: &CommandContext) -> AppResult<()> {
    let client = ctx.client()?;
    match action {
        UsersCommand::List => {
            let users = client.list_users().await?;
            print!("{}", display::users_table(&users, ctx.color));
        }
    }
    Ok(())
}

async fn attend(args: AttendArgs, ctx: &CommandContext) -> AppResult<()> {
    if args.absent {
        return Err(ValidationError::new("Cannot unmark attendance yet.").into());
    }
    let client = ctx.client()?;
    client
        .mark_attendance(&AttendanceMarkRequest {
            event_id: args.event,
            user_id: args.user,
        })
        .await?;
    println!("Marked user {} present at event {}", args.user, args.event);
    Ok(())
}

/// Run a check-in session until the scanner runs dry or the operator interrupts
pub async fn checkin(args: CheckinArgs, ctx: &CommandContext) -> AppResult<SessionSummary> {
    let client = Arc::new(ctx.client()?);
    let event = client.fetch_event(args.event).await?;

    let source: Box<dyn DecodeSource> = match &args.replay {
        Some(path) => Box::new(
            FixtureSource::from_replay_file(path, Duration::from_millis(args.interval)).await?,
        ),
        None => Box::new(LineSource::stdin()),
    };

    println!(
        "Checking in to '{}' ({} of {} present). Reading codes from {}; Ctrl-C to stop.",
        event.title,
        event.present_count(),
        event.attendances.len(),
        source.name()
    );

    let service: Arc<dyn AttendanceService> = client;
    let config = SessionConfig::new(args.event).with_timings(ctx.settings.timings);
    let handle = CheckinSession::open(
        config,
        service,
        Box::new(TerminalRenderer::stdout(ctx.color)),
    );

    ShutdownCoordinator::guard(|shutdown_rx| drive_session(source, handle, shutdown_rx)).await
}

/// Feed the session from `source`; end of input drains, an interrupt closes
async fn drive_session(
    mut source: Box<dyn DecodeSource>,
    handle: SessionHandle,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> AppResult<SessionSummary> {
    let ended = tokio::select! {
        result = source.on_decode(handle.decode_callback()) => Some(result),
        _ = shutdown_rx.recv() => None,
    };
    match ended {
        Some(Ok(())) => {
            log::info!("Scanner input ended; finishing outstanding check-in");
            Ok(handle.drain().await?)
        }
        Some(Err(e)) => {
            handle.close().await?;
            Err(e.into())
        }
        None => {
            log::info!("Interrupted; closing check-in");
            Ok(handle.close().await?)
        }
    }
}

async fn report(args: ReportArgs, ctx: &CommandContext) -> AppResult<()> {
    let client = ctx.client()?;
    let event = client.fetch_event(args.event).await?;
    let report = WinnerReport::from_event(&event)?;

    let destination = report_destination(&event.title, args.format, args.output);
    let colored = ctx.color && destination.is_none();
    let rendered = render(&report, args.format, colored)?;

    match destination {
        None => print!("{rendered}"),
        Some(path) => {
            write_report(&path, &rendered).await?;
            println!("Saved {} report to {}", args.format, path.display());
        }
    }
    Ok(())
}

/// Where a report goes: `None` is stdout
pub fn report_destination(
    title: &str,
    format: ReportFormat,
    output: Option<PathBuf>,
) -> Option<PathBuf> {
    match (output, format) {
        (Some(path), _) => Some(path),
        (None, ReportFormat::Text) => None,
        (None, format) => Some(PathBuf::from(default_filename(title, format))),
    }
}

async fn write_report(path: &Path, contents: &str) -> Result<(), ReportError> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|source| ReportError::Write {
            path: path.display().to_string(),
            source,
        })
}

fn non_blank(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

/// Ask a yes/no question on the terminal; anything but y/yes is a no
async fn confirm(question: &str) -> AppResult<bool> {
    use std::io::Write;

    eprint!("{question} [y/N] ");
    std::io::stderr().flush()?;

    let mut answer = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut answer)
        .await?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
