//! Check-in session driver
//!
//! One spawned task owns the controller, the outstanding mark request and the
//! pending reset timer, and services scans, completions and timer expiry from
//! a single `select!` loop. Tearing the task down drops the request future and
//! the timer with it, so nothing can touch a closed session.

use crate::checkin::controller::{
    CheckinController, CheckinTimings, MarkOutcome, ScanOutcome,
};
use crate::checkin::directory::ParticipantDirectory;
use crate::checkin::error::{CheckinError, CheckinResult};
use crate::checkin::feedback::ControllerState;
use crate::core::error_handling::describe_error;
use crate::remote::api::{ApiError, AttendanceMarkRequest, AttendanceService, Event, EventId};
use crate::scanner::DecodeCallback;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::Sleep;

/// Frames buffered between the scanner and the session; extra frames are dropped
const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// The UI side of a session: draws the overlay for every state change
pub trait FeedbackRenderer: Send {
    fn render(&mut self, state: &ControllerState);

    /// Called once when the session ends, however it ends
    fn session_closed(&mut self, _summary: &SessionSummary) {}
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub event_id: EventId,
    pub timings: CheckinTimings,
    pub channel_capacity: usize,
}

impl SessionConfig {
    pub fn new(event_id: EventId) -> Self {
        Self {
            event_id,
            timings: CheckinTimings::default(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    pub fn with_timings(mut self, timings: CheckinTimings) -> Self {
        self.timings = timings;
        self
    }
}

/// Counters reported when a session ends
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Scans that passed the guards
    pub accepted: usize,
    pub marked: usize,
    pub failed: usize,
    pub invalid: usize,
    pub ignored: usize,
    /// Present participants according to the last refresh
    pub present_count: Option<usize>,
}

enum SessionCommand {
    Scan(Option<String>),
    Drain,
}

/// What the in-flight request produced
enum RemoteOutcome {
    Marked {
        request: AttendanceMarkRequest,
        refreshed: Option<Event>,
    },
    Failed(ApiError),
}

/// Owner's side of a running session
pub struct SessionHandle {
    commands: mpsc::Sender<SessionCommand>,
    close_tx: oneshot::Sender<()>,
    task: JoinHandle<SessionSummary>,
}

impl SessionHandle {
    /// Feed one decoded payload, waiting for buffer space if needed
    pub async fn submit(&self, raw: Option<String>) -> CheckinResult<()> {
        self.commands
            .send(SessionCommand::Scan(raw))
            .await
            .map_err(|_| CheckinError::SessionClosed)
    }

    /// Callback for a `DecodeSource`; frames arriving faster than the session
    /// drains them are dropped rather than queued
    pub fn decode_callback(&self) -> DecodeCallback {
        let commands = self.commands.clone();
        Box::new(move |raw| {
            if let Err(e) = commands.try_send(SessionCommand::Scan(raw)) {
                log::trace!("Check-in: dropping scan frame: {e}");
            }
        })
    }

    /// Stop accepting scans, let the outstanding request and the banner
    /// timer finish, then end the session
    pub async fn drain(self) -> CheckinResult<SessionSummary> {
        let SessionHandle {
            commands,
            close_tx,
            task,
        } = self;
        commands
            .send(SessionCommand::Drain)
            .await
            .map_err(|_| CheckinError::SessionClosed)?;
        let summary = join_session(task).await;
        drop(close_tx);
        summary
    }

    /// Tear the session down now; a pending timer or late remote answer is discarded
    pub async fn close(self) -> CheckinResult<SessionSummary> {
        // The task may already have ended on its own
        let _ = self.close_tx.send(());
        join_session(self.task).await
    }
}

async fn join_session(task: JoinHandle<SessionSummary>) -> CheckinResult<SessionSummary> {
    task.await.map_err(|e| CheckinError::SessionAborted {
        reason: e.to_string(),
    })
}

pub struct CheckinSession {
    controller: CheckinController,
    service: Arc<dyn AttendanceService>,
    renderer: Box<dyn FeedbackRenderer>,
    directory: ParticipantDirectory,
    summary: SessionSummary,
}

impl CheckinSession {
    /// Open a session and spawn its task on the current runtime
    pub fn open(
        config: SessionConfig,
        service: Arc<dyn AttendanceService>,
        renderer: Box<dyn FeedbackRenderer>,
    ) -> SessionHandle {
        let (commands, command_rx) = mpsc::channel(config.channel_capacity.max(1));
        let (close_tx, close_rx) = oneshot::channel();

        let session = CheckinSession {
            controller: CheckinController::new(config.event_id, config.timings),
            service,
            renderer,
            directory: ParticipantDirectory::default(),
            summary: SessionSummary::default(),
        };

        log::info!("Opening check-in session for event {}", config.event_id);
        let task = tokio::spawn(session.run(command_rx, close_rx));

        SessionHandle {
            commands,
            close_tx,
            task,
        }
    }

    async fn run(
        mut self,
        mut commands: mpsc::Receiver<SessionCommand>,
        mut close_rx: oneshot::Receiver<()>,
    ) -> SessionSummary {
        tokio::select! {
            _ = self.load_directory() => {}
            _ = &mut close_rx => return self.finish(),
        }
        self.render();

        let mut in_flight: Option<BoxFuture<'static, RemoteOutcome>> = None;
        let mut reset_timer: Option<Pin<Box<Sleep>>> = None;
        let mut draining = false;

        loop {
            if draining && in_flight.is_none() && reset_timer.is_none() {
                log::debug!("Check-in: drained");
                break;
            }

            tokio::select! {
                biased;

                // Fires on close() and when the handle is dropped
                _ = &mut close_rx => {
                    log::debug!("Check-in: session closed");
                    break;
                }

                outcome = next_outcome(&mut in_flight) => {
                    in_flight = None;
                    let outcome = self.apply_remote_outcome(outcome);
                    if let Some(delay) = self.controller.complete_mark(outcome) {
                        reset_timer = Some(Box::pin(tokio::time::sleep(delay)));
                    }
                    self.render();
                }

                _ = next_reset(&mut reset_timer) => {
                    reset_timer = None;
                    self.controller.reset();
                    self.render();
                }

                command = commands.recv(), if !draining => match command {
                    Some(SessionCommand::Scan(raw)) => {
                        self.on_scan(raw, &mut in_flight, &mut reset_timer);
                    }
                    Some(SessionCommand::Drain) | None => draining = true,
                }
            }
        }

        self.finish()
    }

    fn on_scan(
        &mut self,
        raw: Option<String>,
        in_flight: &mut Option<BoxFuture<'static, RemoteOutcome>>,
        reset_timer: &mut Option<Pin<Box<Sleep>>>,
    ) {
        match self.controller.handle_scan(raw.as_deref()) {
            ScanOutcome::Ignored(reason) => {
                log::trace!("Check-in: ignored scan ({reason})");
                self.summary.ignored += 1;
            }
            ScanOutcome::Rejected { reset_after } => {
                self.summary.accepted += 1;
                self.summary.invalid += 1;
                *reset_timer = Some(Box::pin(tokio::time::sleep(reset_after)));
                self.render();
            }
            ScanOutcome::Dispatch(request) => {
                debug_assert!(in_flight.is_none());
                self.summary.accepted += 1;
                // A banner from the previous scan may still be counting down
                *reset_timer = None;
                *in_flight = Some(mark_and_refresh(self.service.clone(), request));
                self.render();
            }
        }
    }

    fn apply_remote_outcome(&mut self, outcome: RemoteOutcome) -> MarkOutcome {
        match outcome {
            RemoteOutcome::Marked { request, refreshed } => {
                self.summary.marked += 1;
                if let Some(event) = refreshed {
                    self.directory.absorb_event(&event);
                    self.summary.present_count = Some(event.present_count());
                }
                MarkOutcome::Marked {
                    display_name: self
                        .directory
                        .display_name(request.user_id)
                        .map(str::to_string),
                }
            }
            RemoteOutcome::Failed(error) => {
                self.summary.failed += 1;
                MarkOutcome::Failed {
                    reason: describe_error(&error, "Marking attendance"),
                }
            }
        }
    }

    async fn load_directory(&mut self) {
        match self.service.list_users().await {
            Ok(users) => {
                self.directory.absorb_users(&users);
                log::debug!("Check-in: loaded {} users", self.directory.len());
            }
            Err(e) => log::warn!("Check-in: could not load users, names will be generic: {e}"),
        }
    }

    fn render(&mut self) {
        self.renderer.render(self.controller.state());
    }

    fn finish(mut self) -> SessionSummary {
        log::info!(
            "Check-in session for event {} ended: {} marked, {} failed, {} invalid",
            self.controller.event_id(),
            self.summary.marked,
            self.summary.failed,
            self.summary.invalid
        );
        self.renderer.session_closed(&self.summary);
        self.summary
    }
}

/// Mark attendance once, then refresh the event on a best-effort basis
fn mark_and_refresh(
    service: Arc<dyn AttendanceService>,
    request: AttendanceMarkRequest,
) -> BoxFuture<'static, RemoteOutcome> {
    async move {
        if let Err(e) = service.mark_attendance(&request).await {
            return RemoteOutcome::Failed(e);
        }
        let refreshed = match service.fetch_event(request.event_id).await {
            Ok(event) => Some(event),
            Err(e) => {
                log::warn!(
                    "Check-in: attendance recorded but refreshing event {} failed: {e}",
                    request.event_id
                );
                None
            }
        };
        RemoteOutcome::Marked { request, refreshed }
    }
    .boxed()
}

async fn next_outcome(slot: &mut Option<BoxFuture<'static, RemoteOutcome>>) -> RemoteOutcome {
    match slot.as_mut() {
        Some(request) => request.await,
        None => std::future::pending().await,
    }
}

async fn next_reset(slot: &mut Option<Pin<Box<Sleep>>>) {
    match slot.as_mut() {
        Some(timer) => timer.await,
        None => std::future::pending().await,
    }
}
