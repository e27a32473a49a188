//! Check-in integration tests
//!
//! Drives whole sessions through the public API with real scan sources
//! (replay files, line readers, fixtures) on paused tokio time.

mod common;

use common::*;
use raffle_admin::checkin::{CheckinSession, FeedbackState, SessionConfig, SessionHandle};
use raffle_admin::remote::api::AttendanceMarkRequest;
use raffle_admin::scanner::{DecodeSource, FixtureSource, LineSource};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

fn guests() -> MemoryService {
    MemoryService::new(vec![user(42, "Jane"), user(43, "Omar"), user(44, "Ngozi")])
}

fn open(service: &MemoryService) -> (SessionHandle, FrameRecorder) {
    let recorder = FrameRecorder::default();
    let handle = CheckinSession::open(
        SessionConfig::new(EVENT_ID),
        Arc::new(service.clone()),
        Box::new(recorder.clone()),
    );
    (handle, recorder)
}

fn mark(user_id: i64) -> AttendanceMarkRequest {
    AttendanceMarkRequest {
        event_id: EVENT_ID,
        user_id,
    }
}

#[tokio::test(start_paused = true)]
async fn test_replayed_door_queue() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# doors open").unwrap();
    writeln!(file, "42").unwrap();
    writeln!(file, "42").unwrap();
    writeln!(file, "abc").unwrap();
    writeln!(file, "43").unwrap();
    let mut source = FixtureSource::from_replay_file(file.path(), Duration::from_millis(300))
        .await
        .unwrap();
    assert_eq!(source.frames().len(), 4);

    let service = guests();
    let (handle, recorder) = open(&service);
    let origin = Instant::now();

    source.on_decode(handle.decode_callback()).await.unwrap();
    let summary = handle.drain().await.unwrap();

    assert_eq!(
        recorder.feedback(),
        vec![
            FeedbackState::None,
            processing(),
            marked("Jane"),
            failed("Invalid QR Code"),
            processing(),
            marked("Omar"),
            FeedbackState::None,
        ]
    );
    assert_eq!(
        recorder.first_shown(&marked("Jane"), origin),
        Some(Duration::from_millis(400))
    );
    assert_eq!(
        recorder.first_shown(&failed("Invalid QR Code"), origin),
        Some(Duration::from_millis(900))
    );
    assert_eq!(service.marks(), vec![mark(42), mark(43)]);

    assert_eq!(summary.accepted, 3);
    assert_eq!(summary.marked, 2);
    assert_eq!(summary.invalid, 1);
    assert_eq!(summary.ignored, 1);
    assert_eq!(summary.present_count, Some(2));
    assert_eq!(recorder.closed_with(), Some(summary));
}

#[tokio::test(start_paused = true)]
async fn test_rejected_guest_does_not_block_the_next() {
    let service = guests().rejecting(44);
    let (handle, recorder) = open(&service);
    let mut source = FixtureSource::from_codes(&["44", "42"], Duration::from_millis(300));

    source.on_decode(handle.decode_callback()).await.unwrap();
    let summary = handle.drain().await.unwrap();

    assert_eq!(
        recorder.feedback(),
        vec![
            FeedbackState::None,
            processing(),
            failed("Failed to mark attendance"),
            processing(),
            marked("Jane"),
            FeedbackState::None,
        ]
    );
    assert_eq!(service.marks(), vec![mark(44), mark(42)]);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.marked, 1);
    assert_eq!(summary.present_count, Some(1));
}

#[tokio::test(start_paused = true)]
async fn test_keyboard_wedge_burst() {
    let service = guests();
    let (handle, recorder) = open(&service);
    let mut source = LineSource::new(&b"42\n\n42\n42\n"[..], "wedge");

    source.on_decode(handle.decode_callback()).await.unwrap();
    let summary = handle.drain().await.unwrap();

    assert_eq!(service.marks(), vec![mark(42)]);
    assert_eq!(summary.accepted, 1);
    assert_eq!(summary.ignored, 3);
    assert_eq!(recorder.feedback().last(), Some(&FeedbackState::None));
}

#[tokio::test(start_paused = true)]
async fn test_badge_left_in_view_is_marked_again_after_reset() {
    let service = guests();
    let (handle, _recorder) = open(&service);
    // 60 frames at 33ms outlast one full success cycle (100ms + 1200ms)
    let mut source = FixtureSource::held_in_view("42", 60, Duration::from_millis(33));

    source.on_decode(handle.decode_callback()).await.unwrap();
    let summary = handle.drain().await.unwrap();

    assert_eq!(service.marks(), vec![mark(42), mark(42)]);
    assert_eq!(summary.accepted, 2);
    assert_eq!(summary.ignored, 58);
}

#[tokio::test(start_paused = true)]
async fn test_interrupt_discards_outstanding_answer() {
    let service = guests();
    let (handle, recorder) = open(&service);

    handle.submit(Some("42".to_string())).await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    let summary = handle.close().await.unwrap();
    tokio::time::sleep(Duration::from_secs(5)).await;

    assert_eq!(service.marks(), vec![mark(42)]);
    assert_eq!(recorder.feedback(), vec![FeedbackState::None, processing()]);
    assert_eq!(summary.accepted, 1);
    assert_eq!(summary.marked, 0);
    assert_eq!(recorder.closed_with(), Some(summary));
}

#[tokio::test(start_paused = true)]
async fn test_noisy_reader_lines() {
    let service = guests();
    let (handle, recorder) = open(&service);
    let mut source = LineSource::new(&b"   \n42abc\n"[..], "wedge");

    source.on_decode(handle.decode_callback()).await.unwrap();
    let summary = handle.drain().await.unwrap();

    assert_eq!(
        recorder.feedback(),
        vec![
            FeedbackState::None,
            failed("Invalid QR Code"),
            processing(),
            marked("Jane"),
            FeedbackState::None,
        ]
    );
    assert_eq!(service.marks(), vec![mark(42)]);
    assert_eq!(summary.invalid, 1);
    assert_eq!(summary.marked, 1);
}
