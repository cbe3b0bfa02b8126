use super::*;
use crate::config::Config;
use crate::draw::{Primitive, PrimitiveKind};
use crate::input::TaggedGestureDetector;
use crate::transport::TransportState;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

// 1200x2300 makes one device unit ten surface units on both axes
fn test_config() -> Config {
    let mut config = Config::default();
    config.surface.width = 1200;
    config.surface.height = 2300;
    config
}

fn connected_session() -> (
    FusionSession,
    mpsc::UnboundedSender<SurfaceCommand>,
    mpsc::UnboundedReceiver<SurfaceCommand>,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut session = FusionSession::new(&test_config(), tx.clone(), Handle::current())
        .unwrap()
        .with_detector(Box::new(TaggedGestureDetector::new(',')));
    session.handle(SurfaceCommand::TransportState(TransportState::Connected));
    (session, tx, rx)
}

fn feed(session: &mut FusionSession, line: &str) {
    session.handle(SurfaceCommand::Batch(vec![line.to_string()]));
}

fn drain(session: &mut FusionSession, rx: &mut mpsc::UnboundedReceiver<SurfaceCommand>) {
    while let Ok(command) = rx.try_recv() {
        session.handle(command);
    }
}

fn kinds(session: &FusionSession) -> Vec<PrimitiveKind> {
    session.canvas().history.kinds().collect()
}

#[tokio::test(start_paused = true)]
async fn test_complete_stroke_becomes_vector_path() {
    let (mut session, _tx, _rx) = connected_session();
    feed(&mut session, "1,10,10,600,0,1");
    feed(&mut session, "2,10,11,600,0,1");
    feed(&mut session, "2,10,12,600,0,1");
    feed(&mut session, "3,10,12,0,0,1");

    assert_eq!(kinds(&session), vec![PrimitiveKind::Path]);
    assert!(!session.engine().stroke_active());
    assert!(!session.watchdog().is_armed());
}

#[tokio::test(start_paused = true)]
async fn test_batch_with_several_valid_samples_is_ignored() {
    let (mut session, _tx, _rx) = connected_session();
    session.handle(SurfaceCommand::Batch(vec![
        "1,10,10,600,0,1".to_string(),
        "2,10,11,600,0,1".to_string(),
    ]));

    assert!(!session.engine().stroke_active());
    assert!(!session.watchdog().is_armed());
    assert!(session.canvas().active_stroke().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_malformed_lines_do_not_disturb_fusion() {
    let (mut session, _tx, _rx) = connected_session();
    feed(&mut session, "1,10,10,600,0,1");
    feed(&mut session, "2,10,garbage,600,0,1");
    feed(&mut session, "2,10");
    feed(&mut session, "9,10,11,600,0,1");
    // One valid sample among noise still counts
    session.handle(SurfaceCommand::Batch(vec![
        "noise".to_string(),
        "2,10,11,600,0,1".to_string(),
    ]));
    feed(&mut session, "3,10,11,0,0,1");

    assert_eq!(kinds(&session), vec![PrimitiveKind::Path]);
    match session.canvas().history.iter().next().unwrap() {
        Primitive::VectorPath { points, .. } => assert_eq!(points.len(), 2),
        other => panic!("expected a vector path, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_large_jump_splits_stroke() {
    let (mut session, _tx, _rx) = connected_session();
    feed(&mut session, "1,10,10,600,0,1");
    feed(&mut session, "2,11,10,600,0,1");
    // Four device units (40 surface units) away
    feed(&mut session, "2,15,10,600,0,1");
    feed(&mut session, "3,15,10,0,0,1");

    assert_eq!(kinds(&session), vec![PrimitiveKind::Path, PrimitiveKind::Point]);
}

#[tokio::test(start_paused = true)]
async fn test_light_touch_is_ignored() {
    let (mut session, _tx, _rx) = connected_session();
    feed(&mut session, "1,10,10,100,0,1");
    assert!(!session.engine().stroke_active());
    assert!(session.canvas().active_stroke().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_watchdog_synthesizes_single_end() {
    let (mut session, _tx, mut rx) = connected_session();
    feed(&mut session, "1,10,10,600,0,1");
    feed(&mut session, "2,10,11,600,0,1");

    tokio::time::sleep(Duration::from_millis(50)).await;
    drain(&mut session, &mut rx);
    assert!(session.canvas().history.is_empty());

    tokio::time::sleep(Duration::from_millis(100)).await;
    drain(&mut session, &mut rx);
    assert_eq!(kinds(&session), vec![PrimitiveKind::Path]);
    assert!(!session.engine().stroke_active());

    // A replayed expiry is stale
    let generation = session.watchdog().generation();
    session.handle(SurfaceCommand::WatchdogExpired(generation));
    tokio::time::sleep(Duration::from_millis(500)).await;
    drain(&mut session, &mut rx);
    assert_eq!(session.canvas().history.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_real_end_cancels_watchdog() {
    let (mut session, _tx, mut rx) = connected_session();
    feed(&mut session, "1,10,10,600,0,1");
    feed(&mut session, "3,10,10,0,0,1");

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(rx.try_recv().is_err());
    assert_eq!(kinds(&session), vec![PrimitiveKind::Point]);
}

#[tokio::test(start_paused = true)]
async fn test_batches_dropped_when_not_connected() {
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut session = FusionSession::new(&test_config(), tx, Handle::current()).unwrap();
    feed(&mut session, "1,10,10,600,0,1");
    assert!(!session.engine().stroke_active());
    assert!(!session.watchdog().is_armed());
}

#[tokio::test(start_paused = true)]
async fn test_leaving_connected_closes_stroke() {
    let (mut session, _tx, _rx) = connected_session();
    feed(&mut session, "1,10,10,600,0,1");
    feed(&mut session, "2,10,11,600,0,1");

    session.handle(SurfaceCommand::TransportState(TransportState::None));
    assert_eq!(session.transport_state(), TransportState::None);
    assert_eq!(kinds(&session), vec![PrimitiveKind::Path]);
    assert!(!session.watchdog().is_armed());
}

#[tokio::test(start_paused = true)]
async fn test_gesture_records_drive_palette_and_undo() {
    let (mut session, _tx, _rx) = connected_session();
    feed(&mut session, "1,10,10,600,0,1");
    feed(&mut session, "3,10,10,0,0,1");
    feed(&mut session, "G,UP,3,0");

    assert_eq!(session.canvas().palette.index(), 1);
    assert!(session.canvas().history.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_gesture_mode_blocks_fusion() {
    let (mut session, _tx, _rx) = connected_session();
    session.handle(SurfaceCommand::ToggleGestureMode);
    assert!(session.gesture_mode());

    feed(&mut session, "1,10,10,600,0,1");
    assert!(!session.engine().stroke_active());
    assert!(!session.watchdog().is_armed());

    feed(&mut session, "G,DOWN,3,1");
    assert_eq!(session.canvas().palette.index(), 3);

    session.handle(SurfaceCommand::SetGestureMode(false));
    feed(&mut session, "1,10,10,600,0,1");
    assert!(session.engine().stroke_active());
}

#[tokio::test(start_paused = true)]
async fn test_entering_gesture_mode_closes_open_stroke() {
    let (mut session, _tx, _rx) = connected_session();
    feed(&mut session, "1,10,10,600,0,1");
    session.handle(SurfaceCommand::SetGestureMode(true));
    assert_eq!(kinds(&session), vec![PrimitiveKind::Point]);
}

#[tokio::test(start_paused = true)]
async fn test_clear_resets_canvas_and_stroke() {
    let (mut session, _tx, _rx) = connected_session();
    feed(&mut session, "1,10,10,600,0,1");
    feed(&mut session, "3,10,10,0,0,1");
    feed(&mut session, "1,20,20,600,0,1");

    session.handle(SurfaceCommand::Clear);
    assert!(session.canvas().history.is_empty());
    assert!(!session.engine().stroke_active());
    assert!(!session.watchdog().is_armed());
}

#[tokio::test(start_paused = true)]
async fn test_export_command_writes_jpeg() {
    let dir = tempfile::tempdir().unwrap();
    let (session, _tx, _rx) = connected_session();
    let mut session = session.with_export_dir(dir.path().to_path_buf());
    feed(&mut session, "1,10,10,600,0,1");
    feed(&mut session, "3,10,10,0,0,1");

    session.handle(SurfaceCommand::Export);
    assert!(dir.path().join("0.jpg").is_file());
    assert_eq!(session.exporter().next_index(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_render_shows_committed_point() {
    let (mut session, _tx, _rx) = connected_session();
    // Device (10, 10) lands on surface (100, 2200)
    feed(&mut session, "1,10,10,600,0,1");
    feed(&mut session, "3,10,10,0,0,1");

    session.render_if_needed().unwrap();
    assert!(!session.canvas().needs_redraw);
    // Default pen is black, background white
    assert_eq!(session.surface_mut().pixel(100, 2200), Some(0xFF00_0000));
    assert_eq!(session.surface_mut().pixel(600, 600), Some(0xFFFF_FFFF));
}

#[tokio::test(start_paused = true)]
async fn test_run_stops_on_shutdown_and_exports() {
    let dir = tempfile::tempdir().unwrap();
    let (session, tx, rx) = connected_session();
    let mut session = session
        .with_export_dir(dir.path().to_path_buf())
        .with_export_on_exit(true);

    tx.send(SurfaceCommand::Batch(vec!["1,10,10,600,0,1".to_string()]))
        .unwrap();
    tx.send(SurfaceCommand::Batch(vec!["2,10,11,600,0,1".to_string()]))
        .unwrap();
    tx.send(SurfaceCommand::Shutdown).unwrap();

    session.run(rx).await.unwrap();

    assert!(session.should_exit());
    assert_eq!(kinds(&session), vec![PrimitiveKind::Path]);
    assert!(dir.path().join("0.jpg").is_file());
}

#[tokio::test(start_paused = true)]
async fn test_replayed_recording_draws_one_stroke() {
    use crate::transport::{Framing, TransportSource, spawn_reader};
    use std::io::Cursor;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut session = FusionSession::new(&test_config(), tx.clone(), Handle::current()).unwrap();
    let recording = Cursor::new(
        b"1,10,10,600,0,1\n2,10,11,600,0,1\n2,10,12,600,0,1\n3,10,12,0,0,1\n".to_vec(),
    );
    spawn_reader(TransportSource::new(Box::new(recording), Framing::PerLine), tx)
        .unwrap()
        .join()
        .unwrap();

    drain(&mut session, &mut rx);

    assert_eq!(session.canvas().history.len(), 1);
    assert_eq!(kinds(&session), vec![PrimitiveKind::Path]);
    assert!(session.should_exit());
}
