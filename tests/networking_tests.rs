//! Integration tests for the session link and event router
//!
//! Frames here are raw JSON as the server sends them, so these tests cover
//! decoding, dispatch order and observer bookkeeping together.

use memchess::core::SessionSettings;
use memchess::game::resources::GamePhase;
use memchess::game::types::PlayerId;
use memchess::game::GameSession;
use memchess::networking::{EventRouter, SessionLink, TransportError};
use serde_json::json;
use shared::{InboundEvent, OutboundEvent, ProtocolError, WireEvent};
use std::sync::{Arc, Mutex};

fn session() -> GameSession {
    GameSession::new(PlayerId::from("alice"), SessionSettings::default())
}

#[test]
fn test_dispatch_applies_frame_to_session() {
    let mut router = EventRouter::default();
    let mut session = session();

    router
        .dispatch(&mut session, &WireEvent::new("room_full", vec![json!("ready")]))
        .unwrap();
    router
        .dispatch(&mut session, &WireEvent::new("turn", vec![json!("alice")]))
        .unwrap();

    assert_eq!(session.phase(), GamePhase::Playing);
    assert!(session.holds_token());
}

#[test]
fn test_observers_see_state_after_event() {
    //! Observers run after the session has applied the event, so a turn
    //! observer already sees the new token holder

    let mut router = EventRouter::default();
    let mut session = session();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&seen);
    router
        .subscribe("turn", move |event, session| {
            if let InboundEvent::Turn { player, .. } = event {
                let holder = session.turn_holder().map(|p| p.to_string());
                sink.lock().unwrap().push((player.clone(), holder));
            }
        })
        .unwrap();

    router
        .dispatch(&mut session, &WireEvent::new("turn", vec![json!("bob"), json!([90, 80])]))
        .unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(*seen, vec![("bob".to_string(), Some("bob".to_string()))]);
}

#[test]
fn test_unsubscribe_stops_delivery() {
    let mut router = EventRouter::default();
    let mut session = session();
    let count = Arc::new(Mutex::new(0));

    let counter = Arc::clone(&count);
    let id = router
        .subscribe("clear_failed", move |_, _| *counter.lock().unwrap() += 1)
        .unwrap();
    assert_eq!(router.observer_count("clear_failed"), 1);

    let frame = WireEvent::bare("clear_failed");
    router.dispatch(&mut session, &frame).unwrap();
    assert!(router.unsubscribe(id));
    assert!(!router.unsubscribe(id), "Second unsubscribe finds nothing");
    router.dispatch(&mut session, &frame).unwrap();

    assert_eq!(*count.lock().unwrap(), 1);
    assert_eq!(router.observer_count("clear_failed"), 0);
}

#[test]
fn test_subscribe_rejects_unknown_event() {
    let mut router = EventRouter::default();
    assert_eq!(
        router.subscribe("teleport", |_, _| {}).err(),
        Some(ProtocolError::UnknownEvent("teleport".to_string()))
    );
}

#[test]
fn test_bad_frames_change_nothing() {
    let mut router = EventRouter::default();
    let mut session = session();

    assert!(router
        .dispatch(&mut session, &WireEvent::new("memory_board", vec![json!(["wp", "WP"])]))
        .is_err());
    assert!(router.dispatch(&mut session, &WireEvent::bare("turn")).is_err());
    assert!(router.dispatch(&mut session, &WireEvent::bare("castle_now")).is_err());

    assert_eq!(session.phase(), GamePhase::Waiting);
    assert!(session.tiles().iter().all(|t| t.value.is_removed()));
    assert!(session.pending_outbound().is_empty());
}

#[test]
fn test_memory_board_joined_string() {
    let mut router = EventRouter::default();
    let mut session = session();
    let joined = vec!["bq"; 64].join(",");

    router
        .dispatch(&mut session, &WireEvent::new("memory_board", vec![json!({ "board": joined })]))
        .unwrap();

    assert!(session.tiles().iter().all(|t| t.value.as_str() == "bq" && !t.face_up));
}

#[test]
fn test_link_carries_frames_both_ways() {
    let (link, remote) = SessionLink::pair();

    remote.push(WireEvent::bare("game_reset")).unwrap();
    remote.push(WireEvent::bare("clear_failed")).unwrap();
    let received = link.receive_all().unwrap();
    assert_eq!(
        received.iter().map(|f| f.event.as_str()).collect::<Vec<_>>(),
        vec!["game_reset", "clear_failed"],
        "Arrival order is kept"
    );

    link.send(&OutboundEvent::FlipTile { index: 7 }).unwrap();
    let sent = remote.drain_sent();
    assert_eq!(sent, vec![OutboundEvent::FlipTile { index: 7 }.to_wire()]);
}

#[test]
fn test_link_reports_closed_transport() {
    let (link, remote) = SessionLink::pair();
    drop(remote);

    assert!(matches!(link.receive_all(), Err(TransportError::Closed)));
    assert!(matches!(
        link.send(&OutboundEvent::MatchTiles),
        Err(TransportError::Closed)
    ));
}
