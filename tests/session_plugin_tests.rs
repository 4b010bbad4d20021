//! Integration tests for the session plugin in a Bevy app
//!
//! Runs [`SessionPlugin`] under `MinimalPlugins` with an in-memory link, the
//! way the binary does, and talks to it only through frames and messages.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use memchess::core::SessionSettings;
use memchess::game::resources::GamePhase;
use memchess::game::system_sets::SessionSystems;
use memchess::game::{GameSession, LocalAction, SessionNotice, SessionPlugin};
use memchess::networking::{EventRouter, LinkStatus, RemoteEnd, SessionLink};
use serde_json::json;
use shared::WireEvent;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Notices seen by the presentation side
#[derive(Resource, Default, Debug)]
struct NoticeLog(Vec<SessionNotice>);

fn record_notices(mut notices: MessageReader<SessionNotice>, mut log: ResMut<NoticeLog>) {
    log.0.extend(notices.read().cloned());
}

fn app_with(settings: SessionSettings) -> (App, RemoteEnd) {
    let (link, remote) = SessionLink::pair();
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(SessionPlugin::new("alice", settings))
        .insert_resource(link)
        .init_resource::<NoticeLog>()
        .add_systems(Update, record_notices.after(SessionSystems::Notify));
    (app, remote)
}

fn sent_names(remote: &RemoteEnd) -> Vec<String> {
    remote.drain_sent().into_iter().map(|f| f.event).collect()
}

#[test]
fn test_plugin_registers_session() {
    //! Without a link the session still exists and nothing is pumped

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(SessionPlugin::new("alice", SessionSettings::default()));
    app.update();

    let session = app.world().resource::<GameSession>();
    assert_eq!(session.phase(), GamePhase::Waiting);
    assert_eq!(session.local_player().as_str(), "alice");
    assert!(app.world().contains_resource::<EventRouter>());
}

#[test]
fn test_inbound_frame_answered_in_same_update() {
    let (mut app, remote) = app_with(SessionSettings::default());

    remote
        .push(WireEvent::new("room_full", vec![json!("ready")]))
        .unwrap();
    app.update();

    assert_eq!(app.world().resource::<GameSession>().phase(), GamePhase::Ready);
    assert_eq!(sent_names(&remote), vec!["get_chess_board", "get_memory_board"]);
    assert_eq!(app.world().resource::<LinkStatus>().frames_in, 1);

    let log = app.world().resource::<NoticeLog>();
    assert!(log.0.iter().any(|n| matches!(
        n,
        SessionNotice::PhaseChanged {
            to: GamePhase::Ready,
            ..
        }
    )));
}

#[test]
fn test_local_move_action_reaches_link() {
    let (mut app, remote) = app_with(SessionSettings::default());
    remote
        .push(WireEvent::new("room_full", vec![json!("ready")]))
        .unwrap();
    remote.push(WireEvent::new("turn", vec![json!("alice")])).unwrap();
    app.update();
    remote.drain_sent();

    app.world_mut().write_message(LocalAction::Move {
        from: "e2".to_string(),
        to: "e4".to_string(),
        promotion: None,
    });
    app.update();

    let sent = remote.drain_sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].event, "move_piece");
    assert_eq!(sent[0].args[0]["from"], "e2");
    assert_eq!(sent[0].args[0]["to"], "e4");
    assert!(app.world().resource::<GameSession>().move_in_flight());

    remote
        .push(WireEvent::new("illegal_move", vec![json!({"from": "e2", "to": "e4"})]))
        .unwrap();
    app.update();

    let session = app.world().resource::<GameSession>();
    assert!(!session.move_in_flight());
    assert!(session.can_move());
}

#[test]
fn test_router_observer_runs_inside_app() {
    let (mut app, remote) = app_with(SessionSettings::default());
    let seen = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&seen);
    app.world_mut()
        .resource_mut::<EventRouter>()
        .subscribe("select_piece", move |_, session| {
            sink.lock().unwrap().push(session.selection().to_string());
        })
        .unwrap();

    for frame in [
        WireEvent::new("room_full", vec![json!("Playing")]),
        WireEvent::new("turn", vec![json!("alice")]),
        WireEvent::new("select_piece", vec![json!("x")]),
    ] {
        remote.push(frame).unwrap();
    }
    app.update();

    assert_eq!(*seen.lock().unwrap(), vec!["any piece but a king".to_string()]);
}

#[test]
fn test_clock_ticks_report_single_timeout() {
    //! With a short tick and manually stepped time, the local clock runs out
    //! and exactly one timeout frame is sent

    let settings = SessionSettings {
        tick_seconds: 0.1,
        ..Default::default()
    };
    let (mut app, remote) = app_with(settings);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)));

    let player = |id: &str| json!({"id": id, "name": id, "chess_color": "", "connected": true});
    for frame in [
        WireEvent::new("room_joined", vec![json!("room-7"), json!("timed")]),
        WireEvent::new(
            "player_info",
            vec![json!({"player1": player("alice"), "player2": player("bob")})],
        ),
        WireEvent::new("room_full", vec![json!("ready")]),
        WireEvent::new("turn", vec![json!("alice"), json!([2, 50])]),
    ] {
        remote.push(frame).unwrap();
    }

    for _ in 0..20 {
        app.update();
    }

    let timeouts = sent_names(&remote)
        .into_iter()
        .filter(|name| name == "timeout")
        .count();
    assert_eq!(timeouts, 1);

    let session = app.world().resource::<GameSession>();
    assert_eq!(session.clocks()[0], 0);
    assert_eq!(session.clocks()[1], 50, "Opponent clock does not run on our turn");
    assert!(app
        .world()
        .resource::<NoticeLog>()
        .0
        .contains(&SessionNotice::TimeoutReported));
}
