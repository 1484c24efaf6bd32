//! Integration tests: full session flows through the public API.
//!
//! Covers the network path (real loopback server → StreamClient → session)
//! and the operator flow pause → snapshot → resume.

use chrono::{Local, TimeZone};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rtt_scope::model::{Endpoint, ScopeEvent};
use rtt_scope::source::{LinkState, SampleSource, StreamClient};
use rtt_scope::state::{ScopeSession, SessionSettings, StatusTone};
use std::collections::VecDeque;
use std::fs;
use std::io::Write;
use std::net::TcpListener;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

fn words(values: &[u32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn key(c: char) -> ScopeEvent {
    ScopeEvent::KeyPressed {
        key: KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE),
    }
}

/// Tick with the wall clock until `done` holds or the budget runs out.
fn tick_until<S: SampleSource>(
    session: &mut ScopeSession<S>,
    mut done: impl FnMut(&ScopeSession<S>) -> bool,
) -> bool {
    for _ in 0..600 {
        session.tick(Instant::now());
        if done(session) {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    false
}

#[test]
fn samples_from_server_reach_the_buffer() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let server = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let payload = words(&[11, 22, 33]);
        // Split mid-word so the second write completes the first word's tail
        stream.write_all(&payload[..6]).unwrap();
        stream.flush().unwrap();
        thread::sleep(Duration::from_millis(50));
        stream.write_all(&payload[6..]).unwrap();
        stream.flush().unwrap();
        thread::sleep(Duration::from_millis(200));
    });

    let mut client = StreamClient::new(Endpoint::new("127.0.0.1", port));
    client.connect().unwrap();
    let settings = SessionSettings {
        sample_count: 4,
        ..SessionSettings::default()
    };
    let mut session = ScopeSession::new(client, settings, Instant::now());

    let arrived = tick_until(&mut session, |s| s.buffer().values() == [0, 11, 22, 33]);
    assert!(arrived, "buffer was {:?}", session.buffer().values());
    assert_eq!(session.link_state(), LinkState::Connected);
    assert_eq!(session.source().bytes_received(), 12);

    server.join().unwrap();

    let dropped = tick_until(&mut session, |s| s.link_state() == LinkState::Disconnected);
    assert!(dropped, "peer close was not noticed");
    assert_eq!(
        session.status_line(Instant::now()).tone,
        StatusTone::Disconnected
    );
    // Data received before the drop stays on screen
    assert_eq!(session.buffer().values(), &[0, 11, 22, 33]);
}

#[test]
fn unreachable_server_reports_disconnected() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = StreamClient::new(Endpoint::new("127.0.0.1", port));
    let mut session = ScopeSession::new(client, SessionSettings::default(), Instant::now());

    let settled = tick_until(&mut session, |s| s.link_state() == LinkState::Disconnected);

    assert!(settled);
    assert!(session
        .status_line(Instant::now())
        .text
        .starts_with("Status: DISCONNECTED (Retrying...)"));
}

/// Source that hands out one scripted read per tick.
struct Script(VecDeque<Vec<u8>>, u64);

impl SampleSource for Script {
    fn receive_at(&mut self, _now: Instant) -> Option<Vec<u8>> {
        let bytes = self.0.pop_front()?;
        self.1 += bytes.len() as u64;
        Some(bytes)
    }

    fn link_state(&self) -> LinkState {
        LinkState::Connected
    }

    fn bytes_received(&self) -> u64 {
        self.1
    }

    fn close(&mut self) {}
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("rtt-scope-flow-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn pause_snapshot_resume_flow() {
    let dir = scratch_dir("pause");
    let reads = VecDeque::from(vec![words(&[1, 2, 3, 4]), words(&[5, 6]), words(&[7])]);
    let settings = SessionSettings {
        sample_count: 4,
        snapshot_dir: dir.clone(),
        ..SessionSettings::default()
    };
    let t0 = Instant::now();
    let mut session = ScopeSession::new(Script(reads, 0), settings, t0);

    session.tick(t0);
    assert_eq!(session.buffer().values(), &[1, 2, 3, 4]);

    // Freeze: new data goes to the backlog
    session.handle_event(key(' '), t0);
    session.tick(t0);
    session.tick(t0);
    assert_eq!(session.buffer().values(), &[1, 2, 3, 4]);
    assert_eq!(session.backlog_len(), 3);
    assert_eq!(session.status_line(t0).tone, StatusTone::Paused);

    // Export the frozen view
    let at = Local.with_ymd_and_hms(2025, 6, 7, 8, 9, 10).single().unwrap();
    session.snapshot(t0, at);
    let written = fs::read_to_string(dir.join("rtt_snapshot_20250607_080910.txt")).unwrap();
    assert_eq!(written, "1\n2\n3\n4\n");
    assert_eq!(
        session.status_line(t0).text,
        "Snapshot saved to rtt_snapshot_20250607_080910.txt"
    );

    // Resume: backlog replays in arrival order
    session.handle_event(key(' '), t0);
    assert!(!session.is_paused());
    assert_eq!(session.backlog_len(), 0);
    assert_eq!(session.buffer().values(), &[4, 5, 6, 7]);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn snapshot_while_live_is_refused() {
    let dir = scratch_dir("live");
    let settings = SessionSettings {
        sample_count: 4,
        snapshot_dir: dir.clone(),
        ..SessionSettings::default()
    };
    let t0 = Instant::now();
    let mut session = ScopeSession::new(Script(VecDeque::new(), 0), settings, t0);

    session.handle_event(key('d'), t0);

    assert_eq!(
        session.status_line(t0).text,
        "Snapshot is only available in PAUSE mode."
    );
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);

    let _ = fs::remove_dir_all(&dir);
}
