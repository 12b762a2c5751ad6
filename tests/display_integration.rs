// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests against a mock serial bridge.
//!
//! Each test binds a local TCP listener standing in for the
//! serial-to-network bridge, connects a [`Display`] to it, and scripts
//! the display side of the conversation by writing response frames
//! directly into the accepted stream.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout};

use lglink_lib::subscription::Subscribable;
use lglink_lib::types::{InputSource, Volume};
use lglink_lib::{Display, DisplayConfig, StateSnapshot};

/// Poll interval used in tests, short enough to keep them fast.
const TEST_POLL: Duration = Duration::from_millis(50);

/// Binds a mock bridge listener on a random port.
async fn bridge_listener() -> (TcpListener, String, u16) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    (listener, addr.ip().to_string(), addr.port())
}

/// Connects a display to the listener and returns the accepted
/// bridge-side stream.
async fn connect(display: &Display, listener: &TcpListener) -> TcpStream {
    let (connected, accepted) = tokio::join!(display.connect(), listener.accept());
    connected.unwrap();
    let (stream, _) = accepted.unwrap();
    stream
}

/// Reads from the bridge side until `count` CR-terminated commands have
/// arrived.
async fn read_commands(stream: &mut TcpStream, count: usize) -> Vec<String> {
    let mut received = String::new();
    let mut buf = [0u8; 256];
    timeout(Duration::from_secs(5), async {
        while received.matches('\r').count() < count {
            let n = stream.read(&mut buf).await.unwrap();
            assert!(n > 0, "bridge connection closed early");
            received.push_str(std::str::from_utf8(&buf[..n]).unwrap());
        }
    })
    .await
    .expect("timed out waiting for commands");

    received
        .split('\r')
        .filter(|s| !s.is_empty())
        .take(count)
        .map(ToString::to_string)
        .collect()
}

mod polling {
    use super::*;

    #[tokio::test]
    async fn poll_round_sends_four_queries_in_order() {
        let (listener, host, port) = bridge_listener().await;
        let display = Display::builder(host)
            .port(port)
            .poll_interval(TEST_POLL)
            .build();

        let mut bridge = connect(&display, &listener).await;
        let commands = read_commands(&mut bridge, 4).await;

        assert_eq!(commands, vec!["ka 0 ff", "ke 0 ff", "kf 0 ff", "xb 0 ff"]);

        display.disconnect().await;
    }

    #[tokio::test]
    async fn polling_repeats_on_the_interval() {
        let (listener, host, port) = bridge_listener().await;
        let display = Display::builder(host)
            .port(port)
            .poll_interval(TEST_POLL)
            .build();

        let mut bridge = connect(&display, &listener).await;
        // Two full rounds.
        let commands = read_commands(&mut bridge, 8).await;
        assert_eq!(commands[4..], commands[..4]);

        display.disconnect().await;
    }
}

mod state_updates {
    use super::*;

    /// Registers a snapshot subscription backed by a channel.
    fn snapshot_channel(display: &Display) -> mpsc::UnboundedReceiver<StateSnapshot> {
        let (tx, rx) = mpsc::unbounded_channel();
        display.on_state_changed(move |snapshot| {
            let _ = tx.send(snapshot.clone());
        });
        rx
    }

    #[tokio::test]
    async fn power_status_publishes_snapshot() {
        let (listener, host, port) = bridge_listener().await;
        let display = Display::builder(host)
            .port(port)
            .poll_interval(TEST_POLL)
            .build();
        let mut snapshots = snapshot_channel(&display);

        let mut bridge = connect(&display, &listener).await;
        bridge.write_all(b"a 01 OK01x").await.unwrap();

        let snapshot = timeout(Duration::from_secs(5), snapshots.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(snapshot.power, Some(true));
        assert_eq!(snapshot.inputs.len(), InputSource::ALL.len());

        display.disconnect().await;
    }

    #[tokio::test]
    async fn negative_ack_does_not_publish() {
        let (listener, host, port) = bridge_listener().await;
        let display = Display::builder(host)
            .port(port)
            .poll_interval(TEST_POLL)
            .build();
        let mut snapshots = snapshot_channel(&display);

        let mut bridge = connect(&display, &listener).await;
        bridge.write_all(b"a 01 NG01x").await.unwrap();
        bridge.write_all(b"a 01 OK01x").await.unwrap();

        // Only the OK frame produces a snapshot, and it reports on.
        let snapshot = timeout(Duration::from_secs(5), snapshots.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(snapshot.power, Some(true));
        sleep(Duration::from_millis(100)).await;
        assert!(snapshots.try_recv().is_err());

        display.disconnect().await;
    }

    #[tokio::test]
    async fn mute_polarity_end_to_end() {
        let (listener, host, port) = bridge_listener().await;
        let display = Display::builder(host)
            .port(port)
            .poll_interval(TEST_POLL)
            .build();

        let muted = Arc::new(AtomicBool::new(false));
        let muted_clone = muted.clone();
        let changes = Arc::new(AtomicU32::new(0));
        let changes_clone = changes.clone();
        display.on_mute_changed(move |m| {
            muted_clone.store(m, Ordering::SeqCst);
            changes_clone.fetch_add(1, Ordering::SeqCst);
        });

        let mut bridge = connect(&display, &listener).await;
        bridge.write_all(b"e 01 OK00x").await.unwrap();

        timeout(Duration::from_secs(5), async {
            while changes.load(Ordering::SeqCst) == 0 {
                sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .unwrap();
        assert!(muted.load(Ordering::SeqCst));

        bridge.write_all(b"e 01 OK01x").await.unwrap();
        timeout(Duration::from_secs(5), async {
            while changes.load(Ordering::SeqCst) < 2 {
                sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .unwrap();
        assert!(!muted.load(Ordering::SeqCst));

        display.disconnect().await;
    }

    #[tokio::test]
    async fn input_mapping_and_unmapped_values() {
        let (listener, host, port) = bridge_listener().await;
        let display = Display::builder(host)
            .port(port)
            .poll_interval(TEST_POLL)
            .build();
        let mut snapshots = snapshot_channel(&display);

        let mut bridge = connect(&display, &listener).await;
        bridge.write_all(b"b 01 OK92x").await.unwrap();

        let snapshot = timeout(Duration::from_secs(5), snapshots.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(snapshot.input, Some(InputSource::Hdmi3));
        assert_eq!(snapshot.input_label, Some("HDMI3"));

        // An unmapped value publishes nothing and keeps the old input.
        bridge.write_all(b"b 01 OK55x").await.unwrap();
        sleep(Duration::from_millis(150)).await;
        assert!(snapshots.try_recv().is_err());
        assert_eq!(display.state().input, Some(InputSource::Hdmi3));

        display.disconnect().await;
    }

    #[tokio::test]
    async fn split_frames_reassemble_across_reads() {
        let (listener, host, port) = bridge_listener().await;
        let display = Display::builder(host)
            .port(port)
            .poll_interval(TEST_POLL)
            .build();
        let mut snapshots = snapshot_channel(&display);

        let mut bridge = connect(&display, &listener).await;
        // One frame delivered in three separate writes.
        bridge.write_all(b"f 01").await.unwrap();
        sleep(Duration::from_millis(20)).await;
        bridge.write_all(b" OK2").await.unwrap();
        sleep(Duration::from_millis(20)).await;
        bridge.write_all(b"0x").await.unwrap();

        let snapshot = timeout(Duration::from_secs(5), snapshots.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(snapshot.volume, Some(0x20));

        display.disconnect().await;
    }
}

mod debounce {
    use super::*;

    #[tokio::test]
    async fn volume_echo_dropped_then_applied() {
        let (listener, host, port) = bridge_listener().await;
        let display = Display::builder(host)
            .port(port)
            // Long interval: no poll traffic interferes with the script.
            .poll_interval(Duration::from_secs(60))
            .build();

        let volume_changes = Arc::new(AtomicU32::new(0));
        let changes_clone = volume_changes.clone();
        display.on_volume_changed(move |_| {
            changes_clone.fetch_add(1, Ordering::SeqCst);
        });

        let mut bridge = connect(&display, &listener).await;

        // Local volume-set starts the debounce window.
        display.set_volume(Volume::new(0x28).unwrap()).await.unwrap();

        // A stale echo with a different value arrives well inside the
        // window: silently dropped.
        bridge.write_all(b"f 01 OK10x").await.unwrap();
        sleep(Duration::from_millis(500)).await;
        assert_eq!(volume_changes.load(Ordering::SeqCst), 0);
        assert_eq!(display.state().volume, None);

        // The same echo after the window has elapsed is applied.
        sleep(Duration::from_millis(700)).await;
        bridge.write_all(b"f 01 OK10x").await.unwrap();
        timeout(Duration::from_secs(5), async {
            while volume_changes.load(Ordering::SeqCst) == 0 {
                sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .unwrap();
        assert_eq!(display.state().volume, Some(0x10));

        display.disconnect().await;
    }
}

mod lifecycle {
    use super::*;

    #[tokio::test]
    async fn connect_fires_connected_callback() {
        let (listener, host, port) = bridge_listener().await;
        let display = Display::builder(host)
            .port(port)
            .poll_interval(TEST_POLL)
            .build();

        let connected = Arc::new(AtomicBool::new(false));
        let connected_clone = connected.clone();
        display.on_connected(move |_snapshot| {
            connected_clone.store(true, Ordering::SeqCst);
        });

        let _bridge = connect(&display, &listener).await;
        assert!(connected.load(Ordering::SeqCst));
        assert!(display.is_connected().await);

        display.disconnect().await;
    }

    #[tokio::test]
    async fn connect_failure_leaves_client_disconnected() {
        // Bind and drop a listener so the port refuses connections.
        let (listener, host, port) = bridge_listener().await;
        drop(listener);

        let display = Display::builder(host).port(port).build();
        let result = display.connect().await;
        assert!(result.is_err());
        assert!(!display.is_connected().await);
    }

    #[tokio::test]
    async fn bridge_close_fires_disconnected_without_retry() {
        let (listener, host, port) = bridge_listener().await;
        let display = Display::builder(host)
            .port(port)
            .poll_interval(TEST_POLL)
            .build();

        let disconnects = Arc::new(AtomicU32::new(0));
        let disconnects_clone = disconnects.clone();
        display.on_disconnected(move || {
            disconnects_clone.fetch_add(1, Ordering::SeqCst);
        });

        let bridge = connect(&display, &listener).await;
        drop(bridge);

        timeout(Duration::from_secs(5), async {
            while disconnects.load(Ordering::SeqCst) == 0 {
                sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .unwrap();

        // No reconnection attempt: the listener sees no new connection.
        let accept = timeout(Duration::from_millis(300), listener.accept()).await;
        assert!(accept.is_err(), "client must not reconnect on its own");

        display.disconnect().await;
        // Explicit teardown after a lost connection does not fire the
        // event again.
        assert_eq!(disconnects.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn reconfigure_moves_to_new_endpoint() {
        let (listener_a, host_a, port_a) = bridge_listener().await;
        let (listener_b, host_b, port_b) = bridge_listener().await;

        let display = Display::builder(host_a)
            .port(port_a)
            .poll_interval(TEST_POLL)
            .build();

        let mut bridge_a = connect(&display, &listener_a).await;
        let _ = read_commands(&mut bridge_a, 4).await;

        let mut config = DisplayConfig::new(host_b);
        config.port = port_b;
        config.poll_interval = TEST_POLL;

        let (reconfigured, accepted) =
            tokio::join!(display.reconfigure(config), listener_b.accept());
        reconfigured.unwrap();
        let (mut bridge_b, _) = accepted.unwrap();

        // The new endpoint gets polled.
        let commands = read_commands(&mut bridge_b, 4).await;
        assert_eq!(commands[0], "ka 0 ff");

        // The old bridge sees the connection closed.
        let mut buf = [0u8; 16];
        let n = timeout(Duration::from_secs(5), bridge_a.read(&mut buf))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(n, 0);

        display.disconnect().await;
    }
}

mod actions {
    use super::*;

    #[tokio::test]
    async fn typed_actions_hit_the_wire() {
        let (listener, host, port) = bridge_listener().await;
        let display = Display::builder(host)
            .port(port)
            .poll_interval(Duration::from_secs(60))
            .build();

        let mut bridge = connect(&display, &listener).await;

        display.set_power(true).await.unwrap();
        display.set_mute(true).await.unwrap();
        display.select_input(InputSource::Hdmi2).await.unwrap();

        let commands = read_commands(&mut bridge, 3).await;
        assert_eq!(commands, vec!["ka 0 1", "ke 0 0", "xb 0 91"]);

        display.disconnect().await;
    }

    #[tokio::test]
    async fn perform_actions_hit_the_wire() {
        let (listener, host, port) = bridge_listener().await;
        let display = Display::builder(host)
            .port(port)
            .poll_interval(Duration::from_secs(60))
            .build();

        let mut bridge = connect(&display, &listener).await;

        display.perform("volume", &serde_json::json!(0x32)).await;
        display.perform("input", &serde_json::json!("HDMI1")).await;
        display.perform("keycode", &serde_json::json!("MENU")).await;
        // Unknown action and bad parameter write nothing.
        display.perform("warp", &serde_json::json!(9)).await;
        display.perform("volume", &serde_json::json!("loud")).await;

        let commands = read_commands(&mut bridge, 3).await;
        assert_eq!(commands, vec!["kf 0 32", "xb 0 90", "mc 0 43"]);

        display.disconnect().await;
    }
}
