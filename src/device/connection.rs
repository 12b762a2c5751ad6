// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Connection management: TCP transport, read loop, and poll scheduler.
//!
//! One [`Connection`] owns one TCP stream to the serial bridge and the
//! two tasks that serve it: a read task feeding inbound bytes through
//! the frame assembler into the state store, and a poll task issuing
//! the four status queries on a fixed interval.
//!
//! The lifecycle is disconnected, connecting, connected, and back to
//! disconnected on teardown or connection loss. There is no automatic
//! retry: a failed connect or an unexpected close leaves the client
//! disconnected until the next explicit (re)configuration. A hung
//! device that stops answering simply stops producing state updates;
//! no response timeout is applied.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use parking_lot::RwLock;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::command::Command;
use crate::config::DisplayConfig;
use crate::error::ProtocolError;
use crate::protocol::{FrameAssembler, decode};
use crate::state::DeviceState;
use crate::subscription::CallbackRegistry;

/// An established connection to the serial bridge.
///
/// Dropping the handles via [`Connection::shutdown`] aborts both tasks
/// and closes the stream. In-flight writes are not awaited or rolled
/// back.
#[derive(Debug)]
pub(crate) struct Connection {
    writer: Arc<Mutex<OwnedWriteHalf>>,
    connected: Arc<AtomicBool>,
    read_task: JoinHandle<()>,
    poll_task: JoinHandle<()>,
}

impl Connection {
    /// Connects to the bridge and starts the read and poll tasks.
    ///
    /// The poll task starts only once the connection has succeeded.
    pub(crate) async fn open(
        config: &DisplayConfig,
        state: Arc<RwLock<DeviceState>>,
        callbacks: Arc<CallbackRegistry>,
    ) -> Result<Self, ProtocolError> {
        let addr = config.addr();
        tracing::debug!(addr = %addr, "connecting to serial bridge");

        let stream = TcpStream::connect(&addr).await.map_err(|e| {
            tracing::error!(addr = %addr, error = %e, "connection failed");
            ProtocolError::ConnectionFailed(format!("{addr}: {e}"))
        })?;

        // Commands are single short lines; latency matters more than
        // throughput.
        if let Err(e) = stream.set_nodelay(true) {
            tracing::warn!(addr = %addr, error = %e, "failed to set TCP_NODELAY");
        }

        tracing::info!(addr = %addr, "connected");

        let (read_half, write_half) = stream.into_split();
        let writer = Arc::new(Mutex::new(write_half));
        let connected = Arc::new(AtomicBool::new(true));

        let read_task = tokio::spawn(read_loop(
            read_half,
            state,
            callbacks.clone(),
            connected.clone(),
        ));

        let poll_task = tokio::spawn(poll_loop(
            writer.clone(),
            config.poll_interval,
        ));

        Ok(Self {
            writer,
            connected,
            read_task,
            poll_task,
        })
    }

    /// Returns `true` while the read loop is alive.
    pub(crate) fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Writes one encoded command to the bridge.
    pub(crate) async fn send(&self, command: &Command) -> Result<(), ProtocolError> {
        let encoded = command.encode();
        tracing::trace!(command = ?encoded, "sending command");

        let mut writer = self.writer.lock().await;
        writer.write_all(encoded.as_bytes()).await?;
        writer.flush().await?;
        Ok(())
    }

    /// Tears the connection down: cancels both tasks and drops the
    /// stream halves.
    ///
    /// Fires the disconnected event unless the read loop already did.
    pub(crate) fn shutdown(self, callbacks: &CallbackRegistry) {
        self.poll_task.abort();
        self.read_task.abort();
        if self.connected.swap(false, Ordering::SeqCst) {
            callbacks.dispatch_disconnected();
        }
        tracing::debug!("connection torn down");
    }
}

/// Forwards every inbound byte, in order, through the frame assembler
/// and applies decoded responses to the state store.
///
/// The assembler is owned exclusively by this task. No decode failure
/// ever breaks the loop; only EOF or a read error ends it, after which
/// the client stays disconnected.
async fn read_loop(
    mut reader: OwnedReadHalf,
    state: Arc<RwLock<DeviceState>>,
    callbacks: Arc<CallbackRegistry>,
    connected: Arc<AtomicBool>,
) {
    let mut assembler = FrameAssembler::new();
    let mut buf = [0u8; 1024];

    loop {
        match reader.read(&mut buf).await {
            Ok(0) => {
                tracing::warn!("bridge closed the connection");
                break;
            }
            Ok(n) => {
                for frame in assembler.feed(&buf[..n]) {
                    handle_frame(&frame, &state, &callbacks);
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "read failed");
                break;
            }
        }
    }

    if connected.swap(false, Ordering::SeqCst) {
        callbacks.dispatch_disconnected();
    }
}

/// Decodes one assembled frame and publishes any resulting state change.
fn handle_frame(frame: &str, state: &RwLock<DeviceState>, callbacks: &CallbackRegistry) {
    match decode(frame) {
        Ok(response) if response.success => {
            let (change, snapshot) = {
                let mut state = state.write();
                let change = state.apply(&response, Instant::now());
                (change, state.snapshot())
            };
            match change {
                Some(change) => {
                    tracing::debug!(change = ?change, "state changed");
                    callbacks.dispatch(&change, &snapshot);
                }
                None => {
                    tracing::trace!(code = ?response.code, data = response.data, "no state effect");
                }
            }
        }
        Ok(response) => {
            tracing::debug!(code = ?response.code, "negative acknowledgement");
        }
        Err(e) => {
            tracing::debug!(frame = ?frame, error = %e, "not a status frame");
        }
    }
}

/// Issues the four status queries on every tick, in fixed order: power,
/// mute, volume, input.
///
/// Queries are one-way writes; responses arrive asynchronously and are
/// matched by command code alone. A failed write means the connection
/// is gone, so the loop stops polling.
async fn poll_loop(writer: Arc<Mutex<OwnedWriteHalf>>, interval: std::time::Duration) {
    let queries = [
        Command::power_status(),
        Command::mute_status(),
        Command::volume_status(),
        Command::input_status(),
    ];

    let mut ticker = tokio::time::interval(interval);
    // The first tick completes immediately; consume it so rounds start
    // one interval after connect, as a wall-clock timer would.
    ticker.tick().await;
    loop {
        ticker.tick().await;
        for query in &queries {
            let encoded = query.encode();
            let mut writer = writer.lock().await;
            if let Err(e) = writer.write_all(encoded.as_bytes()).await {
                tracing::warn!(error = %e, "poll write failed, stopping poll");
                return;
            }
            if let Err(e) = writer.flush().await {
                tracing::warn!(error = %e, "poll flush failed, stopping poll");
                return;
            }
        }
        tracing::trace!("poll round sent");
    }
}
