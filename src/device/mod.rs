// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level client for an LG display behind a serial bridge.
//!
//! [`Display`] owns the connection, the state mirror, and the callback
//! registry. Once connected it polls the display for power, mute,
//! volume, and input status and publishes a snapshot on every real
//! change; callers issue commands through typed methods or the untyped
//! [`Display::perform`] action boundary.
//!
//! # Examples
//!
//! ```no_run
//! use lglink_lib::Display;
//! use lglink_lib::subscription::Subscribable;
//! use lglink_lib::types::Volume;
//!
//! # async fn example() -> lglink_lib::Result<()> {
//! let display = Display::builder("lg-tv-moxa").build();
//!
//! display.on_state_changed(|snapshot| {
//!     println!("power: {:?}, volume: {:?}", snapshot.power, snapshot.volume);
//! });
//!
//! display.connect().await?;
//! display.set_power(true).await?;
//! display.set_volume(Volume::new(30)?).await?;
//! # Ok(())
//! # }
//! ```

mod builder;
mod connection;

pub use builder::DisplayBuilder;

use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use tokio::sync::Mutex;

use crate::command::{ColourTemperature, Command};
use crate::config::DisplayConfig;
use crate::error::{Error, ProtocolError, Result, ValueError};
use crate::state::{DeviceState, StateSnapshot};
use crate::subscription::{CallbackRegistry, Subscribable, SubscriptionId};
use crate::types::{InputSource, KeyCode, Volume};

use connection::Connection;

/// A stateful client for one LG display.
///
/// The client maintains a best-effort mirror of device state by polling
/// and decoding responses. Commands are fire-and-forget on the wire:
/// delivery is not guaranteed, and a write to a dead connection fails
/// without retry.
#[derive(Debug)]
pub struct Display {
    config: RwLock<DisplayConfig>,
    state: Arc<RwLock<DeviceState>>,
    callbacks: Arc<CallbackRegistry>,
    connection: Mutex<Option<Connection>>,
}

impl Display {
    /// Returns a builder for a display behind the given bridge host.
    pub fn builder(host: impl Into<String>) -> DisplayBuilder {
        DisplayBuilder::new(host)
    }

    pub(crate) fn new(config: DisplayConfig) -> Self {
        Self {
            config: RwLock::new(config),
            state: Arc::new(RwLock::new(DeviceState::new())),
            callbacks: Arc::new(CallbackRegistry::new()),
            connection: Mutex::new(None),
        }
    }

    /// Returns a copy of the current configuration.
    #[must_use]
    pub fn config(&self) -> DisplayConfig {
        self.config.read().clone()
    }

    /// Returns a snapshot of the current device state.
    #[must_use]
    pub fn state(&self) -> StateSnapshot {
        self.state.read().snapshot()
    }

    /// Returns `true` while a live connection exists.
    pub async fn is_connected(&self) -> bool {
        self.connection
            .lock()
            .await
            .as_ref()
            .is_some_and(Connection::is_connected)
    }

    // ========== Lifecycle ==========

    /// Connects to the serial bridge and starts status polling.
    ///
    /// Any existing connection and poll timer are torn down first.
    /// Polling starts only after the connection succeeds. There is no
    /// automatic retry: on failure, or if the bridge later closes the
    /// connection, the client stays disconnected until this method or
    /// [`reconfigure`](Self::reconfigure) is called again.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::ConnectionFailed` if the bridge cannot be
    /// reached.
    pub async fn connect(&self) -> Result<()> {
        self.teardown().await;

        let config = self.config();
        let connection =
            Connection::open(&config, self.state.clone(), self.callbacks.clone()).await?;
        *self.connection.lock().await = Some(connection);

        let snapshot = self.state.read().snapshot();
        self.callbacks.dispatch_connected(&snapshot);
        Ok(())
    }

    /// Applies a new configuration and reconnects.
    ///
    /// The existing poll timer and connection are torn down before the
    /// new connection attempt.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::ConnectionFailed` if the new endpoint
    /// cannot be reached; the client is left disconnected in that case.
    pub async fn reconfigure(&self, config: DisplayConfig) -> Result<()> {
        self.teardown().await;
        *self.config.write() = config;
        self.connect().await
    }

    /// Tears down the connection and stops polling.
    pub async fn disconnect(&self) {
        self.teardown().await;
    }

    async fn teardown(&self) {
        if let Some(connection) = self.connection.lock().await.take() {
            connection.shutdown(&self.callbacks);
        }
    }

    // ========== Typed actions ==========

    /// Sends a raw command to the display.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::NotConnected` when no connection exists,
    /// or an I/O error if the write fails.
    pub async fn send_command(&self, command: &Command) -> Result<()> {
        let guard = self.connection.lock().await;
        let connection = guard.as_ref().ok_or(ProtocolError::NotConnected)?;
        connection.send(command).await.map_err(Error::Protocol)
    }

    /// Turns the display on or off.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be written.
    pub async fn set_power(&self, on: bool) -> Result<()> {
        self.send_command(&Command::set_power(on)).await
    }

    /// Sets the volume level.
    ///
    /// Also resets the volume debounce clock, so polled echoes of the
    /// previous level arriving within the next second cannot overwrite
    /// this value.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be written.
    pub async fn set_volume(&self, volume: Volume) -> Result<()> {
        self.state.write().note_volume_command(Instant::now());
        self.send_command(&Command::set_volume(volume)).await
    }

    /// Mutes or unmutes the audio.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be written.
    pub async fn set_mute(&self, muted: bool) -> Result<()> {
        self.send_command(&Command::set_mute(muted)).await
    }

    /// Selects an input source.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be written.
    pub async fn select_input(&self, input: InputSource) -> Result<()> {
        self.send_command(&Command::select_input(input)).await
    }

    /// Injects an IR remote keycode.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be written.
    pub async fn send_key(&self, key: KeyCode) -> Result<()> {
        self.send_command(&Command::key_press(key)).await
    }

    /// Blanks or restores the picture while audio keeps running.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be written.
    pub async fn set_screen_mute(&self, on: bool) -> Result<()> {
        self.send_command(&Command::set_screen_mute(on)).await
    }

    /// Sets the picture contrast (0-100).
    ///
    /// # Errors
    ///
    /// Returns a value error for levels above 100, or an error if the
    /// command cannot be written.
    pub async fn set_contrast(&self, level: u8) -> Result<()> {
        self.send_command(&Command::set_contrast(level)?).await
    }

    /// Sets the picture brightness (0-100).
    ///
    /// # Errors
    ///
    /// Returns a value error for levels above 100, or an error if the
    /// command cannot be written.
    pub async fn set_brightness(&self, level: u8) -> Result<()> {
        self.send_command(&Command::set_brightness(level)?).await
    }

    /// Sets the colour saturation (0-100).
    ///
    /// # Errors
    ///
    /// Returns a value error for levels above 100, or an error if the
    /// command cannot be written.
    pub async fn set_colour(&self, level: u8) -> Result<()> {
        self.send_command(&Command::set_colour(level)?).await
    }

    /// Sets the picture tint (0 red through 100 green).
    ///
    /// # Errors
    ///
    /// Returns a value error for levels above 100, or an error if the
    /// command cannot be written.
    pub async fn set_tint(&self, level: u8) -> Result<()> {
        self.send_command(&Command::set_tint(level)?).await
    }

    /// Sets the picture sharpness (0-100).
    ///
    /// # Errors
    ///
    /// Returns a value error for levels above 100, or an error if the
    /// command cannot be written.
    pub async fn set_sharpness(&self, level: u8) -> Result<()> {
        self.send_command(&Command::set_sharpness(level)?).await
    }

    /// Sets the audio balance (0 left through 100 right).
    ///
    /// # Errors
    ///
    /// Returns a value error for levels above 100, or an error if the
    /// command cannot be written.
    pub async fn set_balance(&self, level: u8) -> Result<()> {
        self.send_command(&Command::set_balance(level)?).await
    }

    /// Shows or hides the on-screen display.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be written.
    pub async fn set_osd(&self, on: bool) -> Result<()> {
        self.send_command(&Command::set_osd(on)).await
    }

    /// Locks or unlocks the front panel and physical remote.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be written.
    pub async fn set_remote_lock(&self, on: bool) -> Result<()> {
        self.send_command(&Command::set_remote_lock(on)).await
    }

    /// Selects a colour temperature preset.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be written.
    pub async fn set_colour_temperature(&self, preset: ColourTemperature) -> Result<()> {
        self.send_command(&Command::set_colour_temperature(preset))
            .await
    }

    // ========== Untyped action boundary ==========

    /// Performs a named action with an untyped JSON parameter.
    ///
    /// Recognized actions and their parameters:
    ///
    /// | action    | parameter                         |
    /// |-----------|-----------------------------------|
    /// | `power`   | boolean                           |
    /// | `volume`  | integer 0-100                     |
    /// | `mute`    | boolean                           |
    /// | `input`   | input name string (e.g. `"HDMI1"`)|
    /// | `keycode` | key name string (e.g. `"MENU"`)   |
    ///
    /// Unrecognized action names are no-ops. Failures, including write
    /// failures on a dead connection, are caught and logged here rather
    /// than surfaced, so a caller observes success even when the command
    /// was not delivered. Callers that need delivery feedback should use
    /// the typed methods instead.
    pub async fn perform(&self, action: &str, params: &serde_json::Value) {
        tracing::debug!(action = action, params = %params, "performing action");

        let result = match action {
            "power" => match params.as_bool() {
                Some(on) => self.set_power(on).await,
                None => Err(invalid_parameter(action, "expected a boolean")),
            },
            "volume" => match volume_from_params(params) {
                Ok(volume) => self.set_volume(volume).await,
                Err(e) => Err(e),
            },
            "mute" => match params.as_bool() {
                Some(muted) => self.set_mute(muted).await,
                None => Err(invalid_parameter(action, "expected a boolean")),
            },
            "input" => match params.as_str() {
                Some(name) => match name.parse::<InputSource>() {
                    Ok(input) => self.select_input(input).await,
                    Err(e) => Err(e.into()),
                },
                None => Err(invalid_parameter(action, "expected an input name")),
            },
            "keycode" => match params.as_str() {
                Some(name) => match name.parse::<KeyCode>() {
                    Ok(key) => self.send_key(key).await,
                    Err(e) => Err(e.into()),
                },
                None => Err(invalid_parameter(action, "expected a key name")),
            },
            _ => {
                tracing::debug!(action = action, "unrecognized action");
                Ok(())
            }
        };

        if let Err(e) = result {
            tracing::error!(action = action, error = %e, "failed to perform action");
        }
    }
}

impl Subscribable for Display {
    fn on_power_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.callbacks.on_power_changed(callback)
    }

    fn on_volume_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Volume) + Send + Sync + 'static,
    {
        self.callbacks.on_volume_changed(callback)
    }

    fn on_mute_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.callbacks.on_mute_changed(callback)
    }

    fn on_input_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(InputSource) + Send + Sync + 'static,
    {
        self.callbacks.on_input_changed(callback)
    }

    fn on_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&StateSnapshot) + Send + Sync + 'static,
    {
        self.callbacks.on_state_changed(callback)
    }

    fn on_connected<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&StateSnapshot) + Send + Sync + 'static,
    {
        self.callbacks.on_connected(callback)
    }

    fn on_disconnected<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.callbacks.on_disconnected(callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.callbacks.unsubscribe(id)
    }
}

impl Drop for Display {
    fn drop(&mut self) {
        // Best-effort: abort the background tasks if the client is
        // dropped without an explicit disconnect.
        if let Ok(mut guard) = self.connection.try_lock()
            && let Some(connection) = guard.take()
        {
            connection.shutdown(&self.callbacks);
        }
    }
}

fn invalid_parameter(action: &str, message: &str) -> Error {
    Error::Value(ValueError::InvalidParameter {
        action: action.to_string(),
        message: message.to_string(),
    })
}

fn volume_from_params(params: &serde_json::Value) -> Result<Volume> {
    let level = params
        .as_u64()
        .and_then(|v| u8::try_from(v).ok())
        .ok_or_else(|| invalid_parameter("volume", "expected an integer 0-100"))?;
    Volume::new(level).map_err(Error::Value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_params_accepts_integers() {
        let volume = volume_from_params(&serde_json::json!(42)).unwrap();
        assert_eq!(volume.value(), 42);
    }

    #[test]
    fn volume_params_rejects_out_of_range() {
        assert!(volume_from_params(&serde_json::json!(101)).is_err());
        assert!(volume_from_params(&serde_json::json!(-3)).is_err());
        assert!(volume_from_params(&serde_json::json!("loud")).is_err());
    }

    #[tokio::test]
    async fn send_command_requires_connection() {
        let display = Display::builder("nowhere.invalid").build();
        let result = display.send_command(&Command::power_status()).await;
        assert!(matches!(
            result,
            Err(Error::Protocol(ProtocolError::NotConnected))
        ));
    }

    #[tokio::test]
    async fn perform_swallows_write_failures() {
        let display = Display::builder("nowhere.invalid").build();
        // Not connected: the typed path would error, the action
        // boundary reports nothing.
        display.perform("power", &serde_json::json!(true)).await;
        display.perform("volume", &serde_json::json!(30)).await;
    }

    #[tokio::test]
    async fn perform_ignores_unknown_actions() {
        let display = Display::builder("nowhere.invalid").build();
        display.perform("warp", &serde_json::json!(9)).await;
    }

    #[tokio::test]
    async fn is_connected_false_before_connect() {
        let display = Display::builder("nowhere.invalid").build();
        assert!(!display.is_connected().await);
    }
}
