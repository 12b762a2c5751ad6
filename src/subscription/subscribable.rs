// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscribable trait for types that publish device state.

use crate::state::StateSnapshot;
use crate::subscription::SubscriptionId;
use crate::types::{InputSource, Volume};

/// Trait for types that support event subscriptions.
///
/// Implemented by the device client: callbacks fire from the connection's
/// read task whenever a polled response produces a real state change.
///
/// # Examples
///
/// ```no_run
/// use lglink_lib::Display;
/// use lglink_lib::subscription::Subscribable;
///
/// # async fn example() -> lglink_lib::Result<()> {
/// let display = Display::builder("lg-tv-moxa").build();
///
/// let sub_id = display.on_power_changed(|on| {
///     println!("display is now {}", if on { "on" } else { "off" });
/// });
///
/// display.on_state_changed(|snapshot| {
///     println!("volume: {:?}", snapshot.volume);
/// });
///
/// display.connect().await?;
///
/// // Unsubscribe when no longer needed
/// display.unsubscribe(sub_id);
/// # Ok(())
/// # }
/// ```
pub trait Subscribable {
    /// Subscribes to power state changes.
    fn on_power_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(bool) + Send + Sync + 'static;

    /// Subscribes to volume level changes.
    ///
    /// Volume echoes suppressed by the debounce window do not fire this
    /// callback.
    fn on_volume_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Volume) + Send + Sync + 'static;

    /// Subscribes to mute changes.
    fn on_mute_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(bool) + Send + Sync + 'static;

    /// Subscribes to input source changes.
    fn on_input_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(InputSource) + Send + Sync + 'static;

    /// Subscribes to all published snapshots.
    ///
    /// Fires once per real state change with the full current state.
    fn on_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&StateSnapshot) + Send + Sync + 'static;

    /// Subscribes to connection establishment.
    ///
    /// The callback receives the initial snapshot.
    fn on_connected<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&StateSnapshot) + Send + Sync + 'static;

    /// Subscribes to connection loss or teardown.
    fn on_disconnected<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static;

    /// Unsubscribes a callback by its subscription ID.
    ///
    /// Returns `true` if the subscription was found and removed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}
