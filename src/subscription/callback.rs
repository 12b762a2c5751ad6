// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback management for device state subscriptions.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::state::{StateChange, StateSnapshot};
use crate::types::{InputSource, Volume};

/// Unique identifier for a subscription.
///
/// Returned when creating a subscription and used to unsubscribe later.
/// IDs are unique within a device's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    #[must_use]
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

/// Type alias for power state callbacks.
type PowerCallback = Arc<dyn Fn(bool) + Send + Sync>;

/// Type alias for volume callbacks.
type VolumeCallback = Arc<dyn Fn(Volume) + Send + Sync>;

/// Type alias for mute callbacks.
type MuteCallback = Arc<dyn Fn(bool) + Send + Sync>;

/// Type alias for input source callbacks.
type InputCallback = Arc<dyn Fn(InputSource) + Send + Sync>;

/// Type alias for snapshot callbacks (receives every published snapshot).
type StateChangedCallback = Arc<dyn Fn(&StateSnapshot) + Send + Sync>;

/// Type alias for connected callbacks (receives the initial snapshot).
type ConnectedCallback = Arc<dyn Fn(&StateSnapshot) + Send + Sync>;

/// Type alias for disconnected callbacks.
type DisconnectedCallback = Arc<dyn Fn() + Send + Sync>;

/// Registry for managing device subscription callbacks.
///
/// Thread-safe via `parking_lot::RwLock`; callbacks are wrapped in `Arc`
/// so dispatch can run them without holding a write lock. Callbacks are
/// called synchronously in an arbitrary order.
pub struct CallbackRegistry {
    /// Counter for generating unique subscription IDs.
    next_id: AtomicU64,
    power_callbacks: RwLock<HashMap<SubscriptionId, PowerCallback>>,
    volume_callbacks: RwLock<HashMap<SubscriptionId, VolumeCallback>>,
    mute_callbacks: RwLock<HashMap<SubscriptionId, MuteCallback>>,
    input_callbacks: RwLock<HashMap<SubscriptionId, InputCallback>>,
    state_changed_callbacks: RwLock<HashMap<SubscriptionId, StateChangedCallback>>,
    connected_callbacks: RwLock<HashMap<SubscriptionId, ConnectedCallback>>,
    disconnected_callbacks: RwLock<HashMap<SubscriptionId, DisconnectedCallback>>,
}

impl CallbackRegistry {
    /// Creates a new empty callback registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            power_callbacks: RwLock::new(HashMap::new()),
            volume_callbacks: RwLock::new(HashMap::new()),
            mute_callbacks: RwLock::new(HashMap::new()),
            input_callbacks: RwLock::new(HashMap::new()),
            state_changed_callbacks: RwLock::new(HashMap::new()),
            connected_callbacks: RwLock::new(HashMap::new()),
            disconnected_callbacks: RwLock::new(HashMap::new()),
        }
    }

    fn next_id(&self) -> SubscriptionId {
        SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    // =========================================================================
    // Registration methods
    // =========================================================================

    /// Registers a callback for power state changes.
    pub fn on_power_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.power_callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for volume changes.
    pub fn on_volume_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Volume) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.volume_callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for mute changes.
    pub fn on_mute_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.mute_callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for input source changes.
    pub fn on_input_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(InputSource) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.input_callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for every published snapshot.
    pub fn on_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&StateSnapshot) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.state_changed_callbacks
            .write()
            .insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for when the connection is established.
    ///
    /// The callback receives the initial (typically all-unknown)
    /// snapshot.
    pub fn on_connected<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&StateSnapshot) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.connected_callbacks
            .write()
            .insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for when the connection is lost or torn
    /// down.
    pub fn on_disconnected<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.disconnected_callbacks
            .write()
            .insert(id, Arc::new(callback));
        id
    }

    // =========================================================================
    // Unsubscription
    // =========================================================================

    /// Unregisters a callback by its subscription ID.
    ///
    /// Returns `true` if a callback was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        if self.power_callbacks.write().remove(&id).is_some() {
            return true;
        }
        if self.volume_callbacks.write().remove(&id).is_some() {
            return true;
        }
        if self.mute_callbacks.write().remove(&id).is_some() {
            return true;
        }
        if self.input_callbacks.write().remove(&id).is_some() {
            return true;
        }
        if self.state_changed_callbacks.write().remove(&id).is_some() {
            return true;
        }
        if self.connected_callbacks.write().remove(&id).is_some() {
            return true;
        }
        if self.disconnected_callbacks.write().remove(&id).is_some() {
            return true;
        }
        false
    }

    /// Clears all callbacks.
    pub fn clear(&self) {
        self.power_callbacks.write().clear();
        self.volume_callbacks.write().clear();
        self.mute_callbacks.write().clear();
        self.input_callbacks.write().clear();
        self.state_changed_callbacks.write().clear();
        self.connected_callbacks.write().clear();
        self.disconnected_callbacks.write().clear();
    }

    // =========================================================================
    // Dispatch methods
    // =========================================================================

    /// Dispatches one state change and the snapshot it produced.
    ///
    /// The change routes to the matching field-specific callbacks; the
    /// snapshot goes to every `state_changed` callback.
    pub fn dispatch(&self, change: &StateChange, snapshot: &StateSnapshot) {
        match change {
            StateChange::Power(on) => {
                let callbacks = self.power_callbacks.read();
                for callback in callbacks.values() {
                    callback(*on);
                }
            }
            StateChange::Volume(volume) => {
                let callbacks = self.volume_callbacks.read();
                for callback in callbacks.values() {
                    callback(*volume);
                }
            }
            StateChange::Mute(muted) => {
                let callbacks = self.mute_callbacks.read();
                for callback in callbacks.values() {
                    callback(*muted);
                }
            }
            StateChange::Input(input) => {
                let callbacks = self.input_callbacks.read();
                for callback in callbacks.values() {
                    callback(*input);
                }
            }
        }

        let callbacks = self.state_changed_callbacks.read();
        for callback in callbacks.values() {
            callback(snapshot);
        }
    }

    /// Dispatches the connected event with the initial snapshot.
    pub fn dispatch_connected(&self, snapshot: &StateSnapshot) {
        let callbacks = self.connected_callbacks.read();
        for callback in callbacks.values() {
            callback(snapshot);
        }
    }

    /// Dispatches the disconnected event.
    pub fn dispatch_disconnected(&self) {
        let callbacks = self.disconnected_callbacks.read();
        for callback in callbacks.values() {
            callback();
        }
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Returns the total number of registered callbacks.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.power_callbacks.read().len()
            + self.volume_callbacks.read().len()
            + self.mute_callbacks.read().len()
            + self.input_callbacks.read().len()
            + self.state_changed_callbacks.read().len()
            + self.connected_callbacks.read().len()
            + self.disconnected_callbacks.read().len()
    }

    /// Returns `true` if there are no registered callbacks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callback_count() == 0
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("callback_count", &self.callback_count())
            .finish()
    }
}
