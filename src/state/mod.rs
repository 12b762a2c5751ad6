// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state tracking and change detection.
//!
//! The state store holds the last-known power, input, volume, and mute
//! values and applies decoded responses to them, deciding whether a
//! change is real and should be published. Volume carries an extra
//! debounce rule: echoes arriving shortly after a locally-issued
//! volume-set are suppressed so a stale in-flight value cannot overwrite
//! fresh local intent.

mod device_state;
mod snapshot;
mod state_change;

pub use device_state::{DeviceState, VOLUME_DEBOUNCE};
pub use snapshot::{InputEntry, StateSnapshot};
pub use state_change::StateChange;
