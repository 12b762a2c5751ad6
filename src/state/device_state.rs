// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state store.

use std::time::{Duration, Instant};

use crate::command::CommandCode;
use crate::protocol::ParsedResponse;
use crate::types::{InputSource, Volume};

use super::{StateChange, StateSnapshot};

/// Window after a locally-issued volume-set during which polled volume
/// echoes are ignored.
pub const VOLUME_DEBOUNCE: Duration = Duration::from_millis(1000);

/// Tracked state of an LG display.
///
/// All fields are optional because state is unknown until the device
/// first reports it. Fields are only ever updated from successful
/// responses; a negative acknowledgement never mutates state.
///
/// The store takes the current time as an explicit argument rather than
/// reading a clock, so the debounce rule is testable without a runtime.
///
/// # Examples
///
/// ```
/// use std::time::Instant;
/// use lglink_lib::protocol::decode;
/// use lglink_lib::state::{DeviceState, StateChange};
///
/// let mut state = DeviceState::new();
/// let response = decode("a 01 OK01").unwrap();
/// let change = state.apply(&response, Instant::now());
/// assert_eq!(change, Some(StateChange::Power(true)));
/// assert_eq!(state.power(), Some(true));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DeviceState {
    power: Option<bool>,
    input: Option<InputSource>,
    volume: Option<Volume>,
    mute: Option<bool>,
    /// When the last local volume-set command was issued.
    last_volume_command: Option<Instant>,
}

impl DeviceState {
    /// Creates a new state store with everything unknown.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the power state, if known.
    #[must_use]
    pub fn power(&self) -> Option<bool> {
        self.power
    }

    /// Gets the active input source, if known.
    #[must_use]
    pub fn input(&self) -> Option<InputSource> {
        self.input
    }

    /// Gets the volume level, if known.
    #[must_use]
    pub fn volume(&self) -> Option<Volume> {
        self.volume
    }

    /// Gets the mute state, if known.
    #[must_use]
    pub fn mute(&self) -> Option<bool> {
        self.mute
    }

    /// Records that a volume-set command was issued locally at `now`.
    ///
    /// Volume echoes observed within [`VOLUME_DEBOUNCE`] of this instant
    /// are dropped by [`apply`](Self::apply), so a stale in-flight echo
    /// cannot overwrite the just-issued level.
    pub fn note_volume_command(&mut self, now: Instant) {
        self.last_volume_command = Some(now);
    }

    /// Applies a decoded response, returning the externally-visible
    /// change it caused, if any.
    ///
    /// Only the four status codes carry state semantics; every other
    /// code decodes to `None` here and is discarded by the caller.
    /// Responses with `success == false` never mutate state.
    pub fn apply(&mut self, response: &ParsedResponse, now: Instant) -> Option<StateChange> {
        if !response.success {
            return None;
        }

        match response.code {
            CommandCode::Power => {
                let new_power = response.data != 0;
                if self.power == Some(new_power) {
                    None
                } else {
                    self.power = Some(new_power);
                    Some(StateChange::Power(new_power))
                }
            }
            CommandCode::Mute => {
                // Inverted wire encoding: data 0 is muted, 1 is audio on.
                let new_mute = response.data == 0;
                if self.mute == Some(new_mute) {
                    None
                } else {
                    self.mute = Some(new_mute);
                    Some(StateChange::Mute(new_mute))
                }
            }
            CommandCode::Volume => {
                let new_volume = Volume::clamped(response.data);
                if self.volume == Some(new_volume) {
                    return None;
                }
                if let Some(issued) = self.last_volume_command
                    && now.duration_since(issued) < VOLUME_DEBOUNCE
                {
                    tracing::debug!(
                        volume = new_volume.value(),
                        "dropping volume echo inside debounce window"
                    );
                    return None;
                }
                self.volume = Some(new_volume);
                Some(StateChange::Volume(new_volume))
            }
            CommandCode::Input => {
                let Some(new_input) = InputSource::from_wire(response.data) else {
                    tracing::debug!(data = response.data, "unmapped input source value");
                    return None;
                };
                if self.input == Some(new_input) {
                    None
                } else {
                    self.input = Some(new_input);
                    Some(StateChange::Input(new_input))
                }
            }
            _ => None,
        }
    }

    /// Returns a full immutable snapshot of the current state, including
    /// the static table of selectable inputs.
    #[must_use]
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot::new(self.power, self.input, self.volume, self.mute)
    }

    /// Clears all state, resetting to unknown.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::decode;

    fn apply_frame(state: &mut DeviceState, frame: &str, now: Instant) -> Option<StateChange> {
        state.apply(&decode(frame).unwrap(), now)
    }

    #[test]
    fn new_state_is_unknown() {
        let state = DeviceState::new();
        assert!(state.power().is_none());
        assert!(state.input().is_none());
        assert!(state.volume().is_none());
        assert!(state.mute().is_none());
    }

    #[test]
    fn power_change_detection() {
        let mut state = DeviceState::new();
        let now = Instant::now();

        let change = apply_frame(&mut state, "a 01 OK01", now);
        assert_eq!(change, Some(StateChange::Power(true)));

        // Same value again is not a change.
        assert_eq!(apply_frame(&mut state, "a 01 OK01", now), None);

        let change = apply_frame(&mut state, "a 01 OK00", now);
        assert_eq!(change, Some(StateChange::Power(false)));
    }

    #[test]
    fn power_nonzero_means_on() {
        let mut state = DeviceState::new();
        let change = apply_frame(&mut state, "a 01 OK02", Instant::now());
        assert_eq!(change, Some(StateChange::Power(true)));
    }

    #[test]
    fn mute_polarity_is_inverted() {
        let mut state = DeviceState::new();
        let now = Instant::now();

        let change = apply_frame(&mut state, "e 01 OK00", now);
        assert_eq!(change, Some(StateChange::Mute(true)));
        assert_eq!(state.mute(), Some(true));

        let change = apply_frame(&mut state, "e 01 OK01", now);
        assert_eq!(change, Some(StateChange::Mute(false)));
        assert_eq!(state.mute(), Some(false));
    }

    #[test]
    fn negative_ack_never_mutates() {
        let mut state = DeviceState::new();
        assert_eq!(apply_frame(&mut state, "a 01 NG01", Instant::now()), None);
        assert!(state.power().is_none());
    }

    #[test]
    fn volume_applies_without_prior_local_command() {
        let mut state = DeviceState::new();
        let change = apply_frame(&mut state, "f 01 OK32", Instant::now());
        assert_eq!(change, Some(StateChange::Volume(Volume::new(0x32).unwrap())));
    }

    #[test]
    fn volume_debounce_drops_inside_window() {
        let mut state = DeviceState::new();
        let issued = Instant::now();
        state.note_volume_command(issued);

        // A different value 500ms later is silently dropped.
        let change = apply_frame(
            &mut state,
            "f 01 OK10",
            issued + Duration::from_millis(500),
        );
        assert_eq!(change, None);
        assert!(state.volume().is_none());

        // The same value 1500ms later is applied.
        let change = apply_frame(
            &mut state,
            "f 01 OK10",
            issued + Duration::from_millis(1500),
        );
        assert_eq!(change, Some(StateChange::Volume(Volume::new(0x10).unwrap())));
    }

    #[test]
    fn volume_equal_value_is_not_a_change() {
        let mut state = DeviceState::new();
        let now = Instant::now();
        apply_frame(&mut state, "f 01 OK20", now);
        assert_eq!(apply_frame(&mut state, "f 01 OK20", now), None);
    }

    #[test]
    fn input_mapping() {
        let mut state = DeviceState::new();
        let change = apply_frame(&mut state, "b 01 OK92", Instant::now());
        assert_eq!(change, Some(StateChange::Input(InputSource::Hdmi3)));
        assert_eq!(state.input(), Some(InputSource::Hdmi3));
    }

    #[test]
    fn unmapped_input_leaves_state_unchanged() {
        let mut state = DeviceState::new();
        let now = Instant::now();
        apply_frame(&mut state, "b 01 OK92", now);

        // 0x55 has no table entry; no change published, state kept.
        assert_eq!(apply_frame(&mut state, "b 01 OK55", now), None);
        assert_eq!(state.input(), Some(InputSource::Hdmi3));
    }

    #[test]
    fn stateless_codes_are_discarded() {
        let mut state = DeviceState::new();
        let now = Instant::now();
        assert_eq!(apply_frame(&mut state, "g 01 OK40", now), None);
        assert_eq!(apply_frame(&mut state, "d 01 OK01", now), None);
        assert_eq!(apply_frame(&mut state, "u 01 OK02", now), None);
    }

    #[test]
    fn snapshot_carries_current_state_and_input_table() {
        let mut state = DeviceState::new();
        let now = Instant::now();
        apply_frame(&mut state, "a 01 OK01", now);
        apply_frame(&mut state, "f 01 OK19", now);

        let snapshot = state.snapshot();
        assert_eq!(snapshot.power, Some(true));
        assert_eq!(snapshot.volume, Some(0x19));
        assert_eq!(snapshot.mute, None);
        assert_eq!(snapshot.inputs.len(), InputSource::ALL.len());
    }

    #[test]
    fn clear_resets_to_unknown() {
        let mut state = DeviceState::new();
        apply_frame(&mut state, "a 01 OK01", Instant::now());
        state.clear();
        assert!(state.power().is_none());
    }
}
