// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State snapshots published to subscribers.

use serde::Serialize;

use crate::types::{InputSource, Volume};

/// One entry in the static table of selectable inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InputEntry {
    /// The input source.
    pub value: InputSource,
    /// Its human-readable label.
    pub label: &'static str,
}

/// An immutable snapshot of device state.
///
/// Every real state change publishes exactly one snapshot carrying the
/// full current state plus the static input table, so subscribers never
/// have to assemble state from deltas. Fields the device has not yet
/// reported are `None`.
///
/// Snapshots serialize to JSON for hosts that consume state over an
/// untyped boundary:
///
/// ```
/// use lglink_lib::state::DeviceState;
///
/// let snapshot = DeviceState::new().snapshot();
/// let json = serde_json::to_value(&snapshot).unwrap();
/// assert!(json["inputs"].as_array().unwrap().len() > 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateSnapshot {
    /// Whether the display is on.
    pub power: Option<bool>,
    /// The active input source.
    pub input: Option<InputSource>,
    /// The active input's label, for display without a table lookup.
    pub input_label: Option<&'static str>,
    /// The volume level (0-100).
    pub volume: Option<u8>,
    /// Whether audio is muted.
    pub mute: Option<bool>,
    /// The static table of selectable inputs.
    pub inputs: Vec<InputEntry>,
}

impl StateSnapshot {
    pub(crate) fn new(
        power: Option<bool>,
        input: Option<InputSource>,
        volume: Option<Volume>,
        mute: Option<bool>,
    ) -> Self {
        Self {
            power,
            input,
            input_label: input.map(|i| i.label()),
            volume: volume.map(|v| v.value()),
            mute,
            inputs: InputSource::ALL
                .iter()
                .map(|source| InputEntry {
                    value: *source,
                    label: source.label(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_includes_full_input_table() {
        let snapshot = StateSnapshot::new(None, None, None, None);
        assert_eq!(snapshot.inputs.len(), InputSource::ALL.len());
        assert_eq!(snapshot.inputs[0].label, "DTV");
    }

    #[test]
    fn snapshot_labels_active_input() {
        let snapshot = StateSnapshot::new(
            Some(true),
            Some(InputSource::Hdmi2),
            Some(Volume::new(40).unwrap()),
            Some(false),
        );
        assert_eq!(snapshot.input, Some(InputSource::Hdmi2));
        assert_eq!(snapshot.input_label, Some("HDMI2"));
        assert_eq!(snapshot.volume, Some(40));
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let snapshot = StateSnapshot::new(Some(true), Some(InputSource::Dtv), None, Some(true));
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["power"], serde_json::json!(true));
        assert_eq!(json["input_label"], serde_json::json!("DTV"));
        assert_eq!(json["volume"], serde_json::Value::Null);
    }
}
