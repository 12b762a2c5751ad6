// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change representation.

use crate::types::{InputSource, Volume};

/// One externally-visible change to device state.
///
/// Produced by [`DeviceState::apply`](super::DeviceState::apply) when a
/// decoded response moves a field to a new value, and consumed by the
/// subscription layer to dispatch the matching callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    /// The display turned on or off.
    Power(bool),
    /// The active input source changed.
    Input(InputSource),
    /// The volume level changed.
    Volume(Volume),
    /// Audio was muted or unmuted.
    Mute(bool),
}

impl StateChange {
    /// Returns `true` if this is a power change.
    #[must_use]
    pub fn is_power(&self) -> bool {
        matches!(self, Self::Power(_))
    }

    /// Returns `true` if this is a volume change.
    #[must_use]
    pub fn is_volume(&self) -> bool {
        matches!(self, Self::Volume(_))
    }
}
