// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Input source table for LG displays.
//!
//! The input-select command (`xb`) addresses sources by a fixed numeric
//! wire value. The set of sources is closed and device-specific; values
//! outside this table are reported by the display for sources this
//! command set cannot select.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ValueError;

/// A selectable input source.
///
/// Each source carries a fixed wire value used in the input-select
/// command and returned by the input-status query.
///
/// # Examples
///
/// ```
/// use lglink_lib::types::InputSource;
///
/// let hdmi = InputSource::Hdmi1;
/// assert_eq!(hdmi.wire_value(), 0x90);
/// assert_eq!(hdmi.label(), "HDMI1");
///
/// // Reverse lookup from a status response data byte
/// assert_eq!(InputSource::from_wire(0x92), Some(InputSource::Hdmi3));
/// assert_eq!(InputSource::from_wire(0x55), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum InputSource {
    /// Digital tuner.
    Dtv,
    /// Composite input 1.
    Av1,
    /// Composite input 2.
    Av2,
    /// Component input 1.
    Component1,
    /// Component input 2.
    Component2,
    /// Analog RGB input.
    Rgb,
    /// HDMI input 1.
    Hdmi1,
    /// HDMI input 2.
    Hdmi2,
    /// HDMI input 3.
    Hdmi3,
}

impl InputSource {
    /// All selectable sources, in display order.
    pub const ALL: &'static [Self] = &[
        Self::Dtv,
        Self::Av1,
        Self::Av2,
        Self::Component1,
        Self::Component2,
        Self::Rgb,
        Self::Hdmi1,
        Self::Hdmi2,
        Self::Hdmi3,
    ];

    /// Returns the data byte used on the wire for this source.
    #[must_use]
    pub const fn wire_value(&self) -> u8 {
        match self {
            Self::Dtv => 0x00,
            Self::Av1 => 0x20,
            Self::Av2 => 0x21,
            Self::Component1 => 0x40,
            Self::Component2 => 0x65,
            Self::Rgb => 0x60,
            Self::Hdmi1 => 0x90,
            Self::Hdmi2 => 0x91,
            Self::Hdmi3 => 0x92,
        }
    }

    /// Returns the human-readable label for this source.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Dtv => "DTV",
            Self::Av1 => "AV1",
            Self::Av2 => "AV2",
            Self::Component1 => "Component1",
            Self::Component2 => "Component2",
            Self::Rgb => "RGB",
            Self::Hdmi1 => "HDMI1",
            Self::Hdmi2 => "HDMI2",
            Self::Hdmi3 => "HDMI3",
        }
    }

    /// Looks up a source by its wire value.
    ///
    /// Returns `None` for values with no entry in the table. The caller
    /// treats an unmapped value as a recoverable anomaly, not an error.
    #[must_use]
    pub fn from_wire(value: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.wire_value() == value)
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for InputSource {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|source| source.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValueError::UnknownInput(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_are_unique() {
        for (i, a) in InputSource::ALL.iter().enumerate() {
            for b in &InputSource::ALL[i + 1..] {
                assert_ne!(a.wire_value(), b.wire_value());
            }
        }
    }

    #[test]
    fn from_wire_round_trip() {
        for source in InputSource::ALL {
            assert_eq!(InputSource::from_wire(source.wire_value()), Some(*source));
        }
    }

    #[test]
    fn from_wire_unmapped() {
        assert_eq!(InputSource::from_wire(0x55), None);
        assert_eq!(InputSource::from_wire(0xFE), None);
    }

    #[test]
    fn from_str_case_insensitive() {
        assert_eq!("hdmi1".parse::<InputSource>().unwrap(), InputSource::Hdmi1);
        assert_eq!("DTV".parse::<InputSource>().unwrap(), InputSource::Dtv);
        assert_eq!(
            "component2".parse::<InputSource>().unwrap(),
            InputSource::Component2
        );
    }

    #[test]
    fn from_str_unknown() {
        let result = "VGA".parse::<InputSource>();
        assert!(matches!(result, Err(ValueError::UnknownInput(_))));
    }

    #[test]
    fn display_matches_label() {
        assert_eq!(InputSource::Hdmi3.to_string(), "HDMI3");
    }
}
