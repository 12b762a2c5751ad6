// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IR keycode table for remote-control pass-through.
//!
//! The remote command family (`mc`) injects infrared remote keycodes
//! directly, letting a caller drive any function the physical remote
//! reaches even when no dedicated serial command exists for it.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// An IR remote keycode accepted by the remote pass-through command.
///
/// # Examples
///
/// ```
/// use lglink_lib::types::KeyCode;
///
/// assert_eq!(KeyCode::Menu.wire_value(), 0x43);
/// assert_eq!("menu".parse::<KeyCode>().unwrap(), KeyCode::Menu);
/// assert_eq!("VOLUME_UP".parse::<KeyCode>().unwrap(), KeyCode::VolumeUp);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Power,
    Energy,
    Av,
    Input,
    TvRadio,
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    List,
    QuickView,
    VolumeUp,
    VolumeDown,
    Favourite,
    Ratio,
    Mute,
    ChannelUp,
    ChannelDown,
    Menu,
    Home,
    Widgets,
    Netcast,
    QuickMenu,
    ThreeD,
    Right,
    Left,
    Up,
    Down,
    Ok,
    Back,
    Guide,
    Exit,
    Red,
    Green,
    Yellow,
    Blue,
    Text,
    TextOption,
    Subtitle,
    LiveTv,
    Record,
    Stop,
    Play,
    Pause,
    Rewind,
    FastForward,
    Simplink,
    Info,
    AudioDescription,
    App,
}

impl KeyCode {
    /// All keycodes, for table iteration.
    pub const ALL: &'static [Self] = &[
        Self::Power,
        Self::Energy,
        Self::Av,
        Self::Input,
        Self::TvRadio,
        Self::Digit0,
        Self::Digit1,
        Self::Digit2,
        Self::Digit3,
        Self::Digit4,
        Self::Digit5,
        Self::Digit6,
        Self::Digit7,
        Self::Digit8,
        Self::Digit9,
        Self::List,
        Self::QuickView,
        Self::VolumeUp,
        Self::VolumeDown,
        Self::Favourite,
        Self::Ratio,
        Self::Mute,
        Self::ChannelUp,
        Self::ChannelDown,
        Self::Menu,
        Self::Home,
        Self::Widgets,
        Self::Netcast,
        Self::QuickMenu,
        Self::ThreeD,
        Self::Right,
        Self::Left,
        Self::Up,
        Self::Down,
        Self::Ok,
        Self::Back,
        Self::Guide,
        Self::Exit,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Text,
        Self::TextOption,
        Self::Subtitle,
        Self::LiveTv,
        Self::Record,
        Self::Stop,
        Self::Play,
        Self::Pause,
        Self::Rewind,
        Self::FastForward,
        Self::Simplink,
        Self::Info,
        Self::AudioDescription,
        Self::App,
    ];

    /// Returns the IR code sent as the command data byte.
    #[must_use]
    pub const fn wire_value(&self) -> u8 {
        match self {
            Self::Power => 0x08,
            Self::Energy => 0x95,
            Self::Av => 0x30,
            Self::Input => 0x0B,
            Self::TvRadio => 0xF0,
            Self::Digit0 => 0x10,
            Self::Digit1 => 0x11,
            Self::Digit2 => 0x12,
            Self::Digit3 => 0x13,
            Self::Digit4 => 0x14,
            Self::Digit5 => 0x15,
            Self::Digit6 => 0x16,
            Self::Digit7 => 0x17,
            Self::Digit8 => 0x18,
            Self::Digit9 => 0x19,
            Self::List => 0x53,
            Self::QuickView => 0x1A,
            Self::VolumeUp => 0x02,
            Self::VolumeDown => 0x03,
            Self::Favourite => 0x1E,
            Self::Ratio => 0x79,
            Self::Mute => 0x09,
            Self::ChannelUp => 0x00,
            Self::ChannelDown => 0x01,
            Self::Menu => 0x43,
            Self::Home => 0x23,
            Self::Widgets => 0x58,
            Self::Netcast => 0x59,
            Self::QuickMenu => 0x45,
            Self::ThreeD => 0xDC,
            Self::Right => 0x06,
            Self::Left => 0x07,
            Self::Up => 0x40,
            Self::Down => 0x41,
            Self::Ok => 0x44,
            Self::Back => 0x28,
            Self::Guide => 0xA9,
            Self::Exit => 0x5B,
            Self::Red => 0x72,
            Self::Green => 0x71,
            Self::Yellow => 0x63,
            Self::Blue => 0x61,
            Self::Text => 0x20,
            Self::TextOption => 0x21,
            Self::Subtitle => 0x39,
            Self::LiveTv => 0x9E,
            Self::Record => 0xBD,
            Self::Stop => 0xB1,
            Self::Play => 0xB0,
            Self::Pause => 0xBA,
            Self::Rewind => 0x8F,
            Self::FastForward => 0x8E,
            Self::Simplink => 0x7E,
            Self::Info => 0xAA,
            Self::AudioDescription => 0x91,
            Self::App => 0x9F,
        }
    }

    /// Returns the canonical name used for string lookup.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Power => "POWER",
            Self::Energy => "ENERGY",
            Self::Av => "AV",
            Self::Input => "INPUT",
            Self::TvRadio => "TVRADIO",
            Self::Digit0 => "0",
            Self::Digit1 => "1",
            Self::Digit2 => "2",
            Self::Digit3 => "3",
            Self::Digit4 => "4",
            Self::Digit5 => "5",
            Self::Digit6 => "6",
            Self::Digit7 => "7",
            Self::Digit8 => "8",
            Self::Digit9 => "9",
            Self::List => "LIST",
            Self::QuickView => "QUICKVIEW",
            Self::VolumeUp => "VOLUMEUP",
            Self::VolumeDown => "VOLUMEDOWN",
            Self::Favourite => "FAVOURITE",
            Self::Ratio => "RATIO",
            Self::Mute => "MUTE",
            Self::ChannelUp => "CHANNELUP",
            Self::ChannelDown => "CHANNELDOWN",
            Self::Menu => "MENU",
            Self::Home => "HOME",
            Self::Widgets => "WIDGETS",
            Self::Netcast => "NETCAST",
            Self::QuickMenu => "QUICKMENU",
            Self::ThreeD => "3D",
            Self::Right => "RIGHT",
            Self::Left => "LEFT",
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Ok => "OK",
            Self::Back => "BACK",
            Self::Guide => "GUIDE",
            Self::Exit => "EXIT",
            Self::Red => "RED",
            Self::Green => "GREEN",
            Self::Yellow => "YELLOW",
            Self::Blue => "BLUE",
            Self::Text => "TEXT",
            Self::TextOption => "TEXTOPTION",
            Self::Subtitle => "SUBTITLE",
            Self::LiveTv => "LIVETV",
            Self::Record => "RECORD",
            Self::Stop => "STOP",
            Self::Play => "PLAY",
            Self::Pause => "PAUSE",
            Self::Rewind => "REWIND",
            Self::FastForward => "FASTFORWARD",
            Self::Simplink => "SIMPLINK",
            Self::Info => "INFO",
            Self::AudioDescription => "AUDIODESCRIPTION",
            Self::App => "APP",
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for KeyCode {
    type Err = ValueError;

    /// Parses a key name, ignoring case, underscores, and hyphens, so
    /// `"VOLUME_UP"`, `"volume-up"`, and `"VolumeUp"` all resolve to
    /// [`KeyCode::VolumeUp`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_uppercase())
            .collect();
        Self::ALL
            .iter()
            .copied()
            .find(|key| key.name() == normalized)
            .ok_or_else(|| ValueError::UnknownKey(s.to_string()))
    }
}
