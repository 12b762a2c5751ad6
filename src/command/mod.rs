// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outgoing command definitions and wire encoding.
//!
//! Every message sent to the display is a short ASCII line:
//!
//! ```text
//! <family><code> 0 <hex-data><CR>
//! ```
//!
//! - `family`: one of three protocol prefixes selecting the subsystem
//!   that interprets the command (`k` standard, `x` extended, `m` remote).
//! - `code`: a single command letter (see [`CommandCode`]).
//! - `0`: the target-address field, always zero in this deployment.
//! - `hex-data`: the data byte as lowercase, unpadded hexadecimal.
//!
//! The family is part of each command's definition, not caller-selectable:
//! input selection always travels on the extended family, keycode
//! pass-through on the remote family, and everything else on the standard
//! family. Status queries use the sentinel data byte `0xFF`, meaning
//! "report the current value" rather than "set this value".
//!
//! # Examples
//!
//! ```
//! use lglink_lib::command::Command;
//! use lglink_lib::types::{InputSource, KeyCode, Volume};
//!
//! assert_eq!(Command::set_volume(Volume::new(0x32).unwrap()).encode(), "kf 0 32\r");
//! assert_eq!(Command::power_status().encode(), "ka 0 ff\r");
//! assert_eq!(Command::select_input(InputSource::Hdmi3).encode(), "xb 0 92\r");
//! assert_eq!(Command::key_press(KeyCode::Menu).encode(), "mc 0 43\r");
//! ```

use crate::error::ValueError;
use crate::types::{InputSource, KeyCode, Volume};

/// The three protocol prefixes of the command set.
///
/// Modeled as a closed tagged enumeration: the prefixes discriminate
/// which device subsystem handles the command, they are not an
/// inheritance hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandFamily {
    /// Standard controls (`k`): power, volume, mute, picture settings.
    Standard,
    /// Extended controls (`x`): input selection.
    Extended,
    /// Remote pass-through (`m`): IR keycode injection.
    Remote,
}

impl CommandFamily {
    /// Returns the wire prefix letter.
    #[must_use]
    pub const fn letter(&self) -> char {
        match self {
            Self::Standard => 'k',
            Self::Extended => 'x',
            Self::Remote => 'm',
        }
    }
}

/// The single-letter command codes of the protocol.
///
/// All fifteen codes appear in status responses and are decoded; only
/// Power, Input, Mute, and Volume carry device-state semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandCode {
    /// Power on/off and power status (`a`).
    Power,
    /// Input selection and input status (`b`).
    Input,
    /// IR keycode pass-through (`c`).
    KeyCode,
    /// Screen mute, picture off with audio running (`d`).
    ScreenMute,
    /// Audio mute (`e`).
    Mute,
    /// Volume level (`f`).
    Volume,
    /// Picture contrast (`g`).
    Contrast,
    /// Picture brightness (`h`).
    Brightness,
    /// Colour saturation (`i`).
    Colour,
    /// Picture tint (`j`).
    Tint,
    /// Picture sharpness (`k`).
    Sharpness,
    /// On-screen display visibility (`l`).
    OsdSelect,
    /// Front-panel remote lock (`m`).
    RemoteLock,
    /// Audio balance (`t`).
    Balance,
    /// Colour temperature preset (`u`).
    ColourTemperature,
}

impl CommandCode {
    /// Returns the wire letter for this code.
    #[must_use]
    pub const fn letter(&self) -> char {
        match self {
            Self::Power => 'a',
            Self::Input => 'b',
            Self::KeyCode => 'c',
            Self::ScreenMute => 'd',
            Self::Mute => 'e',
            Self::Volume => 'f',
            Self::Contrast => 'g',
            Self::Brightness => 'h',
            Self::Colour => 'i',
            Self::Tint => 'j',
            Self::Sharpness => 'k',
            Self::OsdSelect => 'l',
            Self::RemoteLock => 'm',
            Self::Balance => 't',
            Self::ColourTemperature => 'u',
        }
    }

    /// Looks up a code by its wire letter, as echoed in responses.
    #[must_use]
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'a' => Some(Self::Power),
            'b' => Some(Self::Input),
            'c' => Some(Self::KeyCode),
            'd' => Some(Self::ScreenMute),
            'e' => Some(Self::Mute),
            'f' => Some(Self::Volume),
            'g' => Some(Self::Contrast),
            'h' => Some(Self::Brightness),
            'i' => Some(Self::Colour),
            'j' => Some(Self::Tint),
            'k' => Some(Self::Sharpness),
            'l' => Some(Self::OsdSelect),
            'm' => Some(Self::RemoteLock),
            't' => Some(Self::Balance),
            'u' => Some(Self::ColourTemperature),
            _ => None,
        }
    }
}

/// Colour temperature presets for [`Command::set_colour_temperature`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColourTemperature {
    /// Factory default white point.
    Normal,
    /// Cooler, bluer white point.
    Cool,
    /// Warmer, redder white point.
    Warm,
    /// User-calibrated white point.
    User,
}

impl ColourTemperature {
    /// Returns the data byte for this preset.
    #[must_use]
    pub const fn wire_value(&self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::Cool => 1,
            Self::Warm => 2,
            Self::User => 3,
        }
    }
}

/// Data byte meaning "report the current value" in a status query.
pub const QUERY: u8 = 0xFF;

/// One outgoing command: a (family, code, data) triple.
///
/// Commands are constructed transiently per message and encoded with
/// [`Command::encode`]. The data byte is a mandatory field, so a command
/// without data cannot be represented; callers that build commands from
/// untyped input validate before construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    family: CommandFamily,
    code: CommandCode,
    data: u8,
}

impl Command {
    const fn new(family: CommandFamily, code: CommandCode, data: u8) -> Self {
        Self { family, code, data }
    }

    /// Returns the command family.
    #[must_use]
    pub const fn family(&self) -> CommandFamily {
        self.family
    }

    /// Returns the command code.
    #[must_use]
    pub const fn code(&self) -> CommandCode {
        self.code
    }

    /// Returns the data byte.
    #[must_use]
    pub const fn data(&self) -> u8 {
        self.data
    }

    /// Encodes the command into its ASCII wire form.
    ///
    /// The data byte is rendered as lowercase hexadecimal without
    /// padding, and the line is terminated with a carriage return.
    #[must_use]
    pub fn encode(&self) -> String {
        format!(
            "{}{} 0 {:x}\r",
            self.family.letter(),
            self.code.letter(),
            self.data
        )
    }

    // ========== Power ==========

    /// Turns the display on or off.
    #[must_use]
    pub const fn set_power(on: bool) -> Self {
        Self::new(
            CommandFamily::Standard,
            CommandCode::Power,
            if on { 1 } else { 0 },
        )
    }

    /// Queries the current power state.
    #[must_use]
    pub const fn power_status() -> Self {
        Self::new(CommandFamily::Standard, CommandCode::Power, QUERY)
    }

    // ========== Volume ==========

    /// Sets the volume level.
    #[must_use]
    pub const fn set_volume(volume: Volume) -> Self {
        Self::new(CommandFamily::Standard, CommandCode::Volume, volume.value())
    }

    /// Queries the current volume level.
    #[must_use]
    pub const fn volume_status() -> Self {
        Self::new(CommandFamily::Standard, CommandCode::Volume, QUERY)
    }

    // ========== Mute ==========

    /// Mutes or unmutes the audio.
    ///
    /// The wire encoding is inverted with respect to the flag: data `0`
    /// means muted, data `1` means audio on.
    #[must_use]
    pub const fn set_mute(muted: bool) -> Self {
        Self::new(
            CommandFamily::Standard,
            CommandCode::Mute,
            if muted { 0 } else { 1 },
        )
    }

    /// Queries the current mute state.
    #[must_use]
    pub const fn mute_status() -> Self {
        Self::new(CommandFamily::Standard, CommandCode::Mute, QUERY)
    }

    // ========== Input ==========

    /// Selects an input source.
    ///
    /// Input selection travels on the extended family, unlike the other
    /// controls.
    #[must_use]
    pub const fn select_input(input: InputSource) -> Self {
        Self::new(
            CommandFamily::Extended,
            CommandCode::Input,
            input.wire_value(),
        )
    }

    /// Queries the current input source.
    #[must_use]
    pub const fn input_status() -> Self {
        Self::new(CommandFamily::Extended, CommandCode::Input, QUERY)
    }

    // ========== Remote pass-through ==========

    /// Injects an IR remote keycode.
    #[must_use]
    pub const fn key_press(key: KeyCode) -> Self {
        Self::new(CommandFamily::Remote, CommandCode::KeyCode, key.wire_value())
    }

    // ========== Picture and sound settings ==========

    /// Blanks or restores the picture while audio keeps running.
    #[must_use]
    pub const fn set_screen_mute(on: bool) -> Self {
        Self::new(
            CommandFamily::Standard,
            CommandCode::ScreenMute,
            if on { 1 } else { 0 },
        )
    }

    /// Sets the picture contrast (0-100).
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `level` exceeds 100.
    pub fn set_contrast(level: u8) -> Result<Self, ValueError> {
        Self::level(CommandCode::Contrast, level)
    }

    /// Sets the picture brightness (0-100).
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `level` exceeds 100.
    pub fn set_brightness(level: u8) -> Result<Self, ValueError> {
        Self::level(CommandCode::Brightness, level)
    }

    /// Sets the colour saturation (0-100).
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `level` exceeds 100.
    pub fn set_colour(level: u8) -> Result<Self, ValueError> {
        Self::level(CommandCode::Colour, level)
    }

    /// Sets the picture tint (0 red through 100 green).
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `level` exceeds 100.
    pub fn set_tint(level: u8) -> Result<Self, ValueError> {
        Self::level(CommandCode::Tint, level)
    }

    /// Sets the picture sharpness (0-100).
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `level` exceeds 100.
    pub fn set_sharpness(level: u8) -> Result<Self, ValueError> {
        Self::level(CommandCode::Sharpness, level)
    }

    /// Sets the audio balance (0 left through 100 right).
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `level` exceeds 100.
    pub fn set_balance(level: u8) -> Result<Self, ValueError> {
        Self::level(CommandCode::Balance, level)
    }

    /// Shows or hides the on-screen display.
    #[must_use]
    pub const fn set_osd(on: bool) -> Self {
        Self::new(
            CommandFamily::Standard,
            CommandCode::OsdSelect,
            if on { 1 } else { 0 },
        )
    }

    /// Locks or unlocks the front panel and physical remote.
    #[must_use]
    pub const fn set_remote_lock(on: bool) -> Self {
        Self::new(
            CommandFamily::Standard,
            CommandCode::RemoteLock,
            if on { 1 } else { 0 },
        )
    }

    /// Selects a colour temperature preset.
    #[must_use]
    pub const fn set_colour_temperature(preset: ColourTemperature) -> Self {
        Self::new(
            CommandFamily::Standard,
            CommandCode::ColourTemperature,
            preset.wire_value(),
        )
    }

    fn level(code: CommandCode, level: u8) -> Result<Self, ValueError> {
        if level > 100 {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: u16::from(level),
            });
        }
        Ok(Self::new(CommandFamily::Standard, code, level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_volume_set() {
        let cmd = Command::set_volume(Volume::new(0x32).unwrap());
        assert_eq!(cmd.encode(), "kf 0 32\r");
    }

    #[test]
    fn encode_power() {
        assert_eq!(Command::set_power(true).encode(), "ka 0 1\r");
        assert_eq!(Command::set_power(false).encode(), "ka 0 0\r");
        assert_eq!(Command::power_status().encode(), "ka 0 ff\r");
    }

    #[test]
    fn encode_mute_polarity() {
        // Wire encoding is inverted: 0 mutes, 1 restores audio.
        assert_eq!(Command::set_mute(true).encode(), "ke 0 0\r");
        assert_eq!(Command::set_mute(false).encode(), "ke 0 1\r");
    }

    #[test]
    fn encode_input_uses_extended_family() {
        let cmd = Command::select_input(InputSource::Hdmi1);
        assert_eq!(cmd.family(), CommandFamily::Extended);
        assert_eq!(cmd.encode(), "xb 0 90\r");
        assert_eq!(Command::input_status().encode(), "xb 0 ff\r");
    }

    #[test]
    fn encode_keycode_uses_remote_family() {
        let cmd = Command::key_press(KeyCode::VolumeUp);
        assert_eq!(cmd.family(), CommandFamily::Remote);
        assert_eq!(cmd.encode(), "mc 0 2\r");
    }

    #[test]
    fn encode_hex_is_lowercase_unpadded() {
        assert_eq!(Command::key_press(KeyCode::ThreeD).encode(), "mc 0 dc\r");
        assert_eq!(Command::set_volume(Volume::new(7).unwrap()).encode(), "kf 0 7\r");
    }

    #[test]
    fn picture_levels_validate_range() {
        assert!(Command::set_contrast(100).is_ok());
        assert!(matches!(
            Command::set_contrast(101),
            Err(ValueError::OutOfRange { actual: 101, .. })
        ));
        assert_eq!(Command::set_brightness(0x40).unwrap().encode(), "kh 0 40\r");
    }

    #[test]
    fn colour_temperature_presets() {
        assert_eq!(
            Command::set_colour_temperature(ColourTemperature::Warm).encode(),
            "ku 0 2\r"
        );
    }

    #[test]
    fn code_letter_round_trip() {
        for code in [
            CommandCode::Power,
            CommandCode::Input,
            CommandCode::KeyCode,
            CommandCode::ScreenMute,
            CommandCode::Mute,
            CommandCode::Volume,
            CommandCode::Contrast,
            CommandCode::Brightness,
            CommandCode::Colour,
            CommandCode::Tint,
            CommandCode::Sharpness,
            CommandCode::OsdSelect,
            CommandCode::RemoteLock,
            CommandCode::Balance,
            CommandCode::ColourTemperature,
        ] {
            assert_eq!(CommandCode::from_letter(code.letter()), Some(code));
        }
        assert_eq!(CommandCode::from_letter('z'), None);
    }
}
