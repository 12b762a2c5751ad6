// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response frame parsing.

use crate::command::CommandCode;
use crate::error::DecodeError;

/// One decoded status response.
///
/// The response layout uses fixed character offsets within a frame:
/// offset 0 carries the command-code letter, offsets 5-6 carry `OK` on
/// success (any other pair is a negative acknowledgement), and offsets
/// 7-8 carry the data byte as two hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedResponse {
    /// The command this response answers.
    pub code: CommandCode,
    /// Whether the display acknowledged the command.
    pub success: bool,
    /// The data byte. Only meaningful when `success` is true; negative
    /// acknowledgements carry no usable value and decode to zero.
    pub data: u8,
}

/// Decodes one assembled frame into a [`ParsedResponse`].
///
/// Frames that do not match the expected shape are not status frames;
/// they are reported as a [`DecodeError`] for the caller to log and
/// discard. Decoding never panics, whatever bytes arrive.
///
/// # Errors
///
/// Returns [`DecodeError::TooShort`] for frames under the fixed layout
/// length, [`DecodeError::UnknownCommand`] when the leading letter maps
/// to no command, and [`DecodeError::InvalidData`] when a success frame
/// carries non-hex data digits.
///
/// # Examples
///
/// ```
/// use lglink_lib::command::CommandCode;
/// use lglink_lib::protocol::decode;
///
/// let response = decode("a 01 OK01").unwrap();
/// assert_eq!(response.code, CommandCode::Power);
/// assert!(response.success);
/// assert_eq!(response.data, 0x01);
/// ```
pub fn decode(frame: &str) -> Result<ParsedResponse, DecodeError> {
    let chars: Vec<char> = frame.chars().collect();
    if chars.len() < 9 {
        return Err(DecodeError::TooShort {
            actual: chars.len(),
        });
    }

    let code = CommandCode::from_letter(chars[0]).ok_or(DecodeError::UnknownCommand(chars[0]))?;
    let success = chars[5] == 'O' && chars[6] == 'K';

    let data = if success {
        let digits: String = chars[7..9].iter().collect();
        u8::from_str_radix(&digits, 16).map_err(|_| DecodeError::InvalidData(digits))?
    } else {
        0
    };

    Ok(ParsedResponse {
        code,
        success,
        data,
    })
}
