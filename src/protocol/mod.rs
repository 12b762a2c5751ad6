// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Inbound wire protocol: frame segmentation and response decoding.
//!
//! The display answers every command with a short ASCII frame terminated
//! by the byte `0x78` (the character `x`):
//!
//! ```text
//! <code> <set-id> <OK|NG><hex-data>x
//! ```
//!
//! For example, a successful power-status response reporting "on" arrives
//! as the bytes `a 01 OK01x`. [`FrameAssembler`] segments the raw byte
//! stream on the delimiter, and [`decode`] parses each assembled frame
//! into a [`ParsedResponse`] by its fixed character offsets.
//!
//! Both halves are pure and transport-independent, so they can be tested
//! without a live socket. No parse failure here ever reaches the
//! transport read loop; a malformed frame is logged by the caller and
//! dropped.

mod frame;
mod response;

pub use frame::{FRAME_DELIMITER, FrameAssembler};
pub use response::{ParsedResponse, decode};
