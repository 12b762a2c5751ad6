// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core value types for LG display control.
//!
//! This module provides type-safe representations of the values carried
//! by the RS-232C command set: volume levels, input sources, and IR
//! keycodes.

mod input;
mod keycode;
mod volume;

pub use input::InputSource;
pub use keycode::KeyCode;
pub use volume::Volume;
