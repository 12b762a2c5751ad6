// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `LgLink` Lib - A Rust library to control LG displays.
//!
//! This library speaks the LG RS-232C display-control command set over a
//! persistent TCP connection to a serial-to-network bridge. It keeps a
//! best-effort mirror of device state (power, input source, volume,
//! mute) by polling the display, and translates high-level commands into
//! the ASCII wire format.
//!
//! # Supported Features
//!
//! - **Power control**: Turn the display on/off, query power status
//! - **Audio control**: Volume level, mute, balance
//! - **Input selection**: DTV, composite, component, RGB, and HDMI inputs
//! - **Remote pass-through**: Inject IR keycodes for anything else
//! - **Picture settings**: Contrast, brightness, colour, tint, sharpness,
//!   screen mute, colour temperature
//! - **State subscriptions**: Callbacks on every real state change
//!
//! # Quick Start
//!
//! ```no_run
//! use lglink_lib::Display;
//! use lglink_lib::subscription::Subscribable;
//! use lglink_lib::types::Volume;
//!
//! #[tokio::main]
//! async fn main() -> lglink_lib::Result<()> {
//!     let display = Display::builder("lg-tv-moxa").build();
//!
//!     // Subscribe before connecting so the first poll round is observed
//!     display.on_power_changed(|on| {
//!         println!("display is now {}", if on { "on" } else { "off" });
//!     });
//!
//!     display.connect().await?;
//!
//!     display.set_power(true).await?;
//!     display.set_volume(Volume::new(25)?).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Untyped actions
//!
//! Hosts that drive the client over an untyped boundary use
//! [`Display::perform`]:
//!
//! ```no_run
//! # async fn example(display: lglink_lib::Display) {
//! display.perform("input", &serde_json::json!("HDMI2")).await;
//! display.perform("keycode", &serde_json::json!("MENU")).await;
//! # }
//! ```
//!
//! # Delivery semantics
//!
//! Commands are one-way writes with no delivery guarantee: the protocol
//! is not request/response-paired, responses are matched to queries by
//! command code alone, and a write to a dead connection fails without
//! retry. The client never reconnects on its own; it stays disconnected
//! until [`Display::connect`] or [`Display::reconfigure`] is called.

pub mod command;
mod config;
mod device;
pub mod error;
pub mod protocol;
pub mod state;
pub mod subscription;
pub mod types;

pub use command::{ColourTemperature, Command, CommandCode, CommandFamily};
pub use config::DisplayConfig;
pub use device::{Display, DisplayBuilder};
pub use error::{DecodeError, Error, ProtocolError, Result, ValueError};
pub use protocol::{FrameAssembler, ParsedResponse};
pub use state::{StateChange, StateSnapshot};
pub use subscription::{CallbackRegistry, Subscribable, SubscriptionId};
pub use types::{InputSource, KeyCode, Volume};
