// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `LgLink` library.
//!
//! This module provides the error hierarchy for handling failures across
//! the library: value validation, response decoding, and transport
//! communication.

use thiserror::Error;

/// The main error type for this library.
///
/// This enum encompasses all possible errors that can occur when
/// interacting with an LG display.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while decoding a response frame.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Error occurred during transport communication.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

/// Errors related to value validation and constraints.
///
/// These errors occur when attempting to construct a command from
/// invalid or missing values. An encoding error is always fatal to the
/// single command being built, never silent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
        /// The actual value that was provided.
        actual: u16,
    },

    /// An input source name was not found in the input table.
    #[error("unknown input source: {0}")]
    UnknownInput(String),

    /// A key name was not found in the IR keycode table.
    #[error("unknown key: {0}")]
    UnknownKey(String),

    /// An action parameter is missing or has the wrong shape.
    #[error("invalid parameter for action {action}: {message}")]
    InvalidParameter {
        /// The action the parameter was supplied for.
        action: String,
        /// Description of what was wrong with it.
        message: String,
    },
}

/// Errors related to decoding inbound response frames.
///
/// Decode anomalies are recovered locally: the offending frame is logged
/// and discarded without touching device state, and never terminates the
/// read loop.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The frame is shorter than the fixed response layout.
    #[error("frame too short: expected at least 9 characters, got {actual}")]
    TooShort {
        /// Number of characters in the frame.
        actual: usize,
    },

    /// The leading command letter does not map to a known command.
    #[error("unknown command code: {0:?}")]
    UnknownCommand(char),

    /// The two data characters are not valid hexadecimal.
    #[error("invalid data digits: {0:?}")]
    InvalidData(String),
}

/// Errors related to the TCP transport.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Connection to the serial bridge failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// No connection is currently established.
    #[error("not connected")]
    NotConnected,

    /// An I/O error occurred on the established connection.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
