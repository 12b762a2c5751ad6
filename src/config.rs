// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Connection configuration.

use std::time::Duration;

/// Configuration for one display connection.
///
/// An explicit immutable value passed at construction time. Changing
/// configuration means handing a new value to
/// [`Display::reconfigure`](crate::Display::reconfigure), which tears
/// down the existing connection first.
///
/// The serial bridge's own settings (baud rate, parity) are configured
/// on the bridge and are not part of this client.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use lglink_lib::DisplayConfig;
///
/// let config = DisplayConfig::new("lg-tv-moxa");
/// assert_eq!(config.port, 3463);
/// assert_eq!(config.poll_interval, Duration::from_millis(500));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Hostname or address of the serial-to-network bridge.
    pub host: String,
    /// TCP port of the bridge.
    pub port: u16,
    /// Interval between status poll rounds.
    pub poll_interval: Duration,
}

impl DisplayConfig {
    /// Default bridge port.
    pub const DEFAULT_PORT: u16 = 3463;

    /// Default poll interval (500 ms).
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

    /// Creates a configuration with default port and poll interval.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
        }
    }

    /// Returns the `host:port` address string for the bridge.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = DisplayConfig::new("bridge.local");
        assert_eq!(config.host, "bridge.local");
        assert_eq!(config.port, 3463);
        assert_eq!(config.poll_interval, Duration::from_millis(500));
    }

    #[test]
    fn addr_format() {
        let mut config = DisplayConfig::new("10.0.0.7");
        config.port = 4001;
        assert_eq!(config.addr(), "10.0.0.7:4001");
    }
}
